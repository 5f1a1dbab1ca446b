//! Card search query construction.
//!
//! Builds the structured text query the card database API accepts from
//! free-text fragments and color/rarity filters. Rendering is pure
//! string assembly; the HTTP transport is a collaborator outside this
//! crate.
//!
//! Queries always include `game:paper`, rarities render as an OR group,
//! and color identity supports the `=` / `<=` / `>=` comparison
//! operators. Sort order and page number travel as URL parameters, not
//! query terms.

use std::fmt::Write as _;

/// Base URL of the card database API.
pub const BASE_URL: &str = "https://api.scryfall.com";

/// The five card colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    /// Single-letter query code (`u` for blue).
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Blue => 'u',
            Color::Black => 'b',
            Color::Red => 'r',
            Color::Green => 'g',
        }
    }
}

/// Card rarity filter values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    /// Single-letter query code.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Rarity::Common => 'c',
            Rarity::Uncommon => 'u',
            Rarity::Rare => 'r',
            Rarity::Mythic => 'm',
        }
    }
}

/// Comparison operator for color-identity matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentityOp {
    /// Identity is exactly the given colors (`=`).
    Exactly,
    /// Identity fits within the given colors (`<=`).
    AtMost,
    /// Identity includes at least the given colors (`>=`).
    AtLeast,
}

impl IdentityOp {
    #[must_use]
    fn symbol(self) -> &'static str {
        match self {
            IdentityOp::Exactly => "=",
            IdentityOp::AtMost => "<=",
            IdentityOp::AtLeast => ">=",
        }
    }
}

/// Result ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Name,
    Cmc,
    Rarity,
    Released,
}

impl SortOrder {
    #[must_use]
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Name => "name",
            SortOrder::Cmc => "cmc",
            SortOrder::Rarity => "rarity",
            SortOrder::Released => "released",
        }
    }
}

/// A card search, built up from the filter screen's fields.
///
/// ## Example
///
/// ```
/// use commander_tracker::search::{Color, SearchQuery, SortOrder};
///
/// let query = SearchQuery::new()
///     .name("goblin")
///     .colors([Color::Red])
///     .order(SortOrder::Name);
///
/// assert_eq!(query.query_string(), "game:paper+name:goblin+color:r");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchQuery {
    name: Option<String>,
    oracle_text: Option<String>,
    type_line: Option<String>,
    colors: Vec<Color>,
    identity: Option<(IdentityOp, Vec<Color>)>,
    rarities: Vec<Rarity>,
    sort: Option<SortOrder>,
    page: Option<u32>,
}

impl SearchQuery {
    /// Start an empty query (matches everything playable on paper).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Match words in the card name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = some_nonempty(name.into());
        self
    }

    /// Match words in the rules text.
    #[must_use]
    pub fn oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = some_nonempty(text.into());
        self
    }

    /// Match the type line.
    #[must_use]
    pub fn type_line(mut self, type_line: impl Into<String>) -> Self {
        self.type_line = some_nonempty(type_line.into());
        self
    }

    /// Filter by card color.
    #[must_use]
    pub fn colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }

    /// Filter by commander color identity, fitting within the given
    /// colors (`<=`, the usual deck-building question).
    #[must_use]
    pub fn commander_colors(self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.commander_colors_with(IdentityOp::AtMost, colors)
    }

    /// Filter by commander color identity with an explicit comparison.
    #[must_use]
    pub fn commander_colors_with(
        mut self,
        op: IdentityOp,
        colors: impl IntoIterator<Item = Color>,
    ) -> Self {
        let colors: Vec<Color> = colors.into_iter().collect();
        self.identity = (!colors.is_empty()).then_some((op, colors));
        self
    }

    /// Filter by rarity; multiple rarities combine as an OR group.
    #[must_use]
    pub fn rarities(mut self, rarities: impl IntoIterator<Item = Rarity>) -> Self {
        self.rarities = rarities.into_iter().collect();
        self
    }

    /// Sort order for results.
    #[must_use]
    pub fn order(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Result page to fetch (1-based).
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Render the `q=` query terms, joined with `+`.
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut terms = vec!["game:paper".to_string()];

        if let Some(name) = &self.name {
            terms.push(format!("name:{name}"));
        }
        if let Some(text) = &self.oracle_text {
            terms.push(format!("oracle:{text}"));
        }
        if let Some(type_line) = &self.type_line {
            terms.push(format!("type:{type_line}"));
        }
        if !self.colors.is_empty() {
            terms.push(format!("color:{}", color_codes(&self.colors)));
        }
        if let Some((op, colors)) = &self.identity {
            terms.push(format!("commander{}{}", op.symbol(), color_codes(colors)));
        }
        if !self.rarities.is_empty() {
            let group: Vec<String> = self
                .rarities
                .iter()
                .map(|r| format!("rarity:{}", r.code()))
                .collect();
            terms.push(format!("({})", group.join(" OR ")));
        }

        terms.join("+")
    }

    /// Render the request path against the API's search endpoint,
    /// including order and page parameters when set.
    #[must_use]
    pub fn request_path(&self) -> String {
        let mut path = format!("/cards/search?q={}", self.query_string());
        if let Some(sort) = self.sort {
            let _ = write!(path, "&order={}", sort.as_str());
        }
        if let Some(page) = self.page {
            let _ = write!(path, "&page={page}");
        }
        path
    }

    /// Render the full request URL against [`BASE_URL`].
    #[must_use]
    pub fn request_url(&self) -> String {
        format!("{BASE_URL}{}", self.request_path())
    }
}

fn some_nonempty(s: String) -> Option<String> {
    let s = s.trim().to_string();
    (!s.is_empty()).then_some(s)
}

fn color_codes(colors: &[Color]) -> String {
    colors.iter().map(|c| c.code()).collect()
}

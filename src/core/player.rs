//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. The tracker runs with a fixed roster of
//! four players whose ids are 1-based (1..=4), matching how the table
//! keys are persisted.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access. Lookups with
//! an id outside the roster return `None` rather than panicking, which is
//! what lets the store treat unknown player ids as silent no-ops.

use serde::{Deserialize, Serialize};

/// Number of players in the standard roster.
pub const PLAYER_COUNT: usize = 4;

/// Player identifier.
///
/// Player ids are 1-based: the first player is `PlayerId(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Iterate over all player IDs for a roster of `player_count` players.
    ///
    /// ```
    /// use commander_tracker::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(1));
    /// assert_eq!(players[3], PlayerId::new(4));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..=player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Display configuration for one player.
///
/// The color is cosmetic; nothing in the state model depends on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
}

/// The fixed set of configured players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<PlayerConfig>,
}

impl Roster {
    /// The standard four-player roster with the default panel colors.
    #[must_use]
    pub fn standard() -> Self {
        let colors: [&str; PLAYER_COUNT] = ["#1E3A8A", "#CA8A04", "#15803D", "#B91C1C"];
        let players = colors
            .iter()
            .enumerate()
            .map(|(i, color)| PlayerConfig {
                id: PlayerId::new(i as u8 + 1),
                name: format!("Player {}", i + 1),
                color: (*color).to_string(),
            })
            .collect();
        Self { players }
    }

    /// Number of configured players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Check whether an id belongs to the roster.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == player)
    }

    /// Configured players in id order.
    #[must_use]
    pub fn players(&self) -> &[PlayerConfig] {
        &self.players
    }

    /// Iterate over the roster's player IDs.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::standard()
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per roster player; entry `i` holds
/// the data for `PlayerId(i + 1)`.
///
/// ## Example
///
/// ```
/// use commander_tracker::core::{PlayerId, PlayerMap};
///
/// let mut life: PlayerMap<i64> = PlayerMap::with_value(4, 40);
///
/// assert_eq!(life.get(PlayerId::new(1)), Some(&40));
/// assert_eq!(life.get(PlayerId::new(9)), None);
///
/// *life.get_mut(PlayerId::new(2)).unwrap() = 35;
/// assert_eq!(life.get(PlayerId::new(2)), Some(&35));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each player.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (1..=player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    fn slot(&self, player: PlayerId) -> Option<usize> {
        let id = player.0 as usize;
        (1..=self.data.len()).contains(&id).then(|| id - 1)
    }

    /// Get a reference to a player's data, or `None` for an unknown id.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.slot(player).map(|i| &self.data[i])
    }

    /// Get a mutable reference to a player's data, or `None` for an unknown id.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.slot(player).map(move |i| &mut self.data[i])
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8 + 1), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8 + 1), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (1..=self.data.len() as u8).map(PlayerId)
    }
}

//! Card search: query construction and the API response model.
//!
//! The game state store has no dependency on this module; it exists for
//! the search screens. No HTTP transport lives here - callers hand
//! [`SearchQuery::request_url`] to whatever client the app uses and
//! parse the body as a [`SearchResponse`].

pub mod cards;
pub mod query;

pub use cards::{Card, CardFace, ImageUris, Legality, Prices, SearchResponse};
pub use query::{Color, IdentityOp, Rarity, SearchQuery, SortOrder, BASE_URL};

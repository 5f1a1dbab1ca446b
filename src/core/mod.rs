//! Core domain types: players, counters, modes.
//!
//! These are the building blocks the state tables are keyed on. They are
//! all closed sets - the roster is fixed at construction, and counter and
//! mode tags are enums rather than free strings.

pub mod counter;
pub mod mode;
pub mod player;

pub use counter::{CounterBag, CounterType};
pub use mode::{ModeSet, PlayerMode};
pub use player::{PlayerConfig, PlayerId, PlayerMap, Roster, PLAYER_COUNT};

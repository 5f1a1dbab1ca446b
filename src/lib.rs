//! # commander-tracker
//!
//! Core state store for a four-player Commander life tracker.
//!
//! ## Design Principles
//!
//! 1. **Explicit store, no globals**: all state lives in a
//!    [`GameStore`] with a defined lifecycle (`new` / `load_all` /
//!    `reset_all`), injected into the UI layer.
//!
//! 2. **Closed sets**: the roster, counter types, and mode tags are
//!    fixed enumerations. Unknown player ids are silent no-ops;
//!    unrecognized counter or mode names are unrepresentable.
//!
//! 3. **Availability over durability**: persistence failures never
//!    surface to the caller. Reads fall back to documented defaults,
//!    writes are best-effort against the optimistic in-memory state.
//!
//! ## Modules
//!
//! - `core`: player ids and roster, counter types, mode tags
//! - `state`: state tables, invariants, and the `GameStore`
//! - `storage`: key-value persistence (`Storage` trait, file and
//!   memory backends, versioned schema envelope)
//! - `search`: card search query construction and response model

pub mod core;
pub mod search;
pub mod state;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    CounterBag, CounterType, ModeSet, PlayerConfig, PlayerId, PlayerMap, PlayerMode, Roster,
    PLAYER_COUNT,
};

pub use crate::state::{DamageMatrix, GameStore, PendingDamage, STARTING_LIFE};

pub use crate::storage::{FileStore, MemoryStore, Storage, StorageError, SCHEMA_VERSION};

pub use crate::search::{SearchQuery, SearchResponse};

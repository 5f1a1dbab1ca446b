//! Game state: tables, invariants, and the durable store.

pub mod store;
pub mod tables;

pub use store::GameStore;
pub use tables::{
    default_counters, default_life, default_modes, default_partners, CounterTable, DamageMatrix,
    LifeTable, ModeTable, PartnerTable, PendingDamage, STARTING_LIFE,
};

//! Counter types and per-player counter tallies.
//!
//! Counter types form a closed set: unrecognized types cannot be
//! constructed, so nothing arbitrary ever reaches the persisted tables.
//! The serialized names are camelCase (`elderRing`) to match the keys the
//! tracker has always written.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A named, non-negative tally a player can hold independent of life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CounterType {
    Generic,
    Energy,
    Poison,
    Experience,
    ElderRing,
    Burden,
    Storm,
}

impl CounterType {
    /// All recognized counter types, in display order.
    pub const ALL: [CounterType; 7] = [
        CounterType::Generic,
        CounterType::Energy,
        CounterType::Poison,
        CounterType::Experience,
        CounterType::ElderRing,
        CounterType::Burden,
        CounterType::Storm,
    ];

    /// Uppercase display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CounterType::Generic => "GENERIC",
            CounterType::Energy => "ENERGY",
            CounterType::Poison => "POISON",
            CounterType::Experience => "EXPERIENCE",
            CounterType::ElderRing => "ELDER RING",
            CounterType::Burden => "BURDEN",
            CounterType::Storm => "STORM",
        }
    }
}

impl std::fmt::Display for CounterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One player's counter tallies.
///
/// Stored sparsely: a missing entry reads as zero. Every update clamps
/// the result at zero, so a tally can never go negative regardless of
/// the order deltas arrive in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterBag {
    counts: FxHashMap<CounterType, u32>,
}

impl CounterBag {
    /// Create an empty bag (all tallies zero).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tally for a counter type.
    #[must_use]
    pub fn get(&self, counter: CounterType) -> u32 {
        self.counts.get(&counter).copied().unwrap_or(0)
    }

    /// Apply a delta, clamping the result at zero. Returns the new tally.
    pub fn adjust(&mut self, counter: CounterType, delta: i64) -> u32 {
        let current = i64::from(self.get(counter));
        let next = current
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX)) as u32;
        if next == 0 {
            self.counts.remove(&counter);
        } else {
            self.counts.insert(counter, next);
        }
        next
    }

    /// True if every tally is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over nonzero tallies.
    pub fn iter(&self) -> impl Iterator<Item = (CounterType, u32)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }

    /// Drop every tally back to zero.
    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

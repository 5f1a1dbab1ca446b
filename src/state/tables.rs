//! State tables: life totals, counters, modes, commander damage, pending
//! damage sessions, partner toggles.
//!
//! Each table persists under its own reserved key and has a documented
//! default used whenever the persisted copy is absent or unreadable:
//!
//! - life: 40 for every player
//! - counters: all tallies zero
//! - modes: empty sets
//! - commander damage: empty matrix
//! - partner toggles: all false
//!
//! The commander damage matrix and pending damage sessions serialize as
//! string-keyed JSON objects (`{"2":{"1":5}}`), the shape the tracker has
//! always written.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{CounterBag, ModeSet, PlayerId, PlayerMap};

/// Life total every player starts a game with.
pub const STARTING_LIFE: i64 = 40;

/// Life totals per player. Unbounded in both directions.
pub type LifeTable = PlayerMap<i64>;

/// Counter tallies per player.
pub type CounterTable = PlayerMap<CounterBag>;

/// Active mode tags per player.
pub type ModeTable = PlayerMap<ModeSet>;

/// Partner-commander flags per player. Cosmetic only.
pub type PartnerTable = PlayerMap<bool>;

/// Default life table: everyone at [`STARTING_LIFE`].
#[must_use]
pub fn default_life(player_count: usize) -> LifeTable {
    PlayerMap::with_value(player_count, STARTING_LIFE)
}

/// Default counter table: all tallies zero.
#[must_use]
pub fn default_counters(player_count: usize) -> CounterTable {
    PlayerMap::with_default(player_count)
}

/// Default mode table: no active modes.
#[must_use]
pub fn default_modes(player_count: usize) -> ModeTable {
    PlayerMap::with_default(player_count)
}

/// Default partner table: all toggles off.
#[must_use]
pub fn default_partners(player_count: usize) -> PartnerTable {
    PlayerMap::with_value(player_count, false)
}

type MatrixRepr = BTreeMap<String, BTreeMap<String, u32>>;

/// Cumulative commander damage: source player -> target player -> amount.
///
/// Invariants, enforced here rather than by callers:
/// - no self-referential cell ever exists (source == target)
/// - cells and rows are created lazily on the first nonzero amount and
///   removed when they return to empty, so iteration only ever sees
///   nonzero damage
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr", into = "MatrixRepr")]
pub struct DamageMatrix {
    rows: FxHashMap<PlayerId, FxHashMap<PlayerId, u32>>,
}

impl DamageMatrix {
    /// Create an empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Damage dealt by `source`'s commander to `target`. Missing cells
    /// read as zero.
    #[must_use]
    pub fn get(&self, source: PlayerId, target: PlayerId) -> u32 {
        self.rows
            .get(&source)
            .and_then(|row| row.get(&target))
            .copied()
            .unwrap_or(0)
    }

    /// Accumulate damage into a cell, creating it if absent.
    ///
    /// Zero amounts and self-pairs are no-ops.
    pub fn add(&mut self, source: PlayerId, target: PlayerId, amount: u32) {
        if source == target || amount == 0 {
            return;
        }
        let row = self.rows.entry(source).or_default();
        let cell = row.entry(target).or_insert(0);
        *cell = cell.saturating_add(amount);
    }

    /// Delete one cell; drops the source's row if it becomes empty.
    pub fn remove_entry(&mut self, source: PlayerId, target: PlayerId) {
        if let Some(row) = self.rows.get_mut(&source) {
            row.remove(&target);
            if row.is_empty() {
                self.rows.remove(&source);
            }
        }
    }

    /// True if `source` has any outgoing damage recorded.
    #[must_use]
    pub fn has_row(&self, source: PlayerId) -> bool {
        self.rows.contains_key(&source)
    }

    /// True if no damage is recorded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over every nonzero cell as `(source, target, amount)`.
    pub fn entries(&self) -> impl Iterator<Item = (PlayerId, PlayerId, u32)> + '_ {
        self.rows
            .iter()
            .flat_map(|(src, row)| row.iter().map(|(tgt, amt)| (*src, *tgt, *amt)))
    }
}

impl TryFrom<MatrixRepr> for DamageMatrix {
    type Error = std::num::ParseIntError;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        let mut matrix = DamageMatrix::new();
        for (source, cells) in repr {
            let source = PlayerId::new(source.parse()?);
            for (target, amount) in cells {
                let target = PlayerId::new(target.parse()?);
                // add() drops self-pairs and zeros, so a tampered or
                // pre-versioning document cannot violate the invariants.
                matrix.add(source, target, amount);
            }
        }
        Ok(matrix)
    }
}

impl From<DamageMatrix> for MatrixRepr {
    fn from(matrix: DamageMatrix) -> Self {
        let mut repr = MatrixRepr::new();
        for (source, target, amount) in matrix.entries() {
            repr.entry(source.raw().to_string())
                .or_default()
                .insert(target.raw().to_string(), amount);
        }
        repr
    }
}

type PendingRepr = BTreeMap<String, u32>;

/// Damage staged in one open damage-assignment session.
///
/// Scoped to a single initiating (receiving) player; each session
/// persists under its own key so two players' in-progress screens never
/// overwrite each other. Amounts are clamped at zero and discarded
/// entirely on cancel.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PendingRepr", into = "PendingRepr")]
pub struct PendingDamage {
    staged: FxHashMap<PlayerId, u32>,
}

impl PendingDamage {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Staged amount for a source player. Missing entries read as zero.
    #[must_use]
    pub fn get(&self, source: PlayerId) -> u32 {
        self.staged.get(&source).copied().unwrap_or(0)
    }

    /// Stage an amount for a source, clamping at zero.
    pub fn set(&mut self, source: PlayerId, amount: i64) {
        let amount = amount.clamp(0, i64::from(u32::MAX)) as u32;
        if amount == 0 {
            self.staged.remove(&source);
        } else {
            self.staged.insert(source, amount);
        }
    }

    /// Apply a delta to a source's staged amount, clamping at zero.
    /// Returns the new amount.
    pub fn adjust(&mut self, source: PlayerId, delta: i64) -> u32 {
        let next = i64::from(self.get(source)).saturating_add(delta);
        self.set(source, next);
        self.get(source)
    }

    /// Sum of all staged amounts, widened so several large staged
    /// amounts sum without wrapping.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.staged.values().map(|&amount| u64::from(amount)).sum()
    }

    /// Drop staged entries whose source fails the predicate.
    ///
    /// A persisted session can carry entries for sources that are no
    /// longer valid; this is how they are discarded on load.
    pub fn retain_sources(&mut self, mut keep: impl FnMut(PlayerId) -> bool) {
        self.staged.retain(|source, _| keep(*source));
    }

    /// True if nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Iterate over nonzero staged amounts as `(source, amount)`.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, u32)> + '_ {
        self.staged.iter().map(|(p, a)| (*p, *a))
    }

    /// Discard everything staged.
    pub fn clear(&mut self) {
        self.staged.clear();
    }
}

impl TryFrom<PendingRepr> for PendingDamage {
    type Error = std::num::ParseIntError;

    fn try_from(repr: PendingRepr) -> Result<Self, Self::Error> {
        let mut pending = PendingDamage::new();
        for (source, amount) in repr {
            let source = PlayerId::new(source.parse()?);
            pending.set(source, i64::from(amount));
        }
        Ok(pending)
    }
}

impl From<PendingDamage> for PendingRepr {
    fn from(pending: PendingDamage) -> Self {
        pending
            .iter()
            .map(|(p, a)| (p.raw().to_string(), a))
            .collect()
    }
}

//! The game state store.
//!
//! `GameStore` owns the state tables, applies atomic-per-call updates,
//! and keeps each table synchronized with durable storage under its
//! reserved key.
//!
//! ## Fallback policy
//!
//! Persistence never interrupts play. The policy, implemented in one
//! place each for reads and writes:
//!
//! - read failure, missing key, corrupt document, or unknown schema
//!   version: substitute the table's documented default and write it
//!   back, so the durable snapshot matches memory after `load_all`
//! - write failure: keep the optimistic in-memory value and log; the
//!   next successful write repairs the durable copy
//!
//! No error from this module ever reaches the caller.
//!
//! ## Damage-assignment sessions
//!
//! One session per initiating (receiving) player:
//! Idle -> Open -> Adjusting (repeatable) -> Committed | Cancelled -> Idle.
//! Staged amounts live under the session's own storage key, so two
//! players' open screens never collide. Cancelling discards the staged
//! amounts without touching life or commander damage; committing applies
//! one life decrement for the staged total plus one commander-damage
//! increment per nonzero source, exactly once.

use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{CounterType, PlayerId, PlayerMode, Roster};
use crate::storage::{keys, Storage, Versioned, SCHEMA_VERSION};

use super::tables::{
    default_counters, default_life, default_modes, default_partners, CounterTable, DamageMatrix,
    LifeTable, ModeTable, PartnerTable, PendingDamage,
};

/// In-memory state tables plus their durable backing store.
///
/// All mutation is synchronous; the in-memory copy is updated first and
/// the durable write is best-effort. There is exactly one logical
/// writer, so no locking is involved.
#[derive(Debug)]
pub struct GameStore<S: Storage> {
    roster: Roster,
    life: LifeTable,
    counters: CounterTable,
    modes: ModeTable,
    damage: DamageMatrix,
    partners: PartnerTable,
    pending: FxHashMap<PlayerId, PendingDamage>,
    storage: S,
}

impl<S: Storage> GameStore<S> {
    /// Create a store over `storage` with the standard four-player
    /// roster and default tables.
    ///
    /// Call [`load_all`](Self::load_all) before first use to pick up the
    /// persisted snapshot.
    pub fn new(storage: S) -> Self {
        let roster = Roster::standard();
        let count = roster.player_count();
        Self {
            roster,
            life: default_life(count),
            counters: default_counters(count),
            modes: default_modes(count),
            damage: DamageMatrix::new(),
            partners: default_partners(count),
            pending: FxHashMap::default(),
            storage,
        }
    }

    /// The configured players.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The durable backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Tear down the store, handing back the durable backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    // === Load / reset ===

    /// Load every table from storage, substituting documented defaults
    /// for anything absent or unreadable and writing those defaults
    /// back. Never fails.
    pub fn load_all(&mut self) {
        let count = self.roster.player_count();

        self.life = load_table(&mut self.storage, keys::LIFE_TOTALS, count, default_life);
        self.counters = load_table(&mut self.storage, keys::COUNTERS, count, default_counters);
        self.modes = load_table(&mut self.storage, keys::PLAYER_MODES, count, default_modes);
        self.partners = load_table(
            &mut self.storage,
            keys::PARTNER_TOGGLES,
            count,
            default_partners,
        );
        self.damage = load_or_default(
            &mut self.storage,
            keys::COMMANDER_DAMAGE,
            DamageMatrix::new,
        );
        // Pending sessions load lazily when a damage screen opens.
        self.pending.clear();
    }

    /// Wipe every persisted table (pending sessions and partner toggles
    /// included) and reinitialize everything to defaults.
    pub fn reset_all(&mut self) {
        let count = self.roster.player_count();

        let mut doomed: Vec<String> = vec![
            keys::LIFE_TOTALS.to_string(),
            keys::COUNTERS.to_string(),
            keys::PLAYER_MODES.to_string(),
            keys::COMMANDER_DAMAGE.to_string(),
            keys::PARTNER_TOGGLES.to_string(),
        ];
        doomed.extend(self.roster.ids().map(keys::pending_damage));
        for key in &doomed {
            if let Err(err) = self.storage.remove(key) {
                warn!("{key}: remove failed during reset: {err}");
            }
        }

        self.life = default_life(count);
        self.counters = default_counters(count);
        self.modes = default_modes(count);
        self.damage = DamageMatrix::new();
        self.partners = default_partners(count);
        self.pending.clear();

        persist(&mut self.storage, keys::LIFE_TOTALS, &self.life);
        persist(&mut self.storage, keys::COUNTERS, &self.counters);
        persist(&mut self.storage, keys::PLAYER_MODES, &self.modes);
        persist(&mut self.storage, keys::COMMANDER_DAMAGE, &self.damage);
        persist(&mut self.storage, keys::PARTNER_TOGGLES, &self.partners);
    }

    // === Life ===

    /// Current life total, or `None` for an unknown player id.
    #[must_use]
    pub fn life(&self, player: PlayerId) -> Option<i64> {
        self.life.get(player).copied()
    }

    /// Apply a life delta. No clamping in either direction; life can go
    /// negative. Unknown player ids are a silent no-op.
    pub fn adjust_life(&mut self, player: PlayerId, delta: i64) {
        match self.life.get_mut(player) {
            Some(total) => {
                *total += delta;
                persist(&mut self.storage, keys::LIFE_TOTALS, &self.life);
            }
            None => debug!("adjust_life: ignoring unknown {player}"),
        }
    }

    // === Counters ===

    /// Current tally for one of a player's counters. Unknown player ids
    /// read as zero.
    #[must_use]
    pub fn counter(&self, player: PlayerId, counter: CounterType) -> u32 {
        self.counters
            .get(player)
            .map(|bag| bag.get(counter))
            .unwrap_or(0)
    }

    /// Apply a counter delta, clamping the result at zero. Returns the
    /// new tally; unknown player ids are a no-op returning zero.
    pub fn adjust_counter(&mut self, player: PlayerId, counter: CounterType, delta: i64) -> u32 {
        match self.counters.get_mut(player) {
            Some(bag) => {
                let tally = bag.adjust(counter, delta);
                persist(&mut self.storage, keys::COUNTERS, &self.counters);
                tally
            }
            None => {
                debug!("adjust_counter: ignoring unknown {player}");
                0
            }
        }
    }

    // === Modes ===

    /// Check whether a player currently holds a mode.
    #[must_use]
    pub fn has_mode(&self, player: PlayerId, mode: PlayerMode) -> bool {
        self.modes
            .get(player)
            .map(|set| set.contains(mode))
            .unwrap_or(false)
    }

    /// The modes a player currently holds, in toggle order.
    #[must_use]
    pub fn modes(&self, player: PlayerId) -> &[PlayerMode] {
        self.modes.get(player).map(|set| set.modes()).unwrap_or(&[])
    }

    /// Flip a mode on or off. Returns true if the mode is active after
    /// the toggle; unknown player ids are a no-op returning false.
    pub fn toggle_mode(&mut self, player: PlayerId, mode: PlayerMode) -> bool {
        match self.modes.get_mut(player) {
            Some(set) => {
                let active = set.toggle(mode);
                persist(&mut self.storage, keys::PLAYER_MODES, &self.modes);
                active
            }
            None => {
                debug!("toggle_mode: ignoring unknown {player}");
                false
            }
        }
    }

    // === Commander damage ===

    /// Cumulative commander damage dealt by `source` to `target`.
    #[must_use]
    pub fn commander_damage(&self, source: PlayerId, target: PlayerId) -> u32 {
        self.damage.get(source, target)
    }

    /// The full commander damage matrix.
    #[must_use]
    pub fn damage_matrix(&self) -> &DamageMatrix {
        &self.damage
    }

    /// Apply combat damage as one combined effect: `target`'s life drops
    /// by `amount` and `source`'s outgoing commander damage to `target`
    /// rises by the same amount. Keeping both changes in one operation
    /// is what keeps life and the matrix consistent.
    ///
    /// Zero amounts, self-pairs, and unknown player ids are no-ops.
    pub fn deal_combat_damage(&mut self, source: PlayerId, target: PlayerId, amount: u32) {
        if amount == 0 || source == target {
            return;
        }
        if !self.roster.contains(source) || !self.roster.contains(target) {
            debug!("deal_combat_damage: ignoring unknown pair {source} -> {target}");
            return;
        }

        self.damage.add(source, target, amount);
        if let Some(total) = self.life.get_mut(target) {
            *total -= i64::from(amount);
        }

        persist(&mut self.storage, keys::COMMANDER_DAMAGE, &self.damage);
        persist(&mut self.storage, keys::LIFE_TOTALS, &self.life);
    }

    /// Forget one matrix cell (a "reset" tap on the damage screen).
    /// Life totals are unaffected; if the cell was the source's last
    /// outgoing entry, the whole row disappears.
    pub fn reset_commander_damage_entry(&mut self, source: PlayerId, target: PlayerId) {
        self.damage.remove_entry(source, target);
        persist(&mut self.storage, keys::COMMANDER_DAMAGE, &self.damage);
    }

    // === Partner toggles ===

    /// Whether a player has flagged a partner commander.
    #[must_use]
    pub fn partner(&self, player: PlayerId) -> bool {
        self.partners.get(player).copied().unwrap_or(false)
    }

    /// Set a player's partner flag. Cosmetic; independent of the damage
    /// and life model.
    pub fn set_partner(&mut self, player: PlayerId, flag: bool) {
        match self.partners.get_mut(player) {
            Some(slot) => {
                *slot = flag;
                persist(&mut self.storage, keys::PARTNER_TOGGLES, &self.partners);
            }
            None => debug!("set_partner: ignoring unknown {player}"),
        }
    }

    // === Pending damage sessions ===

    /// Staged damage from `source` in `initiating`'s open session.
    pub fn staged_damage(&mut self, initiating: PlayerId, source: PlayerId) -> u32 {
        if !self.roster.contains(initiating) {
            return 0;
        }
        self.session_mut(initiating).get(source)
    }

    /// Sum of everything staged in `initiating`'s session.
    pub fn staged_total(&mut self, initiating: PlayerId) -> u64 {
        if !self.roster.contains(initiating) {
            return 0;
        }
        self.session_mut(initiating).total()
    }

    /// Stage an amount of damage from `source` against `initiating`,
    /// clamped at zero.
    ///
    /// Staging against the initiating player themself is rejected: at
    /// commit it would create a self-referential matrix entry.
    pub fn stage_damage(&mut self, initiating: PlayerId, source: PlayerId, amount: i64) {
        if !self.stageable(initiating, source) {
            return;
        }
        self.session_mut(initiating).set(source, amount);
        self.persist_session(initiating);
    }

    /// Step a staged amount by a delta (the damage screen's +/- pad),
    /// clamping at zero. Returns the new staged amount.
    pub fn adjust_staged_damage(
        &mut self,
        initiating: PlayerId,
        source: PlayerId,
        delta: i64,
    ) -> u32 {
        if !self.stageable(initiating, source) {
            return 0;
        }
        let amount = self.session_mut(initiating).adjust(source, delta);
        self.persist_session(initiating);
        amount
    }

    /// Close the session without applying it. Staged amounts are
    /// discarded; life and commander damage are untouched.
    pub fn cancel_pending_damage(&mut self, initiating: PlayerId) {
        if !self.roster.contains(initiating) {
            return;
        }
        self.session_mut(initiating).clear();
        self.persist_session(initiating);
    }

    /// Apply the session as one aggregate effect, then clear it.
    ///
    /// The initiating player's life drops once by the staged total, and
    /// each source with nonzero staged damage gains that much outgoing
    /// commander damage. Returns the total applied (zero if nothing was
    /// staged).
    pub fn commit_pending_damage(&mut self, initiating: PlayerId) -> u64 {
        if !self.roster.contains(initiating) {
            debug!("commit_pending_damage: ignoring unknown {initiating}");
            return 0;
        }

        let session = self.session_mut(initiating).clone();
        let total = session.total();

        if total > 0 {
            if let Some(life) = self.life.get_mut(initiating) {
                // A session holds at most one entry per roster player, so
                // the widened total always fits.
                *life -= total as i64;
            }
            for (source, amount) in session.iter() {
                self.damage.add(source, initiating, amount);
            }
            persist(&mut self.storage, keys::LIFE_TOTALS, &self.life);
            persist(&mut self.storage, keys::COMMANDER_DAMAGE, &self.damage);
        }

        self.session_mut(initiating).clear();
        self.persist_session(initiating);
        total
    }

    fn stageable(&self, initiating: PlayerId, source: PlayerId) -> bool {
        if initiating == source {
            debug!("stage_damage: rejecting self-staged damage for {initiating}");
            return false;
        }
        if !self.roster.contains(initiating) || !self.roster.contains(source) {
            debug!("stage_damage: ignoring unknown pair {source} -> {initiating}");
            return false;
        }
        true
    }

    fn session_mut(&mut self, initiating: PlayerId) -> &mut PendingDamage {
        let storage = &mut self.storage;
        let roster = &self.roster;
        self.pending.entry(initiating).or_insert_with(|| {
            let mut session: PendingDamage =
                load_or_default(storage, &keys::pending_damage(initiating), PendingDamage::new);
            // A tampered or stale persisted session can name the
            // initiating player or someone outside the roster; dropping
            // those here keeps commit's life decrement equal to what
            // actually lands in the matrix.
            session.retain_sources(|source| source != initiating && roster.contains(source));
            session
        })
    }

    fn persist_session(&mut self, initiating: PlayerId) {
        if let Some(session) = self.pending.get(&initiating) {
            persist(&mut self.storage, &keys::pending_damage(initiating), session);
        }
    }
}

/// Read a document under `key`, substituting (and writing back) the
/// default on any failure. The single implementation of the read half of
/// the fallback policy.
fn load_or_default<S, T>(storage: &mut S, key: &str, default: impl FnOnce() -> T) -> T
where
    S: Storage,
    T: Serialize + DeserializeOwned,
{
    match storage.read(key) {
        Ok(Some(raw)) => match serde_json::from_str::<Versioned<T>>(&raw) {
            Ok(doc) if doc.version == SCHEMA_VERSION => return doc.data,
            Ok(doc) => warn!(
                "{key}: unsupported schema version {}, substituting defaults",
                doc.version
            ),
            Err(err) => warn!("{key}: unreadable document, substituting defaults: {err}"),
        },
        Ok(None) => {}
        Err(err) => warn!("{key}: read failed, substituting defaults: {err}"),
    }

    let value = default();
    persist(storage, key, &value);
    value
}

/// Load a per-player table, additionally treating a roster-size mismatch
/// (a save from a different configuration) as corrupt.
fn load_table<S, T>(
    storage: &mut S,
    key: &str,
    player_count: usize,
    default: impl Fn(usize) -> crate::core::PlayerMap<T>,
) -> crate::core::PlayerMap<T>
where
    S: Storage,
    T: Serialize + DeserializeOwned,
{
    let table = load_or_default(storage, key, || default(player_count));
    if table.player_count() == player_count {
        table
    } else {
        warn!(
            "{key}: expected {player_count} players, found {}, substituting defaults",
            table.player_count()
        );
        let fresh = default(player_count);
        persist(storage, key, &fresh);
        fresh
    }
}

/// Best-effort durable write; the write half of the fallback policy.
fn persist<S: Storage, T: Serialize>(storage: &mut S, key: &str, value: &T) {
    match serde_json::to_string(&Versioned::current(value)) {
        Ok(raw) => {
            if let Err(err) = storage.write(key, &raw) {
                warn!("{key}: write failed, keeping in-memory value: {err}");
            }
        }
        Err(err) => warn!("{key}: serialize failed, keeping in-memory value: {err}"),
    }
}

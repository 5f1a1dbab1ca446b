//! Game state store behavior tests.
//!
//! These exercise the documented update semantics end to end against an
//! in-memory backend: unbounded life, clamped counters, involutive mode
//! toggles, and the combined combat-damage effect.

use commander_tracker::core::{CounterType, PlayerId, PlayerMode};
use commander_tracker::state::{GameStore, STARTING_LIFE};
use commander_tracker::storage::MemoryStore;

fn store() -> GameStore<MemoryStore> {
    let mut store = GameStore::new(MemoryStore::new());
    store.load_all();
    store
}

/// Life equals 40 plus the sum of all deltas, with no clamping.
#[test]
fn test_life_is_sum_of_deltas() {
    let mut store = store();
    let p3 = PlayerId::new(3);

    let deltas = [-1, -1, 5, -10, 2, -40, 3];
    for delta in deltas {
        store.adjust_life(p3, delta);
    }

    let expected = STARTING_LIFE + deltas.iter().sum::<i64>();
    assert_eq!(store.life(p3), Some(expected));
    assert!(expected < 0, "scenario should drive life negative");

    // Other players untouched.
    assert_eq!(store.life(PlayerId::new(1)), Some(STARTING_LIFE));
}

/// Counters clamp at zero on every step, not just at the end:
/// -5 then +2 then -1 gives 1, not max(0, -4).
#[test]
fn test_counter_clamps_every_step() {
    let mut store = store();
    let p1 = PlayerId::new(1);

    assert_eq!(store.adjust_counter(p1, CounterType::Energy, -5), 0);
    assert_eq!(store.adjust_counter(p1, CounterType::Energy, 2), 2);
    assert_eq!(store.adjust_counter(p1, CounterType::Energy, -1), 1);
}

/// Toggling the same mode twice returns the set to its original state.
#[test]
fn test_mode_toggle_round_trip() {
    let mut store = store();
    let p2 = PlayerId::new(2);

    store.toggle_mode(p2, PlayerMode::Ascend);
    let before: Vec<_> = store.modes(p2).to_vec();

    store.toggle_mode(p2, PlayerMode::Monarch);
    store.toggle_mode(p2, PlayerMode::Monarch);

    assert_eq!(store.modes(p2), before.as_slice());
}

/// Spec scenario: dealCombatDamage(2, 1, 5) from defaults.
#[test]
fn test_combat_damage_scenario() {
    let mut store = store();
    let (p1, p2) = (PlayerId::new(1), PlayerId::new(2));

    store.deal_combat_damage(p2, p1, 5);

    assert_eq!(store.life(p1), Some(35));
    assert_eq!(store.commander_damage(p2, p1), 5);
    assert_eq!(store.commander_damage(p1, p2), 0);
    assert!(!store.damage_matrix().has_row(p1));
}

/// The matrix never holds a self-referential entry, whatever sequence
/// of operations runs.
#[test]
fn test_no_self_damage_entries() {
    let mut store = store();

    for source in PlayerId::all(4) {
        for target in PlayerId::all(4) {
            store.deal_combat_damage(source, target, 3);
        }
    }

    for player in PlayerId::all(4) {
        assert_eq!(store.commander_damage(player, player), 0);
    }
    for (source, target, _) in store.damage_matrix().entries() {
        assert_ne!(source, target);
    }
}

/// Resetting one matrix cell removes the row when it was the source's
/// only outgoing entry, and leaves other rows alone.
#[test]
fn test_reset_commander_damage_entry() {
    let mut store = store();
    let (p1, p2, p3) = (PlayerId::new(1), PlayerId::new(2), PlayerId::new(3));

    store.deal_combat_damage(p2, p1, 3);
    store.deal_combat_damage(p3, p1, 4);
    let life_after_damage = store.life(p1);

    store.reset_commander_damage_entry(p2, p1);

    assert_eq!(store.commander_damage(p2, p1), 0);
    assert!(!store.damage_matrix().has_row(p2));
    assert_eq!(store.commander_damage(p3, p1), 4);
    // Life is not restored by forgetting commander damage.
    assert_eq!(store.life(p1), life_after_damage);
}

/// resetAll followed by loadAll yields the documented defaults.
#[test]
fn test_reset_then_load_yields_defaults() {
    let mut store = store();
    let (p1, p2, p4) = (PlayerId::new(1), PlayerId::new(2), PlayerId::new(4));

    store.adjust_life(p1, -17);
    store.adjust_counter(p2, CounterType::Storm, 6);
    store.toggle_mode(p4, PlayerMode::Monarch);
    store.deal_combat_damage(p2, p1, 9);
    store.set_partner(p4, true);

    store.reset_all();
    store.load_all();

    for player in PlayerId::all(4) {
        assert_eq!(store.life(player), Some(40));
        for counter in CounterType::ALL {
            assert_eq!(store.counter(player, counter), 0);
        }
        assert!(store.modes(player).is_empty());
        assert!(!store.partner(player));
        for other in PlayerId::all(4) {
            assert_eq!(store.commander_damage(player, other), 0);
        }
    }
}

/// Partner toggles are cosmetic: flipping them changes nothing else.
#[test]
fn test_partner_toggle_independent() {
    let mut store = store();
    let p3 = PlayerId::new(3);

    store.set_partner(p3, true);
    assert!(store.partner(p3));
    assert_eq!(store.life(p3), Some(STARTING_LIFE));
    assert!(store.damage_matrix().is_empty());

    store.set_partner(p3, false);
    assert!(!store.partner(p3));
}

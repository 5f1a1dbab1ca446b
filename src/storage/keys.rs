//! Reserved storage keys.
//!
//! One key per durable table, plus one key per initiating player for
//! pending damage-assignment sessions. The names match what the tracker
//! has always written, so an existing save remains readable.

use crate::core::PlayerId;

/// Life totals table.
pub const LIFE_TOTALS: &str = "lifeTotals";

/// Per-player counter tallies.
pub const COUNTERS: &str = "counters";

/// Per-player mode sets.
pub const PLAYER_MODES: &str = "playerModes";

/// Commander damage matrix.
pub const COMMANDER_DAMAGE: &str = "commanderDamage";

/// Partner commander toggles.
pub const PARTNER_TOGGLES: &str = "partnerToggles";

/// Pending damage staged by one initiating player's open session.
///
/// Keyed per player so two concurrent sessions never collide.
#[must_use]
pub fn pending_damage(initiating: PlayerId) -> String {
    format!("damageValues_{}", initiating.raw())
}

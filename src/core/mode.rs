//! Player mode tags and the toggleable mode set.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A boolean status tag a player can hold.
///
/// Serialized names are uppercase (`MONARCH`), matching the tags the
/// tracker screens have always persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerMode {
    Monarch,
    Initiative,
    Ascend,
}

impl PlayerMode {
    /// All recognized modes, in display order.
    pub const ALL: [PlayerMode; 3] = [
        PlayerMode::Monarch,
        PlayerMode::Initiative,
        PlayerMode::Ascend,
    ];
}

/// The set of modes a player currently holds.
///
/// Multiple simultaneous modes are allowed. `toggle` is an involution:
/// applying it twice returns the set to its original state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeSet {
    tags: SmallVec<[PlayerMode; 3]>,
}

impl ModeSet {
    /// Create an empty mode set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a mode is active.
    #[must_use]
    pub fn contains(&self, mode: PlayerMode) -> bool {
        self.tags.contains(&mode)
    }

    /// Flip a mode: remove it if present, add it otherwise.
    ///
    /// Returns true if the mode is active after the toggle.
    pub fn toggle(&mut self, mode: PlayerMode) -> bool {
        if let Some(pos) = self.tags.iter().position(|&m| m == mode) {
            self.tags.remove(pos);
            false
        } else {
            self.tags.push(mode);
            true
        }
    }

    /// True if no modes are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Active modes, in toggle order.
    #[must_use]
    pub fn modes(&self) -> &[PlayerMode] {
        &self.tags
    }

    /// Deactivate every mode.
    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

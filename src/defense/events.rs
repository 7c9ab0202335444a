//! Defense Events
//!
//! Events generated during simulation, collected per tick and drained by
//! the shell for sound, animation and scoreboard updates.

use serde::{Deserialize, Serialize};

use crate::core::vec2::FixedVec2;
use crate::defense::state::TowerKind;

/// Defense event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefenseEventData {
    /// An enemy entered the board at the path start
    EnemySpawned {
        /// Enemy id
        id: u32,
    },

    /// An enemy was destroyed
    EnemyKilled {
        /// Enemy id
        id: u32,
        /// Money and score credited for the kill
        reward: u32,
    },

    /// An enemy walked off the end of the path
    EnemyLeaked {
        /// Enemy id
        id: u32,
        /// Lives remaining after the leak
        lives_left: u32,
    },

    /// A tower was placed
    TowerPlaced {
        /// Tower id
        id: u32,
        /// Catalog kind
        kind: TowerKind,
        /// Snapped cell-center position
        position: FixedVec2,
    },

    /// A projectile reached its snapshot without hitting anything
    ProjectileMissed {
        /// Projectile id
        id: u32,
    },

    /// Lives ran out
    GameOver {
        /// Final score
        score: u32,
    },
}

/// A defense event with the simulated time it occurred at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseEvent {
    /// Engine clock when the event fired (ms)
    pub tick_ms: u64,
    /// Event payload
    pub data: DefenseEventData,
}

impl DefenseEvent {
    /// Create a new event.
    pub fn new(tick_ms: u64, data: DefenseEventData) -> Self {
        Self { tick_ms, data }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_roundtrip() {
        let event = DefenseEvent::new(
            1500,
            DefenseEventData::EnemyKilled { id: 3, reward: 12 },
        );

        let json = serde_json::to_string(&event).unwrap();
        let back: DefenseEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}

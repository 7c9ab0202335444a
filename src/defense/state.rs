//! Defense State Definitions
//!
//! All state types for the tower-defense simulation: the tower catalog,
//! the entity structs, the round configuration and the aggregate
//! [`DefenseState`] with its control operations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::fixed::{Fixed, CELL_SIZE, to_fixed};
use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rng::GameRng;
use crate::core::vec2::{sq, FixedVec2};
use crate::defense::events::{DefenseEvent, DefenseEventData};
use crate::defense::map::{in_board, snap_to_cell, PATH};
use crate::error::Error;

// =============================================================================
// TOWER CATALOG
// =============================================================================

/// Tower kind from the build catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TowerKind {
    /// Balanced damage and range
    Basic = 0,
    /// Low damage, rapid fire
    Fast = 1,
    /// High damage, slow fire, longest range
    Heavy = 2,
}

impl TowerKind {
    /// Damage per projectile.
    #[inline]
    pub fn damage(self) -> i32 {
        match self {
            TowerKind::Basic => 20,
            TowerKind::Fast => 15,
            TowerKind::Heavy => 50,
        }
    }

    /// Targeting range in board units.
    #[inline]
    pub fn range(self) -> Fixed {
        match self {
            TowerKind::Basic => to_fixed(80.0),
            TowerKind::Fast => to_fixed(60.0),
            TowerKind::Heavy => to_fixed(100.0),
        }
    }

    /// Milliseconds between shots.
    #[inline]
    pub fn fire_rate_ms(self) -> u64 {
        match self {
            TowerKind::Basic => 1000,
            TowerKind::Fast => 500,
            TowerKind::Heavy => 2000,
        }
    }

    /// Placement cost.
    #[inline]
    pub fn cost(self) -> u32 {
        match self {
            TowerKind::Basic => 50,
            TowerKind::Fast => 75,
            TowerKind::Heavy => 150,
        }
    }

    /// Get kind from catalog index (0-2).
    pub fn from_index(index: u8) -> Option<TowerKind> {
        match index {
            0 => Some(TowerKind::Basic),
            1 => Some(TowerKind::Fast),
            2 => Some(TowerKind::Heavy),
            _ => None,
        }
    }
}

// =============================================================================
// ENTITIES
// =============================================================================

/// An enemy walking the path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique id (monotonic, spawn order)
    pub id: u32,
    /// Board position
    pub position: FixedVec2,
    /// Remaining health; dropped from the board once <= 0
    pub health: i32,
    /// Health at spawn, for render bars
    pub max_health: i32,
    /// Movement per tick in board units
    pub speed: Fixed,
    /// Index of the waypoint most recently reached
    pub path_index: usize,
    /// Money and score credited on a kill
    pub reward: u32,
}

/// A placed tower.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tower {
    /// Unique id (monotonic)
    pub id: u32,
    /// Cell-center position
    pub position: FixedVec2,
    /// Catalog kind
    pub kind: TowerKind,
    /// Engine clock of the last shot (0 = never fired)
    pub last_fired_ms: u64,
}

/// A projectile in flight toward a fixed target snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Projectile {
    /// Unique id (monotonic)
    pub id: u32,
    /// Board position
    pub position: FixedVec2,
    /// Target position snapshot, fixed at fire time
    pub target: FixedVec2,
    /// Damage applied on a hit
    pub damage: i32,
    /// Movement per tick in board units
    pub speed: Fixed,
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Configuration for a defense round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefenseConfig {
    /// Enemy waypoints, walked in order
    pub path: Vec<FixedVec2>,
    /// Milliseconds between enemy spawns
    pub spawn_delay_ms: u64,
    /// Enemy movement per tick in board units
    pub enemy_speed: Fixed,
    /// Projectile movement per tick in board units
    pub projectile_speed: Fixed,
    /// Half-width of the hit box around a projectile's snapshot
    pub hit_tolerance: Fixed,
    /// Money at round start
    pub starting_money: u32,
    /// Lives at round start
    pub starting_lives: u32,
    /// Minimum center-to-center distance between towers
    pub tower_spacing: Fixed,
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            path: PATH.to_vec(),
            spawn_delay_ms: 1000,
            enemy_speed: to_fixed(1.0),
            projectile_speed: to_fixed(5.0),
            hit_tolerance: to_fixed(20.0),
            starting_money: 100,
            starting_lives: 20,
            tower_spacing: CELL_SIZE,
        }
    }
}

impl DefenseConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), Error> {
        if self.path.len() < 2 {
            return Err(Error::InvalidConfig("path needs at least 2 waypoints"));
        }
        if self.enemy_speed <= 0 {
            return Err(Error::InvalidConfig("enemy_speed must be positive"));
        }
        if self.projectile_speed <= 0 {
            return Err(Error::InvalidConfig("projectile_speed must be positive"));
        }
        if self.hit_tolerance < 0 {
            return Err(Error::InvalidConfig("hit_tolerance must be non-negative"));
        }
        if self.starting_lives == 0 {
            return Err(Error::InvalidConfig("starting_lives must be positive"));
        }
        Ok(())
    }
}

// =============================================================================
// PHASE
// =============================================================================

/// Current phase of a defense round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Phase {
    /// Not started; ticks are no-ops
    #[default]
    Idle,
    /// Simulation advancing
    Running,
    /// Frozen mid-round; state preserved
    Paused,
    /// Lives ran out; ticks are no-ops
    GameOver,
}

// =============================================================================
// DEFENSE STATE
// =============================================================================

/// Complete state of a defense round.
///
/// All entity vectors are kept in spawn order; targeting and hit
/// resolution iterate them in that order so ties resolve identically on
/// every run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefenseState {
    /// Current phase
    pub phase: Phase,
    /// Difficulty level; scales enemy health and reward
    pub level: u32,
    /// Score accumulated from kills
    pub score: u32,
    /// Money available for tower placement
    pub money: u32,
    /// Lives remaining
    pub lives: u32,

    /// Enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Placed towers in placement order
    pub towers: Vec<Tower>,
    /// Projectiles in flight, in fire order
    pub projectiles: Vec<Projectile>,

    /// Tower kind armed for the next placement
    pub selected_tower: Option<TowerKind>,

    /// Engine clock in simulated milliseconds; advances TICK_MS per tick
    pub clock_ms: u64,
    /// Engine clock of the last enemy spawn
    pub last_spawn_ms: u64,

    /// Next enemy id (monotonic counter)
    pub next_enemy_id: u32,
    /// Next tower id (monotonic counter)
    pub next_tower_id: u32,
    /// Next projectile id (monotonic counter)
    pub next_projectile_id: u32,

    /// RNG seed (for verification)
    pub rng_seed: u64,
    /// Deterministic RNG state
    #[serde(skip)]
    pub rng: GameRng,

    /// Events generated this tick (cleared each tick)
    #[serde(skip)]
    pub pending_events: Vec<DefenseEvent>,
}

impl DefenseState {
    /// Create a new round in the Idle phase.
    pub fn new(rng_seed: u64, config: &DefenseConfig) -> Self {
        Self {
            phase: Phase::Idle,
            level: 1,
            score: 0,
            money: config.starting_money,
            lives: config.starting_lives,
            enemies: Vec::new(),
            towers: Vec::new(),
            projectiles: Vec::new(),
            selected_tower: None,
            clock_ms: 0,
            last_spawn_ms: 0,
            next_enemy_id: 0,
            next_tower_id: 0,
            next_projectile_id: 0,
            rng_seed,
            rng: GameRng::new(rng_seed),
            pending_events: Vec::new(),
        }
    }

    /// Start or resume the round.
    ///
    /// From Idle or GameOver this is a fresh start (entities cleared,
    /// resources restored, same seed); from Paused it resumes in place.
    /// A no-op while already Running.
    pub fn start(&mut self, config: &DefenseConfig) {
        match self.phase {
            Phase::Idle | Phase::GameOver => {
                *self = Self::new(self.rng_seed, config);
                self.phase = Phase::Running;
                debug!(seed = self.rng_seed, "defense round started");
            }
            Phase::Paused => self.phase = Phase::Running,
            Phase::Running => {}
        }
    }

    /// Toggle between Running and Paused. No-op in any other phase.
    pub fn pause(&mut self) {
        match self.phase {
            Phase::Running => self.phase = Phase::Paused,
            Phase::Paused => self.phase = Phase::Running,
            _ => {}
        }
    }

    /// Return to Idle with initial resources and an empty board.
    pub fn reset(&mut self, config: &DefenseConfig) {
        *self = Self::new(self.rng_seed, config);
    }

    /// Arm (or disarm) a tower kind for the next placement.
    pub fn select_tower(&mut self, kind: Option<TowerKind>) {
        self.selected_tower = kind;
    }

    /// Attempt to place the selected tower at `pos`.
    ///
    /// The position snaps to its cell center first. Silent no-op unless a
    /// kind is selected, funds suffice, the center is on the board, and
    /// every existing tower is at least `tower_spacing` away. On success
    /// the cost is deducted, the tower is appended and the selection
    /// clears.
    pub fn place_tower(&mut self, pos: FixedVec2, config: &DefenseConfig) {
        let kind = match self.selected_tower {
            Some(kind) => kind,
            None => return,
        };
        if self.money < kind.cost() {
            return;
        }

        let center = snap_to_cell(pos);
        if !in_board(center) {
            return;
        }
        let too_close = self
            .towers
            .iter()
            .any(|t| t.position.distance_squared(center) < sq(config.tower_spacing));
        if too_close {
            return;
        }

        let id = self.next_tower_id;
        self.next_tower_id += 1;
        self.money -= kind.cost();
        self.towers.push(Tower {
            id,
            position: center,
            kind,
            last_fired_ms: 0,
        });
        self.selected_tower = None;

        self.push_event(DefenseEventData::TowerPlaced {
            id,
            kind,
            position: center,
        });
    }

    /// Is the round over?
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver)
    }

    /// Compute hash of current state for determinism checks.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.clock_ms, self.rng_seed, |hasher| {
            hasher.update_u8(self.phase as u8);
            hasher.update_u32(self.level);
            hasher.update_u32(self.score);
            hasher.update_u32(self.money);
            hasher.update_u32(self.lives);
            hasher.update_u64(self.last_spawn_ms);

            for enemy in &self.enemies {
                hasher.update_u32(enemy.id);
                hasher.update_vec2(enemy.position);
                hasher.update_i32(enemy.health);
                hasher.update_u32(enemy.path_index as u32);
                hasher.update_u32(enemy.reward);
            }

            for tower in &self.towers {
                hasher.update_u32(tower.id);
                hasher.update_vec2(tower.position);
                hasher.update_u8(tower.kind as u8);
                hasher.update_u64(tower.last_fired_ms);
            }

            for projectile in &self.projectiles {
                hasher.update_u32(projectile.id);
                hasher.update_vec2(projectile.position);
                hasher.update_vec2(projectile.target);
                hasher.update_i32(projectile.damage);
            }

            match self.selected_tower {
                Some(kind) => {
                    hasher.update_bool(true);
                    hasher.update_u8(kind as u8);
                }
                None => hasher.update_bool(false),
            }
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<DefenseEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push an event stamped with the current clock.
    pub fn push_event(&mut self, data: DefenseEventData) {
        self.pending_events.push(DefenseEvent::new(self.clock_ms, data));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state(config: &DefenseConfig) -> DefenseState {
        let mut state = DefenseState::new(42, config);
        state.start(config);
        state
    }

    #[test]
    fn test_tower_catalog() {
        assert_eq!(TowerKind::from_index(0), Some(TowerKind::Basic));
        assert_eq!(TowerKind::from_index(2), Some(TowerKind::Heavy));
        assert_eq!(TowerKind::from_index(3), None);

        assert!(TowerKind::Fast.fire_rate_ms() < TowerKind::Basic.fire_rate_ms());
        assert!(TowerKind::Heavy.range() > TowerKind::Basic.range());
        assert_eq!(TowerKind::Basic.cost(), 50);
    }

    #[test]
    fn test_config_validation() {
        assert!(DefenseConfig::default().validate().is_ok());

        let mut config = DefenseConfig::default();
        config.path.truncate(1);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = DefenseConfig {
            enemy_speed: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_phase_transitions() {
        let config = DefenseConfig::default();
        let mut state = DefenseState::new(7, &config);
        assert_eq!(state.phase, Phase::Idle);

        state.start(&config);
        assert_eq!(state.phase, Phase::Running);

        state.pause();
        assert_eq!(state.phase, Phase::Paused);
        state.pause();
        assert_eq!(state.phase, Phase::Running);

        state.reset(&config);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.money, config.starting_money);
    }

    #[test]
    fn test_place_tower_success() {
        let config = DefenseConfig::default();
        let mut state = running_state(&config);

        state.select_tower(Some(TowerKind::Basic));
        state.place_tower(FixedVec2::from_ints(205, 205), &config);

        assert_eq!(state.towers.len(), 1);
        assert_eq!(state.money, config.starting_money - TowerKind::Basic.cost());
        assert_eq!(state.selected_tower, None);
        // Snapped to the cell center
        assert_eq!(state.towers[0].position, FixedVec2::from_ints(220, 220));

        let events = state.take_events();
        assert!(matches!(
            events[0].data,
            DefenseEventData::TowerPlaced { id: 0, .. }
        ));
    }

    #[test]
    fn test_place_tower_requires_selection() {
        let config = DefenseConfig::default();
        let mut state = running_state(&config);

        state.place_tower(FixedVec2::from_ints(100, 100), &config);
        assert!(state.towers.is_empty());
        assert_eq!(state.money, config.starting_money);
    }

    #[test]
    fn test_place_tower_insufficient_funds() {
        let config = DefenseConfig::default();
        let mut state = running_state(&config);

        state.select_tower(Some(TowerKind::Heavy));
        state.place_tower(FixedVec2::from_ints(100, 100), &config);

        // Heavy costs 150, starting money is 100
        assert!(state.towers.is_empty());
        assert_eq!(state.money, config.starting_money);
        assert_eq!(state.selected_tower, Some(TowerKind::Heavy));
    }

    #[test]
    fn test_place_tower_spacing() {
        let config = DefenseConfig::default();
        let mut state = running_state(&config);
        state.money = 500;

        state.select_tower(Some(TowerKind::Basic));
        state.place_tower(FixedVec2::from_ints(100, 100), &config);
        assert_eq!(state.towers.len(), 1);

        // Same cell: rejected
        state.select_tower(Some(TowerKind::Basic));
        state.place_tower(FixedVec2::from_ints(101, 99), &config);
        assert_eq!(state.towers.len(), 1);

        // Adjacent cell center is exactly one spacing away: allowed
        state.place_tower(FixedVec2::from_ints(140, 100), &config);
        assert_eq!(state.towers.len(), 2);
    }

    #[test]
    fn test_state_hash_determinism() {
        let config = DefenseConfig::default();
        let a = running_state(&config);
        let b = running_state(&config);
        assert_eq!(a.compute_hash(), b.compute_hash());

        let mut c = running_state(&config);
        c.money += 1;
        assert_ne!(a.compute_hash(), c.compute_hash());
    }
}

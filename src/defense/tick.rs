//! Defense Simulation Tick
//!
//! The fixed-timestep update pipeline. Phase order is part of the
//! determinism contract and never changes:
//!
//! 1. advance the engine clock
//! 2. spawn enemies
//! 3. move enemies, drop the dead, leak walkers past the path end
//! 4. fire towers at the nearest enemy in range
//! 5. fly projectiles and resolve hits at their snapshots
//! 6. check for game over
//!
//! All iteration is in spawn order over plain vectors; combined with
//! fixed-point math and the seeded RNG, two identically-driven states stay
//! bit-identical.

use tracing::{debug, info};

use crate::core::fixed::fixed_abs;
use crate::core::hash::hash_hex;
use crate::core::vec2::{sq, FixedVec2};
use crate::defense::events::DefenseEventData;
use crate::defense::state::{DefenseConfig, DefenseState, Enemy, Phase, Projectile};
use crate::TICK_MS;

/// Run one simulation tick.
///
/// No-op unless the round is Running. Advances simulated time by
/// [`TICK_MS`]; the caller controls pacing (the shell typically drives
/// this from a fixed-interval timer).
pub fn tick(state: &mut DefenseState, config: &DefenseConfig) {
    if state.phase != Phase::Running {
        return;
    }

    // Phase 1: advance the engine clock
    state.clock_ms += TICK_MS;

    // Phase 2: spawn
    spawn_enemy(state, config);

    // Phase 3: enemy movement and removal
    update_enemies(state, config);

    // Phase 4: tower fire
    update_towers(state, config);

    // Phase 5: projectile flight and hits
    update_projectiles(state, config);

    // Phase 6: game over
    if state.lives == 0 {
        state.phase = Phase::GameOver;
        state.push_event(DefenseEventData::GameOver { score: state.score });
        info!(
            score = state.score,
            clock_ms = state.clock_ms,
            state_hash = %hash_hex(&state.compute_hash()),
            "defense round lost"
        );
    }
}

/// Spawn an enemy at the path start when the spawn delay has elapsed.
fn spawn_enemy(state: &mut DefenseState, config: &DefenseConfig) {
    if state.clock_ms - state.last_spawn_ms < config.spawn_delay_ms {
        return;
    }

    let id = state.next_enemy_id;
    state.next_enemy_id += 1;

    let health = 50 + state.level as i32 * 10;
    state.enemies.push(Enemy {
        id,
        position: config.path[0],
        health,
        max_health: health,
        speed: config.enemy_speed,
        path_index: 0,
        reward: 10 + state.level * 2,
    });
    state.last_spawn_ms = state.clock_ms;
    state.push_event(DefenseEventData::EnemySpawned { id });
}

/// Move every enemy one step along the path.
///
/// Enemies whose health reached zero last phase 5 are dropped here with an
/// `EnemyKilled` event. Completing the final segment leaks on the same
/// tick, costing a life; the path-end check at the top also catches
/// enemies that somehow start a tick on the final waypoint.
fn update_enemies(state: &mut DefenseState, config: &DefenseConfig) {
    let mut i = 0;
    while i < state.enemies.len() {
        if state.enemies[i].health <= 0 {
            let enemy = state.enemies.remove(i);
            state.push_event(DefenseEventData::EnemyKilled {
                id: enemy.id,
                reward: enemy.reward,
            });
            continue;
        }

        let next_index = state.enemies[i].path_index + 1;
        let next = match config.path.get(next_index).copied() {
            Some(waypoint) => waypoint,
            None => {
                let enemy = state.enemies.remove(i);
                state.lives = state.lives.saturating_sub(1);
                let lives_left = state.lives;
                debug!(enemy = enemy.id, lives_left, "enemy leaked");
                state.push_event(DefenseEventData::EnemyLeaked {
                    id: enemy.id,
                    lives_left,
                });
                continue;
            }
        };

        let enemy = &mut state.enemies[i];
        let to_next = next.sub(enemy.position);
        if to_next.length_squared() < sq(enemy.speed) {
            // Close enough: snap to the waypoint and turn the corner
            enemy.position = next;
            enemy.path_index = next_index;

            // Completing the final segment leaks on this tick, not the next
            if next_index == config.path.len() - 1 {
                let enemy = state.enemies.remove(i);
                state.lives = state.lives.saturating_sub(1);
                let lives_left = state.lives;
                debug!(enemy = enemy.id, lives_left, "enemy leaked");
                state.push_event(DefenseEventData::EnemyLeaked {
                    id: enemy.id,
                    lives_left,
                });
                continue;
            }
        } else {
            enemy.position = enemy.position.add(to_next.normalize().scale(enemy.speed));
        }
        i += 1;
    }
}

/// Fire every tower whose cooldown has elapsed at the nearest living enemy
/// in range.
///
/// Equidistant candidates resolve to the earliest-spawned enemy: the scan
/// runs in spawn order with a strict `<` comparison.
fn update_towers(state: &mut DefenseState, config: &DefenseConfig) {
    for ti in 0..state.towers.len() {
        let tower = &state.towers[ti];
        if state.clock_ms - tower.last_fired_ms < tower.kind.fire_rate_ms() {
            continue;
        }
        let position = tower.position;
        let damage = tower.kind.damage();
        let range_sq = sq(tower.kind.range());

        let mut target: Option<(FixedVec2, i64)> = None;
        for enemy in &state.enemies {
            if enemy.health <= 0 {
                continue;
            }
            let dist_sq = enemy.position.distance_squared(position);
            if dist_sq <= range_sq && target.map_or(true, |(_, best)| dist_sq < best) {
                target = Some((enemy.position, dist_sq));
            }
        }

        if let Some((snapshot, _)) = target {
            let id = state.next_projectile_id;
            state.next_projectile_id += 1;
            state.projectiles.push(Projectile {
                id,
                position,
                target: snapshot,
                damage,
                speed: config.projectile_speed,
            });
            state.towers[ti].last_fired_ms = state.clock_ms;
        }
    }
}

/// Fly every projectile toward its snapshot; resolve hits on arrival.
///
/// Arrival damages the first living enemy (spawn order) inside the hit
/// tolerance box around the snapshot. A kill credits the reward to money
/// and score immediately; the corpse is removed next tick's phase 3. The
/// projectile is always consumed on arrival, hit or not.
fn update_projectiles(state: &mut DefenseState, config: &DefenseConfig) {
    let tolerance = config.hit_tolerance;
    let mut i = 0;
    while i < state.projectiles.len() {
        let projectile = &state.projectiles[i];
        let to_target = projectile.target.sub(projectile.position);

        if to_target.length_squared() >= sq(projectile.speed) {
            let step = to_target.normalize().scale(projectile.speed);
            let projectile = &mut state.projectiles[i];
            projectile.position = projectile.position.add(step);
            i += 1;
            continue;
        }

        // Arrived at the snapshot
        let projectile = state.projectiles.remove(i);
        let mut hit = false;
        let mut kill_reward = None;
        for enemy in state.enemies.iter_mut() {
            if enemy.health <= 0 {
                continue;
            }
            let dx = fixed_abs(enemy.position.x - projectile.target.x);
            let dy = fixed_abs(enemy.position.y - projectile.target.y);
            if dx <= tolerance && dy <= tolerance {
                enemy.health -= projectile.damage;
                hit = true;
                if enemy.health <= 0 {
                    kill_reward = Some(enemy.reward);
                }
                break;
            }
        }

        if let Some(reward) = kill_reward {
            state.money += reward;
            state.score += reward;
        }
        if !hit {
            state.push_event(DefenseEventData::ProjectileMissed { id: projectile.id });
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

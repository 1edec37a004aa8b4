//! Per-tick voxel motion for the dismantle and rebuild phases.
//!
//! All rates are per tick (one display refresh), not per second, matching how
//! the scene was tuned.

use glam::Vec3;
use rubble_core::config::EngineConfig;
use rubble_core::rng::{self, STREAM_SCATTER};

use crate::planner::RebuildAssignment;
use crate::store::SimVoxel;

/// Give every voxel a random outward kick and spin to start a dismantle.
///
/// Horizontal velocity is centered on zero, vertical velocity only points up.
/// `salt` varies the pattern between successive dismantles.
pub fn scatter(voxels: &mut [SimVoxel], config: &EngineConfig, salt: u32) {
    let seed = config.seed.wrapping_add(salt.wrapping_mul(0x9E37));
    let centered = |id: u32, stream: u32| rng::unit(id, STREAM_SCATTER + stream, seed) - 0.5;

    for v in voxels {
        let id = v.id;
        v.velocity = Vec3::new(
            centered(id, 0) * config.scatter_horizontal,
            rng::unit(id, STREAM_SCATTER + 1, seed) * config.scatter_vertical,
            centered(id, 2) * config.scatter_horizontal,
        );
        v.angular_velocity = Vec3::new(
            centered(id, 3) * config.scatter_spin,
            centered(id, 4) * config.scatter_spin,
            centered(id, 5) * config.scatter_spin,
        );
    }
}

/// Advance projectile motion one tick: gravity, then position and rotation.
///
/// A voxel whose center drops below the rest height is clamped onto the floor,
/// its vertical velocity reflected with loss, and its horizontal and angular
/// velocity damped. No voxel-voxel collision.
pub fn step_dismantle(voxels: &mut [SimVoxel], config: &EngineConfig) {
    let rest = config.rest_height();

    for v in voxels {
        v.velocity.y -= config.gravity;
        v.position += v.velocity;
        v.rotation += v.angular_velocity;

        if v.position.y < rest {
            v.position.y = rest;
            v.velocity.y *= config.bounce;
            v.velocity.x *= config.floor_friction;
            v.velocity.z *= config.floor_friction;
            v.angular_velocity *= config.spin_damping;
        }
    }
}

/// Advance the rebuild one tick. Returns true once every claimed voxel has
/// arrived and every delay has elapsed.
///
/// Each claimed voxel past its delay closes a fixed fraction of the remaining
/// distance to its target, and of its rotation toward zero. Within the arrival
/// epsilon it snaps exactly onto the target. Rubble is left untouched.
pub fn step_rebuild(
    voxels: &mut [SimVoxel],
    assignments: &[RebuildAssignment],
    elapsed_ms: f64,
    config: &EngineConfig,
) -> bool {
    let rate = config.convergence_rate;
    let mut all_done = true;

    for (v, a) in voxels.iter_mut().zip(assignments) {
        if a.is_rubble {
            continue;
        }
        if elapsed_ms < a.delay_ms {
            all_done = false;
            continue;
        }

        v.position += (a.target - v.position) * rate;
        v.rotation -= v.rotation * rate;

        if a.target.distance_squared(v.position) > config.arrival_epsilon_sq {
            all_done = false;
        } else {
            v.position = a.target;
            v.rotation = Vec3::ZERO;
        }
    }

    all_done
}

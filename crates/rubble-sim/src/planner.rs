use glam::Vec3;
use rubble_core::config::EngineConfig;
use rubble_core::types::{Rgb, TargetCell};

use crate::matcher::ColorMatcher;
use crate::store::SimVoxel;

/// Where one voxel should go during a rebuild, and when it may start moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RebuildAssignment {
    pub target: Vec3,
    /// Milliseconds after the rebuild starts before this voxel moves.
    pub delay_ms: f64,
    /// Not claimed by any target; `target` is the voxel's own position.
    pub is_rubble: bool,
}

/// One assignment per voxel, indexed by voxel id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RebuildPlan {
    pub assignments: Vec<RebuildAssignment>,
    /// Targets that received a voxel.
    pub filled: usize,
    /// Targets left empty because every voxel was already claimed.
    pub dropped: usize,
}

impl RebuildPlan {
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&RebuildAssignment> {
        self.assignments.get(id)
    }

    pub fn rubble_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_rubble).count()
    }

    /// Longest start delay among claimed voxels.
    pub fn max_delay_ms(&self) -> f64 {
        self.assignments
            .iter()
            .filter(|a| !a.is_rubble)
            .map(|a| a.delay_ms)
            .fold(0.0, f64::max)
    }
}

/// Map voxels onto target cells by greedy nearest color.
///
/// Targets are served strictly in the order given: each takes the best
/// still-available voxel (see [`ColorMatcher`]) and earlier targets get first
/// pick. No global optimum is attempted. Targets beyond the voxel supply are
/// dropped; voxels left unclaimed become rubble and stay where they are.
/// Claimed voxels are delayed in proportion to their target's height above
/// the floor so the structure rises bottom-up.
///
/// O(targets × voxels). Deterministic for identical inputs.
pub fn plan(voxels: &[SimVoxel], targets: &[TargetCell], config: &EngineConfig) -> RebuildPlan {
    let matcher = ColorMatcher::new(config.match_early_exit);
    let palette: Vec<Rgb> = voxels.iter().map(|v| v.color).collect();
    let mut taken = vec![false; voxels.len()];
    let mut claimed: Vec<Option<RebuildAssignment>> = vec![None; voxels.len()];
    let mut filled = 0usize;

    for target in targets {
        let Some(idx) = matcher.best_match(&palette, &taken, target.rgb()) else {
            continue;
        };
        taken[idx] = true;
        claimed[idx] = Some(RebuildAssignment {
            target: target.position(),
            delay_ms: config.delay_for_height(target.y),
            is_rubble: false,
        });
        filled += 1;
    }

    let assignments: Vec<RebuildAssignment> = claimed
        .into_iter()
        .zip(voxels)
        .map(|(slot, voxel)| {
            slot.unwrap_or(RebuildAssignment {
                target: voxel.position,
                delay_ms: 0.0,
                is_rubble: true,
            })
        })
        .collect();

    let plan = RebuildPlan {
        assignments,
        filled,
        dropped: targets.len() - filled,
    };

    log::debug!(
        "Rebuild plan: {} voxels, {} targets, {} filled, {} dropped, {} rubble",
        voxels.len(),
        targets.len(),
        plan.filled,
        plan.dropped,
        plan.rubble_count()
    );

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubble_core::constants::FLOOR_Y;

    const RED: u32 = 0xFF0000;
    const BLUE: u32 = 0x0000FF;
    const GREEN: u32 = 0x00FF00;

    fn voxel(id: u32, pos: Vec3, hex: u32) -> SimVoxel {
        SimVoxel::at_rest(id, pos, Rgb::from_hex(hex))
    }

    #[test]
    fn test_greedy_order_red_blue() {
        let voxels = vec![
            voxel(0, Vec3::ZERO, RED),
            voxel(1, Vec3::X, BLUE),
        ];
        let targets = vec![
            TargetCell::new(5.0, FLOOR_Y, 0.0, BLUE),
            TargetCell::new(6.0, FLOOR_Y, 0.0, RED),
        ];
        let plan = plan(&voxels, &targets, &EngineConfig::default());

        assert_eq!(plan.assignments[1].target, Vec3::new(5.0, FLOOR_Y, 0.0));
        assert_eq!(plan.assignments[0].target, Vec3::new(6.0, FLOOR_Y, 0.0));
        assert!(!plan.assignments[0].is_rubble);
        assert!(!plan.assignments[1].is_rubble);
        assert_eq!(plan.filled, 2);
        assert_eq!(plan.dropped, 0);
    }

    #[test]
    fn test_rubble_fallback() {
        let voxels = vec![
            voxel(0, Vec3::new(1.0, 2.0, 3.0), RED),
            voxel(1, Vec3::new(4.0, 5.0, 6.0), GREEN),
            voxel(2, Vec3::new(7.0, 8.0, 9.0), BLUE),
        ];
        let targets = vec![TargetCell::new(0.0, 0.0, 0.0, GREEN)];
        let plan = plan(&voxels, &targets, &EngineConfig::default());

        assert_eq!(plan.rubble_count(), 2);
        assert!(!plan.assignments[1].is_rubble);
        for id in [0usize, 2] {
            let a = plan.assignments[id];
            assert!(a.is_rubble);
            assert_eq!(a.target, voxels[id].position, "rubble must stay put");
            assert_eq!(a.delay_ms, 0.0);
        }
    }

    #[test]
    fn test_excess_targets_dropped() {
        let voxels = vec![voxel(0, Vec3::ZERO, RED)];
        let targets = vec![
            TargetCell::new(0.0, 0.0, 0.0, RED),
            TargetCell::new(1.0, 0.0, 0.0, RED),
            TargetCell::new(2.0, 0.0, 0.0, RED),
        ];
        let plan = plan(&voxels, &targets, &EngineConfig::default());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.filled, 1);
        assert_eq!(plan.dropped, 2);
        assert_eq!(plan.assignments[0].target, Vec3::ZERO, "first target gets first pick");
    }

    #[test]
    fn test_assignment_uniqueness() {
        let voxels: Vec<SimVoxel> = (0..40)
            .map(|i| voxel(i, Vec3::splat(i as f32), [RED, GREEN, BLUE][i as usize % 3]))
            .collect();
        let targets: Vec<TargetCell> = (0..25)
            .map(|i| TargetCell::new(i as f32, 0.0, -(i as f32), [BLUE, RED][i % 2]))
            .collect();
        let plan = plan(&voxels, &targets, &EngineConfig::default());

        assert_eq!(plan.len(), voxels.len());
        let claimed: Vec<Vec3> = plan
            .assignments
            .iter()
            .filter(|a| !a.is_rubble)
            .map(|a| a.target)
            .collect();
        assert_eq!(claimed.len(), targets.len());
        for (i, a) in claimed.iter().enumerate() {
            for b in &claimed[i + 1..] {
                assert_ne!(a, b, "two voxels claimed the same target");
            }
        }
    }

    #[test]
    fn test_delay_grows_with_height() {
        let voxels = vec![voxel(0, Vec3::ZERO, RED), voxel(1, Vec3::ZERO, RED)];
        let targets = vec![
            TargetCell::new(0.0, FLOOR_Y + 30.0, 0.0, RED),
            TargetCell::new(0.0, FLOOR_Y, 0.0, RED),
        ];
        let plan = plan(&voxels, &targets, &EngineConfig::default());
        assert!((plan.assignments[0].delay_ms - 1200.0).abs() < 1e-6);
        assert_eq!(plan.assignments[1].delay_ms, 0.0);
        assert!((plan.max_delay_ms() - 1200.0).abs() < 1e-6);
    }

    #[test]
    fn test_deterministic() {
        let voxels: Vec<SimVoxel> = (0..30)
            .map(|i| voxel(i, Vec3::ZERO, 0x101010 * (i % 15 + 1)))
            .collect();
        let targets: Vec<TargetCell> = (0..20)
            .map(|i| TargetCell::new(0.0, i as f32, 0.0, 0x0F0F0F * (i % 17)))
            .collect();
        let config = EngineConfig::default();
        assert_eq!(plan(&voxels, &targets, &config), plan(&voxels, &targets, &config));
    }

    #[test]
    fn test_empty_inputs() {
        let config = EngineConfig::default();
        assert!(plan(&[], &[TargetCell::new(0.0, 0.0, 0.0, RED)], &config).is_empty());
        let lone = vec![voxel(0, Vec3::ONE, RED)];
        let p = plan(&lone, &[], &config);
        assert_eq!(p.rubble_count(), 1);
    }
}

use glam::Vec3;
use rubble_core::math::offset_lightness;
use rubble_core::rng::{self, STREAM_JITTER};
use rubble_core::types::{Rgb, TargetCell};

/// One simulated cube. `id` is its index in the store and never changes while loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SimVoxel {
    pub id: u32,
    pub position: Vec3,
    /// Assigned at creation and never repainted; rebuilds only relocate.
    pub color: Rgb,
    /// Non-zero only while dismantling.
    pub velocity: Vec3,
    /// Euler angles (XYZ order) in radians.
    pub rotation: Vec3,
    pub angular_velocity: Vec3,
}

impl SimVoxel {
    /// A voxel resting at `position` with no motion.
    pub fn at_rest(id: u32, position: Vec3, color: Rgb) -> Self {
        Self {
            id,
            position,
            color,
            velocity: Vec3::ZERO,
            rotation: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }

    /// Drop linear and angular velocity, keeping position and rotation.
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }
}

/// Flat voxel array. Its length is fixed for the lifetime of a loaded model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoxelStore {
    voxels: Vec<SimVoxel>,
}

impl VoxelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from generator cells, one voxel per cell in input order.
    ///
    /// Each voxel's lightness is offset by a hash of (index, seed) in
    /// `[-jitter/2, jitter/2)`, so identical inputs give identical stores.
    pub fn from_cells(cells: &[TargetCell], jitter: f32, seed: u32) -> Self {
        let voxels = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let id = i as u32;
                let base = cell.rgb();
                let color = if jitter > 0.0 {
                    let delta = (rng::unit(id, STREAM_JITTER, seed) - 0.5) * jitter;
                    offset_lightness(base, delta)
                } else {
                    base
                };
                SimVoxel::at_rest(id, cell.position(), color)
            })
            .collect();
        Self { voxels }
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&SimVoxel> {
        self.voxels.get(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimVoxel> {
        self.voxels.iter()
    }

    pub fn as_slice(&self) -> &[SimVoxel] {
        &self.voxels
    }

    pub fn as_mut_slice(&mut self) -> &mut [SimVoxel] {
        &mut self.voxels
    }

    /// Zero every voxel's velocity and angular velocity.
    pub fn halt_all(&mut self) {
        for v in &mut self.voxels {
            v.halt();
        }
    }
}

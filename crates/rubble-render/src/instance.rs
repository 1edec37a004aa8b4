use glam::{EulerRot, Mat4, Quat};
use rubble_core::constants::VOXEL_GAP;
use rubble_sim::camera::CameraRig;
use rubble_sim::store::{SimVoxel, VoxelStore};

/// GPU-uploadable per-voxel instance. Must match the instance layout in the
/// host's cube shader: a column-major model matrix followed by RGBA.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VoxelInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl VoxelInstance {
    /// Cube drawn at `edge` size: translation, XYZ Euler rotation, uniform scale.
    pub fn from_voxel(voxel: &SimVoxel, edge: f32) -> Self {
        let r = voxel.rotation;
        let rotation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
        let model = Mat4::from_scale_rotation_translation(
            glam::Vec3::splat(edge),
            rotation,
            voxel.position,
        );
        let [cr, cg, cb] = voxel.color.to_array();
        Self {
            model: model.to_cols_array_2d(),
            color: [cr, cg, cb, 1.0],
        }
    }
}

/// GPU-uploadable camera uniforms.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

impl CameraUniforms {
    pub fn from_rig(rig: &CameraRig) -> Self {
        let eye = rig.pose.eye;
        Self {
            view_proj: rig.view_proj().to_cols_array_2d(),
            eye: [eye.x, eye.y, eye.z, 1.0],
        }
    }
}

/// CPU-side instance array mirroring the voxel store.
///
/// Cube edges are shrunk by a small gap so neighbouring voxels read as
/// separate blocks.
#[derive(Debug, Clone)]
pub struct InstanceBuffer {
    instances: Vec<VoxelInstance>,
    edge: f32,
}

impl InstanceBuffer {
    pub fn new(voxel_size: f32) -> Self {
        Self {
            instances: Vec::new(),
            edge: (voxel_size - VOXEL_GAP).max(0.0),
        }
    }

    /// Repack every instance from the store. Reuses the existing allocation.
    pub fn sync(&mut self, store: &VoxelStore) {
        self.instances.clear();
        self.instances
            .extend(store.iter().map(|v| VoxelInstance::from_voxel(v, self.edge)));
    }

    pub fn instances(&self) -> &[VoxelInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.instances.shrink_to_fit();
    }
}

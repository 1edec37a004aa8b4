use rubble_sim::engine::Engine;

use crate::instance::{CameraUniforms, InstanceBuffer};
use crate::sink::InstanceSink;

/// Per-frame render statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub instances: usize,
    /// Instance data was re-uploaded this frame.
    pub uploaded: bool,
}

/// Mirrors engine voxels into an instance sink once per frame.
///
/// Instance data only moves when the engine reports voxel changes; camera
/// uniforms go out every frame since the camera moves independently.
pub struct RenderAdapter<S: InstanceSink> {
    buffer: InstanceBuffer,
    sink: S,
    disposed: bool,
}

impl<S: InstanceSink> RenderAdapter<S> {
    pub fn new(voxel_size: f32, sink: S) -> Self {
        Self {
            buffer: InstanceBuffer::new(voxel_size),
            sink,
            disposed: false,
        }
    }

    pub fn frame(&mut self, engine: &mut Engine) -> FrameStats {
        if self.disposed {
            return FrameStats::default();
        }

        let camera = CameraUniforms::from_rig(engine.camera());
        self.sink.set_camera(bytemuck::bytes_of(&camera));

        let uploaded = engine.take_dirty();
        if uploaded {
            self.buffer.sync(engine.voxels());
            self.sink.upload(self.buffer.as_bytes(), self.buffer.len());
        }

        FrameStats {
            instances: self.buffer.len(),
            uploaded,
        }
    }

    /// Release sink resources. Later frames do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.buffer.clear();
        self.sink.release();
        log::info!("Render adapter disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use rubble_core::config::EngineConfig;
    use rubble_core::types::TargetCell;

    fn engine_with(n: usize) -> Engine {
        let mut engine = Engine::headless(EngineConfig::default());
        let cells: Vec<TargetCell> = (0..n)
            .map(|i| TargetCell::new(i as f32, -11.0, 0.0, 0x336699))
            .collect();
        engine.load_initial_model(&cells, 0.0);
        engine.trigger_skydive(0.0);
        engine.tick(4000.0);
        engine
    }

    #[test]
    fn test_upload_only_when_dirty() {
        let mut engine = engine_with(4);
        let mut adapter = RenderAdapter::new(1.0, RecordingSink::default());

        let first = adapter.frame(&mut engine);
        assert!(first.uploaded);
        assert_eq!(first.instances, 4);
        assert_eq!(adapter.sink().last_count, 4);

        engine.tick(4016.0);
        let second = adapter.frame(&mut engine);
        assert!(!second.uploaded, "stable scene must not re-upload");
        assert_eq!(adapter.sink().uploads, 1);
    }

    #[test]
    fn test_dismantle_uploads_every_frame() {
        let mut engine = engine_with(3);
        let mut adapter = RenderAdapter::new(1.0, RecordingSink::default());
        adapter.frame(&mut engine);

        assert!(engine.dismantle(4100.0));
        for i in 0..5 {
            engine.tick(4100.0 + i as f64 * 16.0);
            assert!(adapter.frame(&mut engine).uploaded);
        }
        assert_eq!(adapter.sink().uploads, 6);
    }

    #[test]
    fn test_dispose_releases_once() {
        let mut engine = engine_with(2);
        let mut adapter = RenderAdapter::new(1.0, RecordingSink::default());
        adapter.frame(&mut engine);
        adapter.dispose();
        adapter.dispose();

        assert!(adapter.is_disposed());
        assert!(adapter.sink().released);
        assert!(adapter.sink().last_bytes.is_empty());
        engine.load_initial_model(&[TargetCell::new(0.0, 0.0, 0.0, 0)], 4200.0);
        assert_eq!(adapter.frame(&mut engine), FrameStats::default());
        assert_eq!(adapter.sink().uploads, 1);
    }
}

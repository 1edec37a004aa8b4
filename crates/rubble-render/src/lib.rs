pub mod adapter;
pub mod instance;
pub mod sink;

pub use adapter::{FrameStats, RenderAdapter};
pub use instance::{CameraUniforms, InstanceBuffer, VoxelInstance};
pub use sink::{InstanceSink, RecordingSink};

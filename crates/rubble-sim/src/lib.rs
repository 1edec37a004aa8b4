pub mod camera;
pub mod engine;
pub mod integrator;
pub mod matcher;
pub mod planner;
pub mod state_machine;
pub mod store;

pub use camera::{CameraPose, CameraRig};
pub use engine::{Callbacks, Engine, EngineObserver, NullObserver, TickReport};
pub use planner::{plan, RebuildAssignment, RebuildPlan};
pub use state_machine::{PhaseMachine, Trigger};
pub use store::{SimVoxel, VoxelStore};

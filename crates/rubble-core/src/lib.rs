pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod rng;
pub mod types;

pub use config::EngineConfig;
pub use error::CoreError;
pub use types::{Phase, Rgb, TargetCell};

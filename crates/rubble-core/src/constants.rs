//! Single source of truth for scene constants.
//! `EngineConfig::default()` is built from these; a RON config may override any of them.

/// Edge length of one voxel cube in world units.
pub const VOXEL_SIZE: f32 = 1.0;

/// World-space height of the floor plane.
pub const FLOOR_Y: f32 = -12.0;

/// Downward acceleration applied to vertical velocity each dismantle tick.
pub const GRAVITY_PER_TICK: f32 = 0.025;

/// Multiplier applied to vertical velocity on floor contact (sign flip + energy loss).
pub const BOUNCE_FACTOR: f32 = -0.5;

/// Horizontal velocity multiplier on floor contact.
pub const FLOOR_FRICTION: f32 = 0.9;

/// Angular velocity multiplier on floor contact.
pub const FLOOR_SPIN_DAMPING: f32 = 0.8;

/// Full width of the horizontal scatter impulse on dismantle (centered on zero).
pub const SCATTER_HORIZONTAL: f32 = 0.8;

/// Maximum upward scatter impulse on dismantle.
pub const SCATTER_VERTICAL: f32 = 0.5;

/// Full width of the angular scatter impulse on dismantle (centered on zero).
pub const SCATTER_SPIN: f32 = 0.2;

/// Fraction of the remaining distance covered per rebuild tick.
pub const REBUILD_CONVERGENCE_RATE: f32 = 0.15;

/// Squared distance under which a rebuilding voxel snaps onto its target.
pub const ARRIVAL_EPSILON_SQ: f32 = 0.01;

/// Color distance below which the matcher stops scanning for a better voxel.
pub const MATCH_EARLY_EXIT: f32 = 0.05;

/// Rebuild delay added per height unit above the floor (milliseconds).
pub const DELAY_PER_HEIGHT_UNIT_MS: f64 = 600.0;

/// Height (world units) that counts as one delay unit.
pub const HEIGHT_UNIT: f32 = 15.0;

/// Length of the skydive camera drop (milliseconds).
pub const DROP_DURATION_MS: f64 = 4000.0;

/// Camera eye at the start of the skydive.
pub const DROP_START_EYE: [f32; 3] = [0.0, 500.0, 0.0];

/// Camera eye at the end of the skydive.
pub const DROP_END_EYE: [f32; 3] = [30.0, 30.0, 60.0];

/// Look-at point at the start of the skydive.
pub const DROP_START_LOOK: [f32; 3] = [0.0, 0.0, 0.0];

/// Look-at point at the end of the skydive (also the orbit-controls target).
pub const DROP_END_LOOK: [f32; 3] = [0.0, 5.0, 0.0];

/// Radius of the idle intro camera sweep.
pub const INTRO_ORBIT_RADIUS: f32 = 50.0;

/// Angular speed of the intro sweep in radians per millisecond of wall clock.
pub const INTRO_ORBIT_SPEED: f64 = 0.0001;

/// Orbit-controls auto-rotate speed; 2.0 = one revolution per 30 s at 60 fps.
pub const AUTO_ROTATE_SPEED: f32 = 2.0;

/// Full width of the HSL lightness jitter applied when voxels are created.
pub const LIGHTNESS_JITTER: f32 = 0.05;

/// Gap between neighbouring cubes when rendered.
pub const VOXEL_GAP: f32 = 0.05;

/// Decimal places kept for coordinates in exported snapshots.
pub const EXPORT_DECIMALS: i32 = 2;

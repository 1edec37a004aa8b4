use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::CoreError;

/// Tunables for the engine, loadable from RON.
///
/// Every field falls back to the matching constant in [`crate::constants`],
/// so a config file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub voxel_size: f32,
    pub floor_y: f32,

    // Dismantle
    pub gravity: f32,
    pub bounce: f32,
    pub floor_friction: f32,
    pub spin_damping: f32,
    pub scatter_horizontal: f32,
    pub scatter_vertical: f32,
    pub scatter_spin: f32,

    // Rebuild
    pub convergence_rate: f32,
    pub arrival_epsilon_sq: f32,
    pub match_early_exit: f32,
    pub delay_per_height_unit_ms: f64,
    pub height_unit: f32,

    // Camera
    pub drop_duration_ms: f64,
    pub drop_start_eye: [f32; 3],
    pub drop_end_eye: [f32; 3],
    pub drop_start_look: [f32; 3],
    pub drop_end_look: [f32; 3],
    pub intro_orbit_radius: f32,
    pub intro_orbit_speed: f64,
    pub auto_rotate_speed: f32,

    /// Full width of the lightness jitter applied at voxel creation. 0 disables it.
    pub lightness_jitter: f32,
    /// Seed for every deterministic hash the engine draws from.
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            voxel_size: VOXEL_SIZE,
            floor_y: FLOOR_Y,
            gravity: GRAVITY_PER_TICK,
            bounce: BOUNCE_FACTOR,
            floor_friction: FLOOR_FRICTION,
            spin_damping: FLOOR_SPIN_DAMPING,
            scatter_horizontal: SCATTER_HORIZONTAL,
            scatter_vertical: SCATTER_VERTICAL,
            scatter_spin: SCATTER_SPIN,
            convergence_rate: REBUILD_CONVERGENCE_RATE,
            arrival_epsilon_sq: ARRIVAL_EPSILON_SQ,
            match_early_exit: MATCH_EARLY_EXIT,
            delay_per_height_unit_ms: DELAY_PER_HEIGHT_UNIT_MS,
            height_unit: HEIGHT_UNIT,
            drop_duration_ms: DROP_DURATION_MS,
            drop_start_eye: DROP_START_EYE,
            drop_end_eye: DROP_END_EYE,
            drop_start_look: DROP_START_LOOK,
            drop_end_look: DROP_END_LOOK,
            intro_orbit_radius: INTRO_ORBIT_RADIUS,
            intro_orbit_speed: INTRO_ORBIT_SPEED,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            lightness_jitter: LIGHTNESS_JITTER,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Parse a RON document. Missing fields keep their defaults.
    /// The result is validated; see [`EngineConfig::validate`].
    pub fn from_ron_str(ron_str: &str) -> Result<Self, CoreError> {
        let options = ron::Options::default();
        let config: Self = options
            .from_str(ron_str)
            .map_err(|e| CoreError::ConfigParse(e.to_string()))?;

        if let Err(mut errors) = config.validate() {
            for e in &errors {
                log::warn!("Config validation error: {e}");
            }
            return Err(errors.swap_remove(0));
        }
        Ok(config)
    }

    /// Check the tunables that bound how long a phase can last.
    ///
    /// A rebuild only terminates when the convergence rate is in (0, 1], the
    /// arrival epsilon is positive and delays are finite.
    pub fn validate(&self) -> Result<(), Vec<CoreError>> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: &'static str, value: f64, expected: &'static str| {
            if !ok {
                errors.push(CoreError::OutOfRange {
                    field,
                    value,
                    expected,
                });
            }
        };

        let rate = self.convergence_rate;
        check(rate > 0.0 && rate <= 1.0, "convergence_rate", rate as f64, "0 < rate <= 1");
        let eps = self.arrival_epsilon_sq;
        check(eps > 0.0 && eps.is_finite(), "arrival_epsilon_sq", eps as f64, "> 0");
        let unit = self.height_unit;
        check(unit > 0.0 && unit.is_finite(), "height_unit", unit as f64, "> 0");
        let delay = self.delay_per_height_unit_ms;
        check(delay >= 0.0 && delay.is_finite(), "delay_per_height_unit_ms", delay, ">= 0");
        let drop = self.drop_duration_ms;
        check(drop >= 0.0 && drop.is_finite(), "drop_duration_ms", drop, ">= 0");
        let size = self.voxel_size;
        check(size > 0.0 && size.is_finite(), "voxel_size", size as f64, "> 0");

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Height of a resting voxel's center: floor plus half a voxel.
    pub fn rest_height(&self) -> f32 {
        self.floor_y + self.voxel_size / 2.0
    }

    /// Rebuild delay for a target at height `y`; zero at or below the floor.
    pub fn delay_for_height(&self, y: f32) -> f64 {
        let units = ((y - self.floor_y) / self.height_unit).max(0.0);
        units as f64 * self.delay_per_height_unit_ms
    }

    pub fn drop_start_eye(&self) -> Vec3 {
        Vec3::from_array(self.drop_start_eye)
    }

    pub fn drop_end_eye(&self) -> Vec3 {
        Vec3::from_array(self.drop_end_eye)
    }

    pub fn drop_start_look(&self) -> Vec3 {
        Vec3::from_array(self.drop_start_look)
    }

    pub fn drop_end_look(&self) -> Vec3 {
        Vec3::from_array(self.drop_end_look)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ron_gives_defaults() {
        let config = EngineConfig::from_ron_str("()").expect("parse");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_ron_str("(floor_y: -5.0, seed: 9, lightness_jitter: 0.0)")
            .expect("parse");
        assert_eq!(config.floor_y, -5.0);
        assert_eq!(config.seed, 9);
        assert_eq!(config.lightness_jitter, 0.0);
        assert_eq!(config.gravity, GRAVITY_PER_TICK);
    }

    #[test]
    fn test_bad_ron_is_error() {
        let err = EngineConfig::from_ron_str("(floor_y: \"low\")").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse(_)));
    }

    #[test]
    fn test_defaults_validate() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_each_unbounded_field() {
        let cases = [
            ("(convergence_rate: 0.0)", "convergence_rate"),
            ("(convergence_rate: -0.5)", "convergence_rate"),
            ("(convergence_rate: 1.5)", "convergence_rate"),
            ("(arrival_epsilon_sq: 0.0)", "arrival_epsilon_sq"),
            ("(height_unit: 0.0)", "height_unit"),
            ("(height_unit: -15.0)", "height_unit"),
            ("(delay_per_height_unit_ms: -1.0)", "delay_per_height_unit_ms"),
            ("(drop_duration_ms: -1.0)", "drop_duration_ms"),
            ("(voxel_size: 0.0)", "voxel_size"),
        ];
        for (text, expected_field) in cases {
            match EngineConfig::from_ron_str(text) {
                Err(CoreError::OutOfRange { field, .. }) => {
                    assert_eq!(field, expected_field, "wrong field for {text}")
                }
                other => panic!("{text} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let config = EngineConfig {
            convergence_rate: 0.0,
            height_unit: 0.0,
            ..EngineConfig::default()
        };
        let errors = config.validate().expect_err("invalid config");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_full_rate_is_accepted() {
        let config = EngineConfig::from_ron_str("(convergence_rate: 1.0, drop_duration_ms: 0.0)")
            .expect("parse");
        assert_eq!(config.convergence_rate, 1.0);
    }

    #[test]
    fn test_rest_height() {
        assert_eq!(EngineConfig::default().rest_height(), -11.5);
    }

    #[test]
    fn test_delay_for_height() {
        let config = EngineConfig::default();
        assert_eq!(config.delay_for_height(FLOOR_Y), 0.0);
        assert_eq!(config.delay_for_height(FLOOR_Y - 3.0), 0.0);
        assert!((config.delay_for_height(FLOOR_Y + 15.0) - 600.0).abs() < 1e-6);
        assert!((config.delay_for_height(FLOOR_Y + 7.5) - 300.0).abs() < 1e-6);
    }
}

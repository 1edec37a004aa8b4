use glam::{Mat4, Vec3};
use rubble_core::config::EngineConfig;
use rubble_core::math::ease_in_out_cubic;

/// Eye position and look-at point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn lerp(a: CameraPose, b: CameraPose, t: f32) -> CameraPose {
        CameraPose {
            eye: a.eye.lerp(b.eye, t),
            look_at: a.look_at.lerp(b.look_at, t),
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look_at, Vec3::Y)
    }
}

/// Camera driven by the engine: intro sweep, skydive, then orbit controls.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub pose: CameraPose,
    /// User orbit controls; switched on when the skydive lands.
    pub controls_enabled: bool,
    pub auto_rotate: bool,
    pub fov_y_rad: f32,
    pub aspect: f32,
}

impl CameraRig {
    /// Rig parked at the skydive start pose.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            pose: drop_start(config),
            controls_enabled: false,
            auto_rotate: false,
            fov_y_rad: 45f32.to_radians(),
            aspect: 16.0 / 9.0,
        }
    }

    /// Idle sweep around the origin on the title screen. Height is left alone.
    pub fn intro_sweep(&mut self, now_ms: f64, config: &EngineConfig) {
        let angle = (now_ms * config.intro_orbit_speed) as f32;
        self.pose.eye.x = angle.sin() * config.intro_orbit_radius;
        self.pose.eye.z = angle.cos() * config.intro_orbit_radius;
        self.pose.look_at = Vec3::ZERO;
    }

    /// Place the camera along the skydive. Returns true once the drop has landed.
    pub fn drop_to(&mut self, elapsed_ms: f64, config: &EngineConfig) -> bool {
        let landed = elapsed_ms >= config.drop_duration_ms;
        let t = if landed {
            1.0
        } else {
            (elapsed_ms / config.drop_duration_ms).clamp(0.0, 1.0)
        };
        self.pose = CameraPose::lerp(drop_start(config), drop_end(config), ease_in_out_cubic(t as f32));
        landed
    }

    /// Hand the camera to orbit controls with auto-rotate on.
    pub fn land(&mut self, config: &EngineConfig) {
        self.pose = drop_end(config);
        self.controls_enabled = true;
        self.auto_rotate = true;
    }

    /// Per-frame controls update: auto-rotate orbits the eye about the look-at point.
    pub fn update_controls(&mut self, config: &EngineConfig) {
        if !(self.controls_enabled && self.auto_rotate) {
            return;
        }
        // Clockwise seen from above, matching OrbitControls' auto-rotate.
        let step = std::f32::consts::TAU / 3600.0 * config.auto_rotate_speed;
        self.orbit(-step);
    }

    /// Rotate the eye about the vertical axis through the look-at point.
    pub fn orbit(&mut self, yaw: f32) {
        let offset = self.pose.eye - self.pose.look_at;
        let (sin, cos) = yaw.sin_cos();
        let rotated = Vec3::new(
            offset.x * cos + offset.z * sin,
            offset.y,
            -offset.x * sin + offset.z * cos,
        );
        self.pose.eye = self.pose.look_at + rotated;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y_rad, self.aspect, 0.1, 1000.0);
        proj * self.pose.view()
    }
}

fn drop_start(config: &EngineConfig) -> CameraPose {
    CameraPose {
        eye: config.drop_start_eye(),
        look_at: config.drop_start_look(),
    }
}

fn drop_end(config: &EngineConfig) -> CameraPose {
    CameraPose {
        eye: config.drop_end_eye(),
        look_at: config.drop_end_look(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_endpoints() {
        let config = EngineConfig::default();
        let mut rig = CameraRig::new(&config);
        assert!(!rig.drop_to(0.0, &config));
        assert_eq!(rig.pose.eye, config.drop_start_eye());

        assert!(!rig.drop_to(2000.0, &config));
        let mid = config.drop_start_eye().lerp(config.drop_end_eye(), 0.5);
        assert!(rig.pose.eye.distance(mid) < 1e-3);

        assert!(rig.drop_to(4000.0, &config));
        assert_eq!(rig.pose.eye, config.drop_end_eye());
        assert_eq!(rig.pose.look_at, config.drop_end_look());
        assert!(rig.drop_to(9000.0, &config));
    }

    #[test]
    fn test_drop_lands_only_at_full_duration() {
        let config = EngineConfig::default();
        let mut rig = CameraRig::new(&config);
        let just_short = config.drop_duration_ms - 1.4e-11;
        assert!(just_short < config.drop_duration_ms);
        assert!(!rig.drop_to(just_short, &config));
        assert!(rig.drop_to(config.drop_duration_ms, &config));
    }

    #[test]
    fn test_auto_rotate_decreases_azimuth() {
        let config = EngineConfig::default();
        let mut rig = CameraRig::new(&config);
        rig.land(&config);
        let azimuth = |pose: &CameraPose| {
            let offset = pose.eye - pose.look_at;
            offset.x.atan2(offset.z)
        };
        let before = azimuth(&rig.pose);
        rig.update_controls(&config);
        assert!(azimuth(&rig.pose) < before);
    }

    #[test]
    fn test_intro_sweep_radius() {
        let config = EngineConfig::default();
        let mut rig = CameraRig::new(&config);
        rig.intro_sweep(12_345.0, &config);
        let flat = Vec3::new(rig.pose.eye.x, 0.0, rig.pose.eye.z);
        assert!((flat.length() - config.intro_orbit_radius).abs() < 1e-3);
        assert_eq!(rig.pose.eye.y, config.drop_start_eye[1]);
    }

    #[test]
    fn test_auto_rotate_requires_controls() {
        let config = EngineConfig::default();
        let mut rig = CameraRig::new(&config);
        rig.auto_rotate = true;
        let before = rig.pose;
        rig.update_controls(&config);
        assert_eq!(rig.pose, before);

        rig.land(&config);
        let radius = (rig.pose.eye - rig.pose.look_at).length();
        rig.update_controls(&config);
        assert_ne!(rig.pose.eye, config.drop_end_eye());
        assert!(((rig.pose.eye - rig.pose.look_at).length() - radius).abs() < 1e-3);
    }

    #[test]
    fn test_viewport_ignores_zero() {
        let config = EngineConfig::default();
        let mut rig = CameraRig::new(&config);
        rig.set_viewport(800, 400);
        assert_eq!(rig.aspect, 2.0);
        rig.set_viewport(0, 400);
        assert_eq!(rig.aspect, 2.0);
    }
}

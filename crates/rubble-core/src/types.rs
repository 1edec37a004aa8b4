use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// RGB color with each channel normalized to 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Unpack a 0xRRGGBB integer. Bits above the low 24 are ignored.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Pack into 0xRRGGBB, clamping each channel and rounding to the nearest byte.
    pub fn to_hex(self) -> u32 {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (byte(self.r) << 16) | (byte(self.g) << 8) | byte(self.b)
    }

    /// Format as `#rrggbb`.
    pub fn to_hex_string(self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn parse_hex_str(s: &str) -> Result<Self, CoreError> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| CoreError::InvalidColor(s.to_string()))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// One desired occupied cell from a shape generator or an imported model.
///
/// `color` is a 0xRRGGBB integer, the form generators and JSON models carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetCell {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub color: u32,
}

impl TargetCell {
    pub const fn new(x: f32, y: f32, z: f32, color: u32) -> Self {
        Self { x, y, z, color }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::from_hex(self.color)
    }
}

/// Engine phase reported to the hosting application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Idle title screen; camera sweeps around the scene.
    Intro,
    /// Skydive camera animation toward the scene.
    Dropping,
    /// Structure at rest; orbit controls active.
    Stable,
    /// Voxels flying apart under gravity.
    Dismantling,
    /// Voxels converging onto a new shape.
    Rebuilding,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Intro => "INTRO",
            Phase::Dropping => "DROPPING",
            Phase::Stable => "STABLE",
            Phase::Dismantling => "DISMANTLING",
            Phase::Rebuilding => "REBUILDING",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_unpack() {
        let c = Rgb::from_hex(0xFF8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn test_hex_string_roundtrip() {
        for hex in [0x000000u32, 0xE87500, 0x154734, 0xFFFFFF, 0x22D3EE] {
            let s = Rgb::from_hex(hex).to_hex_string();
            assert_eq!(s.len(), 7);
            let back = Rgb::parse_hex_str(&s).expect("valid hex");
            assert_eq!(back.to_hex(), hex, "roundtrip failed for {s}");
        }
    }

    #[test]
    fn test_parse_hex_without_hash() {
        assert_eq!(Rgb::parse_hex_str("ffd700").expect("valid").to_hex(), 0xFFD700);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(Rgb::parse_hex_str("#12345").is_err());
        assert!(Rgb::parse_hex_str("#gggggg").is_err());
        assert!(Rgb::parse_hex_str("").is_err());
        assert!(Rgb::parse_hex_str("#+12345").is_err());
    }

    #[test]
    fn test_to_hex_clamps() {
        assert_eq!(Rgb::new(1.5, -0.2, 0.5).to_hex(), 0xFF0080);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::Rebuilding.to_string(), "REBUILDING");
        assert_eq!(Phase::Intro.as_str(), "INTRO");
    }
}

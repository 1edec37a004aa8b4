//! Named 0xRRGGBB colors shared by the shape generators.

pub const DARK: u32 = 0x4A3728;
pub const LIGHT: u32 = 0x654321;
pub const WHITE: u32 = 0xF0F0F0;
pub const GOLD: u32 = 0xFFD700;
pub const BLACK: u32 = 0x111111;
pub const WOOD: u32 = 0x3B2F2F;
pub const GREEN: u32 = 0x228B22;
pub const TALON: u32 = 0xE5C100;

// Campus
pub const ORANGE: u32 = 0xE87500;
pub const LAWN: u32 = 0x154734;
pub const CONCRETE: u32 = 0xD1D5DB;
pub const DARK_CONCRETE: u32 = 0x6B7280;
pub const WATER: u32 = 0x38BDF8;
pub const BRICK: u32 = 0xB94A18;
pub const GLASS: u32 = 0xA5F3FC;

/// Scene background (sky) color.
pub const BACKGROUND: u32 = 0x22D3EE;

/// Floor plane color.
pub const FLOOR: u32 = 0x1E293B;

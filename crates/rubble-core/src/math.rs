use crate::types::Rgb;

/// Per-channel luma weights used by the color matcher (green matters most, blue least).
pub const LUMA_WEIGHTS: [f32; 3] = [0.30, 0.59, 0.11];

/// Luma-weighted Euclidean distance between two colors in normalized RGB.
///
/// Each channel difference is scaled by its weight before squaring, so the
/// result lies in [0, ~0.67]. Zero only for identical colors.
pub fn color_distance(a: Rgb, b: Rgb) -> f32 {
    let r = (a.r - b.r) * LUMA_WEIGHTS[0];
    let g = (a.g - b.g) * LUMA_WEIGHTS[1];
    let b = (a.b - b.b) * LUMA_WEIGHTS[2];
    (r * r + g * g + b * b).sqrt()
}

/// Ease-in-out cubic: `4t³` for the first half, `1 - (-2t + 2)³ / 2` after.
/// Input is clamped to [0, 1].
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Convert RGB to (hue, saturation, lightness), all in [0, 1].
pub fn rgb_to_hsl(c: Rgb) -> (f32, f32, f32) {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let lightness = (min + max) / 2.0;

    if max == min {
        return (0.0, 0.0, lightness);
    }

    let delta = max - min;
    let saturation = if lightness <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let hue = if max == c.r {
        (c.g - c.b) / delta + if c.g < c.b { 6.0 } else { 0.0 }
    } else if max == c.g {
        (c.b - c.r) / delta + 2.0
    } else {
        (c.r - c.g) / delta + 4.0
    };

    (hue / 6.0, saturation, lightness)
}

/// Convert (hue, saturation, lightness) back to RGB. Hue wraps, the rest clamp.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Rgb::new(l, l, l);
    }

    let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let q = 2.0 * l - p;

    Rgb::new(
        hue_to_channel(q, p, h + 1.0 / 3.0),
        hue_to_channel(q, p, h),
        hue_to_channel(q, p, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * 6.0 * (2.0 / 3.0 - t);
    }
    p
}

/// Shift a color's HSL lightness by `delta`, keeping hue and saturation.
pub fn offset_lightness(c: Rgb, delta: f32) -> Rgb {
    let (h, s, l) = rgb_to_hsl(c);
    hsl_to_rgb(h, s, l + delta)
}

/// Round half toward positive infinity (`-2.5 -> -2`, `2.5 -> 3`).
///
/// Grid snapping uses this rather than `f32::round`, which rounds half away from zero.
pub fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}

/// Round to a fixed number of decimal places.
pub fn round_to_decimals(v: f32, decimals: i32) -> f32 {
    let scale = 10f32.powi(decimals);
    (v * scale).round() / scale
}

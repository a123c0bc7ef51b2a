//! Mapping accumulated linear radiance to displayable 8-bit values.

use orb_math::{Color, Interval};

/// Channel values are clamped to this range before scaling to bytes.
const INTENSITY: Interval = Interval::new(0.000, 0.999);

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a single linear channel to a byte in [0, 255].
#[inline]
pub fn channel_to_byte(linear: f64) -> u8 {
    (256.0 * INTENSITY.clamp(linear_to_gamma(linear))) as u8
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    [
        channel_to_byte(color.x),
        channel_to_byte(color.y),
        channel_to_byte(color.z),
    ]
}

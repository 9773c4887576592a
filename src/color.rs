//! Layer 2: Color Application
//!
//! Maps per-pixel damping onto the green-to-blue signal scale and merges the
//! result back into the floor plan's pixel colors.

use crate::attenuation::{AttenuationAlgorithm, Friis};
use crate::config::EngineConfig;
use crate::plan::FloorPlan;

/// Color shown where no usable signal reaches.
pub const OUT_OF_RANGE_COLOR: &str = "#0000ff";

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parse a `#rrggbb` color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color for the strongest signal at a pixel.
///
/// The damping is doubled for display: green fades and blue grows by two
/// steps per dB. Anything from 128 dB up renders as `OUT_OF_RANGE_COLOR`.
pub fn signal_color(strongest_db: f64) -> String {
    let scaled = strongest_db * 2.0;
    if !scaled.is_finite() || scaled >= 256.0 {
        return OUT_OF_RANGE_COLOR.to_string();
    }

    let level = scaled.max(0.0) as u8;
    Rgb::new(0, 0xff - level, level).to_hex()
}

/// Merge a damping grid into the original pixels.
///
/// Structural pixels (`None`) keep their input color.
pub fn apply_zone_colors(pixels: &[String], damping: &[Option<f64>]) -> Vec<String> {
    pixels
        .iter()
        .zip(damping)
        .map(|(pixel, db)| match db {
            Some(db) => signal_color(*db),
            None => pixel.clone(),
        })
        .collect()
}

/// Compute the signal heatmap of a floor plan.
///
/// Returns a new pixel sequence of the same length and order; the plan is
/// left untouched.
pub fn compute_zones(plan: &FloorPlan, config: EngineConfig) -> Vec<String> {
    let damping = Friis::new(config).calculate(plan);
    apply_zone_colors(&plan.pixels, &damping)
}

/// Converts a color grid to a formatted string for debugging
pub fn zone_grid_to_string(colors: &[String], width: usize) -> String {
    let mut result = String::new();

    for row in colors.chunks(width.max(1)) {
        result.push_str(&row.join(" "));
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        let color = Rgb::from_hex("#0a9fF0").unwrap();
        assert_eq!(color, Rgb::new(0x0a, 0x9f, 0xf0));
        assert_eq!(color.to_hex(), "#0a9ff0");

        assert_eq!(Rgb::from_hex("0a9ff0"), None);
        assert_eq!(Rgb::from_hex("#0a9ff"), None);
        assert_eq!(Rgb::from_hex("#+f+f+f"), None);
        assert_eq!(Rgb::from_hex("#zz9ff0"), None);
    }

    #[test]
    fn test_signal_color_scale() {
        assert_eq!(signal_color(0.0), "#00ff00");
        assert_eq!(signal_color(48.0), "#009f60");
        // single-digit channels are zero padded
        assert_eq!(signal_color(4.0), "#00f708");
        assert_eq!(signal_color(127.0), "#0001fe");
    }

    #[test]
    fn test_signal_color_saturates() {
        assert_eq!(signal_color(128.0), OUT_OF_RANGE_COLOR);
        assert_eq!(signal_color(500.0), OUT_OF_RANGE_COLOR);
        assert_eq!(signal_color(f64::INFINITY), OUT_OF_RANGE_COLOR);
        assert_eq!(signal_color(f64::NAN), OUT_OF_RANGE_COLOR);
    }

    #[test]
    fn test_apply_keeps_structural_pixels() {
        let pixels = vec!["#999999".to_string(), "#f0f0f0".to_string()];
        let colors = apply_zone_colors(&pixels, &[None, Some(0.0)]);
        assert_eq!(colors, vec!["#999999", "#00ff00"]);
    }

    #[test]
    fn test_zone_grid_to_string() {
        let colors = vec!["#000001".to_string(), "#000002".to_string(), "#000003".to_string()];
        assert_eq!(zone_grid_to_string(&colors, 2), "#000001 #000002\n#000003\n");
    }
}

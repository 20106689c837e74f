//! Dashboard color scheme.

use serde::{Serialize, Serializer};
use std::fmt;

/// 8-bit RGB color, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend towards `other`, `t` clamped to 0..=1.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub const PRIMARY: Rgb = Rgb::new(0x1E, 0x3A, 0x8A); // Deep blue
pub const SECONDARY: Rgb = Rgb::new(0x10, 0xB9, 0x81); // Teal
pub const ACCENT: Rgb = Rgb::new(0xF5, 0x9E, 0x0B); // Amber
pub const GRAY: Rgb = Rgb::new(0x6B, 0x72, 0x80);
pub const RED: Rgb = Rgb::new(0xEF, 0x44, 0x44);
pub const VIOLET: Rgb = Rgb::new(0x8B, 0x5C, 0xF6);
pub const PINK: Rgb = Rgb::new(0xEC, 0x48, 0x99);
pub const TEXT: Rgb = Rgb::new(0x1F, 0x29, 0x37);

/// Series colors, assigned in order.
pub const SERIES: [Rgb; 7] = [PRIMARY, SECONDARY, ACCENT, GRAY, RED, VIOLET, PINK];

/// Yellow-orange-red ramp for heatmaps.
const HEAT_STOPS: [Rgb; 9] = [
    Rgb::new(0xFF, 0xFF, 0xCC),
    Rgb::new(0xFF, 0xED, 0xA0),
    Rgb::new(0xFE, 0xD9, 0x76),
    Rgb::new(0xFE, 0xB2, 0x4C),
    Rgb::new(0xFD, 0x8D, 0x3C),
    Rgb::new(0xFC, 0x4E, 0x2A),
    Rgb::new(0xE3, 0x1A, 0x1C),
    Rgb::new(0xBD, 0x00, 0x26),
    Rgb::new(0x80, 0x00, 0x26),
];

/// First `n` series colors.
pub fn series_colors(n: usize) -> &'static [Rgb] {
    &SERIES[..n.min(SERIES.len())]
}

/// Heatmap color for `t` in 0..=1.
pub fn heat_color(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (HEAT_STOPS.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(HEAT_STOPS.len() - 1);
    HEAT_STOPS[lower].lerp(HEAT_STOPS[upper], scaled - lower as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting() {
        assert_eq!(PRIMARY.to_string(), "#1E3A8A");
        assert_eq!(serde_json::to_string(&ACCENT).unwrap(), "\"#F59E0B\"");
    }

    #[test]
    fn heat_ramp_endpoints() {
        assert_eq!(heat_color(0.0), HEAT_STOPS[0]);
        assert_eq!(heat_color(1.0), HEAT_STOPS[8]);
        assert_eq!(heat_color(-3.0), HEAT_STOPS[0]);
        assert_eq!(heat_color(f64::NAN), HEAT_STOPS[0]);
    }

    #[test]
    fn series_colors_are_capped() {
        assert_eq!(series_colors(3), &[PRIMARY, SECONDARY, ACCENT]);
        assert_eq!(series_colors(20).len(), 7);
    }
}

//! Diverging "coolwarm" color map.
//!
//! Control points are Moreland's cool-to-warm table (33 samples): blue at 0,
//! neutral gray at 0.5, red at 1. Colors between samples are linearly
//! interpolated in RGB.

/// 8-bit RGB color, independent of any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

const COOLWARM: [(u8, u8, u8); 33] = [
    (59, 76, 192),
    (68, 90, 204),
    (77, 104, 215),
    (87, 117, 225),
    (98, 130, 234),
    (108, 142, 241),
    (119, 154, 247),
    (130, 165, 251),
    (141, 176, 254),
    (152, 185, 255),
    (163, 194, 255),
    (174, 201, 253),
    (184, 208, 249),
    (194, 213, 244),
    (204, 217, 238),
    (213, 219, 230),
    (221, 221, 221),
    (229, 216, 209),
    (236, 211, 197),
    (241, 204, 185),
    (245, 196, 173),
    (247, 187, 160),
    (247, 177, 148),
    (247, 166, 135),
    (244, 154, 123),
    (241, 141, 111),
    (236, 127, 99),
    (229, 112, 88),
    (222, 96, 77),
    (213, 80, 66),
    (203, 62, 56),
    (192, 40, 47),
    (180, 4, 38),
];

/// Color for a normalized value `t` in `[0, 1]` (clamped).
pub fn coolwarm(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let last = (COOLWARM.len() - 1) as f64;
    let pos = t * last;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(COOLWARM.len() - 1);
    let frac = pos - lo as f64;

    let (r0, g0, b0) = COOLWARM[lo];
    let (r1, g1, b1) = COOLWARM[hi];
    Rgb::new(lerp(r0, r1, frac), lerp(g0, g1, frac), lerp(b0, b1, frac))
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

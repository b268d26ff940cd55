//! Shared chart dimensions, colors and axis helpers

use std::ops::Range;

use plotters::style::RGBColor;

/// Pixel size of every chart
pub const CHART_SIZE: (u32, u32) = (800, 600);

pub const FONT: &str = "sans-serif";
pub const CAPTION_SIZE: u32 = 22;

pub const POINT_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Cluster colors, cycled by label
pub const CLUSTER_COLORS: [RGBColor; 3] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
];

pub fn cluster_color(label: usize) -> RGBColor {
    CLUSTER_COLORS[label % CLUSTER_COLORS.len()]
}

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Diverging blue-white-red scale over [-1, 1]; undefined values are gray
pub fn coolwarm(value: f64) -> RGBColor {
    if !value.is_finite() {
        return RGBColor(240, 240, 240);
    }
    let v = value.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 { (COOL, NEUTRAL, v + 1.0) } else { (NEUTRAL, WARM, v) };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Padded axis range covering every finite value
///
/// Constant data gets a unit-width range so the axis never collapses.
pub fn axis_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min > max {
        return 0.0..1.0;
    }
    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { (min.abs() * 0.1).max(0.5) };
    (min - pad)..(max + pad)
}

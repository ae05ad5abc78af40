//! Qualitative colour palette for cluster labels
//!
//! Colours are evenly spaced hues in HSL space at fixed lightness and
//! saturation, offset slightly from pure red, so any number of clusters gets
//! visually distinct colours.

use plotters::style::{Color, HSLColor, RGBColor};

/// Hue of the first colour
const FIRST_HUE: f64 = 0.01;
const LIGHTNESS: f64 = 0.6;
const SATURATION: f64 = 0.65;

/// Build a palette with exactly `k` colours
pub fn hls_palette(k: usize) -> Vec<RGBColor> {
    (0..k)
        .map(|i| {
            let hue = (i as f64 / k as f64 + FIRST_HUE).fract();
            let (r, g, b) = HSLColor(hue, SATURATION, LIGHTNESS).to_backend_color().rgb;
            RGBColor(r, g, b)
        })
        .collect()
}

// SPDX-License-Identifier: PMPL-1.0-or-later
//! Colorimetric contrast measures.
//!
//! Two independent measures are computed from a pair of sRGB hex colors:
//! - WCAG 2.x contrast ratio: symmetric, range 1.0 to 21.0
//! - Perceptual contrast (Lc): polarity-aware, signed, roughly -108 to 106

/// An sRGB color as 8-bit channels
pub type Rgb = (u8, u8, u8);

const WCAG_COEFFS: [f64; 3] = [0.2126, 0.7152, 0.0722];
const APCA_COEFFS: [f64; 3] = [0.2126729, 0.7151522, 0.0721750];

const BLACK_THRESHOLD: f64 = 0.022;
const BLACK_CLAMP_EXP: f64 = 1.414;
const SCALE: f64 = 1.14 * 100.0;
const LOW_CLIP: f64 = 8.0;
const OFFSET: f64 = 7.0;

/// Parse a CSS hex color (#rgb, #rrggbb) into (r, g, b) components
pub fn parse_hex_color(hex: &str) -> Result<Rgb, String> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if let Some(bad) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(format!("non-hex character '{}'", bad));
    }
    match hex.len() {
        3 => Ok((
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        6 => Ok((
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        n => Err(format!("expected 3 or 6 hex digits, found {}", n)),
    }
}

fn channel(digits: &str) -> Result<u8, String> {
    u8::from_str_radix(digits, 16).map_err(|e| e.to_string())
}

/// Convert an 8-bit sRGB channel to linear light
pub fn linearize(channel: u8) -> f64 {
    let v = channel as f64 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn weighted_luminance(rgb: Rgb, coeffs: [f64; 3]) -> f64 {
    let (r, g, b) = rgb;
    coeffs[0] * linearize(r) + coeffs[1] * linearize(g) + coeffs[2] * linearize(b)
}

/// Calculate relative luminance per WCAG 2.x
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn relative_luminance(rgb: Rgb) -> f64 {
    weighted_luminance(rgb, WCAG_COEFFS)
}

/// Calculate contrast ratio between two colors
/// Returns a ratio >= 1.0 (e.g., 4.5, 7.0, 21.0), independent of argument order
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let l1 = relative_luminance(a);
    let l2 = relative_luminance(b);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    round2((lighter + 0.05) / (darker + 0.05))
}

/// Screen luminance with the soft clamp near black applied
fn clamped_y(rgb: Rgb) -> f64 {
    let y = weighted_luminance(rgb, APCA_COEFFS);
    if y < BLACK_THRESHOLD {
        y + (BLACK_THRESHOLD - y).powf(BLACK_CLAMP_EXP)
    } else {
        y
    }
}

/// Polarity-aware perceptual contrast of `text` drawn on `bg`.
///
/// Positive for dark text on a light background, negative for light text on
/// a dark background. Swapping roles changes the magnitude as well as the
/// sign because each polarity uses its own exponents.
pub fn perceptual_contrast(text: Rgb, bg: Rgb) -> f64 {
    let y_txt = clamped_y(text);
    let y_bg = clamped_y(bg);

    let lc = if y_bg > y_txt {
        (y_bg.powf(0.56) - y_txt.powf(0.57)) * SCALE
    } else {
        (y_bg.powf(0.65) - y_txt.powf(0.62)) * SCALE
    };

    if lc.abs() < LOW_CLIP {
        return 0.0;
    }
    let lc = if lc > 0.0 { lc - OFFSET } else { lc + OFFSET };
    round2(lc)
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Grid Builder: grayscale intensities to a boolean walkability mask.
//!
//! A cell is walkable when its intensity is strictly above the threshold, or
//! strictly below it when the polarity is inverted. The threshold is either a
//! fixed value or the 60th percentile of the image's own histogram.

use crate::grid::Grid;

/// Percentile used when the threshold is derived from the image.
pub const AUTO_PERCENTILE: f64 = 60.0;

/// Threshold used when no other is configured.
pub const DEFAULT_THRESHOLD: i32 = 180;

/// How intensities are turned into walkable cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MaskConfig {
    /// Dark cells are walkable instead of bright ones.
    pub invert: bool,
    /// Use the [`AUTO_PERCENTILE`] of the samples instead of `threshold`.
    pub auto_threshold: bool,
    /// Fixed threshold, clamped to `[0, 255]` when applied.
    pub threshold: i32,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            invert: false,
            auto_threshold: true,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl MaskConfig {
    /// Histogram-derived threshold.
    pub fn auto(invert: bool) -> Self {
        Self {
            invert,
            auto_threshold: true,
            ..Self::default()
        }
    }

    /// Fixed threshold.
    pub fn fixed(threshold: i32, invert: bool) -> Self {
        Self {
            invert,
            auto_threshold: false,
            threshold,
        }
    }

    /// The same configuration with the polarity flipped.
    pub fn inverted(self) -> Self {
        Self {
            invert: !self.invert,
            ..self
        }
    }
}

/// The effective threshold `build_mask` would use for `gray`.
pub fn threshold(gray: &Grid<u8>, cfg: &MaskConfig) -> u8 {
    if cfg.auto_threshold {
        // Truncation toward zero; the percentile of u8 samples is in [0, 255].
        percentile(gray.cells(), AUTO_PERCENTILE).map_or(0, |v| v as u8)
    } else {
        cfg.threshold.clamp(0, 255) as u8
    }
}

/// Build the walkability mask for `gray`.
pub fn build_mask(gray: &Grid<u8>, cfg: &MaskConfig) -> Grid<bool> {
    let t = threshold(gray, cfg);
    log::debug!(
        "building {}x{} mask: threshold {} ({}), invert {}",
        gray.height(),
        gray.width(),
        t,
        if cfg.auto_threshold { "auto" } else { "fixed" },
        cfg.invert
    );
    if cfg.invert {
        gray.map(|&v| v < t)
    } else {
        gray.map(|&v| v > t)
    }
}

/// The `p`-th percentile (0–100) of `samples`, linearly interpolated between
/// the two nearest order statistics at rank `p / 100 * (n - 1)`.
///
/// Interpolation runs from the nearer order statistic (`a + (b - a) * t` below
/// the midpoint, `b - (b - a) * (1 - t)` from it on), so results round the
/// same way as numpy's `percentile`.
///
/// Returns `None` for an empty slice. `p` is clamped to `[0, 100]`.
pub fn percentile(samples: &[u8], p: f64) -> Option<f64> {
    let n = samples.len();
    if n == 0 {
        return None;
    }
    let mut hist = [0usize; 256];
    for &s in samples {
        hist[s as usize] += 1;
    }

    let rank = p.clamp(0.0, 100.0) / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f64;

    let a = nth_smallest(&hist, lo) as f64;
    if frac == 0.0 {
        return Some(a);
    }
    let b = nth_smallest(&hist, hi) as f64;
    Some(lerp(a, b, frac))
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t >= 0.5 {
        b - (b - a) * (1.0 - t)
    } else {
        a + (b - a) * t
    }
}

/// The `k`-th (0-based) smallest sample described by a 256-bin histogram.
fn nth_smallest(hist: &[usize; 256], k: usize) -> u8 {
    let mut seen = 0;
    for (value, &count) in hist.iter().enumerate() {
        seen += count;
        if seen > k {
            return value as u8;
        }
    }
    u8::MAX
}

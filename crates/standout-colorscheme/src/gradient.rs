//! Gradients: colors addressed by a 0–100 level.
//!
//! Two kinds exist:
//!
//! - [`Gradient`] holds a fixed list of stops, evenly spaced from 0% to 100%.
//!   A level snaps to the nearest stop. Palette indices and RGB values are
//!   stored side by side, so the true-color ramp can be tuned independently
//!   of the 256-color one.
//! - [`InterpolatedGradient`] holds `(position, color)` stops and blends
//!   continuously between them with [`srgb_lerp`]. Only RGB is stored; the
//!   palette index for a level is derived with a nearest-color search.
//!
//! # Levels
//!
//! Levels outside `0.0..=100.0` are clamped to the range and `NaN` is treated
//! as `0.0`, so every level maps to a color.

use tracing::trace;

use crate::colorspace::{cterm_to_srgb, srgb_lerp, Rgb};
use crate::error::ConfigError;

/// Clamps a gradient level into `0.0..=100.0`.
pub fn clamp_level(level: f64) -> f64 {
    if level.is_nan() {
        trace!("NaN gradient level treated as 0");
        return 0.0;
    }
    if !(0.0..=100.0).contains(&level) {
        trace!(level, "gradient level clamped to 0..=100");
    }
    level.clamp(0.0, 100.0)
}

/// Picks the stop of an evenly spaced list that `level` falls on.
///
/// The index is `round(level * (len - 1) / 100)`, with `level` clamped first.
/// Halves round to the even index, so level 50 on a two-stop list picks the
/// first stop.
///
/// # Panics
///
/// Panics if `values` is empty. [`Gradient`] never holds empty lists.
pub fn pick_gradient_value<T: Copy>(values: &[T], level: f64) -> T {
    let last = values.len() - 1;
    let index = (clamp_level(level) * last as f64 / 100.0).round_ties_even() as usize;
    values[index.min(last)]
}

/// Blends the two stops surrounding `level`.
///
/// `stops` must satisfy the [`InterpolatedGradient`] invariants; use
/// [`InterpolatedGradient::pick`] to get them checked.
pub fn pick_interpolated_gradient(stops: &[(f64, Rgb)], level: f64) -> Rgb {
    let position = clamp_level(level) / 100.0;

    let segment = stops
        .windows(2)
        .find(|pair| position <= pair[1].0)
        .or_else(|| stops.windows(2).last());

    match segment {
        Some(&[(start_pos, start), (end_pos, end)]) => {
            let x = (position - start_pos) / (end_pos - start_pos);
            srgb_lerp(start, end, x)
        }
        _ => stops.first().map(|&(_, color)| color).unwrap_or_default(),
    }
}

// ─── Discrete gradients ─────────────────────────────────────────────────────

/// A discrete gradient: parallel palette and RGB stop lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    cterm: Vec<u8>,
    rgb: Vec<Rgb>,
}

impl Gradient {
    /// Builds a gradient with independently tuned palette and RGB stops.
    ///
    /// Both lists must be non-empty and the same length.
    pub fn new(name: &str, cterm: Vec<u8>, rgb: Vec<Rgb>) -> Result<Self, ConfigError> {
        if cterm.is_empty() || rgb.is_empty() {
            return Err(ConfigError::InvalidGradient {
                gradient: name.to_string(),
                message: "gradient must have at least one stop".to_string(),
            });
        }
        if cterm.len() != rgb.len() {
            return Err(ConfigError::InvalidGradient {
                gradient: name.to_string(),
                message: format!(
                    "palette list has {} stops but color list has {}",
                    cterm.len(),
                    rgb.len()
                ),
            });
        }
        Ok(Self { cterm, rgb })
    }

    /// Builds a gradient from palette indices alone; RGB stops come from the palette table.
    pub fn from_cterm(name: &str, cterm: Vec<u8>) -> Result<Self, ConfigError> {
        let rgb = cterm.iter().map(|&index| cterm_to_srgb(index)).collect();
        Self::new(name, cterm, rgb)
    }

    /// Palette stops.
    pub fn cterm(&self) -> &[u8] {
        &self.cterm
    }

    /// RGB stops.
    pub fn rgb(&self) -> &[Rgb] {
        &self.rgb
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.cterm.len()
    }

    /// Returns true if the gradient has no stops.
    pub fn is_empty(&self) -> bool {
        self.cterm.is_empty()
    }

    /// Picks the palette index and RGB value for `level`.
    pub fn pick(&self, level: f64) -> (u8, Rgb) {
        (
            pick_gradient_value(&self.cterm, level),
            pick_gradient_value(&self.rgb, level),
        )
    }
}

// ─── Interpolated gradients ─────────────────────────────────────────────────

/// A continuous gradient defined by `(position, color)` stops.
///
/// Invariants, checked by [`new`](Self::new): the first position is `0.0`,
/// the last is `1.0`, and positions strictly increase.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedGradient {
    stops: Vec<(f64, Rgb)>,
}

impl InterpolatedGradient {
    /// Validates and stores the stops.
    pub fn new(name: &str, stops: Vec<(f64, Rgb)>) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidStops {
            gradient: name.to_string(),
            message,
        };

        match (stops.first(), stops.last()) {
            (Some(&(first, _)), Some(&(last, _))) => {
                if first != 0.0 {
                    return Err(invalid(format!("first stop must be at 0.0, got {}", first)));
                }
                if last != 1.0 {
                    return Err(invalid(format!("last stop must be at 1.0, got {}", last)));
                }
            }
            _ => return Err(invalid("gradient has no stops".to_string())),
        }

        if let Some(&(position, _)) = stops.iter().find(|(position, _)| !position.is_finite()) {
            return Err(invalid(format!(
                "stop positions must be finite, got {}",
                position
            )));
        }

        if let Some(pair) = stops.windows(2).find(|pair| pair[1].0 <= pair[0].0) {
            return Err(invalid(format!(
                "stop positions must strictly increase, got {} after {}",
                pair[1].0, pair[0].0
            )));
        }

        Ok(Self { stops })
    }

    /// The validated stops.
    pub fn stops(&self) -> &[(f64, Rgb)] {
        &self.stops
    }

    /// RGB value at `level`.
    pub fn pick(&self, level: f64) -> Rgb {
        pick_interpolated_gradient(&self.stops, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_stop() -> InterpolatedGradient {
        InterpolatedGradient::new(
            "ramp",
            vec![(0.0, Rgb(0, 0, 0)), (1.0, Rgb(0xff, 0xff, 0xff))],
        )
        .unwrap()
    }

    fn three_stop() -> InterpolatedGradient {
        InterpolatedGradient::new(
            "traffic",
            vec![
                (0.0, Rgb(0, 0xff, 0)),
                (0.5, Rgb(0xff, 0xff, 0)),
                (1.0, Rgb(0xff, 0, 0)),
            ],
        )
        .unwrap()
    }

    // =========================================================================
    // Level clamping
    // =========================================================================

    #[test]
    fn test_clamp_level() {
        assert_eq!(clamp_level(42.0), 42.0);
        assert_eq!(clamp_level(-5.0), 0.0);
        assert_eq!(clamp_level(250.0), 100.0);
        assert_eq!(clamp_level(f64::NAN), 0.0);
    }

    // =========================================================================
    // pick_gradient_value
    // =========================================================================

    #[test]
    fn test_pick_value_bounds() {
        let values = [10, 20, 30, 40, 50];
        assert_eq!(pick_gradient_value(&values, 0.0), 10);
        assert_eq!(pick_gradient_value(&values, 100.0), 50);
    }

    #[test]
    fn test_pick_value_rounds_to_nearest_stop() {
        let values = [10, 20, 30, 40, 50];
        // 4 * 0.6 = 2.4 -> 2, 4 * 0.65 = 2.6 -> 3
        assert_eq!(pick_gradient_value(&values, 60.0), 30);
        assert_eq!(pick_gradient_value(&values, 65.0), 40);
    }

    #[test]
    fn test_pick_value_halves_round_to_even() {
        assert_eq!(pick_gradient_value(&[10, 20], 50.0), 10);
        // 4 * 0.375 = 1.5 -> 2, 4 * 0.625 = 2.5 -> 2
        let values = [10, 20, 30, 40, 50];
        assert_eq!(pick_gradient_value(&values, 37.5), 30);
        assert_eq!(pick_gradient_value(&values, 62.5), 30);
    }

    #[test]
    fn test_pick_value_single_stop() {
        assert_eq!(pick_gradient_value(&[7], 0.0), 7);
        assert_eq!(pick_gradient_value(&[7], 100.0), 7);
    }

    #[test]
    fn test_pick_value_out_of_range_is_clamped() {
        let values = [1, 2, 3];
        assert_eq!(pick_gradient_value(&values, -40.0), 1);
        assert_eq!(pick_gradient_value(&values, 400.0), 3);
    }

    // =========================================================================
    // Gradient
    // =========================================================================

    #[test]
    fn test_gradient_two_list_form() {
        let gradient = Gradient::new(
            "g",
            vec![1, 2],
            vec![Rgb::from_u32(0x111111), Rgb::from_u32(0x222222)],
        )
        .unwrap();
        assert_eq!(gradient.len(), 2);
        assert!(!gradient.is_empty());
        assert_eq!(gradient.pick(0.0), (1, Rgb::from_u32(0x111111)));
        assert_eq!(gradient.pick(100.0), (2, Rgb::from_u32(0x222222)));
    }

    #[test]
    fn test_gradient_from_cterm_derives_rgb() {
        let gradient = Gradient::from_cterm("g", vec![1, 4]).unwrap();
        assert_eq!(gradient.rgb(), &[Rgb(0xc0, 0, 0), Rgb(0, 0, 0xc0)]);
        assert_eq!(gradient.pick(100.0), (4, Rgb(0, 0, 0xc0)));
    }

    #[test]
    fn test_gradient_rejects_mismatched_lengths() {
        let err = Gradient::new("g", vec![1, 2, 3], vec![Rgb(0, 0, 0)]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGradient { .. }));
        assert!(err.to_string().contains("g"));
    }

    #[test]
    fn test_gradient_rejects_empty() {
        assert!(Gradient::from_cterm("g", vec![]).is_err());
    }

    // =========================================================================
    // InterpolatedGradient validation
    // =========================================================================

    #[test]
    fn test_stops_must_start_at_zero() {
        let err = InterpolatedGradient::new(
            "bad",
            vec![(0.1, Rgb(0, 0, 0)), (1.0, Rgb(0xff, 0xff, 0xff))],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStops { .. }));
    }

    #[test]
    fn test_stops_must_end_at_one() {
        assert!(InterpolatedGradient::new(
            "bad",
            vec![(0.0, Rgb(0, 0, 0)), (0.9, Rgb(0xff, 0xff, 0xff))],
        )
        .is_err());
    }

    #[test]
    fn test_stops_reject_nan_position() {
        let err = InterpolatedGradient::new(
            "bad",
            vec![
                (0.0, Rgb(0, 0, 0)),
                (f64::NAN, Rgb(0x80, 0x80, 0x80)),
                (1.0, Rgb(0xff, 0xff, 0xff)),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStops { .. }));
        assert!(err.to_string().contains("finite"));
    }

    #[test]
    fn test_stops_reject_infinite_position() {
        assert!(InterpolatedGradient::new(
            "bad",
            vec![
                (0.0, Rgb(0, 0, 0)),
                (f64::INFINITY, Rgb(1, 1, 1)),
                (1.0, Rgb(2, 2, 2)),
            ],
        )
        .is_err());
    }

    #[test]
    fn test_stops_must_increase() {
        assert!(InterpolatedGradient::new(
            "bad",
            vec![
                (0.0, Rgb(0, 0, 0)),
                (0.6, Rgb(1, 1, 1)),
                (0.6, Rgb(2, 2, 2)),
                (1.0, Rgb(3, 3, 3)),
            ],
        )
        .is_err());
    }

    #[test]
    fn test_stops_must_not_be_empty() {
        assert!(InterpolatedGradient::new("bad", vec![]).is_err());
        assert!(InterpolatedGradient::new("bad", vec![(0.0, Rgb(0, 0, 0))]).is_err());
    }

    // =========================================================================
    // pick_interpolated_gradient
    // =========================================================================

    #[test]
    fn test_interpolated_endpoints() {
        let gradient = three_stop();
        assert_eq!(gradient.pick(0.0), Rgb(0, 0xff, 0));
        assert_eq!(gradient.pick(100.0), Rgb(0xff, 0, 0));
    }

    #[test]
    fn test_interpolated_hits_middle_stop() {
        assert_eq!(three_stop().pick(50.0), Rgb(0xff, 0xff, 0));
    }

    #[test]
    fn test_interpolated_uses_enclosing_segment() {
        // 75% lies between yellow and red: red stays full, green drops.
        let Rgb(r, g, b) = three_stop().pick(75.0);
        assert_eq!(r, 0xff);
        assert!(g > 0 && g < 0xff);
        assert_eq!(b, 0);
    }

    #[test]
    fn test_interpolated_midpoint() {
        assert_eq!(two_stop().pick(50.0), Rgb(186, 186, 186));
    }

    #[test]
    fn test_interpolated_out_of_range_is_clamped() {
        assert_eq!(two_stop().pick(-10.0), Rgb(0, 0, 0));
        assert_eq!(two_stop().pick(110.0), Rgb(0xff, 0xff, 0xff));
    }
}

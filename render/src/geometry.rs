//! Pie layout maths
//!
//! Angles are degrees, counter-clockwise from the positive x axis, with y
//! pointing up. Wedges are laid out the way a pie chart primitive does it:
//! weights are normalised to fractions of a turn and consumed from a start
//! angle in the chosen winding direction.

use aarshjul_core::{Error, Result};

/// Angular extent of one wedge, `theta1 <= theta2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeSpan {
    pub theta1: f64,
    pub theta2: f64,
}

impl WedgeSpan {
    /// Angle halfway through the wedge
    #[inline]
    pub fn mid(&self) -> f64 {
        (self.theta1 + self.theta2) / 2.0
    }

    #[inline]
    pub fn sweep(&self) -> f64 {
        self.theta2 - self.theta1
    }

    pub fn is_full_turn(&self) -> bool {
        self.sweep() >= 360.0 - 1e-9
    }
}

/// Fold any angle into `[0, 360)`
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let folded = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if folded >= 360.0 { 0.0 } else { folded }
}

/// Lay out wedges for `weights` starting at `start_angle`.
///
/// Weights must be finite and non-negative with a positive total; an empty
/// slice yields no wedges.
pub fn pie_spans(weights: &[f64], start_angle: f64, counterclock: bool) -> Result<Vec<WedgeSpan>> {
    if weights.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(Error::RenderFailure(format!(
            "wedge sizes must be non-negative numbers, got {bad}"
        )));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(Error::RenderFailure(
            "wedge sizes sum to zero".to_string(),
        ));
    }

    // Work in turns, like the fractions themselves
    let mut theta1 = start_angle / 360.0;
    Ok(weights
        .iter()
        .map(|weight| {
            let frac = weight / total;
            let theta2 = if counterclock {
                theta1 + frac
            } else {
                theta1 - frac
            };
            let span = WedgeSpan {
                theta1: 360.0 * theta1.min(theta2),
                theta2: 360.0 * theta1.max(theta2),
            };
            theta1 = theta2;
            span
        })
        .collect())
}

/// Point at `distance` (fraction of `radius`) along the wedge's mid-angle
pub fn label_anchor(span: &WedgeSpan, radius: f64, distance: f64) -> (f64, f64) {
    let mid = span.mid().to_radians();
    (
        distance * radius * mid.cos(),
        distance * radius * mid.sin(),
    )
}

/// Rotation that makes a label follow the wedge's radial direction while
/// staying readable: labels on the left half are flipped by 180 degrees.
pub fn tangent_rotation(span: &WedgeSpan, anchor_x: f64) -> f64 {
    let flip = if anchor_x > 0.0 { 0.0 } else { 180.0 };
    normalize_degrees(span.mid() + flip)
}

/// Upright rotation for calendar labels: mean wedge angle plus 270 degrees
pub fn calendar_rotation(span: &WedgeSpan) -> f64 {
    normalize_degrees((span.theta1 + span.theta2) / 2.0 + 270.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_clockwise_from_top() {
        let spans = pie_spans(&[1.0, 1.0, 2.0], 90.0, false).unwrap();
        assert_eq!(spans.len(), 3);
        // first wedge ends at 12 o'clock and runs clockwise to 3 o'clock
        assert!(approx(spans[0].theta1, 0.0) && approx(spans[0].theta2, 90.0));
        assert!(approx(spans[1].theta1, -90.0) && approx(spans[1].theta2, 0.0));
        assert!(approx(spans[2].theta1, -270.0) && approx(spans[2].theta2, -90.0));
    }

    #[test]
    fn test_counterclockwise_single_wedge() {
        let spans = pie_spans(&[1.0], 0.0, true).unwrap();
        assert!(approx(spans[0].theta1, 0.0) && approx(spans[0].theta2, 360.0));
        assert!(spans[0].is_full_turn());
    }

    #[test]
    fn test_weights_are_normalised() {
        let a = pie_spans(&[5.0, 2.0], 90.0, false).unwrap();
        let b = pie_spans(&[50.0, 20.0], 90.0, false).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert!(approx(x.theta1, y.theta1) && approx(x.theta2, y.theta2));
        }
        let total: f64 = a.iter().map(WedgeSpan::sweep).sum();
        assert!(approx(total, 360.0));
    }

    #[test]
    fn test_invalid_weights() {
        assert!(pie_spans(&[1.0, -1.0], 90.0, false).is_err());
        assert!(pie_spans(&[0.0, 0.0], 90.0, false).is_err());
        assert!(pie_spans(&[f64::NAN], 90.0, false).is_err());
        assert!(pie_spans(&[], 90.0, false).unwrap().is_empty());
    }

    #[test]
    fn test_tangent_rotation_flips_left_half() {
        let right = WedgeSpan { theta1: 0.0, theta2: 60.0 };
        let (x, _) = label_anchor(&right, 1.0, 0.8);
        assert!(approx(tangent_rotation(&right, x), 30.0));

        let left = WedgeSpan { theta1: 150.0, theta2: 170.0 };
        let (x, _) = label_anchor(&left, 1.0, 0.8);
        assert!(approx(tangent_rotation(&left, x), 340.0));

        let negative = WedgeSpan { theta1: -60.0, theta2: -30.0 };
        let (x, _) = label_anchor(&negative, 1.0, 0.8);
        assert!(approx(tangent_rotation(&negative, x), 315.0));
    }

    #[test]
    fn test_calendar_rotation() {
        let span = WedgeSpan { theta1: 60.0, theta2: 90.0 };
        assert!(approx(calendar_rotation(&span), 345.0));

        let span = WedgeSpan { theta1: -270.0, theta2: -240.0 };
        assert!(approx(calendar_rotation(&span), 15.0));
    }

    #[test]
    fn test_label_anchor() {
        let span = WedgeSpan { theta1: 80.0, theta2: 100.0 };
        let (x, y) = label_anchor(&span, 2.0, 0.5);
        assert!(x.abs() < 1e-9);
        assert!(approx(y, 1.0));
    }

    #[test]
    fn test_normalize_degrees() {
        assert!(approx(normalize_degrees(-90.0), 270.0));
        assert!(approx(normalize_degrees(720.0), 0.0));
        assert!(approx(normalize_degrees(359.5), 359.5));
    }
}

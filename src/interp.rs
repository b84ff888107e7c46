//! Deterministic keyframe interpolation.
//!
//! [`evaluate`] is a total, pure function: identical `(track, property, frame,
//! fallback)` always yields the identical value, at any call order, so scrubbing
//! and reverse playback cannot drift. Malformed keyframe values never propagate;
//! they are coerced to a usable value (with a warning) so one corrupt track cannot
//! block evaluation of other properties or elements.

use crate::{
    color,
    core::FrameIndex,
    model::{KeyValue, Keyframe, prop},
    track::Track,
};

/// Smallest scale produced mid-transition. A linear blend that would reach zero
/// or go negative is floored here so elements never invert or vanish degenerately
/// while a scale transition is in flight.
pub const MIN_SCALE: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Semantics {
    Numeric,
    Scale,
    Color,
}

impl Semantics {
    fn of(property: &str) -> Self {
        match property {
            prop::COLOR => Self::Color,
            prop::SCALE => Self::Scale,
            _ => Self::Numeric,
        }
    }
}

/// Evaluate a property track at `frame`.
///
/// - empty track -> `fallback` (the property's static default)
/// - single keyframe -> its value at every frame (no extrapolation past one anchor)
/// - otherwise: flat hold before the first and after the last keyframe, linear
///   blend between the two keyframes bracketing `frame`
///
/// Blending semantics depend on the property: `color` interpolates per RGB
/// channel over hex strings, `scale` is numeric with a [`MIN_SCALE`] floor, and
/// everything else is plain linear over lenient numeric coercion.
pub fn evaluate(
    track: &Track<'_>,
    property: &str,
    frame: FrameIndex,
    fallback: &KeyValue,
) -> KeyValue {
    let keys = track.keys();
    if keys.is_empty() {
        return fallback.clone();
    }
    if keys.len() == 1 {
        return keys[0].value.clone();
    }

    let idx = keys.partition_point(|k| k.frame.0 <= frame.0);
    if idx == 0 {
        return keys[0].value.clone();
    }
    if idx >= keys.len() {
        return keys[keys.len() - 1].value.clone();
    }

    let before = keys[idx - 1];
    let after = keys[idx];
    let denom = after.frame.0 - before.frame.0;
    if denom <= 0 {
        // Duplicate frames violate the track invariant; hold the earlier key
        // instead of dividing by zero.
        tracing::warn!(
            property,
            frame = before.frame.0,
            "degenerate keyframe interval, holding earlier value"
        );
        return before.value.clone();
    }

    let progress = (((frame.0 - before.frame.0) as f64) / (denom as f64)).clamp(0.0, 1.0);

    match Semantics::of(property) {
        Semantics::Color => KeyValue::Text(color::blend_hex(
            before.value.as_text(),
            after.value.as_text(),
            progress,
        )),
        Semantics::Scale => {
            let a = keyframe_number(before, property);
            let b = keyframe_number(after, property);
            let blended = a + (b - a) * progress;
            KeyValue::Number(if blended <= 0.0 { MIN_SCALE } else { blended })
        }
        Semantics::Numeric => {
            let a = keyframe_number(before, property);
            let b = keyframe_number(after, property);
            KeyValue::Number(a + (b - a) * progress)
        }
    }
}

/// Lenient numeric read of a keyframe, warning when coercion lost information.
fn keyframe_number(kf: &Keyframe, property: &str) -> f64 {
    match &kf.value {
        KeyValue::Number(n) if n.is_finite() => *n,
        KeyValue::Number(_) => {
            tracing::warn!(
                property,
                frame = kf.frame.0,
                "non-finite keyframe value, using 0"
            );
            0.0
        }
        KeyValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => {
                tracing::warn!(
                    property,
                    frame = kf.frame.0,
                    raw = %s,
                    "non-numeric keyframe value, using 0"
                );
                0.0
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kf(property: &str, frame: i64, value: impl Into<KeyValue>) -> Keyframe {
        Keyframe {
            property: property.to_string(),
            frame: FrameIndex(frame),
            value: value.into(),
        }
    }

    fn eval_nums(keys: &[Keyframe], property: &str, frame: i64, fallback: f64) -> KeyValue {
        let track = Track::for_property(keys, property);
        evaluate(&track, property, FrameIndex(frame), &KeyValue::Number(fallback))
    }

    #[test]
    fn empty_track_returns_fallback() {
        assert_eq!(eval_nums(&[], prop::OPACITY, 42, 1.0), KeyValue::Number(1.0));
    }

    #[test]
    fn every_known_property_falls_back_when_unanimated() {
        for property in prop::ALL {
            assert_eq!(
                eval_nums(&[], property, 0, 5.0),
                KeyValue::Number(5.0),
                "property {property}"
            );
        }
    }

    #[test]
    fn single_keyframe_is_constant_everywhere() {
        let keys = vec![kf(prop::OPACITY, 30, 0.5)];
        for frame in [-100, 0, 30, 1000] {
            assert_eq!(
                eval_nums(&keys, prop::OPACITY, frame, 1.0),
                KeyValue::Number(0.5)
            );
        }
    }

    #[test]
    fn linear_interpolation_is_exact() {
        let keys = vec![kf(prop::OPACITY, 0, 0.0), kf(prop::OPACITY, 30, 1.0)];
        assert_eq!(eval_nums(&keys, prop::OPACITY, 0, 9.0), KeyValue::Number(0.0));
        assert_eq!(
            eval_nums(&keys, prop::OPACITY, 15, 9.0),
            KeyValue::Number(0.5)
        );
        assert_eq!(
            eval_nums(&keys, prop::OPACITY, 30, 9.0),
            KeyValue::Number(1.0)
        );
    }

    #[test]
    fn extrapolation_is_flat_on_both_sides() {
        let keys = vec![kf(prop::OPACITY, 0, 0.0), kf(prop::OPACITY, 30, 1.0)];
        assert_eq!(
            eval_nums(&keys, prop::OPACITY, -5, 9.0),
            KeyValue::Number(0.0)
        );
        assert_eq!(
            eval_nums(&keys, prop::OPACITY, 100, 9.0),
            KeyValue::Number(1.0)
        );
    }

    #[test]
    fn unsorted_input_still_evaluates_in_frame_order() {
        let keys = vec![kf(prop::Y, 30, 200.0), kf(prop::Y, 0, 250.0)];
        assert_eq!(eval_nums(&keys, prop::Y, 15, 0.0), KeyValue::Number(225.0));
    }

    #[test]
    fn color_midpoint_is_mid_gray() {
        let keys = vec![kf(prop::COLOR, 0, "#000000"), kf(prop::COLOR, 10, "#ffffff")];
        assert_eq!(
            eval_nums(&keys, prop::COLOR, 5, 0.0),
            KeyValue::Text("#808080".to_string())
        );
    }

    #[test]
    fn color_normalizes_shorthand_endpoints() {
        let keys = vec![kf(prop::COLOR, 0, "#000"), kf(prop::COLOR, 10, "#fff")];
        assert_eq!(
            eval_nums(&keys, prop::COLOR, 10, 0.0),
            KeyValue::Text("#fff".to_string()),
            "exact hit holds the raw keyframe value"
        );
        assert_eq!(
            eval_nums(&keys, prop::COLOR, 5, 0.0),
            KeyValue::Text("#808080".to_string())
        );
    }

    #[test]
    fn color_with_one_bad_endpoint_uses_the_valid_side() {
        let keys = vec![kf(prop::COLOR, 0, "oops"), kf(prop::COLOR, 10, "#ff0000")];
        assert_eq!(
            eval_nums(&keys, prop::COLOR, 5, 0.0),
            KeyValue::Text("#ff0000".to_string())
        );
    }

    #[test]
    fn color_with_no_valid_endpoint_falls_back_to_black() {
        let keys = vec![kf(prop::COLOR, 0, 12.0), kf(prop::COLOR, 10, "nope")];
        assert_eq!(
            eval_nums(&keys, prop::COLOR, 5, 0.0),
            KeyValue::Text("#000000".to_string())
        );
    }

    #[test]
    fn scale_blend_is_floored_at_min_scale() {
        // 1 -> -1 crosses zero at the midpoint; every non-positive blend clamps.
        let keys = vec![kf(prop::SCALE, 0, 1.0), kf(prop::SCALE, 10, -1.0)];
        assert_eq!(eval_nums(&keys, prop::SCALE, 5, 1.0), KeyValue::Number(MIN_SCALE));
        assert_eq!(eval_nums(&keys, prop::SCALE, 9, 1.0), KeyValue::Number(MIN_SCALE));
        assert_eq!(
            eval_nums(&keys, prop::SCALE, 2, 1.0),
            KeyValue::Number(0.6)
        );
    }

    #[test]
    fn non_numeric_endpoint_reads_as_zero() {
        let keys = vec![kf(prop::X, 0, "garbage"), kf(prop::X, 10, 100.0)];
        assert_eq!(eval_nums(&keys, prop::X, 5, 7.0), KeyValue::Number(50.0));
    }

    #[test]
    fn duplicate_frames_hold_instead_of_dividing_by_zero() {
        let keys = vec![
            kf(prop::X, 5, 1.0),
            kf(prop::X, 5, 2.0),
            kf(prop::X, 20, 10.0),
        ];
        // partition_point lands past both duplicates; the later one bounds the
        // blend interval at progress 0. No panic, deterministic result.
        assert_eq!(eval_nums(&keys, prop::X, 5, 0.0), KeyValue::Number(2.0));
        assert_eq!(eval_nums(&keys, prop::X, 4, 0.0), KeyValue::Number(1.0));
    }

    #[test]
    fn evaluation_has_no_hysteresis() {
        let keys = vec![kf(prop::OPACITY, 0, 0.0), kf(prop::OPACITY, 30, 1.0)];
        let forward: Vec<KeyValue> = (0..=30)
            .map(|f| eval_nums(&keys, prop::OPACITY, f, 0.0))
            .collect();
        let mut backward: Vec<KeyValue> = (0..=30)
            .rev()
            .map(|f| eval_nums(&keys, prop::OPACITY, f, 0.0))
            .collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }
}

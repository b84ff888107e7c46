//! Element resolution: static properties + animated tracks -> [`RenderProps`].

use crate::{
    color,
    core::{Affine, FrameIndex, Rect, Vec2},
    interp,
    model::{
        DEFAULT_ELEMENT_SIZE, DEFAULT_FONT_SIZE, Element, ElementKind, KeyValue, ShapeKind, prop,
    },
    track::Track,
};

/// The fully resolved, frame-specific property set for one element, ready for
/// drawing. A read-only projection; recomputed from scratch on every call because
/// playback can move forward, backward, or jump arbitrarily.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderProps {
    pub id: String,
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub scale: f64,
    /// Degrees, clockwise.
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub color: String,
    pub payload: RenderPayload,
}

/// Kind-specific static payload carried through to the rendering surface.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum RenderPayload {
    Text {
        text: String,
        font_family: Option<String>,
        font_weight: Option<String>,
        text_align: Option<String>,
    },
    Shape {
        shape: ShapeKind,
    },
    Image {
        src: String,
    },
}

impl RenderProps {
    /// Axis-aligned box at the resolved position/size, before scale and rotation.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Scale and rotation apply about the element center (the editor's
    /// `transform-origin: center`), then the top-left anchor translation.
    pub fn transform(&self) -> Affine {
        let center = Vec2::new(self.width / 2.0, self.height / 2.0);
        Affine::translate(Vec2::new(self.x, self.y) + center)
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-center)
    }
}

/// Resolve one element at one frame.
///
/// Every animatable property with keyframes goes through the interpolation
/// engine; the rest fall back to the element's static values: `x`/`y` from
/// `position`, opacity 1, scale 1, rotation 0, declared (or 100px) dimensions,
/// declared (or 40px) font size, declared (or black) color.
pub fn resolve(element: &Element, frame: FrameIndex) -> RenderProps {
    let size = element.static_size();

    RenderProps {
        id: element.id.clone(),
        kind: element.kind,
        x: numeric(element, prop::X, element.position.x, frame),
        y: numeric(element, prop::Y, element.position.y, frame),
        opacity: numeric(element, prop::OPACITY, 1.0, frame),
        scale: numeric(element, prop::SCALE, 1.0, frame),
        rotation: numeric(element, prop::ROTATION, 0.0, frame),
        width: numeric(element, prop::WIDTH, size.width, frame),
        height: numeric(element, prop::HEIGHT, size.height, frame),
        font_size: numeric(
            element,
            prop::FONT_SIZE,
            element.properties.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            frame,
        ),
        color: color_value(element, frame),
        payload: payload(element),
    }
}

fn numeric(element: &Element, property: &str, fallback: f64, frame: FrameIndex) -> f64 {
    let track = Track::for_property(&element.animations, property);
    interp::evaluate(&track, property, frame, &KeyValue::Number(fallback)).as_number()
}

fn color_value(element: &Element, frame: FrameIndex) -> String {
    let fallback = element
        .properties
        .color
        .clone()
        .unwrap_or_else(|| color::FALLBACK_HEX.to_string());
    let track = Track::for_property(&element.animations, prop::COLOR);
    match interp::evaluate(&track, prop::COLOR, frame, &KeyValue::Text(fallback.clone())) {
        KeyValue::Text(s) => s,
        // A numeric key on the color track cannot be drawn; keep the static color.
        KeyValue::Number(_) => fallback,
    }
}

fn payload(element: &Element) -> RenderPayload {
    match element.kind {
        ElementKind::Text => RenderPayload::Text {
            text: element.properties.text.clone().unwrap_or_default(),
            font_family: element.properties.font_family.clone(),
            font_weight: element.properties.font_weight.clone(),
            text_align: element.properties.text_align.clone(),
        },
        ElementKind::Shape => RenderPayload::Shape {
            shape: element.properties.shape.unwrap_or(ShapeKind::Rectangle),
        },
        ElementKind::Image => RenderPayload::Image {
            src: element.properties.src.clone().unwrap_or_default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point;
    use crate::model::Keyframe;

    fn kf(property: &str, frame: i64, value: impl Into<KeyValue>) -> Keyframe {
        Keyframe {
            property: property.to_string(),
            frame: FrameIndex(frame),
            value: value.into(),
        }
    }

    #[test]
    fn statics_apply_when_nothing_is_animated() {
        let el = Element::new_shape("s0", Point::new(40.0, 60.0), 150);
        let props = resolve(&el, FrameIndex(10));
        assert_eq!(props.x, 40.0);
        assert_eq!(props.y, 60.0);
        assert_eq!(props.opacity, 1.0);
        assert_eq!(props.scale, 1.0);
        assert_eq!(props.rotation, 0.0);
        assert_eq!(props.width, 100.0);
        assert_eq!(props.height, 100.0);
        assert_eq!(props.color, "#3b82f6");
        assert_eq!(
            props.payload,
            RenderPayload::Shape {
                shape: ShapeKind::Rectangle
            }
        );
    }

    #[test]
    fn animated_tracks_override_statics() {
        let mut el = Element::new_text("t0", Point::new(400.0, 250.0), 150);
        el.animations = vec![
            kf(prop::OPACITY, 0, 0.0),
            kf(prop::OPACITY, 30, 1.0),
            kf(prop::Y, 0, 250.0),
            kf(prop::Y, 30, 200.0),
        ];
        let props = resolve(&el, FrameIndex(15));
        assert_eq!(props.opacity, 0.5);
        assert_eq!(props.y, 225.0);
        // x never keyframed, stays static
        assert_eq!(props.x, 400.0);
    }

    #[test]
    fn resolution_is_stateless_across_arbitrary_seeks() {
        let mut el = Element::new_shape("s0", Point::new(0.0, 0.0), 150);
        el.animations = vec![kf(prop::SCALE, 0, 0.5), kf(prop::SCALE, 20, 1.5)];
        let at_10_first = resolve(&el, FrameIndex(10));
        let _ = resolve(&el, FrameIndex(19));
        let _ = resolve(&el, FrameIndex(3));
        let at_10_again = resolve(&el, FrameIndex(10));
        assert_eq!(at_10_first, at_10_again);
    }

    #[test]
    fn text_defaults_fill_missing_statics() {
        let mut el = Element::new_text("t0", Point::ZERO, 150);
        el.properties.font_size = None;
        el.properties.color = None;
        let props = resolve(&el, FrameIndex(0));
        assert_eq!(props.font_size, DEFAULT_FONT_SIZE);
        assert_eq!(props.color, "#000000");
        assert_eq!(props.width, DEFAULT_ELEMENT_SIZE);
    }

    #[test]
    fn bounds_and_transform_follow_resolved_values() {
        let mut el = Element::new_shape("s0", Point::new(10.0, 20.0), 150);
        el.animations = vec![kf(prop::WIDTH, 0, 50.0)];
        let props = resolve(&el, FrameIndex(0));
        let b = props.bounds();
        assert_eq!((b.x0, b.y0, b.x1, b.y1), (10.0, 20.0, 60.0, 120.0));

        // Identity scale/rotation leaves the top-left anchor in place.
        let origin = props.transform() * Point::ZERO;
        assert!((origin.x - 10.0).abs() < 1e-9);
        assert!((origin.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn transform_scales_about_the_center() {
        let el = Element::new_shape("s0", Point::new(0.0, 0.0), 150);
        let mut props = resolve(&el, FrameIndex(0));
        props.scale = 2.0;
        // Center of the 100x100 box stays fixed under pure scaling.
        let center = props.transform() * Point::new(50.0, 50.0);
        assert!((center.x - 50.0).abs() < 1e-9);
        assert!((center.y - 50.0).abs() < 1e-9);
        // The top-left corner moves outward.
        let corner = props.transform() * Point::ZERO;
        assert!((corner.x + 50.0).abs() < 1e-9);
        assert!((corner.y + 50.0).abs() < 1e-9);
    }
}

use kurbo::Point;

use crate::{
    core::{Canvas, FrameIndex, FrameWindow, Rect, Size},
    error::{KeylineError, KeylineResult},
};

/// Animatable property names shared between the engine and the UI shell.
///
/// Keyframes carry the property as a plain string on the wire; these constants are
/// the names the editor actually produces. Unknown strings still evaluate (numeric
/// semantics, caller-supplied fallback) rather than failing.
pub mod prop {
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const OPACITY: &str = "opacity";
    pub const SCALE: &str = "scale";
    pub const ROTATION: &str = "rotation";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const FONT_SIZE: &str = "fontSize";
    pub const COLOR: &str = "color";

    /// Every property the editor can animate, in the order the shell lists them.
    pub const ALL: [&str; 9] = [
        X, Y, OPACITY, SCALE, ROTATION, WIDTH, HEIGHT, FONT_SIZE, COLOR,
    ];
}

/// Width/height used when an element declares no static size of its own
/// (text elements, or a malformed shape/image missing its dimensions).
pub const DEFAULT_ELEMENT_SIZE: f64 = 100.0;

/// Font size used when a text element declares none.
pub const DEFAULT_FONT_SIZE: f64 = 40.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Composition {
    pub settings: CompositionSettings,
    pub elements: Vec<Element>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub duration_in_frames: i64,
    pub background_color: String,
}

impl Default for CompositionSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30,
            duration_in_frames: 150,
            background_color: "#ffffff".to_string(),
        }
    }
}

impl CompositionSettings {
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

/// A positioned visual object participating in the composition.
///
/// Wire shape (stable, shared with save/load and export collaborators):
/// `id, type, properties, position, animations, startFrame, endFrame`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub properties: ElementProps,
    pub position: Point,
    #[serde(default)]
    pub animations: Vec<Keyframe>,
    #[serde(rename = "startFrame")]
    pub start_frame: FrameIndex,
    #[serde(rename = "endFrame")]
    pub end_frame: FrameIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Shape,
    Image,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Rounded,
}

/// Kind-specific static defaults. All fields optional on the wire; the resolver
/// and alignment engine substitute documented defaults for missing values.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// An explicit `(frame, value)` anchor for one property of one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    pub property: String,
    pub frame: FrameIndex,
    pub value: KeyValue,
}

/// A keyframe payload: a number for the numeric properties, a hex string for `color`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    Number(f64),
    Text(String),
}

impl KeyValue {
    /// Numeric coercion with the editor's lenient semantics: strings parse as
    /// floats, anything unparsable or non-finite reads as 0.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(n) if n.is_finite() => *n,
            Self::Number(_) => 0.0,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .unwrap_or(0.0),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl From<f64> for KeyValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for KeyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl Element {
    /// New text element with the editor's defaults ("New text", 40px, black).
    pub fn new_text(id: impl Into<String>, position: Point, duration: i64) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Text,
            properties: ElementProps {
                text: Some("New text".to_string()),
                font_size: Some(DEFAULT_FONT_SIZE),
                color: Some("#000000".to_string()),
                ..ElementProps::default()
            },
            position,
            animations: Vec::new(),
            start_frame: FrameIndex(0),
            end_frame: FrameIndex(duration.saturating_sub(1).max(0)),
        }
    }

    /// New shape element with the editor's defaults (blue 100x100 rectangle).
    pub fn new_shape(id: impl Into<String>, position: Point, duration: i64) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Shape,
            properties: ElementProps {
                shape: Some(ShapeKind::Rectangle),
                width: Some(100.0),
                height: Some(100.0),
                color: Some("#3b82f6".to_string()),
                ..ElementProps::default()
            },
            position,
            animations: Vec::new(),
            start_frame: FrameIndex(0),
            end_frame: FrameIndex(duration.saturating_sub(1).max(0)),
        }
    }

    /// New image element with the editor's defaults (200x200 placeholder).
    pub fn new_image(id: impl Into<String>, position: Point, duration: i64) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Image,
            properties: ElementProps {
                src: Some("/placeholder.svg".to_string()),
                width: Some(200.0),
                height: Some(200.0),
                ..ElementProps::default()
            },
            position,
            animations: Vec::new(),
            start_frame: FrameIndex(0),
            end_frame: FrameIndex(duration.saturating_sub(1).max(0)),
        }
    }

    /// Inclusive visibility window on the timeline.
    pub fn window(&self) -> FrameWindow {
        // start > end is rejected by validate(); clamp keeps a malformed element
        // degenerate rather than panicking.
        FrameWindow {
            start: self.start_frame,
            end: FrameIndex(self.end_frame.0.max(self.start_frame.0)),
        }
    }

    /// Static (un-animated) size; 100x100 when the element declares none.
    pub fn static_size(&self) -> Size {
        Size::new(
            self.properties.width.unwrap_or(DEFAULT_ELEMENT_SIZE),
            self.properties.height.unwrap_or(DEFAULT_ELEMENT_SIZE),
        )
    }

    /// Static bounding box from `position` + [`Element::static_size`]. Alignment
    /// targets this base layout, not the frame-interpolated pose.
    pub fn static_bounds(&self) -> Rect {
        let size = self.static_size();
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + size.width,
            self.position.y + size.height,
        )
    }
}

impl Composition {
    pub fn new(settings: CompositionSettings) -> Self {
        Self {
            settings,
            elements: Vec::new(),
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn validate(&self) -> KeylineResult<()> {
        if self.settings.width == 0 || self.settings.height == 0 {
            return Err(KeylineError::validation("canvas width/height must be > 0"));
        }
        if self.settings.fps == 0 {
            return Err(KeylineError::validation("fps must be > 0"));
        }
        if self.settings.duration_in_frames <= 0 {
            return Err(KeylineError::validation("duration must be > 0 frames"));
        }

        let mut seen_ids = std::collections::BTreeSet::new();
        for el in &self.elements {
            if el.id.trim().is_empty() {
                return Err(KeylineError::validation("element id must be non-empty"));
            }
            if !seen_ids.insert(el.id.as_str()) {
                return Err(KeylineError::validation(format!(
                    "duplicate element id '{}'",
                    el.id
                )));
            }
            if el.start_frame.0 > el.end_frame.0 {
                return Err(KeylineError::validation(format!(
                    "element '{}' has startFrame > endFrame",
                    el.id
                )));
            }

            let mut seen_keys = std::collections::BTreeSet::new();
            for kf in &el.animations {
                if kf.property.trim().is_empty() {
                    return Err(KeylineError::animation(format!(
                        "element '{}' has a keyframe with an empty property",
                        el.id
                    )));
                }
                if kf.frame.0 < 0 {
                    return Err(KeylineError::animation(format!(
                        "element '{}' has a '{}' keyframe at negative frame {}",
                        el.id, kf.property, kf.frame.0
                    )));
                }
                if !seen_keys.insert((kf.property.as_str(), kf.frame.0)) {
                    return Err(KeylineError::animation(format!(
                        "element '{}' has duplicate '{}' keyframes at frame {}",
                        el.id, kf.property, kf.frame.0
                    )));
                }
            }
        }

        Ok(())
    }

    /// Parse the JSON interchange form; this is the boundary save/load
    /// collaborators speak.
    pub fn from_json(s: &str) -> KeylineResult<Self> {
        serde_json::from_str(s).map_err(|e| KeylineError::serde(e.to_string()))
    }

    pub fn to_json(&self) -> KeylineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| KeylineError::serde(e.to_string()))
    }
}

//! Builder API for assembling compositions programmatically.
//!
//! JSON (serde) is the canonical interchange format; the builders exist so tests
//! and programmatic callers do not have to hand-write it.

use crate::{
    core::FrameIndex,
    error::{KeylineError, KeylineResult},
    model::{Composition, CompositionSettings, Element, KeyValue},
    store,
};

pub struct CompositionBuilder {
    settings: CompositionSettings,
    elements: Vec<Element>,
}

impl CompositionBuilder {
    pub fn new(settings: CompositionSettings) -> Self {
        Self {
            settings,
            elements: Vec::new(),
        }
    }

    pub fn element(mut self, element: Element) -> KeylineResult<Self> {
        if self.elements.iter().any(|el| el.id == element.id) {
            return Err(KeylineError::validation(format!(
                "duplicate element id '{}'",
                element.id
            )));
        }
        self.elements.push(element);
        Ok(self)
    }

    pub fn build(self) -> KeylineResult<Composition> {
        let comp = Composition {
            settings: self.settings,
            elements: self.elements,
        };
        comp.validate()?;
        Ok(comp)
    }
}

impl Element {
    /// Consuming keyframe helper for building animated elements inline; same
    /// upsert semantics as [`Composition::upsert_keyframe`].
    pub fn keyframe(mut self, property: &str, frame: i64, value: impl Into<KeyValue>) -> Self {
        store::upsert_keyframe_in(
            &mut self.animations,
            property,
            FrameIndex(frame),
            value.into(),
        );
        self
    }
}

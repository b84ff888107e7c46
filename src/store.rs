//! Mutation entry points the UI shell issues against the element collection,
//! plus the per-element property memo backing the shell's animation panel.
//!
//! None of this is hot-path engine code; these are plain collection operations.
//! Every mutation builds a fresh [`Element`] value and installs it wholesale, so
//! downstream consumers can rely on structural equality to detect change.

use std::collections::HashMap;

use crate::{
    core::FrameIndex,
    model::{Composition, Element, KeyValue, Keyframe},
};

/// Insert or replace a keyframe in a flat animation list, keeping the list
/// sorted by `(property, frame)` and the `(property, frame)` slot unique.
pub(crate) fn upsert_keyframe_in(
    animations: &mut Vec<Keyframe>,
    property: &str,
    frame: FrameIndex,
    value: KeyValue,
) {
    if let Some(existing) = animations
        .iter_mut()
        .find(|k| k.property == property && k.frame == frame)
    {
        existing.value = value;
    } else {
        animations.push(Keyframe {
            property: property.to_string(),
            frame,
            value,
        });
    }
    animations.sort_by(|a, b| (a.property.as_str(), a.frame).cmp(&(b.property.as_str(), b.frame)));
}

impl Composition {
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Full-object replace by id. Returns false when no element matches.
    pub fn replace_element(&mut self, element: Element) -> bool {
        match self.elements.iter_mut().find(|el| el.id == element.id) {
            Some(slot) => {
                *slot = element;
                true
            }
            None => false,
        }
    }

    pub fn remove_element(&mut self, id: &str) -> bool {
        let before = self.elements.len();
        self.elements.retain(|el| el.id != id);
        self.elements.len() != before
    }

    /// Move an element to `new_index` (clamped to the collection), preserving
    /// the relative order of everything else. Timeline drag-reorder.
    pub fn reorder_element(&mut self, id: &str, new_index: usize) -> bool {
        let Some(from) = self.elements.iter().position(|el| el.id == id) else {
            return false;
        };
        let el = self.elements.remove(from);
        let to = new_index.min(self.elements.len());
        self.elements.insert(to, el);
        true
    }

    /// Add a keyframe, or replace the value of an existing one at the same
    /// `(property, frame)` slot; the track never grows a duplicate entry.
    /// Rejects negative frames and unknown elements.
    pub fn upsert_keyframe(
        &mut self,
        id: &str,
        property: &str,
        frame: FrameIndex,
        value: KeyValue,
    ) -> bool {
        if frame.0 < 0 || property.trim().is_empty() {
            return false;
        }
        let Some(slot) = self.elements.iter_mut().find(|el| el.id == id) else {
            return false;
        };
        let mut next = slot.clone();
        upsert_keyframe_in(&mut next.animations, property, frame, value);
        *slot = next;
        true
    }

    /// Delete the keyframe at `(property, frame)`. Returns false when there
    /// is no such keyframe (or element).
    pub fn delete_keyframe(&mut self, id: &str, property: &str, frame: FrameIndex) -> bool {
        let Some(slot) = self.elements.iter_mut().find(|el| el.id == id) else {
            return false;
        };
        let mut next = slot.clone();
        let before = next.animations.len();
        next.animations
            .retain(|k| !(k.property == property && k.frame == frame));
        let removed = next.animations.len() != before;
        if removed {
            *slot = next;
        }
        removed
    }

    /// Delete every keyframe of one property. Returns the removed count.
    pub fn clear_track(&mut self, id: &str, property: &str) -> usize {
        let Some(slot) = self.elements.iter_mut().find(|el| el.id == id) else {
            return 0;
        };
        let mut next = slot.clone();
        let before = next.animations.len();
        next.animations.retain(|k| k.property != property);
        let removed = before - next.animations.len();
        if removed > 0 {
            *slot = next;
        }
        removed
    }
}

/// Remembers the last animatable property the user worked with per element, so
/// the shell can restore the pick when an element is re-selected.
///
/// Owned by the caller and passed through context, deliberately not a
/// module-level singleton. Entries are created lazily on first use; call
/// [`PropertyMemo::prune`] after element removals to drop stale ids.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropertyMemo {
    entries: HashMap<String, String>,
}

impl PropertyMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember(&mut self, element_id: impl Into<String>, property: impl Into<String>) {
        self.entries.insert(element_id.into(), property.into());
    }

    pub fn recall(&self, element_id: &str) -> Option<&str> {
        self.entries.get(element_id).map(String::as_str)
    }

    pub fn forget(&mut self, element_id: &str) {
        self.entries.remove(element_id);
    }

    /// Drop entries whose element no longer exists in the composition.
    pub fn prune(&mut self, comp: &Composition) {
        self.entries
            .retain(|id, _| comp.elements.iter().any(|el| el.id == *id));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Keyline is the engine core of an interactive motion-graphics editor.
//!
//! Users place elements (text, shapes, images) on a canvas, animate their properties
//! over a fixed-length frame timeline, preview the result, and export frames. This
//! crate owns the deterministic part of that loop:
//!
//! 1. **Interpolate**: sparse per-property keyframes -> a value for any requested frame
//! 2. **Resolve**: `Element + FrameIndex -> RenderProps` (the drawable property set)
//! 3. **Evaluate**: `Composition + FrameIndex -> Vec<RenderProps>` (what is visible, in order)
//! 4. **Align**: candidate drag position -> active guidelines + snapped position
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: evaluation and snapping are pure functions of their
//!   inputs; identical input yields identical output at any call order, so scrubbing
//!   and reverse playback cannot drift.
//! - **Nothing fatal in the core**: malformed keyframe values degrade to documented
//!   fallbacks instead of propagating; one corrupt track never blocks the rest of the
//!   composition.
//!
//! The UI shell, persistence, undo history, and the export pipeline are external
//! collaborators; they consume [`RenderProps`] and the JSON wire shape of [`Element`].
#![forbid(unsafe_code)]

pub mod align;
pub mod color;
pub mod core;
pub mod dsl;
pub mod error;
pub mod eval;
pub mod interp;
pub mod model;
pub mod resolve;
pub mod store;
pub mod track;

pub use crate::align::{Axis, Guideline, SNAP_THRESHOLD, compute_guidelines, snap};
pub use crate::core::{Canvas, FrameIndex, FrameWindow};
pub use crate::dsl::CompositionBuilder;
pub use crate::error::{KeylineError, KeylineResult};
pub use crate::eval::Evaluator;
pub use crate::interp::evaluate;
pub use crate::model::{
    Composition, CompositionSettings, Element, ElementKind, ElementProps, KeyValue, Keyframe,
    ShapeKind, prop,
};
pub use crate::resolve::{RenderPayload, RenderProps, resolve};
pub use crate::store::PropertyMemo;
pub use crate::track::Track;

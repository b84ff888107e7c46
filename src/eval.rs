//! Frame evaluation: which elements are visible at a frame, fully resolved.

use crate::{
    core::FrameIndex,
    model::Composition,
    resolve::{RenderProps, resolve},
};

pub struct Evaluator;

impl Evaluator {
    /// Resolve every element whose inclusive `[startFrame, endFrame]` window
    /// contains `frame`, in collection order (stacking order; later entries
    /// paint on top). Elements outside their window are absent from the result,
    /// not hidden, so exporters iterating frames never see them.
    ///
    /// Frames outside the composition duration are not rejected; the visibility
    /// window is the only filter. Tolerates non-monotonic frame requests (seek,
    /// reverse, loop) because nothing is memoized between calls.
    #[tracing::instrument(skip(comp))]
    pub fn render_frame(comp: &Composition, frame: FrameIndex) -> Vec<RenderProps> {
        comp.elements
            .iter()
            .filter(|el| el.window().contains(frame))
            .map(|el| resolve(el, frame))
            .collect()
    }
}

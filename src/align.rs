//! Snapping guidelines for interactive element placement.
//!
//! Both entry points are pure functions over the candidate drag rectangle and an
//! immutable snapshot of the element collection; they are called on every
//! pointer-move during a drag and carry no state between calls. Guidelines come
//! from the canvas (edges + center on each axis) and from every other element's
//! *static* bounds: alignment targets the base layout, not the animated pose.

use crate::{
    core::{Canvas, Point, Rect},
    model::Element,
};

/// Distance in pixels within which an edge/center snaps onto a guideline.
/// The comparison is strict: exactly `SNAP_THRESHOLD` away does not snap.
pub const SNAP_THRESHOLD: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// An alignment ruler line, shown for the duration of one drag gesture.
/// Derived, ephemeral, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Guideline {
    pub axis: Axis,
    pub position: f64,
}

/// Candidate lines in a fixed, deterministic order: canvas lines first, then
/// each other element's lines in collection order.
fn candidate_lines(active_id: &str, elements: &[Element], canvas: Canvas) -> Vec<Guideline> {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let mut lines = vec![
        Guideline {
            axis: Axis::Horizontal,
            position: 0.0,
        },
        Guideline {
            axis: Axis::Horizontal,
            position: h / 2.0,
        },
        Guideline {
            axis: Axis::Horizontal,
            position: h,
        },
        Guideline {
            axis: Axis::Vertical,
            position: 0.0,
        },
        Guideline {
            axis: Axis::Vertical,
            position: w / 2.0,
        },
        Guideline {
            axis: Axis::Vertical,
            position: w,
        },
    ];

    for other in elements {
        if other.id == active_id {
            continue;
        }
        let b = other.static_bounds();
        lines.push(Guideline {
            axis: Axis::Horizontal,
            position: b.y0,
        });
        lines.push(Guideline {
            axis: Axis::Horizontal,
            position: b.y1,
        });
        lines.push(Guideline {
            axis: Axis::Horizontal,
            position: b.center().y,
        });
        lines.push(Guideline {
            axis: Axis::Vertical,
            position: b.x0,
        });
        lines.push(Guideline {
            axis: Axis::Vertical,
            position: b.x1,
        });
        lines.push(Guideline {
            axis: Axis::Vertical,
            position: b.center().x,
        });
    }

    lines
}

fn anchors(candidate: Rect, axis: Axis) -> [f64; 3] {
    match axis {
        Axis::Horizontal => [candidate.y0, candidate.center().y, candidate.y1],
        Axis::Vertical => [candidate.x0, candidate.center().x, candidate.x1],
    }
}

/// Guidelines the candidate rectangle currently activates.
///
/// A line is active when the matching edge or center of `candidate` lies strictly
/// within [`SNAP_THRESHOLD`] of it; lines are checked independently, so several
/// may be active on both axes at once. The UI renders these as ruler lines.
pub fn compute_guidelines(
    active_id: &str,
    candidate: Rect,
    elements: &[Element],
    canvas: Canvas,
) -> Vec<Guideline> {
    candidate_lines(active_id, elements, canvas)
        .into_iter()
        .filter(|line| {
            anchors(candidate, line.axis)
                .iter()
                .any(|a| (a - line.position).abs() < SNAP_THRESHOLD)
        })
        .collect()
}

/// Snapped top-left position for the candidate rectangle.
///
/// Each axis snaps independently. Among all `(line, anchor)` pairs strictly
/// within the threshold, the nearest wins; exact distance ties go to the
/// earliest candidate in iteration order (canvas lines before element lines,
/// elements in collection order). An axis with no line in range is returned
/// unchanged.
pub fn snap(active_id: &str, candidate: Rect, elements: &[Element], canvas: Canvas) -> Point {
    let width = candidate.width();
    let height = candidate.height();
    let mut snapped = Point::new(candidate.x0, candidate.y0);
    let mut best_dx = SNAP_THRESHOLD;
    let mut best_dy = SNAP_THRESHOLD;

    for line in candidate_lines(active_id, elements, canvas) {
        match line.axis {
            Axis::Horizontal => {
                let pairs = [
                    (candidate.y0, line.position),
                    (candidate.center().y, line.position - height / 2.0),
                    (candidate.y1, line.position - height),
                ];
                for (anchor, y) in pairs {
                    let d = (anchor - line.position).abs();
                    if d < best_dy {
                        best_dy = d;
                        snapped.y = y;
                    }
                }
            }
            Axis::Vertical => {
                let pairs = [
                    (candidate.x0, line.position),
                    (candidate.center().x, line.position - width / 2.0),
                    (candidate.x1, line.position - width),
                ];
                for (anchor, x) in pairs {
                    let d = (anchor - line.position).abs();
                    if d < best_dx {
                        best_dx = d;
                        snapped.x = x;
                    }
                }
            }
        }
    }

    snapped
}

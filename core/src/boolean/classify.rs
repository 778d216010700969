//! Merge, build search structures and select faces.

use crate::graph::{AreaSelect, BoolSelect, BooleanOp, GroupId, MarkedFaceSet, MergeService};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which faces an operation keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceSelection {
    /// Two-operand Boolean; groups below `boundary` belong to the first operand.
    Boolean { op: BooleanOp, boundary: GroupId },
    /// Single-operand analysis with an optional inverted result.
    Analysis { area: AreaSelect, boolean: BoolSelect, reverse: bool },
}

/// Merge the loaded curves and mark the faces picked by `selection`.
///
/// Returns an empty set when the service cannot build its search structures;
/// degenerate input is not an error.
pub fn classify_and_select<G: MergeService + ?Sized>(
    graph: &mut G,
    selection: FaceSelection,
    gap_tolerance: f64,
) -> MarkedFaceSet {
    graph.merge(gap_tolerance);
    if !graph.build_face_search_structures() {
        debug!("face search structures unavailable, selecting nothing");
        return MarkedFaceSet::default();
    }

    match selection {
        FaceSelection::Boolean { op, boundary } => graph.collect_boolean_faces(op, boundary),
        FaceSelection::Analysis { area, boolean, reverse } => graph.collect_analysis_faces(area, boolean, reverse),
    }
}

//! Planar graph merge service.
//!
//! Curves are loaded with a parent curve id and a group id, merged into a
//! planar arrangement, classified face by face and walked back out as
//! sentinel-delimited boundary loops. [`MergeService`] is the seam the
//! Boolean layer talks to; [`PlanarGraph`] is the in-crate implementation.

use crate::curves::{BsplineCurve, CurvePrimitive, EllipticalArc};
use crate::geometry::Point2;
use serde::{Deserialize, Serialize};

pub mod planar;
mod faces;
mod loops;
mod refine;
pub mod selection;

pub use planar::PlanarGraph;
pub use selection::{AreaSelect, BoolSelect, BooleanOp};

#[cfg(test)]
mod tests_planar;

/// Input operand tag used for face coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl GroupId {
    pub fn next(self) -> Self {
        GroupId(self.0 + 1)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of an original input primitive in the loader's curve table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParentCurveId(pub usize);

/// A directed half-edge of the merged graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Curve fragment owned by the graph, backing one curved edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurveIndex(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceId(pub usize);

/// Flattened output of the extended face loop collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceLoopToken {
    StartComponent,
    StartFace,
    Node(NodeId),
    EndFace,
    EndComponent,
}

/// Geometry behind a half-edge, oriented along the half-edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeGeometry {
    /// Straight edge.
    Segment { start: Point2, end: Point2 },
    /// Edge backed by an arc or free-form fragment, traversed backwards when `reversed`.
    Curve { curve: CurveIndex, reversed: bool },
}

/// Faces picked by a selection pass, indexed by [`FaceId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkedFaceSet {
    marked: Vec<bool>,
}

impl MarkedFaceSet {
    pub fn new(face_count: usize) -> Self {
        Self { marked: vec![false; face_count] }
    }

    pub fn from_marks(marked: Vec<bool>) -> Self {
        Self { marked }
    }

    pub fn mark(&mut self, face: FaceId) {
        if let Some(m) = self.marked.get_mut(face.0) {
            *m = true;
        }
    }

    pub fn contains(&self, face: FaceId) -> bool {
        self.marked.get(face.0).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.marked.iter().filter(|m| **m).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.marked.iter().enumerate().filter(|(_, m)| **m).map(|(i, _)| FaceId(i))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    pub carriers: usize,
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
    pub components: usize,
}

/// Planar merge and face classification service.
///
/// Call order: `load_*`, then [`merge`](MergeService::merge), then
/// [`build_face_search_structures`](MergeService::build_face_search_structures),
/// then any number of face selections and loop collections.
pub trait MergeService {
    fn load_polyline(&mut self, points: &[Point2], parent: ParentCurveId, group: GroupId);

    fn load_line_segment(&mut self, start: Point2, end: Point2, parent: ParentCurveId, group: GroupId) {
        self.load_polyline(&[start, end], parent, group);
    }

    fn load_elliptical_arc(&mut self, arc: &EllipticalArc, parent: ParentCurveId, group: GroupId);

    fn load_free_form_curve(&mut self, curve: &BsplineCurve, parent: ParentCurveId, group: GroupId);

    /// Split at crossings and snap vertices closer than `gap_tolerance`.
    fn merge(&mut self, gap_tolerance: f64);

    /// Face ranges, hole association and coverage. `false` when nothing can be classified.
    fn build_face_search_structures(&mut self) -> bool;

    /// Faces covered per the two-operand Boolean. Groups below `boundary` form operand A.
    fn collect_boolean_faces(&self, op: BooleanOp, boundary: GroupId) -> MarkedFaceSet;

    fn collect_analysis_faces(&self, area: AreaSelect, boolean: BoolSelect, reverse: bool) -> MarkedFaceSet;

    /// Boundary loops of the marked area as a sentinel-delimited token stream.
    fn collect_and_number_extended_face_loops(&self, faces: &MarkedFaceSet) -> Vec<FaceLoopToken>;

    fn edge_geometry(&self, node: NodeId) -> Option<EdgeGeometry>;

    fn parent_curve_index(&self, node: NodeId) -> Option<ParentCurveId>;

    /// Fragment of an arc or free-form curve, in the orientation of the owning edge.
    fn curve_fragment(&self, curve: CurveIndex) -> Option<CurvePrimitive>;

    fn face_successor(&self, node: NodeId) -> Option<NodeId>;

    fn face_predecessor(&self, node: NodeId) -> Option<NodeId>;

    fn statistics(&self) -> GraphStatistics;
}

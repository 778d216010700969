//! Rebuilds curve primitives from graph edges.
//!
//! Consecutive straight edges are coalesced into line strings. Without
//! provenance tracking a line string runs as long as the chain stays
//! connected; with tracking it also stops wherever the parent curve changes,
//! so every output piece maps back to exactly one input primitive.

use super::assemble::AssemblyError;
use super::loader::CurveTable;
use super::{CurvePair, RegionOpError};
use crate::curves::{CurvePrimitive, CurvePrimitivePtr};
use crate::geometry::{within, Point2};
use crate::graph::{EdgeGeometry, MergeService, NodeId, ParentCurveId};
use std::sync::Arc;

/// Receives the node ids of one loop at a time.
pub trait FaceLoopSink {
    fn begin_loop(&mut self);
    fn push_node(&mut self, node: NodeId) -> Result<(), AssemblyError>;
    fn finish_loop(&mut self) -> Result<Vec<CurvePrimitivePtr>, AssemblyError>;
}

#[derive(Debug)]
struct LineStringBuilder {
    points: Vec<Point2>,
    parent: Option<ParentCurveId>,
}

pub struct LoopExtractor<'a, G: MergeService + ?Sized> {
    graph: &'a G,
    table: &'a CurveTable,
    tolerance: f64,
    track_provenance: bool,
    builder: Option<LineStringBuilder>,
    current: Vec<CurvePrimitivePtr>,
    provenance: Vec<CurvePair>,
}

impl<'a, G: MergeService + ?Sized> LoopExtractor<'a, G> {
    pub fn new(graph: &'a G, table: &'a CurveTable, tolerance: f64, track_provenance: bool) -> Self {
        Self {
            graph,
            table,
            tolerance,
            track_provenance,
            builder: None,
            current: Vec::new(),
            provenance: Vec::new(),
        }
    }

    /// Provenance pairs recorded so far.
    pub fn provenance(&self) -> &[CurvePair] {
        &self.provenance
    }

    pub fn into_provenance(self) -> Vec<CurvePair> {
        self.provenance
    }

    /// Primitives of the face containing `start`, walking successors, or
    /// predecessors with every edge flipped when `reversed`.
    pub fn extract_face(&mut self, start: NodeId, reversed: bool) -> Result<Vec<CurvePrimitivePtr>, AssemblyError> {
        let limit = self.graph.statistics().edges * 2;
        self.begin_loop();
        let mut node = start;
        for _ in 0..=limit {
            self.extract_edge(node, reversed)?;
            let step = if reversed {
                self.graph.face_predecessor(node)
            } else {
                self.graph.face_successor(node)
            };
            node = step.ok_or(AssemblyError::InvalidNode(node))?;
            if node == start {
                break;
            }
        }
        self.finish_loop()
    }

    /// Append one edge, oriented along its half-edge or against it when `flip`.
    pub fn extract_edge(&mut self, node: NodeId, flip: bool) -> Result<(), AssemblyError> {
        let geometry = self.graph.edge_geometry(node).ok_or(AssemblyError::InvalidNode(node))?;
        let parent = self.graph.parent_curve_index(node);

        match geometry {
            EdgeGeometry::Segment { start, end } => {
                let (start, end) = if flip { (end, start) } else { (start, end) };
                self.extend_line(start, end, parent)
            }
            EdgeGeometry::Curve { curve, reversed } => {
                self.flush_line()?;
                let fragment = self
                    .graph
                    .curve_fragment(curve)
                    .ok_or(RegionOpError::UnknownCurveFragment(curve))?;
                let primitive = if reversed != flip { fragment.reversed() } else { fragment };
                self.emit(primitive, parent)
            }
        }
    }

    fn extend_line(&mut self, start: Point2, end: Point2, parent: Option<ParentCurveId>) -> Result<(), AssemblyError> {
        if let Some(builder) = &mut self.builder {
            let joins = builder.points.last().is_some_and(|last| within(last, &start, self.tolerance));
            if joins && (!self.track_provenance || builder.parent == parent) {
                builder.points.push(end);
                return Ok(());
            }
        }
        self.flush_line()?;
        self.builder = Some(LineStringBuilder { points: vec![start, end], parent });
        Ok(())
    }

    fn flush_line(&mut self) -> Result<(), AssemblyError> {
        match self.builder.take() {
            Some(builder) if builder.points.len() >= 2 => {
                self.emit(CurvePrimitive::line_string(builder.points), builder.parent)
            }
            _ => Ok(()),
        }
    }

    fn emit(&mut self, primitive: CurvePrimitive, parent: Option<ParentCurveId>) -> Result<(), AssemblyError> {
        let new = Arc::new(primitive);
        if self.track_provenance {
            if let Some(parent) = parent {
                let old = self.table.lookup(parent)?.clone();
                self.provenance.push(CurvePair { new: new.clone(), old });
            }
        }
        self.current.push(new);
        Ok(())
    }

    /// Without provenance, a line string ending where the first one starts is joined onto it.
    fn join_wraparound(&mut self) {
        if self.track_provenance || self.current.len() < 2 {
            return;
        }
        let (Some(first), Some(last)) = (self.current.first(), self.current.last()) else {
            return;
        };
        let (CurvePrimitive::LineString { points: head }, CurvePrimitive::LineString { points: tail }) =
            (first.as_ref(), last.as_ref())
        else {
            return;
        };
        let joins = matches!((tail.last(), head.first()), (Some(t), Some(h)) if within(t, h, self.tolerance));
        if !joins {
            return;
        }
        let mut points = tail.clone();
        points.extend(head.iter().skip(1).copied());
        self.current.pop();
        self.current[0] = Arc::new(CurvePrimitive::line_string(points));
    }
}

impl<G: MergeService + ?Sized> FaceLoopSink for LoopExtractor<'_, G> {
    fn begin_loop(&mut self) {
        self.builder = None;
        self.current.clear();
    }

    fn push_node(&mut self, node: NodeId) -> Result<(), AssemblyError> {
        self.extract_edge(node, false)
    }

    fn finish_loop(&mut self) -> Result<Vec<CurvePrimitivePtr>, AssemblyError> {
        self.flush_line()?;
        self.join_wraparound();
        Ok(std::mem::take(&mut self.current))
    }
}

//! Region loading: registers every closed loop's primitives with the merge
//! service under a parent curve id and a group id.

use super::{BooleanConfig, RegionOpError, RegionResult};
use crate::curves::{CurvePrimitive, CurvePrimitivePtr};
use crate::graph::{GroupId, MergeService, ParentCurveId};
use crate::region::{BoundaryType, CurveLoop, Region};
use tracing::{debug, trace};

/// Parent curve id to original primitive, for one operation.
#[derive(Debug, Clone, Default)]
pub struct CurveTable {
    curves: Vec<CurvePrimitivePtr>,
}

impl CurveTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a primitive; ids are dense and never reused.
    pub fn add(&mut self, curve: CurvePrimitivePtr) -> ParentCurveId {
        self.curves.push(curve);
        ParentCurveId(self.curves.len() - 1)
    }

    pub fn get(&self, id: ParentCurveId) -> Option<&CurvePrimitivePtr> {
        self.curves.get(id.0)
    }

    pub fn lookup(&self, id: ParentCurveId) -> RegionResult<&CurvePrimitivePtr> {
        self.get(id).ok_or(RegionOpError::UnknownParentCurve(id))
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

pub struct CurveLoader<'a, G: MergeService + ?Sized> {
    graph: &'a mut G,
    table: &'a mut CurveTable,
    tolerance: f64,
    max_depth: usize,
}

impl<'a, G: MergeService + ?Sized> CurveLoader<'a, G> {
    pub fn new(graph: &'a mut G, table: &'a mut CurveTable, config: &BooleanConfig) -> Self {
        Self {
            graph,
            table,
            tolerance: config.gap_tolerance,
            max_depth: config.max_nesting_depth,
        }
    }

    /// Load `region` starting at group `start` and return the next free group.
    ///
    /// Union children each get their own group. A parity region's loops share
    /// one group so holes cancel their outer by parity. A bare loop advances
    /// the group only when `advance` is set.
    pub fn load(&mut self, region: &Region, start: GroupId, advance: bool) -> RegionResult<GroupId> {
        self.load_at(region, start, advance, 0)
    }

    fn load_at(&mut self, region: &Region, group: GroupId, advance: bool, depth: usize) -> RegionResult<GroupId> {
        if depth > self.max_depth {
            return Err(RegionOpError::NestingTooDeep { depth, limit: self.max_depth });
        }
        match region {
            Region::Loop(curve_loop) => self.load_loop(curve_loop, group, advance),
            Region::Union(union) => {
                let mut group = group;
                for child in &union.children {
                    group = self.load_at(child, group, true, depth + 1)?;
                }
                Ok(group)
            }
            Region::Parity(parity) => {
                for curve_loop in &parity.loops {
                    self.load_loop(curve_loop, group, false)?;
                }
                Ok(group.next())
            }
        }
    }

    fn load_loop(&mut self, curve_loop: &CurveLoop, group: GroupId, advance: bool) -> RegionResult<GroupId> {
        if curve_loop.boundary == BoundaryType::Open || !curve_loop.is_closed(self.tolerance) {
            debug!(
                primitives = curve_loop.primitives.len(),
                group = group.0,
                "skipping loop that is not a closed boundary"
            );
            return Ok(group);
        }

        for primitive in &curve_loop.primitives {
            if let CurvePrimitive::LineString { points } = primitive.as_ref() {
                if points.len() < 2 {
                    continue;
                }
            }
            let parent = self.table.add(primitive.clone());
            trace!(parent = parent.0, group = group.0, kind = primitive.kind(), "curve loaded");
            match primitive.as_ref() {
                CurvePrimitive::LineSegment { start, end } => {
                    self.graph.load_line_segment(*start, *end, parent, group)
                }
                CurvePrimitive::LineString { points } => self.graph.load_polyline(points, parent, group),
                CurvePrimitive::EllipticalArc(arc) => self.graph.load_elliptical_arc(arc, parent, group),
                CurvePrimitive::FreeForm(curve) => self.graph.load_free_form_curve(curve, parent, group),
            }
        }

        Ok(if advance { group.next() } else { group })
    }
}

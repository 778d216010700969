//! Planar arrangement built from loaded curve carriers.
//!
//! Merging proceeds in stages:
//! 1. Stroke every carrier into chords and find chord crossings and overlaps
//! 2. Split carriers at those points and snap nearby split points into vertices
//! 3. Emit one edge per carrier piece, folding coincident edges together
//! 4. Link half-edges by departure angle around each vertex and walk the faces

use super::faces::SearchStructures;
use super::refine::{refine_crossing, Track};
use super::{
    AreaSelect, BoolSelect, BooleanOp, CurveIndex, EdgeGeometry, FaceLoopToken, GraphStatistics,
    FaceId, GroupId, MarkedFaceSet, MergeService, NodeId, ParentCurveId,
};
use crate::curves::{BsplineCurve, CurvePrimitive, EllipticalArc, StrokeOptions};
use crate::geometry::utils_2d::{self, cross_2d, direction_angle};
use crate::geometry::{segment_segment_intersection, within, Aabb2, Point2, SegmentHit, Vector2};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// How a carrier maps parameters to points.
#[derive(Debug, Clone)]
enum CarrierShape {
    /// Straight pieces; the parameter is the point index.
    Polyline,
    /// Arc or free-form curve; the parameter is the curve fraction.
    Curve(CurvePrimitive),
}

/// One loaded curve and the parameters where it gets split.
#[derive(Debug, Clone)]
struct Carrier {
    parent: ParentCurveId,
    group: GroupId,
    shape: CarrierShape,
    samples: Vec<Point2>,
    params: Vec<f64>,
    splits: Vec<f64>,
    /// Split parameters whose vertex position was fixed by a crossing shared with another carrier.
    pins: Vec<(f64, Point2)>,
}

impl Carrier {
    fn chord_count(&self) -> usize {
        self.samples.len().saturating_sub(1)
    }

    fn point_at(&self, param: f64) -> Point2 {
        match &self.shape {
            CarrierShape::Curve(curve) => curve.fraction_to_point(param).unwrap_or(self.samples[0]),
            CarrierShape::Polyline => {
                let last = self.samples.len() - 1;
                if last == 0 {
                    return self.samples[0];
                }
                let u = param.clamp(0.0, last as f64);
                let i = (u.floor() as usize).min(last - 1);
                utils_2d::lerp(&self.samples[i], &self.samples[i + 1], u - i as f64)
            }
        }
    }

    fn chord_param(&self, chord: usize, t: f64) -> f64 {
        let (p0, p1) = (self.params[chord], self.params[chord + 1]);
        p0 + t * (p1 - p0)
    }

    /// Position of a split: the pinned crossing point if there is one.
    fn split_point(&self, param: f64) -> Point2 {
        self.pins
            .iter()
            .find(|(p, _)| *p == param)
            .map_or_else(|| self.point_at(param), |(_, point)| *point)
    }
}

/// Graph edge. Half-edge `2e` runs start to end, `2e + 1` runs back.
#[derive(Debug, Clone)]
pub(super) struct Edge {
    pub(super) start: usize,
    pub(super) end: usize,
    pub(super) parent: ParentCurveId,
    pub(super) fragment: Option<CurveIndex>,
    /// Forward polyline; first and last points are the vertex positions.
    pub(super) stroke: Vec<Point2>,
    pub(super) mid: Point2,
    /// Winding change per group crossing the edge from its right to its left.
    pub(super) deltas: BTreeMap<GroupId, i32>,
    /// Forward `0.5 * integral(x dy - y dx)`.
    pub(super) area_term: f64,
}

#[derive(Debug, Clone)]
pub(super) struct Face {
    pub(super) half_edges: Vec<usize>,
    pub(super) area: f64,
    pub(super) range: Aabb2,
    pub(super) polygon: Vec<Point2>,
}

#[derive(Debug, Clone, Copy)]
struct Chord {
    carrier: usize,
    index: usize,
    range: Aabb2,
}

/// Disjoint sets with path halving.
pub(super) struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    pub(super) fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    pub(super) fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    pub(super) fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Lower index wins so cluster roots stay deterministic
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi] = lo;
        }
    }
}

/// In-memory planar merge service.
#[derive(Debug, Clone, Default)]
pub struct PlanarGraph {
    stroke: StrokeOptions,
    carriers: Vec<Carrier>,
    group_count: usize,
    pub(super) tolerance: f64,
    merged: bool,
    pub(super) vertices: Vec<Point2>,
    pub(super) edges: Vec<Edge>,
    fragments: Vec<CurvePrimitive>,
    pub(super) next: Vec<usize>,
    prev: Vec<usize>,
    pub(super) face_of: Vec<usize>,
    pub(super) faces: Vec<Face>,
    pub(super) search: Option<SearchStructures>,
}

impl PlanarGraph {
    pub fn new(stroke: StrokeOptions) -> Self {
        Self { stroke, ..Default::default() }
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn is_merged(&self) -> bool {
        self.merged
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Signed area of a face; bounded faces are positive.
    pub fn face_area(&self, face: FaceId) -> Option<f64> {
        self.faces.get(face.0).map(|f| f.area)
    }

    /// Per-group winding numbers of a face, once search structures exist.
    pub fn face_windings(&self, face: FaceId) -> Option<&[i32]> {
        self.search.as_ref()?.windings.get(face.0).map(|w| w.as_slice())
    }

    fn register(&mut self, carrier: Carrier) {
        self.group_count = self.group_count.max(carrier.group.index() + 1);
        self.carriers.push(carrier);
        self.merged = false;
        self.search = None;
    }

    fn load_curve(&mut self, curve: CurvePrimitive, parent: ParentCurveId, group: GroupId) {
        let samples = curve.stroke(&self.stroke);
        if samples.len() < 2 {
            return;
        }
        let n = (samples.len() - 1) as f64;
        let params = (0..samples.len()).map(|i| i as f64 / n).collect();
        self.register(Carrier {
            parent,
            group,
            shape: CarrierShape::Curve(curve),
            samples,
            params,
            splits: vec![0.0, 1.0],
            pins: Vec::new(),
        });
    }

    pub(super) fn half_edge_start(&self, h: usize) -> usize {
        let e = &self.edges[h / 2];
        if h % 2 == 0 { e.start } else { e.end }
    }

    pub(super) fn half_edge_area(&self, h: usize) -> f64 {
        let a = self.edges[h / 2].area_term;
        if h % 2 == 0 { a } else { -a }
    }

    pub(super) fn half_edge_delta(&self, h: usize, group: usize) -> i32 {
        let d = self.edges[h / 2].deltas.get(&GroupId(group as u32)).copied().unwrap_or(0);
        if h % 2 == 0 { d } else { -d }
    }

    pub(super) fn half_edge_points(&self, h: usize) -> Vec<Point2> {
        let stroke = &self.edges[h / 2].stroke;
        if h % 2 == 0 {
            stroke.clone()
        } else {
            stroke.iter().rev().copied().collect()
        }
    }

    /// Closed polygon through a sequence of half-edges.
    pub(super) fn chain_polygon(&self, half_edges: &[usize]) -> Vec<Point2> {
        let mut chain = Vec::new();
        for &h in half_edges {
            utils_2d::append_chain(&mut chain, &self.half_edge_points(h), 0.0);
        }
        if chain.len() > 1 && chain.first() == chain.last() {
            chain.pop();
        }
        chain
    }

    // =========================================================================
    // Merge stages
    // =========================================================================

    fn reset_merge(&mut self) {
        for c in &mut self.carriers {
            c.splits = match c.shape {
                CarrierShape::Polyline => c.params.clone(),
                CarrierShape::Curve(_) => vec![0.0, 1.0],
            };
            c.pins.clear();
        }
        self.vertices.clear();
        self.edges.clear();
        self.fragments.clear();
        self.next.clear();
        self.prev.clear();
        self.face_of.clear();
        self.faces.clear();
        self.search = None;
    }

    fn is_chord_joint(&self, carrier: usize, i: usize, j: usize, ta: f64, tb: f64) -> bool {
        let c = &self.carriers[carrier];
        let n = c.chord_count();
        let closed = n > 1 && within(&c.samples[0], &c.samples[n], self.tolerance);
        (j == i + 1 && ta == 1.0 && tb == 0.0)
            || (i == j + 1 && ta == 0.0 && tb == 1.0)
            || (closed && i == 0 && j == n - 1 && ta == 0.0 && tb == 1.0)
            || (closed && j == 0 && i == n - 1 && ta == 1.0 && tb == 0.0)
    }

    fn chord_points(&self, chord: &Chord) -> (Point2, Point2) {
        let s = &self.carriers[chord.carrier].samples;
        (s[chord.index], s[chord.index + 1])
    }

    fn track(&self, chord: &Chord) -> Track<'_> {
        let c = &self.carriers[chord.carrier];
        match &c.shape {
            CarrierShape::Polyline => {
                let (start, end) = self.chord_points(chord);
                Track::Segment { start, end, p0: c.params[chord.index], p1: c.params[chord.index + 1] }
            }
            CarrierShape::Curve(curve) => Track::Curve {
                curve,
                lo: c.params[chord.index.saturating_sub(1)],
                hi: c.params[(chord.index + 2).min(c.params.len() - 1)],
            },
        }
    }

    /// Carrier parameters and shared position of a chord hit. Hits involving a
    /// curved carrier are moved onto the true curves; if that fails the chord
    /// point is kept for both sides so they still share a vertex.
    fn crossing(&self, a: &Chord, ta: f64, b: &Chord, tb: f64, point: Point2) -> (f64, f64, Point2) {
        let (ca, cb) = (&self.carriers[a.carrier], &self.carriers[b.carrier]);
        let (pa, pb) = (ca.chord_param(a.index, ta), cb.chord_param(b.index, tb));
        if matches!((&ca.shape, &cb.shape), (CarrierShape::Polyline, CarrierShape::Polyline)) {
            return (pa, pb, point);
        }

        let (track_a, track_b) = (self.track(a), self.track(b));
        let (u, v) = (track_a.local(pa, ta), track_b.local(pb, tb));
        match refine_crossing(track_a, u, track_b, v, self.tolerance) {
            Some((u, v, refined)) => (track_a.param(u), track_b.param(v), refined),
            None => {
                trace!(a = a.carrier, b = b.carrier, "crossing kept at chord estimate");
                (pa, pb, point)
            }
        }
    }

    /// Sweep-and-prune over chord ranges; records split parameters on both carriers.
    fn insert_crossings(&mut self) -> usize {
        let tol = self.tolerance;
        let mut chords: Vec<Chord> = Vec::new();
        for (ci, carrier) in self.carriers.iter().enumerate() {
            for index in 0..carrier.chord_count() {
                let range = Aabb2::from_points(&carrier.samples[index..index + 2]).expanded(tol);
                chords.push(Chord { carrier: ci, index, range });
            }
        }
        chords.sort_by(|a, b| a.range.min.x.total_cmp(&b.range.min.x));

        let mut found: Vec<(usize, f64, Point2)> = Vec::new();
        let mut hits = 0;
        for (i, a) in chords.iter().enumerate() {
            for b in &chords[i + 1..] {
                if b.range.min.x > a.range.max.x {
                    break;
                }
                if !a.range.intersects(&b.range) {
                    continue;
                }
                let (a0, a1) = self.chord_points(a);
                let (b0, b1) = self.chord_points(b);
                match segment_segment_intersection(a0, a1, b0, b1, tol) {
                    SegmentHit::None => {}
                    SegmentHit::Point { point, ta, tb } => {
                        if a.carrier == b.carrier && self.is_chord_joint(a.carrier, a.index, b.index, ta, tb) {
                            continue;
                        }
                        let (pa, pb, at) = self.crossing(a, ta, b, tb, point);
                        found.push((a.carrier, pa, at));
                        found.push((b.carrier, pb, at));
                        hits += 1;
                    }
                    SegmentHit::Overlap { first, second } => {
                        let (ca, cb) = (&self.carriers[a.carrier], &self.carriers[b.carrier]);
                        for (at, ta, tb) in [first, second] {
                            found.push((a.carrier, ca.chord_param(a.index, ta), at));
                            found.push((b.carrier, cb.chord_param(b.index, tb), at));
                        }
                        hits += 1;
                    }
                }
            }
        }

        for (carrier, param, at) in found {
            let c = &mut self.carriers[carrier];
            c.splits.push(param);
            c.pins.push((param, at));
        }
        hits
    }

    /// Sort splits and drop those within tolerance of the previous kept one.
    /// Both carrier ends always survive.
    fn normalize_splits(&mut self) {
        let tol = self.tolerance;
        for carrier in &mut self.carriers {
            let lo = carrier.params[0];
            let hi = carrier.params[carrier.params.len() - 1];
            let mut raw: Vec<f64> = carrier.splits.iter().map(|s| s.clamp(lo, hi)).collect();
            raw.push(lo);
            raw.push(hi);
            raw.sort_by(|a, b| a.total_cmp(b));

            let mut kept: Vec<f64> = Vec::with_capacity(raw.len());
            for s in raw {
                let Some(&last) = kept.last() else {
                    kept.push(s);
                    continue;
                };
                if s == last {
                    continue;
                }
                if within(&carrier.point_at(last), &carrier.point_at(s), tol) {
                    if s == hi {
                        if kept.len() > 1 {
                            if let Some(l) = kept.last_mut() {
                                *l = hi;
                            }
                        } else {
                            // Closed curve: start and end coincide
                            kept.push(hi);
                        }
                    }
                    continue;
                }
                kept.push(s);
            }
            carrier.splits = kept;
        }
    }

    /// Cluster split points into vertices. Returns the vertex of every split, per carrier.
    fn snap_vertices(&mut self) -> Vec<Vec<usize>> {
        let tol = self.tolerance;
        let mut points: Vec<Point2> = Vec::new();
        let mut owner: Vec<(usize, usize)> = Vec::new();
        for (ci, carrier) in self.carriers.iter().enumerate() {
            for (k, s) in carrier.splits.iter().enumerate() {
                points.push(carrier.split_point(*s));
                owner.push((ci, k));
            }
        }

        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_by(|a, b| points[*a].x.total_cmp(&points[*b].x));

        let mut sets = UnionFind::new(points.len());
        for (i, &a) in order.iter().enumerate() {
            for &b in &order[i + 1..] {
                if points[b].x - points[a].x > tol {
                    break;
                }
                if within(&points[a], &points[b], tol) {
                    sets.union(a, b);
                }
            }
        }

        let mut vertex_of_root: HashMap<usize, usize> = HashMap::new();
        let mut vertex_of: Vec<Vec<usize>> =
            self.carriers.iter().map(|c| vec![0; c.splits.len()]).collect();
        self.vertices.clear();
        for (i, p) in points.iter().enumerate() {
            let root = sets.find(i);
            let vertices = &mut self.vertices;
            let v = *vertex_of_root.entry(root).or_insert_with(|| {
                vertices.push(*p);
                vertices.len() - 1
            });
            let (ci, k) = owner[i];
            vertex_of[ci][k] = v;
        }
        vertex_of
    }

    fn build_edges(&mut self, vertex_of: &[Vec<usize>]) {
        let tol = self.tolerance;
        let mut edges = Vec::new();
        let mut fragments = Vec::new();

        for (ci, carrier) in self.carriers.iter().enumerate() {
            let mut deltas = BTreeMap::new();
            deltas.insert(carrier.group, 1);

            for k in 0..carrier.splits.len().saturating_sub(1) {
                let (s0, s1) = (carrier.splits[k], carrier.splits[k + 1]);
                let (v0, v1) = (vertex_of[ci][k], vertex_of[ci][k + 1]);
                let (p0, p1) = (self.vertices[v0], self.vertices[v1]);

                match &carrier.shape {
                    CarrierShape::Polyline => {
                        if v0 == v1 {
                            continue;
                        }
                        edges.push(Edge {
                            start: v0,
                            end: v1,
                            parent: carrier.parent,
                            fragment: None,
                            stroke: vec![p0, p1],
                            mid: utils_2d::midpoint(&p0, &p1),
                            deltas: deltas.clone(),
                            area_term: 0.5 * cross_2d(&p0.coords, &p1.coords),
                        });
                    }
                    CarrierShape::Curve(curve) => {
                        let fragment = curve.partial(s0, s1);
                        let mut stroke = fragment.stroke(&self.stroke);
                        if stroke.len() < 2 {
                            continue;
                        }
                        if v0 == v1 && Aabb2::from_points(&stroke).diagonal() <= 2.0 * tol {
                            continue;
                        }
                        let last = stroke.len() - 1;
                        stroke[0] = p0;
                        stroke[last] = p1;
                        let mid = fragment.fraction_to_point(0.5).unwrap_or(p0);
                        let area_term = fragment.area_contribution(&self.stroke);
                        fragments.push(fragment);
                        edges.push(Edge {
                            start: v0,
                            end: v1,
                            parent: carrier.parent,
                            fragment: Some(CurveIndex(fragments.len() - 1)),
                            stroke,
                            mid,
                            deltas: deltas.clone(),
                            area_term,
                        });
                    }
                }
            }
        }

        self.edges = edges;
        self.fragments = fragments;
    }

    /// Fold edges joining the same vertices along the same path into one.
    fn merge_coincident_edges(&mut self) -> usize {
        let tol = 4.0 * self.tolerance;
        let mut kept: Vec<Edge> = Vec::with_capacity(self.edges.len());
        let mut by_ends: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        let mut folded = 0;

        for edge in std::mem::take(&mut self.edges) {
            let key = (edge.start.min(edge.end), edge.start.max(edge.end));
            let twin = by_ends
                .get(&key)
                .and_then(|list| list.iter().copied().find(|&k| within(&kept[k].mid, &edge.mid, tol)));

            match twin {
                Some(k) => {
                    let same_direction = if edge.start != edge.end {
                        kept[k].start == edge.start
                    } else {
                        (kept[k].area_term >= 0.0) == (edge.area_term >= 0.0)
                    };
                    let sign = if same_direction { 1 } else { -1 };
                    for (group, d) in edge.deltas {
                        *kept[k].deltas.entry(group).or_insert(0) += sign * d;
                    }
                    folded += 1;
                }
                None => {
                    by_ends.entry(key).or_default().push(kept.len());
                    kept.push(edge);
                }
            }
        }

        self.edges = kept;
        folded
    }

    fn departure(points: &[Point2], tol: f64) -> Vector2 {
        let origin = points[0];
        points[1..]
            .iter()
            .map(|p| p - origin)
            .find(|d| d.norm() > tol)
            .unwrap_or_else(|| points[points.len() - 1] - origin)
    }

    /// Rotational linking: the face successor of a half-edge arriving at a
    /// vertex is the clockwise neighbour of its twin. Bounded faces come out CCW.
    fn link_half_edges(&mut self) {
        let tol = self.tolerance;
        let half_count = self.edges.len() * 2;
        let mut outgoing: Vec<Vec<(f64, usize)>> = vec![Vec::new(); self.vertices.len()];

        for (e, edge) in self.edges.iter().enumerate() {
            let forward = Self::departure(&edge.stroke, tol);
            let back: Vec<Point2> = edge.stroke.iter().rev().copied().collect();
            let backward = Self::departure(&back, tol);
            outgoing[edge.start].push((direction_angle(&forward), 2 * e));
            outgoing[edge.end].push((direction_angle(&backward), 2 * e + 1));
        }

        self.next = vec![0; half_count];
        for out in &mut outgoing {
            out.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            let n = out.len();
            for i in 0..n {
                let incoming = out[i].1 ^ 1;
                self.next[incoming] = out[(i + n - 1) % n].1;
            }
        }

        self.prev = vec![0; half_count];
        for (h, &n) in self.next.iter().enumerate() {
            self.prev[n] = h;
        }
    }

    fn walk_faces(&mut self) {
        let half_count = self.next.len();
        self.face_of = vec![usize::MAX; half_count];
        self.faces.clear();

        for start in 0..half_count {
            if self.face_of[start] != usize::MAX {
                continue;
            }
            let id = self.faces.len();
            let mut half_edges = Vec::new();
            let mut h = start;
            loop {
                self.face_of[h] = id;
                half_edges.push(h);
                h = self.next[h];
                if h == start || self.face_of[h] != usize::MAX || half_edges.len() > half_count {
                    break;
                }
            }
            let area: f64 = half_edges.iter().map(|&h| self.half_edge_area(h)).sum();
            let polygon = self.chain_polygon(&half_edges);
            let range = Aabb2::from_points(&polygon);
            trace!(face = id, edges = half_edges.len(), area, "face walked");
            self.faces.push(Face { half_edges, area, range, polygon });
        }
    }
}

impl MergeService for PlanarGraph {
    fn load_polyline(&mut self, points: &[Point2], parent: ParentCurveId, group: GroupId) {
        let mut samples: Vec<Point2> = Vec::with_capacity(points.len());
        for p in points {
            if samples.last() != Some(p) {
                samples.push(*p);
            }
        }
        if samples.len() < 2 {
            return;
        }
        let params: Vec<f64> = (0..samples.len()).map(|i| i as f64).collect();
        self.register(Carrier {
            parent,
            group,
            shape: CarrierShape::Polyline,
            splits: params.clone(),
            samples,
            params,
            pins: Vec::new(),
        });
    }

    fn load_elliptical_arc(&mut self, arc: &EllipticalArc, parent: ParentCurveId, group: GroupId) {
        self.load_curve(CurvePrimitive::EllipticalArc(arc.clone()), parent, group);
    }

    fn load_free_form_curve(&mut self, curve: &BsplineCurve, parent: ParentCurveId, group: GroupId) {
        self.load_curve(CurvePrimitive::FreeForm(curve.clone()), parent, group);
    }

    fn merge(&mut self, gap_tolerance: f64) {
        self.reset_merge();
        self.tolerance = gap_tolerance.max(0.0);

        let crossings = self.insert_crossings();
        self.normalize_splits();
        let vertex_of = self.snap_vertices();
        self.build_edges(&vertex_of);
        let folded = self.merge_coincident_edges();
        self.link_half_edges();
        self.walk_faces();
        self.merged = true;

        debug!(
            carriers = self.carriers.len(),
            crossings,
            folded,
            vertices = self.vertices.len(),
            edges = self.edges.len(),
            faces = self.faces.len(),
            "planar merge complete"
        );
    }

    fn build_face_search_structures(&mut self) -> bool {
        if !self.merged || self.edges.is_empty() {
            self.search = None;
            return false;
        }
        self.search = Some(SearchStructures::build(self));
        true
    }

    fn collect_boolean_faces(&self, op: BooleanOp, boundary: GroupId) -> MarkedFaceSet {
        self.select_faces(|windings| op.select(windings, boundary.index()))
    }

    fn collect_analysis_faces(&self, area: AreaSelect, boolean: BoolSelect, reverse: bool) -> MarkedFaceSet {
        self.select_faces(|windings| boolean.select(area, windings) != reverse)
    }

    fn collect_and_number_extended_face_loops(&self, faces: &MarkedFaceSet) -> Vec<FaceLoopToken> {
        self.extended_face_loops(faces)
    }

    fn edge_geometry(&self, node: NodeId) -> Option<EdgeGeometry> {
        let edge = self.edges.get(node.0 / 2)?;
        let reversed = node.0 % 2 == 1;
        Some(match edge.fragment {
            Some(curve) => EdgeGeometry::Curve { curve, reversed },
            None => {
                let (a, b) = (self.vertices[edge.start], self.vertices[edge.end]);
                if reversed {
                    EdgeGeometry::Segment { start: b, end: a }
                } else {
                    EdgeGeometry::Segment { start: a, end: b }
                }
            }
        })
    }

    fn parent_curve_index(&self, node: NodeId) -> Option<ParentCurveId> {
        self.edges.get(node.0 / 2).map(|e| e.parent)
    }

    fn curve_fragment(&self, curve: CurveIndex) -> Option<CurvePrimitive> {
        self.fragments.get(curve.0).cloned()
    }

    fn face_successor(&self, node: NodeId) -> Option<NodeId> {
        self.next.get(node.0).map(|n| NodeId(*n))
    }

    fn face_predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.prev.get(node.0).map(|p| NodeId(*p))
    }

    fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            carriers: self.carriers.len(),
            vertices: self.vertices.len(),
            edges: self.edges.len(),
            faces: self.faces.len(),
            components: self.search.as_ref().map_or(0, |s| s.component_count()),
        }
    }
}

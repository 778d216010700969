use super::*;
use crate::curves::{BsplineCurve, CurvePrimitive, EllipticalArc};
use crate::geometry::Point2;
use crate::graph::{EdgeGeometry, FaceLoopToken, MarkedFaceSet, NodeId};
use crate::region::{BoundaryType, CurveLoop, ParityRegion, UnionRegion};
use std::sync::Arc;

/// Records loads and never produces faces.
#[derive(Default)]
struct RecordingService {
    loads: Vec<(&'static str, ParentCurveId, GroupId)>,
    merged_with: Option<f64>,
}

impl MergeService for RecordingService {
    fn load_polyline(&mut self, _points: &[Point2], parent: ParentCurveId, group: GroupId) {
        self.loads.push(("polyline", parent, group));
    }

    fn load_elliptical_arc(&mut self, _arc: &EllipticalArc, parent: ParentCurveId, group: GroupId) {
        self.loads.push(("arc", parent, group));
    }

    fn load_free_form_curve(&mut self, _curve: &BsplineCurve, parent: ParentCurveId, group: GroupId) {
        self.loads.push(("free_form", parent, group));
    }

    fn merge(&mut self, gap_tolerance: f64) {
        self.merged_with = Some(gap_tolerance);
    }

    fn build_face_search_structures(&mut self) -> bool {
        false
    }

    fn collect_boolean_faces(&self, _op: BooleanOp, _boundary: GroupId) -> MarkedFaceSet {
        MarkedFaceSet::default()
    }

    fn collect_analysis_faces(&self, _area: AreaSelect, _boolean: BoolSelect, _reverse: bool) -> MarkedFaceSet {
        MarkedFaceSet::default()
    }

    fn collect_and_number_extended_face_loops(&self, _faces: &MarkedFaceSet) -> Vec<FaceLoopToken> {
        Vec::new()
    }

    fn edge_geometry(&self, _node: NodeId) -> Option<EdgeGeometry> {
        None
    }

    fn parent_curve_index(&self, _node: NodeId) -> Option<ParentCurveId> {
        None
    }

    fn curve_fragment(&self, _curve: CurveIndex) -> Option<crate::curves::CurvePrimitive> {
        None
    }

    fn face_successor(&self, _node: NodeId) -> Option<NodeId> {
        None
    }

    fn face_predecessor(&self, _node: NodeId) -> Option<NodeId> {
        None
    }

    fn statistics(&self) -> GraphStatistics {
        GraphStatistics::default()
    }
}

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn square(x: f64, y: f64, size: f64) -> Region {
    Region::rectangle(x, y, x + size, y + size)
}

#[test]
fn test_loader_group_policy() {
    let region = Region::Union(UnionRegion::new(vec![
        square(0.0, 0.0, 1.0),
        Region::Parity(ParityRegion::with_holes(
            CurveLoop::rectangle(5.0, 0.0, 9.0, 4.0),
            vec![CurveLoop::rectangle(6.0, 1.0, 7.0, 2.0)],
        )),
        Region::circle(p(20.0, 0.0), 1.0),
    ]));

    let mut service = RecordingService::default();
    let mut table = CurveTable::new();
    let end = CurveLoader::new(&mut service, &mut table, &BooleanConfig::default())
        .load(&region, GroupId(0), true)
        .unwrap();

    assert_eq!(end, GroupId(3));
    assert_eq!(table.len(), 4);
    let groups: Vec<u32> = service.loads.iter().map(|(_, _, g)| g.0).collect();
    assert_eq!(groups, vec![0, 1, 1, 2]);
    let parents: Vec<usize> = service.loads.iter().map(|(_, id, _)| id.0).collect();
    assert_eq!(parents, vec![0, 1, 2, 3]);
    assert_eq!(service.loads[3].0, "arc");
}

#[test]
fn test_loader_keeps_group_for_unadvanced_loop() {
    let mut service = RecordingService::default();
    let mut table = CurveTable::new();
    let mut loader = CurveLoader::new(&mut service, &mut table, &BooleanConfig::default());
    assert_eq!(loader.load(&square(0.0, 0.0, 1.0), GroupId(4), false).unwrap(), GroupId(4));
    assert_eq!(loader.load(&square(0.0, 0.0, 1.0), GroupId(4), true).unwrap(), GroupId(5));
}

#[test]
fn test_loader_skips_open_and_short_loops() {
    let open_chain = CurveLoop::outer(vec![
        CurvePrimitive::line_segment(p(0.0, 0.0), p(1.0, 0.0)).into_ptr(),
        CurvePrimitive::line_segment(p(1.0, 0.0), p(1.0, 1.0)).into_ptr(),
    ]);
    let marked_open = CurveLoop::rectangle(0.0, 0.0, 1.0, 1.0).with_boundary(BoundaryType::Open);
    let region = Region::Union(UnionRegion::new(vec![open_chain.into(), marked_open.into()]));

    let mut service = RecordingService::default();
    let mut table = CurveTable::new();
    let end = CurveLoader::new(&mut service, &mut table, &BooleanConfig::default())
        .load(&region, GroupId(0), true)
        .unwrap();

    assert_eq!(end, GroupId(0));
    assert!(table.is_empty());
    assert!(service.loads.is_empty());
}

#[test]
fn test_loader_rejects_deep_nesting() {
    let mut region = square(0.0, 0.0, 1.0);
    for _ in 0..4 {
        region = Region::Union(UnionRegion::new(vec![region]));
    }

    let config = BooleanConfig::default().with_max_nesting_depth(2);
    let mut service = RecordingService::default();
    let mut table = CurveTable::new();
    let err = CurveLoader::new(&mut service, &mut table, &config)
        .load(&region, GroupId(0), true)
        .unwrap_err();
    assert_eq!(err, RegionOpError::NestingTooDeep { depth: 3, limit: 2 });
}

#[test]
fn test_unbuildable_service_gives_no_result() {
    let mut service = RecordingService::default();
    let mut events = Vec::new();
    let mut record = |d: &Diagnostic| events.push(d.clone());
    let config = BooleanConfig::default().with_gap_tolerance(1e-6);

    let result = AreaBoolean::new(config)
        .with_diagnostics(&mut record)
        .run_on(
            &mut service,
            Operation::Boolean { op: BooleanOp::Union, a: &square(0.0, 0.0, 1.0), b: &square(2.0, 0.0, 1.0) },
            None,
        )
        .unwrap();

    assert!(result.is_none());
    assert_eq!(service.merged_with, Some(1e-6));
    assert_eq!(events[0], Diagnostic::Loaded { curves: 2, groups: 2 });
    assert!(events.contains(&Diagnostic::FacesSelected { selected: 0 }));
}

#[test]
fn test_curve_table_lookup() {
    let mut table = CurveTable::new();
    let seg = CurvePrimitive::line_segment(p(0.0, 0.0), p(1.0, 0.0)).into_ptr();
    let id = table.add(seg.clone());
    assert!(Arc::ptr_eq(table.lookup(id).unwrap(), &seg));
    assert_eq!(
        table.lookup(ParentCurveId(9)).unwrap_err(),
        RegionOpError::UnknownParentCurve(ParentCurveId(9))
    );
}

#[test]
fn test_extractor_coalescing_policy() {
    let square = Region::Loop(CurveLoop::from_segments(&[p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)]));
    let config = BooleanConfig::default();

    for track in [false, true] {
        let mut graph = PlanarGraph::new(config.stroke);
        let mut table = CurveTable::new();
        CurveLoader::new(&mut graph, &mut table, &config).load(&square, GroupId(0), true).unwrap();
        let selection = FaceSelection::Analysis {
            area: AreaSelect::Parity,
            boolean: BoolSelect::Union,
            reverse: false,
        };
        let marked = classify_and_select(&mut graph, selection, config.gap_tolerance);
        assert_eq!(marked.count(), 1);

        let start = graph
            .collect_and_number_extended_face_loops(&marked)
            .into_iter()
            .find_map(|t| match t {
                FaceLoopToken::Node(node) => Some(node),
                _ => None,
            })
            .unwrap();

        let mut extractor = LoopExtractor::new(&graph, &table, config.gap_tolerance, track);
        let primitives = extractor.extract_face(start, false).unwrap();
        if track {
            assert_eq!(primitives.len(), 4);
            assert_eq!(extractor.provenance().len(), 4);
        } else {
            assert_eq!(primitives.len(), 1);
            assert!(extractor.provenance().is_empty());
        }

        // Walking the same face backwards flips orientation
        let backwards = extractor.extract_face(start, true).unwrap();
        let forward_area: f64 = primitives.iter().map(|c| c.area_contribution(&config.stroke)).sum();
        let backward_area: f64 = backwards.iter().map(|c| c.area_contribution(&config.stroke)).sum();
        assert!((forward_area - 4.0).abs() < 1e-12);
        assert!((backward_area + 4.0).abs() < 1e-12);
    }
}

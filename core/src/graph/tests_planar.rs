use super::*;
use crate::curves::StrokeOptions;
use std::f64::consts::PI;

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2> {
    vec![
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
        Point2::new(x0, y0),
    ]
}

fn merged(loops: &[(Vec<Point2>, u32)]) -> PlanarGraph {
    let mut graph = PlanarGraph::new(StrokeOptions::default());
    for (i, (points, group)) in loops.iter().enumerate() {
        graph.load_polyline(points, ParentCurveId(i), GroupId(*group));
    }
    graph.merge(1e-10);
    assert!(graph.build_face_search_structures());
    graph
}

fn node_count(tokens: &[FaceLoopToken]) -> usize {
    tokens.iter().filter(|t| matches!(t, FaceLoopToken::Node(_))).count()
}

#[test]
fn test_overlapping_squares_topology() {
    let graph = merged(&[(rect(0.0, 0.0, 1.0, 1.0), 0), (rect(0.5, 0.5, 1.5, 1.5), 1)]);
    let stats = graph.statistics();
    assert_eq!(stats.vertices, 10);
    assert_eq!(stats.edges, 12);
    assert_eq!(stats.faces, 4);
    assert_eq!(stats.components, 1);

    let overlap = (0..graph.face_count())
        .map(FaceId)
        .find(|f| (graph.face_area(*f).unwrap() - 0.25).abs() < 1e-12)
        .expect("overlap face");
    assert_eq!(graph.face_windings(overlap), Some(&[1, 1][..]));
}

#[test]
fn test_boolean_selection_counts() {
    let graph = merged(&[(rect(0.0, 0.0, 1.0, 1.0), 0), (rect(0.5, 0.5, 1.5, 1.5), 1)]);
    let boundary = GroupId(1);
    assert_eq!(graph.collect_boolean_faces(BooleanOp::Intersection, boundary).count(), 1);
    assert_eq!(graph.collect_boolean_faces(BooleanOp::Union, boundary).count(), 3);
    assert_eq!(graph.collect_boolean_faces(BooleanOp::Difference, boundary).count(), 1);
    assert_eq!(graph.collect_boolean_faces(BooleanOp::Parity, boundary).count(), 2);
}

#[test]
fn test_intersection_tokens_form_one_loop() {
    let graph = merged(&[(rect(0.0, 0.0, 1.0, 1.0), 0), (rect(0.5, 0.5, 1.5, 1.5), 1)]);
    let faces = graph.collect_boolean_faces(BooleanOp::Intersection, GroupId(1));
    let tokens = graph.collect_and_number_extended_face_loops(&faces);
    assert_eq!(tokens.first(), Some(&FaceLoopToken::StartComponent));
    assert_eq!(tokens.last(), Some(&FaceLoopToken::EndComponent));
    assert_eq!(node_count(&tokens), 4);
}

#[test]
fn test_parity_splits_into_two_components() {
    let graph = merged(&[(rect(0.0, 0.0, 1.0, 1.0), 0), (rect(0.5, 0.5, 1.5, 1.5), 1)]);
    let faces = graph.collect_boolean_faces(BooleanOp::Parity, GroupId(1));
    let tokens = graph.collect_and_number_extended_face_loops(&faces);
    let components = tokens.iter().filter(|t| **t == FaceLoopToken::StartComponent).count();
    assert_eq!(components, 2);
    assert_eq!(node_count(&tokens), 12);
}

#[test]
fn test_nested_square_becomes_hole() {
    let graph = merged(&[(rect(0.0, 0.0, 4.0, 4.0), 0), (rect(1.0, 1.0, 3.0, 3.0), 1)]);
    assert_eq!(graph.statistics().components, 2);

    let faces = graph.collect_boolean_faces(BooleanOp::Difference, GroupId(1));
    let tokens = graph.collect_and_number_extended_face_loops(&faces);
    let starts = tokens.iter().filter(|t| **t == FaceLoopToken::StartFace).count();
    let components = tokens.iter().filter(|t| **t == FaceLoopToken::StartComponent).count();
    assert_eq!(components, 1);
    assert_eq!(starts, 2);
}

#[test]
fn test_shared_edge_is_folded() {
    let graph = merged(&[(rect(0.0, 0.0, 1.0, 1.0), 0), (rect(1.0, 0.0, 2.0, 1.0), 1)]);
    let stats = graph.statistics();
    assert_eq!(stats.vertices, 6);
    assert_eq!(stats.edges, 7);
    assert_eq!(stats.faces, 3);

    let faces = graph.collect_boolean_faces(BooleanOp::Union, GroupId(1));
    assert_eq!(faces.count(), 2);
    let tokens = graph.collect_and_number_extended_face_loops(&faces);
    assert_eq!(node_count(&tokens), 6);
}

#[test]
fn test_same_group_overlap_has_winding_two() {
    let graph = merged(&[(rect(0.0, 0.0, 2.0, 2.0), 0), (rect(1.0, 1.0, 3.0, 3.0), 0)]);
    let parity = graph.collect_analysis_faces(AreaSelect::Parity, BoolSelect::Union, false);
    let positive = graph.collect_analysis_faces(AreaSelect::CcwPositiveWindingNumber, BoolSelect::Union, false);
    assert_eq!(parity.count(), 2);
    assert_eq!(positive.count(), 3);

    // Reversal never picks up the unbounded exterior
    let reversed = graph.collect_analysis_faces(AreaSelect::Parity, BoolSelect::Union, true);
    assert_eq!(reversed.count(), 1);
}

#[test]
fn test_circle_is_single_self_loop() {
    let mut graph = PlanarGraph::new(StrokeOptions::default());
    graph.load_elliptical_arc(&EllipticalArc::circle(Point2::origin(), 1.0), ParentCurveId(0), GroupId(0));
    graph.merge(1e-10);
    assert!(graph.build_face_search_structures());

    let stats = graph.statistics();
    assert_eq!(stats.vertices, 1);
    assert_eq!(stats.edges, 1);
    assert_eq!(stats.faces, 2);

    let inside = graph.collect_boolean_faces(BooleanOp::Union, GroupId(1));
    let face = inside.faces().next().expect("disk face");
    assert!((graph.face_area(face).unwrap() - PI).abs() < 1e-12);

    match graph.edge_geometry(NodeId(0)) {
        Some(EdgeGeometry::Curve { curve, reversed }) => {
            assert!(!reversed);
            assert!(matches!(graph.curve_fragment(curve), Some(CurvePrimitive::EllipticalArc(_))));
        }
        other => panic!("expected a curved edge, got {:?}", other),
    }
}

#[test]
fn test_line_crossing_circle_between_samples_shares_vertices() {
    let mut graph = PlanarGraph::new(StrokeOptions::default());
    graph.load_elliptical_arc(&EllipticalArc::circle(Point2::origin(), 1.0), ParentCurveId(0), GroupId(0));
    graph.load_polyline(&rect(0.3, -2.0, 2.0, 2.0), ParentCurveId(1), GroupId(1));
    graph.merge(1e-10);
    assert!(graph.build_face_search_structures());

    // Circle seam, four corners and the two crossings
    let stats = graph.statistics();
    assert_eq!(stats.vertices, 7);
    assert_eq!(stats.edges, 9);
    assert_eq!(stats.faces, 4);

    let cap = graph.collect_boolean_faces(BooleanOp::Intersection, GroupId(1));
    assert_eq!(cap.count(), 1);
    let face = cap.faces().next().unwrap();
    let expected = 0.3f64.acos() - 0.3 * (1.0 - 0.09f64).sqrt();
    assert!((graph.face_area(face).unwrap() - expected).abs() < 1e-9);
}

#[test]
fn test_two_circles_meet_at_refined_crossings() {
    let mut graph = PlanarGraph::new(StrokeOptions::default());
    graph.load_elliptical_arc(&EllipticalArc::circle(Point2::origin(), 1.0), ParentCurveId(0), GroupId(0));
    graph.load_elliptical_arc(&EllipticalArc::circle(Point2::new(1.0, 0.0), 1.0), ParentCurveId(1), GroupId(1));
    graph.merge(1e-10);
    assert!(graph.build_face_search_structures());

    let stats = graph.statistics();
    assert_eq!(stats.vertices, 4);
    assert_eq!(stats.edges, 6);
    assert_eq!(stats.faces, 4);

    let lens = graph.collect_boolean_faces(BooleanOp::Intersection, GroupId(1));
    let face = lens.faces().next().expect("lens face");
    let expected = 2.0 * PI / 3.0 - 3.0f64.sqrt() / 2.0;
    assert!((graph.face_area(face).unwrap() - expected).abs() < 1e-9);
}

#[test]
fn test_empty_graph_has_no_search_structures() {
    let mut graph = PlanarGraph::new(StrokeOptions::default());
    graph.merge(1e-10);
    assert!(!graph.build_face_search_structures());
    let faces = graph.collect_boolean_faces(BooleanOp::Union, GroupId(0));
    assert!(faces.is_empty());
    assert!(graph.collect_and_number_extended_face_loops(&faces).is_empty());
}

#[test]
fn test_face_walk_navigation_is_consistent() {
    let graph = merged(&[(rect(0.0, 0.0, 1.0, 1.0), 0)]);
    for h in 0..graph.statistics().edges * 2 {
        let node = NodeId(h);
        let next = graph.face_successor(node).unwrap();
        assert_eq!(graph.face_predecessor(next), Some(node));
        assert_eq!(graph.parent_curve_index(node), Some(ParentCurveId(0)));
    }
}

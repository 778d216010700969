use super::*;
use crate::curves::StrokeOptions;
use std::f64::consts::PI;

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

#[test]
fn test_rectangle_is_closed_ccw() {
    let opts = StrokeOptions::default();
    let rect = CurveLoop::rectangle(0.0, 0.0, 3.0, 2.0);
    assert!(rect.is_closed(1e-12));
    assert!((rect.signed_area(&opts) - 6.0).abs() < 1e-12);
    assert_eq!(rect.stroke_points(&opts).len(), 4);
}

#[test]
fn test_segments_loop_matches_polygon() {
    let opts = StrokeOptions::default();
    let pts = [p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)];
    let segs = CurveLoop::from_segments(&pts);
    assert_eq!(segs.primitives.len(), 4);
    assert!(segs.is_closed(1e-12));
    assert!((segs.area_xy(&opts) - CurveLoop::polygon(&pts).area_xy(&opts)).abs() < 1e-12);
}

#[test]
fn test_open_chain_is_not_closed() {
    let open = CurveLoop::outer(vec![
        CurvePrimitive::line_segment(p(0.0, 0.0), p(1.0, 0.0)).into_ptr(),
        CurvePrimitive::line_segment(p(1.0, 0.0), p(1.0, 1.0)).into_ptr(),
    ]);
    assert!(!open.is_closed(1e-10));
    assert!(!CurveLoop::outer(Vec::new()).is_closed(1e-10));
}

#[test]
fn test_parity_area_and_membership() {
    let opts = StrokeOptions::default();
    let region = Region::Parity(ParityRegion::with_holes(
        CurveLoop::rectangle(0.0, 0.0, 4.0, 4.0),
        vec![CurveLoop::rectangle(1.0, 1.0, 3.0, 3.0)],
    ));
    assert!((region.area_xy(&opts) - 12.0).abs() < 1e-12);
    assert!(region.contains_point(&p(0.5, 0.5), &opts));
    assert!(!region.contains_point(&p(2.0, 2.0), &opts));
    assert!(!region.contains_point(&p(5.0, 2.0), &opts));

    let parity = region.as_parity().unwrap();
    assert_eq!(parity.holes().len(), 1);
    assert_eq!(parity.holes()[0].boundary, BoundaryType::Inner);
}

#[test]
fn test_union_centroid_is_area_weighted() {
    let opts = StrokeOptions::default();
    let region = Region::Union(UnionRegion::new(vec![
        Region::rectangle(0.0, 0.0, 1.0, 1.0),
        Region::rectangle(2.0, 0.0, 5.0, 1.0),
    ]));
    let (c, a) = region.centroid_area_xy(&opts).unwrap();
    assert!((a - 4.0).abs() < 1e-12);
    // (0.5 * 1 + 3.5 * 3) / 4
    assert!((c.x - 2.75).abs() < 1e-12);
    assert!((c.y - 0.5).abs() < 1e-12);
    assert_eq!(region.loops().len(), 2);
}

#[test]
fn test_circle_area_is_exact() {
    let opts = StrokeOptions::default();
    let disk = Region::circle(p(1.0, 1.0), 3.0);
    assert!((disk.area_xy(&opts) - 9.0 * PI).abs() < 1e-9);
    assert!(disk.contains_point(&p(1.0, 3.5), &opts));
}

#[test]
fn test_region_json_round_trip() {
    let region = Region::Parity(ParityRegion::with_holes(
        CurveLoop::rectangle(0.0, 0.0, 4.0, 4.0),
        vec![CurveLoop::from_segments(&[p(1.0, 1.0), p(1.0, 3.0), p(3.0, 3.0)])],
    ));
    let json = serde_json::to_string(&region).unwrap();
    let back: Region = serde_json::from_str(&json).unwrap();
    assert_eq!(back, region);
}

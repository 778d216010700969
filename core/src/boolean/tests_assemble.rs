use super::*;
use crate::curves::CurvePrimitive;
use crate::geometry::Point2;
use crate::graph::{FaceLoopToken as T, NodeId};
use crate::region::BoundaryType;

/// Turns node `n` into a unit segment along y = n so loops are easy to tell apart.
#[derive(Default)]
struct SegmentSink {
    loops_started: usize,
    current: Vec<CurvePrimitivePtr>,
}

impl FaceLoopSink for SegmentSink {
    fn begin_loop(&mut self) {
        self.loops_started += 1;
        self.current.clear();
    }

    fn push_node(&mut self, node: NodeId) -> Result<(), AssemblyError> {
        match node.0 {
            404 => Err(AssemblyError::InvalidNode(node)),
            500 => Err(RegionOpError::UnknownCurveFragment(CurveIndex(7)).into()),
            n => {
                let y = n as f64;
                self.current
                    .push(CurvePrimitive::line_segment(Point2::new(0.0, y), Point2::new(1.0, y)).into_ptr());
                Ok(())
            }
        }
    }

    fn finish_loop(&mut self) -> Result<Vec<CurvePrimitivePtr>, AssemblyError> {
        Ok(std::mem::take(&mut self.current))
    }
}

fn face(nodes: &[usize]) -> Vec<T> {
    let mut out = vec![T::StartFace];
    out.extend(nodes.iter().map(|n| T::Node(NodeId(*n))));
    out.push(T::EndFace);
    out
}

fn component(faces: &[&[usize]]) -> Vec<T> {
    let mut out = vec![T::StartComponent];
    for f in faces {
        out.extend(face(f));
    }
    out.push(T::EndComponent);
    out
}

#[test]
fn test_single_face_stays_bare_loop() {
    let mut sink = SegmentSink::default();
    let region = assemble(component(&[&[0, 1, 2]]), &mut sink).unwrap().unwrap();
    let curve_loop = region.as_loop().expect("bare loop");
    assert_eq!(curve_loop.boundary, BoundaryType::Outer);
    assert_eq!(curve_loop.primitives.len(), 3);
    assert_eq!(sink.loops_started, 1);
}

#[test]
fn test_multiple_faces_become_parity_region() {
    let mut sink = SegmentSink::default();
    let region = assemble(component(&[&[0, 1, 2], &[10, 11], &[20]]), &mut sink).unwrap().unwrap();
    let parity = region.as_parity().expect("parity region");
    assert_eq!(parity.loops.len(), 3);
    assert_eq!(parity.loops[0].boundary, BoundaryType::Outer);
    assert!(parity.holes().iter().all(|h| h.boundary == BoundaryType::Inner));
    assert_eq!(parity.loops[1].primitives.len(), 2);
}

#[test]
fn test_second_component_wraps_in_union() {
    let mut tokens = component(&[&[0, 1]]);
    tokens.extend(component(&[&[5, 6], &[7]]));
    tokens.extend(component(&[&[9]]));

    let mut sink = SegmentSink::default();
    let region = assemble(tokens, &mut sink).unwrap().unwrap();
    let union = region.as_union().expect("union region");
    assert_eq!(union.children.len(), 3);
    assert!(union.children[0].as_loop().is_some());
    assert!(union.children[1].as_parity().is_some());
    assert!(union.children[2].as_loop().is_some());
    assert!(union.children.iter().all(|c| c.as_union().is_none()));
}

#[test]
fn test_empty_stream_and_empty_faces_give_nothing() {
    let mut sink = SegmentSink::default();
    assert_eq!(assemble(Vec::<T>::new(), &mut sink).unwrap(), None);
    assert_eq!(assemble(component(&[&[]]), &mut sink).unwrap(), None);

    // An empty hole face is dropped rather than producing an empty loop
    let region = assemble(component(&[&[1, 2], &[]]), &mut sink).unwrap().unwrap();
    assert!(region.as_loop().is_some());
}

#[test]
fn test_truncated_stream_is_malformed() {
    let mut sink = SegmentSink::default();
    let mut tokens = component(&[&[0, 1]]);
    tokens.pop();
    let err = assemble(tokens, &mut sink).unwrap_err();
    assert_eq!(err, AssemblyError::UnexpectedEnd("component"));
    assert!(err.is_malformed_input());

    let err = assemble(vec![T::StartComponent, T::StartFace, T::Node(NodeId(0))], &mut sink).unwrap_err();
    assert_eq!(err, AssemblyError::UnexpectedEnd("face"));
}

#[test]
fn test_misplaced_sentinels_are_rejected() {
    let mut sink = SegmentSink::default();
    let err = assemble(vec![T::Node(NodeId(3))], &mut sink).unwrap_err();
    assert!(matches!(err, AssemblyError::UnexpectedToken { found: T::Node(_), .. }));

    let err = assemble(vec![T::StartComponent, T::Node(NodeId(3))], &mut sink).unwrap_err();
    assert!(matches!(err, AssemblyError::UnexpectedToken { .. }));

    let err = assemble(vec![T::StartComponent, T::StartFace, T::StartComponent], &mut sink).unwrap_err();
    assert!(matches!(err, AssemblyError::UnexpectedToken { found: T::StartComponent, .. }));
}

#[test]
fn test_sink_errors_propagate() {
    let mut sink = SegmentSink::default();
    let err = assemble(component(&[&[1, 404]]), &mut sink).unwrap_err();
    assert_eq!(err, AssemblyError::InvalidNode(NodeId(404)));
    assert!(err.is_malformed_input());

    let err = assemble(component(&[&[500]]), &mut sink).unwrap_err();
    assert_eq!(err, AssemblyError::Contract(RegionOpError::UnknownCurveFragment(CurveIndex(7))));
    assert!(!err.is_malformed_input());
}

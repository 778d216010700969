//! Extended face loops: boundaries of the union of marked faces.

use super::planar::PlanarGraph;
use super::{FaceId, FaceLoopToken, MarkedFaceSet, NodeId};
use crate::geometry::{utils_2d, Aabb2, Point2};
use tracing::{debug, warn};

struct BoundaryLoop {
    half_edges: Vec<usize>,
    area: f64,
    polygon: Vec<Point2>,
    range: Aabb2,
}

impl PlanarGraph {
    /// Marked face on the left, unmarked face on the right.
    fn is_boundary(&self, marked: &MarkedFaceSet, h: usize) -> bool {
        marked.contains(FaceId(self.face_of[h])) && !marked.contains(FaceId(self.face_of[h ^ 1]))
    }

    /// Next boundary half-edge after `h`, rotating through marked faces at the shared vertex.
    fn next_boundary(&self, marked: &MarkedFaceSet, h: usize) -> usize {
        let mut n = self.next[h];
        for _ in 0..self.next.len() {
            if self.is_boundary(marked, n) {
                break;
            }
            n = self.next[n ^ 1];
        }
        n
    }

    fn trace_boundary(&self, marked: &MarkedFaceSet, start: usize, visited: &mut [bool]) -> BoundaryLoop {
        let mut half_edges = Vec::new();
        let mut h = start;
        loop {
            visited[h] = true;
            half_edges.push(h);
            h = self.next_boundary(marked, h);
            if h == start || visited[h] {
                break;
            }
        }
        let area = half_edges.iter().map(|&h| self.half_edge_area(h)).sum();
        let polygon = self.chain_polygon(&half_edges);
        let range = Aabb2::from_points(&polygon);
        BoundaryLoop { half_edges, area, polygon, range }
    }

    pub(super) fn extended_face_loops(&self, marked: &MarkedFaceSet) -> Vec<FaceLoopToken> {
        if self.search.is_none() || marked.is_empty() {
            return Vec::new();
        }

        let mut visited = vec![false; self.next.len()];
        let mut outers: Vec<BoundaryLoop> = Vec::new();
        let mut holes: Vec<BoundaryLoop> = Vec::new();
        for h in 0..self.next.len() {
            if visited[h] || !self.is_boundary(marked, h) {
                continue;
            }
            let boundary = self.trace_boundary(marked, h, &mut visited);
            if boundary.area > 0.0 {
                outers.push(boundary);
            } else {
                holes.push(boundary);
            }
        }

        // Each hole goes to the smallest outer containing its first edge midpoint
        let mut holes_of: Vec<Vec<usize>> = vec![Vec::new(); outers.len()];
        for (i, hole) in holes.iter().enumerate() {
            let inside = self.edges[hole.half_edges[0] / 2].mid;
            let owner = outers
                .iter()
                .enumerate()
                .filter(|(_, o)| o.range.contains(&inside))
                .filter(|(_, o)| utils_2d::winding_number(&inside, &o.polygon) != 0)
                .min_by(|a, b| a.1.area.total_cmp(&b.1.area))
                .map(|(o, _)| o);
            match owner {
                Some(o) => holes_of[o].push(i),
                None => warn!(area = hole.area, "dropping hole loop with no enclosing outer loop"),
            }
        }

        let mut tokens = Vec::new();
        for (o, outer) in outers.iter().enumerate() {
            tokens.push(FaceLoopToken::StartComponent);
            push_loop(&mut tokens, &outer.half_edges);
            for &i in &holes_of[o] {
                push_loop(&mut tokens, &holes[i].half_edges);
            }
            tokens.push(FaceLoopToken::EndComponent);
        }

        debug!(outers = outers.len(), holes = holes.len(), tokens = tokens.len(), "extended face loops collected");
        tokens
    }
}

fn push_loop(tokens: &mut Vec<FaceLoopToken>, half_edges: &[usize]) {
    tokens.push(FaceLoopToken::StartFace);
    tokens.extend(half_edges.iter().map(|&h| FaceLoopToken::Node(NodeId(h))));
    tokens.push(FaceLoopToken::EndFace);
}

//! Face search structures: components, hole association and coverage.

use super::planar::{PlanarGraph, UnionFind};
use super::MarkedFaceSet;
use crate::geometry::utils_2d;
use std::collections::VecDeque;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub(super) struct Component {
    pub(super) faces: Vec<usize>,
    /// Face with the most negative area, bounding the component from outside.
    pub(super) exterior: usize,
    /// Smallest bounded face of another component that encloses this one.
    pub(super) container: Option<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct SearchStructures {
    pub(super) components: Vec<Component>,
    /// Per face, per group winding number.
    pub(super) windings: Vec<Vec<i32>>,
    /// Faces that may be selected: bounded area, not the unbounded exterior.
    pub(super) selectable: Vec<bool>,
}

impl SearchStructures {
    pub(super) fn build(graph: &PlanarGraph) -> Self {
        let mut components = find_components(graph);
        associate_holes(graph, &mut components);
        let windings = propagate_windings(graph, &components);

        let min_area = (graph.tolerance * graph.tolerance).max(f64::MIN_POSITIVE);
        let mut selectable: Vec<bool> = graph.faces.iter().map(|f| f.area.abs() > min_area).collect();
        for c in &components {
            if c.container.is_none() {
                selectable[c.exterior] = false;
            }
        }

        debug!(
            components = components.len(),
            nested = components.iter().filter(|c| c.container.is_some()).count(),
            "face search structures built"
        );
        Self { components, windings, selectable }
    }

    pub(super) fn component_count(&self) -> usize {
        self.components.len()
    }
}

fn find_components(graph: &PlanarGraph) -> Vec<Component> {
    let mut sets = UnionFind::new(graph.vertices.len());
    for e in &graph.edges {
        sets.union(e.start, e.end);
    }

    let mut index_of_root = std::collections::HashMap::new();
    let mut components: Vec<Component> = Vec::new();
    for (f, face) in graph.faces.iter().enumerate() {
        let Some(&h) = face.half_edges.first() else {
            continue;
        };
        let root = sets.find(graph.half_edge_start(h));
        let c = *index_of_root.entry(root).or_insert_with(|| {
            components.push(Component { faces: Vec::new(), exterior: f, container: None });
            components.len() - 1
        });
        components[c].faces.push(f);
        if face.area < graph.faces[components[c].exterior].area {
            components[c].exterior = f;
        }
    }
    components
}

/// Attach each component to the smallest bounded face of another component
/// that contains one of its vertices.
fn associate_holes(graph: &PlanarGraph, components: &mut [Component]) {
    let owner: Vec<usize> = {
        let mut owner = vec![usize::MAX; graph.faces.len()];
        for (c, comp) in components.iter().enumerate() {
            for &f in &comp.faces {
                owner[f] = c;
            }
        }
        owner
    };

    for c in 0..components.len() {
        let exterior = &graph.faces[components[c].exterior];
        let Some(&h) = exterior.half_edges.first() else {
            continue;
        };
        let inside = graph.vertices[graph.half_edge_start(h)];

        let container = graph
            .faces
            .iter()
            .enumerate()
            .filter(|(f, face)| owner[*f] != c && face.area > 0.0 && face.range.contains(&inside))
            .filter(|(_, face)| utils_2d::winding_number(&inside, &face.polygon) != 0)
            .min_by(|a, b| a.1.area.total_cmp(&b.1.area))
            .map(|(f, _)| f);

        if let Some(f) = container {
            trace!(component = c, container = f, "component nested in face");
        }
        components[c].container = container;
    }
}

/// Winding numbers across every face, outermost components first. A
/// component's exterior inherits its container's windings.
fn propagate_windings(graph: &PlanarGraph, components: &[Component]) -> Vec<Vec<i32>> {
    let groups = graph.group_count();
    let mut windings: Vec<Option<Vec<i32>>> = vec![None; graph.faces.len()];

    let mut order: Vec<usize> = (0..components.len()).collect();
    order.sort_by(|a, b| {
        let area = |c: &usize| graph.faces[components[*c].exterior].area.abs();
        area(b).total_cmp(&area(a))
    });

    for c in order {
        let comp = &components[c];
        let seed = comp
            .container
            .and_then(|f| windings[f].clone())
            .unwrap_or_else(|| vec![0; groups]);
        windings[comp.exterior] = Some(seed);

        let mut queue = VecDeque::from([comp.exterior]);
        while let Some(f) = queue.pop_front() {
            let Some(current) = windings[f].clone() else {
                continue;
            };
            for &h in &graph.faces[f].half_edges {
                let other = graph.face_of[h ^ 1];
                if windings[other].is_some() {
                    continue;
                }
                // Left of h is f; the twin face lies on its right
                let w: Vec<i32> = (0..groups).map(|g| current[g] - graph.half_edge_delta(h, g)).collect();
                windings[other] = Some(w);
                queue.push_back(other);
            }
        }
    }

    windings.into_iter().map(|w| w.unwrap_or_else(|| vec![0; groups])).collect()
}

impl PlanarGraph {
    pub(super) fn select_faces(&self, predicate: impl Fn(&[i32]) -> bool) -> MarkedFaceSet {
        let mut marked = MarkedFaceSet::new(self.faces.len());
        let Some(search) = &self.search else {
            return marked;
        };
        for f in 0..self.faces.len() {
            if search.selectable[f] && predicate(&search.windings[f]) {
                marked.mark(super::FaceId(f));
            }
        }
        debug!(selected = marked.count(), faces = self.faces.len(), "faces selected");
        marked
    }
}

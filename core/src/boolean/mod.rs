//! Area Booleans and winding analysis over planar regions.
//!
//! Every operation runs the same pipeline on a fresh merge service:
//! load the operands, merge and select faces, then walk the selected
//! boundaries back into a [`Region`]. Degenerate geometry yields `Ok(None)`.

pub mod assemble;
pub mod classify;
pub mod extract;
pub mod loader;

#[cfg(test)]
mod tests_assemble;
#[cfg(test)]
mod tests_boolean;

pub use assemble::{assemble, AssemblyError};
pub use classify::{classify_and_select, FaceSelection};
pub use extract::{FaceLoopSink, LoopExtractor};
pub use loader::{CurveLoader, CurveTable};

use crate::curves::{CurvePrimitivePtr, StrokeOptions};
use crate::graph::{
    AreaSelect, BoolSelect, BooleanOp, CurveIndex, GraphStatistics, GroupId, MergeService, ParentCurveId,
    PlanarGraph,
};
use crate::region::Region;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, debug_span, warn};

/// Errors that can occur during region operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegionOpError {
    #[error("Region nesting depth {depth} exceeds limit {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    #[error("Merge service has no curve fragment {0:?}")]
    UnknownCurveFragment(CurveIndex),

    #[error("Parent curve {0:?} is not in the curve table")]
    UnknownParentCurve(ParentCurveId),
}

/// Result type for region operations.
pub type RegionResult<T> = Result<T, RegionOpError>;

/// Tuning for region operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BooleanConfig {
    /// Absolute vertex snapping distance. Inputs far from unit scale should be pre-scaled.
    pub gap_tolerance: f64,
    /// Deepest union nesting accepted on input.
    pub max_nesting_depth: usize,
    #[serde(default)]
    pub stroke: StrokeOptions,
}

impl Default for BooleanConfig {
    fn default() -> Self {
        Self {
            gap_tolerance: 1e-10,
            max_nesting_depth: 32,
            stroke: StrokeOptions::default(),
        }
    }
}

impl BooleanConfig {
    pub fn with_gap_tolerance(mut self, tolerance: f64) -> Self {
        self.gap_tolerance = tolerance;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeOptions) -> Self {
        self.stroke = stroke;
        self
    }
}

/// An output primitive and the input primitive it was cut from.
#[derive(Debug, Clone)]
pub struct CurvePair {
    pub new: CurvePrimitivePtr,
    pub old: CurvePrimitivePtr,
}

/// Progress events reported to an optional callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    Loaded { curves: usize, groups: u32 },
    Merged(GraphStatistics),
    FacesSelected { selected: usize },
    AssemblyAborted { reason: String },
}

/// One request to the pipeline.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'r> {
    Boolean { op: BooleanOp, a: &'r Region, b: &'r Region },
    Analysis { region: &'r Region, area: AreaSelect, boolean: BoolSelect, reverse: bool },
}

/// Configured entry point for region operations.
#[derive(Default)]
pub struct AreaBoolean<'d> {
    config: BooleanConfig,
    diagnostics: Option<&'d mut dyn FnMut(&Diagnostic)>,
}

impl<'d> AreaBoolean<'d> {
    pub fn new(config: BooleanConfig) -> Self {
        Self { config, diagnostics: None }
    }

    pub fn with_diagnostics(mut self, sink: &'d mut dyn FnMut(&Diagnostic)) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    pub fn config(&self) -> &BooleanConfig {
        &self.config
    }

    pub fn intersection(
        &mut self,
        a: &Region,
        b: &Region,
        provenance: Option<&mut Vec<CurvePair>>,
    ) -> RegionResult<Option<Region>> {
        self.run(Operation::Boolean { op: BooleanOp::Intersection, a, b }, provenance)
    }

    pub fn union(
        &mut self,
        a: &Region,
        b: &Region,
        provenance: Option<&mut Vec<CurvePair>>,
    ) -> RegionResult<Option<Region>> {
        self.run(Operation::Boolean { op: BooleanOp::Union, a, b }, provenance)
    }

    /// `a` minus `b`.
    pub fn difference(
        &mut self,
        a: &Region,
        b: &Region,
        provenance: Option<&mut Vec<CurvePair>>,
    ) -> RegionResult<Option<Region>> {
        self.run(Operation::Boolean { op: BooleanOp::Difference, a, b }, provenance)
    }

    pub fn parity(
        &mut self,
        a: &Region,
        b: &Region,
        provenance: Option<&mut Vec<CurvePair>>,
    ) -> RegionResult<Option<Region>> {
        self.run(Operation::Boolean { op: BooleanOp::Parity, a, b }, provenance)
    }

    /// Clean outer-CCW / holes-CW structure from overlapping or inconsistently wound loops.
    pub fn reduce_to_ccw_areas(
        &mut self,
        region: &Region,
        provenance: Option<&mut Vec<CurvePair>>,
    ) -> RegionResult<Option<Region>> {
        self.area_analysis(region, AreaSelect::Parity, BoolSelect::Union, false, provenance)
    }

    pub fn area_analysis(
        &mut self,
        region: &Region,
        area: AreaSelect,
        boolean: BoolSelect,
        reverse: bool,
        provenance: Option<&mut Vec<CurvePair>>,
    ) -> RegionResult<Option<Region>> {
        self.run(Operation::Analysis { region, area, boolean, reverse }, provenance)
    }

    /// Run on a fresh [`PlanarGraph`].
    pub fn run(
        &mut self,
        operation: Operation<'_>,
        provenance: Option<&mut Vec<CurvePair>>,
    ) -> RegionResult<Option<Region>> {
        let mut graph = PlanarGraph::new(self.config.stroke);
        self.run_on(&mut graph, operation, provenance)
    }

    /// Run against a caller-supplied merge service, which should be empty.
    pub fn run_on<G: MergeService + ?Sized>(
        &mut self,
        graph: &mut G,
        operation: Operation<'_>,
        provenance: Option<&mut Vec<CurvePair>>,
    ) -> RegionResult<Option<Region>> {
        let span = debug_span!("region_op", ?operation);
        let _guard = span.enter();

        let mut table = CurveTable::new();
        let (selection, groups) = {
            let mut loader = CurveLoader::new(&mut *graph, &mut table, &self.config);
            match operation {
                Operation::Boolean { op, a, b } => {
                    let boundary = loader.load(a, GroupId(0), true)?;
                    let end = loader.load(b, boundary, true)?;
                    (FaceSelection::Boolean { op, boundary }, end)
                }
                Operation::Analysis { region, area, boolean, reverse } => {
                    let end = loader.load(region, GroupId(0), true)?;
                    (FaceSelection::Analysis { area, boolean, reverse }, end)
                }
            }
        };
        self.emit(Diagnostic::Loaded { curves: table.len(), groups: groups.0 });

        let marked = classify_and_select(&mut *graph, selection, self.config.gap_tolerance);
        self.emit(Diagnostic::Merged(graph.statistics()));
        self.emit(Diagnostic::FacesSelected { selected: marked.count() });
        if marked.is_empty() {
            debug!("no faces selected");
            return Ok(None);
        }

        let tokens = graph.collect_and_number_extended_face_loops(&marked);
        let mut extractor = LoopExtractor::new(&*graph, &table, self.config.gap_tolerance, provenance.is_some());
        let region = match assemble(tokens, &mut extractor) {
            Ok(region) => region,
            Err(AssemblyError::Contract(err)) => return Err(err),
            Err(err) => {
                warn!(%err, "aborting region assembly");
                self.emit(Diagnostic::AssemblyAborted { reason: err.to_string() });
                return Ok(None);
            }
        };

        if let Some(list) = provenance {
            list.extend(extractor.into_provenance());
        }
        Ok(region)
    }

    fn emit(&mut self, diagnostic: Diagnostic) {
        if let Some(sink) = self.diagnostics.as_mut() {
            (*sink)(&diagnostic);
        }
    }
}

/// Intersection of two regions with default settings.
pub fn area_intersection(
    a: &Region,
    b: &Region,
    provenance: Option<&mut Vec<CurvePair>>,
) -> RegionResult<Option<Region>> {
    AreaBoolean::default().intersection(a, b, provenance)
}

pub fn area_union(a: &Region, b: &Region, provenance: Option<&mut Vec<CurvePair>>) -> RegionResult<Option<Region>> {
    AreaBoolean::default().union(a, b, provenance)
}

pub fn area_difference(
    a: &Region,
    b: &Region,
    provenance: Option<&mut Vec<CurvePair>>,
) -> RegionResult<Option<Region>> {
    AreaBoolean::default().difference(a, b, provenance)
}

pub fn area_parity(a: &Region, b: &Region, provenance: Option<&mut Vec<CurvePair>>) -> RegionResult<Option<Region>> {
    AreaBoolean::default().parity(a, b, provenance)
}

pub fn reduce_to_ccw_areas(region: &Region, provenance: Option<&mut Vec<CurvePair>>) -> RegionResult<Option<Region>> {
    AreaBoolean::default().reduce_to_ccw_areas(region, provenance)
}

pub fn area_analysis(
    region: &Region,
    area: AreaSelect,
    boolean: BoolSelect,
    reverse: bool,
    provenance: Option<&mut Vec<CurvePair>>,
) -> RegionResult<Option<Region>> {
    AreaBoolean::default().area_analysis(region, area, boolean, reverse, provenance)
}

pub mod boolean;
pub mod curves;
pub mod geometry;
pub mod graph;
pub mod region;

pub use boolean::{
    area_analysis, area_difference, area_intersection, area_parity, area_union, reduce_to_ccw_areas, AreaBoolean,
    BooleanConfig, CurvePair, Diagnostic, RegionOpError, RegionResult,
};
pub use curves::{CurvePrimitive, CurvePrimitivePtr, StrokeOptions};
pub use graph::{AreaSelect, BoolSelect, BooleanOp};
pub use region::{BoundaryType, CurveLoop, ParityRegion, Region, UnionRegion};

pub fn version() -> &'static str {
    "0.1.0"
}

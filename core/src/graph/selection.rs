//! Face selection predicates over per-group winding numbers.

use serde::{Deserialize, Serialize};

/// Two-operand Boolean opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOp {
    Intersection,
    Union,
    /// First operand minus second.
    Difference,
    /// Symmetric difference.
    Parity,
}

/// Rule deciding whether one group covers a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaSelect {
    /// Odd winding number.
    Parity,
    CcwPositiveWindingNumber,
    CcwNonzeroWindingNumber,
    CcwNegativeWindingNumber,
}

/// Rule combining group coverage into a face decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolSelect {
    /// Odd number of covering groups.
    Parity,
    /// Any covering group.
    Union,
    /// Odd total winding over all groups.
    SumParity,
    CcwPositiveWindingNumber,
    CcwNonzeroWindingNumber,
    CcwNegativeWindingNumber,
}

impl BooleanOp {
    pub fn combine(self, in_a: bool, in_b: bool) -> bool {
        match self {
            BooleanOp::Intersection => in_a && in_b,
            BooleanOp::Union => in_a || in_b,
            BooleanOp::Difference => in_a && !in_b,
            BooleanOp::Parity => in_a != in_b,
        }
    }

    /// Coverage of a face by groups `[0, boundary)` against groups `>= boundary`.
    pub fn select(self, windings: &[i32], boundary: usize) -> bool {
        let split = boundary.min(windings.len());
        let (a, b) = windings.split_at(split);
        let odd = |w: &i32| w % 2 != 0;
        self.combine(a.iter().any(odd), b.iter().any(odd))
    }
}

impl AreaSelect {
    pub fn covers(self, winding: i32) -> bool {
        match self {
            AreaSelect::Parity => winding % 2 != 0,
            AreaSelect::CcwPositiveWindingNumber => winding > 0,
            AreaSelect::CcwNonzeroWindingNumber => winding != 0,
            AreaSelect::CcwNegativeWindingNumber => winding < 0,
        }
    }
}

impl BoolSelect {
    pub fn select(self, area: AreaSelect, windings: &[i32]) -> bool {
        let covered = || windings.iter().filter(|w| area.covers(**w)).count();
        let sum = || windings.iter().sum::<i32>();
        match self {
            BoolSelect::Parity => covered() % 2 == 1,
            BoolSelect::Union => covered() > 0,
            BoolSelect::SumParity => sum() % 2 != 0,
            BoolSelect::CcwPositiveWindingNumber => sum() > 0,
            BoolSelect::CcwNonzeroWindingNumber => sum() != 0,
            BoolSelect::CcwNegativeWindingNumber => sum() < 0,
        }
    }
}

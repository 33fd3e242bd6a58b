use std::fmt;

use serde::Serialize;

use crate::problem::leg::LegIdx;

use super::employee::EmployeeIdx;

/// Reassignment of one leg from an employee to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EmployeeMove {
    pub from: EmployeeIdx,
    pub to: EmployeeIdx,
    pub leg: LegIdx,
}

impl EmployeeMove {
    pub fn new(from: EmployeeIdx, to: EmployeeIdx, leg: LegIdx) -> Self {
        EmployeeMove { from, to, leg }
    }
}

impl fmt::Display for EmployeeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leg {}: {} -> {}", self.leg, self.from, self.to)
    }
}

use crate::{problem::leg::LegIdx, solver::solution::employee::EmployeeIdx};

/// Recency table of `(employee, leg)` assignments.
///
/// An assignment marked at iteration `m` stays tabu while `t - m <= tenure`. Every entry starts
/// at `-tenure` so that nothing is tabu in the first iteration.
#[derive(Debug, Clone)]
pub struct TabuList {
    tenure: i64,
    num_legs: usize,
    marks: Vec<i64>,
}

impl TabuList {
    pub fn new(num_employees: usize, num_legs: usize, tenure: usize) -> Self {
        let tenure = tenure as i64;
        TabuList {
            tenure,
            num_legs,
            marks: vec![-tenure; num_employees * num_legs],
        }
    }

    #[inline(always)]
    fn index(&self, employee_id: EmployeeIdx, leg_id: LegIdx) -> usize {
        employee_id.get() * self.num_legs + leg_id.get()
    }

    /// Whether giving `leg_id` to `employee_id` is tabu at `iteration`.
    pub fn is_tabu(&self, employee_id: EmployeeIdx, leg_id: LegIdx, iteration: usize) -> bool {
        iteration as i64 - self.marks[self.index(employee_id, leg_id)] <= self.tenure
    }

    pub fn mark(&mut self, employee_id: EmployeeIdx, leg_id: LegIdx, iteration: usize) {
        let index = self.index(employee_id, leg_id);
        self.marks[index] = iteration as i64;
    }

    pub fn tenure(&self) -> usize {
        self.tenure as usize
    }
}

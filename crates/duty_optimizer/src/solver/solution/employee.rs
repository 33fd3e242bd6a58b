use smallvec::SmallVec;

use crate::{
    define_index_newtype,
    problem::{duty_problem::DutyProblem, leg::LegIdx},
    solver::{
        schedule_evaluator::{ScheduleMetrics, evaluate_schedule},
        score::Score,
    },
};

define_index_newtype!(EmployeeIdx, Employee);

pub type EmployeeLegs = SmallVec<[LegIdx; 16]>;

/// Crew member and the legs assigned to them.
///
/// Legs are kept in instance order, which is the `(start, id)` order of the legs themselves.
/// `metrics` always describes the current legs once [`Employee::evaluate`] has run after the
/// last change, and `previous_metrics` keeps the snapshot a move can be reverted to.
#[derive(Debug, Clone)]
pub struct Employee {
    id: EmployeeIdx,
    legs: EmployeeLegs,
    metrics: ScheduleMetrics,
    previous_metrics: Option<ScheduleMetrics>,
}

impl Employee {
    pub fn empty(id: EmployeeIdx) -> Self {
        Employee {
            id,
            legs: SmallVec::new(),
            metrics: ScheduleMetrics::default(),
            previous_metrics: None,
        }
    }

    pub fn id(&self) -> EmployeeIdx {
        self.id
    }

    pub(super) fn set_id(&mut self, id: EmployeeIdx) {
        self.id = id;
    }

    /// Display name, numbered from one.
    pub fn name(&self) -> String {
        format!("E{}", self.id.get() + 1)
    }

    pub fn legs(&self) -> &[LegIdx] {
        &self.legs
    }

    pub fn first_leg(&self) -> Option<LegIdx> {
        self.legs.first().copied()
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn contains(&self, leg_id: LegIdx) -> bool {
        self.legs.binary_search(&leg_id).is_ok()
    }

    pub fn metrics(&self) -> &ScheduleMetrics {
        &self.metrics
    }

    pub fn score(&self) -> Score {
        self.metrics.score
    }

    #[inline]
    pub fn objective(&self) -> i64 {
        self.metrics.objective()
    }

    pub(super) fn insert_leg(&mut self, leg_id: LegIdx) {
        match self.legs.binary_search(&leg_id) {
            Ok(_) => panic!("Leg {leg_id} is already assigned to {}", self.name()),
            Err(position) => self.legs.insert(position, leg_id),
        }
    }

    pub(super) fn remove_leg(&mut self, leg_id: LegIdx) {
        match self.legs.binary_search(&leg_id) {
            Ok(position) => {
                self.legs.remove(position);
            }
            Err(_) => panic!("Leg {leg_id} is not assigned to {}", self.name()),
        }
    }

    /// Re-evaluates the legs, keeping the current metrics as the revert snapshot.
    pub(super) fn evaluate(&mut self, problem: &DutyProblem) -> i64 {
        self.previous_metrics = Some(self.metrics);
        self.refresh(problem)
    }

    /// Re-evaluates the legs without touching the revert snapshot.
    pub(super) fn refresh(&mut self, problem: &DutyProblem) -> i64 {
        self.metrics = evaluate_schedule(problem, &self.legs);
        self.objective()
    }

    pub(super) fn revert(&mut self) {
        self.metrics = self
            .previous_metrics
            .take()
            .unwrap_or_else(|| panic!("{} has no evaluation to revert to", self.name()));
    }

    /// Metrics the employee would have with `leg_id` added.
    pub fn evaluate_with_leg(&self, problem: &DutyProblem, leg_id: LegIdx) -> ScheduleMetrics {
        let mut legs = self.legs.clone();
        match legs.binary_search(&leg_id) {
            Ok(_) => panic!("Leg {leg_id} is already assigned to {}", self.name()),
            Err(position) => legs.insert(position, leg_id),
        }
        evaluate_schedule(problem, &legs)
    }

    /// Metrics the employee would have with `leg_id` removed.
    pub fn evaluate_without_leg(&self, problem: &DutyProblem, leg_id: LegIdx) -> ScheduleMetrics {
        let legs = self
            .legs
            .iter()
            .copied()
            .filter(|&leg| leg != leg_id)
            .collect::<EmployeeLegs>();
        assert_eq!(
            legs.len() + 1,
            self.legs.len(),
            "Leg {leg_id} is not assigned to {}",
            self.name()
        );
        evaluate_schedule(problem, &legs)
    }

    /// Same legs with the same metrics. The revert snapshot is not compared.
    pub fn is_identical(&self, other: &Employee) -> bool {
        self.id == other.id && self.legs == other.legs && self.metrics == other.metrics
    }
}

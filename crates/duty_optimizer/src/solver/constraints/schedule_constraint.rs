use serde::Serialize;

use crate::{
    problem::{labor_rules::LaborRules, leg::Minutes},
    solver::{schedule_evaluator::ScheduleMetrics, score::Score, score_level::ScoreLevel},
};

pub const HARD_WEIGHT: i64 = 1000;

/// Penalty terms of an employee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScheduleConstraint {
    BusChain,
    MaximumDrivingTime,
    MaximumSpan,
    ShiftSpan,
    TourChanges,
    RideTime,
    DrivingBlock,
    Rest,
    MaximumWorkingTime,
    WorkingTime,
    MinimumWorkingTime,
    SplitShifts,
}

impl ScheduleConstraint {
    pub const ALL: [ScheduleConstraint; 12] = [
        ScheduleConstraint::BusChain,
        ScheduleConstraint::MaximumDrivingTime,
        ScheduleConstraint::MaximumSpan,
        ScheduleConstraint::ShiftSpan,
        ScheduleConstraint::TourChanges,
        ScheduleConstraint::RideTime,
        ScheduleConstraint::DrivingBlock,
        ScheduleConstraint::Rest,
        ScheduleConstraint::MaximumWorkingTime,
        ScheduleConstraint::WorkingTime,
        ScheduleConstraint::MinimumWorkingTime,
        ScheduleConstraint::SplitShifts,
    ];

    pub fn constraint_name(&self) -> &'static str {
        match self {
            ScheduleConstraint::BusChain => "bus_chain",
            ScheduleConstraint::MaximumDrivingTime => "maximum_driving_time",
            ScheduleConstraint::MaximumSpan => "maximum_span",
            ScheduleConstraint::ShiftSpan => "shift_span",
            ScheduleConstraint::TourChanges => "tour_changes",
            ScheduleConstraint::RideTime => "ride_time",
            ScheduleConstraint::DrivingBlock => "driving_block",
            ScheduleConstraint::Rest => "rest",
            ScheduleConstraint::MaximumWorkingTime => "maximum_working_time",
            ScheduleConstraint::WorkingTime => "working_time",
            ScheduleConstraint::MinimumWorkingTime => "minimum_working_time",
            ScheduleConstraint::SplitShifts => "split_shifts",
        }
    }

    pub fn score_level(&self) -> ScoreLevel {
        match self {
            ScheduleConstraint::BusChain
            | ScheduleConstraint::MaximumDrivingTime
            | ScheduleConstraint::MaximumSpan
            | ScheduleConstraint::DrivingBlock
            | ScheduleConstraint::Rest
            | ScheduleConstraint::MaximumWorkingTime => ScoreLevel::Hard,
            ScheduleConstraint::ShiftSpan
            | ScheduleConstraint::TourChanges
            | ScheduleConstraint::RideTime
            | ScheduleConstraint::WorkingTime
            | ScheduleConstraint::MinimumWorkingTime
            | ScheduleConstraint::SplitShifts => ScoreLevel::Soft,
        }
    }

    pub fn weight(&self) -> i64 {
        match self.score_level() {
            ScoreLevel::Hard => HARD_WEIGHT,
            ScoreLevel::Soft => match self {
                ScheduleConstraint::TourChanges => 30,
                ScheduleConstraint::WorkingTime | ScheduleConstraint::MinimumWorkingTime => 2,
                ScheduleConstraint::SplitShifts => 180,
                _ => 1,
            },
        }
    }

    /// Unweighted value of the term for a schedule.
    pub fn violation(&self, metrics: &ScheduleMetrics, rules: &LaborRules) -> Minutes {
        match self {
            ScheduleConstraint::BusChain => metrics.bus_chain_penalty,
            ScheduleConstraint::MaximumDrivingTime => {
                (metrics.driving_time - rules.max_driving_time).max(0)
            }
            ScheduleConstraint::MaximumSpan => (metrics.total_time - rules.max_span).max(0),
            ScheduleConstraint::ShiftSpan => metrics.total_time,
            ScheduleConstraint::TourChanges => metrics.tour_change_count,
            ScheduleConstraint::RideTime => metrics.ride_time,
            ScheduleConstraint::DrivingBlock => metrics.driving_block_penalty,
            ScheduleConstraint::Rest => metrics.rest_penalty,
            ScheduleConstraint::MaximumWorkingTime => {
                (metrics.work_time - rules.max_working_time).max(0)
            }
            ScheduleConstraint::WorkingTime => metrics.work_time,
            ScheduleConstraint::MinimumWorkingTime => {
                (rules.min_working_time - metrics.work_time).max(0)
            }
            ScheduleConstraint::SplitShifts => metrics.split_count,
        }
    }

    pub fn compute_score(&self, metrics: &ScheduleMetrics, rules: &LaborRules) -> Score {
        Score::of(
            self.score_level(),
            self.weight() * self.violation(metrics, rules),
        )
    }

    pub fn penalty_term(&self, metrics: &ScheduleMetrics, rules: &LaborRules) -> PenaltyTerm {
        PenaltyTerm {
            name: self.constraint_name(),
            level: self.score_level(),
            weight: self.weight(),
            value: self.violation(metrics, rules),
        }
    }
}

/// Total weighted score of a schedule over every penalty term.
pub fn compute_schedule_score(metrics: &ScheduleMetrics, rules: &LaborRules) -> Score {
    ScheduleConstraint::ALL
        .iter()
        .map(|constraint| constraint.compute_score(metrics, rules))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PenaltyTerm {
    pub name: &'static str,
    pub level: ScoreLevel,
    pub weight: i64,
    pub value: Minutes,
}

impl PenaltyTerm {
    pub fn weighted(&self) -> i64 {
        self.weight * self.value
    }
}

use serde::Serialize;
use smallvec::SmallVec;

use crate::problem::{
    duty_problem::DutyProblem,
    leg::{LegIdx, Minutes},
};

use super::{
    constraints::{
        driving_block::driving_block_penalty,
        schedule_constraint::compute_schedule_score,
        working_time::{SPLIT_THRESHOLD, evaluate_breaks, rest_penalty},
    },
    score::Score,
};

/// Transition between two consecutive legs of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub previous_end: Minutes,
    pub next_start: Minutes,
    pub next_drive: Minutes,
    /// Passive ride from the end of the previous leg to the start of the next one.
    pub ride: Minutes,
    pub changes_tour: bool,
    pub changes_location: bool,
}

impl Connection {
    #[inline]
    pub fn gap(&self) -> Minutes {
        self.next_start - self.previous_end
    }

    /// Gap left once the passive ride is done.
    #[inline]
    pub fn idle(&self) -> Minutes {
        self.gap() - self.ride
    }

    /// The employee has to reach another vehicle or another place.
    #[inline]
    pub fn is_transfer(&self) -> bool {
        self.changes_tour || self.changes_location
    }
}

/// Time metrics and penalty totals of one employee schedule.
///
/// All fields are zero for an empty schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleMetrics {
    pub start_shift: Minutes,
    pub end_shift: Minutes,
    pub total_time: Minutes,
    pub driving_time: Minutes,
    pub work_time: Minutes,
    pub ride_time: Minutes,
    pub tour_change_count: i64,
    pub split_count: i64,
    pub split_time: Minutes,
    pub unpaid_time: Minutes,
    pub bus_chain_penalty: Minutes,
    pub driving_block_penalty: Minutes,
    pub rest_penalty: Minutes,
    pub score: Score,
}

impl ScheduleMetrics {
    #[inline]
    pub fn objective(&self) -> i64 {
        self.score.total()
    }
}

/// Evaluates a schedule given as leg indices sorted by `(start, id)`.
pub fn evaluate_schedule(problem: &DutyProblem, legs: &[LegIdx]) -> ScheduleMetrics {
    let (Some(&first), Some(&last)) = (legs.first(), legs.last()) else {
        return ScheduleMetrics::default();
    };

    let first = problem.leg(first);
    let last = problem.leg(last);

    let mut metrics = ScheduleMetrics {
        start_shift: first.start() - problem.start_work(first.start_location_id()),
        end_shift: last.end() + problem.end_work(last.end_location_id()),
        ..ScheduleMetrics::default()
    };
    metrics.total_time = metrics.end_shift - metrics.start_shift;
    metrics.driving_time = legs.iter().map(|&leg| problem.leg(leg).drive()).sum();

    let connections = legs
        .windows(2)
        .map(|pair| {
            let previous = problem.leg(pair[0]);
            let next = problem.leg(pair[1]);
            Connection {
                previous_end: previous.end(),
                next_start: next.start(),
                next_drive: next.drive(),
                ride: problem.ride_time(previous.end_location_id(), next.start_location_id()),
                changes_tour: previous.tour() != next.tour(),
                changes_location: previous.end_location_id() != next.start_location_id(),
            }
        })
        .collect::<SmallVec<[Connection; 16]>>();

    for connection in &connections {
        metrics.ride_time += connection.ride;

        if !connection.is_transfer() {
            continue;
        }

        metrics.bus_chain_penalty += (connection.ride - connection.gap()).max(0);

        if connection.changes_tour {
            metrics.tour_change_count += 1;
        }

        if connection.idle() >= SPLIT_THRESHOLD {
            metrics.split_count += 1;
            metrics.split_time += connection.idle();
        }
    }

    let breaks = evaluate_breaks(metrics.start_shift, metrics.end_shift, &connections);
    metrics.unpaid_time = breaks.unpaid;
    metrics.work_time = metrics.total_time - breaks.unpaid - metrics.split_time;

    metrics.driving_block_penalty = driving_block_penalty(first.drive(), &connections);
    metrics.rest_penalty = rest_penalty(metrics.work_time, &breaks, &connections);

    metrics.score = compute_schedule_score(&metrics, problem.rules());
    metrics
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{self, TestLeg};

    use super::*;

    #[test]
    fn test_empty_schedule() {
        let problem = test_utils::create_problem(vec![TestLeg::new(1, 1, 360, 420)]);
        assert_eq!(evaluate_schedule(&problem, &[]), ScheduleMetrics::default());
    }

    #[test]
    fn test_single_leg_schedule() {
        let problem = test_utils::create_problem(vec![TestLeg::new(1, 1, 360, 420)]);
        let metrics = evaluate_schedule(&problem, &[LegIdx::new(0)]);

        assert_eq!(metrics.start_shift, 350);
        assert_eq!(metrics.end_shift, 430);
        assert_eq!(metrics.total_time, 80);
        assert_eq!(metrics.driving_time, 60);
        assert_eq!(metrics.work_time, metrics.total_time);
        assert_eq!(metrics.tour_change_count, 0);
        assert_eq!(metrics.split_count, 0);
        assert_eq!(metrics.ride_time, 0);
        assert_eq!(metrics.driving_block_penalty, 0);
        assert_eq!(metrics.score.hard_score, 0);
        // Span, work time and the shortfall to the minimum working time.
        assert_eq!(metrics.score.soft_score, 80 + 2 * 80 + 2 * (390 - 80));
    }

    #[test]
    fn test_four_hours_single_tour() {
        let problem = test_utils::create_problem(vec![
            TestLeg::new(1, 1, 360, 420),
            TestLeg::new(2, 1, 420, 480),
            TestLeg::new(3, 1, 480, 540),
            TestLeg::new(4, 1, 540, 600),
        ]);
        let legs = problem.leg_indices().collect::<Vec<_>>();
        let metrics = evaluate_schedule(&problem, &legs);

        assert_eq!(metrics.driving_time, 240);
        assert_eq!(metrics.total_time, 260);
        assert_eq!(metrics.driving_block_penalty, 0);
        assert_eq!(metrics.score, Score::new(0, 260 + 2 * 260 + 2 * 130));
    }

    #[test]
    fn test_tour_change_with_unreachable_vehicle() {
        let problem = test_utils::create_problem_with_ride_times(
            vec![
                TestLeg::new(1, 1, 360, 420).with_locations(0, 0),
                TestLeg::new(2, 2, 430, 490).with_locations(1, 1),
            ],
            vec![vec![0, 25], vec![25, 0]],
        );
        let metrics = evaluate_schedule(&problem, &[LegIdx::new(0), LegIdx::new(1)]);

        assert_eq!(metrics.tour_change_count, 1);
        assert_eq!(metrics.ride_time, 25);
        assert_eq!(metrics.bus_chain_penalty, 15);
        assert_eq!(metrics.score.hard_score, 15 * 1000);
    }

    #[test]
    fn test_overlap_on_tour_change() {
        let problem = test_utils::create_problem(vec![
            TestLeg::new(1, 1, 360, 420),
            TestLeg::new(2, 2, 400, 460),
        ]);
        let metrics = evaluate_schedule(&problem, &[LegIdx::new(0), LegIdx::new(1)]);

        assert_eq!(metrics.bus_chain_penalty, 20);
        assert_eq!(metrics.tour_change_count, 1);
    }

    #[test]
    fn test_split_shift_is_not_working_time() {
        let problem = test_utils::create_problem(vec![
            TestLeg::new(1, 1, 360, 480),
            TestLeg::new(2, 2, 720, 840),
        ]);
        let metrics = evaluate_schedule(&problem, &[LegIdx::new(0), LegIdx::new(1)]);

        assert_eq!(metrics.split_count, 1);
        assert_eq!(metrics.split_time, 240);
        assert_eq!(metrics.total_time, 500);
        // The same gap also qualifies as a centered break, capped at 90 unpaid minutes.
        assert_eq!(metrics.unpaid_time, 90);
        assert_eq!(metrics.work_time, 500 - 240 - 90);
    }

    #[test]
    fn test_long_driving_block() {
        let problem = test_utils::create_problem(vec![
            TestLeg::new(1, 1, 360, 520),
            TestLeg::new(2, 1, 520, 640),
        ]);
        let metrics = evaluate_schedule(&problem, &[LegIdx::new(0), LegIdx::new(1)]);

        assert_eq!(metrics.driving_block_penalty, 40);
        assert_eq!(metrics.tour_change_count, 0);
        assert_eq!(metrics.bus_chain_penalty, 0);
    }
}

use crate::{problem::leg::Minutes, solver::schedule_evaluator::Connection};

/// Margin at both ends of the shift where breaks are never unpaid.
const CORE_WINDOW_MARGIN: Minutes = 2 * 60;
/// Extra margin a break needs inside the core window to count as centered.
const CENTERED_MARGIN: Minutes = 60;

const FIRST_BREAK_MINIMUM: Minutes = 15;
const FIRST_BREAK_LATEST: Minutes = 6 * 60;
const MAIN_BREAK_MINIMUM: Minutes = 30;

const UNPAID_CAP: Minutes = 60;
const CENTERED_UNPAID_CAP: Minutes = 90;

/// Idle time at or above this is a split and not a rest.
pub const SPLIT_THRESHOLD: Minutes = 3 * 60;

const REST_APPLIES_FROM: Minutes = 6 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreakEvaluation {
    /// Some idle time of at least 15 minutes ends no later than 6 hours into the shift.
    pub first_break: bool,
    /// Some idle time lasts at least 30 minutes.
    pub main_break: bool,
    /// Some break of at least 30 minutes fits entirely inside the tightened core window.
    pub centered_break: bool,
    pub unpaid: Minutes,
}

impl BreakEvaluation {
    pub fn qualifies(&self) -> bool {
        self.first_break && self.main_break
    }
}

/// Finds the qualifying breaks of a schedule and the minutes of them that go unpaid.
pub fn evaluate_breaks(
    start_shift: Minutes,
    end_shift: Minutes,
    connections: &[Connection],
) -> BreakEvaluation {
    let core_start = start_shift + CORE_WINDOW_MARGIN;
    let core_end = end_shift - CORE_WINDOW_MARGIN;

    let mut evaluation = BreakEvaluation::default();
    let mut unpaid = 0;

    for connection in connections {
        let idle = connection.idle();
        let arrival = connection.next_start - connection.ride;

        if idle >= FIRST_BREAK_MINIMUM
            && connection.previous_end - start_shift <= FIRST_BREAK_LATEST
        {
            evaluation.first_break = true;
        }

        if idle >= MAIN_BREAK_MINIMUM {
            evaluation.main_break = true;
        }

        let centered_start = (core_start + CENTERED_MARGIN).max(connection.previous_end);
        let centered_end = (core_end - CENTERED_MARGIN).min(arrival);
        if centered_end - centered_start >= MAIN_BREAK_MINIMUM {
            evaluation.centered_break = true;
        }

        let break_start = core_start.max(connection.previous_end);
        let break_end = core_end.min(arrival);
        unpaid += (break_end - break_start).max(0);
    }

    if evaluation.qualifies() {
        let cap = if evaluation.centered_break {
            CENTERED_UNPAID_CAP
        } else {
            UNPAID_CAP
        };
        evaluation.unpaid = unpaid.min(cap);
    }

    evaluation
}

/// Minutes worked without the rest the working time requires.
///
/// Rest counts only when the breaks qualify; every idle period adds at most
/// [`SPLIT_THRESHOLD`] minutes.
pub fn rest_penalty(
    work_time: Minutes,
    breaks: &BreakEvaluation,
    connections: &[Connection],
) -> Minutes {
    if work_time < REST_APPLIES_FROM {
        return 0;
    }

    let rest: Minutes = if breaks.qualifies() {
        connections
            .iter()
            .map(Connection::idle)
            .filter(|&idle| idle >= 0)
            .map(|idle| idle.min(SPLIT_THRESHOLD))
            .sum()
    } else {
        0
    };

    if rest < 30 {
        (work_time - (REST_APPLIES_FROM - 1)).max(0)
    } else if rest < 45 {
        (work_time - 9 * 60).max(0)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(previous_end: Minutes, next_start: Minutes, ride: Minutes) -> Connection {
        Connection {
            previous_end,
            next_start,
            next_drive: 60,
            ride,
            changes_tour: false,
            changes_location: ride > 0,
        }
    }

    #[test]
    fn test_no_connection_has_no_break() {
        let evaluation = evaluate_breaks(300, 900, &[]);
        assert_eq!(evaluation, BreakEvaluation::default());
    }

    #[test]
    fn test_breaks_need_both_qualifiers() {
        // Shift 300..1000, core window 420..880. A single 20 minutes break early on.
        let evaluation = evaluate_breaks(300, 1000, &[connection(500, 520, 0)]);
        assert!(evaluation.first_break);
        assert!(!evaluation.main_break);
        assert_eq!(evaluation.unpaid, 0);
    }

    #[test]
    fn test_unpaid_is_capped_at_sixty_without_centered_break() {
        // Shift 300..1000, core window 420..880, tightened window 480..820.
        // The first break qualifies at 450, the long one overlaps the tightened window by 20.
        let connections = [connection(430, 450, 0), connection(800, 900, 0)];
        let evaluation = evaluate_breaks(300, 1000, &connections);

        assert!(evaluation.qualifies());
        assert!(!evaluation.centered_break);
        // 20 minutes from the first break plus 80 clipped at 880, capped at 60.
        assert_eq!(evaluation.unpaid, 60);
    }

    #[test]
    fn test_unpaid_is_capped_at_ninety_with_centered_break() {
        let connections = [connection(430, 450, 0), connection(600, 700, 0)];
        let evaluation = evaluate_breaks(300, 1000, &connections);

        assert!(evaluation.centered_break);
        assert_eq!(evaluation.unpaid, 90);
    }

    #[test]
    fn test_ride_shortens_the_break() {
        // 40 minutes gap, 15 minutes ride: 25 idle minutes are not a main break.
        let evaluation = evaluate_breaks(300, 1000, &[connection(430, 470, 15)]);
        assert!(evaluation.first_break);
        assert!(!evaluation.main_break);
    }

    #[test]
    fn test_rest_penalty_thresholds() {
        let qualified = BreakEvaluation {
            first_break: true,
            main_break: true,
            centered_break: false,
            unpaid: 0,
        };

        assert_eq!(rest_penalty(359, &qualified, &[]), 0);
        assert_eq!(rest_penalty(400, &qualified, &[]), 41);

        let short_rest = [connection(400, 435, 0)];
        assert_eq!(rest_penalty(560, &qualified, &short_rest), 20);
        assert_eq!(rest_penalty(500, &qualified, &short_rest), 0);

        let long_rest = [connection(400, 430, 0), connection(500, 520, 0)];
        assert_eq!(rest_penalty(700, &qualified, &long_rest), 0);

        assert_eq!(
            rest_penalty(700, &BreakEvaluation::default(), &long_rest),
            700 - 359
        );
    }

    #[test]
    fn test_rest_counts_at_most_split_threshold_per_gap() {
        let qualified = BreakEvaluation {
            first_break: true,
            main_break: true,
            centered_break: false,
            unpaid: 0,
        };
        let connections = [connection(400, 700, 0), connection(760, 750, 0)];
        assert_eq!(rest_penalty(600, &qualified, &connections), 0);
    }
}

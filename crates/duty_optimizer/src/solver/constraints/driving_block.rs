use crate::{problem::leg::Minutes, solver::schedule_evaluator::Connection};

/// Longest continuous driving block allowed without an interruption.
pub const MAX_CONTINUOUS_DRIVING: Minutes = 4 * 60;

/// Minutes driven beyond [`MAX_CONTINUOUS_DRIVING`], accumulated after every connection.
///
/// A block ends on a gap of at least 30 minutes, on a second gap of at least 20 minutes or on a
/// third gap of at least 15 minutes. A block that keeps growing is penalized again after every
/// leg it absorbs.
pub fn driving_block_penalty(first_drive: Minutes, connections: &[Connection]) -> Minutes {
    let mut penalty = 0;
    let mut block_drive = first_drive;
    let mut has_20_minutes_gap = false;
    let mut count_15_minutes_gaps = 0;

    for connection in connections {
        let gap = connection.gap();
        let new_block = gap >= 30
            || (gap >= 20 && has_20_minutes_gap)
            || (gap >= 15 && count_15_minutes_gaps == 2);

        if new_block {
            block_drive = connection.next_drive;
            has_20_minutes_gap = false;
            count_15_minutes_gaps = 0;
        } else {
            block_drive += connection.next_drive;
            if gap >= 20 {
                has_20_minutes_gap = true;
            }
            if gap >= 15 {
                count_15_minutes_gaps += 1;
            }
        }

        if block_drive >= MAX_CONTINUOUS_DRIVING {
            penalty += block_drive - MAX_CONTINUOUS_DRIVING;
        }
    }

    penalty
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(drives: &[Minutes], gaps: &[Minutes]) -> Vec<Connection> {
        let mut end = drives[0];
        drives[1..]
            .iter()
            .zip(gaps)
            .map(|(&drive, &gap)| {
                let connection = Connection {
                    previous_end: end,
                    next_start: end + gap,
                    next_drive: drive,
                    ride: 0,
                    changes_tour: false,
                    changes_location: false,
                };
                end += gap + drive;
                connection
            })
            .collect()
    }

    #[test]
    fn test_exactly_four_hours_is_free() {
        let connections = chain(&[60, 60, 60, 60], &[0, 0, 0]);
        assert_eq!(driving_block_penalty(60, &connections), 0);
    }

    #[test]
    fn test_one_minute_over_is_penalized() {
        let connections = chain(&[60, 60, 60, 61], &[0, 0, 0]);
        assert_eq!(driving_block_penalty(60, &connections), 1);
    }

    #[test]
    fn test_growing_block_is_penalized_repeatedly() {
        let connections = chain(&[200, 50, 10], &[0, 0]);
        // 250 after the first connection, 260 after the second.
        assert_eq!(driving_block_penalty(200, &connections), 10 + 20);
    }

    #[test]
    fn test_thirty_minutes_gap_starts_new_block() {
        let connections = chain(&[200, 200], &[30]);
        assert_eq!(driving_block_penalty(200, &connections), 0);
    }

    #[test]
    fn test_second_twenty_minutes_gap_starts_new_block() {
        let connections = chain(&[100, 100, 100], &[20, 20]);
        assert_eq!(driving_block_penalty(100, &connections), 0);

        let single_interruption = chain(&[100, 100, 100], &[20, 0]);
        assert_eq!(driving_block_penalty(100, &single_interruption), 60);
    }

    #[test]
    fn test_third_fifteen_minutes_gap_starts_new_block() {
        let connections = chain(&[70, 70, 70, 70], &[15, 15, 15]);
        // 140, 210, then the third 15 minutes gap resets the block to 70.
        assert_eq!(driving_block_penalty(70, &connections), 0);

        let two_gaps = chain(&[70, 70, 70, 70], &[15, 15, 0]);
        assert_eq!(driving_block_penalty(70, &two_gaps), 40);
    }

    #[test]
    fn test_single_leg_has_no_penalty() {
        assert_eq!(driving_block_penalty(300, &[]), 0);
    }
}

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use duty_optimizer::{
    problem::leg::Minutes,
    solver::{score::ScoreAnalysis, solution::report::SolutionReport},
};

/// `hh:mm` time of day for a number of minutes since midnight.
pub fn format_clock(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn schedules_table(report: &SolutionReport) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Employee",
        "Legs",
        "Shift",
        "Driving",
        "Working",
        "Span",
        "Tour changes",
        "Splits",
        "Hard",
        "Soft",
    ]);

    for employee in &report.employees {
        let legs = employee
            .legs
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        table.add_row(vec![
            Cell::new(&employee.name),
            Cell::new(legs),
            Cell::new(format!(
                "{}-{}",
                format_clock(employee.start_shift),
                format_clock(employee.end_shift)
            )),
            Cell::new(employee.driving_time),
            Cell::new(employee.work_time),
            Cell::new(employee.total_time),
            Cell::new(employee.tour_change_count),
            Cell::new(employee.split_count),
            Cell::new(employee.hard),
            Cell::new(employee.soft),
        ]);
    }

    table
}

/// One row per penalty term with a non-zero weighted score.
pub fn penalties_table(analysis: &ScoreAnalysis) -> Table {
    let mut terms = analysis
        .scores
        .iter()
        .filter(|(_, score)| score.total() != 0)
        .collect::<Vec<_>>();
    terms.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut table = new_table();
    table.set_header(vec!["Penalty", "Hard", "Soft"]);
    for (name, score) in terms {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(score.hard_score),
            Cell::new(score.soft_score),
        ]);
    }

    table
}

pub fn print_report(report: &SolutionReport, analysis: &ScoreAnalysis) {
    println!("{}", schedules_table(report));
    println!("{}", penalties_table(analysis));
    println!(
        "employees = {}, hard = {}, soft = {}, objective = {}",
        report.employees.len(),
        report.hard,
        report.soft,
        report.objective
    );
}

#[cfg(test)]
mod tests {
    use duty_optimizer::solver::score::Score;

    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(300), "05:00");
        assert_eq!(format_clock(1439), "23:59");
        assert_eq!(format_clock(1500), "25:00");
    }

    #[test]
    fn test_penalties_table_skips_zero_terms() {
        let mut analysis = ScoreAnalysis::default();
        analysis.add("ride_time", Score::soft(30));
        analysis.add("bus_chain", Score::hard(2000));
        analysis.add("split_shifts", Score::zero());

        let table = penalties_table(&analysis);

        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.find("bus_chain").unwrap() < rendered.find("ride_time").unwrap());
        assert!(!rendered.contains("split_shifts"));
    }
}

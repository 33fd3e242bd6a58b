use clap::Args;
use duty_optimizer::problem::{labor_rules::LaborRules, leg::Minutes};

/// Labor-time limits of a duty, in minutes
#[derive(Args, Debug, Clone)]
pub struct LaborRulesArgs {
    /// Maximum driving time of a duty
    #[arg(
        long,
        default_value_t = LaborRules::default().max_driving_time,
        value_parser = clap::value_parser!(Minutes).range(0..)
    )]
    max_driving_time: Minutes,

    /// Maximum paid working time of a duty
    #[arg(
        long,
        default_value_t = LaborRules::default().max_working_time,
        value_parser = clap::value_parser!(Minutes).range(0..)
    )]
    max_working_time: Minutes,

    /// Minimum paid working time of a duty, shortfalls are paid anyway
    #[arg(
        long,
        default_value_t = LaborRules::default().min_working_time,
        value_parser = clap::value_parser!(Minutes).range(0..)
    )]
    min_working_time: Minutes,

    /// Maximum span between shift start and shift end
    #[arg(
        long,
        default_value_t = LaborRules::default().max_span,
        value_parser = clap::value_parser!(Minutes).range(0..)
    )]
    max_span: Minutes,
}

impl From<&LaborRulesArgs> for LaborRules {
    fn from(args: &LaborRulesArgs) -> Self {
        LaborRules {
            max_driving_time: args.max_driving_time,
            max_working_time: args.max_working_time,
            min_working_time: args.min_working_time,
            max_span: args.max_span,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct RulesCli {
        #[command(flatten)]
        rules: LaborRulesArgs,
    }

    fn parse(args: &[&str]) -> Result<LaborRules, clap::Error> {
        let cli = RulesCli::try_parse_from(std::iter::once("duty").chain(args.iter().copied()))?;
        Ok(LaborRules::from(&cli.rules))
    }

    #[test]
    fn test_defaults_match_library_rules() {
        assert_eq!(parse(&[]).unwrap(), LaborRules::default());
    }

    #[test]
    fn test_rules_from_flags() {
        let rules = parse(&["--max-driving-time", "480", "--max-span", "720"]).unwrap();

        assert_eq!(rules.max_driving_time, 480);
        assert_eq!(rules.max_span, 720);
        assert_eq!(rules.max_working_time, 600);
        assert_eq!(rules.min_working_time, 390);

        assert!(parse(&["--min-working-time", "-5"]).is_err());
        assert!(parse(&["--max-working-time", "ten"]).is_err());
    }
}

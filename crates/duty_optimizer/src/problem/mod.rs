pub mod duty_problem;
pub mod instance;
pub mod labor_rules;
pub mod leg;
pub mod location;
pub mod ride_time_matrix;

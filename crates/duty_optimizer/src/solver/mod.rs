pub mod accepted_solution;
pub mod constraints;
pub mod construction;
pub mod ls;
pub mod neighborhood;
pub mod schedule_evaluator;
pub mod score;
pub mod score_level;
pub mod solution;
pub mod solver;
pub mod solver_params;
pub mod statistics;
pub mod tabu;

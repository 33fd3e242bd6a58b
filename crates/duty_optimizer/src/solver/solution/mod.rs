pub mod employee;
pub mod employee_move;
pub mod report;
pub mod solution;

pub mod driving_block;
pub mod schedule_constraint;
pub mod working_time;

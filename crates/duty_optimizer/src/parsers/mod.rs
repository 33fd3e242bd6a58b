pub mod busdriver;
pub mod parser;
pub mod solution_matrix;

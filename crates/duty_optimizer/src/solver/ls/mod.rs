pub mod best_improvement;

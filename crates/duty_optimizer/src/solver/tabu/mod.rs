pub mod tabu_list;
pub mod tabu_search;

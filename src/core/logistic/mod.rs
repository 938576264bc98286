pub mod iteration_budget;
pub mod orbit;

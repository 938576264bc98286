pub mod actions;
pub mod data;
pub mod logistic;
pub mod tone_mapping;
pub mod util;

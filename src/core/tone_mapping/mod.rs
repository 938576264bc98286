pub mod log_density;

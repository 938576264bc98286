//! Background rendering for a view that keeps changing.
//!
//! The controller owns one worker thread and keeps only the newest request.
//! Submitting a request cancels whatever job is in flight at its next column
//! boundary, and frames of superseded jobs are never handed to the presenter.

mod controller;
pub mod data;
pub mod errors;
pub mod events;
pub mod ports;

pub use controller::InteractiveController;

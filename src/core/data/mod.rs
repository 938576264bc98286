pub mod colour;
pub mod column_checkpoints;
pub mod hit_histogram;
pub mod pixel_buffer;
pub mod render_request;
pub mod stage_frame;
pub mod viewport;

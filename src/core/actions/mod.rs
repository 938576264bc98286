pub mod accumulate_hits;
pub mod cancellation;
pub mod generate_pixel_buffer;
pub mod render;
pub mod render_batch;
pub mod sweep_preview;
pub mod tone_map;

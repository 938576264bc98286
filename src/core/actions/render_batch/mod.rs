pub mod render_batch;

pub mod sweep_preview;

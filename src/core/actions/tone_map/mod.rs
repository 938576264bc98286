pub mod tone_map;

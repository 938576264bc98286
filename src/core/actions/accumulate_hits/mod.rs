pub mod accumulate_hits;

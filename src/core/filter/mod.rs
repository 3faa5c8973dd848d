// Core filter module - leet normalization and banned word detection.

pub mod filter_models;
pub mod word_filter;

pub use filter_models::*;
pub use word_filter::WordFilter;

//! Core library: extraction, prompt building, classification and directory listing.

pub mod classifier;
pub mod config;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod scanner;

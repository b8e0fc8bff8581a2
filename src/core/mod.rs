//! Core pipeline: parse, preview, generate, download

pub mod artifact;
pub mod batch;
pub mod downloader;
pub mod metadata;
pub mod parser;
pub mod random;

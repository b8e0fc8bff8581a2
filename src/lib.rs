//! skyswoop library
//!
//! Core functionality for the skyswoop CLI: post URL validation, mock preview
//! and artifact generation, and the persisted download history.

pub mod core;
pub mod error;
pub mod storage;
pub mod types;
pub mod ui;
pub mod utils;

//! Storage modules: backend, config, history

pub mod backend;
pub mod config;
pub mod history;

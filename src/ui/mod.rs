//! Terminal interaction: prompts and progress

pub mod progress;
pub mod selector;

//! Command implementations

pub mod build;
pub mod ci;
pub mod completions;
pub mod info;

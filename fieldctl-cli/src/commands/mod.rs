//! Command implementations for fieldctl CLI

pub mod create;
pub mod list;

// Re-export main dispatcher functions for flat access from main.rs
pub use create::run_create;
pub use list::run_list;

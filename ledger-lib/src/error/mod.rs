//! Error types

mod column;
mod config;

pub use column::*;
pub use config::*;

//! Infrastructure layer providing external service integrations.
//!
//! This module contains file persistence, clipboard access, configuration
//! loading and logging setup.

pub mod clipboard;
pub mod config;
pub mod logging;
pub mod persistence;

pub use clipboard::*;
pub use config::*;
pub use persistence::*;

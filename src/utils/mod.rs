// src/utils/mod.rs
//! Shared helpers: errors, configuration, hex rendering

pub mod config;
pub mod errors;
pub mod hex;

pub use self::config::LabConfig;
pub use self::errors::{LabError, Result};
pub use self::hex::to_hex;

//! Domain model and seams for NutriScan.
//!
//! This crate holds everything that does not touch the network or the file
//! system: the assessment model, response normalization, the prompt and
//! keyword configuration, intake validation rules, and the traits the outer
//! crates implement.

pub mod assessment;
pub mod config;
pub mod error;
pub mod intake;
pub mod prompt;

pub use error::{NutriscanError, Result};

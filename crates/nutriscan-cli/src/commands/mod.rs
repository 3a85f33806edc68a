pub mod analyze;
pub mod clear;
pub mod history;
pub mod stats;

// Common utilities and shared types used across the pipeline

pub mod constants;
pub mod error;

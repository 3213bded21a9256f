//! Core library components.
//!
//! Stage configuration, secret construction and process execution, free of
//! any terminal concerns.

pub mod config;
pub mod constants;
pub mod pipeline;
pub mod secret;

//! Backend worker: owns the async runtime and the submission controller.

pub mod commands;
pub mod runtime;

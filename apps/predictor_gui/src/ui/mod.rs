//! UI layer for the predictor window.

pub mod app;

pub use app::{PredictorApp, StartupConfig};

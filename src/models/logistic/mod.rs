/// Logistic Regression Configuration
pub mod config;

/// Logistic Regression
pub mod model;

/// Training steps
pub mod train;

pub use config::Config;
pub use model::{Model, ModelRecord, MODEL_NAME};

//! The HTTP inference service.
//!
//! The fitted artifacts are loaded once into an [`AppContext`], shared read-only behind an `Arc`
//! by every request handler.

/// Service configuration
pub mod config;

/// The request context and prediction operation
pub mod context;

/// API errors
pub mod error;

/// Routes and handlers
pub mod routes;

pub use config::{load_config, ServiceConfig};
pub use context::{AppContext, MetaResponse, PredictRequest, PredictResponse};
pub use error::ApiError;
pub use routes::{cors_layer, router};

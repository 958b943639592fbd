//! # Fake News Detector
//!
//! A TF-IDF + logistic regression classifier for reliable/unreliable news, trained with Burn and
//! served over HTTP.
#![forbid(unsafe_code)]

/// Fitted artifact locations and errors
pub mod artifacts;

/// Labeled news datasets
pub mod datasets;

/// Feature extraction
pub mod features;

/// Class labels
pub mod labels;

/// Models
pub mod models;

/// Pipelines
pub mod pipelines;

/// Text normalization
pub mod preprocessing;

/// HTTP inference service
pub mod service;

/// Utilities
pub mod utils;

/// Error macros
#[macro_use]
extern crate anyhow;

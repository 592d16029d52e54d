//! Client for a remote Ollama server
//!
//! This crate wraps the Ollama HTTP API behind the [`ModelApi`] trait so callers
//! can swap the real [`OllamaClient`] for a test double. Every operation is a
//! single request/response call; streaming is always disabled.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod models;

pub use client::{ModelApi, OllamaClient};
pub use config::ClientConfig;
pub use endpoint::{Endpoint, DEFAULT_HOST, DEFAULT_PORT};
pub use error::ApiError;
pub use models::{ChatMessage, ModelDescriptor, ModelDetails, ModelInfo};

/// Result type for remote model operations
pub type Result<T> = std::result::Result<T, ApiError>;

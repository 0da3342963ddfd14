//! HTTP API for swot: topic hierarchies, quizzes and grading.

pub mod auth;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod metrics;
pub mod middleware;
pub mod quiz;
pub mod router;
pub mod state;
pub mod topic;
pub mod tracing;
pub mod validation;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};

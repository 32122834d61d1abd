//! Infrastructure layer - External service implementations

pub mod cache;
pub mod generation;
pub mod logging;
pub mod observability;
pub mod services;

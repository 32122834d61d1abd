//! Generation backend domain - opaque text completion service

mod backend;

pub use backend::{GenerationBackend, GenerationParams};

#[cfg(test)]
pub use backend::MockGenerationBackend;

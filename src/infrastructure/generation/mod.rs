//! Generation backend implementations

mod bedrock;

pub use bedrock::{BedrockClient, BedrockClientTrait, BedrockGenerationBackend, ModelFamily};

#[cfg(test)]
pub use bedrock::mock::MockBedrockClient;

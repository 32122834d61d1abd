use thiserror::Error;

/// Failures turning raw generation output into a [`Recipe`](crate::domain::recipe::Recipe)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("No JSON object found in generated text")]
    NoJsonFound { raw: String },

    #[error("Generated JSON has an invalid shape: {reason}")]
    InvalidShape { reason: String, raw: String },
}

impl ParseError {
    pub fn no_json_found(raw: impl Into<String>) -> Self {
        Self::NoJsonFound { raw: raw.into() }
    }

    pub fn invalid_shape(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::InvalidShape {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Raw backend text the parse was attempted on
    pub fn raw(&self) -> &str {
        match self {
            Self::NoJsonFound { raw } => raw,
            Self::InvalidShape { raw, .. } => raw,
        }
    }
}

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Generation error: {code} - {message}")]
    Generation { code: String, message: String },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn generation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }

    #[test]
    fn test_generation_error_carries_code() {
        let error = DomainError::generation("ThrottlingException", "Too many requests");
        assert_eq!(
            error.to_string(),
            "Generation error: ThrottlingException - Too many requests"
        );
    }

    #[test]
    fn test_parse_error_conversion() {
        let error: DomainError = ParseError::no_json_found("just prose").into();

        match error {
            DomainError::Parse(ParseError::NoJsonFound { raw }) => assert_eq!(raw, "just prose"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_raw() {
        let error = ParseError::invalid_shape("missing field `steps`", "{}");
        assert_eq!(error.raw(), "{}");
        assert_eq!(
            error.to_string(),
            "Generated JSON has an invalid shape: missing field `steps`"
        );
    }
}

//! Error types for agri-pilot.

/// Top-level error type for the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Profile validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile field '{field}' must not be empty")]
    EmptyField { field: &'static str },
}

/// Errors from the plan request gateway.
///
/// Each gateway call is one-shot: a failure is terminal for that request
/// and surfaces to the user as a single message. `operation` names which
/// of the three calls failed.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{operation} request failed: {reason}")]
    Transport { operation: Operation, reason: String },

    #[error("{operation} returned an unusable response: {reason}")]
    Parse { operation: Operation, reason: String },
}

/// The three gateway operations, used to tag errors and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    InitialPlan,
    AdaptivePlan,
    LayoutImage,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InitialPlan => "initial-plan",
            Self::AdaptivePlan => "adaptive-plan",
            Self::LayoutImage => "layout-image",
        };
        write!(f, "{s}")
    }
}

/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_names_operation() {
        let err = GatewayError::Transport {
            operation: Operation::InitialPlan,
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("initial-plan"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn parse_error_display() {
        let err = GatewayError::Parse {
            operation: Operation::AdaptivePlan,
            reason: "missing field `scenario`".to_string(),
        };
        assert!(err.to_string().contains("adaptive-plan"));
        assert!(err.to_string().contains("unusable response"));
    }
}

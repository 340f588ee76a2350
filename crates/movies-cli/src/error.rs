use movies_core::{ClassifiedFailure, ConfigError, FailureKind};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Rendered the way the HTTP boundary would answer: status, then body.
    #[error("{} {}", .0.http_status(), .0)]
    Upstream(#[from] ClassifiedFailure),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Upstream(failure) => match failure.kind() {
                FailureKind::Client => 2,
                FailureKind::Server => 3,
                FailureKind::NotFound => 4,
                FailureKind::Decode => 5,
                FailureKind::Transport => 6,
            },
            Self::Serialization(_) => 7,
            Self::Io(_) => 9,
            Self::Config(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failures_render_status_and_message() {
        let error = CliError::from(ClassifiedFailure::not_found(
            "There is no Metadata Available for the passed in id: abc",
        ));

        assert_eq!(
            error.to_string(),
            "404 There is no Metadata Available for the passed in id: abc"
        );
        assert_eq!(error.exit_code(), 4);
    }

    #[test]
    fn exit_codes_follow_failure_class() {
        assert_eq!(CliError::from(ClassifiedFailure::client(400, "x")).exit_code(), 2);
        assert_eq!(CliError::from(ClassifiedFailure::server(503, "x")).exit_code(), 3);
        assert_eq!(CliError::from(ClassifiedFailure::decode("x")).exit_code(), 5);
        assert_eq!(CliError::from(ClassifiedFailure::transport("x")).exit_code(), 6);
        assert_eq!(
            CliError::from(ConfigError::Missing { name: "MOVIES_INFO_URL" }).exit_code(),
            10
        );
    }

    #[test]
    fn server_failures_render_as_500() {
        let error = CliError::from(ClassifiedFailure::server(
            503,
            "Server Exception in ReviewService: Review Service Not Available",
        ));
        assert_eq!(
            error.to_string(),
            "500 Server Exception in ReviewService: Review Service Not Available"
        );
    }
}

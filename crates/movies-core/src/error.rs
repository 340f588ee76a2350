use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Validation errors raised while building domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("movieInfo.name must be present")]
    BlankName,
    #[error("movieInfo.year must be a positive value")]
    NonPositiveYear { year: i32 },
    #[error("movieInfo.cast must be present")]
    EmptyCast,
    #[error("movieInfo.cast entry at index {index} must not be blank")]
    BlankCastMember { index: usize },

    #[error("release date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidReleaseDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("rating.negative : rating is negative and please pass a non-negative value")]
    NegativeRating,
}

/// Discriminant of a [`ClassifiedFailure`], for matching without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    NotFound,
    Client,
    Server,
    Decode,
    Transport,
}

/// Outcome of a downstream call that did not produce a value.
///
/// Remote responses are classified into `NotFound`, `Client` and `Server`.
/// `Decode` and `Transport` are local faults: a success body that could not be
/// turned into domain values, or a request that never got a response.
/// Only `Server` is retryable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedFailure {
    NotFound { message: String },
    Client { status: u16, message: String },
    Server { status: u16, message: String },
    Decode { message: String },
    Transport { message: String },
}

impl ClassifiedFailure {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn client(status: u16, message: impl Into<String>) -> Self {
        Self::Client {
            status,
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::Client { .. } => FailureKind::Client,
            Self::Server { .. } => FailureKind::Server,
            Self::Decode { .. } => FailureKind::Decode,
            Self::Transport { .. } => FailureKind::Transport,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message }
            | Self::Client { message, .. }
            | Self::Server { message, .. }
            | Self::Decode { message }
            | Self::Transport { message } => message,
        }
    }

    /// Status code reported by the remote service, when one was received.
    pub const fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Decode { .. } | Self::Transport { .. } => None,
        }
    }

    pub const fn retryable(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Status the caller-facing boundary answers with.
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Client { status, .. } => *status,
            Self::Server { .. } | Self::Decode { .. } => 500,
            Self::Transport { .. } => 502,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "upstream.not_found",
            Self::Client { .. } => "upstream.client_error",
            Self::Server { .. } => "upstream.server_error",
            Self::Decode { .. } => "upstream.decode",
            Self::Transport { .. } => "upstream.transport",
        }
    }
}

impl Display for ClassifiedFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ClassifiedFailure {}

use thiserror::Error;

/// Failure of a single tool invocation.
///
/// Every variant is per-call; nothing here is fatal to the server.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Arguments must be a JSON object, got {0}")]
    InvalidArgumentShape(&'static str),

    #[error("Required argument is missing: '{field}'")]
    MissingArgument { field: &'static str },

    #[error(
        "Invalid argument: {field}='{value}'. Allowed any one of these: {}",
        .allowed.join(", ")
    )]
    InvalidArgument {
        field: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },

    #[error("Invalid argument: {field} must be a {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Sarvam API error ({status}): {body}")]
    Provider { status: u16, body: String },

    #[error("Malformed Sarvam API response: {detail}")]
    MalformedResponse { detail: String },

    #[error("Failed to reach Sarvam API: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Stable machine-readable category of a [`ToolError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    UnknownTool,
    InvalidArgumentShape,
    MissingArgument,
    InvalidArgument,
    ProviderError,
    MalformedResponse,
    Transport,
}

impl ToolErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolErrorKind::UnknownTool => "unknown_tool",
            ToolErrorKind::InvalidArgumentShape => "invalid_argument_shape",
            ToolErrorKind::MissingArgument => "missing_argument",
            ToolErrorKind::InvalidArgument => "invalid_argument",
            ToolErrorKind::ProviderError => "provider_error",
            ToolErrorKind::MalformedResponse => "malformed_response",
            ToolErrorKind::Transport => "transport_error",
        }
    }
}

impl ToolError {
    pub fn kind(&self) -> ToolErrorKind {
        match self {
            ToolError::UnknownTool(_) => ToolErrorKind::UnknownTool,
            ToolError::InvalidArgumentShape(_) => ToolErrorKind::InvalidArgumentShape,
            ToolError::MissingArgument { .. } => ToolErrorKind::MissingArgument,
            ToolError::InvalidArgument { .. } | ToolError::InvalidType { .. } => {
                ToolErrorKind::InvalidArgument
            }
            ToolError::Provider { .. } => ToolErrorKind::ProviderError,
            ToolError::MalformedResponse { .. } => ToolErrorKind::MalformedResponse,
            ToolError::Transport(_) => ToolErrorKind::Transport,
        }
    }

    /// Argument the error is about, for caller-side validation failures
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ToolError::MissingArgument { field }
            | ToolError::InvalidArgument { field, .. }
            | ToolError::InvalidType { field, .. } => Some(*field),
            _ => None,
        }
    }
}

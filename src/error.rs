use thiserror::Error;

/// Main error type for the tool layer
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ToolError>;

impl ToolError {
    /// Get the error code for structured logging
    pub fn error_code(&self) -> &'static str {
        match self {
            ToolError::Config(_) => "CONFIG_ERROR",
            ToolError::Validation(_) => "VALIDATION_ERROR",
            ToolError::InvalidArguments { .. } => "INVALID_ARGUMENTS",
            ToolError::ToolNotFound(_) => "TOOL_NOT_FOUND",
            ToolError::DuplicateTool(_) => "DUPLICATE_TOOL",
            ToolError::Http(_) => "HTTP_ERROR",
        }
    }

    /// Render the error the way a tool caller sees it.
    ///
    /// Hosts only read strings, so anything that goes wrong before a tool
    /// runs is reported through this sentence instead of an error object.
    pub fn to_tool_result(&self) -> String {
        match self {
            ToolError::ToolNotFound(name) => format!("Unknown tool: {name}."),
            ToolError::InvalidArguments { tool, reason } => {
                format!("Invalid arguments for {tool}: {reason}")
            }
            other => format!("Tool call failed: {other}"),
        }
    }
}

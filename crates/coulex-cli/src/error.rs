use coulex::core::io::plain::PlainTextError;
use coulex::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Exit status for malformed input data, configuration or arguments.
pub const EXIT_INVALID_INPUT: i32 = 2;
/// Exit status for failures inside the computation or the process environment.
pub const EXIT_INTERNAL: i32 = 3;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] EngineError),

    #[error("Invalid input: {0}")]
    Input(#[from] PlainTextError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

impl CliError {
    /// Process exit status: [`EXIT_INVALID_INPUT`] when fixing the input fixes the error,
    /// [`EXIT_INTERNAL`] otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) if e.is_input_error() => EXIT_INVALID_INPUT,
            CliError::Input(_)
            | CliError::Config(_)
            | CliError::FileParsing { .. }
            | CliError::Argument(_) => EXIT_INVALID_INPUT,
            CliError::Core(_) | CliError::Io(_) => EXIT_INTERNAL,
        }
    }
}

// CLI-level errors
//
// Command failures are reported by the dispatcher and never reach this type;
// these cover what happens around a command: setup, terminal I/O, the line editor.

use ollama_remote_client::ApiError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Client error: {0}")]
    Client(#[from] ApiError),

    #[error("Line editor error: {0}")]
    Readline(String),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::Io(e) => {
                format!("Writing output failed: {}", e)
            }
            CliError::Client(e) => {
                format!(
                    "Could not set up the Ollama client: {}\n\nCheck the --host and --timeout values.",
                    e
                )
            }
            CliError::Readline(msg) => {
                format!("Interactive mode failed: {}", msg)
            }
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

pub type CliResult<T> = Result<T, CliError>;

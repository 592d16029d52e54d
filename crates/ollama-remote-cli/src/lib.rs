// ollama-remote CLI library

pub mod commands;
pub mod completion;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod output;
pub mod repl;
pub mod router;

pub use commands::{CommandKind, CommandOutput, CommandRequest, UsageError};
pub use dispatcher::{CommandStatus, Dispatcher, Surface};
pub use error::{CliError, CliResult};
pub use logging::{init_logging, VerbosityLevel};
pub use output::OutputStyle;
pub use repl::{LineReader, ReadOutcome, Repl};
pub use router::{Cli, CommandRouter};

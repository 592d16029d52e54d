// Argument parsing and mode selection

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::Shell;
use ollama_remote_client::{ClientConfig, Endpoint, OllamaClient, DEFAULT_HOST};
use tracing::{info, warn};

use crate::commands::{CommandKind, CommandRequest};
use crate::completion::generate_completions;
use crate::dispatcher::Dispatcher;
use crate::error::CliResult;
use crate::output::OutputStyle;
use crate::repl::{EditorReader, LineReader, Repl};

/// Hint printed after the help text when no command was given
pub const CLI_MODE_HINT: &str = "For CLI mode, use the --cli flag";

/// ollama-remote - Command-line client for a remote Ollama server
#[derive(Parser, Debug)]
#[command(name = "ollama-remote")]
#[command(bin_name = "ollama-remote")]
#[command(about = "Command-line client for a remote Ollama server")]
#[command(
    long_about = "Run chat, generate and model-management commands against a remote Ollama server.\n\nOne-shot:\n  ollama-remote chat --model llama3 --prompt \"Hello\"\n  ollama-remote list --host http://gpu-box:11434\n\nInteractive:\n  ollama-remote --cli"
)]
#[command(version)]
pub struct Cli {
    /// Ollama server URL
    #[arg(long, env = "OLLAMA_HOST", default_value = DEFAULT_HOST, value_name = "URL")]
    pub host: Endpoint,

    /// Start interactive mode
    #[arg(long)]
    pub cli: bool,

    /// Command to run once
    #[arg(value_enum, value_name = "COMMAND")]
    pub command: Option<CommandKind>,

    /// Model name
    #[arg(long)]
    pub model: Option<String>,

    /// Prompt text for chat and generate
    #[arg(long)]
    pub prompt: Option<String>,

    /// Modelfile text for create
    #[arg(long)]
    pub modelfile: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "OLLAMA_REMOTE_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Connection timeout in seconds
    #[arg(long, env = "OLLAMA_REMOTE_CONNECT_TIMEOUT", value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Client settings derived from the flags
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.host.clone());
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.connect_timeout {
            config = config.with_connect_timeout(Duration::from_secs(secs));
        }
        config
    }

    /// The one-shot request, if a command was given
    ///
    /// Field flags the command does not use are dropped with a warning.
    pub fn request(&self) -> Option<CommandRequest> {
        let kind = self.command?;
        let mut request = CommandRequest::new(kind);
        request.model = self.model.clone();
        request.prompt = self.prompt.clone();
        request.modelfile = self.modelfile.clone();

        for field in request.unused_fields() {
            warn!("Ignoring --{} for the {} command", field.name(), kind);
            request.clear_field(field);
        }

        Some(request)
    }
}

/// Route and execute commands
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and run
    pub async fn route() -> CliResult<i32> {
        let cli = Cli::parse();

        crate::logging::init_logging(cli.verbose, cli.quiet);

        let mut stdout = std::io::stdout();
        Self::execute(&cli, &mut stdout).await
    }

    /// Run whatever the parsed arguments ask for; returns the exit code
    pub async fn execute<W: Write + ?Sized>(cli: &Cli, out: &mut W) -> CliResult<i32> {
        if let Some(shell) = cli.completions {
            generate_completions(shell, out);
            return Ok(0);
        }

        if cli.cli {
            let mut reader = EditorReader::new()?;
            Self::interactive(cli, &mut reader, out).await?;
            return Ok(0);
        }

        let Some(request) = cli.request() else {
            let help = Cli::command().render_help();
            writeln!(out, "{}", help)?;
            writeln!(out, "{}", CLI_MODE_HINT)?;
            return Ok(1);
        };

        let dispatcher = Self::dispatcher(cli)?;
        let status = dispatcher.dispatch(&request, out).await?;
        info!(command = %request.kind, ?status, "One-shot command finished");
        Ok(0)
    }

    /// Run interactive mode with the given line source
    pub async fn interactive<R, W>(cli: &Cli, reader: &mut R, out: &mut W) -> CliResult<()>
    where
        R: LineReader + ?Sized,
        W: Write + ?Sized,
    {
        if let Some(kind) = cli.command {
            warn!("Ignoring the {} command because --cli was given", kind);
        }

        let repl = Repl::new(Self::dispatcher(cli)?, &cli.host);
        info!(host = %cli.host, "Starting interactive mode");
        repl.run(reader, out).await
    }

    fn dispatcher(cli: &Cli) -> CliResult<Dispatcher> {
        let client = OllamaClient::new(cli.client_config())?;
        Ok(Dispatcher::new(Arc::new(client), OutputStyle::default()))
    }
}

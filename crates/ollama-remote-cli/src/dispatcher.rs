// Command dispatch: validate, run one remote call, render the outcome
//
// Every command goes through the same path. Local usage errors and remote
// failures are both reported to `out`; neither escapes as an `Err`.

use std::io::{self, Write};
use std::sync::Arc;

use ollama_remote_client::{ApiError, ModelApi, ModelDescriptor, ModelInfo};
use tracing::debug;

use crate::commands::{CommandOutput, CommandRequest, UsageError};
use crate::output::OutputStyle;

/// Which front end a request came from; selects the usage hint style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    #[default]
    OneShot,
    Interactive,
}

/// How a dispatched command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The remote call succeeded and its result was printed
    Completed,
    /// Validation failed; nothing was sent
    Rejected,
    /// The remote call failed and the error was printed
    Failed,
}

/// Runs commands against a model API
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn ModelApi>,
    style: OutputStyle,
    surface: Surface,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn ModelApi>, style: OutputStyle) -> Self {
        Self {
            api,
            style,
            surface: Surface::OneShot,
        }
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    pub fn style(&self) -> OutputStyle {
        self.style
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Validate and execute a request, writing all output to `out`
    ///
    /// Only a failure to write output is returned as an error.
    pub async fn dispatch<W: Write + ?Sized>(
        &self,
        request: &CommandRequest,
        out: &mut W,
    ) -> io::Result<CommandStatus> {
        let command = match request.validate() {
            Ok(command) => command,
            Err(usage) => {
                debug!(command = %request.kind, error = %usage, "Rejected command");
                self.render_usage_error(&usage, out)?;
                return Ok(CommandStatus::Rejected);
            }
        };

        match command.execute(self.api.as_ref()).await {
            Ok(output) => {
                self.render(&output, out)?;
                Ok(CommandStatus::Completed)
            }
            Err(err) => {
                debug!(command = %request.kind, status = ?err.status_code(), "Command failed: {}", err.message());
                self.render_error(&err, out)?;
                Ok(CommandStatus::Failed)
            }
        }
    }

    /// Print a successful result
    pub fn render<W: Write + ?Sized>(&self, output: &CommandOutput, out: &mut W) -> io::Result<()> {
        match output {
            CommandOutput::Reply(text) | CommandOutput::Generated(text) => writeln!(out, "{}", text),
            CommandOutput::Models(models) => self.render_models(models, out),
            CommandOutput::ModelInfo { model, info } => self.render_model_info(model, info, out),
            CommandOutput::Confirmation(message) => {
                writeln!(out, "{}", self.style.success(message))
            }
        }
    }

    fn render_models<W: Write + ?Sized>(&self, models: &[ModelDescriptor], out: &mut W) -> io::Result<()> {
        for model in models {
            writeln!(
                out,
                "Name: {}, Size: {}, Modified: {}",
                model.name, model.size, model.modified_at
            )?;
        }
        Ok(())
    }

    fn render_model_info<W: Write + ?Sized>(
        &self,
        model: &str,
        info: &ModelInfo,
        out: &mut W,
    ) -> io::Result<()> {
        writeln!(
            out,
            "{}",
            self.style.header(&format!("Model information for {}:", model))
        )?;

        if let Some(details) = info.details() {
            let fields = [
                ("family", &details.family),
                ("parameters", &details.parameter_size),
                ("quantization", &details.quantization_level),
                ("format", &details.format),
            ];
            for (key, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
                writeln!(out, "{}", self.style.key_value(key, value))?;
            }
        }

        writeln!(out, "{}", info.to_pretty_string())
    }

    fn render_error<W: Write + ?Sized>(&self, err: &ApiError, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.style.error(&format!("Error: {}", err)))
    }

    fn render_usage_error<W: Write + ?Sized>(&self, usage: &UsageError, out: &mut W) -> io::Result<()> {
        let hint = match self.surface {
            Surface::OneShot => usage.kind.flag_usage(),
            Surface::Interactive => usage.kind.usage(),
        };
        writeln!(out, "{}", self.style.error(&usage.to_string()))?;
        writeln!(out, "{}", self.style.usage(&hint))
    }
}

// Command kinds, argument validation, and handlers

pub mod inference;
pub mod lifecycle;
pub mod models;

use std::fmt;

use ollama_remote_client::{ApiError, ModelApi, ModelDescriptor, ModelInfo};
use thiserror::Error;

pub use inference::{ChatCommand, GenerateCommand};
pub use lifecycle::{CreateCommand, DeleteCommand, PullCommand, PushCommand};
pub use models::{ListCommand, ShowCommand};

/// Binary name used in one-shot usage hints
pub const BIN_NAME: &str = "ollama-remote";

/// Trait for command handlers
///
/// A handler exists only for a request that passed validation, so `execute`
/// always issues exactly one remote call.
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    fn kind(&self) -> CommandKind;

    /// Execute the command
    async fn execute(&self, api: &dyn ModelApi) -> Result<CommandOutput, ApiError>;
}

/// What a successful command produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Reply(String),
    Generated(String),
    Models(Vec<ModelDescriptor>),
    ModelInfo { model: String, info: ModelInfo },
    Confirmation(String),
}

/// The fixed set of remote commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum CommandKind {
    Chat,
    Generate,
    List,
    Pull,
    Push,
    Create,
    Delete,
    Show,
}

/// A named input a command can require
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Model,
    Prompt,
    Modelfile,
}

/// Free-text field that takes the rest of an interactive line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Prompt,
    Modelfile,
}

/// Positional layout a command accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgShape {
    /// No arguments
    None,
    /// Exactly one model name
    Model,
    /// A model name followed by free text
    ModelAndText(TextField),
}

impl CommandKind {
    pub const ALL: [CommandKind; 8] = [
        CommandKind::Chat,
        CommandKind::Generate,
        CommandKind::List,
        CommandKind::Pull,
        CommandKind::Push,
        CommandKind::Create,
        CommandKind::Delete,
        CommandKind::Show,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Chat => "chat",
            CommandKind::Generate => "generate",
            CommandKind::List => "list",
            CommandKind::Pull => "pull",
            CommandKind::Push => "push",
            CommandKind::Create => "create",
            CommandKind::Delete => "delete",
            CommandKind::Show => "show",
        }
    }

    /// Case-insensitive lookup by command word
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn shape(&self) -> ArgShape {
        match self {
            CommandKind::Chat | CommandKind::Generate => ArgShape::ModelAndText(TextField::Prompt),
            CommandKind::Create => ArgShape::ModelAndText(TextField::Modelfile),
            CommandKind::List => ArgShape::None,
            CommandKind::Pull | CommandKind::Push | CommandKind::Delete | CommandKind::Show => {
                ArgShape::Model
            }
        }
    }

    pub fn required_fields(&self) -> &'static [Field] {
        match self.shape() {
            ArgShape::None => &[],
            ArgShape::Model => &[Field::Model],
            ArgShape::ModelAndText(TextField::Prompt) => &[Field::Model, Field::Prompt],
            ArgShape::ModelAndText(TextField::Modelfile) => &[Field::Model, Field::Modelfile],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommandKind::Chat => "Chat with a model",
            CommandKind::Generate => "Generate text from a prompt",
            CommandKind::List => "List available models",
            CommandKind::Pull => "Pull a model onto the server",
            CommandKind::Push => "Push a model to its registry",
            CommandKind::Create => "Create a model from modelfile text",
            CommandKind::Delete => "Delete a model from the server",
            CommandKind::Show => "Show information for a model",
        }
    }

    /// Interactive synopsis, e.g. `chat <model> <prompt>`
    pub fn synopsis(&self) -> String {
        let mut parts = vec![self.name().to_string()];
        parts.extend(self.required_fields().iter().map(|f| format!("<{}>", f.name())));
        parts.join(" ")
    }

    /// One-shot synopsis, e.g. `ollama-remote chat --model <MODEL> --prompt <PROMPT>`
    pub fn flag_synopsis(&self) -> String {
        let mut parts = vec![BIN_NAME.to_string(), self.name().to_string()];
        parts.extend(
            self.required_fields()
                .iter()
                .map(|f| format!("--{} <{}>", f.name(), f.name().to_uppercase())),
        );
        parts.join(" ")
    }

    pub fn usage(&self) -> String {
        format!("Usage: {}", self.synopsis())
    }

    pub fn flag_usage(&self) -> String {
        format!("Usage: {}", self.flag_synopsis())
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Model => "model",
            Field::Prompt => "prompt",
            Field::Modelfile => "modelfile",
        }
    }
}

impl From<TextField> for Field {
    fn from(field: TextField) -> Self {
        match field {
            TextField::Prompt => Field::Prompt,
            TextField::Modelfile => Field::Modelfile,
        }
    }
}

/// A command that failed argument validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {}", describe_problems(.missing, .extra))]
pub struct UsageError {
    pub kind: CommandKind,
    pub missing: Vec<Field>,
    pub extra: Vec<String>,
}

fn describe_problems(missing: &[Field], extra: &[String]) -> String {
    let mut problems = Vec::new();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(Field::name).collect();
        problems.push(format!("missing {}", names.join(", ")));
    }
    if !extra.is_empty() {
        problems.push(format!("unexpected argument(s): {}", extra.join(" ")));
    }
    problems.join("; ")
}

/// A command plus whatever fields the user supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub kind: CommandKind,
    pub model: Option<String>,
    pub prompt: Option<String>,
    pub modelfile: Option<String>,
    pub extra: Vec<String>,
}

impl CommandRequest {
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            model: None,
            prompt: None,
            modelfile: None,
            extra: Vec::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_modelfile(mut self, modelfile: impl Into<String>) -> Self {
        self.modelfile = Some(modelfile.into());
        self
    }

    pub fn with_extra(mut self, extra: Vec<String>) -> Self {
        self.extra = extra;
        self
    }

    /// Supplied value for a field; blank strings count as absent
    pub fn field(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Model => self.model.as_deref(),
            Field::Prompt => self.prompt.as_deref(),
            Field::Modelfile => self.modelfile.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    pub fn clear_field(&mut self, field: Field) {
        *self.slot_mut(field) = None;
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Model => &mut self.model,
            Field::Prompt => &mut self.prompt,
            Field::Modelfile => &mut self.modelfile,
        }
    }

    /// Fields that were supplied but the command does not use
    pub fn unused_fields(&self) -> Vec<Field> {
        [Field::Model, Field::Prompt, Field::Modelfile]
            .into_iter()
            .filter(|f| !self.kind.required_fields().contains(f) && self.field(*f).is_some())
            .collect()
    }

    /// Turn the request into its handler, or explain what is wrong with it
    pub fn validate(&self) -> Result<Box<dyn Command>, UsageError> {
        let missing: Vec<Field> = self
            .kind
            .required_fields()
            .iter()
            .copied()
            .filter(|f| self.field(*f).is_none())
            .collect();

        if !missing.is_empty() || !self.extra.is_empty() {
            return Err(UsageError {
                kind: self.kind,
                missing,
                extra: self.extra.clone(),
            });
        }

        let command: Box<dyn Command> = match self.kind {
            CommandKind::Chat => Box::new(ChatCommand::new(
                self.require(Field::Model)?,
                self.require(Field::Prompt)?,
            )),
            CommandKind::Generate => Box::new(GenerateCommand::new(
                self.require(Field::Model)?,
                self.require(Field::Prompt)?,
            )),
            CommandKind::List => Box::new(ListCommand::new()),
            CommandKind::Pull => Box::new(PullCommand::new(self.require(Field::Model)?)),
            CommandKind::Push => Box::new(PushCommand::new(self.require(Field::Model)?)),
            CommandKind::Create => Box::new(CreateCommand::new(
                self.require(Field::Model)?,
                self.require(Field::Modelfile)?,
            )),
            CommandKind::Delete => Box::new(DeleteCommand::new(self.require(Field::Model)?)),
            CommandKind::Show => Box::new(ShowCommand::new(self.require(Field::Model)?)),
        };

        Ok(command)
    }

    fn require(&self, field: Field) -> Result<String, UsageError> {
        self.field(field)
            .map(|v| v.trim().to_string())
            .ok_or_else(|| UsageError {
                kind: self.kind,
                missing: vec![field],
                extra: Vec::new(),
            })
    }
}

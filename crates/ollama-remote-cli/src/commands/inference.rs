// Chat and generate commands

use ollama_remote_client::{ApiError, ChatMessage, ModelApi};
use tracing::info;

use super::{Command, CommandKind, CommandOutput};

/// Send one user message and print the assistant's reply
pub struct ChatCommand {
    model: String,
    prompt: String,
}

impl ChatCommand {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
        }
    }
}

#[async_trait::async_trait]
impl Command for ChatCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Chat
    }

    async fn execute(&self, api: &dyn ModelApi) -> Result<CommandOutput, ApiError> {
        info!(model = %self.model, "Sending chat message");
        let reply = api
            .chat(&self.model, &[ChatMessage::user(self.prompt.as_str())])
            .await?;
        Ok(CommandOutput::Reply(reply.content))
    }
}

/// Single-prompt completion
pub struct GenerateCommand {
    model: String,
    prompt: String,
}

impl GenerateCommand {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
        }
    }
}

#[async_trait::async_trait]
impl Command for GenerateCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Generate
    }

    async fn execute(&self, api: &dyn ModelApi) -> Result<CommandOutput, ApiError> {
        info!(model = %self.model, "Generating completion");
        let text = api.generate(&self.model, &self.prompt).await?;
        Ok(CommandOutput::Generated(text))
    }
}

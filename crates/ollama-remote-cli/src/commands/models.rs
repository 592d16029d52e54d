// Read-only model queries: list and show

use ollama_remote_client::{ApiError, ModelApi};
use tracing::{debug, info};

use super::{Command, CommandKind, CommandOutput};

/// List models installed on the server
#[derive(Default)]
pub struct ListCommand;

impl ListCommand {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Command for ListCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::List
    }

    async fn execute(&self, api: &dyn ModelApi) -> Result<CommandOutput, ApiError> {
        let models = api.list().await?;
        debug!(count = models.len(), "Listed models");
        Ok(CommandOutput::Models(models))
    }
}

/// Show metadata for one model
pub struct ShowCommand {
    model: String,
}

impl ShowCommand {
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into() }
    }
}

#[async_trait::async_trait]
impl Command for ShowCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Show
    }

    async fn execute(&self, api: &dyn ModelApi) -> Result<CommandOutput, ApiError> {
        info!(model = %self.model, "Fetching model information");
        let info = api.show(&self.model).await?;
        Ok(CommandOutput::ModelInfo {
            model: self.model.clone(),
            info,
        })
    }
}

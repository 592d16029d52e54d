// Model lifecycle commands: pull, push, create, delete
//
// The server's status text is logged but not shown; the user sees a fixed
// confirmation line once the call succeeds.

use ollama_remote_client::{ApiError, ModelApi};
use tracing::{debug, info};

use super::{Command, CommandKind, CommandOutput};

fn confirmation(verb: &str, model: &str) -> CommandOutput {
    CommandOutput::Confirmation(format!("Successfully {} model: {}", verb, model))
}

/// Download a model onto the server
pub struct PullCommand {
    model: String,
}

impl PullCommand {
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into() }
    }
}

#[async_trait::async_trait]
impl Command for PullCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Pull
    }

    async fn execute(&self, api: &dyn ModelApi) -> Result<CommandOutput, ApiError> {
        info!(model = %self.model, "Pulling model");
        let status = api.pull(&self.model).await?;
        debug!(%status, "Pull finished");
        Ok(confirmation("pulled", &self.model))
    }
}

/// Upload a model to its registry
pub struct PushCommand {
    model: String,
}

impl PushCommand {
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into() }
    }
}

#[async_trait::async_trait]
impl Command for PushCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Push
    }

    async fn execute(&self, api: &dyn ModelApi) -> Result<CommandOutput, ApiError> {
        info!(model = %self.model, "Pushing model");
        let status = api.push(&self.model).await?;
        debug!(%status, "Push finished");
        Ok(confirmation("pushed", &self.model))
    }
}

/// Build a model from modelfile text
pub struct CreateCommand {
    model: String,
    modelfile: String,
}

impl CreateCommand {
    pub fn new(model: impl Into<String>, modelfile: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            modelfile: modelfile.into(),
        }
    }
}

#[async_trait::async_trait]
impl Command for CreateCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Create
    }

    async fn execute(&self, api: &dyn ModelApi) -> Result<CommandOutput, ApiError> {
        info!(model = %self.model, bytes = self.modelfile.len(), "Creating model");
        let status = api.create(&self.model, &self.modelfile).await?;
        debug!(%status, "Create finished");
        Ok(confirmation("created", &self.model))
    }
}

/// Remove a model from the server
pub struct DeleteCommand {
    model: String,
}

impl DeleteCommand {
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into() }
    }
}

#[async_trait::async_trait]
impl Command for DeleteCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Delete
    }

    async fn execute(&self, api: &dyn ModelApi) -> Result<CommandOutput, ApiError> {
        info!(model = %self.model, "Deleting model");
        api.delete(&self.model).await?;
        Ok(confirmation("deleted", &self.model))
    }
}

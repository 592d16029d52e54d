//! Shared helpers for end-to-end workflow tests
//!
//! Drives the real CLI router against a mock Ollama server, in one-shot mode or
//! through a scripted interactive session.

use std::collections::VecDeque;

use clap::Parser;
use ollama_remote_cli::{Cli, CliResult, CommandRouter, LineReader, ReadOutcome};

/// Line source that replays a fixed script, then reports end of input
#[derive(Debug, Default)]
pub struct ScriptedReader {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedReader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, one per read
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> CliResult<ReadOutcome> {
        self.prompts.push(prompt.to_string());
        Ok(self
            .lines
            .pop_front()
            .map(ReadOutcome::Line)
            .unwrap_or(ReadOutcome::Eof))
    }

    fn add_history(&mut self, _line: &str) {}
}

/// Parse arguments as if typed after `ollama-remote --host <host>`
pub fn cli_for(host: &str, args: &[&str]) -> Cli {
    let mut argv = vec!["ollama-remote", "--host", host];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("arguments should parse")
}

/// Run one-shot mode and capture the exit code and stdout
pub async fn run_one_shot(host: &str, args: &[&str]) -> (i32, String) {
    let cli = cli_for(host, args);
    let mut out = Vec::new();
    let code = CommandRouter::execute(&cli, &mut out)
        .await
        .expect("one-shot run should not fail");
    (code, String::from_utf8(out).expect("output should be UTF-8"))
}

/// Run an interactive session over `lines` and capture its output
pub async fn run_session(host: &str, lines: &[&str]) -> (String, ScriptedReader) {
    let cli = cli_for(host, &["--cli"]);
    let mut reader = ScriptedReader::new(lines.iter().copied());
    let mut out = Vec::new();
    CommandRouter::interactive(&cli, &mut reader, &mut out)
        .await
        .expect("interactive session should not fail");
    (String::from_utf8(out).expect("output should be UTF-8"), reader)
}

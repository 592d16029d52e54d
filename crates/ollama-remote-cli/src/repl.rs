// Interactive mode
//
// Reads one line at a time, parses it with the positional grammar, and hands the
// resulting request to the shared dispatcher.

use std::io::Write;

use ollama_remote_client::Endpoint;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;
use tracing::debug;

use crate::commands::{ArgShape, CommandKind, CommandRequest};
use crate::dispatcher::{Dispatcher, Surface};
use crate::error::{CliError, CliResult};

/// Prompt label used when talking to the default host
pub const DEFAULT_PROMPT_LABEL: &str = "ollama";

const BANNER: &str = "Ollama CLI Mode";
const BANNER_HINT: &str = "Type 'help' for a list of commands or 'exit' to quit.";
const FAREWELL: &str = "Goodbye!";

/// Label shown before `> `: the hostname, unless it is the default host
pub fn prompt_label(endpoint: &Endpoint) -> String {
    if endpoint.is_default() {
        DEFAULT_PROMPT_LABEL.to_string()
    } else {
        endpoint.hostname().to_string()
    }
}

/// Result of asking for one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D or closed input
    Eof,
}

/// Source of interactive input lines
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> CliResult<ReadOutcome>;

    fn add_history(&mut self, line: &str);
}

/// Line reader backed by rustyline, with in-memory history
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    pub fn new() -> CliResult<Self> {
        let editor = DefaultEditor::new().map_err(|e| CliError::Readline(e.to_string()))?;
        Ok(Self { editor })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> CliResult<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(CliError::Readline(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            debug!("Could not record history entry: {}", e);
        }
    }
}

/// A parsed interactive line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    Run(CommandRequest),
    Help(Option<String>),
    Exit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Whether the loop keeps going after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Split off the first whitespace-delimited token, keeping the rest verbatim
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    Some((&input[..end], &input[end..]))
}

fn remaining_tokens(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

/// Parse one line of interactive input
///
/// Missing or extra arguments are not parse errors; they are carried in the
/// request and reported by validation.
pub fn parse_line(line: &str) -> Result<ReplAction, ParseError> {
    let Some((word, rest)) = next_token(line) else {
        return Ok(ReplAction::Empty);
    };

    // `?chat` is shorthand for `help chat`
    if let Some(topic) = word.strip_prefix('?').filter(|t| !t.is_empty()) {
        return Ok(ReplAction::Help(Some(topic.to_string())));
    }

    let lowered = word.to_ascii_lowercase();
    match lowered.as_str() {
        "exit" | "quit" => return Ok(ReplAction::Exit),
        "help" | "?" => {
            return Ok(ReplAction::Help(next_token(rest).map(|(t, _)| t.to_string())));
        }
        _ => {}
    }

    let kind = CommandKind::from_name(word).ok_or_else(|| ParseError::UnknownCommand(word.to_string()))?;
    let mut request = CommandRequest::new(kind);

    match kind.shape() {
        ArgShape::None => {
            request.extra = remaining_tokens(rest);
        }
        ArgShape::Model => {
            if let Some((model, tail)) = next_token(rest) {
                request.model = Some(model.to_string());
                request.extra = remaining_tokens(tail);
            }
        }
        ArgShape::ModelAndText(field) => {
            if let Some((model, tail)) = next_token(rest) {
                request.model = Some(model.to_string());
                let text = tail.trim();
                if !text.is_empty() {
                    request.set_field(field.into(), text);
                }
            }
        }
    }

    Ok(ReplAction::Run(request))
}

/// Read-evaluate-print loop over the command set
pub struct Repl {
    dispatcher: Dispatcher,
    label: String,
}

impl Repl {
    pub fn new(dispatcher: Dispatcher, endpoint: &Endpoint) -> Self {
        Self {
            dispatcher: dispatcher.with_surface(Surface::Interactive),
            label: prompt_label(endpoint),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn prompt(&self) -> String {
        format!("{}> ", self.label)
    }

    /// Run until `exit`, `quit`, end of input, or Ctrl-C
    pub async fn run<R, W>(&self, reader: &mut R, out: &mut W) -> CliResult<()>
    where
        R: LineReader + ?Sized,
        W: Write + ?Sized,
    {
        let style = self.dispatcher.style();
        writeln!(out, "{}", style.header(BANNER))?;
        writeln!(out, "{}", BANNER_HINT)?;

        let prompt = self.prompt();
        loop {
            out.flush()?;
            let line = match reader.read_line(&prompt)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted | ReadOutcome::Eof => break,
            };

            if !line.trim().is_empty() {
                reader.add_history(&line);
            }

            if self.evaluate(&line, out).await? == LoopControl::Exit {
                break;
            }
        }

        writeln!(out, "{}", FAREWELL)?;
        Ok(())
    }

    /// Handle a single line
    pub async fn evaluate<W: Write + ?Sized>(&self, line: &str, out: &mut W) -> CliResult<LoopControl> {
        let style = self.dispatcher.style();

        match parse_line(line) {
            Ok(ReplAction::Empty) => {}
            Ok(ReplAction::Exit) => return Ok(LoopControl::Exit),
            Ok(ReplAction::Help(topic)) => self.print_help(topic.as_deref(), out)?,
            Ok(ReplAction::Run(request)) => {
                let status = self.dispatcher.dispatch(&request, out).await?;
                debug!(command = %request.kind, ?status, "Command finished");
            }
            Err(e) => {
                debug!("{}", e);
                writeln!(
                    out,
                    "{}",
                    style.error(&format!("{} (type 'help' for a list of commands)", e))
                )?;
            }
        }

        Ok(LoopControl::Continue)
    }

    fn print_help<W: Write + ?Sized>(&self, topic: Option<&str>, out: &mut W) -> CliResult<()> {
        let style = self.dispatcher.style();

        let Some(topic) = topic else {
            writeln!(out, "{}", style.header("Available commands:"))?;
            for kind in CommandKind::ALL {
                writeln!(out, "  {:<30} {}", kind.synopsis(), kind.description())?;
            }
            writeln!(out, "  {:<30} {}", "help [command]", "Show help for a command")?;
            writeln!(out, "  {:<30} {}", "exit | quit", "Leave interactive mode")?;
            return Ok(());
        };

        match CommandKind::from_name(topic) {
            Some(kind) => {
                writeln!(out, "{}", style.usage(&kind.usage()))?;
                writeln!(out, "  {}", kind.description())?;
            }
            None => {
                writeln!(out, "{}", style.error(&format!("No help for unknown command: {}", topic)))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandKind, TextField};

    fn run(line: &str) -> CommandRequest {
        match parse_line(line).unwrap() {
            ReplAction::Run(request) => request,
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_chat_keeps_prompt_spacing() {
        let request = run("chat  llama3   Why is   the sky blue?  ");
        assert_eq!(request.kind, CommandKind::Chat);
        assert_eq!(request.model.as_deref(), Some("llama3"));
        assert_eq!(request.prompt.as_deref(), Some("Why is   the sky blue?"));
    }

    #[test]
    fn test_create_takes_modelfile_text() {
        let request = run("create mario FROM llama3 SYSTEM hi");
        assert_eq!(CommandKind::Create.shape(), ArgShape::ModelAndText(TextField::Modelfile));
        assert_eq!(request.modelfile.as_deref(), Some("FROM llama3 SYSTEM hi"));
        assert!(request.prompt.is_none());
    }

    #[test]
    fn test_model_commands_collect_extra_tokens() {
        let request = run("pull llama3 now please");
        assert_eq!(request.model.as_deref(), Some("llama3"));
        assert_eq!(request.extra, vec!["now", "please"]);
    }

    #[test]
    fn test_missing_arguments_still_parse() {
        let request = run("show");
        assert_eq!(request.kind, CommandKind::Show);
        assert!(request.model.is_none());
    }

    #[test]
    fn test_special_words() {
        assert_eq!(parse_line("").unwrap(), ReplAction::Empty);
        assert_eq!(parse_line("   ").unwrap(), ReplAction::Empty);
        assert_eq!(parse_line("exit").unwrap(), ReplAction::Exit);
        assert_eq!(parse_line("QUIT now").unwrap(), ReplAction::Exit);
        assert_eq!(parse_line("help").unwrap(), ReplAction::Help(None));
        assert_eq!(
            parse_line("? chat").unwrap(),
            ReplAction::Help(Some("chat".to_string()))
        );
    }

    #[test]
    fn test_question_mark_glued_to_topic() {
        assert_eq!(
            parse_line("?chat").unwrap(),
            ReplAction::Help(Some("chat".to_string()))
        );
        assert_eq!(
            parse_line("  ?pull extra").unwrap(),
            ReplAction::Help(Some("pull".to_string()))
        );
        assert_eq!(parse_line("?").unwrap(), ReplAction::Help(None));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_line("run llama3").unwrap_err(),
            ParseError::UnknownCommand("run".to_string())
        );
    }

    #[test]
    fn test_command_words_are_case_insensitive() {
        assert_eq!(run("LIST").kind, CommandKind::List);
        assert_eq!(run("Generate m hi").kind, CommandKind::Generate);
    }

    #[test]
    fn test_prompt_label() {
        assert_eq!(prompt_label(&Endpoint::default()), "ollama");
        assert_eq!(prompt_label(&Endpoint::parse("localhost").unwrap()), "ollama");
        assert_eq!(prompt_label(&Endpoint::parse("gpu-box:8080").unwrap()), "gpu-box");
    }
}

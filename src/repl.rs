// repl.rs

use std::io::{IsTerminal, Write};

use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use thiserror::Error;

use crate::builtins::{format_history, Command};
use crate::config::ShellConfig;
use crate::histfile::HistoryError;
use crate::history::HistoryStore;
use crate::launcher::{LaunchError, ProcessLauncher};
use crate::parser::{clamp_line, ParsedLine};
use crate::util::writeln_ignore_broken_pipe;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("line editor failed: {0}")]
    Editor(#[from] ReadlineError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Line(String),
    Interrupted,
    Eof,
}

pub trait LineReader {
    /// One line without its trailing newline.
    fn read_line(&mut self, prompt: &str) -> Result<Input, ReadError>;

    fn is_interactive(&self) -> bool;
}

pub struct EditorReader {
    editor: DefaultEditor,
    interactive: bool,
}

impl EditorReader {
    pub fn new() -> Result<Self, ReadError> {
        let config = Config::builder().auto_add_history(false).build();
        let editor = DefaultEditor::with_config(config)?;
        Ok(Self {
            editor,
            interactive: std::io::stdin().is_terminal(),
        })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<Input, ReadError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(err.into()),
        }
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<R, L, W> {
    config: ShellConfig,
    reader: R,
    launcher: L,
    history: HistoryStore,
    out: W,
}

impl<R: LineReader, L: ProcessLauncher, W: Write> Shell<R, L, W> {
    pub fn new(config: ShellConfig, reader: R, launcher: L, history: HistoryStore, out: W) -> Self {
        Self {
            config,
            reader,
            launcher,
            history,
            out,
        }
    }

    /// Reads and executes lines until `exit`/`quit`, or end of piped input.
    pub fn run(&mut self) -> Result<(), ReadError> {
        loop {
            match self.reader.read_line(&self.config.prompt)? {
                Input::Line(line) => {
                    if self.execute_line(&line) == Flow::Exit {
                        break;
                    }
                }
                Input::Interrupted => continue,
                Input::Eof if self.reader.is_interactive() => continue,
                Input::Eof => break,
            }
        }
        log::info!("session ended at command {}", self.history.last_number());
        Ok(())
    }

    pub fn execute_line(&mut self, raw: &str) -> Flow {
        let typed = clamp_line(raw, self.config.max_line);
        if typed.is_empty() {
            return Flow::Continue;
        }
        let parsed = ParsedLine::parse(typed);
        let command = Command::classify(&parsed);
        log::debug!("{:?} <- {:?}", command, parsed.tokens());

        let line = match command {
            Command::Exit => return Flow::Exit,
            Command::History => {
                for row in format_history(&self.history) {
                    self.say(&row);
                }
                return Flow::Continue;
            }
            Command::RecallRecent => match self.history.most_recent() {
                Some(text) => text.to_string(),
                None => {
                    self.say("No commands found.");
                    return Flow::Continue;
                }
            },
            Command::RecallNumber(None) => {
                self.say("Invalid number formatting.");
                return Flow::Continue;
            }
            Command::RecallNumber(Some(number)) => match self.history.by_number(number) {
                Some(text) => text.to_string(),
                None => {
                    self.say("Invalid command number.");
                    return Flow::Continue;
                }
            },
            Command::External => typed.to_string(),
        };

        // Recalled lines run as typed, but are never dispatched as built-ins again.
        let parsed = if command == Command::External {
            parsed
        } else {
            ParsedLine::parse(&line)
        };
        self.run_external(&parsed);
        self.record(&line);
        Flow::Continue
    }

    fn run_external(&mut self, parsed: &ParsedLine) {
        let Some((program, args)) = parsed.argv().split_first() else {
            self.say("Command not recognized.");
            return;
        };
        let handle = match self.launcher.launch(program, args) {
            Ok(handle) => handle,
            Err(LaunchError::Fork(errno)) => {
                log::warn!("fork failed for {}: {}", program, errno);
                self.say("Fork did not work.");
                return;
            }
            Err(err) => {
                log::debug!("{} not launched: {}", program, err);
                self.say("Command not recognized.");
                return;
            }
        };
        if parsed.background() {
            log::debug!("{} left running in the background", program);
            return;
        }
        match self.launcher.wait(handle) {
            Ok(exit) => log::debug!("{} finished: {:?}", program, exit),
            Err(err) => log::warn!("{}", err),
        }
    }

    fn record(&mut self, line: &str) {
        if let Err(err) = self.history.add(line) {
            log::warn!("{}", err);
            self.say("Could not save history.");
        }
    }

    pub fn report_load_error(&mut self, err: &HistoryError) {
        log::warn!("{}", err);
        match err {
            HistoryError::Corrupted { .. } => self.say("History file corrupted."),
            _ => self.say("Could not read history."),
        }
    }

    fn say(&mut self, message: &str) {
        if let Err(err) = writeln_ignore_broken_pipe(&mut self.out, message) {
            log::debug!("could not print {:?}: {}", message, err);
        }
    }
}

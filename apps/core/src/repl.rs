//! Terminal front-end: reads lines, turns them into controller requests.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing::{debug, error};

use crate::actors::messages::{ActorError, AppError, ClearOutcome};
use crate::actors::supervisor::ControllerHandle;
use crate::export::ExportFormat;
use crate::models::TagFilter;
use crate::render::terminal::InputBuffer;

const PROMPT: &str = "you> ";
const CONFIRM_CLEAR_PROMPT: &str = "Clear all history? [y/N] ";

const COMMANDS: &[&str] = &[
    "/history", "/filter", "/view", "/copy", "/clear", "/export", "/snapshot", "/help", "/quit",
];

const HELP: &str = "\
Type a question and press Enter to ask.
  /history                     show the history sidebar
  /filter <all|general|programming|science|career>
  /view <id>                   put a past question back in the input
  /copy <id>                   copy a past answer to the clipboard
  /clear                       delete all history (asks first)
  /export <txt|json>           save the history to a file
  /snapshot                    save an HTML rendering of the chat
  /help                        show this help
  /quit, /exit                 leave (Ctrl-D works too)";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    History,
    Filter(TagFilter),
    View(i64),
    Copy(i64),
    Clear,
    Export(ExportFormat),
    Snapshot,
    Help,
    Quit,
}

/// Lines starting with `/` are commands; anything else, blank included, is a question.
/// Words like "quit" are questions too; leaving takes `/quit` or Ctrl-D.
pub fn parse_command(line: &str) -> Result<Command, AppError> {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Ok(Command::Ask(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next();

    match (name.as_str(), arg) {
        ("history", _) => Ok(Command::History),
        ("filter", Some(value)) => Ok(Command::Filter(value.parse()?)),
        ("view", Some(id)) => Ok(Command::View(parse_id(id)?)),
        ("copy", Some(id)) => Ok(Command::Copy(parse_id(id)?)),
        ("clear", _) => Ok(Command::Clear),
        ("export", Some(format)) => Ok(Command::Export(format.parse()?)),
        ("snapshot", _) => Ok(Command::Snapshot),
        ("help", _) => Ok(Command::Help),
        ("quit" | "exit", _) => Ok(Command::Quit),
        ("filter" | "view" | "copy" | "export", None) => Err(AppError::Validation(format!(
            "/{} needs an argument (see /help)",
            name
        ))),
        _ => Err(AppError::Validation(format!(
            "Unknown command '/{}' (see /help)",
            name
        ))),
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| AppError::Validation(format!("'{}' is not a history id", raw)))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// rustyline helper providing completion, highlighting and hints for slash commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Runs the read-eval-print loop until the user quits.
pub async fn run(controller: ControllerHandle, input: InputBuffer) -> Result<()> {
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== ChatHelper ===".bright_magenta().bold());
    println!(
        "{}",
        "Ask a question, or type /help for commands.".bright_black()
    );

    loop {
        let initial = input.take();
        match rl.readline_with_initial(PROMPT, (initial.as_str(), "")) {
            Ok(line) => {
                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}", e.to_string().red());
                        continue;
                    }
                };
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.trim());
                }
                if command == Command::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if let Err(e) = dispatch(&controller, &mut rl, command).await {
                    if matches!(e, AppError::Actor(ActorError::Closed(_))) {
                        error!("Controller is gone: {}", e);
                        return Err(e.into());
                    }
                    debug!("Command failed: {}", e);
                    eprintln!("{}", e.to_string().red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                error!("Readline failure: {:?}", err);
                return Err(err.into());
            }
        }
    }

    controller.shutdown().await?;
    Ok(())
}

async fn dispatch(
    controller: &ControllerHandle,
    rl: &mut Editor<CliHelper, DefaultHistory>,
    command: Command,
) -> Result<(), AppError> {
    match command {
        Command::Ask(question) => {
            controller.ask(question).await?;
        }
        Command::History => controller.refresh_sidebar().await?,
        Command::Filter(filter) => controller.set_filter(filter).await?,
        Command::View(id) => {
            controller.view_record(id).await?;
        }
        Command::Copy(id) => match controller.copy_answer(id).await {
            // Already painted by the view.
            Err(AppError::Clipboard(_) | AppError::Validation(_)) => {}
            other => other?,
        },
        Command::Clear => {
            let confirmed = match rl.readline(CONFIRM_CLEAR_PROMPT) {
                Ok(answer) => is_yes(&answer),
                Err(_) => false,
            };
            if controller.clear_history(confirmed).await? == ClearOutcome::NotConfirmed {
                println!("{}", "History kept.".bright_black());
            }
        }
        Command::Export(format) => painted_by_view(controller.export(format).await)?,
        Command::Snapshot => painted_by_view(controller.snapshot().await)?,
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

/// File errors are shown by the view; only transport failures go back to the loop.
fn painted_by_view<T>(result: Result<T, AppError>) -> Result<(), AppError> {
    match result {
        Err(e @ AppError::Actor(_)) => Err(e),
        _ => Ok(()),
    }
}

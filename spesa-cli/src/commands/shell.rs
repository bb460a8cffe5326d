//! Interactive shell.
//!
//! Reads one command per line and applies it to a single tracker, so state
//! that is never persisted (the edit in progress, the current view) lives
//! for the whole session. This is the only way to edit a saved session.
//!
//! Each line is split like a shell command line and parsed with clap, reusing
//! the `cart`, `history` and `settings` subcommands.

use clap::{Args, Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead, IsTerminal, Write};

use spesa_core::{KeyValueStore, ShoppingTracker, View};

use super::cart::{CartCommand, CartSubcommand};
use super::history::{HistoryCommand, HistorySubcommand};
use super::ids::{resolve_id, short_id};
use super::render::{commit_label, render_view};
use super::settings::{SettingsCommand, SettingsSubcommand};

#[derive(Args)]
pub struct ShellCommand {}

/// One line typed at the shell prompt.
#[derive(Parser)]
#[command(
    name = "spesa",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]"
)]
struct ShellLine {
    #[command(subcommand)]
    action: ShellAction,
}

#[derive(Subcommand)]
enum ShellAction {
    #[command(flatten)]
    Cart(CartSubcommand),

    /// Browse saved shopping sessions
    History(HistoryCommand),

    /// Show or change preferences
    Settings(SettingsCommand),

    /// Load a saved session into the list for editing
    Edit {
        /// Session id (or a unique prefix of it)
        id: String,
    },

    /// Switch view (new, history, settings)
    View { view: String },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

impl ShellCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        tracker: &mut ShoppingTracker<S>,
        system_prefers_dark: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        // Piped input runs as a plain script
        if !stdin.is_terminal() {
            run_shell(tracker, stdin.lock(), &mut stdout, system_prefers_dark)?;
            return Ok(());
        }

        let mut editor = DefaultEditor::new()?;
        banner(tracker, &mut stdout, system_prefers_dark)?;

        loop {
            match editor.readline(&prompt(tracker)) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    let flow = execute(tracker, &line, &mut stdout, system_prefers_dark)?;
                    if let Flow::Quit = flow {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    writeln!(stdout, "Type 'quit' to leave the shell.")?;
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }

        farewell(tracker, &mut stdout)?;
        Ok(())
    }
}

/// Run the shell over `input` until `quit` or end of input, echoing prompts
/// to `out`.
pub fn run_shell<S, R, W>(
    tracker: &mut ShoppingTracker<S>,
    input: R,
    out: &mut W,
    system_prefers_dark: bool,
) -> io::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    banner(tracker, out, system_prefers_dark)?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}", prompt(tracker))?;
        out.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                writeln!(out)?;
                break;
            }
        };

        if let Flow::Quit = execute(tracker, &line, out, system_prefers_dark)? {
            break;
        }
    }

    farewell(tracker, out)
}

fn banner<S: KeyValueStore, W: Write>(
    tracker: &ShoppingTracker<S>,
    out: &mut W,
    system_prefers_dark: bool,
) -> io::Result<()> {
    writeln!(
        out,
        "spesa {} - type 'help' for commands",
        spesa_core::version()
    )?;
    render_view(out, tracker, system_prefers_dark)
}

fn farewell<S: KeyValueStore, W: Write>(
    tracker: &ShoppingTracker<S>,
    out: &mut W,
) -> io::Result<()> {
    if let Some(id) = tracker.state().editing_id() {
        writeln!(out, "Discarded unsaved changes to session {}", short_id(id))?;
    }
    Ok(())
}

fn prompt<S: KeyValueStore>(tracker: &ShoppingTracker<S>) -> String {
    match tracker.state().editing_id() {
        Some(id) => format!("spesa [editing {}]> ", short_id(id)),
        None => "spesa> ".to_string(),
    }
}

fn execute<S, W>(
    tracker: &mut ShoppingTracker<S>,
    line: &str,
    out: &mut W,
    system_prefers_dark: bool,
) -> io::Result<Flow>
where
    S: KeyValueStore,
    W: Write,
{
    let words = match shlex::split(line) {
        Some(words) => words,
        None => {
            writeln!(out, "Error: unbalanced quotes")?;
            return Ok(Flow::Continue);
        }
    };
    if words.is_empty() {
        return Ok(Flow::Continue);
    }

    // Help and usage errors are rendered by clap
    let action = match ShellLine::try_parse_from(words) {
        Ok(parsed) => parsed.action,
        Err(e) => {
            write!(out, "{}", e)?;
            return Ok(Flow::Continue);
        }
    };

    let result = match action {
        ShellAction::Quit => return Ok(Flow::Quit),
        ShellAction::Cart(command) => run_cart(tracker, command, out, system_prefers_dark),
        ShellAction::History(command) => {
            if let HistorySubcommand::List { .. } = command.command {
                tracker.set_view(View::History);
            }
            command.run(tracker, out)
        }
        ShellAction::Settings(command) => {
            if let SettingsSubcommand::Show { .. } = command.command {
                tracker.set_view(View::Settings);
            }
            command.run(tracker, system_prefers_dark, out)
        }
        ShellAction::Edit { id } => start_edit(tracker, &id, out, system_prefers_dark),
        ShellAction::View { view } => match View::from_name(&view) {
            Some(view) => {
                tracker.set_view(view);
                render_view(out, tracker, system_prefers_dark).map_err(Into::into)
            }
            None => Err(format!(
                "Unknown view '{}': expected new, history or settings",
                view
            )
            .into()),
        },
    };

    if let Err(e) = result {
        writeln!(out, "Error: {}", e)?;
    }
    Ok(Flow::Continue)
}

fn run_cart<S, W>(
    tracker: &mut ShoppingTracker<S>,
    command: CartSubcommand,
    out: &mut W,
    system_prefers_dark: bool,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: KeyValueStore,
    W: Write,
{
    let was_editing = tracker.state().is_editing();
    let saving = matches!(command, CartSubcommand::Save);
    if let CartSubcommand::List { .. } = command {
        tracker.set_view(View::New);
    }

    CartCommand { command }.run(tracker, out)?;

    // A new session switches to history; show it
    if saving && !was_editing && tracker.view() == View::History {
        render_view(out, tracker, system_prefers_dark)?;
    }
    Ok(())
}

fn start_edit<S, W>(
    tracker: &mut ShoppingTracker<S>,
    prefix: &str,
    out: &mut W,
    system_prefers_dark: bool,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: KeyValueStore,
    W: Write,
{
    let id = resolve_id(tracker.history().iter().map(|s| &s.id), prefix)?;
    if !tracker.start_edit(&id) {
        return Err(format!("Session not found: {}", prefix).into());
    }

    render_view(out, tracker, system_prefers_dark)?;
    writeln!(
        out,
        "Type 'save' to {}.",
        commit_label(tracker.state()).to_lowercase()
    )?;
    Ok(())
}

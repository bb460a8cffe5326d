use clap::{Args, Subcommand};
use std::io::Write;

use spesa_core::{KeyValueStore, ShoppingTracker};

use super::cart::OutputFormat;
use super::ids::resolve_id;
use super::render::{render_history, render_session};

#[derive(Args)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub command: HistorySubcommand,
}

#[derive(Subcommand)]
pub enum HistorySubcommand {
    /// List saved shopping sessions, most recent first
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the products of one session
    Show {
        /// Session id (or a unique prefix of it)
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

impl HistoryCommand {
    pub fn run<S: KeyValueStore, W: Write>(
        &self,
        tracker: &ShoppingTracker<S>,
        out: &mut W,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let history = tracker.history();

        match &self.command {
            HistorySubcommand::List { format } => {
                match format {
                    OutputFormat::Json => {
                        writeln!(out, "{}", serde_json::to_string_pretty(history)?)?;
                    }
                    OutputFormat::Table => render_history(out, history)?,
                }
                Ok(())
            }

            HistorySubcommand::Show { id, format } => {
                let session_id = resolve_id(history.iter().map(|s| &s.id), id)?;
                let session = history
                    .find_by_id(&session_id)
                    .ok_or_else(|| format!("Session not found: {}", id))?;

                match format {
                    OutputFormat::Json => {
                        writeln!(out, "{}", serde_json::to_string_pretty(session)?)?;
                    }
                    OutputFormat::Table => render_session(out, session)?,
                }
                Ok(())
            }
        }
    }
}

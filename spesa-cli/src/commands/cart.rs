//! Current shopping list CLI commands.
//!
//! One-shot commands always work on the draft list; editing a saved
//! session is only possible inside `spesa shell`.

use clap::{Args, Subcommand, ValueEnum};
use std::io::Write;

use spesa_core::{format_amount, CommitOutcome, ItemEntry, KeyValueStore, ShoppingTracker};

use super::ids::{resolve_id, short_id};
use super::render::render_current_list;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args)]
pub struct CartCommand {
    #[command(subcommand)]
    pub command: CartSubcommand,
}

#[derive(Subcommand)]
pub enum CartSubcommand {
    /// Show the current list with its running total
    #[command(alias = "ls")]
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Add a product to the current list
    Add {
        /// Product name
        name: String,

        /// Unit price ("2.50" or "2,50"; trailing text such as "€" is ignored)
        #[arg(allow_hyphen_values = true)]
        price: String,

        /// Quantity
        #[arg(long, short, default_value = "1", allow_hyphen_values = true)]
        qty: String,
    },

    /// Remove a product from the current list
    #[command(alias = "rm")]
    Remove {
        /// Line id (or a unique prefix of it)
        id: String,
    },

    /// Save the current list to history
    Save,
}

impl CartCommand {
    pub fn run<S: KeyValueStore, W: Write>(
        &self,
        tracker: &mut ShoppingTracker<S>,
        out: &mut W,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            CartSubcommand::List { format } => {
                match format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "items": tracker.current().lines(),
                            "total": tracker.total(),
                            "vouchers": tracker.voucher_breakdown(),
                        });
                        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
                    }
                    OutputFormat::Table => render_current_list(out, tracker)?,
                }
                Ok(())
            }

            CartSubcommand::Add { name, price, qty } => {
                let mut entry = ItemEntry::new(name.as_str(), price.as_str(), qty.as_str());
                let id = tracker.add_entry(&mut entry)?;

                writeln!(out, "Added '{}' ({})", name.trim(), short_id(&id))?;
                writeln!(out, "Running total: {}", format_amount(tracker.total()))?;
                Ok(())
            }

            CartSubcommand::Remove { id } => {
                let line_id = resolve_id(tracker.current().lines().iter().map(|l| &l.id), id)?;
                let name = tracker
                    .current()
                    .find(&line_id)
                    .map(|l| l.name.clone())
                    .unwrap_or_default();

                tracker.remove_line(&line_id);
                writeln!(out, "Removed '{}'", name)?;
                Ok(())
            }

            CartSubcommand::Save => {
                match tracker.commit() {
                    Some(outcome) => {
                        let verb = match outcome {
                            CommitOutcome::Created { .. } => "Saved",
                            CommitOutcome::Updated { .. } => "Updated",
                        };
                        writeln!(
                            out,
                            "{} session {} (total {})",
                            verb,
                            short_id(outcome.id()),
                            format_amount(outcome.total())
                        )?;
                    }
                    None => writeln!(out, "Nothing to save: the list is empty")?,
                }
                Ok(())
            }
        }
    }
}

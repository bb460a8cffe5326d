use clap::{Args, Subcommand};
use std::io::Write;

use spesa_core::{format_amount, AccentColor, KeyValueStore, ShoppingTracker, Theme};

use super::cart::OutputFormat;
use super::render::render_settings;

#[derive(Args)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Show the current settings
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Set the colour theme (light, dark, amoled, system)
    Theme { theme: String },

    /// Set the accent colour (cyan, sky, blue, indigo, violet, fuchsia, rose, emerald)
    Accent { color: String },

    /// Set the value of one meal voucher (empty or 0 disables tracking)
    Voucher {
        #[arg(allow_hyphen_values = true, default_value = "")]
        value: String,
    },
}

impl SettingsCommand {
    pub fn run<S: KeyValueStore, W: Write>(
        &self,
        tracker: &mut ShoppingTracker<S>,
        system_prefers_dark: bool,
        out: &mut W,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            SettingsSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        let settings = tracker.settings();
                        let appearance = settings.theme.resolve(system_prefers_dark);
                        let output = serde_json::json!({
                            "settings": settings,
                            "appearance": appearance,
                            "palette": settings.accent_color.palette(appearance),
                        });
                        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
                    }
                    OutputFormat::Table => {
                        render_settings(out, tracker.settings(), system_prefers_dark)?
                    }
                }
                Ok(())
            }

            SettingsSubcommand::Theme { theme } => {
                let theme = Theme::from_name(theme).ok_or_else(|| {
                    format!(
                        "Unknown theme '{}'. Choose one of: {}",
                        theme,
                        names(Theme::ALL.iter().map(Theme::as_str))
                    )
                })?;
                tracker.set_theme(theme);
                writeln!(out, "Theme set to {}", theme)?;
                Ok(())
            }

            SettingsSubcommand::Accent { color } => {
                let accent = AccentColor::from_name(color).ok_or_else(|| {
                    format!(
                        "Unknown accent colour '{}'. Choose one of: {}",
                        color,
                        names(AccentColor::ALL.iter().map(AccentColor::as_str))
                    )
                })?;
                tracker.set_accent_color(accent);
                writeln!(out, "Accent colour set to {}", accent.label())?;
                Ok(())
            }

            SettingsSubcommand::Voucher { value } => {
                if !tracker.apply_voucher_input(value) {
                    return Err(format!(
                        "Invalid voucher value '{}': must be a number of 0 or more",
                        value
                    )
                    .into());
                }
                let settings = tracker.settings();
                if settings.vouchers_enabled() {
                    writeln!(
                        out,
                        "Meal voucher value set to {}",
                        format_amount(settings.meal_voucher_value)
                    )?;
                } else {
                    writeln!(out, "Meal voucher tracking disabled")?;
                }
                Ok(())
            }
        }
    }
}

fn names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

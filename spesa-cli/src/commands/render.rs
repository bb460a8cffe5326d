//! Text rendering of the three views, shared by the one-shot commands and
//! the interactive shell.

use std::io::{self, Write};

use spesa_core::{
    format_amount, AccentColor, EditState, KeyValueStore, SessionStore, Settings,
    ShoppingSession, ShoppingTracker, View, VoucherBreakdown,
};

use super::ids::short_id;

const WIDTH: usize = 52;

/// Render whatever view the tracker is on.
pub fn render_view<S: KeyValueStore, W: Write>(
    out: &mut W,
    tracker: &ShoppingTracker<S>,
    system_prefers_dark: bool,
) -> io::Result<()> {
    match tracker.view() {
        View::New => render_current_list(out, tracker),
        View::History => render_history(out, tracker.history()),
        View::Settings => render_settings(out, tracker.settings(), system_prefers_dark),
    }
}

pub fn render_current_list<S: KeyValueStore, W: Write>(
    out: &mut W,
    tracker: &ShoppingTracker<S>,
) -> io::Result<()> {
    let editing = tracker.state().editing_id();
    match editing {
        Some(id) => writeln!(out, "Editing session {}", short_id(id))?,
        None => writeln!(out, "New shopping")?,
    }
    writeln!(out, "{}", "=".repeat(WIDTH))?;

    let lines = tracker.current().lines();
    if lines.is_empty() {
        if editing.is_some() {
            writeln!(out, "No products in the list.")?;
            writeln!(out, "Add or change products.")?;
        } else {
            writeln!(out, "Your list is empty.")?;
            writeln!(out, "Add a product to get started.")?;
        }
    } else {
        for line in lines {
            writeln!(
                out,
                "{}  {:<20} {:>3} x {:>8} {:>10}",
                short_id(&line.id),
                line.name,
                line.quantity,
                format_amount(line.unit_price),
                format_amount(line.subtotal())
            )?;
        }
    }

    writeln!(out, "{}", "-".repeat(WIDTH))?;
    writeln!(out, "Running total: {}", format_amount(tracker.total()))?;
    if let Some(breakdown) = tracker.voucher_breakdown() {
        writeln!(out, "{}", voucher_line(&breakdown))?;
    }
    Ok(())
}

pub fn voucher_line(breakdown: &VoucherBreakdown) -> String {
    format!(
        "{} voucher(s) used, {} missing for the next one",
        breakdown.used,
        format_amount(breakdown.remaining_for_next)
    )
}

/// Label of the commit action for the current mode.
pub fn commit_label(state: &EditState) -> &'static str {
    if state.is_editing() {
        "Update shopping"
    } else {
        "Save shopping"
    }
}

pub fn render_history<W: Write>(out: &mut W, history: &SessionStore) -> io::Result<()> {
    writeln!(out, "History")?;
    writeln!(out, "{}", "=".repeat(WIDTH))?;

    if history.is_empty() {
        writeln!(out, "No saved shopping yet.")?;
        writeln!(out, "Complete a new shopping list to see it here.")?;
        return Ok(());
    }

    for session in history.iter() {
        writeln!(
            out,
            "{}  {:<30} {:>10}",
            short_id(&session.id),
            session.date,
            format_amount(session.total)
        )?;
    }
    Ok(())
}

pub fn render_session<W: Write>(out: &mut W, session: &ShoppingSession) -> io::Result<()> {
    writeln!(out, "Session {}", short_id(&session.id))?;
    write!(out, "{}", session)
}

pub fn render_settings<W: Write>(
    out: &mut W,
    settings: &Settings,
    system_prefers_dark: bool,
) -> io::Result<()> {
    let appearance = settings.theme.resolve(system_prefers_dark);
    let palette = settings.accent_color.palette(appearance);

    writeln!(out, "Settings")?;
    writeln!(out, "{}", "=".repeat(WIDTH))?;
    writeln!(out, "theme: {} (rendered {})", settings.theme, appearance)?;
    writeln!(
        out,
        "accent_color: {} ({})",
        settings.accent_color,
        settings.accent_color.label()
    )?;
    writeln!(
        out,
        "  accent {}  hover {}  text {}  on-accent {}",
        palette.accent, palette.hover, palette.text, palette.on_accent
    )?;
    for accent in AccentColor::ALL {
        let marker = if accent == settings.accent_color { '*' } else { ' ' };
        writeln!(
            out,
            "  {} {:<8} {:<8} {}",
            marker,
            accent.as_str(),
            accent.label(),
            accent.swatch()
        )?;
    }
    if settings.vouchers_enabled() {
        writeln!(
            out,
            "meal_voucher_value: {}",
            format_amount(settings.meal_voucher_value)
        )?;
    } else {
        writeln!(out, "meal_voucher_value: disabled")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spesa_core::{ItemEntry, MemoryStore, Theme};
    use spesa_core::Id;

    fn commit(tracker: &mut ShoppingTracker<MemoryStore>) -> Id {
        tracker.commit().unwrap().id().clone()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_list_wording() {
        let tracker = ShoppingTracker::open(MemoryStore::new());
        let output = render(|out| render_current_list(out, &tracker));
        assert!(output.contains("New shopping"));
        assert!(output.contains("Your list is empty."));
        assert!(output.contains("Running total: €0.00"));
        assert!(!output.contains("voucher"));
    }

    #[test]
    fn test_list_with_voucher_line() {
        let mut tracker = ShoppingTracker::open(MemoryStore::new());
        tracker
            .add_entry(&mut ItemEntry::new("Groceries", "17.5", "1"))
            .unwrap();

        let output = render(|out| render_current_list(out, &tracker));
        assert!(output.contains("Groceries"));
        assert!(output.contains("Running total: €17.50"));
        assert!(output.contains("2 voucher(s) used, €6.50 missing for the next one"));
    }

    #[test]
    fn test_editing_wording() {
        let mut tracker = ShoppingTracker::open(MemoryStore::new());
        tracker
            .add_entry(&mut ItemEntry::new("Milk", "1.2", "1"))
            .unwrap();
        let id = commit(&mut tracker);
        tracker.start_edit(&id);
        let line = tracker.current().lines()[0].id.clone();
        tracker.remove_line(&line);

        let output = render(|out| render_current_list(out, &tracker));
        assert!(output.contains(&format!("Editing session {}", short_id(&id))));
        assert!(output.contains("No products in the list."));
        assert_eq!(commit_label(tracker.state()), "Update shopping");
    }

    #[test]
    fn test_history_rendering() {
        let mut tracker = ShoppingTracker::open(MemoryStore::new());
        let output = render(|out| render_history(out, tracker.history()));
        assert!(output.contains("No saved shopping yet."));

        tracker
            .add_entry(&mut ItemEntry::new("Bread", "2.50", "1"))
            .unwrap();
        let id = commit(&mut tracker);

        let output = render(|out| render_view(out, &tracker, true));
        assert!(output.contains(&short_id(&id)));
        assert!(output.contains("€2.50"));

        let session = tracker.history().find_by_id(&id).unwrap();
        let output = render(|out| render_session(out, session));
        assert!(output.contains("Bread (x1)"));
    }

    #[test]
    fn test_settings_rendering() {
        let mut settings = Settings::default();
        settings.theme = Theme::System;

        let output = render(|out| render_settings(out, &settings, false));
        assert!(output.contains("theme: system (rendered light)"));
        assert!(output.contains("accent_color: cyan (Cyan)"));
        assert!(output.contains("accent #0891b2"));
        assert!(output.contains("* cyan     Cyan     #22d3ee"));
        assert!(output.contains("  rose     Rose     #f472b6"));
        assert_eq!(output.matches('*').count(), 1);
        assert!(output.contains("meal_voucher_value: €8.00"));

        settings.meal_voucher_value = 0.0;
        let output = render(|out| render_settings(out, &settings, true));
        assert!(output.contains("meal_voucher_value: disabled"));
        assert!(output.contains("accent #22d3ee"));
    }
}

//! Styled terminal output.

use std::fmt::Display;

use console::{Style, Term, style};
use livebet_business::Tone;

/// Terminal output helper for consistent styled output.
pub struct Output {
    term: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        drop(self.term.write_line(text));
    }

    /// Print a success message with a green checkmark.
    pub fn success(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("✓").green().bold()));
    }

    /// Print an error message with a red X.
    pub fn error(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("✗").red().bold()));
    }

    pub fn warning(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("⚠").yellow().bold()));
    }

    pub fn print(&self, message: impl Display) {
        self.line(&message.to_string());
    }

    pub fn newline(&self) {
        self.line("");
    }

    pub fn header(&self, message: impl Display) {
        self.line(&style(message).bold().cyan().to_string());
    }

    pub fn dim(&self, message: impl Display) {
        self.line(&style(message).dim().to_string());
    }

    /// Print a labeled value with indentation.
    pub fn labeled(&self, label: impl Display, value: impl Display) {
        self.line(&format!("  {}: {value}", style(label).dim()));
    }

    /// Print a badge-like value coloured by its tone.
    pub fn labeled_badge(&self, label: impl Display, value: impl Display, tone: Tone) {
        self.line(&format!(
            "  {}: {}",
            style(label).dim(),
            tone_style(tone).apply_to(value)
        ));
    }
}

pub fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Neutral => Style::new().dim(),
        Tone::Primary => Style::new().blue(),
        Tone::Info => Style::new().cyan(),
        Tone::Success => Style::new().green(),
        Tone::Warning => Style::new().yellow(),
        Tone::Danger => Style::new().red(),
    }
}

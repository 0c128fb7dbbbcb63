//! Cell rendering for the data table.

use egui::{Align, Layout, RichText, Ui};
use livebet_business::Cell;
use livebet_business::format::format_vnd;

use crate::utils::colors::{COLOR_GREEN, COLOR_RED, tone_color};

/// Renders one cell, right-aligned for amount columns.
pub fn render_cell(ui: &mut Ui, cell: &Cell, right: bool) {
    let layout = if right {
        Layout::right_to_left(Align::Center)
    } else {
        Layout::left_to_right(Align::Center)
    };
    ui.with_layout(layout, |ui| match cell {
        Cell::Text(text) => {
            ui.label(text);
        }
        Cell::Muted(text) => {
            ui.label(RichText::new(text).weak());
        }
        Cell::Currency { amount, signed } => {
            let text = RichText::new(format_vnd(*amount)).monospace();
            let text = match (signed, *amount) {
                (true, a) if a > 0.0 => text.color(COLOR_GREEN),
                (true, a) if a < 0.0 => text.color(COLOR_RED),
                _ => text,
            };
            ui.label(text);
        }
        Cell::Badge { text, tone } => badge(ui, text, tone_color(*tone)),
        Cell::Link { label, url } => {
            ui.hyperlink_to(label, url).on_hover_text(url);
        }
        Cell::Empty => {
            ui.label(RichText::new("-").weak());
        }
    });
}

/// A rounded, tinted label.
pub fn badge(ui: &mut Ui, text: &str, color: egui::Color32) {
    egui::Frame::new()
        .fill(color.gamma_multiply(0.15))
        .stroke(egui::Stroke::new(1.0, color))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(6, 1))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().color(color));
        });
}

//! egui renderer for [`TableView`].

use egui::{RichText, Sense, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use livebet_business::{Align, Locale, SortOrder, TableAction, TableState, TableView, Text};

use super::cells::render_cell;
use crate::utils::colors::COLOR_RED;

const ROW_HEIGHT: f32 = 24.0;

fn header_label<T>(view: &TableView<'_, T>, key: &str, label: &str) -> String {
    match &view.sort {
        Some(sort) if sort.key == key => match sort.order {
            SortOrder::Asc => format!("{label} ⬆"),
            SortOrder::Desc => format!("{label} ⬇"),
        },
        _ => label.to_owned(),
    }
}

/// Renders the table body and returns the action the user took this frame.
pub fn data_table<T>(
    ui: &mut Ui,
    id: &str,
    view: &TableView<'_, T>,
    locale: Locale,
) -> Option<TableAction> {
    let rows = match &view.state {
        TableState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(locale.t(Text::Loading));
            });
            return None;
        }
        TableState::Error(message) => {
            let mut action = None;
            ui.vertical_centered(|ui| {
                ui.colored_label(COLOR_RED, message);
                if ui.button(locale.t(Text::Retry)).clicked() {
                    action = Some(TableAction::Retry);
                }
            });
            return action;
        }
        TableState::Empty => {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(locale.t(Text::NoData)).weak());
            });
            return None;
        }
        TableState::Rows(rows) => rows,
    };

    let mut action = None;
    let mut builder = TableBuilder::new(ui)
        .id_salt(id)
        .striped(true)
        .sense(Sense::click())
        .column(TableColumn::auto().at_least(36.0));
    for _ in view.columns {
        builder = builder.column(TableColumn::auto().at_least(80.0).resizable(true));
    }

    builder
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong(locale.t(Text::Number));
            });
            for column in view.columns {
                header.col(|ui| {
                    let label = header_label(view, column.key, &column.label);
                    if column.is_sortable() {
                        if ui.button(RichText::new(label).strong()).clicked() {
                            action = Some(TableAction::HeaderClicked(column.key.to_owned()));
                        }
                    } else {
                        ui.strong(label);
                    }
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(ROW_HEIGHT, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(RichText::new(row.number.to_string()).monospace());
                    });
                    for column in view.columns {
                        table_row.col(|ui| {
                            let right = column.align == Align::Right;
                            render_cell(ui, &column.render(row.row), right);
                        });
                    }
                    if table_row.response().clicked() {
                        action = Some(TableAction::RowClicked(row.key.clone()));
                    }
                });
            }
        });

    action
}

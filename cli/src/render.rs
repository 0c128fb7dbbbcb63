//! Plain-text rendering of a table view.

use livebet_business::{
    Align, Column, Locale, PageItem, PaginationView, SortOrder, SortState, TableState, TableView,
    Text,
};
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

fn header_label<T>(column: &Column<T>, sort: Option<&SortState>) -> String {
    match sort {
        Some(sort) if sort.key == column.key => {
            let arrow = match sort.order {
                SortOrder::Asc => "↑",
                SortOrder::Desc => "↓",
            };
            format!("{} {arrow}", column.label)
        }
        _ => column.label.clone(),
    }
}

/// The table itself, or the localized placeholder for loading/empty/error states.
pub fn render_table<T>(view: &TableView<'_, T>, locale: Locale) -> String {
    let rows = match &view.state {
        TableState::Loading => return locale.t(Text::Loading).to_owned(),
        TableState::Error(message) => return message.clone(),
        TableState::Empty => return locale.t(Text::NoData).to_owned(),
        TableState::Rows(rows) => rows,
    };

    let mut builder = Builder::default();
    let mut header = vec![locale.t(Text::Number).to_owned()];
    header.extend(
        view.columns
            .iter()
            .map(|column| header_label(column, view.sort.as_ref())),
    );
    builder.push_record(header);

    for row in rows {
        let mut record = vec![row.number.to_string()];
        record.extend(view.columns.iter().map(|column| column.render(row.row).plain()));
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    for (index, column) in view.columns.iter().enumerate() {
        if column.align == Align::Right {
            table.modify(Columns::one(index + 1), Alignment::right());
        }
    }
    table.to_string()
}

/// `Showing 11 to 20 of 25 · 1 [2] 3`
pub fn render_pagination(pagination: &PaginationView, locale: Locale) -> String {
    let pages: Vec<String> = pagination
        .pages
        .iter()
        .map(|item| match item {
            PageItem::Page(page) if *page == pagination.page => format!("[{page}]"),
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "…".to_owned(),
        })
        .collect();

    format!(
        "{} {} {} {} {} {} · {}",
        locale.t(Text::Showing),
        pagination.from,
        locale.t(Text::To),
        pagination.to,
        locale.t(Text::Of),
        pagination.total_items,
        pages.join(" ")
    )
}

//! Pager under the data table.

use egui::Ui;
use livebet_business::{Locale, PageItem, PaginationView, TableAction, Text};

pub fn pagination(
    ui: &mut Ui,
    id: &str,
    view: &PaginationView,
    locale: Locale,
) -> Option<TableAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label(format!(
            "{} {} {} {} {} {}",
            locale.t(Text::Showing),
            view.from,
            locale.t(Text::To),
            view.to,
            locale.t(Text::Of),
            view.total_items
        ));

        ui.separator();

        if ui
            .add_enabled(view.has_previous(), egui::Button::new(locale.t(Text::Previous)))
            .clicked()
        {
            action = Some(TableAction::GoToPage(view.page - 1));
        }
        for item in &view.pages {
            match *item {
                PageItem::Page(page) => {
                    if ui
                        .selectable_label(page == view.page, page.to_string())
                        .clicked()
                        && page != view.page
                    {
                        action = Some(TableAction::GoToPage(page));
                    }
                }
                PageItem::Ellipsis => {
                    ui.label("…");
                }
            }
        }
        if ui
            .add_enabled(view.has_next(), egui::Button::new(locale.t(Text::Next)))
            .clicked()
        {
            action = Some(TableAction::GoToPage(view.page + 1));
        }

        ui.separator();

        ui.label(locale.t(Text::RowsPerPage));
        let mut size = view.page_size;
        egui::ComboBox::from_id_salt((id, "page_size"))
            .selected_text(size.to_string())
            .show_ui(ui, |ui| {
                for option in &view.page_size_options {
                    ui.selectable_value(&mut size, *option, option.to_string());
                }
            });
        if size != view.page_size {
            action = Some(TableAction::SetPageSize(size));
        }
    });

    action
}

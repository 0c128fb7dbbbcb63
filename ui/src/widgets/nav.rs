//! Top bar: page tabs, language switch and sign out.

use egui::Ui;
use livebet_business::{Locale, Text};

use crate::state::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Navigate(Route),
    SwitchLocale(Locale),
    SignOut,
}

pub fn nav_bar(ui: &mut Ui, route: Route, locale: Locale, username: &str) -> Option<NavAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        for target in Route::ALL {
            if ui
                .selectable_label(route == target, locale.t(target.title()))
                .clicked()
                && route != target
            {
                action = Some(NavAction::Navigate(target));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(locale.t(Text::SignOut)).clicked() {
                action = Some(NavAction::SignOut);
            }
            ui.label(format!("{}, {username}", locale.t(Text::Welcome)));

            let mut selected = locale;
            egui::ComboBox::from_id_salt("locale")
                .selected_text(selected.native_name())
                .show_ui(ui, |ui| {
                    for option in Locale::ALL {
                        ui.selectable_value(&mut selected, option, option.native_name());
                    }
                });
            ui.label(locale.t(Text::Language));
            if selected != locale {
                action = Some(NavAction::SwitchLocale(selected));
            }
        });
    });

    action
}

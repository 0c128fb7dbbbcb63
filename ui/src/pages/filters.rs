//! Filter forms shown above each table.

use egui::Ui;
use livebet_business::format::capitalize;
use livebet_business::resources::{BalanceHistory, Predicts, Transactions};
use livebet_business::{Locale, Resource, ResourceQuery, Text, filter_value};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterInput {
    /// One of a fixed set of values, or all.
    Choice(&'static [&'static str]),
    /// Yes, no, or all.
    Flag,
    Number,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub label: Text,
    pub input: FilterInput,
    /// Raw form value; blank means no filter.
    pub value: String,
}

impl FilterField {
    /// The value sent in `filterBy`, or `None` when the field is blank.
    pub fn filter(&self) -> Option<Value> {
        let raw = self.value.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match self.input {
            FilterInput::Choice(_) | FilterInput::Text => Value::String(raw.to_owned()),
            FilterInput::Flag | FilterInput::Number => filter_value(raw),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    Apply,
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    fields: Vec<FilterField>,
}

impl FilterForm {
    fn field(mut self, key: &'static str, label: Text, input: FilterInput) -> Self {
        self.fields.push(FilterField {
            key,
            label,
            input,
            value: String::new(),
        });
        self
    }

    pub fn users() -> Self {
        Self::default().field("account", Text::Account, FilterInput::Text)
    }

    pub fn transactions() -> Self {
        Self::default()
            .field(
                "status",
                Text::Status,
                FilterInput::Choice(&Transactions::STATUS_FILTERS),
            )
            .field(
                "type",
                Text::Type,
                FilterInput::Choice(&Transactions::TYPE_FILTERS),
            )
    }

    pub fn predicts() -> Self {
        Self::default()
            .field(
                "status",
                Text::Status,
                FilterInput::Choice(&Predicts::STATUS_FILTERS),
            )
            .field("isWin", Text::WinResult, FilterInput::Flag)
            .field("isPaid", Text::Paid, FilterInput::Flag)
            .field("streamId", Text::Stream, FilterInput::Number)
    }

    pub fn balance_history() -> Self {
        Self::default()
            .field(
                "status",
                Text::Status,
                FilterInput::Choice(&BalanceHistory::STATUS_FILTERS),
            )
            .field(
                "type",
                Text::Type,
                FilterInput::Choice(&BalanceHistory::TYPE_FILTERS),
            )
            .field("userId", Text::UserId, FilterInput::Text)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
            field.value = value.into();
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
    }

    /// Patches filled fields into the query and removes blank ones.
    pub fn apply_to<R: Resource>(&self, query: &mut ResourceQuery<R>) {
        for field in &self.fields {
            match field.filter() {
                Some(value) => query.patch_filter(field.key, value),
                None => query.remove_filter(field.key),
            }
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, id: &str, locale: Locale) -> Option<FilterAction> {
        if self.fields.is_empty() {
            return None;
        }
        let mut action = None;

        ui.horizontal_wrapped(|ui| {
            for field in &mut self.fields {
                ui.label(locale.t(field.label));
                match field.input {
                    FilterInput::Choice(options) => {
                        choice(ui, (id, field.key), &mut field.value, options, locale);
                    }
                    FilterInput::Flag => {
                        let options = &["true", "false"];
                        choice(ui, (id, field.key), &mut field.value, options, locale);
                    }
                    FilterInput::Number | FilterInput::Text => {
                        let edit = egui::TextEdit::singleline(&mut field.value)
                            .hint_text(locale.t(Text::Search))
                            .desired_width(120.0);
                        let submitted = ui.add(edit).lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        if submitted {
                            action = Some(FilterAction::Apply);
                        }
                    }
                }
            }

            if ui.button(locale.t(Text::Apply)).clicked() {
                action = Some(FilterAction::Apply);
            }
            if ui.button(locale.t(Text::Clear)).clicked() {
                action = Some(FilterAction::Clear);
            }
        });

        if action == Some(FilterAction::Clear) {
            self.clear();
        }
        action
    }
}

fn option_label(key: &str, raw: &str, locale: Locale) -> String {
    match (key, raw) {
        ("isPaid", "true") => locale.t(Text::PaidYes).to_owned(),
        ("isPaid", "false") => locale.t(Text::PaidNo).to_owned(),
        (_, "true") => locale.t(Text::Win).to_owned(),
        (_, "false") => locale.t(Text::Lose).to_owned(),
        (_, other) => capitalize(other),
    }
}

fn choice(
    ui: &mut Ui,
    id: (&str, &str),
    value: &mut String,
    options: &[&str],
    locale: Locale,
) {
    let selected = if value.is_empty() {
        locale.t(Text::All).to_owned()
    } else {
        option_label(id.1, value, locale)
    };
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            ui.selectable_value(value, String::new(), locale.t(Text::All));
            for option in options {
                let label = option_label(id.1, option, locale);
                ui.selectable_value(value, (*option).to_owned(), label);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_fields_are_not_sent() {
        let mut form = FilterForm::predicts();
        form.set("isPaid", "false");
        form.set("streamId", " 12 ");

        let sent: Vec<_> = form
            .fields()
            .iter()
            .filter_map(|f| f.filter().map(|v| (f.key, v)))
            .collect();

        assert_eq!(sent, vec![("isPaid", json!(false)), ("streamId", json!(12))]);
    }

    #[test]
    fn text_search_stays_a_string() {
        let mut form = FilterForm::users();
        form.set("account", "1001");
        assert_eq!(form.fields()[0].filter(), Some(json!("1001")));

        form.clear();
        assert_eq!(form.fields()[0].filter(), None);
    }

    #[test]
    fn balance_history_filters_by_user() {
        let keys: Vec<_> = FilterForm::balance_history()
            .fields()
            .iter()
            .map(|f| f.key)
            .collect();
        assert_eq!(keys, ["status", "type", "userId"]);
    }
}

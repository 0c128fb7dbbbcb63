use serde::{Deserialize, Serialize};

use crate::{Cell, Column, Locale, Resource, SortKey, Text, Tone};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub bank: String,
    #[serde(default)]
    pub amount: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Users;

impl Resource for Users {
    type Row = User;

    const NAME: &'static str = "users";
    const LIST_ENDPOINT: &'static str = "admin/user/list";
    const TITLE: Text = Text::Users;

    fn columns(locale: Locale) -> Vec<Column<User>> {
        vec![
            Column::new("account", locale.t(Text::Account), |u: &User| {
                Cell::text(u.account.clone())
            })
            .sortable_by(|u: &User| SortKey::from(u.account.as_str())),
            Column::new("bank", locale.t(Text::Bank), |u: &User| {
                Cell::badge(u.bank.clone(), Tone::Neutral)
            })
            .sortable_by(|u: &User| SortKey::from(u.bank.as_str())),
            Column::new("amount", locale.t(Text::Amount), |u: &User| {
                Cell::currency(u.amount)
            })
            .sortable_by(|u: &User| SortKey::Number(u.amount))
            .align_right(),
        ]
    }
}

use serde::{Deserialize, Serialize};

use super::{MovementKind, RecordStatus, time_cell, time_key};
use crate::{Cell, Column, Locale, Resource, SortKey, Text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub amount: f64,
    pub status: RecordStatus,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy)]
pub struct Transactions;

impl Transactions {
    /// Values accepted by the `status` filter.
    pub const STATUS_FILTERS: [&'static str; 4] = ["success", "failed", "unknow", "pending"];
    /// Values accepted by the `type` filter.
    pub const TYPE_FILTERS: [&'static str; 2] = ["deposit", "withdraw"];
}

impl Resource for Transactions {
    type Row = Transaction;

    const NAME: &'static str = "transactions";
    const LIST_ENDPOINT: &'static str = "admin/transaction/list";
    const TITLE: Text = Text::Transactions;

    fn columns(locale: Locale) -> Vec<Column<Transaction>> {
        vec![
            Column::new("amount", locale.t(Text::Amount), |t: &Transaction| {
                Cell::Currency {
                    amount: t.amount,
                    signed: true,
                }
            })
            .sortable_by(|t: &Transaction| SortKey::Number(t.amount))
            .align_right(),
            Column::new("status", locale.t(Text::Status), move |t: &Transaction| {
                t.status.badge(locale)
            })
            .sortable_by(|t: &Transaction| SortKey::from(t.status.as_str())),
            Column::new("type", locale.t(Text::Type), |t: &Transaction| t.kind.badge())
                .sortable_by(|t: &Transaction| SortKey::from(t.kind.as_str())),
            Column::new("message", locale.t(Text::Message), |t: &Transaction| {
                if t.message.is_empty() {
                    Cell::Empty
                } else {
                    Cell::text(t.message.clone())
                }
            }),
            Column::new("time", locale.t(Text::Time), |t: &Transaction| {
                time_cell(if t.time.is_empty() {
                    &t.created_at
                } else {
                    &t.time
                })
            })
            .sortable_by(|t: &Transaction| time_key(&t.time)),
        ]
    }
}

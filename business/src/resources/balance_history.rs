use serde::{Deserialize, Serialize};

use super::{MovementKind, RecordStatus, UserRef, time_cell, time_key};
use crate::{Cell, Column, Locale, QueryParams, Resource, SortKey, SortOrder, Text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceHistoryEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: UserRef,
    #[serde(default)]
    pub amount: f64,
    pub status: RecordStatus,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy)]
pub struct BalanceHistory;

impl BalanceHistory {
    pub const STATUS_FILTERS: [&'static str; 3] = ["success", "pending", "failed"];
    pub const TYPE_FILTERS: [&'static str; 2] = ["win", "play"];
}

impl Resource for BalanceHistory {
    type Row = BalanceHistoryEntry;

    const NAME: &'static str = "balance-history";
    const LIST_ENDPOINT: &'static str = "admin/balance-history/list";
    const TITLE: Text = Text::BalanceHistory;

    fn default_params() -> QueryParams {
        QueryParams::default().sorted_by("createdAt", SortOrder::Desc)
    }

    fn columns(locale: Locale) -> Vec<Column<BalanceHistoryEntry>> {
        vec![
            Column::new("userId", locale.t(Text::Account), |b: &BalanceHistoryEntry| {
                Cell::text(b.user_id.account.clone())
            })
            .sortable_by(|b: &BalanceHistoryEntry| SortKey::from(b.user_id.account.as_str())),
            Column::new("amount", locale.t(Text::Amount), |b: &BalanceHistoryEntry| {
                Cell::currency(b.amount)
            })
            .sortable_by(|b: &BalanceHistoryEntry| SortKey::Number(b.amount))
            .align_right(),
            Column::new("type", locale.t(Text::Type), |b: &BalanceHistoryEntry| {
                b.kind.badge()
            })
            .sortable_by(|b: &BalanceHistoryEntry| SortKey::from(b.kind.as_str())),
            Column::new(
                "status",
                locale.t(Text::Status),
                move |b: &BalanceHistoryEntry| b.status.badge(locale),
            )
            .sortable_by(|b: &BalanceHistoryEntry| SortKey::from(b.status.as_str())),
            Column::new(
                "createdAt",
                locale.t(Text::CreatedAt),
                |b: &BalanceHistoryEntry| time_cell(&b.created_at),
            )
            .sortable_by(|b: &BalanceHistoryEntry| time_key(&b.created_at)),
        ]
    }
}

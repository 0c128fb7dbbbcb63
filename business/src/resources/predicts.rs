use serde::{Deserialize, Serialize};

use super::{RecordStatus, UserRef, time_cell, time_key, win_badge};
use crate::{Cell, Column, Locale, Resource, SortKey, Text, Tone};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predict {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: UserRef,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub message: String,
    /// 1 predicts a win, anything else a loss.
    #[serde(default)]
    pub predict: i64,
    #[serde(default)]
    pub stream_id: i64,
    #[serde(default)]
    pub is_win: bool,
    #[serde(default)]
    pub is_paid: bool,
    pub status: RecordStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    /// Sequential number assigned by the backend.
    #[serde(default, rename = "id")]
    pub seq: Option<i64>,
}

impl Predict {
    pub fn predicts_win(&self) -> bool {
        self.predict == 1
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Predicts;

impl Predicts {
    pub const STATUS_FILTERS: [&'static str; 2] = ["pending", "completed"];
}

impl Resource for Predicts {
    type Row = Predict;

    const NAME: &'static str = "predicts";
    const LIST_ENDPOINT: &'static str = "admin/predict/list";
    const TITLE: Text = Text::Predicts;

    fn columns(locale: Locale) -> Vec<Column<Predict>> {
        vec![
            Column::new("userId", locale.t(Text::Account), |p: &Predict| {
                Cell::text(p.user_id.account.clone())
            })
            .sortable_by(|p: &Predict| SortKey::from(p.user_id.account.as_str())),
            Column::new("streamId", locale.t(Text::Stream), move |p: &Predict| {
                Cell::badge(
                    format!("{} {}", locale.t(Text::Stream), p.stream_id),
                    Tone::Info,
                )
            })
            .sortable_by(|p: &Predict| SortKey::from(p.stream_id)),
            Column::new("amount", locale.t(Text::Amount), |p: &Predict| {
                Cell::currency(p.amount)
            })
            .sortable_by(|p: &Predict| SortKey::Number(p.amount))
            .align_right(),
            Column::new("predict", locale.t(Text::Predict), move |p: &Predict| {
                let text = if p.predicts_win() { Text::Win } else { Text::Lose };
                Cell::text(locale.t(text))
            })
            .sortable_by(|p: &Predict| SortKey::from(p.predict)),
            Column::new("isWin", locale.t(Text::WinResult), move |p: &Predict| {
                win_badge(p.is_win, locale)
            })
            .sortable_by(|p: &Predict| SortKey::from(p.is_win)),
            Column::new("isPaid", locale.t(Text::Paid), move |p: &Predict| {
                if p.is_paid {
                    Cell::badge(locale.t(Text::PaidYes), Tone::Success)
                } else {
                    Cell::badge(locale.t(Text::PaidNo), Tone::Warning)
                }
            })
            .sortable_by(|p: &Predict| SortKey::from(p.is_paid)),
            Column::new("status", locale.t(Text::Status), move |p: &Predict| {
                p.status.badge(locale)
            })
            .sortable_by(|p: &Predict| SortKey::from(p.status.as_str())),
            Column::new("createdAt", locale.t(Text::CreatedAt), |p: &Predict| {
                time_cell(&p.created_at)
            })
            .sortable_by(|p: &Predict| time_key(&p.created_at)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Predict {
        serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "userId": { "_id": "u1", "account": "1001", "bank": "ACB" },
            "amount": 20000,
            "message": "go",
            "predict": 1,
            "streamId": 7,
            "isWin": false,
            "isPaid": true,
            "status": "completed",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z",
            "id": 42
        }))
        .unwrap()
    }

    #[test]
    fn decodes_nested_user_and_sequence() {
        let row = sample();
        assert_eq!(row.user_id.account, "1001");
        assert_eq!(row.seq, Some(42));
        assert!(row.predicts_win());
    }

    #[test]
    fn renders_vietnamese_badges() {
        let row = sample();
        let columns = Predicts::columns(Locale::Vi);

        assert_eq!(columns[1].render(&row), Cell::badge("Luồng 7", Tone::Info));
        assert_eq!(columns[3].render(&row), Cell::text("Thắng"));
        assert_eq!(columns[4].render(&row), Cell::badge("Thua", Tone::Danger));
        assert_eq!(columns[5].render(&row), Cell::badge("Đã trả", Tone::Success));
        assert_eq!(columns[6].render(&row), Cell::badge("Đã kết thúc", Tone::Success));
    }
}

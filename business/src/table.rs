//! Renderer-agnostic paginated table.
//!
//! [`TableModel`] owns the local interaction state (sort column, client-side page and
//! page size) and turns a query's [`ApiData`] plus a column set into a [`TableView`]:
//! which state to draw, which rows in which order, their keys and numbers, and the
//! pager. Renderers report clicks back as [`TableAction`]s; the model applies what it
//! can locally and surfaces the rest as [`TableEvent`]s for the page to act on.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;

use crate::{PageEnvelope, SortOrder};

pub const PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 20, 50];
const MAX_VISIBLE_PAGES: u32 = 5;

/// What a query currently has to show.
#[derive(Debug, Clone)]
pub struct ApiData<T> {
    pub data: Option<Arc<PageEnvelope<T>>>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ApiData<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

impl<T> ApiData<T> {
    pub fn loaded(envelope: PageEnvelope<T>) -> Self {
        Self {
            data: Some(Arc::new(envelope)),
            ..Self::default()
        }
    }

    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[T] {
        self.data
            .as_deref()
            .and_then(PageEnvelope::rows)
            .unwrap_or_default()
    }
}

/// Visual emphasis of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Primary,
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// A rendered cell, styled by each front end in its own way.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// Secondary text such as timestamps.
    Muted(String),
    /// Amount in VND; `signed` colours it by sign.
    Currency { amount: f64, signed: bool },
    Badge { text: String, tone: Tone },
    Link { label: String, url: String },
    Empty,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        Self::Badge {
            text: text.into(),
            tone,
        }
    }

    pub fn currency(amount: f64) -> Self {
        Self::Currency {
            amount,
            signed: false,
        }
    }

    /// Plain-text form, for terminals and accessibility labels.
    pub fn plain(&self) -> String {
        match self {
            Self::Text(text) | Self::Muted(text) => text.clone(),
            Self::Currency { amount, .. } => crate::format::format_vnd(*amount),
            Self::Badge { text, .. } => text.clone(),
            Self::Link { label, .. } => label.clone(),
            Self::Empty => "-".to_owned(),
        }
    }
}

/// Value a column sorts by.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Text(_) => 3,
        }
    }

    /// Total order: missing values first, then by kind, then by value.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<f64> for SortKey {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for SortKey {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for SortKey {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

type RenderFn<T> = Arc<dyn Fn(&T) -> Cell + Send + Sync>;
type SortKeyFn<T> = Arc<dyn Fn(&T) -> SortKey + Send + Sync>;

/// One column of a feature table.
///
/// `key` doubles as the backend field name used for server-side `sortBy`.
pub struct Column<T> {
    pub key: &'static str,
    pub label: String,
    pub align: Align,
    render: RenderFn<T>,
    sort_key: Option<SortKeyFn<T>>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label.clone(),
            align: self.align,
            render: Arc::clone(&self.render),
            sort_key: self.sort_key.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.is_sortable())
            .finish()
    }
}

impl<T> Column<T> {
    pub fn new(
        key: &'static str,
        label: impl Into<String>,
        render: impl Fn(&T) -> Cell + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            label: label.into(),
            align: Align::Left,
            render: Arc::new(render),
            sort_key: None,
        }
    }

    pub fn sortable_by(mut self, key: impl Fn(&T) -> SortKey + Send + Sync + 'static) -> Self {
        self.sort_key = Some(Arc::new(key));
        self
    }

    pub fn align_right(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub fn is_sortable(&self) -> bool {
        self.sort_key.is_some()
    }

    pub fn render(&self, row: &T) -> Cell {
        (self.render)(row)
    }

    pub fn sort_key(&self, row: &T) -> SortKey {
        self.sort_key
            .as_ref()
            .map_or(SortKey::Missing, |key| key(row))
    }
}

/// How rows are paged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    /// Server-side when the response carries `totalPages` and `page`, client-side otherwise.
    #[default]
    Auto,
    Server,
    Client,
}

/// The mode actually used for a given response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedMode {
    Server,
    Client,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub mode: PaginationMode,
    pub page_size: u32,
    pub page_size_options: Vec<u32>,
    pub show_pagination: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            mode: PaginationMode::Auto,
            page_size: 10,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            show_pagination: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub order: SortOrder,
}

/// Stable identity of a row: `_id`, else `id`, else a hash of its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey(pub String);

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn row_key<T: Serialize>(row: &T) -> RowKey {
    let value = match serde_json::to_value(row) {
        Ok(value) => value,
        Err(_) => return RowKey("unkeyed".to_owned()),
    };

    if let serde_json::Value::Object(map) = &value {
        for field in ["_id", "id"] {
            match map.get(field) {
                Some(serde_json::Value::String(id)) if !id.is_empty() => {
                    return RowKey(id.clone());
                }
                Some(serde_json::Value::Number(id)) => return RowKey(id.to_string()),
                _ => {}
            }
        }
    }

    let mut hasher = DefaultHasher::new();
    value.to_string().hash(&mut hasher);
    RowKey(format!("row-{:016x}", hasher.finish()))
}

/// Finds the row a [`TableEvent::RowClicked`] refers to.
pub fn find_row<'a, T: Serialize>(rows: &'a [T], key: &RowKey) -> Option<&'a T> {
    rows.iter().find(|row| &row_key(*row) == key)
}

#[derive(Debug)]
pub struct TableRow<'a, T> {
    pub key: RowKey,
    /// 1-based position across all pages.
    pub number: u64,
    pub row: &'a T,
}

/// What to draw, in priority order: loading, error, empty, rows.
#[derive(Debug)]
pub enum TableState<'a, T> {
    Loading,
    Error(String),
    Empty,
    Rows(Vec<TableRow<'a, T>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub mode: ResolvedMode,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    /// First row shown, 1-based; 0 when there are no rows.
    pub from: u64,
    pub to: u64,
    pub pages: Vec<PageItem>,
    pub page_size_options: Vec<u32>,
}

impl PaginationView {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug)]
pub struct TableView<'a, T> {
    pub columns: &'a [Column<T>],
    pub state: TableState<'a, T>,
    pub sort: Option<SortState>,
    pub pagination: Option<PaginationView>,
}

impl<T> TableView<'_, T> {
    pub fn mode(&self) -> Option<ResolvedMode> {
        self.pagination.as_ref().map(|p| p.mode)
    }
}

/// A click reported by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    HeaderClicked(String),
    GoToPage(u32),
    SetPageSize(u32),
    RowClicked(RowKey),
    Retry,
}

/// Something the owning page has to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    PageChanged(u32),
    PageSizeChanged(u32),
    SortChanged { key: String, order: SortOrder },
    RowClicked(RowKey),
    Retry,
}

#[derive(Debug, Clone)]
pub struct TableModel {
    options: TableOptions,
    sort: Option<SortState>,
    page: u32,
    page_size: u32,
}

impl Default for TableModel {
    fn default() -> Self {
        Self::new(TableOptions::default())
    }
}

impl TableModel {
    pub fn new(options: TableOptions) -> Self {
        let page_size = options.page_size.max(1);
        Self {
            options,
            sort: None,
            page: 1,
            page_size,
        }
    }

    pub fn with_mode(mode: PaginationMode) -> Self {
        Self::new(TableOptions {
            mode,
            ..TableOptions::default()
        })
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Same column flips direction, another column starts ascending.
    pub fn toggle_sort(&mut self, key: &str) -> &SortState {
        let order = match &self.sort {
            Some(current) if current.key == key => current.order.toggled(),
            _ => SortOrder::Asc,
        };
        self.sort.insert(SortState {
            key: key.to_owned(),
            order,
        })
    }

    /// Shows `key` as sorted without toggling, e.g. to mirror a query's default sort.
    pub fn set_sort(&mut self, key: impl Into<String>, order: SortOrder) {
        self.sort = Some(SortState {
            key: key.into(),
            order,
        });
    }

    pub fn resolve_mode<T>(&self, envelope: Option<&PageEnvelope<T>>) -> ResolvedMode {
        match self.options.mode {
            PaginationMode::Server => ResolvedMode::Server,
            PaginationMode::Client => ResolvedMode::Client,
            PaginationMode::Auto => {
                let paged = envelope
                    .and_then(PageEnvelope::page_result)
                    .is_some_and(|r| r.total_pages.is_some() && r.page.is_some());
                if paged {
                    ResolvedMode::Server
                } else {
                    ResolvedMode::Client
                }
            }
        }
    }

    pub fn view<'a, T: Serialize>(
        &self,
        data: &'a ApiData<T>,
        columns: &'a [Column<T>],
    ) -> TableView<'a, T> {
        let blank = |state| TableView {
            columns,
            state,
            sort: self.sort.clone(),
            pagination: None,
        };

        if data.is_loading {
            return blank(TableState::Loading);
        }
        if let Some(message) = &data.error {
            return blank(TableState::Error(message.clone()));
        }
        let Some(envelope) = data.data.as_deref() else {
            return blank(TableState::Empty);
        };
        let Some(rows) = envelope.rows() else {
            return blank(TableState::Empty);
        };

        let mut ordered: Vec<&T> = rows.iter().collect();
        let sort_column = self.sort.as_ref().and_then(|sort| {
            columns
                .iter()
                .find(|c| c.key == sort.key && c.is_sortable())
                .map(|column| (sort.order, column))
        });
        if let Some((order, column)) = sort_column {
            ordered.sort_by(|a, b| {
                let ord = column.sort_key(a).compare(&column.sort_key(b));
                match order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }

        let mode = self.resolve_mode(Some(envelope));
        let (page, page_size, total_items, total_pages, visible) = match mode {
            ResolvedMode::Server => {
                let result = envelope.page_result();
                let page_size = result
                    .and_then(|r| r.limit)
                    .unwrap_or(self.page_size)
                    .max(1);
                let total_items = result
                    .and_then(|r| r.total)
                    .unwrap_or(rows.len() as u64);
                let total_pages = result
                    .and_then(|r| r.total_pages)
                    .unwrap_or_else(|| pages_for(total_items, page_size));
                let page = result.and_then(|r| r.page).unwrap_or(1).max(1);
                (page, page_size, total_items, total_pages, ordered)
            }
            ResolvedMode::Client => {
                let page_size = self.page_size;
                let total_items = rows.len() as u64;
                let total_pages = pages_for(total_items, page_size);
                let page = self.page.clamp(1, total_pages.max(1));
                let start = ((page - 1) * page_size) as usize;
                let visible = ordered
                    .into_iter()
                    .skip(start)
                    .take(page_size as usize)
                    .collect();
                (page, page_size, total_items, total_pages, visible)
            }
        };

        let first = u64::from(page - 1) * u64::from(page_size);
        let table_rows: Vec<TableRow<'a, T>> = visible
            .into_iter()
            .enumerate()
            .map(|(index, row)| TableRow {
                key: row_key(row),
                number: first + index as u64 + 1,
                row,
            })
            .collect();

        let (from, to) = if total_items == 0 {
            (0, 0)
        } else {
            (
                first + 1,
                (u64::from(page) * u64::from(page_size)).min(total_items),
            )
        };

        TableView {
            columns,
            state: TableState::Rows(table_rows),
            sort: self.sort.clone(),
            pagination: self.options.show_pagination.then(|| PaginationView {
                mode,
                page,
                page_size,
                total_items,
                total_pages,
                from,
                to,
                pages: page_numbers(page, total_pages),
                page_size_options: self.options.page_size_options.clone(),
            }),
        }
    }

    /// Applies a renderer action. Returns the event the page must handle, if any.
    pub fn apply(&mut self, action: TableAction, mode: ResolvedMode) -> Option<TableEvent> {
        match action {
            TableAction::HeaderClicked(key) => {
                let sort = self.toggle_sort(&key).clone();
                (mode == ResolvedMode::Server).then_some(TableEvent::SortChanged {
                    key: sort.key,
                    order: sort.order,
                })
            }
            TableAction::GoToPage(page) => match mode {
                ResolvedMode::Server => Some(TableEvent::PageChanged(page.max(1))),
                ResolvedMode::Client => {
                    self.page = page.max(1);
                    None
                }
            },
            TableAction::SetPageSize(size) => match mode {
                ResolvedMode::Server => Some(TableEvent::PageSizeChanged(size.max(1))),
                ResolvedMode::Client => {
                    self.page_size = size.max(1);
                    self.page = 1;
                    None
                }
            },
            TableAction::RowClicked(key) => Some(TableEvent::RowClicked(key)),
            TableAction::Retry => Some(TableEvent::Retry),
        }
    }
}

fn pages_for(total_items: u64, page_size: u32) -> u32 {
    u32::try_from(total_items.div_ceil(u64::from(page_size.max(1)))).unwrap_or(u32::MAX)
}

/// Numbered page buttons: up to five around `current`, plus first/last with ellipses.
pub fn page_numbers(current: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let start = current.saturating_sub(2).max(1);
    let end = total_pages.min(start + MAX_VISIBLE_PAGES - 1);
    let mut pages = Vec::with_capacity(MAX_VISIBLE_PAGES as usize + 4);

    if start > 1 {
        pages.push(PageItem::Page(1));
        if start > 2 {
            pages.push(PageItem::Ellipsis);
        }
    }
    pages.extend((start..=end).map(PageItem::Page));
    if end < total_pages {
        if end < total_pages - 1 {
            pages.push(PageItem::Ellipsis);
        }
        pages.push(PageItem::Page(total_pages));
    }
    pages
}

//! Backend access and presentation logic for the livebet admin dashboard.
//!
//! Front ends own a [`ApiClient`], log in through [`login`], and drive one
//! [`ResourceQuery`] per list page together with a [`TableModel`].

mod api;
mod config;
mod envelope;
mod error;
pub mod format;
pub mod http;
mod i18n;
mod login;
mod query;
mod resource;
pub mod resources;
mod session;
mod table;

pub use api::{ApiClient, CallOptions};
pub use config::BusinessConfig;
pub use envelope::{ApiEnvelope, ErrorBody, PageEnvelope, PageResult};
pub use error::ApiError;
pub use i18n::{Locale, Text};
pub use login::{AuthStatus, LOGIN_ENDPOINT, LoginError, LoginInput, login, logout};
pub use query::{
    DEFAULT_LIMIT, DEFAULT_PAGE, ParseSortError, QueryParams, SortOrder, filter_value, parse_sort,
};
pub use resource::{FetchJob, FetchOutcome, QueryPolicy, Resource, ResourceQuery};
pub use session::{Session, SessionStore, SessionUser};
pub use table::{
    Align, ApiData, Cell, Column, PAGE_SIZE_OPTIONS, PageItem, PaginationMode, PaginationView,
    ResolvedMode, RowKey, SortKey, SortState, TableAction, TableEvent, TableModel, TableOptions,
    TableRow, TableState, TableView, Tone, find_row, page_numbers, row_key,
};

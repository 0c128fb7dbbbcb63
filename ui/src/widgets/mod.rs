//! Reusable widgets.

pub mod cells;
mod data_table;
mod login;
mod nav;
mod pagination;

pub use data_table::data_table;
pub use login::{LoginForm, login_widget};
pub use nav::{NavAction, nav_bar};
pub use pagination::pagination;

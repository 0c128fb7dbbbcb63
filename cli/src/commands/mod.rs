//! Command implementations for the livebet CLI.

pub mod list;
pub mod livestream;
pub mod login;
pub mod session;

pub use list::run_list;
pub use livestream::{run_create, run_details, run_result};
pub use login::run_login;
pub use session::{run_logout, run_status};

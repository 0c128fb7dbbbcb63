//! egui dashboard for the livebet backend.

pub mod app;
pub mod pages;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::LivebetApp;

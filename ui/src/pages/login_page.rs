//! Login page for signed-out operators.

use egui::{Response, Ui};

use crate::state::State;
use crate::widgets;

/// Renders the login page with a centered login form.
pub fn login_page(state: &mut State, ui: &mut Ui) -> Response {
    widgets::login_widget(&mut state.login, &state.client, &state.runtime, state.locale, ui)
}

//! Login form.
//!
//! Credentials are posted on the tokio runtime; the outcome comes back over a
//! channel that the form drains once per frame.

use egui::{Align, Layout, Response, Ui};
use flume::{Receiver, Sender};
use livebet_business::{ApiClient, Locale, LoginError, LoginInput, Session, Text, login};
use log::{info, warn};
use tokio::runtime::Handle;

use crate::utils::colors::COLOR_RED;

type LoginResult = Result<Session, LoginError>;

pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    pending: bool,
    sender: Sender<LoginResult>,
    receiver: Receiver<LoginResult>,
}

impl Default for LoginForm {
    fn default() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            username: String::new(),
            password: String::new(),
            error: None,
            pending: false,
            sender,
            receiver,
        }
    }
}

impl LoginForm {
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Picks up a finished login. Returns the session when it succeeded.
    pub fn poll(&mut self) -> Option<Session> {
        let result = self.receiver.try_recv().ok()?;
        self.pending = false;
        match result {
            Ok(session) => {
                info!("Signed in as {}", session.user.user_name);
                self.password.clear();
                self.error = None;
                Some(session)
            }
            Err(error) => {
                warn!("Login failed: {error}");
                self.error = Some(error.to_string());
                None
            }
        }
    }

    /// Validates locally, then posts the credentials in the background.
    pub fn submit(&mut self, client: &ApiClient, runtime: &Handle, ctx: &egui::Context) {
        let input = LoginInput::new(self.username.clone(), self.password.clone());
        if let Err(error) = input.validate() {
            self.error = Some(error.to_string());
            return;
        }

        self.pending = true;
        self.error = None;
        let client = client.clone();
        let sender = self.sender.clone();
        let ctx = ctx.clone();
        runtime.spawn(async move {
            let result = login(&client, &input).await;
            if sender.send(result).is_err() {
                warn!("Login form dropped before the response arrived");
            }
            ctx.request_repaint();
        });
    }
}

/// Renders the centered login form.
pub fn login_widget(
    form: &mut LoginForm,
    client: &ApiClient,
    runtime: &Handle,
    locale: Locale,
    ui: &mut Ui,
) -> Response {
    let mut should_login = false;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(20.0);
            ui.heading(locale.t(Text::Dashboard));
            ui.add_space(40.0);

            if let Some(err) = &form.error {
                ui.colored_label(COLOR_RED, err);
                ui.add_space(8.0);
            }

            ui.horizontal(|ui| {
                ui.label(format!("{}:", locale.t(Text::Username)));
                ui.text_edit_singleline(&mut form.username);
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label(format!("{}:", locale.t(Text::Password)));
                let password =
                    ui.add(egui::TextEdit::singleline(&mut form.password).password(true));

                if password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    should_login = true;
                }
            });

            ui.add_space(16.0);

            if form.pending {
                ui.spinner();
                ui.label(locale.t(Text::SigningIn));
            } else {
                let can_login =
                    !form.username.trim().is_empty() && !form.password.is_empty();
                if ui
                    .add_enabled(can_login, egui::Button::new(locale.t(Text::SignIn)))
                    .clicked()
                {
                    should_login = true;
                }
            }
        })
        .response;

    if should_login && !form.pending {
        form.submit(client, runtime, ui.ctx());
    }

    response
}

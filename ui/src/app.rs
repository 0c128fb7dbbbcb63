use crate::pages::{self, Pages};
use crate::state::State;
use crate::widgets::{self, NavAction};

pub struct LivebetApp {
    pub state: State,
    pub pages: Pages,
    was_focused: bool,
}

impl LivebetApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        let pages = Pages::new(&state.client);
        Self {
            state,
            pages,
            was_focused: true,
        }
    }

    fn handle_nav(&mut self, action: NavAction) {
        match action {
            NavAction::Navigate(route) => self.state.route = route,
            NavAction::SwitchLocale(locale) => self.state.locale = locale,
            NavAction::SignOut => livebet_business::logout(&self.state.client),
        }
    }
}

impl eframe::App for LivebetApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.login.poll();

        if !self.state.client.is_authenticated() {
            egui::CentralPanel::default().show(ctx, |ui| {
                pages::login_page(&mut self.state, ui);
            });
            return;
        }

        let focused = ctx.input(|i| i.focused);
        if focused && !self.was_focused {
            self.pages.on_focus_regained(self.state.route);
        }
        self.was_focused = focused;

        self.pages
            .poll(self.state.route, &self.state.runtime, ctx);

        let username = self.state.username();
        let mut nav = None;
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                nav = widgets::nav_bar(ui, self.state.route, self.state.locale, &username);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.pages.ui(&self.state, ui);
        });

        if let Some(action) = nav {
            self.handle_nav(action);
        }
    }
}

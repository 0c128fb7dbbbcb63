//! Pages module for the application.
//!
//! - `login_page`: login form for signed-out operators
//! - `ResourcePage`: one generic list page per resource
//! - `LiveStreamsPage`: the livestream list plus its create and details dialogs

mod filters;
mod livestreams_page;
mod login_page;
mod resource_page;

use egui::Ui;
use livebet_business::ApiClient;
use livebet_business::resources::{BalanceHistory, Predicts, Transactions, Users};
use tokio::runtime::Handle;

pub use filters::{FilterAction, FilterField, FilterForm, FilterInput};
pub use livestreams_page::{CreateDialog, LiveStreamsPage};
pub use login_page::login_page;
pub use resource_page::ResourcePage;

use crate::state::{Route, State};

/// Every dashboard page, kept alive across navigation so their caches survive.
pub struct Pages {
    pub users: ResourcePage<Users>,
    pub transactions: ResourcePage<Transactions>,
    pub predicts: ResourcePage<Predicts>,
    pub balance_history: ResourcePage<BalanceHistory>,
    pub livestreams: LiveStreamsPage,
}

impl Pages {
    pub fn new(client: &ApiClient) -> Self {
        Self {
            users: ResourcePage::new(client.clone(), FilterForm::users()),
            transactions: ResourcePage::new(client.clone(), FilterForm::transactions()),
            predicts: ResourcePage::new(client.clone(), FilterForm::predicts()),
            balance_history: ResourcePage::new(client.clone(), FilterForm::balance_history()),
            livestreams: LiveStreamsPage::new(client.clone()),
        }
    }

    /// Drives the visible page's query; hidden pages stay idle until shown.
    pub fn poll(&mut self, route: Route, runtime: &Handle, ctx: &egui::Context) {
        match route {
            Route::Users => self.users.poll(runtime, ctx),
            Route::Transactions => self.transactions.poll(runtime, ctx),
            Route::Predicts => self.predicts.poll(runtime, ctx),
            Route::BalanceHistory => self.balance_history.poll(runtime, ctx),
            Route::LiveStreams => self.livestreams.poll(runtime, ctx),
        }
    }

    pub fn on_focus_regained(&mut self, route: Route) {
        match route {
            Route::Users => self.users.query_mut().on_focus_regained(),
            Route::Transactions => self.transactions.query_mut().on_focus_regained(),
            Route::Predicts => self.predicts.query_mut().on_focus_regained(),
            Route::BalanceHistory => self.balance_history.query_mut().on_focus_regained(),
            Route::LiveStreams => self.livestreams.list.query_mut().on_focus_regained(),
        }
    }

    pub fn ui(&mut self, state: &State, ui: &mut Ui) {
        let locale = state.locale;
        match state.route {
            Route::Users => {
                self.users.ui(ui, locale);
            }
            Route::Transactions => {
                self.transactions.ui(ui, locale);
            }
            Route::Predicts => {
                self.predicts.ui(ui, locale);
            }
            Route::BalanceHistory => {
                self.balance_history.ui(ui, locale);
            }
            Route::LiveStreams => self.livestreams.ui(ui, &state.runtime, locale),
        }
    }
}

use livebet_business::{ApiClient, BusinessConfig, Locale, SessionStore, Text};
use tokio::runtime::Handle;

use crate::widgets::LoginForm;

/// Pages reachable from the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Users,
    Transactions,
    Predicts,
    BalanceHistory,
    LiveStreams,
}

impl Route {
    pub const ALL: [Self; 5] = [
        Self::Users,
        Self::Transactions,
        Self::Predicts,
        Self::BalanceHistory,
        Self::LiveStreams,
    ];

    pub fn title(self) -> Text {
        match self {
            Self::Users => Text::Users,
            Self::Transactions => Text::Transactions,
            Self::Predicts => Text::Predicts,
            Self::BalanceHistory => Text::BalanceHistory,
            Self::LiveStreams => Text::LiveStreams,
        }
    }
}

/// The main application state.
pub struct State {
    pub client: ApiClient,
    /// Runtime that background requests are spawned on.
    pub runtime: Handle,
    pub locale: Locale,
    pub route: Route,
    pub login: LoginForm,
}

impl State {
    pub fn new(config: BusinessConfig, runtime: Handle) -> Self {
        Self {
            client: ApiClient::new(config, SessionStore::default()),
            runtime,
            locale: Locale::default(),
            route: Route::default(),
            login: LoginForm::default(),
        }
    }

    /// State against `base_url`, spawning on the current tokio runtime.
    pub fn test(base_url: String) -> Self {
        Self::new(BusinessConfig::new(base_url), Handle::current())
    }

    pub fn username(&self) -> String {
        self.client
            .sessions()
            .current()
            .map(|session| session.user.user_name)
            .unwrap_or_default()
    }
}

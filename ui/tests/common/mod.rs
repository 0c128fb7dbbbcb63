#![allow(dead_code)]

use std::time::Duration;

use egui_kittest::Harness;
use livebet_business::{BusinessConfig, Session, SessionUser};
use livebet_ui::LivebetApp;
use livebet_ui::state::State;
use serde_json::json;
use tokio::runtime::Handle;
use wiremock::MockServer;

/// Frames to run after a background request so its result reaches the UI.
pub const UI_PROPAGATION_FRAMES: usize = 10;

pub struct TestCtx<'a> {
    pub mock_server: MockServer,
    harness: Harness<'a, LivebetApp>,
}

impl<'a> TestCtx<'a> {
    pub async fn new_app() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;

        let mut config = BusinessConfig::new(mock_server.uri());
        config.retry_delay = Duration::from_millis(5);
        let app = LivebetApp::new(State::new(config, Handle::current()));
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    /// App that already holds a valid session for `admin`.
    pub async fn signed_in() -> Self {
        let ctx = Self::new_app().await;
        ctx.harness.state().state.client.sessions().set(Session {
            access_token: "test-token".to_owned(),
            user: SessionUser::new("u1", "admin"),
            expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
        });
        ctx
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, LivebetApp> {
        &mut self.harness
    }

    pub fn harness(&self) -> &Harness<'a, LivebetApp> {
        &self.harness
    }

    /// Runs a frame, lets spawned requests finish, then runs a few more frames.
    pub async fn settle(&mut self) {
        self.harness.step();
        tokio::time::sleep(Duration::from_millis(200)).await;
        for _ in 0..UI_PROPAGATION_FRAMES {
            self.harness.step();
        }
    }
}

pub fn page_body(data: serde_json::Value, total: u64) -> serde_json::Value {
    json!({
        "success": true,
        "result": { "data": data, "total": total, "totalPages": total.div_ceil(10), "page": 1, "limit": 10 }
    })
}

pub fn users_body() -> serde_json::Value {
    page_body(
        json!([
            { "_id": "u1", "account": "1001", "bank": "ACB", "amount": 250000 },
            { "_id": "u2", "account": "1002", "bank": "TCB", "amount": 1000 }
        ]),
        2,
    )
}

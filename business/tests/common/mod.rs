//! Mock backend helpers shared by the integration tests.

#![allow(dead_code)]

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use livebet_business::{
    ApiClient, BusinessConfig, QueryParams, QueryPolicy, Session, SessionStore, SessionUser,
    SortOrder,
};
use livebet_states::{Clock, ManualClock};
use serde_json::{Value, json};
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const TOKEN: &str = "test-token";

/// A mock server plus a client pointed at it, driven by a manual clock.
pub struct TestContext {
    pub mock_server: MockServer,
    pub client: ApiClient,
    pub clock: ManualClock,
}

impl TestContext {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let clock = ManualClock::default();
        let sessions = SessionStore::new(Arc::new(clock.clone()));
        let config = BusinessConfig::new(mock_server.uri());
        let client = ApiClient::new(config, sessions);
        Self {
            mock_server,
            client,
            clock,
        }
    }

    pub fn clock_now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    pub fn sign_in(&self) {
        sign_in(&self.client, &self.clock);
    }
}

fn sign_in(client: &ApiClient, clock: &ManualClock) {
    client.sessions().set(Session {
        access_token: TOKEN.to_owned(),
        user: SessionUser::new("u1", "admin"),
        expires_at: clock.now() + chrono::Duration::hours(1),
    });
}

/// A client pointed at a port nobody listens on until [`OfflineBackend::start`].
pub struct OfflineBackend {
    addr: SocketAddr,
    pub client: ApiClient,
    pub clock: ManualClock,
}

impl OfflineBackend {
    pub fn new() -> Self {
        let addr = TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .expect("should reserve a local port");
        let clock = ManualClock::default();
        let sessions = SessionStore::new(Arc::new(clock.clone()));
        let client = ApiClient::new(BusinessConfig::new(format!("http://{addr}")), sessions);
        Self {
            addr,
            client,
            clock,
        }
    }

    pub fn sign_in(&self) {
        sign_in(&self.client, &self.clock);
    }

    /// Brings the backend up on the address the client already uses.
    pub async fn start(&self) -> MockServer {
        let listener = TcpListener::bind(self.addr).expect("reserved port should be free");
        MockServer::builder().listener(listener).start().await
    }
}

/// Retries without waiting a whole second.
pub fn fast_policy() -> QueryPolicy {
    QueryPolicy {
        stale_time: Duration::from_secs(15 * 60),
        gc_time: Duration::from_secs(20 * 60),
        retry_delay: Duration::from_millis(5),
        max_retries: 3,
    }
}

pub fn user_rows(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "_id": format!("user-{i:02}"),
                "account": format!("{}", 1000 + i),
                "bank": "VCB",
                "amount": (i + 1) * 1000,
            })
        })
        .collect()
}

/// A list endpoint that pages and sorts a fixed row set like the real backend.
pub struct PagedBackend {
    pub rows: Vec<Value>,
}

impl Respond for PagedBackend {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(params) = request.body_json::<QueryParams>() else {
            return ResponseTemplate::new(400).set_body_json(json!({ "message": "bad body" }));
        };

        let mut rows = self.rows.clone();
        if let Some((field, order)) = params.sort() {
            rows.sort_by(|a, b| {
                let a = a[field].as_f64().unwrap_or_default();
                let b = b[field].as_f64().unwrap_or_default();
                let ord = a.total_cmp(&b);
                if order == SortOrder::Desc {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        let limit = params.limit as usize;
        let total = rows.len();
        let total_pages = total.div_ceil(limit);
        let start = (params.page as usize - 1) * limit;
        let data: Vec<Value> = rows.into_iter().skip(start).take(limit).collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {
                "data": data,
                "total": total,
                "totalPages": total_pages,
                "page": params.page,
                "limit": params.limit,
            }
        }))
    }
}

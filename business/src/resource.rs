//! Generic cached list query.
//!
//! One [`ResourceQuery`] serves every list endpoint; a [`Resource`] supplies the
//! endpoint, default parameters, row type and columns.
//!
//! The query is a small state machine driven from outside:
//!
//! - [`ResourceQuery::prepare`] decides whether the current parameters need a request
//!   and, if so, hands out a [`FetchJob`] tagged with a fresh task generation
//!   (cancelling the previous one);
//! - the job runs anywhere (spawned on a runtime or awaited inline) with retries;
//! - [`ResourceQuery::apply`] stores the outcome unless a newer generation has been
//!   dispatched since.
//!
//! [`ResourceQuery::refresh`] does all three in place for callers that can await.
//!
//! Pages are fresh for `stale_time`. Pages other than the current one are dropped
//! once they are older than `gc_time`.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use livebet_states::{LatestTasks, SyncStatus, TaskHandle, TaskId};
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use ustr::Ustr;

use crate::{
    ApiClient, ApiData, ApiError, BusinessConfig, Column, Locale, PageEnvelope, QueryParams,
    SortOrder, Text,
};

/// A list endpoint and how to show its rows.
pub trait Resource: Send + Sync + 'static {
    type Row: DeserializeOwned + Serialize + Clone + fmt::Debug + Send + Sync + 'static;

    /// Cache namespace and invalidation key.
    const NAME: &'static str;
    const LIST_ENDPOINT: &'static str;
    const TITLE: Text;

    fn default_params() -> QueryParams {
        QueryParams::default().sorted_by("amount", SortOrder::Desc)
    }

    fn columns(locale: Locale) -> Vec<Column<Self::Row>>;
}

/// Caching and retry knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    pub stale_time: Duration,
    pub gc_time: Duration,
    pub retry_delay: Duration,
    pub max_retries: u32,
}

impl From<&BusinessConfig> for QueryPolicy {
    fn from(config: &BusinessConfig) -> Self {
        Self {
            stale_time: config.stale_time,
            gc_time: config.gc_time,
            retry_delay: config.retry_delay,
            max_retries: config.max_retries,
        }
    }
}

#[derive(Debug)]
struct CacheEntry<T> {
    envelope: Arc<PageEnvelope<T>>,
    fetched_at: DateTime<Utc>,
    status: SyncStatus,
}

#[derive(Debug)]
struct Failure {
    error: ApiError,
    failed_at: DateTime<Utc>,
}

fn age(now: DateTime<Utc>, since: DateTime<Utc>) -> Duration {
    (now - since).to_std().unwrap_or_default()
}

pub struct ResourceQuery<R: Resource> {
    client: ApiClient,
    params: QueryParams,
    policy: QueryPolicy,
    cache: HashMap<String, CacheEntry<R::Row>>,
    errors: HashMap<String, Failure>,
    tasks: LatestTasks,
    in_flight: Option<(String, TaskHandle)>,
    force: bool,
    seen_session: u64,
    seen_invalidation: u64,
    seen_reconnect: u64,
}

impl<R: Resource> fmt::Debug for ResourceQuery<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceQuery")
            .field("resource", &R::NAME)
            .field("params", &self.params)
            .field("cached", &self.cache.len())
            .field("in_flight", &self.in_flight.as_ref().map(|(key, _)| key))
            .finish()
    }
}

impl<R: Resource> ResourceQuery<R> {
    pub fn new(client: ApiClient) -> Self {
        Self::with_params(client, R::default_params())
    }

    pub fn with_params(client: ApiClient, params: QueryParams) -> Self {
        let policy = QueryPolicy::from(client.config());
        let seen_session = client.sessions().epoch();
        let seen_invalidation = client.invalidation_epoch(R::NAME);
        let seen_reconnect = client.reconnect_epoch();
        Self {
            client,
            params,
            policy,
            cache: HashMap::new(),
            errors: HashMap::new(),
            tasks: LatestTasks::default(),
            in_flight: None,
            force: false,
            seen_session,
            seen_invalidation,
            seen_reconnect,
        }
    }

    pub fn with_policy(mut self, policy: QueryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    fn key(&self) -> String {
        self.params.cache_key(R::NAME)
    }

    /// Current data, loading flag and error for the current parameters.
    ///
    /// Without a session the query is disabled and always reports nothing.
    pub fn view(&self) -> ApiData<R::Row> {
        if !self.client.is_authenticated() {
            return ApiData::default();
        }
        let key = self.key();
        let entry = self.cache.get(&key);
        ApiData {
            data: entry.map(|e| Arc::clone(&e.envelope)),
            is_loading: entry.is_none() && self.is_fetching(),
            error: self.errors.get(&key).map(|f| f.error.to_string()),
        }
    }

    /// Whether a request for the current parameters is in flight.
    pub fn is_fetching(&self) -> bool {
        let key = self.key();
        self.in_flight
            .as_ref()
            .is_some_and(|(k, handle)| *k == key && !handle.is_cancelled())
    }

    pub fn change_page(&mut self, page: u32) {
        self.params.page = page.max(1);
    }

    /// Sets the page size and goes back to the first page.
    pub fn change_page_size(&mut self, limit: u32) {
        self.params.limit = limit.max(1);
        self.params.page = 1;
    }

    /// Sets one filter, keeping the others, and goes back to the first page.
    pub fn patch_filter(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.params.filter_by.insert(key.into(), value.into());
        self.params.page = 1;
    }

    pub fn remove_filter(&mut self, key: &str) {
        if self.params.filter_by.remove(key).is_some() {
            self.params.page = 1;
        }
    }

    pub fn set_sort(&mut self, field: impl Into<String>, order: SortOrder) {
        self.params.set_sort(field, order);
    }

    pub fn replace_params(&mut self, params: QueryParams) {
        self.params = params;
    }

    /// Fetch the current parameters again even if cached.
    pub fn refetch(&mut self) {
        let key = self.key();
        self.errors.remove(&key);
        self.force = true;
    }

    /// Marks every cached page dirty; the current one is refetched on next `prepare`.
    pub fn invalidate_all(&mut self) {
        for entry in self.cache.values_mut() {
            entry.status = SyncStatus::Dirty;
        }
        self.errors.clear();
        self.force = true;
    }

    pub fn on_focus_regained(&mut self) {
        debug!("{}: focus regained", R::NAME);
        self.invalidate_all();
    }

    pub fn on_reconnect(&mut self) {
        debug!("{}: network reconnected", R::NAME);
        self.invalidate_all();
    }

    /// Picks up logins/logouts, mutation invalidations and reconnects seen elsewhere.
    fn sync_external(&mut self) {
        let session = self.client.sessions().epoch();
        if session != self.seen_session {
            debug!("{}: session changed, dropping cache", R::NAME);
            self.seen_session = session;
            self.cache.clear();
            self.errors.clear();
            self.tasks.cancel_all();
            self.in_flight = None;
        }

        let invalidation = self.client.invalidation_epoch(R::NAME);
        if invalidation != self.seen_invalidation {
            self.seen_invalidation = invalidation;
            self.invalidate_all();
        }

        let reconnect = self.client.reconnect_epoch();
        if reconnect != self.seen_reconnect {
            self.seen_reconnect = reconnect;
            self.on_reconnect();
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.client.sessions().clock().now()
    }

    fn is_fresh(&self, key: &str) -> bool {
        let now = self.now();
        self.cache.get(key).is_some_and(|entry| {
            entry.status.is_clean() && age(now, entry.fetched_at) < self.policy.stale_time
        })
    }

    /// Drops pages and errors older than `gc_time`, except for the current parameters.
    fn collect_garbage(&mut self) {
        let now = self.now();
        let current = self.key();
        let gc_time = self.policy.gc_time;
        let before = self.cache.len();
        self.cache
            .retain(|key, entry| *key == current || age(now, entry.fetched_at) < gc_time);
        self.errors
            .retain(|key, failure| *key == current || age(now, failure.failed_at) < gc_time);
        let dropped = before - self.cache.len();
        if dropped > 0 {
            debug!("{}: dropped {dropped} unused cached page(s)", R::NAME);
        }
    }

    /// Returns a job when the current parameters need a request.
    ///
    /// Nothing is dispatched without a session, while the same request is already in
    /// flight, while the cached page is fresh, or after a failure until `refetch` or
    /// an invalidation.
    pub fn prepare(&mut self) -> Option<FetchJob<R>> {
        self.sync_external();
        if !self.client.is_authenticated() {
            return None;
        }
        self.collect_garbage();

        let key = self.key();
        if !self.force
            && (self.is_fetching() || self.errors.contains_key(&key) || self.is_fresh(&key))
        {
            return None;
        }

        let handle = self.tasks.begin(Ustr::from(R::NAME));
        if let Some(entry) = self.cache.get_mut(&key) {
            entry.status = SyncStatus::Pending;
        }
        debug!(
            "{}: dispatching generation {} for {key}",
            R::NAME,
            handle.id().generation()
        );
        self.in_flight = Some((key.clone(), handle.clone()));
        self.force = false;

        Some(FetchJob {
            client: self.client.clone(),
            params: self.params.clone(),
            policy: self.policy,
            key,
            handle,
            resource: PhantomData,
        })
    }

    /// Stores a finished job's result. Returns false when the result was discarded
    /// because a newer request was dispatched in the meantime.
    pub fn apply(&mut self, outcome: FetchOutcome<R::Row>) -> bool {
        if let Err(reason) = self.tasks.check(outcome.task) {
            debug!("{}: discarding response: {reason}", R::NAME);
            return false;
        }
        self.tasks.finish(outcome.task);
        self.in_flight = None;

        let now = self.now();
        match outcome.result {
            Ok(envelope) => {
                self.errors.remove(&outcome.key);
                self.cache.insert(
                    outcome.key,
                    CacheEntry {
                        envelope: Arc::new(envelope),
                        fetched_at: now,
                        status: SyncStatus::Clean,
                    },
                );
            }
            Err(ApiError::Cancelled) => {}
            Err(error) => {
                warn!("{}: fetch failed: {error}", R::NAME);
                if let Some(entry) = self.cache.get_mut(&outcome.key) {
                    entry.status = SyncStatus::Dirty;
                }
                self.errors.insert(
                    outcome.key,
                    Failure {
                        error,
                        failed_at: now,
                    },
                );
            }
        }
        self.collect_garbage();
        true
    }

    /// Fetches if needed and returns the resulting view.
    pub async fn refresh(&mut self) -> ApiData<R::Row> {
        if let Some(job) = self.prepare() {
            let outcome = job.run().await;
            self.apply(outcome);
        }
        self.view()
    }
}

impl<R: Resource> Drop for ResourceQuery<R> {
    fn drop(&mut self) {
        self.tasks.cancel_all();
    }
}

/// One dispatched list request, detached from the query so it can run on another task.
pub struct FetchJob<R: Resource> {
    client: ApiClient,
    params: QueryParams,
    policy: QueryPolicy,
    key: String,
    handle: TaskHandle,
    resource: PhantomData<fn() -> R>,
}

impl<R: Resource> fmt::Debug for FetchJob<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchJob")
            .field("resource", &R::NAME)
            .field("task", &self.handle.id())
            .field("params", &self.params)
            .finish()
    }
}

#[derive(Debug)]
pub struct FetchOutcome<T> {
    pub task: TaskId,
    pub key: String,
    pub result: Result<PageEnvelope<T>, ApiError>,
}

impl<R: Resource> FetchJob<R> {
    pub fn task(&self) -> TaskId {
        self.handle.id()
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Runs the request with retries until it succeeds, gives up or is cancelled.
    pub async fn run(self) -> FetchOutcome<R::Row> {
        let token = self.handle.cancellation_token();
        let result = tokio::select! {
            _ = token.cancelled() => Err(ApiError::Cancelled),
            result = self.fetch_with_retries() => result,
        };
        FetchOutcome {
            task: self.handle.id(),
            key: self.key,
            result,
        }
    }

    async fn fetch_with_retries(&self) -> Result<PageEnvelope<R::Row>, ApiError> {
        let mut attempt = 0;
        loop {
            match self
                .client
                .post_json(R::LIST_ENDPOINT, &self.params)
                .await
            {
                Ok(envelope) => {
                    info!(
                        "{}: page {} loaded (attempt {})",
                        R::NAME,
                        self.params.page,
                        attempt + 1
                    );
                    return Ok(envelope);
                }
                Err(error) if error.is_auth() || attempt >= self.policy.max_retries => {
                    return Err(error);
                }
                Err(error) => {
                    attempt += 1;
                    warn!(
                        "{}: attempt {attempt} failed ({error}), retrying in {:?}",
                        R::NAME,
                        self.policy.retry_delay
                    );
                    tokio::time::sleep(self.policy.retry_delay).await;
                }
            }
        }
    }
}

//! One list page: filters, data table and pager over a [`ResourceQuery`].
//!
//! Fetch jobs run on the tokio runtime; their outcomes come back over a flume
//! channel drained at the start of every frame, so the query itself is only ever
//! touched from the UI thread.

use egui::Ui;
use flume::{Receiver, Sender};
use livebet_business::{
    ApiClient, Column, FetchOutcome, Locale, Resource, ResolvedMode, ResourceQuery, TableEvent,
    TableModel, find_row,
};
use log::{debug, warn};
use tokio::runtime::Handle;

use super::filters::FilterForm;
use crate::widgets::{data_table, pagination};

pub struct ResourcePage<R: Resource> {
    query: ResourceQuery<R>,
    table: TableModel,
    pub filters: FilterForm,
    columns: Vec<Column<R::Row>>,
    locale: Locale,
    sender: Sender<FetchOutcome<R::Row>>,
    receiver: Receiver<FetchOutcome<R::Row>>,
}

impl<R: Resource> ResourcePage<R> {
    pub fn new(client: ApiClient, filters: FilterForm) -> Self {
        let query = ResourceQuery::<R>::new(client);
        let mut table = TableModel::default();
        if let Some((key, order)) = query.params().sort() {
            table.set_sort(key, order);
        }
        let (sender, receiver) = flume::unbounded();
        let locale = Locale::default();
        Self {
            query,
            table,
            filters,
            columns: R::columns(locale),
            locale,
            sender,
            receiver,
        }
    }

    pub fn query(&self) -> &ResourceQuery<R> {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut ResourceQuery<R> {
        &mut self.query
    }

    pub fn table(&self) -> &TableModel {
        &self.table
    }

    /// Applies finished fetches and dispatches the next one if the query needs it.
    pub fn poll(&mut self, runtime: &Handle, ctx: &egui::Context) {
        while let Ok(outcome) = self.receiver.try_recv() {
            if !self.query.apply(outcome) {
                debug!("{}: stale response dropped", R::NAME);
            }
        }

        if let Some(job) = self.query.prepare() {
            let sender = self.sender.clone();
            let ctx = ctx.clone();
            runtime.spawn(async move {
                let outcome = job.run().await;
                if sender.send(outcome).is_err() {
                    warn!("{}: page closed before the response arrived", R::NAME);
                }
                ctx.request_repaint();
            });
        }
    }

    fn handle(&mut self, event: TableEvent) {
        match event {
            TableEvent::PageChanged(page) => self.query.change_page(page),
            TableEvent::PageSizeChanged(size) => self.query.change_page_size(size),
            TableEvent::SortChanged { key, order } => self.query.set_sort(key, order),
            TableEvent::Retry => self.query.invalidate_all(),
            TableEvent::RowClicked(_) => {}
        }
    }

    /// Renders the page. Returns the row the user clicked this frame.
    pub fn ui(&mut self, ui: &mut Ui, locale: Locale) -> Option<R::Row> {
        if self.locale != locale {
            self.locale = locale;
            self.columns = R::columns(locale);
        }

        ui.heading(locale.t(R::TITLE));
        // both apply and clear push the form's current values
        if self.filters.ui(ui, R::NAME, locale).is_some() {
            self.filters.apply_to(&mut self.query);
        }
        ui.separator();

        let data = self.query.view();
        let view = self.table.view(&data, &self.columns);
        let mode = view.mode().unwrap_or(ResolvedMode::Server);

        let mut action = None;
        egui::ScrollArea::vertical()
            .id_salt(R::NAME)
            .max_height((ui.available_height() - 40.0).max(120.0))
            .show(ui, |ui| {
                action = data_table(ui, R::NAME, &view, locale);
            });
        if let Some(pager) = &view.pagination {
            ui.separator();
            action = pagination(ui, R::NAME, pager, locale).or(action);
        }

        let event = self.table.apply(action?, mode)?;
        if let TableEvent::RowClicked(key) = &event {
            return find_row(data.rows(), key).cloned();
        }
        self.handle(event);
        None
    }
}

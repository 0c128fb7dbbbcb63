//! Livestream list with the create and details dialogs.

use egui::{RichText, Ui};
use flume::{Receiver, Sender};
use livebet_business::format::{format_datetime_str, format_vnd};
use livebet_business::resources::{
    CreateLiveStreamInput, CreateLiveStreamRequest, LiveStream, LiveStreamResult, LiveStreams,
    MutationError, create_livestream, update_livestream_result,
};
use livebet_business::{ApiClient, Cell, Locale, Text};
use log::warn;
use tokio::runtime::Handle;

use super::filters::FilterForm;
use super::resource_page::ResourcePage;
use crate::utils::colors::{COLOR_GREEN, COLOR_RED, tone_color};
use crate::widgets::cells::badge;

enum MutationOutcome {
    Created(Result<CreateLiveStreamRequest, MutationError>),
    ResultSet(Result<(), MutationError>),
}

#[derive(Debug, Default)]
pub struct CreateDialog {
    pub input: CreateLiveStreamInput,
    pub error: Option<String>,
}

pub struct LiveStreamsPage {
    pub list: ResourcePage<LiveStreams>,
    client: ApiClient,
    pub create: Option<CreateDialog>,
    pub details: Option<LiveStream>,
    details_error: Option<String>,
    pending: bool,
    /// Streamer of the last created livestream, shown until the next create.
    created_for: Option<String>,
    sender: Sender<MutationOutcome>,
    receiver: Receiver<MutationOutcome>,
}

impl LiveStreamsPage {
    pub fn new(client: ApiClient) -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            list: ResourcePage::new(client.clone(), FilterForm::default()),
            client,
            create: None,
            details: None,
            details_error: None,
            pending: false,
            created_for: None,
            sender,
            receiver,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn notice(&self, locale: Locale) -> Option<String> {
        self.created_for
            .as_ref()
            .map(|streamer| format!("{} {streamer}", locale.t(Text::CreatedLiveStreamFor)))
    }

    pub fn poll(&mut self, runtime: &Handle, ctx: &egui::Context) {
        while let Ok(outcome) = self.receiver.try_recv() {
            self.pending = false;
            match outcome {
                MutationOutcome::Created(Ok(request)) => {
                    self.create = None;
                    self.created_for = Some(request.streamer);
                }
                MutationOutcome::Created(Err(error)) => {
                    if let Some(dialog) = &mut self.create {
                        dialog.error = Some(error.to_string());
                    }
                }
                MutationOutcome::ResultSet(Ok(())) => {
                    self.details = None;
                    self.details_error = None;
                }
                MutationOutcome::ResultSet(Err(error)) => {
                    self.details_error = Some(error.to_string());
                }
            }
        }
        // mutations bump the invalidation epoch; the list notices on prepare
        self.list.poll(runtime, ctx);
    }

    fn spawn<F>(&mut self, runtime: &Handle, ctx: &egui::Context, task: F)
    where
        F: Future<Output = MutationOutcome> + Send + 'static,
    {
        self.pending = true;
        let sender = self.sender.clone();
        let ctx = ctx.clone();
        runtime.spawn(async move {
            if sender.send(task.await).is_err() {
                warn!("livestreams: page closed before the mutation finished");
            }
            ctx.request_repaint();
        });
    }

    /// Validates the create form locally, then submits it.
    pub fn submit_create(&mut self, runtime: &Handle, ctx: &egui::Context) {
        let Some(dialog) = &mut self.create else {
            return;
        };
        if let Err(error) = dialog.input.validate() {
            dialog.error = Some(error.to_string());
            return;
        }
        dialog.error = None;
        let input = dialog.input.clone();
        let client = self.client.clone();
        self.spawn(runtime, ctx, async move {
            MutationOutcome::Created(create_livestream(&client, &input).await)
        });
    }

    pub fn submit_result(
        &mut self,
        runtime: &Handle,
        ctx: &egui::Context,
        id: i64,
        result: LiveStreamResult,
    ) {
        self.details_error = None;
        let client = self.client.clone();
        self.spawn(runtime, ctx, async move {
            MutationOutcome::ResultSet(update_livestream_result(&client, id, result).await)
        });
    }

    pub fn ui(&mut self, ui: &mut Ui, runtime: &Handle, locale: Locale) {
        ui.horizontal(|ui| {
            if ui.button(locale.t(Text::CreateLiveStream)).clicked() {
                self.create = Some(CreateDialog::default());
                self.created_for = None;
            }
            if let Some(notice) = self.notice(locale) {
                ui.colored_label(COLOR_GREEN, notice);
            }
        });

        if let Some(stream) = self.list.ui(ui, locale) {
            self.details = Some(stream);
            self.details_error = None;
        }

        let ctx = ui.ctx().clone();
        self.create_window(&ctx, runtime, locale);
        self.details_window(&ctx, runtime, locale);
    }

    fn create_window(&mut self, ctx: &egui::Context, runtime: &Handle, locale: Locale) {
        let pending = self.pending;
        let Some(dialog) = &mut self.create else {
            return;
        };
        let mut submit = false;
        let mut cancel = false;

        egui::Window::new(locale.t(Text::CreateLiveStream))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                if let Some(error) = &dialog.error {
                    ui.colored_label(COLOR_RED, error);
                }
                egui::Grid::new("create_livestream_form")
                    .num_columns(2)
                    .show(ui, |ui| {
                        let input = &mut dialog.input;
                        for (text, value, hint) in [
                            (Text::YoutubeLink, &mut input.youtube_link, "https://youtube.com/watch?v="),
                            (Text::Streamer, &mut input.streamer, ""),
                            (Text::StartTime, &mut input.start_time, "YYYY-MM-DD HH:MM"),
                            (Text::EndTime, &mut input.end_time, "YYYY-MM-DD HH:MM"),
                        ] {
                            ui.label(locale.t(text));
                            ui.add(egui::TextEdit::singleline(value).hint_text(hint));
                            ui.end_row();
                        }
                    });
                ui.label(RichText::new(locale.t(Text::VietnamTime)).weak());
                ui.horizontal(|ui| {
                    if pending {
                        ui.spinner();
                    } else if ui.button(locale.t(Text::Create)).clicked() {
                        submit = true;
                    }
                    if ui.button(locale.t(Text::Cancel)).clicked() {
                        cancel = true;
                    }
                });
            });

        if cancel {
            self.create = None;
        } else if submit {
            self.submit_create(runtime, ctx);
        }
    }

    fn details_window(&mut self, ctx: &egui::Context, runtime: &Handle, locale: Locale) {
        let Some(stream) = &self.details else {
            return;
        };
        let mut chosen = None;
        let mut close = false;

        egui::Window::new(locale.t(Text::Details))
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("livestream_details")
                    .num_columns(2)
                    .show(ui, |ui| {
                        let rows = [
                            (Text::Streamer, stream.streamer.clone()),
                            (Text::Duration, stream.duration()),
                            (Text::TotalPlay, stream.total_play.to_string()),
                            (Text::TotalAmount, format_vnd(stream.total)),
                            (Text::StartTime, format_datetime_str(&stream.start_time)),
                            (Text::EndTime, format_datetime_str(&stream.end_time)),
                            (
                                Text::VideoId,
                                stream.video_id().unwrap_or("-").to_owned(),
                            ),
                        ];
                        for (text, value) in rows {
                            ui.label(locale.t(text));
                            ui.label(value);
                            ui.end_row();
                        }

                        ui.label(locale.t(Text::Status));
                        ui.horizontal(|ui| {
                            show_badge(ui, &stream.status.badge(locale));
                            let percent = stream.status.progress_percent();
                            ui.add(
                                egui::ProgressBar::new(f32::from(percent) / 100.0)
                                    .desired_width(100.0),
                            );
                            ui.label(format!("{percent}%"));
                        });
                        ui.end_row();

                        ui.label(locale.t(Text::Result));
                        show_badge(ui, &stream.result.badge(locale));
                        ui.end_row();
                    });

                ui.hyperlink_to(locale.t(Text::YoutubeLink), &stream.youtube_link);

                if let Some(error) = &self.details_error {
                    ui.colored_label(COLOR_RED, error);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if stream.status.accepts_result() {
                        ui.label(locale.t(Text::UpdateResult));
                        if self.pending {
                            ui.spinner();
                        } else {
                            if ui.button(locale.t(Text::MarkWin)).clicked() {
                                chosen = Some(LiveStreamResult::Win);
                            }
                            if ui.button(locale.t(Text::MarkLose)).clicked() {
                                chosen = Some(LiveStreamResult::Lose);
                            }
                        }
                    }
                    if ui.button(locale.t(Text::Close)).clicked() {
                        close = true;
                    }
                });
            });

        let id = stream.id;
        if close {
            self.details = None;
            self.details_error = None;
        } else if let Some(result) = chosen {
            self.submit_result(runtime, ctx, id, result);
        }
    }
}

fn show_badge(ui: &mut Ui, cell: &Cell) {
    match cell {
        Cell::Badge { text, tone } => badge(ui, text, tone_color(*tone)),
        other => {
            ui.label(other.plain());
        }
    }
}

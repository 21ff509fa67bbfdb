//! egui front end: login gate, inbox sidebar, drafting workspace.
//!
//! All network work runs on a tokio runtime owned by the app; finished
//! futures report back over an mpsc channel and are applied to the
//! [`Controller`] at the top of each frame, so the UI never blocks on a
//! request.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use eframe::egui;
use egui::{Color32, RichText};
use studio_ai::{DraftEngine, EngineSettings, GeminiEngine};
use studio_config::{AppConfig, ConfigManager};
use studio_core::{tr, GeneratedDraft, Lang, RecordStatus, SourceEmail, Text, Urgency};
use studio_session::{FileSessionStore, SessionManager, SystemClock};
use studio_store::{AirtableStore, RecordStore, StoreSettings};

use crate::controller::{Controller, DraftPhase, Selection, UpdateIntent};
use crate::html_format::prettify;
use crate::html_render::{render_email_html, ACCENT};

enum AppEvent {
    PendingLoaded(Result<Vec<SourceEmail>, String>),
    DraftResolved {
        seq: u64,
        outcome: Result<GeneratedDraft, String>,
    },
    RecordUpdated {
        id: String,
        intent: UpdateIntent,
        outcome: Result<(), String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum InputTab {
    Inbox,
    Manual,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PreviewTab {
    Rendered,
    Code,
}

pub struct StudioApp {
    runtime: tokio::runtime::Runtime,
    config_manager: ConfigManager,
    config: AppConfig,
    lang: Lang,
    session: SessionManager,
    authenticated: bool,
    login_input: String,
    login_error: Option<Text>,
    store: Option<Arc<dyn RecordStore>>,
    engine: Arc<dyn DraftEngine>,
    controller: Controller,
    events: Receiver<AppEvent>,
    events_tx: Sender<AppEvent>,
    input_tab: InputTab,
    preview_tab: PreviewTab,
    refine_input: String,
    pending_discard: Option<String>,
    show_expanded: bool,
    fetching: bool,
    fetched_once: bool,
}

impl StudioApp {
    pub fn initialize() -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("build tokio runtime")?;

        let config_manager = ConfigManager::new().context("initialize config manager")?;
        let config = config_manager.load().context("load app config")?;

        let lang = match config.ui.language.as_str() {
            "en" => Lang::En,
            _ => Lang::Es,
        };

        let session = SessionManager::new(
            Box::new(FileSessionStore::new(
                config_manager.data_dir().join("session.toml"),
            )),
            Box::new(SystemClock),
            config.session.passphrase.clone(),
            config.session.ttl_hours,
        );

        let store: Option<Arc<dyn RecordStore>> = match StoreSettings::from_parts(
            config.airtable.api_key.clone(),
            config.airtable.base_id.clone(),
            config.airtable.table_name.clone(),
            config.airtable.api_base.clone(),
        ) {
            Ok(settings) => match AirtableStore::new(settings) {
                Ok(store) => Some(Arc::new(store)),
                Err(err) => {
                    tracing::warn!("record store unavailable: {err}");
                    None
                }
            },
            Err(_) => {
                tracing::info!("record store not configured; inbox disabled");
                None
            }
        };

        let engine: Arc<dyn DraftEngine> = Arc::new(GeminiEngine::new(EngineSettings {
            api_key: config.gemini.api_key.clone(),
            api_base: config.gemini.api_base.clone(),
            flash_model: config.gemini.flash_model.clone(),
            pro_model: config.gemini.pro_model.clone(),
            thinking_budget: config.gemini.thinking_budget,
        }));

        let authenticated = session.restore();
        let (events_tx, events) = channel();

        Ok(Self {
            runtime,
            config_manager,
            config,
            lang,
            session,
            authenticated,
            login_input: String::new(),
            login_error: None,
            store,
            engine,
            controller: Controller::new(),
            events,
            events_tx,
            input_tab: InputTab::Inbox,
            preview_tab: PreviewTab::Rendered,
            refine_input: String::new(),
            pending_discard: None,
            show_expanded: false,
            fetching: false,
            fetched_once: false,
        })
    }

    fn set_language(&mut self, lang: Lang) {
        if self.lang == lang {
            return;
        }
        self.lang = lang;
        self.config.ui.language = match lang {
            Lang::En => "en",
            Lang::Es => "es",
        }
        .to_string();
        if let Err(err) = self.config_manager.save(&self.config) {
            tracing::warn!("failed to persist language choice: {err}");
        }
    }

    // --- background work -------------------------------------------------

    fn spawn_fetch_pending(&mut self, ctx: &egui::Context) {
        let Some(store) = self.store.clone() else {
            return;
        };
        self.fetching = true;
        self.fetched_once = true;
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = store.fetch_pending().await.map_err(|err| err.to_string());
            let _ = tx.send(AppEvent::PendingLoaded(outcome));
            ctx.request_repaint();
        });
    }

    fn spawn_generation(&mut self, ctx: &egui::Context) {
        let Some((seq, request)) = self.controller.begin_generation() else {
            return;
        };
        let engine = self.engine.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = engine.generate(&request).await.map_err(|err| err.to_string());
            let _ = tx.send(AppEvent::DraftResolved { seq, outcome });
            ctx.request_repaint();
        });
    }

    fn spawn_refinement(&mut self, ctx: &egui::Context) {
        let instruction = self.refine_input.clone();
        let Some((seq, request)) = self.controller.begin_refinement(&instruction) else {
            return;
        };
        self.refine_input.clear();
        let engine = self.engine.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = engine.refine(&request).await.map_err(|err| err.to_string());
            let _ = tx.send(AppEvent::DraftResolved { seq, outcome });
            ctx.request_repaint();
        });
    }

    fn spawn_approve(&mut self, ctx: &egui::Context) {
        let Some((id, body)) = self.controller.approve_ticket() else {
            return;
        };
        self.spawn_update(ctx, id, RecordStatus::Approved, Some(body), UpdateIntent::Approve);
    }

    fn spawn_update(
        &mut self,
        ctx: &egui::Context,
        id: String,
        status: RecordStatus,
        body: Option<String>,
        intent: UpdateIntent,
    ) {
        let Some(store) = self.store.clone() else {
            return;
        };
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = store
                .update_status(&id, status, body.as_deref())
                .await
                .map_err(|err| err.to_string());
            let _ = tx.send(AppEvent::RecordUpdated {
                id,
                intent,
                outcome,
            });
            ctx.request_repaint();
        });
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                AppEvent::PendingLoaded(outcome) => {
                    self.fetching = false;
                    self.controller.pending_loaded(outcome);
                }
                AppEvent::DraftResolved { seq, outcome } => {
                    self.controller.resolve_draft(seq, outcome);
                }
                AppEvent::RecordUpdated {
                    id,
                    intent,
                    outcome,
                } => match intent {
                    UpdateIntent::Approve => self.controller.resolve_approve(&id, outcome),
                    UpdateIntent::Discard => self.controller.resolve_discard(&id, outcome),
                },
            }
        }
    }

    // --- login gate ------------------------------------------------------

    fn show_login(&mut self, ctx: &egui::Context) {
        let lang = self.lang;
        let mut attempt = false;
        let mut switch_to: Option<Lang> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                if ui.selectable_label(lang == Lang::Es, "ES").clicked() {
                    switch_to = Some(Lang::Es);
                }
                if ui.selectable_label(lang == Lang::En, "EN").clicked() {
                    switch_to = Some(Lang::En);
                }
            });
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);
                ui.heading(
                    RichText::new(tr(lang, Text::HeaderTitle))
                        .size(30.0)
                        .color(ACCENT)
                        .strong(),
                );
                ui.label(RichText::new(tr(lang, Text::LoginTitle)).size(16.0));
                ui.add_space(24.0);

                if !self.session.is_configured() {
                    ui.label(
                        RichText::new(tr(lang, Text::LoginMissingSecret))
                            .color(ui.visuals().warn_fg_color),
                    );
                    return;
                }

                ui.label(tr(lang, Text::LoginPrompt));
                ui.add_space(8.0);
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.login_input)
                        .password(true)
                        .min_size(egui::vec2(260.0, 28.0)),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.add_space(12.0);
                if ui
                    .add_sized([260.0, 36.0], egui::Button::new(tr(lang, Text::LoginButton)))
                    .clicked()
                    || submitted
                {
                    attempt = true;
                }
                if let Some(error) = self.login_error {
                    ui.add_space(10.0);
                    ui.label(RichText::new(tr(lang, error)).color(ui.visuals().error_fg_color));
                }
            });
        });

        if let Some(lang) = switch_to {
            self.set_language(lang);
        }
        if attempt {
            match self.session.login(&self.login_input) {
                Ok(()) => {
                    self.authenticated = true;
                    self.login_input.clear();
                    self.login_error = None;
                    self.spawn_fetch_pending(ctx);
                }
                Err(err) => {
                    tracing::info!("login rejected: {err}");
                    self.login_error = Some(Text::LoginError);
                }
            }
        }
    }

    // --- main layout -----------------------------------------------------

    fn show_header(&mut self, ctx: &egui::Context) {
        let lang = self.lang;
        let mut switch_to: Option<Lang> = None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(
                    RichText::new(tr(lang, Text::HeaderTitle))
                        .size(22.0)
                        .color(ACCENT)
                        .strong(),
                );
                ui.label(RichText::new(tr(lang, Text::HeaderSubtitle)).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.selectable_label(lang == Lang::Es, "ES").clicked() {
                        switch_to = Some(Lang::Es);
                    }
                    if ui.selectable_label(lang == Lang::En, "EN").clicked() {
                        switch_to = Some(Lang::En);
                    }
                });
            });
            ui.add_space(6.0);
        });

        if let Some(lang) = switch_to {
            self.set_language(lang);
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        let lang = self.lang;
        let banner = self.controller.banner().map(str::to_string);
        let store_missing = self.store.is_none();
        let mut dismiss = false;

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(message) = &banner {
                    ui.label(RichText::new(message).color(ui.visuals().error_fg_color));
                    if ui.small_button("✕").clicked() {
                        dismiss = true;
                    }
                } else if store_missing {
                    ui.label(RichText::new(tr(lang, Text::StoreNotConfigured)).weak());
                }
            });
        });

        if dismiss {
            self.controller.clear_banner();
        }
    }

    fn show_sidebar(&mut self, ctx: &egui::Context) {
        let lang = self.lang;
        let mut switch_tab: Option<InputTab> = None;
        let mut select: Option<String> = None;
        let mut discard: Option<String> = None;
        let mut refresh = false;

        egui::SidePanel::left("sidebar")
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui
                        .selectable_label(self.input_tab == InputTab::Inbox, tr(lang, Text::TabInbox))
                        .clicked()
                    {
                        switch_tab = Some(InputTab::Inbox);
                    }
                    if ui
                        .selectable_label(
                            self.input_tab == InputTab::Manual,
                            tr(lang, Text::TabManual),
                        )
                        .clicked()
                    {
                        switch_tab = Some(InputTab::Manual);
                    }
                });
                ui.separator();

                match self.input_tab {
                    InputTab::Inbox => {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(tr(lang, Text::InboxHeader)).strong());
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button("⟳").clicked() {
                                        refresh = true;
                                    }
                                },
                            );
                        });
                        ui.add_space(4.0);

                        if self.store.is_none() {
                            ui.label(RichText::new(tr(lang, Text::StoreNotConfigured)).weak());
                            return;
                        }
                        if self.fetching && self.controller.pending().is_empty() {
                            ui.horizontal(|ui| {
                                ui.spinner();
                            });
                            return;
                        }
                        if self.controller.pending().is_empty() {
                            ui.label(RichText::new(tr(lang, Text::InboxEmpty)).weak());
                            return;
                        }

                        let selected = match self.controller.selection() {
                            Selection::Record(id) => Some(id.clone()),
                            _ => None,
                        };
                        let rows: Vec<(String, String, String, Option<DateTime<Utc>>, Option<Urgency>)> =
                            self.controller
                                .pending()
                                .iter()
                                .filter_map(|email| {
                                    email.id.clone().map(|id| {
                                        (
                                            id,
                                            email.sender_name.clone(),
                                            email.subject.clone(),
                                            email.received_at,
                                            email.urgency,
                                        )
                                    })
                                })
                                .collect();

                        egui::ScrollArea::vertical().show(ui, |ui| {
                            for (id, sender, subject, received_at, urgency) in &rows {
                                let is_selected = selected.as_deref() == Some(id.as_str());
                                let frame = egui::Frame::group(ui.style()).fill(if is_selected {
                                    ui.visuals().selection.bg_fill.gamma_multiply(0.25)
                                } else {
                                    ui.visuals().faint_bg_color
                                });
                                let inner = frame.show(ui, |ui| {
                                    ui.set_width(ui.available_width());
                                    ui.horizontal(|ui| {
                                        if *urgency == Some(Urgency::High) {
                                            ui.label(RichText::new("●").color(
                                                Color32::from_rgb(0xe5, 0x55, 0x4d),
                                            ));
                                        }
                                        ui.label(RichText::new(sender).strong());
                                        ui.with_layout(
                                            egui::Layout::right_to_left(egui::Align::Center),
                                            |ui| {
                                                ui.label(
                                                    RichText::new(time_ago(*received_at))
                                                        .small()
                                                        .weak(),
                                                );
                                            },
                                        );
                                    });
                                    ui.horizontal(|ui| {
                                        ui.label(RichText::new(subject).small());
                                        ui.with_layout(
                                            egui::Layout::right_to_left(egui::Align::Center),
                                            |ui| {
                                                if ui
                                                    .small_button(tr(lang, Text::DiscardBtn))
                                                    .clicked()
                                                {
                                                    discard = Some(id.clone());
                                                }
                                            },
                                        );
                                    });
                                });
                                if inner.response.interact(egui::Sense::click()).clicked() {
                                    select = Some(id.clone());
                                }
                            }
                        });
                    }
                    InputTab::Manual => {
                        ui.label(RichText::new(tr(lang, Text::ManualLabel)).strong());
                        ui.add_space(4.0);
                        let response = ui.add(
                            egui::TextEdit::multiline(self.controller.manual_text_mut())
                                .hint_text(tr(lang, Text::ManualPlaceholder))
                                .desired_width(f32::INFINITY)
                                .desired_rows(14),
                        );
                        if response.changed() {
                            self.controller.sync_manual_text();
                        }
                    }
                }
            });

        if let Some(tab) = switch_tab {
            self.input_tab = tab;
            if tab == InputTab::Manual {
                self.controller.select_manual();
            }
        }
        if refresh {
            self.spawn_fetch_pending(ctx);
        }
        if let Some(id) = select {
            self.controller.select_record(&id);
        }
        if let Some(id) = discard {
            self.pending_discard = Some(id);
        }
    }

    fn show_workspace(&mut self, ctx: &egui::Context) {
        let lang = self.lang;

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.controller.selection() == &Selection::None {
                ui.vertical_centered(|ui| {
                    ui.add_space(160.0);
                    ui.heading(RichText::new(tr(lang, Text::PreviewPlaceholder)).size(24.0));
                    ui.add_space(8.0);
                    ui.label(RichText::new(tr(lang, Text::PreviewPlaceholderDesc)).weak());
                });
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("workspace")
                .show(ui, |ui| {
                    self.reader_ui(ui);
                    self.control_panel_ui(ui, ctx);
                    self.preview_ui(ui, ctx);
                });
        });
    }

    fn reader_ui(&mut self, ui: &mut egui::Ui) {
        let lang = self.lang;
        let Some(email) = self.controller.active_record() else {
            return;
        };
        let subject = email.subject.clone();
        let sender = if email.sender_email.is_empty() {
            email.sender_name.clone()
        } else {
            format!("{} <{}>", email.sender_name, email.sender_email)
        };
        let received = time_ago(email.received_at);
        let body = email.body.clone();

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(tr(lang, Text::ReadEmailTitle)).small().weak());
            ui.label(RichText::new(subject).size(17.0).strong());
            ui.horizontal(|ui| {
                ui.label(RichText::new(sender).small());
                if !received.is_empty() {
                    ui.label(RichText::new(received).small().weak());
                }
            });
            ui.separator();
            egui::ScrollArea::vertical()
                .id_salt("reader")
                .max_height(160.0)
                .show(ui, |ui| {
                    ui.label(body);
                });
        });
        ui.add_space(8.0);
    }

    fn control_panel_ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let lang = self.lang;
        let mut generate = false;

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(tr(lang, Text::ModeTitle)).small().weak());
            ui.horizontal(|ui| {
                for (mode, label, desc) in [
                    (
                        studio_core::GenerationMode::Standard,
                        Text::ModeStandard,
                        Text::ModeStandardDesc,
                    ),
                    (
                        studio_core::GenerationMode::Search,
                        Text::ModeSearch,
                        Text::ModeSearchDesc,
                    ),
                    (
                        studio_core::GenerationMode::Thinking,
                        Text::ModeThinking,
                        Text::ModeThinkingDesc,
                    ),
                ] {
                    let selected = self.controller.mode == mode;
                    let text = format!("{}\n{}", tr(lang, label), tr(lang, desc));
                    if ui.selectable_label(selected, text).clicked() {
                        self.controller.mode = mode;
                    }
                }
            });

            ui.add_space(8.0);
            ui.label(RichText::new(tr(lang, Text::InstructionsTitle)).small().weak());
            ui.horizontal_wrapped(|ui| {
                for (label, value) in [
                    (Text::QaEmpathetic, Text::QaEmpathetic),
                    (Text::QaFirm, Text::QaFirm),
                    (Text::QaRefund, Text::QaRefund),
                    (Text::QaDiscount, Text::QaDiscount),
                    (Text::QaShipping, Text::QaShippingValue),
                ] {
                    if ui.small_button(tr(lang, label)).clicked() {
                        if !self.controller.instructions.is_empty()
                            && !self.controller.instructions.ends_with(' ')
                        {
                            self.controller.instructions.push(' ');
                        }
                        self.controller.instructions.push_str(tr(lang, value));
                    }
                }
            });
            ui.add(
                egui::TextEdit::multiline(&mut self.controller.instructions)
                    .hint_text(tr(lang, Text::InstructionsPlaceholder))
                    .desired_width(f32::INFINITY)
                    .desired_rows(2),
            );

            ui.add_space(8.0);
            let label = if self.controller.is_generating() {
                tr(lang, Text::GeneratingBtn)
            } else {
                tr(lang, Text::GenerateBtn)
            };
            let button = egui::Button::new(RichText::new(label).strong())
                .fill(ACCENT)
                .min_size(egui::vec2(ui.available_width(), 36.0));
            if ui
                .add_enabled(self.controller.can_generate(), button)
                .clicked()
            {
                generate = true;
            }
        });
        ui.add_space(8.0);

        if generate {
            self.spawn_generation(ctx);
        }
    }

    fn preview_ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let lang = self.lang;
        match self.controller.phase().clone() {
            DraftPhase::Idle => {}
            DraftPhase::Generating { refining, .. } => {
                let busy = if refining {
                    Text::RefineBtnLoading
                } else {
                    Text::PreviewGenerating
                };
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(tr(lang, busy));
                    });
                });
            }
            DraftPhase::Failed(message) => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        RichText::new(tr(lang, Text::PreviewFailed))
                            .color(ui.visuals().error_fg_color)
                            .strong(),
                    );
                    ui.label(RichText::new(message).small());
                });
            }
            DraftPhase::Ready(_) => self.draft_panel_ui(ui, ctx),
        }
    }

    fn draft_panel_ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let lang = self.lang;
        let can_approve = self.controller.approve_ticket().is_some();
        let copied = self.controller.copied();
        let mut copy = false;
        let mut format = false;
        let mut approve = false;
        let mut refine = false;

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.label(RichText::new(tr(lang, Text::SubjectLabel)).small().weak());
            if let Some(draft) = self.controller.draft_mut() {
                ui.add(
                    egui::TextEdit::singleline(&mut draft.subject).desired_width(f32::INFINITY),
                );
            }
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.selectable_value(
                    &mut self.preview_tab,
                    PreviewTab::Rendered,
                    tr(lang, Text::PreviewTab),
                );
                ui.selectable_value(
                    &mut self.preview_tab,
                    PreviewTab::Code,
                    tr(lang, Text::CodeTab),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if can_approve && ui.button(tr(lang, Text::ApproveBtn)).clicked() {
                        approve = true;
                    }
                    let copy_label = if copied {
                        tr(lang, Text::CopiedBtn)
                    } else {
                        tr(lang, Text::CopyBtn)
                    };
                    if ui.button(copy_label).clicked() {
                        copy = true;
                    }
                    if ui.button(tr(lang, Text::ExpandBtn)).clicked() {
                        self.show_expanded = true;
                    }
                    if self.preview_tab == PreviewTab::Code
                        && ui.button(tr(lang, Text::FormatBtn)).clicked()
                    {
                        format = true;
                    }
                });
            });
            ui.add_space(4.0);

            match self.preview_tab {
                PreviewTab::Rendered => {
                    let body = self
                        .controller
                        .draft()
                        .map(|draft| draft.body.clone())
                        .unwrap_or_default();
                    egui::Frame::group(ui.style())
                        .fill(ui.visuals().extreme_bg_color)
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            egui::ScrollArea::vertical()
                                .id_salt("rendered")
                                .max_height(380.0)
                                .show(ui, |ui| {
                                    render_email_html(ui, &body);
                                });
                        });
                }
                PreviewTab::Code => {
                    ui.label(RichText::new(tr(lang, Text::EditHtmlTip)).small().weak());
                    if let Some(draft) = self.controller.draft_mut() {
                        egui::ScrollArea::vertical()
                            .id_salt("code")
                            .max_height(380.0)
                            .show(ui, |ui| {
                                ui.add(
                                    egui::TextEdit::multiline(&mut draft.body)
                                        .code_editor()
                                        .desired_width(f32::INFINITY)
                                        .desired_rows(18),
                                );
                            });
                    }
                }
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.refine_input)
                        .hint_text(tr(lang, Text::RefinePlaceholder))
                        .desired_width(ui.available_width() - 110.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button(tr(lang, Text::RefineBtn)).clicked() || submitted {
                    refine = true;
                }
            });
        });

        if format {
            if let Some(draft) = self.controller.draft_mut() {
                draft.body = prettify(&draft.body);
            }
        }
        if copy {
            if let Some(draft) = self.controller.draft() {
                ctx.copy_text(draft.body.clone());
            }
            self.controller.mark_copied(Instant::now());
        }
        if approve {
            self.spawn_approve(ctx);
        }
        if refine {
            self.spawn_refinement(ctx);
        }
    }

    fn show_modals(&mut self, ctx: &egui::Context) {
        let lang = self.lang;

        if self.show_expanded {
            let body = self
                .controller
                .draft()
                .map(|draft| draft.body.clone())
                .unwrap_or_default();
            let mut open = true;
            let mut close = false;
            egui::Window::new(tr(lang, Text::ModalTitle))
                .open(&mut open)
                .collapsible(false)
                .resizable(true)
                .default_size([700.0, 620.0])
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        render_email_html(ui, &body);
                    });
                    ui.separator();
                    if ui.button(tr(lang, Text::CloseBtn)).clicked() {
                        close = true;
                    }
                });
            self.show_expanded = open && !close;
        }

        if let Some(id) = self.pending_discard.clone() {
            let mut confirmed = false;
            let mut cancelled = false;
            egui::Window::new(tr(lang, Text::DiscardConfirmTitle))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.set_max_width(360.0);
                    ui.label(tr(lang, Text::DiscardConfirmBody));
                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        let yes = egui::Button::new(
                            RichText::new(tr(lang, Text::ConfirmYes)).color(Color32::WHITE),
                        )
                        .fill(Color32::from_rgb(0xb4, 0x3b, 0x34));
                        if ui.add(yes).clicked() {
                            confirmed = true;
                        }
                        if ui.button(tr(lang, Text::ConfirmNo)).clicked() {
                            cancelled = true;
                        }
                    });
                });
            if confirmed {
                self.pending_discard = None;
                self.spawn_update(ctx, id, RecordStatus::Ignored, None, UpdateIntent::Discard);
            } else if cancelled {
                self.pending_discard = None;
            }
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.controller.tick(Instant::now());

        if !self.authenticated {
            self.show_login(ctx);
            return;
        }

        if !self.fetched_once {
            self.spawn_fetch_pending(ctx);
            self.fetched_once = true;
        }

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_sidebar(ctx);
        self.show_workspace(ctx);
        self.show_modals(ctx);

        if self.controller.is_generating() || self.fetching {
            ctx.request_repaint_after(std::time::Duration::from_millis(150));
        }
    }
}

fn time_ago(received_at: Option<DateTime<Utc>>) -> String {
    let Some(at) = received_at else {
        return String::new();
    };
    let elapsed = Utc::now() - at;
    if elapsed.num_days() > 0 {
        format!("{}d", elapsed.num_days())
    } else if elapsed.num_hours() > 0 {
        format!("{}h", elapsed.num_hours())
    } else {
        format!("{}m", elapsed.num_minutes().max(0))
    }
}

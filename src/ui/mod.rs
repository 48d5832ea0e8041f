//! UI Components for SantaTerm
//!
//! [`TerminalApp`] is the eframe application. Each frame it drains session
//! events, takes a fresh [`SessionSnapshot`] and draws it: the transcript in
//! a bottom-pinned scroll area, one monitor per decryption run, the input row
//! while the session takes input, and the destroyed screen at the end.

pub mod colors;

use eframe::egui;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};
use zeroize::{Zeroize, Zeroizing};

use crate::config::UiConfig;
use crate::events::SessionEvent;
use crate::models::{HistoryLine, LineKind, Markup, RunId, SessionPhase, Tone};
use crate::script::{DESTROYED_BANNER, DESTROYED_FOOTER, DESTROYED_HEADLINE, DESTROYED_NOTICE};
use crate::sequence::decryption::PROGRESS_BAR_WIDTH;
use crate::sequence::DecryptionView;
use crate::session::{Session, SessionSnapshot};

pub use colors::UiColors;

/// How often to repaint while timers may be changing the session
const REPAINT_INTERVAL: Duration = Duration::from_millis(50);

type Monitors = HashMap<RunId, DecryptionView>;

/// The terminal window
pub struct TerminalApp {
    session: Session,
    events: broadcast::Receiver<SessionEvent>,
    /// Text typed into the input row; wiped after every submission
    input: Zeroizing<String>,
    colors: UiColors,
    font_size: f32,
    scroll_pending: bool,
    focus_pending: bool,
}

impl TerminalApp {
    /// Create the app around a session
    pub fn new(session: Session, config: &UiConfig) -> Self {
        let events = session.subscribe();
        Self {
            session,
            events,
            input: Zeroizing::new(String::new()),
            colors: UiColors::default(),
            font_size: config.font_size,
            scroll_pending: true,
            focus_pending: true,
        }
    }

    /// The session being displayed
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Apply pending session events to the view flags
    pub fn drain_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    if event.scrolls_history() {
                        self.scroll_pending = true;
                    }
                    if event == SessionEvent::FocusRequested {
                        self.focus_pending = true;
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!("Renderer skipped {} session events", skipped);
                    self.scroll_pending = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    /// Send the input row to the session and wipe it
    pub fn submit_input(&mut self) {
        if let Err(e) = self.session.submit(&self.input) {
            debug!("Submission dropped: {}", e);
        }
        self.input.zeroize();
        self.focus_pending = true;
        self.scroll_pending = true;
    }

    fn font(&self) -> egui::FontId {
        egui::FontId::monospace(self.font_size)
    }

    fn text(&self, text: impl Into<String>, color: egui::Color32) -> egui::RichText {
        egui::RichText::new(text).font(self.font()).color(color)
    }

    fn draw_line(&self, ui: &mut egui::Ui, line: &HistoryLine, monitors: &Monitors) {
        let base = self.colors.line(line.kind);
        if line.kind == LineKind::Input {
            ui.horizontal_wrapped(|ui| {
                if let Some(prompt) = &line.prompt {
                    ui.label(self.text(prompt.as_str(), self.colors.accent));
                }
                self.draw_markup(ui, &line.content, base, monitors);
            });
        } else {
            self.draw_markup(ui, &line.content, base, monitors);
        }
    }

    fn draw_markup(
        &self,
        ui: &mut egui::Ui,
        markup: &Markup,
        base: egui::Color32,
        monitors: &Monitors,
    ) {
        match markup {
            Markup::Text(text) | Markup::Preformatted(text) => {
                ui.label(self.text(text.as_str(), base));
            }
            Markup::Styled { tone, text } => {
                let mut rich = self.text(text.as_str(), self.colors.tone(*tone, base));
                match tone {
                    Tone::Headline => rich = rich.size(self.font_size * 1.4).strong(),
                    Tone::Highlight => {
                        rich = rich
                            .strong()
                            .background_color(self.colors.highlight_background)
                    }
                    Tone::Hint => rich = rich.italics(),
                    _ => {}
                }
                ui.label(rich);
            }
            Markup::Column(children) => {
                ui.vertical(|ui| {
                    for child in children {
                        self.draw_markup(ui, child, base, monitors);
                    }
                });
            }
            Markup::Row(children) => {
                ui.horizontal_wrapped(|ui| {
                    for child in children {
                        self.draw_markup(ui, child, base, monitors);
                    }
                });
            }
            Markup::DecryptionMonitor { run } => {
                if let Some(view) = monitors.get(run) {
                    self.draw_monitor(ui, view);
                }
            }
        }
    }

    fn draw_monitor(&self, ui: &mut egui::Ui, view: &DecryptionView) {
        let color = self.colors.monitor;
        ui.vertical(|ui| {
            for entry in &view.log {
                ui.label(self.text(entry.as_str(), color.gamma_multiply(0.8)));
            }
            ui.label(self.text(view.progress_bar(PROGRESS_BAR_WIDTH), color).strong());
            ui.label(
                egui::RichText::new(view.status_label())
                    .font(egui::FontId::monospace(self.font_size * 0.7))
                    .color(color),
            );
        });
    }

    fn draw_input(&mut self, ui: &mut egui::Ui, snapshot: &SessionSnapshot) {
        ui.horizontal(|ui| {
            ui.label(self.text(snapshot.prompt.as_str(), self.colors.accent));

            let edit = egui::TextEdit::singleline(&mut *self.input)
                .password(snapshot.masked)
                .font(egui::FontId::monospace(self.font_size))
                .text_color(self.colors.foreground)
                .desired_width(f32::INFINITY);
            let response = ui.add(edit);

            if self.focus_pending {
                response.request_focus();
                self.focus_pending = false;
            }

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.submit_input();
            }
        });
    }

    fn draw_destroyed(&self, ui: &mut egui::Ui) {
        let red = self.colors.destroyed;
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(self.colors.background))
            .show_inside(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.25);
                    ui.label(
                        egui::RichText::new(DESTROYED_HEADLINE)
                            .font(egui::FontId::monospace(self.font_size * 4.0))
                            .color(red)
                            .strong(),
                    );
                    ui.separator();
                    ui.label(
                        egui::RichText::new(DESTROYED_BANNER)
                            .font(egui::FontId::monospace(self.font_size * 2.0))
                            .color(red),
                    );
                    ui.separator();
                    ui.add_space(self.font_size);
                    ui.label(self.text(DESTROYED_NOTICE, red));
                    ui.add_space(self.font_size * 2.0);
                    for line in DESTROYED_FOOTER {
                        ui.label(
                            egui::RichText::new(line)
                                .font(egui::FontId::monospace(self.font_size * 0.7))
                                .color(red.gamma_multiply(0.5)),
                        );
                    }
                });
            });
    }
}

impl eframe::App for TerminalApp {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        self.drain_events();
        let snapshot = self.session.snapshot();

        if snapshot.phase == SessionPhase::Destroyed {
            self.draw_destroyed(ui);
            return;
        }

        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .fill(self.colors.background)
                    .inner_margin(16.0),
            )
            .show_inside(ui, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &snapshot.lines {
                            self.draw_line(ui, line, &snapshot.monitors);
                        }

                        if snapshot.phase.accepts_input() {
                            self.draw_input(ui, &snapshot);
                        }

                        if self.scroll_pending {
                            ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                            self.scroll_pending = false;
                        }
                    });
            });

        ui.ctx().request_repaint_after(REPAINT_INTERVAL);
    }
}

// XsimWatch - gui.rs
//
// Top-level eframe::App implementation.
// Drains monitor events into the view state, renders the panels, and turns
// panel actions into monitor requests or editor launches.

use crate::app::monitor::MonitorHandle;
use crate::app::state::AppState;
use crate::core::model::{DiagnosticLevel, SourceReference};
use crate::platform::editor::{self, EditorConfig, LaunchPlan};
use crate::ui;
use crate::ui::panels::header::HeaderAction;
use crate::util::constants;
use std::time::Duration;

/// The XsimWatch application.
pub struct XsimWatchApp {
    pub state: AppState,
    pub monitor: MonitorHandle,
    pub editor: EditorConfig,
    /// How often to wake up and drain the channel when idle.
    repaint_interval: Duration,
    monitor_loss_reported: bool,
}

impl XsimWatchApp {
    pub fn new(
        state: AppState,
        monitor: MonitorHandle,
        editor: EditorConfig,
        repaint_interval: Duration,
    ) -> Self {
        Self {
            state,
            monitor,
            editor,
            repaint_interval,
            monitor_loss_reported: false,
        }
    }

    fn open_reference(&mut self, reference: &SourceReference) {
        match editor::open_reference(reference, &self.editor) {
            Ok(LaunchPlan::Editor { program, .. }) => {
                self.state.push_system_log(
                    DiagnosticLevel::Info,
                    format!(
                        "open: {}:{} with {}",
                        reference.file_path.display(),
                        reference.line_number,
                        program.display()
                    ),
                );
            }
            Ok(LaunchPlan::DefaultHandler { file }) => {
                self.state
                    .push_system_log(DiagnosticLevel::Info, format!("open: {}", file.display()));
            }
            Err(e) => {
                tracing::warn!(
                    file = %reference.file_path.display(),
                    error = %e,
                    "Failed to open reference"
                );
                self.state.push_system_log(DiagnosticLevel::Error, e.to_string());
            }
        }
    }
}

impl eframe::App for XsimWatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll the monitor with a per-frame budget so a burst of events cannot
        // stall rendering; leftovers are picked up next frame.
        let events = self
            .monitor
            .poll_events(constants::MAX_MONITOR_EVENTS_PER_FRAME);
        let had_events = !events.is_empty();
        for event in events {
            self.state.apply(event);
        }

        if !self.monitor.is_active() && !self.monitor_loss_reported {
            self.monitor_loss_reported = true;
            self.state
                .push_system_log(DiagnosticLevel::Error, "Monitor stopped unexpectedly");
        }

        if self.state.raise_requested {
            self.state.raise_requested = false;
            ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(false));
            ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
        }

        if had_events {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(self.repaint_interval);
        }

        // Header
        let mut header_action = None;
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            header_action = ui::panels::header::render(ui, &self.state);
        });
        if header_action == Some(HeaderAction::SearchHost) {
            tracing::info!("Host search requested");
            self.monitor.request_host_search();
            self.state.push_system_log(DiagnosticLevel::Info, "search");
        }

        // System log (bottom)
        egui::TopBottomPanel::bottom("system_log")
            .resizable(true)
            .default_height(ui::theme::SYSTEM_LOG_HEIGHT)
            .show(ctx, |ui| {
                ui::panels::system_log::render(ui, &self.state);
            });

        // Central log view
        let mut clicked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            clicked = ui::panels::log_view::render(ui, &mut self.state);
        });
        if let Some(reference) = clicked {
            self.open_reference(&reference);
        }
    }
}

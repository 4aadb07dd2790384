// XsimWatch - ui/panels/header.rs
//
// Top bar: watched project, manual host search, and the current log label.

use crate::app::state::AppState;

/// What the user asked for in the header this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    SearchHost,
}

/// Render the header panel.
pub fn render(ui: &mut egui::Ui, state: &AppState) -> Option<HeaderAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        if ui
            .button("Search")
            .on_hover_text("Look for the host tool window again")
            .clicked()
        {
            action = Some(HeaderAction::SearchHost);
        }
        ui.separator();
        let project = egui::RichText::new(state.project_label()).monospace();
        if state.project_file.is_some() {
            ui.label(project.strong());
        } else {
            ui.label(project.weak());
        }
    });

    ui.horizontal(|ui| {
        ui.label("Log:");
        match state.current_log_label() {
            Some(label) => ui.label(egui::RichText::new(label).monospace()),
            None => ui.label(egui::RichText::new("none").weak()),
        };
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let watched = state.discovered_logs.len();
            if watched > 0 {
                ui.label(format!("{watched} log(s) watched"));
            }
        });
    });

    action
}

// XsimWatch - ui/panels/system_log.rs
//
// Bottom panel listing monitor diagnostics, newest at the bottom.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the system log panel.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    egui::ScrollArea::vertical()
        .id_salt("system_log")
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in &state.system_log {
                ui.label(
                    egui::RichText::new(&line.message)
                        .monospace()
                        .color(theme::diagnostic_colour(line.level)),
                );
            }
        });
}

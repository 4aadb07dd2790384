// XsimWatch - ui/panels/log_view.rs
//
// Virtual-scrolling view of the current error log.
//
// Uses `ScrollArea::show_rows`, so only visible lines are laid out. Each row
// is the line prefix, an optional clickable reference, and the suffix, all
// in the line's severity colour except the reference, which is drawn as a
// link.

use crate::app::state::AppState;
use crate::core::model::SourceReference;
use crate::ui::theme;
use egui::RichText;

/// Render the central log view. Returns the reference the user clicked.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Option<SourceReference> {
    let Some(log) = &state.current else {
        ui.centered_and_justified(|ui| {
            ui.label("No error log to show.");
        });
        return None;
    };

    let dark_mode = ui.visuals().dark_mode;
    let font_size = state.font_size;
    let row_height = font_size + 4.0;
    let total_rows = log.lines.len();
    let mut clicked = None;

    let mut area = egui::ScrollArea::both()
        .id_salt("log_view")
        .auto_shrink([false; 2]);
    if state.scroll_to_bottom {
        let full = total_rows as f32 * (row_height + ui.spacing().item_spacing.y);
        area = area.vertical_scroll_offset(full);
    }

    area.show_rows(ui, row_height, total_rows, |ui, row_range| {
        for idx in row_range {
            let Some(line) = log.lines.get(idx) else {
                continue;
            };
            let colour = theme::severity_colour(line.severity, dark_mode);
            let text = |s: &str| RichText::new(s).monospace().size(font_size).color(colour);

            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                ui.set_min_height(row_height);
                if line.text.is_empty() {
                    ui.label(text(" "));
                    return;
                }
                ui.label(text(line.prefix()));
                if let Some(reference) = line.reference() {
                    let link = RichText::new(line.span_text())
                        .monospace()
                        .size(font_size)
                        .color(theme::link_colour(dark_mode));
                    let response = ui
                        .link(link)
                        .on_hover_text(format!("Open {}", reference.file_path.display()));
                    if response.clicked() {
                        clicked = Some(reference.clone());
                    }
                }
                let suffix = line.suffix();
                if !suffix.is_empty() {
                    ui.label(text(suffix));
                }
            });
        }
    });

    state.scroll_to_bottom = false;
    clicked
}

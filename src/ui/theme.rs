// XsimWatch - ui/theme.rs
//
// Colour scheme, severity colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::{DiagnosticLevel, LineSeverity};
use egui::Color32;

/// Text colour for a log line of the given severity.
pub fn severity_colour(severity: LineSeverity, dark_mode: bool) -> Color32 {
    match severity {
        LineSeverity::Error => Color32::from_rgb(220, 38, 38), // Red 600
        LineSeverity::Warning => Color32::from_rgb(217, 119, 6), // Amber 600
        LineSeverity::Normal => row_text_colour(dark_mode),
    }
}

/// Default foreground for plain text.
pub fn row_text_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(229, 231, 235) // Gray 200
    } else {
        Color32::from_rgb(17, 24, 39) // Gray 900
    }
}

/// Colour for a clickable source reference.
pub fn link_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(96, 165, 250) // Blue 400
    } else {
        Color32::from_rgb(29, 78, 216) // Blue 700
    }
}

/// System log line colour: info blue, error red.
pub fn diagnostic_colour(level: DiagnosticLevel) -> Color32 {
    match level {
        DiagnosticLevel::Info => Color32::from_rgb(59, 130, 246), // Blue 500
        DiagnosticLevel::Error => Color32::from_rgb(220, 38, 38), // Red 600
    }
}

/// Layout constants.
pub const SYSTEM_LOG_HEIGHT: f32 = 140.0;
pub const WINDOW_SIZE: [f32; 2] = [1000.0, 700.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [600.0, 400.0];

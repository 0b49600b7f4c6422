// ABOUTME: Shared color palette for the wizard renderer

use ratatui::style::Color;

use crate::dialog::ToastKind;
use crate::wizard::StepStatus;

pub const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
pub const DARK_BG: Color = Color::Rgb(25, 25, 35);
pub const PANEL_BG: Color = Color::Rgb(30, 30, 40);
pub const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
pub const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
pub const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
pub const ERROR_RED: Color = Color::Rgb(220, 80, 80);
pub const WARNING_YELLOW: Color = Color::Rgb(220, 180, 80);

pub fn status_icon(status: StepStatus) -> (&'static str, Color) {
    match status {
        StepStatus::Completed => ("●", SELECTION_GREEN),
        StepStatus::Current => ("◉", GOLD),
        StepStatus::Accessible => ("○", CORNFLOWER_BLUE),
        StepStatus::Disabled => ("○", SUBDUED_BORDER),
    }
}

pub fn toast_style(kind: ToastKind) -> (&'static str, Color) {
    match kind {
        ToastKind::Info => ("ℹ", CORNFLOWER_BLUE),
        ToastKind::Success => ("✓", SELECTION_GREEN),
        ToastKind::Warning => ("⚠", WARNING_YELLOW),
        ToastKind::Error => ("✕", ERROR_RED),
    }
}

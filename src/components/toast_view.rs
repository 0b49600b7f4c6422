// ABOUTME: Toast stack overlay, grouped by screen position

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::theme::{toast_style, PANEL_BG, SOFT_WHITE};
use crate::dialog::{Toast, ToastManager, ToastPosition};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 3;

pub struct ToastComponent;

impl ToastComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, toasts: &ToastManager) {
        // Slot per position, counting how many toasts are already stacked there
        let mut stacked: Vec<(ToastPosition, u16)> = Vec::new();

        for toast in toasts.toasts() {
            let slot = match stacked.iter_mut().find(|(p, _)| *p == toast.position) {
                Some((_, count)) => {
                    *count += 1;
                    *count - 1
                }
                None => {
                    stacked.push((toast.position, 1));
                    0
                }
            };

            if let Some(toast_area) = toast_rect(area, toast.position, slot) {
                self.render_toast(frame, toast_area, toast);
            }
        }
    }

    fn render_toast(&self, frame: &mut Frame, area: Rect, toast: &Toast) {
        let (icon, color) = toast_style(toast.kind);
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(PANEL_BG));
        let line = Line::from(vec![
            Span::styled(format!("{icon} "), Style::default().fg(color)),
            Span::styled(toast.message.clone(), Style::default().fg(SOFT_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

impl Default for ToastComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Area for the `slot`-th toast at `position`, or `None` when it would not fit
fn toast_rect(area: Rect, position: ToastPosition, slot: u16) -> Option<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    let offset = slot.checked_mul(TOAST_HEIGHT)?;
    if offset + TOAST_HEIGHT > area.height {
        return None;
    }

    let x = match position {
        ToastPosition::TopLeft | ToastPosition::BottomLeft => area.x,
        ToastPosition::TopRight | ToastPosition::BottomRight => area.x + area.width - width,
        ToastPosition::TopCenter | ToastPosition::BottomCenter => area.x + (area.width - width) / 2,
    };
    let y = match position {
        ToastPosition::TopLeft | ToastPosition::TopRight | ToastPosition::TopCenter => {
            area.y + offset
        }
        _ => area.y + area.height - TOAST_HEIGHT - offset,
    };

    Some(Rect {
        x,
        y,
        width,
        height: TOAST_HEIGHT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_rect_corners() {
        let area = Rect::new(0, 0, 100, 30);

        let top_right = toast_rect(area, ToastPosition::TopRight, 0).unwrap();
        assert_eq!((top_right.x, top_right.y), (56, 0));

        let second = toast_rect(area, ToastPosition::TopRight, 1).unwrap();
        assert_eq!(second.y, 3);

        let bottom_left = toast_rect(area, ToastPosition::BottomLeft, 0).unwrap();
        assert_eq!((bottom_left.x, bottom_left.y), (0, 27));
    }

    #[test]
    fn test_toast_rect_overflow() {
        let area = Rect::new(0, 0, 100, 7);
        assert!(toast_rect(area, ToastPosition::TopLeft, 1).is_some());
        assert!(toast_rect(area, ToastPosition::TopLeft, 2).is_none());
    }
}

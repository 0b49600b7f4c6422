// ABOUTME: Modal dialog overlay for alert, confirm, and prompt requests

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::theme::{CORNFLOWER_BLUE, GOLD, MUTED_GRAY, PANEL_BG, SOFT_WHITE, WARNING_YELLOW};
use crate::dialog::{DialogKind, DialogManager};

pub struct DialogComponent;

impl DialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, dialogs: &DialogManager) {
        let Some(dialog) = dialogs.active() else {
            return;
        };
        let request = dialog.request();

        let is_prompt = request.kind == DialogKind::Prompt;
        let dialog_width = 60.min(area.width.saturating_sub(4));
        let dialog_height = if is_prompt { 10 } else { 8 };
        let dialog_area = Rect {
            x: area.x + (area.width.saturating_sub(dialog_width)) / 2,
            y: area.y + (area.height.saturating_sub(dialog_height)) / 2,
            width: dialog_width,
            height: dialog_height.min(area.height),
        };

        // Clear only the dialog area so the wizard stays visible behind it
        frame.render_widget(Clear, dialog_area);

        let (icon, icon_color) = match request.kind {
            DialogKind::Alert => ("⚠", WARNING_YELLOW),
            DialogKind::Confirm => ("?", CORNFLOWER_BLUE),
            DialogKind::Prompt => ("✎", GOLD),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(icon_color))
            .style(Style::default().bg(PANEL_BG))
            .title(Line::from(vec![
                Span::styled(format!(" {icon} "), Style::default().fg(icon_color)),
                Span::styled(
                    format!("{} ", request.title),
                    Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
                ),
            ]));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let mut constraints = vec![Constraint::Min(1)];
        if is_prompt {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(inner);

        let message = Paragraph::new(request.message.clone())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(SOFT_WHITE));
        frame.render_widget(message, chunks[0]);

        if is_prompt {
            let input = if dialog.input().is_empty() {
                Span::styled(request.placeholder.clone(), Style::default().fg(MUTED_GRAY))
            } else {
                Span::styled(format!("{}▏", dialog.input()), Style::default().fg(SOFT_WHITE))
            };
            let input_box = Paragraph::new(Line::from(input)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(CORNFLOWER_BLUE)),
            );
            frame.render_widget(input_box, chunks[1]);
        }

        let mut buttons = vec![Span::styled(
            format!(" [Enter] {} ", request.confirm_text),
            Style::default().fg(PANEL_BG).bg(GOLD).add_modifier(Modifier::BOLD),
        )];
        if request.kind != DialogKind::Alert {
            buttons.push(Span::raw("  "));
            buttons.push(Span::styled(
                format!(" [Esc] {} ", request.cancel_text),
                Style::default().fg(SOFT_WHITE),
            ));
        }
        let button_row = chunks[chunks.len() - 1];
        frame.render_widget(
            Paragraph::new(Line::from(buttons)).alignment(Alignment::Center),
            button_row,
        );
    }
}

impl Default for DialogComponent {
    fn default() -> Self {
        Self::new()
    }
}

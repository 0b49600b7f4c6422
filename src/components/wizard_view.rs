// ABOUTME: Main wizard screen - step indicators, progress gauge, step content, and key hints
// Reads controller state only; every transition goes through the app state

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

use super::theme::{
    status_icon, CORNFLOWER_BLUE, DARK_BG, ERROR_RED, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN,
    SOFT_WHITE, SUBDUED_BORDER,
};
use crate::app::AppState;
use crate::config::{Orientation, SUMMARY_SLOT};
use crate::wizard::{StepContent, StepDescriptor};

pub struct WizardViewComponent;

impl WizardViewComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let vertical = state.config.orientation == Orientation::Vertical;
        let header_height = if vertical { 3 } else { 4 };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_height), // Title + indicators
                Constraint::Length(3),             // Progress gauge
                Constraint::Min(6),                // Step content
                Constraint::Length(1),             // Key hints
            ])
            .split(area);

        self.render_header(frame, layout[0], state, !vertical);
        self.render_progress(frame, layout[1], state);

        if vertical {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(26), Constraint::Min(20)])
                .split(layout[2]);
            self.render_step_list(frame, body[0], state);
            self.render_content(frame, body[1], state);
        } else {
            self.render_content(frame, layout[2], state);
        }

        self.render_hints(frame, layout[3], state);
    }

    fn render_header(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        with_indicators: bool,
    ) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from(Span::styled(
            state.definition.title.clone(),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ))];
        if with_indicators {
            lines.push(self.indicator_line(state));
        }

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn step_label(&self, state: &AppState, index: usize, step: &StepDescriptor) -> String {
        if state.config.show_step_numbers {
            format!("{}. {}", index + 1, step.title)
        } else {
            step.title.clone()
        }
    }

    /// Horizontal step indicators: ● done, ◉ current, ○ open or locked
    fn indicator_line(&self, state: &AppState) -> Line<'static> {
        let steps = &state.definition.steps;
        let mut spans = Vec::with_capacity(steps.len() * 4);

        for (idx, step) in steps.iter().enumerate() {
            let (icon, color) = status_icon(state.controller.step_status(idx));
            let label_style = if idx == state.controller.current_step() {
                Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED_GRAY)
            };

            spans.push(Span::styled(icon, Style::default().fg(color)));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(self.step_label(state, idx, step), label_style));
            if idx + 1 < steps.len() {
                spans.push(Span::styled(" → ", Style::default().fg(SUBDUED_BORDER)));
            }
        }

        Line::from(spans)
    }

    fn render_step_list(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(PANEL_BG))
            .title(" Steps ");

        let lines: Vec<Line> = state
            .definition
            .steps
            .iter()
            .enumerate()
            .map(|(idx, step)| {
                let (icon, color) = status_icon(state.controller.step_status(idx));
                Line::from(vec![
                    Span::styled(format!(" {icon} "), Style::default().fg(color)),
                    Span::styled(
                        self.step_label(state, idx, step),
                        Style::default().fg(SOFT_WHITE),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let progress = state.controller.progress();
        let label = if progress.is_complete {
            "Complete".to_string()
        } else {
            format!(
                "Step {} of {} · {}% · {} completed",
                progress.current, progress.total, progress.percentage, progress.completed
            )
        };

        let bar_color = if progress.is_complete {
            SELECTION_GREEN
        } else {
            CORNFLOWER_BLUE
        };

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(SUBDUED_BORDER)),
            )
            .gauge_style(Style::default().fg(bar_color).bg(PANEL_BG))
            .ratio(progress.ratio())
            .label(label);
        frame.render_widget(gauge, area);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(step) = state.current_step() else {
            let empty = Paragraph::new("This wizard has no steps")
                .style(Style::default().fg(MUTED_GRAY))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(format!(" {} ", step.title))
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let mut lines = Vec::new();
        if let Some(description) = &step.description {
            lines.push(Line::from(Span::styled(
                description.clone(),
                Style::default().fg(MUTED_GRAY),
            )));
            lines.push(Line::from(""));
        }

        if state.controller.is_complete() {
            lines.push(Line::from(Span::styled(
                "✓ All steps complete",
                Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.extend(self.summary_lines(state));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press Enter to exit",
                Style::default().fg(MUTED_GRAY),
            )));
        } else {
            match &step.content {
                StepContent::StaticText(text) if !text.is_empty() => {
                    lines.push(Line::from(Span::styled(
                        text.clone(),
                        Style::default().fg(SOFT_WHITE),
                    )));
                    lines.push(Line::from(""));
                }
                StepContent::StaticText(_) => {}
                StepContent::RenderSlot(slot) if slot == SUMMARY_SLOT => {
                    lines.extend(self.summary_lines(state));
                    lines.push(Line::from(""));
                }
                StepContent::RenderSlot(slot) => {
                    lines.push(Line::from(Span::styled(
                        format!("Nothing to show for '{slot}'"),
                        Style::default().fg(MUTED_GRAY),
                    )));
                }
            }
            lines.extend(self.field_lines(state, step));
        }

        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
    }

    fn field_lines(&self, state: &AppState, step: &StepDescriptor) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for (idx, field) in step.fields.iter().enumerate() {
            let focused = idx == state.focused_field;
            let value = state.field_value(&field.name);

            let marker = if focused {
                Span::styled("▶ ", Style::default().fg(GOLD))
            } else {
                Span::raw("  ")
            };
            lines.push(Line::from(vec![
                marker,
                Span::styled(
                    field.label.clone(),
                    Style::default().fg(if focused { SOFT_WHITE } else { MUTED_GRAY }),
                ),
            ]));

            let shown = if value.is_empty() {
                Span::styled(
                    field.placeholder.clone().unwrap_or_default(),
                    Style::default().fg(SUBDUED_BORDER),
                )
            } else if field.secret {
                Span::styled("•".repeat(value.chars().count()), Style::default().fg(SOFT_WHITE))
            } else {
                Span::styled(value, Style::default().fg(SOFT_WHITE))
            };
            let cursor = if focused { "▏" } else { "" };
            lines.push(Line::from(vec![
                Span::raw("    "),
                shown,
                Span::styled(cursor, Style::default().fg(GOLD)),
            ]));

            if let Some(error) = state.validator.field_error(&step.key, &field.name) {
                lines.push(Line::from(Span::styled(
                    format!("    {error}"),
                    Style::default().fg(ERROR_RED),
                )));
            }
        }

        lines
    }

    /// Every field entered so far, secrets masked
    fn summary_lines(&self, state: &AppState) -> Vec<Line<'static>> {
        let fields = state.definition.steps.iter().flat_map(|s| s.fields.iter());
        fields
            .map(|field| {
                let value = state.field_value(&field.name);
                let shown = if value.is_empty() {
                    "—".to_string()
                } else if field.secret {
                    "•".repeat(8)
                } else {
                    value
                };
                Line::from(vec![
                    Span::styled(format!("  {}: ", field.label), Style::default().fg(MUTED_GRAY)),
                    Span::styled(shown, Style::default().fg(SOFT_WHITE)),
                ])
            })
            .collect()
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let hints = if state.controller.is_complete() {
            "Enter exit".to_string()
        } else {
            let next = if state.controller.is_last() { "finish" } else { "next" };
            let mut hints = format!("Enter {next} · Ctrl-B back · Tab field · F1-F9 jump");
            if state.has_persistence() {
                hints.push_str(" · Ctrl-S save");
            }
            hints.push_str(" · Ctrl-R reset · Esc quit");
            hints
        };

        let widget = Paragraph::new(hints)
            .style(Style::default().fg(MUTED_GRAY).bg(DARK_BG))
            .alignment(Alignment::Center);
        frame.render_widget(widget, area);
    }
}

impl Default for WizardViewComponent {
    fn default() -> Self {
        Self::new()
    }
}

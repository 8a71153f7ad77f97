use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::app::AppScreen;
use crate::ui::theme::Theme;

/// Static navigation rail: app badge, screen list with active highlight,
/// and the daily-goal stub (no backing store, always 0/100).
pub struct Sidebar<'a> {
    active: AppScreen,
    theme: &'a Theme,
}

impl<'a> Sidebar<'a> {
    pub fn new(active: AppScreen, theme: &'a Theme) -> Self {
        Self { active, theme }
    }

    fn items(&self) -> [(AppScreen, &'static str, String); 4] {
        [
            (AppScreen::Dashboard, "d", t!("nav.dashboard").to_string()),
            (AppScreen::Practice, "p", t!("nav.practice").to_string()),
            (AppScreen::History, "h", t!("nav.history").to_string()),
            (AppScreen::Settings, "s", t!("nav.settings").to_string()),
        ]
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.panel_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(5),
            ])
            .split(inner);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                " DeepClone",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                " AI Coding Tutor",
                Style::default().fg(colors.text_dim()),
            )),
        ]);
        title.render(layout[0], buf);

        let mut nav_lines: Vec<Line> = vec![Line::from("")];
        for (screen, key, label) in self.items() {
            let is_active = screen == self.active;
            let indicator = if is_active { ">" } else { " " };
            let style = if is_active {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_dim())
            };
            nav_lines.push(Line::from(Span::styled(
                format!(" {indicator} [{key}] {label}"),
                style,
            )));
            nav_lines.push(Line::from(""));
        }
        Paragraph::new(nav_lines).render(layout[1], buf);

        // Daily goal stub
        let goal_width = inner.width.saturating_sub(4) as usize;
        let goal = Paragraph::new(vec![
            Line::from(Span::styled(
                format!(" {}", t!("sidebar.daily_goal")),
                Style::default().fg(colors.text_dim()),
            )),
            Line::from(Span::styled(
                format!(" {}", "\u{2591}".repeat(goal_width)),
                Style::default().fg(colors.accent_dim()),
            )),
            Line::from(vec![
                Span::styled(
                    format!(" {}", t!("sidebar.goal_count")),
                    Style::default().fg(colors.text_dim()),
                ),
                Span::styled("  0%", Style::default().fg(colors.text_dim())),
            ]),
        ]);
        goal.render(layout[2], buf);
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::task::Difficulty;
use crate::ui::theme::Theme;

/// Difficulty picker: one card per level plus the static popular-topics
/// list. Owns the selection cursor; the app maps a confirmed selection to
/// a practice session.
pub struct Dashboard {
    pub selected: usize,
    pub theme: &'static Theme,
}

impl Dashboard {
    pub fn new(theme: &'static Theme) -> Self {
        Self { selected: 0, theme }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % Difficulty::ALL.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = Difficulty::ALL.len() - 1;
        }
    }

    pub fn selected_difficulty(&self) -> Difficulty {
        Difficulty::ALL[self.selected]
    }

    fn card_color(&self, difficulty: Difficulty) -> Color {
        let colors = &self.theme.colors;
        match difficulty {
            Difficulty::Beginner => colors.success(),
            Difficulty::Intermediate => colors.accent(),
            Difficulty::Advanced => colors.warning(),
            Difficulty::Master => colors.error(),
        }
    }
}

impl Widget for &Dashboard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(Difficulty::ALL.len() as u16 * 4),
                Constraint::Min(0),
            ])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", t!("dashboard.welcome")),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {}", t!("dashboard.pick")),
                Style::default().fg(colors.text_dim()),
            )),
        ]);
        header.render(layout[0], buf);

        let card_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                Difficulty::ALL
                    .iter()
                    .map(|_| Constraint::Length(4))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);

        for (i, difficulty) in Difficulty::ALL.into_iter().enumerate() {
            let is_selected = i == self.selected;
            let card_color = self.card_color(difficulty);

            let block = Block::bordered()
                .border_style(Style::default().fg(if is_selected {
                    colors.border_focused()
                } else {
                    colors.border()
                }))
                .title(Span::styled(
                    format!(" [{}] {} ", i + 1, t!(&format!("difficulty.{}", difficulty.key()))),
                    Style::default().fg(card_color).add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ));
            let inner = block.inner(card_layout[i]);
            block.render(card_layout[i], buf);

            let desc = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!(" {}", t!(&format!("dashboard.desc.{}", difficulty.key()))),
                    Style::default().fg(colors.text_dim()),
                )),
                Line::from(Span::styled(
                    if is_selected {
                        format!(" {} \u{2192}", t!("dashboard.start"))
                    } else {
                        String::new()
                    },
                    Style::default().fg(colors.fg()),
                )),
            ]);
            desc.render(inner, buf);
        }

        let mut topic_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", t!("dashboard.popular")),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
        ];
        for topic in ["PyTorch 기초 (Basics)", "MNIST 분류기", "ResNet 구현"] {
            topic_lines.push(Line::from(vec![
                Span::styled(format!("  \u{2022} {topic}"), Style::default().fg(colors.text_dim())),
            ]));
        }
        Paragraph::new(topic_lines).render(layout[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        Dashboard::new(theme)
    }

    #[test]
    fn test_selection_wraps() {
        let mut d = dashboard();
        assert_eq!(d.selected_difficulty(), Difficulty::Beginner);
        d.prev();
        assert_eq!(d.selected_difficulty(), Difficulty::Master);
        d.next();
        assert_eq!(d.selected_difficulty(), Difficulty::Beginner);
        d.next();
        assert_eq!(d.selected_difficulty(), Difficulty::Intermediate);
    }
}

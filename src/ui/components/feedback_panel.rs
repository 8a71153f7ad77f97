use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::session::task::FeedbackResult;
use crate::ui::theme::Theme;

/// Bottom-sheet overlay showing the scored result of a submission.
pub struct FeedbackPanel<'a> {
    feedback: &'a FeedbackResult,
    theme: &'a Theme,
}

impl<'a> FeedbackPanel<'a> {
    pub fn new(feedback: &'a FeedbackResult, theme: &'a Theme) -> Self {
        Self { feedback, theme }
    }

    /// Rows needed to show everything without scrolling (long feedback
    /// text may still wrap into fewer visible rows).
    pub fn desired_height(feedback: &FeedbackResult) -> u16 {
        let suggestion_rows = if feedback.suggestions.is_empty() {
            0
        } else {
            feedback.suggestions.len() as u16 + 2
        };
        // borders + headline + feedback + dismiss hint + spacing
        suggestion_rows + 7
    }

    fn score_color(&self) -> Color {
        let colors = &self.theme.colors;
        if self.feedback.score >= 90 {
            colors.success()
        } else if self.feedback.score >= 70 {
            colors.warning()
        } else {
            colors.error()
        }
    }
}

impl Widget for FeedbackPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Clear.render(area, buf);

        let headline = if self.feedback.is_correct {
            Span::styled(
                t!("feedback.correct").to_string(),
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                t!("feedback.incorrect").to_string(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )
        };

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.panel_bg()))
            .title(format!(" {} ", t!("feedback.title")));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(" {:>3} ", self.feedback.score),
                    Style::default()
                        .fg(colors.panel_bg())
                        .bg(self.score_color())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                headline,
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!(" {}", self.feedback.feedback),
                Style::default().fg(colors.fg()),
            )),
        ];

        if !self.feedback.suggestions.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(" {}", t!("feedback.suggestions")),
                Style::default().fg(colors.text_dim()).add_modifier(Modifier::BOLD),
            )));
            for suggestion in &self.feedback.suggestions {
                lines.push(Line::from(Span::styled(
                    format!("  \u{2022} {suggestion}"),
                    Style::default().fg(colors.text_dim()),
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", t!("feedback.dismiss")),
            Style::default().fg(colors.accent()),
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desired_height_grows_with_suggestions() {
        let bare = FeedbackResult {
            score: 0,
            is_correct: false,
            feedback: "f".to_string(),
            suggestions: Vec::new(),
        };
        let with_suggestions = FeedbackResult {
            suggestions: vec!["a".to_string(), "b".to_string()],
            ..bare.clone()
        };
        assert!(
            FeedbackPanel::desired_height(&with_suggestions)
                > FeedbackPanel::desired_height(&bare)
        );
    }
}

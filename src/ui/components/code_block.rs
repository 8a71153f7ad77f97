use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::theme::Theme;

/// Split text into display rows. Line-ending variants are normalized
/// before splitting, and empty rows are kept: N newline characters always
/// yield exactly N+1 rows, trailing ones included.
pub fn split_lines(code: &str) -> Vec<String> {
    code.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Line-numbered read-only code view for the reference snippet.
pub struct CodeBlock<'a> {
    code: &'a str,
    theme: &'a Theme,
    scroll: u16,
}

impl<'a> CodeBlock<'a> {
    pub fn new(code: &'a str, theme: &'a Theme) -> Self {
        Self {
            code,
            theme,
            scroll: 0,
        }
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    /// Largest scroll offset that still keeps a row on screen.
    pub fn max_scroll(code: &str, viewport_height: u16) -> u16 {
        let rows = split_lines(code).len() as u16;
        rows.saturating_sub(viewport_height.max(1))
    }
}

impl Widget for CodeBlock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let rows = split_lines(self.code);
        let number_width = rows.len().to_string().len().max(3);

        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>width$} \u{2502} ", i + 1, width = number_width),
                        Style::default().fg(colors.line_number()),
                    ),
                    Span::styled(row.clone(), Style::default().fg(colors.fg())),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .style(Style::default().bg(colors.panel_bg()))
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_preserves_trailing_empty_rows() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_split_row_count_is_newlines_plus_one() {
        assert_eq!(split_lines("").len(), 1);
        assert_eq!(split_lines("no newline").len(), 1);
        assert_eq!(split_lines("\n").len(), 2);
        assert_eq!(split_lines("\n\n").len(), 3);
        assert_eq!(split_lines("a\n\nb").len(), 3);
    }

    #[test]
    fn test_split_normalizes_line_endings() {
        assert_eq!(split_lines("a\r\nb\rc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\r\n\r\n"), vec!["a", "", ""]);
    }

    #[test]
    fn test_split_is_lossless() {
        let code = "def f():\n    return 1\n\n# done\n";
        assert_eq!(split_lines(code).join("\n"), code);
    }

    #[test]
    fn test_max_scroll() {
        let code = "a\nb\nc\nd\ne";
        assert_eq!(CodeBlock::max_scroll(code, 3), 2);
        assert_eq!(CodeBlock::max_scroll(code, 10), 0);
        assert_eq!(CodeBlock::max_scroll("", 0), 0);
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use rust_i18n::t;

use crate::session::editor::EditorState;
use crate::ui::theme::Theme;

/// The retype pane: editor buffer with a block cursor, or the placeholder
/// prompt while nothing has been typed.
pub struct EditorPane<'a> {
    editor: &'a EditorState,
    theme: &'a Theme,
}

impl<'a> EditorPane<'a> {
    pub fn new(editor: &'a EditorState, theme: &'a Theme) -> Self {
        Self { editor, theme }
    }
}

impl Widget for EditorPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (cursor_row, cursor_col) = self.editor.cursor();

        if self.editor.is_empty() {
            let placeholder = Line::from(vec![
                Span::styled(
                    " ",
                    Style::default().fg(colors.cursor_fg()).bg(colors.cursor_bg()),
                ),
                Span::styled(
                    t!("practice.placeholder").to_string(),
                    Style::default().fg(colors.placeholder()),
                ),
            ]);
            Paragraph::new(placeholder)
                .style(Style::default().bg(colors.panel_bg()))
                .render(area, buf);
            return;
        }

        let text_style = Style::default().fg(colors.fg());
        let cursor_style = Style::default().fg(colors.cursor_fg()).bg(colors.cursor_bg());

        let lines: Vec<Line> = self
            .editor
            .lines()
            .iter()
            .enumerate()
            .map(|(row, line)| {
                if row != cursor_row {
                    return Line::from(Span::styled(line.clone(), text_style));
                }
                let (before, at, after) = split_at_cursor(line, cursor_col);
                Line::from(vec![
                    Span::styled(before, text_style),
                    Span::styled(at.map(String::from).unwrap_or_else(|| " ".to_string()), cursor_style),
                    Span::styled(after, text_style),
                ])
            })
            .collect();

        // Keep the cursor row inside the viewport.
        let height = area.height.max(1);
        let scroll = (cursor_row as u16).saturating_sub(height - 1);

        Paragraph::new(lines)
            .style(Style::default().bg(colors.panel_bg()))
            .scroll((scroll, 0))
            .render(area, buf);
    }
}

/// (before_cursor, cursor_char, after_cursor) with `col` as a char index.
/// At end of line the cursor char is None and a space block is drawn.
fn split_at_cursor(line: &str, col: usize) -> (String, Option<char>, String) {
    let mut chars = line.chars();
    let before: String = chars.by_ref().take(col).collect();
    let at = chars.next();
    let after: String = chars.collect();
    (before, at, after)
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const SIDEBAR_WIDTH: u16 = 26;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥90 cols: sidebar + content
    Narrow, // <90 cols: content only, screen hints move to the footer
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 90 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }
}

pub struct AppLayout {
    pub sidebar: Option<Rect>,
    pub content: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        if tier.show_sidebar() {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(area);
            Self {
                sidebar: Some(horizontal[0]),
                content: horizontal[1],
                tier,
            }
        } else {
            Self {
                sidebar: None,
                content: area,
                tier,
            }
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Anchor an overlay of the given height to the bottom of `area`.
pub fn bottom_overlay(height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    Rect {
        x: area.x,
        y: area.y + area.height - height,
        width: area.width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(
            LayoutTier::from_area(Rect::new(0, 0, 120, 40)),
            LayoutTier::Wide
        );
        assert_eq!(
            LayoutTier::from_area(Rect::new(0, 0, 70, 40)),
            LayoutTier::Narrow
        );
    }

    #[test]
    fn test_narrow_layout_has_no_sidebar() {
        let layout = AppLayout::new(Rect::new(0, 0, 70, 40));
        assert!(layout.sidebar.is_none());
        assert_eq!(layout.content.width, 70);
    }

    #[test]
    fn test_bottom_overlay_clamps_height() {
        let area = Rect::new(0, 0, 80, 10);
        let overlay = bottom_overlay(30, area);
        assert_eq!(overlay.height, 10);
        let overlay = bottom_overlay(4, area);
        assert_eq!(overlay.y, 6);
        assert_eq!(overlay.height, 4);
    }
}

//! Category badge widget for ingredient categories.

use crate::model::Category;
use crate::tui::theme::colors;
use ratatui::{prelude::*, widgets::Widget};

/// A colored badge showing an ingredient's category ("Полезно", ...).
#[derive(Debug, Clone, Copy)]
pub struct CategoryBadge {
    category: Category,
}

impl CategoryBadge {
    #[must_use]
    pub const fn new(category: Category) -> Self {
        Self { category }
    }

    /// Style for a category (uses theme colors).
    #[must_use]
    pub fn style_for(category: Category) -> Style {
        let scheme = colors();
        let style = Style::default()
            .fg(scheme.badge_fg)
            .bg(scheme.category_color(category));
        match category {
            Category::Harmful => style.bold(),
            _ => style,
        }
    }

    /// Convert to a Span for inline use.
    #[must_use]
    pub fn to_span(self) -> Span<'static> {
        Span::styled(
            format!(" {} ", self.category.badge_label()),
            Self::style_for(self.category),
        )
    }
}

impl Widget for CategoryBadge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }
        let line = Line::from(self.to_span());
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

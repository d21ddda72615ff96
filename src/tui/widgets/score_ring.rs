//! Score display widgets.

use crate::score::{progress_ratio, HealthTier};
use crate::tui::theme::colors;
use ratatui::{prelude::*, widgets::Widget};

/// Big score readout: a fill bar, the score and the verdict line.
///
/// The terminal rendition of the circular score ring.
#[derive(Debug, Clone)]
pub struct ScoreRing {
    score: u8,
}

impl ScoreRing {
    #[must_use]
    pub const fn new(score: u8) -> Self {
        Self { score }
    }
}

impl Widget for ScoreRing {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 8 || area.height < 3 {
            return;
        }

        let tier = HealthTier::from_score(self.score);
        let color = colors().tier_color(tier);
        let center_y = area.y + area.height / 2;

        // Fill bar above the number
        if center_y > area.y {
            ScoreBar::new(self.score).render(
                Rect::new(area.x + 2, center_y - 1, area.width.saturating_sub(4), 1),
                buf,
            );
        }

        let number = format!("{}/100", self.score);
        let line = Line::styled(number, Style::default().fg(color).bold());
        buf.set_line(
            centered_x(area, line.width()),
            center_y,
            &line,
            area.width,
        );

        if center_y + 1 < area.y + area.height {
            let verdict = Line::styled(tier.verdict(), Style::default().fg(colors().text));
            buf.set_line(
                centered_x(area, verdict.width()),
                center_y + 1,
                &verdict,
                area.width,
            );
        }
    }
}

/// Horizontal bar filled to `score` percent in the tier color.
#[derive(Debug, Clone)]
pub struct ScoreBar {
    score: u8,
}

impl ScoreBar {
    #[must_use]
    pub const fn new(score: u8) -> Self {
        Self { score }
    }

    /// Number of filled cells out of `width`.
    #[must_use]
    pub fn filled_cells(score: u8, width: u16) -> u16 {
        (progress_ratio(score) * f64::from(width)).round() as u16
    }
}

impl Widget for ScoreBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let filled = Self::filled_cells(self.score, area.width);
        let fill = colors().score_color(self.score);
        for i in 0..area.width {
            let (ch, color) = if i < filled {
                ('█', fill)
            } else {
                ('░', colors().muted)
            };
            if let Some(cell) = buf.cell_mut((area.x + i, area.y)) {
                cell.set_char(ch).set_style(Style::default().fg(color));
            }
        }
    }
}

fn centered_x(area: Rect, width: usize) -> u16 {
    let width = u16::try_from(width).unwrap_or(area.width);
    area.x + area.width.saturating_sub(width) / 2
}

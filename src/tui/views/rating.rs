//! Rating tab: most harmful and most healthy ingredients side by side.

use crate::model::Ingredient;
use crate::tui::app::App;
use crate::tui::theme::{colors, Styles};
use crate::tui::widgets::{self, truncate_str};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

pub fn render_rating(frame: &mut Frame, area: Rect, app: &App) {
    let ratings = app.session().ratings();
    if app.ratings_loading && ratings.top_harmful().is_empty() && ratings.top_healthy().is_empty()
    {
        widgets::render_loading_state(frame, area, "Загрузка рейтинга...", "", app.tick);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_board(
        frame,
        cols[0],
        " ❌ Самые вредные ",
        colors().harmful,
        ratings.top_harmful(),
    );
    render_board(
        frame,
        cols[1],
        " ✅ Самые полезные ",
        colors().healthy,
        ratings.top_healthy(),
    );
}

fn render_board(frame: &mut Frame, area: Rect, title: &str, accent: Color, entries: &[Ingredient]) {
    let block = Block::default()
        .title(title.to_string())
        .title_style(Style::default().fg(accent).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    if entries.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::styled("Нет данных", Styles::text_muted()),
            Line::styled("[r] обновить", Styles::shortcut_desc()),
        ])
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    // rank + score columns take 10 cells, borders 2
    let name_width = usize::from(area.width.saturating_sub(12));
    let mut lines = Vec::with_capacity(entries.len() * 2);
    for (rank, ingredient) in entries.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", rank + 1), Styles::text_muted()),
            Span::styled(
                format!("{:<name_width$}", truncate_str(&ingredient.display_name(), name_width)),
                Styles::text(),
            ),
            Span::styled(format!("{:>4}", ingredient.score), Styles::score(ingredient.score)),
        ]));
        if !ingredient.description.is_empty() {
            lines.push(Line::styled(
                format!("    {}", truncate_str(&ingredient.description, name_width)),
                Styles::text_muted(),
            ));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

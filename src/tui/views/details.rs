//! Details tab: score ring and the per-ingredient breakdown of the selected product.

use crate::model::Product;
use crate::score::HealthTier;
use crate::tui::app::App;
use crate::tui::theme::{colors, Styles};
use crate::tui::widgets::{self, CategoryBadge, ScoreRing};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render_details(frame: &mut Frame, area: Rect, app: &App) {
    let Some(product) = app.session().selected() else {
        widgets::render_empty_state(
            frame,
            area,
            "Сначала отсканируйте продукт для просмотра деталей",
            Some("[1] сканер · [4] история"),
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(area);

    render_summary(frame, chunks[0], product);
    render_ingredients(frame, chunks[1], product, app.details_scroll);
}

fn render_summary(frame: &mut Frame, area: Rect, product: &Product) {
    let tier = HealthTier::from_score(product.score);
    let block = Block::default()
        .title(format!(" {} ", product.name))
        .title_style(Styles::section_title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors().tier_color(tier)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(inner);
    frame.render_widget(ScoreRing::new(product.score), cols[0]);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Дата сканирования: ", Styles::text_muted()),
            Span::styled(product.scan_date_label(), Styles::text()),
        ]),
        Line::from(vec![
            Span::styled("Ингредиентов проанализировано: ", Styles::text_muted()),
            Span::styled(product.ingredients.len().to_string(), Styles::text()),
        ]),
        Line::from(vec![
            Span::styled("ID: ", Styles::text_muted()),
            Span::styled(product.id.to_string(), Styles::text_muted()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), cols[1]);
}

fn render_ingredients(frame: &mut Frame, area: Rect, product: &Product, scroll: u16) {
    let block = Block::default()
        .title(format!(" Состав продукта ({}) ", product.ingredients.len()))
        .title_style(Styles::section_title())
        .borders(Borders::ALL)
        .border_style(Styles::border());

    if product.ingredients.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "Ингредиенты не распознаны",
            Styles::text_muted(),
        ))
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let mut lines = Vec::with_capacity(product.ingredients.len() * 2);
    for ingredient in &product.ingredients {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>3} ", ingredient.score), Styles::score(ingredient.score)),
            CategoryBadge::new(ingredient.category).to_span(),
            Span::raw(" "),
            Span::styled(ingredient.display_name(), Styles::text().bold()),
        ]));
        if !ingredient.description.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(ingredient.description.clone(), Styles::text_muted()),
            ]));
        }
    }

    let max_scroll = u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(max_scroll), 0));
    frame.render_widget(paragraph, area);
}

//! Scanner tab: image path input, scan progress and the latest result.

use crate::tui::app::App;
use crate::tui::theme::{colors, Styles};
use crate::tui::widgets::{self, ScoreRing};
use crate::workflow::ScanState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

pub fn render_scanner(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    render_path_input(frame, chunks[0], app);

    let session = app.session();
    if session.is_scanning() {
        widgets::render_loading_state(
            frame,
            chunks[1],
            "Сканирование...",
            session.scan_state().label(),
            app.tick,
        );
        return;
    }

    match session.selected() {
        Some(product) if session.scan_state() == ScanState::Completed => {
            let block = Block::default()
                .title(" Результат ")
                .title_style(Styles::section_title())
                .borders(Borders::ALL)
                .border_style(Styles::border());
            let inner = block.inner(chunks[1]);
            frame.render_widget(block, chunks[1]);

            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(5), Constraint::Min(2)])
                .split(inner);
            frame.render_widget(ScoreRing::new(product.score), parts[0]);

            let lines = vec![
                Line::styled(product.name.clone(), Styles::text().bold()),
                Line::from(vec![
                    Span::styled("Ингредиентов проанализировано: ", Styles::text_muted()),
                    Span::styled(product.ingredients.len().to_string(), Styles::text()),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("[2]", Styles::shortcut_key()),
                    Span::styled(" подробнее  ", Styles::shortcut_desc()),
                    Span::styled("[Enter]", Styles::shortcut_key()),
                    Span::styled(" сканировать снова", Styles::shortcut_desc()),
                ]),
            ];
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                parts[1],
            );
        }
        _ => widgets::render_empty_state(
            frame,
            chunks[1],
            "Наведите камеру на состав продукта",
            Some("[e] путь к фото · [Enter] сканировать продукт"),
        ),
    }
}

fn render_path_input(frame: &mut Frame, area: Rect, app: &App) {
    let input = &app.image_input;
    let border = if input.active {
        Styles::border_focused()
    } else {
        Styles::border()
    };

    let line = if input.value.is_empty() && !input.active {
        Line::styled(
            "нажмите [e], чтобы указать путь к изображению",
            Style::default().fg(colors().text_muted).italic(),
        )
    } else {
        let mut spans = vec![Span::styled(input.value.clone(), Styles::text())];
        if input.active {
            spans.push(Span::styled("▏", Style::default().fg(colors().accent)));
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title(" Фото состава ")
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(paragraph, area);
}

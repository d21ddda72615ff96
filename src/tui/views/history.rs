//! History tab: searchable list of scanned products.

use crate::tui::app::App;
use crate::tui::state::ListNavigation;
use crate::tui::theme::{colors, Styles};
use crate::tui::widgets::{self, truncate_str};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

pub fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_search_bar(frame, chunks[0], app);

    let session = app.session();
    if !session.history().is_loaded() {
        if app.history_loading {
            widgets::render_loading_state(frame, chunks[1], "Загрузка истории...", "", app.tick);
        } else {
            widgets::render_empty_state(
                frame,
                chunks[1],
                "История недоступна",
                Some("[r] повторить загрузку"),
            );
        }
        return;
    }

    let products = session.filtered_history();
    if products.is_empty() {
        let (message, hint) = if session.search().is_empty() {
            ("Вы ещё ничего не сканировали", Some("[1] перейти к сканеру"))
        } else {
            ("Ничего не найдено", Some("[Esc] в поиске сбрасывает запрос"))
        };
        widgets::render_empty_state(frame, chunks[1], message, hint);
        return;
    }

    let name_width = usize::from(chunks[1].width.saturating_sub(24));
    let rows: Vec<Row> = products
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(truncate_str(&p.name, name_width)),
                Cell::from(Span::styled(format!("{:>3}", p.score), Styles::score(p.score))),
                Cell::from(Span::styled(p.scan_date_label(), Styles::text_muted())),
            ])
        })
        .collect();

    let header = Row::new(vec!["Продукт", "Оценка", "Дата"])
        .style(Style::default().fg(colors().accent).bold())
        .bottom_margin(1);

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(7),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(format!(" История сканирований ({}) ", products.len()))
            .title_style(Styles::section_title())
            .borders(Borders::ALL)
            .border_style(Styles::border()),
    )
    .row_highlight_style(Styles::selected())
    .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(app.history_list.selected()));
    frame.render_stateful_widget(table, chunks[1], &mut state);
}

fn render_search_bar(frame: &mut Frame, area: Rect, app: &App) {
    let input = &app.search_input;
    let border = if input.active {
        Styles::border_focused()
    } else {
        Styles::border()
    };

    let mut spans = vec![Span::styled("🔍 ", Styles::text_muted())];
    if input.value.is_empty() && !input.active {
        spans.push(Span::styled(
            "[/] поиск по названию",
            Style::default().fg(colors().text_muted).italic(),
        ));
    } else {
        spans.push(Span::styled(input.value.clone(), Styles::text()));
        if input.active {
            spans.push(Span::styled("▏", Style::default().fg(colors().accent)));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border),
        ),
        area,
    );
}

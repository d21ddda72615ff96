//! Terminal setup, main loop and top-level layout.

use super::app::{App, TuiOptions};
use super::events::{handle_key_event, Event, EventHandler};
use super::theme::{colors, render_footer_hints, set_theme, FooterHints, Styles, Theme};
use super::viewmodel::StatusLevel;
use super::views;
use super::widgets::{check_terminal_size, render_popup, render_size_warning};
use crate::api::FoodBackend;
use crate::session::TabKind;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs},
};
use std::io::{self, stdout};
use std::sync::Arc;

/// Run the TUI application
pub fn run_tui(backend: Arc<dyn FoodBackend>, options: &TuiOptions) -> io::Result<()> {
    set_theme(Theme::from_name(&options.theme));

    let events = EventHandler::new(options.tick_rate);
    let mut app = App::new(backend, options, events.sender());
    app.load_initial();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &events);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &EventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Resize(_, _) => {}
            Event::Tick => app.on_tick(),
            Event::App(event) => app.handle_app_event(event),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Main render function
pub(crate) fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if let Err(required) = check_terminal_size(area.width, area.height) {
        render_size_warning(frame, area, required);
        return;
    }

    // Main layout: header, tabs, content, status bar, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_tabs(frame, chunks[1], app);

    match app.session().active_tab() {
        TabKind::Scanner => views::render_scanner(frame, chunks[2], app),
        TabKind::Details => views::render_details(frame, chunks[2], app),
        TabKind::Rating => views::render_rating(frame, chunks[2], app),
        TabKind::History => views::render_history(frame, chunks[2], app),
    }

    render_status_bar(frame, chunks[3], app);
    render_footer(frame, chunks[4], app);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header_line = Line::from(vec![
        Span::styled("🍏 FoodCheck", Style::default().fg(colors().primary).bold()),
        Span::styled(" │ ", Style::default().fg(colors().muted)),
        Span::styled("Узнай правду о продуктах", Style::default().fg(colors().text_muted)),
    ]);
    frame.render_widget(Paragraph::new(header_line), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let active = app.session().active_tab();
    let titles: Vec<Line> = TabKind::ALL
        .iter()
        .map(|tab| {
            let style = if *tab == active {
                Style::default().fg(colors().accent).bold()
            } else {
                Style::default().fg(colors().text_muted)
            };
            Line::from(vec![
                Span::styled(format!("[{}]", tab.index() + 1), style),
                Span::styled(format!(" {} ", tab.title()), style),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors().border)),
        )
        .highlight_style(Style::default().fg(colors().accent))
        .select(active.index())
        .divider(Span::styled(" │ ", Style::default().fg(colors().muted)));

    frame.render_widget(tabs, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let state = session.scan_state();
    let state_style = if session.is_scanning() {
        Style::default().fg(colors().warning).bold()
    } else {
        Style::default().fg(colors().success)
    };

    let mut spans = vec![
        Span::styled(" Сканер: ", Styles::text_muted()),
        Span::styled(state.label(), state_style),
        Span::styled(" │ ", Style::default().fg(colors().muted)),
        Span::styled("История: ", Styles::text_muted()),
        Span::styled(
            session.history().len().to_string(),
            Style::default().fg(colors().primary).bold(),
        ),
    ];

    if let Some(product) = session.selected() {
        spans.push(Span::styled(" │ ", Style::default().fg(colors().muted)));
        spans.push(Span::styled(product.name.clone(), Styles::text()));
        spans.push(Span::styled(
            format!(" {}/100", product.score),
            Styles::score(product.score),
        ));
    }

    let status =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(colors().background_alt));
    frame.render_widget(status, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(msg) = app.status.peek() {
        let (icon, color) = match app.status.level() {
            StatusLevel::Info => ("ℹ ", colors().accent),
            StatusLevel::Success => ("✓ ", colors().success),
            StatusLevel::Error => ("✗ ", colors().error),
        };
        let line = Line::from(vec![
            Span::styled(icon, Style::default().fg(color)),
            Span::styled(msg.to_string(), Style::default().fg(color).bold()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hints = FooterHints::for_tab(app.session().active_tab());
    frame.render_widget(Paragraph::new(Line::from(render_footer_hints(&hints))), area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let entry = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("{key:>10}  "), Styles::shortcut_key()),
            Span::styled(desc, Styles::text()),
        ])
    };

    let content = vec![
        Line::styled("Навигация", Styles::section_title()),
        entry("1-4", "перейти на вкладку"),
        entry("Tab", "следующая вкладка"),
        entry("Shift+Tab", "предыдущая вкладка"),
        entry("t", "сменить тему"),
        entry("q", "выход"),
        Line::from(""),
        Line::styled("Сканер", Styles::section_title()),
        entry("e", "ввести путь к фото"),
        entry("Enter", "сканировать продукт"),
        Line::from(""),
        Line::styled("История", Styles::section_title()),
        entry("/", "поиск по названию"),
        entry("↑↓ j k", "выбор"),
        entry("Enter", "открыть детали"),
        entry("r", "обновить"),
        Line::from(""),
        Line::styled("Рейтинг", Styles::section_title()),
        entry("r", "обновить"),
    ];

    render_popup(frame, area, "Справка", content, (60, 80));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{HistoryQuery, RatingKind, ScoredIngredients};
    use crate::config::AppConfig;
    use crate::error::{FoodCheckError, Result};
    use crate::model::{CapturedImage, Category, Identifier, Ingredient, NewProduct, Product};
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;

    struct OfflineBackend;

    impl FoodBackend for OfflineBackend {
        fn recognize(&self, _image: &CapturedImage) -> Result<Vec<String>> {
            Err(FoodCheckError::status("ocr", 503, "offline"))
        }

        fn score(&self, _names: &[String]) -> Result<ScoredIngredients> {
            Err(FoodCheckError::status("score", 503, "offline"))
        }

        fn save_product(&self, _product: &NewProduct) -> Result<Identifier> {
            Err(FoodCheckError::status("save", 503, "offline"))
        }

        fn list_products(&self, _query: &HistoryQuery) -> Result<Vec<Product>> {
            Ok(Vec::new())
        }

        fn ingredient_rating(&self, _kind: RatingKind, _limit: u32) -> Result<Vec<Ingredient>> {
            Ok(Vec::new())
        }

        fn name(&self) -> &'static str {
            "offline"
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app() -> App {
        let (tx, _rx) = mpsc::channel();
        let options = TuiOptions::from_config(&AppConfig::default());
        App::new(Arc::new(OfflineBackend), &options, tx)
    }

    #[test]
    fn test_render_every_tab() {
        let mut app = app();
        app.session.replace_history(vec![Product::local(
            "Йогурт натуральный",
            87,
            vec![Ingredient::new("Витамин B12", 95, Category::Healthy)],
            chrono::Utc::now(),
        )]);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("FoodCheck"));
        assert!(text.contains("Сканер"));
        assert!(text.contains("Наведите камеру"));

        app.set_tab(TabKind::Details);
        terminal.draw(|frame| render(frame, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Сначала отсканируйте"));

        app.set_tab(TabKind::History);
        terminal.draw(|frame| render(frame, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Йогурт натуральный"));

        app.session.select_history(0);
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("87/100"));
        assert!(text.contains("Витамин B12"));

        app.set_tab(TabKind::Rating);
        terminal.draw(|frame| render(frame, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Нет данных"));
    }

    #[test]
    fn test_small_terminal_shows_warning() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Terminal too small"));
    }
}

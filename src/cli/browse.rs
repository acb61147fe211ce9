use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table, TableState, Wrap,
    },
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use softstore::catalog::{AppRecord, Catalog};
use softstore::config::Config;
use softstore::download::{DownloadRun, DownloadTiming, Phase, artifact};
use softstore::review::{ReviewClient, ReviewRecord};
use softstore::view::{ReviewState, ReviewTicket, Screen, ViewController};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// ── Messages ────────────────────────────────────────────────────────────

enum AsyncMsg {
    ReviewLoaded(ReviewTicket, ReviewRecord),
}

/// Side effects requested by a key press, run by `handle_action`.
#[derive(Debug)]
enum AppCommand {
    None,
    FetchReview {
        ticket: ReviewTicket,
        name: String,
        platform: &'static str,
    },
    StartDownload(AppRecord),
}

#[derive(PartialEq, Clone, Copy, Debug)]
enum Mode {
    Normal,
    Search,
}

// ── Download overlay ────────────────────────────────────────────────────

struct DownloadOverlay {
    run: DownloadRun,
    saved: Option<PathBuf>,
    error: Option<String>,
}

impl DownloadOverlay {
    fn new(run: DownloadRun) -> Self {
        Self {
            run,
            saved: None,
            error: None,
        }
    }

    fn save(&mut self, dir: &Path) {
        match artifact::save(dir, self.run.simulation().app()) {
            Ok(path) => {
                self.saved = Some(path);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Saving download failed: {e:#}");
                self.error = Some(format!("{e:#}"));
            }
        }
    }
}

// ── App ─────────────────────────────────────────────────────────────────

struct App {
    catalog: Arc<Catalog>,
    vc: ViewController,
    reviews: ReviewClient,
    table_state: TableState,
    mode: Mode,
    detail_scroll: u16,
    download: Option<DownloadOverlay>,
    download_dir: PathBuf,
    timing: DownloadTiming,
    status_msg: Option<String>,
    tick: usize,
    should_quit: bool,

    async_tx: mpsc::UnboundedSender<AsyncMsg>,
    async_rx: mpsc::UnboundedReceiver<AsyncMsg>,
}

impl App {
    fn new(catalog: Arc<Catalog>, reviews: ReviewClient, download_dir: PathBuf) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = Self {
            catalog,
            vc: ViewController::new(),
            reviews,
            table_state: TableState::default(),
            mode: Mode::Normal,
            detail_scroll: 0,
            download: None,
            download_dir,
            timing: DownloadTiming::default(),
            status_msg: None,
            tick: 0,
            should_quit: false,
            async_tx: tx,
            async_rx: rx,
        };
        app.reset_selection();
        app
    }

    fn visible(&self) -> Vec<&AppRecord> {
        self.vc.visible(&self.catalog)
    }

    fn reset_selection(&mut self) {
        let any = !self.visible().is_empty();
        self.table_state.select(any.then_some(0));
    }

    fn selected_row(&self) -> Option<&AppRecord> {
        let i = self.table_state.selected()?;
        self.visible().get(i).copied()
    }

    fn move_up(&mut self) {
        if let Some(sel) = self.table_state.selected() {
            if sel > 0 {
                self.table_state.select(Some(sel - 1));
            }
        }
    }

    fn move_down(&mut self) {
        if let Some(sel) = self.table_state.selected() {
            if sel + 1 < self.visible().len() {
                self.table_state.select(Some(sel + 1));
            }
        }
    }

    fn select(&mut self, app: &AppRecord) -> AppCommand {
        let ticket = self.vc.select_app(app);
        self.detail_scroll = 0;
        self.status_msg = None;
        AppCommand::FetchReview {
            ticket,
            name: app.name.clone(),
            platform: app.os.label(),
        }
    }

    // ── Key handling ────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> AppCommand {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return AppCommand::None;
        }

        if self.download.is_some() {
            self.handle_download_key(key);
            return AppCommand::None;
        }

        match (self.mode, self.vc.screen()) {
            (Mode::Search, _) => {
                self.handle_search_key(key);
                AppCommand::None
            }
            (Mode::Normal, Screen::Home) => self.handle_home_key(key),
            (Mode::Normal, Screen::Details) => self.handle_details_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.vc.criteria.search.is_empty() {
                    self.should_quit = true;
                } else {
                    self.vc.criteria.search.clear();
                    self.reset_selection();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Home | KeyCode::Char('g') => self.reset_selection(),
            KeyCode::End | KeyCode::Char('G') => {
                let n = self.visible().len();
                if n > 0 {
                    self.table_state.select(Some(n - 1));
                }
            }
            KeyCode::Enter => {
                if let Some(app) = self.selected_row().cloned() {
                    return self.select(&app);
                }
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                self.status_msg = Some("Type to search, Enter to confirm, Esc to clear".into());
            }
            KeyCode::Char('c') => {
                self.vc.criteria.cycle_category();
                self.reset_selection();
            }
            KeyCode::Char('o') => {
                self.vc.criteria.cycle_os();
                self.reset_selection();
            }
            KeyCode::Char('h') => {
                self.vc.go_home();
                self.reset_selection();
            }
            _ => {}
        }
        AppCommand::None
    }

    fn handle_details_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.vc.back(),
            KeyCode::Char('h') => {
                self.vc.go_home();
                self.reset_selection();
            }
            KeyCode::Char('/') => {
                self.vc.back();
                self.mode = Mode::Search;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            KeyCode::Enter | KeyCode::Char('d') => {
                if let Some(app) = self.vc.selected(&self.catalog) {
                    return AppCommand::StartDownload(app.clone());
                }
            }
            _ => {}
        }
        AppCommand::None
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.vc.criteria.search.clear();
                self.reset_selection();
                self.mode = Mode::Normal;
                self.status_msg = None;
            }
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                self.status_msg = None;
            }
            KeyCode::Backspace => {
                self.vc.criteria.search.pop();
                self.reset_selection();
            }
            KeyCode::Char(c) => {
                self.vc.criteria.search.push(c);
                self.reset_selection();
            }
            _ => {}
        }
    }

    fn handle_download_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                if let Some(overlay) = self.download.take() {
                    overlay.run.dismiss();
                }
            }
            KeyCode::Char('r') => {
                if let Some(overlay) = self.download.as_mut() {
                    if overlay.run.simulation().is_ready() {
                        overlay.save(&self.download_dir);
                    }
                }
            }
            _ => {}
        }
    }

    // ── Effects ─────────────────────────────────────────────────────────

    fn handle_action(&mut self, cmd: AppCommand) {
        match cmd {
            AppCommand::None => {}
            AppCommand::FetchReview {
                ticket,
                name,
                platform,
            } => {
                let client = self.reviews.clone();
                let tx = self.async_tx.clone();
                tokio::spawn(async move {
                    let review = client.fetch(&name, platform).await;
                    let _ = tx.send(AsyncMsg::ReviewLoaded(ticket, review));
                });
            }
            AppCommand::StartDownload(app) => {
                // Replacing an overlay drops its timer.
                self.download = Some(DownloadOverlay::new(DownloadRun::start(app, self.timing)));
            }
        }
    }

    fn poll_async(&mut self) {
        while let Ok(msg) = self.async_rx.try_recv() {
            match msg {
                AsyncMsg::ReviewLoaded(ticket, review) => {
                    self.vc.apply_review(&ticket, review);
                }
            }
        }
    }

    fn pump_download(&mut self) {
        if let Some(overlay) = self.download.as_mut() {
            if overlay.run.pump() {
                overlay.save(&self.download_dir);
            }
        }
    }
}

// ── Entry point ─────────────────────────────────────────────────────────

pub async fn run(cfg: &Config, catalog: Arc<Catalog>) -> Result<()> {
    let reviews = ReviewClient::from_config(cfg)?;
    let configured = reviews.is_configured();
    let mut app = App::new(catalog, reviews, cfg.download_dir());
    if !configured {
        app.status_msg = Some("No API key: reviews are local summaries. Run `softstore login` to enable AI reviews.".into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        app.poll_async();
        app.pump_download();

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let cmd = app.handle_key(key);
                    app.handle_action(cmd);
                }
            }
        }

        app.tick += 1;

        if app.should_quit {
            return Ok(());
        }
    }
}

// ── UI ──────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // body
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.vc.screen() {
        Screen::Home => render_home(f, app, chunks[1]),
        Screen::Details => render_details(f, app, chunks[1]),
    }
    render_footer(f, app, chunks[2]);

    if let Some(overlay) = &app.download {
        let area = centered_rect(60, 40, f.area());
        f.render_widget(Clear, area);
        render_download(f, overlay, app.tick, area);
    }
}

fn spinner(tick: usize) -> &'static str {
    SPINNER[tick / 3 % SPINNER.len()]
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let search_style = if app.mode == Mode::Search {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let search = if app.vc.criteria.search.is_empty() && app.mode != Mode::Search {
        Span::styled("Search apps… [/]", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(format!("{}▌", app.vc.criteria.search), search_style)
    };

    let header = Line::from(vec![
        Span::styled(" SoftStore ", Style::default().fg(Color::Cyan).bold()),
        Span::raw("│ 🔍 "),
        search,
        Span::raw(" │ "),
        Span::styled(
            format!("{} apps", app.catalog.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(header).block(block), area);
}

fn filter_line<'a>(label: &'a str, options: Vec<&'a str>, current: &str, key: &'a str) -> Line<'a> {
    let mut spans = vec![Span::styled(
        format!(" {label:<9}"),
        Style::default().fg(Color::Cyan).bold(),
    )];
    for opt in options {
        let style = if opt == current {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {opt} "), style));
    }
    spans.push(Span::styled(format!(" [{key}]"), Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

fn render_home(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let title = if app.vc.criteria.search.is_empty() {
        "Discover the best apps".to_string()
    } else {
        format!("Search results for \"{}\"", app.vc.criteria.search)
    };
    let os_options: Vec<&str> = std::iter::once("All")
        .chain(softstore::catalog::Os::ALL.iter().map(|o| o.label()))
        .collect();
    let filters = Text::from(vec![
        Line::from(Span::styled(format!(" {title}"), Style::default().bold())),
        filter_line("Category", app.catalog.category_labels(), app.vc.criteria.category_label(), "c"),
        filter_line("Platform", os_options, app.vc.criteria.os_label(), "o"),
    ]);
    f.render_widget(Paragraph::new(filters), chunks[0]);

    let visible = app.vc.visible(&app.catalog);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if visible.is_empty() {
        let empty = Text::from(vec![
            Line::from(""),
            Line::from(Span::styled("No apps found", Style::default().bold())),
            Line::from(Span::styled(
                "Try adjusting your search or filters.",
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        f.render_widget(
            Paragraph::new(empty).alignment(Alignment::Center).block(block),
            chunks[1],
        );
        return;
    }

    let header = Row::new(
        ["Name", "Developer", "Category", "Platform", "License", "Rating"]
            .map(|h| Cell::from(h).style(Style::default().fg(Color::Cyan).bold())),
    )
    .height(1);

    let rows: Vec<Row> = visible
        .iter()
        .map(|a| {
            Row::new(vec![
                Cell::from(a.name.as_str()).style(Style::default().bold()),
                Cell::from(a.developer.as_str()).style(Style::default().fg(Color::DarkGray)),
                Cell::from(a.category.label()).style(Style::default().fg(Color::Magenta)),
                Cell::from(a.os.label()),
                Cell::from(a.license.label()).style(Style::default().fg(Color::Green)),
                Cell::from(format!("{} {}", super::stars(a), a.rating))
                    .style(Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();
    let total = rows.len();

    let widths = [
        Constraint::Fill(1),
        Constraint::Length(22),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▸ ");

    f.render_stateful_widget(table, chunks[1], &mut app.table_state);

    let mut scrollbar_state =
        ScrollbarState::new(total).position(app.table_state.selected().unwrap_or(0));
    f.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        chunks[1].inner(Margin { vertical: 1, horizontal: 0 }),
        &mut scrollbar_state,
    );
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("── {title} ──"),
        Style::default().fg(Color::Cyan).bold(),
    ))
}

fn review_lines(review: &ReviewState, app: &AppRecord, tick: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "✦ AI Review",
        Style::default().fg(Color::Magenta).bold(),
    ))];

    let r = match review {
        ReviewState::Ready(r) => r,
        ReviewState::Idle | ReviewState::Loading => {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", spinner(tick)), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("Analyzing {}…", app.name),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            return lines;
        }
    };

    lines.push(Line::from(r.summary.clone()));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Pros", Style::default().fg(Color::Green).bold())));
    for pro in r.pros.iter().take(4) {
        lines.push(Line::from(vec![
            Span::styled("  + ", Style::default().fg(Color::Green)),
            Span::raw(pro.clone()),
        ]));
    }
    lines.push(Line::from(Span::styled("Cons", Style::default().fg(Color::Red).bold())));
    for con in r.cons.iter().take(4) {
        lines.push(Line::from(vec![
            Span::styled("  - ", Style::default().fg(Color::Red)),
            Span::raw(con.clone()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("\"{}\"", r.technical_opinion),
        Style::default().italic(),
    )));

    let score_color = match r.safety_score {
        80..=100 => Color::Green,
        50..=79 => Color::Yellow,
        _ => Color::Red,
    };
    lines.push(Line::from(vec![
        Span::raw("Safety score: "),
        Span::styled(
            format!("{}/100", r.safety_score),
            Style::default().fg(score_color).bold(),
        ),
    ]));
    lines
}

fn render_details(f: &mut Frame, app: &App, area: Rect) {
    let Some(selected) = app.vc.selected(&app.catalog) else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(area);

    let crumb = Line::from(vec![
        Span::styled(" Home", Style::default().fg(Color::DarkGray)),
        Span::raw(" / "),
        Span::styled(selected.category.label(), Style::default().fg(Color::DarkGray)),
        Span::raw(" / "),
        Span::styled(selected.name.as_str(), Style::default().bold()),
    ]);
    f.render_widget(Paragraph::new(crumb), rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(rows[1]);

    // Main column
    let mut lines = vec![
        Line::from(Span::styled(selected.name.clone(), Style::default().fg(Color::White).bold())),
        Line::from(Span::styled(
            format!("by {}", selected.developer),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled(super::stars(selected), Style::default().fg(Color::Yellow)),
            Span::raw(format!("  {}/10  ·  {} downloads", selected.rating, selected.downloads)),
        ]),
        Line::from(""),
    ];
    lines.extend(review_lines(app.vc.review(), selected, app.tick));
    lines.push(Line::from(""));
    lines.push(section("About"));
    lines.push(Line::from(selected.description.clone()));
    lines.push(Line::from(""));
    lines.push(Line::from(super::about_text(selected)));

    let block = Block::default()
        .title(format!(" {} ", selected.name))
        .title_style(Style::default().fg(Color::Cyan).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let main = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    f.render_widget(main, cols[0]);

    // Sidebar
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(4)])
        .split(cols[1]);

    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ])
    };
    let specs = vec![
        row("Version", selected.version.clone()),
        row("License", selected.license.label().to_string()),
        row("Platform", selected.os.label().to_string()),
        row("Developer", selected.developer.clone()),
        row("Category", selected.category.label().to_string()),
        row("Language", "English".to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled(" d ", Style::default().fg(Color::Black).bg(Color::Green).bold()),
            Span::raw(" Download now"),
        ]),
    ];
    f.render_widget(
        Paragraph::new(Text::from(specs)).block(
            Block::default()
                .title(" Specifications ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        side[0],
    );

    let alternatives: Vec<Line> = match app.vc.review() {
        ReviewState::Ready(r) if r.alternative_apps.is_empty() => vec![Line::from(Span::styled(
            "None suggested",
            Style::default().fg(Color::DarkGray),
        ))],
        ReviewState::Ready(r) => r
            .alternative_apps
            .iter()
            .take(5)
            .map(|a| Line::from(format!("• {a}")))
            .collect(),
        _ => vec![Line::from(Span::styled(
            spinner(app.tick),
            Style::default().fg(Color::Cyan),
        ))],
    };
    f.render_widget(
        Paragraph::new(Text::from(alternatives))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Alternatives ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        side[1],
    );
}

fn render_download(f: &mut Frame, overlay: &DownloadOverlay, tick: usize, area: Rect) {
    let app = overlay.run.simulation().app();
    let block = Block::default()
        .title(format!(" Download {} ", app.name))
        .title_style(Style::default().fg(Color::Green).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match overlay.run.phase() {
        Phase::Scanning { progress } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Length(1), Constraint::Min(0)])
                .split(inner.inner(Margin { vertical: 1, horizontal: 2 }));
            f.render_widget(
                Paragraph::new(format!("{} Scanning for viruses…", spinner(tick))),
                chunks[0],
            );
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
                .percent(u16::from(progress))
                .label(format!("{progress}%"));
            f.render_widget(gauge, chunks[1]);
        }
        Phase::Preparing => {
            let text = Text::from(vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled(format!("{} ", spinner(tick)), Style::default().fg(Color::Cyan)),
                    Span::raw("Preparing download…"),
                ]),
            ]);
            f.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
        }
        Phase::Ready => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "✓ Download ready",
                    Style::default().fg(Color::Green).bold(),
                )),
                Line::from(Span::styled(
                    format!("Verified safe · {} · v{}", app.license, app.version),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ];
            if let Some(path) = &overlay.saved {
                lines.push(Line::from(format!("Saved to {}", path.display())));
            }
            if let Some(err) = &overlay.error {
                lines.push(Line::from(Span::styled(
                    err.clone(),
                    Style::default().fg(Color::Red),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("r", Style::default().fg(Color::DarkGray)),
                Span::raw(" save again  "),
                Span::styled("Enter", Style::default().fg(Color::DarkGray)),
                Span::raw(" close"),
            ]));
            f.render_widget(
                Paragraph::new(Text::from(lines))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }
    }
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hint = |k: &'static str, label: &'static str| {
        [
            Span::styled(format!(" {k}"), Style::default().fg(Color::DarkGray)),
            Span::raw(format!(" {label} ")),
        ]
    };

    let content = if app.mode == Mode::Search {
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(Color::Cyan).bold()),
            Span::raw(app.vc.criteria.search.as_str()),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ])
    } else if let Some(msg) = &app.status_msg {
        Line::from(Span::styled(format!(" {msg}"), Style::default().fg(Color::Yellow)))
    } else {
        let keys: &[(&'static str, &'static str)] = match (app.download.is_some(), app.vc.screen()) {
            (true, _) => &[("Esc", "close"), ("r", "save again")],
            (false, Screen::Home) => &[
                ("↑↓", "navigate"),
                ("Enter", "details"),
                ("/", "search"),
                ("c", "category"),
                ("o", "platform"),
                ("q", "quit"),
            ],
            (false, Screen::Details) => &[
                ("d", "download"),
                ("↑↓", "scroll"),
                ("b", "back"),
                ("h", "home"),
                ("q", "quit"),
            ],
        };
        Line::from(keys.iter().flat_map(|&(k, l)| hint(k, l)).collect::<Vec<_>>())
    };

    f.render_widget(Paragraph::new(content), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use softstore::review::{ReviewSettings, fallback};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_in(dir: &Path) -> App {
        let reviews = ReviewClient::new(ReviewSettings {
            api_key: None,
            model: "test-model".into(),
            api_url: "http://127.0.0.1:9".into(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        App::new(Arc::new(Catalog::builtin()), reviews, dir.to_path_buf())
    }

    fn app() -> App {
        app_in(Path::new("."))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_starts_on_home_with_first_row_selected() {
        let app = app();
        assert_eq!(app.vc.screen(), Screen::Home);
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_enter_opens_details_and_requests_review() {
        let mut app = app();
        let first = app.visible()[0].clone();
        let cmd = app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.vc.screen(), Screen::Details);
        assert_eq!(app.vc.review(), &ReviewState::Loading);
        match cmd {
            AppCommand::FetchReview { ticket, name, platform } => {
                assert_eq!(ticket.app_id, first.id);
                assert_eq!(name, first.name);
                assert_eq!(platform, first.os.label());
            }
            other => panic!("expected FetchReview, got {other:?}"),
        }
    }

    #[test]
    fn test_search_mode_filters_listing() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.mode, Mode::Search);
        type_text(&mut app, "VLC");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Normal);
        let names: Vec<&str> = app.visible().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["VLC Media Player"]);

        // q is a search character while typing, not quit
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        app.handle_key(key(KeyCode::Esc));
        assert!(app.vc.criteria.search.is_empty());
        assert_eq!(app.visible().len(), app.catalog.len());
    }

    #[test]
    fn test_no_results_clears_selection() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "no-such-app-anywhere");
        assert_eq!(app.table_state.selected(), None);
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.handle_key(key(KeyCode::Enter)), AppCommand::None));
        assert_eq!(app.vc.screen(), Screen::Home);
    }

    #[test]
    fn test_category_and_platform_cycle() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(app.vc.criteria.category_label(), "Browsers");
        assert!(app.visible().iter().all(|a| a.category.label() == "Browsers"));

        app.handle_key(key(KeyCode::Char('o')));
        assert_eq!(app.vc.criteria.os_label(), "Windows");
    }

    #[test]
    fn test_back_keeps_search_home_clears_it() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "code");
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.vc.screen(), Screen::Details);
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.vc.screen(), Screen::Home);
        assert_eq!(app.vc.criteria.search, "code");

        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(app.vc.screen(), Screen::Home);
        assert!(app.vc.criteria.search.is_empty());
    }

    #[test]
    fn test_stale_review_is_dropped() {
        let mut app = app();
        let AppCommand::FetchReview { ticket: stale, .. } = app.handle_key(key(KeyCode::Enter)) else {
            panic!("expected FetchReview");
        };
        app.handle_key(key(KeyCode::Esc));

        app.handle_key(key(KeyCode::Down));
        let AppCommand::FetchReview { ticket: fresh, .. } = app.handle_key(key(KeyCode::Enter)) else {
            panic!("expected FetchReview");
        };
        assert_ne!(stale.app_id, fresh.app_id);

        // The first app's review resolves after the second was opened.
        let old = fallback::unavailable("first");
        app.async_tx.send(AsyncMsg::ReviewLoaded(stale, old)).unwrap();
        app.poll_async();
        assert_eq!(app.vc.review(), &ReviewState::Loading);

        let current = fallback::unavailable("second");
        app.async_tx
            .send(AsyncMsg::ReviewLoaded(fresh, current.clone()))
            .unwrap();
        app.poll_async();
        assert_eq!(app.vc.review(), &ReviewState::Ready(current));
    }

    #[tokio::test]
    async fn test_review_fetch_lands_in_details() {
        let mut app = app();
        let first = app.visible()[0].clone();
        let cmd = app.handle_key(key(KeyCode::Enter));
        app.handle_action(cmd);

        for _ in 0..100 {
            tokio::task::yield_now().await;
            app.poll_async();
            if matches!(app.vc.review(), ReviewState::Ready(_)) {
                break;
            }
        }
        assert_eq!(
            app.vc.review(),
            &ReviewState::Ready(fallback::unconfigured(&first.name, first.os.label()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_download_overlay_saves_artifact() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(tmp.path());
        app.handle_key(key(KeyCode::Enter));
        let cmd = app.handle_key(key(KeyCode::Char('d')));
        assert!(matches!(cmd, AppCommand::StartDownload(_)));
        app.handle_action(cmd);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        app.pump_download();
        let overlay = app.download.as_ref().unwrap();
        assert!(matches!(overlay.run.phase(), Phase::Scanning { .. }));
        assert!(overlay.saved.is_none());

        // Keys other than close/save are swallowed while the overlay is up
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(app.vc.screen(), Screen::Details);

        tokio::time::sleep(Duration::from_millis(3000)).await;
        app.pump_download();
        let overlay = app.download.as_ref().unwrap();
        assert_eq!(overlay.run.phase(), Phase::Ready);
        let saved = overlay.saved.clone().unwrap();
        assert_eq!(saved, tmp.path().join("Google_Chrome_Setup.txt"));
        assert!(saved.exists());

        std::fs::remove_file(&saved).unwrap();
        app.handle_key(key(KeyCode::Char('r')));
        assert!(saved.exists());

        app.handle_key(key(KeyCode::Esc));
        assert!(app.download.is_none());
        assert_eq!(app.vc.screen(), Screen::Details);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismissed_download_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(tmp.path());
        app.handle_key(key(KeyCode::Enter));
        let cmd = app.handle_key(key(KeyCode::Char('d')));
        app.handle_action(cmd);

        tokio::time::sleep(Duration::from_millis(500)).await;
        app.handle_key(key(KeyCode::Esc));
        assert!(app.download.is_none());

        tokio::time::sleep(Duration::from_secs(5)).await;
        app.pump_download();
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_mode() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('/')));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal, widgets::{Block, Borders, List, ListItem, Paragraph, ListState}, layout::{Layout, Constraint, Direction}, style::{Style, Modifier, Color}};

use todolists::{
    application::{
        status::{AppStatusNotifier, StatusNotifier},
        store::TodolistsStore,
        todolists_service::{TodolistsService, TodolistsServiceImpl},
    },
    config::ApiConfig,
    domain::todolist::{DomainTodolist, RequestStatus},
    infrastructure::http_api::HttpTodolistsApi,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ApiConfig::from_env()?;
    let api = HttpTodolistsApi::new(&config)?;
    let notifier = Arc::new(AppStatusNotifier::default());
    let store = Arc::new(TodolistsStore::default());
    let service = TodolistsServiceImpl::new(api, store, notifier.clone());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, service, notifier, &config.base_url).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode { View, Create, Rename }

struct App<S: TodolistsService> {
    service: S,
    notifier: Arc<AppStatusNotifier>,
    items: Vec<DomainTodolist>,
    selected: usize,
    last_tick: Instant,
    mode: Mode,
    list_state: ListState,
    draft_title: String,
}

impl<S: TodolistsService> App<S> {
    fn refresh_view(&mut self) {
        self.items = self.service.select_all();
        let len = self.items.len();
        if len == 0 { self.selected = 0; self.list_state.select(None); }
        else { if self.selected >= len { self.selected = len - 1; } self.list_state.select(Some(self.selected)); }
    }

    fn current(&self) -> Option<&DomainTodolist> { self.items.get(self.selected) }
}

async fn run_app<S: TodolistsService>(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, service: S, notifier: Arc<AppStatusNotifier>, base_url: &str) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut app = App { service, notifier, items: vec![], selected: 0, last_tick: Instant::now(), mode: Mode::View, list_state: ListState::default(), draft_title: String::new() };
    // Failures land in the status line.
    let _ = app.service.fetch_all().await;
    app.refresh_view();

    loop {
        let status = app.notifier.current();
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let header = Paragraph::new("Todolists (n: new, e: rename, d: delete, f: cycle filter, r: reload, q: quit)  |  New/Rename: type title, Enter to save, Esc to cancel")
                .block(Block::default().borders(Borders::ALL).title("todolists-tui"));
            f.render_widget(header, chunks[0]);

            let middle = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[1]);

            let list_items: Vec<ListItem> = app.items.iter().map(|tl| {
                let style = match tl.entity_status {
                    RequestStatus::Loading => Style::default().fg(Color::DarkGray),
                    RequestStatus::Failed => Style::default().fg(Color::Red),
                    _ => Style::default(),
                };
                ListItem::new(format!("[{}] {}", tl.filter.as_str(), tl.title)).style(style)
            }).collect();
            let list = List::new(list_items)
                .block(Block::default().borders(Borders::ALL).title(format!("todolists [{}]", app.items.len())))
                .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
                .highlight_symbol(">> ");
            f.render_stateful_widget(list, middle[0], &mut app.list_state);

            let detail = match app.current() {
                Some(tl) => format!(
                    "Title:\n{}\n\nFilter: {}\nStatus: {}\nOrder: {}\nAdded: {}\n\nId: {}",
                    tl.title, tl.filter.as_str(), tl.entity_status.as_str(), tl.order, tl.added_date, tl.id
                ),
                None => String::new(),
            };
            let details = Paragraph::new(detail)
                .block(Block::default().borders(Borders::ALL).title("details"));
            f.render_widget(details, middle[1]);

            let footer_text = match app.mode {
                Mode::View => match &status.error {
                    Some(err) => format!("{}  |  error: {}", base_url, err),
                    None => format!("{}  |  status: {}", base_url, status.status.as_str()),
                },
                Mode::Create => format!("New todolist: {}_  |  (Enter to save, Esc to cancel)", app.draft_title),
                Mode::Rename => format!("Rename: {}_  |  (Enter to save, Esc to cancel)", app.draft_title),
            };
            let footer_style = if status.error.is_some() && app.mode == Mode::View { Style::default().fg(Color::Red) } else { Style::default() };
            let footer = Paragraph::new(footer_text).style(footer_style)
                .block(Block::default().borders(Borders::ALL).title(match app.mode { Mode::View => "info", Mode::Create => "create", Mode::Rename => "rename" }));
            f.render_widget(footer, chunks[2]);
        })?;

        let timeout = tick_rate.saturating_sub(app.last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only act on key presses; ignore repeats and releases to prevent duplicate input
                if key.kind != KeyEventKind::Press { continue; }
                match app.mode {
                    Mode::View => match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Up => { if app.selected > 0 { app.selected -= 1; } }
                        KeyCode::Down => { if app.selected + 1 < app.items.len() { app.selected += 1; } }
                        KeyCode::Char('n') => {
                            app.mode = Mode::Create;
                            app.draft_title.clear();
                        }
                        KeyCode::Char('e') => {
                            if let Some(title) = app.current().map(|tl| tl.title.clone()) {
                                app.mode = Mode::Rename;
                                app.draft_title = title;
                            }
                        }
                        KeyCode::Char('d') => {
                            if let Some(id) = app.current().map(|tl| tl.id.clone()) {
                                let _ = app.service.delete(&id).await;
                            }
                        }
                        KeyCode::Char('f') => {
                            if let Some((id, filter)) = app.current().map(|tl| (tl.id.clone(), tl.filter)) {
                                app.service.set_filter(&id, filter.next());
                            }
                        }
                        KeyCode::Char('r') => { let _ = app.service.fetch_all().await; }
                        KeyCode::Esc => { app.notifier.set_error(None); }
                        _ => {}
                    },
                    Mode::Create => match key.code {
                        KeyCode::Esc => { app.mode = Mode::View; app.draft_title.clear(); }
                        KeyCode::Enter => {
                            if app.service.create(&app.draft_title).await.is_ok() { app.selected = 0; }
                            app.mode = Mode::View;
                            app.draft_title.clear();
                        }
                        KeyCode::Backspace => { app.draft_title.pop(); }
                        KeyCode::Char(c) => app.draft_title.push(c),
                        _ => {}
                    },
                    Mode::Rename => match key.code {
                        KeyCode::Esc => { app.mode = Mode::View; app.draft_title.clear(); }
                        KeyCode::Enter => {
                            if let Some(id) = app.current().map(|tl| tl.id.clone()) {
                                let _ = app.service.rename(&id, &app.draft_title).await;
                            }
                            app.mode = Mode::View;
                            app.draft_title.clear();
                        }
                        KeyCode::Backspace => { app.draft_title.pop(); }
                        KeyCode::Char(c) => app.draft_title.push(c),
                        _ => {}
                    },
                }
                app.refresh_view();
            }
        }
        if app.last_tick.elapsed() >= tick_rate {
            app.last_tick = Instant::now();
        }
    }
    Ok(())
}

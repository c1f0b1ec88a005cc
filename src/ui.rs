use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use roster_admin::entities::{
    Agent, AgentId, CompensationUpdate, NewAgent, MAX_CATEGORY_LEN, MAX_NAME_LEN,
};
use roster_admin::forms::{CreateForm, EditForm};
use roster_admin::remote::RemoteCollection;
use roster_admin::roster::{
    MutationOutcome, Roster, RosterSnapshot, RowAction, RowState, RowTransitionError,
};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::warn;

const TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Roster,
    NewAgent,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Roster => Page::NewAgent,
            Page::NewAgent => Page::Roster,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Roster => "Roster",
            Page::NewAgent => "New Agent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    Name,
    Category,
    Tenure,
    Compensation,
}

impl CreateField {
    pub fn next(&self) -> Self {
        match self {
            CreateField::Name => CreateField::Category,
            CreateField::Category => CreateField::Tenure,
            CreateField::Tenure => CreateField::Compensation,
            CreateField::Compensation => CreateField::Name,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            CreateField::Name => CreateField::Compensation,
            CreateField::Category => CreateField::Name,
            CreateField::Tenure => CreateField::Category,
            CreateField::Compensation => CreateField::Tenure,
        }
    }
}

/// Modal layer drawn over the current page
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    Edit { id: AgentId, form: EditForm },
    ConfirmDelete { id: AgentId, name: String },
}

/// Results sent back by spawned mutation tasks
#[derive(Debug)]
pub enum TaskEvent {
    Created(MutationOutcome),
    Updated {
        id: AgentId,
        outcome: Result<MutationOutcome, RowTransitionError>,
    },
}

pub struct App<C> {
    roster: Roster<C>,
    pub snapshot: RosterSnapshot,
    pub state: TableState,
    pub current_page: Page,
    pub create_form: CreateForm,
    pub create_focus: CreateField,
    pub overlay: Overlay,
    /// One-line message for refused key actions
    pub notice: Option<String>,
    pub should_quit: bool,
    events_tx: UnboundedSender<TaskEvent>,
    events_rx: UnboundedReceiver<TaskEvent>,
}

impl<C: RemoteCollection + 'static> App<C> {
    pub fn new(roster: Roster<C>) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        let snapshot = roster.snapshot();

        Self {
            roster,
            snapshot,
            state: TableState::default(),
            current_page: Page::Roster,
            create_form: CreateForm::new(),
            create_focus: CreateField::Name,
            overlay: Overlay::None,
            notice: None,
            should_quit: false,
            events_tx,
            events_rx,
        }
    }

    /// Pull finished task results and the latest roster snapshot.
    pub fn sync(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_task_event(event);
        }

        self.snapshot = self.roster.snapshot();

        let len = self.snapshot.agents.len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            _ => {}
        }
    }

    fn apply_task_event(&mut self, event: TaskEvent) {
        match event {
            TaskEvent::Created(outcome) => {
                let succeeded = outcome.is_completed();
                self.create_form.finish(succeeded);
                if succeeded {
                    self.current_page = Page::Roster;
                }
            }
            TaskEvent::Updated { id, outcome } => {
                let Overlay::Edit { id: editing, form } = &mut self.overlay else {
                    return;
                };
                if *editing != id {
                    return;
                }
                form.finish();
                match outcome {
                    Ok(MutationOutcome::Completed) => self.overlay = Overlay::None,
                    Ok(MutationOutcome::Failed(_)) => {}
                    Err(e) => {
                        self.notice = Some(e.to_string());
                        self.overlay = Overlay::None;
                    }
                }
            }
        }
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        self.state.selected().and_then(|i| self.snapshot.agents.get(i))
    }

    // ------------------------------------------------------------------------
    // Spawned work
    // ------------------------------------------------------------------------

    pub fn spawn_refresh(&self) {
        let roster = self.roster.clone();
        tokio::spawn(async move {
            roster.refresh().await;
        });
    }

    fn spawn_create(&self, agent: NewAgent) {
        let roster = self.roster.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = roster.create(agent).await;
            // The screen may be gone by now
            let _ = tx.send(TaskEvent::Created(outcome));
        });
    }

    fn spawn_update(&self, id: AgentId, change: CompensationUpdate) {
        let roster = self.roster.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = roster.update(id, change).await;
            let _ = tx.send(TaskEvent::Updated { id, outcome });
        });
    }

    fn spawn_delete(&self, id: AgentId) {
        let roster = self.roster.clone();
        tokio::spawn(async move {
            if let Err(e) = roster.delete(id).await {
                warn!(error = %e, "Delete refused");
            }
        });
    }

    // ------------------------------------------------------------------------
    // Keys
    // ------------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.notice = None;

        match self.overlay {
            Overlay::Edit { .. } => self.handle_edit_key(key),
            Overlay::ConfirmDelete { .. } => self.handle_confirm_key(key),
            Overlay::None => match self.current_page {
                Page::Roster => self.handle_roster_key(key),
                Page::NewAgent => self.handle_create_key(key),
            },
        }
    }

    fn handle_roster_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('n') => self.current_page = self.current_page.next(),
            KeyCode::Char('r') => self.spawn_refresh(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Home => {
                if !self.snapshot.agents.is_empty() {
                    self.state.select(Some(0));
                }
            }
            KeyCode::End => {
                if !self.snapshot.agents.is_empty() {
                    self.state.select(Some(self.snapshot.agents.len() - 1));
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => self.open_edit(),
            KeyCode::Char('d') => self.open_confirm_delete(),
            _ => {}
        }
    }

    fn open_edit(&mut self) {
        let Some(agent) = self.selected_agent().cloned() else {
            return;
        };
        match self.roster.begin_edit(agent.id) {
            Ok(()) => {
                self.overlay = Overlay::Edit {
                    id: agent.id,
                    form: EditForm::new(&agent.compensation),
                };
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
        self.snapshot = self.roster.snapshot();
    }

    fn open_confirm_delete(&mut self) {
        let Some(agent) = self.selected_agent().cloned() else {
            return;
        };
        let state = self.snapshot.row_state(agent.id);
        if state != RowState::Viewing {
            let refused = RowTransitionError::NotAllowed {
                id: agent.id,
                state,
                action: RowAction::Delete,
            };
            self.notice = Some(refused.to_string());
            return;
        }
        self.overlay = Overlay::ConfirmDelete {
            id: agent.id,
            name: agent.name,
        };
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let Overlay::ConfirmDelete { id, .. } = self.overlay else {
            return;
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.overlay = Overlay::None;
                self.spawn_delete(id);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.overlay = Overlay::None;
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Overlay::Edit { id, form } = &mut self.overlay else {
            return;
        };
        let id = *id;

        match key.code {
            KeyCode::Esc => {
                if form.loading {
                    return;
                }
                if let Err(e) = self.roster.cancel_edit(id) {
                    self.notice = Some(e.to_string());
                }
                self.overlay = Overlay::None;
                self.snapshot = self.roster.snapshot();
            }
            KeyCode::Enter => {
                if let Some(change) = form.submit() {
                    self.spawn_update(id, change);
                }
            }
            code => {
                if let Some(raw) = edited(&form.compensation, code, key.modifiers) {
                    form.input_compensation(&raw);
                }
            }
        }
    }

    fn handle_create_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Tab => self.current_page = Page::Roster,
            KeyCode::Down => self.create_focus = self.create_focus.next(),
            KeyCode::Up | KeyCode::BackTab => self.create_focus = self.create_focus.previous(),
            KeyCode::Enter => {
                if let Some(agent) = self.create_form.submit() {
                    self.spawn_create(agent);
                }
            }
            code => {
                let form = &mut self.create_form;
                match self.create_focus {
                    CreateField::Name => {
                        if let Some(raw) = edited(&form.name, code, key.modifiers) {
                            form.input_name(&raw);
                        }
                    }
                    CreateField::Category => {
                        if let Some(raw) = edited(&form.category, code, key.modifiers) {
                            form.input_category(&raw);
                        }
                    }
                    CreateField::Tenure => {
                        let current = if form.tenure == 0 {
                            String::new()
                        } else {
                            form.tenure.to_string()
                        };
                        if let Some(raw) = edited(&current, code, key.modifiers) {
                            form.input_tenure(&raw);
                        }
                    }
                    CreateField::Compensation => {
                        if let Some(raw) = edited(&form.compensation, code, key.modifiers) {
                            form.input_compensation(&raw);
                        }
                    }
                }
            }
        }
    }

    pub fn next(&mut self) {
        let len = self.snapshot.agents.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.snapshot.agents.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }
}

/// The raw text an input field would hold after `code`, before sanitizing.
/// Typing appends; Backspace removes the last character.
fn edited(current: &str, code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match code {
        KeyCode::Char(c) => Some(format!("{}{}", current, c)),
        KeyCode::Backspace => {
            let mut raw = current.to_string();
            raw.pop();
            Some(raw)
        }
        _ => None,
    }
}

// ============================================================================
// Terminal loop
// ============================================================================

pub fn run_ui<C: RemoteCollection + 'static>(app: &mut App<C>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend, C: RemoteCollection + 'static>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
) -> io::Result<()> {
    app.spawn_refresh();

    loop {
        app.sync();
        terminal.draw(|f| ui(f, app))?;

        // Poll so finished tasks show up without a keypress
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn ui<C: RemoteCollection + 'static>(f: &mut Frame, app: &mut App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    // Error banner sits on top of the content
    let content = if let Some(error) = app.snapshot.error.clone() {
        let content_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(chunks[1]);
        render_error_banner(f, content_chunks[0], &error);
        content_chunks[1]
    } else {
        chunks[1]
    };

    match app.current_page {
        Page::Roster => render_table(f, content, app),
        Page::NewAgent => render_create_form(f, content, app),
    }

    render_status_bar(f, chunks[2], app);

    match &app.overlay {
        Overlay::None => {}
        Overlay::Edit { id, form } => render_edit_popup(f, *id, form, app),
        Overlay::ConfirmDelete { name, .. } => render_confirm_popup(f, name),
    }
}

fn render_header<C: RemoteCollection + 'static>(f: &mut Frame, area: Rect, app: &App<C>) {
    let mut tab_spans = vec![];
    for (i, page) in [Page::Roster, Page::NewAgent].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Agents: {}", app.snapshot.agents.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));

    let refreshed = if app.snapshot.loading {
        Span::styled("Loading...", Style::default().fg(Color::Yellow))
    } else {
        match app.snapshot.last_refreshed {
            Some(at) => Span::styled(
                format!("Refreshed {}", at.format("%H:%M:%S")),
                Style::default().fg(Color::Green),
            ),
            None => Span::styled("Not loaded", Style::default().fg(Color::Red)),
        }
    };
    tab_spans.push(refreshed);

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Agent Roster "),
    );

    f.render_widget(header, area);
}

fn render_error_banner(f: &mut Frame, area: Rect, error: &str) {
    let banner = Paragraph::new(error.to_string())
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(banner, area);
}

fn render_table<C: RemoteCollection + 'static>(f: &mut Frame, area: Rect, app: &mut App<C>) {
    let header_cells = ["Name", "Category", "Tenure", "Compensation", "Status"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let snapshot = &app.snapshot;
    let rows = snapshot.agents.iter().map(|agent| {
        let row_state = snapshot.row_state(agent.id);
        let status = match row_state {
            RowState::Viewing => Cell::from(""),
            RowState::Editing { submitting: false } => {
                Cell::from("editing").style(Style::default().fg(Color::Yellow))
            }
            RowState::Editing { submitting: true } => {
                Cell::from("Saving...").style(Style::default().fg(Color::Cyan))
            }
            RowState::Deleting => Cell::from("Deleting...").style(Style::default().fg(Color::Red)),
        };

        let cells = vec![
            Cell::from(truncate(&agent.name, 30)),
            Cell::from(truncate(&agent.category, 20)),
            Cell::from(format!("{} years", agent.tenure)),
            Cell::from(agent.compensation_label()).style(Style::default().fg(Color::Green)),
            status,
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(32),
            Constraint::Length(22),
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" Agents ({}) ", snapshot.agents.len())),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_create_form<C: RemoteCollection + 'static>(f: &mut Frame, area: Rect, app: &App<C>) {
    let form = &app.create_form;
    let label_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let hint_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let marker = |field: CreateField| {
        if app.create_focus == field {
            Span::styled("→ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::raw("  ")
        }
    };

    let mut content = vec![Line::from("")];

    if let Some(error) = &form.error {
        content.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        )));
        content.push(Line::from(""));
    }

    content.extend([
        Line::from(vec![
            marker(CreateField::Name),
            Span::styled("Name: ", label_style),
            Span::raw(form.name.clone()),
        ]),
        Line::from(Span::styled(
            format!("    {}/{} characters", form.name.chars().count(), MAX_NAME_LEN),
            hint_style,
        )),
        Line::from(""),
        Line::from(vec![
            marker(CreateField::Category),
            Span::styled("Category: ", label_style),
            Span::raw(form.category.clone()),
        ]),
        Line::from(Span::styled(
            format!("    {}/{} characters", form.category.chars().count(), MAX_CATEGORY_LEN),
            hint_style,
        )),
        Line::from(""),
        Line::from(vec![
            marker(CreateField::Tenure),
            Span::styled("Tenure (years): ", label_style),
            Span::raw(form.tenure.to_string()),
        ]),
        Line::from(""),
        Line::from(vec![
            marker(CreateField::Compensation),
            Span::styled("Compensation ($): ", label_style),
            Span::raw(form.compensation.clone()),
        ]),
        Line::from(Span::styled(
            "    Max 8 digits before decimal, 2 after (e.g., 12345678.99)",
            hint_style,
        )),
        Line::from(""),
    ]);

    let action = if form.loading { "  Saving..." } else { "  Enter: Add Agent" };
    content.push(Line::from(Span::styled(
        action,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Add New Agent "),
    );

    f.render_widget(paragraph, area);
}

fn render_status_bar<C: RemoteCollection + 'static>(f: &mut Frame, area: Rect, app: &App<C>) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.snapshot.agents.len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(notice) = &app.notice {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(notice.clone(), Style::default().fg(Color::Red)));
    }

    let keys: &[(&str, &str)] = match app.current_page {
        Page::Roster => &[
            ("e", " Edit"),
            ("d", " Delete"),
            ("n", " New"),
            ("r", " Refresh"),
            ("↑/↓", " Nav"),
        ],
        Page::NewAgent => &[("↑/↓", " Field"), ("Enter", " Save"), ("Esc", " Back")],
    };
    for (key, label) in keys {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(*label));
    }
    if app.current_page == Page::Roster {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_edit_popup<C: RemoteCollection + 'static>(
    f: &mut Frame,
    id: AgentId,
    form: &EditForm,
    app: &App<C>,
) {
    let area = centered_rect(50, 11, f.size());
    let name = app
        .snapshot
        .agent(id)
        .map(|a| a.name.clone())
        .unwrap_or_default();

    let mut content = vec![Line::from("")];
    if let Some(error) = &form.error {
        content.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        )));
    }
    content.extend([
        Line::from(vec![
            Span::styled(
                "  Compensation ($): ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(form.compensation.clone()),
        ]),
        Line::from(Span::styled(
            "  Max 8 digits before decimal, 2 after",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            if form.loading { "  Saving..." } else { "  Enter: Update  Esc: Cancel" },
            Style::default().fg(Color::Yellow),
        )),
    ]);

    let popup = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" Edit Compensation - {} ", truncate(&name, 24))),
    );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn render_confirm_popup(f: &mut Frame, name: &str) {
    let area = centered_rect(50, 5, f.size());
    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Are you sure you want to delete "),
            Span::styled(truncate(name, 20), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("? "),
            Span::styled("y", Style::default().fg(Color::Red)),
            Span::raw("/"),
            Span::styled("n", Style::default().fg(Color::Green)),
        ]),
    ];

    let popup = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Delete Agent "),
    );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

/// Rect of `percent_x`% width and `height` rows, centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height: height.min(area.height),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

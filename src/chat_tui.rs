//! The chat screen: one composer, one body that follows the session state,
//! one status bar. Submissions run on a worker thread; the event loop polls
//! the outcome channel once per tick.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::api_client::{ChatClient, ChatRequest, ChatResponse, Priority, Ticket, TransportError};
use crate::config::config::SessionConfig;
use crate::session::{NoticeLevel, RequestToken, SessionController, ViewState};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Display hint only; long messages are still submitted.
const INPUT_SOFT_CAP: usize = 500;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const EMPTY_PLACEHOLDER: &str =
    "Tell TelecomMaster to process customer complaints and create tickets...";
const RESULTS_PLACEHOLDER: &str = "Process more complaints or refine your request...";

type Outcome = (RequestToken, Result<ChatResponse, TransportError>);

pub struct ChatTui {
    client: ChatClient,
    session: SessionController,
    input: Input,
    session_config: SessionConfig,
    outcome_tx: Sender<Outcome>,
    outcome_rx: Receiver<Outcome>,
    spinner_frame: usize,
}

impl ChatTui {
    pub fn new(client: ChatClient, session_config: SessionConfig) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel();
        Self {
            client,
            session: SessionController::new(),
            input: Input::default(),
            session_config,
            outcome_tx,
            outcome_rx,
            spinner_frame: 0,
        }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionController {
        &mut self.session
    }

    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    /// Take over the terminal and run until the user quits.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.drain_outcomes();
            terminal.draw(|f| self.draw(f))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        return Ok(());
                    }
                }
            } else {
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
            }
        }
    }

    /// Feed finished worker outcomes into the controller. Stale tokens are
    /// rejected there, so an abandoned request resolving late is a no-op.
    pub fn drain_outcomes(&mut self) {
        while let Ok((token, outcome)) = self.outcome_rx.try_recv() {
            match outcome {
                Ok(response) => {
                    self.session.on_success(token, response);
                }
                Err(error) => {
                    self.session.on_failure(token, &error);
                }
            }
        }
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return true,
                KeyCode::Char('r') => {
                    self.session.reset();
                    self.input.reset();
                    return false;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => {
                if self.session.state() == ViewState::Processing {
                    self.session.cancel();
                    false
                } else {
                    true
                }
            }
            KeyCode::Enter => {
                self.submit();
                false
            }
            _ => {
                // The composer is frozen while a request is outstanding.
                if self.session.state() != ViewState::Processing {
                    self.input.handle_event(&Event::Key(key));
                }
                false
            }
        }
    }

    fn submit(&mut self) {
        let message = self.input.value().trim().to_string();
        let Some(token) = self.session.submit(&message) else {
            debug!("submission rejected");
            return;
        };
        self.input.reset();

        let request = ChatRequest {
            message,
            user_role: self.session_config.user_role,
            user_id: self.session_config.user_id.clone(),
        };
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        thread::spawn(move || {
            let outcome = client.send_message(&request);
            let _ = tx.send((token, outcome));
        });
    }

    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Composer
                Constraint::Min(5),    // Body
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_composer(f, chunks[0]);

        match self.session.state() {
            ViewState::Empty => self.render_empty(f, chunks[1]),
            ViewState::Processing => self.render_processing(f, chunks[1]),
            ViewState::Results => {
                if let Some(response) = self.session.response() {
                    self.render_results(f, chunks[1], response);
                }
            }
        }

        self.render_status_bar(f, chunks[2]);
    }

    fn render_composer(&self, f: &mut Frame, area: Rect) {
        let processing = self.session.state() == ViewState::Processing;
        let len = self.input.value().chars().count();

        let counter_style = if len > INPUT_SOFT_CAP {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Message")
            .title_bottom(
                Line::from(Span::styled(format!("{len}/{INPUT_SOFT_CAP}"), counter_style))
                    .right_aligned(),
            );

        let (text, style) = if self.input.value().is_empty() {
            let placeholder = if self.session.state() == ViewState::Results {
                RESULTS_PLACEHOLDER
            } else {
                EMPTY_PLACEHOLDER
            };
            (placeholder, Style::default().fg(Color::DarkGray))
        } else if processing {
            (self.input.value(), Style::default().fg(Color::Gray))
        } else {
            (self.input.value(), Style::default().fg(Color::Yellow))
        };

        let paragraph = Paragraph::new(text).block(block).style(style);
        f.render_widget(paragraph, area);

        if !processing {
            f.set_cursor_position((
                area.x + self.input.visual_cursor() as u16 + 1,
                area.y + 1,
            ));
        }
    }

    fn render_empty(&self, f: &mut Frame, area: Rect) {
        let hero = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Ready to Process Complaints",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "TelecomMaster will analyze SharePoint complaints and create organized Jira tickets",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(hero)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, centered_band(area));
    }

    fn render_processing(&self, f: &mut Frame, area: Rect) {
        let spinner = SPINNER_FRAMES[self.spinner_frame];
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{spinner} TelecomMaster is Processing Complaints..."),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Analyzing SharePoint data, categorizing issues, and preparing Jira \
                 tickets with proper prioritization",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Esc to cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, centered_band(area));
    }

    fn render_results(&self, f: &mut Frame, area: Rect, response: &ChatResponse) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Agent panel
                Constraint::Min(3),    // Tickets
            ])
            .split(area);

        self.render_agent_panel(f, chunks[0], response);

        if response.tickets_created.is_empty() {
            self.render_no_tickets(f, chunks[1]);
        } else {
            self.render_tickets(f, chunks[1], &response.tickets_created);
        }
    }

    fn render_agent_panel(&self, f: &mut Frame, area: Rect, response: &ChatResponse) {
        let mut title_spans = vec![Span::styled(
            response.agent_name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if response.processing_complete {
            title_spans.push(Span::raw(" "));
            title_spans.push(Span::styled(
                "[Complete]",
                Style::default().fg(Color::Green),
            ));
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Line::from(title_spans));
        let paragraph = Paragraph::new(response.response.as_str())
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_no_tickets(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No Tickets Created",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "No actionable complaints were found in the current SharePoint data.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_tickets(&self, f: &mut Frame, area: Rect, tickets: &[Ticket]) {
        const CARD_HEIGHT: u16 = 6;
        const CARDS_PER_ROW: usize = 2;

        let row_count = tickets.len().div_ceil(CARDS_PER_ROW);
        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(std::iter::repeat(Constraint::Length(CARD_HEIGHT)).take(row_count));
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let header = Line::from(vec![
            Span::styled(
                format!("Created Tickets ({})", tickets.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  Ctrl+R starts a new session",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(Paragraph::new(header), rows[0]);

        for (row_index, row_tickets) in tickets.chunks(CARDS_PER_ROW).enumerate() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[row_index + 1]);
            for (col_index, ticket) in row_tickets.iter().enumerate() {
                render_ticket_card(f, columns[col_index], ticket);
            }
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let line = match self.session.notice() {
            Some(notice) => {
                let (marker, color) = match notice.level {
                    NoticeLevel::Info => ("✔", Color::Green),
                    NoticeLevel::Error => ("✖", Color::Red),
                };
                Line::from(vec![
                    Span::styled(
                        format!("{marker} {}: ", notice.title),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(notice.body.as_str(), Style::default().fg(color)),
                ])
            }
            None => Line::from(Span::styled(
                "Enter=Send | Esc=Cancel/Quit | Ctrl+R=New Session",
                Style::default().fg(Color::White),
            )),
        };
        let status = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
        f.render_widget(status, area);
    }
}

fn render_ticket_card(f: &mut Frame, area: Rect, ticket: &Ticket) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                ticket.id.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                ticket.priority.label(),
                Style::default()
                    .fg(priority_color(ticket.priority))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            ticket.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("Status: "),
            Span::styled(
                ticket.status.as_str(),
                Style::default().fg(status_color(&ticket.status)),
            ),
            Span::raw("  Team: "),
            Span::raw(ticket.team.as_str()),
        ]),
        Line::from(vec![
            Span::raw("Category: "),
            Span::raw(ticket.category.as_str()),
            Span::raw("  Complaint: "),
            Span::raw(ticket.complaint_id.as_str()),
        ]),
    ];
    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(card, area);
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::P1 => Color::Red,
        Priority::P2 => Color::LightRed,
        Priority::P3 => Color::Yellow,
        Priority::P4 => Color::DarkGray,
    }
}

fn status_color(status: &str) -> Color {
    match status {
        "Open" => Color::Red,
        "In Progress" => Color::Cyan,
        "Resolved" => Color::Green,
        _ => Color::Reset,
    }
}

/// Narrow the body to a vertical band around the middle so hero and spinner
/// text sit roughly centered.
fn centered_band(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Min(8),
            Constraint::Percentage(30),
        ])
        .split(area);
    chunks[1]
}

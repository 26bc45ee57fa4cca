use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::ApiBox;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::Flow;
use crate::domain::services::SessionStore;

fn author_style(author: Author) -> Style {
    match author {
        Author::User => return Style::default().add_modifier(Modifier::BOLD),
        Author::Assistant => return Style::default(),
        Author::JustAsk => return Style::default().fg(Color::Yellow),
    }
}

fn render_sidebar<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Min(1), Constraint::Length(4)])
        .split(rect);

    let items = app_state
        .session
        .threads()
        .iter()
        .map(|thread| return ListItem::new(thread.title.to_string()))
        .collect::<Vec<ListItem>>();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Chat History"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app_state.session.active_index());
    frame.render_stateful_widget(list, layout[0], &mut state);

    frame.render_widget(
        Paragraph::new(vec![Line::from("^N New Chat"), Line::from("^O Sign Out")])
            .block(Block::default().borders(Borders::ALL)),
        layout[1],
    );
}

fn render_chat<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let title = match app_state.session.active_thread() {
        Some(thread) => thread.title.to_string(),
        None => "Just Ask AI".to_string(),
    };

    let lines = app_state
        .transcript()
        .into_iter()
        .map(|line| return Line::from(Span::styled(line.text, author_style(line.author))))
        .collect::<Vec<Line>>();

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .scroll((app_state.scroll.position, 0)),
        rect,
    );
}

fn render<B: Backend>(
    frame: &mut Frame<B>,
    app_state: &mut AppState,
    textarea: &tui_textarea::TextArea,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(24), Constraint::Min(1)])
        .split(frame.size());

    let mut constraints = vec![Constraint::Min(1)];
    if app_state.in_flight > 0 {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Max(4));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(columns[1]);

    let chat_rect = Block::default().borders(Borders::ALL).inner(rows[0]);
    if chat_rect.width != app_state.last_known_width
        || chat_rect.height != app_state.last_known_height
    {
        app_state.set_rect(chat_rect);
    }

    render_sidebar(frame, columns[0], app_state);
    render_chat(frame, rows[0], app_state);
    if app_state.in_flight > 0 {
        Loading::render(frame, rows[1], app_state.in_flight);
    }
    frame.render_widget(textarea.widget(), rows[rows.len() - 1]);
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    events: &mut EventsService,
    tx: mpsc::UnboundedSender<Action>,
) -> Result<Flow> {
    let mut textarea = TextArea::default();

    loop {
        terminal.draw(|frame| render(frame, app_state, &textarea))?;

        match events.next().await? {
            Event::QueryResponse(pending, payload) => {
                app_state.handle_query_response(pending, &payload)?;
            }
            Event::KeyboardCTRLC() => {
                return Ok(Flow::Quit);
            }
            Event::KeyboardCTRLO() => {
                return Ok(Flow::SignOut);
            }
            Event::KeyboardCTRLN() => {
                app_state.new_chat();
            }
            Event::KeyboardEnter() => {
                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                textarea = TextArea::default();
                let flow = app_state.submit(&input_str, &tx)?;
                if flow != Flow::Continue {
                    return Ok(flow);
                }
            }
            Event::KeyboardCharInput(input) => {
                textarea.input(input);
            }
            Event::UIChatNext() => {
                app_state.select_next();
            }
            Event::UIChatPrevious() => {
                app_state.select_previous();
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => (),
        }
    }
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

/// Runs the chat view until the user quits or signs out.
pub async fn start(
    api: &ApiBox,
    session: SessionStore,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<Flow> {
    let mut app_state = AppState::new(session);
    app_state.check_backend(api).await;
    let mut events = EventsService::new(rx);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let res = start_loop(&mut terminal, &mut app_state, &mut events, tx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return res;
}

mod app;
mod config;
mod event;
mod gateway;
mod session;
mod telemetry;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use gateway::GeminiClient;
use session::controller::SessionPhase;
use session::task::Difficulty;
use ui::components::code_block::CodeBlock;
use ui::components::editor_pane::EditorPane;
use ui::components::feedback_panel::FeedbackPanel;
use ui::components::sidebar::Sidebar;
use ui::layout::{AppLayout, bottom_overlay, centered_rect};

rust_i18n::i18n!("locales", fallback = "en");

const AVAILABLE_LOCALES: [&str; 2] = ["ko", "en"];

#[derive(Parser)]
#[command(
    name = "deepclone",
    version,
    about = "Terminal clone-coding tutor with AI-generated exercises"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Model identifier")]
    model: Option<String>,

    #[arg(
        short,
        long,
        help = "Start practicing at this difficulty (beginner, intermediate, advanced, master)"
    )]
    difficulty: Option<String>,

    #[arg(long, help = "Topic hint for generated tasks")]
    topic: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(topic) = cli.topic {
        config.topic = topic;
    }
    config.normalize_locale(&AVAILABLE_LOCALES);
    rust_i18n::set_locale(&config.locale);

    let start_difficulty = match cli.difficulty {
        Some(name) => match Difficulty::from_name(&name) {
            Some(d) => Some(d),
            None => anyhow::bail!("unknown difficulty: {name}"),
        },
        None => None,
    };

    let gateway = GeminiClient::new(&config.model, &config.api_base)?;

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = App::new(config, gateway, events.sender());

    if let Some(difficulty) = start_difficulty {
        app.start_practice(difficulty);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Paste(text) => app.handle_paste(text),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize(_, _) => {}
            AppEvent::Gateway(event) => app.handle_gateway(event),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Dashboard => handle_dashboard_key(app, key),
        AppScreen::Practice => handle_practice_key(app, key),
        AppScreen::History | AppScreen::Settings => handle_placeholder_key(app, key),
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(ch @ '1'..='4') => {
            let idx = ch as usize - '1' as usize;
            app.start_practice(Difficulty::ALL[idx]);
        }
        KeyCode::Up | KeyCode::Char('k') => app.dashboard.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.dashboard.next(),
        KeyCode::Enter => app.start_practice(app.dashboard.selected_difficulty()),
        KeyCode::Char('p') => {
            // Return to an ongoing session, or start one at the current level.
            if app.session.task.is_some() || app.session.is_loading() {
                app.screen = AppScreen::Practice;
            } else {
                app.start_practice(app.session.difficulty);
            }
        }
        KeyCode::Char('h') => app.go_to_history(),
        KeyCode::Char('s') => app.go_to_settings(),
        _ => {}
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => app.submit(),
            KeyCode::Char('r') => app.request_next_task(),
            KeyCode::Left => app.cycle_difficulty(false),
            KeyCode::Right => app.cycle_difficulty(true),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            if app.session.feedback.is_some() {
                app.session.dismiss_feedback();
            } else {
                app.go_to_dashboard();
            }
        }
        KeyCode::PageUp => app.scroll_reference(-5),
        KeyCode::PageDown => app.scroll_reference(5),
        KeyCode::Backspace => app.session.editor.backspace(),
        KeyCode::Enter => app.session.editor.insert_newline(),
        KeyCode::Tab => app.session.editor.insert_indent(),
        KeyCode::Left => app.session.editor.move_left(),
        KeyCode::Right => app.session.editor.move_right(),
        KeyCode::Up => app.session.editor.move_up(),
        KeyCode::Down => app.session.editor.move_down(),
        KeyCode::Home => app.session.editor.move_home(),
        KeyCode::End => app.session.editor.move_end(),
        KeyCode::Char(ch) => app.session.editor.insert_char(ch),
        _ => {}
    }
}

fn handle_placeholder_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Char('d') => app.go_to_dashboard(),
        KeyCode::Char('p') => {
            if app.session.task.is_some() || app.session.is_loading() {
                app.screen = AppScreen::Practice;
            } else {
                app.start_practice(app.session.difficulty);
            }
        }
        KeyCode::Char('h') => app.go_to_history(),
        KeyCode::Char('s') => app.go_to_settings(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    if let Some(sidebar_area) = layout.sidebar {
        frame.render_widget(Sidebar::new(app.screen, app.theme), sidebar_area);
    }

    match app.screen {
        AppScreen::Dashboard => render_dashboard(frame, app, layout.content),
        AppScreen::Practice => render_practice(frame, app, layout.content),
        AppScreen::History => {
            render_placeholder(frame, app, layout.content, "history.title", "history.body")
        }
        AppScreen::Settings => {
            render_placeholder(frame, app, layout.content, "settings.title", "settings.body")
        }
    }
}

fn render_dashboard(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let cards_area = centered_rect(80, 96, layout[0]);
    frame.render_widget(&app.dashboard, cards_area);

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" {}", t!("footer.dashboard")),
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, layout[1]);
}

fn render_practice(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let session = &app.session;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // Difficulty tabs
    let mut tab_spans: Vec<Span> = vec![Span::raw(" ")];
    for difficulty in Difficulty::ALL {
        let label = t!(&format!("difficulty.{}", difficulty.key())).to_string();
        let style = if difficulty == session.difficulty {
            Style::default()
                .fg(colors.accent())
                .bg(colors.accent_dim())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.text_dim())
        };
        tab_spans.push(Span::styled(format!(" {label} "), style));
        tab_spans.push(Span::raw(" "));
    }
    if let Some(ref task) = session.task {
        tab_spans.push(Span::styled(
            format!(" {}: ", t!("practice.task")),
            Style::default().fg(colors.text_dim()),
        ));
        tab_spans.push(Span::styled(
            task.title.clone(),
            Style::default()
                .fg(colors.header_fg())
                .add_modifier(Modifier::BOLD),
        ));
    }

    let status_line = if app.paste_notice_active() {
        Line::from(Span::styled(
            format!(" {}", t!("practice.paste_blocked")),
            Style::default().fg(colors.warning()).add_modifier(Modifier::BOLD),
        ))
    } else if session.is_loading() {
        Line::from(Span::styled(
            format!(" {}", t!("practice.loading")),
            Style::default().fg(colors.accent()),
        ))
    } else if session.is_evaluating() {
        Line::from(Span::styled(
            format!(" {}", t!("practice.evaluating")),
            Style::default().fg(colors.accent()),
        ))
    } else {
        Line::from("")
    };

    let header = Paragraph::new(vec![Line::from(tab_spans), status_line])
        .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    // Reference | editor panes
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);

    render_reference_pane(frame, app, panes[0]);
    render_editor_pane(frame, app, panes[1]);

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" {}", t!("footer.practice")),
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, layout[2]);

    // Feedback overlay anchored to the bottom of the pane area
    if let Some(ref feedback) = session.feedback {
        let height = FeedbackPanel::desired_height(feedback).min(layout[1].height);
        let overlay = bottom_overlay(height, layout[1]);
        frame.render_widget(FeedbackPanel::new(feedback, app.theme), overlay);
    }
}

fn render_reference_pane(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let session = &app.session;

    let block = Block::bordered()
        .border_style(Style::default().fg(colors.border()))
        .style(Style::default().bg(colors.panel_bg()))
        .title(Span::styled(
            format!(" {} ", t!("practice.reference")),
            Style::default().fg(colors.text_dim()),
        ))
        .title_top(
            Line::from(Span::styled(
                " Python / PyTorch ",
                Style::default().fg(colors.accent()),
            ))
            .right_aligned(),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(ref task) = session.task else {
        if session.is_loading() {
            let loading = Paragraph::new(Line::from(Span::styled(
                t!("practice.loading").to_string(),
                Style::default().fg(colors.accent()),
            )))
            .centered();
            frame.render_widget(loading, centered_rect(80, 20, inner));
        }
        return;
    };

    // Reserve the bottom line for the concept summary when there is one.
    let has_concept = !task.explanation.is_empty();
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if has_concept {
            [Constraint::Min(1), Constraint::Length(1)]
        } else {
            [Constraint::Min(1), Constraint::Length(0)]
        })
        .split(inner);

    let max_scroll = CodeBlock::max_scroll(&task.code, sections[0].height);
    let scroll = app.reference_scroll.min(max_scroll);
    frame.render_widget(CodeBlock::new(&task.code, app.theme).scroll(scroll), sections[0]);

    if has_concept {
        let concept = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {}: ", t!("practice.concept")),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                task.explanation.clone(),
                Style::default().fg(colors.text_dim()),
            ),
        ]));
        frame.render_widget(concept, sections[1]);
    }
}

fn render_editor_pane(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let session = &app.session;

    let border = match session.phase() {
        SessionPhase::LoadingTask => colors.border(),
        _ => colors.border_focused(),
    };

    let block = Block::bordered()
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(colors.panel_bg()))
        .title(Span::styled(
            format!(" {} ", t!("practice.editor")),
            Style::default().fg(colors.text_dim()),
        ))
        .title_bottom(
            Line::from(Span::styled(
                format!(" {} ", t!("practice.chars", count => session.editor.char_count())),
                Style::default().fg(colors.text_dim()),
            ))
            .right_aligned(),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(EditorPane::new(&session.editor, app.theme), inner);
}

fn render_placeholder(
    frame: &mut ratatui::Frame,
    app: &App,
    area: Rect,
    title_key: &str,
    body_key: &str,
) {
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            t!(title_key).to_string(),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            t!(body_key).to_string(),
            Style::default().fg(colors.text_dim()),
        )),
    ];
    let body = Paragraph::new(lines).centered();
    frame.render_widget(body, centered_rect(60, 30, layout[0]));

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" {}", t!("footer.placeholder_screen")),
        Style::default().fg(colors.text_dim()),
    )));
    footer.render(layout[1], frame.buffer_mut());
}

mod advice;
mod api;
mod app;
mod config;
mod engine;
mod event;
mod predict;
mod store;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use api::http::HttpApi;
use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use ui::components::badges::BadgeRow;
use ui::components::chat_panel::ChatPanel;
use ui::components::form::FormView;
use ui::components::gauge::ScoreGauge;
use ui::components::history_table::HistoryTable;
use ui::components::menu::MenuView;
use ui::line_input::InputResult;

#[derive(Parser)]
#[command(
    name = "scorecast",
    version,
    about = "Terminal client for a student performance prediction service"
)]
struct Cli {
    #[arg(short, long, help = "Prediction server base URL")]
    server: Option<String>,

    #[arg(short, long, help = "Theme name (light, dark, or a user theme)")]
    theme: Option<String>,

    #[arg(short, long, help = "Start in dark mode")]
    dark: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    let api = Arc::new(HttpApi::new(&config.server_url, config.request_timeout())?);
    let events = EventHandler::new(Duration::from_millis(50));
    let mut app = App::new(config, api, events.sender());
    if cli.dark {
        app.set_dark_mode(true);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
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
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Net(net) => app.handle_net(net),
            AppEvent::Resize(_, _) => {}
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
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Predict => handle_predict_key(app, key),
        AppScreen::History => handle_history_key(app, key),
        AppScreen::Recommendation => handle_recommendation_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') | KeyCode::Char('p') => app.go_to_predict(),
        KeyCode::Char('2') | KeyCode::Char('h') => app.go_to_history(),
        KeyCode::Char('3') | KeyCode::Char('r') => app.go_to_recommendation(),
        KeyCode::Char('s') => app.go_to_settings(),
        KeyCode::Char('d') => app.toggle_dark_mode(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected {
            0 => app.go_to_predict(),
            1 => app.go_to_history(),
            2 => app.go_to_recommendation(),
            3 => app.go_to_settings(),
            _ => {}
        },
        _ => {}
    }
}

fn handle_predict_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Up => app.form.select_prev(),
        KeyCode::Down | KeyCode::Tab => app.form.select_next(),
        KeyCode::Left => app.form.cycle_backward(),
        KeyCode::Right => app.form.cycle_forward(),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char('r') if !app.form.selected_field().is_score() => app.form.reset(),
        KeyCode::Char(ch) => app.form.type_char(ch),
        _ => {}
    }
}

fn handle_history_key(app: &mut App, key: KeyEvent) {
    // Confirmation dialog takes priority
    if app.history_confirm_clear {
        match key.code {
            KeyCode::Char('y') => {
                app.clear_history();
                app.history_confirm_clear = false;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                app.history_confirm_clear = false;
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Char('j') | KeyCode::Down => {
            if !app.history.is_empty() {
                let max_visible = app.history.len().min(20) - 1;
                app.history_selected = (app.history_selected + 1).min(max_visible);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.history_selected = app.history_selected.saturating_sub(1);
        }
        KeyCode::Char('c') | KeyCode::Delete => {
            if !app.history.is_empty() {
                app.history_confirm_clear = true;
            }
        }
        KeyCode::Char('r') => app.go_to_recommendation(),
        _ => {}
    }
}

fn handle_recommendation_key(app: &mut App, key: KeyEvent) {
    if app.chat_focused {
        match app.chat_input.handle(key) {
            InputResult::Submit => app.send_chat(),
            InputResult::Cancel => app.chat_focused = false,
            InputResult::Continue => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Char('i') | KeyCode::Tab => app.chat_focused = true,
        KeyCode::Char('h') => app.go_to_history(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            let _ = app.config.save();
            app.go_to_menu();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.settings_selected = (app.settings_selected + 1).min(1);
        }
        KeyCode::Enter | KeyCode::Left | KeyCode::Right | KeyCode::Char('h')
        | KeyCode::Char('l') => match app.settings_selected {
            0 => app.toggle_dark_mode(),
            1 => {
                let step: i64 = if key.code == KeyCode::Left || key.code == KeyCode::Char('h') {
                    -5
                } else {
                    5
                };
                let secs = app.config.request_timeout_secs as i64 + step;
                app.config.request_timeout_secs = secs.clamp(5, 60) as u64;
            }
            _ => {}
        },
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Predict => render_predict(frame, app),
        AppScreen::History => render_history(frame, app),
        AppScreen::Recommendation => render_recommendation(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let metrics = app.metrics();
    let streak_text = if metrics.streak_days > 0 {
        format!(" | {} day streak", metrics.streak_days)
    } else {
        String::new()
    };
    let user_text = app
        .session
        .current_user
        .as_deref()
        .map(|u| format!(" | {u}"))
        .unwrap_or_default();
    let header_info = format!(
        " {} predictions{streak_text}{user_text}",
        app.history.len()
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " scorecast ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let menu_area = ui::layout::centered_rect(50, 80, layout[1]);
    frame.render_widget(
        MenuView {
            menu: &app.menu,
            theme: app.theme,
        },
        menu_area,
    );

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " [1-3] Screens  [s] Settings  [d] Dark mode  [q] Quit ",
        Style::default().fg(colors.text_dim()),
    )]));
    frame.render_widget(footer, layout[2]);
}

fn render_predict(frame: &mut ratatui::Frame, app: &App) {
    let area = ui::layout::centered_rect(70, 90, frame.area());
    frame.render_widget(
        FormView {
            form: &app.form,
            busy: app.predict_busy,
            error: app.predict_error,
            theme: app.theme,
        },
        area,
    );
}

fn render_history(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    frame.render_widget(
        HistoryTable::new(
            app.history.all(),
            app.history_selected,
            app.history_confirm_clear,
            app.theme,
        ),
        layout[0],
    );

    let footer = Paragraph::new(Line::from(Span::styled(
        " [j/k] Scroll  [c] Clear history  [r] Recommendations  [Esc] Back ",
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, layout[1]);
}

fn render_recommendation(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let metrics = app.metrics();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(ScoreGauge::new(app.display, app.theme), layout[0]);

    // Aggregates and badges side by side
    let mid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);

    let stats_lines = match metrics.aggregate {
        Some(agg) => vec![
            Line::from(format!(" Best    {:>5.1}", agg.best)),
            Line::from(format!(" Average {:>5.1}", agg.average)),
            Line::from(format!(" Worst   {:>5.1}", agg.worst)),
        ],
        None => vec![Line::from(Span::styled(
            " no data",
            Style::default().fg(colors.text_dim()),
        ))],
    };
    let stats = Paragraph::new(stats_lines)
        .style(Style::default().fg(colors.fg()))
        .block(
            Block::bordered()
                .title(format!(" Trend | streak: {} ", metrics.streak_days))
                .border_style(Style::default().fg(colors.border())),
        );
    frame.render_widget(stats, mid[0]);
    frame.render_widget(BadgeRow::new(&metrics.badges, app.theme), mid[1]);

    // Remote recommendation with the local tier guidance underneath
    let guidance = app.display.severity.guidance();
    let mut lines = vec![Line::from(Span::styled(
        guidance,
        Style::default().fg(colors.fg()),
    ))];
    match app.recommendation.text() {
        Some(text) => lines.push(Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(colors.accent()),
        ))),
        None if app.recommendation.is_busy() => lines.push(Line::from(Span::styled(
            "Fetching recommendation...",
            Style::default().fg(colors.text_dim()),
        ))),
        None => {}
    }
    let recommendation = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::bordered()
            .title(" Recommendation ")
            .border_style(Style::default().fg(colors.border())),
    );
    frame.render_widget(recommendation, layout[2]);

    frame.render_widget(
        ChatPanel {
            chat: &app.chat,
            input: &app.chat_input,
            focused: app.chat_focused,
            theme: app.theme,
        },
        layout[3],
    );

    let hint = if app.chat_focused {
        " [Enter] Send  [Esc] Leave chat "
    } else {
        " [i] Ask the advisor  [h] History  [Esc] Back "
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, layout[4]);
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 70, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = vec![
        (
            "Dark Mode".to_string(),
            if app.session.dark_mode { "on" } else { "off" }.to_string(),
        ),
        (
            "Request Timeout".to_string(),
            format!("{}s", app.config.request_timeout_secs),
        ),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.text_dim()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = Style::default()
            .fg(if is_selected { colors.accent() } else { colors.fg() })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });

        let lines = vec![
            Line::from(Span::styled(format!("{indicator}{label}:"), label_style)),
            Line::from(Span::styled(
                format!("  < {value} >"),
                Style::default().fg(colors.text_dim()),
            )),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let server = Paragraph::new(Line::from(Span::styled(
        format!("  Server: {}", app.config.server_url),
        Style::default().fg(colors.text_dim()),
    )));
    server.render(layout[2], frame.buffer_mut());

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [ESC] Save & back  [Enter/arrows] Change value",
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[4], frame.buffer_mut());
}

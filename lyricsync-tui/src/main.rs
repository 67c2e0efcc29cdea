mod app;
mod config;
mod keys;
mod log_buffer;
mod ui;

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use app::{App, FocusedPanel};
use clap::Parser;
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use keys::Action;
use log_buffer::{LogBuffer, LogBufferLayer};
use lyricsync_core::{self as lc, ne};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file to load and save settings in
    #[arg(long, default_value = Config::FILENAME)]
    config: PathBuf,

    /// Start syncing as soon as the UI is up
    #[arg(long)]
    start: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to a buffer shown in the UI instead of stdout.
    let log_buffer = LogBuffer::new();

    // Also log to a file, since the terminal is taken over by the UI.
    let log_file = std::fs::File::create("lyricsync-tui.log").context("failed to create log file")?;
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(LogBufferLayer::new(log_buffer.clone()))
        .with(file_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lyricsync=info")),
        )
        .init();

    let config = Config::load(&args.config)?;

    let client = ne::Client::new(config.server.base_url.clone(), config.server.cookie.clone());
    let logic = lc::Logic::new(lc::LogicArgs {
        source: client,
        settings: config.sync.clone(),
    })
    .context("failed to start the sync engine")?;

    let tick_rate = Duration::from_millis(config.general.tick_rate_ms);
    let mut app = App::new(config, args.config, logic, log_buffer);
    if args.start {
        app.logic.start();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Save settings on exit so offset and interval survive restarts.
    app.save_state();

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        if app.needs_redraw {
            terminal.draw(|frame| ui::draw(frame, app))?;
            app.needs_redraw = false;
        }
        let term_size = terminal.size()?;
        let size = Rect::new(0, 0, term_size.width, term_size.height);

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let mut scroll_delta: i32 = 0;

            // Process the first event, then drain all remaining queued events.
            let mut process_event = |evt: Event, app: &mut App| match evt {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    handle_key_event(app, &key);
                    app.needs_redraw = true;
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => scroll_delta -= 1,
                    MouseEventKind::ScrollDown => scroll_delta += 1,
                    _ => {
                        handle_mouse_event(app, &mouse, size);
                        app.needs_redraw = true;
                    }
                },
                Event::Resize(_, _) => {
                    app.needs_redraw = true;
                }
                _ => {}
            };

            process_event(event::read()?, app);
            while event::poll(Duration::ZERO)? {
                process_event(event::read()?, app);
            }

            // Apply coalesced scroll as a single operation.
            if scroll_delta != 0 {
                apply_scroll(app, scroll_delta);
                app.needs_redraw = true;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key_event(app: &mut App, key: &event::KeyEvent) {
    match app.focused_panel {
        FocusedPanel::Lyrics => {
            if let Some(action) = keys::lyrics_action(key) {
                handle_lyrics_action(app, action);
            }
        }
        FocusedPanel::Logs => {
            if let Some(action) = keys::logs_action(key)
                && let Some(la) = ui::logs::handle_key(&mut app.logs, action)
            {
                match la {
                    ui::logs::LogsAction::ToggleLogs => app.toggle_logs(),
                }
            }
        }
    }
}

fn handle_lyrics_action(app: &mut App, action: Action) {
    // Every key press replaces the previous notice.
    app.notice = None;
    match action {
        Action::Quit => app.should_quit = true,
        Action::StartStop => app.toggle_sync(),
        Action::PlayPause => app.logic.toggle_playback(),
        Action::SkipForward => app.skip(true),
        Action::SkipBackward => app.skip(false),
        Action::OffsetUp => app.adjust_offset(ui::layout::OFFSET_STEP_SECS),
        Action::OffsetDown => app.adjust_offset(-ui::layout::OFFSET_STEP_SECS),
        Action::PollSlower => app.adjust_poll_interval(ui::layout::POLL_STEP_MS),
        Action::PollFaster => app.adjust_poll_interval(-ui::layout::POLL_STEP_MS),
        Action::AutoScroll => app.toggle_auto_scroll(),
        Action::Export => app.export_lyrics(),
        Action::Clear => app.clear_lyrics(),
        Action::Fullscreen => app.toggle_fullscreen(),
        Action::Logs => app.toggle_logs(),
        Action::Back if app.fullscreen && app.lyrics.selected_index.is_none() => {
            app.toggle_fullscreen();
        }
        navigation => ui::lyrics::handle_key(&mut app.lyrics, &app.view, &app.logic, navigation),
    }
}

fn handle_mouse_event(app: &mut App, mouse: &MouseEvent, size: Rect) {
    // Compute layout areas matching ui::draw
    let main = ui::layout::split_main(size, app.fullscreen);
    let x = mouse.column;
    let y = mouse.row;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            if ui::layout::contains(main.scrub_bar, x, y) {
                ui::handle_scrub_click(app, main.scrub_bar, x);
                return;
            }
            if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                && app.focused_panel == FocusedPanel::Lyrics
                && ui::layout::contains(main.content, x, y)
            {
                ui::lyrics::handle_mouse_click(
                    &mut app.lyrics,
                    &app.view,
                    &app.logic,
                    main.content,
                    y,
                );
            }
        }
        _ => {}
    }
}

/// Applies a coalesced scroll delta to the currently focused panel.
fn apply_scroll(app: &mut App, scroll_delta: i32) {
    let steps = scroll_delta * ui::layout::SCROLL_WHEEL_STEPS as i32;
    match app.focused_panel {
        FocusedPanel::Lyrics => ui::lyrics::move_selection(&mut app.lyrics, &app.view, steps),
        FocusedPanel::Logs => app.logs.scroll_by(steps),
    }
}

//! Keystroke Features - live keystroke timing monitor
//!
//! A poller thread samples the keyboard, a single consumer thread feeds the
//! feature engine, and the terminal UI reads snapshots on its own tick.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode as CtKeyCode, KeyEvent as CtKeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use std::{
    fs::{self, OpenOptions},
    io::stdout,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use keystroke_features::{
    config::{Config, LoggingConfig},
    features::{FeatureEngine, SharedFeatureEngine},
    keyboard::{KeyEvent, KeyboardListener},
    ui::{App, AppState, AppView, HelpPanel, MetricsPanel, StatusBar, TallyPanel},
};

/// How long the consumer waits for an event before re-checking shutdown
const CONSUMER_WAIT: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(&config.logging)?;
    if let Some(e) = config_error {
        warn!("Using default configuration: {}", e);
    }
    info!("Starting keystroke feature capture");

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("Failed to install signal handler")?;
    }

    let engine = SharedFeatureEngine::new(FeatureEngine::with_display_window(
        config.engine.display_window,
    ));

    let (event_tx, event_rx) = mpsc::channel::<KeyEvent>();
    let poller = spawn_poller(event_tx, config.poll_interval(), running.clone())?;
    let consumer = spawn_consumer(event_rx, engine.clone(), running.clone())?;

    let mut app = App::new(config, engine.clone());
    let ui_result = run_ui(&mut app, &running);

    running.store(false, Ordering::SeqCst);
    for (name, handle) in [("poller", poller), ("consumer", consumer)] {
        if handle.join().is_err() {
            error!("{} thread panicked", name);
        }
    }
    ui_result?;

    let total_events = engine.total_events();
    println!("\nKeystroke Features session complete.");
    println!("Total events processed: {}", total_events);
    println!("Session duration: {}", app.elapsed_formatted());
    info!("Stopped after {} events", total_events);

    Ok(())
}

/// Send log output to a file so it never draws over the TUI
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or(logging.level.as_str());
    let mut builder = env_logger::Builder::from_env(env);

    match logging.resolved_file() {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            // Nowhere to write; keep the terminal clean
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder.try_init().context("Failed to initialize logger")?;
    Ok(())
}

/// Event source: poll the keyboard and push events onto the queue
fn spawn_poller(
    event_tx: mpsc::Sender<KeyEvent>,
    interval: Duration,
    running: Arc<AtomicBool>,
) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("key-poller".into())
        .spawn(move || {
            let mut listener = KeyboardListener::new(event_tx);
            while running.load(Ordering::SeqCst) {
                if listener.poll().is_err() {
                    warn!("Event queue closed, stopping keyboard poller");
                    break;
                }
                thread::sleep(interval);
            }
        })
        .context("Failed to spawn keyboard poller")
}

/// Single consumer: the only place the engine is updated
fn spawn_consumer(
    event_rx: mpsc::Receiver<KeyEvent>,
    engine: SharedFeatureEngine,
    running: Arc<AtomicBool>,
) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("feature-engine".into())
        .spawn(move || {
            while running.load(Ordering::SeqCst) {
                match event_rx.recv_timeout(CONSUMER_WAIT) {
                    Ok(event) => {
                        if let Err(e) = engine.update(&event) {
                            warn!("Dropped {:?} of {}: {}", event.event_type, event.key, e);
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        })
        .context("Failed to spawn feature engine consumer")
}

fn run_ui(app: &mut App, running: &AtomicBool) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui_loop(&mut terminal, app, running);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    running: &AtomicBool,
) -> Result<()> {
    let tick_rate = app.config.refresh_interval();

    while running.load(Ordering::SeqCst) {
        app.refresh();

        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(13),   // Main content
                    Constraint::Length(1), // Status bar
                ])
                .split(frame.area());

            match app.view {
                AppView::Help => {
                    frame.render_widget(HelpPanel::new(app.colors), chunks[0]);
                }
                AppView::Features => {
                    let columns = Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([Constraint::Length(22), Constraint::Min(40)])
                        .split(chunks[0]);
                    frame.render_widget(
                        TallyPanel::new(&app.snapshot.category_tally, app.colors),
                        columns[0],
                    );
                    frame.render_widget(
                        MetricsPanel::new(&app.snapshot.metrics, app.colors),
                        columns[1],
                    );
                }
            }

            let elapsed = app.elapsed_formatted();
            let status = StatusBar::new(
                app.state.label(),
                &elapsed,
                app.snapshot.total_events,
                app.colors,
            )
            .pending(app.pending)
            .message(app.get_status());
            frame.render_widget(status, chunks[1]);
        })?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if is_interrupt(&key) {
                    app.quit();
                    break;
                }
                match key.code {
                    CtKeyCode::Char('q') | CtKeyCode::Esc => app.quit(),
                    CtKeyCode::Char(' ') => app.toggle_pause(),
                    CtKeyCode::Char('r') => app.reset(),
                    CtKeyCode::Char('?') | CtKeyCode::Tab => app.toggle_help(),
                    _ => {}
                }
            }
        }

        if app.state == AppState::Quitting {
            break;
        }
    }

    Ok(())
}

/// Raw mode delivers Ctrl-C as a key instead of SIGINT
fn is_interrupt(key: &CtKeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, CtKeyCode::Char('c') | CtKeyCode::Char('C'))
}

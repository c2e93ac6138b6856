//! src/main.rs
//! Live-search TUI client: search-as-you-type against a social platform's
//! search endpoint, with keyboard- and pointer-driven result activation.

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event as TerminalEvent, EventStream, KeyCode,
        KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::{
    signal,
    sync::{Notify, mpsc},
    time::interval,
};
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use glimpse_core::{
    Logger,
    config::Config,
    controller::{actions::Action, dispatcher::ActionDispatcher, event_loop::EventLoop},
    search::client::SearchClient,
    util::debounce::{DebounceConfig, Debouncer},
    view::ui::UIRenderer,
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Spinner and notification aging repaint cadence.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    setup_panic_handler();

    let app = App::new()
        .await
        .context("Failed to initialize application")?;
    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    terminal: AppTerminal,
    event_loop: EventLoop,
    dispatcher: ActionDispatcher,
    ui_renderer: UIRenderer,
    config: Arc<Config>,
    shutdown: Arc<Notify>,
    _log_guard: WorkerGuard,
}

impl App {
    async fn new() -> Result<Self> {
        let config = Arc::new(Config::load().await.unwrap_or_else(|e| {
            eprintln!("Failed to load config, using defaults: {e}");
            Config::default()
        }));

        let log_guard = Logger::init(&config.logging).context("Failed to initialize logging")?;
        info!("Starting live-search client");

        let terminal = setup_terminal().context("Failed to initialize terminal")?;

        // Shared HTTP client for every query task.
        let client = Arc::new(
            SearchClient::new(&config.search).context("Failed to build search client")?,
        );

        // Communication channels: background tasks report actions; the
        // debouncer delivers quiet-period queries.
        let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
        let (debouncer, query_rx) =
            Debouncer::new(DebounceConfig::search_input(config.search.query_delay));

        let dispatcher =
            ActionDispatcher::new(Arc::clone(&config), client, debouncer, action_tx);
        let event_loop = EventLoop::new(action_rx, query_rx);

        let ui_renderer = UIRenderer::new();
        let shutdown = Arc::new(Notify::new());

        info!(
            endpoint = %config.search.endpoint,
            min_search_length = config.search.min_search_length,
            query_delay_ms = config.search.query_delay.as_millis() as u64,
            "Application initialized"
        );

        Ok(Self {
            terminal,
            event_loop,
            dispatcher,
            ui_renderer,
            config,
            shutdown,
            _log_guard: log_guard,
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler();
        info!("Starting event loop");

        let mut event_stream = EventStream::new();
        let mut tick = interval(TICK_INTERVAL);

        loop {
            self.render()?;

            tokio::select! {
                // Shutdown signal
                _ = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }

                // Terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(terminal_event)) = maybe_event
                        && let Some(action) = self.process_terminal_event(terminal_event)
                        && !self.dispatch_action(action).await?
                    {
                        break;
                    }
                }

                // Background actions: query results and debounced queries
                action = self.event_loop.next_action() => {
                    if !self.dispatch_action(action).await? {
                        info!("Termination from event loop action");
                        break;
                    }
                }

                // Periodic repaint for spinner and notification aging
                _ = tick.tick() => {
                    self.dispatch_action(Action::Tick).await?;
                }
            }
        }

        self.log_final_metrics();
        info!("Event loop terminated cleanly");
        Ok(())
    }

    /// Translate a raw terminal event into an application command. The
    /// confirmation overlay, when up, captures the keyboard.
    fn process_terminal_event(&self, event: TerminalEvent) -> Option<Action> {
        match event {
            TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if self.dispatcher.state.pending_open.is_some() {
                    return match key.code {
                        KeyCode::Enter | KeyCode::Char('y') => Some(Action::ConfirmPendingOpen),
                        KeyCode::Esc | KeyCode::Char('n') => Some(Action::CancelPendingOpen),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            Some(Action::Quit)
                        }
                        _ => None,
                    };
                }

                match (key.code, key.modifiers) {
                    // Quit
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),

                    // Widget dismissal
                    (KeyCode::Esc, _) => Some(Action::ClearSearch),

                    // Selection and activation
                    (KeyCode::Up, _) => Some(Action::MoveSelectionUp),
                    (KeyCode::Down, _) => Some(Action::MoveSelectionDown),
                    (KeyCode::Enter, _) => Some(Action::ActivateSelected),

                    // Input editing
                    (KeyCode::Backspace, _) => Some(Action::DeleteCharBack),
                    (KeyCode::Char(ch), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                        Some(Action::InsertChar(ch))
                    }

                    _ => None,
                }
            }

            TerminalEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Action::ActivateAt {
                    column: mouse.column,
                    row: mouse.row,
                }),
                _ => None,
            },

            TerminalEvent::Resize(width, height) => Some(Action::Resize(width, height)),

            _ => None,
        }
    }

    async fn dispatch_action(&mut self, action: Action) -> Result<bool> {
        debug!("Dispatching action: {:?}", action);
        Ok(self.dispatcher.handle(action).await)
    }

    fn render(&mut self) -> Result<()> {
        if !self.dispatcher.state.take_redraw() {
            return Ok(());
        }

        let Self {
            terminal,
            dispatcher,
            ui_renderer,
            config,
            ..
        } = self;

        terminal
            .draw(|frame: &mut Frame<'_>| {
                ui_renderer.render(frame, &mut dispatcher.state, config);
            })
            .context("Failed to draw terminal")?;

        Ok(())
    }

    fn log_final_metrics(&self) {
        let metrics = self.event_loop.snapshot_metrics();
        info!("Final metrics:");
        info!("  Background actions processed: {}", metrics.actions);
        info!("  Queries debounced: {}", metrics.queries);
    }

    fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = self.shutdown.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{SignalKind, signal};

                let mut sigterm =
                    signal(SignalKind::terminate()).expect("Failed to create SIGTERM handler");

                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = signal::ctrl_c() => info!("Received Ctrl+C"),
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                info!("Received Ctrl+C");
            }

            shutdown.notify_one();
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}

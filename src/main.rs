use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use telemetry_dashboard::{
    events, ui, App, HealthPoller, ServerClient, Settings, StreamSource,
};

#[derive(Parser, Debug)]
#[command(name = "telemetry-dashboard")]
#[command(about = "Terminal dashboard for live battery, GPS and motor telemetry")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Telemetry stream endpoint (host:port)
    #[arg(short, long)]
    stream: Option<String>,

    /// Base URL of the telemetry server's HTTP API
    #[arg(long)]
    server: Option<String>,

    /// Health poll interval in milliseconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Do not replay the server's cached values at startup
    #[arg(long)]
    no_seed: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Command-line flags take precedence over file and environment.
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(stream) = self.stream {
            settings.stream_addr = stream;
        }
        if let Some(server) = self.server {
            settings.server_url = server;
        }
        if let Some(interval) = self.interval {
            settings.health_interval_ms = interval;
        }
        if self.no_seed {
            settings.seed_from_snapshot = false;
        }
        if let Some(log_file) = self.log_file {
            settings.log_file = log_file;
        }
        settings
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;
    let settings = args.apply(settings);

    init_logging(&settings)?;
    info!(
        stream = %settings.stream_addr,
        server = %settings.server_url,
        "starting telemetry dashboard"
    );

    // Transport and health tasks run on the runtime; the TUI owns the main thread.
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let source = StreamSource::connect(settings.stream_addr.clone(), settings.reconnect_delay());

    let client = ServerClient::builder()
        .endpoint(settings.server_url.clone())
        .timeout(settings.request_timeout())
        .build()?;

    let seed = if settings.seed_from_snapshot {
        rt.block_on(client.fetch_latest()).unwrap_or_else(|e| {
            warn!("could not fetch cached values: {}", e);
            Vec::new()
        })
    } else {
        Vec::new()
    };

    let (health_tx, health_rx) = mpsc::channel(16);
    HealthPoller::new(client, settings.health_interval()).spawn(health_tx);

    let mut app = App::new(Box::new(source), &settings.layout()).with_health(health_rx);
    app.seed(&seed);

    run_tui(app)
}

fn init_logging(settings: &Settings) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)
        .with_context(|| format!("cannot open log file {}", settings.log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("dashboard closed");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        app.pump();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events::poll_event(Duration::from_millis(50))? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key_event(app, key)
                }
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

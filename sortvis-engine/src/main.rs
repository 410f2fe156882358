//! sortvis - Main entry point
//!
//! Terminal front end for the sorting engine: loads configuration, draws bars
//! as text from the event bus, and drives runs from stdin commands (or runs a
//! single sort with `--once`).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use sortvis_common::config::TomlConfig;
use sortvis_common::params::{ParamMetadata, EVENT_BUS_CAPACITY};
use sortvis_common::{Algorithm, EventBus, Orientation, RunReport, VisEvent};
use sortvis_engine::command::{Command, HELP};
use sortvis_engine::render::{self, TextRenderer};
use sortvis_engine::{RenderSink, Visualizer, VisualizerOptions};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Slowest frame rate the text renderer redraws at while steps stream in
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Command-line arguments for sortvis
#[derive(Parser, Debug)]
#[command(name = "sortvis")]
#[command(about = "Step-by-step sorting algorithm visualizer")]
#[command(version)]
struct Args {
    /// Number of bars (10-200)
    #[arg(short, long, env = "SORTVIS_BARS")]
    bars: Option<usize>,

    /// Delay after each step in ms (1-50, lower is faster)
    #[arg(short, long, env = "SORTVIS_DELAY_MS")]
    delay: Option<f64>,

    /// How often a paused run re-checks pause and cancel, in ms (1-1000)
    #[arg(long, env = "SORTVIS_PAUSE_POLL_MS")]
    pause_poll_ms: Option<u64>,

    /// Algorithm run by `sort` without an argument
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Bar orientation (vertical or horizontal)
    #[arg(short, long)]
    orientation: Option<Orientation>,

    /// Path to a TOML config file
    #[arg(short, long, env = "SORTVIS_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for the shuffle RNG (reproducible arrays)
    #[arg(long)]
    seed: Option<u64>,

    /// Run one sort, print its report and exit
    #[arg(long)]
    once: bool,

    /// Do not draw frames
    #[arg(long)]
    no_render: bool,

    /// Print every event as a JSON line instead of drawing
    #[arg(long, conflicts_with = "no_render")]
    events_json: bool,

    /// Text rows (vertical) or columns (horizontal) used for bar length
    #[arg(long, default_value = "20")]
    extent: usize,

    /// Log level override (otherwise RUST_LOG, then the config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Print parameter metadata and exit
    #[arg(long)]
    list_params: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    init_tracing(args.log_level.as_deref().unwrap_or(&config.logging.level));

    if args.list_params {
        print_params();
        return Ok(());
    }

    let mut settings = config.visualizer.clone();
    if let Some(bars) = args.bars {
        warn_if_invalid("bar_count", &bars.to_string());
        settings.bar_count = bars;
    }
    if let Some(delay) = args.delay {
        warn_if_invalid("delay_ms", &delay.to_string());
        settings.delay_ms = delay;
    }
    if let Some(poll_ms) = args.pause_poll_ms {
        warn_if_invalid("pause_poll_interval_ms", &poll_ms.to_string());
        settings.pause_poll_interval_ms = poll_ms;
    }
    if let Some(algorithm) = args.algorithm {
        settings.algorithm = algorithm;
    }
    if let Some(orientation) = args.orientation {
        settings.orientation = orientation;
    }
    info!(
        bar_count = settings.bar_count,
        delay_ms = settings.delay_ms,
        algorithm = %settings.algorithm,
        orientation = %settings.orientation,
        "Starting sortvis"
    );

    // Subscribe before the visualizer exists so the first Reset is not missed
    let bus = Arc::new(EventBus::new(EVENT_BUS_CAPACITY));
    let events = bus.subscribe();

    let sink: Arc<dyn RenderSink<u32>> = bus.clone();
    let visualizer = Arc::new(Visualizer::new(
        VisualizerOptions {
            seed: args.seed,
            ..VisualizerOptions::from(&settings)
        },
        sink,
    ));

    let output = if args.events_json {
        Output::Json
    } else if args.no_render {
        Output::Quiet
    } else {
        Output::Text(TextRenderer::new(args.extent))
    };
    let renderer = tokio::spawn(render_loop(events, Arc::clone(&visualizer), output));

    let outcome = if args.once {
        run_once(&visualizer, settings.algorithm).await
    } else {
        command_loop(&visualizer, settings.algorithm).await
    };

    // Let the renderer drain the closing frame before tearing it down
    tokio::time::sleep(FRAME_INTERVAL).await;
    renderer.abort();

    info!("sortvis shutdown complete");
    outcome
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "sortvis={level},sortvis_engine={level},sortvis_common={level}",
                    level = level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn warn_if_invalid(key: &str, value: &str) {
    if let Some(meta) = ParamMetadata::find(key) {
        if let Err(e) = meta.validate(value) {
            warn!("{} (value will be clamped)", e);
        }
    }
}

fn print_params() {
    for meta in ParamMetadata::all() {
        println!(
            "{:<24} {:<12} default {:<10} range {:<40} {}",
            meta.key, meta.data_type, meta.default_value, meta.validation_range, meta.description
        );
    }
}

/// Wait for a run on the blocking pool so the runtime keeps serving I/O
fn await_run(handle: sortvis_engine::RunHandle) -> JoinHandle<sortvis_common::Result<RunReport>> {
    tokio::task::spawn_blocking(move || handle.join())
}

async fn finish_run(task: JoinHandle<sortvis_common::Result<RunReport>>) -> Result<RunReport> {
    let report = task
        .await
        .context("Sort wait task failed")?
        .context("Sort run failed")?;
    Ok(report)
}

async fn run_once(visualizer: &Arc<Visualizer>, algorithm: Algorithm) -> Result<()> {
    let handle = visualizer
        .start(algorithm)
        .context("Failed to start sort run")?;
    let mut task = await_run(handle);

    let joined = tokio::select! {
        joined = &mut task => Some(joined),
        _ = shutdown_signal() => None,
    };
    let report = match joined {
        Some(joined) => joined
            .context("Sort wait task failed")?
            .context("Sort run failed")?,
        None => {
            visualizer.cancel();
            finish_run(task).await?
        }
    };

    println!("{}", describe_report(&report));
    Ok(())
}

async fn command_loop(visualizer: &Arc<Visualizer>, default_algorithm: Algorithm) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut running: Option<JoinHandle<sortvis_common::Result<RunReport>>> = None;

    println!("{}", HELP);
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read stdin")?,
            _ = shutdown_signal() => None,
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        debug!(?command, "Command received");

        match command {
            Command::Sort(algorithm) => {
                let algorithm = algorithm.unwrap_or(default_algorithm);
                match visualizer.start(algorithm) {
                    Ok(handle) => {
                        // The previous wait task has finished if start succeeded
                        if let Some(previous) = running.take() {
                            log_run(finish_run(previous).await);
                        }
                        running = Some(await_run(handle));
                    }
                    Err(e) => println!("{}", e),
                }
            }
            Command::Shuffle => report_result(visualizer.shuffle().map(|_| ())),
            Command::Resize(n) => report_result(visualizer.resize(n).map(|_| ())),
            Command::Speed(ms) => {
                let applied = visualizer.set_delay(ms);
                println!("delay {} ms", applied);
            }
            Command::Pause => visualizer.set_paused(true),
            Command::Resume => visualizer.set_paused(false),
            Command::Cancel => {
                if !visualizer.cancel() {
                    println!("no sort is running");
                }
            }
            Command::Orient(orientation) => {
                let orientation = orientation.unwrap_or_else(|| visualizer.orientation().toggled());
                report_result(visualizer.set_orientation(orientation));
            }
            Command::Labels => {
                for label in visualizer.labels() {
                    println!("{}", label);
                }
            }
            Command::Status => {
                let pace = visualizer.pace();
                println!(
                    "{}",
                    render::status_line(
                        &visualizer.snapshot(),
                        pace.delay_ms(),
                        pace.is_paused(),
                        visualizer.is_running()
                    )
                );
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    if visualizer.cancel() {
        info!("Cancelling active sort before exit");
    }
    if let Some(task) = running.take() {
        log_run(finish_run(task).await);
    }
    Ok(())
}

fn report_result(result: sortvis_common::Result<()>) {
    if let Err(e) = result {
        println!("{}", e);
    }
}

fn log_run(result: Result<RunReport>) {
    match result {
        Ok(report) => debug!(run_id = %report.run_id, outcome = %report.outcome, "Run reaped"),
        Err(e) => error!("{:#}", e),
    }
}

fn describe_report(report: &RunReport) -> String {
    format!(
        "{} {} after {} steps ({} comparisons, {} writes, {} ms)",
        report.algorithm.label(),
        report.outcome,
        report.steps,
        report.comparisons,
        report.writes,
        report.elapsed_ms
    )
}

enum Output {
    Text(TextRenderer),
    Json,
    Quiet,
}

/// Draw frames from the event bus
///
/// Step frames are throttled to `FRAME_INTERVAL`; a lagging receiver skips
/// frames instead of slowing the run.
async fn render_loop(
    mut events: tokio::sync::broadcast::Receiver<VisEvent>,
    visualizer: Arc<Visualizer>,
    output: Output,
) {
    let mut last_frame: Option<Instant> = None;
    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "Renderer lagged, frames skipped");
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        let renderer = match &output {
            Output::Quiet => continue,
            Output::Json => {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!("Failed to serialize {} event: {}", event.event_type(), e),
                }
                continue;
            }
            Output::Text(renderer) => renderer,
        };

        let draw = |snapshot: &sortvis_common::Snapshot<u32>| {
            let orientation = visualizer.orientation();
            let max = *visualizer.surface().bar_length_range(orientation).end();
            // Clear screen, cursor home
            print!("\x1b[2J\x1b[H{}", renderer.render(snapshot, orientation, max));
        };

        match event {
            VisEvent::Step { snapshot } => {
                if last_frame.map_or(true, |t| t.elapsed() >= FRAME_INTERVAL) {
                    draw(&snapshot);
                    last_frame = Some(Instant::now());
                }
            }
            VisEvent::Reset { .. } | VisEvent::OrientationChanged { .. } => {
                draw(&visualizer.snapshot());
            }
            VisEvent::RunStarted { algorithm, len, .. } => {
                println!("{} on {} bars", algorithm.label(), len);
            }
            VisEvent::RunFinished { report, snapshot, .. } => {
                draw(&snapshot);
                println!("{}", describe_report(&report));
            }
            VisEvent::PaceChanged { delay_ms, paused, .. } => {
                println!("delay {} ms{}", delay_ms, if paused { ", paused" } else { "" });
            }
        }
    }
}

/// Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

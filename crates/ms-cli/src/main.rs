//! CLI entry point for the mediasort daemon.
//!
//! This binary watches a download directory, classifies media filenames,
//! and relocates stable files into a canonical library layout.
//!
//! # Usage
//!
//! ```bash
//! mediasort [OPTIONS] <COMMAND>
//!
//! # Run the daemon
//! mediasort run --watch-dir ~/Downloads/complete --config ~/.config/mediasort.json
//!
//! # One-shot: report what the initial scan would track
//! mediasort scan --watch-dir ~/Downloads/complete
//!
//! # Classify filenames without touching the filesystem
//! mediasort preview "Alien.1979.PROPER.1080p.mp4" "Stranger.Things.S01E01.mkv"
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use ms_classify::Planner;
use ms_core::Config;
use ms_daemon::{Daemon, LibraryWalker};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Watches a directory for media files and sorts them into a library.
///
/// Files are classified from their names alone (movie / show / other) and
/// moved into the configured library roots once they have stopped changing
/// for the quiet period.
#[derive(Parser)]
#[command(name = "mediasort", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON configuration file.
    ///
    /// Fields not present in the file keep their defaults; command-line
    /// options override the file.
    #[arg(short, long, global = true, env = "MEDIASORT_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Directory to watch for incoming files.
    #[arg(long, global = true, env = "MEDIASORT_WATCH_DIR")]
    watch_dir: Option<Utf8PathBuf>,

    /// Destination root for movies.
    #[arg(long, global = true, env = "MEDIASORT_MOVIE_DIR")]
    movie_dir: Option<Utf8PathBuf>,

    /// Destination root for TV shows.
    #[arg(long, global = true, env = "MEDIASORT_SHOW_DIR")]
    show_dir: Option<Utf8PathBuf>,

    /// Destination root for unclassified video.
    #[arg(long, global = true, env = "MEDIASORT_MISC_DIR")]
    misc_dir: Option<Utf8PathBuf>,

    /// Destination root for non-video files.
    #[arg(long, global = true, env = "MEDIASORT_NON_VIDEO_DIR")]
    non_video_dir: Option<Utf8PathBuf>,

    /// Seconds a file must stay unchanged before it is acted on.
    #[arg(long, global = true)]
    quiet_period_secs: Option<u64>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the daemon until interrupted.
    Run,

    /// Walk the watch directory once and report what would be tracked.
    Scan,

    /// Classify filenames and print their destinations (no I/O).
    Preview {
        /// Filenames to classify.
        #[arg(required = true)]
        filenames: Vec<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = PreviewFormat::Text)]
        format: PreviewFormat,
    },
}

/// Preview output format.
#[derive(Clone, Copy, ValueEnum)]
enum PreviewFormat {
    /// Human-readable lines.
    Text,
    /// JSON array of classifications.
    Json,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default. Noisy
/// crates are filtered to `warn` level.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},notify=warn,mio=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the optional config file and CLI overrides.
///
/// `require_watch_dir` is false for commands that never touch the
/// filesystem (preview).
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed, or if a
/// required watch directory is missing from both file and flags.
fn build_config(cli: &Cli, require_watch_dir: bool) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path.as_std_path())
                .map_err(|e| color_eyre::eyre::eyre!("Cannot read config file {path}: {e}"))?;
            serde_json::from_str(&contents)
                .map_err(|e| color_eyre::eyre::eyre!("Cannot parse config file {path}: {e}"))?
        }
        None => Config::default(),
    };

    if let Some(dir) = &cli.watch_dir {
        config.watch.watch_dir.clone_from(dir);
    }
    if let Some(dir) = &cli.movie_dir {
        config.library.movie_dir.clone_from(dir);
    }
    if let Some(dir) = &cli.show_dir {
        config.library.show_dir.clone_from(dir);
    }
    if let Some(dir) = &cli.misc_dir {
        config.library.misc_dir.clone_from(dir);
    }
    if let Some(dir) = &cli.non_video_dir {
        config.library.non_video_dir.clone_from(dir);
    }
    if let Some(secs) = cli.quiet_period_secs {
        config.watch.quiet_period_secs = secs;
    }

    if require_watch_dir && config.watch.watch_dir.as_str().is_empty() {
        return Err(color_eyre::eyre::eyre!(
            "No watch directory configured (use --watch-dir or a config file)"
        ));
    }

    Ok(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs the daemon with SIGTERM handling.
async fn run_daemon(config: Config) -> color_eyre::Result<()> {
    info!(watch_dir = %config.watch.watch_dir, "Starting daemon");

    let daemon = Daemon::new(config);

    // Handle SIGTERM for graceful shutdown on Unix
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            result = daemon.run() => {
                result.map_err(|e| color_eyre::eyre::eyre!("Daemon error: {}", e))?;
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::select! {
            result = daemon.run() => {
                result.map_err(|e| color_eyre::eyre::eyre!("Daemon error: {}", e))?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
            }
        }
    }

    Ok(())
}

/// Walks the watch directory once and prints what would be tracked.
fn run_scan(config: &Config) -> color_eyre::Result<()> {
    let walker = LibraryWalker::new(&config.watch.watch_dir)
        .map_err(|e| color_eyre::eyre::eyre!("Cannot scan watch directory: {}", e))?;
    let files = walker.collect_files()?;

    let planner = Planner::new(&config.rules, &config.library);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let mut counts = [0usize; 4];
    for path in &files {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let plan = planner.plan(file_name);
        match plan.classification.label() {
            "movie" => counts[0] += 1,
            "show" => counts[1] += 1,
            "misc" => counts[2] += 1,
            _ => counts[3] += 1,
        }
        writeln!(
            handle,
            "{:>9}  {} -> {}",
            plan.classification.label(),
            path,
            plan.destination
        )?;
    }

    writeln!(handle)?;
    writeln!(
        handle,
        "{} files: {} movies, {} shows, {} misc, {} non-video",
        files.len(),
        counts[0],
        counts[1],
        counts[2],
        counts[3]
    )?;

    Ok(())
}

/// Classifies filenames and prints their destinations without any I/O.
fn run_preview(
    config: &Config,
    filenames: &[String],
    format: PreviewFormat,
) -> color_eyre::Result<()> {
    let planner = Planner::new(&config.rules, &config.library);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    match format {
        PreviewFormat::Text => {
            for filename in filenames {
                let plan = planner.plan(filename);
                writeln!(
                    handle,
                    "{:>9}  {} -> {}",
                    plan.classification.label(),
                    filename,
                    plan.destination
                )?;
            }
        }
        PreviewFormat::Json => {
            #[derive(serde::Serialize)]
            struct Entry<'a> {
                filename: &'a str,
                classification: ms_core::Classification,
                canonical_name: String,
                destination: Utf8PathBuf,
            }

            let entries: Vec<Entry<'_>> = filenames
                .iter()
                .map(|filename| {
                    let plan = planner.plan(filename);
                    Entry {
                        filename,
                        classification: plan.classification,
                        canonical_name: plan.canonical_name,
                        destination: plan.destination,
                    }
                })
                .collect();

            let json = serde_json::to_string_pretty(&entries)?;
            writeln!(handle, "{json}")?;
        }
    }

    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // Install color-eyre first, before anything can panic
    color_eyre::install()?;

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.no_color);

    match &cli.command {
        Commands::Run => {
            let config = build_config(&cli, true)?;
            run_daemon(config).await
        }
        Commands::Scan => {
            let config = build_config(&cli, true)?;
            run_scan(&config)
        }
        Commands::Preview { filenames, format } => {
            // Preview never touches the filesystem; an empty watch dir is fine
            let config = build_config(&cli, false)?;
            run_preview(&config, filenames, *format)
        }
    }
}

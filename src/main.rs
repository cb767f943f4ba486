//! typist - Typewriter phrase cycler
//!
//! CLI entry point: animates phrases in the terminal and validates contact
//! form payloads.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::future::Future;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use typist::cycler::{self, CyclerHandle, Frame, PhraseCycler};
use typist::{ContactSubmission, FrameLogger, FrameRecord, TerminalDisplay, TypistConfig};

/// Typewriter phrase cycler
///
/// Types and deletes a rotating list of phrases in the terminal, forever or
/// for a fixed duration.
#[derive(Parser, Debug)]
#[command(name = "typist", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Animate the configured phrases until Ctrl-C
    Run {
        /// Path to the typist.toml configuration file
        #[arg(long, default_value = "typist.toml")]
        config: PathBuf,

        /// Directory to record every frame in (frames.jsonl)
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// Stop after this many milliseconds instead of waiting for Ctrl-C
        #[arg(long)]
        duration_ms: Option<u64>,
    },
    /// Validate a contact form submission (JSON file, or `-` for stdin)
    CheckContact {
        /// JSON file with `name`, `email` and `message`
        input: PathBuf,
    },
}

/// Install the stderr tracing subscriber, quiet unless `RUST_LOG` says otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves when `signal` reports Ctrl-C.
///
/// If the listener cannot be installed this never resolves, leaving the
/// duration (if any) to stop the run.
async fn interrupted<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("interrupted"),
        Err(err) => {
            warn!("Ctrl-C handler unavailable: {err}");
            std::future::pending::<()>().await;
        }
    }
}

/// Resolves when the run should stop: Ctrl-C, or the optional duration.
async fn wait_for_stop(duration_ms: Option<u64>) {
    let deadline = async {
        match duration_ms {
            Some(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        () = interrupted(tokio::signal::ctrl_c()) => {}
        () = deadline => info!("duration elapsed"),
    }
}

/// SIGHUP listener used to reload the config file while running.
#[cfg(unix)]
struct ReloadSignal(tokio::signal::unix::Signal);

#[cfg(unix)]
impl ReloadSignal {
    fn new() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        let hangup = signal(SignalKind::hangup()).context("Failed to install SIGHUP handler")?;
        Ok(Self(hangup))
    }

    async fn recv(&mut self) {
        if self.0.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
struct ReloadSignal;

#[cfg(not(unix))]
impl ReloadSignal {
    #[allow(clippy::unnecessary_wraps)]
    fn new() -> Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) {
        std::future::pending::<()>().await;
    }
}

/// Re-read phrases and timing from disk and hand them to the running cycler.
///
/// Display settings are fixed for the lifetime of the run.
async fn reload(config_path: &Path, handle: &CyclerHandle) -> Result<()> {
    let config = TypistConfig::from_path(config_path)?;
    handle
        .reconfigure(config.phrase_set()?, config.cycler_config()?)
        .await?;
    info!(path = %config_path.display(), "config reloaded");
    Ok(())
}

/// Draw a frame and append it to the log, if any.
fn present(
    display: &mut TerminalDisplay,
    logger: Option<&mut FrameLogger>,
    frame: &Frame,
) -> Result<()> {
    display.draw(frame).context("Failed to draw frame")?;
    if let Some(logger) = logger {
        logger.append(&FrameRecord::now(frame))?;
    }
    Ok(())
}

/// Run the animation until stopped, drawing and optionally logging each frame.
async fn run_animation(
    config_path: &Path,
    log_dir: Option<&Path>,
    duration_ms: Option<u64>,
) -> Result<()> {
    let config = TypistConfig::from_path(config_path)
        .with_context(|| format!("Failed to load config from '{}'", config_path.display()))?;

    let mut display = TerminalDisplay::from_config(&config)?;
    let mut logger = log_dir
        .map(FrameLogger::new)
        .transpose()
        .context("Failed to initialize frame logger")?;
    let mut reload_signal = ReloadSignal::new()?;

    let phrase_cycler = PhraseCycler::new(config.phrase_set()?, config.cycler_config()?);
    display.print_header(
        &config_path.display().to_string(),
        phrase_cycler.phrases().len(),
    );

    let (handle, mut frames) = cycler::spawn_with_stream(phrase_cycler);
    let mut drawn: u64 = 0;

    display.draw(&handle.current()).context("Failed to draw frame")?;

    let stop = wait_for_stop(duration_ms);
    tokio::pin!(stop);

    loop {
        tokio::select! {
            () = &mut stop => break,
            frame = frames.recv() => {
                let Some(frame) = frame else {
                    break;
                };
                present(&mut display, logger.as_mut(), &frame)?;
                drawn += 1;
            }
            () = reload_signal.recv() => {
                if let Err(err) = reload(config_path, &handle).await {
                    warn!("config reload failed: {err:#}");
                }
            }
        }
    }

    let last = handle.teardown().await;
    while let Ok(frame) = frames.try_recv() {
        present(&mut display, logger.as_mut(), &frame)?;
        drawn += 1;
    }
    if let Some(logger) = logger.as_mut() {
        logger.flush()?;
    }
    display.print_summary(drawn, last.elapsed_ms);

    Ok(())
}

/// Read a contact submission from a file, or stdin for `-`.
fn read_contact(input: &Path) -> Result<ContactSubmission> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read '{}'", input.display()))?
    };
    ContactSubmission::from_json(&content).context("Failed to parse contact submission")
}

/// Validate a submission and print the verdict. Returns whether it is valid.
fn check_contact(submission: &ContactSubmission) -> bool {
    let errors = submission.validate();
    if errors.is_empty() {
        eprintln!("{} submission is valid", "✓".green().bold());
        return true;
    }

    eprintln!(
        "{} submission has {} problem(s)",
        "✗".red().bold(),
        errors.len()
    );
    for error in &errors {
        eprintln!("  {} {}", format!("{}:", error.field).bold(), error.message);
    }
    false
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Run {
            config,
            log_dir,
            duration_ms,
        } => run_animation(&config, log_dir.as_deref(), duration_ms).await,
        Command::CheckContact { input } => {
            let submission = read_contact(&input)?;
            if check_contact(&submission) {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use typist::cycler::Phase;

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["typist", "run"]).unwrap();
        match cli.command {
            Command::Run {
                config,
                log_dir,
                duration_ms,
            } => {
                assert_eq!(config, PathBuf::from("typist.toml"));
                assert!(log_dir.is_none());
                assert!(duration_ms.is_none());
            }
            Command::CheckContact { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "typist",
            "run",
            "--config",
            "hero.toml",
            "--log-dir",
            ".typist",
            "--duration-ms",
            "1500",
        ])
        .unwrap();
        match cli.command {
            Command::Run {
                config,
                log_dir,
                duration_ms,
            } => {
                assert_eq!(config, PathBuf::from("hero.toml"));
                assert_eq!(log_dir, Some(PathBuf::from(".typist")));
                assert_eq!(duration_ms, Some(1500));
            }
            Command::CheckContact { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_check_contact() {
        let cli = Cli::try_parse_from(["typist", "check-contact", "-"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::CheckContact { input } if input == Path::new("-")
        ));
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["typist"]).is_err());
    }

    #[test]
    fn test_read_contact_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contact.json");
        std::fs::write(
            &path,
            r#"{"name": "Ada", "email": "ada@example.com", "message": "Loved the projects section."}"#,
        )
        .unwrap();

        let submission = read_contact(&path).unwrap();
        assert!(check_contact(&submission));
    }

    #[test]
    fn test_read_contact_missing_file() {
        let err = read_contact(Path::new("/nonexistent/contact.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_read_contact_bad_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contact.json");
        std::fs::write(&path, "{ nope").unwrap();

        let err = read_contact(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_check_contact_invalid() {
        let submission = ContactSubmission {
            name: "A".to_string(),
            email: "nope".to_string(),
            message: "short".to_string(),
        };
        assert!(!check_contact(&submission));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_animation_with_duration_logs_frames() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("typist.toml");
        std::fs::write(
            &config_path,
            r#"
phrases = ["hi"]

[timing]
typing_interval_ms = 10
deleting_interval_ms = 10
pause_ms = 100
"#,
        )
        .unwrap();
        let log_dir = temp_dir.path().join("log");

        run_animation(&config_path, Some(log_dir.as_path()), Some(25))
            .await
            .unwrap();

        let records = typist::log::jsonl::read_records(&log_dir.join("frames.jsonl")).unwrap();
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["h", "hi"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_animation_logs_every_frame_with_zero_pause() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("typist.toml");
        std::fs::write(
            &config_path,
            r#"
phrases = ["ab"]

[timing]
typing_interval_ms = 10
deleting_interval_ms = 10
pause_ms = 0
"#,
        )
        .unwrap();
        let log_dir = temp_dir.path().join("log");

        run_animation(&config_path, Some(log_dir.as_path()), Some(25))
            .await
            .unwrap();

        let records = typist::log::jsonl::read_records(&log_dir.join("frames.jsonl")).unwrap();
        let timeline: Vec<(u64, &str, Phase)> = records
            .iter()
            .map(|r| (r.elapsed_ms, r.text.as_str(), r.phase))
            .collect();
        assert_eq!(
            timeline,
            vec![
                (10, "a", Phase::Typing),
                (20, "ab", Phase::Paused),
                (20, "ab", Phase::Deleting),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reload_reconfigures_running_cycler() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("typist.toml");
        std::fs::write(
            &config_path,
            "phrases = [\"hello\"]\n\n[timing]\ntyping_interval_ms = 10\n",
        )
        .unwrap();
        let config = TypistConfig::from_path(&config_path).unwrap();
        let (handle, mut frames) = cycler::spawn_with_stream(PhraseCycler::new(
            config.phrase_set().unwrap(),
            config.cycler_config().unwrap(),
        ));
        assert_eq!(frames.recv().await.unwrap().text, "h");

        std::fs::write(
            &config_path,
            "phrases = [\"world\"]\n\n[timing]\ntyping_interval_ms = 50\n",
        )
        .unwrap();
        reload(&config_path, &handle).await.unwrap();

        let cleared = frames.recv().await.unwrap();
        assert_eq!(cleared.text, "");
        assert_eq!(cleared.elapsed_ms, 10);
        let typed = frames.recv().await.unwrap();
        assert_eq!(typed.text, "w");
        assert_eq!(typed.phase, Phase::Typing);
        assert_eq!(typed.elapsed_ms, 60);

        std::fs::write(
            &config_path,
            "phrases = [\"other\"]\n\n[timing]\ntyping_interval_ms = 0\n",
        )
        .unwrap();
        assert!(reload(&config_path, &handle).await.is_err());
        std::fs::write(&config_path, "phrases = [").unwrap();
        assert!(reload(&config_path, &handle).await.is_err());

        let next = frames.recv().await.unwrap();
        assert_eq!(next.text, "wo");
        assert_eq!(next.elapsed_ms, 110);
        assert_eq!(handle.current(), next);

        handle.teardown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupted_waits_when_handler_fails() {
        let failed = interrupted(async { Err(std::io::Error::other("no signal support")) });
        let outcome = tokio::time::timeout(Duration::from_secs(60), failed).await;
        assert!(outcome.is_err(), "a failed handler must not stop the run");

        let fired = interrupted(async { Ok(()) });
        assert!(tokio::time::timeout(Duration::from_secs(60), fired)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_run_animation_missing_config() {
        let err = run_animation(Path::new("/nonexistent/typist.toml"), None, Some(1))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}

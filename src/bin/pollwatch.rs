//! pollwatch - report changes to a file's existence and size
//!
//! Polls one file at a fixed interval and prints a report every time it
//! appears, disappears or changes size.

use clap::Parser;
use pollwatch::prelude::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pollwatch")]
#[command(about = "Report changes to a file's existence and size")]
#[command(version)]
struct Args {
    /// File to watch (asked on stdin when not given here or in settings)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    path: Option<PathBuf>,

    /// Delay between polls in milliseconds [default: 100]
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Settings file (YAML, TOML or JSON)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Keep notifying the other listeners when one of them fails
    #[arg(long)]
    isolate: bool,

    /// Log polling activity to stderr (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// RUST_LOG takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let mut stdout = io::stdout();
    let (driver, settings) = prepare(
        args,
        io::stdin().lock(),
        &mut stdout,
        Arc::new(ConsoleListener::stdout()),
    )?;
    tracing::info!(
        path = %driver.monitor().path().display(),
        interval_ms = settings.interval_ms,
        "watching file"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        driver
            .run_until(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "cannot listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            })
            .await
    })?;

    Ok(())
}

/// Everything that happens before the first poll. Returns once
/// "Program is working" has been written to `out`.
fn prepare(
    args: Args,
    input: impl BufRead,
    out: &mut impl Write,
    console: Arc<dyn Listener>,
) -> Result<(PollDriver, WatchSettings)> {
    let settings = settings_from_args(args)?;

    // Ask for the path only when no layer supplied one
    let path = match &settings.path {
        Some(path) => path.clone(),
        None => prompt_for_path(input, &mut *out)?,
    };

    // The construction read happens here, before anyone is listening
    let driver = PollDriver::from_settings(&path, &settings);
    driver.monitor().attach(console);

    writeln!(out, "Program is working")?;
    out.flush()?;
    Ok((driver, settings))
}

fn settings_from_args(args: Args) -> Result<WatchSettings> {
    let mut builder = WatchSettings::builder();
    if let Some(config) = &args.config {
        builder = builder.with_file(config);
    }
    builder = builder.with_default_env();

    // Command line flags beat the settings file and the environment
    if let Some(path) = args.path {
        builder = builder.with_path(path);
    }
    if let Some(interval_ms) = args.interval_ms {
        builder = builder.with_interval_ms(interval_ms);
    }
    if args.isolate {
        builder = builder.with_dispatch_mode(DispatchMode::Isolate);
    }
    builder.build()
}

fn prompt_for_path(mut input: impl BufRead, mut out: impl Write) -> Result<PathBuf> {
    writeln!(out, "Path to the input file:")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        let reason = "input ended before a path was given";
        return Err(ValidationError::invalid_field("path", reason).into());
    }
    let path = line.trim_end_matches(['\r', '\n']);
    if path.is_empty() {
        return Err(ValidationError::invalid_field("path", "must not be empty").into());
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use std::time::Duration;
    use tempfile::TempDir;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pollwatch").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_prompt_strips_crlf() {
        let mut out: Vec<u8> = Vec::new();
        let path = prompt_for_path(Cursor::new("C:\\data\\in.txt\r\n"), &mut out).unwrap();

        assert_eq!(path, PathBuf::from("C:\\data\\in.txt"));
        assert_eq!(String::from_utf8(out).unwrap(), "Path to the input file:\n");
    }

    #[test]
    fn test_prompt_strips_lf() {
        let path = prompt_for_path(Cursor::new("/tmp/in.txt\nignored\n"), io::sink()).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/in.txt"));
    }

    #[test]
    fn test_prompt_keeps_inner_spaces() {
        let path = prompt_for_path(Cursor::new(" my file.txt\n"), io::sink()).unwrap();
        assert_eq!(path, PathBuf::from(" my file.txt"));
    }

    #[test]
    fn test_prompt_empty_line() {
        let result = prompt_for_path(Cursor::new("\r\n"), io::sink());
        assert!(matches!(result, Err(WatchError::Validation(_))));
    }

    #[test]
    fn test_prompt_end_of_input() {
        let result = prompt_for_path(Cursor::new(""), io::sink());
        assert!(matches!(result, Err(WatchError::Validation(_))));
    }

    #[test]
    fn test_verbose_help_mentions_rust_log() {
        use clap::CommandFactory;

        let command = Args::command();
        let verbose = command
            .get_arguments()
            .find(|arg| arg.get_id() == "verbose")
            .unwrap();
        let help = verbose.get_help().unwrap().to_string();
        assert!(help.contains("RUST_LOG"), "{help}");
    }

    #[test]
    fn test_flags_override_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("watch.yaml");
        fs::write(&config, "interval_ms: 500\npath: from_file.txt\n").unwrap();
        let config = config.to_str().unwrap();

        let settings =
            settings_from_args(args(&["-c", config, "-i", "20", "--isolate", "cli.txt"])).unwrap();

        assert_eq!(settings.interval_ms, 20);
        assert_eq!(settings.dispatch_mode, DispatchMode::Isolate);
        assert_eq!(settings.path, Some(PathBuf::from("cli.txt")));
    }

    #[test]
    fn test_zero_interval_flag_rejected() {
        let result = settings_from_args(args(&["-i", "0", "a.txt"]));
        assert!(matches!(result, Err(WatchError::Validation(_))));
    }

    #[test]
    fn test_prepare_prompts_when_no_path_given() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("typed.txt");
        let input = format!("{}\r\n", target.display());

        let mut out: Vec<u8> = Vec::new();
        let (driver, _) = prepare(
            args(&[]),
            Cursor::new(input),
            &mut out,
            Arc::new(ConsoleListener::new(Vec::<u8>::new())),
        )
        .unwrap();

        assert_eq!(driver.monitor().path(), target.as_path());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Path to the input file:\nProgram is working\n"
        );
    }

    #[test]
    fn test_prepare_skips_prompt_when_path_given() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("given.txt");

        let mut out: Vec<u8> = Vec::new();
        let (driver, _) = prepare(
            args(&[target.to_str().unwrap()]),
            Cursor::new("never read\n"),
            &mut out,
            Arc::new(ConsoleListener::new(Vec::<u8>::new())),
        )
        .unwrap();

        assert_eq!(driver.monitor().path(), target.as_path());
        assert_eq!(String::from_utf8(out).unwrap(), "Program is working\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_announced_before_first_poll() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("watched.txt");
        let console = Arc::new(ConsoleListener::new(Vec::<u8>::new()));

        let mut out: Vec<u8> = Vec::new();
        let (driver, _) = prepare(
            args(&["-i", "10", target.to_str().unwrap()]),
            Cursor::new(""),
            &mut out,
            Arc::clone(&console) as Arc<dyn Listener>,
        )
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Program is working\n");
        assert_eq!(driver.monitor().poll_count(), 0);
        assert_eq!(driver.interval(), Duration::from_millis(10));

        fs::write(&target, b"abc").unwrap();
        let monitor = driver.run_for(2).await.unwrap();
        assert_eq!(monitor.change_count(), 1);

        drop(monitor);
        let console = Arc::try_unwrap(console).unwrap();
        assert_eq!(
            String::from_utf8(console.into_inner()).unwrap(),
            "State of file is changed:\nFile exists\nFile size: 3 byte\n\n"
        );
    }

    #[test]
    fn test_missing_path_reaches_prompt_and_fails_on_eof() {
        let mut out: Vec<u8> = Vec::new();
        let result = prepare(
            args(&[]),
            Cursor::new(""),
            &mut out,
            Arc::new(ConsoleListener::new(Vec::<u8>::new())),
        );

        assert!(matches!(result, Err(WatchError::Validation(_))));
        assert_eq!(String::from_utf8(out).unwrap(), "Path to the input file:\n");
    }
}

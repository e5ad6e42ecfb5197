// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use submerger::app_config::{self, Config};
use submerger::app_controller::{Controller, MergeRequest};
use submerger::errors::AppError;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge two SubRip files into one
    Merge(MergeArgs),

    /// Generate shell completions for submerger
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Subtitle file whose lines are shown first
    #[arg(value_name = "UPPER")]
    upper_path: PathBuf,

    /// Subtitle file whose lines are shown second
    #[arg(value_name = "LOWER")]
    lower_path: PathBuf,

    /// Output file (defaults to <UPPER stem>.<suffix>.srt next to UPPER)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Strip <...> and {...} markup from the merged text
    #[arg(short, long)]
    plain_text: bool,

    /// Keep markup even when the configuration enables plain text
    #[arg(long, conflicts_with = "plain_text")]
    keep_markup: bool,

    /// Print the merged subtitles to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Merge two subtitle tracks into a single SubRip file")]
#[command(long_about = "Merge two subtitle tracks into a single SubRip file.

Every cue of the result shows the lines of the UPPER track that are visible at
that moment, followed by the lines of the LOWER track. Boundaries that differ
only slightly between the tracks are smoothed out, and adjacent cues with the
same text are joined.

CONFIGURATION:
    Settings are read from conf.json in the working directory (or the path
    given with --config-path). A default configuration file is created when
    none exists.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the max level is narrowed once the
    // config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "submerger", &mut std::io::stdout());
            Ok(())
        }
        Commands::Merge(args) => run_merge(args),
    }
}

// @returns: Plain-text override from the CLI flags, `None` to use the config
fn plain_text_override(plain_text: bool, keep_markup: bool) -> Option<bool> {
    match (plain_text, keep_markup) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

fn run_merge(options: MergeArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)
        .with_context(|| format!("Failed to load configuration from {}", options.config_path))?;

    // Update log level in config if specified via command line
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    // Keep stdout clean for the merged text
    if options.stdout {
        config.merge.show_progress = false;
    }

    let controller = Controller::with_config(config)?;

    let request = MergeRequest {
        upper_path: options.upper_path,
        lower_path: options.lower_path,
        output_path: options.output,
        plain_text: plain_text_override(options.plain_text, options.keep_markup),
        to_stdout: options.stdout,
        force_overwrite: options.force_overwrite,
    };

    match controller.run(&request) {
        Ok(summary) => {
            if summary.output_path.is_none() {
                print!("{}", summary.merged_text);
            }
            info!(
                "Merged into {} cues in {:.2?}",
                summary.report.subtitles, summary.elapsed
            );
            Ok(())
        }
        Err(e) => {
            let cancelled = e
                .downcast_ref::<AppError>()
                .is_some_and(AppError::is_cancelled);
            if cancelled {
                warn!("Merge cancelled, nothing written");
                return Ok(());
            }
            Err(e)
        }
    }
}

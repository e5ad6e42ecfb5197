use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::cancellation::CancellationToken;
use crate::errors::{AppError, Cancelled};
use crate::file_utils::FileManager;
use crate::merger::{MergeOutcome, MergeReport, Source, SubtitleMerger};
use crate::srt;
use crate::subtitles::Subtitles;

// @module: Application controller for subtitle merging

// @const: How often the controller checks on the merge worker
const WORKER_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// One merge job as requested on the command line
#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// Track whose lines go first in each cue
    pub upper_path: PathBuf,

    /// Track whose lines go second in each cue
    pub lower_path: PathBuf,

    /// Explicit output path, derived from the upper path when absent
    pub output_path: Option<PathBuf>,

    /// Overrides the configured plain-text mode when set
    pub plain_text: Option<bool>,

    /// Return the text without writing any file
    pub to_stdout: bool,

    /// Replace an existing output file
    pub force_overwrite: bool,
}

/// Merged SubRip text and the engine's report
#[derive(Debug, Clone)]
pub struct MergedText {
    pub text: String,
    pub report: MergeReport,
}

/// What a finished merge job produced
#[derive(Debug, Clone)]
pub struct MergeSummary {
    /// File written, `None` when the text went to stdout
    pub output_path: Option<PathBuf>,

    /// The encoded merged track
    pub merged_text: String,

    /// Engine statistics
    pub report: MergeReport,

    /// Wall time of decode + merge + encode
    pub elapsed: Duration,
}

/// Main application controller for subtitle merging
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))
            .context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Read both inputs, merge them and write (or return) the result
    pub fn run(&self, request: &MergeRequest) -> Result<MergeSummary> {
        let start_time = Instant::now();

        info!(
            "Merging {} (upper) with {} (lower)",
            request.upper_path.display(),
            request.lower_path.display()
        );

        let output_path = if request.to_stdout {
            None
        } else {
            let path = request.output_path.clone().unwrap_or_else(|| {
                FileManager::generate_output_path(&request.upper_path, &self.config.output.suffix)
            });
            // Fail before the merge rather than after it
            if path.exists() && !request.force_overwrite {
                return Err(anyhow::anyhow!(
                    "Output file already exists: {}. Use -f to force overwrite.",
                    path.display()
                ));
            }
            Some(path)
        };

        let upper_text = FileManager::read_to_string(&request.upper_path)?;
        let lower_text = FileManager::read_to_string(&request.lower_path)?;
        let plain_text = request.plain_text.unwrap_or(self.config.plain_text);

        let merged = self.merge_texts(&upper_text, &lower_text, plain_text, &CancellationToken::new())?;

        if let Some(path) = &output_path {
            FileManager::write_to_file(path, &merged.text, request.force_overwrite)?;
            info!("Success: {}", path.display());
        }

        Ok(MergeSummary {
            output_path,
            merged_text: merged.text,
            report: merged.report,
            elapsed: start_time.elapsed(),
        })
    }

    /// Decode both texts, merge them and encode the result
    pub fn merge_texts(
        &self,
        upper_text: &str,
        lower_text: &str,
        plain_text: bool,
        cancel: &CancellationToken,
    ) -> Result<MergedText, AppError> {
        let upper = decode(upper_text, Source::Upper)?;
        let lower = decode(lower_text, Source::Lower)?;
        info!("Decoded {} upper and {} lower cues", upper.len(), lower.len());

        let outcome = self.merge_tracks(&upper, &lower, cancel)?;
        let text = srt::write(&outcome.subtitles, plain_text);

        Ok(MergedText {
            text,
            report: outcome.report,
        })
    }

    /// Run the merge engine on a worker thread.
    ///
    /// The calling thread keeps the spinner alive and enforces the configured
    /// deadline by cancelling `cancel`. Cancellation from elsewhere through a
    /// clone of `cancel` works the same way.
    pub fn merge_tracks(
        &self,
        upper: &Subtitles,
        lower: &Subtitles,
        cancel: &CancellationToken,
    ) -> Result<MergeOutcome, Cancelled> {
        let merger = SubtitleMerger::new(self.config.merge.engine_config());
        let deadline = match self.config.merge.timeout_secs {
            0 => None,
            secs => Some(Instant::now() + Duration::from_secs(secs)),
        };
        let spinner = self.create_spinner();

        let result = thread::scope(|scope| {
            let worker_token = cancel.clone();
            let worker = scope.spawn(move || merger.merge(upper, lower, &worker_token));

            let mut deadline_hit = false;
            while !worker.is_finished() {
                if let Some(deadline) = deadline {
                    if !deadline_hit && Instant::now() >= deadline {
                        warn!(
                            "Merge exceeded {} seconds, cancelling",
                            self.config.merge.timeout_secs
                        );
                        cancel.cancel();
                        deadline_hit = true;
                    }
                }
                if let Some(spinner) = &spinner {
                    spinner.tick();
                }
                thread::sleep(WORKER_POLL_INTERVAL);
            }

            worker.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        });

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match &result {
            Ok(outcome) => debug!("Merge report: {:?}", outcome.report),
            Err(_) => warn!("Merge cancelled, nothing produced"),
        }
        result
    }

    fn create_spinner(&self) -> Option<ProgressBar> {
        if !self.config.merge.show_progress {
            return None;
        }

        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message("Merging subtitles");
        Some(spinner)
    }
}

fn decode(text: &str, track: Source) -> Result<Subtitles, AppError> {
    srt::parse(text).map_err(|source| AppError::Decode { track, source })
}

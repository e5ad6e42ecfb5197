/*!
 * Integration tests for the application controller
 */

use anyhow::Result;
use std::fs;
use submerger::app_config::Config;
use submerger::app_controller::{Controller, MergeRequest};
use submerger::cancellation::CancellationToken;
use submerger::errors::{AppError, Cancelled, FormatError};
use submerger::merger::Source;
use submerger::srt;
use crate::common::{self, LOWER_SRT, UPPER_SRT};

/// Controller that never draws a spinner
fn quiet_controller() -> Result<Controller> {
    let mut config = Config::default();
    config.merge.show_progress = false;
    Controller::with_config(config)
}

fn request(dir: &std::path::Path) -> Result<MergeRequest> {
    Ok(MergeRequest {
        upper_path: common::create_test_file(dir, "movie.en.srt", UPPER_SRT)?,
        lower_path: common::create_test_file(dir, "movie.fr.srt", LOWER_SRT)?,
        output_path: None,
        plain_text: None,
        to_stdout: false,
        force_overwrite: false,
    })
}

#[test]
fn test_controller_run_shouldWriteNextToUpperFile() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let controller = quiet_controller()?;

    let summary = controller.run(&request(temp_dir.path())?)?;

    let expected_path = temp_dir.path().join("movie.en.merged.srt");
    assert_eq!(summary.output_path.as_deref(), Some(expected_path.as_path()));
    assert_eq!(fs::read_to_string(&expected_path)?, summary.merged_text);
    assert_eq!(summary.report.subtitles, 5);
    assert_eq!(srt::parse(&summary.merged_text)?.len(), 5);
    Ok(())
}

#[test]
fn test_controller_run_withExistingOutput_shouldRefuseWithoutForce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = quiet_controller()?;
    let output = common::create_test_file(temp_dir.path(), "out.srt", "keep me")?;

    let mut merge_request = request(temp_dir.path())?;
    merge_request.output_path = Some(output.clone());

    assert!(controller.run(&merge_request).is_err());
    assert_eq!(fs::read_to_string(&output)?, "keep me");

    merge_request.force_overwrite = true;
    controller.run(&merge_request)?;
    assert!(fs::read_to_string(&output)?.starts_with("1\n00:00:01,000 --> 00:00:04,000\n"));
    Ok(())
}

#[test]
fn test_controller_run_toStdout_shouldNotWriteFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = quiet_controller()?;

    let mut merge_request = request(temp_dir.path())?;
    merge_request.to_stdout = true;
    merge_request.plain_text = Some(true);

    let summary = controller.run(&merge_request)?;

    assert!(summary.output_path.is_none());
    assert!(!temp_dir.path().join("movie.en.merged.srt").exists());
    assert!(!summary.merged_text.contains("<i>"));
    Ok(())
}

#[test]
fn test_controller_run_withPlainTextConfigButKeepRequested_shouldKeepMarkup() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = Config::default();
    config.plain_text = true;
    config.merge.show_progress = false;
    let controller = Controller::with_config(config)?;

    let mut merge_request = request(temp_dir.path())?;
    merge_request.to_stdout = true;
    assert!(!controller.run(&merge_request)?.merged_text.contains("<i>"));

    merge_request.plain_text = Some(false);
    assert!(controller.run(&merge_request)?.merged_text.contains("<i>Fine, thanks.</i>"));
    Ok(())
}

#[test]
fn test_controller_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = quiet_controller()?;

    let mut merge_request = request(temp_dir.path())?;
    merge_request.lower_path = temp_dir.path().join("missing.srt");

    assert!(controller.run(&merge_request).is_err());
    assert!(!temp_dir.path().join("movie.en.merged.srt").exists());
    Ok(())
}

#[test]
fn test_controller_mergeTexts_withBrokenTrack_shouldNameIt() -> Result<()> {
    let controller = quiet_controller()?;
    let token = CancellationToken::new();

    let upper_error = controller
        .merge_texts("not a subtitle", LOWER_SRT, false, &token)
        .unwrap_err();
    assert!(matches!(
        upper_error,
        AppError::Decode { track: Source::Upper, source: FormatError::MissingHeader }
    ));

    let broken_lower = "1\n00:00:01,000 --> 00:00:02,000\nText\nx\n00:00:03,000 --> 00:00:04,000\nMore";
    let lower_error = controller
        .merge_texts(UPPER_SRT, broken_lower, false, &token)
        .unwrap_err();
    assert!(matches!(lower_error, AppError::Decode { track: Source::Lower, .. }));
    assert!(lower_error.to_string().contains("lower"));
    Ok(())
}

#[test]
fn test_controller_mergeTracks_withCancelledToken_shouldReturnCancelled() -> Result<()> {
    let controller = quiet_controller()?;
    let upper = srt::parse(UPPER_SRT)?;
    let lower = srt::parse(LOWER_SRT)?;
    let token = CancellationToken::new();
    token.cancel();

    assert_eq!(controller.merge_tracks(&upper, &lower, &token), Err(Cancelled));

    let error = controller
        .merge_texts(UPPER_SRT, LOWER_SRT, false, &token)
        .unwrap_err();
    assert!(error.is_cancelled());
    Ok(())
}

#[test]
fn test_controller_mergeTracks_withFreshToken_shouldMatchEngine() -> Result<()> {
    let controller = quiet_controller()?;
    let upper = srt::parse(UPPER_SRT)?;
    let lower = srt::parse(LOWER_SRT)?;

    let outcome = controller.merge_tracks(&upper, &lower, &CancellationToken::new())?;
    let direct = submerger::merge(&upper, &lower, &submerger::NeverCancel)?;

    assert_eq!(outcome.subtitles, direct);
    Ok(())
}

#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.output.suffix = String::new();

    assert!(Controller::with_config(config).is_err());
}

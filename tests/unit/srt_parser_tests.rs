/*!
 * Tests for SubRip decoding
 */

use anyhow::Result;
use submerger::errors::FormatError;
use submerger::srt::{parse, write};
use crate::common::{self, cue, track};

/// Test parsing a well-formed file
#[test]
fn test_parse_withValidSrt_shouldReturnAllCues() -> Result<()> {
    let subtitles = parse(common::UPPER_SRT)?;

    assert_eq!(subtitles.len(), 3);
    assert_eq!(subtitles.as_slice()[0], cue(1000, 4000, &["Hello there."]));
    assert_eq!(subtitles.as_slice()[1], cue(5000, 9000, &["How are you?"]));
    assert_eq!(subtitles.as_slice()[2].lines(), &["<i>Fine, thanks.</i>".to_string()]);

    Ok(())
}

/// Test that a leading byte-order mark is ignored
#[test]
fn test_parse_withByteOrderMark_shouldStripIt() -> Result<()> {
    let content = format!("\u{feff}{}", common::UPPER_SRT);
    let subtitles = parse(&content)?;
    assert_eq!(subtitles, parse(common::UPPER_SRT)?);
    Ok(())
}

/// Test that blank input decodes to an empty track
#[test]
fn test_parse_withBlankInput_shouldReturnEmptyTrack() -> Result<()> {
    assert!(parse("")?.is_empty());
    assert!(parse(" \n\n \r\n")?.is_empty());
    assert!(parse("\u{feff}\n")?.is_empty());
    Ok(())
}

/// Test that text without a time range line is rejected
#[test]
fn test_parse_withMissingTimeRange_shouldFail() {
    let result = parse("1\nhello\n");
    assert_eq!(
        result,
        Err(FormatError::InvalidTimeRange { line: 2, value: "hello".to_string() })
    );
}

/// Test that a single line is too short to be a cue
#[test]
fn test_parse_withSingleLine_shouldFailWithMissingHeader() {
    assert_eq!(parse("1"), Err(FormatError::MissingHeader));
}

/// Test that the first line must be a cue index
#[test]
fn test_parse_withNonNumericFirstIndex_shouldFail() {
    let result = parse("abc\n00:00:01,000 --> 00:00:02,000\nText");
    assert!(matches!(result, Err(FormatError::InvalidIndex { line: 1, .. })));
}

/// Test that a cue index must be preceded by a blank line
#[test]
fn test_parse_withMissingBlankSeparator_shouldFail() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nA\nB\n2\n00:00:03,000 --> 00:00:04,000\nC";
    assert_eq!(parse(content), Err(FormatError::MissingSeparator { line: 4 }));
}

/// Test that the line before a time range must be a valid index
#[test]
fn test_parse_withInvalidInnerIndex_shouldFail() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nA\n\nx\n00:00:03,000 --> 00:00:04,000\nB";
    assert!(matches!(parse(content), Err(FormatError::InvalidIndex { line: 5, .. })));
}

/// Test that back-to-back time ranges are rejected
#[test]
fn test_parse_withConsecutiveTimeRanges_shouldFail() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n00:00:03,000 --> 00:00:04,000\nB";
    assert_eq!(parse(content), Err(FormatError::TruncatedCue { line: 3 }));
}

/// Test that a malformed second line is reported, with no partial result
#[test]
fn test_parse_withInvalidTimeValues_shouldFail() {
    let content = "1\n00:61:00,000 --> 00:00:02,000\nA";
    assert!(matches!(parse(content), Err(FormatError::InvalidTimeRange { line: 2, .. })));
}

/// Test cues without text and cues with several lines
#[test]
fn test_parse_withEmptyAndMultilineCues_shouldKeepStructure() -> Result<()> {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nFirst line\nSecond line\n";
    let subtitles = parse(content)?;

    assert_eq!(subtitles.len(), 2);
    assert_eq!(subtitles.as_slice()[0].lines(), &[String::new()]);
    assert_eq!(
        subtitles.as_slice()[1].lines(),
        &["First line".to_string(), "Second line".to_string()]
    );
    Ok(())
}

/// Test that the final cue may have no text at all
#[test]
fn test_parse_withTrailingTimeRangeOnly_shouldProduceEmptyLine() -> Result<()> {
    let subtitles = parse("1\n00:00:01,000 --> 00:00:02,000\n")?;
    assert_eq!(subtitles.as_slice(), &[cue(1000, 2000, &[""])]);
    Ok(())
}

/// Test Windows line endings
#[test]
fn test_parse_withCrlfLineEndings_shouldParse() -> Result<()> {
    let content = "1\r\n00:00:01,000 --> 00:00:02,000\r\nHi\r\n\r\n2\r\n00:00:03,000 --> 00:00:04,000\r\nBye\r\n";
    let subtitles = parse(content)?;
    assert_eq!(subtitles, track(vec![cue(1000, 2000, &["Hi"]), cue(3000, 4000, &["Bye"])]));
    Ok(())
}

/// Test that arrows in dialogue are not mistaken for time ranges
#[test]
fn test_parse_withArrowInText_shouldKeepLineAsText() -> Result<()> {
    let subtitles = parse("1\n00:00:01,000 --> 00:00:02,000\nleft --> right\n")?;
    assert_eq!(subtitles.as_slice()[0].lines(), &["left --> right".to_string()]);
    Ok(())
}

/// Test that reversed and unordered cues are tolerated
#[test]
fn test_parse_withReversedAndUnorderedCues_shouldKeepThemAsIs() -> Result<()> {
    let content = "7\n00:00:05,000 --> 00:00:04,000\nBackwards\n\n3\n00:00:01,000 --> 00:00:02,000\nEarlier";
    let subtitles = parse(content)?;
    assert_eq!(
        subtitles,
        track(vec![cue(5000, 4000, &["Backwards"]), cue(1000, 2000, &["Earlier"])])
    );
    Ok(())
}

/// Test that decoding the encoder's output reproduces the track
#[test]
fn test_parse_withEncodedTrack_shouldRoundTrip() -> Result<()> {
    let content = "5\n00:00:01,000 --> 00:00:02,000\n<b>Bold</b>\n{\\an8}Top\n\n9\n00:00:02,000 --> 00:00:03,500\n\n\n12\n01:02:03,456 --> 01:02:04,000\nLast\n";
    let decoded = parse(content)?;
    let encoded = write(&decoded, false);

    assert_eq!(parse(&encoded)?, decoded);
    assert!(encoded.starts_with("1\n"));
    Ok(())
}

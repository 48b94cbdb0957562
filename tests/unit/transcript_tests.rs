/*!
 * Tests for word timestamp ingestion and validation
 */

use reelsync::errors::TranscriptError;
use reelsync::transcript::{validate_words, TimestampCatalog};
use crate::common;

/// Test that a well-ordered sequence passes validation
#[test]
fn test_validate_words_withOrderedSequence_shouldAccept() {
    let words = vec![
        common::word("uno", 0.0, 0.3),
        common::word("dos", 0.3, 0.6),
        common::word("tres", 0.6, 1.0),
    ];

    assert!(validate_words(&words).is_ok());
}

/// Equal consecutive start times are allowed - the precondition is
/// non-decreasing, not strictly increasing
#[test]
fn test_validate_words_withEqualStarts_shouldAccept() {
    let words = vec![
        common::word("uno", 0.5, 0.8),
        common::word("dos", 0.5, 0.9),
    ];

    assert!(validate_words(&words).is_ok());
}

/// Test the ordering violation error
#[test]
fn test_validate_words_withDecreasingStart_shouldFailWithOrderingError() {
    let words = vec![
        common::word("uno", 1.0, 1.5),
        common::word("dos", 0.5, 0.9),
    ];

    let err = validate_words(&words).unwrap_err();
    match err {
        TranscriptError::InputOrdering { index, start, prev_start, .. } => {
            assert_eq!(index, 1);
            assert_eq!(start, 0.5);
            assert_eq!(prev_start, 1.0);
        }
        other => panic!("Expected InputOrdering, got {:?}", other),
    }
}

/// Test the inverted-range error
#[test]
fn test_validate_words_withEndBeforeStart_shouldFailWithInvertedRange() {
    let words = vec![common::word("uno", 1.0, 0.5)];

    let err = validate_words(&words).unwrap_err();
    assert!(matches!(err, TranscriptError::InvertedRange { index: 0, .. }));
}

/// Test the negative-start error
#[test]
fn test_validate_words_withNegativeStart_shouldFailWithNegativeStart() {
    let words = vec![common::word("uno", -0.1, 0.5)];

    let err = validate_words(&words).unwrap_err();
    assert!(matches!(err, TranscriptError::NegativeStart { index: 0, .. }));
}

/// Test empty input - nothing to violate
#[test]
fn test_validate_words_withEmptySequence_shouldAccept() {
    assert!(validate_words(&[]).is_ok());
}

/// Entries are indexed by their `take` field, so any key naming scheme works
#[test]
fn test_from_json_str_withWhisperShapedCatalog_shouldIndexByTakeField() {
    let json = r#"{
        "toma_1": {"take": 1, "duration": 2.5, "text": "hola mundo",
                   "words": [{"word": "hola", "start": 0.0, "end": 0.5},
                             {"word": "mundo", "start": 0.6, "end": 1.1}]},
        "toma_7": {"take": 7, "duration": 1.0, "text": "", "words": []}
    }"#;

    let catalog = TimestampCatalog::from_json_str(json).unwrap();

    assert_eq!(catalog.len(), 2);

    let entry = catalog.for_take(1).unwrap();
    assert_eq!(entry.duration, 2.5);
    assert_eq!(entry.words.len(), 2);
    assert_eq!(entry.words[0].word, "hola");

    assert!(catalog.for_take(7).is_some());
}

/// Ordering violations fail at ingestion, not later during segmentation
#[test]
fn test_from_json_str_withOutOfOrderWords_shouldReturnError() {
    let json = r#"{
        "take_1": {"take": 1, "duration": 2.0, "text": "b a",
                   "words": [{"word": "b", "start": 1.0, "end": 1.5},
                             {"word": "a", "start": 0.0, "end": 0.5}]}
    }"#;

    let result = TimestampCatalog::from_json_str(json);
    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("take 1"));
}

/// Negative durations are rejected at ingestion
#[test]
fn test_from_json_str_withNegativeDuration_shouldReturnError() {
    let json = r#"{
        "take_1": {"take": 1, "duration": -1.0, "text": "", "words": []}
    }"#;

    assert!(TimestampCatalog::from_json_str(json).is_err());
}

/// Missing takes resolve to None, tolerated downstream
#[test]
fn test_for_take_withMissingEntry_shouldReturnNone() {
    let catalog = TimestampCatalog::empty();
    assert!(catalog.is_empty());
    assert!(catalog.for_take(42).is_none());
}

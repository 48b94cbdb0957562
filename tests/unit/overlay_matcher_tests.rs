/*!
 * Tests for keyword-triggered overlay detection
 */

use std::collections::HashMap;
use reelsync::overlay_matcher::{KeywordDictionary, KeywordEntry, OverlayMatcher};
use crate::common;

fn entry(image: &str, keywords: &[&str]) -> KeywordEntry {
    KeywordEntry {
        image: image.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

fn matcher(entries: Vec<KeywordEntry>) -> OverlayMatcher {
    OverlayMatcher::new(30.0, KeywordDictionary::new(entries), &HashMap::new(), 2.0)
}

fn images(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

/// Precise mode anchors the cue at the matched word's start frame
#[test]
fn test_detect_withPreciseTiming_shouldAnchorCueAtMatchedWord() {
    let matcher = matcher(vec![entry("warren.jpg", &["Warren Buffett"])]);
    let frame_words = vec![
        common::frame_word("hola", 0, 5),
        common::frame_word("Warren", 10, 15),
        common::frame_word("Buffett", 20, 25),
    ];

    let cues = matcher.detect("hola Warren Buffett", 200, &images(&["warren.jpg"]), Some(&frame_words));

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].image_path, "warren.jpg");
    assert_eq!(cues[0].start_frame, 10);
    // 2.0 s at 30 fps is a 60-frame display window
    assert_eq!(cues[0].end_frame, 70);
    assert_eq!(cues[0].keyword, "Warren Buffett");
}

/// The display window clamps at the take's duration
#[test]
fn test_detect_withShortTake_shouldClampEndAtDuration() {
    let matcher = matcher(vec![entry("warren.jpg", &["Warren"])]);
    let frame_words = vec![common::frame_word("Warren", 10, 15)];

    let cues = matcher.detect("Warren", 30, &images(&["warren.jpg"]), Some(&frame_words));

    assert_eq!(cues[0].end_frame, 30);
}

/// Containment is one-directional: a longer transcript word contains the
/// keyword token, never the reverse
#[test]
fn test_detect_withContainmentDirection_shouldMatchLongerTranscriptWordOnly() {
    let matcher = matcher(vec![
        entry("phone.png", &["tele"]),
        entry("other.png", &["telefono"]),
    ]);
    let frame_words = vec![
        common::frame_word("telefono", 0, 10),
        common::frame_word("te", 20, 30),
    ];

    let cues = matcher.detect(
        "telefono te",
        300,
        &images(&["phone.png", "other.png"]),
        Some(&frame_words),
    );

    // "telefono" contains "tele"; "te" does not contain "telefono"
    // (but "telefono" itself does, via its own dictionary entry)
    let phone: Vec<_> = cues.iter().filter(|c| c.image_path == "phone.png").collect();
    assert_eq!(phone.len(), 1);
    assert_eq!(phone[0].start_frame, 0);

    let other: Vec<_> = cues.iter().filter(|c| c.image_path == "other.png").collect();
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].start_frame, 0, "must match the full word, not 'te'");
}

/// Keyword tokens keep punctuation while transcript words lose it, so a
/// stripped transcript word still matches its clean token
#[test]
fn test_detect_withPunctuatedTranscriptWord_shouldMatchCleanToken() {
    let matcher = matcher(vec![entry("market.webp", &["mercado"])]);
    let frame_words = vec![common::frame_word("mercado.", 5, 12)];

    let cues = matcher.detect("mercado.", 100, &images(&["market.webp"]), Some(&frame_words));

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_frame, 5);
}

/// Diacritics are stripped on both sides before matching
#[test]
fn test_detect_withDiacritics_shouldMatchNormalizedForms() {
    let matcher = matcher(vec![entry("chart.png", &["logró"])]);
    let frame_words = vec![common::frame_word("LOGRO,", 8, 14)];

    let cues = matcher.detect("LOGRO,", 100, &images(&["chart.png"]), Some(&frame_words));

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_frame, 8);
}

/// The early offset shifts the cue start and clamps at frame zero
#[test]
fn test_detect_withEarlyOffset_shouldShiftStartAndClampAtZero() {
    let mut offsets = HashMap::new();
    offsets.insert("google.png".to_string(), 0.5);

    let matcher = OverlayMatcher::new(
        30.0,
        KeywordDictionary::new(vec![entry("google.png", &["Google"])]),
        &offsets,
        2.0,
    );

    // Anchor at frame 40: 0.5 s early at 30 fps shifts the start by 15 frames
    let late = vec![common::frame_word("Google", 40, 50)];
    let cues = matcher.detect("Google", 300, &images(&["google.png"]), Some(&late));
    assert_eq!(cues[0].start_frame, 25);
    assert_eq!(cues[0].end_frame, 100);

    // Anchor at frame 10: the shift would go negative, clamp to zero
    let early = vec![common::frame_word("Google", 10, 20)];
    let cues = matcher.detect("Google", 300, &images(&["google.png"]), Some(&early));
    assert_eq!(cues[0].start_frame, 0);
}

/// One image matching two phrases keeps only the first dictionary phrase,
/// regardless of which match comes earlier in time
#[test]
fn test_detect_withDuplicateMatches_shouldKeepFirstDictionaryPhrase() {
    let matcher = matcher(vec![entry("warren.jpg", &["inversores", "Warren"])]);
    let frame_words = vec![
        common::frame_word("Warren", 0, 5),
        common::frame_word("inversores", 50, 60),
    ];

    let cues = matcher.detect(
        "Warren inversores",
        300,
        &images(&["warren.jpg"]),
        Some(&frame_words),
    );

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].keyword, "inversores");
    assert_eq!(cues[0].start_frame, 50);
}

/// A phrase hitting at several window positions keeps the first hit in scan order
#[test]
fn test_detect_withRepeatedWord_shouldKeepFirstScanHit() {
    let matcher = matcher(vec![entry("warren.jpg", &["Buffett"])]);
    let frame_words = vec![
        common::frame_word("Buffett", 10, 20),
        common::frame_word("habla", 25, 30),
        common::frame_word("Buffett", 90, 100),
    ];

    let cues = matcher.detect(
        "Buffett habla Buffett",
        300,
        &images(&["warren.jpg"]),
        Some(&frame_words),
    );

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_frame, 10);
}

/// Fallback mode interpolates proportionally over the word count
#[test]
fn test_detect_withFallbackTiming_shouldInterpolateProportionally() {
    let matcher = matcher(vec![entry("img.png", &["b c"])]);

    let cues = matcher.detect("a b c d", 40, &images(&["img.png"]), None);

    // 4 words over 40 frames: 10 frames per word; match at word index 1,
    // phrase token count 2 -> end = floor((1 + 4) * 10) clamped to 40
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_frame, 10);
    assert_eq!(cues[0].end_frame, 40);
}

/// Fallback matching is case-insensitive
#[test]
fn test_detect_withFallbackCaseDifference_shouldStillMatch() {
    let matcher = matcher(vec![entry("warren.jpg", &["warren buffett"])]);

    let cues = matcher.detect(
        "En 2024 Warren Buffett logró mucho",
        120,
        &images(&["warren.jpg"]),
        None,
    );

    assert_eq!(cues.len(), 1);
    // 6 words over 120 frames: 20 frames per word; match at word index 2
    assert_eq!(cues[0].start_frame, 40);
    assert_eq!(cues[0].end_frame, 120);
}

/// An empty frame word sequence behaves like absent timing
#[test]
fn test_detect_withEmptyFrameWords_shouldFallBackToProportionalTiming() {
    let matcher = matcher(vec![entry("img.png", &["b c"])]);

    let with_none = matcher.detect("a b c d", 40, &images(&["img.png"]), None);
    let with_empty = matcher.detect("a b c d", 40, &images(&["img.png"]), Some(&[]));

    assert_eq!(with_none, with_empty);
}

/// Absent inputs yield empty results, never failures
#[test]
fn test_detect_withEmptyTranscript_shouldReturnEmpty() {
    let matcher = matcher(vec![entry("img.png", &["algo"])]);

    assert!(matcher.detect("", 100, &images(&["img.png"]), None).is_empty());
    assert!(matcher.detect("   ", 100, &images(&["img.png"]), None).is_empty());
}

/// Images without dictionary entries contribute zero candidates
#[test]
fn test_detect_withImageMissingFromDictionary_shouldContributeNothing() {
    let matcher = matcher(vec![entry("known.png", &["hola"])]);
    let frame_words = vec![common::frame_word("hola", 0, 10)];

    let cues = matcher.detect(
        "hola",
        100,
        &images(&["unknown.png", "known.png"]),
        Some(&frame_words),
    );

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].image_path, "known.png");
}

/// No matching phrase, no cue
#[test]
fn test_detect_withNoMatch_shouldReturnEmpty() {
    let matcher = matcher(vec![entry("img.png", &["ausente"])]);
    let frame_words = vec![common::frame_word("hola", 0, 10)];

    assert!(matcher
        .detect("hola", 100, &images(&["img.png"]), Some(&frame_words))
        .is_empty());
}

/// Repeated invocation with identical input is deterministic
#[test]
fn test_detect_withRepeatedInvocation_shouldBeDeterministic() {
    let matcher = matcher(vec![
        entry("a.png", &["uno", "dos"]),
        entry("b.png", &["tres"]),
    ]);
    let frame_words = vec![
        common::frame_word("uno", 0, 5),
        common::frame_word("dos", 10, 15),
        common::frame_word("tres", 20, 25),
    ];
    let candidates = images(&["a.png", "b.png"]);

    let first = matcher.detect("uno dos tres", 300, &candidates, Some(&frame_words));
    let second = matcher.detect("uno dos tres", 300, &candidates, Some(&frame_words));

    assert_eq!(first, second);
}

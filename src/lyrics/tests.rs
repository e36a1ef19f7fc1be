use super::*;
use std::fs;
use tempfile::tempdir;

fn entries(lines: &[(u64, &str)]) -> Vec<LyricEntry> {
    lines.iter().map(|&(ms, text)| LyricEntry::new(ms, text)).collect()
}

fn default_encodings() -> Vec<String> {
    crate::config::LyricsSettings::default().encodings
}

#[test]
fn parse_reads_single_tag_lines() {
    let parsed = parse("[00:12.34]Hello world\n[01:02.50]Second");
    assert_eq!(
        parsed,
        entries(&[(12_340, "Hello world"), (62_500, "Second")])
    );
}

#[test]
fn parse_accepts_tags_without_fraction() {
    let parsed = parse("[02:03]No fraction");
    assert_eq!(parsed, entries(&[(123_000, "No fraction")]));
}

#[test]
fn parse_skips_free_text_between_valid_lines() {
    let parsed = parse("not a tag\n[00:01.00]Hello\nmore noise");
    assert_eq!(parsed, entries(&[(1000, "Hello")]));
}

#[test]
fn parse_ignores_metadata_and_blank_lines() {
    let input = "\n[ti:Song]\n[ar:Artist]\n\n[offset:0]\n[00:05.00]Line\n   \n";
    assert_eq!(parse(input), entries(&[(5000, "Line")]));
}

#[test]
fn parse_expands_multi_tag_lines_and_sorts() {
    let input = "[00:10.00]Verse\n[00:05.00][00:15.00]Chorus";
    let parsed = parse(input);
    assert_eq!(
        parsed,
        entries(&[(5000, "Chorus"), (10_000, "Verse"), (15_000, "Chorus")])
    );
}

#[test]
fn parse_keeps_encounter_order_on_equal_timestamps() {
    let input = "[00:03.00]first\n[00:01.00]early\n[00:03.00]second";
    let parsed = parse(input);
    assert_eq!(
        parsed,
        entries(&[(1000, "early"), (3000, "first"), (3000, "second")])
    );
}

#[test]
fn parse_skips_malformed_tags_individually() {
    let input = "[00:01.00][xx:yy]Kept\n[aa:bb]Dropped\n[00:02.123]Too precise\n[-1:00]Negative";
    assert_eq!(parse(input), entries(&[(1000, "Kept")]));
}

#[test]
fn parse_trims_text_and_keeps_empty_text_lines() {
    let parsed = parse("  [00:01.00]   padded  \n[00:02.00]");
    assert_eq!(parsed, entries(&[(1000, "padded"), (2000, "")]));
}

#[test]
fn parse_reads_single_digit_fraction_as_centiseconds() {
    assert_eq!(parse("[00:01.5]x"), entries(&[(1050, "x")]));
}

#[test]
fn parse_handles_cjk_text() {
    assert_eq!(parse("[00:05.00]你好世界"), entries(&[(5000, "你好世界")]));
}

#[test]
fn parsed_output_is_sorted_and_tags_round_trip() {
    let input = "[03:59.99]d\n[00:00.00]a\n[01:02.50]c\n[00:30.01]b\n[12:00.10]e";
    let parsed = parse(input);

    assert!(parsed.windows(2).all(|w| w[0].timestamp_ms <= w[1].timestamp_ms));

    let tags: Vec<String> = parsed.iter().map(LyricEntry::tag).collect();
    assert_eq!(
        tags,
        vec!["00:00.00", "00:30.01", "01:02.50", "03:59.99", "12:00.10"]
    );
}

#[test]
fn every_well_formed_tag_survives_parse_and_format() {
    for minutes in 0..3u64 {
        for seconds in 0..60u64 {
            for centis in 0..100u64 {
                let tag = format!("{minutes:02}:{seconds:02}.{centis:02}");
                let parsed = parse(&format!("[{tag}]line"));
                assert_eq!(parsed.len(), 1, "{tag}");
                assert_eq!(
                    parsed[0].timestamp_ms,
                    minutes * 60_000 + seconds * 1000 + centis * 10
                );
                assert_eq!(parsed[0].tag(), tag);
            }
        }
    }
}

#[test]
fn format_time_tag_truncates_below_centiseconds() {
    assert_eq!(format_time_tag(62_509), "01:02.50");
    assert_eq!(format_time_tag(0), "00:00.00");
}

#[test]
fn resolve_matches_reference_scenario() {
    let e = entries(&[(0, "A"), (2000, "B"), (5000, "C")]);
    assert_eq!(LyricCursor::resolve(&e, 1000, None), Some(0));
    assert_eq!(LyricCursor::resolve(&e, 2000, None), Some(1));
    assert_eq!(LyricCursor::resolve(&e, 9000, None), Some(2));
    assert_eq!(LyricCursor::resolve(&e, -1, None), None);
}

#[test]
fn resolve_is_none_before_first_entry() {
    let e = entries(&[(1500, "A"), (3000, "B")]);
    assert_eq!(LyricCursor::resolve(&e, 0, None), None);
    assert_eq!(LyricCursor::resolve(&e, 1499, None), None);
    assert_eq!(LyricCursor::resolve(&e, 1500, None), Some(0));
    assert_eq!(LyricCursor::resolve(&[], 1500, None), None);
}

#[test]
fn resolve_ignores_hint_for_the_result() {
    let e = entries(&[(0, "A"), (1000, "B"), (1000, "B2"), (4000, "C"), (8000, "D")]);
    for position in [-5, 0, 999, 1000, 3999, 4000, 7999, 8000, 100_000] {
        let expected = LyricCursor::resolve(&e, position, None);
        for hint in [None, Some(0), Some(1), Some(2), Some(3), Some(4), Some(99)] {
            assert_eq!(
                LyricCursor::resolve(&e, position, hint),
                expected,
                "position {position} hint {hint:?}"
            );
        }
    }
}

#[test]
fn resolve_picks_last_of_equal_timestamps() {
    let e = entries(&[(1000, "A"), (1000, "B"), (2000, "C")]);
    assert_eq!(LyricCursor::resolve(&e, 1500, None), Some(1));
}

#[test]
fn resolve_is_idempotent_and_monotonic() {
    let e = entries(&[(500, "A"), (1200, "B"), (1300, "C"), (4000, "D")]);
    let mut last: Option<usize> = None;
    for position in (0..6000).step_by(37) {
        let once = LyricCursor::resolve(&e, position, last);
        let twice = LyricCursor::resolve(&e, position, once);
        assert_eq!(once, twice);
        assert!(once >= last, "index went backwards at {position}");
        last = once;
    }
    assert_eq!(last, Some(3));
}

#[test]
fn cursor_reports_only_transitions() {
    let e = entries(&[(0, "A"), (2000, "B")]);
    let mut cursor = LyricCursor::new();

    assert!(cursor.advance(&e, 100));
    assert_eq!(cursor.current(), Some(0));
    assert!(!cursor.advance(&e, 200));
    assert!(!cursor.advance(&e, 1999));
    assert!(cursor.advance(&e, 2000));
    assert_eq!(cursor.current(), Some(1));
    assert!(!cursor.advance(&e, 50_000));

    cursor.reset();
    assert_eq!(cursor.current(), None);
    assert!(!cursor.advance(&[], 10));
}

#[test]
fn load_for_reads_sidecar_next_to_audio_file() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("song.mp3");
    fs::write(dir.path().join("song.lrc"), "[00:01.00]Hello\n[00:03.00]World").unwrap();

    let track = LyricTrack::load_for(&audio, &default_encodings());
    assert_eq!(track.len(), 2);
    assert_eq!(track.get(1).unwrap().text, "World");
}

#[test]
fn load_for_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let track = LyricTrack::load_for(&dir.path().join("silent.mp3"), &default_encodings());
    assert!(track.is_empty());
}

#[test]
fn load_for_strips_utf8_bom() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("bom.mp3");
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice("[00:01.00]Hi".as_bytes());
    fs::write(sidecar_path(&audio), bytes).unwrap();

    let track = LyricTrack::load_for(&audio, &default_encodings());
    assert_eq!(track.entries(), &entries(&[(1000, "Hi")])[..]);
}

#[test]
fn load_for_falls_back_to_gbk() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("zh.mp3");
    // "[00:01.00]周杰伦" with the name encoded as GBK.
    let mut bytes = b"[00:01.00]".to_vec();
    bytes.extend_from_slice(&[0xD6, 0xDC, 0xBD, 0xDC, 0xC2, 0xD7]);
    fs::write(sidecar_path(&audio), bytes).unwrap();

    let track = LyricTrack::load_for(&audio, &default_encodings());
    assert_eq!(track.entries(), &entries(&[(1000, "周杰伦")])[..]);
}

#[test]
fn load_for_gives_up_when_no_encoding_fits() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("bad.mp3");
    fs::write(sidecar_path(&audio), [b'[', 0xFF, 0xFE, b']']).unwrap();

    let only_utf8 = vec!["utf-8".to_string()];
    assert!(LyricTrack::load_for(&audio, &only_utf8).is_empty());
}

#[test]
fn unknown_encoding_labels_are_skipped() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("x.mp3");
    fs::write(sidecar_path(&audio), "[00:02.00]ok").unwrap();

    let labels = vec!["no-such-charset".to_string(), "utf-8".to_string()];
    assert_eq!(LyricTrack::load_for(&audio, &labels).len(), 1);
}

#[test]
fn missing_file_error_is_reported_as_missing() {
    let err = std::fs::read("/definitely/not/here.lrc")
        .map_err(|source| LyricsError::Io {
            path: "/definitely/not/here.lrc".into(),
            source,
        })
        .unwrap_err();
    assert!(err.is_missing());
    assert!(!LyricsError::Undecodable { path: "x".into() }.is_missing());
}

//! Line-oriented LRC parser.
//!
//! Only lines starting with `[` that carry at least one well-formed
//! `mm:ss` / `mm:ss.xx` tag contribute entries. Metadata tags such as
//! `[ar:...]`, blank lines and free text are ignored. A malformed tag is
//! skipped on its own; the remaining tags of the line still count.

use super::model::LyricEntry;

/// Parse lyric text into entries sorted ascending by timestamp.
///
/// Several leading tags on one line produce one entry each, all sharing
/// the line's text. Ties keep their encounter order.
pub fn parse(content: &str) -> Vec<LyricEntry> {
    let mut entries = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if !line.starts_with('[') {
            continue;
        }

        let (stamps, text) = split_leading_tags(line);
        for ms in stamps {
            entries.push(LyricEntry::new(ms, text));
        }
    }

    // `sort_by_key` is stable, which preserves encounter order on ties.
    entries.sort_by_key(|e| e.timestamp_ms);
    entries
}

/// Split `[t1][t2]text` into the parsed timestamps and the trimmed text.
fn split_leading_tags(line: &str) -> (Vec<u64>, &str) {
    let mut stamps = Vec::new();
    let mut rest = line;

    while let Some(inner) = rest.trim_start().strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            break;
        };
        if let Some(ms) = parse_time_tag(&inner[..close]) {
            stamps.push(ms);
        }
        rest = &inner[close + 1..];
    }

    (stamps, rest.trim())
}

/// Parse the inside of a time tag: `mm:ss` or `mm:ss.xx`.
///
/// The fraction holds one or two digits and is read as centiseconds.
pub(super) fn parse_time_tag(tag: &str) -> Option<u64> {
    let (minutes, rest) = tag.split_once(':')?;
    let (seconds, fraction) = match rest.split_once('.') {
        Some((seconds, fraction)) => (seconds, Some(fraction)),
        None => (rest, None),
    };

    let minutes = digits(minutes)?;
    let seconds = digits(seconds)?;
    let centis = match fraction {
        None => 0,
        Some(f) if (1..=2).contains(&f.len()) => digits(f)?,
        Some(_) => return None,
    };

    minutes
        .checked_mul(60_000)?
        .checked_add(seconds.checked_mul(1000)?)?
        .checked_add(centis * 10)
}

fn digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

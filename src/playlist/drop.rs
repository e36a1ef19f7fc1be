//! Turning dropped files into playlist candidates.
//!
//! Terminals deliver a file drop as pasted text: one path per line,
//! shell-quoted paths separated by spaces, or `file://` URIs depending on
//! the emulator. All three forms are accepted. An unquoted line is one
//! path unless it visibly holds several absolute paths.

use std::path::Path;

/// Split pasted drop text into individual paths.
pub fn dropped_paths(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if is_single_path(line) {
                vec![line.to_string()]
            } else {
                split_words(line)
            }
        })
        .filter_map(|word| normalize(&word))
        .collect()
}

/// True if `path` has the accepted audio extension (case-insensitive,
/// with or without a leading dot in `extension`).
pub fn accepts_extension(path: &str, extension: &str) -> bool {
    let wanted = extension.trim().trim_start_matches('.');
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| !wanted.is_empty() && e.eq_ignore_ascii_case(wanted))
}

/// Resolve `path` against the working directory, as stored playlist lines
/// are absolute. `None` if that fails or the result is not UTF-8.
pub fn absolute_path(path: &str) -> Option<String> {
    std::path::absolute(path)
        .ok()?
        .into_os_string()
        .into_string()
        .ok()
}

fn is_single_path(line: &str) -> bool {
    !line.contains(['\'', '"', '\\'])
        && !line.trim().contains(" /")
        && !line.trim().contains(" file://")
}

/// Shell-style word splitting: whitespace separates, quotes group,
/// backslash escapes the next character outside single quotes.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => word.push(c),
            (_, '\\') => {
                if let Some(escaped) = chars.next() {
                    word.push(escaped);
                }
                in_word = true;
            }
            (Some(_), c) => word.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            (None, c) => {
                word.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(word);
    }
    words
}

fn normalize(word: &str) -> Option<String> {
    let word = word.trim();
    if word.is_empty() {
        return None;
    }
    match word.strip_prefix("file://") {
        Some(rest) => urlencoding::decode(rest).ok().map(|s| s.into_owned()),
        None => Some(word.to_string()),
    }
}

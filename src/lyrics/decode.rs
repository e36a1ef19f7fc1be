//! Character-set fallback for lyric files.
//!
//! Lyric files found in the wild are frequently GBK or Latin-1 rather
//! than UTF-8. Candidates are tried in the configured order and the first
//! one that decodes without a single malformed sequence wins.

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode `bytes` with the first label in `labels` that accepts them.
///
/// Labels use WHATWG names (`utf-8`, `gbk`, `gb2312`, `latin1`, ...).
/// Unknown labels are skipped with a warning.
pub(super) fn decode_first(bytes: &[u8], labels: &[String]) -> Option<String> {
    for label in labels {
        let Some(encoding) = Encoding::for_label(label.trim().as_bytes()) else {
            warn!(label = %label, "unknown lyric encoding label");
            continue;
        };

        let body = if encoding == UTF_8 {
            bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
        } else {
            bytes
        };

        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(body) {
            debug!(encoding = encoding.name(), "decoded lyric file");
            return Some(text.into_owned());
        }
    }
    None
}

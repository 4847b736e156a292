//! Cleanup of model output before display.
//!
//! Batch completions echo the prompt back, so the generated continuation is
//! cut out of them and tidied. Streamed chunks are only decoded: emphasis
//! spans can straddle chunk boundaries, so they are left alone there.

use std::sync::LazyLock;

use futures_util::stream::{BoxStream, StreamExt};
use regex::Regex;
use tracing::warn;

use crate::{AiError, ChunkStream};

/// Speaker tag the prompt ends with; the reply follows the last one.
pub const BOT_MARKER: &str = "Bot:";

/// Emitted by lossy decoding when a chunk splits a multi-byte character.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*[^*]+\*").unwrap());
static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

fn after_last<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    if marker.is_empty() {
        return None;
    }
    text.rsplit_once(marker).map(|(_, tail)| tail)
}

/// Extract the generated reply from a full completion.
///
/// Keeps what follows the last `closing_marker`, then what follows the last
/// `Bot:`, drops `*emphasis*` spans and collapses whitespace runs. Missing
/// markers fall back to the whole text.
pub fn normalize_batch_response(raw: &str, closing_marker: &str) -> String {
    let text = after_last(raw, closing_marker).unwrap_or_else(|| {
        warn!(marker = closing_marker, "completion has no closing marker, keeping whole text");
        raw
    });
    let text = after_last(text, BOT_MARKER).unwrap_or(text);
    let text = text.trim_start();
    let text = EMPHASIS_RE.replace_all(text, "");
    let text = WHITESPACE_RUN_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Decode one streamed chunk and drop replacement characters.
///
/// Returns `None` when nothing is left, so empty chunks are never forwarded.
pub fn normalize_stream_chunk(chunk: &[u8]) -> Option<String> {
    let decoded = String::from_utf8_lossy(chunk);
    let cleaned: String = decoded.chars().filter(|&c| c != REPLACEMENT_CHAR).collect();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Lazily clean a chunk stream. Order is preserved and errors pass through.
pub fn normalize_stream(chunks: ChunkStream) -> BoxStream<'static, Result<String, AiError>> {
    chunks
        .filter_map(|item| {
            futures_util::future::ready(match item {
                Ok(bytes) => normalize_stream_chunk(&bytes).map(Ok),
                Err(e) => Some(Err(e)),
            })
        })
        .boxed()
}

use tracing::debug;
use wiretrace_types::{Usage, char_len};

use crate::openai::schema::CompletionChunk;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

/// Assistant output reconstructed from streamed fragments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedStream {
    /// Delta contents concatenated in arrival order
    pub generated_text: String,
    /// Number of fragments supplied, qualifying or not
    pub total_chunks: usize,
    /// Length of `generated_text` in characters
    pub total_content_length: usize,
    /// Usage block of the last fragment that reported one
    pub usage: Option<Usage>,
}

/// Decode an ordered sequence of SSE fragments
///
/// Only `data: ` lines other than `data: [DONE]` are considered. A fragment
/// holding several newline-separated lines is decoded line by line. Lines that
/// are not valid JSON objects are skipped; they never abort the reconstruction.
pub fn decode_stream<S: AsRef<str>>(fragments: &[S]) -> DecodedStream {
    let mut generated_text = String::new();
    let mut usage = None;

    for (index, fragment) in fragments.iter().enumerate() {
        for line in fragment.as_ref().lines() {
            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                continue;
            };
            if payload.trim() == DONE_SENTINEL {
                continue;
            }

            let chunk = match serde_json::from_str::<CompletionChunk>(payload) {
                Ok(chunk) => chunk,
                Err(err) => {
                    debug!(fragment = index, error = %err, "skipping malformed SSE fragment");
                    continue;
                }
            };

            if let Some(content) = chunk.delta_content() {
                generated_text.push_str(&content);
            }
            if let Some(reported) = chunk.usage {
                usage = Some(reported.into_usage());
            }
        }
    }

    DecodedStream {
        total_content_length: char_len(&generated_text),
        generated_text,
        total_chunks: fragments.len(),
        usage,
    }
}

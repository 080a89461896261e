//! Text segmentation — turns a page's text fragments into context chunks.

use crate::ports::page::TextFragment;

/// Default chunk cap in characters.
pub const DEFAULT_CHUNK_CAP: usize = 500;

/// A bounded slice of page text, the unit the pattern matcher scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Accumulated fragment text, single-space joined.
    pub text: String,
    /// Source identity of the chunk's first fragment.
    pub source_ref: String,
}

/// Accumulates fragments into chunks of at most `cap` characters.
///
/// Non-content fragments are excluded before accumulation, fragment text is
/// trimmed, and empties are skipped. A chunk boundary never splits inside a
/// fragment, so a single fragment longer than `cap` becomes its own
/// over-cap chunk. The final partial accumulation is flushed as the last
/// chunk.
#[must_use]
pub fn segment(fragments: &[TextFragment], cap: usize) -> Vec<TextChunk> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_ref = String::new();

    for fragment in fragments {
        if !fragment.is_content {
            continue;
        }
        let text = fragment.text.trim();
        if text.is_empty() {
            continue;
        }
        if current.is_empty() {
            current.push_str(text);
            current_ref = fragment.source_ref.clone();
        } else if current.len() + 1 + text.len() > cap {
            chunks.push(TextChunk { text: std::mem::take(&mut current), source_ref: current_ref });
            current.push_str(text);
            current_ref = fragment.source_ref.clone();
        } else {
            current.push(' ');
            current.push_str(text);
        }
    }

    if !current.is_empty() {
        chunks.push(TextChunk { text: current, source_ref: current_ref });
    }

    chunks
}

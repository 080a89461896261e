//! Task synthesis — turns a match plus a normalized date into a candidate
//! task.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::dates::NormalizedDate;
use super::patterns::RawMatch;
use crate::ports::id_gen::IdGenerator;
use crate::task::{Priority, Status, Task};

/// Title used when no task keyword anchors the matching sentence.
///
/// A generic title is an acceptable degraded result, never an error; the
/// heuristic favors precision over recall.
pub const GENERIC_TITLE: &str = "Detected Task";

/// Task nouns used for title anchoring and tag extraction.
pub const TASK_KEYWORDS: [&str; 21] = [
    "assignment",
    "homework",
    "project",
    "essay",
    "paper",
    "report",
    "submission",
    "task",
    "quiz",
    "exam",
    "test",
    "presentation",
    "lab",
    "workshop",
    "meeting",
    "conference",
    "interview",
    "application",
    "registration",
    "payment",
    "renewal",
];

/// Page metadata attached to detected tasks.
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    /// URL of the page the text came from.
    pub url: Option<String>,
    /// Title of the page.
    pub title: String,
}

/// Builds a candidate task from a raw match and its normalized date.
///
/// Returns `None` when the deadline is strictly before `now` — past
/// deadlines are not surfaced as new detections. `deadline == now` is kept
/// (inclusive boundary).
pub fn synthesize(
    raw: &RawMatch,
    date: &NormalizedDate,
    page: &PageMeta,
    now: DateTime<Utc>,
    id_gen: &dyn IdGenerator,
) -> Option<Task> {
    if date.timestamp < now {
        return None;
    }

    Some(Task {
        id: id_gen.generate_id(),
        title: extract_title(&raw.full_match, &raw.context),
        description: raw.full_match.clone(),
        deadline: date.timestamp,
        priority: Priority::classify(date.timestamp, now),
        status: Status::Pending,
        tags: extract_tags(&raw.context),
        source_url: page.url.clone(),
        context: raw.context.trim().to_string(),
        detected_at: now,
        created_at: now,
        completed_at: None,
    })
}

/// Derives a title from the sentence containing the match.
///
/// Splits the context into sentence-like segments on `.`, `!`, `?`, picks
/// the segment containing the full match, and — only when that segment
/// holds a task keyword — takes its first eight words with punctuation
/// stripped. Anything else falls back to [`GENERIC_TITLE`].
fn extract_title(full_match: &str, context: &str) -> String {
    let Some(sentence) = context
        .split(['.', '!', '?'])
        .find(|segment| segment.contains(full_match))
    else {
        return GENERIC_TITLE.to_string();
    };

    let lowered = sentence.to_lowercase();
    if !TASK_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return GENERIC_TITLE.to_string();
    }

    let words: Vec<&str> = sentence.split_whitespace().take(8).collect();
    let title: String = words
        .join(" ")
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    let title = title.trim().to_string();
    if title.is_empty() {
        GENERIC_TITLE.to_string()
    } else {
        title
    }
}

/// Collects the task keywords present anywhere in the context window.
fn extract_tags(context: &str) -> BTreeSet<String> {
    let lowered = context.to_lowercase();
    TASK_KEYWORDS
        .iter()
        .filter(|kw| lowered.contains(**kw))
        .map(|kw| (*kw).to_string())
        .collect()
}

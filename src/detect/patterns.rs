//! Deadline phrase templates and the chunk matcher.
//!
//! Templates are a declarative ordered list of tagged variants so precedence
//! is explicit and testable in isolation. Every template runs against every
//! chunk; overlapping hits from different templates are all retained — the
//! reconciler collapses near-duplicates, not the matcher.

use once_cell::sync::Lazy;
use regex::Regex;

use super::segment::TextChunk;

/// A date expression in one of the supported grammars: `Month Day[, Year]`,
/// `M/D[/Y]`, `YYYY-MM-DD`, `Day Month[ Year]`.
const DATE_EXPR: &str = r"[A-Za-z]+\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}|\d{1,2}/\d{1,2}(?:/\d{2,4})?|\d{4}-\d{2}-\d{2}|[A-Za-z]+\s+\d{1,2}(?:st|nd|rd|th)?|\d{1,2}\s+[A-Za-z]+(?:\s+\d{4})?";

/// Deadline/submission trigger words.
const TRIGGERS: &str = r"deadline|due(?:\s+date)?|submit(?:\s+by)?|expires?(?:\s+on)?|until|before|by";

/// Task nouns that introduce a due-trigger ("assignment due ...", "exam on ...").
const TASK_NOUNS: &str =
    r"assignment|homework|project|essay|paper|report|submission|task|quiz|exam|test";

/// Which template produced a match; decides capture-group meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Trigger word followed by a date expression.
    Trigger,
    /// Task noun, then a due-trigger, then a date expression.
    TaskNoun,
    /// `by|before|until HH:MM on <date>` — yields a time and a date.
    TimeAndDate,
    /// Trigger word followed by a relative phrase, optionally `at <time>`.
    RelativePhrase,
}

/// One phrase template in the ordered set.
pub struct Template {
    /// Variant tag controlling capture-group interpretation.
    pub kind: TemplateKind,
    /// Compiled pattern.
    pub pattern: Regex,
}

/// The fixed, ordered template set.
pub static TEMPLATES: Lazy<Vec<Template>> = Lazy::new(|| {
    vec![
        Template {
            kind: TemplateKind::Trigger,
            pattern: Regex::new(&format!(r"(?i)(?:{TRIGGERS})\s*:?\s*({DATE_EXPR})"))
                .expect("trigger template"),
        },
        Template {
            kind: TemplateKind::TaskNoun,
            pattern: Regex::new(&format!(
                r"(?i)(?:{TASK_NOUNS})\s+(?:due|deadline|submit|on)\s*:?\s*({DATE_EXPR})"
            ))
            .expect("task-noun template"),
        },
        Template {
            kind: TemplateKind::TimeAndDate,
            pattern: Regex::new(&format!(
                r"(?i)(?:by|before|until)\s+(\d{{1,2}}:\d{{2}}\s*(?:am|pm)?)\s+on\s+({DATE_EXPR})"
            ))
            .expect("time+date template"),
        },
        Template {
            kind: TemplateKind::RelativePhrase,
            pattern: Regex::new(&format!(
                r"(?i)(?:{TRIGGERS})\s+(tomorrow|next\s+week|next\s+month|end\s+of\s+(?:the\s+)?week|end\s+of\s+(?:the\s+)?month)(?:\s+at\s+(\d{{1,2}}(?::\d{{2}})?\s*(?:am|pm)?))?"
            ))
            .expect("relative-phrase template"),
        },
    ]
});

static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)(?:st|nd|rd|th)").expect("ordinal regex"));

/// A single pattern hit inside one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// The whole matched phrase.
    pub full_match: String,
    /// The date substring, ordinal suffixes already stripped.
    pub date_text: String,
    /// The time substring, when the template captured one.
    pub time_text: Option<String>,
    /// The chunk text the match was found in.
    pub context: String,
    /// Source identity carried over from the chunk.
    pub source_ref: String,
}

/// Strips ordinal suffixes ("15th" -> "15") from a date substring.
#[must_use]
pub fn strip_ordinals(text: &str) -> String {
    ORDINAL_SUFFIX.replace_all(text, "$1").into_owned()
}

/// Runs every template over the chunk and returns all hits.
///
/// A chunk with no trigger match yields an empty vec; that is the common
/// case, not an error.
#[must_use]
pub fn find_matches(chunk: &TextChunk) -> Vec<RawMatch> {
    let mut matches = Vec::new();
    for template in TEMPLATES.iter() {
        for caps in template.pattern.captures_iter(&chunk.text) {
            let (date, time) = match template.kind {
                TemplateKind::Trigger | TemplateKind::TaskNoun => {
                    (caps.get(1).map(|m| m.as_str()), None)
                }
                TemplateKind::TimeAndDate => {
                    (caps.get(2).map(|m| m.as_str()), caps.get(1).map(|m| m.as_str()))
                }
                TemplateKind::RelativePhrase => {
                    (caps.get(1).map(|m| m.as_str()), caps.get(2).map(|m| m.as_str()))
                }
            };
            let Some(date) = date else { continue };
            matches.push(RawMatch {
                full_match: caps[0].to_string(),
                date_text: strip_ordinals(date),
                time_text: time.map(String::from),
                context: chunk.text.clone(),
                source_ref: chunk.source_ref.clone(),
            });
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> TextChunk {
        TextChunk { text: text.into(), source_ref: "p".into() }
    }

    fn all(text: &str) -> Vec<RawMatch> {
        find_matches(&chunk(text))
    }

    #[test]
    fn trigger_with_month_day_year() {
        let matches = all("Submit assignment by Oct 15, 2025 please");
        assert!(matches.iter().any(|m| m.date_text == "Oct 15, 2025"));
    }

    #[test]
    fn trigger_with_slash_date_without_year() {
        let matches = all("report due 11/03");
        assert!(matches.iter().any(|m| m.date_text == "11/03"));
    }

    #[test]
    fn trigger_with_iso_date() {
        let matches = all("Registration closes: deadline 2025-09-10.");
        assert!(matches.iter().any(|m| m.date_text == "2025-09-10"));
    }

    #[test]
    fn trigger_with_day_month() {
        let matches = all("entries accepted until 15 October 2025");
        assert!(matches.iter().any(|m| m.date_text == "15 October 2025"));
    }

    #[test]
    fn task_noun_followed_by_on() {
        let matches = all("Exam on 2025-05-01 in room 204");
        let hit = matches.iter().find(|m| m.date_text == "2025-05-01").unwrap();
        assert!(hit.full_match.starts_with("Exam on"));
    }

    #[test]
    fn time_and_date_captures_both_substrings() {
        let matches = all("upload everything before 17:00 on 2025-06-01");
        let hit = matches
            .iter()
            .find(|m| m.time_text.as_deref() == Some("17:00"))
            .expect("time+date hit");
        assert_eq!(hit.date_text, "2025-06-01");
    }

    #[test]
    fn time_and_date_accepts_yearless_dates() {
        let matches = all("submit by 5:00pm on Oct 15");
        let hit = matches
            .iter()
            .find(|m| m.time_text.as_deref() == Some("5:00pm"))
            .expect("time+date hit");
        assert_eq!(hit.date_text, "Oct 15");
    }

    #[test]
    fn relative_phrase_with_time() {
        let matches = all("the essay is due tomorrow at 5pm");
        let hit = matches.iter().find(|m| m.date_text.eq_ignore_ascii_case("tomorrow")).unwrap();
        assert_eq!(hit.time_text.as_deref(), Some("5pm"));
    }

    #[test]
    fn ordinal_suffix_is_stripped() {
        let matches = all("due date: March 3rd, 2026");
        assert!(matches.iter().any(|m| m.date_text == "March 3, 2026"));
    }

    #[test]
    fn overlapping_templates_both_fire() {
        // "due 11/03" (trigger) and "report due 11/03" (task noun) overlap;
        // both are retained for the reconciler to collapse.
        let matches = all("report due 11/03");
        assert!(matches.len() >= 2);
    }

    #[test]
    fn chunk_without_trigger_yields_nothing() {
        assert!(all("nothing to see here, just prose from 1999").is_empty());
    }

    #[test]
    fn context_and_source_ref_are_carried_over() {
        let c = TextChunk { text: "submit by Oct 15".into(), source_ref: "#main".into() };
        let matches = find_matches(&c);
        assert_eq!(matches[0].context, "submit by Oct 15");
        assert_eq!(matches[0].source_ref, "#main");
    }
}

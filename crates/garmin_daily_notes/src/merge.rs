//! Merging a rendered data section into a daily note.
//!
//! The merge never touches text outside the generated section. A section runs
//! from its `## Garmin Data` marker through the newline that precedes the next
//! `## ` heading, or to the end of the document when no heading follows.

use chrono::NaiveDate;
use serde::Serialize;

use crate::render::SECTION_MARKER;
use crate::vault::note_title;

const NEXT_HEADING: &str = "\n## ";

/// How a merge changed the note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeAction {
    /// The note did not exist and was created.
    Created,
    /// The note had no data section; one was appended.
    Appended,
    /// An existing data section was replaced.
    Replaced,
}

impl std::fmt::Display for MergeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MergeAction::Created => "created",
            MergeAction::Appended => "appended",
            MergeAction::Replaced => "replaced",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Merged {
    pub content: String,
    pub action: MergeAction,
}

/// Merge `section` into `existing`, the current text of the note for `date`.
///
/// Every earlier data section is dropped, so the result holds exactly one.
pub fn merge_section(existing: Option<&str>, section: &str, date: NaiveDate) -> Merged {
    let Some(content) = existing else {
        return Merged {
            content: format!("# {}\n\n{section}", note_title(date)),
            action: MergeAction::Created,
        };
    };

    let Some(start) = content.find(SECTION_MARKER) else {
        return Merged {
            content: format!("{content}\n{section}"),
            action: MergeAction::Appended,
        };
    };

    let tail = strip_sections(&content[section_tail(content, start)..]);
    let mut merged = String::with_capacity(content.len() + section.len());
    merged.push_str(&content[..start]);
    merged.push_str(section);
    if !tail.is_empty() && !section.ends_with('\n') {
        merged.push('\n');
    }
    merged.push_str(&tail);

    Merged {
        content: merged,
        action: MergeAction::Replaced,
    }
}

/// Byte offset of the first retained byte after the section whose marker sits
/// at `start`: the next top-level heading, or the end of `content`.
fn section_tail(content: &str, start: usize) -> usize {
    let from = start + 1;
    content[from..]
        .find(NEXT_HEADING)
        .map(|offset| from + offset + 1)
        .unwrap_or(content.len())
}

/// Offset of the first line of `text` that is exactly the section heading.
fn find_heading_line(text: &str) -> Option<usize> {
    text.match_indices(SECTION_MARKER).map(|(idx, _)| idx).find(|&idx| {
        let line_start = idx == 0 || text[..idx].ends_with('\n');
        let rest = &text[idx + SECTION_MARKER.len()..];
        line_start && (rest.is_empty() || rest.starts_with('\n'))
    })
}

/// Remove every data section from `text`, keeping all other content.
///
/// Only whole `## Garmin Data` heading lines start a section; subheadings and
/// prose that mention the marker are left alone.
fn strip_sections(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = find_heading_line(rest) {
        out.push_str(&rest[..start]);
        rest = &rest[section_tail(rest, start)..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW: &str = "## Garmin Data\n\nNEW\n\n";

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 27).unwrap()
    }

    #[test]
    fn missing_note_gets_title_and_section() {
        let merged = merge_section(None, NEW, day());
        assert_eq!(merged.action, MergeAction::Created);
        assert_eq!(merged.content, "# June 27, 2025\n\n## Garmin Data\n\nNEW\n\n");
        assert!(merged.content.starts_with("# "));
    }

    #[test]
    fn note_without_section_gets_appended() {
        let merged = merge_section(Some("# Title\n\nsome notes"), NEW, day());
        assert_eq!(merged.action, MergeAction::Appended);
        assert_eq!(merged.content, format!("# Title\n\nsome notes\n{NEW}"));
    }

    #[test]
    fn existing_section_is_replaced_and_following_heading_kept() {
        let doc = "# Title\n\n## Garmin Data\n\nOLD\n\n## Next\n\nkeep";
        let merged = merge_section(Some(doc), NEW, day());
        assert_eq!(merged.action, MergeAction::Replaced);
        assert_eq!(merged.content, "# Title\n\n## Garmin Data\n\nNEW\n\n## Next\n\nkeep");
    }

    #[test]
    fn trailing_section_is_replaced_to_end() {
        let doc = "# Title\n\nnotes\n## Garmin Data\n\nOLD\n- Run at 07:00 (5 min)\n";
        let merged = merge_section(Some(doc), NEW, day());
        assert_eq!(merged.content, format!("# Title\n\nnotes\n{NEW}"));
    }

    #[test]
    fn subheadings_inside_section_are_replaced() {
        let doc = "## Garmin Data\n\n### Detail\nOLD\n## Journal\nkept";
        let merged = merge_section(Some(doc), NEW, day());
        assert_eq!(merged.content, format!("{NEW}## Journal\nkept"));
    }

    #[test]
    fn merge_is_idempotent() {
        let docs = [
            None,
            Some("# Title\n\nsome notes"),
            Some("# Title\n\n## Garmin Data\n\nOLD\n\n## Next\n\nkeep"),
            Some("# Title\n\n## Garmin Data\n\nOLD\n"),
        ];
        for doc in docs {
            let once = merge_section(doc, NEW, day()).content;
            let twice = merge_section(Some(&once), NEW, day()).content;
            assert_eq!(once, twice, "not idempotent for {doc:?}");
        }
    }

    #[test]
    fn stale_duplicate_sections_are_all_removed() {
        let doc = "# Title\n\n## Garmin Data\n\nOLD1\n\n## Next\n\nkeep\n## Garmin Data\n\nOLD2\n";
        let merged = merge_section(Some(doc), NEW, day());
        assert_eq!(merged.content, format!("# Title\n\n{NEW}## Next\n\nkeep\n"));
        assert_eq!(merged.content.matches(SECTION_MARKER).count(), 1);
    }

    #[test]
    fn duplicate_between_headings_is_removed_and_tail_kept() {
        let doc = "## Garmin Data\nA\n## Mid\nm\n## Garmin Data\nB\n## End\ne";
        let merged = merge_section(Some(doc), NEW, day());
        assert_eq!(merged.content, format!("{NEW}## Mid\nm\n## End\ne"));
        assert_eq!(merged.content.matches(SECTION_MARKER).count(), 1);
    }

    #[test]
    fn marker_mentioned_in_prose_is_kept() {
        let doc = "## Garmin Data\nOLD\n## Journal\nI exported my ## Garmin Data today\nimportant\n## End\ne";
        let merged = merge_section(Some(doc), NEW, day());
        assert_eq!(
            merged.content,
            format!("{NEW}## Journal\nI exported my ## Garmin Data today\nimportant\n## End\ne")
        );
    }

    #[test]
    fn deeper_heading_with_marker_text_is_kept() {
        let doc = "## Garmin Data\nOLD\n## Journal\n### Garmin Data thoughts\nmy reflections\n";
        let merged = merge_section(Some(doc), NEW, day());
        assert_eq!(
            merged.content,
            format!("{NEW}## Journal\n### Garmin Data thoughts\nmy reflections\n")
        );
    }

    #[test]
    fn heading_line_detection() {
        assert_eq!(find_heading_line("## Garmin Data"), Some(0));
        assert_eq!(find_heading_line("x\n## Garmin Data\ny"), Some(2));
        assert_eq!(find_heading_line("## Garmin Data thoughts\n"), None);
        assert_eq!(find_heading_line("### Garmin Data\n"), None);
    }

    #[test]
    fn section_without_trailing_newline_keeps_heading_on_own_line() {
        let doc = "## Garmin Data\nOLD\n## Next\nkeep";
        let merged = merge_section(Some(doc), "## Garmin Data\nNEW", day());
        assert_eq!(merged.content, "## Garmin Data\nNEW\n## Next\nkeep");
    }

    #[test]
    fn action_displays_lowercase() {
        assert_eq!(MergeAction::Replaced.to_string(), "replaced");
    }
}

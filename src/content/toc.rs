//! Heading extraction for the table of contents

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::markdown::parser_options;

/// One table of contents line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level, 1 for `<h1>`
    pub level: u8,
    pub label: String,
    /// Anchor id carried by the heading in the rendered body
    pub id: String,
}

/// Hands out unique heading anchors in document order.
///
/// The TOC and the HTML renderer each run one of these over the same body,
/// so both sides agree on every id.
#[derive(Debug, Default)]
pub(crate) struct HeadingAnchors {
    issued: HashSet<String>,
    next_suffix: HashMap<String, usize>,
}

impl HeadingAnchors {
    pub(crate) fn next(&mut self, label: &str, explicit: Option<&str>) -> String {
        let base = match explicit {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let slug = slug::slugify(label);
                if slug.is_empty() {
                    "section".to_string()
                } else {
                    slug
                }
            }
        };

        let anchor = if self.issued.contains(&base) {
            // A suffixed id may already belong to an earlier heading.
            let suffix = self.next_suffix.entry(base.clone()).or_insert(1);
            loop {
                let candidate = format!("{}-{}", base, suffix);
                *suffix += 1;
                if !self.issued.contains(&candidate) {
                    break candidate;
                }
            }
        } else {
            base
        };
        self.issued.insert(anchor.clone());
        anchor
    }
}

/// Collect headings up to `max_level` in document order
pub fn extract_toc(markdown: &str, max_level: u8) -> Vec<TocEntry> {
    let mut anchors = HeadingAnchors::default();
    let mut entries = Vec::new();
    let mut current: Option<(u8, Option<String>, String)> = None;

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some((level as u8, id.map(|id| id.to_string()), String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, label)) = current.as_mut() {
                    label.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, explicit, label)) = current.take() {
                    let label = label.trim().to_string();
                    let id = anchors.next(&label, explicit.as_deref());
                    if level <= max_level {
                        entries.push(TocEntry { level, label, id });
                    }
                }
            }
            _ => {}
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_heading() {
        let toc = extract_toc("# H1\nText", 3);
        assert_eq!(
            toc,
            vec![TocEntry {
                level: 1,
                label: "H1".to_string(),
                id: "h1".to_string(),
            }]
        );
    }

    #[test]
    fn test_document_order_and_depth() {
        let md = "## Setup\n\n### Install `cargo`\n\n#### Too deep\n\n## Usage\n";
        let toc = extract_toc(md, 3);
        let labels: Vec<_> = toc.iter().map(|e| (e.level, e.label.as_str())).collect();
        assert_eq!(
            labels,
            vec![(2, "Setup"), (3, "Install cargo"), (2, "Usage")]
        );
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let toc = extract_toc("## Notes\n\n## Notes\n\n## Notes\n", 3);
        let ids: Vec<_> = toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["notes", "notes-1", "notes-2"]);
    }

    #[test]
    fn test_suffixed_ids_do_not_collide_with_later_headings() {
        let toc = extract_toc("## Intro\n\n## Intro\n\n## Intro 1\n", 3);
        let ids: Vec<_> = toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["intro", "intro-1", "intro-1-1"]);

        let toc = extract_toc("## Intro 1\n\n## Intro\n\n## Intro\n", 3);
        let ids: Vec<_> = toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["intro-1", "intro", "intro-2"]);
    }

    #[test]
    fn test_explicit_ids_are_deduplicated() {
        let toc = extract_toc("## Notes\n\n## Other {#notes}\n", 3);
        let ids: Vec<_> = toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["notes", "notes-1"]);
    }

    #[test]
    fn test_skipped_levels_still_consume_anchors() {
        // The h4 is filtered out but its anchor must not be reused.
        let toc = extract_toc("#### Intro\n\n## Intro\n", 3);
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].id, "intro-1");
    }

    #[test]
    fn test_explicit_heading_id() {
        let toc = extract_toc("## Start here {#start}\n", 3);
        assert_eq!(toc[0].id, "start");
        assert_eq!(toc[0].label, "Start here");
    }

    #[test]
    fn test_no_headings() {
        assert!(extract_toc("just a paragraph", 3).is_empty());
    }
}

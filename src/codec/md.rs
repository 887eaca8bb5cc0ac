use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::paths::resolve_reference;

/// Inline markdown link whose target ends in `.md`: `[title](path.md)`. The title may be empty.
static SPEC_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]*)\]\(([^)]+\.md)\)").expect("SPEC_LINK is a valid regular expression")
});

const TITLE_PREFIX: &str = "# ";
const SECTION_PREFIX: &str = "## ";

/// A `[title](path.md)` link as written in a spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLink {
    /// Link text, possibly empty
    pub title: String,
    /// Raw, unresolved target as written between the parentheses
    pub path: String,
    /// Heading of the `##` section whose body contains the link. `None` for links before the
    /// first `##` heading and for links on a heading line itself.
    pub section: Option<String>,
}

impl SpecLink {
    /// Whether the link counts as a dependency edge (it sits inside a section body).
    pub fn is_dependency(&self) -> bool {
        self.section.is_some()
    }
}

/// One `##` section: its heading text and the raw lines that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    /// Lines following the heading up to the next `##` heading, each with its trailing newline
    pub body: String,
}

/// A parsed spec document.
///
/// Built fresh by every parse and never shared between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDocument {
    pub path: PathBuf,
    /// Text of the first `# ` heading, empty if the document has none
    pub title: String,
    /// Full raw text of the document
    pub content: String,
    /// Sections in order of first appearance
    pub sections: Vec<Section>,
    /// Every spec link in encounter order
    pub links: Vec<SpecLink>,
}

impl SpecDocument {
    /// Parse `content` as the document found at `path`.
    ///
    /// The scan is line oriented:
    /// - the first line starting with `# ` sets the title
    /// - a line starting with `## ` closes the open section and opens a new one named by the
    ///   rest of the line. Reopening an existing heading starts its body over, and an empty
    ///   heading closes the open section without opening another
    /// - any other line is appended verbatim to the open section, if one is open
    /// - every line is scanned for spec links; an empty link text still counts as a link
    ///
    /// Deeper headings (`###`, `####`, ...) are ordinary text.
    pub fn parse_str<P: AsRef<Path>, S: Into<String>>(path: P, content: S) -> SpecDocument {
        let content = content.into();
        let mut title: Option<String> = None;
        let mut sections: Vec<Section> = Vec::new();
        let mut current: Option<usize> = None;
        let mut links = Vec::new();

        for raw_line in content.split('\n') {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

            if let Some(heading) = line.strip_prefix(SECTION_PREFIX) {
                current = open_section(&mut sections, heading);
                collect_links(line, None, &mut links);
                continue;
            }

            if title.is_none() {
                if let Some(text) = line.strip_prefix(TITLE_PREFIX) {
                    title = Some(text.to_string());
                }
            }

            let section = current.map(|idx| &mut sections[idx]);
            let heading = section.as_ref().map(|s| s.heading.clone());
            if let Some(section) = section {
                section.body.push_str(raw_line);
                section.body.push('\n');
            }
            collect_links(line, heading, &mut links);
        }

        SpecDocument {
            path: path.as_ref().to_path_buf(),
            title: title.unwrap_or_default(),
            content,
            sections,
            links,
        }
    }

    /// Body of the section with the given heading.
    pub fn section(&self, heading: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.heading == heading)
            .map(|s| s.body.as_str())
    }

    /// Links with non-empty text, in encounter order. These are listed on the exported page.
    pub fn display_links(&self) -> impl Iterator<Item = &SpecLink> {
        self.links.iter().filter(|link| !link.title.is_empty())
    }

    /// Links found inside section bodies, including ones with empty text. These become graph
    /// edges.
    pub fn dependency_links(&self) -> impl Iterator<Item = &SpecLink> {
        self.links.iter().filter(|link| link.is_dependency())
    }

    /// Canonical targets of [`SpecDocument::dependency_links`], one per link occurrence.
    pub fn dependencies(&self) -> Vec<PathBuf> {
        self.dependency_links()
            .map(|link| resolve_reference(&self.path, &link.path))
            .collect()
    }

    /// Title for display: the document title, or the file's base name when it has none.
    pub fn display_title(&self) -> String {
        if self.title.is_empty() {
            crate::paths::base_name(&self.path).into_owned()
        } else {
            self.title.clone()
        }
    }
}

fn open_section(sections: &mut Vec<Section>, heading: &str) -> Option<usize> {
    if heading.is_empty() {
        return None;
    }
    if let Some(idx) = sections.iter().position(|s| s.heading == heading) {
        sections[idx].body.clear();
        return Some(idx);
    }
    sections.push(Section {
        heading: heading.to_string(),
        body: String::new(),
    });
    Some(sections.len() - 1)
}

fn collect_links(line: &str, section: Option<String>, links: &mut Vec<SpecLink>) {
    for captures in SPEC_LINK.captures_iter(line) {
        links.push(SpecLink {
            title: captures[1].to_string(),
            path: captures[2].to_string(),
            section: section.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const ORDERS: &str = "# Orders Service

Overview links to [Glossary](glossary.md) but that is not a dependency.

## Dependencies

- [Payments](../payments/payments.md)
- [Storage](storage.md) and [Storage again](./storage.md)

## Notes
Plain text
#### not a heading
";

    #[test]
    fn parses_title_sections_and_links() {
        let doc = SpecDocument::parse_str("/specs/orders/orders.md", ORDERS);

        assert_eq!(doc.title, "Orders Service");
        assert_eq!(
            doc.sections
                .iter()
                .map(|s| s.heading.as_str())
                .collect::<Vec<_>>(),
            vec!["Dependencies", "Notes"]
        );
        assert_eq!(
            doc.section("Notes"),
            Some("Plain text\n#### not a heading\n\n")
        );
        assert_eq!(
            doc.links
                .iter()
                .map(|l| l.path.as_str())
                .collect::<Vec<_>>(),
            vec![
                "glossary.md",
                "../payments/payments.md",
                "storage.md",
                "./storage.md"
            ]
        );
    }

    #[test]
    fn links_before_first_section_are_display_only() {
        let doc = SpecDocument::parse_str("/specs/orders/orders.md", ORDERS);
        let glossary = &doc.links[0];
        assert_eq!(glossary.title, "Glossary");
        assert!(!glossary.is_dependency());

        let deps = doc.dependencies();
        assert_eq!(
            deps,
            vec![
                PathBuf::from("/specs/payments/payments.md"),
                PathBuf::from("/specs/orders/storage.md"),
                PathBuf::from("/specs/orders/storage.md"),
            ]
        );
    }

    #[test]
    fn only_first_title_is_kept() {
        let doc = SpecDocument::parse_str("/a.md", "intro\n# First\n# Second\n");
        assert_eq!(doc.title, "First");
    }

    #[test]
    fn missing_title_falls_back_to_base_name() {
        let doc = SpecDocument::parse_str("/specs/untitled.md", "## Body\ntext\n");
        assert_eq!(doc.title, "");
        assert_eq!(doc.display_title(), "untitled.md");
    }

    #[test]
    fn repeated_heading_restarts_section() {
        let doc = SpecDocument::parse_str(
            "/specs/a.md",
            "## Deps\n[B](b.md)\n## Other\n## Deps\n[C](c.md)\n",
        );
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.section("Deps"), Some("[C](c.md)\n\n"));
        // Both links are still listed for display; each recorded its section when seen.
        assert_eq!(doc.links.len(), 2);
        // so the link under the first instance keeps its edge
        assert_eq!(
            doc.dependencies(),
            vec![PathBuf::from("/specs/b.md"), PathBuf::from("/specs/c.md")]
        );
    }

    #[test]
    fn heading_line_links_do_not_create_edges() {
        let doc = SpecDocument::parse_str("/specs/a.md", "## See [B](b.md)\nbody\n");
        assert_eq!(doc.links.len(), 1);
        assert!(doc.dependencies().is_empty());
        assert_eq!(doc.section("See [B](b.md)"), Some("body\n\n"));
    }

    #[test]
    fn crlf_line_endings_do_not_leak_into_headings() {
        let doc = SpecDocument::parse_str("/specs/a.md", "# Title\r\n## Deps\r\n[B](b.md)\r\n");
        assert_eq!(doc.title, "Title");
        assert!(doc.section("Deps").is_some());
        assert_eq!(doc.dependencies(), vec![PathBuf::from("/specs/b.md")]);
    }

    #[test]
    fn non_spec_links_are_ignored() {
        let doc = SpecDocument::parse_str(
            "/specs/a.md",
            "## Deps\n[site](https://example.com) [img](diagram.png) [notes](notes.txt)\n",
        );
        assert!(doc.links.is_empty());
    }

    #[test]
    fn empty_link_text_is_a_dependency_but_not_displayed() {
        let doc = SpecDocument::parse_str(
            "/specs/a.md",
            "[](intro.md)\n## Deps\n[](b.md) [C](c.md)\n",
        );
        assert_eq!(doc.links.len(), 3);
        assert_eq!(
            doc.dependencies(),
            vec![PathBuf::from("/specs/b.md"), PathBuf::from("/specs/c.md")]
        );
        assert_eq!(
            doc.display_links()
                .map(|l| l.path.as_str())
                .collect::<Vec<_>>(),
            vec!["c.md"]
        );
    }

    #[test]
    fn parsing_is_idempotent() {
        let first = SpecDocument::parse_str("/specs/orders/orders.md", ORDERS);
        let second = SpecDocument::parse_str("/specs/orders/orders.md", ORDERS);
        assert_eq!(first, second);
    }
}

use indexmap::IndexMap;
use serde::Serialize;

use crate::parsing::Line;

/// An ordered run of lines under one heading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: String,
    pub lines: Vec<Line>,
}

/// Partitions a classified line sequence into named sections.
///
/// Heading lines retarget the current bucket; a heading that recurs
/// non-contiguously accumulates into the same named bucket rather than a
/// second instance. Lines before any heading land under `default_name`.
pub fn group_sections(lines: Vec<Line>, default_name: &str) -> Vec<Section> {
    let mut buckets: IndexMap<String, Vec<Line>> = IndexMap::new();
    let mut current = default_name.to_string();
    for line in lines {
        match line {
            Line::Section { text } => {
                current = text;
                buckets.entry(current.clone()).or_default();
            }
            other => buckets.entry(current.clone()).or_default().push(other),
        }
    }
    buckets
        .into_iter()
        .map(|(name, lines)| Section { name, lines })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionCounts;
    use crate::parsing::parse_source;
    use pretty_assertions::assert_eq;

    fn sections_of(source: &str) -> Vec<Section> {
        let collection = CollectionCounts::new();
        group_sections(parse_source(source, &collection), "Deck")
    }

    #[test]
    fn default_section_covers_lines_before_any_heading() {
        let sections = sections_of("4 Opt\nSideboard\n2 Duress");
        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Deck", "Sideboard"]);
        assert_eq!(sections[0].lines.len(), 1);
        assert_eq!(sections[1].lines.len(), 1);
    }

    #[test]
    fn heading_first_skips_the_default_section() {
        let sections = sections_of("Sideboard\n2 Duress");
        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sideboard"]);
    }

    #[test]
    fn repeated_headings_accumulate_into_one_bucket() {
        let sections = sections_of("Lands\n4 Forest\nSpells\n4 Opt\nLands\n4 Island");
        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Lands", "Spells"]);
        assert_eq!(sections[0].lines.len(), 2);
    }

    #[test]
    fn a_bare_heading_opens_an_empty_section() {
        let sections = sections_of("Sideboard");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].lines.is_empty());
    }
}

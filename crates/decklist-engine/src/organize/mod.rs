pub mod card_type;
pub mod color;

use indexmap::IndexMap;

pub use card_type::{CardType, TYPE_SECTION_ORDER};
pub use color::{COLOR_SECTION_ORDER, color_group};

use crate::metadata::{self, MetadataMap};
use crate::parsing::Line;
use crate::sections::Section;
use crate::settings::{DocumentMode, RenderSettings};

/// Name of the synthetic section holding extracted commanders.
pub const COMMANDER_SECTION: &str = "Commander";

/// Sections after reorganization, plus the extracted commander sub-list
/// (empty outside deck mode).
#[derive(Debug, Clone, PartialEq)]
pub struct Organized {
    pub sections: Vec<Section>,
    pub commanders: Vec<Line>,
}

/// Applies the configured structural transforms in their fixed order:
/// commander extraction first (decks only), then exactly one
/// reorganization path.
pub fn organize(mut sections: Vec<Section>, metadata: &MetadataMap, settings: &RenderSettings) -> Organized {
    let mut commanders = Vec::new();
    if settings.mode == DocumentMode::Deck {
        commanders = extract_commanders(&mut sections);
        if !commanders.is_empty() {
            sections.insert(
                0,
                Section {
                    name: COMMANDER_SECTION.to_string(),
                    lines: commanders.clone(),
                },
            );
        }
    }

    let sections = match settings.mode {
        DocumentMode::List => group_by_color(sections, metadata, &settings.default_section_name),
        DocumentMode::Deck if settings.group_by_type || settings.compact => {
            group_by_type(sections, metadata, settings)
        }
        DocumentMode::Deck if settings.sort_by_cost => sort_sections_by_cost(sections, metadata),
        DocumentMode::Deck => sections,
    };

    Organized {
        sections,
        commanders,
    }
}

/// Pulls every commander line out of every section, preserving order.
fn extract_commanders(sections: &mut [Section]) -> Vec<Line> {
    let mut found = Vec::new();
    for section in sections.iter_mut() {
        let mut kept = Vec::with_capacity(section.lines.len());
        for line in section.lines.drain(..) {
            if matches!(line, Line::Commander(_)) {
                found.push(line);
            } else {
                kept.push(line);
            }
        }
        section.lines = kept;
    }
    found
}

/// Generic lists: regroup card lines by color identity, alphabetical within
/// each group; comments and parse errors go to a per-section Comments
/// bucket. Cards without metadata keep their original section name.
fn group_by_color(sections: Vec<Section>, metadata: &MetadataMap, default_name: &str) -> Vec<Section> {
    let single_default = sections.len() == 1 && sections[0].name == default_name;
    let mut buckets: IndexMap<String, Vec<Line>> = IndexMap::new();
    for section in sections {
        for line in section.lines {
            let bucket = match &line {
                Line::Card(card) | Line::Commander(card) => {
                    Some(match metadata::lookup(metadata, &card.name) {
                        Some(meta) => compose_name(&section.name, color_group(meta), single_default),
                        None => section.name.clone(),
                    })
                }
                Line::Comment { .. } | Line::Error { .. } => {
                    Some(compose_name(&section.name, "Comments", single_default))
                }
                Line::Blank | Line::Section { .. } => None,
            };
            if let Some(bucket) = bucket {
                buckets.entry(bucket).or_default().push(line);
            }
        }
    }

    let mut grouped = into_sections(buckets);
    for section in &mut grouped {
        if section.lines.iter().any(|l| l.card().is_some()) {
            section
                .lines
                .sort_by_key(|l| l.card().map(|c| c.name.to_lowercase()).unwrap_or_default());
        }
    }
    order_sections(grouped, &COLOR_SECTION_ORDER)
}

/// Decks: regroup card lines by card type; the Commander section passes
/// through untouched and stays first.
fn group_by_type(sections: Vec<Section>, metadata: &MetadataMap, settings: &RenderSettings) -> Vec<Section> {
    let mut commander = None;
    let mut rest = Vec::new();
    for section in sections {
        if section.name == COMMANDER_SECTION {
            commander = Some(section);
        } else {
            rest.push(section);
        }
    }

    let single_default = rest.len() == 1 && rest[0].name == settings.default_section_name;
    let mut buckets: IndexMap<String, Vec<Line>> = IndexMap::new();
    for section in rest {
        for line in section.lines {
            let bucket = match &line {
                Line::Card(card) | Line::Commander(card) => {
                    Some(match metadata::lookup(metadata, &card.name) {
                        Some(meta) => compose_name(
                            &section.name,
                            CardType::classify(&meta.type_line).label(),
                            single_default,
                        ),
                        None => section.name.clone(),
                    })
                }
                Line::Comment { .. } | Line::Error { .. } => {
                    Some(compose_name(&section.name, "Comments", single_default))
                }
                Line::Blank | Line::Section { .. } => None,
            };
            if let Some(bucket) = bucket {
                buckets.entry(bucket).or_default().push(line);
            }
        }
    }

    let mut grouped = into_sections(buckets);
    if settings.sort_by_cost || settings.compact {
        for section in &mut grouped {
            sort_cards_by_cost(&mut section.lines, metadata);
        }
    }
    let mut ordered = order_sections(grouped, &TYPE_SECTION_ORDER);
    if let Some(commander) = commander {
        ordered.insert(0, commander);
    }
    ordered
}

/// Cost sort without regrouping: cards sorted first, the remaining lines
/// kept after them in their original order.
fn sort_sections_by_cost(mut sections: Vec<Section>, metadata: &MetadataMap) -> Vec<Section> {
    for section in &mut sections {
        sort_cards_by_cost(&mut section.lines, metadata);
    }
    sections
}

fn sort_cards_by_cost(lines: &mut Vec<Line>, metadata: &MetadataMap) {
    let mut cards = Vec::new();
    let mut rest = Vec::new();
    for line in lines.drain(..) {
        if line.card().is_some() {
            cards.push(line);
        } else {
            rest.push(line);
        }
    }
    cards.sort_by(|a, b| {
        let ka = cost_key(a, metadata);
        let kb = cost_key(b, metadata);
        ka.0.total_cmp(&kb.0).then_with(|| ka.1.cmp(&kb.1))
    });
    *lines = cards;
    lines.extend(rest);
}

/// Ascending converted cost, ties broken by case-insensitive name.
/// Missing metadata costs 0.
fn cost_key(line: &Line, metadata: &MetadataMap) -> (f64, String) {
    match line.card() {
        Some(card) => (
            metadata::lookup(metadata, &card.name)
                .map(|m| m.cmc)
                .unwrap_or(0.0),
            card.name.to_lowercase(),
        ),
        None => (0.0, String::new()),
    }
}

/// `"<original> - <group>"` unless the original was the single default
/// section, in which case the group name stands alone.
fn compose_name(original: &str, group: &str, single_default: bool) -> String {
    if single_default {
        group.to_string()
    } else {
        format!("{original} - {group}")
    }
}

/// Stable sort by the fixed priority list, matching on the prefix of the
/// group portion of composed names; unmatched sections keep discovery
/// order at the end.
fn order_sections(mut sections: Vec<Section>, priority: &[&str]) -> Vec<Section> {
    let rank = |name: &str| -> usize {
        let group = name.rsplit(" - ").next().unwrap_or(name);
        priority
            .iter()
            .position(|p| group.starts_with(p))
            .unwrap_or(priority.len())
    };
    sections.sort_by_key(|s| rank(&s.name));
    sections
}

fn into_sections(buckets: IndexMap<String, Vec<Line>>) -> Vec<Section> {
    buckets
        .into_iter()
        .map(|(name, lines)| Section { name, lines })
        .collect()
}

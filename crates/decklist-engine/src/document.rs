use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::aggregate::{self, SectionTotals};
use crate::collection::CollectionSource;
use crate::identity::CardIdentity;
use crate::metadata::{Currency, MetadataMap, MetadataSource, fetch_all};
use crate::organize::organize;
use crate::parsing::{Line, parse_source};
use crate::sections::group_sections;
use crate::settings::RenderSettings;
use crate::stats::{self, Statistics};

/// An organized section with its totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizedSection {
    pub name: String,
    pub lines: Vec<Line>,
    pub totals: SectionTotals,
}

/// The final document model handed to the rendering layer.
///
/// Built fresh per render call and owned entirely by the caller; nothing
/// is cached across invocations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizedDocument {
    pub sections: Vec<OrganizedSection>,
    /// Extracted commander lines, empty outside deck mode.
    pub commanders: Vec<Line>,
    /// Document totals; its missing map is the consolidated buylist.
    pub overall: SectionTotals,
    pub statistics: Statistics,
    /// Metadata resolved for this render, for prices and images.
    pub metadata: MetadataMap,
    pub currency: Currency,
}

impl OrganizedDocument {
    /// Consolidated copies-to-acquire across all sections.
    pub fn buylist(&self) -> &IndexMap<CardIdentity, u32> {
        &self.overall.missing
    }
}

/// Runs the whole pipeline: parse, fetch metadata, section, organize,
/// aggregate, compute statistics.
///
/// A fetch failure never aborts the render; the document degrades to its
/// un-enriched form with every metadata-dependent transform reduced to a
/// per-card pass-through.
pub fn render(
    source: &str,
    collection: &dyn CollectionSource,
    metadata_source: &dyn MetadataSource,
    settings: &RenderSettings,
) -> OrganizedDocument {
    let lines = parse_source(source, collection);
    let identities = card_identities(&lines);
    let metadata = match fetch_all(metadata_source, &identities) {
        Ok(map) => map,
        Err(err) => {
            log::warn!("card metadata fetch failed, rendering without enrichment: {err}");
            MetadataMap::new()
        }
    };

    // Statistics are order-independent, so they run over the
    // pre-organization sequence.
    let statistics = stats::compute(&lines, &metadata);
    let sections = group_sections(lines, &settings.default_section_name);
    let organized = organize(sections, &metadata, settings);

    let sections: Vec<OrganizedSection> = organized
        .sections
        .into_iter()
        .map(|section| {
            let totals = aggregate::section_totals(&section, &metadata, settings.currency);
            OrganizedSection {
                name: section.name,
                lines: section.lines,
                totals,
            }
        })
        .collect();
    let overall = aggregate::overall(sections.iter().map(|s| &s.totals));

    OrganizedDocument {
        sections,
        commanders: organized.commanders,
        overall,
        statistics,
        metadata,
        currency: settings.currency,
    }
}

/// Distinct card identities in first-seen order; empty names are skipped.
fn card_identities(lines: &[Line]) -> Vec<CardIdentity> {
    let mut seen: IndexSet<CardIdentity> = IndexSet::new();
    for line in lines {
        if let Some(card) = line.card() {
            let identity = CardIdentity::normalize(&card.name);
            if !identity.is_empty() {
                seen.insert(identity);
            }
        }
    }
    seen.into_iter().collect()
}

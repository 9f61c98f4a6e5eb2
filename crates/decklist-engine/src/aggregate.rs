use indexmap::IndexMap;
use serde::Serialize;

use crate::identity::CardIdentity;
use crate::metadata::{self, Currency, MetadataMap};
use crate::parsing::Line;
use crate::sections::Section;

/// Totals for one section, or for the whole document when folded.
///
/// `owned_*` figures equal their totals when nothing is missing; the
/// rendering layer shows "owned / required" only when they differ. For the
/// folded document the missing map is the consolidated buylist.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SectionTotals {
    /// Sum of counts over card lines; commander lines are excluded.
    pub card_count: u32,
    pub owned_count: u32,
    /// Monetary total in the preferred currency; unpriced cards count 0.
    pub value: f64,
    pub owned_value: f64,
    /// Copies to acquire, per identity. Only populated when collection
    /// data exists; a card is never missing without a collection.
    pub missing: IndexMap<CardIdentity, u32>,
}

/// Accumulates counts, value, and the missing-copy map for one section.
pub fn section_totals(section: &Section, metadata: &MetadataMap, currency: Currency) -> SectionTotals {
    let mut totals = SectionTotals::default();
    let mut required: IndexMap<CardIdentity, (u32, Option<u32>)> = IndexMap::new();

    for line in &section.lines {
        let Line::Card(card) = line else { continue };
        totals.card_count += card.count;
        let price = metadata::lookup(metadata, &card.name)
            .and_then(|m| m.prices.in_currency(currency))
            .unwrap_or(0.0);
        totals.value += f64::from(card.count) * price;

        let identity = CardIdentity::normalize(&card.name);
        let entry = required.entry(identity).or_insert((0, card.global_count));
        entry.0 += card.count;
    }

    totals.owned_count = totals.card_count;
    totals.owned_value = totals.value;
    for (identity, (needed, global)) in required {
        let Some(global) = global else { continue };
        let missing = needed.saturating_sub(global);
        if missing == 0 {
            continue;
        }
        let price = metadata
            .get(&identity)
            .and_then(|m| m.prices.in_currency(currency))
            .unwrap_or(0.0);
        totals.owned_count -= missing;
        totals.owned_value -= f64::from(missing) * price;
        totals.missing.insert(identity, missing);
    }
    totals
}

/// Folds per-section totals into document totals; missing maps union into
/// the buylist, summed by identity in section order.
pub fn overall<'a>(totals: impl IntoIterator<Item = &'a SectionTotals>) -> SectionTotals {
    let mut folded = SectionTotals::default();
    for section in totals {
        folded.card_count += section.card_count;
        folded.owned_count += section.owned_count;
        folded.value += section.value;
        folded.owned_value += section.owned_value;
        for (identity, missing) in &section.missing {
            *folded.missing.entry(identity.clone()).or_default() += missing;
        }
    }
    folded
}

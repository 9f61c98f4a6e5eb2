use serde::Serialize;

use crate::document::OrganizedDocument;
use crate::metadata;

/// One card prepared for the external export collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportEntry {
    /// Canonical name from metadata.
    pub name: String,
    pub count: u32,
    /// Unit price in the document's preferred currency.
    pub price: Option<f64>,
    /// One image per face.
    pub images: Vec<String>,
}

/// Ordered card lines that resolved metadata, in organized-section order.
/// Cards without metadata have nothing to export and are skipped.
pub fn export_entries(doc: &OrganizedDocument) -> Vec<ExportEntry> {
    let mut entries = Vec::new();
    for section in &doc.sections {
        for line in &section.lines {
            let Some(card) = line.card() else { continue };
            let Some(meta) = metadata::lookup(&doc.metadata, &card.name) else {
                continue;
            };
            entries.push(ExportEntry {
                name: meta.name.clone(),
                count: card.count,
                price: meta.prices.in_currency(doc.currency),
                images: meta.image_uris.clone(),
            });
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionCounts;
    use crate::document::render;
    use crate::metadata::{CardMetadata, ColorIdentity, InMemoryMetadataSource, Prices};
    use crate::settings::RenderSettings;
    use pretty_assertions::assert_eq;

    #[test]
    fn exports_resolved_cards_in_section_order() {
        let source = InMemoryMetadataSource::new([CardMetadata {
            name: "Lightning Bolt".to_string(),
            type_line: "Instant".to_string(),
            cmc: 1.0,
            color_identity: ColorIdentity::new(),
            prices: Prices {
                usd: Some(1.50),
                eur: None,
                tix: None,
            },
            purchase_uri: None,
            image_uris: vec!["https://img.example/bolt.jpg".to_string()],
        }]);
        let collection = CollectionCounts::new();
        let doc = render(
            "4 Lightning Bolt\n2 Unknown Card",
            &collection,
            &source,
            &RenderSettings::default(),
        );

        let entries = export_entries(&doc);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Lightning Bolt");
        assert_eq!(entries[0].count, 4);
        assert_eq!(entries[0].price, Some(1.50));
        assert_eq!(entries[0].images.len(), 1);
    }
}

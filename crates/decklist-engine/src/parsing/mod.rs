pub mod classify;

use crate::collection::CollectionSource;
pub use classify::{CardLine, Line, classify};

/// Classifies a whole source into an ordered line sequence.
///
/// Splits on newline without trimming the document. Whether collection data
/// exists is decided once here and applied to every line uniformly.
pub fn parse_source(text: &str, collection: &dyn CollectionSource) -> Vec<Line> {
    let has_data = collection.has_any_data();
    text.split('\n')
        .map(|raw| classify(raw, collection, has_data))
        .collect()
}

use anyhow::{Context, Result, bail};
use decklist_engine::{CardMetadata, CollectionCounts, InMemoryMetadataSource};
use std::fs;
use std::path::Path;

/// Loads a collection file: one `count,name` pair per line. Blank lines and
/// lines starting with `#` are skipped.
pub fn load_collection(path: &Path) -> Result<CollectionCounts> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read collection file '{}'", path.display()))?;

    let mut counts = CollectionCounts::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((count, name)) = line.split_once(',') else {
            bail!(
                "collection line {} is not in `count,name` form: {line}",
                index + 1
            );
        };
        let count: u32 = count
            .trim()
            .parse()
            .with_context(|| format!("bad count on collection line {}: {line}", index + 1))?;
        counts.set(name.trim(), count);
    }
    Ok(counts)
}

/// Loads a card metadata file: a JSON array of card objects.
pub fn load_metadata(path: &Path) -> Result<InMemoryMetadataSource> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read metadata file '{}'", path.display()))?;
    let cards: Vec<CardMetadata> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse metadata file '{}'", path.display()))?;
    Ok(InMemoryMetadataSource::new(cards))
}

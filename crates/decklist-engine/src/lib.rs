pub mod aggregate;
pub mod collection;
pub mod document;
pub mod export;
pub mod identity;
pub mod metadata;
pub mod organize;
pub mod parsing;
pub mod sections;
pub mod settings;
pub mod stats;

// Re-export key types for easier usage
pub use aggregate::SectionTotals;
pub use collection::{CollectionCounts, CollectionSource};
pub use document::{OrganizedDocument, OrganizedSection, render};
pub use export::{ExportEntry, export_entries};
pub use identity::CardIdentity;
pub use metadata::{
    CardMetadata, Color, ColorIdentity, Currency, InMemoryMetadataSource, MAX_FETCH_BATCH,
    MetadataError, MetadataMap, MetadataSource, Prices, fetch_all,
};
pub use organize::{CardType, COMMANDER_SECTION, Organized, organize};
pub use parsing::{CardLine, Line, parse_source};
pub use sections::{Section, group_sections};
pub use settings::{DocumentMode, RenderSettings};
pub use stats::{ColorChannel, Statistics};

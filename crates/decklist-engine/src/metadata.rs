use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::CardIdentity;

/// Externally enforced cap on identities per metadata fetch call.
pub const MAX_FETCH_BATCH: usize = 75;

/// One of the five color symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            Color::White => "W",
            Color::Blue => "U",
            Color::Black => "B",
            Color::Red => "R",
            Color::Green => "G",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Blue => "Blue",
            Color::Black => "Black",
            Color::Red => "Red",
            Color::Green => "Green",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Color::White => 1 << 0,
            Color::Blue => 1 << 1,
            Color::Black => 1 << 2,
            Color::Red => 1 << 3,
            Color::Green => 1 << 4,
        }
    }
}

/// A color identity as bitflags, serialized as a list of symbols.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Color>", into = "Vec<Color>")]
pub struct ColorIdentity(u8);

impl ColorIdentity {
    pub const fn new() -> Self {
        Self(0)
    }

    pub fn of(colors: &[Color]) -> Self {
        colors.iter().fold(Self(0), |set, &color| set.with(color))
    }

    pub const fn with(self, color: Color) -> Self {
        Self(self.0 | color.bit())
    }

    pub const fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Colors in the set, in WUBRG order.
    pub fn colors(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |&c| self.contains(c))
    }
}

impl From<Vec<Color>> for ColorIdentity {
    fn from(colors: Vec<Color>) -> Self {
        Self::of(&colors)
    }
}

impl From<ColorIdentity> for Vec<Color> {
    fn from(identity: ColorIdentity) -> Self {
        identity.colors().collect()
    }
}

/// Currency a price figure is quoted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Tix,
}

impl Currency {
    pub const fn label(self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Eur => "eur",
            Currency::Tix => "tix",
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "usd" => Ok(Currency::Usd),
            "eur" => Ok(Currency::Eur),
            "tix" => Ok(Currency::Tix),
            other => Err(format!("unknown currency: {other}")),
        }
    }
}

/// Unit prices per currency; any figure may be unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Prices {
    #[serde(default)]
    pub usd: Option<f64>,
    #[serde(default)]
    pub eur: Option<f64>,
    #[serde(default)]
    pub tix: Option<f64>,
}

impl Prices {
    pub fn in_currency(&self, currency: Currency) -> Option<f64> {
        match currency {
            Currency::Usd => self.usd,
            Currency::Eur => self.eur,
            Currency::Tix => self.tix,
        }
    }
}

/// Externally fetched card metadata for one identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardMetadata {
    /// Canonical display name.
    pub name: String,
    #[serde(default)]
    pub type_line: String,
    /// Converted cost.
    #[serde(default)]
    pub cmc: f64,
    #[serde(default)]
    pub color_identity: ColorIdentity,
    #[serde(default)]
    pub prices: Prices,
    #[serde(default)]
    pub purchase_uri: Option<String>,
    /// One image per face; at most two.
    #[serde(default)]
    pub image_uris: Vec<String>,
}

pub type MetadataMap = HashMap<CardIdentity, CardMetadata>;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("batch of {len} identities exceeds the 75-identity fetch limit")]
    BatchTooLarge { len: usize },
    #[error("metadata fetch failed: {0}")]
    Fetch(String),
}

/// Batch card-metadata fetcher capability.
///
/// Implementations receive at most [`MAX_FETCH_BATCH`] identities per call;
/// [`fetch_all`] handles the splitting. Retry and backoff policy belongs to
/// the implementation, not the engine.
pub trait MetadataSource {
    fn fetch(&self, identities: &[CardIdentity]) -> Result<MetadataMap, MetadataError>;
}

/// Fetches metadata for arbitrarily many identities by splitting into
/// batches of [`MAX_FETCH_BATCH`] and merging results in submission order,
/// last write wins.
///
/// All-or-nothing: the first failing batch fails the whole fetch. The
/// render pipeline turns that into an un-enriched render rather than an
/// aborted one.
pub fn fetch_all(
    source: &dyn MetadataSource,
    identities: &[CardIdentity],
) -> Result<MetadataMap, MetadataError> {
    let mut merged = MetadataMap::new();
    for chunk in identities.chunks(MAX_FETCH_BATCH) {
        merged.extend(source.fetch(chunk)?);
    }
    Ok(merged)
}

/// Looks up metadata for a display name through the identity normalization.
pub fn lookup<'a>(metadata: &'a MetadataMap, display_name: &str) -> Option<&'a CardMetadata> {
    metadata.get(&CardIdentity::normalize(display_name))
}

/// Metadata source backed by a pre-loaded map, used by the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetadataSource {
    cards: MetadataMap,
}

impl InMemoryMetadataSource {
    pub fn new(cards: impl IntoIterator<Item = CardMetadata>) -> Self {
        let cards = cards
            .into_iter()
            .map(|card| (CardIdentity::normalize(&card.name), card))
            .collect();
        Self { cards }
    }
}

impl MetadataSource for InMemoryMetadataSource {
    fn fetch(&self, identities: &[CardIdentity]) -> Result<MetadataMap, MetadataError> {
        if identities.len() > MAX_FETCH_BATCH {
            return Err(MetadataError::BatchTooLarge {
                len: identities.len(),
            });
        }
        Ok(identities
            .iter()
            .filter_map(|id| self.cards.get(id).map(|card| (id.clone(), card.clone())))
            .collect())
    }
}

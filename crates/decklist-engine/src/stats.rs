use indexmap::IndexMap;
use serde::Serialize;

use crate::metadata::{self, Color, MetadataMap};
use crate::organize::CardType;
use crate::parsing::Line;

/// Converted costs at or above this bucket all land in it ("7 or more").
pub const MAX_COST_BUCKET: usize = 7;

const COST_BUCKETS: usize = MAX_COST_BUCKET + 1;

/// A color channel for the per-color cost curves; cards with an empty
/// color identity chart under Colorless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColorChannel {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl ColorChannel {
    pub const ALL: [ColorChannel; 6] = [
        ColorChannel::White,
        ColorChannel::Blue,
        ColorChannel::Black,
        ColorChannel::Red,
        ColorChannel::Green,
        ColorChannel::Colorless,
    ];
}

impl From<Color> for ColorChannel {
    fn from(color: Color) -> Self {
        match color {
            Color::White => ColorChannel::White,
            Color::Blue => ColorChannel::Blue,
            Color::Black => ColorChannel::Black,
            Color::Red => ColorChannel::Red,
            Color::Green => ColorChannel::Green,
        }
    }
}

/// Histograms over the full card set. Order-independent, computed from the
/// pre-organization line sequence; commander lines are excluded entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Every card line counts here, with or without metadata.
    pub total_cards: u32,
    /// Cost histogram, lands excluded.
    pub cost_curve: [u32; COST_BUCKETS],
    /// Counts per type group, lands included.
    pub type_distribution: IndexMap<CardType, u32>,
    /// Cost histogram per color channel, lands excluded.
    pub color_curves: IndexMap<ColorChannel, [u32; COST_BUCKETS]>,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            total_cards: 0,
            cost_curve: [0; COST_BUCKETS],
            type_distribution: CardType::ORDER.into_iter().map(|t| (t, 0)).collect(),
            color_curves: ColorChannel::ALL
                .into_iter()
                .map(|c| (c, [0; COST_BUCKETS]))
                .collect(),
        }
    }
}

/// Computes all histograms in one pass. Cards without metadata count only
/// toward `total_cards`.
pub fn compute(lines: &[Line], metadata: &MetadataMap) -> Statistics {
    let mut stats = Statistics::default();
    for line in lines {
        let Line::Card(card) = line else { continue };
        stats.total_cards += card.count;
        let Some(meta) = metadata::lookup(metadata, &card.name) else {
            continue;
        };

        let group = CardType::classify(&meta.type_line);
        if let Some(total) = stats.type_distribution.get_mut(&group) {
            *total += card.count;
        }
        if group == CardType::Land {
            continue;
        }

        let bucket = cost_bucket(meta.cmc);
        stats.cost_curve[bucket] += card.count;
        if meta.color_identity.is_empty() {
            if let Some(curve) = stats.color_curves.get_mut(&ColorChannel::Colorless) {
                curve[bucket] += card.count;
            }
        } else {
            for color in meta.color_identity.colors() {
                if let Some(curve) = stats.color_curves.get_mut(&ColorChannel::from(color)) {
                    curve[bucket] += card.count;
                }
            }
        }
    }
    stats
}

fn cost_bucket(cmc: f64) -> usize {
    (cmc.max(0.0) as usize).min(MAX_COST_BUCKET)
}

use serde::{Deserialize, Serialize};

use crate::metadata::Currency;

/// Whether a source is a deck (commander extraction, type grouping) or a
/// generic inventory list (always grouped by color identity).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentMode {
    #[default]
    Deck,
    List,
}

/// Configuration for one render invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub mode: DocumentMode,
    /// Deck mode: regroup sections by card type.
    pub group_by_type: bool,
    /// Deck mode: sort card lines by converted cost.
    pub sort_by_cost: bool,
    /// Compact display mode; implies type grouping and cost sorting.
    pub compact: bool,
    /// Currency used for all monetary totals.
    pub currency: Currency,
    /// Section name used for lines before the first heading.
    pub default_section_name: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mode: DocumentMode::Deck,
            group_by_type: false,
            sort_by_cost: false,
            compact: false,
            currency: Currency::Usd,
            default_section_name: "Deck".to_string(),
        }
    }
}

impl RenderSettings {
    pub fn for_list() -> Self {
        Self {
            mode: DocumentMode::List,
            default_section_name: "List".to_string(),
            ..Self::default()
        }
    }
}

use serde::Serialize;

/// Card type groups, in classification and display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CardType {
    Creature,
    Instant,
    Sorcery,
    Artifact,
    Enchantment,
    Planeswalker,
    Land,
    Battle,
    Other,
}

impl CardType {
    pub const ORDER: [CardType; 9] = [
        CardType::Creature,
        CardType::Instant,
        CardType::Sorcery,
        CardType::Artifact,
        CardType::Enchantment,
        CardType::Planeswalker,
        CardType::Land,
        CardType::Battle,
        CardType::Other,
    ];

    /// First group whose label appears in the type line wins, so an
    /// "Artifact Creature" counts as a Creature. Unmatched type lines fall
    /// into Other.
    pub fn classify(type_line: &str) -> CardType {
        for group in Self::ORDER {
            if group != CardType::Other && type_line.contains(group.label()) {
                return group;
            }
        }
        CardType::Other
    }

    pub const fn label(self) -> &'static str {
        match self {
            CardType::Creature => "Creature",
            CardType::Instant => "Instant",
            CardType::Sorcery => "Sorcery",
            CardType::Artifact => "Artifact",
            CardType::Enchantment => "Enchantment",
            CardType::Planeswalker => "Planeswalker",
            CardType::Land => "Land",
            CardType::Battle => "Battle",
            CardType::Other => "Other",
        }
    }
}

/// Section order for type-grouped documents; composed names match on their
/// group portion. "Commander" is handled separately and always comes first.
pub const TYPE_SECTION_ORDER: [&str; 10] = [
    "Creature",
    "Instant",
    "Sorcery",
    "Artifact",
    "Enchantment",
    "Planeswalker",
    "Land",
    "Battle",
    "Other",
    "Comments",
];

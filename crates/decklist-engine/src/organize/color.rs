use crate::metadata::{CardMetadata, Color, ColorIdentity};

/// Section order for color-grouped lists: mono colors, guilds, shards and
/// wedges, four and five colors, then the catch-all buckets. Composed
/// section names match on the prefix of their group portion.
pub const COLOR_SECTION_ORDER: [&str; 30] = [
    "White",
    "Blue",
    "Black",
    "Red",
    "Green",
    "Azorius",
    "Dimir",
    "Rakdos",
    "Gruul",
    "Selesnya",
    "Orzhov",
    "Izzet",
    "Golgari",
    "Boros",
    "Simic",
    "Bant",
    "Esper",
    "Grixis",
    "Jund",
    "Naya",
    "Abzan",
    "Jeskai",
    "Sultai",
    "Mardu",
    "Temur",
    "Four-Color",
    "Five-Color",
    "Colorless",
    "Lands",
    "Comments",
];

/// Group name for a card's color identity.
///
/// Lands are checked first and group together regardless of identity.
pub fn color_group(meta: &CardMetadata) -> &'static str {
    if meta.type_line.contains("Land") {
        return "Lands";
    }
    let identity = meta.color_identity;
    match identity.count() {
        0 => "Colorless",
        1 => mono_name(identity),
        2 | 3 => multi_name(identity),
        4 => "Four-Color",
        _ => "Five-Color",
    }
}

fn mono_name(identity: ColorIdentity) -> &'static str {
    for color in Color::ALL {
        if identity.contains(color) {
            return color.name();
        }
    }
    "Colorless"
}

fn multi_name(identity: ColorIdentity) -> &'static str {
    let key: String = identity.colors().map(Color::symbol).collect();
    // Keyed by the WUBRG-sorted symbol string; the display names keep the
    // traditional symbol order.
    match key.as_str() {
        "WU" => "Azorius (W/U)",
        "UB" => "Dimir (U/B)",
        "BR" => "Rakdos (B/R)",
        "RG" => "Gruul (R/G)",
        "WG" => "Selesnya (G/W)",
        "WB" => "Orzhov (W/B)",
        "UR" => "Izzet (U/R)",
        "BG" => "Golgari (B/G)",
        "WR" => "Boros (R/W)",
        "UG" => "Simic (G/U)",
        "WUG" => "Bant (G/W/U)",
        "WUB" => "Esper (W/U/B)",
        "UBR" => "Grixis (U/B/R)",
        "BRG" => "Jund (B/R/G)",
        "WRG" => "Naya (R/G/W)",
        "WBG" => "Abzan (W/B/G)",
        "WUR" => "Jeskai (U/R/W)",
        "UBG" => "Sultai (B/G/U)",
        "WBR" => "Mardu (R/W/B)",
        "URG" => "Temur (G/U/R)",
        _ => "Multicolor",
    }
}

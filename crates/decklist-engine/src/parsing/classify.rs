use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::collection::CollectionSource;
use crate::identity::CardIdentity;

/// Marker tagging a card line as the deck's commander.
pub const COMMANDER_MARKER: &str = "*CMDR*";

/// Card grammar: leading count, optional literal `x`, one whitespace,
/// remainder is the display name.
static CARD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)x?\s(.*)$").unwrap());

/// Set-code annotation at the end of the card segment, e.g. `(M21) 250`.
static SET_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([0-9A-Za-z]{3}\) \d+\s*$").unwrap());

/// One classified unit of source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Line {
    /// Empty or whitespace-only.
    Blank,
    /// Heading: first character is neither a digit nor `#`. This
    /// leading-character rule is the only discriminator between prose used
    /// as a heading and a card line.
    Section { text: String },
    /// Standalone comment (`# ` prefix), stored verbatim.
    Comment { text: String },
    /// A card entry.
    Card(CardLine),
    /// A card tagged with [`COMMANDER_MARKER`]; count is always 1.
    Commander(CardLine),
    /// A line that failed the card grammar.
    Error { message: String },
}

/// Payload shared by card and commander lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardLine {
    pub count: u32,
    /// Raw display name as written, untouched by identity normalization.
    pub name: String,
    /// Owned copies: `None` when no collection data exists at all,
    /// `Some(0)` when the collection is loaded but lacks this card.
    pub global_count: Option<u32>,
    /// Trailing `#`-delimited comment fragments, in order.
    pub comments: Vec<String>,
    /// Parse problems that did not prevent emitting the line.
    pub errors: Vec<String>,
}

impl Line {
    /// Card payload for card and commander lines.
    pub fn card(&self) -> Option<&CardLine> {
        match self {
            Line::Card(card) | Line::Commander(card) => Some(card),
            _ => None,
        }
    }
}

/// Classifies one raw line, first match wins:
/// blank, section heading, comment, commander, then card/error.
///
/// Applied per line with no cross-line state; `has_data` is the single
/// document-wide "collection data is present" decision.
pub fn classify(raw: &str, collection: &dyn CollectionSource, has_data: bool) -> Line {
    if raw.trim().is_empty() {
        return Line::Blank;
    }
    let first = raw.chars().next().unwrap_or_default();
    if !first.is_ascii_digit() && first != '#' {
        return Line::Section {
            text: raw.to_string(),
        };
    }
    if raw.starts_with("# ") {
        return Line::Comment {
            text: raw.to_string(),
        };
    }
    if raw.contains(COMMANDER_MARKER) {
        let stripped = raw.replace(COMMANDER_MARKER, "");
        let stripped = stripped.trim();
        return match parse_card_text(stripped) {
            CardParse::Card { name, comments, .. } => {
                // Count forced to 1 regardless of the numeric prefix.
                Line::Commander(build_card(1, name, comments, raw, collection, has_data))
            }
            // Marker without a valid grammar falls through to standard
            // card/error handling of the stripped text.
            CardParse::Invalid => card_or_error(stripped, raw, collection, has_data),
        };
    }
    card_or_error(raw, raw, collection, has_data)
}

fn card_or_error(
    text: &str,
    original: &str,
    collection: &dyn CollectionSource,
    has_data: bool,
) -> Line {
    match parse_card_text(text) {
        CardParse::Card {
            count,
            name,
            comments,
        } => Line::Card(build_card(count, name, comments, original, collection, has_data)),
        CardParse::Invalid => Line::Error {
            message: format!("invalid line: {original}"),
        },
    }
}

fn build_card(
    count: u32,
    name: String,
    comments: Vec<String>,
    original: &str,
    collection: &dyn CollectionSource,
    has_data: bool,
) -> CardLine {
    let mut errors = Vec::new();
    if name.is_empty() {
        // Non-fatal: the line still counts, with an empty name.
        errors.push(format!("Unable to parse card name from: {original}"));
    }
    if count == 0 {
        errors.push(format!("Card count must be at least 1: {original}"));
    }
    let global_count = if has_data {
        Some(
            collection
                .count(&CardIdentity::normalize(&name))
                .unwrap_or(0),
        )
    } else {
        None
    };
    CardLine {
        count,
        name,
        global_count,
        comments,
        errors,
    }
}

enum CardParse {
    Card {
        count: u32,
        name: String,
        comments: Vec<String>,
    },
    Invalid,
}

/// Runs the card grammar over one line: comment splitting first, then the
/// set-code strip against the card segment, then the count/name match.
/// The annotation sits between the name and any comments, so stripping the
/// segment handles `4 Opt (XLN) 65 # keep`; a set code written inside a
/// comment stays part of the comment.
fn parse_card_text(text: &str) -> CardParse {
    let mut segments = text.split('#');
    let card_text = segments.next().unwrap_or_default();
    let comments: Vec<String> = segments.map(|s| s.trim().to_string()).collect();
    let card_text = SET_CODE_RE.replace(card_text, "");
    let Some(caps) = CARD_RE.captures(&card_text) else {
        return CardParse::Invalid;
    };
    let Ok(count) = caps[1].parse::<u32>() else {
        return CardParse::Invalid;
    };
    CardParse::Card {
        count,
        name: caps[2].trim().to_string(),
        comments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionCounts;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn classify_no_collection(raw: &str) -> Line {
        let collection = CollectionCounts::new();
        classify(raw, &collection, false)
    }

    #[test]
    fn blank_lines() {
        assert_eq!(classify_no_collection(""), Line::Blank);
        assert_eq!(classify_no_collection("   \t "), Line::Blank);
    }

    #[test]
    fn section_headings_by_leading_character() {
        assert_eq!(
            classify_no_collection("Sideboard"),
            Line::Section {
                text: "Sideboard".to_string()
            }
        );
        // Prose with an inner `#` is still a heading; only the first
        // character decides.
        assert_eq!(
            classify_no_collection("Maybe # later"),
            Line::Section {
                text: "Maybe # later".to_string()
            }
        );
    }

    #[test]
    fn comment_lines_are_stored_verbatim() {
        assert_eq!(
            classify_no_collection("# just a note"),
            Line::Comment {
                text: "# just a note".to_string()
            }
        );
    }

    #[rstest]
    #[case("4x Lightning Bolt", 4, "Lightning Bolt")]
    #[case("4 Lightning Bolt", 4, "Lightning Bolt")]
    #[case("1 Fire // Ice", 1, "Fire // Ice")]
    fn card_lines(#[case] raw: &str, #[case] count: u32, #[case] name: &str) {
        let Line::Card(card) = classify_no_collection(raw) else {
            panic!("expected a card line for {raw:?}");
        };
        assert_eq!(card.count, count);
        assert_eq!(card.name, name);
        assert!(card.errors.is_empty());
        assert_eq!(card.global_count, None);
    }

    #[test]
    fn set_code_annotation_is_stripped() {
        let Line::Card(card) = classify_no_collection("3 Forest (M21) 250") else {
            panic!("expected a card line");
        };
        assert_eq!(card.count, 3);
        assert_eq!(card.name, "Forest");
    }

    #[test]
    fn inline_comments_split_on_every_delimiter() {
        let Line::Card(card) = classify_no_collection("2 Opt # cantrip # keep") else {
            panic!("expected a card line");
        };
        assert_eq!(card.name, "Opt");
        assert_eq!(card.comments, vec!["cantrip".to_string(), "keep".to_string()]);
    }

    #[test]
    fn set_code_before_a_comment_is_still_stripped() {
        let Line::Card(card) = classify_no_collection("4 Opt (XLN) 65 # keep") else {
            panic!("expected a card line");
        };
        assert_eq!(card.name, "Opt");
        assert_eq!(card.comments, vec!["keep".to_string()]);
    }

    #[test]
    fn set_code_inside_a_comment_stays_in_the_comment() {
        let Line::Card(card) = classify_no_collection("2 Opt # good (XLN) 65") else {
            panic!("expected a card line");
        };
        assert_eq!(card.name, "Opt");
        assert_eq!(card.comments, vec!["good (XLN) 65".to_string()]);
    }

    #[test]
    fn commander_count_is_forced_to_one() {
        let Line::Commander(card) =
            classify_no_collection("1 Atraxa, Praetors' Voice *CMDR*")
        else {
            panic!("expected a commander line");
        };
        assert_eq!(card.count, 1);
        assert_eq!(card.name, "Atraxa, Praetors' Voice");

        let Line::Commander(card) = classify_no_collection("3 Atraxa, Praetors' Voice *CMDR*")
        else {
            panic!("expected a commander line");
        };
        assert_eq!(card.count, 1);
    }

    #[test]
    fn commander_marker_without_grammar_falls_through_to_error() {
        let line = classify_no_collection("1x *CMDR*");
        assert!(matches!(line, Line::Error { .. }));
    }

    #[test]
    fn invalid_lines_keep_the_original_text() {
        let Line::Error { message } = classify_no_collection("#not a comment") else {
            panic!("expected an error line");
        };
        assert_eq!(message, "invalid line: #not a comment");
    }

    #[test]
    fn empty_name_still_emits_a_card_with_an_error() {
        let Line::Card(card) = classify_no_collection("4 ") else {
            panic!("expected a card line");
        };
        assert_eq!(card.count, 4);
        assert_eq!(card.name, "");
        assert_eq!(card.errors, vec!["Unable to parse card name from: 4 ".to_string()]);
    }

    #[test]
    fn global_count_distinguishes_no_data_from_zero() {
        let mut collection = CollectionCounts::new();
        collection.set("Lightning Bolt", 2);

        let Line::Card(card) = classify("4 Lightning Bolt", &collection, true) else {
            panic!("expected a card line");
        };
        assert_eq!(card.global_count, Some(2));

        let Line::Card(card) = classify("4 Opt", &collection, true) else {
            panic!("expected a card line");
        };
        assert_eq!(card.global_count, Some(0));

        let Line::Card(card) = classify("4 Opt", &collection, false) else {
            panic!("expected a card line");
        };
        assert_eq!(card.global_count, None);
    }

    #[test]
    fn zero_count_still_emits_a_card_with_an_error() {
        let Line::Card(card) = classify_no_collection("0 Opt") else {
            panic!("expected a card line");
        };
        assert_eq!(card.count, 0);
        assert_eq!(card.name, "Opt");
        assert_eq!(
            card.errors,
            vec!["Card count must be at least 1: 0 Opt".to_string()]
        );
    }

    #[test]
    fn card_count_is_at_least_one_unless_errored() {
        for raw in ["1 Opt", "99x Storm Crow", "7 Island (M21) 265"] {
            let Line::Card(card) = classify_no_collection(raw) else {
                panic!("expected a card line for {raw:?}");
            };
            assert!(card.count >= 1);
            assert!(card.errors.is_empty());
        }
    }
}

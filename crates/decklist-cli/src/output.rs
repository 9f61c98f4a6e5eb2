use decklist_engine::{
    COMMANDER_SECTION, Currency, Line, OrganizedDocument, OrganizedSection, metadata,
    stats::MAX_COST_BUCKET,
};

const MAX_BAR_WIDTH: usize = 30;

/// Renders the organized document as plain text: sections with
/// owned/required totals, the buylist, and the statistics histograms.
pub fn render_text(doc: &OrganizedDocument) -> String {
    let mut out = String::new();
    for section in &doc.sections {
        render_section(&mut out, doc, section);
    }

    if !doc.buylist().is_empty() {
        out.push_str("Buylist\n");
        for (identity, count) in doc.buylist() {
            out.push_str(&format!("  {count} {identity}\n"));
        }
        out.push('\n');
    }

    let overall = &doc.overall;
    if overall.missing.is_empty() {
        out.push_str(&format!(
            "Total: {} cards, {}\n",
            overall.card_count,
            money(doc.currency, overall.value)
        ));
    } else {
        out.push_str(&format!(
            "Total: {}/{} cards, {}/{}\n",
            overall.owned_count,
            overall.card_count,
            money(doc.currency, overall.owned_value),
            money(doc.currency, overall.value)
        ));
    }

    render_statistics(&mut out, doc);
    out
}

fn render_section(out: &mut String, doc: &OrganizedDocument, section: &OrganizedSection) {
    let totals = &section.totals;
    if section.name == COMMANDER_SECTION {
        // Commanders are excluded from counts, so totals would only show
        // zeros here.
        out.push_str(&format!("{}\n", section.name));
    } else if totals.missing.is_empty() {
        out.push_str(&format!(
            "{} ({} cards, {})\n",
            section.name,
            totals.card_count,
            money(doc.currency, totals.value)
        ));
    } else {
        out.push_str(&format!(
            "{} ({}/{} cards, {}/{})\n",
            section.name,
            totals.owned_count,
            totals.card_count,
            money(doc.currency, totals.owned_value),
            money(doc.currency, totals.value)
        ));
    }

    for line in &section.lines {
        match line {
            Line::Card(card) | Line::Commander(card) => {
                out.push_str(&format!("  {} {}", card.count, card.name));
                if let Some(price) = metadata::lookup(&doc.metadata, &card.name)
                    .and_then(|m| m.prices.in_currency(doc.currency))
                {
                    out.push_str(&format!(" ({})", money(doc.currency, price)));
                }
                if let Some(global) = card.global_count
                    && global < card.count
                {
                    out.push_str(&format!(" [{global}/{} owned]", card.count));
                }
                for comment in &card.comments {
                    out.push_str(&format!(" # {comment}"));
                }
                for error in &card.errors {
                    out.push_str(&format!(" !! {error}"));
                }
                out.push('\n');
            }
            Line::Comment { text } => out.push_str(&format!("  {text}\n")),
            Line::Error { message } => out.push_str(&format!("  !! {message}\n")),
            Line::Blank => {}
            Line::Section { text } => out.push_str(&format!("  {text}\n")),
        }
    }
    out.push('\n');
}

fn render_statistics(out: &mut String, doc: &OrganizedDocument) {
    let stats = &doc.statistics;
    if stats.total_cards == 0 {
        return;
    }

    out.push_str("\nMana curve\n");
    for (cost, n) in stats.cost_curve.iter().enumerate() {
        if *n == 0 {
            continue;
        }
        let label = if cost == MAX_COST_BUCKET {
            "7+".to_string()
        } else {
            cost.to_string()
        };
        let bar = "#".repeat((*n as usize).min(MAX_BAR_WIDTH));
        out.push_str(&format!("  {label:>2}: {bar} {n}\n"));
    }

    out.push_str("Types\n");
    for (group, n) in &stats.type_distribution {
        if *n == 0 {
            continue;
        }
        out.push_str(&format!("  {}: {n}\n", group.label()));
    }

    out.push_str("Colors\n");
    for (channel, curve) in &stats.color_curves {
        let total: u32 = curve.iter().sum();
        if total == 0 {
            continue;
        }
        out.push_str(&format!("  {channel:?}: {total}\n"));
    }
}

fn money(currency: Currency, amount: f64) -> String {
    match currency {
        Currency::Usd => format!("${amount:.2}"),
        Currency::Eur => format!("€{amount:.2}"),
        Currency::Tix => format!("{amount:.2} tix"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decklist_engine::{
        CardMetadata, CollectionCounts, Color, ColorIdentity, InMemoryMetadataSource, Prices,
        RenderSettings, render,
    };

    fn card(name: &str, type_line: &str, cmc: f64, colors: &[Color], usd: f64) -> CardMetadata {
        CardMetadata {
            name: name.to_string(),
            type_line: type_line.to_string(),
            cmc,
            color_identity: ColorIdentity::of(colors),
            prices: Prices {
                usd: Some(usd),
                eur: None,
                tix: None,
            },
            purchase_uri: None,
            image_uris: Vec::new(),
        }
    }

    #[test]
    fn renders_a_full_deck() {
        let source = InMemoryMetadataSource::new([
            card(
                "Atraxa, Praetors' Voice",
                "Legendary Creature — Phyrexian Angel Horror",
                4.0,
                &[Color::White, Color::Blue, Color::Black, Color::Green],
                18.00,
            ),
            card("Opt", "Instant", 1.0, &[Color::Blue], 0.25),
            card("Sol Ring", "Artifact", 1.0, &[], 2.00),
            card("Forest", "Basic Land — Forest", 0.0, &[Color::Green], 0.05),
        ]);
        let mut collection = CollectionCounts::new();
        collection.set("Atraxa, Praetors' Voice", 1);
        collection.set("Opt", 2);
        collection.set("Sol Ring", 2);
        collection.set("Forest", 20);

        let deck = "1 Atraxa, Praetors' Voice *CMDR*\n4 Opt # cantrip\n2 Sol Ring\nLands\n3 Forest";
        let doc = render(deck, &collection, &source, &RenderSettings::default());

        insta::assert_snapshot!(render_text(&doc), @r"
Commander
  1 Atraxa, Praetors' Voice ($18.00)

Deck (4/6 cards, $4.50/$5.00)
  4 Opt ($0.25) [2/4 owned] # cantrip
  2 Sol Ring ($2.00)

Lands (3 cards, $0.15)
  3 Forest ($0.05)

Buylist
  2 opt

Total: 7/9 cards, $4.65/$5.15

Mana curve
   1: ###### 6
Types
  Instant: 4
  Artifact: 2
  Land: 3
Colors
  Blue: 4
  Colorless: 2
");
    }

    #[test]
    fn renders_without_collection_or_metadata() {
        let doc = render(
            "4 Opt",
            &CollectionCounts::new(),
            &InMemoryMetadataSource::default(),
            &RenderSettings::default(),
        );
        let text = render_text(&doc);
        assert!(text.contains("Deck (4 cards, $0.00)"));
        assert!(text.contains("  4 Opt\n"));
        assert!(!text.contains("Buylist"));
    }
}

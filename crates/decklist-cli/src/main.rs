use anyhow::{Context, Result};
use decklist_config::Config;
use decklist_engine::{CollectionCounts, DocumentMode, InMemoryMetadataSource, render};
use std::path::PathBuf;
use std::{env, fs, process};

mod output;
mod sources;

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <deck-file> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --list                treat the file as a generic card list");
    eprintln!("  --by-type             group deck sections by card type");
    eprintln!("  --by-cost             sort cards within sections by cost");
    eprintln!("  --compact             compact type-grouped display");
    eprintln!("  --currency <code>     usd, eur or tix");
    eprintln!("  --metadata <file>     JSON array of card metadata");
    eprintln!("  --collection <file>   `count,name` lines of owned cards");
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("decklist");

    let mut deck_path: Option<PathBuf> = None;
    let mut list_mode = false;
    let mut by_type = false;
    let mut by_cost = false;
    let mut compact = false;
    let mut currency = None;
    let mut metadata_path: Option<PathBuf> = None;
    let mut collection_path: Option<PathBuf> = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--list" => list_mode = true,
            "--by-type" => by_type = true,
            "--by-cost" => by_cost = true,
            "--compact" => compact = true,
            "--currency" => {
                let Some(code) = iter.next() else {
                    eprintln!("Error: --currency needs a value");
                    process::exit(1);
                };
                match code.parse() {
                    Ok(parsed) => currency = Some(parsed),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        process::exit(1);
                    }
                }
            }
            "--metadata" => {
                let Some(path) = iter.next() else {
                    eprintln!("Error: --metadata needs a file path");
                    process::exit(1);
                };
                metadata_path = Some(PathBuf::from(path));
            }
            "--collection" => {
                let Some(path) = iter.next() else {
                    eprintln!("Error: --collection needs a file path");
                    process::exit(1);
                };
                collection_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                print_usage(program);
                return Ok(());
            }
            other if other.starts_with('-') => {
                eprintln!("Error: unknown option {other}");
                print_usage(program);
                process::exit(1);
            }
            other if deck_path.is_none() => deck_path = Some(PathBuf::from(other)),
            other => {
                eprintln!("Error: unexpected argument {other}");
                print_usage(program);
                process::exit(1);
            }
        }
    }

    let Some(deck_path) = deck_path else {
        print_usage(program);
        process::exit(1);
    };

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            log::warn!("ignoring unreadable config file: {e}");
            Config::default()
        }
    };

    let mut settings = config.settings;
    if list_mode {
        settings.mode = DocumentMode::List;
        settings.default_section_name = "List".to_string();
    }
    if by_type {
        settings.group_by_type = true;
    }
    if by_cost {
        settings.sort_by_cost = true;
    }
    if compact {
        settings.compact = true;
    }
    if let Some(currency) = currency {
        settings.currency = currency;
    }

    let deck = fs::read_to_string(&deck_path)
        .with_context(|| format!("failed to read deck file '{}'", deck_path.display()))?;

    let collection = match collection_path.or(config.collection_path) {
        Some(path) => sources::load_collection(&path)?,
        None => CollectionCounts::new(),
    };
    let metadata = match metadata_path.or(config.metadata_path) {
        Some(path) => sources::load_metadata(&path)?,
        None => InMemoryMetadataSource::default(),
    };

    let document = render(&deck, &collection, &metadata, &settings);
    print!("{}", output::render_text(&document));
    Ok(())
}

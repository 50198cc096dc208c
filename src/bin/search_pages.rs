//! Search Extracted Page Text
//!
//! Runs the viewer search over a text file whose pages are separated by form
//! feeds, as produced by `pdftotext`.
//!
//! Usage:
//!   cargo run --bin search_pages -- paper.txt --keyword transformer
//!   cargo run --bin search_pages -- paper.txt --keyword BERT --match-case --whole-words --json

use futures::executor::block_on;
use pdf_viewer_search::document::{DocumentSource, InMemoryDocument};
use pdf_viewer_search::search::{Keyword, Match, SearchController};
use pdf_viewer_search::store::{MemoryStore, StoreValue, ViewerStore};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

struct SearchArgs {
    input: Option<PathBuf>,
    keywords: Vec<String>,
    match_case: bool,
    whole_words: bool,
    json: bool,
}

impl SearchArgs {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut parsed = Self {
            input: None,
            keywords: Vec::new(),
            match_case: false,
            whole_words: false,
            json: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--keyword" | "-k" => {
                    i += 1;
                    if i < args.len() {
                        parsed.keywords.push(args[i].clone());
                    }
                },
                "--match-case" => parsed.match_case = true,
                "--whole-words" => parsed.whole_words = true,
                "--json" => parsed.json = true,
                other => {
                    if parsed.input.is_none() {
                        parsed.input = Some(PathBuf::from(other));
                    }
                },
            }
            i += 1;
        }

        parsed
    }
}

#[derive(Serialize)]
struct MatchRecord<'a> {
    keyword: &'a str,
    page: usize,
    match_index: usize,
    start_index: usize,
    end_index: usize,
    text: &'a str,
}

impl<'a> From<&'a Match> for MatchRecord<'a> {
    fn from(m: &'a Match) -> Self {
        Self {
            keyword: m.keyword.source(),
            page: m.page_index + 1,
            match_index: m.match_index,
            start_index: m.start_index,
            end_index: m.end_index,
            text: m.text(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = SearchArgs::from_args();
    let Some(input) = args.input else {
        eprintln!(
            "Usage: search_pages <file> --keyword <keyword> [--match-case] [--whole-words] [--json]"
        );
        std::process::exit(2);
    };

    let text = std::fs::read_to_string(&input)?;
    let document = InMemoryDocument::from_form_feed_text(&text);
    log::info!("Loaded {} ({} pages)", input.display(), document.page_count());

    let store = Arc::new(MemoryStore::new());
    store.update(StoreValue::Document(Arc::new(document)));

    let search = SearchController::new(store);
    let keywords: Vec<Keyword> = args.keywords.into_iter().map(Keyword::from).collect();
    let matches = block_on(search.search_for(
        keywords,
        Some(args.match_case),
        Some(args.whole_words),
    ))?;

    if args.json {
        let records: Vec<MatchRecord> = matches.iter().map(MatchRecord::from).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for m in &matches {
        println!(
            "page {:>4}  [{}..{}]  {:?}  ({})",
            m.page_index + 1,
            m.start_index,
            m.end_index,
            m.text(),
            m.keyword.source()
        );
    }
    println!("{} matches", search.number_of_matches());

    Ok(())
}

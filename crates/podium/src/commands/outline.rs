use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::deck::Deck;
use crate::session::{PresentationSession, SessionOptions, SlideInfo};

pub fn run(file: &Path, json: bool) -> Result<()> {
    let deck = Deck::load(file).with_context(|| format!("Failed to load {}", file.display()))?;
    let deck_title = deck.title().unwrap_or_default().to_string();
    let infos = slide_infos(deck);

    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!("{} ({} slides)", deck_title.bold(), infos.len());
    for info in &infos {
        let title = if info.title.is_empty() {
            "(untitled)".dimmed().to_string()
        } else {
            info.title.clone()
        };
        println!("  {:>3}  {}", info.current.to_string().cyan(), title);
    }
    Ok(())
}

/// Walk the deck through the host API, collecting what a host would see on each slide.
fn slide_infos(deck: Deck) -> Vec<SlideInfo> {
    let total = deck.slide_count();
    let mut session = PresentationSession::new(deck, SessionOptions::default());
    (1..=total)
        .map(|number| {
            session.go_to_slide(number);
            session.current_slide_info()
        })
        .collect()
}

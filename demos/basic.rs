//! Basic example of using the word search engine

use wordsearch_core::export::{render_answer_key, render_text};
use wordsearch_core::{validate_words, Generator, MatchResult, Position};

fn main() {
    let words = validate_words(["rust", "cargo", "crate", "borrow", "trait", "lifetime", "crate"]);
    println!("Words after validation: {}\n", words.join(", "));

    let mut generator = Generator::with_seed(2024);
    let mut generation = match generator.generate_complete(&words, 12, 12, 10) {
        Ok(generation) => generation,
        Err(e) => {
            eprintln!("Generation failed: {e}");
            return;
        }
    };

    if !generation.unplaced.is_empty() {
        println!("Could not place: {}\n", generation.unplaced.join(", "));
    }

    let puzzle = &mut generation.puzzle;
    println!("{}", render_text(puzzle, Some("Rust word search")));

    // A line that is not straight
    let result = puzzle.select(Position::new(0, 0), Position::new(1, 3));
    println!("Selecting (0,0)-(1,3): {result:?}");

    // Solve every word, reading each one backwards
    let placements: Vec<_> = puzzle.registry().iter().map(|(_, w)| (w.word.clone(), w.placement)).collect();
    for (word, placement) in placements {
        if let MatchResult::Match(_) = puzzle.select(placement.end(), placement.origin) {
            println!("Found {word} ({}/{})", puzzle.found_count(), puzzle.word_count());
        }
    }
    println!("\nComplete: {}\n", puzzle.is_complete());

    println!("Answer key:");
    println!("{}", render_answer_key(puzzle));
}

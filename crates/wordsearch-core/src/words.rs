//! Word list limits and validation

/// Smallest allowed grid dimension
pub const MIN_GRID_SIZE: usize = 10;
/// Largest allowed grid dimension
pub const MAX_GRID_SIZE: usize = 25;
pub const MIN_WORD_LEN: usize = 2;
pub const MAX_WORD_LEN: usize = 15;
/// Most words a single puzzle holds
pub const MAX_WORDS_COUNT: usize = 15;
/// Random slot draws per word before it is reported unplaced
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;
/// Whole-puzzle reruns `Generator::generate_complete` makes by default
pub const MAX_GENERATION_ATTEMPTS: usize = 50;

/// True for 2-15 uppercase ASCII letters
pub fn is_valid_word(word: &str) -> bool {
    (MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()) && word.bytes().all(|b| b.is_ascii_uppercase())
}

/// Normalise raw input into a puzzle word list: entries are trimmed and
/// uppercased, anything that is not 2-15 letters is dropped, duplicates keep
/// their first occurrence, and the result is capped at `MAX_WORDS_COUNT`.
pub fn validate_words<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut validated: Vec<String> = Vec::new();
    for entry in raw {
        let word = entry.as_ref().trim().to_ascii_uppercase();
        if !is_valid_word(&word) || validated.contains(&word) {
            continue;
        }
        validated.push(word);
        if validated.len() == MAX_WORDS_COUNT {
            break;
        }
    }
    validated
}

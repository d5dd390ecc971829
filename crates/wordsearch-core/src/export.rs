//! Plain-text rendering of a puzzle for printing or piping

use crate::grid::Position;
use crate::puzzle::Puzzle;

/// Words per line in the word list section
const WORDS_PER_LINE: usize = 4;

fn push_grid(out: &mut String, puzzle: &Puzzle, show: impl Fn(usize, usize, char) -> char) {
    let grid = puzzle.grid();
    for (row, line) in grid.to_rows().iter().enumerate() {
        let cells: Vec<String> = line
            .chars()
            .enumerate()
            .map(|(col, letter)| show(row, col, letter).to_string())
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
}

fn push_words(out: &mut String, puzzle: &Puzzle) {
    let mut words: Vec<&str> = puzzle.words().map(|(_, w, _)| w).collect();
    words.sort_unstable();
    let width = words.iter().map(|w| w.len()).max().unwrap_or(0) + 2;
    for chunk in words.chunks(WORDS_PER_LINE) {
        let line: String = chunk.iter().map(|w| format!("{w:<width$}")).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
}

/// The puzzle grid followed by the sorted word list
pub fn render_text(puzzle: &Puzzle, title: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(title) = title {
        out.push_str(&format!("{title}\n\n"));
    }
    push_grid(&mut out, puzzle, |_, _, letter| letter);
    out.push('\n');
    push_words(&mut out, puzzle);
    out
}

/// The grid with every cell not on a placed word blanked to `.`
pub fn render_answer_key(puzzle: &Puzzle) -> String {
    let mut out = String::new();
    push_grid(&mut out, puzzle, |row, col, letter| {
        let occupied = puzzle
            .grid()
            .get(Position::new(row, col))
            .map(|c| c.is_occupied())
            .unwrap_or(false);
        if occupied {
            letter
        } else {
            '.'
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::generate;

    #[test]
    fn test_render_text_layout() {
        let puzzle = generate(&["LEMON", "LIME", "FIG"], 10, 10, Some(6)).unwrap().puzzle;
        let text = render_text(&puzzle, Some("Fruit"));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Fruit");
        assert_eq!(lines[1], "");
        for line in &lines[2..12] {
            assert_eq!(line.split(' ').count(), 10);
        }
        assert_eq!(lines[12], "");
        assert_eq!(lines[13], "FIG    LEMON  LIME");
    }

    #[test]
    fn test_answer_key_shows_only_words() {
        let puzzle = generate(&["BANANA"], 10, 10, Some(12)).unwrap().puzzle;
        let key = render_answer_key(&puzzle);
        let letters: usize = key.chars().filter(|c| c.is_ascii_uppercase()).count();
        assert_eq!(letters, 6);
        assert_eq!(key.chars().filter(|&c| c == '.').count(), 94);
    }
}

use crate::app::App;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::collections::BTreeSet;
use std::io;
use wordsearch_core::{Position, WordStatus};

/// Width of the info panel to the right of the grid
const PANEL_WIDTH: u16 = 26;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;
    render_game_screen(stdout, app, term_width, term_height)?;
    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let puzzle = app.game.puzzle();

    // Each cell is " X", plus a border column on each side
    let grid_width = puzzle.cols() as u16 * 2 + 3;
    let grid_height = puzzle.rows() as u16 + 2;

    let total_width = grid_width + 3 + PANEL_WIDTH;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > grid_height + 8 { 2 } else { 1 };

    render_grid(stdout, app, start_x, start_y)?;
    render_info_panel(stdout, app, start_x + grid_width + 3, start_y)?;
    render_controls(stdout, app, start_x, start_y + grid_height + 1)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let puzzle = app.game.puzzle();
    let found = puzzle.found_cells();
    let preview = app.preview_cells();

    let horizontal = "─".repeat(puzzle.cols() * 2 + 1);
    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        MoveTo(x, y),
        Print(format!("┌{horizontal}┐"))
    )?;

    for row in 0..puzzle.rows() {
        let cell_y = y + 1 + row as u16;
        execute!(
            stdout,
            MoveTo(x, cell_y),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("│")
        )?;
        for col in 0..puzzle.cols() {
            render_cell(stdout, app, Position::new(row, col), &found, &preview)?;
        }
        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print(" │")
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + 1 + puzzle.rows() as u16),
        Print(format!("└{horizontal}┘"))
    )?;
    Ok(())
}

fn render_cell(
    stdout: &mut io::Stdout,
    app: &App,
    pos: Position,
    found: &BTreeSet<Position>,
    preview: &BTreeSet<Position>,
) -> io::Result<()> {
    let theme = &app.theme;
    let letter = app
        .game
        .puzzle()
        .grid()
        .letter(pos)
        .ok()
        .flatten()
        .unwrap_or(' ');

    let bg = if pos == app.cursor {
        theme.cursor_bg
    } else if app.anchor == Some(pos) {
        theme.anchor_bg
    } else if preview.contains(&pos) {
        theme.selection_bg
    } else if app.hint_cell == Some(pos) {
        theme.hint_bg
    } else if found.contains(&pos) {
        theme.found_bg
    } else {
        theme.bg
    };

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        Print(" "),
        SetBackgroundColor(bg),
        SetForegroundColor(theme.letter),
        Print(letter)
    )?;
    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;
    let puzzle = game.puzzle();

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print(format!("═══ {} ═══", game.title().to_uppercase()))
    )?;

    let found_color = if game.is_completed() { theme.success } else { theme.fg };
    execute!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print("Found: "),
        SetForegroundColor(found_color),
        Print(format!("{}/{}", puzzle.found_count(), puzzle.word_count())),
        MoveTo(x, y + 3),
        SetForegroundColor(theme.info),
        Print("Time:  "),
        SetForegroundColor(theme.fg),
        Print(game.elapsed_string()),
        MoveTo(x, y + 4),
        SetForegroundColor(theme.info),
        Print("Hints: "),
        SetForegroundColor(theme.fg),
        Print(game.hints_used())
    )?;

    let mut line = y + 6;
    for (id, word, status) in puzzle.words() {
        let marker = if app.selected_word == Some(id) { "›" } else { " " };
        let (color, text) = match status {
            WordStatus::Found => (theme.success, format!("{marker} ✓ {word}")),
            WordStatus::Unfound => (theme.fg, format!("{marker}   {word}")),
        };
        execute!(stdout, MoveTo(x, line), SetForegroundColor(color), Print(text))?;
        line += 1;
    }

    for word in game.unplaced() {
        execute!(
            stdout,
            MoveTo(x, line),
            SetForegroundColor(theme.error),
            Print(format!("  ✗ {word}"))
        )?;
        line += 1;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    let controls = [
        ("hjkl/Arrows", "Move"),
        ("Space", "Mark line"),
        ("Esc", "Cancel"),
        ("Tab", "Pick word"),
        ("?", "Hint"),
        ("n", "Reshuffle"),
        ("r", "Random list"),
        ("s/o", "Save/Open"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    // Display in columns of 4
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 4;
        let row = i % 4;
        let cx = x + (col as u16) * 24;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>11}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(stdout: &mut io::Stdout, app: &App, msg: &str, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.cursor_bg),
        Print(&padded)
    )?;

    Ok(())
}

mod app;
mod game;
mod logging;
mod render;
mod settings;
mod theme;

use app::App;
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::Game;
use logging::{init_logger, LogTarget};
use rand::seq::SliceRandom;
use settings::{data_dir, Settings};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use wordsearch_core::export::{render_answer_key, render_text};
use wordsearch_core::{validate_words, BUILTIN_WORD_LISTS};

#[derive(Parser)]
#[command(name = "wordsearch", version, about = "Word search puzzles in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle interactively (default)
    Play(PuzzleArgs),
    /// Print a puzzle as text
    Generate {
        #[command(flatten)]
        puzzle: PuzzleArgs,
        /// Append the answer key
        #[arg(long)]
        answers: bool,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also save a session that `play --resume` can open
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Show available word lists, or store or delete a custom one
    Lists {
        /// Name for a new custom list
        #[arg(long, requires = "words", conflicts_with = "remove")]
        add: Option<String>,
        /// Name of a custom list to delete
        #[arg(long)]
        remove: Option<String>,
        /// File with one word per line for the new list
        #[arg(short, long)]
        words: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct PuzzleArgs {
    /// Grid rows (10-25)
    #[arg(long)]
    rows: Option<usize>,
    /// Grid columns (10-25)
    #[arg(long)]
    cols: Option<usize>,
    /// Seed for a reproducible puzzle
    #[arg(long)]
    seed: Option<u64>,
    /// File with one word per line
    #[arg(short, long, conflicts_with = "list")]
    words: Option<PathBuf>,
    /// Built-in or custom word list name
    #[arg(short, long)]
    list: Option<String>,
    /// Open a saved session instead of generating
    #[arg(long, conflicts_with_all = ["words", "list", "seed"])]
    resume: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // The full-screen UI owns the terminal, so it logs to a file
    match &cli.command {
        None | Some(Command::Play(_)) => {
            init_logger(cli.verbose, LogTarget::File(&data_dir().join("wordsearch.log")))
        }
        Some(_) => init_logger(cli.verbose, LogTarget::Stderr),
    }
    let settings = Settings::load();

    let result = match cli.command {
        None => play(PuzzleArgs::default(), settings),
        Some(Command::Play(args)) => play(args, settings),
        Some(Command::Generate {
            puzzle,
            answers,
            output,
            save,
        }) => generate(puzzle, &settings, answers, output, save),
        Some(Command::Lists { add, remove, words }) => lists(settings, add, remove, words),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Read a word file, one word per line
fn read_words(path: &PathBuf) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let words = validate_words(text.lines());
    if words.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("no valid words in {} (words must be 2-15 letters)", path.display()),
        ));
    }
    Ok(words)
}

/// Pick the word list for a new puzzle: a file, a named list, or a random
/// built-in one
fn resolve_words(args: &PuzzleArgs, settings: &Settings) -> io::Result<(String, Vec<String>)> {
    if let Some(path) = &args.words {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Custom".to_string());
        return Ok((title, read_words(path)?));
    }
    if let Some(name) = &args.list {
        return settings.word_list(name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("unknown word list '{name}' (see `wordsearch lists`)"),
            )
        });
    }
    BUILTIN_WORD_LISTS
        .choose(&mut rand::thread_rng())
        .map(|list| (list.name.to_string(), list.to_vec()))
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no word lists available"))
}

fn new_game(args: &PuzzleArgs, settings: &Settings) -> io::Result<Game> {
    if let Some(path) = &args.resume {
        let json = fs::read_to_string(path)?;
        return Game::deserialize(&json).map_err(io::Error::from);
    }
    let (title, words) = resolve_words(args, settings)?;
    let rows = args.rows.unwrap_or(settings.rows);
    let cols = args.cols.unwrap_or(settings.cols);
    Game::new(&title, &words, rows, cols, args.seed)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn generate(
    args: PuzzleArgs,
    settings: &Settings,
    answers: bool,
    output: Option<PathBuf>,
    save: Option<PathBuf>,
) -> io::Result<()> {
    let game = new_game(&args, settings)?;
    let puzzle = game.puzzle();

    let mut text = render_text(puzzle, Some(game.title()));
    if !game.unplaced().is_empty() {
        text.push_str(&format!("\nNot placed: {}\n", game.unplaced().join(", ")));
    }
    if answers {
        text.push_str("\nAnswer key\n\n");
        text.push_str(&render_answer_key(puzzle));
    }

    match output {
        Some(path) => fs::write(path, text)?,
        None => io::stdout().write_all(text.as_bytes())?,
    }
    if let Some(path) = save {
        fs::write(path, game.serialize()?)?;
    }
    Ok(())
}

fn lists(
    mut settings: Settings,
    add: Option<String>,
    remove: Option<String>,
    words: Option<PathBuf>,
) -> io::Result<()> {
    if let Some(name) = remove {
        if !settings.remove_custom_list(&name) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("'{name}' is not a custom list"),
            ));
        }
        settings.save()?;
        println!("Removed list '{name}'");
        return Ok(());
    }
    if let (Some(name), Some(path)) = (add, words) {
        let words = read_words(&path)?;
        let kept = settings.add_custom_list(&name, &words).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("'{name}' is a built-in list"),
            )
        })?;
        settings.save()?;
        println!("Saved list '{name}' with {kept} words");
        return Ok(());
    }

    for name in settings.list_names() {
        if let Some((_, words)) = settings.word_list(&name) {
            println!("{name}: {}", words.join(", "));
        }
    }
    Ok(())
}

fn play(args: PuzzleArgs, settings: Settings) -> io::Result<()> {
    // Generate before touching the terminal so errors print normally
    let game = new_game(&args, &settings)?;
    let mut app = App::new(game, settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input with timeout for the clock and message timer
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(100)))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

use clap::Parser;
use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::time::Instant;

use cluedrill::annotate::{annotate, AnnotatedClue, Segment, SpanCategory};
use cluedrill::clue::ClueEntry;
use cluedrill::clue_set::ClueSet;
use cluedrill::errors::ClueSetError;
use cluedrill::game::{GameContext, GameSignal};
use cluedrill::session::Session;

/// Cryptic-crossword trainer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the clue-set JSON file (an array of clue records)
    clue_set: String,

    /// List the clues (index, kind, enumeration, text) and exit.
    /// This is also the default when no mode is given.
    #[arg(short, long)]
    list: bool,

    /// Include answers in the listing
    #[arg(short, long, requires = "list")]
    answers: bool,

    /// Show one clue's annotated text and structure, then exit
    #[arg(short, long, value_name = "INDEX", conflicts_with = "list")]
    clue: Option<usize>,

    /// Play the set interactively on stdin
    #[arg(short, long, conflicts_with_all = ["list", "clue"])]
    play: bool,
}

/// Entry point of the cluedrill CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("CLUEDRILL_DEBUG").is_ok();
    cluedrill::log::init_logger(debug_enabled);

    log::info!("Starting cluedrill trainer");

    if let Err(e) = try_main() {
        // Print the error to stderr, with detailed formatting when the clue
        // set itself is the problem
        if let Some(set_err) = e.downcast_ref::<ClueSetError>() {
            eprintln!("Error: {}", set_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        // Exit explicitly with a nonzero code so scripts can detect failure
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the cluedrill CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Read and normalize the clue set.
/// 3. Dispatch to the selected mode: list, show one clue, or play.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // 1. Load the clue set, skipping unusable records with a warning
    let t_load = Instant::now();
    let contents = std::fs::read_to_string(&cli.clue_set)
        .map_err(|e| format!("failed to read clue set from '{}': {e}", cli.clue_set))?;
    let set = ClueSet::parse_from_str(&contents)?;
    let load_secs = t_load.elapsed().as_secs_f64();
    eprintln!("Loaded {} clues in {load_secs:.3}s", set.clues.len());

    // 2. Dispatch
    if cli.play {
        play(GameContext::new(set)?)
    } else if let Some(index) = cli.clue {
        show_clue(&set, index)
    } else {
        list_clues(&set, cli.answers);
        Ok(())
    }
}

/// One line per clue: index, kind, enumeration, surface text.
fn list_clues(set: &ClueSet, with_answers: bool) {
    for (i, entry) in set.clues.iter().enumerate() {
        if with_answers {
            println!(
                "{i:>3}  {:<12} {:<8} {}  [{}]",
                entry.clue_kind,
                entry.enumeration(),
                entry.clue_text,
                entry.answer
            );
        } else {
            println!(
                "{i:>3}  {:<12} {:<8} {}",
                entry.clue_kind,
                entry.enumeration(),
                entry.clue_text
            );
        }
    }
}

/// Annotated view of a single clue: marked-up text plus a span legend and
/// the parse breakdown. This shows everything, answer aside, so it is the
/// inspection view rather than the playing view.
fn show_clue(set: &ClueSet, index: usize) -> Result<(), Box<dyn std::error::Error>> {
    let Some(entry) = set.clues.get(index) else {
        return Err(Box::new(ClueSetError::ClueIndexOutOfRange {
            requested: index,
            len: set.clues.len(),
        }));
    };
    let annotated = annotate(entry);

    println!("clue {index} [{}] {}", annotated.kind, entry.enumeration());
    println!("  {}", mark_spans(&annotated, false));
    for segment in &annotated.segments {
        if let Segment::Span {
            text,
            tooltip,
            category,
        } = segment
        {
            println!("    {:<10} \"{text}\": {tooltip}", category.as_str());
        }
    }
    if !entry.parts.is_empty() {
        println!("  parts:");
        for part in &entry.parts {
            if part.hint.is_empty() {
                println!("    {:?}", part.text);
            } else {
                println!("    {:?}: {}", part.text, part.hint);
            }
        }
    }
    Ok(())
}

/// Interactive session over stdin. Single letters fill the grid; the other
/// commands mirror the trainer buttons.
fn play(mut ctx: GameContext) -> Result<(), Box<dyn std::error::Error>> {
    println!("letters to type, '<' backspace, '!' submit, '?d' definition,");
    println!("'?l' letter, '?s' structure, 'give' reveal, 'next', 'quit'");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        render_state(&ctx);
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // EOF
        };
        let line = line?;
        match line.trim() {
            "quit" | "q" => break,
            "next" | "n" => {
                if ctx.advance() == GameSignal::Finished {
                    println!("Already on the last clue.");
                }
            }
            "give" => {
                if handle_signal(ctx.give_up()) {
                    break;
                }
            }
            "!" => {
                if handle_signal(ctx.submit()) {
                    break;
                }
            }
            "?d" => ctx.session_mut().reveal_definition(),
            "?s" => ctx.session_mut().reveal_structure(),
            "?l" => {
                if !ctx.session_mut().reveal_one_letter() {
                    println!("Nothing left to reveal.");
                }
            }
            "<" => ctx.session_mut().backspace(),
            other => {
                for ch in other.chars() {
                    ctx.session_mut().type_letter(ch);
                }
            }
        }
    }
    Ok(())
}

/// Print feedback for a game signal; true means the set is finished.
fn handle_signal(signal: GameSignal) -> bool {
    match signal {
        GameSignal::Correct => println!("✓ Correct!"),
        GameSignal::Incorrect => println!("✗ Not quite."),
        GameSignal::Revealed => println!("Answer revealed."),
        GameSignal::Next => println!("Moving on."),
        GameSignal::Finished => {
            println!("Set complete.");
            return true;
        }
    }
    false
}

/// Current clue, letter grid, and whatever the player has revealed so far.
fn render_state(ctx: &GameContext) {
    let entry = ctx.current_clue();
    let session = ctx.session();
    let annotated = annotate(entry);

    println!();
    println!(
        "Clue {}/{} [{}] {}",
        ctx.current_index() + 1,
        ctx.clue_count(),
        annotated.kind,
        entry.enumeration()
    );
    if session.revealed_definition() {
        println!("  {}", mark_spans(&annotated, true));
    } else {
        println!("  {}", entry.clue_text);
    }

    let (grid, caret) = render_grid(entry, session);
    println!("  {grid}");
    if !session.solved() {
        println!("  {caret}");
    }

    if session.revealed_structure() {
        for segment in &annotated.segments {
            if let Segment::Span {
                text,
                tooltip,
                category,
            } = segment
            {
                println!("    {:<10} \"{text}\": {tooltip}", category.as_str());
            }
        }
    }
    if session.solved() {
        println!("  Solved. '!' to {}.", session.control_label());
    }
}

/// Mark spans inline: definitions in [...], indicators in {...}, fodder in
/// <...>. With `definition_only` the other categories render as plain text,
/// which is what the play view shows after a definition reveal.
fn mark_spans(annotated: &AnnotatedClue, definition_only: bool) -> String {
    let mut out = String::new();
    for segment in &annotated.segments {
        match segment {
            Segment::Plain { text } => out.push_str(text),
            Segment::Span { text, category, .. } => {
                let (open, close) = match category {
                    SpanCategory::Definition => ('[', ']'),
                    SpanCategory::Indicator => ('{', '}'),
                    SpanCategory::Fodder => ('<', '>'),
                };
                if definition_only && *category != SpanCategory::Definition {
                    out.push_str(text);
                } else {
                    out.push(open);
                    out.push_str(text);
                    out.push(close);
                }
            }
        }
    }
    out
}

/// Letter grid with word separators, plus an aligned caret line marking the
/// cursor.
fn render_grid(entry: &ClueEntry, session: &Session) -> (String, String) {
    // Slot indices where a new answer word starts (first word excluded).
    let mut word_starts = Vec::new();
    let mut acc = 0;
    for len in entry.word_lengths() {
        acc += len;
        word_starts.push(acc);
    }
    word_starts.pop();

    let mut grid = String::new();
    let mut caret = String::new();
    for (i, slot) in session.letters().iter().enumerate() {
        if word_starts.contains(&i) {
            grid.push_str("/ ");
            caret.push_str("  ");
        }
        grid.push(slot.unwrap_or('_'));
        grid.push(' ');
        caret.push(if i == session.cursor() { '^' } else { ' ' });
        caret.push(' ');
    }
    (grid, caret)
}

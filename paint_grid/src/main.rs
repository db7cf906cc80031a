//! Interactive terminal driver for the painting core — point, paint and
//! erase without a camera.
//!
//! Usage: `grid_menu [config.toml]`

use paint_grid::{
    pointing_hand, CommandLog, DetectionFrame, Mode, PaintConfig, PaintOutcome, Session,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            Finger-Paint Grid Explorer                ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match PaintConfig::load(&path) {
            Ok(c)  => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => PaintConfig::default(),
    };

    let mut session = match Session::new(&config) {
        Ok(s)  => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let lift = config.gesture.threshold + 20.0;
    let g = *session.geometry();
    println!(
        "  Frame {}×{}  grid {}×{}  cell {:.2}×{:.2} px\n",
        g.width, g.height, g.size, g.size, g.cell_width(), g.cell_height()
    );

    loop {
        print_ops_menu(session.mode());
        let Some(choice) = read_line("Command: ") else {
            println!("\nGoodbye!\n");
            break;
        };
        let choice = choice.trim().to_ascii_lowercase();

        match choice.as_str() {
            "1" | "d" => {
                session.set_mode(Mode::Draw);
                println!("  Mode: Draw");
            }
            "2" | "e" => {
                session.set_mode(Mode::Erase);
                println!("  Mode: Erase");
            }
            "3" | "p" => {
                let Some(x) = read_line("  Fingertip x: ").as_deref().and_then(parse_coord) else {
                    println!("  ⚠  Not a number; nothing painted.");
                    println!();
                    continue;
                };
                let Some(y) = read_line("  Fingertip y: ").as_deref().and_then(parse_coord) else {
                    println!("  ⚠  Not a number; nothing painted.");
                    println!();
                    continue;
                };
                let frame = DetectionFrame::new(true, vec![pointing_hand(x, y, lift)]);
                let report = session.tick(&frame);
                match report.outcome {
                    PaintOutcome::Filled(c)    => println!("  Filled ({}, {})", c.col, c.row),
                    PaintOutcome::Erased(c)    => println!("  Erased ({}, {})", c.col, c.row),
                    PaintOutcome::Unchanged(c) => println!("  ({}, {}) already {}",
                        c.col, c.row,
                        if session.mode() == Mode::Draw { "filled" } else { "empty" }),
                    PaintOutcome::Idle         => println!("  Finger not raised"),
                }
            }
            "4" | "c" => {
                session.clear();
                println!("  Grid cleared.");
            }
            "5" | "s" => show_grid(&session),
            "6" | "f" => {
                let frame = DetectionFrame::empty();
                let mut log = CommandLog::new();
                session.render(&frame, &mut log);
                let (lines, rects, points) = log.counts();
                println!("  Frame: {} lines, {} cells, {} joints", lines, rects, points);
            }
            "q" => {
                println!("\nGoodbye!\n");
                break;
            }
            _ => println!("  ⚠  Unknown command."),
        }
        println!();
    }
}

fn print_ops_menu(mode: Mode) {
    println!("  ┌─ mode: {:<6} ─────────────────────────────┐", mode.to_string());
    println!("  │  1/d  Draw mode                            │");
    println!("  │  2/e  Erase mode                           │");
    println!("  │  3/p  Raise finger at (x, y)               │");
    println!("  │  4/c  Clear grid                           │");
    println!("  │  5/s  Show grid                            │");
    println!("  │  6/f  Frame summary                        │");
    println!("  │  q    Quit                                 │");
    println!("  └────────────────────────────────────────────┘");
}

fn show_grid(session: &Session) {
    let size = session.geometry().size;
    println!("  {} filled", session.grid().len());
    for row in 0..size {
        let line: String = (0..size)
            .map(|col| if session.grid().contains(paint_grid::Cell::new(col, row)) { '#' } else { '.' })
            .collect();
        println!("  {}", line);
    }
}

/// Prompt on stdout and read one line; `None` once stdin is closed.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok();
    next_line(&mut io::stdin().lock())
}

fn next_line(input: &mut impl BufRead) -> Option<String> {
    let mut buf = String::new();
    match input.read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_)          => Some(buf),
    }
}

/// A finite pixel coordinate, or `None` for anything else.
fn parse_coord(text: &str) -> Option<f32> {
    text.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

#![cfg(feature = "std")]
//! Interactive terminal front end. Reads commands line by line and prints both boards.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::ai::Difficulty;
use crate::board::BoardView;
use crate::common::{AttackOutcome, CellState, Coord};
use crate::config::{GRID_SIZE, NUM_SHIPS};
use crate::game::{Game, GamePhase};
use crate::ship::Orientation;

/// Settings for a terminal session.
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    /// Difficulty for the first game; later games prompt for it.
    pub difficulty: Option<Difficulty>,
    /// Pause before each computer shot.
    pub computer_delay: Duration,
}

pub fn coord_to_string(at: Coord) -> String {
    let col = (b'A' + at.x as u8) as char;
    format!("{}{}", col, at.y + 1)
}

/// Parse coordinates like `A5` or `j10` (column letter, then row number).
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let x = (col_ch as u8).wrapping_sub(b'A') as usize;
    if x >= GRID_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > GRID_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(Coord::new(x, row - 1))
}

pub fn parse_difficulty(input: &str) -> Option<Difficulty> {
    match input {
        "1" | "e" | "easy" => Some(Difficulty::Easy),
        "2" | "m" | "medium" => Some(Difficulty::Medium),
        "3" | "h" | "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}

/// One-line description of what the game is waiting for.
pub fn status_line(game: &Game) -> String {
    match game.phase() {
        GamePhase::DifficultySelect => "Select difficulty level".to_string(),
        GamePhase::Placement => {
            let orient = match game.pending_orientation() {
                Orientation::Horizontal => "Horizontal",
                Orientation::Vertical => "Vertical",
            };
            format!(
                "Place your ships (Size: {}, {})",
                game.pending_ship_size().unwrap_or(0),
                orient
            )
        }
        GamePhase::PlayerTurn => "Your turn - Attack enemy fleet!".to_string(),
        GamePhase::ComputerTurn => "Computer is thinking...".to_string(),
        GamePhase::PlayerWins => "Congratulations! You won! Type 'r' to restart".to_string(),
        GamePhase::ComputerWins => "Computer won! Type 'r' to restart".to_string(),
    }
}

fn outcome_text(outcome: AttackOutcome) -> &'static str {
    match outcome {
        AttackOutcome::Hit => "Hit!",
        AttackOutcome::Miss => "Miss.",
        AttackOutcome::Destroyed => "Ship destroyed!",
        AttackOutcome::AlreadyResolved => "Already resolved.",
    }
}

fn cell_char(cell: CellState) -> char {
    match cell {
        CellState::Empty => '.',
        CellState::Ship => 'S',
        CellState::Hit => 'X',
        CellState::Miss => 'o',
        CellState::Destroyed => '#',
    }
}

/// Print the player's fleet and the revealed enemy waters side by side.
pub fn render_boards<W: Write>(out: &mut W, game: &Game) -> io::Result<()> {
    let own = game.player_board_view();
    let enemy = game.opponent_board_view();
    let (mine, theirs) = game.ship_counts();
    let header: String = (0..GRID_SIZE)
        .map(|c| format!(" {}", (b'A' + c as u8) as char))
        .collect();
    writeln!(out)?;
    writeln!(
        out,
        "    Your ships: {:2}/{:<8}        Enemy ships: {:2}/{}",
        mine, NUM_SHIPS, theirs, NUM_SHIPS
    )?;
    writeln!(out, "    {}        {}", header, header)?;
    for y in 0..GRID_SIZE {
        writeln!(out, " {:2} {}     {:2} {}", y + 1, board_row(&own, y), y + 1, board_row(&enemy, y))?;
    }
    writeln!(out)
}

fn board_row(view: &BoardView, y: usize) -> String {
    (0..GRID_SIZE)
        .map(|x| format!(" {}", cell_char(view.get(Coord::new(x, y)).unwrap_or_default())))
        .collect()
}

fn read_command<I: BufRead>(lines: &mut io::Lines<I>) -> io::Result<Option<String>> {
    Ok(lines
        .next()
        .transpose()?
        .map(|l| l.trim().to_ascii_lowercase()))
}

fn prompt<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    write!(out, "{}", text)?;
    out.flush()
}

fn is_quit(cmd: &str) -> bool {
    matches!(cmd, "q" | "quit" | "exit")
}

/// Run games on `game` until the input ends or the player quits.
pub fn play<I: BufRead, O: Write>(
    game: &mut Game,
    input: I,
    mut out: O,
    opts: &TerminalOptions,
) -> anyhow::Result<()> {
    let mut lines = input.lines();
    let mut preset = opts.difficulty;
    loop {
        match game.phase() {
            GamePhase::DifficultySelect => {
                let difficulty = match preset.take() {
                    Some(d) => d,
                    None => {
                        prompt(&mut out, "Select difficulty [easy/medium/hard]: ")?;
                        let Some(cmd) = read_command(&mut lines)? else {
                            return Ok(());
                        };
                        if is_quit(&cmd) {
                            return Ok(());
                        }
                        match parse_difficulty(&cmd) {
                            Some(d) => d,
                            None => {
                                writeln!(out, "Unknown difficulty '{}'", cmd)?;
                                continue;
                            }
                        }
                    }
                };
                game.new_game(difficulty).map_err(|e| anyhow::anyhow!(e))?;
            }
            GamePhase::Placement => {
                render_boards(&mut out, game)?;
                writeln!(out, "{}", status_line(game))?;
                prompt(&mut out, "Bow position (e.g. A1), 'r' to rotate, 'auto' to fill: ")?;
                let Some(cmd) = read_command(&mut lines)? else {
                    return Ok(());
                };
                match cmd.as_str() {
                    c if is_quit(c) => return Ok(()),
                    "r" | "rotate" => game.rotate_pending_ship(),
                    "auto" => game
                        .auto_place_player_fleet()
                        .map_err(|e| anyhow::anyhow!(e))?,
                    other => match parse_coord(other) {
                        Ok(at) => {
                            let orient = game.pending_orientation();
                            if let Err(e) = game.place_player_ship(at, orient) {
                                writeln!(out, "Cannot place ship at {}: {}", coord_to_string(at), e)?;
                            }
                        }
                        Err(msg) => writeln!(out, "{}", msg)?,
                    },
                }
            }
            GamePhase::PlayerTurn => {
                render_boards(&mut out, game)?;
                writeln!(out, "{}", status_line(game))?;
                prompt(&mut out, "Target: ")?;
                let Some(cmd) = read_command(&mut lines)? else {
                    return Ok(());
                };
                if is_quit(&cmd) {
                    return Ok(());
                }
                match parse_coord(&cmd) {
                    Ok(at) => {
                        let outcome = game.attack_computer(at).map_err(|e| anyhow::anyhow!(e))?;
                        writeln!(out, "You fire at {}: {}", coord_to_string(at), outcome_text(outcome))?;
                    }
                    Err(msg) => writeln!(out, "{}", msg)?,
                }
            }
            GamePhase::ComputerTurn => {
                writeln!(out, "{}", status_line(game))?;
                if !opts.computer_delay.is_zero() {
                    thread::sleep(opts.computer_delay);
                }
                let mv = game.tick_computer_turn().map_err(|e| anyhow::anyhow!(e))?;
                writeln!(
                    out,
                    "Computer fires at {}: {}",
                    coord_to_string(mv.at),
                    outcome_text(mv.outcome)
                )?;
            }
            GamePhase::PlayerWins | GamePhase::ComputerWins => {
                render_boards(&mut out, game)?;
                let stats = game.stats();
                writeln!(out, "{}", status_line(game))?;
                writeln!(
                    out,
                    "Shots - you: {} ({} hits), computer: {} ({} hits)",
                    stats.player_shots, stats.player_hits, stats.computer_shots, stats.computer_hits
                )?;
                prompt(&mut out, "> ")?;
                let Some(cmd) = read_command(&mut lines)? else {
                    return Ok(());
                };
                match cmd.as_str() {
                    "r" | "restart" => game.restart().map_err(|e| anyhow::anyhow!(e))?,
                    c if is_quit(c) => return Ok(()),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::io;
#[cfg(feature = "std")]
use std::time::Duration;

#[cfg(feature = "std")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use seabattle::{
    cli::{self, TerminalOptions},
    init_logging, Difficulty, Game, DEFAULT_COMPUTER_DELAY_MS,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

#[cfg(feature = "std")]
impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in this terminal.
    Play {
        #[arg(long, value_enum, help = "Skip the difficulty prompt for the first game")]
        difficulty: Option<DifficultyArg>,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_COMPUTER_DELAY_MS, help = "Pause before each computer shot")]
        delay_ms: u64,
    },
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            difficulty,
            seed,
            delay_ms,
        } => {
            let mut game = match seed {
                Some(s) => {
                    println!("Using fixed seed: {} (game will be reproducible)", s);
                    Game::from_seed(s)
                }
                None => Game::from_entropy(),
            };
            let opts = TerminalOptions {
                difficulty: difficulty.map(Difficulty::from),
                computer_delay: Duration::from_millis(delay_ms),
            };
            let stdin = io::stdin();
            cli::play(&mut game, stdin.lock(), io::stdout(), &opts)?;
        }
    }
    Ok(())
}

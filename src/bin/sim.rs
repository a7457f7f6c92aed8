#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use rand::{rngs::SmallRng, SeedableRng};
#[cfg(feature = "std")]
use seabattle::{cli::parse_difficulty, sim::{clear_fleet, SimOutcome}};
#[cfg(feature = "std")]
use serde_json::json;

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    seabattle::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if !(3..=4).contains(&args.len()) {
        let program = args.first().map_or("sim", String::as_str);
        eprintln!("Usage: {} <easy|medium|hard> <seed> [games]", program);
        std::process::exit(1);
    }
    let difficulty = parse_difficulty(&args[1].to_ascii_lowercase())
        .ok_or_else(|| anyhow::anyhow!("unknown difficulty '{}'", args[1]))?;
    let seed: u64 = args[2].parse()?;
    let games: usize = match args.get(3) {
        Some(n) => n.parse()?,
        None => 100,
    };
    if games == 0 {
        anyhow::bail!("games must be at least 1");
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let runs = (0..games)
        .map(|_| clear_fleet(difficulty, &mut rng).map_err(|e| anyhow::anyhow!(e)))
        .collect::<anyhow::Result<Vec<SimOutcome>>>()?;

    let total: usize = runs.iter().map(|r| r.shots).sum();
    let result = json!({
        "difficulty": difficulty,
        "seed": seed,
        "games": games,
        "mean_shots": total as f64 / games as f64,
        "min_shots": runs.iter().map(|r| r.shots).min(),
        "max_shots": runs.iter().map(|r| r.shots).max(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

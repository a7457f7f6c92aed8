//! Headless runs of a targeting strategy against a random fleet.

use rand::Rng;

use crate::ai::{Difficulty, Targeting, TargetingStrategy};
use crate::board::Board;
use crate::common::GameError;
use crate::config::{FLEET, GRID_SIZE};

/// Result of one strategy clearing one fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SimOutcome {
    pub difficulty: Difficulty,
    pub shots: usize,
    pub hits: usize,
}

/// Place a random fleet and let the `difficulty` strategy fire until it is gone.
pub fn clear_fleet<R: Rng + ?Sized>(
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<SimOutcome, GameError> {
    let mut board = Board::new();
    board.place_fleet_randomly(rng, &FLEET)?;
    let mut targeting = Targeting::for_difficulty(difficulty);
    let mut outcome = SimOutcome {
        difficulty,
        shots: 0,
        hits: 0,
    };
    while !board.all_ships_destroyed() {
        // every shot resolves a cell, so a full board ends the loop
        if outcome.shots >= GRID_SIZE * GRID_SIZE {
            return Err(GameError::NoTargetAvailable);
        }
        let view = board.revealed_view();
        let at = targeting
            .select_target(&view, rng)
            .ok_or(GameError::NoTargetAvailable)?;
        let result = board.attack(at)?;
        targeting.on_result(at, result, &board.revealed_view());
        outcome.shots += 1;
        outcome.hits += usize::from(result.is_hit());
    }
    Ok(outcome)
}

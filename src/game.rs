//! Turn controller: sequences difficulty choice, placement, alternating attacks and the
//! terminal win states, driving both boards and the computer's targeting strategy.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::ai::{Difficulty, Targeting, TargetingStrategy};
use crate::board::{Board, BoardView};
use crate::common::{AttackOutcome, Coord, GameError};
use crate::config::FLEET;
use crate::ship::Orientation;

/// Phase of a game. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    #[default]
    DifficultySelect,
    Placement,
    PlayerTurn,
    ComputerTurn,
    PlayerWins,
    ComputerWins,
}

/// Inputs that move the game between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// A difficulty was chosen and the computer fleet is in place.
    GameStarted,
    /// The last player ship was placed.
    FleetPlaced,
    /// The player fired; `fleet_destroyed` tells whether the computer has ships left.
    PlayerAttacked {
        outcome: AttackOutcome,
        fleet_destroyed: bool,
    },
    /// The computer fired at the player's board.
    ComputerAttacked {
        outcome: AttackOutcome,
        fleet_destroyed: bool,
    },
    Restart,
}

impl GamePhase {
    /// Transition table. `None` means the event is not allowed in this phase.
    pub fn next(self, event: PhaseEvent) -> Option<GamePhase> {
        use GamePhase::*;
        use PhaseEvent::*;
        match (self, event) {
            (DifficultySelect, GameStarted) => Some(Placement),
            (Placement, FleetPlaced) => Some(PlayerTurn),
            (PlayerTurn, PlayerAttacked { fleet_destroyed: true, .. }) => Some(PlayerWins),
            (PlayerTurn, PlayerAttacked { outcome, .. }) => Some(match outcome {
                AttackOutcome::Miss => ComputerTurn,
                _ => PlayerTurn,
            }),
            (ComputerTurn, ComputerAttacked { fleet_destroyed: true, .. }) => Some(ComputerWins),
            (ComputerTurn, ComputerAttacked { outcome, .. }) => Some(match outcome {
                AttackOutcome::Miss => PlayerTurn,
                _ => ComputerTurn,
            }),
            (PlayerWins | ComputerWins, Restart) => Some(DifficultySelect),
            _ => None,
        }
    }

    /// `PlayerWins` and `ComputerWins` accept nothing but a restart.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::PlayerWins | GamePhase::ComputerWins)
    }
}

/// Who fired a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Computer,
}

/// The most recent resolved attack, for renderers that animate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct LastMove {
    pub side: Side,
    pub at: Coord,
    pub outcome: AttackOutcome,
}

/// Shots fired and landed by each side in the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotStats {
    pub player_shots: usize,
    pub player_hits: usize,
    pub computer_shots: usize,
    pub computer_hits: usize,
}

/// Progress of the placement phase after a ship was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementProgress {
    /// More ships to go; carries the size of the next one.
    Next(usize),
    /// The whole fleet is placed and the player moves first.
    FleetComplete,
}

/// Top-level game state machine.
pub struct Game {
    phase: GamePhase,
    player: Board,
    computer: Board,
    targeting: Targeting,
    /// Index into `FLEET` of the next ship the player places.
    pending: usize,
    pending_orientation: Orientation,
    last_move: Option<LastMove>,
    stats: ShotStats,
    rng: SmallRng,
}

impl Game {
    /// Create a game in `DifficultySelect` that draws all randomness from `rng`.
    pub fn new(rng: SmallRng) -> Self {
        Self {
            phase: GamePhase::DifficultySelect,
            player: Board::new(),
            computer: Board::new(),
            targeting: Targeting::for_difficulty(Difficulty::default()),
            pending: 0,
            pending_orientation: Orientation::Horizontal,
            last_move: None,
            stats: ShotStats::default(),
            rng,
        }
    }

    /// Deterministic game for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Game seeded from the thread-local generator.
    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_rng(&mut rand::rng()))
    }

    fn advance(&mut self, event: PhaseEvent) -> Result<(), GameError> {
        let next = self
            .phase
            .next(event)
            .ok_or(GameError::OutOfTurnAction { phase: self.phase })?;
        if next != self.phase {
            debug!("{:?} -> {:?} on {:?}", self.phase, next, event);
        }
        self.phase = next;
        Ok(())
    }

    fn require(&self, phase: GamePhase) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::OutOfTurnAction { phase: self.phase })
        }
    }

    /// Start a game at `difficulty`: clear both boards, deploy the computer fleet and
    /// reset the targeting memory. Only valid in `DifficultySelect`.
    ///
    /// If the computer fleet cannot be placed the game stays in `DifficultySelect`.
    pub fn new_game(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        self.require(GamePhase::DifficultySelect)?;
        self.player.clear();
        self.computer.place_fleet_randomly(&mut self.rng, &FLEET)?;
        self.targeting = Targeting::for_difficulty(difficulty);
        self.targeting.reset();
        self.pending = 0;
        self.pending_orientation = Orientation::Horizontal;
        self.last_move = None;
        self.stats = ShotStats::default();
        info!("new game at {:?} difficulty", difficulty);
        self.advance(PhaseEvent::GameStarted)
    }

    /// Size of the next ship to place, while in `Placement`.
    pub fn pending_ship_size(&self) -> Option<usize> {
        match self.phase {
            GamePhase::Placement => FLEET.get(self.pending).copied(),
            _ => None,
        }
    }

    pub fn pending_orientation(&self) -> Orientation {
        self.pending_orientation
    }

    /// Flip the orientation offered for the next ship. Ignored outside `Placement`.
    pub fn rotate_pending_ship(&mut self) {
        if self.phase == GamePhase::Placement {
            self.pending_orientation = self.pending_orientation.rotated();
        }
    }

    fn ship_accepted(&mut self) -> Result<PlacementProgress, GameError> {
        self.pending += 1;
        match FLEET.get(self.pending) {
            Some(&size) => Ok(PlacementProgress::Next(size)),
            None => {
                self.advance(PhaseEvent::FleetPlaced)?;
                Ok(PlacementProgress::FleetComplete)
            }
        }
    }

    /// Place the pending player ship with its first segment at `at`.
    pub fn place_player_ship(
        &mut self,
        at: Coord,
        orientation: Orientation,
    ) -> Result<PlacementProgress, GameError> {
        self.require(GamePhase::Placement)?;
        let size = FLEET[self.pending];
        self.player.place_ship(at, size, orientation)?;
        self.ship_accepted()
    }

    /// Place every remaining player ship at random.
    ///
    /// If the ships placed by hand leave no room for the rest, the whole player fleet is
    /// redeployed at random. On failure placement resumes from whatever the board holds.
    pub fn auto_place_player_fleet(&mut self) -> Result<(), GameError> {
        self.require(GamePhase::Placement)?;
        let result = self.player.complete_fleet_randomly(&mut self.rng, &FLEET);
        // the board may have been refilled or cleared
        self.pending = self.player.ships().len();
        if let Err(e) = result {
            self.pending_orientation = Orientation::Horizontal;
            return Err(e);
        }
        self.advance(PhaseEvent::FleetPlaced)
    }

    /// Count a shot and remember it as the last move. Repeat attacks change nothing.
    fn record_shot(&mut self, side: Side, at: Coord, outcome: AttackOutcome) {
        if outcome == AttackOutcome::AlreadyResolved {
            return;
        }
        let (shots, hits) = match side {
            Side::Player => (&mut self.stats.player_shots, &mut self.stats.player_hits),
            Side::Computer => (&mut self.stats.computer_shots, &mut self.stats.computer_hits),
        };
        *shots += 1;
        *hits += usize::from(outcome.is_hit());
        self.last_move = Some(LastMove { side, at, outcome });
    }

    /// Fire at the computer's board.
    pub fn attack_computer(&mut self, at: Coord) -> Result<AttackOutcome, GameError> {
        self.require(GamePhase::PlayerTurn)?;
        let outcome = self.computer.attack(at)?;
        self.record_shot(Side::Player, at, outcome);
        let fleet_destroyed = self.computer.all_ships_destroyed();
        self.advance(PhaseEvent::PlayerAttacked {
            outcome,
            fleet_destroyed,
        })?;
        if self.phase == GamePhase::PlayerWins {
            info!("player wins after {} shots", self.stats.player_shots);
        }
        Ok(outcome)
    }

    /// Let the computer take one shot. Called by the front end once its pacing delay
    /// has elapsed; the core itself never waits.
    pub fn tick_computer_turn(&mut self) -> Result<LastMove, GameError> {
        self.require(GamePhase::ComputerTurn)?;
        let view = self.player.revealed_view();
        let at = self
            .targeting
            .select_target(&view, &mut self.rng)
            .ok_or(GameError::NoTargetAvailable)?;
        let outcome = self.player.attack(at)?;
        self.targeting
            .on_result(at, outcome, &self.player.revealed_view());
        self.record_shot(Side::Computer, at, outcome);
        debug!("computer fires at {}: {:?}", at, outcome);
        let fleet_destroyed = self.player.all_ships_destroyed();
        self.advance(PhaseEvent::ComputerAttacked {
            outcome,
            fleet_destroyed,
        })?;
        if self.phase == GamePhase::ComputerWins {
            info!("computer wins after {} shots", self.stats.computer_shots);
        }
        Ok(LastMove {
            side: Side::Computer,
            at,
            outcome,
        })
    }

    /// Leave a finished game and return to `DifficultySelect`.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.advance(PhaseEvent::Restart)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Difficulty of the current (or last) game.
    pub fn difficulty(&self) -> Difficulty {
        self.targeting.difficulty()
    }

    /// The player's own board, ships included.
    pub fn player_board_view(&self) -> BoardView {
        self.player.view()
    }

    /// The computer's board as the player may see it.
    pub fn opponent_board_view(&self) -> BoardView {
        self.computer.revealed_view()
    }

    /// Ships still afloat: (player, computer).
    pub fn ship_counts(&self) -> (usize, usize) {
        (self.player.ships_alive(), self.computer.ships_alive())
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn stats(&self) -> ShotStats {
        self.stats
    }

    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }

    pub fn player_board(&self) -> &Board {
        &self.player
    }

    /// Ground truth of the computer's board. Not for display during play.
    pub fn computer_board(&self) -> &Board {
        &self.computer
    }
}

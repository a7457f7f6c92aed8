//! Computer targeting: three interchangeable strategies behind one trait.
//!
//! Strategies only ever look at the revealed view of the opponent's board, so
//! they cannot cheat, and they never pick a cell that is already resolved.

use alloc::vec::Vec;
use log::debug;
use rand::Rng;

use crate::board::BoardView;
use crate::common::{AttackOutcome, CellState, Coord};

/// Computer difficulty tier. Each tier maps to one targeting strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Inferred axis of a partially hit ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationHypothesis {
    #[default]
    Unknown,
    Horizontal,
    Vertical,
}

/// Memory of an unfinished hunt: the latest hit and the cells around it still worth trying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetMemory {
    last_hit: Option<Coord>,
    candidates: Vec<Coord>,
    orientation: OrientationHypothesis,
}

impl TargetMemory {
    pub fn last_hit(&self) -> Option<Coord> {
        self.last_hit
    }

    /// Candidate queue in the order cells were enqueued.
    pub fn candidates(&self) -> &[Coord] {
        &self.candidates
    }

    pub fn orientation(&self) -> OrientationHypothesis {
        self.orientation
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Remember a non-destroying hit and queue its unresolved orthogonal neighbours.
    fn record_hit(&mut self, at: Coord, view: &BoardView) {
        self.last_hit = Some(at);
        for n in at.orthogonal_neighbours() {
            if view.is_unresolved(n) && !self.candidates.contains(&n) {
                self.candidates.push(n);
            }
        }
    }

    /// Drop candidates that were resolved since they were queued.
    fn prune(&mut self, view: &BoardView) {
        self.candidates.retain(|&c| view.is_unresolved(c));
    }

    /// Re-derive the orientation from hits next to the latest hit. A mixed or empty
    /// neighbourhood keeps the previous hypothesis.
    fn infer_orientation(&mut self, view: &BoardView) {
        let Some(at) = self.last_hit else {
            return;
        };
        let is_hit = |dx, dy| at.offset(dx, dy).is_some_and(|c| view.get(c) == Some(CellState::Hit));
        let horizontal = is_hit(-1, 0) || is_hit(1, 0);
        let vertical = is_hit(0, -1) || is_hit(0, 1);
        match (horizontal, vertical) {
            (true, false) => self.orientation = OrientationHypothesis::Horizontal,
            (false, true) => self.orientation = OrientationHypothesis::Vertical,
            _ => {}
        }
    }
}

/// Shared interface of all computer targeting policies.
pub trait TargetingStrategy {
    /// Choose the next cell to attack, or `None` if every cell is resolved.
    fn select_target<R: Rng + ?Sized>(&mut self, view: &BoardView, rng: &mut R) -> Option<Coord>;

    /// Feed back the outcome of the last attack. `view` is the board after the attack.
    fn on_result(&mut self, at: Coord, outcome: AttackOutcome, view: &BoardView);

    /// Forget everything learned in the current game.
    fn reset(&mut self);

    /// Hunt memory, for strategies that keep one.
    fn memory(&self) -> Option<&TargetMemory> {
        None
    }
}

/// Uniform pick among the unresolved cells of `view`.
pub fn random_unresolved<R: Rng + ?Sized>(view: &BoardView, rng: &mut R) -> Option<Coord> {
    let open: Vec<Coord> = view.unresolved().collect();
    pick(&open, rng)
}

fn pick<R: Rng + ?Sized>(cells: &[Coord], rng: &mut R) -> Option<Coord> {
    if cells.is_empty() {
        return None;
    }
    Some(cells[rng.random_range(0..cells.len())])
}

/// Easy: fire at random unresolved cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTargeting;

impl TargetingStrategy for RandomTargeting {
    fn select_target<R: Rng + ?Sized>(&mut self, view: &BoardView, rng: &mut R) -> Option<Coord> {
        random_unresolved(view, rng)
    }

    fn on_result(&mut self, _at: Coord, _outcome: AttackOutcome, _view: &BoardView) {}

    fn reset(&mut self) {}
}

/// Medium: after a hit, work through the neighbours in queue order until the ship sinks.
#[derive(Debug, Clone, Default)]
pub struct HuntAndSink {
    memory: TargetMemory,
}

impl TargetingStrategy for HuntAndSink {
    fn select_target<R: Rng + ?Sized>(&mut self, view: &BoardView, rng: &mut R) -> Option<Coord> {
        self.memory.prune(view);
        match self.memory.candidates.first() {
            Some(&c) => Some(c),
            None => random_unresolved(view, rng),
        }
    }

    fn on_result(&mut self, at: Coord, outcome: AttackOutcome, view: &BoardView) {
        match outcome {
            AttackOutcome::Hit => self.memory.record_hit(at, view),
            AttackOutcome::Destroyed => self.memory.clear(),
            AttackOutcome::Miss | AttackOutcome::AlreadyResolved => {}
        }
    }

    fn reset(&mut self) {
        self.memory.clear();
    }

    fn memory(&self) -> Option<&TargetMemory> {
        Some(&self.memory)
    }
}

/// Hard: hunt-and-sink that infers the ship's axis and stays on it.
#[derive(Debug, Clone, Default)]
pub struct DirectionalHunt {
    memory: TargetMemory,
}

impl TargetingStrategy for DirectionalHunt {
    fn select_target<R: Rng + ?Sized>(&mut self, view: &BoardView, rng: &mut R) -> Option<Coord> {
        self.memory.prune(view);
        let Some(last) = self.memory.last_hit else {
            return random_unresolved(view, rng);
        };
        let on_axis: Vec<Coord> = self
            .memory
            .candidates
            .iter()
            .copied()
            .filter(|c| match self.memory.orientation {
                OrientationHypothesis::Horizontal => c.y == last.y,
                OrientationHypothesis::Vertical => c.x == last.x,
                OrientationHypothesis::Unknown => true,
            })
            .collect();
        let target = pick(&on_axis, rng)
            .or_else(|| pick(&self.memory.candidates, rng))
            .or_else(|| random_unresolved(view, rng))?;
        self.memory.candidates.retain(|&c| c != target);
        debug!("directional hunt picked {} ({:?})", target, self.memory.orientation);
        Some(target)
    }

    fn on_result(&mut self, at: Coord, outcome: AttackOutcome, view: &BoardView) {
        match outcome {
            AttackOutcome::Hit => {
                self.memory.record_hit(at, view);
                self.memory.infer_orientation(view);
            }
            AttackOutcome::Destroyed => self.memory.clear(),
            AttackOutcome::Miss | AttackOutcome::AlreadyResolved => {}
        }
    }

    fn reset(&mut self) {
        self.memory.clear();
    }

    fn memory(&self) -> Option<&TargetMemory> {
        Some(&self.memory)
    }
}

/// The strategy in use for a game, selected by difficulty.
#[derive(Debug, Clone)]
pub enum Targeting {
    Random(RandomTargeting),
    HuntAndSink(HuntAndSink),
    DirectionalHunt(DirectionalHunt),
}

impl Targeting {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Targeting::Random(RandomTargeting),
            Difficulty::Medium => Targeting::HuntAndSink(HuntAndSink::default()),
            Difficulty::Hard => Targeting::DirectionalHunt(DirectionalHunt::default()),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            Targeting::Random(_) => Difficulty::Easy,
            Targeting::HuntAndSink(_) => Difficulty::Medium,
            Targeting::DirectionalHunt(_) => Difficulty::Hard,
        }
    }
}

impl TargetingStrategy for Targeting {
    fn select_target<R: Rng + ?Sized>(&mut self, view: &BoardView, rng: &mut R) -> Option<Coord> {
        match self {
            Targeting::Random(s) => s.select_target(view, rng),
            Targeting::HuntAndSink(s) => s.select_target(view, rng),
            Targeting::DirectionalHunt(s) => s.select_target(view, rng),
        }
    }

    fn on_result(&mut self, at: Coord, outcome: AttackOutcome, view: &BoardView) {
        match self {
            Targeting::Random(s) => s.on_result(at, outcome, view),
            Targeting::HuntAndSink(s) => s.on_result(at, outcome, view),
            Targeting::DirectionalHunt(s) => s.on_result(at, outcome, view),
        }
    }

    fn reset(&mut self) {
        match self {
            Targeting::Random(s) => s.reset(),
            Targeting::HuntAndSink(s) => s.reset(),
            Targeting::DirectionalHunt(s) => s.reset(),
        }
    }

    fn memory(&self) -> Option<&TargetMemory> {
        match self {
            Targeting::Random(s) => s.memory(),
            Targeting::HuntAndSink(s) => s.memory(),
            Targeting::DirectionalHunt(s) => s.memory(),
        }
    }
}

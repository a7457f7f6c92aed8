//! Ship geometry and per-segment hit tracking.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{Coord, GameError, PlacementRejection};
use crate::config::MAX_SHIP_SIZE;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A placed ship. Geometry is fixed at construction; only the hit mask changes.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    size: usize,
    orientation: Orientation,
    origin: Coord,
    segments: Vec<Coord>,
    hits: Vec<bool>,
}

impl Ship {
    /// Build a ship of `size` starting at `origin` and extending right or down.
    pub fn new(size: usize, orientation: Orientation, origin: Coord) -> Result<Self, GameError> {
        if size == 0 || size > MAX_SHIP_SIZE {
            return Err(GameError::InvalidShipSize(size));
        }
        if !origin.in_bounds() {
            return Err(PlacementRejection::OutOfBounds.into());
        }
        let segments = (0..size)
            .map(|i| match orientation {
                Orientation::Horizontal => Coord::new(origin.x + i, origin.y),
                Orientation::Vertical => Coord::new(origin.x, origin.y + i),
            })
            .collect::<Vec<_>>();
        if !segments.iter().all(Coord::in_bounds) {
            return Err(PlacementRejection::OutOfBounds.into());
        }
        Ok(Ship {
            size,
            orientation,
            origin,
            segments,
            hits: alloc::vec![false; size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// Occupied cells, from the origin outwards.
    pub fn segments(&self) -> &[Coord] {
        &self.segments
    }

    /// Hit flags parallel to [`Ship::segments`].
    pub fn hit_mask(&self) -> &[bool] {
        &self.hits
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.segments.contains(&at)
    }

    /// Mark the segment at `at` as hit. Returns `false` if `at` is not part of the ship.
    pub fn register_hit(&mut self, at: Coord) -> bool {
        match self.segments.iter().position(|&s| s == at) {
            Some(i) => {
                self.hits[i] = true;
                true
            }
            None => false,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.hits.iter().all(|&h| h)
    }

    /// In-bounds cells touching the ship (diagonals included), excluding its own segments.
    pub fn halo(&self) -> impl Iterator<Item = Coord> + '_ {
        let (w, h) = match self.orientation {
            Orientation::Horizontal => (self.size, 1),
            Orientation::Vertical => (1, self.size),
        };
        let (x0, y0) = (self.origin.x as isize, self.origin.y as isize);
        (y0 - 1..=y0 + h as isize)
            .flat_map(move |y| (x0 - 1..=x0 + w as isize).map(move |x| (x, y)))
            .filter_map(|(x, y)| {
                let c = Coord::new(usize::try_from(x).ok()?, usize::try_from(y).ok()?);
                c.in_bounds().then_some(c)
            })
            .filter(move |c| !self.contains(*c))
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ size: {}, origin: {}, orientation: {:?}, hits: {} }}",
            self.size,
            self.origin,
            self.orientation,
            self.hits.iter().filter(|&&h| h).count(),
        )
    }
}

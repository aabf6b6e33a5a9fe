use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Cell, Coord, GridSize, TileCount};

/// A tile value identifying one source-image region. The largest value for a
/// given grid size is reserved as the blank marker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile(TileCount);

impl Tile {
    pub const fn new(value: TileCount) -> Self {
        Self(value)
    }

    pub const fn value(self) -> TileCount {
        self.0
    }

    pub const fn blank(size: GridSize) -> Self {
        Self(size.tile_count() - 1)
    }

    pub const fn is_blank(self, size: GridSize) -> bool {
        self.0 == size.tile_count() - 1
    }

    pub const fn in_range(self, size: GridSize) -> bool {
        self.0 < size.tile_count()
    }

    /// Source-image cell this tile is cut from: `(value % N, value / N)`.
    pub const fn source_cell(self, size: GridSize) -> Cell {
        let side = size.side() as TileCount;
        Cell {
            col: (self.0 % side) as Coord,
            row: (self.0 / side) as Coord,
        }
    }
}

/// Tiles currently adjacent to the blank, at most one per direction.
pub type MoveableSet = SmallVec<[Tile; 4]>;

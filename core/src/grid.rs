use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::{Cell, GridSize, MoveableSet, Tile, TileCount};

/// The ordered N×N tile arrangement: a permutation of `0..N²-1` where the
/// value at each position names the source-image tile occupying it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    size: GridSize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Solved order: every tile at its own position, blank bottom-right.
    pub fn identity(size: GridSize) -> Self {
        let tiles = (0..size.tile_count()).map(Tile::new).collect();
        Self { size, tiles }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn as_slice(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile_at(&self, cell: Cell) -> Option<Tile> {
        if !self.size.contains(cell) {
            return None;
        }
        Some(self.tiles[usize::from(self.size.index_of(cell))])
    }

    pub fn position_of(&self, tile: Tile) -> Option<TileCount> {
        self.tiles
            .iter()
            .position(|&t| t == tile)
            .map(|index| index as TileCount)
    }

    pub fn blank_index(&self) -> TileCount {
        self.position_of(Tile::blank(self.size))
            .unwrap_or_else(|| unreachable!("grid always holds the blank tile"))
    }

    /// Values at the in-bounds orthogonal neighbors of the blank, in
    /// left, right, up, down order. Positions are never wrapped.
    pub fn moveable_tiles(&self) -> MoveableSet {
        let side = self.size.side();
        let blank = self.size.cell_of(self.blank_index());

        let mut moveable = MoveableSet::new();
        let mut push = |cell: Cell| {
            if let Some(tile) = self.tile_at(cell) {
                moveable.push(tile);
            }
        };

        if blank.col > 0 {
            push(Cell::new(blank.col - 1, blank.row));
        }
        if blank.col < side - 1 {
            push(Cell::new(blank.col + 1, blank.row));
        }
        if blank.row > 0 {
            push(Cell::new(blank.col, blank.row - 1));
        }
        if blank.row < side - 1 {
            push(Cell::new(blank.col, blank.row + 1));
        }
        moveable
    }

    /// Swaps `tile` with the blank if it is currently moveable, returning the
    /// former positions of the tile and of the blank. Anything else, the
    /// blank included, is a silent no-op.
    pub fn slide(&mut self, tile: Tile) -> Option<(TileCount, TileCount)> {
        if !self.moveable_tiles().contains(&tile) {
            return None;
        }

        let from = self.position_of(tile)?;
        let to = self.blank_index();
        self.tiles.swap(usize::from(from), usize::from(to));
        Some((from, to))
    }

    pub fn is_solved(&self) -> bool {
        self.tiles
            .iter()
            .enumerate()
            .all(|(index, &tile)| tile.value() as usize == index)
    }

    /// Holds for every reachable grid: exactly one instance of each value.
    pub fn is_permutation(&self) -> bool {
        let mut seen = alloc::vec![false; self.tiles.len()];
        for tile in &self.tiles {
            match seen.get_mut(usize::from(tile.value())) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, &tile)| (self.size.cell_of(index as TileCount), tile))
    }
}

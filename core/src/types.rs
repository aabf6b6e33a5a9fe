use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Single coordinate axis used for grid rows and columns.
pub type Coord = u8;

/// Count type used for tile values and total-tile counts.
pub type TileCount = u16;

pub const fn mult(a: Coord, b: Coord) -> TileCount {
    let a = a as TileCount;
    let b = b as TileCount;
    a.saturating_mul(b)
}

/// Side length of the square puzzle grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize(Coord);

impl GridSize {
    pub const MIN_SIDE: Coord = 2;
    pub const DEFAULT_SIDE: Coord = 4;

    pub const fn new_unchecked(side: Coord) -> Self {
        Self(side)
    }

    pub fn new(side: Coord) -> Self {
        Self::new_unchecked(side.clamp(Self::MIN_SIDE, Coord::MAX))
    }

    pub const fn side(self) -> Coord {
        self.0
    }

    pub const fn tile_count(self) -> TileCount {
        mult(self.0, self.0)
    }

    pub const fn cell_of(self, index: TileCount) -> Cell {
        let side = self.0 as TileCount;
        Cell {
            col: (index % side) as Coord,
            row: (index / side) as Coord,
        }
    }

    pub const fn index_of(self, cell: Cell) -> TileCount {
        (cell.row as TileCount) * (self.0 as TileCount) + (cell.col as TileCount)
    }

    pub const fn contains(self, cell: Cell) -> bool {
        cell.col < self.0 && cell.row < self.0
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self(Self::DEFAULT_SIDE)
    }
}

/// Integral grid position `(col, row)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub col: Coord,
    pub row: Coord,
}

impl Cell {
    pub const fn new(col: Coord, row: Coord) -> Self {
        Self { col, row }
    }
}

/// Fractional grid position used by interpolated animation frames.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellPos {
    pub col: f32,
    pub row: f32,
}

impl From<Cell> for CellPos {
    fn from(cell: Cell) -> Self {
        Self {
            col: cell.col.into(),
            row: cell.row.into(),
        }
    }
}

/// Pixel dimensions of the decoded source image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGeometry {
    width: u32,
    height: u32,
}

impl ImageGeometry {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::EmptyImage);
        }
        Ok(Self { width, height })
    }

    pub const fn width(self) -> u32 {
        self.width
    }

    pub const fn height(self) -> u32 {
        self.height
    }

    /// Side of the square source region each tile is cut from.
    pub fn tile_span(self, size: GridSize) -> f64 {
        let min_side = self.width.min(self.height);
        f64::from(min_side) / f64::from(size.side())
    }
}

/// Translates a surface-relative point into the grid cell it lands in.
///
/// Geometry is passed in, never read from the surface, so the mapping can be
/// exercised without a rendering target. Points outside the grid yield `None`.
pub fn cell_at_point(x: f64, y: f64, tile_size: f64, size: GridSize) -> Option<Cell> {
    if tile_size <= 0.0 || x < 0.0 || y < 0.0 {
        return None;
    }

    let col = (x / tile_size) as u32;
    let row = (y / tile_size) as u32;
    let side = u32::from(size.side());
    if col >= side || row >= side {
        return None;
    }

    Some(Cell::new(col as Coord, row as Coord))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_size_clamps_below_minimum() {
        assert_eq!(GridSize::new(0).side(), 2);
        assert_eq!(GridSize::new(1).side(), 2);
        assert_eq!(GridSize::new(4).side(), 4);
    }

    #[test]
    fn index_and_cell_conversions_roundtrip() {
        let size = GridSize::new(4);
        for index in 0..size.tile_count() {
            let cell = size.cell_of(index);
            assert!(size.contains(cell));
            assert_eq!(size.index_of(cell), index);
        }
        assert_eq!(size.cell_of(11), Cell::new(3, 2));
    }

    #[test]
    fn image_geometry_rejects_zero_sides() {
        assert_eq!(ImageGeometry::new(0, 600), Err(GameError::EmptyImage));
        assert_eq!(ImageGeometry::new(800, 0), Err(GameError::EmptyImage));
    }

    #[test]
    fn tile_span_uses_shorter_image_side() {
        let geometry = ImageGeometry::new(800, 600).unwrap();
        assert_eq!(geometry.tile_span(GridSize::new(4)), 150.0);
    }

    #[test]
    fn cell_at_point_maps_clicks_and_rejects_outside() {
        let size = GridSize::new(4);
        assert_eq!(cell_at_point(0.0, 0.0, 100.0, size), Some(Cell::new(0, 0)));
        assert_eq!(
            cell_at_point(399.9, 250.0, 100.0, size),
            Some(Cell::new(3, 2))
        );
        assert_eq!(cell_at_point(400.0, 0.0, 100.0, size), None);
        assert_eq!(cell_at_point(-1.0, 0.0, 100.0, size), None);
        assert_eq!(cell_at_point(10.0, 10.0, 0.0, size), None);
    }
}

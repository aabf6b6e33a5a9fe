use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    /// No image loaded yet; the grid is a placeholder identity.
    Empty,
    /// Image loaded, programmatic shuffle moves still being applied.
    Shuffling,
    /// Shuffle finished, user moves accepted and animated.
    Ready,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Empty
    }
}

/// The tile-state engine: owns the grid permutation, the source-image
/// geometry, and the move protocol. All mutation goes through here; the
/// presentation layer only reads state and forwards move requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleEngine {
    config: PuzzleConfig,
    grid: TileGrid,
    geometry: Option<ImageGeometry>,
    state: EngineState,
    move_count: u32,
}

impl PuzzleEngine {
    pub fn new(config: PuzzleConfig) -> Self {
        Self {
            grid: TileGrid::identity(config.size),
            config,
            geometry: None,
            state: Default::default(),
            move_count: 0,
        }
    }

    pub fn config(&self) -> PuzzleConfig {
        self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    pub fn is_solved(&self) -> bool {
        self.state.is_ready() && self.grid.is_solved()
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn geometry(&self) -> Option<ImageGeometry> {
        self.geometry
    }

    pub fn tile_at(&self, cell: Cell) -> Option<Tile> {
        self.grid.tile_at(cell)
    }

    /// User moves committed since the puzzle became ready.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Accepts a freshly decoded image: resets the grid to identity, drops
    /// any previous session, and enters `Shuffling`. The returned frame shows
    /// the unshuffled arrangement, suitable for the solved-image preview.
    pub fn load_image(&mut self, geometry: ImageGeometry) -> Frame {
        self.grid = TileGrid::identity(self.config.size);
        self.geometry = Some(geometry);
        self.state = EngineState::Shuffling;
        self.move_count = 0;
        log::debug!(
            "image loaded: {}x{}, tile span {}",
            geometry.width(),
            geometry.height(),
            geometry.tile_span(self.config.size),
        );
        self.full_frame()
    }

    /// The idempotent full redraw: a blank fill for the cell holding the
    /// blank tile, a blit at the integral position for every other cell.
    pub fn full_frame(&self) -> Frame {
        let blank = Tile::blank(self.config.size);
        let mut frame = Frame::default();
        for (cell, tile) in self.grid.iter_cells() {
            if tile == blank {
                frame.push(DrawCmd::Clear { cell });
            } else {
                frame.push(DrawCmd::Blit {
                    tile,
                    pos: cell.into(),
                });
            }
        }
        frame
    }

    /// Requests sliding `tile` into the blank position. Tiles that are not
    /// currently moveable, the blank itself, out-of-range values, and calls
    /// before any image is loaded are all silent no-ops, never errors:
    /// stray clicks are expected input.
    pub fn request_move(&mut self, tile: Tile) -> MoveOutcome {
        if matches!(self.state, EngineState::Empty) {
            return MoveOutcome::NotMoveable;
        }

        let Some((from, to)) = self.grid.slide(tile) else {
            log::trace!("ignored move request for {:?}", tile);
            return MoveOutcome::NotMoveable;
        };

        let animated = self.state.is_ready();
        if animated {
            self.move_count += 1;
        }
        log::debug!("moved {:?} from index {} to {}", tile, from, to);

        MoveOutcome::Moved(MoveTransition {
            tile,
            from: self.config.size.cell_of(from),
            to: self.config.size.cell_of(to),
            animated,
            frame_count: self.config.animation_frames,
        })
    }

    /// Applies one legal shuffle move chosen by `policy` from the current
    /// moveable set. Pacing between steps belongs to the caller.
    pub fn shuffle_move(&mut self, policy: &mut impl ShufflePolicy) -> Result<Tile> {
        self.check_shuffling()?;

        let moveable = self.grid.moveable_tiles();
        let tile = policy.pick(&moveable);
        if self.grid.slide(tile).is_none() {
            log::warn!("shuffle policy picked unmoveable {:?}, skipped", tile);
        }
        Ok(tile)
    }

    pub fn finish_shuffle(&mut self) -> Result<()> {
        self.check_shuffling()?;
        self.state = EngineState::Ready;
        log::debug!("shuffle finished, puzzle ready");
        Ok(())
    }

    /// Runs the whole shuffle in one call: `shuffle_moves` legal moves, then
    /// ready. Drivers that animate the shuffle step through `shuffle_move`
    /// themselves instead.
    pub fn shuffle(&mut self, policy: &mut impl ShufflePolicy) -> Result<()> {
        for _ in 0..self.config.shuffle_moves {
            self.shuffle_move(policy)?;
        }
        self.finish_shuffle()
    }

    fn check_shuffling(&self) -> Result<()> {
        if matches!(self.state, EngineState::Shuffling) {
            Ok(())
        } else {
            Err(GameError::NotShuffling)
        }
    }
}

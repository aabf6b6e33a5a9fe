use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::{Cell, CellPos, Tile};

/// One drawing instruction in grid units. The rendering surface scales
/// positions by its own tile size and resolves `tile` to a source region.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCmd {
    /// Fill one cell with the blank color.
    Clear { cell: Cell },
    /// Draw `tile`'s source region at a possibly fractional grid position.
    Blit { tile: Tile, pos: CellPos },
}

/// An ordered list of draw commands making up one presented frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    cmds: Vec<DrawCmd>,
}

impl Frame {
    pub(crate) fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a DrawCmd;
    type IntoIter = core::slice::Iter<'a, DrawCmd>;

    fn into_iter(self) -> Self::IntoIter {
        self.cmds.iter()
    }
}

/// A committed move: `tile` left `from` for the blank's old position `to`,
/// always exactly one grid step apart.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MoveTransition {
    pub tile: Tile,
    pub from: Cell,
    pub to: Cell,
    pub animated: bool,
    pub frame_count: u8,
}

impl MoveTransition {
    /// Interpolated frames stepping linearly from `from` toward `to`. Each
    /// frame clears the vacated origin cell, then blits the moving tile at
    /// the interpolated position. The settled end state is not included; the
    /// full redraw that follows every committed move covers it. Transitions
    /// made while still shuffling or loading yield no frames at all.
    pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        let steps = if self.animated { self.frame_count } else { 0 };
        let count = f32::from(self.frame_count.max(1));
        let d_col = (f32::from(self.to.col) - f32::from(self.from.col)) / count;
        let d_row = (f32::from(self.to.row) - f32::from(self.from.row)) / count;

        (0..steps).map(move |step| {
            let step = f32::from(step);
            let mut frame = Frame::default();
            frame.push(DrawCmd::Clear { cell: self.from });
            frame.push(DrawCmd::Blit {
                tile: self.tile,
                pos: CellPos {
                    col: f32::from(self.from.col) + d_col * step,
                    row: f32::from(self.from.row) + d_row * step,
                },
            });
            frame
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn transition(animated: bool) -> MoveTransition {
        MoveTransition {
            tile: Tile::new(11),
            from: Cell::new(3, 2),
            to: Cell::new(3, 3),
            animated,
            frame_count: 10,
        }
    }

    #[test]
    fn animated_transition_yields_fixed_frame_count() {
        let frames: Vec<Frame> = transition(true).frames().collect();
        assert_eq!(frames.len(), 10);
        assert!(frames.iter().all(|frame| frame.len() == 2));
    }

    #[test]
    fn frames_interpolate_from_origin_toward_destination() {
        let frames: Vec<Frame> = transition(true).frames().collect();

        let DrawCmd::Blit { pos: first, .. } = frames[0].cmds()[1] else {
            panic!("second command must be the moving tile");
        };
        let DrawCmd::Blit { pos: last, .. } = frames[9].cmds()[1] else {
            panic!("second command must be the moving tile");
        };

        assert_eq!(first, CellPos { col: 3.0, row: 2.0 });
        assert_eq!(last.col, 3.0);
        assert!((last.row - 2.9).abs() < 1e-5);

        for frame in &frames {
            assert_eq!(
                frame.cmds()[0],
                DrawCmd::Clear {
                    cell: Cell::new(3, 2)
                }
            );
        }
    }

    #[test]
    fn unanimated_transition_yields_no_frames() {
        assert_eq!(transition(false).frames().count(), 0);
    }
}

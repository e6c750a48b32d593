use std::ops::RangeInclusive;

use blockfall_engine::{Cell, CellOffset, PieceKind, PieceRotation};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::BlockDisplay;

/// Preview of a piece kind in its spawn rotation.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PieceKind) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Rows and columns spanned by `kind` in its spawn rotation.
fn spawn_bounds(kind: PieceKind) -> (RangeInclusive<i8>, RangeInclusive<i8>) {
    let offsets = kind.offsets(PieceRotation::default());
    let span = |coord: fn(&CellOffset) -> i8| {
        let min = offsets.iter().map(coord).min().unwrap_or(0);
        let max = offsets.iter().map(coord).max().unwrap_or(0);
        min..=max
    };
    (span(|o| o.row), span(|o| o.col))
}

fn span_len(range: &RangeInclusive<i8>) -> u16 {
    u16::try_from(range.end() - range.start() + 1).unwrap_or(0)
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };

        let (rows, cols) = spawn_bounds(piece);
        let (width, height) = (span_len(&cols), span_len(&rows));
        let piece_area = area.centered(
            Constraint::Length(width * BlockDisplay::width()),
            Constraint::Length(height * BlockDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let offsets = piece.offsets(PieceRotation::default());
        let empty_block = BlockDisplay::from_cell(Cell::Empty, false);
        let occupied_block = BlockDisplay::from_cell(Cell::Piece(piece), false);
        for (row, grid_row) in rows.zip(grid_rows) {
            for (col, grid_cell) in cols.clone().zip(grid_row) {
                let block = if offsets.contains(&CellOffset::new(row, col)) {
                    &occupied_block
                } else {
                    &empty_block
                };
                Widget::render(block, grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_bounds_fit_preview() {
        for kind in PieceKind::ALL {
            let (rows, cols) = spawn_bounds(kind);
            assert!(span_len(&cols) <= 4, "{kind:?}");
            assert!(span_len(&rows) <= 2, "{kind:?}");
        }
    }

    #[test]
    fn test_spawn_bounds_sizes() {
        let size = |kind| {
            let (rows, cols) = spawn_bounds(kind);
            (span_len(&cols), span_len(&rows))
        };
        assert_eq!(size(PieceKind::I), (4, 1));
        assert_eq!(size(PieceKind::O), (2, 2));
        assert_eq!(size(PieceKind::T), (3, 2));
    }
}

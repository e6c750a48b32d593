use std::iter;

use blockfall_engine::{Board, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::BlockDisplay;

/// The locked cells of a board, optionally with the falling piece on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    falling_piece: Option<&'a Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            falling_piece: None,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: &'a Piece) -> Self {
        Self {
            falling_piece: Some(piece),
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
        BOARD_WIDTH * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        BOARD_HEIGHT * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

#[expect(clippy::cast_possible_truncation)]
const BOARD_WIDTH: u16 = Board::WIDTH as u16;
#[expect(clippy::cast_possible_truncation)]
const BOARD_HEIGHT: u16 = Board::HEIGHT as u16;

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut board = self.board.clone();
        if let Some(piece) = self.falling_piece {
            for pos in piece.cell_positions() {
                // Cells above the top edge are not drawn.
                _ = board.set_cell(pos, piece.kind());
            }
        }

        let col_constraints =
            (0..Board::WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..Board::HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Board::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Board::WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, board.rows()) {
            for (grid_cell, cell) in iter::zip(grid_row, row.cells()) {
                BlockDisplay::from_cell(*cell, true).render(grid_cell, buf);
            }
        }
    }
}

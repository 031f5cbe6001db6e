//! In-memory character grid used by the dispatch tests

use core::convert::Infallible;

use crate::traits::CharacterDisplay;

const MAX_COLUMNS: usize = 20;
const MAX_ROWS: usize = 4;

pub(crate) struct GridDisplay {
    pub columns: u8,
    pub rows: u8,
    pub cells: [[u8; MAX_COLUMNS]; MAX_ROWS],
    pub cursor: (u8, u8),
    pub glyphs: [[u8; 8]; 8],
    /// Every call that reached the display
    pub operations: usize,
    pub clears: usize,
}

impl GridDisplay {
    pub fn new(columns: u8, rows: u8) -> Self {
        Self {
            columns,
            rows,
            cells: [[b' '; MAX_COLUMNS]; MAX_ROWS],
            cursor: (0, 0),
            glyphs: [[0; 8]; 8],
            operations: 0,
            clears: 0,
        }
    }

    /// Visible cells of `row`
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row][..usize::from(self.columns)]
    }

    /// Visible cells `col..col + len` of `row`
    pub fn cells_at(&self, row: usize, col: usize, len: usize) -> &[u8] {
        &self.cells[row][col..col + len]
    }
}

impl CharacterDisplay for GridDisplay {
    type Error = Infallible;

    fn columns(&self) -> u8 {
        self.columns
    }

    fn rows(&self) -> u8 {
        self.rows
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.operations += 1;
        self.clears += 1;
        self.cells = [[b' '; MAX_COLUMNS]; MAX_ROWS];
        self.cursor = (0, 0);
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error> {
        self.operations += 1;
        self.cursor = (row.min(self.rows - 1), col);
        Ok(())
    }

    fn write_char(&mut self, code: u8) -> Result<(), Self::Error> {
        self.operations += 1;
        let (row, col) = self.cursor;
        if col < self.columns {
            self.cells[usize::from(row)][usize::from(col)] = code;
        }
        self.cursor.1 = col.saturating_add(1);
        Ok(())
    }

    fn define_glyph(&mut self, index: u8, bitmap: &[u8; 8]) -> Result<(), Self::Error> {
        self.operations += 1;
        self.glyphs[usize::from(index & 0x07)] = *bitmap;
        Ok(())
    }
}

// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, matrix, tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub row: i8,
    pub col: i8,
    pub tile: tile::Tile,
}

// Read-only positional view of the tiles on the board.
pub struct Grid {
    dim: matrix::Dim,
    cells: Box<[Option<tile::Tile>]>,
    num_tiles: usize,
}

impl Grid {
    // Unusable placements (off the board, an undesignated wildcard, a letter
    // the alphabet does not have, a second tile on one square) are dropped.
    pub fn new(
        dim: matrix::Dim,
        alphabet: &alphabet::Alphabet,
        placements: &[Placement],
    ) -> Grid {
        let mut cells = vec![None; dim.area()].into_boxed_slice();
        let mut num_tiles = 0;
        for p in placements {
            if !dim.contains(p.row, p.col) {
                log::warn!("dropping tile outside the board at ({}, {})", p.row, p.col);
                continue;
            }
            if p.tile == tile::Tile::Wildcard || !p.tile.is_consistent(alphabet) {
                log::warn!("dropping unusable tile {:?} at ({}, {})", p.tile, p.row, p.col);
                continue;
            }
            let cell = &mut cells[dim.at_row_col(p.row, p.col)];
            if cell.is_some() {
                log::warn!("dropping second tile at ({}, {})", p.row, p.col);
                continue;
            }
            *cell = Some(p.tile);
            num_tiles += 1;
        }
        Grid {
            dim,
            cells,
            num_tiles,
        }
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    // None outside the board, same as an empty square.
    #[inline(always)]
    pub fn at(&self, row: i8, col: i8) -> Option<tile::Tile> {
        if self.dim.contains(row, col) {
            self.cells[self.dim.at_row_col(row, col)]
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        self.at(row, col).is_some()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.num_tiles == 0
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> usize {
        self.num_tiles
    }

    pub fn num_occupied_neighbors(&self, row: i8, col: i8) -> i32 {
        self.dim
            .orthogonal_neighbors(row, col)
            .iter()
            .filter(|&&(r, c)| self.is_occupied(r, c))
            .count() as i32
    }

    // first and last pos along the direction of the occupied run through
    // (row, col), treating (row, col) itself as occupied.
    pub fn run_through(&self, direction: matrix::Direction, row: i8, col: i8) -> (i8, i8) {
        let (lane, pos) = direction.lane_and_pos(row, col);
        let occupied = |p: i8| {
            let (r, c) = direction.cell(lane, p);
            self.is_occupied(r, c)
        };
        let mut start = pos;
        while occupied(start - 1) {
            start -= 1;
        }
        let mut end = pos;
        while occupied(end + 1) {
            end += 1;
        }
        (start, end)
    }

    #[inline(always)]
    pub fn has_occupied_neighbor(&self, row: i8, col: i8) -> bool {
        self.num_occupied_neighbors(row, col) > 0
    }
}

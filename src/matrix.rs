// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Across, Direction::Down];

    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Direction::Across => 0,
            Direction::Down => 1,
        }
    }

    #[inline(always)]
    pub fn perpendicular(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    // across: lane is the row, pos is the col. down: lane is the col, pos is the row.
    #[inline(always)]
    pub fn cell(self, lane: i8, pos: i8) -> (i8, i8) {
        match self {
            Direction::Across => (lane, pos),
            Direction::Down => (pos, lane),
        }
    }

    #[inline(always)]
    pub fn lane_and_pos(self, row: i8, col: i8) -> (i8, i8) {
        match self {
            Direction::Across => (row, col),
            Direction::Down => (col, row),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    #[inline(always)]
    pub fn contains(&self, row: i8, col: i8) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn area(&self) -> usize {
        ((self.rows as isize) * (self.cols as isize)) as usize
    }

    // number of squares along a lane in this direction.
    #[inline(always)]
    pub fn lane_len(&self, direction: Direction) -> i8 {
        match direction {
            Direction::Across => self.cols,
            Direction::Down => self.rows,
        }
    }

    #[inline(always)]
    pub fn orthogonal_neighbors(&self, row: i8, col: i8) -> [(i8, i8); 4] {
        [(row - 1, col), (row + 1, col), (row, col - 1), (row, col + 1)]
    }
}

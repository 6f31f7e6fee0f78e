// Copyright (C) 2020-2026 Andy Kurnia.

use super::matrix;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Premium {
    Plain,
    Letter2,
    Letter3,
    Word2,
    Word3,
    // doubles the word, and is always a legal place to start a word.
    Star,
}

impl Premium {
    #[inline(always)]
    pub fn letter_multiplier(self) -> i32 {
        match self {
            Premium::Letter2 => 2,
            Premium::Letter3 => 3,
            _ => 1,
        }
    }

    #[inline(always)]
    pub fn word_multiplier(self) -> i32 {
        match self {
            Premium::Word2 | Premium::Star => 2,
            Premium::Word3 => 3,
            _ => 1,
        }
    }

    #[inline(always)]
    pub fn is_star(self) -> bool {
        self == Premium::Star
    }

    // search-order preference for anchors on this square.
    #[inline(always)]
    pub fn anchor_weight(self) -> i32 {
        match self {
            Premium::Word3 => 5,
            Premium::Star | Premium::Word2 => 4,
            Premium::Letter3 => 3,
            Premium::Letter2 => 2,
            Premium::Plain => 0,
        }
    }
}

pub struct BoardLayout {
    premiums: Box<[Premium]>,
    dim: matrix::Dim,
    stars: Box<[(i8, i8)]>,
}

impl BoardLayout {
    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn premium_at(&self, row: i8, col: i8) -> Premium {
        if self.dim.contains(row, col) {
            self.premiums[self.dim.at_row_col(row, col)]
        } else {
            Premium::Plain
        }
    }

    #[inline(always)]
    pub fn is_star(&self, row: i8, col: i8) -> bool {
        self.premium_at(row, col).is_star()
    }

    // center first, then the quadrant stars.
    #[inline(always)]
    pub fn stars(&self) -> &[(i8, i8)] {
        &self.stars
    }
}

const TW: Premium = Premium::Word3;
const DW: Premium = Premium::Word2;
const TL: Premium = Premium::Letter3;
const DL: Premium = Premium::Letter2;
const ST: Premium = Premium::Star;
const __: Premium = Premium::Plain;

#[rustfmt::skip]
static TAMIL_PREMIUMS: [Premium; 225] = [
    TW, __, __, DL, __, __, __, TW, __, __, __, DL, __, __, TW, //
    __, DW, __, __, __, TL, __, __, __, TL, __, __, __, DW, __, //
    __, __, DW, __, __, __, DL, __, DL, __, __, __, DW, __, __, //
    DL, __, __, ST, __, __, __, DL, __, __, __, ST, __, __, DL, //
    __, __, __, __, DW, __, __, __, __, __, DW, __, __, __, __, //
    __, TL, __, __, __, TL, __, __, __, TL, __, __, __, TL, __, //
    __, __, DL, __, __, __, DL, __, DL, __, __, __, DL, __, __, //
    TW, __, __, DL, __, __, __, ST, __, __, __, DL, __, __, TW, //
    __, __, DL, __, __, __, DL, __, DL, __, __, __, DL, __, __, //
    __, TL, __, __, __, TL, __, __, __, TL, __, __, __, TL, __, //
    __, __, __, __, DW, __, __, __, __, __, DW, __, __, __, __, //
    DL, __, __, ST, __, __, __, DL, __, __, __, ST, __, __, DL, //
    __, __, DW, __, __, __, DL, __, DL, __, __, __, DW, __, __, //
    __, DW, __, __, __, TL, __, __, __, TL, __, __, __, DW, __, //
    TW, __, __, DL, __, __, __, TW, __, __, __, DL, __, __, TW, //
];

pub fn make_tamil_board_layout() -> BoardLayout {
    BoardLayout {
        premiums: TAMIL_PREMIUMS.into(),
        dim: matrix::Dim { rows: 15, cols: 15 },
        stars: Box::new([(7, 7), (3, 3), (3, 11), (11, 3), (11, 11)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_are_marked() {
        let layout = make_tamil_board_layout();
        for &(row, col) in layout.stars() {
            assert!(layout.is_star(row, col));
        }
        let dim = layout.dim();
        let num_stars = (0..dim.rows)
            .flat_map(|row| (0..dim.cols).map(move |col| (row, col)))
            .filter(|&(row, col)| layout.is_star(row, col))
            .count();
        assert_eq!(num_stars, 5);
    }

    #[test]
    fn symmetric() {
        let layout = make_tamil_board_layout();
        for row in 0..15 {
            for col in 0..15 {
                let p = layout.premium_at(row, col);
                assert_eq!(p, layout.premium_at(col, row));
                assert_eq!(p, layout.premium_at(14 - row, col));
            }
        }
    }

    #[test]
    fn multipliers() {
        let layout = make_tamil_board_layout();
        assert_eq!(layout.premium_at(0, 0).word_multiplier(), 3);
        assert_eq!(layout.premium_at(7, 7).word_multiplier(), 2);
        assert_eq!(layout.premium_at(1, 5).letter_multiplier(), 3);
        assert_eq!(layout.premium_at(0, 3).letter_multiplier(), 2);
        assert_eq!(layout.premium_at(-1, 3), Premium::Plain);
        assert!(Premium::Word3.anchor_weight() > Premium::Star.anchor_weight());
        assert!(Premium::Word2.anchor_weight() > Premium::Letter3.anchor_weight());
        assert!(Premium::Letter2.anchor_weight() > Premium::Plain.anchor_weight());
    }
}

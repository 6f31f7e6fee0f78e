// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board_layout, grid};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub row: i8,
    pub col: i8,
    pub weight: i32,
}

// Empty squares a move may be built through, most promising first.
// On an empty board these are the stars in layout order. Otherwise every
// empty square touching a tile, plus every empty star, in row-major order
// before the stable sort.
pub fn find_anchors(grid: &grid::Grid, layout: &board_layout::BoardLayout) -> Vec<Anchor> {
    let mut ret = Vec::new();
    if grid.is_empty() {
        for &(row, col) in layout.stars() {
            ret.push(Anchor {
                row,
                col,
                weight: layout.premium_at(row, col).anchor_weight(),
            });
        }
        return ret;
    }
    let dim = grid.dim();
    for row in 0..dim.rows {
        for col in 0..dim.cols {
            if grid.is_occupied(row, col) {
                continue;
            }
            let neighbors = grid.num_occupied_neighbors(row, col);
            if neighbors == 0 && !layout.is_star(row, col) {
                continue;
            }
            ret.push(Anchor {
                row,
                col,
                weight: layout.premium_at(row, col).anchor_weight() + 3 * neighbors,
            });
        }
    }
    ret.sort_by(|a, b| b.weight.cmp(&a.weight));
    ret
}

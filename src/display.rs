// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, grid, move_picker, movegen, tile};

#[inline(always)]
pub fn empty_label(premium: board_layout::Premium) -> &'static str {
    match premium {
        board_layout::Premium::Star => "*",
        board_layout::Premium::Word3 => "=",
        board_layout::Premium::Word2 => "-",
        board_layout::Premium::Letter3 => "\"",
        board_layout::Premium::Letter2 => "\'",
        board_layout::Premium::Plain => ".",
    }
}

#[inline(always)]
pub fn board_label<'a>(
    alphabet: &'a alphabet::Alphabet,
    board_layout: &board_layout::BoardLayout,
    grid: &grid::Grid,
    row: i8,
    col: i8,
) -> std::borrow::Cow<'a, str> {
    match grid.at(row, col) {
        Some(t) => t.fmt(alphabet).to_string().into(),
        None => empty_label(board_layout.premium_at(row, col)).into(),
    }
}

// Tamil letters vary in width, so cells are separated rather than aligned.
pub fn format_board(
    alphabet: &alphabet::Alphabet,
    board_layout: &board_layout::BoardLayout,
    grid: &grid::Grid,
) -> String {
    use std::fmt::Write;
    let dim = board_layout.dim();
    let mut ret = String::new();
    ret.push_str("   ");
    for c in 0..dim.cols {
        let _ = write!(ret, " {:>2}", c);
    }
    ret.push('\n');
    for r in 0..dim.rows {
        let _ = write!(ret, "{:2} |", r);
        for c in 0..dim.cols {
            let _ = write!(ret, " {}", board_label(alphabet, board_layout, grid, r, c));
        }
        ret.push('\n');
    }
    ret
}

pub fn print_board(
    alphabet: &alphabet::Alphabet,
    board_layout: &board_layout::BoardLayout,
    grid: &grid::Grid,
) {
    print!("{}", format_board(alphabet, board_layout, grid));
}

// "7,7 across கடல் (12)": first square, direction and main word.
pub fn fmt_move(alphabet: &alphabet::Alphabet, found: &movegen::Move) -> String {
    let Some((main_word, &first)) = found
        .formed_words
        .first()
        .and_then(|w| Some((w, w.tiles.first()?)))
    else {
        return format!("({})", found.score);
    };
    let down = main_word.tiles.len() > 1 && main_word.tiles[1].col == first.col;
    format!(
        "{},{} {} {} ({})",
        first.row,
        first.col,
        if down { "down" } else { "across" },
        main_word.label(alphabet),
        found.score
    )
}

pub fn fmt_decision(
    alphabet: &alphabet::Alphabet,
    rack: &[tile::Tile],
    decision: &move_picker::Decision,
) -> String {
    match decision {
        move_picker::Decision::Play(found) => fmt_move(alphabet, found),
        move_picker::Decision::Exchange { rack_indices } => format!(
            "(exch {})",
            rack_indices
                .iter()
                .filter_map(|&i| rack.get(i as usize))
                .map(|t| t.fmt(alphabet).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        ),
        move_picker::Decision::Pass => "(Pass)".to_string(),
    }
}

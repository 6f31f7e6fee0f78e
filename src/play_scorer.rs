// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, game_config, grid, matrix, search_context, tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordTile {
    pub row: i8,
    pub col: i8,
    pub tile: tile::Tile,
    pub already_on_board: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    pub tiles: Vec<WordTile>,
}

impl Word {
    pub fn label(&self, alphabet: &alphabet::Alphabet) -> String {
        self.tiles.iter().map(|t| t.tile.label(alphabet)).collect()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    NotAWord,
    // first move off the stars, or a later move touching nothing.
    Unanchored,
    // scattered over lanes, or a gap in the main word.
    Malformed,
    ExtendedWordNotAWord,
    CrossWordNotAWord,
}

impl Rejection {
    pub fn tally(self, stats: &mut search_context::SearchStats) {
        match self {
            Rejection::TooShort | Rejection::Malformed => stats.malformed_rejections += 1,
            Rejection::NotAWord | Rejection::ExtendedWordNotAWord => stats.word_rejections += 1,
            Rejection::Unanchored => stats.placement_rejections += 1,
            Rejection::CrossWordNotAWord => stats.cross_word_rejections += 1,
        }
    }
}

// Checks a tentative move laid along direction. spelled is what the search
// has spelled from its start square (spelled_len tiles); the main word may
// extend beyond it into adjacent tiles. Returns the main word then each
// cross word, in placement order.
#[allow(clippy::too_many_arguments)]
pub fn evaluate(
    ctx: &mut search_context::SearchContext,
    game_config: &game_config::GameConfig,
    grid: &grid::Grid,
    direction: matrix::Direction,
    placements: &[grid::Placement],
    spelled: &str,
    spelled_len: usize,
    is_first_move: bool,
) -> Result<Vec<Word>, Rejection> {
    let Some(first) = placements.first() else {
        return Err(Rejection::TooShort);
    };
    if spelled_len < 2 {
        return Err(Rejection::TooShort);
    }
    if !ctx.is_word(spelled) {
        return Err(Rejection::NotAWord);
    }
    let layout = game_config.board_layout();
    let on_star = placements.iter().any(|p| layout.is_star(p.row, p.col));
    if is_first_move {
        if !on_star {
            return Err(Rejection::Unanchored);
        }
    } else if !on_star
        && !placements
            .iter()
            .any(|p| grid.has_occupied_neighbor(p.row, p.col))
    {
        return Err(Rejection::Unanchored);
    }

    let alphabet = game_config.alphabet();
    let main_word = main_word(grid, direction, placements, first)?;
    if main_word.len() < 2 {
        return Err(Rejection::TooShort);
    }
    if main_word.len() != spelled_len && !ctx.is_word(&main_word.label(alphabet)) {
        return Err(Rejection::ExtendedWordNotAWord);
    }
    let mut words = vec![main_word];

    let perpendicular = direction.perpendicular();
    for p in placements {
        let (lane, pos) = perpendicular.lane_and_pos(p.row, p.col);
        let (start, end) = grid.run_through(perpendicular, p.row, p.col);
        if start == end {
            continue;
        }
        let cross_word = Word {
            tiles: (start..=end)
                .filter_map(|q| {
                    let (row, col) = perpendicular.cell(lane, q);
                    if q == pos {
                        Some(WordTile {
                            row,
                            col,
                            tile: p.tile,
                            already_on_board: false,
                        })
                    } else {
                        grid.at(row, col).map(|tile| WordTile {
                            row,
                            col,
                            tile,
                            already_on_board: true,
                        })
                    }
                })
                .collect(),
        };
        if !ctx.is_word(&cross_word.label(alphabet)) {
            return Err(Rejection::CrossWordNotAWord);
        }
        words.push(cross_word);
    }
    Ok(words)
}

// the contiguous run along direction covering every placement plus any
// tiles directly before and after.
fn main_word(
    grid: &grid::Grid,
    direction: matrix::Direction,
    placements: &[grid::Placement],
    first: &grid::Placement,
) -> Result<Word, Rejection> {
    let (lane, first_pos) = direction.lane_and_pos(first.row, first.col);
    let mut min_pos = first_pos;
    let mut max_pos = first_pos;
    for p in placements {
        let (this_lane, pos) = direction.lane_and_pos(p.row, p.col);
        if this_lane != lane || grid.is_occupied(p.row, p.col) {
            return Err(Rejection::Malformed);
        }
        min_pos = min_pos.min(pos);
        max_pos = max_pos.max(pos);
    }
    let occupied = |pos: i8| {
        let (row, col) = direction.cell(lane, pos);
        grid.is_occupied(row, col)
    };
    while occupied(min_pos - 1) {
        min_pos -= 1;
    }
    while occupied(max_pos + 1) {
        max_pos += 1;
    }
    let mut tiles = Vec::with_capacity((max_pos - min_pos + 1) as usize);
    for pos in min_pos..=max_pos {
        let (row, col) = direction.cell(lane, pos);
        if let Some(p) = placements.iter().find(|p| p.row == row && p.col == col) {
            tiles.push(WordTile {
                row,
                col,
                tile: p.tile,
                already_on_board: false,
            });
        } else if let Some(tile) = grid.at(row, col) {
            tiles.push(WordTile {
                row,
                col,
                tile,
                already_on_board: true,
            });
        } else {
            return Err(Rejection::Malformed);
        }
    }
    Ok(Word { tiles })
}

// Premiums count only under newly placed tiles.
pub fn score_word(game_config: &game_config::GameConfig, word: &Word) -> i32 {
    let alphabet = game_config.alphabet();
    let layout = game_config.board_layout();
    let mut sum = 0i32;
    let mut word_multiplier = 1i32;
    for t in &word.tiles {
        let points = t.tile.points(alphabet) as i32;
        if t.already_on_board {
            sum += points;
        } else {
            let premium = layout.premium_at(t.row, t.col);
            sum += points * premium.letter_multiplier();
            word_multiplier *= premium.word_multiplier();
        }
    }
    sum * word_multiplier
}

// (total, per word).
pub fn score_words(game_config: &game_config::GameConfig, words: &[Word]) -> (i32, Vec<i32>) {
    let word_scores = words
        .iter()
        .map(|word| score_word(game_config, word))
        .collect::<Vec<_>>();
    (word_scores.iter().sum(), word_scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon;
    use std::time::Duration;
    use tile::Tile;

    fn parse(alphabet: &alphabet::Alphabet, s: &str) -> Tile {
        Tile::parse(alphabet, s).unwrap()
    }

    fn across(alphabet: &alphabet::Alphabet, row: i8, col: i8, labels: &[&str]) -> Word {
        Word {
            tiles: labels
                .iter()
                .zip(col..)
                .map(|(s, col)| WordTile {
                    row,
                    col,
                    tile: parse(alphabet, s),
                    already_on_board: false,
                })
                .collect(),
        }
    }

    #[test]
    fn letter_premium_then_star() {
        let game_config = game_config::make_tamil_game_config();
        let alphabet = game_config.alphabet();
        // cols 3..=7 of the center row: DL at 3, star at 7.
        let word = across(alphabet, 7, 3, &["அ", "அ", "அ", "அ", "அ"]);
        assert_eq!(score_word(&game_config, &word), (2 + 1 + 1 + 1 + 1) * 2);
    }

    #[test]
    fn word_premiums_multiply() {
        let game_config = game_config::make_tamil_game_config();
        let alphabet = game_config.alphabet();
        // TW at 0, DL at 3, star at 7.
        let word = across(alphabet, 7, 0, &["அ"; 8]);
        assert_eq!(score_word(&game_config, &word), 9 * 3 * 2);
    }

    #[test]
    fn premiums_ignored_under_existing_tiles() {
        let game_config = game_config::make_tamil_game_config();
        let alphabet = game_config.alphabet();
        let mut word = across(alphabet, 7, 0, &["கா", "அ"]);
        word.tiles[0].already_on_board = true;
        assert_eq!(score_word(&game_config, &word), 3 + 1);
        word.tiles[1].tile = Tile::Blank(0);
        let (total, per_word) = score_words(&game_config, &[word.clone(), word]);
        assert_eq!(per_word, vec![3, 3]);
        assert_eq!(total, 6);
    }

    struct Fixture {
        game_config: game_config::GameConfig,
        lexicon: lexicon::Lexicon,
    }

    impl Fixture {
        fn new(words: &[&str]) -> Self {
            Self {
                game_config: game_config::make_tamil_game_config(),
                lexicon: lexicon::Lexicon::from_words(words),
            }
        }

        fn ctx(&self) -> search_context::SearchContext<'_> {
            search_context::SearchContext::new(
                Some(&self.lexicon),
                self.game_config.board_layout().dim(),
                0,
                Duration::from_secs(5),
                32,
            )
        }

        fn grid(&self, tiles: &[(i8, i8, &str)]) -> grid::Grid {
            let alphabet = self.game_config.alphabet();
            let placements = tiles
                .iter()
                .map(|&(row, col, s)| grid::Placement {
                    row,
                    col,
                    tile: parse(alphabet, s),
                })
                .collect::<Vec<_>>();
            grid::Grid::new(self.game_config.board_layout().dim(), alphabet, &placements)
        }

        fn placements(&self, tiles: &[(i8, i8, &str)]) -> Vec<grid::Placement> {
            tiles
                .iter()
                .map(|&(row, col, s)| grid::Placement {
                    row,
                    col,
                    tile: parse(self.game_config.alphabet(), s),
                })
                .collect()
        }
    }

    #[test]
    fn first_move_must_cover_a_star() {
        let f = Fixture::new(&["கடல்"]);
        let grid = f.grid(&[]);
        let mut ctx = f.ctx();
        let on_star = f.placements(&[(7, 7, "க"), (7, 8, "ட"), (7, 9, "ல்")]);
        let words = evaluate(
            &mut ctx,
            &f.game_config,
            &grid,
            matrix::Direction::Across,
            &on_star,
            "கடல்",
            3,
            true,
        )
        .unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].label(f.game_config.alphabet()), "கடல்");
        assert_eq!(score_words(&f.game_config, &words).0, 12);

        let off_star = f.placements(&[(7, 8, "க"), (7, 9, "ட"), (7, 10, "ல்")]);
        assert_eq!(
            evaluate(
                &mut ctx,
                &f.game_config,
                &grid,
                matrix::Direction::Across,
                &off_star,
                "கடல்",
                3,
                true,
            ),
            Err(Rejection::Unanchored)
        );
        assert_eq!(
            evaluate(
                &mut ctx,
                &f.game_config,
                &grid,
                matrix::Direction::Across,
                &on_star[..1],
                "க",
                1,
                true,
            ),
            Err(Rejection::TooShort)
        );
    }

    #[test]
    fn main_word_absorbs_adjacent_tiles() {
        let f = Fixture::new(&["கட", "கடல்"]);
        let grid = f.grid(&[(7, 9, "ல்")]);
        let mut ctx = f.ctx();
        let placements = f.placements(&[(7, 7, "க"), (7, 8, "ட")]);
        let words = evaluate(
            &mut ctx,
            &f.game_config,
            &grid,
            matrix::Direction::Across,
            &placements,
            "கட",
            2,
            false,
        )
        .unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].label(f.game_config.alphabet()), "கடல்");
        assert!(words[0].tiles[2].already_on_board);
    }

    #[test]
    fn extended_word_must_be_valid() {
        let f = Fixture::new(&["கட"]);
        let grid = f.grid(&[(7, 9, "ல்")]);
        let mut ctx = f.ctx();
        let placements = f.placements(&[(7, 7, "க"), (7, 8, "ட")]);
        assert_eq!(
            evaluate(
                &mut ctx,
                &f.game_config,
                &grid,
                matrix::Direction::Across,
                &placements,
                "கட",
                2,
                false,
            ),
            Err(Rejection::ExtendedWordNotAWord)
        );
    }

    #[test]
    fn bad_cross_word_rejects_whole_move() {
        let f = Fixture::new(&["கட", "பட", "கம"]);
        let grid = f.grid(&[(6, 8, "க"), (6, 9, "க")]);
        let mut ctx = f.ctx();
        // (7,8) under க forms கட; (7,9) under க forms கல, not a word.
        let placements = f.placements(&[(7, 8, "ட"), (7, 9, "ல")]);
        assert_eq!(
            evaluate(
                &mut ctx,
                &f.game_config,
                &grid,
                matrix::Direction::Across,
                &placements,
                "டல",
                2,
                false,
            ),
            Err(Rejection::NotAWord)
        );
        let f = Fixture::new(&["கட", "டல", "கம"]);
        let mut ctx = f.ctx();
        assert_eq!(
            evaluate(
                &mut ctx,
                &f.game_config,
                &grid,
                matrix::Direction::Across,
                &placements,
                "டல",
                2,
                false,
            ),
            Err(Rejection::CrossWordNotAWord)
        );
    }

    #[test]
    fn later_move_must_touch_or_use_a_star() {
        let f = Fixture::new(&["கட"]);
        let grid = f.grid(&[(7, 7, "க")]);
        let mut ctx = f.ctx();
        let far = f.placements(&[(0, 5, "க"), (0, 6, "ட")]);
        assert_eq!(
            evaluate(
                &mut ctx,
                &f.game_config,
                &grid,
                matrix::Direction::Across,
                &far,
                "கட",
                2,
                false,
            ),
            Err(Rejection::Unanchored)
        );
        let star = f.placements(&[(3, 3, "க"), (3, 4, "ட")]);
        assert!(
            evaluate(
                &mut ctx,
                &f.game_config,
                &grid,
                matrix::Direction::Across,
                &star,
                "கட",
                2,
                false,
            )
            .is_ok()
        );
    }

    #[test]
    fn cross_words_follow_the_main_word() {
        let f = Fixture::new(&["பட", "கட"]);
        let grid = f.grid(&[(7, 7, "ப"), (6, 8, "க")]);
        let mut ctx = f.ctx();
        let placements = vec![grid::Placement {
            row: 7,
            col: 8,
            tile: Tile::Blank(f.game_config.alphabet().from_label("ட").unwrap()),
        }];
        let words = evaluate(
            &mut ctx,
            &f.game_config,
            &grid,
            matrix::Direction::Across,
            &placements,
            "பட",
            2,
            false,
        )
        .unwrap();
        let alphabet = f.game_config.alphabet();
        let labels = words.iter().map(|w| w.label(alphabet)).collect::<Vec<_>>();
        assert_eq!(labels, vec!["பட", "கட"]);
        assert_eq!(score_words(&f.game_config, &words), (4, vec![2, 2]));
    }
}

// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    anchors, candidates, cross_set, game_config, grid, matrix, play_scorer, search_context, tile,
};

pub struct BoardSnapshot<'a> {
    pub grid: &'a grid::Grid,
    pub game_config: &'a game_config::GameConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub placements: Vec<grid::Placement>,
    // main word first.
    pub formed_words: Vec<play_scorer::Word>,
    pub score: i32,
    pub word_scores: Vec<i32>,
    // ascending, distinct.
    pub rack_indices: Vec<u8>,
}

// squares to begin spelling from for this anchor, closest first.
fn start_positions(
    grid: &grid::Grid,
    direction: matrix::Direction,
    lane: i8,
    anchor_pos: i8,
    rack_len: usize,
) -> Vec<i8> {
    let occupied = |lane: i8, pos: i8| {
        let (row, col) = direction.cell(lane, pos);
        grid.is_occupied(row, col)
    };
    let mut prefix_start = anchor_pos;
    while occupied(lane, prefix_start - 1) {
        prefix_start -= 1;
    }
    if prefix_start < anchor_pos {
        // tiles right before the anchor must start the word.
        return vec![prefix_start];
    }
    let mut ret = vec![anchor_pos];
    let mut pos = anchor_pos - 1;
    while pos >= 0 && ret.len() < rack_len && !occupied(lane, pos) {
        ret.push(pos);
        if occupied(lane - 1, pos) || occupied(lane + 1, pos) {
            // that square is an anchor of its own.
            break;
        }
        pos -= 1;
    }
    ret
}

// an identical tile sits at a lower free index, so idx adds nothing new.
#[inline(always)]
fn has_earlier_twin(rack: &[tile::Tile], used: u16, idx: usize, also_used: usize) -> bool {
    rack[..idx]
        .iter()
        .enumerate()
        .any(|(j, &t)| j != also_used && used & (1 << j) == 0 && t == rack[idx])
}

// Best-scoring legal move found before the deadline, or None.
// Stops at the first move scoring at least early_exit.
pub fn gen_best_move(
    board_snapshot: &BoardSnapshot<'_>,
    ctx: &mut search_context::SearchContext<'_>,
    rack: &[tile::Tile],
    is_first_move: bool,
    early_exit: Option<i32>,
) -> Option<Move> {
    let rack = &rack[..rack.len().min(u16::BITS as usize)];
    if rack.is_empty() {
        return None;
    }
    let grid = board_snapshot.grid;
    let layout = board_snapshot.game_config.board_layout();
    let dim = grid.dim();

    struct Env<'a, 'b> {
        board_snapshot: &'a BoardSnapshot<'a>,
        ctx: &'a mut search_context::SearchContext<'b>,
        rack: &'a [tile::Tile],
        is_first_move: bool,
        early_exit: Option<i32>,
        direction: matrix::Direction,
        lane: i8,
        lane_len: i8,
        anchor_pos: i8,
        used: u16,
        placements: Vec<grid::Placement>,
        word: String,
        word_len: usize,
        best: Option<Move>,
        stop: bool,
    }

    fn record(env: &mut Env<'_, '_>) {
        let board_snapshot = env.board_snapshot;
        let words = match play_scorer::evaluate(
            env.ctx,
            board_snapshot.game_config,
            board_snapshot.grid,
            env.direction,
            &env.placements,
            &env.word,
            env.word_len,
            env.is_first_move,
        ) {
            Ok(words) => words,
            Err(rejection) => {
                rejection.tally(&mut env.ctx.stats);
                return;
            }
        };
        let (score, word_scores) = play_scorer::score_words(board_snapshot.game_config, &words);
        env.ctx.stats.moves_found += 1;
        // ties keep the earlier move.
        if env.best.as_ref().is_some_and(|best| best.score >= score) {
            return;
        }
        env.ctx.stats.improvements += 1;
        let used = env.used;
        env.best = Some(Move {
            placements: env.placements.clone(),
            formed_words: words,
            score,
            word_scores,
            rack_indices: (0..u16::BITS as u8)
                .filter(|&i| used & (1 << i) != 0)
                .collect(),
        });
        if env.early_exit.is_some_and(|threshold| score >= threshold) {
            env.stop = true;
            env.ctx.stats.early_exit = true;
        }
    }

    fn place(
        env: &mut Env<'_, '_>,
        pos: i8,
        placement: grid::Placement,
        bits: u16,
        check_prefix: bool,
    ) {
        let alphabet = env.board_snapshot.game_config.alphabet();
        let saved = env.word.len();
        env.word.push_str(placement.tile.label(alphabet));
        if !check_prefix || env.ctx.has_prefix(&env.word) {
            env.used |= bits;
            env.word_len += 1;
            env.placements.push(placement);
            if pos >= env.anchor_pos {
                record(env);
            }
            search(env, pos + 1);
            env.placements.pop();
            env.word_len -= 1;
            env.used &= !bits;
        } else {
            env.ctx.stats.prefix_rejections += 1;
        }
        env.word.truncate(saved);
    }

    fn search(env: &mut Env<'_, '_>, pos: i8) {
        if pos >= env.lane_len || env.stop || env.ctx.out_of_time() {
            return;
        }
        env.ctx.stats.search_calls += 1;
        let board_snapshot = env.board_snapshot;
        let alphabet = board_snapshot.game_config.alphabet();
        let (row, col) = env.direction.cell(env.lane, pos);

        if let Some(tile) = board_snapshot.grid.at(row, col) {
            let saved = env.word.len();
            env.word.push_str(tile.label(alphabet));
            env.word_len += 1;
            if env.ctx.has_prefix(&env.word) {
                if pos >= env.anchor_pos && !env.placements.is_empty() {
                    record(env);
                }
                search(env, pos + 1);
            } else {
                env.ctx.stats.prefix_rejections += 1;
            }
            env.word_len -= 1;
            env.word.truncate(saved);
            return;
        }

        let cross_check = cross_set::resolve(
            env.ctx,
            alphabet,
            board_snapshot.grid,
            env.direction,
            row,
            col,
        );
        let rack = env.rack;
        for idx in 0..rack.len() {
            if env.used & (1 << idx) != 0 || has_earlier_twin(rack, env.used, idx, idx) {
                continue;
            }
            let list = candidates::expand(env.ctx, alphabet, rack, idx);
            for candidate in list.iter() {
                if env.stop || env.ctx.is_expired() {
                    return;
                }
                if candidate.used & env.used != 0 {
                    continue;
                }
                if candidate.is_merged() {
                    // each pair once, from its lower index.
                    let partner = (candidate.used & !(1 << idx)).trailing_zeros() as usize;
                    if partner < idx || has_earlier_twin(rack, env.used, partner, idx) {
                        continue;
                    }
                }
                match candidate.tile {
                    tile::Tile::Wildcard => {
                        let options =
                            candidates::wildcard_options(env.ctx, alphabet, &env.word, cross_check);
                        for &letter in options.iter() {
                            if env.stop {
                                break;
                            }
                            let placement = grid::Placement {
                                row,
                                col,
                                tile: tile::Tile::Blank(letter),
                            };
                            place(env, pos, placement, candidate.used, false);
                        }
                    }
                    tile => match tile.letter() {
                        Some(letter) if cross_check.allows(letter) => {
                            place(env, pos, grid::Placement { row, col, tile }, candidate.used, true);
                        }
                        _ => env.ctx.stats.cross_rejections += 1,
                    },
                }
            }
        }
    }

    let mut env = Env {
        board_snapshot,
        ctx,
        rack,
        is_first_move,
        early_exit,
        direction: matrix::Direction::Across,
        lane: 0,
        lane_len: 0,
        anchor_pos: 0,
        used: 0,
        placements: Vec::with_capacity(rack.len()),
        word: String::new(),
        word_len: 0,
        best: None,
        stop: false,
    };

    'anchors: for anchor in anchors::find_anchors(grid, layout) {
        for direction in matrix::Direction::BOTH {
            if env.stop || env.ctx.check_clock() {
                break 'anchors;
            }
            env.ctx.stats.anchors_tried += 1;
            let (lane, anchor_pos) = direction.lane_and_pos(anchor.row, anchor.col);
            env.direction = direction;
            env.lane = lane;
            env.lane_len = dim.lane_len(direction);
            env.anchor_pos = anchor_pos;
            for start in start_positions(grid, direction, lane, anchor_pos, rack.len()) {
                if env.stop || env.ctx.is_expired() {
                    break;
                }
                env.word.clear();
                env.word_len = 0;
                search(&mut env, start);
            }
        }
    }
    env.best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon;
    use std::time::Duration;
    use tile::Tile;

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

        fn tile(&self, s: &str) -> Tile {
            Tile::parse(self.game_config.alphabet(), s).unwrap()
        }

        fn grid(&self, tiles: &[(i8, i8, &str)]) -> grid::Grid {
            let placements = tiles
                .iter()
                .map(|&(row, col, s)| grid::Placement {
                    row,
                    col,
                    tile: self.tile(s),
                })
                .collect::<Vec<_>>();
            grid::Grid::new(
                self.game_config.board_layout().dim(),
                self.game_config.alphabet(),
                &placements,
            )
        }

        fn best(
            &self,
            grid: &grid::Grid,
            rack: &[&str],
            is_first_move: bool,
            time_limit: Duration,
        ) -> (Option<Move>, search_context::SearchStats) {
            let rack = tile::parse_rack(self.game_config.alphabet(), rack).unwrap();
            let mut ctx = search_context::SearchContext::new(
                Some(&self.lexicon),
                self.game_config.board_layout().dim(),
                rack.len(),
                time_limit,
                32,
            );
            let board_snapshot = BoardSnapshot {
                grid,
                game_config: &self.game_config,
            };
            let ret = gen_best_move(&board_snapshot, &mut ctx, &rack, is_first_move, None);
            (ret, ctx.finish())
        }
    }

    #[test]
    fn start_positions_stop_at_neighbors() {
        let f = Fixture::new(&[]);
        let grid = f.grid(&[(7, 7, "க"), (6, 3, "க")]);
        let across = matrix::Direction::Across;
        // tile right before the anchor fixes the start.
        assert_eq!(start_positions(&grid, across, 7, 8, 5), vec![7]);
        // extends left up to a square touching another tile.
        assert_eq!(start_positions(&grid, across, 7, 6, 7), vec![6, 5, 4, 3]);
        // limited by rack size.
        assert_eq!(start_positions(&grid, across, 7, 6, 2), vec![6, 5]);
        assert_eq!(start_positions(&grid, across, 7, 6, 1), vec![6]);
        // board edge.
        assert_eq!(start_positions(&grid, across, 0, 1, 7), vec![1, 0]);
    }

    #[test]
    fn first_move_spells_through_center_star() {
        let f = Fixture::new(&["கடல்"]);
        let grid = f.grid(&[]);
        let (found, stats) = f.best(&grid, &["க்", "அ", "ட்", "அ", "ல்"], true, Duration::from_secs(30));
        let found = found.unwrap();
        assert_eq!(
            found.placements,
            vec![
                grid::Placement { row: 7, col: 7, tile: f.tile("க") },
                grid::Placement { row: 7, col: 8, tile: f.tile("ட") },
                grid::Placement { row: 7, col: 9, tile: f.tile("ல்") },
            ]
        );
        assert_eq!(found.score, 12);
        assert_eq!(found.word_scores, vec![12]);
        assert_eq!(found.rack_indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(found.formed_words.len(), 1);
        assert_eq!(found.formed_words[0].label(f.game_config.alphabet()), "கடல்");
        assert!(!stats.deadline_hit);
        assert!(stats.moves_found >= 1);
    }

    #[test]
    fn wildcard_takes_the_only_fitting_letter() {
        let f = Fixture::new(&["கட", "கம", "பட", "பல"]);
        let grid = f.grid(&[(7, 7, "ப"), (6, 8, "க")]);
        let (found, _) = f.best(&grid, &["?"], false, Duration::from_secs(30));
        let found = found.unwrap();
        assert_eq!(
            found.placements,
            vec![grid::Placement {
                row: 7,
                col: 8,
                tile: Tile::Blank(f.game_config.alphabet().from_label("ட").unwrap()),
            }]
        );
        assert_eq!(found.score, 4);
        assert_eq!(found.rack_indices, vec![0]);
    }

    #[test]
    fn no_move_for_unplayable_rack() {
        let f = Fixture::new(&["கடல்"]);
        let grid = f.grid(&[]);
        let (found, _) = f.best(&grid, &["ஹ்", "ஜ்", "ஔ", "?", "அ"], true, Duration::from_secs(30));
        assert!(found.is_none());
    }

    #[test]
    fn zero_deadline_finds_nothing() {
        let f = Fixture::new(&["கடல்"]);
        let grid = f.grid(&[]);
        let (found, stats) = f.best(&grid, &["க்", "அ", "ட்", "அ", "ல்"], true, Duration::ZERO);
        assert!(found.is_none());
        assert!(stats.deadline_hit);
    }

    #[test]
    fn builds_onto_existing_tiles() {
        let f = Fixture::new(&["கடல்", "மரம்"]);
        // கட on the board, the rack completes கடல்.
        let grid = f.grid(&[(7, 7, "க"), (7, 8, "ட")]);
        let (found, _) = f.best(&grid, &["ல்", "ம்"], false, Duration::from_secs(30));
        let found = found.unwrap();
        assert_eq!(
            found.placements,
            vec![grid::Placement { row: 7, col: 9, tile: f.tile("ல்") }]
        );
        let word = &found.formed_words[0];
        assert_eq!(word.label(f.game_config.alphabet()), "கடல்");
        assert!(word.tiles[0].already_on_board);
        assert!(!word.tiles[2].already_on_board);
        assert_eq!(found.score, 2 + 2 + 2);
    }

    #[test]
    fn early_exit_stops_at_threshold() {
        let f = Fixture::new(&["கடல்"]);
        let grid = f.grid(&[]);
        let rack = tile::parse_rack(f.game_config.alphabet(), &["க்", "அ", "ட்", "அ", "ல்"]).unwrap();
        let mut ctx = search_context::SearchContext::new(
            Some(&f.lexicon),
            f.game_config.board_layout().dim(),
            rack.len(),
            Duration::from_secs(30),
            32,
        );
        let board_snapshot = BoardSnapshot {
            grid: &grid,
            game_config: &f.game_config,
        };
        let found = gen_best_move(&board_snapshot, &mut ctx, &rack, true, Some(1)).unwrap();
        assert_eq!(found.score, 12);
        let stats = ctx.finish();
        assert!(stats.early_exit);
        assert_eq!(stats.moves_found, 1);
    }

    #[test]
    fn permissive_lexicon_obeys_placement_rules() {
        let game_config = game_config::make_tamil_game_config();
        let alphabet = game_config.alphabet();
        let grid = grid::Grid::new(
            game_config.board_layout().dim(),
            alphabet,
            &[
                grid::Placement { row: 7, col: 7, tile: Tile::parse(alphabet, "க").unwrap() },
                grid::Placement { row: 7, col: 8, tile: Tile::parse(alphabet, "ட").unwrap() },
            ],
        );
        let rack = tile::parse_rack(alphabet, &["ம்", "அ", "ர்", "?"]).unwrap();
        let mut ctx = search_context::SearchContext::new(
            None,
            game_config.board_layout().dim(),
            rack.len(),
            Duration::from_millis(200),
            32,
        );
        let board_snapshot = BoardSnapshot {
            grid: &grid,
            game_config: &game_config,
        };
        let found = gen_best_move(&board_snapshot, &mut ctx, &rack, false, None).unwrap();
        for p in &found.placements {
            assert!(!grid.is_occupied(p.row, p.col));
        }
        let mut indices = found.rack_indices.clone();
        indices.dedup();
        assert_eq!(indices, found.rack_indices);
        assert!(found.placements.iter().any(|p| {
            grid.has_occupied_neighbor(p.row, p.col)
                || game_config.board_layout().is_star(p.row, p.col)
        }));
        assert_eq!(
            found.score,
            play_scorer::score_words(&game_config, &found.formed_words).0
        );
    }
}

// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, fash, game_config, grid, lexicon, movegen, search_context, tile};

// everything the engine needs to decide one turn.
#[derive(Clone, Debug)]
pub struct TurnInput {
    pub board: Vec<grid::Placement>,
    pub rack: Vec<tile::Tile>,
    pub is_first_move: bool,
    pub pool_remaining: usize,
    pub time_limit_ms: u64,
    // label lists of recent exchanges, to avoid swapping the same set again.
    pub recent_exchanges: Vec<Vec<String>>,
}

impl TurnInput {
    // first move iff the board is empty.
    pub fn new(
        board: Vec<grid::Placement>,
        rack: Vec<tile::Tile>,
        pool_remaining: usize,
        time_limit_ms: u64,
    ) -> Self {
        Self {
            is_first_move: board.is_empty(),
            board,
            rack,
            pool_remaining,
            time_limit_ms,
            recent_exchanges: Vec::new(),
        }
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Play(movegen::Move),
    Exchange { rack_indices: Vec<u8> },
    Pass,
}

#[derive(Clone, Debug)]
pub struct Outcome {
    pub decision: Decision,
    pub stats: search_context::SearchStats,
}

// Runs one deadline-bounded search. None for lexicon accepts every word.
pub fn choose_move(
    game_config: &game_config::GameConfig,
    lexicon: Option<&lexicon::Lexicon>,
    input: &TurnInput,
) -> Outcome {
    let engine = game_config.engine();
    let alphabet = game_config.alphabet();
    let rack_size = game_config.rack_size() as usize;
    let mut rack = &input.rack[..];
    if rack.len() > rack_size {
        log::warn!(
            "rack has {} tiles, only the first {} are considered",
            rack.len(),
            rack_size
        );
        rack = &rack[..rack_size];
    }
    if rack.is_empty() {
        return Outcome {
            decision: Decision::Pass,
            stats: search_context::SearchStats::default(),
        };
    }

    let dim = game_config.board_layout().dim();
    let grid = grid::Grid::new(dim, alphabet, &input.board);
    let mut ctx = search_context::SearchContext::new(
        lexicon,
        dim,
        rack.len(),
        std::time::Duration::from_millis(input.time_limit_ms),
        engine.deadline_check_interval,
    );
    let board_snapshot = movegen::BoardSnapshot {
        grid: &grid,
        game_config,
    };
    let found = movegen::gen_best_move(
        &board_snapshot,
        &mut ctx,
        rack,
        input.is_first_move,
        engine.early_exit_for(input.is_first_move),
    );
    let stats = ctx.finish();
    log::debug!("search stats: {:?}", stats);

    let decision = match found {
        Some(found) => Decision::Play(found),
        None if input.pool_remaining >= engine.min_pool_for_exchange => {
            let rack_indices =
                select_exchange(alphabet, rack, engine.max_exchange, &input.recent_exchanges);
            if rack_indices.is_empty() {
                Decision::Pass
            } else {
                Decision::Exchange { rack_indices }
            }
        }
        None => Decision::Pass,
    };
    Outcome { decision, stats }
}

// sorted labels, as recorded in recent exchanges.
fn signature(alphabet: &alphabet::Alphabet, rack: &[tile::Tile], indices: &[usize]) -> Vec<String> {
    let mut ret = indices
        .iter()
        .map(|&i| rack[i].fmt(alphabet).to_string())
        .collect::<Vec<_>>();
    ret.sort_unstable();
    ret
}

// Picks up to max_exchange tiles worth throwing back: high points, repeated
// letters, and the overrepresented kind go first, wildcards last. A set
// matching a recent exchange gets its last slot rotated.
pub fn select_exchange(
    alphabet: &alphabet::Alphabet,
    rack: &[tile::Tile],
    max_exchange: usize,
    recent_exchanges: &[Vec<String>],
) -> Vec<u8> {
    let count = max_exchange.min(rack.len());
    if count == 0 {
        return Vec::new();
    }
    let num_vowels = rack
        .iter()
        .filter(|t| matches!(t, tile::Tile::Vowel(_)))
        .count();
    let num_consonants = rack
        .iter()
        .filter(|t| matches!(t, tile::Tile::Consonant(_)))
        .count();
    let mut copies = fash::MyHashMap::<tile::Tile, i32>::default();
    for &t in rack {
        *copies.entry(t).or_default() += 1;
    }

    // in half points.
    let worth = |t: &tile::Tile| {
        let mut ret = 4 * t.points(alphabet) as i32 + 3 * (copies[t] - 1);
        match t {
            tile::Tile::Vowel(_) if num_vowels > 7 => ret += 4,
            tile::Tile::Consonant(_) if num_consonants > 7 => ret += 4,
            tile::Tile::Wildcard => ret -= 12,
            _ => {}
        }
        ret
    };
    let mut order = (0..rack.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        worth(&rack[b])
            .cmp(&worth(&rack[a]))
            .then_with(|| rack[b].points(alphabet).cmp(&rack[a].points(alphabet)))
    });

    let recent = recent_exchanges
        .iter()
        .map(|labels| {
            let mut labels = labels.clone();
            labels.sort_unstable();
            labels
        })
        .collect::<Vec<_>>();
    let is_recent = |indices: &[usize]| recent.contains(&signature(alphabet, rack, indices));
    let finish = |mut indices: Vec<usize>| {
        indices.sort_unstable();
        indices.into_iter().map(|i| i as u8).collect::<Vec<_>>()
    };

    let top = order[..count].to_vec();
    if !is_recent(&top) {
        return finish(top);
    }
    for &replacement in &order[..order.len().min(count + 4)] {
        if top.contains(&replacement) {
            continue;
        }
        let mut trial = top.clone();
        trial[count - 1] = replacement;
        if !is_recent(&trial) {
            return finish(trial);
        }
    }
    finish(top)
}

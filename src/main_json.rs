// Copyright (C) 2020-2026 Andy Kurnia.

use sorkalam::{display, error, game_config, grid, lexicon, move_picker, return_error, tile};

// board: tiles already laid, by label. "?கா" is a wildcard showing கா.
// rack: labels, "?" for a wildcard.
// pool: tiles left in the bag, decides between exchanging and passing.
// time_limit_ms: defaults to the engine's.
// lexicon: word list, one per line. missing or tiny lists accept every word.
#[derive(serde::Deserialize)]
struct Question {
    #[serde(default)]
    board: Vec<BoardTile>,
    rack: Vec<String>,
    #[serde(default)]
    pool: usize,
    time_limit_ms: Option<u64>,
    lexicon: Option<String>,
    #[serde(default)]
    recent_exchanges: Vec<Vec<String>>,
}

#[derive(serde::Deserialize, serde::Serialize)]
struct BoardTile {
    row: i8,
    col: i8,
    tile: String,
}

// json [question file], reads stdin without one.
pub fn main() -> error::Returns<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?
        .format(flexi_logger::colored_default_format)
        .start()?;
    let args = std::env::args().collect::<Vec<_>>();
    let data = match args.get(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    let question = serde_json::from_str::<Question>(&data)?;

    let mut game_config = game_config::make_tamil_game_config();
    if let Some(time_limit_ms) = question.time_limit_ms {
        game_config.engine_mut().time_limit_ms = time_limit_ms;
    }
    let alphabet = game_config.alphabet();

    let mut board = Vec::with_capacity(question.board.len());
    for board_tile in &question.board {
        let tile = tile::Tile::parse(alphabet, &board_tile.tile)?;
        if tile == tile::Tile::Wildcard {
            return_error!(format!(
                "board ({}, {}): a wildcard on the board needs a letter",
                board_tile.row, board_tile.col
            ));
        }
        board.push(grid::Placement {
            row: board_tile.row,
            col: board_tile.col,
            tile,
        });
    }
    let rack = tile::parse_rack(alphabet, &question.rack)?;
    let lexicon = match &question.lexicon {
        Some(path) => lexicon::Lexicon::load_or_permissive(path, lexicon::MIN_WORDS),
        None => {
            log::warn!("no lexicon given, accepting every word");
            None
        }
    };

    let mut input = move_picker::TurnInput::new(
        board,
        rack,
        question.pool,
        game_config.engine().time_limit_ms,
    );
    input.recent_exchanges = question.recent_exchanges;
    let outcome = move_picker::choose_move(&game_config, lexicon.as_ref(), &input);
    log::info!(
        "{}",
        display::fmt_decision(alphabet, &input.rack, &outcome.decision)
    );

    let result = match &outcome.decision {
        move_picker::Decision::Play(found) => serde_json::json!({
            "action": "play",
            "score": found.score,
            "placements": found
                .placements
                .iter()
                .map(|p| BoardTile {
                    row: p.row,
                    col: p.col,
                    tile: p.tile.fmt(alphabet).to_string(),
                })
                .collect::<Vec<_>>(),
            "words": found
                .formed_words
                .iter()
                .map(|w| w.label(alphabet))
                .collect::<Vec<_>>(),
            "word_scores": found.word_scores,
            "rack_indices": found.rack_indices,
            "stats": outcome.stats,
        }),
        move_picker::Decision::Exchange { rack_indices } => serde_json::json!({
            "action": "exchange",
            "rack_indices": rack_indices,
            "stats": outcome.stats,
        }),
        move_picker::Decision::Pass => serde_json::json!({
            "action": "pass",
            "stats": outcome.stats,
        }),
    };
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

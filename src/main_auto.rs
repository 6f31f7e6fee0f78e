// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use sorkalam::{display, error, game_config, game_state, lexicon, move_picker, tile};

thread_local! {
    static RNG: std::cell::RefCell<rand_chacha::ChaCha20Rng> =
        std::cell::RefCell::new(rand_chacha::ChaCha20Rng::from_os_rng());
}

// omits 01IOl
static BASE57: &[u8; 57] = b"\
23456789\
ABCDEFGHJKLMNPQRSTUVWXYZ\
abcdefghijkmnopqrstuvwxyz\
";

const GAME_ID_LEN: usize = 8;

// exchanges remembered per player, to avoid swapping the same set back.
const NUM_RECENT_EXCHANGES: usize = 3;

enum CSVRow<T1, T2> {
    Log(T1),
    Game(T2),
}

struct SerializeArc<T>(std::sync::Arc<T>);

impl<T: serde::Serialize> serde::Serialize for SerializeArc<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (*self.0).serialize(serializer)
    }
}

// one final-score column per player in the games log.
fn score_columns(player_aliases: &[std::sync::Arc<String>]) -> Box<[String]> {
    player_aliases
        .iter()
        .map(|x| format!("{}_score", x))
        .collect::<Box<[_]>>()
}

// auto <word list> [num games] [time limit ms]
pub fn main() -> error::Returns<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?
        .format(flexi_logger::colored_default_format)
        .start()?;
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() <= 1 {
        return Err("need argument: word list".into());
    }
    let lexicon =
        std::sync::Arc::new(lexicon::Lexicon::load_or_permissive(&args[1], lexicon::MIN_WORDS));
    let num_games = match args.get(2) {
        Some(s) => s.parse::<usize>()?,
        None => 100,
    };
    let mut config = game_config::make_tamil_game_config();
    if let Some(s) = args.get(3) {
        config.engine_mut().time_limit_ms = s.parse()?;
    }
    let game_config = std::sync::Arc::new(config);
    let player_aliases = std::sync::Arc::new(
        (1..=game_config.num_players())
            .map(|x| std::sync::Arc::new(format!("p{}", x)))
            .collect::<Box<_>>(),
    );
    let num_threads = num_cpus::get();
    let num_processed_games = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let mut threads = vec![];
    let (tx, rx) = std::sync::mpsc::channel();
    for _ in 0..num_threads {
        let tx = tx.clone();
        let game_config = std::sync::Arc::clone(&game_config);
        let lexicon = std::sync::Arc::clone(&lexicon);
        let player_aliases = std::sync::Arc::clone(&player_aliases);
        let num_processed_games = std::sync::Arc::clone(&num_processed_games);
        threads.push(std::thread::spawn(move || {
            RNG.with(|rng| {
                let rng = &mut *rng.borrow_mut();
                let alphabet = game_config.alphabet();
                let num_players = game_config.num_players() as usize;
                let mut game_id = String::with_capacity(GAME_ID_LEN);
                let mut game_state = game_state::GameState::new(&game_config);
                let mut recent_exchanges = vec![Vec::<Vec<String>>::new(); num_players];
                let mut num_moves;
                loop {
                    if num_processed_games.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
                        >= num_games
                    {
                        num_processed_games.fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
                        break;
                    }

                    num_moves = 0;
                    recent_exchanges.iter_mut().for_each(|m| m.clear());
                    game_id.clear();
                    for _ in 0..GAME_ID_LEN {
                        game_id.push(BASE57[rng.random_range(0..BASE57.len())] as char);
                    }
                    let game_id = std::sync::Arc::new(game_id.clone());
                    let went_first = rng.random_range(0..game_config.num_players());
                    game_state.reset_and_draw_tiles(rng);
                    game_state.turn = went_first;
                    loop {
                        num_moves += 1;
                        let turn = game_state.turn as usize;
                        let cur_rack = game_state.current_player().rack.clone();
                        let input = game_state.turn_input(recent_exchanges[turn].clone());
                        let outcome = move_picker::choose_move(
                            &game_config,
                            (*lexicon).as_ref(),
                            &input,
                        );
                        let play_fmt = display::fmt_decision(alphabet, &cur_rack, &outcome.decision);
                        let (play_score, tiles_played) = match &outcome.decision {
                            move_picker::Decision::Play(found) => {
                                (found.score, found.rack_indices.len())
                            }
                            move_picker::Decision::Exchange { rack_indices } => {
                                (0, rack_indices.len())
                            }
                            move_picker::Decision::Pass => (0, 0),
                        };
                        if let move_picker::Decision::Exchange { rack_indices } = &outcome.decision
                        {
                            let mut signature = rack_indices
                                .iter()
                                .map(|&i| cur_rack[i as usize].fmt(alphabet).to_string())
                                .collect::<Vec<_>>();
                            signature.sort_unstable();
                            let recent = &mut recent_exchanges[turn];
                            recent.push(signature);
                            if recent.len() > NUM_RECENT_EXCHANGES {
                                recent.remove(0);
                            }
                        }

                        let old_bag_len = game_state.bag.len();
                        if let Err(e) = game_state.play(rng, &outcome.decision) {
                            log::error!("game {}: {}", game_id, e);
                            break;
                        }
                        let aft_rack_ser =
                            tile::fmt_rack(alphabet, &game_state.current_player().rack);
                        game_state.next_turn();
                        let is_over = game_state.is_over();

                        if tx
                            .send(CSVRow::Log((
                                SerializeArc(std::sync::Arc::clone(&player_aliases[turn])),
                                SerializeArc(std::sync::Arc::clone(&game_id)),
                                num_moves,
                                tile::fmt_rack(alphabet, &cur_rack),
                                play_fmt,
                                play_score,
                                game_state.players[turn].score,
                                tiles_played,
                                aft_rack_ser,
                                old_bag_len,
                                game_state.current_player().score,
                                outcome.stats.search_calls,
                                outcome.stats.elapsed_ms,
                                outcome.stats.deadline_hit,
                            )))
                            .is_err()
                        {
                            return;
                        }

                        if is_over {
                            let final_scores = game_state
                                .players
                                .iter()
                                .map(|p| p.score)
                                .collect::<Vec<_>>();
                            if tx
                                .send(CSVRow::Game((
                                    SerializeArc(std::sync::Arc::clone(&game_id)),
                                    final_scores,
                                    num_moves,
                                    SerializeArc(std::sync::Arc::clone(
                                        &player_aliases[went_first as usize],
                                    )),
                                )))
                                .is_err()
                            {
                                return;
                            }
                            break;
                        }
                    }
                }
            })
        }));
    }
    drop(tx);

    let epoch_secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let run_identifier = format!("log-{:08x}", epoch_secs);
    log::info!("logging to {}", run_identifier);
    let mut csv_log = csv::Writer::from_path(&run_identifier)?;
    let mut csv_game = csv::Writer::from_path(format!("games-{}", run_identifier))?;
    csv_log.serialize((
        "playerID",
        "gameID",
        "turn",
        "rack",
        "play",
        "score",
        "totalscore",
        "tilesplayed",
        "leave",
        "tilesremaining",
        "oppscore",
        "searchcalls",
        "elapsedms",
        "deadlinehit",
    ))?;
    csv_game.serialize((
        "gameID",
        score_columns(&player_aliases),
        "moves",
        "first",
    ))?;
    let mut completed_games = 0u64;
    let mut completed_moves = 0u64;
    let t0 = std::time::Instant::now();
    let mut last_report_secs = 0;
    for row in rx.iter() {
        match row {
            CSVRow::Log(r) => {
                csv_log.serialize(r)?;
                completed_moves += 1;
            }
            CSVRow::Game(r) => {
                csv_game.serialize(r)?;
                completed_games += 1;
                let elapsed_secs = t0.elapsed().as_secs();
                if elapsed_secs > last_report_secs {
                    last_report_secs = elapsed_secs;
                    log::info!(
                        "After {} seconds, have logged {} games ({} moves) into {}",
                        elapsed_secs,
                        completed_games,
                        completed_moves,
                        run_identifier
                    );
                }
            }
        }
    }
    csv_log.flush()?;
    csv_game.flush()?;
    log::info!(
        "After {} seconds, have logged {} games ({} moves) into {}",
        t0.elapsed().as_secs(),
        completed_games,
        completed_moves,
        run_identifier
    );

    for thread in threads {
        if let Err(e) = thread.join() {
            log::error!("{:?}", e);
        }
    }

    Ok(())
}

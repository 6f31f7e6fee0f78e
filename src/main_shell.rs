// Copyright (C) 2020-2026 Andy Kurnia.

use sorkalam::{display, error, game_config, grid, lexicon, matrix, move_picker, return_error, tile};

static HELP: &str = "\
lexicon <file>                  load a word list (one word per line)
rack <tile>...                  set the rack, ? for a wildcard
place <row> <col> <across|down> <tile>...
                                lay tiles from a square, ?கா for a wildcard as கா
clear                           empty the board
pool <n>                        tiles left in the bag
time <ms>                       search time limit
board                           show the board
gen                             ask the engine for a move
commit                          lay the last generated move
source <file>                   run commands from a file
exit";

struct Session {
    game_config: game_config::GameConfig,
    lexicon: Option<lexicon::Lexicon>,
    board: Vec<grid::Placement>,
    rack: Vec<tile::Tile>,
    pool: usize,
    last_decision: Option<move_picker::Decision>,
}

impl Session {
    fn new(game_config: game_config::GameConfig) -> Self {
        Self {
            pool: game_config.alphabet().total_tiles(),
            game_config,
            lexicon: None,
            board: Vec::new(),
            rack: Vec::new(),
            last_decision: None,
        }
    }

    fn grid(&self) -> grid::Grid {
        grid::Grid::new(
            self.game_config.board_layout().dim(),
            self.game_config.alphabet(),
            &self.board,
        )
    }

    fn show_board(&self) {
        display::print_board(
            self.game_config.alphabet(),
            self.game_config.board_layout(),
            &self.grid(),
        );
        println!(
            "rack: {}",
            tile::fmt_rack(self.game_config.alphabet(), &self.rack)
        );
    }

    fn place(&mut self, args: &[String]) -> error::Returns<()> {
        if args.len() < 4 {
            return_error!("need <row> <col> <across|down> <tile>...".to_string());
        }
        let row = args[0].parse::<i8>()?;
        let col = args[1].parse::<i8>()?;
        let direction = match args[2].as_str() {
            "across" => matrix::Direction::Across,
            "down" => matrix::Direction::Down,
            other => {
                return_error!(format!("invalid direction {:?}", other));
            }
        };
        let alphabet = self.game_config.alphabet();
        let dim = self.game_config.board_layout().dim();
        let grid = self.grid();
        let mut placements = Vec::with_capacity(args.len() - 3);
        let (lane, start) = direction.lane_and_pos(row, col);
        for (pos, label) in (start..).zip(&args[3..]) {
            let (row, col) = direction.cell(lane, pos);
            if !dim.contains(row, col) {
                return_error!(format!("({}, {}) is off the board", row, col));
            }
            if grid.is_occupied(row, col) {
                return_error!(format!("({}, {}) is taken", row, col));
            }
            let tile = tile::Tile::parse(alphabet, label)?;
            if tile == tile::Tile::Wildcard {
                return_error!(format!("{:?}: a wildcard on the board needs a letter", label));
            }
            placements.push(grid::Placement { row, col, tile });
        }
        self.board.extend(placements);
        Ok(())
    }

    fn generate(&mut self) {
        let alphabet = self.game_config.alphabet();
        let input = move_picker::TurnInput::new(
            self.board.clone(),
            self.rack.clone(),
            self.pool,
            self.game_config.engine().time_limit_ms,
        );
        let outcome = move_picker::choose_move(&self.game_config, self.lexicon.as_ref(), &input);
        println!(
            "{}",
            display::fmt_decision(alphabet, &self.rack, &outcome.decision)
        );
        if let move_picker::Decision::Play(found) = &outcome.decision {
            for (word, score) in found.formed_words.iter().zip(&found.word_scores) {
                println!("  {} {}", word.label(alphabet), score);
            }
        }
        println!(
            "{} calls, {} moves, {} ms{}",
            outcome.stats.search_calls,
            outcome.stats.moves_found,
            outcome.stats.elapsed_ms,
            if outcome.stats.deadline_hit {
                ", out of time"
            } else {
                ""
            }
        );
        self.last_decision = Some(outcome.decision);
    }

    fn commit(&mut self) -> error::Returns<()> {
        let Some(move_picker::Decision::Play(found)) = self.last_decision.take() else {
            return_error!("no move to commit".to_string());
        };
        let mut rack_indices = found.rack_indices.clone();
        rack_indices.sort_unstable();
        for &i in rack_indices.iter().rev() {
            if (i as usize) < self.rack.len() {
                self.rack.remove(i as usize);
            }
        }
        self.board.extend_from_slice(&found.placements);
        Ok(())
    }

    fn run(&mut self, strings: &[String]) -> error::Returns<()> {
        let alphabet = self.game_config.alphabet();
        match strings[0].as_str() {
            "help" => println!("{}", HELP),
            "lexicon" => match strings.get(1) {
                Some(path) => {
                    let lexicon = lexicon::Lexicon::from_file(path)?;
                    println!("{} words", lexicon.len());
                    self.lexicon = Some(lexicon);
                }
                None => {
                    self.lexicon = None;
                    println!("accepting every word");
                }
            },
            "rack" => {
                let rack = tile::parse_rack(alphabet, &strings[1..])?;
                if rack.len() > self.game_config.rack_size() as usize {
                    return_error!(format!(
                        "rack has {} tiles, at most {}",
                        rack.len(),
                        self.game_config.rack_size()
                    ));
                }
                self.rack = rack;
                self.last_decision = None;
            }
            "place" => {
                self.place(&strings[1..])?;
                self.last_decision = None;
            }
            "clear" => {
                self.board.clear();
                self.last_decision = None;
            }
            "pool" => match strings.get(1) {
                Some(s) => self.pool = s.parse()?,
                None => println!("{}", self.pool),
            },
            "time" => match strings.get(1) {
                Some(s) => self.game_config.engine_mut().time_limit_ms = s.parse()?,
                None => println!("{} ms", self.game_config.engine().time_limit_ms),
            },
            "board" => self.show_board(),
            "gen" => self.generate(),
            "commit" => {
                self.commit()?;
                self.show_board();
            }
            _ => println!("invalid input, help for help"),
        }
        Ok(())
    }
}

pub fn main() -> error::Returns<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?
        .format(flexi_logger::colored_default_format)
        .start()?;
    let mut session = Session::new(game_config::make_tamil_game_config());
    let mut rl = rustyline::DefaultEditor::new()?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if strings.is_empty() {
                        continue;
                    }
                    match strings[0].as_str() {
                        "exit" => {
                            break;
                        }
                        "source" => {
                            if strings.len() > 1 {
                                match std::fs::read_to_string(&strings[1]) {
                                    Ok(whole_file) => {
                                        let v = cmd_stack.len();
                                        for (line_num, line) in whole_file.lines().enumerate() {
                                            cmd_stack.push((
                                                line.to_string(),
                                                Some((strings[1].clone(), line_num + 1)),
                                            ));
                                        }
                                        cmd_stack[v..].reverse();
                                    }
                                    Err(err) => {
                                        println!("cannot open file: {:?}", err);
                                    }
                                }
                            } else {
                                println!("need another arg");
                            }
                        }
                        _ => {
                            if let Err(err) = session.run(&strings) {
                                println!("{}", err);
                            }
                        }
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    Ok(())
}

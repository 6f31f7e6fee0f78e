// Copyright (C) 2020-2026 Andy Kurnia.

use super::{bag, error, game_config, grid, move_picker, tile};
use rand::prelude::*;

// removes the tiles at these rack indices, returning them in index order.
fn take_tiles(rack: &mut Vec<tile::Tile>, rack_indices: &[u8]) -> error::Returns<Vec<tile::Tile>> {
    let mut sorted = rack_indices.to_vec();
    sorted.sort_unstable();
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return_error!(format!("rack index repeated in {:?}", rack_indices));
    }
    if let Some(&last) = sorted.last() {
        if last as usize >= rack.len() {
            return_error!(format!("rack index {} out of {}", last, rack.len()));
        }
    }
    let mut ret = sorted
        .iter()
        .rev()
        .map(|&i| rack.remove(i as usize))
        .collect::<Vec<_>>();
    ret.reverse();
    Ok(ret)
}

#[derive(Clone)]
pub struct GamePlayer {
    pub score: i32,
    pub rack: Vec<tile::Tile>,
}

#[derive(Clone)]
pub struct GameState<'a> {
    pub game_config: &'a game_config::GameConfig,
    pub players: Box<[GamePlayer]>,
    pub board: Vec<grid::Placement>,
    pub bag: bag::Bag,
    pub turn: u8,
    pub num_zeros: u8,
}

impl<'a> GameState<'a> {
    pub fn new(game_config: &'a game_config::GameConfig) -> Self {
        let rack_size = game_config.rack_size() as usize;
        Self {
            game_config,
            players: (0..game_config.num_players())
                .map(|_| GamePlayer {
                    score: 0,
                    rack: Vec::with_capacity(rack_size),
                })
                .collect(),
            board: Vec::new(),
            bag: bag::Bag::new(game_config.alphabet()),
            turn: 0,
            num_zeros: 0,
        }
    }

    pub fn reset_and_draw_tiles<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board.clear();
        self.bag = bag::Bag::new(self.game_config.alphabet());
        self.bag.shuffle(rng);
        self.turn = 0;
        self.num_zeros = 0;
        let rack_size = self.game_config.rack_size() as usize;
        for player in self.players.iter_mut() {
            player.score = 0;
            player.rack.clear();
            self.bag.replenish(&mut player.rack, rack_size);
        }
    }

    #[inline(always)]
    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn as usize]
    }

    pub fn turn_input(&self, recent_exchanges: Vec<Vec<String>>) -> move_picker::TurnInput {
        let mut ret = move_picker::TurnInput::new(
            self.board.clone(),
            self.current_player().rack.clone(),
            self.bag.len(),
            self.game_config.engine().time_limit_ms,
        );
        ret.recent_exchanges = recent_exchanges;
        ret
    }

    pub fn play<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        decision: &move_picker::Decision,
    ) -> error::Returns<()> {
        let rack_size = self.game_config.rack_size() as usize;
        let current_player = &mut self.players[self.turn as usize];
        match decision {
            move_picker::Decision::Play(found) => {
                for p in &found.placements {
                    if self
                        .board
                        .iter()
                        .any(|q| q.row == p.row && q.col == p.col)
                    {
                        return_error!(format!("square ({}, {}) is taken", p.row, p.col));
                    }
                }
                take_tiles(&mut current_player.rack, &found.rack_indices)?;
                self.board.extend_from_slice(&found.placements);
                current_player.score += found.score;
                self.bag.replenish(&mut current_player.rack, rack_size);
                if found.score == 0 {
                    self.num_zeros += 1;
                } else {
                    self.num_zeros = 0;
                }
            }
            move_picker::Decision::Exchange { rack_indices } => {
                if self.bag.len() < rack_indices.len() {
                    return_error!(format!(
                        "cannot exchange {} with {} in the bag",
                        rack_indices.len(),
                        self.bag.len()
                    ));
                }
                let returned = take_tiles(&mut current_player.rack, rack_indices)?;
                self.bag.replenish(&mut current_player.rack, rack_size);
                self.bag.put_back(rng, &returned);
                self.num_zeros += 1;
            }
            move_picker::Decision::Pass => {
                self.num_zeros += 1;
            }
        }
        Ok(())
    }

    pub fn next_turn(&mut self) {
        self.turn = (self.turn + 1) % self.players.len() as u8;
    }

    pub fn is_over(&self) -> bool {
        self.num_zeros >= self.game_config.num_zeros_to_end()
            || (self.bag.is_empty() && self.players.iter().any(|p| p.rack.is_empty()))
    }
}

// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout};

// knobs for the move engine. None disables an early exit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub time_limit_ms: u64,
    pub first_move_early_exit: Option<i32>,
    pub early_exit: Option<i32>,
    pub min_pool_for_exchange: usize,
    pub max_exchange: usize,
    pub deadline_check_interval: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 2500,
            first_move_early_exit: Some(60),
            early_exit: Some(40),
            min_pool_for_exchange: 3,
            max_exchange: 3,
            deadline_check_interval: 32,
        }
    }
}

impl EngineConfig {
    #[inline(always)]
    pub fn early_exit_for(&self, is_first_move: bool) -> Option<i32> {
        if is_first_move {
            self.first_move_early_exit
        } else {
            self.early_exit
        }
    }
}

pub struct StaticGameConfig {
    alphabet: alphabet::Alphabet,
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    num_players: u8,
    num_zeros_to_end: u8,
    engine: EngineConfig,
}

pub enum GameConfig {
    Static(StaticGameConfig),
}

impl GameConfig {
    #[inline(always)]
    pub fn alphabet(&self) -> &alphabet::Alphabet {
        match self {
            GameConfig::Static(x) => &x.alphabet,
        }
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &board_layout::BoardLayout {
        match self {
            GameConfig::Static(x) => &x.board_layout,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }

    #[inline(always)]
    pub fn num_players(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.num_players,
        }
    }

    // consecutive scoreless turns (passes, exchanges) that end the game.
    #[inline(always)]
    pub fn num_zeros_to_end(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.num_zeros_to_end,
        }
    }

    #[inline(always)]
    pub fn engine(&self) -> &EngineConfig {
        match self {
            GameConfig::Static(x) => &x.engine,
        }
    }

    pub fn engine_mut(&mut self) -> &mut EngineConfig {
        match self {
            GameConfig::Static(x) => &mut x.engine,
        }
    }
}

pub fn make_tamil_game_config() -> GameConfig {
    GameConfig::Static(StaticGameConfig {
        alphabet: alphabet::make_tamil_alphabet(),
        board_layout: board_layout::make_tamil_board_layout(),
        rack_size: 14,
        num_players: 2,
        num_zeros_to_end: 4,
        engine: EngineConfig::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tamil_rules() {
        let game_config = make_tamil_game_config();
        assert_eq!(game_config.rack_size(), 14);
        assert_eq!(game_config.num_players(), 2);
        assert_eq!(game_config.num_zeros_to_end(), 4);
        assert_eq!(game_config.board_layout().dim().rows, 15);
        assert_eq!(game_config.engine().time_limit_ms, 2500);
    }

    #[test]
    fn first_move_threshold_is_higher() {
        let engine = EngineConfig::default();
        assert_eq!(engine.early_exit_for(true), Some(60));
        assert_eq!(engine.early_exit_for(false), Some(40));
    }

    #[test]
    fn engine_is_adjustable() {
        let mut game_config = make_tamil_game_config();
        game_config.engine_mut().time_limit_ms = 10;
        game_config.engine_mut().early_exit = None;
        assert_eq!(game_config.engine().time_limit_ms, 10);
        assert_eq!(game_config.engine().early_exit_for(false), None);
    }
}

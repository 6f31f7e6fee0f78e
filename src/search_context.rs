// Copyright (C) 2020-2026 Andy Kurnia.

use super::{candidates, cross_set, fash, lexicon, matrix};
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SearchStats {
    pub search_calls: u64,
    pub anchors_tried: u64,
    pub prefix_rejections: u64,
    pub cross_rejections: u64,
    pub word_rejections: u64,
    pub placement_rejections: u64,
    pub cross_word_rejections: u64,
    pub malformed_rejections: u64,
    pub moves_found: u64,
    pub improvements: u64,
    pub prefix_cache_hits: u64,
    pub word_cache_hits: u64,
    pub cross_cache_hits: u64,
    pub deadline_hit: bool,
    pub early_exit: bool,
    pub elapsed_ms: u64,
}

// Everything memoized during one engine invocation. Never outlives it.
pub struct SearchContext<'a> {
    lexicon: Option<&'a lexicon::Lexicon>,
    prefix_cache: fash::MyHashMap<String, bool>,
    word_cache: fash::MyHashMap<String, bool>,
    dim: matrix::Dim,
    cross_checks: [Box<[Option<cross_set::CrossCheck>]>; 2],
    rack_candidates: Box<[Option<Rc<[candidates::Candidate]>>]>,
    wildcard_options:
        fash::MyHashMap<cross_set::CrossCheck, fash::MyHashMap<String, Rc<[u16]>>>,
    started: Instant,
    deadline: Instant,
    expired: bool,
    check_interval: u32,
    calls_since_check: u32,
    pub stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        lexicon: Option<&'a lexicon::Lexicon>,
        dim: matrix::Dim,
        rack_len: usize,
        time_limit: Duration,
        check_interval: u32,
    ) -> Self {
        let started = Instant::now();
        Self {
            lexicon,
            prefix_cache: fash::MyHashMap::default(),
            word_cache: fash::MyHashMap::default(),
            dim,
            cross_checks: [
                vec![None; dim.area()].into_boxed_slice(),
                vec![None; dim.area()].into_boxed_slice(),
            ],
            rack_candidates: vec![None; rack_len].into_boxed_slice(),
            wildcard_options: fash::MyHashMap::default(),
            started,
            deadline: started + time_limit,
            expired: false,
            check_interval: check_interval.max(1),
            calls_since_check: 0,
            stats: SearchStats::default(),
        }
    }

    // without a lexicon every query passes.
    pub fn is_word(&mut self, word: &str) -> bool {
        let Some(lexicon) = self.lexicon else {
            return true;
        };
        if let Some(&ret) = self.word_cache.get(word) {
            self.stats.word_cache_hits += 1;
            return ret;
        }
        let ret = lexicon.is_word(word);
        self.word_cache.insert(word.to_string(), ret);
        ret
    }

    pub fn has_prefix(&mut self, prefix: &str) -> bool {
        let Some(lexicon) = self.lexicon else {
            return true;
        };
        if let Some(&ret) = self.prefix_cache.get(prefix) {
            self.stats.prefix_cache_hits += 1;
            return ret;
        }
        let ret = lexicon.has_prefix(prefix);
        self.prefix_cache.insert(prefix.to_string(), ret);
        ret
    }

    #[inline(always)]
    pub fn cached_cross_check(
        &mut self,
        direction: matrix::Direction,
        row: i8,
        col: i8,
    ) -> Option<cross_set::CrossCheck> {
        let ret = self.cross_checks[direction.index()][self.dim.at_row_col(row, col)];
        if ret.is_some() {
            self.stats.cross_cache_hits += 1;
        }
        ret
    }

    #[inline(always)]
    pub fn store_cross_check(
        &mut self,
        direction: matrix::Direction,
        row: i8,
        col: i8,
        cross_check: cross_set::CrossCheck,
    ) {
        self.cross_checks[direction.index()][self.dim.at_row_col(row, col)] = Some(cross_check);
    }

    pub fn cached_candidates(&self, rack_idx: usize) -> Option<Rc<[candidates::Candidate]>> {
        self.rack_candidates.get(rack_idx)?.clone()
    }

    pub fn store_candidates(&mut self, rack_idx: usize, list: Rc<[candidates::Candidate]>) {
        if let Some(slot) = self.rack_candidates.get_mut(rack_idx) {
            *slot = Some(list);
        }
    }

    pub fn cached_wildcard_options(
        &self,
        cross_check: cross_set::CrossCheck,
        prefix: &str,
    ) -> Option<Rc<[u16]>> {
        self.wildcard_options.get(&cross_check)?.get(prefix).cloned()
    }

    pub fn store_wildcard_options(
        &mut self,
        cross_check: cross_set::CrossCheck,
        prefix: &str,
        options: Rc<[u16]>,
    ) {
        self.wildcard_options
            .entry(cross_check)
            .or_default()
            .insert(prefix.to_string(), options);
    }

    // reads the clock now. once expired, stays expired.
    pub fn check_clock(&mut self) -> bool {
        if !self.expired && Instant::now() >= self.deadline {
            self.expired = true;
            self.stats.deadline_hit = true;
        }
        self.expired
    }

    // reads the clock only every check_interval calls.
    #[inline(always)]
    pub fn out_of_time(&mut self) -> bool {
        if self.expired {
            return true;
        }
        self.calls_since_check += 1;
        if self.calls_since_check >= self.check_interval {
            self.calls_since_check = 0;
            return self.check_clock();
        }
        false
    }

    #[inline(always)]
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn finish(&mut self) -> SearchStats {
        self.stats.elapsed_ms = self.started.elapsed().as_millis() as u64;
        self.stats.clone()
    }
}

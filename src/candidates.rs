// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, cross_set, search_context, tile};
use std::rc::Rc;

// a tile that may go on one square, and the rack indices it consumes.
// tile is Wildcard when the letter is still to be chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub tile: tile::Tile,
    pub used: u16,
}

impl Candidate {
    #[inline(always)]
    pub fn is_merged(&self) -> bool {
        self.used.count_ones() > 1
    }
}

// the tile alone first, then merges with each partner in rack order.
// partners are listed whether or not they are free; the search filters.
pub fn build_candidates(
    alphabet: &alphabet::Alphabet,
    rack: &[tile::Tile],
    idx: usize,
) -> Vec<Candidate> {
    let mut ret = Vec::new();
    let Some(&this) = rack.get(idx) else {
        return ret;
    };
    if idx >= u16::BITS as usize || !this.is_consistent(alphabet) {
        return ret;
    }
    let bit = 1u16 << idx;
    let partners = || {
        rack.iter()
            .enumerate()
            .take(u16::BITS as usize)
            .filter(move |&(j, _)| j != idx)
    };
    match this {
        tile::Tile::Consonant(_) => {
            ret.push(Candidate { tile: this, used: bit });
            for (j, &other) in partners() {
                if let Some(merged) = tile::Tile::merge(alphabet, this, other) {
                    ret.push(Candidate {
                        tile: merged,
                        used: bit | (1 << j),
                    });
                }
            }
        }
        tile::Tile::Vowel(_) => {
            ret.push(Candidate { tile: this, used: bit });
            for (j, &other) in partners() {
                if let Some(merged) = tile::Tile::merge(alphabet, other, this) {
                    ret.push(Candidate {
                        tile: merged,
                        used: bit | (1 << j),
                    });
                }
            }
        }
        tile::Tile::Composite(_) | tile::Tile::Wildcard => {
            ret.push(Candidate { tile: this, used: bit });
        }
        // a designated blank does not belong on a rack.
        tile::Tile::Blank(_) => {}
    }
    ret
}

pub fn expand(
    ctx: &mut search_context::SearchContext,
    alphabet: &alphabet::Alphabet,
    rack: &[tile::Tile],
    idx: usize,
) -> Rc<[Candidate]> {
    if let Some(ret) = ctx.cached_candidates(idx) {
        return ret;
    }
    let ret: Rc<[Candidate]> = build_candidates(alphabet, rack, idx).into();
    ctx.store_candidates(idx, Rc::clone(&ret));
    ret
}

// letters a wildcard may stand for after prefix on a square with this
// cross check, in alphabet order. every letter is in the inventory, so
// letters already on the rack are covered too.
pub fn wildcard_options(
    ctx: &mut search_context::SearchContext,
    alphabet: &alphabet::Alphabet,
    prefix: &str,
    cross_check: cross_set::CrossCheck,
) -> Rc<[u16]> {
    if let Some(ret) = ctx.cached_wildcard_options(cross_check, prefix) {
        return ret;
    }
    let mut word = String::with_capacity(prefix.len() + 16);
    let mut options = Vec::new();
    for letter in 0..alphabet.len() {
        if !cross_check.allows(letter) {
            continue;
        }
        word.clear();
        word.push_str(prefix);
        word.push_str(alphabet.label(letter));
        if ctx.has_prefix(&word) {
            options.push(letter);
        }
    }
    let ret: Rc<[u16]> = options.into();
    ctx.store_wildcard_options(cross_check, prefix, Rc::clone(&ret));
    ret
}

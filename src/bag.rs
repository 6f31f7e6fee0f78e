// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, tile};
use rand::prelude::*;

#[derive(Clone)]
pub struct Bag(pub Vec<tile::Tile>);

impl Bag {
    // vowels, consonants and wildcards. composites are only ever made on the rack.
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.total_tiles());
        for letter in 0..alphabet.len() {
            if let Some(t) = tile::Tile::from_letter(alphabet, letter) {
                for _ in 0..alphabet.freq(letter) {
                    bag.push(t);
                }
            }
        }
        for _ in 0..alphabet.num_wildcards() {
            bag.push(tile::Tile::Wildcard);
        }
        Bag(bag)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.shuffle(rng);
    }

    pub fn pop(&mut self) -> Option<tile::Tile> {
        self.0.pop()
    }

    pub fn replenish(&mut self, rack: &mut Vec<tile::Tile>, rack_size: usize) {
        while rack.len() < rack_size {
            match self.pop() {
                Some(t) => rack.push(t),
                None => break,
            }
        }
    }

    // each returned tile goes to a random position; the rest keep their order.
    pub fn put_back<R: Rng + ?Sized>(&mut self, rng: &mut R, tiles: &[tile::Tile]) {
        for &t in tiles {
            let pos = rng.random_range(0..=self.0.len());
            self.0.insert(pos, t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn fresh_bag_matches_distribution() {
        let alphabet = alphabet::make_tamil_alphabet();
        let bag = Bag::new(&alphabet);
        assert_eq!(bag.len(), alphabet.total_tiles());
        assert_eq!(
            bag.0.iter().filter(|&&t| t == tile::Tile::Wildcard).count(),
            4
        );
        assert!(!bag.0.iter().any(|t| matches!(t, tile::Tile::Composite(_))));
    }

    #[test]
    fn replenish_stops_when_empty() {
        let alphabet = alphabet::make_tamil_alphabet();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut bag = Bag::new(&alphabet);
        bag.shuffle(&mut rng);
        let mut rack = Vec::new();
        bag.replenish(&mut rack, 14);
        assert_eq!(rack.len(), 14);
        assert_eq!(bag.len(), alphabet.total_tiles() - 14);

        let mut small = Bag(rack[..3].to_vec());
        let mut rack = rack[3..].to_vec();
        small.replenish(&mut rack, 20);
        assert_eq!(rack.len(), 14);
        assert!(small.is_empty());
    }

    #[test]
    fn put_back_keeps_count() {
        let alphabet = alphabet::make_tamil_alphabet();
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut bag = Bag::new(&alphabet);
        let before = bag.len();
        let mut rack = Vec::new();
        bag.replenish(&mut rack, 3);
        bag.put_back(&mut rng, &rack);
        assert_eq!(bag.len(), before);
        let mut sorted_before = Bag::new(&alphabet).0;
        let mut sorted_after = bag.0.clone();
        let key = |t: &tile::Tile| t.letter();
        sorted_before.sort_by_key(key);
        sorted_after.sort_by_key(key);
        assert_eq!(sorted_before, sorted_after);
    }
}

// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, grid, matrix, search_context};

// one bit per alphabet letter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LetterSet([u64; 5]);

impl LetterSet {
    pub const CAPACITY: u16 = 64 * 5;

    #[inline(always)]
    pub fn insert(&mut self, letter: u16) {
        if letter < Self::CAPACITY {
            self.0[(letter >> 6) as usize] |= 1u64 << (letter & 63);
        }
    }

    #[inline(always)]
    pub fn contains(&self, letter: u16) -> bool {
        letter < Self::CAPACITY && self.0[(letter >> 6) as usize] & (1u64 << (letter & 63)) != 0
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&x| x == 0)
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(|x| x.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        (0..Self::CAPACITY).filter(move |&x| self.contains(x))
    }
}

// what may go on an empty square given the perpendicular word through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrossCheck {
    // no tile above/below (or left/right), any letter goes.
    Free,
    Only(LetterSet),
}

impl CrossCheck {
    #[inline(always)]
    pub fn allows(&self, letter: u16) -> bool {
        match self {
            CrossCheck::Free => true,
            CrossCheck::Only(set) => set.contains(letter),
        }
    }
}

// main_direction is the direction of the word being built; the constraint
// comes from the perpendicular run through (row, col).
pub fn resolve(
    ctx: &mut search_context::SearchContext,
    alphabet: &alphabet::Alphabet,
    grid: &grid::Grid,
    main_direction: matrix::Direction,
    row: i8,
    col: i8,
) -> CrossCheck {
    if let Some(ret) = ctx.cached_cross_check(main_direction, row, col) {
        return ret;
    }
    let ret = compute(ctx, alphabet, grid, main_direction.perpendicular(), row, col);
    ctx.store_cross_check(main_direction, row, col, ret);
    ret
}

fn compute(
    ctx: &mut search_context::SearchContext,
    alphabet: &alphabet::Alphabet,
    grid: &grid::Grid,
    direction: matrix::Direction,
    row: i8,
    col: i8,
) -> CrossCheck {
    let (lane, pos) = direction.lane_and_pos(row, col);
    let (start, end) = grid.run_through(direction, row, col);
    if start == pos && end == pos {
        return CrossCheck::Free;
    }
    let spell = |range: std::ops::Range<i8>| {
        range
            .filter_map(|p| {
                let (r, c) = direction.cell(lane, p);
                grid.at(r, c)
            })
            .map(|tile| tile.label(alphabet))
            .collect::<String>()
    };
    let prefix = spell(start..pos);
    let suffix = spell(pos + 1..end + 1);
    let mut set = LetterSet::default();
    let mut word = String::new();
    for letter in 0..alphabet.len() {
        if ctx.out_of_time() {
            // nothing is placed after the deadline.
            return CrossCheck::Only(LetterSet::default());
        }
        word.clear();
        word.push_str(&prefix);
        word.push_str(alphabet.label(letter));
        word.push_str(&suffix);
        if ctx.is_word(&word) {
            set.insert(letter);
        }
    }
    CrossCheck::Only(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board_layout, lexicon, tile::Tile};
    use std::time::Duration;

    fn parse(alphabet: &alphabet::Alphabet, s: &str) -> Tile {
        Tile::parse(alphabet, s).unwrap()
    }

    #[test]
    fn letter_set_bits() {
        let mut set = LetterSet::default();
        assert!(set.is_empty());
        set.insert(0);
        set.insert(63);
        set.insert(64);
        set.insert(297);
        set.insert(9999);
        assert_eq!(set.len(), 4);
        assert!(set.contains(297));
        assert!(!set.contains(1));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 63, 64, 297]);
    }

    #[test]
    fn letters_completing_the_perpendicular_word() {
        let alphabet = alphabet::make_tamil_alphabet();
        let dim = board_layout::make_tamil_board_layout().dim();
        // க above the square, ல் below it.
        let grid = grid::Grid::new(
            dim,
            &alphabet,
            &[
                grid::Placement { row: 6, col: 8, tile: parse(&alphabet, "க") },
                grid::Placement { row: 8, col: 8, tile: parse(&alphabet, "ல்") },
            ],
        );
        let lexicon = lexicon::Lexicon::from_words(["கடல்", "கல்", "கமல்", "பல்"]);
        let mut ctx = search_context::SearchContext::new(
            Some(&lexicon),
            dim,
            0,
            Duration::from_secs(5),
            32,
        );
        let check = resolve(&mut ctx, &alphabet, &grid, matrix::Direction::Across, 7, 8);
        let CrossCheck::Only(set) = check else {
            panic!("expected a constraint");
        };
        let allowed = set.iter().map(|x| alphabet.label(x)).collect::<Vec<_>>();
        assert_eq!(allowed, vec!["ட", "ம"]);
        assert!(check.allows(alphabet.from_label("ட").unwrap()));
        assert!(!check.allows(alphabet.from_label("ப").unwrap()));

        // nothing left or right of the square.
        assert_eq!(
            resolve(&mut ctx, &alphabet, &grid, matrix::Direction::Down, 7, 8),
            CrossCheck::Free
        );
        // memoized.
        resolve(&mut ctx, &alphabet, &grid, matrix::Direction::Across, 7, 8);
        assert_eq!(ctx.stats.cross_cache_hits, 1);
    }

    #[test]
    fn dead_square_has_empty_set() {
        let alphabet = alphabet::make_tamil_alphabet();
        let dim = board_layout::make_tamil_board_layout().dim();
        let grid = grid::Grid::new(
            dim,
            &alphabet,
            &[grid::Placement { row: 7, col: 7, tile: parse(&alphabet, "ப") }],
        );
        let lexicon = lexicon::Lexicon::from_words(["கட"]);
        let mut ctx = search_context::SearchContext::new(
            Some(&lexicon),
            dim,
            0,
            Duration::from_secs(5),
            32,
        );
        assert_eq!(
            resolve(&mut ctx, &alphabet, &grid, matrix::Direction::Across, 6, 7),
            CrossCheck::Only(LetterSet::default())
        );
    }

    #[test]
    fn stops_resolving_after_the_deadline() {
        let alphabet = alphabet::make_tamil_alphabet();
        let dim = board_layout::make_tamil_board_layout().dim();
        let grid = grid::Grid::new(
            dim,
            &alphabet,
            &[grid::Placement { row: 6, col: 8, tile: parse(&alphabet, "க") }],
        );
        let lexicon = lexicon::Lexicon::from_words(["கட", "கம"]);
        let mut ctx =
            search_context::SearchContext::new(Some(&lexicon), dim, 0, Duration::ZERO, 1);
        assert_eq!(
            resolve(&mut ctx, &alphabet, &grid, matrix::Direction::Across, 7, 8),
            CrossCheck::Only(LetterSet::default())
        );
        assert!(ctx.stats.deadline_hit);
        assert!(ctx.is_expired());
    }
}

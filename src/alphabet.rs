// Copyright (C) 2020-2026 Andy Kurnia.

use super::fash;

// letter numbering: vowels first, then consonants (with virama), then every
// consonant+vowel composite in consonant-major order.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LetterKind {
    Vowel,
    Consonant,
    Composite,
}

pub struct Letter {
    label: String,
    kind: LetterKind,
    points: i16,
    freq: u8,
}

pub struct Alphabet {
    letters: Box<[Letter]>,
    by_label: fash::MyHashMap<String, u16>,
    num_vowels: u16,
    num_consonants: u16,
    num_wildcards: u8,
}

const VIRAMA: char = '\u{0bcd}';

// label, points, freq
static VOWELS: &[(char, i16, u8)] = &[
    ('\u{0b85}', 1, 31), // a
    ('\u{0b86}', 2, 8),  // aa
    ('\u{0b87}', 1, 19), // i
    ('\u{0b88}', 4, 2),  // ii
    ('\u{0b89}', 1, 15), // u
    ('\u{0b8a}', 5, 2),  // uu
    ('\u{0b8e}', 3, 3),  // e
    ('\u{0b8f}', 4, 2),  // ee
    ('\u{0b90}', 2, 4),  // ai
    ('\u{0b92}', 4, 2),  // o
    ('\u{0b93}', 4, 2),  // oo
    ('\u{0b94}', 8, 2),  // au
];

// vowel sign appended to a bare consonant, parallel to VOWELS. the inherent
// vowel has no sign.
static VOWEL_SIGNS: &[&str] = &[
    "", "\u{0bbe}", "\u{0bbf}", "\u{0bc0}", "\u{0bc1}", "\u{0bc2}", "\u{0bc6}", "\u{0bc7}",
    "\u{0bc8}", "\u{0bca}", "\u{0bcb}", "\u{0bcc}",
];

// bare consonant, points, freq. the tile shows it with a virama.
static CONSONANTS: &[(char, i16, u8)] = &[
    ('\u{0b95}', 1, 21), // ka
    ('\u{0b99}', 5, 2),  // nga
    ('\u{0b9a}', 2, 7),  // ca
    ('\u{0b9e}', 6, 2),  // nya
    ('\u{0b9f}', 1, 9),  // tta
    ('\u{0ba3}', 4, 2),  // nna
    ('\u{0ba4}', 1, 15), // ta
    ('\u{0ba8}', 3, 3),  // na
    ('\u{0baa}', 1, 14), // pa
    ('\u{0bae}', 1, 10), // ma
    ('\u{0baf}', 3, 3),  // ya
    ('\u{0bb0}', 1, 10), // ra
    ('\u{0bb2}', 2, 7),  // la
    ('\u{0bb5}', 2, 8),  // va
    ('\u{0bb4}', 5, 2),  // llla
    ('\u{0bb3}', 2, 5),  // lla
    ('\u{0bb1}', 2, 6),  // rra
    ('\u{0ba9}', 2, 6),  // nnna
    ('\u{0b9c}', 8, 2),  // ja
    ('\u{0bb7}', 8, 2),  // ssa
    ('\u{0bb8}', 8, 2),  // sa
    ('\u{0bb9}', 8, 2),  // ha
];

const NUM_WILDCARDS: u8 = 4;

impl Alphabet {
    #[inline(always)]
    pub fn len(&self) -> u16 {
        self.letters.len() as u16
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, id: u16) -> Option<&Letter> {
        self.letters.get(id as usize)
    }

    #[inline(always)]
    pub fn label(&self, id: u16) -> &str {
        self.get(id).map_or("", |letter| &letter.label)
    }

    #[inline(always)]
    pub fn kind(&self, id: u16) -> Option<LetterKind> {
        self.get(id).map(|letter| letter.kind)
    }

    #[inline(always)]
    pub fn points(&self, id: u16) -> i16 {
        self.get(id).map_or(0, |letter| letter.points)
    }

    // number of such tiles in a fresh bag. composites are never in the bag.
    #[inline(always)]
    pub fn freq(&self, id: u16) -> u8 {
        self.get(id).map_or(0, |letter| letter.freq)
    }

    #[inline(always)]
    pub fn num_wildcards(&self) -> u8 {
        self.num_wildcards
    }

    #[inline(always)]
    pub fn vowels(&self) -> std::ops::Range<u16> {
        0..self.num_vowels
    }

    #[inline(always)]
    pub fn consonants(&self) -> std::ops::Range<u16> {
        self.num_vowels..self.num_vowels + self.num_consonants
    }

    #[inline(always)]
    fn first_composite(&self) -> u16 {
        self.num_vowels + self.num_consonants
    }

    // consonant base + vowel modifier.
    pub fn join(&self, consonant: u16, vowel: u16) -> Option<u16> {
        if !self.consonants().contains(&consonant) || !self.vowels().contains(&vowel) {
            return None;
        }
        let c = consonant - self.num_vowels;
        Some(self.first_composite() + c * self.num_vowels + vowel)
    }

    #[inline(always)]
    pub fn from_label(&self, label: &str) -> Option<u16> {
        self.by_label.get(label).copied()
    }

    pub fn total_tiles(&self) -> usize {
        self.letters
            .iter()
            .map(|letter| letter.freq as usize)
            .sum::<usize>()
            + self.num_wildcards as usize
    }
}

pub fn make_tamil_alphabet() -> Alphabet {
    let num_vowels = VOWELS.len() as u16;
    let num_consonants = CONSONANTS.len() as u16;
    let mut letters = Vec::with_capacity(
        VOWELS.len() + CONSONANTS.len() + VOWELS.len() * CONSONANTS.len(),
    );
    for &(v, points, freq) in VOWELS {
        letters.push(Letter {
            label: v.to_string(),
            kind: LetterKind::Vowel,
            points,
            freq,
        });
    }
    for &(c, points, freq) in CONSONANTS {
        letters.push(Letter {
            label: [c, VIRAMA].iter().collect(),
            kind: LetterKind::Consonant,
            points,
            freq,
        });
    }
    for &(c, c_points, _) in CONSONANTS {
        for (&(_, v_points, _), sign) in VOWELS.iter().zip(VOWEL_SIGNS) {
            let mut label = c.to_string();
            label.push_str(sign);
            letters.push(Letter {
                label,
                kind: LetterKind::Composite,
                points: c_points + v_points,
                freq: 0,
            });
        }
    }
    let by_label = (0u16..)
        .zip(letters.iter())
        .map(|(id, letter)| (letter.label.clone(), id))
        .collect();
    Alphabet {
        letters: letters.into_boxed_slice(),
        by_label,
        num_vowels,
        num_consonants,
        num_wildcards: NUM_WILDCARDS,
    }
}

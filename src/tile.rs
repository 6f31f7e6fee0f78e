// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, error};

// A tile on a rack or on the board. Letters are alphabet ids.
// Wildcard is a rack tile with no letter yet; once laid it becomes Blank,
// showing its designated letter and worth nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Consonant(u16),
    Vowel(u16),
    Composite(u16),
    Wildcard,
    Blank(u16),
}

impl Tile {
    // the natural (non-blank) tile for a letter.
    pub fn from_letter(alphabet: &alphabet::Alphabet, letter: u16) -> Option<Tile> {
        Some(match alphabet.kind(letter)? {
            alphabet::LetterKind::Vowel => Tile::Vowel(letter),
            alphabet::LetterKind::Consonant => Tile::Consonant(letter),
            alphabet::LetterKind::Composite => Tile::Composite(letter),
        })
    }

    #[inline(always)]
    pub fn letter(&self) -> Option<u16> {
        match *self {
            Tile::Consonant(x) | Tile::Vowel(x) | Tile::Composite(x) | Tile::Blank(x) => Some(x),
            Tile::Wildcard => None,
        }
    }

    // the letter shown, as spelled in words. empty for an undesignated wildcard.
    #[inline(always)]
    pub fn label<'a>(&self, alphabet: &'a alphabet::Alphabet) -> &'a str {
        self.letter().map_or("", |x| alphabet.label(x))
    }

    pub fn points(&self, alphabet: &alphabet::Alphabet) -> i16 {
        match *self {
            Tile::Consonant(x) | Tile::Vowel(x) | Tile::Composite(x) => alphabet.points(x),
            Tile::Wildcard | Tile::Blank(_) => 0,
        }
    }

    // the variant agrees with the alphabet's kind for the letter.
    pub fn is_consistent(&self, alphabet: &alphabet::Alphabet) -> bool {
        match *self {
            Tile::Consonant(x) => alphabet.kind(x) == Some(alphabet::LetterKind::Consonant),
            Tile::Vowel(x) => alphabet.kind(x) == Some(alphabet::LetterKind::Vowel),
            Tile::Composite(x) => alphabet.kind(x) == Some(alphabet::LetterKind::Composite),
            Tile::Blank(x) => alphabet.kind(x).is_some(),
            Tile::Wildcard => true,
        }
    }

    // consonant base + vowel modifier. both must be natural tiles.
    pub fn merge(alphabet: &alphabet::Alphabet, consonant: Tile, vowel: Tile) -> Option<Tile> {
        match (consonant, vowel) {
            (Tile::Consonant(c), Tile::Vowel(v)) => alphabet.join(c, v).map(Tile::Composite),
            _ => None,
        }
    }

    // "?" is a wildcard, "?கா" is a wildcard designated as கா.
    pub fn parse(alphabet: &alphabet::Alphabet, s: &str) -> error::Returns<Tile> {
        if s == "?" {
            return Ok(Tile::Wildcard);
        }
        if let Some(rest) = s.strip_prefix('?') {
            return match alphabet.from_label(rest) {
                Some(letter) => Ok(Tile::Blank(letter)),
                None => Err(error::new(format!("invalid letter {:?}", rest))
                    .with_context("blank")
                    .into()),
            };
        }
        match alphabet.from_label(s).and_then(|x| Tile::from_letter(alphabet, x)) {
            Some(tile) => Ok(tile),
            None => Err(error::new(format!("invalid tile {:?}", s)).into()),
        }
    }

    pub fn fmt<'a>(&self, alphabet: &'a alphabet::Alphabet) -> TileFormatter<'a> {
        TileFormatter {
            tile: *self,
            alphabet,
        }
    }
}

pub struct TileFormatter<'a> {
    tile: Tile,
    alphabet: &'a alphabet::Alphabet,
}

impl std::fmt::Display for TileFormatter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.tile {
            Tile::Consonant(x) | Tile::Vowel(x) | Tile::Composite(x) => {
                write!(f, "{}", self.alphabet.label(x))
            }
            Tile::Blank(x) => write!(f, "?{}", self.alphabet.label(x)),
            Tile::Wildcard => write!(f, "?"),
        }
    }
}

pub fn parse_rack<S: AsRef<str>>(
    alphabet: &alphabet::Alphabet,
    labels: &[S],
) -> error::Returns<Vec<Tile>> {
    let mut rack = Vec::with_capacity(labels.len());
    for label in labels {
        let tile = Tile::parse(alphabet, label.as_ref())?;
        if let Tile::Blank(_) = tile {
            return_error!(format!(
                "rack tile {:?}: a wildcard on the rack has no letter",
                label.as_ref()
            ));
        }
        rack.push(tile);
    }
    Ok(rack)
}

pub fn fmt_rack(alphabet: &alphabet::Alphabet, rack: &[Tile]) -> String {
    rack.iter()
        .map(|tile| tile.fmt(alphabet).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;

// word lists shorter than this are treated as placeholders.
pub const MIN_WORDS: usize = 1000;

// Word list sorted by codepoint (String's Ord compares UTF-8 bytes, which is
// the same order). Locale collation would break the binary searches.
pub struct Lexicon {
    words: Box<[String]>,
}

impl Lexicon {
    pub fn from_words<I: IntoIterator<Item = S>, S: AsRef<str>>(words: I) -> Lexicon {
        let mut words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>();
        words.sort_unstable();
        words.dedup();
        Lexicon {
            words: words.into_boxed_slice(),
        }
    }

    // one word per line.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> error::Returns<Lexicon> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                return Err(error::new(format!("{}: {}", path.display(), e))
                    .with_context("lexicon")
                    .into());
            }
        };
        Ok(Lexicon::from_words(text.lines()))
    }

    // None means answer every query permissively. A list much smaller than
    // min_words is likely a placeholder file, not a dictionary.
    pub fn load_or_permissive<P: AsRef<std::path::Path>>(
        path: P,
        min_words: usize,
    ) -> Option<Lexicon> {
        match Lexicon::from_file(&path) {
            Ok(lexicon) if lexicon.len() >= min_words => {
                log::info!(
                    "lexicon: loaded {} words from {}",
                    lexicon.len(),
                    path.as_ref().display()
                );
                Some(lexicon)
            }
            Ok(lexicon) => {
                log::warn!(
                    "lexicon: only {} words in {} (need {}), accepting every word",
                    lexicon.len(),
                    path.as_ref().display(),
                    min_words
                );
                None
            }
            Err(e) => {
                log::warn!("{}, accepting every word", e);
                None
            }
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_word(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|probe| probe.as_str().cmp(word))
            .is_ok()
    }

    // the first word not less than the prefix is the only candidate.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        let idx = self.words.partition_point(|w| w.as_str() < prefix);
        self.words
            .get(idx)
            .is_some_and(|w| w.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_prefix() {
        let lexicon = Lexicon::from_words(["மரம்", "கடல்", "கடலை", "அம்மா"]);
        assert!(lexicon.is_word("கடல்"));
        assert!(lexicon.is_word("கடலை"));
        assert!(!lexicon.is_word("கட"));
        assert!(lexicon.has_prefix("கட"));
        assert!(lexicon.has_prefix("க"));
        assert!(lexicon.has_prefix("மரம்"));
        assert!(!lexicon.has_prefix("மரம்ம"));
        assert!(!lexicon.has_prefix("ப"));
        assert!(lexicon.has_prefix(""));
    }

    #[test]
    fn sorted_by_codepoint_and_deduped() {
        let lexicon = Lexicon::from_words(["மரம்", " அம்மா ", "", "மரம்", "கடல்"]);
        assert_eq!(lexicon.len(), 3);
        let words = lexicon.words();
        assert!(words.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(words[0], "அம்மா");
    }

    #[test]
    fn empty_lexicon_rejects_everything() {
        let lexicon = Lexicon::from_words(Vec::<String>::new());
        assert!(lexicon.is_empty());
        assert!(!lexicon.is_word("கடல்"));
        assert!(!lexicon.has_prefix("க"));
    }

    #[test]
    fn missing_file_is_permissive() {
        assert!(Lexicon::load_or_permissive("/nonexistent/words.txt", 1).is_none());
        assert!(Lexicon::from_file("/nonexistent/words.txt").is_err());
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("sorkalam-lexicon-{}.txt", std::process::id()));
        std::fs::write(&path, "கடல்\nமரம்\n\nஅம்மா\n").unwrap();
        let lexicon = Lexicon::from_file(&path).unwrap();
        assert_eq!(lexicon.len(), 3);
        assert!(Lexicon::load_or_permissive(&path, 3).is_some());
        assert!(Lexicon::load_or_permissive(&path, 1000).is_none());
        std::fs::remove_file(&path).unwrap();
    }
}

use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use std::collections::HashSet;
use std::io;
use std::path::Path;

static DATA_DIR: Dir = include_dir!("src/data");

/// Word and challenge lists shipped inside the binary.
#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum SupportedLexicon {
    Norsk,
    English,
}

impl SupportedLexicon {
    fn file_stem(&self) -> String {
        self.to_string().to_lowercase()
    }
}

/// Outcome of checking a sentence against the allowed-word list.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Valid,
    Empty,
    UnknownWord(String),
}

/// Set of allowed words, immutable after load. Only word-for-word membership
/// is checked; word order, conjugation and grammar are out of scope.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub name: String,
    words: HashSet<String>,
}

impl Lexicon {
    /// Parse `word <optional trailing data>` lines. The first
    /// whitespace-delimited token of each line becomes an allowed word;
    /// duplicates collapse. Lenient mode stores the empty token produced by
    /// blank lines, matching lists that carry trailing newlines.
    pub fn parse(name: &str, raw: &str, strict: bool) -> Self {
        let words = raw
            .split('\n')
            .map(|line| {
                line.split_whitespace()
                    .next()
                    .unwrap_or("")
                    .trim()
                    .to_string()
            })
            .filter(|word| !strict || !word.is_empty())
            .collect();
        Self {
            name: name.to_string(),
            words,
        }
    }

    pub fn bundled(which: SupportedLexicon, strict: bool) -> Self {
        let stem = which.file_stem();
        let file = DATA_DIR
            .get_file(format!("words/{}.txt", stem))
            .expect("bundled word list not found");
        let raw = file
            .contents_utf8()
            .expect("bundled word list is not valid utf-8");
        Self::parse(&stem, raw, strict)
    }

    pub fn from_file<P: AsRef<Path>>(path: P, strict: bool) -> io::Result<Self> {
        let raw = std::fs::read_to_string(&path)?;
        let name = path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        Ok(Self::parse(&name, &raw, strict))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Word-list check for a trimmed sentence: non-empty, and every
    /// space-split token present in the set. Exact, case-sensitive matches
    /// only; the first unknown word is reported.
    pub fn check(&self, sentence: &str) -> Verdict {
        if sentence.trim().is_empty() {
            return Verdict::Empty;
        }
        for word in sentence.split(' ') {
            if !self.words.contains(word) {
                return Verdict::UnknownWord(word.to_string());
            }
        }
        Verdict::Valid
    }
}

/// Raw text of the bundled challenge list paired with a lexicon.
pub fn bundled_challenges(which: SupportedLexicon) -> &'static str {
    DATA_DIR
        .get_file(format!("challenges/{}.txt", which.file_stem()))
        .expect("bundled challenge list not found")
        .contents_utf8()
        .expect("bundled challenge list is not valid utf-8")
}

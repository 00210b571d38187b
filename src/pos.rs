//! Part-of-speech tags and the adjective/satellite alias rule.
//!
//! WordNet uses five one-character tags: `n`, `v`, `a`, `s`, `r`. Satellite
//! adjectives (`s`) live in the same data file as plain adjectives (`a`) and
//! share the index; a lookup under either tag must fall back to the other.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// One of the five WordNet part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    AdjectiveSatellite,
    Adverb,
}

impl PartOfSpeech {
    /// All five tags, in the canonical lookup order (n, v, a, s, r).
    pub const ALL: [PartOfSpeech; 5] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::AdjectiveSatellite,
        PartOfSpeech::Adverb,
    ];

    /// The one-character tag used in index and data records.
    pub fn as_char(self) -> char {
        match self {
            PartOfSpeech::Noun => 'n',
            PartOfSpeech::Verb => 'v',
            PartOfSpeech::Adjective => 'a',
            PartOfSpeech::AdjectiveSatellite => 's',
            PartOfSpeech::Adverb => 'r',
        }
    }

    /// Parse a one-character tag.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(PartOfSpeech::Noun),
            'v' => Some(PartOfSpeech::Verb),
            'a' => Some(PartOfSpeech::Adjective),
            's' => Some(PartOfSpeech::AdjectiveSatellite),
            'r' => Some(PartOfSpeech::Adverb),
            _ => None,
        }
    }

    /// Parse a tag token from a source file, failing with file context.
    pub fn from_token(token: &str, file: &str) -> Result<Self, ParseError> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
        .ok_or_else(|| ParseError::UnknownPartOfSpeech {
            file: file.to_string(),
            code: token.to_string(),
        })
    }

    /// The `index.*`/`data.*` file suffix this tag is stored under.
    ///
    /// Satellite adjectives share the adjective files.
    pub fn file_suffix(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective | PartOfSpeech::AdjectiveSatellite => "adj",
            PartOfSpeech::Adverb => "adv",
        }
    }

    /// The tags that have their own index/data file pair (everything but `s`).
    pub const FILE_TAGS: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    /// The numeric synset type used in sense keys (1=n, 2=v, 3=a, 4=r, 5=s).
    pub fn ss_type(self) -> u8 {
        match self {
            PartOfSpeech::Noun => 1,
            PartOfSpeech::Verb => 2,
            PartOfSpeech::Adjective => 3,
            PartOfSpeech::Adverb => 4,
            PartOfSpeech::AdjectiveSatellite => 5,
        }
    }

    /// Map a sense-key synset type digit back to a tag.
    pub fn from_ss_type(n: u8) -> Option<Self> {
        match n {
            1 => Some(PartOfSpeech::Noun),
            2 => Some(PartOfSpeech::Verb),
            3 => Some(PartOfSpeech::Adjective),
            4 => Some(PartOfSpeech::Adverb),
            5 => Some(PartOfSpeech::AdjectiveSatellite),
            _ => None,
        }
    }

    /// Whether this tag is one of the two adjective variants.
    pub fn is_adjective(self) -> bool {
        matches!(
            self,
            PartOfSpeech::Adjective | PartOfSpeech::AdjectiveSatellite
        )
    }

    /// The other adjective variant, if this is an adjective tag.
    ///
    /// `a` and `s` synsets at the same offset are aliases: lookups in either
    /// tag fall back to the other before failing.
    pub fn adjective_alias(self) -> Option<Self> {
        match self {
            PartOfSpeech::Adjective => Some(PartOfSpeech::AdjectiveSatellite),
            PartOfSpeech::AdjectiveSatellite => Some(PartOfSpeech::Adjective),
            _ => None,
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

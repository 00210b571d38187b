//! Open Multilingual WordNet tab files.
//!
//! A language is one tab file of `offset-pos`, entry type, lemma rows
//! mapping lemmas in that language onto the English synset inventory. The
//! core graph stays language-agnostic; this module only supplies the two
//! directional maps the facade joins against it.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::error::{LexnetError, LookupError, ParseError};
use crate::pos::PartOfSpeech;
use crate::reader;
use crate::synset::SynsetId;

/// Lemma maps for one language, both directions.
#[derive(Debug, Default)]
pub struct LanguageData {
    offset_to_lemmas: HashMap<SynsetId, Vec<String>>,
    lemma_to_offsets: HashMap<(String, PartOfSpeech), Vec<u64>>,
}

impl LanguageData {
    /// Lemmas of `id` in this language, in file order.
    pub fn lemmas_for(&self, id: SynsetId) -> &[String] {
        self.offset_to_lemmas
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Offsets listing `lemma` (lowercased) under `pos`.
    pub fn offsets_for(&self, lemma: &str, pos: PartOfSpeech) -> &[u64] {
        self.lemma_to_offsets
            .get(&(lemma.to_lowercase(), pos))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn lemma_names(&self, pos: Option<PartOfSpeech>) -> impl Iterator<Item = &str> {
        self.lemma_to_offsets
            .keys()
            .filter(move |(_, p)| pos.is_none_or(|want| *p == want))
            .map(|(lemma, _)| lemma.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.offset_to_lemmas.is_empty()
    }
}

/// Load `<omw_dir>/<lang>/wn-data-<lang>.tab`.
///
/// `lang` must be a 3-letter ISO 639-3 code; an unknown code or missing
/// file is [`LookupError::UnknownLanguage`], not a parse error.
pub fn load_language(omw_dir: &Path, lang: &str) -> Result<LanguageData, LexnetError> {
    if lang.len() != 3 || !lang.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(LookupError::UnknownLanguage {
            lang: lang.to_string(),
        }
        .into());
    }
    let path = omw_dir.join(lang).join(format!("wn-data-{lang}.tab"));
    let Ok(file) = File::open(&path) else {
        return Err(LookupError::UnknownLanguage {
            lang: lang.to_string(),
        }
        .into());
    };
    let data = from_reader(BufReader::new(file), &path.display().to_string())?;
    info!(lang, entries = data.offset_to_lemmas.len(), "loaded language");
    Ok(data)
}

/// Parse tab records from a reader; the first line is a header, and `#`
/// lines are comments.
pub fn from_reader<R: BufRead>(input: R, file: &str) -> Result<LanguageData, LexnetError> {
    let mut data = LanguageData::default();
    for (number, line) in input.lines().enumerate() {
        let line = line.map_err(|source| ParseError::Io {
            file: file.to_string(),
            source,
        })?;
        if number == 0 || line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let record = reader::parse_omw_line(file, &line)?;
        let id = SynsetId::new(record.pos, record.offset);
        data.offset_to_lemmas
            .entry(id)
            .or_default()
            .push(record.lemma.clone());
        data.lemma_to_offsets
            .entry((record.lemma.to_lowercase(), record.pos))
            .or_default()
            .push(record.offset);
    }
    Ok(data)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) const TAB_FRA: &str = "\
# fra-wn\ttype\tlemma
00000005-n\tlemma\tchien
00000005-n\tlemma\tchien domestique
# a comment line
00000007-n\tlemma\tvoiture
00000101-v\tlemma\tcourir
";

    pub(crate) fn mini_lang() -> LanguageData {
        from_reader(TAB_FRA.as_bytes(), "wn-data-fra.tab").unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::mini_lang;
    use super::*;

    #[test]
    fn both_directions_agree() {
        let data = mini_lang();
        let dog = SynsetId::new(PartOfSpeech::Noun, 5);
        assert_eq!(data.lemmas_for(dog), ["chien", "chien_domestique"]);
        assert_eq!(data.offsets_for("chien", PartOfSpeech::Noun), [5]);
        assert_eq!(data.offsets_for("courir", PartOfSpeech::Verb), [101]);
    }

    #[test]
    fn spaces_become_underscores() {
        let data = mini_lang();
        assert_eq!(
            data.offsets_for("chien_domestique", PartOfSpeech::Noun),
            [5]
        );
    }

    #[test]
    fn header_and_comments_are_skipped() {
        let data = mini_lang();
        assert_eq!(data.lemma_names(Some(PartOfSpeech::Noun)).count(), 3);
    }

    #[test]
    fn unknown_lemma_is_empty() {
        let data = mini_lang();
        assert!(data.offsets_for("cat", PartOfSpeech::Noun).is_empty());
        assert!(data.lemmas_for(SynsetId::new(PartOfSpeech::Noun, 99)).is_empty());
    }

    #[test]
    fn bad_language_codes_are_rejected() {
        let dir = Path::new("/nonexistent");
        assert!(matches!(
            load_language(dir, "en"),
            Err(LexnetError::Lookup(LookupError::UnknownLanguage { .. }))
        ));
        assert!(matches!(
            load_language(dir, "FRA"),
            Err(LexnetError::Lookup(LookupError::UnknownLanguage { .. }))
        ));
        // Well-formed code, no tab file on disk.
        assert!(matches!(
            load_language(dir, "fra"),
            Err(LexnetError::Lookup(LookupError::UnknownLanguage { .. }))
        ));
    }
}

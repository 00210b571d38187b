//! Identifier resolver: the three textual ways of naming a sense.
//!
//! - dotted sense names, `lemma.pos.NN` (`dog.n.01`);
//! - sense keys, `lemma%ss_type:lex_filenum:lex_id:head_word:head_id`;
//! - raw synset references, `offset-pos` (`00001740-n`).
//!
//! This module only parses and validates; resolution against loaded data
//! happens in the facade. Lemmas may contain internal dots (`u.s.a.n.01`),
//! so sense names split on the last two separators only.

use crate::error::LookupError;
use crate::pos::PartOfSpeech;
use crate::synset::SynsetId;

/// A parsed dotted sense name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenseName {
    pub lemma: String,
    pub pos: PartOfSpeech,
    /// 0-based sense rank (the printed `NN` is 1-based).
    pub rank: usize,
}

/// Parse `lemma.pos.NN` into its parts.
pub fn parse_sense_name(name: &str) -> Result<SenseName, LookupError> {
    let malformed = |message: &str| LookupError::MalformedSenseName {
        name: name.to_string(),
        message: message.to_string(),
    };

    let mut tail = name.rsplitn(3, '.');
    let rank_part = tail.next().filter(|s| !s.is_empty());
    let pos_part = tail.next();
    let lemma = tail.next();
    let (Some(rank_part), Some(pos_part), Some(lemma)) = (rank_part, pos_part, lemma) else {
        return Err(malformed("expected three dot-separated parts"));
    };
    if lemma.is_empty() {
        return Err(malformed("empty lemma"));
    }

    let mut chars = pos_part.chars();
    let pos = match (chars.next(), chars.next()) {
        (Some(c), None) => PartOfSpeech::from_char(c),
        _ => None,
    }
    .ok_or_else(|| malformed("part-of-speech tag must be one of n, v, a, s, r"))?;

    let printed_rank: usize = rank_part
        .parse()
        .map_err(|_| malformed("sense rank is not a number"))?;
    if printed_rank == 0 {
        return Err(malformed("sense ranks are 1-based"));
    }

    Ok(SenseName {
        lemma: lemma.to_lowercase(),
        pos,
        rank: printed_rank - 1,
    })
}

/// A parsed and validated sense key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenseKey {
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub lex_filenum: u32,
    pub lex_id: u8,
    pub head_word: String,
    pub head_id: String,
}

/// Parse `lemma%ss_type:lex_filenum:lex_id:head_word:head_id`.
pub fn parse_sense_key(key: &str) -> Result<SenseKey, LookupError> {
    let malformed = |field: &'static str, message: String| LookupError::MalformedSenseKey {
        key: key.to_string(),
        field,
        message,
    };

    let (lemma, fields) = key
        .split_once('%')
        .ok_or_else(|| malformed("format", "missing `%` separator".to_string()))?;
    if lemma.is_empty() {
        return Err(malformed("lemma", "lemma must be non-empty".to_string()));
    }

    let fields: Vec<&str> = fields.split(':').collect();
    let [ss_type, lex_filenum, lex_id, head_word, head_id] = fields[..] else {
        return Err(malformed(
            "format",
            format!("expected 5 colon-separated fields, got {}", fields.len()),
        ));
    };

    let ss_type_num: u8 = ss_type
        .parse()
        .map_err(|_| malformed("ss_type", format!("not a number: {ss_type:?}")))?;
    let pos = PartOfSpeech::from_ss_type(ss_type_num)
        .ok_or_else(|| malformed("ss_type", format!("must be 1-5, got {ss_type_num}")))?;

    let lex_filenum: u32 = lex_filenum
        .parse()
        .map_err(|_| malformed("lex_filenum", format!("not a number: {lex_filenum:?}")))?;

    let lex_id: u8 = lex_id
        .parse()
        .ok()
        .filter(|&n| n <= 99)
        .ok_or_else(|| malformed("lex_id", format!("must be 0-99, got {lex_id:?}")))?;

    Ok(SenseKey {
        lemma: lemma.to_lowercase(),
        pos,
        lex_filenum,
        lex_id,
        head_word: head_word.to_string(),
        head_id: head_id.to_string(),
    })
}

/// Parse a raw synset reference `offset-pos`, e.g. `00001740-n`.
pub fn parse_pos_offset(text: &str) -> Result<SynsetId, LookupError> {
    let malformed = |message: &str| LookupError::MalformedSynsetRef {
        text: text.to_string(),
        message: message.to_string(),
    };

    let (digits, pos_part) = text
        .rsplit_once('-')
        .ok_or_else(|| malformed("missing `-` separator"))?;
    let offset: u64 = digits
        .parse()
        .map_err(|_| malformed("offset is not a number"))?;

    let mut chars = pos_part.chars();
    let pos = match (chars.next(), chars.next()) {
        (Some(c), None) => PartOfSpeech::from_char(c),
        _ => None,
    }
    .ok_or_else(|| malformed("part-of-speech tag must be one of n, v, a, s, r"))?;

    Ok(SynsetId::new(pos, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_sense_name() {
        let parsed = parse_sense_name("dog.n.01").unwrap();
        assert_eq!(
            parsed,
            SenseName {
                lemma: "dog".to_string(),
                pos: PartOfSpeech::Noun,
                rank: 0,
            }
        );
    }

    #[test]
    fn lemma_may_contain_dots() {
        let parsed = parse_sense_name("u.s.a.n.01").unwrap();
        assert_eq!(parsed.lemma, "u.s.a");
        assert_eq!(parsed.rank, 0);
    }

    #[test]
    fn sense_name_is_case_folded() {
        assert_eq!(parse_sense_name("Dog.n.02").unwrap().lemma, "dog");
    }

    #[test]
    fn sense_name_rejects_bad_shapes() {
        assert!(parse_sense_name("dog").is_err());
        assert!(parse_sense_name("dog.n").is_err());
        assert!(parse_sense_name("dog.x.01").is_err());
        assert!(parse_sense_name("dog.n.zero").is_err());
        assert!(parse_sense_name("dog.n.00").is_err());
        assert!(parse_sense_name(".n.01").is_err());
    }

    #[test]
    fn satellite_sense_name() {
        let parsed = parse_sense_name("quick.s.01").unwrap();
        assert_eq!(parsed.pos, PartOfSpeech::AdjectiveSatellite);
    }

    #[test]
    fn plain_sense_key() {
        let parsed = parse_sense_key("dog%1:05:00::").unwrap();
        assert_eq!(parsed.lemma, "dog");
        assert_eq!(parsed.pos, PartOfSpeech::Noun);
        assert_eq!(parsed.lex_filenum, 5);
        assert_eq!(parsed.lex_id, 0);
        assert!(parsed.head_word.is_empty());
    }

    #[test]
    fn satellite_sense_key_keeps_head_fields() {
        let parsed = parse_sense_key("quick%5:00:00:fast:00").unwrap();
        assert_eq!(parsed.pos, PartOfSpeech::AdjectiveSatellite);
        assert_eq!(parsed.head_word, "fast");
        assert_eq!(parsed.head_id, "00");
    }

    #[test]
    fn invalid_ss_type_names_the_field() {
        let err = parse_sense_key("dog%9:05:00::").unwrap_err();
        match err {
            LookupError::MalformedSenseKey { field, .. } => assert_eq!(field, "ss_type"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_lex_id() {
        let err = parse_sense_key("dog%1:05:100::").unwrap_err();
        assert!(matches!(
            err,
            LookupError::MalformedSenseKey {
                field: "lex_id",
                ..
            }
        ));
    }

    #[test]
    fn sense_key_rejects_wrong_field_count() {
        assert!(parse_sense_key("dog%1:05:00:").is_err());
        assert!(parse_sense_key("dog1:05:00::").is_err());
        assert!(parse_sense_key("%1:05:00::").is_err());
    }

    #[test]
    fn pos_offset_reference() {
        let id = parse_pos_offset("00001740-n").unwrap();
        assert_eq!(id, SynsetId::new(PartOfSpeech::Noun, 1740));
        assert!(parse_pos_offset("1740n").is_err());
        assert!(parse_pos_offset("abc-n").is_err());
        assert!(parse_pos_offset("1740-x").is_err());
    }
}

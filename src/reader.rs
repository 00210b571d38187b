//! Line-level parsers for the WordNet record formats.
//!
//! Every function here is pure: one source line in, one structured record
//! out. Comment and documentation lines (those starting with a space) are
//! skipped by the loader before these parsers run. Any malformed line is a
//! fatal [`ParseError`] carrying the source file and the offending line,
//! since a silently dropped record would leave dangling pointers in the
//! graph.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;
use crate::pos::PartOfSpeech;
use crate::relation::Relation;

/// Quoted example substrings inside a gloss.
static EXAMPLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("example regex"));

// ---------------------------------------------------------------------------
// Token cursor
// ---------------------------------------------------------------------------

/// Cursor over the whitespace-split tokens of one line, producing
/// fully-contextualized parse errors on underrun or bad fields.
struct Tokens<'a> {
    toks: &'a [&'a str],
    cursor: usize,
    file: &'a str,
    line: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(toks: &'a [&'a str], file: &'a str, line: &'a str) -> Self {
        Self {
            toks,
            cursor: 0,
            file,
            line,
        }
    }

    fn malformed(&self, message: impl Into<String>) -> ParseError {
        ParseError::MalformedLine {
            file: self.file.to_string(),
            line: self.line.trim_end().to_string(),
            message: message.into(),
        }
    }

    fn next(&mut self, what: &str) -> Result<&'a str, ParseError> {
        let tok = self
            .toks
            .get(self.cursor)
            .ok_or_else(|| self.malformed(format!("line ended while reading {what}")))?;
        self.cursor += 1;
        Ok(tok)
    }

    fn next_u64(&mut self, what: &str) -> Result<u64, ParseError> {
        let tok = self.next(what)?;
        tok.parse::<u64>()
            .map_err(|_| self.malformed(format!("{what} is not a decimal integer: {tok:?}")))
    }

    fn next_usize(&mut self, what: &str) -> Result<usize, ParseError> {
        Ok(self.next_u64(what)? as usize)
    }

    fn next_hex_u8(&mut self, what: &str) -> Result<u8, ParseError> {
        let tok = self.next(what)?;
        u8::from_str_radix(tok, 16)
            .map_err(|_| self.malformed(format!("{what} is not a hex byte: {tok:?}")))
    }

    fn remaining(&self) -> usize {
        self.toks.len() - self.cursor
    }
}

// ---------------------------------------------------------------------------
// Index records
// ---------------------------------------------------------------------------

/// One decoded `index.<pos>` record: a lemma and its ordered synset offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub lemma: String,
    pub pos: PartOfSpeech,
    /// Synset offsets in sense-rank order (most frequent sense first).
    pub offsets: Vec<u64>,
}

/// Parse one index-file line.
///
/// Layout: `lemma pos synset_cnt p_cnt [symbol]*p_cnt sense_cnt tagsense_cnt
/// offset*synset_cnt`. The sense count must equal the synset count.
///
/// Some distributions mis-split the trailing fields (the stated pointer
/// count does not match the symbol tokens actually present). With
/// `permissive` set, a structurally broken line is re-segmented from the
/// tail: the last `synset_cnt` tokens are the offsets, preceded by the
/// discarded frequency-rank token and the sense count. The repair is inert
/// on consistent datasets because the strict path is always tried first.
pub fn parse_index_line(
    file: &str,
    line: &str,
    permissive: bool,
) -> Result<IndexEntry, ParseError> {
    let toks: Vec<&str> = line.split_whitespace().collect();
    let mut cur = Tokens::new(&toks, file, line);

    let lemma = cur.next("lemma")?.to_string();
    let pos = PartOfSpeech::from_token(cur.next("part of speech")?, file)?;
    let n_synsets = cur.next_usize("synset count")?;
    if n_synsets == 0 {
        return Err(cur.malformed("synset count is zero"));
    }

    match parse_index_tail(Tokens::new(&toks, file, line), n_synsets) {
        Ok(offsets) => Ok(IndexEntry {
            lemma,
            pos,
            offsets,
        }),
        Err(err) if permissive => {
            let offsets = repair_index_tail(&toks, n_synsets).ok_or(err)?;
            tracing::warn!(%file, %lemma, "re-segmented inconsistent index record tail");
            Ok(IndexEntry {
                lemma,
                pos,
                offsets,
            })
        }
        Err(err) => Err(err),
    }
}

/// Strict tail parse: trust the stated pointer count.
fn parse_index_tail(mut cur: Tokens<'_>, n_synsets: usize) -> Result<Vec<u64>, ParseError> {
    // Skip the four fields already consumed by the caller.
    cur.next("lemma")?;
    cur.next("part of speech")?;
    cur.next("synset count")?;
    let n_pointers = cur.next_usize("pointer count")?;
    for _ in 0..n_pointers {
        cur.next("pointer symbol")?;
    }
    let n_senses = cur.next_usize("sense count")?;
    if n_senses != n_synsets {
        return Err(ParseError::SenseCountMismatch {
            file: cur.file.to_string(),
            line: cur.line.trim_end().to_string(),
            synsets: n_synsets,
            senses: n_senses,
        });
    }
    cur.next("frequency-rank count")?;
    let mut offsets = Vec::with_capacity(n_synsets);
    for _ in 0..n_synsets {
        offsets.push(cur.next_u64("synset offset")?);
    }
    if cur.remaining() != 0 {
        return Err(cur.malformed(format!("{} unexpected trailing token(s)", cur.remaining())));
    }
    Ok(offsets)
}

/// Permissive repair: re-segment assuming the known tail shape
/// `sense_cnt tagsense_cnt offset*synset_cnt`, ignoring the stated pointer
/// count entirely.
fn repair_index_tail(toks: &[&str], n_synsets: usize) -> Option<Vec<u64>> {
    // lemma pos synset_cnt + at least p_cnt + the 2 + n tail fields.
    if toks.len() < 4 + 2 + n_synsets {
        return None;
    }
    let tail_start = toks.len() - n_synsets;
    let sense_tok = toks[tail_start - 2];
    if sense_tok.parse::<usize>().ok()? != n_synsets {
        return None;
    }
    toks[tail_start..]
        .iter()
        .map(|t| t.parse::<u64>().ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Data records
// ---------------------------------------------------------------------------

/// A lemma as it appears in a data record, before cross-referencing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLemma {
    /// Surface form with any parenthesized syntactic marker stripped.
    pub name: String,
    /// Two-hex-digit lexical id disambiguating homographs within a file.
    pub lex_id: u8,
    /// Syntactic marker without its parentheses, e.g. `p` for
    /// predicate-position-only adjectives.
    pub syntactic_marker: Option<String>,
}

/// A synset-level pointer target: `(relation, pos, offset)`.
pub type SynsetPointer = (Relation, PartOfSpeech, u64);

/// A lemma-level pointer: source lemma index, relation, and the
/// `(pos, offset, lemma_index)` triple addressing the target lemma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LemmaPointer {
    pub source_index: usize,
    pub relation: Relation,
    pub target_pos: PartOfSpeech,
    pub target_offset: u64,
    pub target_index: usize,
}

/// One decoded `data.<pos>` record: a synset before cross-referencing.
///
/// Pointer lists keep record order; the first entry of a relation is
/// meaningful (satellite sense keys take their head word from the first
/// similar-to target).
#[derive(Debug, Clone, PartialEq)]
pub struct DataRecord {
    pub offset: u64,
    pub lexfile_index: u32,
    pub pos: PartOfSpeech,
    pub lemmas: Vec<RawLemma>,
    pub synset_pointers: Vec<SynsetPointer>,
    pub lemma_pointers: Vec<LemmaPointer>,
    /// Verb frame references: `(frame_number, lemma_number)`, where lemma
    /// number 0 applies the frame to every lemma in the synset.
    pub frames: Vec<(u32, u8)>,
    pub definition: String,
    pub examples: Vec<String>,
}

/// Parse one data-file line into a [`DataRecord`].
pub fn parse_data_line(file: &str, line: &str) -> Result<DataRecord, ParseError> {
    let (metadata, gloss) = match line.split_once('|') {
        Some((m, g)) => (m, g),
        None => (line, ""),
    };
    let toks: Vec<&str> = metadata.split_whitespace().collect();
    let mut cur = Tokens::new(&toks, file, line);

    let offset = cur.next_u64("synset offset")?;
    let lexfile_index = cur.next_u64("lexicographer file index")? as u32;
    let pos = PartOfSpeech::from_token(cur.next("part of speech")?, file)?;
    let n_lemmas = cur.next_hex_u8("lemma count")? as usize;
    if n_lemmas == 0 {
        return Err(cur.malformed("synset record with zero lemmas"));
    }

    let mut lemmas = Vec::with_capacity(n_lemmas);
    for _ in 0..n_lemmas {
        let raw_name = cur.next("lemma name")?;
        let (name, syntactic_marker) = split_syntactic_marker(raw_name);
        let lex_id = cur.next_hex_u8("lemma lexical id")?;
        lemmas.push(RawLemma {
            name: name.to_string(),
            lex_id,
            syntactic_marker: syntactic_marker.map(str::to_string),
        });
    }

    let n_pointers = cur.next_usize("pointer count")?;
    let mut synset_pointers = Vec::new();
    let mut lemma_pointers = Vec::new();
    for _ in 0..n_pointers {
        let symbol = cur.next("pointer symbol")?;
        let relation =
            Relation::from_symbol(symbol).ok_or_else(|| ParseError::UnknownPointerSymbol {
                file: file.to_string(),
                line: line.trim_end().to_string(),
                symbol: symbol.to_string(),
            })?;
        let target_offset = cur.next_u64("pointer target offset")?;
        let target_pos = PartOfSpeech::from_token(cur.next("pointer target part of speech")?, file)?;
        let lemma_ids = cur.next("pointer lemma indices")?;
        if lemma_ids.len() != 4 {
            return Err(cur.malformed(format!(
                "pointer lemma-index field must be 4 hex digits, got {lemma_ids:?}"
            )));
        }
        if lemma_ids == "0000" {
            synset_pointers.push((relation, target_pos, target_offset));
        } else {
            let source = hex_index(&lemma_ids[..2])
                .ok_or_else(|| cur.malformed(format!("bad source lemma index in {lemma_ids:?}")))?;
            let target = hex_index(&lemma_ids[2..])
                .ok_or_else(|| cur.malformed(format!("bad target lemma index in {lemma_ids:?}")))?;
            if source >= n_lemmas {
                return Err(cur.malformed(format!(
                    "source lemma index {} out of range for {} lemma(s)",
                    source + 1,
                    n_lemmas
                )));
            }
            lemma_pointers.push(LemmaPointer {
                source_index: source,
                relation,
                target_pos,
                target_offset,
                target_index: target,
            });
        }
    }

    // Verb records append `f_cnt (+ f_num w_num)*f_cnt` after the pointers.
    let mut frames = Vec::new();
    if cur.remaining() > 0 {
        let n_frames = cur.next_usize("frame count")?;
        for _ in 0..n_frames {
            let plus = cur.next("frame marker")?;
            if plus != "+" {
                return Err(cur.malformed(format!("expected frame marker '+', got {plus:?}")));
            }
            let frame_number = cur.next_u64("frame number")? as u32;
            let lemma_number = cur.next_hex_u8("frame lemma number")?;
            frames.push((frame_number, lemma_number));
        }
        if cur.remaining() != 0 {
            return Err(cur.malformed(format!(
                "{} unexpected trailing token(s) after frames",
                cur.remaining()
            )));
        }
    }

    let (definition, examples) = split_gloss(gloss);

    Ok(DataRecord {
        offset,
        lexfile_index,
        pos,
        lemmas,
        synset_pointers,
        lemma_pointers,
        frames,
        definition,
        examples,
    })
}

/// Decode a 2-hex-digit 1-based lemma index to 0-based.
fn hex_index(digits: &str) -> Option<usize> {
    let n = u8::from_str_radix(digits, 16).ok()?;
    (n as usize).checked_sub(1)
}

/// Split a trailing parenthesized syntactic marker off a lemma token:
/// `galore(ip)` becomes `("galore", Some("ip"))`.
fn split_syntactic_marker(raw: &str) -> (&str, Option<&str>) {
    if let Some(stripped) = raw.strip_suffix(')')
        && let Some(open) = stripped.rfind('(')
    {
        return (&raw[..open], Some(&stripped[open + 1..]));
    }
    (raw, None)
}

/// Split a gloss into the definition and its quoted example sentences.
fn split_gloss(gloss: &str) -> (String, Vec<String>) {
    let examples: Vec<String> = EXAMPLE_RE
        .captures_iter(gloss)
        .map(|c| c[1].to_string())
        .collect();
    let definition = EXAMPLE_RE
        .replace_all(gloss, "")
        .trim_matches([' ', ';'])
        .to_string();
    (definition, examples)
}

// ---------------------------------------------------------------------------
// Information-content records
// ---------------------------------------------------------------------------

/// One line of an information-content file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IcLine {
    pub pos: PartOfSpeech,
    pub offset: u64,
    pub count: f64,
    /// ROOT-flagged lines feed the per-pos aggregate at offset 0.
    pub is_root: bool,
}

/// Parse one IC line: `<offset><pos-char> <count> [ROOT]`. The file's first
/// line is a version header skipped by the loader.
pub fn parse_ic_line(file: &str, line: &str) -> Result<IcLine, ParseError> {
    let toks: Vec<&str> = line.split_whitespace().collect();
    let mut cur = Tokens::new(&toks, file, line);

    let key = cur.next("offset+pos key")?;
    if key.len() < 2 {
        return Err(cur.malformed(format!("offset+pos key too short: {key:?}")));
    }
    let (digits, pos_part) = key.split_at(key.len() - 1);
    let pos = PartOfSpeech::from_token(pos_part, file)?;
    let offset = digits
        .parse::<u64>()
        .map_err(|_| cur.malformed(format!("bad offset in IC key {key:?}")))?;
    let count_tok = cur.next("count")?;
    let count = count_tok
        .parse::<f64>()
        .map_err(|_| cur.malformed(format!("count is not numeric: {count_tok:?}")))?;
    let is_root = match cur.remaining() {
        0 => false,
        1 => {
            let flag = cur.next("ROOT flag")?;
            if flag != "ROOT" {
                return Err(cur.malformed(format!("expected ROOT flag, got {flag:?}")));
            }
            true
        }
        n => return Err(cur.malformed(format!("{n} unexpected trailing token(s)"))),
    };

    Ok(IcLine {
        pos,
        offset,
        count,
        is_root,
    })
}

// ---------------------------------------------------------------------------
// Multilingual (OMW) records
// ---------------------------------------------------------------------------

/// One line of an Open Multilingual WordNet tab file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmwLine {
    pub offset: u64,
    pub pos: PartOfSpeech,
    pub lemma_type: String,
    /// Lemma with internal spaces replaced by underscores.
    pub lemma: String,
}

/// Parse one OMW tab line: `<offset>-<pos>\t<type>\t<lemma>`.
pub fn parse_omw_line(file: &str, line: &str) -> Result<OmwLine, ParseError> {
    let malformed = |message: String| ParseError::MalformedLine {
        file: file.to_string(),
        line: line.trim_end().to_string(),
        message,
    };

    let mut fields = line.trim_end().split('\t');
    let key = fields
        .next()
        .ok_or_else(|| malformed("empty line".into()))?;
    let lemma_type = fields
        .next()
        .ok_or_else(|| malformed("missing lemma-type field".into()))?;
    let lemma = fields
        .next()
        .ok_or_else(|| malformed("missing lemma field".into()))?;

    let (digits, pos_part) = key
        .split_once('-')
        .ok_or_else(|| malformed(format!("synset key is not <offset>-<pos>: {key:?}")))?;
    let offset = digits
        .parse::<u64>()
        .map_err(|_| malformed(format!("bad offset in synset key {key:?}")))?;
    let pos = PartOfSpeech::from_token(pos_part, file)?;

    Ok(OmwLine {
        offset,
        pos,
        lemma_type: lemma_type.to_string(),
        lemma: lemma.trim().replace(' ', "_"),
    })
}

// ---------------------------------------------------------------------------
// Exception and lexname records
// ---------------------------------------------------------------------------

/// Parse one `<pos>.exc` line: `irregular_form base_form+`.
pub fn parse_exception_line(file: &str, line: &str) -> Result<(String, Vec<String>), ParseError> {
    let mut toks = line.split_whitespace().map(str::to_string);
    let irregular = toks.next().ok_or_else(|| ParseError::MalformedLine {
        file: file.to_string(),
        line: line.trim_end().to_string(),
        message: "empty exception line".into(),
    })?;
    let bases: Vec<String> = toks.collect();
    if bases.is_empty() {
        return Err(ParseError::MalformedLine {
            file: file.to_string(),
            line: line.trim_end().to_string(),
            message: format!("exception {irregular:?} lists no base forms"),
        });
    }
    Ok((irregular, bases))
}

/// Parse one `lexnames` line: `index name category`.
pub fn parse_lexname_line(file: &str, line: &str) -> Result<(u32, String), ParseError> {
    let toks: Vec<&str> = line.split_whitespace().collect();
    let mut cur = Tokens::new(&toks, file, line);
    let index = cur.next_u64("lexicographer file index")? as u32;
    let name = cur.next("lexicographer file name")?.to_string();
    Ok((index, name))
}

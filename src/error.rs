//! Rich diagnostic error types for the lexnet graph engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know exactly what went wrong.
//! Parse errors are fatal to the load; lookup and similarity errors are
//! per-call and never abort the process.

use miette::Diagnostic;
use thiserror::Error;

use crate::pos::PartOfSpeech;

/// Top-level error type for the lexnet engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum LexnetError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Similarity(#[from] SimilarityError),
}

/// Convenience alias for lexnet operation results.
pub type LexnetResult<T> = std::result::Result<T, LexnetError>;

// ---------------------------------------------------------------------------
// Parse errors (fatal to the load)
// ---------------------------------------------------------------------------

/// Errors raised while decoding WordNet source files.
///
/// Any malformed line aborts the load: the dataset is assumed internally
/// consistent, and silently dropping a record would leave dangling pointers
/// in the graph.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("malformed line in {file}: {message}\n  line: {line}")]
    #[diagnostic(
        code(lexnet::parse::malformed_line),
        help(
            "The source file contains a record this parser cannot decode. \
             Verify the file is an unmodified WordNet distribution file and \
             that it was not truncated or re-encoded."
        )
    )]
    MalformedLine {
        file: String,
        line: String,
        message: String,
    },

    #[error("sense count {senses} does not match synset count {synsets} in {file}\n  line: {line}")]
    #[diagnostic(
        code(lexnet::parse::sense_count_mismatch),
        help(
            "Index records list the same number twice (synset count and sense \
             count); a mismatch means the tail fields were mis-segmented. Some \
             distributions ship this inconsistency; enable permissive mode to \
             re-segment the tail instead of failing."
        )
    )]
    SenseCountMismatch {
        file: String,
        line: String,
        synsets: usize,
        senses: usize,
    },

    #[error("unknown part-of-speech code {code:?} in {file}")]
    #[diagnostic(
        code(lexnet::parse::unknown_pos),
        help("Valid part-of-speech codes are: n, v, a, s, r.")
    )]
    UnknownPartOfSpeech { file: String, code: String },

    #[error("unknown pointer symbol {symbol:?} in {file}\n  line: {line}")]
    #[diagnostic(
        code(lexnet::parse::unknown_pointer),
        help(
            "The pointer symbol is not part of the WordNet 3.x relation \
             inventory. The data file may be from an incompatible release."
        )
    )]
    UnknownPointerSymbol {
        file: String,
        line: String,
        symbol: String,
    },

    #[error("failed to read {file}: {source}")]
    #[diagnostic(
        code(lexnet::parse::io),
        help(
            "A source file could not be read. Check that the data directory \
             points at a complete WordNet distribution and that the files are \
             readable."
        )
    )]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Lookup errors (per-call, never fatal)
// ---------------------------------------------------------------------------

/// Errors from resolving lemmas, identifiers, sense keys, or languages.
#[derive(Debug, Error, Diagnostic)]
pub enum LookupError {
    #[error("no synsets for lemma {lemma:?} with part of speech {pos}")]
    #[diagnostic(
        code(lexnet::lookup::unknown_lemma),
        help(
            "The lemma has no entry in the index for this part of speech. \
             Surface forms must be normalized first (lowercased, spaces as \
             underscores); inflected forms go through morphy."
        )
    )]
    UnknownLemma { lemma: String, pos: PartOfSpeech },

    #[error("part-of-speech and offset combination not found: {pos} + {offset}")]
    #[diagnostic(
        code(lexnet::lookup::unknown_synset),
        help(
            "No synset record was loaded at this offset for this part of \
             speech. Offsets are only stable within one dataset version; check \
             that the offset comes from the same release that was loaded."
        )
    )]
    UnknownSynsetId { pos: PartOfSpeech, offset: u64 },

    #[error("sense {rank} of {lemma:?} ({pos}) does not exist; only {available} sense(s)")]
    #[diagnostic(
        code(lexnet::lookup::no_such_sense),
        help("Sense ranks in dotted sense names are 1-based and bounded by the lemma's sense count.")
    )]
    NoSuchSense {
        lemma: String,
        pos: PartOfSpeech,
        rank: usize,
        available: usize,
    },

    #[error("{name:?} names a satellite adjective sense, but only a plain adjective exists")]
    #[diagnostic(
        code(lexnet::lookup::satellite_mismatch),
        help(
            "An explicit `.s.` sense name is only valid when the synset really \
             is a satellite. The reverse direction (`.a.` requested, satellite \
             found) is corrected with a warning instead."
        )
    )]
    SatelliteMismatch { name: String },

    #[error("malformed sense name {name:?}: {message}")]
    #[diagnostic(
        code(lexnet::lookup::malformed_sense_name),
        help("Sense names have the form `lemma.pos.NN`, e.g. `dog.n.01`.")
    )]
    MalformedSenseName { name: String, message: String },

    #[error("malformed sense key {key:?}: invalid {field}: {message}")]
    #[diagnostic(
        code(lexnet::lookup::malformed_sense_key),
        help(
            "Sense keys have the form `lemma%ss_type:lex_filenum:lex_id:head_word:head_id` \
             where ss_type is 1-5 (1=noun, 2=verb, 3=adjective, 4=adverb, \
             5=satellite) and lex_id is 0-99."
        )
    )]
    MalformedSenseKey {
        key: String,
        field: &'static str,
        message: String,
    },

    #[error("malformed synset reference {text:?}: {message}")]
    #[diagnostic(
        code(lexnet::lookup::malformed_synset_ref),
        help("Synset references have the form `<offset>-<pos>`, e.g. `00001740-n`.")
    )]
    MalformedSynsetRef { text: String, message: String },

    #[error("sense key {key:?} does not match any loaded sense")]
    #[diagnostic(
        code(lexnet::lookup::unknown_sense_key),
        help(
            "The key parsed correctly but no lemma with this name, \
             lexicographer file, and lexical id was loaded."
        )
    )]
    UnknownSenseKey { key: String },

    #[error("language {lang:?} is not supported")]
    #[diagnostic(
        code(lexnet::lookup::unknown_language),
        help(
            "Languages other than \"eng\" require an Open Multilingual WordNet \
             tab file under the configured omw directory, named \
             `<lang>/wn-data-<lang>.tab` with a 3-letter ISO 639-3 code."
        )
    )]
    UnknownLanguage { lang: String },
}

// ---------------------------------------------------------------------------
// Similarity errors
// ---------------------------------------------------------------------------

/// Errors from the pairwise similarity metrics.
#[derive(Debug, Error, Diagnostic)]
pub enum SimilarityError {
    #[error("{metric} requires matching parts of speech, got {a} and {b}")]
    #[diagnostic(
        code(lexnet::sim::pos_mismatch),
        help(
            "Leacock-Chodorow and the information-content metrics are only \
             defined within one taxonomy. Use path or Wu-Palmer similarity for \
             cross-taxonomy comparisons."
        )
    )]
    PosMismatch {
        metric: &'static str,
        a: PartOfSpeech,
        b: PartOfSpeech,
    },

    #[error("information-content table has no root count for part of speech {pos}")]
    #[diagnostic(
        code(lexnet::sim::no_ic_root),
        help(
            "IC files carry ROOT-flagged lines that accumulate into the \
             per-part-of-speech normalization count. A table without one \
             cannot normalize frequencies for this part of speech."
        )
    )]
    NoIcRoot { pos: PartOfSpeech },
}

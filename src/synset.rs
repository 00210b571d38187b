//! Synset and lemma data model.
//!
//! All entities are built once during the bulk load and are immutable
//! afterwards; the only later writes are the `OnceLock` caches for derived
//! values (hypernym paths, depths, sense keys), each computed at most once
//! and idempotent, so shared references are safe across threads.
//!
//! Lemmas refer back to their owning synset by identity (`SynsetId`), not by
//! pointer: records cross-reference synsets that may not be loaded yet, so
//! every reference is a key resolved through the store on demand.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::LexnetResult;
use crate::pos::PartOfSpeech;
use crate::relation::Relation;
use crate::store::GraphStore;

/// Globally unique synset identity: part of speech plus the byte offset of
/// its source record. Stable within one dataset version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SynsetId {
    pub pos: PartOfSpeech,
    pub offset: u64,
}

impl SynsetId {
    pub fn new(pos: PartOfSpeech, offset: u64) -> Self {
        Self { pos, offset }
    }
}

impl std::fmt::Display for SynsetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08}-{}", self.offset, self.pos)
    }
}

/// A lemma-level pointer target: one lemma inside another synset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LemmaRef {
    pub synset: SynsetId,
    /// Position in the target synset's lemma list (0-based).
    pub index: usize,
}

// ---------------------------------------------------------------------------
// Lemma
// ---------------------------------------------------------------------------

/// One word form inside a synset.
#[derive(Debug, Serialize, Deserialize)]
pub struct Lemma {
    name: String,
    lexfile_index: u32,
    lex_id: u8,
    syntactic_marker: Option<String>,
    lang: String,
    synset_id: SynsetId,
    synset_name: String,
    #[serde(skip)]
    sense_key: OnceLock<String>,
}

impl Lemma {
    pub(crate) fn new(
        name: String,
        lexfile_index: u32,
        lex_id: u8,
        syntactic_marker: Option<String>,
        synset_id: SynsetId,
        synset_name: String,
    ) -> Self {
        Self {
            name,
            lexfile_index,
            lex_id,
            syntactic_marker,
            lang: "eng".to_string(),
            synset_id,
            synset_name,
            sense_key: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lexfile_index(&self) -> u32 {
        self.lexfile_index
    }

    /// Two-digit lexical id disambiguating homographs within a
    /// lexicographer file.
    pub fn lex_id(&self) -> u8 {
        self.lex_id
    }

    /// Syntactic marker, e.g. `p` for predicate-position-only adjectives.
    pub fn syntactic_marker(&self) -> Option<&str> {
        self.syntactic_marker.as_deref()
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Identity of the owning synset.
    pub fn synset_id(&self) -> SynsetId {
        self.synset_id
    }

    /// Display name of the owning synset, e.g. `dog.n.01`.
    pub fn synset_name(&self) -> &str {
        &self.synset_name
    }

    /// The canonical sense key
    /// `lemma%ss_type:lex_filenum:lex_id:head_word:head_id`.
    ///
    /// For satellite adjectives the head fields come from the first lemma of
    /// the synset's first similar-to target, which is why this is computed
    /// lazily: the cross-synset reference is only resolvable once the whole
    /// graph is loaded. Computed once and cached.
    pub fn sense_key(&self, store: &GraphStore) -> LexnetResult<&str> {
        if let Some(key) = self.sense_key.get() {
            return Ok(key);
        }

        let (head_word, head_id) = if self.synset_id.pos == PartOfSpeech::AdjectiveSatellite {
            let synset = store.synset_by_id(self.synset_id.pos, self.synset_id.offset)?;
            match synset.related(Relation::SimilarTo).first() {
                Some(head_ref) => {
                    let head = store.synset_by_id(head_ref.pos, head_ref.offset)?;
                    match head.lemmas().first() {
                        Some(head_lemma) => (
                            head_lemma.name().to_lowercase(),
                            format!("{:02}", head_lemma.lex_id()),
                        ),
                        None => (String::new(), String::new()),
                    }
                }
                None => (String::new(), String::new()),
            }
        } else {
            (String::new(), String::new())
        };

        let key = format!(
            "{}%{}:{:02}:{:02}:{}:{}",
            self.name.to_lowercase().replace(' ', "_"),
            self.synset_id.pos.ss_type(),
            self.lexfile_index,
            self.lex_id,
            head_word,
            head_id,
        );
        Ok(self.sense_key.get_or_init(|| key))
    }
}

// ---------------------------------------------------------------------------
// Synset
// ---------------------------------------------------------------------------

/// A synonym set: one sense-grouping node of the graph.
///
/// Relation pointers are stored as identities and resolved through the
/// [`GraphStore`] on demand. Pointer lists preserve record order; the first
/// entry of a relation is meaningful (satellite sense keys read the first
/// similar-to target).
#[derive(Debug, Serialize, Deserialize)]
pub struct Synset {
    id: SynsetId,
    name: String,
    lexfile_index: u32,
    definition: String,
    examples: Vec<String>,
    pointers: HashMap<Relation, Vec<SynsetId>>,
    lemma_pointers: HashMap<(String, Relation), Vec<LemmaRef>>,
    lemmas: Vec<Lemma>,
    frames: Vec<(u32, u8)>,

    // Derived values, each computed at most once after load.
    #[serde(skip)]
    pub(crate) paths_cache: OnceLock<Vec<Vec<SynsetId>>>,
    #[serde(skip)]
    pub(crate) min_depth_cache: OnceLock<usize>,
    #[serde(skip)]
    pub(crate) max_depth_cache: OnceLock<usize>,
    #[serde(skip)]
    pub(crate) roots_cache: OnceLock<Vec<SynsetId>>,
    #[serde(skip)]
    pub(crate) ancestors_cache: OnceLock<HashSet<SynsetId>>,
}

impl Synset {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: SynsetId,
        name: String,
        lexfile_index: u32,
        definition: String,
        examples: Vec<String>,
        pointers: HashMap<Relation, Vec<SynsetId>>,
        lemma_pointers: HashMap<(String, Relation), Vec<LemmaRef>>,
        lemmas: Vec<Lemma>,
        frames: Vec<(u32, u8)>,
    ) -> Self {
        Self {
            id,
            name,
            lexfile_index,
            definition,
            examples,
            pointers,
            lemma_pointers,
            lemmas,
            frames,
            paths_cache: OnceLock::new(),
            min_depth_cache: OnceLock::new(),
            max_depth_cache: OnceLock::new(),
            roots_cache: OnceLock::new(),
            ancestors_cache: OnceLock::new(),
        }
    }

    pub fn id(&self) -> SynsetId {
        self.id
    }

    pub fn pos(&self) -> PartOfSpeech {
        self.id.pos
    }

    pub fn offset(&self) -> u64 {
        self.id.offset
    }

    /// Display name `lemma.pos.NN`, derived from the first lemma and its
    /// sense rank in the index.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lexfile_index(&self) -> u32 {
        self.lexfile_index
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn lemmas(&self) -> &[Lemma] {
        &self.lemmas
    }

    pub fn lemma_names(&self) -> impl Iterator<Item = &str> {
        self.lemmas.iter().map(|l| l.name())
    }

    /// Verb frame references `(frame_number, lemma_number)`; lemma number 0
    /// covers every lemma of the synset.
    pub fn frames(&self) -> &[(u32, u8)] {
        &self.frames
    }

    /// Synset-level pointer targets for one relation, in record order.
    pub fn related(&self, relation: Relation) -> &[SynsetId] {
        self.pointers
            .get(&relation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All relations this synset has synset-level pointers for.
    pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
        self.pointers.keys().copied()
    }

    /// Hypernym and instance-hypernym targets, in that order.
    pub fn hypernym_ids(&self) -> impl Iterator<Item = SynsetId> + '_ {
        self.related(Relation::Hypernym)
            .iter()
            .chain(self.related(Relation::InstanceHypernym))
            .copied()
    }

    /// Lemma-level pointer targets keyed by source lemma name and relation.
    pub fn lemma_related(&self, lemma_name: &str, relation: Relation) -> &[LemmaRef] {
        self.lemma_pointers
            .get(&(lemma_name.to_string(), relation))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl PartialEq for Synset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Synset {}

impl std::fmt::Display for Synset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Synset('{}')", self.name)
    }
}

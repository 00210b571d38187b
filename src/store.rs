//! The cross-referenced graph store.
//!
//! Owns the two indices built once at startup: `(lemma, pos)` to the ordered
//! synset offset list, and `(pos, offset)` to the fully parsed [`Synset`].
//! Index files load first (all parts of speech), then data files: display
//! names are derived from a record's rank in its first lemma's offset list,
//! so the index for a part of speech must be complete before its data lines
//! are parsed.
//!
//! The store is logically immutable after [`GraphStore::load`] returns; the
//! only later writes are per-synset `OnceLock` caches and the taxonomy-depth
//! memo, all idempotent.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use dashmap::DashMap;

use crate::error::{LexnetResult, LookupError, ParseError};
use crate::path;
use crate::pos::PartOfSpeech;
use crate::reader::{self, DataRecord};
use crate::relation::Relation;
use crate::synset::{Lemma, LemmaRef, Synset, SynsetId};

/// The in-memory WordNet graph.
pub struct GraphStore {
    /// `(lemma, pos)` to ordered synset offsets (sense-rank order).
    /// Adjective entries are mirrored under the satellite key.
    lemma_pos_offsets: HashMap<(String, PartOfSpeech), Vec<u64>>,
    /// `(pos, offset)` to the parsed synset. Satellite synsets are keyed
    /// under `s`; lookups fall back across the adjective alias.
    synsets: HashMap<SynsetId, Synset>,
    /// Memo for the per-part-of-speech taxonomy depth constant, keyed by
    /// `(pos, simulate_virtual_root)`.
    depth_cache: DashMap<(PartOfSpeech, bool), usize>,
}

impl GraphStore {
    fn empty() -> Self {
        Self {
            lemma_pos_offsets: HashMap::new(),
            synsets: HashMap::new(),
            depth_cache: DashMap::new(),
        }
    }

    /// Load the full graph from a WordNet distribution directory.
    ///
    /// One pass over every `index.<pos>` file, then one pass over every
    /// `data.<pos>` file. Any malformed line aborts the load.
    pub fn load(data_dir: &Path, permissive: bool) -> LexnetResult<Self> {
        let mut store = Self::empty();

        for pos in PartOfSpeech::FILE_TAGS {
            let file = format!("index.{}", pos.file_suffix());
            let reader = open_reader(&data_dir.join(&file), &file)?;
            store.load_index(reader, &file, permissive)?;
        }
        for pos in PartOfSpeech::FILE_TAGS {
            let file = format!("data.{}", pos.file_suffix());
            let reader = open_reader(&data_dir.join(&file), &file)?;
            store.load_data(reader, &file)?;
        }

        tracing::info!(
            synsets = store.synsets.len(),
            index_entries = store.lemma_pos_offsets.len(),
            "loaded wordnet graph"
        );
        Ok(store)
    }

    fn load_index<R: BufRead>(
        &mut self,
        input: R,
        file: &str,
        permissive: bool,
    ) -> Result<(), ParseError> {
        let mut records = 0usize;
        for line in input.lines() {
            let line = line.map_err(|source| ParseError::Io {
                file: file.to_string(),
                source,
            })?;
            // Lines starting with a space are license/documentation text.
            if line.starts_with(' ') || line.trim().is_empty() {
                continue;
            }
            let entry = reader::parse_index_line(file, &line, permissive)?;
            if entry.pos == PartOfSpeech::Adjective {
                self.lemma_pos_offsets.insert(
                    (entry.lemma.clone(), PartOfSpeech::AdjectiveSatellite),
                    entry.offsets.clone(),
                );
            }
            self.lemma_pos_offsets
                .insert((entry.lemma, entry.pos), entry.offsets);
            records += 1;
        }
        tracing::info!(file, records, "loaded index file");
        Ok(())
    }

    fn load_data<R: BufRead>(&mut self, input: R, file: &str) -> Result<(), ParseError> {
        let mut records = 0usize;
        for line in input.lines() {
            let line = line.map_err(|source| ParseError::Io {
                file: file.to_string(),
                source,
            })?;
            if line.starts_with(' ') || line.trim().is_empty() {
                continue;
            }
            let record = reader::parse_data_line(file, &line)?;
            let synset = self.synset_from_record(record, file, &line)?;
            self.synsets.insert(synset.id(), synset);
            records += 1;
        }
        tracing::info!(file, records, "loaded data file");
        Ok(())
    }

    /// Cross-reference one parsed data record against the index and build
    /// the final [`Synset`].
    fn synset_from_record(
        &self,
        record: DataRecord,
        file: &str,
        line: &str,
    ) -> Result<Synset, ParseError> {
        let malformed = |message: String| ParseError::MalformedLine {
            file: file.to_string(),
            line: line.trim_end().to_string(),
            message,
        };

        let id = SynsetId::new(record.pos, record.offset);

        // Display name: first lemma, lowercased, plus this offset's 1-based
        // rank in that lemma's index entry.
        let head = record.lemmas[0].name.to_lowercase();
        let offsets = self
            .lemma_pos_offsets
            .get(&(head.clone(), record.pos))
            .ok_or_else(|| malformed(format!("first lemma {head:?} has no index entry")))?;
        let rank = offsets
            .iter()
            .position(|&o| o == record.offset)
            .ok_or_else(|| {
                malformed(format!(
                    "offset {} missing from index entry for {head:?}",
                    record.offset
                ))
            })?
            + 1;
        let name = format!("{head}.{}.{rank:02}", record.pos);

        let lemmas: Vec<Lemma> = record
            .lemmas
            .iter()
            .map(|raw| {
                Lemma::new(
                    raw.name.clone(),
                    record.lexfile_index,
                    raw.lex_id,
                    raw.syntactic_marker.clone(),
                    id,
                    name.clone(),
                )
            })
            .collect();

        let mut pointers: HashMap<Relation, Vec<SynsetId>> = HashMap::new();
        for (relation, pos, offset) in record.synset_pointers {
            let target = SynsetId::new(pos, offset);
            let targets = pointers.entry(relation).or_default();
            if !targets.contains(&target) {
                targets.push(target);
            }
        }

        let mut lemma_pointers: HashMap<(String, Relation), Vec<LemmaRef>> = HashMap::new();
        for lp in record.lemma_pointers {
            // Source index bounds were checked by the parser.
            let source_name = record.lemmas[lp.source_index].name.clone();
            lemma_pointers
                .entry((source_name, lp.relation))
                .or_default()
                .push(LemmaRef {
                    synset: SynsetId::new(lp.target_pos, lp.target_offset),
                    index: lp.target_index,
                });
        }

        Ok(Synset::new(
            id,
            name,
            record.lexfile_index,
            record.definition,
            record.examples,
            pointers,
            lemma_pointers,
            lemmas,
            record.frames,
        ))
    }

    // -----------------------------------------------------------------------
    // Lookup contract
    // -----------------------------------------------------------------------

    /// Look up a synset by part of speech and offset.
    ///
    /// Adjective and satellite synsets at the same offset are aliases: if the
    /// requested variant is absent, the other is tried before failing.
    pub fn synset_by_id(&self, pos: PartOfSpeech, offset: u64) -> Result<&Synset, LookupError> {
        if let Some(synset) = self.synsets.get(&SynsetId::new(pos, offset)) {
            return Ok(synset);
        }
        if let Some(alias) = pos.adjective_alias()
            && let Some(synset) = self.synsets.get(&SynsetId::new(alias, offset))
        {
            return Ok(synset);
        }
        Err(LookupError::UnknownSynsetId { pos, offset })
    }

    /// Resolve an identity obtained from a pointer table.
    pub fn resolve(&self, id: SynsetId) -> Result<&Synset, LookupError> {
        self.synset_by_id(id.pos, id.offset)
    }

    /// Look up a synset by id with no adjective-alias fallback.
    pub(crate) fn synset_exact(&self, id: SynsetId) -> Option<&Synset> {
        self.synsets.get(&id)
    }

    /// The ordered synset offsets for a normalized `(lemma, pos)` key, empty
    /// if the lemma has no entry.
    pub fn offsets_for(&self, lemma: &str, pos: PartOfSpeech) -> &[u64] {
        self.lemma_pos_offsets
            .get(&(lemma.to_string(), pos))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve every indexed synset of a normalized lemma surface form.
    ///
    /// Fails if the index lists an offset with no data record: that would be
    /// an index/data inconsistency, not a missing word.
    pub fn synsets_for(
        &self,
        lemma: &str,
        pos: PartOfSpeech,
    ) -> Result<Vec<&Synset>, LookupError> {
        self.offsets_for(lemma, pos)
            .iter()
            .map(|&offset| self.synset_by_id(pos, offset))
            .collect()
    }

    /// All loaded synsets, optionally restricted to one part of speech,
    /// ordered by identity for deterministic iteration.
    pub fn all_synsets(&self, pos: Option<PartOfSpeech>) -> Vec<&Synset> {
        let mut result: Vec<&Synset> = self
            .synsets
            .values()
            .filter(|s| pos.is_none_or(|p| s.pos() == p))
            .collect();
        result.sort_by_key(|s| s.id());
        result
    }

    /// Iterate the `(lemma, pos)` index keys and their offset lists.
    pub fn lemma_entries(&self) -> impl Iterator<Item = (&str, PartOfSpeech, &[u64])> {
        self.lemma_pos_offsets
            .iter()
            .map(|((lemma, pos), offsets)| (lemma.as_str(), *pos, offsets.as_slice()))
    }

    /// Number of loaded synsets.
    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }

    /// The deepest `max_depth` over all synsets of one part of speech, plus
    /// one when a virtual root is simulated. Precomputed once per key.
    pub fn taxonomy_max_depth(
        &self,
        pos: PartOfSpeech,
        simulate_virtual_root: bool,
    ) -> LexnetResult<usize> {
        if let Some(depth) = self.depth_cache.get(&(pos, simulate_virtual_root)) {
            return Ok(*depth);
        }
        let mut deepest = 0usize;
        for synset in self.synsets.values().filter(|s| s.pos() == pos) {
            deepest = deepest.max(path::max_depth(self, synset)?);
        }
        if simulate_virtual_root {
            deepest += 1;
        }
        self.depth_cache.insert((pos, simulate_virtual_root), deepest);
        Ok(deepest)
    }
}

fn open_reader(path: &Path, file: &str) -> Result<BufReader<File>, ParseError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ParseError::Io {
            file: file.to_string(),
            source,
        })
}

// ---------------------------------------------------------------------------
// Shared test fixture
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::fixtures::mini_store;
    use super::*;

    #[test]
    fn round_trip_by_id() {
        let store = mini_store();
        for synset in store.all_synsets(None) {
            let found = store.synset_by_id(synset.pos(), synset.offset()).unwrap();
            assert_eq!(found.offset(), synset.offset());
            assert_eq!(found.name(), synset.name());
        }
    }

    #[test]
    fn display_name_uses_index_rank() {
        let store = mini_store();
        // "canine" lists offsets [9, 3]: the tooth is sense 1, the mammal
        // sense 2.
        assert_eq!(
            store.synset_by_id(PartOfSpeech::Noun, 3).unwrap().name(),
            "canine.n.02"
        );
        assert_eq!(
            store.synset_by_id(PartOfSpeech::Noun, 9).unwrap().name(),
            "canine.n.01"
        );
        assert_eq!(
            store.synset_by_id(PartOfSpeech::Noun, 5).unwrap().name(),
            "dog.n.01"
        );
    }

    #[test]
    fn adjective_alias_lookup() {
        let store = mini_store();
        // Offset 201 only exists as a plain adjective; the satellite lookup
        // must fall back to it and return the same object.
        let direct = store
            .synset_by_id(PartOfSpeech::Adjective, 201)
            .unwrap();
        let via_satellite = store
            .synset_by_id(PartOfSpeech::AdjectiveSatellite, 201)
            .unwrap();
        assert!(std::ptr::eq(direct, via_satellite));

        // And the reverse: offset 203 is a satellite record.
        let satellite = store
            .synset_by_id(PartOfSpeech::AdjectiveSatellite, 203)
            .unwrap();
        let via_plain = store.synset_by_id(PartOfSpeech::Adjective, 203).unwrap();
        assert!(std::ptr::eq(satellite, via_plain));
        assert_eq!(satellite.name(), "quick.s.01");
    }

    #[test]
    fn alias_does_not_leak_to_other_pos() {
        let store = mini_store();
        assert!(store.synset_by_id(PartOfSpeech::Verb, 5).is_err());
        assert!(store.synset_by_id(PartOfSpeech::Noun, 999).is_err());
    }

    #[test]
    fn index_offsets_all_resolve() {
        let store = mini_store();
        for (lemma, pos, offsets) in store.lemma_entries() {
            for &offset in offsets {
                assert!(
                    store.synset_by_id(pos, offset).is_ok(),
                    "index entry ({lemma}, {pos}) lists unresolvable offset {offset}"
                );
            }
        }
    }

    #[test]
    fn synsets_for_lemma() {
        let store = mini_store();
        let dogs = store.synsets_for("dog", PartOfSpeech::Noun).unwrap();
        assert_eq!(dogs.len(), 1);
        assert_eq!(dogs[0].name(), "dog.n.01");
        assert!(store.synsets_for("dog", PartOfSpeech::Verb).unwrap().is_empty());
    }

    #[test]
    fn lemma_pointer_resolution() {
        let store = mini_store();
        let fast = store.synset_by_id(PartOfSpeech::Adjective, 201).unwrap();
        let antonyms = fast.lemma_related("fast", Relation::Antonym);
        assert_eq!(antonyms.len(), 1);
        let target = store.resolve(antonyms[0].synset).unwrap();
        assert_eq!(target.lemmas()[antonyms[0].index].name(), "slow");
    }

    #[test]
    fn satellite_sense_key_reads_head_synset() {
        let store = mini_store();
        let quick = store
            .synset_by_id(PartOfSpeech::AdjectiveSatellite, 203)
            .unwrap();
        let key = quick.lemmas()[0].sense_key(&store).unwrap();
        assert_eq!(key, "quick%5:00:00:fast:00");

        // Plain lemmas have empty head fields.
        let dog = store.synset_by_id(PartOfSpeech::Noun, 5).unwrap();
        assert_eq!(
            dog.lemmas()[0].sense_key(&store).unwrap(),
            "dog%1:05:00::"
        );
    }

    #[test]
    fn all_synsets_is_sorted_and_filterable() {
        let store = mini_store();
        let nouns = store.all_synsets(Some(PartOfSpeech::Noun));
        assert_eq!(nouns.len(), 9);
        assert!(nouns.windows(2).all(|w| w[0].id() < w[1].id()));
        assert_eq!(store.all_synsets(None).len(), 14);
    }

    #[test]
    fn taxonomy_max_depth_per_pos() {
        let store = mini_store();
        // entity(0) -> animal(1) -> canine(2) -> dog(3)
        assert_eq!(
            store.taxonomy_max_depth(PartOfSpeech::Noun, false).unwrap(),
            3
        );
        assert_eq!(
            store.taxonomy_max_depth(PartOfSpeech::Noun, true).unwrap(),
            4
        );
        assert_eq!(
            store.taxonomy_max_depth(PartOfSpeech::Verb, false).unwrap(),
            1
        );
        assert_eq!(
            store
                .taxonomy_max_depth(PartOfSpeech::Adverb, false)
                .unwrap(),
            0
        );
    }
}

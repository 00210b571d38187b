//! WordNet facade: top-level API over the loaded lexical graph.
//!
//! The `WordNet` owns the graph store and the auxiliary tables (exception
//! lists, lexicographer file names, per-language lemma maps) and delegates
//! to the parser, path engine, and similarity engine. It is the only type
//! most callers need.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::error::{LexnetResult, LookupError, ParseError};
use crate::ic::IcTable;
use crate::ident::{self, SenseKey};
use crate::morphy;
use crate::omw::{self, LanguageData};
use crate::path::{self, PathNode, RelationTree};
use crate::pos::PartOfSpeech;
use crate::reader;
use crate::relation::Relation;
use crate::similarity;
use crate::store::GraphStore;
use crate::synset::{Synset, SynsetId};

static NO_EXCEPTIONS: LazyLock<HashMap<String, Vec<String>>> = LazyLock::new(HashMap::new);

/// Tab files that key satellites under their own `s` tag; every other
/// wordnet files them under the plain adjective.
const SATELLITE_TAG_LANGS: [&str; 3] = ["nld", "lit", "slk"];

/// Configuration for loading a WordNet dataset.
#[derive(Debug, Clone)]
pub struct WordNetConfig {
    /// Directory holding the `index.*`, `data.*`, `*.exc`, and `lexnames`
    /// files.
    pub data_dir: PathBuf,
    /// Directory of Open Multilingual WordNet tab files, one subdirectory
    /// per ISO 639-3 code. `None` for English-only operation.
    pub omw_dir: Option<PathBuf>,
    /// Attempt heuristic re-segmentation of inconsistent index lines
    /// instead of failing the load. Inert on consistent data.
    pub permissive_index: bool,
}

impl WordNetConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            omw_dir: None,
            permissive_index: false,
        }
    }

    pub fn with_omw_dir(mut self, omw_dir: impl Into<PathBuf>) -> Self {
        self.omw_dir = Some(omw_dir.into());
        self
    }

    pub fn with_permissive_index(mut self, permissive: bool) -> Self {
        self.permissive_index = permissive;
        self
    }
}

/// The loaded lexical-semantic network.
///
/// Construction reads every index and data file to completion; afterwards
/// the graph is immutable and all queries borrow from it. Language tables
/// are the one lazily-populated piece, cached per code on first use.
pub struct WordNet {
    config: WordNetConfig,
    store: GraphStore,
    exceptions: HashMap<PartOfSpeech, HashMap<String, Vec<String>>>,
    lexnames: HashMap<u32, String>,
    languages: DashMap<String, Arc<LanguageData>>,
}

impl WordNet {
    /// Load a dataset from `config.data_dir`.
    ///
    /// Exception lists and the `lexnames` file are optional: a dataset
    /// without them still loads, it just answers fewer questions.
    pub fn load(config: WordNetConfig) -> LexnetResult<Self> {
        let store = GraphStore::load(&config.data_dir, config.permissive_index)?;

        let mut exceptions: HashMap<PartOfSpeech, HashMap<String, Vec<String>>> = HashMap::new();
        for pos in PartOfSpeech::FILE_TAGS {
            let file_name = format!("{}.exc", pos.file_suffix());
            let path = config.data_dir.join(&file_name);
            let Ok(file) = File::open(&path) else {
                debug!(file = %path.display(), "no exception list");
                continue;
            };
            let mut map: HashMap<String, Vec<String>> = HashMap::new();
            for line in BufReader::new(file).lines() {
                let line = line.map_err(|source| ParseError::Io {
                    file: file_name.clone(),
                    source,
                })?;
                if line.trim().is_empty() {
                    continue;
                }
                let (irregular, bases) = reader::parse_exception_line(&file_name, &line)?;
                map.insert(irregular, bases);
            }
            debug!(pos = %pos, entries = map.len(), "loaded exception list");
            exceptions.insert(pos, map);
        }

        let mut lexnames: HashMap<u32, String> = HashMap::new();
        let lexnames_path = config.data_dir.join("lexnames");
        if let Ok(file) = File::open(&lexnames_path) {
            for line in BufReader::new(file).lines() {
                let line = line.map_err(|source| ParseError::Io {
                    file: "lexnames".to_string(),
                    source,
                })?;
                if line.trim().is_empty() {
                    continue;
                }
                let (index, name) = reader::parse_lexname_line("lexnames", &line)?;
                lexnames.insert(index, name);
            }
        } else {
            debug!(file = %lexnames_path.display(), "no lexnames file");
        }

        info!(
            synsets = store.len(),
            lexnames = lexnames.len(),
            "wordnet ready"
        );
        Ok(Self {
            config,
            store,
            exceptions,
            lexnames,
            languages: DashMap::new(),
        })
    }

    /// The underlying graph store, for direct traversal.
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    // ---- identifier resolution ----

    /// Resolve a dotted sense name, e.g. `dog.n.01`.
    ///
    /// Adjectives and satellites alias each other asymmetrically: a plain
    /// `.a.` name that resolves to a satellite synset is corrected with a
    /// warning, while an explicit `.s.` name that resolves to a plain
    /// adjective is a hard error.
    pub fn synset(&self, name: &str) -> LexnetResult<&Synset> {
        let parsed = ident::parse_sense_name(name)?;
        let offsets = self.store.offsets_for(&parsed.lemma, parsed.pos);
        if offsets.is_empty() {
            return Err(LookupError::UnknownLemma {
                lemma: parsed.lemma,
                pos: parsed.pos,
            }
            .into());
        }
        let Some(&offset) = offsets.get(parsed.rank) else {
            return Err(LookupError::NoSuchSense {
                lemma: parsed.lemma,
                pos: parsed.pos,
                rank: parsed.rank + 1,
                available: offsets.len(),
            }
            .into());
        };

        let id = SynsetId::new(parsed.pos, offset);
        if let Some(synset) = self.store.synset_exact(id) {
            return Ok(synset);
        }
        if let Some(alias) = parsed.pos.adjective_alias()
            && let Some(synset) = self.store.synset_exact(SynsetId::new(alias, offset))
        {
            return if parsed.pos == PartOfSpeech::Adjective {
                warn!(name, "adjective sense resolves to a satellite synset; substituting");
                Ok(synset)
            } else {
                Err(LookupError::SatelliteMismatch {
                    name: name.to_string(),
                }
                .into())
            };
        }
        Err(LookupError::UnknownSynsetId {
            pos: parsed.pos,
            offset,
        }
        .into())
    }

    /// Resolve a `(pos, offset)` pair directly.
    pub fn synset_from_pos_and_offset(
        &self,
        pos: PartOfSpeech,
        offset: u64,
    ) -> LexnetResult<&Synset> {
        Ok(self.store.synset_by_id(pos, offset)?)
    }

    /// Resolve a textual synset reference, e.g. `00001740-n`.
    pub fn synset_from_ref(&self, text: &str) -> LexnetResult<&Synset> {
        let id = ident::parse_pos_offset(text)?;
        Ok(self.store.resolve(id)?)
    }

    /// Resolve a sense key, e.g. `dog%1:05:00::`.
    pub fn synset_from_sense_key(&self, key: &str) -> LexnetResult<&Synset> {
        let parsed: SenseKey = ident::parse_sense_key(key)?;
        for synset in self.store.synsets_for(&parsed.lemma, parsed.pos)? {
            let hit = synset.lemmas().iter().any(|lemma| {
                lemma.name().to_lowercase().replace(' ', "_") == parsed.lemma
                    && lemma.lex_id() == parsed.lex_id
                    && lemma.lexfile_index() == parsed.lex_filenum
            });
            if hit {
                return Ok(synset);
            }
        }
        Err(LookupError::UnknownSenseKey {
            key: key.to_string(),
        }
        .into())
    }

    // ---- lemma-driven queries ----

    /// All synsets containing `lemma`, optionally restricted to one part
    /// of speech.
    ///
    /// English queries run the surface form through morphological analysis
    /// first; other languages join their tab-file lemma maps against the
    /// English graph directly.
    pub fn synsets(
        &self,
        lemma: &str,
        pos: Option<PartOfSpeech>,
        lang: &str,
    ) -> LexnetResult<Vec<&Synset>> {
        let pos_list: &[PartOfSpeech] = match pos {
            Some(ref p) => std::slice::from_ref(p),
            None => &PartOfSpeech::ALL,
        };
        let mut seen: HashSet<SynsetId> = HashSet::new();
        let mut result: Vec<&Synset> = Vec::new();

        if lang == "eng" {
            for &p in pos_list {
                for form in morphy::base_forms(&self.store, self.exceptions_for(p), lemma, p, true)
                {
                    for synset in self.store.synsets_for(&form, p)? {
                        if seen.insert(synset.id()) {
                            result.push(synset);
                        }
                    }
                }
            }
        } else {
            let language = self.language(lang)?;
            let lemma = lemma.to_lowercase();
            for &p in pos_list {
                for &offset in language.offsets_for(&lemma, p) {
                    let synset = self.store.synset_by_id(p, offset)?;
                    if seen.insert(synset.id()) {
                        result.push(synset);
                    }
                }
            }
        }
        Ok(result)
    }

    /// All loaded synsets, optionally restricted to one part of speech.
    pub fn all_synsets(&self, pos: Option<PartOfSpeech>) -> Vec<&Synset> {
        self.store.all_synsets(pos)
    }

    /// Every distinct lemma surface form, sorted.
    pub fn all_lemma_names(
        &self,
        pos: Option<PartOfSpeech>,
        lang: &str,
    ) -> LexnetResult<Vec<String>> {
        let mut names: Vec<String> = if lang == "eng" {
            self.store
                .lemma_entries()
                .filter(|(_, p, _)| pos.is_none_or(|want| *p == want))
                .map(|(lemma, _, _)| lemma.to_string())
                .collect()
        } else {
            self.language(lang)?
                .lemma_names(pos)
                .map(str::to_string)
                .collect()
        };
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Lemma surface forms of one synset in the given language.
    pub fn synset_lemma_names(&self, synset: &Synset, lang: &str) -> LexnetResult<Vec<String>> {
        if lang == "eng" {
            return Ok(synset.lemma_names().map(str::to_string).collect());
        }
        let pos = if synset.pos() == PartOfSpeech::AdjectiveSatellite
            && !SATELLITE_TAG_LANGS.contains(&lang)
        {
            PartOfSpeech::Adjective
        } else {
            synset.pos()
        };
        let id = SynsetId::new(pos, synset.offset());
        Ok(self.language(lang)?.lemmas_for(id).to_vec())
    }

    /// First attested base form of a surface form, trying parts of speech
    /// in canonical order when none is given.
    pub fn morphy(&self, form: &str, pos: Option<PartOfSpeech>) -> Option<String> {
        let pos_list: &[PartOfSpeech] = match pos {
            Some(ref p) => std::slice::from_ref(p),
            None => &PartOfSpeech::FILE_TAGS,
        };
        for &p in pos_list {
            let mut forms = morphy::base_forms(&self.store, self.exceptions_for(p), form, p, true);
            if !forms.is_empty() {
                return Some(forms.remove(0));
            }
        }
        None
    }

    fn exceptions_for(&self, pos: PartOfSpeech) -> &HashMap<String, Vec<String>> {
        // Satellites share the adjective exception list.
        let pos = if pos == PartOfSpeech::AdjectiveSatellite {
            PartOfSpeech::Adjective
        } else {
            pos
        };
        self.exceptions.get(&pos).unwrap_or(&NO_EXCEPTIONS)
    }

    // ---- languages ----

    /// Languages available: English plus every OMW subdirectory.
    pub fn langs(&self) -> Vec<String> {
        let mut langs = vec!["eng".to_string()];
        if let Some(ref omw_dir) = self.config.omw_dir
            && let Ok(entries) = std::fs::read_dir(omw_dir)
        {
            for entry in entries.flatten() {
                if entry.path().is_dir()
                    && let Some(name) = entry.file_name().to_str()
                {
                    langs.push(name.to_string());
                }
            }
        }
        langs.sort();
        langs.dedup();
        langs
    }

    /// The lemma maps for one language, loaded on first use.
    pub fn language(&self, lang: &str) -> LexnetResult<Arc<LanguageData>> {
        if let Some(cached) = self.languages.get(lang) {
            return Ok(Arc::clone(&cached));
        }
        let omw_dir = self
            .config
            .omw_dir
            .as_deref()
            .filter(|_| lang != "eng")
            .ok_or_else(|| LookupError::UnknownLanguage {
                lang: lang.to_string(),
            })?;
        let data = Arc::new(omw::load_language(omw_dir, lang)?);
        self.languages.insert(lang.to_string(), Arc::clone(&data));
        Ok(data)
    }

    // ---- lexicographer files ----

    /// Subject-area name of the synset's lexicographer file, if the
    /// `lexnames` table was present.
    pub fn lexname(&self, synset: &Synset) -> Option<&str> {
        self.lexnames
            .get(&synset.lexfile_index())
            .map(String::as_str)
    }

    // ---- path engine delegates ----

    pub fn hypernym_paths<'a>(&'a self, synset: &'a Synset) -> LexnetResult<&'a [Vec<SynsetId>]> {
        path::hypernym_paths(&self.store, synset)
    }

    pub fn min_depth(&self, synset: &Synset) -> LexnetResult<usize> {
        path::min_depth(&self.store, synset)
    }

    pub fn max_depth(&self, synset: &Synset) -> LexnetResult<usize> {
        path::max_depth(&self.store, synset)
    }

    pub fn root_hypernyms<'a>(&'a self, synset: &'a Synset) -> LexnetResult<&'a [SynsetId]> {
        path::root_hypernyms(&self.store, synset)
    }

    pub fn closure(
        &self,
        synset: &Synset,
        relation: Relation,
        max_depth: Option<usize>,
    ) -> LexnetResult<Vec<SynsetId>> {
        path::closure(&self.store, synset, relation, max_depth)
    }

    pub fn tree(
        &self,
        synset: &Synset,
        relation: Relation,
        max_depth: Option<usize>,
    ) -> LexnetResult<RelationTree> {
        path::tree(&self.store, synset, relation, max_depth)
    }

    pub fn common_hypernyms(&self, a: &Synset, b: &Synset) -> LexnetResult<Vec<SynsetId>> {
        similarity::common_hypernyms(&self.store, a, b)
    }

    pub fn lowest_common_hypernyms(
        &self,
        a: &Synset,
        b: &Synset,
        simulate_virtual_root: bool,
        use_min_depth: bool,
    ) -> LexnetResult<Vec<PathNode>> {
        similarity::lowest_common_hypernyms(&self.store, a, b, simulate_virtual_root, use_min_depth)
    }

    // ---- similarity delegates ----

    /// Shortest-path similarity; `default` substitutes for an undefined
    /// result (disconnected taxonomies).
    pub fn path_similarity(
        &self,
        a: &Synset,
        b: &Synset,
        simulate_virtual_root: bool,
        default: Option<f64>,
    ) -> LexnetResult<Option<f64>> {
        Ok(similarity::path_similarity(&self.store, a, b, simulate_virtual_root)?.or(default))
    }

    /// Leacock-Chodorow similarity.
    pub fn lch_similarity(
        &self,
        a: &Synset,
        b: &Synset,
        simulate_virtual_root: bool,
        default: Option<f64>,
    ) -> LexnetResult<Option<f64>> {
        Ok(similarity::lch_similarity(&self.store, a, b, simulate_virtual_root)?.or(default))
    }

    /// Wu-Palmer similarity. `use_min_depth` selects the legacy min-depth
    /// subsumer ranking over max-depth.
    pub fn wup_similarity(
        &self,
        a: &Synset,
        b: &Synset,
        simulate_virtual_root: bool,
        use_min_depth: bool,
        default: Option<f64>,
    ) -> LexnetResult<Option<f64>> {
        Ok(
            similarity::wup_similarity(&self.store, a, b, simulate_virtual_root, use_min_depth)?
                .or(default),
        )
    }

    /// Resnik similarity over an information-content table.
    pub fn res_similarity(&self, a: &Synset, b: &Synset, ic: &IcTable) -> LexnetResult<f64> {
        similarity::res_similarity(&self.store, a, b, ic)
    }

    /// Jiang-Conrath similarity over an information-content table.
    pub fn jcn_similarity(&self, a: &Synset, b: &Synset, ic: &IcTable) -> LexnetResult<f64> {
        similarity::jcn_similarity(&self.store, a, b, ic)
    }

    /// Lin similarity over an information-content table.
    pub fn lin_similarity(&self, a: &Synset, b: &Synset, ic: &IcTable) -> LexnetResult<f64> {
        similarity::lin_similarity(&self.store, a, b, ic)
    }
}

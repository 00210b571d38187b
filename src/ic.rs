//! Information-content tables.
//!
//! An IC file maps synsets to corpus frequency counts; information content
//! is the negative log probability of a synset against its taxonomy root.
//! ROOT-flagged lines carry the per-part-of-speech aggregate and are stored
//! under offset 0, which never collides with a real record offset.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::error::{LexnetResult, ParseError, SimilarityError};
use crate::pos::PartOfSpeech;
use crate::reader;
use crate::synset::{Synset, SynsetId};

/// IC tables key adjectives under `a` only; fold satellites into it.
fn ic_pos(pos: PartOfSpeech) -> PartOfSpeech {
    if pos == PartOfSpeech::AdjectiveSatellite {
        PartOfSpeech::Adjective
    } else {
        pos
    }
}

/// Corpus frequency counts keyed by synset identity.
#[derive(Debug, Clone, Default)]
pub struct IcTable {
    counts: HashMap<SynsetId, f64>,
}

impl IcTable {
    /// Load an IC file, e.g. `ic-brown.dat`.
    pub fn load(path: &Path) -> LexnetResult<Self> {
        let file_name = path.display().to_string();
        let input = File::open(path).map_err(|source| ParseError::Io {
            file: file_name.clone(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(input), &file_name)?;
        info!(file = %file_name, entries = table.counts.len(), "loaded information-content table");
        Ok(table)
    }

    /// Parse IC records from a reader; the first line is a version header.
    pub fn from_reader<R: BufRead>(input: R, file: &str) -> LexnetResult<Self> {
        let mut counts: HashMap<SynsetId, f64> = HashMap::new();
        for (number, line) in input.lines().enumerate() {
            let line = line.map_err(|source| ParseError::Io {
                file: file.to_string(),
                source,
            })?;
            if number == 0 || line.trim().is_empty() {
                continue;
            }
            let record = reader::parse_ic_line(file, &line)?;
            let offset = if record.is_root { 0 } else { record.offset };
            let id = SynsetId::new(record.pos, offset);
            *counts.entry(id).or_insert(0.0) += record.count;
            if record.is_root && record.offset != 0 {
                // Root lines double as ordinary counts for their own synset.
                *counts
                    .entry(SynsetId::new(record.pos, record.offset))
                    .or_insert(0.0) += record.count;
            }
        }
        Ok(Self { counts })
    }

    /// Raw count for a synset, 0 if absent. Satellites share the adjective
    /// table.
    pub fn count(&self, id: SynsetId) -> f64 {
        let id = SynsetId::new(ic_pos(id.pos), id.offset);
        self.counts.get(&id).copied().unwrap_or(0.0)
    }

    /// Aggregate root count for one part of speech.
    pub fn root_count(&self, pos: PartOfSpeech) -> Result<f64, SimilarityError> {
        let pos = ic_pos(pos);
        match self.counts.get(&SynsetId::new(pos, 0)) {
            Some(&count) if count > 0.0 => Ok(count),
            _ => Err(SimilarityError::NoIcRoot { pos }),
        }
    }

    /// `-ln(count / root_count)`, or `+inf` for an unattested synset.
    pub fn information_content(&self, synset: &Synset) -> Result<f64, SimilarityError> {
        let count = self.count(synset.id());
        if count == 0.0 {
            return Ok(f64::INFINITY);
        }
        let root = self.root_count(synset.pos())?;
        Ok(-(count / root).ln())
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) const IC_DATA: &str = "\
wnver::fixture
1n 2000.0 ROOT
2n 800.0
3n 100.0
4n 50.0
5n 60.0
6n 300.0
7n 150.0
8n 80.0
9n 40.0
102v 500.0 ROOT
101v 120.0
";

    pub(crate) fn mini_ic() -> IcTable {
        IcTable::from_reader(IC_DATA.as_bytes(), "ic-fixture.dat").unwrap()
    }
}

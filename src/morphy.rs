//! Rule-based morphological analysis.
//!
//! Finds the base (dictionary) forms of an inflected surface form: the
//! exception lists are consulted first, then detachment rules are applied
//! repeatedly until a candidate appears in the lemma index. Candidates are
//! only ever returned if the index actually lists them for the requested
//! part of speech, so the rules can over-generate freely.

use std::collections::{HashMap, HashSet};

use crate::pos::PartOfSpeech;
use crate::store::GraphStore;

/// Suffix detachment rules `(old, new)` per part of speech. Satellites
/// share the adjective rules; adverbs have none and rely entirely on the
/// exception list.
fn substitutions(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
    match pos {
        PartOfSpeech::Noun => &[
            ("s", ""),
            ("ses", "s"),
            ("ves", "f"),
            ("xes", "x"),
            ("zes", "z"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ies", "y"),
        ],
        PartOfSpeech::Verb => &[
            ("s", ""),
            ("ies", "y"),
            ("es", "e"),
            ("es", ""),
            ("ed", "e"),
            ("ed", ""),
            ("ing", "e"),
            ("ing", ""),
        ],
        PartOfSpeech::Adjective | PartOfSpeech::AdjectiveSatellite => {
            &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")]
        }
        PartOfSpeech::Adverb => &[],
    }
}

/// All base forms of `form` attested in the index for `pos`, best first.
///
/// Exception-list hits short-circuit the rules. Otherwise rules are applied
/// once, the original form and the first-generation candidates are checked,
/// and failing that the rules keep cascading until a generation either
/// matches or dies out.
pub fn base_forms(
    store: &GraphStore,
    exceptions: &HashMap<String, Vec<String>>,
    form: &str,
    pos: PartOfSpeech,
    check_exceptions: bool,
) -> Vec<String> {
    let form = form.to_lowercase();
    // Nouns like "boxesful" inflect the embedded stem.
    let (stem, suffix) = if pos == PartOfSpeech::Noun && form.ends_with("ful") {
        (&form[..form.len() - 3], "ful")
    } else {
        (form.as_str(), "")
    };
    let rules = substitutions(pos);

    let apply_rules = |forms: &[String]| -> Vec<String> {
        forms
            .iter()
            .flat_map(|f| {
                rules.iter().filter_map(|&(old, new)| {
                    f.strip_suffix(old).map(|stripped| format!("{stripped}{new}"))
                })
            })
            .collect()
    };

    let filter_forms = |forms: &[String]| -> Vec<String> {
        let mut seen = HashSet::new();
        forms
            .iter()
            .map(|f| format!("{f}{suffix}"))
            .filter(|f| !store.offsets_for(f, pos).is_empty())
            .filter(|f| seen.insert(f.clone()))
            .collect()
    };

    if check_exceptions && let Some(bases) = exceptions.get(stem) {
        let mut candidates = vec![stem.to_string()];
        candidates.extend(bases.iter().cloned());
        return filter_forms(&candidates);
    }

    let mut generation = apply_rules(&[stem.to_string()]);

    let mut first_check = vec![stem.to_string()];
    first_check.extend(generation.iter().cloned());
    let results = filter_forms(&first_check);
    if !results.is_empty() {
        return results;
    }

    while !generation.is_empty() {
        generation = apply_rules(&generation);
        let results = filter_forms(&generation);
        if !results.is_empty() {
            return results;
        }
    }
    Vec::new()
}

//! Similarity engine: taxonomy-distance and information-content metrics.
//!
//! Path and Wu-Palmer similarity operate over the combined path graph and
//! never require matching parts of speech; Leacock-Chodorow and every
//! information-content metric are only defined inside one taxonomy and fail
//! with [`SimilarityError::PosMismatch`] otherwise.
//!
//! All metrics are symmetric in their inputs. Where the mathematically
//! correct answer is undefined (disconnected taxonomies, zero-depth
//! taxonomies) the functions return `None` and let the caller substitute a
//! default rather than raising.

use std::collections::HashSet;

use crate::error::{LexnetResult, SimilarityError};
use crate::ic::IcTable;
use crate::path::{self, PathNode};
use crate::pos::PartOfSpeech;
use crate::store::GraphStore;
use crate::synset::{Synset, SynsetId};

/// Whether this taxonomy is a forest needing the virtual root to make
/// cross-component distances well-defined. The verb taxonomy has many
/// roots; the 3.x noun taxonomy is single-rooted, and adjectives and
/// adverbs have no hypernym structure at all.
fn needs_root(pos: PartOfSpeech) -> bool {
    pos == PartOfSpeech::Verb
}

// ---------------------------------------------------------------------------
// Taxonomy distance
// ---------------------------------------------------------------------------

/// Length of the shortest path between two synsets over hypernym edges.
///
/// 0 if the two are the same synset. Otherwise the minimum over all shared
/// ancestors of the summed shortest distances from each input to that
/// ancestor, or `None` when no ancestor is shared (and the virtual root is
/// not simulated).
pub fn shortest_path_distance(
    store: &GraphStore,
    a: &Synset,
    b: &Synset,
    simulate_virtual_root: bool,
) -> LexnetResult<Option<usize>> {
    if a.id() == b.id() {
        return Ok(Some(0));
    }
    let from_a = path::shortest_hypernym_distances(store, a, simulate_virtual_root)?;
    let from_b = path::shortest_hypernym_distances(store, b, simulate_virtual_root)?;

    let mut best: Option<usize> = None;
    for (node, da) in &from_a {
        if let Some(db) = from_b.get(node) {
            let total = da + db;
            if best.is_none_or(|cur| total < cur) {
                best = Some(total);
            }
        }
    }
    Ok(best)
}

/// Path similarity `1 / (distance + 1)`, in `(0, 1]`.
pub fn path_similarity(
    store: &GraphStore,
    a: &Synset,
    b: &Synset,
    simulate_virtual_root: bool,
) -> LexnetResult<Option<f64>> {
    let simulate = simulate_virtual_root && (needs_root(a.pos()) || needs_root(b.pos()));
    let distance = shortest_path_distance(store, a, b, simulate)?;
    Ok(distance.map(|d| 1.0 / (d as f64 + 1.0)))
}

/// Leacock-Chodorow similarity `-ln((distance + 1) / (2 * depth))`, where
/// `depth` is the deepest max-depth over the whole taxonomy of the shared
/// part of speech.
///
/// `None` when the synsets are disconnected or the taxonomy depth is 0.
pub fn lch_similarity(
    store: &GraphStore,
    a: &Synset,
    b: &Synset,
    simulate_virtual_root: bool,
) -> LexnetResult<Option<f64>> {
    if a.pos() != b.pos() {
        return Err(SimilarityError::PosMismatch {
            metric: "lch_similarity",
            a: a.pos(),
            b: b.pos(),
        }
        .into());
    }
    let simulate = simulate_virtual_root && needs_root(a.pos());
    let depth = store.taxonomy_max_depth(a.pos(), simulate)?;
    if depth == 0 {
        return Ok(None);
    }
    let Some(distance) = shortest_path_distance(store, a, b, simulate)? else {
        return Ok(None);
    };
    Ok(Some(
        -((distance as f64 + 1.0) / (2.0 * depth as f64)).ln(),
    ))
}

/// Wu-Palmer similarity `2 * depth / (len1 + len2)`.
///
/// The subsumer is picked from the lowest common hypernyms, ranked by
/// min-depth when `use_min_depth` is set (the legacy selection) or by
/// max-depth otherwise, preferring the case where one input subsumes the
/// other; `depth` is the subsumer's max-depth plus one, and each `len` is
/// the input's shortest distance to the subsumer plus `depth`.
pub fn wup_similarity(
    store: &GraphStore,
    a: &Synset,
    b: &Synset,
    simulate_virtual_root: bool,
    use_min_depth: bool,
) -> LexnetResult<Option<f64>> {
    let simulate = simulate_virtual_root && (needs_root(a.pos()) || needs_root(b.pos()));
    let subsumers = lowest_common_hypernyms(store, a, b, simulate, use_min_depth)?;
    let Some(&first) = subsumers.first() else {
        return Ok(None);
    };
    let subsumer = if subsumers.contains(&PathNode::Real(a.id())) {
        PathNode::Real(a.id())
    } else if subsumers.contains(&PathNode::Real(b.id())) {
        PathNode::Real(b.id())
    } else {
        first
    };

    let depth = subsumer.max_depth(store)? + 1;
    let to_a = path::shortest_hypernym_distances(store, a, simulate)?;
    let to_b = path::shortest_hypernym_distances(store, b, simulate)?;
    let (Some(&len1), Some(&len2)) = (to_a.get(&subsumer), to_b.get(&subsumer)) else {
        return Ok(None);
    };
    let len1 = (len1 + depth) as f64;
    let len2 = (len2 + depth) as f64;
    Ok(Some(2.0 * depth as f64 / (len1 + len2)))
}

// ---------------------------------------------------------------------------
// Common hypernyms
// ---------------------------------------------------------------------------

/// Every synset appearing in both inputs' hypernym taxonomies, each input
/// counting as its own ancestor. Sorted by identity.
pub fn common_hypernyms(
    store: &GraphStore,
    a: &Synset,
    b: &Synset,
) -> LexnetResult<Vec<SynsetId>> {
    let mut of_a: HashSet<SynsetId> = path::hypernym_ancestors(store, a)?.clone();
    of_a.insert(a.id());
    let mut of_b: HashSet<SynsetId> = path::hypernym_ancestors(store, b)?.clone();
    of_b.insert(b.id());

    let mut common: Vec<SynsetId> = of_a.intersection(&of_b).copied().collect();
    common.sort();
    Ok(common)
}

/// The common hypernyms of greatest depth.
///
/// Candidates are ranked by max-depth, or by min-depth when
/// `use_min_depth` is set (legacy selection kept for compatibility with
/// Wu-Palmer results); all candidates at the winning depth are returned,
/// real synsets in identity order with the virtual root last.
pub fn lowest_common_hypernyms(
    store: &GraphStore,
    a: &Synset,
    b: &Synset,
    simulate_virtual_root: bool,
    use_min_depth: bool,
) -> LexnetResult<Vec<PathNode>> {
    let mut candidates: Vec<PathNode> = common_hypernyms(store, a, b)?
        .into_iter()
        .map(PathNode::Real)
        .collect();
    if simulate_virtual_root {
        candidates.push(PathNode::VirtualRoot);
    }

    let mut ranked: Vec<(usize, PathNode)> = Vec::with_capacity(candidates.len());
    for node in candidates {
        let depth = if use_min_depth {
            node.min_depth(store)?
        } else {
            node.max_depth(store)?
        };
        ranked.push((depth, node));
    }
    let Some(deepest) = ranked.iter().map(|&(d, _)| d).max() else {
        return Ok(Vec::new());
    };
    // common_hypernyms output is already sorted; the virtual root was
    // appended after it, so retaining order keeps it last.
    Ok(ranked
        .into_iter()
        .filter(|&(d, _)| d == deepest)
        .map(|(_, node)| node)
        .collect())
}

// ---------------------------------------------------------------------------
// Information-content metrics
// ---------------------------------------------------------------------------

/// `(ic(a), ic(b), ic(lcs))` for the information-content metrics.
///
/// The subsumer term is the greatest information content over all common
/// hypernyms, or 0 when the two synsets share no ancestor.
fn ic_triple(
    store: &GraphStore,
    a: &Synset,
    b: &Synset,
    ic: &IcTable,
    metric: &'static str,
) -> LexnetResult<(f64, f64, f64)> {
    if a.pos() != b.pos() {
        return Err(SimilarityError::PosMismatch {
            metric,
            a: a.pos(),
            b: b.pos(),
        }
        .into());
    }
    let ic_a = ic.information_content(a)?;
    let ic_b = ic.information_content(b)?;

    let mut ic_lcs = 0.0_f64;
    for id in common_hypernyms(store, a, b)? {
        let subsumer = store.resolve(id)?;
        ic_lcs = ic_lcs.max(ic.information_content(subsumer)?);
    }
    Ok((ic_a, ic_b, ic_lcs))
}

/// Resnik similarity: the information content of the lowest common
/// subsumer.
pub fn res_similarity(
    store: &GraphStore,
    a: &Synset,
    b: &Synset,
    ic: &IcTable,
) -> LexnetResult<f64> {
    let (_, _, ic_lcs) = ic_triple(store, a, b, ic, "res_similarity")?;
    Ok(ic_lcs)
}

/// Jiang-Conrath similarity `1 / (ic(a) + ic(b) - 2 * ic(lcs))`.
///
/// Infinite for identical inputs or a zero denominator; 0 when either
/// input has zero information content (sparse-data guard) or when neither
/// input is attested at all.
pub fn jcn_similarity(
    store: &GraphStore,
    a: &Synset,
    b: &Synset,
    ic: &IcTable,
) -> LexnetResult<f64> {
    let (ic_a, ic_b, ic_lcs) = ic_triple(store, a, b, ic, "jcn_similarity")?;
    if a.id() == b.id() {
        return Ok(f64::INFINITY);
    }
    if ic_a == 0.0 || ic_b == 0.0 {
        return Ok(0.0);
    }
    if ic_a.is_infinite() && ic_b.is_infinite() {
        // No corpus evidence for either input; the arithmetic below would
        // produce NaN when the subsumer is also unattested.
        return Ok(0.0);
    }
    let denominator = ic_a + ic_b - 2.0 * ic_lcs;
    if denominator == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(1.0 / denominator)
}

/// Lin similarity `2 * ic(lcs) / (ic(a) + ic(b))`, in `[0, 1]`; 0 when
/// neither input is attested.
pub fn lin_similarity(
    store: &GraphStore,
    a: &Synset,
    b: &Synset,
    ic: &IcTable,
) -> LexnetResult<f64> {
    let (ic_a, ic_b, ic_lcs) = ic_triple(store, a, b, ic, "lin_similarity")?;
    if ic_a.is_infinite() && ic_b.is_infinite() {
        return Ok(0.0);
    }
    Ok(2.0 * ic_lcs / (ic_a + ic_b))
}

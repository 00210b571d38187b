//! Hypernym path engine: paths to taxonomy roots, depths, closures, and
//! bounded relation trees.
//!
//! Verb and older noun taxonomies are forests rather than single-rooted
//! trees, so several distance algorithms need a fabricated sentinel
//! connecting all actual roots. That sentinel is the [`PathNode::VirtualRoot`]
//! variant: a proper tagged case rather than a stand-in synset, with empty
//! hypernym sets and depth 0, unequal to every real synset and sorting after
//! all real names.
//!
//! Hypernym edges are acyclic in practice, but nothing here assumes that
//! blindly: every traversal tracks visited nodes.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{LexnetResult, LookupError};
use crate::relation::Relation;
use crate::store::GraphStore;
use crate::synset::{Synset, SynsetId};

/// Display name of the virtual root sentinel.
pub const VIRTUAL_ROOT_NAME: &str = "*ROOT*";

/// A node in the combined path graph: a real synset or the virtual root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathNode {
    Real(SynsetId),
    VirtualRoot,
}

impl PathNode {
    /// The underlying synset identity, unless this is the virtual root.
    pub fn real(self) -> Option<SynsetId> {
        match self {
            PathNode::Real(id) => Some(id),
            PathNode::VirtualRoot => None,
        }
    }

    pub fn is_virtual_root(self) -> bool {
        matches!(self, PathNode::VirtualRoot)
    }

    /// Maximum depth: 0 for the virtual root, the synset's otherwise.
    pub fn max_depth(self, store: &GraphStore) -> LexnetResult<usize> {
        match self {
            PathNode::Real(id) => max_depth(store, store.resolve(id)?),
            PathNode::VirtualRoot => Ok(0),
        }
    }

    /// Minimum depth: 0 for the virtual root, the synset's otherwise.
    pub fn min_depth(self, store: &GraphStore) -> LexnetResult<usize> {
        match self {
            PathNode::Real(id) => min_depth(store, store.resolve(id)?),
            PathNode::VirtualRoot => Ok(0),
        }
    }
}

impl std::fmt::Display for PathNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathNode::Real(id) => write!(f, "{id}"),
            PathNode::VirtualRoot => f.write_str(VIRTUAL_ROOT_NAME),
        }
    }
}

// ---------------------------------------------------------------------------
// Hypernym paths and derived depths
// ---------------------------------------------------------------------------

/// All paths from a taxonomy root down to `synset`, each ordered root-first
/// with `synset` as the last element.
///
/// A synset with no hypernym or instance-hypernym targets yields the single
/// path `[synset]`; otherwise every parent's path set is extended with
/// `synset`, and the union is returned. Multiple-inheritance DAGs therefore
/// enumerate every distinct path. Memoized per synset on first computation.
pub fn hypernym_paths<'a>(
    store: &'a GraphStore,
    synset: &'a Synset,
) -> LexnetResult<&'a [Vec<SynsetId>]> {
    if let Some(paths) = synset.paths_cache.get() {
        return Ok(paths);
    }
    let mut active = HashSet::new();
    let computed = paths_rec(store, synset.id(), &mut active)?;
    Ok(synset.paths_cache.get_or_init(|| computed))
}

fn paths_rec(
    store: &GraphStore,
    id: SynsetId,
    active: &mut HashSet<SynsetId>,
) -> Result<Vec<Vec<SynsetId>>, LookupError> {
    let synset = store.resolve(id)?;
    let id = synset.id();
    if let Some(paths) = synset.paths_cache.get() {
        return Ok(paths.clone());
    }
    if !active.insert(id) {
        // Hypernym cycle: drop the re-entering edge.
        return Ok(Vec::new());
    }

    let parents: Vec<SynsetId> = synset.hypernym_ids().collect();
    let mut paths: Vec<Vec<SynsetId>> = Vec::new();
    for parent in parents {
        for mut path in paths_rec(store, parent, active)? {
            path.push(id);
            paths.push(path);
        }
    }
    if paths.is_empty() {
        paths.push(vec![id]);
    }

    active.remove(&id);
    let _ = synset.paths_cache.set(paths.clone());
    Ok(paths)
}

/// Length of the shortest root path, minus one. Memoized.
pub fn min_depth(store: &GraphStore, synset: &Synset) -> LexnetResult<usize> {
    if let Some(&depth) = synset.min_depth_cache.get() {
        return Ok(depth);
    }
    let paths = hypernym_paths(store, synset)?;
    let depth = paths.iter().map(|p| p.len() - 1).min().unwrap_or(0);
    Ok(*synset.min_depth_cache.get_or_init(|| depth))
}

/// Length of the longest root path, minus one. Memoized.
pub fn max_depth(store: &GraphStore, synset: &Synset) -> LexnetResult<usize> {
    if let Some(&depth) = synset.max_depth_cache.get() {
        return Ok(depth);
    }
    let paths = hypernym_paths(store, synset)?;
    let depth = paths.iter().map(|p| p.len() - 1).max().unwrap_or(0);
    Ok(*synset.max_depth_cache.get_or_init(|| depth))
}

/// The distinct taxonomy roots reachable from `synset`: the first element of
/// each hypernym path, deduplicated in path order. Memoized.
pub fn root_hypernyms<'a>(
    store: &'a GraphStore,
    synset: &'a Synset,
) -> LexnetResult<&'a [SynsetId]> {
    if let Some(roots) = synset.roots_cache.get() {
        return Ok(roots);
    }
    let paths = hypernym_paths(store, synset)?;
    let mut roots: Vec<SynsetId> = Vec::new();
    for path in paths {
        let root = path[0];
        if !roots.contains(&root) {
            roots.push(root);
        }
    }
    Ok(synset.roots_cache.get_or_init(|| roots))
}

/// Every ancestor on any hypernym path, excluding `synset` itself. Memoized.
pub fn hypernym_ancestors<'a>(
    store: &'a GraphStore,
    synset: &'a Synset,
) -> LexnetResult<&'a HashSet<SynsetId>> {
    if let Some(ancestors) = synset.ancestors_cache.get() {
        return Ok(ancestors);
    }
    let paths = hypernym_paths(store, synset)?;
    let mut ancestors: HashSet<SynsetId> = paths.iter().flatten().copied().collect();
    ancestors.remove(&synset.id());
    Ok(synset.ancestors_cache.get_or_init(|| ancestors))
}

// ---------------------------------------------------------------------------
// Relation closures and trees
// ---------------------------------------------------------------------------

/// Breadth-first closure along one relation.
///
/// Yields each distinct reachable synset exactly once, in BFS order, with
/// the seed itself excluded. `max_depth` bounds the number of edges followed
/// (`None` = unbounded); visited tracking guarantees termination even across
/// cross-links.
pub fn closure(
    store: &GraphStore,
    synset: &Synset,
    relation: Relation,
    max_depth: Option<usize>,
) -> LexnetResult<Vec<SynsetId>> {
    let mut visited: HashSet<SynsetId> = HashSet::from([synset.id()]);
    let mut result: Vec<SynsetId> = Vec::new();
    let mut queue: VecDeque<(SynsetId, usize)> = VecDeque::from([(synset.id(), 0)]);

    while let Some((id, depth)) = queue.pop_front() {
        if max_depth.is_some_and(|bound| depth >= bound) {
            continue;
        }
        let node = store.resolve(id)?;
        for &target in node.related(relation) {
            let target = store.resolve(target)?.id();
            if visited.insert(target) {
                result.push(target);
                queue.push_back((target, depth + 1));
            }
        }
    }
    Ok(result)
}

/// A bounded-depth expansion of one relation from a seed synset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationTree {
    pub id: SynsetId,
    pub children: Vec<RelationTree>,
}

/// Expand `relation` from `synset` into a tree, at most `max_depth` edges
/// deep (`None` = unbounded). A node repeated along one branch is emitted as
/// a leaf, so cyclic cross-links stay finite.
pub fn tree(
    store: &GraphStore,
    synset: &Synset,
    relation: Relation,
    max_depth: Option<usize>,
) -> LexnetResult<RelationTree> {
    let mut branch = HashSet::new();
    tree_rec(store, synset.id(), relation, max_depth, &mut branch)
}

fn tree_rec(
    store: &GraphStore,
    id: SynsetId,
    relation: Relation,
    depth_left: Option<usize>,
    branch: &mut HashSet<SynsetId>,
) -> LexnetResult<RelationTree> {
    let mut node = RelationTree {
        id,
        children: Vec::new(),
    };
    if depth_left == Some(0) || !branch.insert(id) {
        return Ok(node);
    }
    for &target in store.resolve(id)?.related(relation) {
        let target = store.resolve(target)?.id();
        node.children.push(tree_rec(
            store,
            target,
            relation,
            depth_left.map(|d| d - 1),
            branch,
        )?);
    }
    branch.remove(&id);
    Ok(node)
}

// ---------------------------------------------------------------------------
// Hypernym distances
// ---------------------------------------------------------------------------

/// All `(ancestor, edge_distance)` pairs reachable over hypernym and
/// instance-hypernym edges, including `(synset, 0)` itself.
///
/// An ancestor reachable along several paths keeps every distinct distance.
/// With `simulate_virtual_root`, one synthetic pair is added at the maximum
/// existing distance plus one.
pub fn hypernym_distances(
    store: &GraphStore,
    synset: &Synset,
    simulate_virtual_root: bool,
) -> LexnetResult<HashSet<(PathNode, usize)>> {
    let mut pairs: HashSet<(PathNode, usize)> = HashSet::new();
    // No simple path can be longer than the synset count; this bounds the
    // walk if the data ever contained a hypernym cycle.
    let bound = store.len();
    let mut queue: VecDeque<(SynsetId, usize)> = VecDeque::from([(synset.id(), 0)]);

    while let Some((id, distance)) = queue.pop_front() {
        if distance > bound {
            continue;
        }
        let node = store.resolve(id)?;
        if !pairs.insert((PathNode::Real(node.id()), distance)) {
            continue;
        }
        for parent in node.hypernym_ids() {
            queue.push_back((parent, distance + 1));
        }
    }

    if simulate_virtual_root {
        let deepest = pairs.iter().map(|&(_, d)| d).max().unwrap_or(0);
        pairs.insert((PathNode::VirtualRoot, deepest + 1));
    }
    Ok(pairs)
}

/// Minimum distance to each distinct ancestor, as a map.
pub fn shortest_hypernym_distances(
    store: &GraphStore,
    synset: &Synset,
    simulate_virtual_root: bool,
) -> LexnetResult<HashMap<PathNode, usize>> {
    let mut best: HashMap<PathNode, usize> = HashMap::new();
    for (node, distance) in hypernym_distances(store, synset, simulate_virtual_root)? {
        best.entry(node)
            .and_modify(|d| *d = (*d).min(distance))
            .or_insert(distance);
    }
    Ok(best)
}

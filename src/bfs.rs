use fxhash::FxBuildHasher;
/// This module implements a plain breadth-first search in the style of
/// [pathfinding's bfs function](https://docs.rs/pathfinding/latest/pathfinding/directed/bfs/index.html),
/// storing parents as entry indices in an [IndexMap] so the visited set and
/// the parent map are a single structure.
use indexmap::map::Entry::Vacant;
use indexmap::IndexMap;

use std::collections::VecDeque;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Walks the parent chain starting at entry `start`, collecting nodes until the
/// chain runs out, then drops the search source. The result is in
/// goal-to-source order; callers wanting source-to-goal order must reverse it.
fn backtrack<N>(parents: &FxIndexMap<N, usize>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, parent)| {
            *i = *parent;
            node.clone()
        })
    })
    .collect();
    path.pop();
    path
}

/// Unweighted shortest-path search from `start` to the first node satisfying
/// `success`. Successor order determines which of several equally short paths
/// is returned, so `successors` must yield neighbours in a fixed order.
///
/// Returns the path in goal-to-start order, excluding `start` itself, or
/// [None] if no satisfying node is reachable. A `start` that already satisfies
/// `success` yields an empty path.
pub(crate) fn bfs<N, FN, IN, FS>(start: &N, mut successors: FN, mut success: FS) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = N>,
    FS: FnMut(&N) -> bool,
{
    let mut parents: FxIndexMap<N, usize> = FxIndexMap::default();
    parents.insert(start.clone(), usize::MAX);
    let mut frontier: VecDeque<usize> = VecDeque::new();
    frontier.push_back(0);
    while let Some(index) = frontier.pop_front() {
        let successors = {
            let (node, _) = parents.get_index(index).unwrap();
            if success(node) {
                return Some(backtrack(&parents, index));
            }
            successors(node)
        };
        for successor in successors {
            // Occupied entries were discovered at a smaller or equal depth,
            // so only vacant ones extend the frontier.
            if let Vacant(e) = parents.entry(successor) {
                let n = e.index();
                e.insert(index);
                frontier.push_back(n);
            }
        }
    }
    None
}

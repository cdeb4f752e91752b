/*!
Breadth-first and depth-first search with explicit search trees.

This module provides:
- [`SearchState`]: the per-run result (visited set, parents, depths, visit order).
- Reusable runners [`Bfs`] and [`Dfs`] whose buffers are sized once and
  reset in time proportional to the previous run.
- The [`Traversal`] extension trait exposing both searches directly on any
  [`AdjacencyList`].

Neighbors are processed in the order the graph enumerates them (ascending for
all backends of this crate). BFS supports an early exit once a target vertex
has been discovered; DFS always exhausts the component of its source.
*/

use std::{collections::VecDeque, fmt::Display, str::FromStr};

use tracing::trace;

use super::*;

/// Frontier of a traversal; the container decides the visiting order.
///
/// - [`VecDeque`] -> queue semantics -> **BFS**
/// - [`Vec`] -> stack semantics -> **DFS**
pub trait NodeSequencer<T> {
    /// Pushes an item into the frontier.
    fn push(&mut self, item: T);

    /// Removes and returns the next item from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Drops all items.
    fn clear(&mut self);
}

impl<T> NodeSequencer<T> for VecDeque<T> {
    fn push(&mut self, item: T) {
        self.push_back(item)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn clear(&mut self) {
        VecDeque::clear(self)
    }
}

impl<T> NodeSequencer<T> for Vec<T> {
    fn push(&mut self, item: T) {
        Vec::push(self, item)
    }
    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }
    fn clear(&mut self) {
        Vec::clear(self)
    }
}

/// Which traversal to use where either one would do (components, benchmarks)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SearchKind {
    #[default]
    Bfs,
    Dfs,
}

impl Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchKind::Bfs => write!(f, "BFS"),
            SearchKind::Dfs => write!(f, "DFS"),
        }
    }
}

impl FromStr for SearchKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(SearchKind::Bfs),
            "dfs" => Ok(SearchKind::Dfs),
            _ => Err(GraphError::Parse(format!(
                "unknown search '{s}': expected bfs or dfs"
            ))),
        }
    }
}

/// Result of a single BFS or DFS run.
///
/// The root has no parent and depth 0; vertices that were not reached
/// have neither parent nor depth.
#[derive(Clone)]
pub struct SearchState {
    visited: NodeBitSet,
    parent: Vec<Option<Node>>,
    depth: Vec<Option<NumNodes>>,
    order: Vec<Node>,
    source: Option<Node>,
}

impl SearchState {
    /// Creates an empty state for a graph with `n` nodes
    pub fn new(n: NumNodes) -> Self {
        Self {
            visited: NodeBitSet::new(n),
            parent: vec![None; n as usize],
            depth: vec![None; n as usize],
            order: Vec::new(),
            source: None,
        }
    }

    /// Number of nodes this state was sized for
    pub fn number_of_nodes(&self) -> NumNodes {
        self.parent.len() as NumNodes
    }

    /// Clears the previous run. Only entries touched by that run are reset.
    pub fn reset(&mut self) {
        for &u in &self.order {
            self.visited.clear_bit(u);
            self.parent[u as usize] = None;
            self.depth[u as usize] = None;
        }
        self.order.clear();
        self.source = None;
    }

    fn discover(&mut self, u: Node, parent: Option<Node>) {
        self.visited.set_bit(u);
        self.parent[u as usize] = parent;
        self.depth[u as usize] =
            Some(parent.map_or(0, |p| self.depth[p as usize].map_or(0, |d| d + 1)));
        self.order.push(u);
    }

    /// Source of the last run
    pub fn source(&self) -> Option<Node> {
        self.source
    }

    /// Returns *true* if `u` was reached.
    /// ** Panics if `u >= n` **
    pub fn did_visit(&self, u: Node) -> bool {
        self.visited.get_bit(u)
    }

    /// Parent of `u` in the search tree (`None` for the root and unreached nodes)
    pub fn parent_of(&self, u: Node) -> Option<Node> {
        self.parent[u as usize]
    }

    /// Depth of `u` in the search tree (`None` if unreached)
    pub fn depth_of(&self, u: Node) -> Option<NumNodes> {
        self.depth[u as usize]
    }

    /// Nodes in the order they were visited
    pub fn order(&self) -> &[Node] {
        &self.order
    }

    /// Number of visited nodes (equals `order().len()`)
    pub fn visited_count(&self) -> NumNodes {
        self.visited.cardinality()
    }

    /// Iterator over all nodes that were not reached, ascending
    pub fn unvisited(&self) -> impl Iterator<Item = Node> + '_ {
        (0..self.number_of_nodes()).filter(|&u| !self.did_visit(u))
    }

    /// Parent array of the search tree
    pub fn parents(&self) -> &[Option<Node>] {
        &self.parent
    }

    /// Depth array of the search tree
    pub fn depths(&self) -> &[Option<NumNodes>] {
        &self.depth
    }

    /// Returns the path from the source to `target` in the search tree,
    /// or `None` if `target` was not reached.
    ///
    /// For BFS this is a shortest path.
    pub fn tree_path_to(&self, target: Node) -> Option<Vec<Node>> {
        if !self.did_visit(target) {
            return None;
        }

        let mut path = vec![target];
        let mut u = target;
        while let Some(p) = self.parent_of(u) {
            path.push(p);
            u = p;
        }
        path.reverse();
        Some(path)
    }
}

/// Reusable breadth-first search.
///
/// # Examples
/// ```
/// use graphsearch::{prelude::*, algo::*};
///
/// let g = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
/// let mut bfs = Bfs::new(g.number_of_nodes());
///
/// let state = bfs.run(&g, 0, None).unwrap();
/// assert_eq!(state.order(), &[0, 1, 2, 3]);
/// assert_eq!(state.depth_of(3), Some(3));
///
/// // stops as soon as vertex 1 is discovered
/// let state = bfs.run(&g, 0, Some(1)).unwrap();
/// assert_eq!(state.order(), &[0, 1]);
/// ```
#[derive(Clone)]
pub struct Bfs {
    state: SearchState,
    queue: VecDeque<Node>,
}

impl Bfs {
    pub fn new(n: NumNodes) -> Self {
        Self {
            state: SearchState::new(n),
            queue: VecDeque::new(),
        }
    }

    fn prepare(&mut self, n: NumNodes) {
        if self.state.number_of_nodes() == n {
            self.state.reset();
        } else {
            self.state = SearchState::new(n);
        }
        self.queue.clear();
    }

    /// Runs a BFS from `source`. If `target` is given, the search ends right after
    /// `target` has been discovered; depths and parents recorded so far stay valid.
    ///
    /// Fails with [`GraphError::InvalidVertex`] if `source` or `target` is out of range.
    pub fn run<G: AdjacencyList>(
        &mut self,
        graph: &G,
        source: Node,
        target: Option<Node>,
    ) -> Result<&SearchState> {
        let n = graph.number_of_nodes();
        check_node(source, n)?;
        if let Some(t) = target {
            check_node(t, n)?;
        }

        self.prepare(n);
        self.state.source = Some(source);
        self.state.discover(source, None);

        if target != Some(source) {
            self.queue.push(source);
        }

        'search: while let Some(u) = NodeSequencer::pop(&mut self.queue) {
            for v in graph.neighbors_of(u) {
                if self.state.did_visit(v) {
                    continue;
                }

                self.state.discover(v, Some(u));
                if target == Some(v) {
                    trace!(vertex = to_external(v), "bfs reached target");
                    break 'search;
                }
                self.queue.push(v);
            }
        }

        Ok(&self.state)
    }

    /// State of the last run
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn into_state(self) -> SearchState {
        self.state
    }
}

/// Reusable iterative depth-first search.
///
/// Uses an explicit stack of `(vertex, proposed parent)` pairs. A vertex is marked
/// when it is popped; its unvisited neighbors are pushed in reverse order so that
/// the smallest neighbor is explored first.
#[derive(Clone)]
pub struct Dfs {
    state: SearchState,
    stack: Vec<(Node, Option<Node>)>,
    buffer: Vec<Node>,
}

impl Dfs {
    pub fn new(n: NumNodes) -> Self {
        Self {
            state: SearchState::new(n),
            stack: Vec::new(),
            buffer: Vec::new(),
        }
    }

    fn prepare(&mut self, n: NumNodes) {
        if self.state.number_of_nodes() == n {
            self.state.reset();
        } else {
            self.state = SearchState::new(n);
        }
        NodeSequencer::clear(&mut self.stack);
    }

    /// Runs a DFS from `source` over its whole component.
    ///
    /// Fails with [`GraphError::InvalidVertex`] if `source` is out of range.
    pub fn run<G: AdjacencyList>(&mut self, graph: &G, source: Node) -> Result<&SearchState> {
        check_node(source, graph.number_of_nodes())?;

        self.prepare(graph.number_of_nodes());
        self.state.source = Some(source);
        self.stack.push((source, None));

        while let Some((u, parent)) = NodeSequencer::pop(&mut self.stack) {
            if self.state.did_visit(u) {
                continue;
            }
            self.state.discover(u, parent);

            self.buffer.clear();
            self.buffer.extend(
                graph
                    .neighbors_of(u)
                    .filter(|&v| !self.state.did_visit(v)),
            );
            for &v in self.buffer.iter().rev() {
                self.stack.push((v, Some(u)));
            }
        }

        Ok(&self.state)
    }

    /// State of the last run
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn into_state(self) -> SearchState {
        self.state
    }
}

/// Provides BFS/DFS directly as methods on graph data structures
pub trait Traversal: AdjacencyList {
    /// Full BFS from `source`.
    ///
    /// # Examples
    /// ```
    /// use graphsearch::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
    /// let state = g.bfs(1).unwrap();
    /// assert_eq!(state.order(), &[1, 0, 2]);
    /// assert_eq!(state.parent_of(2), Some(1));
    /// ```
    fn bfs(&self, source: Node) -> Result<SearchState> {
        let mut bfs = Bfs::new(self.number_of_nodes());
        bfs.run(self, source, None)?;
        Ok(bfs.into_state())
    }

    /// BFS from `source` that stops once `target` is discovered
    fn bfs_to(&self, source: Node, target: Node) -> Result<SearchState> {
        let mut bfs = Bfs::new(self.number_of_nodes());
        bfs.run(self, source, Some(target))?;
        Ok(bfs.into_state())
    }

    /// Full DFS from `source`.
    ///
    /// # Examples
    /// ```
    /// use graphsearch::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(4, [(0, 1), (0, 2), (1, 3)]);
    /// let state = g.dfs(0).unwrap();
    /// assert_eq!(state.order(), &[0, 1, 3, 2]);
    /// ```
    fn dfs(&self, source: Node) -> Result<SearchState> {
        let mut dfs = Dfs::new(self.number_of_nodes());
        dfs.run(self, source)?;
        Ok(dfs.into_state())
    }

    /// Runs the traversal selected by `kind`
    fn search(&self, kind: SearchKind, source: Node) -> Result<SearchState> {
        match kind {
            SearchKind::Bfs => self.bfs(source),
            SearchKind::Dfs => self.dfs(source),
        }
    }
}

impl<G: AdjacencyList> Traversal for G {}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn bfs_order() {
        //  / 2 --- \
        // 1         4 - 3
        //  \ 0 - 5 /
        let graph = AdjArrayUndir::from_edges(6, [(1, 2), (1, 0), (4, 3), (0, 5), (2, 4), (5, 4)]);

        let state = graph.bfs(1).unwrap();
        assert_eq!(state.order(), &[1, 0, 2, 5, 4, 3]);
        assert_eq!(
            state.depths().iter().map(|d| d.unwrap()).collect_vec(),
            vec![1, 0, 1, 3, 2, 2]
        );
        assert_eq!(state.parent_of(1), None);
        assert_eq!(state.parent_of(4), Some(2));
        assert_eq!(state.tree_path_to(3).unwrap(), vec![1, 2, 4, 3]);

        let state = graph.bfs(5).unwrap();
        assert_eq!(state.order(), &[5, 0, 4, 1, 2, 3]);
    }

    #[test]
    fn bfs_on_cycle() {
        let graph = AdjMatrixUndir::from_edges(6, cycle_edges(6));
        let state = graph.bfs(0).unwrap();
        assert_eq!(
            state.depths().iter().map(|d| d.unwrap()).collect_vec(),
            vec![0, 1, 2, 3, 2, 1]
        );
    }

    #[test]
    fn bfs_early_exit() {
        let graph = AdjArrayUndir::from_edges(6, path_edges(6));

        let state = graph.bfs_to(0, 2).unwrap();
        assert_eq!(state.order(), &[0, 1, 2]);
        assert_eq!(state.depth_of(2), Some(2));
        assert!(!state.did_visit(3));

        let state = graph.bfs_to(3, 3).unwrap();
        assert_eq!(state.order(), &[3]);
        assert_eq!(state.depth_of(3), Some(0));
    }

    #[test]
    fn bfs_rejects_invalid_nodes() {
        let graph = AdjArrayUndir::from_edges(3, [(0, 1)]);
        assert!(matches!(
            graph.bfs(3),
            Err(GraphError::InvalidVertex { vertex: 4, n: 3 })
        ));
        assert!(graph.bfs_to(0, 7).is_err());
        assert!(graph.dfs(3).is_err());
    }

    #[test]
    fn bfs_reuses_buffers() {
        let graph = AdjArrayUndir::from_edges(5, [(0, 1), (2, 3), (3, 4)]);
        let mut bfs = Bfs::new(5);

        assert_eq!(bfs.run(&graph, 2, None).unwrap().order(), &[2, 3, 4]);
        let state = bfs.run(&graph, 0, None).unwrap();
        assert_eq!(state.order(), &[0, 1]);
        assert_eq!(state.unvisited().collect_vec(), vec![2, 3, 4]);
        assert_eq!(state.depth_of(4), None);
        assert_eq!(state.parent_of(3), None);
    }

    #[test]
    fn dfs_order() {
        //   0
        //  / \
        // 1   2
        // |   |
        // 3   4 - 5
        let graph = AdjArrayUndir::from_edges(7, [(0, 1), (0, 2), (1, 3), (2, 4), (4, 5)]);

        let state = graph.dfs(0).unwrap();
        assert_eq!(state.order(), &[0, 1, 3, 2, 4, 5]);
        assert_eq!(state.depth_of(5), Some(3));
        assert_eq!(state.parent_of(2), Some(0));
        assert_eq!(state.unvisited().collect_vec(), vec![6]);
        assert_eq!(state.visited_count(), 6);
    }

    #[test]
    fn dfs_parent_is_first_discovering_vertex() {
        // triangle: 0 pops, pushes 2 then 1; 1 pops and reaches 2 first
        let graph = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2), (0, 2)]);
        let state = graph.dfs(0).unwrap();
        assert_eq!(state.order(), &[0, 1, 2]);
        assert_eq!(state.parent_of(2), Some(1));
        assert_eq!(state.depth_of(2), Some(2));
    }

    #[test]
    fn representations_agree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x1234);
        for _ in 0..20 {
            let n = rng.random_range(2..40);
            let edges = random_edges(rng, n, 0.1);
            let list = AdjArrayUndir::from_edges(n, &edges);
            let matrix = AdjMatrixUndir::from_edges(n, &edges);

            let s = rng.random_range(0..n);
            assert_eq!(list.bfs(s).unwrap().order(), matrix.bfs(s).unwrap().order());
            assert_eq!(list.dfs(s).unwrap().order(), matrix.dfs(s).unwrap().order());
        }
    }

    #[test]
    fn search_tree_properties() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0xabcd);
        for _ in 0..30 {
            let n = rng.random_range(1..30);
            let graph = AdjArrayUndir::from_edges(n, random_edges(rng, n, 0.15));
            let s = rng.random_range(0..n);
            let truth = brute_force_distances(&graph, s);

            let bfs = graph.bfs(s).unwrap();
            let dfs = graph.dfs(s).unwrap();

            for u in graph.vertices() {
                assert_eq!(bfs.depth_of(u).map(|d| d as u64), truth[u as usize]);
                assert_eq!(dfs.did_visit(u), truth[u as usize].is_some());

                for state in [&bfs, &dfs] {
                    if let Some(p) = state.parent_of(u) {
                        assert!(graph.has_edge(p, u));
                        assert_eq!(state.depth_of(p).unwrap() + 1, state.depth_of(u).unwrap());
                    }
                }
            }

            assert_eq!(dfs.order().len(), dfs.visited_count() as usize);
            assert_eq!(dfs.order().iter().unique().count(), dfs.order().len());
            assert_eq!(bfs.order().iter().sorted().collect_vec(), dfs.order().iter().sorted().collect_vec());
        }
    }
}

/*!
Single-source shortest paths over non-negative edge weights.

The "next closest node" step of Dijkstra's algorithm is delegated to a
[`PriorityStrategy`]:
- [`LinearScanStrategy`]: scans all nodes per extraction, `O(V^2 + E)` in total.
  No per-update overhead; good for small or dense graphs.
- [`HeapStrategy`]: binary heap with lazy deletion, `O((V + E) log V)`.
  Good for sparse graphs.

Both strategies extract the smallest node id among equally distant candidates,
so they produce identical distances *and* predecessors. In general, when several
shortest paths exist, the predecessor of a node is the node whose relaxation
first reached the final distance.
*/

use std::{cmp::Ordering, collections::BinaryHeap, fmt::Display, str::FromStr};

use tracing::debug;

use super::*;

/// Priority structure used by [`Dijkstra`] to find the next node to finalize
pub trait PriorityStrategy {
    /// Short name used in reports
    fn name(&self) -> &'static str;

    /// Prepares the structure for a graph with `n` nodes, dropping all previous content
    fn initialize(&mut self, n: NumNodes);

    /// Announces a new tentative distance for `u`
    fn insert_or_update(&mut self, u: Node, distance: Weight);

    /// Removes and returns the unfinalized node with smallest tentative distance
    fn extract_min(&mut self) -> Option<Node>;

    /// Returns *true* if no node is left to extract
    fn is_empty(&self) -> bool;

    /// Marks `u` as finalized
    fn mark_visited(&mut self, u: Node);
}

/// `O(V)` scan over all tentative distances per extraction
#[derive(Clone, Default)]
pub struct LinearScanStrategy {
    distances: Vec<Weight>,
    visited: Vec<bool>,
}

impl PriorityStrategy for LinearScanStrategy {
    fn name(&self) -> &'static str {
        "linear scan"
    }

    fn initialize(&mut self, n: NumNodes) {
        self.distances.clear();
        self.distances.resize(n as usize, Weight::INFINITY);
        self.visited.clear();
        self.visited.resize(n as usize, false);
    }

    fn insert_or_update(&mut self, u: Node, distance: Weight) {
        self.distances[u as usize] = distance;
    }

    fn extract_min(&mut self) -> Option<Node> {
        let mut best: Option<(Node, Weight)> = None;
        for (u, (&d, &visited)) in self.distances.iter().zip(&self.visited).enumerate() {
            if !visited && d < best.map_or(Weight::INFINITY, |(_, b)| b) {
                best = Some((u as Node, d));
            }
        }

        let (u, _) = best?;
        self.visited[u as usize] = true;
        Some(u)
    }

    fn is_empty(&self) -> bool {
        !self
            .distances
            .iter()
            .zip(&self.visited)
            .any(|(d, &visited)| !visited && d.is_finite())
    }

    fn mark_visited(&mut self, u: Node) {
        self.visited[u as usize] = true;
    }
}

/// Min-heap entry ordered by `(distance, node)`
#[derive(Copy, Clone, Debug, PartialEq)]
struct HeapEntry {
    distance: Weight,
    node: Node,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed to turn the max-heap into a min-heap
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary heap with lazy deletion: updates push a fresh entry and stale
/// entries are discarded on extraction.
#[derive(Clone, Default)]
pub struct HeapStrategy {
    heap: BinaryHeap<HeapEntry>,
    distances: Vec<Weight>,
    visited: Vec<bool>,
}

impl HeapStrategy {
    fn is_stale(&self, entry: &HeapEntry) -> bool {
        self.visited[entry.node as usize] || entry.distance != self.distances[entry.node as usize]
    }
}

impl PriorityStrategy for HeapStrategy {
    fn name(&self) -> &'static str {
        "binary heap"
    }

    fn initialize(&mut self, n: NumNodes) {
        self.heap.clear();
        self.distances.clear();
        self.distances.resize(n as usize, Weight::INFINITY);
        self.visited.clear();
        self.visited.resize(n as usize, false);
    }

    fn insert_or_update(&mut self, u: Node, distance: Weight) {
        self.distances[u as usize] = distance;
        self.heap.push(HeapEntry { distance, node: u });
    }

    fn extract_min(&mut self) -> Option<Node> {
        while let Some(entry) = self.heap.pop() {
            if !self.is_stale(&entry) {
                self.visited[entry.node as usize] = true;
                return Some(entry.node);
            }
        }
        None
    }

    // stale entries count; `extract_min` returns `None` if only those remain
    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn mark_visited(&mut self, u: Node) {
        self.visited[u as usize] = true;
    }
}

/// Selects a priority strategy from the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum StrategyKind {
    Linear,
    #[default]
    Heap,
    Both,
}

impl StrategyKind {
    /// Concrete strategies covered by this choice
    pub fn strategies(self) -> &'static [StrategyKind] {
        match self {
            StrategyKind::Linear => &[StrategyKind::Linear],
            StrategyKind::Heap => &[StrategyKind::Heap],
            StrategyKind::Both => &[StrategyKind::Linear, StrategyKind::Heap],
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Linear => write!(f, "linear scan"),
            StrategyKind::Heap => write!(f, "binary heap"),
            StrategyKind::Both => write!(f, "both"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "vector" | "vetor" => Ok(StrategyKind::Linear),
            "heap" => Ok(StrategyKind::Heap),
            "both" | "ambos" => Ok(StrategyKind::Both),
            _ => Err(GraphError::Parse(format!(
                "unknown strategy '{s}': expected linear, heap or both"
            ))),
        }
    }
}

/// Shortest path distances and predecessors from a single origin
#[derive(Clone, Debug, PartialEq)]
pub struct DijkstraResult {
    /// `distances[u]` is `INFINITY` if `u` is unreachable
    pub distances: Vec<Weight>,
    /// `predecessors[u]` is `None` for the origin and unreachable nodes
    pub predecessors: Vec<Option<Node>>,
    pub origin: Node,
}

impl DijkstraResult {
    /// ** Panics if `u >= n` **
    pub fn distance_to(&self, u: Node) -> Weight {
        self.distances[u as usize]
    }

    /// ** Panics if `u >= n` **
    pub fn is_reachable(&self, u: Node) -> bool {
        self.distances[u as usize].is_finite()
    }

    /// ** Panics if `u >= n` **
    pub fn predecessor_of(&self, u: Node) -> Option<Node> {
        self.predecessors[u as usize]
    }

    /// Number of nodes with finite distance (including the origin)
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_finite()).count()
    }

    /// Shortest path from the origin to `dest` (both included).
    /// Empty if `dest` is unreachable or not a node of the graph.
    ///
    /// # Examples
    /// ```
    /// use graphsearch::{prelude::*, algo::*};
    ///
    /// let g = WeightedAdjArray::from_weighted_edges(4, [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 5.0)]);
    /// let result = g.shortest_paths(0).unwrap();
    ///
    /// assert_eq!(result.path_to(2), vec![0, 1, 2]);
    /// assert_eq!(result.path_to(0), vec![0]);
    /// assert!(result.path_to(3).is_empty());
    /// assert!(result.path_to(9).is_empty());
    /// ```
    pub fn path_to(&self, dest: Node) -> Vec<Node> {
        if dest as usize >= self.distances.len() || !self.is_reachable(dest) {
            return Vec::new();
        }

        let mut path = vec![dest];
        let mut u = dest;
        while u != self.origin {
            match self.predecessor_of(u) {
                Some(p) => {
                    path.push(p);
                    u = p;
                }
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }
}

/// Dijkstra's algorithm, generic over the priority strategy.
///
/// # Examples
/// ```
/// use graphsearch::{prelude::*, algo::*};
///
/// let g = WeightedAdjMatrix::from_weighted_edges(3, [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 5.0)]);
///
/// let linear = Dijkstra::new(LinearScanStrategy::default()).run(&g, 0).unwrap();
/// let heap = Dijkstra::new(HeapStrategy::default()).run(&g, 0).unwrap();
///
/// assert_eq!(linear.distances, vec![0.0, 1.0, 3.0]);
/// assert_eq!(linear, heap);
/// ```
#[derive(Clone, Default)]
pub struct Dijkstra<S: PriorityStrategy> {
    strategy: S,
}

impl<S: PriorityStrategy> Dijkstra<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Computes shortest paths from `origin`.
    ///
    /// Fails with [`GraphError::InvalidVertex`] if `origin` is out of range and
    /// with [`GraphError::NegativeWeight`] if any edge weight is negative or NaN.
    pub fn run<G: WeightedAdjacencyList>(&mut self, graph: &G, origin: Node) -> Result<DijkstraResult> {
        let n = graph.number_of_nodes();
        check_node(origin, n)?;
        if let Some(e) = graph.find_invalid_weight() {
            return Err(GraphError::NegativeWeight {
                u: to_external(e.u),
                v: to_external(e.v),
                weight: e.weight,
            });
        }

        let mut distances = vec![Weight::INFINITY; n as usize];
        let mut predecessors = vec![None; n as usize];
        distances[origin as usize] = 0.0;

        self.strategy.initialize(n);
        self.strategy.insert_or_update(origin, 0.0);

        let mut finalized = 0usize;
        while !self.strategy.is_empty() {
            let Some(u) = self.strategy.extract_min() else {
                break;
            };
            let du = distances[u as usize];
            if du.is_infinite() {
                break;
            }
            self.strategy.mark_visited(u);
            finalized += 1;

            for (v, w) in graph.weighted_neighbors_of(u) {
                let candidate = du + w;
                if candidate < distances[v as usize] {
                    distances[v as usize] = candidate;
                    predecessors[v as usize] = Some(u);
                    self.strategy.insert_or_update(v, candidate);
                }
            }
        }

        debug!(
            strategy = self.strategy.name(),
            origin = to_external(origin),
            finalized,
            "dijkstra finished"
        );

        Ok(DijkstraResult {
            distances,
            predecessors,
            origin,
        })
    }
}

/// Runs Dijkstra with the strategy selected by `kind` (`Both` falls back to the heap)
pub fn dijkstra_with<G: WeightedAdjacencyList>(
    graph: &G,
    origin: Node,
    kind: StrategyKind,
) -> Result<DijkstraResult> {
    match kind {
        StrategyKind::Linear => Dijkstra::new(LinearScanStrategy::default()).run(graph, origin),
        StrategyKind::Heap | StrategyKind::Both => {
            Dijkstra::new(HeapStrategy::default()).run(graph, origin)
        }
    }
}

/// Provides shortest paths directly on weighted graphs
pub trait ShortestPaths: WeightedAdjacencyList {
    /// Dijkstra from `origin` using the heap strategy
    fn shortest_paths(&self, origin: Node) -> Result<DijkstraResult> {
        dijkstra_with(self, origin, StrategyKind::Heap)
    }
}

impl<G: WeightedAdjacencyList> ShortestPaths for G {}

/// Sum of the edge weights along `path`, `None` if some consecutive pair is not adjacent
pub fn path_weight<G: WeightedAdjacencyList>(graph: &G, path: &[Node]) -> Option<Weight> {
    path.windows(2)
        .map(|pair| graph.edge_weight(pair[0], pair[1]))
        .sum()
}

/*!
Unweighted distances and diameter estimation.

Distances are BFS depths. The diameter is computed exactly for small graphs (one
BFS per node) and estimated by sampling for larger ones:

- sample size: all nodes if `n <= 100`, `n / 4` if `n <= 1000`, else `min(n / 10, 100)`
- sampled nodes: every `n / size`-th node, plus the first, middle and last node
- connected graphs: only distances between sampled nodes are inspected
- disconnected graphs: every destination is inspected for each sampled source

An estimate is a lower bound of the true diameter. For disconnected graphs the
reported value is the largest *finite* distance.
*/

use std::fmt::Display;

use tracing::debug;

use super::*;

/// Length of a shortest path in edges
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Finite(u64),
    Unreachable,
}

impl Distance {
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn finite(&self) -> Option<u64> {
        match *self {
            Distance::Finite(d) => Some(d),
            Distance::Unreachable => None,
        }
    }
}

impl From<Option<NumNodes>> for Distance {
    fn from(depth: Option<NumNodes>) -> Self {
        depth.map_or(Distance::Unreachable, |d| Distance::Finite(d as u64))
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Unreachable => write!(f, "INF"),
        }
    }
}

/// Outcome of a diameter computation
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiameterResult {
    /// Largest finite distance found
    pub diameter: u64,
    /// A pair of nodes at distance `diameter`, `None` if no pair with positive distance exists
    pub endpoints: Option<(Node, Node)>,
    /// *true* if every pair was inspected
    pub exact: bool,
    /// *true* if the graph is connected (the diameter is finite)
    pub connected: bool,
    /// Number of BFS sources used
    pub sources: usize,
}

/// Single-source and point-to-point BFS distances.
/// Keeps one BFS runner so repeated queries do not reallocate.
#[derive(Clone)]
pub struct DistanceEngine {
    bfs: Bfs,
}

impl DistanceEngine {
    pub fn new(n: NumNodes) -> Self {
        Self { bfs: Bfs::new(n) }
    }

    /// Distance between `origin` and `dest`. The BFS stops as soon as `dest` is found.
    ///
    /// # Examples
    /// ```
    /// use graphsearch::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2)]);
    /// let mut engine = DistanceEngine::new(4);
    ///
    /// assert_eq!(engine.distance_between(&g, 0, 2).unwrap(), Distance::Finite(2));
    /// assert_eq!(engine.distance_between(&g, 0, 3).unwrap(), Distance::Unreachable);
    /// assert_eq!(engine.distance_between(&g, 3, 3).unwrap(), Distance::Finite(0));
    /// ```
    pub fn distance_between<G: AdjacencyList>(
        &mut self,
        graph: &G,
        origin: Node,
        dest: Node,
    ) -> Result<Distance> {
        let n = graph.number_of_nodes();
        check_node(origin, n)?;
        check_node(dest, n)?;
        if origin == dest {
            return Ok(Distance::Finite(0));
        }

        let state = self.bfs.run(graph, origin, Some(dest))?;
        Ok(state.depth_of(dest).into())
    }

    /// Distances from `source` to every node
    pub fn distances_from<G: AdjacencyList>(
        &mut self,
        graph: &G,
        source: Node,
    ) -> Result<Vec<Distance>> {
        let state = self.bfs.run(graph, source, None)?;
        Ok(state.depths().iter().map(|&d| d.into()).collect())
    }

    /// All pairs distances; `n` BFS runs and `n^2` memory, so only for small graphs
    pub fn distance_matrix<G: AdjacencyList>(&mut self, graph: &G) -> Vec<Vec<Distance>> {
        graph
            .vertices()
            .filter_map(|u| self.distances_from(graph, u).ok())
            .collect()
    }

    /// Returns *true* if a BFS from node 0 reaches every node
    pub fn is_connected<G: AdjacencyList>(&mut self, graph: &G) -> bool {
        if graph.is_empty() {
            return true;
        }
        self.bfs
            .run(graph, 0, None)
            .is_ok_and(|state| state.visited_count() == graph.number_of_nodes())
    }
}

/// Selects the deterministic sample of nodes used by the diameter estimate.
///
/// # Examples
/// ```
/// use graphsearch::algo::sample_vertices;
///
/// assert_eq!(sample_vertices(5), vec![0, 1, 2, 3, 4]);
///
/// let sample = sample_vertices(400);
/// assert_eq!(sample.len(), 101); // 100 strided nodes + the last one
/// assert!(sample.contains(&0) && sample.contains(&200) && sample.contains(&399));
/// ```
pub fn sample_vertices(n: NumNodes) -> Vec<Node> {
    if n == 0 {
        return Vec::new();
    }

    let size = if n <= 100 {
        n
    } else if n <= 1000 {
        n / 4
    } else {
        (n / 10).min(100)
    };
    let step = (n / size).max(1) as usize;

    let mut sample: Vec<Node> = (0..n).step_by(step).take(size as usize).collect();
    sample.extend([0, n / 2, n - 1]);
    sample.sort_unstable();
    sample.dedup();
    sample
}

/// Computes the diameter exactly or estimates it by sampling, depending on the graph size.
///
/// # Examples
/// ```
/// use graphsearch::{prelude::*, algo::*};
///
/// // cycle on 6 nodes
/// let g = AdjArrayUndir::from_edges(6, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
/// let result = DiameterEstimator::new().estimate(&g).unwrap();
///
/// assert_eq!(result.diameter, 3);
/// assert_eq!(result.endpoints, Some((0, 3)));
/// assert!(result.exact && result.connected);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct DiameterEstimator {
    exact_threshold: NumNodes,
}

impl Default for DiameterEstimator {
    fn default() -> Self {
        Self {
            exact_threshold: Self::DEFAULT_EXACT_THRESHOLD,
        }
    }
}

impl DiameterEstimator {
    /// Graphs up to this many nodes are solved exactly by default
    pub const DEFAULT_EXACT_THRESHOLD: NumNodes = 500;

    pub fn new() -> Self {
        Self::default()
    }

    /// Graphs with at most `n` nodes are solved exactly
    pub fn exact_threshold(mut self, n: NumNodes) -> Self {
        self.exact_threshold = n;
        self
    }

    /// Always inspect all pairs
    pub fn always_exact(self) -> Self {
        self.exact_threshold(NumNodes::MAX)
    }

    /// Always sample (sampling still covers all nodes if `n <= 100`)
    pub fn always_sample(self) -> Self {
        self.exact_threshold(0)
    }

    /// Fails with [`GraphError::EmptyGraph`] if the graph has no nodes
    pub fn estimate<G: AdjacencyList>(&self, graph: &G) -> Result<DiameterResult> {
        let n = graph.number_of_nodes();
        if n == 0 {
            return Err(GraphError::EmptyGraph);
        }

        let result = if n <= self.exact_threshold {
            debug!(n, "computing exact diameter");
            Self::exact(graph)?
        } else {
            Self::sampled(graph)?
        };

        debug!(
            diameter = result.diameter,
            exact = result.exact,
            connected = result.connected,
            "diameter computed"
        );
        Ok(result)
    }

    fn exact<G: AdjacencyList>(graph: &G) -> Result<DiameterResult> {
        let n = graph.number_of_nodes();
        let mut bfs = Bfs::new(n);
        let mut best = Farthest::default();
        let mut connected = true;

        for s in graph.vertices() {
            let state = bfs.run(graph, s, None)?;
            connected &= state.visited_count() == n;
            best.update_from(state, s, graph.vertices());
        }

        Ok(best.into_result(true, connected, n as usize))
    }

    fn sampled<G: AdjacencyList>(graph: &G) -> Result<DiameterResult> {
        let n = graph.number_of_nodes();
        let mut bfs = Bfs::new(n);

        let connected = bfs.run(graph, 0, None)?.visited_count() == n;
        let sources = sample_vertices(n);
        debug!(n, samples = sources.len(), connected, "estimating diameter by sampling");

        let mut best = Farthest::default();
        for &s in &sources {
            let state = bfs.run(graph, s, None)?;
            if connected {
                best.update_from(state, s, sources.iter().copied());
            } else {
                best.update_from(state, s, graph.vertices());
            }
        }

        let exact = sources.len() == n as usize;
        Ok(best.into_result(exact, connected, sources.len()))
    }
}

#[derive(Default)]
struct Farthest {
    distance: u64,
    endpoints: Option<(Node, Node)>,
}

impl Farthest {
    fn update_from<I>(&mut self, state: &SearchState, source: Node, dests: I)
    where
        I: IntoIterator<Item = Node>,
    {
        for v in dests {
            if let Some(d) = state.depth_of(v)
                && d as u64 > self.distance
            {
                self.distance = d as u64;
                self.endpoints = Some((source, v));
            }
        }
    }

    fn into_result(self, exact: bool, connected: bool, sources: usize) -> DiameterResult {
        DiameterResult {
            diameter: self.distance,
            endpoints: self.endpoints,
            exact,
            connected,
            sources,
        }
    }
}

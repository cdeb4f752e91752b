use itertools::Itertools;
use tracing::debug;

use super::*;

/// Graphs up to this many nodes get an exact diameter in the statistics
pub const STATISTICS_EXACT_THRESHOLD: NumNodes = 100;

/// Summary of degrees, components and diameter of a graph
#[derive(Clone, Debug)]
pub struct GraphStatistics {
    pub nodes: NumNodes,
    pub edges: NumEdges,
    pub min_degree: NumNodes,
    pub max_degree: NumNodes,
    pub mean_degree: f64,
    pub median_degree: f64,
    /// Sizes in rank order (largest first)
    pub component_sizes: Vec<NumNodes>,
    pub diameter: DiameterResult,
}

impl GraphStatistics {
    /// Fails with [`GraphError::EmptyGraph`] if the graph has no nodes
    pub fn compute<G: AdjacencyList + GraphEdgeOrder>(graph: &G) -> Result<Self> {
        if graph.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let degrees = graph.degrees().collect_vec();
        let components = graph.connected_components();
        let diameter = DiameterEstimator::new()
            .exact_threshold(STATISTICS_EXACT_THRESHOLD)
            .estimate(graph)?;

        let stats = Self {
            nodes: graph.number_of_nodes(),
            edges: graph.number_of_edges(),
            min_degree: degrees.iter().copied().min().unwrap_or(0),
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            mean_degree: degrees.iter().map(|&d| d as f64).sum::<f64>() / degrees.len() as f64,
            median_degree: median(degrees),
            component_sizes: components.components().iter().map(|c| c.size()).collect(),
            diameter,
        };

        debug!(
            nodes = stats.nodes,
            edges = stats.edges,
            components = stats.component_sizes.len(),
            "statistics computed"
        );
        Ok(stats)
    }

    pub fn number_of_components(&self) -> usize {
        self.component_sizes.len()
    }

    pub fn is_connected(&self) -> bool {
        self.component_sizes.len() == 1
    }

    pub fn largest_component(&self) -> NumNodes {
        self.component_sizes.first().copied().unwrap_or(0)
    }

    pub fn smallest_component(&self) -> NumNodes {
        self.component_sizes.last().copied().unwrap_or(0)
    }
}

/// Median of the values; mean of the two central values for even counts
fn median(mut values: Vec<NumNodes>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] as f64 + values[mid] as f64) / 2.0
    } else {
        values[mid] as f64
    }
}

/// Parents of some query nodes in a BFS or DFS tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentProbe {
    pub kind: SearchKind,
    pub start: Node,
    /// `(query, parent)`; `None` for the root or unreached nodes
    pub parents: Vec<(Node, Option<Node>)>,
}

/// Fixed queries that compare BFS and DFS trees and sample a few distances.
/// Queries naming nodes outside the graph are skipped.
#[derive(Clone, Debug, Default)]
pub struct CaseStudy {
    pub probes: Vec<ParentProbe>,
    pub distances: Vec<(Node, Node, Distance)>,
}

impl CaseStudy {
    /// Starts `1, 2, 3`, queries `10, 20, 30` and the pairs among the queries (1-based)
    pub fn standard<G: AdjacencyList>(graph: &G) -> Self {
        Self::run(graph, &[0, 1, 2], &[9, 19, 29], &[(9, 19), (9, 29), (19, 29)])
    }

    pub fn run<G: AdjacencyList>(
        graph: &G,
        starts: &[Node],
        queries: &[Node],
        pairs: &[(Node, Node)],
    ) -> Self {
        let n = graph.number_of_nodes();
        let queries = queries.iter().copied().filter(|&q| q < n).collect_vec();
        let mut study = Self::default();

        for &start in starts.iter().filter(|&&s| s < n) {
            for kind in [SearchKind::Bfs, SearchKind::Dfs] {
                let Ok(state) = graph.search(kind, start) else {
                    continue;
                };
                study.probes.push(ParentProbe {
                    kind,
                    start,
                    parents: queries.iter().map(|&q| (q, state.parent_of(q))).collect(),
                });
            }
        }

        let mut engine = DistanceEngine::new(n);
        for &(u, v) in pairs {
            if let Ok(d) = engine.distance_between(graph, u, v) {
                study.distances.push((u, v, d));
            }
        }

        study
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn path_statistics() {
        let graph = AdjArrayUndir::from_edges(5, path_edges(5));
        let stats = GraphStatistics::compute(&graph).unwrap();

        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.edges, 4);
        assert_eq!((stats.min_degree, stats.max_degree), (1, 2));
        assert!((stats.mean_degree - 1.6).abs() < 1e-12);
        assert_eq!(stats.median_degree, 2.0);
        assert!(stats.is_connected());
        assert_eq!(stats.diameter.diameter, 4);
        assert!(stats.diameter.exact);
    }

    #[test]
    fn disconnected_statistics() {
        // {0,1,2,3} as a star, {4,5}, {6}
        let graph = AdjMatrixUndir::from_edges(7, [(0, 1), (0, 2), (0, 3), (4, 5)]);
        let stats = GraphStatistics::compute(&graph).unwrap();

        assert_eq!(stats.component_sizes, vec![4, 2, 1]);
        assert_eq!(stats.largest_component(), 4);
        assert_eq!(stats.smallest_component(), 1);
        assert!(!stats.is_connected());
        assert_eq!(stats.median_degree, 1.0);
        assert_eq!(stats.diameter.diameter, 2);
        assert!(!stats.diameter.connected);

        assert!(GraphStatistics::compute(&AdjArrayUndir::new(0)).is_err());
    }

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median(vec![]), 0.0);
        assert_eq!(median(vec![3, 1, 2]), 2.0);
        assert_eq!(median(vec![4, 1, 2, 3]), 2.5);
    }

    #[test]
    fn case_study_skips_missing_nodes() {
        let graph = AdjArrayUndir::from_edges(25, path_edges(25));
        let study = CaseStudy::standard(&graph);

        // 3 starts x 2 searches, only queries 10 and 20 exist
        assert_eq!(study.probes.len(), 6);
        assert!(study.probes.iter().all(|p| p.parents.len() == 2));
        assert_eq!(study.probes[0].parents[0], (9, Some(8)));
        assert_eq!(study.probes[0].kind, SearchKind::Bfs);

        assert_eq!(study.distances, vec![(9, 19, Distance::Finite(10))]);
    }
}

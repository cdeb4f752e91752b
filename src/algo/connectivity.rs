use itertools::Itertools;
use tracing::debug;

use super::*;

/// A connected component. Members are sorted ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    /// Rank of the component, starting at 1 for the largest
    pub id: usize,
    pub members: Vec<Node>,
}

impl Component {
    pub fn size(&self) -> NumNodes {
        self.members.len() as NumNodes
    }

    /// Smallest member; components are never empty
    pub fn min_member(&self) -> Node {
        self.members[0]
    }
}

/// All connected components of a graph, sorted by size (descending) and
/// then by smallest member (ascending). Ids reflect that rank.
#[derive(Clone, Debug)]
pub struct ComponentSet {
    components: Vec<Component>,
    component_of: Vec<usize>,
}

impl ComponentSet {
    fn from_unsorted(n: NumNodes, mut components: Vec<Vec<Node>>) -> Self {
        for members in components.iter_mut() {
            members.sort_unstable();
        }
        components.sort_by(|a, b| b.len().cmp(&a.len()).then(a[0].cmp(&b[0])));

        let mut component_of = vec![0; n as usize];
        let components = components
            .into_iter()
            .enumerate()
            .map(|(i, members)| {
                for &u in &members {
                    component_of[u as usize] = i + 1;
                }
                Component { id: i + 1, members }
            })
            .collect_vec();

        Self {
            components,
            component_of,
        }
    }

    /// Components in rank order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the component with a given id (1-based rank)
    pub fn get(&self, id: usize) -> Option<&Component> {
        id.checked_sub(1).and_then(|i| self.components.get(i))
    }

    /// Id of the component containing `u`, or `None` if `u` is not a node of the graph
    pub fn component_of(&self, u: Node) -> Option<usize> {
        self.component_of.get(u as usize).copied()
    }

    /// Returns *true* iff both nodes exist and lie in the same component
    pub fn connected(&self, u: Node, v: Node) -> bool {
        match (self.component_of(u), self.component_of(v)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Size of the largest component (0 for the empty graph)
    pub fn largest_size(&self) -> NumNodes {
        self.components.first().map_or(0, |c| c.size())
    }

    /// Number of components consisting of a single node
    pub fn number_of_singletons(&self) -> usize {
        self.components.iter().filter(|c| c.size() == 1).count()
    }
}

/// Finds connected components by repeatedly seeding a BFS or DFS at the
/// smallest node not yet claimed by an earlier component.
///
/// # Examples
/// ```
/// use graphsearch::{prelude::*, algo::*};
///
/// // {0,1,2} and {3,4}
/// let g = AdjArrayUndir::from_edges(5, [(0, 1), (1, 2), (3, 4)]);
/// let comps = ConnectedComponents::new().search(SearchKind::Dfs).find(&g);
///
/// assert_eq!(comps.len(), 2);
/// assert_eq!(comps.components()[0].members, vec![0, 1, 2]);
/// assert!(!comps.connected(0, 3));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct ConnectedComponents {
    kind: SearchKind,
}

impl ConnectedComponents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the traversal used per seed
    pub fn search(mut self, kind: SearchKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn find<G: AdjacencyList>(&self, graph: &G) -> ComponentSet {
        let n = graph.number_of_nodes();
        let mut claimed = graph.vertex_bitset_unset();
        let mut bfs = Bfs::new(n);
        let mut dfs = Dfs::new(n);
        let mut components = Vec::new();

        for seed in graph.vertices() {
            if claimed.get_bit(seed) {
                continue;
            }

            // seed is in range, so the search cannot fail
            let state = match self.kind {
                SearchKind::Bfs => bfs.run(graph, seed, None),
                SearchKind::Dfs => dfs.run(graph, seed),
            };
            let Ok(state) = state else {
                continue;
            };

            for &u in state.order() {
                claimed.set_bit(u);
            }
            components.push(state.order().to_vec());
        }

        debug!(
            search = %self.kind,
            components = components.len(),
            "found connected components"
        );
        ComponentSet::from_unsorted(n, components)
    }
}

/// Provides component queries directly on graphs
pub trait Connectivity: AdjacencyList {
    /// Computes the connected components with BFS
    fn connected_components(&self) -> ComponentSet {
        ConnectedComponents::new().find(self)
    }

    /// Returns *true* if every node can reach every other node.
    /// The empty graph counts as connected.
    fn is_connected(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        self.bfs(0)
            .is_ok_and(|state| state.visited_count() == self.number_of_nodes())
    }
}

impl<G: AdjacencyList> Connectivity for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn two_components() {
        let graph = AdjArrayUndir::from_edges(5, [(0, 1), (1, 2), (3, 4)]);

        for kind in [SearchKind::Bfs, SearchKind::Dfs] {
            let comps = ConnectedComponents::new().search(kind).find(&graph);
            assert_eq!(
                comps.components().iter().map(|c| c.size()).collect_vec(),
                vec![3, 2]
            );
            assert_eq!(comps.component_of(4), Some(2));
            assert!(!comps.connected(0, 3));
            assert!(comps.connected(0, 2));
            assert!(!comps.connected(0, 5));
            assert_eq!(comps.component_of(5), None);
        }
    }

    #[test]
    fn ranking_by_size_then_min_member() {
        // {0} {1,5} {2,3} {4,6,7}
        let graph = AdjMatrixUndir::from_edges(8, [(1, 5), (3, 2), (4, 6), (7, 6)]);
        let comps = graph.connected_components();

        assert_eq!(
            comps.components().iter().map(|c| c.members.clone()).collect_vec(),
            vec![vec![4, 6, 7], vec![1, 5], vec![2, 3], vec![0]]
        );
        assert_eq!(
            comps.components().iter().map(|c| c.id).collect_vec(),
            vec![1, 2, 3, 4]
        );
        assert_eq!(comps.get(3).unwrap().min_member(), 2);
        assert!(comps.get(0).is_none());
        assert_eq!(comps.number_of_singletons(), 1);
        assert_eq!(comps.largest_size(), 3);
    }

    #[test]
    fn empty_and_singleton_graphs() {
        let graph = AdjArrayUndir::new(0);
        let comps = graph.connected_components();
        assert!(comps.is_empty());
        assert!(graph.is_connected());

        let graph = AdjArrayUndir::new(1);
        assert_eq!(graph.connected_components().len(), 1);
        assert!(graph.is_connected());
    }

    #[test]
    fn partition_and_equivalence() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x5eed);
        for _ in 0..30 {
            let n = rng.random_range(1..60);
            let graph = AdjArrayUndir::from_edges(n, random_edges(rng, n, 0.04));
            let comps = graph.connected_components();

            let total: NumNodes = comps.components().iter().map(|c| c.size()).sum();
            assert_eq!(total, n);
            assert_eq!(
                comps
                    .components()
                    .iter()
                    .flat_map(|c| c.members.iter().copied())
                    .sorted()
                    .collect_vec(),
                graph.vertices().collect_vec()
            );

            for (a, b) in comps.components().iter().tuple_windows() {
                assert!(
                    a.size() > b.size() || (a.size() == b.size() && a.min_member() < b.min_member())
                );
            }

            assert_eq!(graph.is_connected(), comps.len() == 1);

            for _ in 0..20 {
                let (u, v, w) = (
                    rng.random_range(0..n),
                    rng.random_range(0..n),
                    rng.random_range(0..n),
                );
                assert!(comps.connected(u, u));
                assert_eq!(comps.connected(u, v), comps.connected(v, u));
                if comps.connected(u, v) && comps.connected(v, w) {
                    assert!(comps.connected(u, w));
                }
                let reachable = graph.bfs(u).unwrap().did_visit(v);
                assert_eq!(comps.connected(u, v), reachable);
            }
        }
    }
}

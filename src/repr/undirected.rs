use crate::repr::macros::impl_common_graph_ops;

use super::*;

/// An unweighted undirected graph, generic over how each neighborhood is stored
#[derive(Clone)]
pub struct UndirectedGraph<Nbs: Neighborhood> {
    nbs: Vec<Nbs>,
    num_edges: NumEdges,
}

/// Representation using an Adjacency-Array (sorted adjacency lists)
pub type AdjArrayUndir = UndirectedGraph<ArrNeighborhood>;

/// Representation using an Adjacency-Matrix (one bitset row per node)
pub type AdjMatrixUndir = UndirectedGraph<BitNeighborhood>;

impl_common_graph_ops!(UndirectedGraph<Nbs: Neighborhood>);

impl<Nbs: Neighborhood> AdjacencyList for UndirectedGraph<Nbs> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.nbs[u as usize].neighbors()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.nbs[u as usize].num_of_neighbors()
    }
}

impl<Nbs: Neighborhood> AdjacencyTest for UndirectedGraph<Nbs> {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.nbs[u as usize].has_neighbor(v)
    }
}

impl<Nbs: Neighborhood> GraphEdgeEditing for UndirectedGraph<Nbs> {
    fn try_add_edge(&mut self, u: Node, v: Node) -> bool {
        if self.nbs[u as usize].try_add_neighbor(v) {
            return true;
        }

        if u != v {
            let existed = self.nbs[v as usize].try_add_neighbor(u);
            debug_assert!(!existed);
        }
        self.num_edges += 1;
        false
    }
}

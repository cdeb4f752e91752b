use crate::repr::macros::impl_common_graph_ops;

use super::*;

/// An undirected graph with `f64` edge weights.
/// It doubles as an unweighted graph, so BFS/DFS run on it unchanged.
#[derive(Clone)]
pub struct WeightedGraph<Nbs: WeightedNeighborhood> {
    nbs: Vec<Nbs>,
    num_edges: NumEdges,
}

/// Weighted adjacency lists sorted by neighbor
pub type WeightedAdjArray = WeightedGraph<WeightedArrNeighborhood>;

/// Dense `n x n` matrix of optional weights
pub type WeightedAdjMatrix = WeightedGraph<WeightedRowNeighborhood>;

impl_common_graph_ops!(WeightedGraph<Nbs: WeightedNeighborhood>);

impl<Nbs: WeightedNeighborhood> AdjacencyList for WeightedGraph<Nbs> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.nbs[u as usize].weighted_neighbors().map(|(v, _)| v)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.nbs[u as usize].num_of_neighbors()
    }
}

impl<Nbs: WeightedNeighborhood> WeightedAdjacencyList for WeightedGraph<Nbs> {
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.nbs[u as usize].weighted_neighbors()
    }

    fn edge_weight(&self, u: Node, v: Node) -> Option<Weight> {
        self.nbs[u as usize].weight_of(v)
    }
}

impl<Nbs: WeightedNeighborhood> AdjacencyTest for WeightedGraph<Nbs> {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.nbs[u as usize].weight_of(v).is_some()
    }
}

impl<Nbs: WeightedNeighborhood> WeightedGraphEdgeEditing for WeightedGraph<Nbs> {
    fn try_add_weighted_edge(&mut self, u: Node, v: Node, weight: Weight) -> bool {
        let existed = self.nbs[u as usize].try_add_neighbor(v, weight);
        if u != v {
            self.nbs[v as usize].try_add_neighbor(u, weight);
        }
        if !existed {
            self.num_edges += 1;
        }
        existed
    }
}

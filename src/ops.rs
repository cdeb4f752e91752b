use std::ops::Range;

use crate::prelude::*;

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns a range over V.
    /// The range does not borrow `self` and may be used where mutable references are needed.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of (undirected) edges of the graph
    fn number_of_edges(&self) -> NumEdges;
}

/// The read-only contract every traversal needs from a storage backend.
///
/// Neighbors are enumerated in ascending order for all representations in this
/// crate, which makes BFS/DFS results independent of the chosen backend.
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the (open) neighborhood of a given vertex.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over the degrees of all vertices
    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.degree_of(u))
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumNodes {
        self.degrees().max().unwrap_or(0)
    }

    /// Returns the minimum degree in the graph
    fn min_degree(&self) -> NumNodes {
        self.degrees().min().unwrap_or(0)
    }

    /// Returns an iterator over edges incident to a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the edge {u,v} exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool;
}

/// Weighted variant of [`AdjacencyList`]. Only Dijkstra relies on it.
pub trait WeightedAdjacencyList: AdjacencyList {
    /// Returns an iterator over `(neighbor, weight)` pairs in ascending neighbor order.
    /// ** Panics if `u >= n` **
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_;

    /// Returns the weight of edge {u,v} or `None` if it does not exist.
    /// ** Panics if `u >= n || v >= n` **
    fn edge_weight(&self, u: Node, v: Node) -> Option<Weight>;

    /// Returns an iterator over all weighted edges.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn weighted_edges(&self, only_normalized: bool) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.vertices().flat_map(move |u| {
            self.weighted_neighbors_of(u)
                .filter(move |&(v, _)| !only_normalized || u <= v)
                .map(move |(v, w)| WeightedEdge::new(u, v, w))
        })
    }

    /// Returns the first edge with a negative (or NaN) weight, if any
    fn find_invalid_weight(&self) -> Option<WeightedEdge> {
        self.weighted_edges(true)
            .find(|e| e.weight.is_nan() || e.weight < 0.0)
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to insert edges while a graph is being built.
/// No algorithm in this crate mutates a graph after construction.
pub trait GraphEdgeEditing: GraphNew {
    /// Adds the edge {u,v} to the graph.
    /// Returns *true* exactly if the edge was present previously.
    /// ** Panics if `u >= n || v >= n` **
    fn try_add_edge(&mut self, u: Node, v: Node) -> bool;

    /// Adds all edges in the collection, silently merging duplicates
    fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
    {
        for Edge(u, v) in edges.into_iter().map(|e| e.into()) {
            self.try_add_edge(u, v);
        }
    }
}

/// Provides functions to insert weighted edges while a graph is being built.
pub trait WeightedGraphEdgeEditing: GraphNew {
    /// Adds the edge {u,v} with a given weight.
    /// If the edge already exists, the smaller weight is kept.
    /// Returns *true* exactly if the edge was present previously.
    /// ** Panics if `u >= n || v >= n` **
    fn try_add_weighted_edge(&mut self, u: Node, v: Node, weight: Weight) -> bool;

    /// Adds all edges in the collection
    fn add_weighted_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator,
        I::Item: Into<WeightedEdge>,
    {
        for e in edges.into_iter().map(|e| e.into()) {
            self.try_add_weighted_edge(e.u, e.v, e.weight);
        }
    }
}

/// A super trait for creating a graph from scratch from a set of edges and a number of nodes
pub trait GraphFromScratch {
    /// Create a graph from a number of nodes and an iterator over Edges
    fn from_edges<I>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Edge>;
}

impl<G: GraphEdgeEditing> GraphFromScratch for G {
    fn from_edges<I>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
    {
        let mut graph = Self::new(n);
        graph.add_edges(edges);
        graph
    }
}

/// Weighted counterpart of [`GraphFromScratch`]
pub trait WeightedGraphFromScratch {
    /// Create a graph from a number of nodes and an iterator over weighted edges
    fn from_weighted_edges<I>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<WeightedEdge>;
}

impl<G: WeightedGraphEdgeEditing> WeightedGraphFromScratch for G {
    fn from_weighted_edges<I>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<WeightedEdge>,
    {
        let mut graph = Self::new(n);
        graph.add_weighted_edges(edges);
        graph
    }
}

/// Rough heap usage of a representation, used to compare backends
pub trait MemoryFootprint {
    /// Returns the estimated number of bytes the adjacency structure occupies
    fn estimated_memory_bytes(&self) -> usize;
}

use std::fmt::{Debug, Display};

use crate::node::{Node, Weight};

/// An edge is defined by two nodes/endpoints.
/// All graphs in this crate are undirected, so `Edge(u, v)` and `Edge(v, u)`
/// describe the same edge (we normalize edges often).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// Number of (undirected) edges
pub type NumEdges = u64;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }

    /// Attaches a weight to the edge
    pub fn with_weight(self, weight: Weight) -> WeightedEdge {
        WeightedEdge {
            u: self.0,
            v: self.1,
            weight,
        }
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

impl From<WeightedEdge> for Edge {
    fn from(value: WeightedEdge) -> Self {
        Edge(value.u, value.v)
    }
}

impl From<&WeightedEdge> for Edge {
    fn from(value: &WeightedEdge) -> Self {
        Edge(value.u, value.v)
    }
}

/// An edge with a weight attached. Only Dijkstra looks at the weight.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct WeightedEdge {
    pub u: Node,
    pub v: Node,
    pub weight: Weight,
}

impl WeightedEdge {
    pub fn new(u: Node, v: Node, weight: Weight) -> Self {
        Self { u, v, weight }
    }

    /// Drops the weight
    pub fn edge(&self) -> Edge {
        Edge(self.u, self.v)
    }
}

impl Display for WeightedEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{};{})", self.u, self.v, self.weight)
    }
}

impl From<(Node, Node, Weight)> for WeightedEdge {
    fn from(value: (Node, Node, Weight)) -> Self {
        WeightedEdge::new(value.0, value.1, value.2)
    }
}

impl From<&(Node, Node, Weight)> for WeightedEdge {
    fn from(value: &(Node, Node, Weight)) -> Self {
        WeightedEdge::new(value.0, value.1, value.2)
    }
}

impl From<&WeightedEdge> for WeightedEdge {
    fn from(value: &WeightedEdge) -> Self {
        *value
    }
}

/// Unweighted edges have unit weight when fed to a weighted graph
impl From<Edge> for WeightedEdge {
    fn from(value: Edge) -> Self {
        value.with_weight(1.0)
    }
}

impl From<(Node, Node)> for WeightedEdge {
    fn from(value: (Node, Node)) -> Self {
        WeightedEdge::new(value.0, value.1, 1.0)
    }
}

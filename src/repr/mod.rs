use std::{fmt::Display, str::FromStr};

use crate::{error::GraphError, prelude::*};

mod neighborhood;
mod undirected;
mod weighted;

pub use neighborhood::*;
pub use undirected::*;
pub use weighted::*;

/// Storage backend requested by the user.
/// `Both` runs an operation on the matrix and the list backend one after another.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Representation {
    Matrix,
    #[default]
    List,
    Both,
}

impl Representation {
    /// The concrete backends covered by this choice, in execution order
    pub fn backends(self) -> &'static [Representation] {
        match self {
            Representation::Matrix => &[Representation::Matrix],
            Representation::List => &[Representation::List],
            Representation::Both => &[Representation::Matrix, Representation::List],
        }
    }
}

impl Display for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Representation::Matrix => write!(f, "adjacency matrix"),
            Representation::List => write!(f, "adjacency list"),
            Representation::Both => write!(f, "both"),
        }
    }
}

impl FromStr for Representation {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "matrix" | "matriz" => Ok(Representation::Matrix),
            "list" | "lista" => Ok(Representation::List),
            "both" | "ambos" => Ok(Representation::Both),
            _ => Err(GraphError::Parse(format!(
                "unknown representation '{s}': expected matrix, list or both"
            ))),
        }
    }
}

pub(crate) mod macros {
    /// Implements the order traits, `GraphNew` and `MemoryFootprint` for a graph struct
    /// `$struct<Nbs>` with fields `nbs: Vec<Nbs>` and `num_edges: NumEdges`.
    macro_rules! impl_common_graph_ops {
        ($struct:ident<$generic:ident : $bound:ident>) => {
            impl<$generic: $bound> GraphNodeOrder for $struct<$generic> {
                fn number_of_nodes(&self) -> NumNodes {
                    self.nbs.len() as NumNodes
                }
            }

            impl<$generic: $bound> GraphEdgeOrder for $struct<$generic> {
                fn number_of_edges(&self) -> NumEdges {
                    self.num_edges
                }
            }

            impl<$generic: $bound> GraphNew for $struct<$generic> {
                fn new(n: NumNodes) -> Self {
                    Self {
                        nbs: vec![$generic::new(n); n as usize],
                        num_edges: 0,
                    }
                }
            }

            impl<$generic: $bound> MemoryFootprint for $struct<$generic> {
                fn estimated_memory_bytes(&self) -> usize {
                    std::mem::size_of::<Self>()
                        + self.nbs.capacity() * std::mem::size_of::<$generic>()
                        + self.nbs.iter().map(|nb| nb.heap_bytes()).sum::<usize>()
                }
            }
        };
    }

    pub(super) use impl_common_graph_ops;
}

#[cfg(test)]
use crate::testing::test_graph_ops;

#[cfg(test)]
test_graph_ops!(test_adj_array_undir, AdjArrayUndir, from_edges);
#[cfg(test)]
test_graph_ops!(test_adj_matrix_undir, AdjMatrixUndir, from_edges);
#[cfg(test)]
test_graph_ops!(test_weighted_adj_array, WeightedAdjArray, from_weighted_edges);
#[cfg(test)]
test_graph_ops!(test_weighted_adj_matrix, WeightedAdjMatrix, from_weighted_edges);

/*!
`graphsearch` is a library and command line tool for searching **undirected** graphs
given as edge lists.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
Everything that faces the user (files, command line arguments, reports) uses **1-based** ids;
see [`node::from_external`] and [`node::to_external`].
For **edges**, we use a simple tuple-struct `Edge(Node, Node)` and `WeightedEdge` if a weight is attached.

### Available Representations

See the [`repr`] module for the storage backends:

- [`AdjMatrixUndir`](crate::repr::AdjMatrixUndir): one bitset row per vertex,
- [`AdjArrayUndir`](crate::repr::AdjArrayUndir): sorted neighbor vectors,
- [`WeightedAdjMatrix`](crate::repr::WeightedAdjMatrix) and
  [`WeightedAdjArray`](crate::repr::WeightedAdjArray) for Dijkstra.

All algorithms are written against the traits in [`ops`] and never see the concrete backend.

# Design

All algorithms are provided as configurable structs that one can alter to their needs using the
*Builder* / *Setter* pattern before calling the configured algorithm on a provided graph
(e.g. [`DiameterEstimator`](crate::algo::DiameterEstimator) or
[`Dijkstra`](crate::algo::Dijkstra) with a pluggable priority strategy).
The most common functionality is also implemented via traits on the graph itself:

```
use graphsearch::{prelude::*, algo::*};

let g = AdjArrayUndir::from_edges(6, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
let state = g.bfs(0).unwrap();
assert_eq!(state.depth_of(3), Some(3));
assert!(g.is_connected());
```

# Usage

- [`prelude`] includes definitions for nodes, edges, basic graph operations, and all representations,
- [`algo`] includes BFS, DFS, connected components, distances/diameter, Dijkstra and statistics,
- [`io`] reads edge lists and writes them back or as text dumps,
- [`report`] renders algorithm results as text,
- [`gens`] generates random graphs, [`bench`] compares backends and strategies.

In most use-cases, `use graphsearch::{prelude::*, algo::*};` suffices for your needs.
*/

pub mod algo;
pub mod bench;
pub mod edge;
pub mod error;
pub mod gens;
pub mod io;
pub mod logging;
pub mod node;
pub mod ops;
pub mod repr;
pub mod report;
#[cfg(test)]
pub(crate) mod testing;

/// `graphsearch::prelude` includes definitions for nodes and edges, all basic graph operation traits as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, node::*, ops::*, repr::*};
}

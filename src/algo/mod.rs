/*!
# Graph Algorithms

Searches and shortest paths built on top of the capability traits in [`crate::ops`].
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use graphsearch::algo::*;
```
and gain access to BFS/DFS, connected components, distances and diameter estimation,
Dijkstra with pluggable priority strategies and graph statistics.

Algorithms only *read* graphs. Each runner owns its own buffers, so a graph may be
shared by any number of runners.
*/

mod connectivity;
mod dijkstra;
mod distances;
mod statistics;
mod traversal;

use crate::{
    error::{GraphError, Result},
    prelude::*,
};

pub use connectivity::*;
pub use dijkstra::*;
pub use distances::*;
pub use statistics::*;
pub use traversal::*;

/*!
# Substructure Generators

Deterministic edge sets (paths and cycles) over consecutive nodes, and methods to
add such substructures to a graph under construction.

# Example

```rust
use graphsearch::{prelude::*, gens::*};

let mut g = AdjArrayUndir::new(6);
g.connect_path([0, 1, 2]);
g.connect_cycle([3, 4, 5]);

assert_eq!(
    g.edges(true).collect::<Vec<Edge>>(),
    vec![Edge(0, 1), Edge(1, 2), Edge(3, 4), Edge(3, 5), Edge(4, 5)]
);
assert_eq!(path(3), vec![Edge(0, 1), Edge(1, 2)]);
```
*/

use itertools::Itertools;

use super::*;

/// Edges of the path `0 - 1 - ... - (n-1)`
pub fn path(n: NumNodes) -> Vec<Edge> {
    (0..n).tuple_windows().map(|(u, v)| Edge(u, v)).collect()
}

/// Edges of the cycle `0 - 1 - ... - (n-1) - 0`; a plain path for `n < 3`
pub fn cycle(n: NumNodes) -> Vec<Edge> {
    let mut edges = path(n);
    if n >= 3 {
        edges.push(Edge(n - 1, 0));
    }
    edges
}

/// Trait for creating additional **substructures** (paths, cycles)
/// inside a graph that is still being built.
pub trait GeneratorSubstructures {
    /// Connects the given nodes in order with a **simple path**.
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Node>;

    /// Connects the given nodes with a **cycle**: consecutive nodes are
    /// connected and the last node is connected back to the first.
    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Node>;
}

impl<G> GeneratorSubstructures for G
where
    G: GraphEdgeEditing,
{
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Node>,
    {
        for (u, v) in nodes_on_path.into_iter().tuple_windows() {
            self.try_add_edge(u, v);
        }
    }

    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Node>,
    {
        let mut iter = nodes_in_cycle.into_iter();

        if let Some(first) = iter.next() {
            let mut prev = first;
            for cur in iter {
                self.try_add_edge(prev, cur);
                prev = cur;
            }

            self.try_add_edge(prev, first);
        }
    }
}

use std::mem::size_of;

use super::*;

/// Trait for methods on the Neighborhood of a specified Node
pub trait Neighborhood: Clone {
    /// Creates an empty neighborhood in a graph with `n` nodes
    fn new(n: NumNodes) -> Self;

    /// Returns the number of neighbors in the Neighborhood
    fn num_of_neighbors(&self) -> NumNodes;

    /// Returns an iterator over all neighbors in ascending order
    fn neighbors(&self) -> impl Iterator<Item = Node> + '_;

    /// Returns *true* if `v` is in the Neighborhood
    /// ** Might panic if `v >= n` **
    fn has_neighbor(&self, v: Node) -> bool;

    /// Tries to add a neighbor to the Neighborhood.
    /// Returns *true* if the node was in the Neighborhood before.
    /// ** Might panic if `u >= n` **
    fn try_add_neighbor(&mut self, u: Node) -> bool;

    /// Heap bytes used by this neighborhood
    fn heap_bytes(&self) -> usize;
}

/// Basic Neighborhood-Impl. using a sorted `Vec<Node>` (adjacency list)
#[derive(Default, Clone, Debug)]
pub struct ArrNeighborhood(pub Vec<Node>);

impl Neighborhood for ArrNeighborhood {
    fn new(_n: NumNodes) -> Self {
        Self(Default::default())
    }

    fn num_of_neighbors(&self) -> NumNodes {
        self.0.len() as NumNodes
    }

    fn neighbors(&self) -> impl Iterator<Item = Node> + '_ {
        self.0.iter().copied()
    }

    fn has_neighbor(&self, v: Node) -> bool {
        self.0.binary_search(&v).is_ok()
    }

    fn try_add_neighbor(&mut self, u: Node) -> bool {
        match self.0.binary_search(&u) {
            Ok(_) => true,
            Err(pos) => {
                self.0.insert(pos, u);
                false
            }
        }
    }

    fn heap_bytes(&self) -> usize {
        self.0.capacity() * size_of::<Node>()
    }
}

/// A Neighborhood represented by a NodeBitSet (one row of an adjacency matrix)
#[derive(Clone)]
pub struct BitNeighborhood {
    bits: NodeBitSet,
    n: NumNodes,
}

impl Neighborhood for BitNeighborhood {
    fn new(n: NumNodes) -> Self {
        Self {
            bits: NodeBitSet::new(n),
            n,
        }
    }

    fn num_of_neighbors(&self) -> NumNodes {
        self.bits.cardinality()
    }

    fn neighbors(&self) -> impl Iterator<Item = Node> + '_ {
        self.bits.iter_set_bits()
    }

    fn has_neighbor(&self, u: Node) -> bool {
        self.bits.get_bit(u)
    }

    fn try_add_neighbor(&mut self, u: Node) -> bool {
        self.bits.set_bit(u)
    }

    fn heap_bytes(&self) -> usize {
        // bitsets are stored in 64-bit blocks
        (self.n as usize).div_ceil(64) * 8
    }
}

/// Trait for methods on weighted neighborhoods
pub trait WeightedNeighborhood: Clone {
    /// Creates an empty neighborhood in a graph with `n` nodes
    fn new(n: NumNodes) -> Self;

    /// Returns the number of neighbors in the Neighborhood
    fn num_of_neighbors(&self) -> NumNodes;

    /// Returns an iterator over `(neighbor, weight)` in ascending neighbor order
    fn weighted_neighbors(&self) -> impl Iterator<Item = (Node, Weight)> + '_;

    /// Returns the weight towards `v` if `v` is a neighbor
    fn weight_of(&self, v: Node) -> Option<Weight>;

    /// Adds a neighbor with a given weight. If the neighbor already exists, the smaller
    /// weight is kept. Returns *true* if the node was in the Neighborhood before.
    fn try_add_neighbor(&mut self, u: Node, weight: Weight) -> bool;

    /// Heap bytes used by this neighborhood
    fn heap_bytes(&self) -> usize;
}

/// Weighted adjacency list entry, sorted by neighbor
#[derive(Default, Clone, Debug)]
pub struct WeightedArrNeighborhood(pub Vec<(Node, Weight)>);

impl WeightedNeighborhood for WeightedArrNeighborhood {
    fn new(_n: NumNodes) -> Self {
        Self(Default::default())
    }

    fn num_of_neighbors(&self) -> NumNodes {
        self.0.len() as NumNodes
    }

    fn weighted_neighbors(&self) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.0.iter().copied()
    }

    fn weight_of(&self, v: Node) -> Option<Weight> {
        self.0
            .binary_search_by_key(&v, |&(u, _)| u)
            .ok()
            .map(|pos| self.0[pos].1)
    }

    fn try_add_neighbor(&mut self, u: Node, weight: Weight) -> bool {
        match self.0.binary_search_by_key(&u, |&(v, _)| v) {
            Ok(pos) => {
                let entry = &mut self.0[pos].1;
                *entry = entry.min(weight);
                true
            }
            Err(pos) => {
                self.0.insert(pos, (u, weight));
                false
            }
        }
    }

    fn heap_bytes(&self) -> usize {
        self.0.capacity() * size_of::<(Node, Weight)>()
    }
}

/// Dense weighted row: `row[v] = Some(w)` iff edge {u,v} exists with weight `w`
#[derive(Clone, Debug)]
pub struct WeightedRowNeighborhood {
    row: Vec<Option<Weight>>,
    degree: NumNodes,
}

impl WeightedNeighborhood for WeightedRowNeighborhood {
    fn new(n: NumNodes) -> Self {
        Self {
            row: vec![None; n as usize],
            degree: 0,
        }
    }

    fn num_of_neighbors(&self) -> NumNodes {
        self.degree
    }

    fn weighted_neighbors(&self) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.row
            .iter()
            .enumerate()
            .filter_map(|(v, w)| w.map(|w| (v as Node, w)))
    }

    fn weight_of(&self, v: Node) -> Option<Weight> {
        self.row[v as usize]
    }

    fn try_add_neighbor(&mut self, u: Node, weight: Weight) -> bool {
        match &mut self.row[u as usize] {
            Some(w) => {
                *w = w.min(weight);
                true
            }
            slot => {
                *slot = Some(weight);
                self.degree += 1;
                false
            }
        }
    }

    fn heap_bytes(&self) -> usize {
        self.row.capacity() * size_of::<Option<Weight>>()
    }
}

/*!
# Node Representation

We choose `Node = u32` as graphs handled here stay well below `2^32` vertices.
Internally, nodes are numbered `0` to `n - 1`. Every value that crosses the
user boundary (CLI arguments, reports, files) is **1-based** and has to be
converted with [`from_external`] / [`to_external`].
*/

use stream_bitset::bitset::BitSetImpl;

use crate::error::{GraphError, Result};

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// Edge weights as used by Dijkstra; BFS/DFS ignore them
pub type Weight = f64;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// Converts a 1-based (external) vertex id into an internal node.
///
/// Fails with [`GraphError::InvalidVertex`] if `id` is not in `[1, n]`.
///
/// # Examples
/// ```
/// use graphsearch::node::*;
///
/// assert_eq!(from_external(1, 5).unwrap(), 0);
/// assert!(from_external(0, 5).is_err());
/// assert!(from_external(6, 5).is_err());
/// ```
pub fn from_external(id: u64, n: NumNodes) -> Result<Node> {
    if id == 0 || id > n as u64 {
        return Err(GraphError::InvalidVertex { vertex: id, n });
    }
    Ok((id - 1) as Node)
}

/// Converts an internal node into its 1-based (external) id
pub const fn to_external(u: Node) -> u64 {
    u as u64 + 1
}

/// Verifies that an internal node lies in `0..n`.
/// The error reports the vertex in 1-based terms.
pub fn check_node(u: Node, n: NumNodes) -> Result<Node> {
    if u < n {
        Ok(u)
    } else {
        Err(GraphError::InvalidVertex {
            vertex: to_external(u),
            n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_round_trip_bounds() {
        for n in [1 as NumNodes, 2, 17] {
            for id in 1..=n as u64 {
                let u = from_external(id, n).unwrap();
                assert_eq!(to_external(u), id);
                assert!(check_node(u, n).is_ok());
            }

            assert!(matches!(
                from_external(n as u64 + 1, n),
                Err(GraphError::InvalidVertex { vertex, .. }) if vertex == n as u64 + 1
            ));
            assert!(check_node(n, n).is_err());
        }
    }
}

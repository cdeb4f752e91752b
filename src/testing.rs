//! Fixtures and brute-force references shared by the unit tests

use std::collections::VecDeque;
use std::ops::Range;

use rand::Rng;

use crate::prelude::*;

/// Edges of the path `0 - 1 - ... - (n-1)`
pub fn path_edges(n: NumNodes) -> Vec<(Node, Node)> {
    (1..n).map(|v| (v - 1, v)).collect()
}

/// Edges of the cycle `0 - 1 - ... - (n-1) - 0`
pub fn cycle_edges(n: NumNodes) -> Vec<(Node, Node)> {
    let mut edges = path_edges(n);
    edges.push((n - 1, 0));
    edges
}

/// Every pair `u < v` independently with probability `p`
pub fn random_edges<R: Rng>(rng: &mut R, n: NumNodes, p: f64) -> Vec<(Node, Node)> {
    let mut edges = Vec::new();
    for u in 0..n {
        for v in u + 1..n {
            if rng.random_bool(p) {
                edges.push((u, v));
            }
        }
    }
    edges
}

pub fn random_weighted_edges<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    p: f64,
    weights: Range<Weight>,
) -> Vec<WeightedEdge> {
    random_edges(rng, n, p)
        .into_iter()
        .map(|(u, v)| WeightedEdge::new(u, v, rng.random_range(weights.clone())))
        .collect()
}

/// Hop distances from `source` computed on an explicit adjacency matrix
pub fn brute_force_distances<G: AdjacencyTest>(graph: &G, source: Node) -> Vec<Option<u64>> {
    let n = graph.number_of_nodes();
    let mut dist = vec![None; n as usize];
    dist[source as usize] = Some(0);

    let mut queue = VecDeque::from([source]);
    while let Some(u) = queue.pop_front() {
        for v in 0..n {
            if dist[v as usize].is_none() && graph.has_edge(u, v) {
                dist[v as usize] = dist[u as usize].map(|d| d + 1);
                queue.push_back(v);
            }
        }
    }
    dist
}

/// Checks a backend against a plain adjacency matrix built from random edges
macro_rules! test_graph_ops {
    ($env:ident, $graph:ty, $from:ident) => {
        #[cfg(test)]
        mod $env {
            use crate::{prelude::*, testing::*};
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            #[test]
            fn graph_new() {
                for n in 0..20 {
                    let graph = <$graph>::new(n);
                    assert_eq!(graph.number_of_nodes(), n);
                    assert_eq!(graph.number_of_edges(), 0);
                    assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
                }
            }

            #[test]
            fn adjacency_matches_reference() {
                let rng = &mut Pcg64Mcg::seed_from_u64(3);

                for n in [1 as NumNodes, 10, 33, 70] {
                    for p in [0.05, 0.3] {
                        let mut edges = random_edges(rng, n, p);
                        // duplicates and reversed copies must collapse
                        let extra = edges.iter().take(5).map(|&(u, v)| (v, u)).collect_vec();
                        edges.extend(extra);

                        let mut reference = vec![vec![false; n as usize]; n as usize];
                        for &(u, v) in &edges {
                            reference[u as usize][v as usize] = true;
                            reference[v as usize][u as usize] = true;
                        }

                        let graph = <$graph>::$from(n, edges.iter().copied());
                        let m = reference.iter().flatten().filter(|&&b| b).count() / 2;
                        assert_eq!(graph.number_of_edges() as usize, m);

                        for u in graph.vertices() {
                            let expected = (0..n).filter(|&v| reference[u as usize][v as usize]).collect_vec();
                            assert_eq!(graph.neighbors_of(u).collect_vec(), expected);
                            assert_eq!(graph.degree_of(u) as usize, expected.len());

                            let v = rng.random_range(0..n);
                            assert_eq!(graph.has_edge(u, v), reference[u as usize][v as usize]);
                        }
                    }
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;

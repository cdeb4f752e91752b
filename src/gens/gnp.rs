use std::ops::Range;

use rand_distr::{Distribution, Geometric};

use super::*;

/// A G(n, p) graph can be defined by either a probability or the average degree which is more
/// common in practice
#[derive(Debug, Copy, Clone, Default)]
enum GnpType {
    /// No value has been set yet
    #[default]
    NotSet,
    /// Direct probability value
    Prob(f64),
    /// Average degree of a node
    AvgDeg(f64),
}

/// `G(n,p)` graphs contain every possible edge `{u, v}` with `u != v` independently with
/// probability `p`.
///
/// Instead of flipping a coin per pair, the generator jumps over the `n(n-1)/2` pair
/// indices with geometrically distributed gaps, so the running time is linear in the
/// number of produced edges.
///
/// # Examples
/// ```
/// use graphsearch::{prelude::*, gens::*};
/// use rand::SeedableRng;
/// use rand_pcg::Pcg64Mcg;
///
/// let rng = &mut Pcg64Mcg::seed_from_u64(1);
/// let edges = Gnp::new().nodes(10).prob(1.0).generate(rng);
/// assert_eq!(edges.len(), 45);
/// assert!(edges.iter().all(|e| e.0 < e.1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Gnp {
    n: NumNodes,
    p: GnpType,
    weights: Option<Range<Weight>>,
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `p` directly
    pub fn prob(mut self, prob: f64) -> Self {
        assert!((0.0..=1.0).contains(&prob), "{prob} is not a probability");
        self.p = GnpType::Prob(prob);
        self
    }

    /// Weights of [`Gnp::generate_weighted`] are drawn uniformly from this range
    pub fn weights(mut self, range: Range<Weight>) -> Self {
        assert!(range.start >= 0.0 && range.start < range.end);
        self.weights = Some(range);
        self
    }

    /// Returns the edge probability implied by the configured `p` or average degree,
    /// or `None` if neither was set or the value lies outside `[0, 1]`.
    /// Graphs with fewer than two nodes have no pairs and report `0.0` for any average degree.
    pub fn edge_probability(&self) -> Option<f64> {
        let p = match self.p {
            GnpType::NotSet => return None,
            GnpType::Prob(p) => p,
            GnpType::AvgDeg(_) if self.n < 2 => 0.0,
            GnpType::AvgDeg(d) => d / (self.n - 1) as f64,
        };
        (0.0..=1.0).contains(&p).then_some(p)
    }

    fn probability(&self) -> f64 {
        match (self.p, self.edge_probability()) {
            (GnpType::NotSet, _) => panic!("Probability of Gnp was not set!"),
            (_, Some(p)) => p,
            (_, None) => panic!("The average degree is invalid for the given n!"),
        }
    }

    /// Generates edges with weights drawn uniformly from the configured range
    /// (`1.0..10.0` if none was set)
    pub fn generate_weighted<R: Rng>(&self, rng: &mut R) -> Vec<WeightedEdge> {
        let range = self.weights.clone().unwrap_or(1.0..10.0);
        let edges = self.generate(rng);
        edges
            .into_iter()
            .map(|e| e.with_weight(rng.random_range(range.clone())))
            .collect()
    }
}

impl NumNodesGen for Gnp {
    /// Updates `n`
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }
}

impl AverageDegreeGen for Gnp {
    /// Updates `p` such that `p = d/(n - 1)`.
    /// Note that this conversion will only be done when calling `stream/generate`.
    fn avg_deg(mut self, deg: f64) -> Self {
        self.p = GnpType::AvgDeg(deg);
        self
    }
}

impl GraphGenerator for Gnp {
    fn stream<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = Edge> {
        let p = self.probability();
        let n = self.n as u64;
        let total = n * n.saturating_sub(1) / 2;

        // p = 0 yields no edges; Geometric(0) would never succeed
        let geom = (p > 0.0).then(|| Geometric::new(p).ok()).flatten();
        let mut pairs = PairJumper {
            geom,
            rng,
            n,
            total,
            next: 0,
            row: 0,
            row_start: 0,
        };
        pairs.next = pairs.jump();
        pairs
    }
}

/// Walks the pair indices `0..n(n-1)/2` in row-major order of `(u, v)` with `u < v`
struct PairJumper<'a, R: Rng> {
    geom: Option<Geometric>,
    rng: &'a mut R,
    n: u64,
    total: u64,
    next: u64,
    row: u64,
    row_start: u64,
}

impl<R: Rng> PairJumper<'_, R> {
    fn jump(&mut self) -> u64 {
        match &self.geom {
            Some(geom) => geom.sample(self.rng),
            None => u64::MAX,
        }
    }
}

impl<R: Rng> Iterator for PairJumper<'_, R> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }

        let x = self.next;
        while x >= self.row_start + (self.n - 1 - self.row) {
            self.row_start += self.n - 1 - self.row;
            self.row += 1;
        }
        let edge = Edge(self.row as Node, (self.row + 1 + x - self.row_start) as Node);

        self.next = x.saturating_add(1).saturating_add(self.jump());
        Some(edge)
    }
}

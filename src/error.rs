//! Error types shared by all algorithms and the command line front end.
//!
//! Unreachable vertices are *not* errors: they are reported through
//! [`Distance::Unreachable`](crate::algo::Distance), `None` parents/depths and
//! `f64::INFINITY` Dijkstra distances.

use std::path::PathBuf;

use thiserror::Error;

use crate::node::NumNodes;

/// Crate-wide result alias
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GraphError {
    /// A vertex id (reported 1-based) outside of `[1, n]`
    #[error("invalid vertex {vertex}: expected a value between 1 and {n}")]
    InvalidVertex { vertex: u64, n: NumNodes },

    /// Dijkstra requires non-negative edge weights
    #[error("edge ({u}, {v}) has negative weight {weight}")]
    NegativeWeight { u: u64, v: u64, weight: f64 },

    /// The operation needs at least one vertex
    #[error("graph has no vertices")]
    EmptyGraph,

    /// Invalid textual input (CLI arguments, menu input, mapping files)
    #[error("{0}")]
    Parse(String),

    /// A file given on the command line could not be read or written
    #[error("cannot {action} '{}': {source}", path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}


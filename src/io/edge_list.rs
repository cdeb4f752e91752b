//! # EdgeList
//!
//! The EdgeList-Format consists of a line holding the number of vertices `n`,
//! followed by non-comment-lines `u v` or `u v w` representing the undirected edge
//! `Edge(u - 1, v - 1)` with optional weight `w`.
//!
//! ```text
//! # a triangle with a pendant vertex
//! 4
//! 1 2
//! 2 3 2.5
//! 3 1
//! 3 4
//! ```

use std::{
    io::{BufRead, ErrorKind, Lines, Write},
    path::Path,
};

use super::*;

/// Representation-agnostic result of loading a graph file.
///
/// Edges are stored 0-based exactly as they appear in the file (duplicates included);
/// unweighted lines carry weight `1.0`. Any backend can be built from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphData {
    n: NumNodes,
    edges: Vec<WeightedEdge>,
    weighted: bool,
}

impl GraphData {
    /// Unweighted graph data from 0-based edges
    pub fn from_edges<I>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
    {
        let edges = edges
            .into_iter()
            .map(|e| Into::<Edge>::into(e).with_weight(1.0))
            .collect::<Vec<_>>();
        debug_assert!(edges.iter().all(|e| e.u < n && e.v < n));

        Self {
            n,
            edges,
            weighted: false,
        }
    }

    /// Weighted graph data from 0-based edges
    pub fn from_weighted_edges<I>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<WeightedEdge>,
    {
        let edges = edges.into_iter().map(|e| e.into()).collect::<Vec<_>>();
        debug_assert!(edges.iter().all(|e| e.u < n && e.v < n));

        Self {
            n,
            edges,
            weighted: true,
        }
    }

    /// Reads an edge list with default settings
    pub fn try_read<R: BufRead>(reader: R) -> Result<Self> {
        EdgeListReader::default().try_read_graph(reader)
    }

    /// Reads an edge list file with default settings
    pub fn try_read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        EdgeListReader::default().try_read_graph_file(path)
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.n
    }

    /// Number of edge lines; duplicates are counted separately
    pub fn number_of_edge_lines(&self) -> usize {
        self.edges.len()
    }

    /// Returns *true* if at least one edge line carried an explicit weight
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Edges without weights
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().map(|e| e.edge())
    }

    pub fn weighted_edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Builds an unweighted backend; weights are dropped
    pub fn build<G: GraphFromScratch>(&self) -> G {
        G::from_edges(self.n, self.edges())
    }

    /// Builds a weighted backend; unweighted lines have weight `1.0`
    pub fn build_weighted<G: WeightedGraphFromScratch>(&self) -> G {
        G::from_weighted_edges(self.n, self.edges.iter().copied())
    }
}

/// A GraphReader for the EdgeList-Format
#[derive(Debug, Clone)]
pub struct EdgeListReader {
    /// Lines starting with one of these prefixes are skipped when reading
    comment_identifiers: Vec<String>,
}

impl Default for EdgeListReader {
    fn default() -> Self {
        Self {
            comment_identifiers: vec!["#".to_string(), "c".to_string()],
        }
    }
}

impl EdgeListReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphReader<GraphData> for EdgeListReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<GraphData> {
        let mut lines = EdgeListLines {
            lines: reader.lines(),
            line_number: 0,
            comment_identifiers: &self.comment_identifiers,
        };

        let Some(header) = lines.next_content_line()? else {
            return Err(io_error!(
                ErrorKind::InvalidData,
                "missing vertex count: the file contains no data"
            ));
        };
        let context = format!("line {}", lines.line_number);
        let mut parts = header.split_whitespace();
        let n: NumNodes = parse_next_value!(parts, "number of vertices", context);
        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            format!("{context}: expected only the number of vertices")
        );

        let mut data = GraphData {
            n,
            edges: Vec::new(),
            weighted: false,
        };

        while let Some(line) = lines.next_content_line()? {
            let context = format!("line {}", lines.line_number);
            let mut parts = line.split_whitespace();

            let u: u64 = parse_next_value!(parts, "first endpoint", context);
            let v: u64 = parse_next_value!(parts, "second endpoint", context);
            let weight: Weight = match parts.next() {
                None => 1.0,
                Some(token) => {
                    data.weighted = true;
                    token.parse().map_err(|_| {
                        io_error!(
                            ErrorKind::InvalidData,
                            format!("{context}: cannot parse weight from '{token}'")
                        )
                    })?
                }
            };
            raise_error_unless!(
                parts.next().is_none(),
                ErrorKind::InvalidData,
                format!("{context}: expected 'u v' or 'u v weight'")
            );

            for id in [u, v] {
                raise_error_unless!(
                    (1..=n as u64).contains(&id),
                    ErrorKind::InvalidData,
                    format!("{context}: vertex {id} is outside of [1, {n}]")
                );
            }

            data.edges
                .push(WeightedEdge::new((u - 1) as Node, (v - 1) as Node, weight));
        }

        Ok(data)
    }
}

/// Iterates over trimmed non-blank, non-comment-lines and remembers the current line number
struct EdgeListLines<'a, R> {
    lines: Lines<R>,
    line_number: usize,
    comment_identifiers: &'a [String],
}

impl<R: BufRead> EdgeListLines<'_, R> {
    /// Returns the next content line if it exists or propagate an error
    fn next_content_line(&mut self) -> Result<Option<String>> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            let line = line?;
            let trimmed = line.trim();

            if trimmed.is_empty()
                || self
                    .comment_identifiers
                    .iter()
                    .any(|c| trimmed.starts_with(c.as_str()))
            {
                continue;
            }
            return Ok(Some(trimmed.to_string()));
        }
        Ok(None)
    }
}

/// A writer for the EdgeList-Format
#[derive(Debug, Clone, Default)]
pub struct EdgeListWriter {
    /// Always write a weight column, even for unweighted data
    force_weights: bool,
}

impl EdgeListWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `u v w` lines even if the data is unweighted
    pub fn force_weights(mut self, force: bool) -> EdgeListWriter {
        self.force_weights = force;
        self
    }
}

impl GraphWriter<GraphData> for EdgeListWriter {
    fn try_write_graph<W: Write>(&self, graph: &GraphData, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", graph.number_of_nodes())?;

        let with_weights = self.force_weights || graph.is_weighted();
        for e in graph.weighted_edges() {
            if with_weights {
                writeln!(writer, "{} {} {}", e.u + 1, e.v + 1, e.weight)?;
            } else {
                writeln!(writer, "{} {}", e.u + 1, e.v + 1)?;
            }
        }

        Ok(())
    }
}

//! # Text dumps
//!
//! Human-readable renderings of a loaded graph as produced by the `convert` command.
//! All vertex ids are printed 1-based.
//!
//! ```text
//! Adjacency matrix (3x3):
//! 0 1 0
//! 1 0 1
//! 0 1 0
//! ```
//!
//! ```text
//! Adjacency list (3 vertices):
//! Vertex 1: 2
//! Vertex 2: 1, 3
//! Vertex 3: (no neighbors)
//! ```

use std::io::Write;

use itertools::Itertools;

use super::*;

/// Writes a `0/1` grid with one row per vertex
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixDumpWriter;

impl<G: AdjacencyTest> GraphWriter<G> for MatrixDumpWriter {
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        let n = graph.number_of_nodes();
        writeln!(writer, "Adjacency matrix ({n}x{n}):")?;

        for u in graph.vertices() {
            let row = graph
                .vertices()
                .map(|v| if graph.has_edge(u, v) { '1' } else { '0' })
                .join(" ");
            writeln!(writer, "{row}")?;
        }
        Ok(())
    }
}

/// Writes `Vertex i: a, b, c` lines in ascending neighbor order
#[derive(Debug, Clone, Copy, Default)]
pub struct ListDumpWriter;

impl<G: AdjacencyList> GraphWriter<G> for ListDumpWriter {
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        writeln!(
            writer,
            "Adjacency list ({} vertices):",
            graph.number_of_nodes()
        )?;

        for u in graph.vertices() {
            write!(writer, "Vertex {}: ", to_external(u))?;
            if graph.degree_of(u) == 0 {
                writeln!(writer, "(no neighbors)")?;
            } else {
                let nbs = graph.neighbors_of(u).map(to_external).join(", ");
                writeln!(writer, "{nbs}")?;
            }
        }
        Ok(())
    }
}

/// Like [`ListDumpWriter`] but every neighbor is followed by `(weight: w)` with one decimal
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedListDumpWriter;

impl<G: WeightedAdjacencyList> GraphWriter<G> for WeightedListDumpWriter {
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        writeln!(
            writer,
            "Weighted adjacency list ({} vertices):",
            graph.number_of_nodes()
        )?;

        for u in graph.vertices() {
            write!(writer, "Vertex {}: ", to_external(u))?;
            if graph.degree_of(u) == 0 {
                writeln!(writer, "(no neighbors)")?;
            } else {
                let nbs = graph
                    .weighted_neighbors_of(u)
                    .map(|(v, w)| format!("{} (weight: {w:.1})", to_external(v)))
                    .join(", ");
                writeln!(writer, "{nbs}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<G, D: GraphWriter<G>>(dump: D, graph: &G) -> String {
        let mut buffer = Vec::new();
        dump.try_write_graph(graph, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn matrix_dump() {
        let graph = AdjMatrixUndir::from_edges(3, [(0, 1), (1, 2)]);
        assert_eq!(
            render(MatrixDumpWriter, &graph),
            "Adjacency matrix (3x3):\n0 1 0\n1 0 1\n0 1 0\n"
        );
    }

    #[test]
    fn list_dump() {
        let graph = AdjArrayUndir::from_edges(4, [(2, 0), (0, 1)]);
        assert_eq!(
            render(ListDumpWriter, &graph),
            "Adjacency list (4 vertices):\n\
             Vertex 1: 2, 3\n\
             Vertex 2: 1\n\
             Vertex 3: 1\n\
             Vertex 4: (no neighbors)\n"
        );
    }

    #[test]
    fn weighted_list_dump() {
        let graph = WeightedAdjArray::from_weighted_edges(3, [(0, 1, 1.0), (0, 2, 3.96)]);
        let text = render(WeightedListDumpWriter, &graph);
        assert!(text.contains("Vertex 1: 2 (weight: 1.0), 3 (weight: 4.0)"), "{text}");
        assert!(text.contains("Vertex 2: 1 (weight: 1.0)"), "{text}");
    }
}

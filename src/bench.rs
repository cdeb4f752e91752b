/*!
# Benchmarks

Wall-clock comparisons of the storage backends and the Dijkstra priority strategies.

- [`time_search`] measures BFS/DFS from a fixed set of sources,
- [`compare_representations`] builds the matrix and the list backend from the same
  [`GraphData`] and measures build time, search time and estimated memory,
- [`compare_dijkstra`] runs both priority strategies from the same origins and checks
  that they agree,
- [`benchmark_graph`] runs all of the above on one input and adds its [`GraphStatistics`];
  [`write_benchmark_tables`] lays out several such results side by side.

Sources are drawn with a seeded [`Pcg64Mcg`] so repeated runs measure the same work.
*/

use std::{
    io::Write,
    time::{Duration, Instant},
};

use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use tracing::{debug, warn};

use crate::{algo::*, error::Result, io::GraphData, prelude::*};

/// Matrices above this many bytes are not built (8 GiB)
pub const DEFAULT_MATRIX_BUDGET: usize = 8 << 30;

/// Matrices are never built for graphs with at least this many vertices
pub const MATRIX_NODE_LIMIT: NumNodes = 100_000;

#[derive(Debug, Clone, Copy)]
pub struct BenchConfig {
    repetitions: usize,
    sources: usize,
    seed: u64,
    matrix_budget: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            repetitions: 3,
            sources: 10,
            seed: 42,
            matrix_budget: DEFAULT_MATRIX_BUDGET,
        }
    }
}

impl BenchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times every source is searched
    pub fn repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions.max(1);
        self
    }

    /// Returns the number of times every source is searched (at least one)
    pub fn number_of_repetitions(&self) -> usize {
        self.repetitions
    }

    /// Number of random sources
    pub fn sources(mut self, sources: usize) -> Self {
        self.sources = sources;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn matrix_budget(mut self, bytes: usize) -> Self {
        self.matrix_budget = bytes;
        self
    }

    /// Draws `self.sources` random vertices of a graph with `n` vertices
    pub fn random_sources(&self, n: NumNodes) -> Vec<Node> {
        if n == 0 {
            return Vec::new();
        }
        let mut rng = Pcg64Mcg::seed_from_u64(self.seed);
        (0..self.sources).map(|_| rng.random_range(0..n)).collect()
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Mean wall time in milliseconds of a single BFS/DFS run over all sources and repetitions.
/// Returns `0.0` if there are no sources.
pub fn time_search<G: AdjacencyList>(
    graph: &G,
    kind: SearchKind,
    sources: &[Node],
    repetitions: usize,
) -> Result<f64> {
    let runs = sources.len() * repetitions;
    if runs == 0 {
        return Ok(0.0);
    }

    let n = graph.number_of_nodes();
    let mut bfs = Bfs::new(n);
    let mut dfs = Dfs::new(n);

    let start = Instant::now();
    for _ in 0..repetitions {
        for &source in sources {
            match kind {
                SearchKind::Bfs => {
                    bfs.run(graph, source, None)?;
                }
                SearchKind::Dfs => {
                    dfs.run(graph, source)?;
                }
            }
        }
    }
    Ok(millis(start.elapsed()) / runs as f64)
}

/// Bytes of the dense bit matrix for `n` vertices
pub fn estimated_matrix_bytes(n: NumNodes) -> usize {
    let n = n as usize;
    n * n.div_ceil(64) * 8
}

/// Measurements of one backend
#[derive(Debug, Clone, PartialEq)]
pub struct BackendTiming {
    pub representation: Representation,
    pub build_ms: f64,
    pub bfs_ms: f64,
    pub dfs_ms: f64,
    pub memory_bytes: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendOutcome {
    Measured(BackendTiming),
    /// The backend would not fit into the budget
    Skipped {
        representation: Representation,
        estimated_bytes: usize,
    },
}

fn measure_backend<G>(
    data: &GraphData,
    representation: Representation,
    sources: &[Node],
    repetitions: usize,
) -> Result<BackendTiming>
where
    G: GraphFromScratch + AdjacencyList + MemoryFootprint,
{
    let start = Instant::now();
    let graph: G = data.build();
    let build_ms = millis(start.elapsed());

    let timing = BackendTiming {
        representation,
        build_ms,
        bfs_ms: time_search(&graph, SearchKind::Bfs, sources, repetitions)?,
        dfs_ms: time_search(&graph, SearchKind::Dfs, sources, repetitions)?,
        memory_bytes: graph.estimated_memory_bytes(),
    };
    debug!(
        representation = %representation,
        build_ms = timing.build_ms,
        bfs_ms = timing.bfs_ms,
        dfs_ms = timing.dfs_ms,
        "backend measured"
    );
    Ok(timing)
}

/// Measures the matrix and the list backend on the same graph and sources.
/// The matrix is skipped if it exceeds the byte budget or the graph has
/// [`MATRIX_NODE_LIMIT`] or more vertices.
pub fn compare_representations(data: &GraphData, config: &BenchConfig) -> Result<Vec<BackendOutcome>> {
    let n = data.number_of_nodes();
    let sources = config.random_sources(n);
    let mut outcomes = Vec::with_capacity(2);

    let matrix_bytes = estimated_matrix_bytes(n);
    if matrix_bytes < config.matrix_budget && n < MATRIX_NODE_LIMIT {
        outcomes.push(BackendOutcome::Measured(measure_backend::<AdjMatrixUndir>(
            data,
            Representation::Matrix,
            &sources,
            config.repetitions,
        )?));
    } else {
        warn!(n, estimated_bytes = matrix_bytes, "adjacency matrix skipped");
        outcomes.push(BackendOutcome::Skipped {
            representation: Representation::Matrix,
            estimated_bytes: matrix_bytes,
        });
    }

    outcomes.push(BackendOutcome::Measured(measure_backend::<AdjArrayUndir>(
        data,
        Representation::List,
        &sources,
        config.repetitions,
    )?));

    Ok(outcomes)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyTiming {
    pub strategy: StrategyKind,
    /// Mean wall time of one Dijkstra run in milliseconds
    pub mean_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DijkstraComparison {
    pub timings: Vec<StrategyTiming>,
    /// *true* if both strategies produced identical distances for every origin
    pub identical: bool,
}

/// Times both priority strategies from the same origins
pub fn compare_dijkstra<G: WeightedAdjacencyList>(
    graph: &G,
    origins: &[Node],
    repetitions: usize,
) -> Result<DijkstraComparison> {
    let repetitions = repetitions.max(1);
    let runs = (origins.len() * repetitions).max(1);
    let mut timings = Vec::with_capacity(2);
    let mut results: Vec<Vec<DijkstraResult>> = Vec::with_capacity(2);

    for &strategy in StrategyKind::Both.strategies() {
        let mut last = Vec::with_capacity(origins.len());
        let start = Instant::now();
        for round in 0..repetitions {
            for &origin in origins {
                let result = dijkstra_with(graph, origin, strategy)?;
                if round == 0 {
                    last.push(result);
                }
            }
        }
        timings.push(StrategyTiming {
            strategy,
            mean_ms: millis(start.elapsed()) / runs as f64,
        });
        results.push(last);
    }

    let identical = results
        .windows(2)
        .all(|pair| pair[0].iter().zip(&pair[1]).all(|(a, b)| a.distances == b.distances));
    if !identical {
        warn!("priority strategies disagree on distances");
    }

    Ok(DijkstraComparison { timings, identical })
}

/// All measurements taken on one input graph
#[derive(Debug, Clone)]
pub struct GraphBenchmark {
    pub name: String,
    pub backends: Vec<BackendOutcome>,
    pub dijkstra: DijkstraComparison,
    pub statistics: GraphStatistics,
}

impl GraphBenchmark {
    /// Returns the timing of `representation` unless it was skipped
    pub fn timing(&self, representation: Representation) -> Option<&BackendTiming> {
        self.backends.iter().find_map(|outcome| match outcome {
            BackendOutcome::Measured(t) if t.representation == representation => Some(t),
            _ => None,
        })
    }
}

/// Compares both backends and both Dijkstra strategies on `data` and computes its statistics.
/// Fails with [`GraphError::EmptyGraph`](crate::error::GraphError) if the graph has no nodes.
pub fn benchmark_graph(name: &str, data: &GraphData, config: &BenchConfig) -> Result<GraphBenchmark> {
    let list: AdjArrayUndir = data.build();
    let statistics = GraphStatistics::compute(&list)?;
    drop(list);

    let backends = compare_representations(data, config)?;

    let graph: WeightedAdjArray = data.build_weighted();
    let origins = config.random_sources(data.number_of_nodes());
    let dijkstra = compare_dijkstra(&graph, &origins, config.number_of_repetitions())?;

    debug!(graph = name, nodes = statistics.nodes, "graph benchmarked");
    Ok(GraphBenchmark {
        name: name.to_string(),
        backends,
        dijkstra,
        statistics,
    })
}

fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

pub fn write_representation_comparison<W: Write>(
    mut writer: W,
    outcomes: &[BackendOutcome],
) -> std::io::Result<()> {
    writeln!(writer, "Representation comparison")?;
    for outcome in outcomes {
        match outcome {
            BackendOutcome::Measured(t) => {
                writeln!(writer, "{}:", t.representation)?;
                writeln!(writer, "  build: {:.3} ms", t.build_ms)?;
                writeln!(writer, "  BFS:   {:.3} ms", t.bfs_ms)?;
                writeln!(writer, "  DFS:   {:.3} ms", t.dfs_ms)?;
                writeln!(writer, "  memory: {}", format_bytes(t.memory_bytes))?;
            }
            BackendOutcome::Skipped {
                representation,
                estimated_bytes,
            } => {
                writeln!(
                    writer,
                    "{representation}: not measured (estimated {})",
                    format_bytes(*estimated_bytes)
                )?;
            }
        }
    }
    Ok(())
}

pub fn write_dijkstra_comparison<W: Write>(
    mut writer: W,
    comparison: &DijkstraComparison,
) -> std::io::Result<()> {
    writeln!(writer, "Dijkstra strategy comparison")?;
    for t in &comparison.timings {
        writeln!(writer, "{}: {:.3} ms", t.strategy, t.mean_ms)?;
    }
    writeln!(
        writer,
        "Distances identical: {}",
        if comparison.identical { "yes" } else { "no" }
    )
}

fn write_row<W: Write>(writer: &mut W, cells: &[String], widths: &[usize]) -> std::io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .join(" | ");
    writeln!(writer, "{}", line.trim_end())
}

/// Writes one table; the first column is left aligned, all others right aligned
fn write_table<W: Write>(
    writer: &mut W,
    title: &str,
    header: &[&str],
    rows: &[Vec<String>],
) -> std::io::Result<()> {
    let header = header.iter().map(|h| h.to_string()).collect_vec();
    let widths = (0..header.len())
        .map(|c| {
            rows.iter()
                .map(|row| row[c].chars().count())
                .chain([header[c].chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect_vec();

    writeln!(writer, "{title}")?;
    write_row(writer, &header, &widths)?;
    let total = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    writeln!(writer, "{}", "-".repeat(total))?;
    for row in rows {
        write_row(writer, row, &widths)?;
    }
    writeln!(writer)
}

/// Per backend cell; `skipped` if the backend was not measured
fn backend_cell<F>(result: &GraphBenchmark, representation: Representation, value: F) -> String
where
    F: Fn(&BackendTiming) -> String,
{
    result
        .timing(representation)
        .map_or_else(|| "skipped".to_string(), value)
}

fn time_table<W: Write, F>(
    writer: &mut W,
    title: &str,
    results: &[GraphBenchmark],
    value: F,
) -> std::io::Result<()>
where
    F: Fn(&BackendTiming) -> f64,
{
    let rows = results
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.statistics.nodes.to_string(),
                r.statistics.edges.to_string(),
                backend_cell(r, Representation::Matrix, |t| format!("{:.3}", value(t))),
                backend_cell(r, Representation::List, |t| format!("{:.3}", value(t))),
            ]
        })
        .collect_vec();
    write_table(
        writer,
        title,
        &["Graph", "Vertices", "Edges", "Matrix", "List"],
        &rows,
    )
}

/// Writes memory, search time, component, diameter and Dijkstra tables with one row per graph
pub fn write_benchmark_tables<W: Write>(
    mut writer: W,
    results: &[GraphBenchmark],
) -> std::io::Result<()> {
    let yes_no = |flag: bool| String::from(if flag { "yes" } else { "no" });

    let rows = results
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.statistics.nodes.to_string(),
                r.statistics.edges.to_string(),
                backend_cell(r, Representation::Matrix, |t| format_bytes(t.memory_bytes)),
                backend_cell(r, Representation::List, |t| format_bytes(t.memory_bytes)),
            ]
        })
        .collect_vec();
    write_table(
        &mut writer,
        "Memory",
        &["Graph", "Vertices", "Edges", "Matrix", "List"],
        &rows,
    )?;

    time_table(&mut writer, "BFS time (ms)", results, |t| t.bfs_ms)?;
    time_table(&mut writer, "DFS time (ms)", results, |t| t.dfs_ms)?;

    let rows = results
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.statistics.nodes.to_string(),
                yes_no(r.statistics.is_connected()),
                r.statistics.number_of_components().to_string(),
                r.statistics.largest_component().to_string(),
                r.statistics.smallest_component().to_string(),
            ]
        })
        .collect_vec();
    write_table(
        &mut writer,
        "Connected components",
        &["Graph", "Vertices", "Connected", "Count", "Largest", "Smallest"],
        &rows,
    )?;

    let rows = results
        .iter()
        .map(|r| {
            let diameter = &r.statistics.diameter;
            vec![
                r.name.clone(),
                r.statistics.nodes.to_string(),
                r.statistics.edges.to_string(),
                yes_no(diameter.connected),
                if diameter.connected {
                    diameter.diameter.to_string()
                } else {
                    "INF".to_string()
                },
                String::from(if diameter.exact { "exact" } else { "sampled" }),
            ]
        })
        .collect_vec();
    write_table(
        &mut writer,
        "Diameter",
        &["Graph", "Vertices", "Edges", "Connected", "Diameter", "Mode"],
        &rows,
    )?;

    let rows = results
        .iter()
        .map(|r| {
            let mut row = vec![r.name.clone()];
            row.extend(r.dijkstra.timings.iter().map(|t| format!("{:.3}", t.mean_ms)));
            row.push(yes_no(r.dijkstra.identical));
            row
        })
        .collect_vec();
    write_table(
        &mut writer,
        "Dijkstra time (ms)",
        &["Graph", "Linear scan", "Binary heap", "Identical"],
        &rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn sources_are_seeded_and_in_range() {
        let config = BenchConfig::new().sources(20).seed(7);
        let a = config.random_sources(50);
        assert_eq!(a.len(), 20);
        assert!(a.iter().all(|&u| u < 50));
        assert_eq!(a, config.random_sources(50));
        assert!(config.random_sources(0).is_empty());
    }

    #[test]
    fn time_search_validates_sources() {
        let graph = AdjArrayUndir::from_edges(10, path_edges(10));
        assert!(time_search(&graph, SearchKind::Bfs, &[0, 5], 2).unwrap() >= 0.0);
        assert_eq!(time_search(&graph, SearchKind::Dfs, &[], 2).unwrap(), 0.0);
        assert!(time_search(&graph, SearchKind::Dfs, &[10], 1).is_err());
    }

    #[test]
    fn matrix_is_skipped_beyond_budget() {
        let data = GraphData::from_edges(64, path_edges(64));

        let outcomes = compare_representations(&data, &BenchConfig::new()).unwrap();
        assert!(matches!(outcomes[0], BackendOutcome::Measured(_)));
        assert!(matches!(outcomes[1], BackendOutcome::Measured(_)));

        let outcomes =
            compare_representations(&data, &BenchConfig::new().matrix_budget(16)).unwrap();
        assert_eq!(
            outcomes[0],
            BackendOutcome::Skipped {
                representation: Representation::Matrix,
                estimated_bytes: 512
            }
        );
        assert!(matches!(outcomes[1], BackendOutcome::Measured(_)));
    }

    #[test]
    fn strategies_are_compared() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);
        let graph =
            WeightedAdjArray::from_weighted_edges(40, random_weighted_edges(rng, 40, 0.1, 0.0..5.0));
        let comparison = compare_dijkstra(&graph, &[0, 7, 39], 2).unwrap();

        assert!(comparison.identical);
        assert_eq!(comparison.timings.len(), 2);
        assert_eq!(comparison.timings[0].strategy, StrategyKind::Linear);
        assert_eq!(comparison.timings[1].strategy, StrategyKind::Heap);
    }

    #[test]
    fn repetitions_are_at_least_one() {
        assert_eq!(BenchConfig::new().number_of_repetitions(), 3);
        assert_eq!(BenchConfig::new().repetitions(5).number_of_repetitions(), 5);
        assert_eq!(BenchConfig::new().repetitions(0).number_of_repetitions(), 1);
    }

    fn table_row<'a>(text: &'a str, title: &str, name: &str) -> Vec<&'a str> {
        let table = text.split(&format!("{title}\n")).nth(1).unwrap();
        let line = table
            .lines()
            .take_while(|l| !l.is_empty())
            .find(|l| l.starts_with(name))
            .unwrap();
        line.split('|').map(str::trim).collect()
    }

    #[test]
    fn graphs_are_tabulated() {
        let config = BenchConfig::new().repetitions(1).sources(2);
        let path = benchmark_graph("path", &GraphData::from_edges(10, path_edges(10)), &config).unwrap();
        let split = benchmark_graph(
            "split",
            &GraphData::from_edges(5, [(0, 1), (1, 2), (3, 4)]),
            &config.matrix_budget(1),
        )
        .unwrap();

        assert!(path.statistics.is_connected());
        assert!(path.dijkstra.identical);
        assert!(path.timing(Representation::Matrix).is_some());
        assert!(split.timing(Representation::Matrix).is_none());
        assert!(split.timing(Representation::List).is_some());

        let mut out = Vec::new();
        write_benchmark_tables(&mut out, &[path, split]).unwrap();
        let text = String::from_utf8(out).unwrap();

        for title in ["Memory", "BFS time (ms)", "DFS time (ms)", "Dijkstra time (ms)"] {
            assert_eq!(table_row(&text, title, "path")[0], "path", "{text}");
        }
        assert_eq!(table_row(&text, "BFS time (ms)", "split")[3], "skipped");
        assert_eq!(
            table_row(&text, "Connected components", "path"),
            vec!["path", "10", "yes", "1", "10", "10"]
        );
        assert_eq!(
            table_row(&text, "Connected components", "split"),
            vec!["split", "5", "no", "2", "3", "2"]
        );
        assert_eq!(
            table_row(&text, "Diameter", "path"),
            vec!["path", "10", "9", "yes", "9", "exact"]
        );
        assert_eq!(table_row(&text, "Diameter", "split")[4], "INF");
        assert_eq!(table_row(&text, "Dijkstra time (ms)", "split")[3], "yes");
    }

    #[test]
    fn empty_graph_is_not_benchmarked() {
        let data = GraphData::from_edges(0, Vec::<Edge>::new());
        assert!(matches!(
            benchmark_graph("empty", &data, &BenchConfig::new()),
            Err(crate::error::GraphError::EmptyGraph)
        ));
    }
}

//! Execution of the individual commands. Everything is written into a caller-provided
//! writer so the menu and the one-shot commands share the same output.

use std::{io::Write, ops::Range, time::Instant};

use graphsearch::{
    algo::*,
    bench::{self, BenchConfig, GraphBenchmark},
    error::{GraphError, Result},
    gens::*,
    io::*,
    prelude::*,
    report, trace_time,
};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use tracing::debug;

/// Builds the unweighted backend for `$repr` from `$data` and evaluates `$body` with it
macro_rules! with_backend {
    ($repr:expr, $data:expr, |$graph:ident| $body:expr) => {{
        let start = Instant::now();
        match $repr {
            Representation::Matrix => {
                let $graph: AdjMatrixUndir = $data.build();
                trace_time!(start, "build_graph");
                $body
            }
            Representation::List | Representation::Both => {
                let $graph: AdjArrayUndir = $data.build();
                trace_time!(start, "build_graph");
                $body
            }
        }
    }};
}

/// Weighted counterpart of `with_backend!`
macro_rules! with_weighted_backend {
    ($repr:expr, $data:expr, |$graph:ident| $body:expr) => {{
        let start = Instant::now();
        match $repr {
            Representation::Matrix => {
                let $graph: WeightedAdjMatrix = $data.build_weighted();
                trace_time!(start, "build_weighted_graph");
                $body
            }
            Representation::List | Representation::Both => {
                let $graph: WeightedAdjArray = $data.build_weighted();
                trace_time!(start, "build_weighted_graph");
                $body
            }
        }
    }};
}

pub fn write_summary<W: Write>(data: &GraphData, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "Graph: {} vertices, {} edges{}",
        data.number_of_nodes(),
        data.number_of_edge_lines(),
        if data.is_weighted() { " (weighted)" } else { "" }
    )?;
    writeln!(out)?;
    Ok(())
}

pub fn convert<W: Write>(data: &GraphData, repr: Representation, out: &mut W) -> Result<()> {
    for &backend in repr.backends() {
        match backend {
            Representation::Matrix => {
                let graph: AdjMatrixUndir = data.build();
                MatrixDumpWriter.try_write_graph(&graph, &mut *out)?;
            }
            _ if data.is_weighted() => {
                let graph: WeightedAdjArray = data.build_weighted();
                WeightedListDumpWriter.try_write_graph(&graph, &mut *out)?;
            }
            _ => {
                let graph: AdjArrayUndir = data.build();
                ListDumpWriter.try_write_graph(&graph, &mut *out)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn search<W: Write>(
    data: &GraphData,
    repr: Representation,
    kind: SearchKind,
    source: Node,
    target: Option<Node>,
    out: &mut W,
) -> Result<()> {
    for &backend in repr.backends() {
        writeln!(out, "=== {kind} on {backend} ===")?;
        let state = with_backend!(backend, data, |graph| match target {
            Some(target) => graph.bfs_to(source, target),
            None => graph.search(kind, source),
        })?;
        report::write_search_report(&mut *out, kind, &state, target)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn components<W: Write>(
    data: &GraphData,
    repr: Representation,
    kind: SearchKind,
    out: &mut W,
) -> Result<()> {
    let finder = ConnectedComponents::new().search(kind);
    for &backend in repr.backends() {
        writeln!(out, "=== Connected components on {backend} ===")?;
        let components = with_backend!(backend, data, |graph| finder.find(&graph));
        report::write_components_report(&mut *out, &components)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn distance<W: Write>(
    data: &GraphData,
    repr: Representation,
    origin: Node,
    dest: Node,
    out: &mut W,
) -> Result<()> {
    let mut engine = DistanceEngine::new(data.number_of_nodes());
    for &backend in repr.backends() {
        writeln!(out, "=== Distance on {backend} ===")?;
        let d = with_backend!(backend, data, |graph| engine
            .distance_between(&graph, origin, dest))?;
        report::write_distance_report(&mut *out, origin, dest, d)?;
        writeln!(out)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiameterMode {
    /// Exact up to [`DiameterEstimator::DEFAULT_EXACT_THRESHOLD`] vertices
    Auto,
    Exact,
    Sampled,
}

pub fn diameter<W: Write>(
    data: &GraphData,
    repr: Representation,
    mode: DiameterMode,
    out: &mut W,
) -> Result<()> {
    let estimator = match mode {
        DiameterMode::Auto => DiameterEstimator::new(),
        DiameterMode::Exact => DiameterEstimator::new().always_exact(),
        DiameterMode::Sampled => DiameterEstimator::new().always_sample(),
    };

    for &backend in repr.backends() {
        writeln!(out, "=== Diameter on {backend} ===")?;
        let result = with_backend!(backend, data, |graph| estimator.estimate(&graph))?;
        report::write_diameter_report(&mut *out, &result)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn dijkstra<W: Write>(
    data: &GraphData,
    repr: Representation,
    origin: Node,
    dest: Option<Node>,
    strategy: StrategyKind,
    out: &mut W,
) -> Result<()> {
    if !data.is_weighted() {
        debug!("unweighted input: every edge has weight 1");
    }

    for &backend in repr.backends() {
        for &kind in strategy.strategies() {
            writeln!(out, "=== Dijkstra ({kind}) on {backend} ===")?;
            let result =
                with_weighted_backend!(backend, data, |graph| dijkstra_with(&graph, origin, kind))?;
            report::write_dijkstra_report(&mut *out, &result, &kind.to_string())?;
            if let Some(dest) = dest {
                writeln!(out)?;
                report::write_path_line(&mut *out, &result, dest)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn stats<W: Write>(
    data: &GraphData,
    repr: Representation,
    case_study: bool,
    out: &mut W,
) -> Result<()> {
    for &backend in repr.backends() {
        writeln!(out, "=== Statistics on {backend} ===")?;
        let (stats, study) = with_backend!(backend, data, |graph| {
            let stats = GraphStatistics::compute(&graph)?;
            (stats, case_study.then(|| CaseStudy::standard(&graph)))
        });
        report::write_statistics_report(&mut *out, &stats)?;
        if let Some(study) = study {
            writeln!(out)?;
            report::write_case_study(&mut *out, &study)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Benchmarks one graph and writes its detailed comparison.
/// Nothing is written if the benchmark fails.
pub fn bench<W: Write>(
    name: &str,
    data: &GraphData,
    config: &BenchConfig,
    out: &mut W,
) -> Result<GraphBenchmark> {
    let result = bench::benchmark_graph(name, data, config)?;

    writeln!(out, "=== {name} ===")?;
    write_summary(data, out)?;
    bench::write_representation_comparison(&mut *out, &result.backends)?;
    writeln!(out)?;
    bench::write_dijkstra_comparison(&mut *out, &result.dijkstra)?;
    writeln!(out)?;
    Ok(result)
}

#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub nodes: NumNodes,
    pub prob: Option<f64>,
    pub avg_deg: Option<f64>,
    pub weights: Option<Range<Weight>>,
    pub seed: u64,
}

/// Writes a seeded `G(n, p)` graph as an edge list
pub fn generate<W: Write>(params: &GenerateParams, out: &mut W) -> Result<()> {
    let n = params.nodes;
    let generator = match (params.prob, params.avg_deg) {
        (Some(p), _) if !(0.0..=1.0).contains(&p) => {
            return Err(GraphError::Parse(format!(
                "edge probability {p} is not in [0, 1]"
            )));
        }
        (Some(p), _) => Gnp::new().nodes(n).prob(p),
        (None, Some(d)) => Gnp::new().nodes(n).avg_deg(d),
        (None, None) => {
            return Err(GraphError::Parse(
                "either --prob or --avg-deg is required".to_string(),
            ));
        }
    };
    let p = generator.edge_probability().ok_or_else(|| {
        GraphError::Parse(format!(
            "average degree does not give an edge probability in [0, 1] for {n} vertices"
        ))
    })?;

    let rng = &mut Pcg64Mcg::seed_from_u64(params.seed);
    let data = match &params.weights {
        Some(range) => {
            if !(range.start >= 0.0 && range.start < range.end) {
                return Err(GraphError::Parse(format!(
                    "invalid weight range [{}, {})",
                    range.start, range.end
                )));
            }
            GraphData::from_weighted_edges(n, generator.weights(range.clone()).generate_weighted(rng))
        }
        None => GraphData::from_edges(n, generator.generate(rng)),
    };
    debug!(n, p, edges = data.number_of_edge_lines(), "graph generated");

    EdgeListWriter::new().try_write_graph(&data, &mut *out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle6() -> GraphData {
        GraphData::from_edges(6, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)])
    }

    #[test]
    fn both_backends_produce_identical_reports() {
        let data = cycle6();
        let mut out = Vec::new();
        search(&data, Representation::Both, SearchKind::Bfs, 0, None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let (matrix, list) = text.split_once("=== BFS on adjacency list ===").unwrap();
        let matrix = matrix.trim_start_matches("=== BFS on adjacency matrix ===");
        assert_eq!(matrix.trim(), list.trim());
    }

    #[test]
    fn generate_is_seeded() {
        let params = GenerateParams {
            nodes: 20,
            prob: Some(0.3),
            avg_deg: None,
            weights: None,
            seed: 5,
        };
        let mut a = Vec::new();
        let mut b = Vec::new();
        generate(&params, &mut a).unwrap();
        generate(&params, &mut b).unwrap();
        assert_eq!(a, b);

        let data = GraphData::try_read(a.as_slice()).unwrap();
        assert_eq!(data.number_of_nodes(), 20);
        assert!(!data.is_weighted());
    }

    #[test]
    fn generate_rejects_bad_parameters() {
        let mut params = GenerateParams {
            nodes: 5,
            prob: Some(1.5),
            avg_deg: None,
            weights: None,
            seed: 1,
        };
        assert!(generate(&params, &mut Vec::new()).is_err());

        params.prob = None;
        params.avg_deg = Some(10.0);
        assert!(generate(&params, &mut Vec::new()).is_err());

        params.avg_deg = Some(2.0);
        params.weights = Some(3.0..1.0);
        assert!(generate(&params, &mut Vec::new()).is_err());

        params.avg_deg = None;
        params.weights = None;
        assert!(generate(&params, &mut Vec::new()).is_err());
    }

    #[test]
    fn avg_deg_generates_same_graph_as_probability() {
        let mut params = GenerateParams {
            nodes: 9,
            prob: None,
            avg_deg: Some(2.0),
            weights: None,
            seed: 17,
        };
        let mut by_deg = Vec::new();
        generate(&params, &mut by_deg).unwrap();

        params.avg_deg = None;
        params.prob = Some(0.25);
        let mut by_prob = Vec::new();
        generate(&params, &mut by_prob).unwrap();
        assert_eq!(by_deg, by_prob);

        params.nodes = 1;
        params.prob = None;
        params.avg_deg = Some(4.0);
        let mut single = Vec::new();
        generate(&params, &mut single).unwrap();
        assert_eq!(String::from_utf8(single).unwrap().trim(), "1");
    }
}

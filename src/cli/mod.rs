//! Command line interface of the `graphsearch` binary.
//!
//! Every graph command takes `<file> <representation>` followed by its vertex arguments.
//! Vertex arguments are 1-based ids or, with `--names`, vertex names.

pub mod commands;
pub mod menu;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand};
use graphsearch::{
    algo::{SearchKind, StrategyKind},
    bench::{self, BenchConfig},
    error::{GraphError, Result},
    io::{GraphData, VertexNames},
    prelude::*,
};
use tracing::{debug, warn};

/// BFS, DFS, components, diameter and Dijkstra on edge list files
#[derive(Parser, Debug)]
#[command(name = "graphsearch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Also write the report to this file
    #[arg(long, short, global = true)]
    pub output: Option<PathBuf>,

    /// CSV file with `id,name` lines; vertex arguments may then be names
    #[arg(long, global = true)]
    pub names: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter such as `info` or `graphsearch=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input graph and the backend(s) to run on
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Edge list file: vertex count, then `u v [weight]` lines
    pub file: PathBuf,

    /// matrix, list or both
    pub repr: Representation,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the adjacency matrix and/or list of a graph
    Convert(GraphArgs),

    /// Breadth-first search; stops early once TARGET is found
    Bfs {
        #[command(flatten)]
        graph: GraphArgs,
        source: String,
        target: Option<String>,
    },

    /// Depth-first search
    Dfs {
        #[command(flatten)]
        graph: GraphArgs,
        source: String,
    },

    /// Connected components ranked by size
    Components {
        #[command(flatten)]
        graph: GraphArgs,

        /// Traversal used to discover components (bfs or dfs)
        #[arg(long, default_value = "bfs")]
        search: SearchKind,
    },

    /// Number of edges on a shortest path between two vertices
    Distance {
        #[command(flatten)]
        graph: GraphArgs,
        origin: String,
        dest: String,
    },

    /// Exact or sampled diameter
    Diameter {
        #[command(flatten)]
        graph: GraphArgs,

        /// Always run a BFS from every vertex
        #[arg(long, conflicts_with = "sample")]
        exact: bool,

        /// Always use the sampling heuristic
        #[arg(long)]
        sample: bool,
    },

    /// Weighted shortest paths
    Dijkstra {
        #[command(flatten)]
        graph: GraphArgs,
        origin: String,

        /// Print the path to this vertex
        dest: Option<String>,

        /// Priority strategy: linear, heap or both
        #[arg(long, default_value = "heap")]
        strategy: StrategyKind,
    },

    /// Degree, component and diameter statistics
    Stats {
        #[command(flatten)]
        graph: GraphArgs,

        /// Also compare BFS and DFS trees on fixed vertices
        #[arg(long)]
        case_study: bool,
    },

    /// Compare both representations and both Dijkstra strategies on one or more graphs
    Bench {
        /// Edge list files; files that cannot be loaded are skipped
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Runs per source
        #[arg(long, default_value_t = 3)]
        repetitions: usize,

        /// Number of random sources
        #[arg(long, default_value_t = 10)]
        sources: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Write a random G(n, p) graph as an edge list
    Generate {
        /// Number of vertices
        nodes: NumNodes,

        /// Edge probability
        #[arg(long, required_unless_present = "avg_deg", conflicts_with = "avg_deg")]
        prob: Option<f64>,

        /// Expected average degree instead of a probability
        #[arg(long)]
        avg_deg: Option<f64>,

        /// Attach uniform random weights from [min-weight, max-weight)
        #[arg(long)]
        weighted: bool,

        #[arg(long, default_value_t = 1.0)]
        min_weight: Weight,

        #[arg(long, default_value_t = 10.0)]
        max_weight: Weight,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Interactive menu on stdin/stdout
    Menu {
        /// Graph to load at start
        file: Option<PathBuf>,
    },
}

/// Turns vertex arguments into internal nodes
pub struct VertexResolver<'a> {
    n: NumNodes,
    names: Option<&'a VertexNames>,
}

impl<'a> VertexResolver<'a> {
    pub fn new(n: NumNodes, names: Option<&'a VertexNames>) -> Self {
        Self { n, names }
    }

    /// Accepts 1-based ids and, if a mapping is loaded, vertex names
    pub fn resolve(&self, arg: &str) -> Result<Node> {
        let arg = arg.trim();
        if let Ok(id) = arg.parse::<u64>() {
            return from_external(id, self.n);
        }

        match self.names {
            Some(names) => from_external(names.id_of(arg)?, self.n),
            None => Err(GraphError::Parse(format!(
                "invalid vertex '{arg}': expected an integer between 1 and {}",
                self.n
            ))),
        }
    }

    pub fn resolve_optional(&self, arg: Option<&str>) -> Result<Option<Node>> {
        arg.map(|a| self.resolve(a)).transpose()
    }
}

/// Attaches the path to IO errors of a file operation
pub fn file_error(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> GraphError {
    move |source| GraphError::File {
        action,
        path: path.to_path_buf(),
        source,
    }
}

/// File name of `path`, used to label per-graph results
fn graph_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

pub fn load(path: &Path) -> Result<GraphData> {
    let data = GraphData::try_read_file(path).map_err(file_error("read", path))?;
    debug!(
        nodes = data.number_of_nodes(),
        edges = data.number_of_edge_lines(),
        weighted = data.is_weighted(),
        "graph loaded"
    );
    Ok(data)
}

fn load_names(cli: &Cli) -> Result<Option<VertexNames>> {
    cli.names
        .as_ref()
        .map(|path| {
            VertexNames::try_read_file(path).map_err(file_error("read", path))
        })
        .transpose()
}

/// Executes the parsed command. Reports go to stdout and, with `--output`, into a file.
pub fn run(cli: &Cli) -> Result<()> {
    let names = load_names(cli)?;
    let mut report: Vec<u8> = Vec::new();

    match &cli.command {
        Commands::Menu { file } => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut menu = menu::Menu::new(stdin.lock(), stdout.lock(), names);
            if let Some(file) = file {
                menu.load(file)?;
            }
            return menu.run();
        }
        Commands::Generate {
            nodes,
            prob,
            avg_deg,
            weighted,
            min_weight,
            max_weight,
            seed,
        } => {
            let params = commands::GenerateParams {
                nodes: *nodes,
                prob: *prob,
                avg_deg: *avg_deg,
                weights: weighted.then_some(*min_weight..*max_weight),
                seed: *seed,
            };
            commands::generate(&params, &mut report)?;
        }
        Commands::Bench {
            files,
            repetitions,
            sources,
            seed,
        } => {
            let config = BenchConfig::new()
                .repetitions(*repetitions)
                .sources(*sources)
                .seed(*seed);

            let mut results = Vec::with_capacity(files.len());
            for file in files {
                let name = graph_name(file);
                match load(file).and_then(|data| commands::bench(&name, &data, &config, &mut report)) {
                    Ok(result) => results.push(result),
                    Err(error) => warn!(path = %file.display(), %error, "skipping graph"),
                }
            }
            if results.is_empty() {
                return Err(GraphError::Parse(
                    "none of the given graphs could be benchmarked".to_string(),
                ));
            }
            bench::write_benchmark_tables(&mut report, &results)?;
        }
        command => run_graph_command(command, names.as_ref(), &mut report)?,
    }

    emit(&report, cli.output.as_ref())
}

fn run_graph_command<W: Write>(
    command: &Commands,
    names: Option<&VertexNames>,
    out: &mut W,
) -> Result<()> {
    use commands::*;

    let graph = match command {
        Commands::Convert(graph)
        | Commands::Bfs { graph, .. }
        | Commands::Dfs { graph, .. }
        | Commands::Components { graph, .. }
        | Commands::Distance { graph, .. }
        | Commands::Diameter { graph, .. }
        | Commands::Dijkstra { graph, .. }
        | Commands::Stats { graph, .. } => graph,
        Commands::Bench { .. } | Commands::Generate { .. } | Commands::Menu { .. } => {
            return Ok(());
        }
    };

    let data = load(&graph.file)?;
    if let Some(names) = names {
        names.validate(data.number_of_nodes())?;
    }
    let vertices = VertexResolver::new(data.number_of_nodes(), names);
    let repr = graph.repr;
    write_summary(&data, out)?;

    match command {
        Commands::Convert(_) => convert(&data, repr, out),
        Commands::Bfs { source, target, .. } => search(
            &data,
            repr,
            SearchKind::Bfs,
            vertices.resolve(source)?,
            vertices.resolve_optional(target.as_deref())?,
            out,
        ),
        Commands::Dfs { source, .. } => search(
            &data,
            repr,
            SearchKind::Dfs,
            vertices.resolve(source)?,
            None,
            out,
        ),
        Commands::Components { search, .. } => components(&data, repr, *search, out),
        Commands::Distance { origin, dest, .. } => distance(
            &data,
            repr,
            vertices.resolve(origin)?,
            vertices.resolve(dest)?,
            out,
        ),
        Commands::Diameter { exact, sample, .. } => {
            let mode = match (exact, sample) {
                (true, _) => DiameterMode::Exact,
                (_, true) => DiameterMode::Sampled,
                _ => DiameterMode::Auto,
            };
            diameter(&data, repr, mode, out)
        }
        Commands::Dijkstra {
            origin,
            dest,
            strategy,
            ..
        } => dijkstra(
            &data,
            repr,
            vertices.resolve(origin)?,
            vertices.resolve_optional(dest.as_deref())?,
            *strategy,
            out,
        ),
        Commands::Stats { case_study, .. } => stats(&data, repr, *case_study, out),
        Commands::Bench { .. } | Commands::Generate { .. } | Commands::Menu { .. } => Ok(()),
    }
}

fn emit(report: &[u8], output: Option<&PathBuf>) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(report)?;
    stdout.flush()?;

    if let Some(path) = output {
        fs::write(path, report).map_err(file_error("write", path))?;
        debug!(path = %path.display(), "report written");
    }
    Ok(())
}

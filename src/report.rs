/*!
# Reports

Plain-text renderings of algorithm results. Every writer takes any [`Write`] so the
command line front end can print to stdout and mirror the same text into a file.
Vertex ids are printed 1-based.
*/

use std::io::{Result, Write};

use itertools::Itertools;

use crate::{algo::*, prelude::*};

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn node_list<I: IntoIterator<Item = Node>>(nodes: I, separator: &str) -> String {
    let list = nodes.into_iter().map(to_external).join(separator);
    if list.is_empty() {
        "(none)".to_string()
    } else {
        list
    }
}

/// Formats a Dijkstra distance with one decimal
pub fn format_weight(distance: Weight) -> String {
    if distance.is_finite() {
        format!("{distance:.1}")
    } else {
        "INFINITY (unreachable)".to_string()
    }
}

/// Visit order and search tree (`Vertex | Parent | Depth`) of a BFS or DFS run.
///
/// DFS reports additionally list visited and unvisited vertices. If `target` is given,
/// the tree path to it is printed.
pub fn write_search_report<W: Write>(
    mut writer: W,
    kind: SearchKind,
    state: &SearchState,
    target: Option<Node>,
) -> Result<()> {
    let n = state.number_of_nodes();
    match state.source() {
        Some(source) => writeln!(writer, "{kind} from vertex {}", to_external(source))?,
        None => writeln!(writer, "{kind}")?,
    }
    writeln!(writer, "Visit order: {}", node_list(state.order().iter().copied(), " -> "))?;
    writeln!(writer, "Visited {} of {n} vertices", state.visited_count())?;

    if kind == SearchKind::Dfs {
        writeln!(writer, "Visited: {}", node_list(state.order().iter().copied(), ", "))?;
        writeln!(writer, "Unvisited: {}", node_list(state.unvisited(), ", "))?;
    }

    writeln!(writer)?;
    writeln!(writer, "Search tree:")?;
    writeln!(writer, "Vertex | Parent | Depth")?;
    writeln!(writer, "-------|--------|------")?;
    for u in (0..n).filter(|&u| state.did_visit(u)) {
        let parent = state
            .parent_of(u)
            .map_or_else(|| "-".to_string(), |p| to_external(p).to_string());
        let depth = state.depth_of(u).unwrap_or(0);
        writeln!(writer, "{:>6} | {parent:>6} | {depth:>5}", to_external(u))?;
    }

    if let Some(target) = target {
        writeln!(writer)?;
        match state.tree_path_to(target) {
            Some(path) => writeln!(
                writer,
                "Path to vertex {}: {} (depth {})",
                to_external(target),
                node_list(path, " -> "),
                state.depth_of(target).unwrap_or(0)
            )?,
            None => writeln!(
                writer,
                "Vertex {} is not reachable from the source",
                to_external(target)
            )?,
        }
    }
    Ok(())
}

/// Component listing with sizes and percentages followed by the vertex to component map
pub fn write_components_report<W: Write>(mut writer: W, components: &ComponentSet) -> Result<()> {
    let n: NumNodes = components.components().iter().map(|c| c.size()).sum();
    let percentage = |size: NumNodes| 100.0 * size as f64 / n.max(1) as f64;

    writeln!(writer, "Connected components: {}", components.len())?;
    writeln!(writer, "Graph is connected: {}", yes_no(components.len() <= 1))?;
    writeln!(writer)?;

    for c in components.components() {
        writeln!(
            writer,
            "Component {} (size {}, {:.1}%): {}",
            c.id,
            c.size(),
            percentage(c.size()),
            node_list(c.members.iter().copied(), ", ")
        )?;
    }

    if let (Some(largest), Some(smallest)) =
        (components.components().first(), components.components().last())
    {
        writeln!(writer)?;
        writeln!(
            writer,
            "Largest component: {} vertices ({:.1}%)",
            largest.size(),
            percentage(largest.size())
        )?;
        writeln!(
            writer,
            "Smallest component: {} vertices ({:.1}%)",
            smallest.size(),
            percentage(smallest.size())
        )?;
        writeln!(
            writer,
            "Average component size: {:.2} vertices",
            n as f64 / components.len() as f64
        )?;
        writeln!(writer, "Singleton components: {}", components.number_of_singletons())?;
    }

    writeln!(writer)?;
    writeln!(writer, "Vertex to component:")?;
    for u in 0..n {
        if let Some(id) = components.component_of(u) {
            writeln!(writer, "Vertex {:>3} -> Component {id}", to_external(u))?;
        }
    }
    Ok(())
}

/// One line with the hop distance of a point-to-point query
pub fn write_distance_report<W: Write>(
    mut writer: W,
    origin: Node,
    dest: Node,
    distance: Distance,
) -> Result<()> {
    match distance {
        Distance::Finite(d) => writeln!(
            writer,
            "Distance between {} and {}: {d}",
            to_external(origin),
            to_external(dest)
        ),
        Distance::Unreachable => writeln!(
            writer,
            "Distance between {} and {}: INF (unreachable)",
            to_external(origin),
            to_external(dest)
        ),
    }
}

pub fn write_diameter_report<W: Write>(mut writer: W, result: &DiameterResult) -> Result<()> {
    writeln!(writer, "Diameter: {}", result.diameter)?;
    match result.endpoints {
        Some((u, v)) => writeln!(writer, "Endpoints: {} and {}", to_external(u), to_external(v))?,
        None => writeln!(writer, "Endpoints: (none)")?,
    }
    if result.exact {
        writeln!(writer, "Mode: exact ({} BFS sources)", result.sources)?;
    } else {
        writeln!(
            writer,
            "Mode: sampled ({} BFS sources, lower bound)",
            result.sources
        )?;
    }
    writeln!(writer, "Graph is connected: {}", yes_no(result.connected))?;
    if !result.connected {
        writeln!(
            writer,
            "The graph is disconnected: the value above is the largest finite distance"
        )?;
    }
    Ok(())
}

/// Distance and predecessor tables of a Dijkstra run
pub fn write_dijkstra_report<W: Write>(
    mut writer: W,
    result: &DijkstraResult,
    strategy: &str,
) -> Result<()> {
    writeln!(
        writer,
        "Shortest distances from vertex {} ({strategy}):",
        to_external(result.origin)
    )?;
    for (u, &d) in result.distances.iter().enumerate() {
        writeln!(writer, "Vertex {}: {}", u + 1, format_weight(d))?;
    }

    writeln!(writer)?;
    writeln!(writer, "Shortest path tree (predecessors):")?;
    for (u, pred) in result.predecessors.iter().enumerate() {
        let text = match pred {
            _ if u as Node == result.origin => "(origin)".to_string(),
            Some(p) => to_external(*p).to_string(),
            None => "(unreachable)".to_string(),
        };
        writeln!(writer, "Vertex {}: {text}", u + 1)?;
    }
    Ok(())
}

/// `Path from a to b: a -> ... -> b (total weight w)` or a not-reachable note
pub fn write_path_line<W: Write>(mut writer: W, result: &DijkstraResult, dest: Node) -> Result<()> {
    let path = result.path_to(dest);
    if path.is_empty() {
        writeln!(
            writer,
            "No path from {} to {}",
            to_external(result.origin),
            to_external(dest)
        )
    } else {
        writeln!(
            writer,
            "Path from {} to {}: {} (total weight {})",
            to_external(result.origin),
            to_external(dest),
            node_list(path, " -> "),
            format_weight(result.distance_to(dest))
        )
    }
}

pub fn write_statistics_report<W: Write>(mut writer: W, stats: &GraphStatistics) -> Result<()> {
    writeln!(writer, "Graph statistics")?;
    writeln!(writer, "Vertices: {}", stats.nodes)?;
    writeln!(writer, "Edges: {}", stats.edges)?;
    writeln!(
        writer,
        "Degree: min {}, max {}, mean {:.2}, median {:.1}",
        stats.min_degree, stats.max_degree, stats.mean_degree, stats.median_degree
    )?;
    writeln!(
        writer,
        "Components: {} (largest {}, smallest {})",
        stats.number_of_components(),
        stats.largest_component(),
        stats.smallest_component()
    )?;
    writeln!(writer, "Connected: {}", yes_no(stats.is_connected()))?;

    let mode = if stats.diameter.exact { "exact" } else { "sampled" };
    match stats.diameter.endpoints {
        Some((u, v)) => writeln!(
            writer,
            "Diameter: {} ({mode}) between {} and {}",
            stats.diameter.diameter,
            to_external(u),
            to_external(v)
        ),
        None => writeln!(writer, "Diameter: {} ({mode})", stats.diameter.diameter),
    }
}

pub fn write_case_study<W: Write>(mut writer: W, study: &CaseStudy) -> Result<()> {
    writeln!(writer, "Case study")?;
    for probe in &study.probes {
        let parents = probe
            .parents
            .iter()
            .map(|&(q, p)| {
                let parent = p.map_or_else(|| "-".to_string(), |p| to_external(p).to_string());
                format!("parent({}) = {parent}", to_external(q))
            })
            .join(", ");
        writeln!(
            writer,
            "{} from {}: {}",
            probe.kind,
            to_external(probe.start),
            if parents.is_empty() { "(no queries)".to_string() } else { parents }
        )?;
    }
    for &(u, v, d) in &study.distances {
        writeln!(writer, "Distance {} - {}: {d}", to_external(u), to_external(v))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn bfs_report_on_cycle() {
        let graph = AdjArrayUndir::from_edges(6, cycle_edges(6));
        let state = graph.bfs(0).unwrap();
        let text = render(|w| write_search_report(w, SearchKind::Bfs, &state, Some(3)));

        assert!(text.starts_with("BFS from vertex 1\n"), "{text}");
        assert!(text.contains("Visit order: 1 -> 2 -> 6 -> 3 -> 5 -> 4\n"), "{text}");
        assert!(text.contains("     1 |      - |     0\n"), "{text}");
        assert!(text.contains("     4 |      3 |     3\n"), "{text}");
        assert!(text.contains("Path to vertex 4: 1 -> 2 -> 3 -> 4 (depth 3)"), "{text}");
        assert!(!text.contains("Unvisited"));
    }

    #[test]
    fn dfs_report_lists_unvisited() {
        let graph = AdjMatrixUndir::from_edges(5, [(0, 1), (1, 2), (3, 4)]);
        let state = graph.dfs(0).unwrap();
        let text = render(|w| write_search_report(w, SearchKind::Dfs, &state, None));

        assert!(text.contains("Visited: 1, 2, 3\n"), "{text}");
        assert!(text.contains("Unvisited: 4, 5\n"), "{text}");
    }

    #[test]
    fn components_report() {
        let graph = AdjArrayUndir::from_edges(5, [(0, 1), (1, 2), (3, 4)]);
        let text = render(|w| write_components_report(w, &graph.connected_components()));

        assert!(text.contains("Connected components: 2\n"), "{text}");
        assert!(text.contains("Graph is connected: no\n"), "{text}");
        assert!(text.contains("Component 1 (size 3, 60.0%): 1, 2, 3\n"), "{text}");
        assert!(text.contains("Component 2 (size 2, 40.0%): 4, 5\n"), "{text}");
        assert!(text.contains("Vertex   5 -> Component 2\n"), "{text}");
    }

    #[test]
    fn dijkstra_report() {
        let graph =
            WeightedAdjArray::from_weighted_edges(4, [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 5.0)]);
        let result = graph.shortest_paths(0).unwrap();
        let text = render(|w| write_dijkstra_report(w, &result, "binary heap"));

        assert!(text.contains("Vertex 3: 3.0\n"), "{text}");
        assert!(text.contains("Vertex 4: INFINITY (unreachable)\n"), "{text}");
        assert!(text.contains("Vertex 1: (origin)\n"), "{text}");
        assert!(text.contains("Vertex 3: 2\n"), "{text}");
        assert!(text.contains("Vertex 4: (unreachable)\n"), "{text}");

        let line = render(|w| write_path_line(w, &result, 2));
        assert_eq!(line, "Path from 1 to 3: 1 -> 2 -> 3 (total weight 3.0)\n");
        let line = render(|w| write_path_line(w, &result, 3));
        assert_eq!(line, "No path from 1 to 4\n");
    }

    #[test]
    fn distance_and_diameter_reports() {
        let text = render(|w| write_distance_report(w, 0, 4, Distance::Unreachable));
        assert_eq!(text, "Distance between 1 and 5: INF (unreachable)\n");

        let graph = AdjArrayUndir::from_edges(6, cycle_edges(6));
        let result = DiameterEstimator::new().estimate(&graph).unwrap();
        let text = render(|w| write_diameter_report(w, &result));
        assert!(text.contains("Diameter: 3\n"), "{text}");
        assert!(text.contains("Endpoints: 1 and 4\n"), "{text}");
        assert!(text.contains("Mode: exact"), "{text}");
    }
}

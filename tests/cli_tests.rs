//! Integration tests for the graphsearch binary

use std::{fs, path::PathBuf};

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

const CYCLE6: &str = "6\n1 2\n2 3\n3 4\n4 5\n5 6\n6 1\n";
const TWO_COMPONENTS: &str = "# two components\n5\n1 2\n2 3\n4 5\n";
const WEIGHTED_TRIANGLE: &str = "3\n1 2 1\n2 3 2\n1 3 5\n";

fn graphsearch() -> Command {
    cargo_bin_cmd!("graphsearch")
}

fn graph_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Help and exit codes
// ============================================================================

#[test]
fn test_help_flag() {
    graphsearch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: graphsearch"))
        .stdout(predicate::str::contains("dijkstra"));
}

#[test]
fn test_unknown_subcommand_exit_code_1() {
    graphsearch().arg("teleport").assert().code(1);
}

#[test]
fn test_bad_representation_exit_code_1() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", CYCLE6);

    graphsearch()
        .arg("bfs")
        .arg(&file)
        .args(["sparse", "1"])
        .assert()
        .code(1);
}

#[test]
fn test_missing_file_exit_code_1() {
    let dir = tempdir().unwrap();

    graphsearch()
        .arg("convert")
        .arg(dir.path().join("missing.txt"))
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: cannot read"));
}

#[test]
fn test_invalid_vertex_exit_code_1() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", CYCLE6);

    graphsearch()
        .arg("bfs")
        .arg(&file)
        .args(["list", "7"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: invalid vertex 7"));

    graphsearch()
        .arg("distance")
        .arg(&file)
        .args(["matrix", "0", "3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_malformed_file_names_line() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "bad.txt", "3\n1 2\n2 x\n");

    graphsearch()
        .arg("components")
        .arg(&file)
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 3"));
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_convert_both() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", "3\n1 2\n2 3\n");

    graphsearch()
        .arg("convert")
        .arg(&file)
        .arg("both")
        .assert()
        .success()
        .stdout(predicate::str::contains("Graph: 3 vertices, 2 edges"))
        .stdout(predicate::str::contains("Adjacency matrix (3x3):\n0 1 0\n1 0 1\n0 1 0\n"))
        .stdout(predicate::str::contains(
            "Adjacency list (3 vertices):\nVertex 1: 2\nVertex 2: 1, 3\nVertex 3: 2\n",
        ));
}

#[test]
fn test_bfs_on_cycle() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", CYCLE6);

    graphsearch()
        .arg("bfs")
        .arg(&file)
        .args(["both", "1", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== BFS on adjacency matrix ==="))
        .stdout(predicate::str::contains("=== BFS on adjacency list ==="))
        .stdout(predicate::str::contains("Path to vertex 4: 1 -> 2 -> 3 -> 4 (depth 3)"));

    graphsearch()
        .arg("bfs")
        .arg(&file)
        .args(["list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Visit order: 1 -> 2 -> 6 -> 3 -> 5 -> 4"))
        .stdout(predicate::str::contains("Visited 6 of 6 vertices"));
}

#[test]
fn test_dfs_lists_unvisited() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", TWO_COMPONENTS);

    graphsearch()
        .arg("dfs")
        .arg(&file)
        .args(["matrix", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DFS from vertex 1"))
        .stdout(predicate::str::contains("Unvisited: 4, 5"));
}

#[test]
fn test_components() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", TWO_COMPONENTS);

    graphsearch()
        .arg("components")
        .arg(&file)
        .args(["list", "--search", "dfs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Connected components: 2"))
        .stdout(predicate::str::contains("Component 1 (size 3, 60.0%): 1, 2, 3"))
        .stdout(predicate::str::contains("Component 2 (size 2, 40.0%): 4, 5"));
}

#[test]
fn test_distance_and_diameter() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", CYCLE6);

    graphsearch()
        .arg("distance")
        .arg(&file)
        .args(["list", "1", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance between 1 and 4: 3"));

    graphsearch()
        .arg("diameter")
        .arg(&file)
        .args(["matrix", "--exact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Diameter: 3"))
        .stdout(predicate::str::contains("Endpoints: 1 and 4"))
        .stdout(predicate::str::contains("Mode: exact"));
}

#[test]
fn test_unreachable_distance() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", TWO_COMPONENTS);

    graphsearch()
        .arg("distance")
        .arg(&file)
        .args(["list", "1", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance between 1 and 5: INF (unreachable)"));
}

#[test]
fn test_dijkstra_both_strategies() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", WEIGHTED_TRIANGLE);

    graphsearch()
        .arg("dijkstra")
        .arg(&file)
        .args(["list", "1", "3", "--strategy", "both"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Graph: 3 vertices, 3 edges (weighted)"))
        .stdout(predicate::str::contains("=== Dijkstra (linear scan) on adjacency list ==="))
        .stdout(predicate::str::contains("=== Dijkstra (binary heap) on adjacency list ==="))
        .stdout(predicate::str::contains("Vertex 3: 3.0"))
        .stdout(predicate::str::contains(
            "Path from 1 to 3: 1 -> 2 -> 3 (total weight 3.0)",
        ));
}

#[test]
fn test_stats() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", CYCLE6);

    graphsearch()
        .arg("stats")
        .arg(&file)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vertices: 6"))
        .stdout(predicate::str::contains("Edges: 6"))
        .stdout(predicate::str::contains("Connected: yes"))
        .stdout(predicate::str::contains("Diameter: 3 (exact)"));
}

#[test]
fn test_output_file() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", CYCLE6);
    let report = dir.path().join("report.txt");

    graphsearch()
        .arg("distance")
        .arg(&file)
        .args(["list", "2", "5", "--output"])
        .arg(&report)
        .assert()
        .success();

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("Distance between 2 and 5: 3"), "{text}");
}

#[test]
fn test_names() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", CYCLE6);
    let names = graph_file(
        &dir,
        "names.csv",
        "1,Alice\n2,Bob\n3,Carol\n4,Dan\n5,Eve\n6,Frank\n",
    );

    graphsearch()
        .arg("--names")
        .arg(&names)
        .arg("bfs")
        .arg(&file)
        .args(["list", "alice", "Dan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Path to vertex 4: 1 -> 2 -> 3 -> 4"));

    graphsearch()
        .arg("--names")
        .arg(&names)
        .arg("bfs")
        .arg(&file)
        .args(["list", "mallory"])
        .assert()
        .code(1);
}

#[test]
fn test_generate_is_reproducible() {
    let run = || {
        graphsearch()
            .args(["generate", "12", "--prob", "0.4", "--seed", "9"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("12\n"))
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());

    graphsearch()
        .args(["generate", "12", "--prob", "1.5"])
        .assert()
        .code(1);
}

#[test]
fn test_generated_graph_is_readable() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("random.txt");

    graphsearch()
        .args(["generate", "30", "--avg-deg", "4", "--weighted", "--output"])
        .arg(&file)
        .assert()
        .success();

    graphsearch()
        .arg("dijkstra")
        .arg(&file)
        .args(["matrix", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vertex 1: 0.0"));
}

#[test]
fn test_bench() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", CYCLE6);

    graphsearch()
        .arg("bench")
        .arg(&file)
        .args(["--repetitions", "1", "--sources", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== g.txt ==="))
        .stdout(predicate::str::contains("Representation comparison"))
        .stdout(predicate::str::contains("Distances identical: yes"));
}

#[test]
fn test_bench_several_graphs() {
    let dir = tempdir().unwrap();
    let cycle = graph_file(&dir, "cycle.txt", CYCLE6);
    let split = graph_file(&dir, "split.txt", TWO_COMPONENTS);

    let output = graphsearch()
        .arg("bench")
        .arg(&cycle)
        .arg(&split)
        .arg(dir.path().join("missing.txt"))
        .args(["--repetitions", "1", "--sources", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== cycle.txt ==="))
        .stdout(predicate::str::contains("=== split.txt ==="))
        .stdout(predicate::str::contains("missing.txt").not())
        .stderr(predicate::str::contains("skipping graph"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    for title in [
        "Memory",
        "BFS time (ms)",
        "DFS time (ms)",
        "Connected components",
        "Diameter",
    ] {
        assert!(text.contains(&format!("\n{title}\n")), "{text}");
    }
    let components = text.split("Connected components\n").nth(1).unwrap();
    let row = |name: &str| {
        components
            .lines()
            .find(|line| line.starts_with(name))
            .map(|line| line.split('|').map(str::trim).collect::<Vec<_>>())
            .unwrap()
    };
    assert_eq!(row("cycle.txt"), ["cycle.txt", "6", "yes", "1", "6", "6"]);
    assert_eq!(row("split.txt"), ["split.txt", "5", "no", "2", "3", "2"]);

    graphsearch()
        .arg("bench")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: none of the given graphs"));
}

#[test]
fn test_menu_from_stdin() {
    let dir = tempdir().unwrap();
    let file = graph_file(&dir, "g.txt", CYCLE6);

    graphsearch()
        .arg("menu")
        .arg(&file)
        .write_stdin("3\n1\n\n6\n1\n4\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Graph: 6 vertices, 6 edges"))
        .stdout(predicate::str::contains("Visit order: 1 -> 2 -> 6 -> 3 -> 5 -> 4"))
        .stdout(predicate::str::contains("Distance between 1 and 4: 3"));
}

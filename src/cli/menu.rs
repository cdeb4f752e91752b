//! Interactive console menu. Reads choices line by line, so it can be scripted through stdin.

use std::{
    io::{BufRead, Write},
    path::Path,
};

use graphsearch::{
    algo::{SearchKind, StrategyKind},
    error::{GraphError, Result},
    io::{GraphData, VertexNames},
    prelude::*,
};

use super::{VertexResolver, commands::*, load};

const MENU: &str = "\
Graph search menu
  1. Load graph file
  2. Choose representation
  3. BFS
  4. DFS
  5. Connected components
  6. Distance between two vertices
  7. Diameter
  8. Dijkstra
  9. Statistics
  0. Exit";

pub struct Menu<R, W> {
    input: R,
    output: W,
    names: Option<VertexNames>,
    data: Option<GraphData>,
    repr: Representation,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, names: Option<VertexNames>) -> Self {
        Self {
            input,
            output,
            names,
            data: None,
            repr: Representation::default(),
        }
    }

    /// Loads a graph and makes it the current one
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let data = load(path)?;
        if let Some(names) = &self.names {
            names
                .validate(data.number_of_nodes())
                .map_err(|e| GraphError::Parse(e.to_string()))?;
        }
        writeln!(self.output, "Loaded '{}'", path.display())?;
        write_summary(&data, &mut self.output)?;
        self.data = Some(data);
        Ok(())
    }

    /// Runs until `0` is chosen or the input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Choice: ")? else {
                break;
            };

            match self.execute(choice.trim()) {
                Ok(true) => {}
                Ok(false) => break,
                Err(GraphError::Io(e)) => return Err(e.into()),
                Err(e) => writeln!(self.output, "error: {e}")?,
            }
            writeln!(self.output)?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Returns `false` if the menu should close
    fn execute(&mut self, choice: &str) -> Result<bool> {
        match choice {
            "0" | "q" | "quit" | "exit" => return Ok(false),
            "1" => {
                let Some(path) = self.prompt("Graph file: ")? else {
                    return Ok(false);
                };
                self.load(Path::new(path.trim()))?;
            }
            "2" => {
                let Some(repr) = self.prompt("Representation (matrix, list or both): ")? else {
                    return Ok(false);
                };
                self.repr = repr.parse()?;
                writeln!(self.output, "Representation: {}", self.repr)?;
            }
            "3" | "4" => {
                let kind = if choice == "3" {
                    SearchKind::Bfs
                } else {
                    SearchKind::Dfs
                };
                let source = self.ask_vertex("Source vertex")?;
                let target = if kind == SearchKind::Bfs {
                    self.ask_optional_vertex("Target vertex (empty for a full search)")?
                } else {
                    None
                };
                let (data, repr) = (loaded(&self.data)?, self.repr);
                search(data, repr, kind, source, target, &mut self.output)?;
            }
            "5" => {
                let (data, repr) = (loaded(&self.data)?, self.repr);
                components(data, repr, SearchKind::Bfs, &mut self.output)?;
            }
            "6" => {
                let origin = self.ask_vertex("Origin vertex")?;
                let dest = self.ask_vertex("Destination vertex")?;
                let (data, repr) = (loaded(&self.data)?, self.repr);
                distance(data, repr, origin, dest, &mut self.output)?;
            }
            "7" => {
                let (data, repr) = (loaded(&self.data)?, self.repr);
                diameter(data, repr, DiameterMode::Auto, &mut self.output)?;
            }
            "8" => {
                let strategy = match self.prompt("Strategy (linear, heap or both; empty for heap): ")? {
                    Some(s) if !s.trim().is_empty() => s.parse::<StrategyKind>()?,
                    _ => StrategyKind::default(),
                };
                let origin = self.ask_vertex("Origin vertex")?;
                let dest = self.ask_optional_vertex("Destination vertex (empty for none)")?;
                let (data, repr) = (loaded(&self.data)?, self.repr);
                dijkstra(data, repr, origin, dest, strategy, &mut self.output)?;
            }
            "9" => {
                let (data, repr) = (loaded(&self.data)?, self.repr);
                stats(data, repr, false, &mut self.output)?;
            }
            other => writeln!(self.output, "Invalid option '{other}'")?,
        }
        Ok(true)
    }

    /// Prints `text` and reads one line; `None` at the end of the input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask_optional_vertex(&mut self, what: &str) -> Result<Option<Node>> {
        let n = loaded(&self.data)?.number_of_nodes();
        let answer = self.prompt(&format!("{what} (1 to {n}): "))?;
        let resolver = VertexResolver::new(n, self.names.as_ref());
        match answer {
            Some(a) if !a.trim().is_empty() => resolver.resolve(&a).map(Some),
            _ => Ok(None),
        }
    }

    fn ask_vertex(&mut self, what: &str) -> Result<Node> {
        self.ask_optional_vertex(what)?
            .ok_or_else(|| GraphError::Parse(format!("{what} is required")))
    }
}

fn loaded(data: &Option<GraphData>) -> Result<&GraphData> {
    data.as_ref()
        .ok_or_else(|| GraphError::Parse("no graph loaded: choose option 1 first".to_string()))
}

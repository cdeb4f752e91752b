/*!
# IO

Utilities for loading graphs from text files and writing them back.

## Input Format

The only input format is an **edge list**:
- the first non-comment line holds the number of vertices `n`,
- every further non-blank line is an edge `u v` or a weighted edge `u v w`,
- vertex ids are **1-based** and must lie in `[1, n]`,
- lines starting with `#` or `c` are comments.

Reading yields a [`GraphData`], a representation-agnostic edge buffer from which
every backend in [`crate::repr`] can be built.

## Output Formats

- [`EdgeListWriter`] writes the input format back (1-based ids).
- [`dump`] renders matrix and list representations as human-readable text.

## Vertex Names

[`VertexNames`] is an optional `id,name` CSV mapping that lets callers refer to
vertices by a label instead of their id.
*/

pub mod dump;
pub mod edge_list;
pub mod names;

use std::{
    fs::File,
    io::{BufRead, BufReader, Result, Write},
    path::Path,
};

use crate::prelude::*;

pub use dump::*;
pub use edge_list::*;
pub use names::*;

/// Trait for types that can read graphs in a specific format.
///
/// This trait provides both a low-level method to read from any
/// [`BufRead`] instance and a convenience wrapper to read directly
/// from files.
pub trait GraphReader<G> {
    /// Reads a graph from the given reader according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the input is not a valid representation
    /// of a graph in the expected format.
    fn try_read_graph<R>(&self, reader: R) -> Result<G>
    where
        R: BufRead;

    /// Reads a graph from a file according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if its contents
    /// are not a valid representation of a graph in the expected format.
    fn try_read_graph_file<P>(&self, path: P) -> Result<G>
    where
        P: AsRef<Path>,
    {
        self.try_read_graph(BufReader::new(File::open(path)?))
    }
}

/// Trait for types that can write graphs in a specific format.
pub trait GraphWriter<G> {
    /// Writes the given graph to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    fn try_write_graph<W>(&self, graph: &G, writer: W) -> Result<()>
    where
        W: Write;
}

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

/// Shorthand for returning `Err(std::io::Error)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(io_error!($kind, $info));
        }
    };
}

/// Tries to parse the next token of an iterator and returns early with `InvalidData` if it
/// is missing or malformed. `$context` is prepended to the message (usually the line number).
macro_rules! parse_next_value {
    ($iterator : expr, $name : expr, $context : expr) => {{
        let Some(token) = $iterator.next() else {
            return Err(io_error!(
                ErrorKind::InvalidData,
                format!("{}: premature end of line when parsing {}", $context, $name)
            ));
        };

        match token.parse() {
            Ok(value) => value,
            Err(_) => {
                return Err(io_error!(
                    ErrorKind::InvalidData,
                    format!("{}: cannot parse {} from '{}'", $context, $name, token)
                ));
            }
        }
    }};
}

use io_error;
use parse_next_value;
use raise_error_unless;

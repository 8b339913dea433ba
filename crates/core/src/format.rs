//! Line-oriented text persistence for graphs
//!
//! # File Format
//!
//! ```text
//! Directed | Undirected        graph kind
//! Yes | No                     weighted?
//! <vertex>                     isolated vertex
//! <v1> <v2>                    unweighted edge
//! <v1> <v2> <weight>           weighted edge
//! ```
//!
//! Edge lines are written once per unordered endpoint pair, for directed
//! graphs as well, so a directed graph holding both `A -> B` and `B -> A`
//! only persists the first one encountered. Loading replays every line
//! through [`Graph::add_vertex`] and [`Graph::add_edge`], so all mutation
//! rules apply while reading.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Weight};

/// Extension every graph file carries
pub const FILE_EXTENSION: &str = "txt";

const DIRECTED: &str = "Directed";
const UNDIRECTED: &str = "Undirected";
const WEIGHTED: &str = "Yes";
const UNWEIGHTED: &str = "No";

/// Append `.txt` unless the path already ends with that extension
///
/// An existing different extension is kept: `graph.dat` becomes
/// `graph.dat.txt`.
pub fn normalize_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == FILE_EXTENSION) {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(FILE_EXTENSION);
    PathBuf::from(name)
}

impl Graph {
    /// Build a graph from a file (see [`Graph::load_from_file`])
    pub fn from_file(path: &Path) -> Result<Graph> {
        let mut graph = Graph::default();
        graph.load_from_file(path)?;
        Ok(graph)
    }

    /// Write the graph to `path`, normalizing its extension
    ///
    /// Returns the path actually written. A failed write may leave a
    /// truncated file behind.
    pub fn save_to_file(&self, path: &Path) -> Result<PathBuf> {
        let path = normalize_path(path);
        self.check_labels()?;
        let mut writer = BufWriter::new(File::create(&path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;

        info!(path = %path.display(), vertices = self.vertex_count(), "saved graph");
        Ok(path)
    }

    /// Read a graph file into this graph, normalizing the path's extension
    ///
    /// The directed and weighted flags are replaced by the file header;
    /// vertices and edges are added on top of the current adjacency.
    ///
    /// # Errors
    ///
    /// - [`GraphError::FileNotFound`] if the file does not exist
    /// - [`GraphError::Format`] on a malformed header or line
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        let path = normalize_path(path);
        let file = File::open(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => GraphError::FileNotFound(path.clone()),
            _ => GraphError::Io(err),
        })?;
        self.read_from(BufReader::new(file))?;

        info!(path = %path.display(), vertices = self.vertex_count(), "loaded graph");
        Ok(())
    }

    /// Serialize into any writer using the text format
    ///
    /// # Errors
    ///
    /// [`GraphError::UnsavableVertex`] if a label is empty or contains
    /// whitespace; nothing is written in that case.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        self.check_labels()?;
        writeln!(writer, "{}", if self.directed { DIRECTED } else { UNDIRECTED })?;
        writeln!(writer, "{}", if self.weighted { WEIGHTED } else { UNWEIGHTED })?;

        let mut written: HashSet<(&str, &str)> = HashSet::new();
        for (vertex, neighbors) in &self.adjacency {
            if neighbors.is_empty() {
                writeln!(writer, "{vertex}")?;
            }
            for neighbor in neighbors {
                let target = neighbor.target.as_str();
                let key = if vertex.as_str() <= target {
                    (vertex.as_str(), target)
                } else {
                    (target, vertex.as_str())
                };
                if !written.insert(key) {
                    continue;
                }
                match neighbor.weight.filter(|_| self.weighted) {
                    Some(weight) => writeln!(writer, "{vertex} {target} {weight}")?,
                    None => writeln!(writer, "{vertex} {target}")?,
                }
            }
        }
        Ok(())
    }

    /// Parse the text format from any buffered reader into this graph
    ///
    /// The graph is only updated once the whole input has been read; on
    /// error it is left as it was.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut next = self.clone();
        next.replay_lines(reader)?;
        *self = next;
        Ok(())
    }

    /// Labels must survive whitespace tokenization on reload
    fn check_labels(&self) -> Result<()> {
        match self
            .vertices()
            .find(|v| v.is_empty() || v.chars().any(char::is_whitespace))
        {
            Some(vertex) => Err(GraphError::UnsavableVertex(vertex.to_string())),
            None => Ok(()),
        }
    }

    fn replay_lines<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut lines = reader.lines().enumerate().map(|(i, line)| (i + 1, line));

        self.directed = match next_header(&mut lines, "graph kind")? {
            (_, h) if h == DIRECTED => true,
            (_, h) if h == UNDIRECTED => false,
            (line, h) => return Err(format_error(line, format!("unknown graph kind {h:?}"))),
        };
        self.weighted = match next_header(&mut lines, "weighted flag")? {
            (_, h) if h == WEIGHTED => true,
            (_, h) if h == UNWEIGHTED => false,
            (line, h) => return Err(format_error(line, format!("unknown weighted flag {h:?}"))),
        };

        for (number, line) in lines {
            let line = line?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.as_slice() {
                [] => {}
                [vertex] => self.add_vertex(vertex),
                [from, to] => self.replay_edge(number, from, to, None),
                [from, to, weight] => {
                    let weight = if self.weighted {
                        Some(parse_weight(number, weight)?)
                    } else {
                        None
                    };
                    self.replay_edge(number, from, to, weight);
                }
                _ => {
                    return Err(format_error(
                        number,
                        format!("expected at most 3 tokens, found {}", tokens.len()),
                    ))
                }
            }
        }
        Ok(())
    }

    fn replay_edge(&mut self, line: usize, from: &str, to: &str, weight: Option<Weight>) {
        self.add_vertex(from);
        self.add_vertex(to);
        if let Err(err) = self.add_edge(from, to, weight) {
            warn!(line, %err, "skipping rejected edge");
        }
    }
}

fn next_header<I>(lines: &mut I, what: &str) -> Result<(usize, String)>
where
    I: Iterator<Item = (usize, io::Result<String>)>,
{
    match lines.next() {
        Some((number, line)) => Ok((number, line?.trim().to_string())),
        None => Err(GraphError::Format {
            line: 0,
            message: format!("missing {what} header"),
        }),
    }
}

fn parse_weight(line: usize, token: &str) -> Result<Weight> {
    token
        .parse()
        .map_err(|_| format_error(line, format!("weight {token:?} is not an integer")))
}

fn format_error(line: usize, message: String) -> GraphError {
    GraphError::Format { line, message }
}

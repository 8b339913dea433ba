//! Numbered menu that drives the graphs in a [`Session`]
//!
//! Every option validates its answers before calling into the core and
//! reports graph errors to the user instead of failing; only a broken
//! input or output stream ends the loop with an error.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use graph_manager_core::{Graph, Weight};

use crate::input::Input;
use crate::session::Session;

/// Menu entries as `(choice, label)`
pub const OPTIONS: &[(&str, &str)] = &[
    ("1", "Create a new graph"),
    ("2", "Add a vertex to a graph"),
    ("3", "Add an edge to a graph"),
    ("4", "Remove a vertex from a graph"),
    ("5", "Remove an edge from a graph"),
    ("6", "Show graph information"),
    ("7", "Save a graph to a file"),
    ("8", "Load a graph from a file"),
    ("9", "Copy a graph"),
    ("10", "Show the out-degree of a vertex"),
    ("11", "Find vertices with arcs from both u and v"),
    ("12", "Remove edges leading to leaf vertices"),
    ("13", "Export a graph (dot/json)"),
    ("0", "Exit"),
];

/// Whether the loop keeps running after a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Prompt source plus output sink
pub struct Console<I, W> {
    input: I,
    out: W,
}

impl<I: Input, W: Write> Console<I, W> {
    pub fn new(input: I, out: W) -> Self {
        Self { input, out }
    }

    /// Ask for one trimmed answer; end of input reads as an empty answer
    fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.out.flush()?;
        let answer = self.input.read_line(prompt)?.unwrap_or_default();
        Ok(answer.trim().to_string())
    }

    /// Ask for a vertex label, upper-cased
    fn ask_vertex(&mut self, prompt: &str) -> anyhow::Result<String> {
        Ok(self.ask(prompt)?.to_uppercase())
    }

    fn ask_yes_no(&mut self, prompt: &str) -> anyhow::Result<bool> {
        Ok(self.ask(prompt)?.eq_ignore_ascii_case("y"))
    }

    fn say(&mut self, message: impl std::fmt::Display) -> anyhow::Result<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }
}

/// Run the menu until the user exits or input ends
pub fn run<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    console.say("Graph manager")?;

    loop {
        print_menu(console)?;
        console.out.flush()?;
        let Some(choice) = console.input.read_line("Choose an option: ")? else {
            break;
        };
        if dispatch(choice.trim(), session, console)? == Flow::Exit {
            break;
        }
    }

    console.say("Goodbye.")?;
    console.out.flush()?;
    Ok(())
}

fn print_menu<I: Input, W: Write>(console: &mut Console<I, W>) -> anyhow::Result<()> {
    console.say("")?;
    console.say("Menu:")?;
    for (choice, label) in OPTIONS {
        console.say(format_args!("{choice}. {label}"))?;
    }
    Ok(())
}

/// Execute one menu choice
pub fn dispatch<I: Input, W: Write>(
    choice: &str,
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<Flow> {
    match choice {
        "1" => create_graph(session, console)?,
        "2" => add_vertex(session, console)?,
        "3" => add_edge(session, console)?,
        "4" => remove_vertex(session, console)?,
        "5" => remove_edge(session, console)?,
        "6" => show_graph(session, console)?,
        "7" => save_graph(session, console)?,
        "8" => load_graph(session, console)?,
        "9" => copy_graph(session, console)?,
        "10" => out_degree(session, console)?,
        "11" => common_neighbors(session, console)?,
        "12" => prune_leaves(session, console)?,
        "13" => export_graph(session, console)?,
        "0" => return Ok(Flow::Exit),
        _ => console.say("Error: invalid choice, try again.")?,
    }
    Ok(Flow::Continue)
}

/// List graphs and let the user pick one by number
fn choose_graph<'s, I: Input, W: Write>(
    session: &'s mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<Option<&'s mut Graph>> {
    if session.is_empty() {
        console.say("No graphs available.")?;
        return Ok(None);
    }

    console.say("Available graphs:")?;
    for (position, name) in session.names().enumerate() {
        console.say(format_args!("{}. {}", position + 1, name))?;
    }

    let answer = console.ask("Choose a graph by number: ")?;
    if let Ok(position) = answer.parse::<usize>() {
        if let Some((_, graph)) = session.by_position(position) {
            return Ok(Some(graph));
        }
    }

    console.say("Error: invalid choice.")?;
    Ok(None)
}

/// Ask for a graph name that is not taken yet
fn ask_new_name<I: Input, W: Write>(
    session: &Session,
    console: &mut Console<I, W>,
    prompt: &str,
) -> anyhow::Result<Option<String>> {
    let name = console.ask(prompt)?;
    if name.is_empty() {
        console.say("Error: graph name cannot be empty.")?;
        return Ok(None);
    }
    if session.contains(&name) {
        console.say(format_args!("Graph {name} already exists."))?;
        return Ok(None);
    }
    Ok(Some(name))
}

fn is_single_letter(vertex: &str) -> bool {
    let mut chars = vertex.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

fn create_graph<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(name) = ask_new_name(session, console, "Name for the new graph: ")? else {
        return Ok(());
    };
    let directed = console.ask_yes_no("Directed graph (y/n)? ")?;
    let weighted = console.ask_yes_no("Weighted graph (y/n)? ")?;

    session.insert(&name, Graph::new(directed, weighted))?;
    console.say(format_args!("Graph {name} created."))
}

fn add_vertex<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(graph) = choose_graph(session, console)? else {
        return Ok(());
    };
    let vertex = console.ask_vertex("Enter a vertex (letter): ")?;
    if !is_single_letter(&vertex) {
        return console.say("Error: enter a single letter.");
    }

    if graph.has_vertex(&vertex) {
        console.say(format_args!("Vertex {vertex} already exists."))
    } else {
        graph.add_vertex(&vertex);
        console.say(format_args!("Vertex {vertex} added."))
    }
}

fn add_edge<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(graph) = choose_graph(session, console)? else {
        return Ok(());
    };
    let from = console.ask_vertex("Enter the first vertex: ")?;
    let to = console.ask_vertex("Enter the second vertex: ")?;
    if !graph.has_vertex(&from) || !graph.has_vertex(&to) {
        return console.say("Error: one or both vertices do not exist.");
    }

    let weight = if graph.is_weighted() {
        match console.ask("Enter the edge weight: ")?.parse::<Weight>() {
            Ok(weight) => Some(weight),
            Err(_) => return console.say("Error: enter a valid integer weight."),
        }
    } else {
        None
    };

    match graph.add_edge(&from, &to, weight) {
        Ok(_) => console.say(format_args!("Edge added between {from} and {to}.")),
        Err(err) => console.say(format_args!("Error: {err}.")),
    }
}

fn remove_vertex<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(graph) = choose_graph(session, console)? else {
        return Ok(());
    };
    let vertex = console.ask_vertex("Enter the vertex to remove: ")?;

    if graph.has_vertex(&vertex) {
        graph.remove_vertex(&vertex);
        console.say(format_args!("Vertex {vertex} removed."))
    } else {
        console.say(format_args!("Error: vertex {vertex} not found."))
    }
}

fn remove_edge<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(graph) = choose_graph(session, console)? else {
        return Ok(());
    };
    let from = console.ask_vertex("Enter the first vertex: ")?;
    let to = console.ask_vertex("Enter the second vertex: ")?;
    if !graph.has_vertex(&from) || !graph.has_vertex(&to) {
        return console.say("Error: one or both vertices do not exist.");
    }

    match graph.remove_edge(&from, &to) {
        Ok(()) => console.say(format_args!("Edge between {from} and {to} removed.")),
        Err(err) => console.say(format_args!("Error: {err}.")),
    }
}

fn show_graph<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(graph) = choose_graph(session, console)? else {
        return Ok(());
    };
    write!(console.out, "{graph}")?;
    Ok(())
}

fn save_graph<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(graph) = choose_graph(session, console)? else {
        return Ok(());
    };
    let file = console.ask("Enter the file name: ")?;
    if file.is_empty() {
        return console.say("Error: file name cannot be empty.");
    }

    match graph.save_to_file(Path::new(&file)) {
        Ok(path) => console.say(format_args!("Graph saved to file {}.", path.display())),
        Err(err) => console.say(format_args!("Error while saving: {err}.")),
    }
}

fn load_graph<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(name) = ask_new_name(session, console, "Name for the loaded graph: ")? else {
        return Ok(());
    };
    let file = console.ask("Enter the file name: ")?;

    match Graph::from_file(Path::new(&file)) {
        Ok(graph) => {
            session.insert(&name, graph)?;
            console.say(format_args!("Graph {name} loaded from file {file}."))
        }
        Err(err) => console.say(format_args!("Error while loading: {err}.")),
    }
}

fn copy_graph<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(graph) = choose_graph(session, console)? else {
        return Ok(());
    };
    let copy = graph.clone();

    let Some(name) = ask_new_name(session, console, "Name for the copy: ")? else {
        return Ok(());
    };
    session.insert(&name, copy)?;
    console.say(format_args!("Copy saved as {name}."))
}

fn out_degree<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(graph) = choose_graph(session, console)? else {
        return Ok(());
    };
    let vertex = console.ask_vertex("Enter a vertex: ")?;

    match graph.out_degree(&vertex) {
        Ok(degree) => console.say(format_args!("Out-degree of vertex {vertex}: {degree}")),
        Err(err) => console.say(format_args!("Error: {err}.")),
    }
}

fn common_neighbors<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(graph) = choose_graph(session, console)? else {
        return Ok(());
    };
    let u = console.ask_vertex("Enter the first vertex (u): ")?;
    let v = console.ask_vertex("Enter the second vertex (v): ")?;

    match graph.common_incoming_neighbors(&u, &v) {
        Ok(common) if common.is_empty() => {
            console.say(format_args!("No vertices with incoming arcs from {u} and {v}."))
        }
        Ok(common) => console.say(format_args!(
            "Vertices with incoming arcs from {u} and {v}: {}",
            common.join(", ")
        )),
        Err(err) => console.say(format_args!("Error: {err}.")),
    }
}

fn prune_leaves<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(graph) = choose_graph(session, console)? else {
        return Ok(());
    };

    for (leaf, _) in graph.prune_leaf_edges() {
        console.say(format_args!("Removing the edge leading to leaf vertex {leaf}."))?;
    }
    console.say("Edges leading to leaf vertices were removed.")
}

fn export_graph<I: Input, W: Write>(
    session: &mut Session,
    console: &mut Console<I, W>,
) -> anyhow::Result<()> {
    let Some(graph) = choose_graph(session, console)? else {
        return Ok(());
    };
    let format = console.ask("Format (dot/json): ")?.to_lowercase();

    match format.as_str() {
        "dot" => console.say(graph.to_dot()),
        "json" => {
            let json =
                serde_json::to_string_pretty(&*graph).context("failed to serialize graph")?;
            console.say(json)
        }
        other => console.say(format_args!("Error: unknown export format {other:?}.")),
    }
}

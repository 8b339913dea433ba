use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use graph_manager_core::Graph;
use tracing_subscriber::EnvFilter;

mod input;
mod menu;
mod session;

use input::LineEditor;
use menu::Console;
use session::Session;

/// graphs - Interactive manager for small in-memory graphs
#[derive(Parser)]
#[command(name = "graphs")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Build, query and persist small graphs from a numbered menu", long_about = None)]
struct Cli {
    /// Preload a graph file into the session (repeatable)
    #[arg(long = "load", value_name = "NAME=PATH", value_parser = parse_preload)]
    preload: Vec<(String, PathBuf)>,

    /// Keep line-editing history in this file
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    /// Log core activity at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_preload(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
            Ok((name.trim().to_string(), PathBuf::from(path.trim())))
        }
        _ => Err(format!("expected NAME=PATH, got {value:?}")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut session = Session::new();
    for (name, path) in &cli.preload {
        let graph = Graph::from_file(path)
            .with_context(|| format!("failed to load graph {name} from {}", path.display()))?;
        session.insert(name, graph)?;
    }
    if !session.is_empty() {
        tracing::info!(graphs = session.len(), "preloaded graphs");
    }

    let mut editor = LineEditor::new(cli.history.clone())?;
    let result = {
        let mut console = Console::new(&mut editor, io::stdout().lock());
        menu::run(&mut session, &mut console)
    };
    editor.save_history();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preload() {
        assert_eq!(
            parse_preload("roads=data/roads.txt").unwrap(),
            ("roads".to_string(), PathBuf::from("data/roads.txt"))
        );
        assert!(parse_preload("roads").is_err());
        assert!(parse_preload("=x").is_err());
    }

    #[test]
    fn test_cli_accepts_repeated_load() {
        let cli = Cli::try_parse_from(["graphs", "--load", "a=a.txt", "--load", "b=b", "-v"])
            .unwrap();

        assert_eq!(cli.preload.len(), 2);
        assert!(cli.verbose);
        assert!(cli.history.is_none());
    }
}

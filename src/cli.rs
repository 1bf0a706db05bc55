use crate::analysis::Collection;
use crate::graph::Direction;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "deckmap")]
#[command(about = "Inspect, graph and diff Kong decK configuration dumps")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to analyze when no subcommand is given
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Summarize services, routes, consumers and plugins
    Analyze(AnalyzeArgs),

    /// Print the YAML of a collection, plugin or graph node
    Show(ShowArgs),

    /// Render the configuration graph, or serve the interactive viewer
    Graph(GraphArgs),

    /// Compare two configuration files, ignoring key order
    Diff(DiffArgs),

    /// Generate a starter .deckmap.toml configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// decK dump to analyze
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// decK dump to read
    pub file: PathBuf,

    #[command(subcommand)]
    pub target: ShowTarget,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ShowTarget {
    /// Every service
    Services,

    /// Every route, top-level and nested under services
    Routes,

    /// Every consumer
    Consumers,

    /// A plugin, located by name and scope
    Plugin {
        name: String,

        /// Attachment level of the plugin
        #[arg(long, default_value = "global")]
        scope: ScopeKind,

        /// Owning service or route name (required for service and route scope)
        #[arg(long)]
        scope_name: Option<String>,
    },

    /// The entity behind a graph node id, e.g. route_orders_list
    Node { id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// decK dump to graph (optional with --serve: upload from the browser)
    pub file: Option<PathBuf>,

    /// Flowchart direction (overrides .deckmap.toml)
    #[arg(long)]
    pub direction: Option<Direction>,

    /// Write Mermaid text to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export the graph as a static HTML page
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Start the interactive viewer
    #[arg(long)]
    pub serve: bool,

    /// Port for the viewer (overrides .deckmap.toml)
    #[arg(long)]
    pub port: Option<u16>,

    /// Open a browser once the viewer is up
    #[arg(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DiffArgs {
    /// Original file
    pub old: PathBuf,

    /// Modified file
    pub new: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "unified")]
    pub format: DiffFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with status 1 when the files differ
    #[arg(long)]
    pub exit_code: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Directory in which to create .deckmap.toml
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DiffFormat {
    #[default]
    Unified,
    /// Two columns, old on the left
    Split,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ScopeKind {
    #[default]
    Global,
    Service,
    Route,
}

impl ShowTarget {
    /// Collection behind a services, routes or consumers target.
    pub fn collection(&self) -> Option<Collection> {
        match self {
            ShowTarget::Services => Some(Collection::Services),
            ShowTarget::Routes => Some(Collection::Routes),
            ShowTarget::Consumers => Some(Collection::Consumers),
            _ => None,
        }
    }
}

impl ScopeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeKind::Global => "global",
            ScopeKind::Service => "service",
            ScopeKind::Route => "route",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_file_argument() {
        let cli = Cli::try_parse_from(["deckmap", "kong.yaml"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("kong.yaml")));
    }

    #[test]
    fn test_show_plugin_args() {
        let cli = Cli::try_parse_from([
            "deckmap", "show", "kong.yaml", "plugin", "key-auth", "--scope", "route", "--scope-name", "r1",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Show(args)) => match args.target {
                ShowTarget::Plugin { name, scope, scope_name } => {
                    assert_eq!(name, "key-auth");
                    assert_eq!(scope, ScopeKind::Route);
                    assert_eq!(scope_name.as_deref(), Some("r1"));
                }
                other => panic!("unexpected target: {:?}", other),
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_show_collection_target() {
        let cli = Cli::try_parse_from(["deckmap", "show", "kong.yaml", "routes"]).unwrap();
        match cli.command {
            Some(Command::Show(args)) => {
                assert_eq!(args.target.collection(), Some(Collection::Routes));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_diff_args() {
        let cli = Cli::try_parse_from(["deckmap", "diff", "a.yaml", "b.yaml", "-f", "split", "--exit-code"])
            .unwrap();
        match cli.command {
            Some(Command::Diff(args)) => {
                assert_eq!(args.format, DiffFormat::Split);
                assert!(args.exit_code);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

pub mod analysis;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod diff;
pub mod fs;
pub mod graph;
pub mod model;
pub mod output;
pub mod style;

pub use analysis::{Summary, find_plugin, summarize};
pub use api::{DeckError, analyze_file, diff_files, graph_file, load_config, load_document};
pub use cli::Cli;
pub use commands::{cmd_analyze, cmd_diff, cmd_graph, cmd_init, cmd_show};
pub use config::Config;
pub use diff::{ConfigDiff, diff_documents};
pub use graph::{ConfigGraph, Direction, MermaidOptions, render_mermaid};
pub use model::{ConfigDocument, PluginReference, PluginScope};

mod analyze;
mod diff;
mod graph;
mod init;
mod show;

pub use analyze::{cmd_analyze, cmd_analyze_with_fs};
pub use diff::{cmd_diff, cmd_diff_with_fs};
pub use graph::{cmd_graph, cmd_graph_with_fs};
pub use init::{cmd_init, cmd_init_with_fs};
pub use show::{cmd_show, cmd_show_with_fs};

use crate::config::Config;
use crate::fs::FileSystem;
use crate::style;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Shared context for command execution.
pub struct CommandContext {
    pub config: Config,
}

impl CommandContext {
    /// Load `.deckmap.toml` from the working directory. A broken config file
    /// is reported and replaced by defaults.
    pub fn new() -> Self {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::in_dir(&dir)
    }

    pub fn in_dir(dir: &Path) -> Self {
        let config = Config::load(dir).unwrap_or_else(|e| {
            style::warning(&format!("{}. Using defaults.", e));
            Config::default()
        });
        Self { config }
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Write command output to a file, or to stdout when no file was given.
/// `markdown` output is rendered with terminal styling when going to stdout.
fn emit(fs: &dyn FileSystem, output: Option<&Path>, text: &str, markdown: bool) -> i32 {
    match output {
        Some(path) => {
            if let Err(e) = fs.write(path, text) {
                style::error(&format!("Could not write {}: {}", style::path(path), e));
                return 1;
            }
            style::success(&format!("Wrote {}", style::path(path)));
            0
        }
        None => {
            let mut stdout = io::stdout();
            let result = if markdown {
                style::render_markdown(text, &mut stdout)
            } else {
                write!(stdout, "{}", text)
            };
            if let Err(e) = result {
                style::error(&format!("Failed to write output: {}", e));
                return 1;
            }
            0
        }
    }
}

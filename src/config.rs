use crate::graph::Direction;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = ".deckmap.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub graph: GraphSettings,
    pub serve: ServeSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphSettings {
    pub direction: Direction,
    /// Mermaid theme used by the browser viewer.
    pub theme: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServeSettings {
    pub port: u16,
    pub open: bool,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    graph: Option<RawGraph>,
    serve: Option<RawServe>,
}

#[derive(Debug, Deserialize)]
struct RawGraph {
    direction: Option<Direction>,
    theme: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawServe {
    port: Option<u16>,
    open: Option<bool>,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            direction: Direction::Td,
            theme: "neutral".to_string(),
        }
    }
}

impl Default for ServeSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            open: false,
        }
    }
}

impl Config {
    /// Load `.deckmap.toml` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let graph = match raw.graph {
            Some(g) => GraphSettings {
                direction: g.direction.unwrap_or(defaults.graph.direction),
                theme: g.theme.unwrap_or(defaults.graph.theme),
            },
            None => defaults.graph,
        };

        let serve = match raw.serve {
            Some(s) => ServeSettings {
                port: s.port.unwrap_or(defaults.serve.port),
                open: s.open.unwrap_or(defaults.serve.open),
            },
            None => defaults.serve,
        };

        Ok(Self { graph, serve })
    }
}

/// Commented starter file written by `deckmap init`.
pub fn generate_config_template() -> String {
    r#"# deckmap configuration

[graph]
# Flowchart direction: TD, LR, BT or RL
direction = "TD"
# Mermaid theme for the browser viewer
theme = "neutral"

[serve]
port = 3000
# Open the viewer in a browser on start
open = false
"#
    .to_string()
}

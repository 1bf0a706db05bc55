//! Mermaid flowchart rendering of a [`ConfigGraph`].

use super::data::{ConfigGraph, GraphNode, NodeKind};
use serde::Deserialize;
use std::fmt::Write as _;

/// Flowchart layout direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Td,
    Lr,
    Bt,
    Rl,
}

impl Direction {
    fn keyword(self) -> &'static str {
        match self {
            Direction::Td => "TD",
            Direction::Lr => "LR",
            Direction::Bt => "BT",
            Direction::Rl => "RL",
        }
    }
}

/// Maps a node to the link its click should follow.
pub type ClickHandler<'a> = &'a dyn Fn(&GraphNode) -> String;

/// Rendering options. Click behavior is opt-in and owned by the caller.
#[derive(Clone, Copy, Default)]
pub struct MermaidOptions<'a> {
    pub direction: Direction,
    pub on_click: Option<ClickHandler<'a>>,
}

const CLASS_DEFS: &[(&str, &str)] = &[
    ("service", "fill:#e0f2fe,stroke:#0ea5e9,stroke-width:2px,color:#0c4a6e"),
    ("route", "fill:#dcfce7,stroke:#22c55e,stroke-width:1px,color:#15803d"),
    ("plugin", "fill:#fefce8,stroke:#eab308,stroke-width:1px,color:#ca8a04"),
];

/// Render a graph as Mermaid flowchart text.
pub fn render(graph: &ConfigGraph, options: &MermaidOptions<'_>) -> String {
    let mut out = String::with_capacity(1024);
    let _ = writeln!(out, "graph {}", options.direction.keyword());

    if graph.is_empty() {
        out.push_str("    empty[\"No services or plugins in this configuration\"]\n");
        return out;
    }

    for (class, style) in CLASS_DEFS {
        let _ = writeln!(out, "    classDef {} {}", class, style);
    }

    for node in &graph.global_plugins {
        write_node(&mut out, node, options, "    ");
    }

    for cluster in &graph.clusters {
        let _ = writeln!(
            out,
            "    subgraph cluster_{}[\"Service: {}\"]",
            super::data::sanitize(&cluster.service),
            escape_label(&cluster.service)
        );
        for node in &cluster.nodes {
            write_node(&mut out, node, options, "        ");
        }
        for edge in &cluster.edges {
            let _ = writeln!(out, "        {} --> {}", edge.from, edge.to);
        }
        out.push_str("    end\n");
    }

    out
}

fn write_node(out: &mut String, node: &GraphNode, options: &MermaidOptions<'_>, indent: &str) {
    let label = escape_label(&node.label);
    let _ = match node.kind {
        NodeKind::GlobalPlugin => writeln!(out, "{indent}{}(\"{label}\"):::{}", node.id, node.kind.class()),
        _ => writeln!(out, "{indent}{}[\"{label}\"]:::{}", node.id, node.kind.class()),
    };
    if let Some(on_click) = options.on_click {
        let _ = writeln!(
            out,
            "{indent}click {} href \"{}\" \"See details\"",
            node.id,
            escape_label(&on_click(node))
        );
    }
}

/// Mermaid labels are double-quoted; quotes inside must use entity codes.
fn escape_label(s: &str) -> String {
    s.replace('"', "#quot;")
}

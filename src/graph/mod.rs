mod assets;
mod data;
mod mermaid;
mod routes;
mod session;

pub use data::{
    ConfigGraph, GraphEdge, GraphNode, NodeDetail, NodeEntity, NodeKind, ServiceCluster, node_id,
    sanitize,
};
pub use mermaid::{ClickHandler, Direction, MermaidOptions, render as render_mermaid};
pub use routes::{AppState, router, serve};
pub use session::Session;

/// Standalone HTML page embedding pre-rendered Mermaid text.
pub fn generate_static_html(mermaid_text: &str, title: &str, theme: &str) -> String {
    let escape = |s: &str| {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    };
    let theme = serde_json::to_string(theme).unwrap_or_else(|_| "\"neutral\"".to_string());
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
</head>
<body>
    <h1 style="font-family: sans-serif;">{title}</h1>
    <pre class="mermaid">
{graph}</pre>
    <script type="module">
        import mermaid from 'https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.esm.min.mjs';
        mermaid.initialize({{ startOnLoad: true, theme: {theme} }});
    </script>
</body>
</html>
"#,
        title = escape(title),
        graph = escape(mermaid_text),
        theme = theme,
    )
}

use crate::cli::GraphArgs;
use crate::fs::{FileSystem, default_fs};
use crate::graph::{AppState, MermaidOptions, Session, generate_static_html, render_mermaid};
use crate::style;

use super::{CommandContext, emit};

pub fn cmd_graph(args: GraphArgs) -> i32 {
    cmd_graph_with_fs(args, default_fs(), &CommandContext::new())
}

pub fn cmd_graph_with_fs(args: GraphArgs, fs: &dyn FileSystem, ctx: &CommandContext) -> i32 {
    let mut settings = ctx.config.graph.clone();
    if let Some(direction) = args.direction {
        settings.direction = direction;
    }

    let session = match &args.file {
        Some(path) => match fs.load_document(path) {
            Ok(doc) => Some(Session::from_document(path.display().to_string(), doc)),
            Err(e) => {
                style::error(&e.to_string());
                return 1;
            }
        },
        None => None,
    };

    if args.serve {
        let port = args.port.unwrap_or(ctx.config.serve.port);
        let open_browser = args.open || ctx.config.serve.open;

        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                style::error(&format!("Failed to start async runtime: {}", e));
                return 1;
            }
        };
        let state = AppState::new(settings, session);
        if let Err(e) = rt.block_on(crate::graph::serve(state, port, open_browser)) {
            style::error(&format!("Server failed: {}", e));
            return 1;
        }
        return 0;
    }

    let Some(session) = session else {
        style::error("A configuration file is required unless --serve is given");
        return 1;
    };

    let options = MermaidOptions {
        direction: settings.direction,
        on_click: None,
    };
    let mermaid = render_mermaid(&session.graph, &options);

    if let Some(export_path) = &args.export {
        let html = generate_static_html(&mermaid, &session.source, &settings.theme);
        if let Err(e) = fs.write(export_path, &html) {
            style::error(&format!("Failed to write export file: {}", e));
            return 1;
        }
        style::success(&format!("Graph exported to: {}", style::path(export_path)));
        return 0;
    }

    emit(fs, args.output.as_deref(), &mermaid, false)
}

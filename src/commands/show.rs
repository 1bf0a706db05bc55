use crate::analysis::{Detail, collection_detail, node_detail, plugin_detail};
use crate::cli::{ShowArgs, ShowTarget};
use crate::fs::{FileSystem, default_fs};
use crate::graph::ConfigGraph;
use crate::model::{ConfigDocument, PluginReference, PluginScope};
use crate::style;

pub fn cmd_show(args: ShowArgs) -> i32 {
    cmd_show_with_fs(args, default_fs())
}

pub fn cmd_show_with_fs(args: ShowArgs, fs: &dyn FileSystem) -> i32 {
    let doc = match fs.load_document(&args.file) {
        Ok(doc) => doc,
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };

    let detail = match resolve(&doc, &args.target) {
        Ok(detail) => detail,
        Err(message) => {
            style::error(&message);
            return 1;
        }
    };

    if style::is_terminal() {
        style::section(&detail.title);
    }
    match &detail.yaml {
        Some(yaml) => print!("{}", yaml),
        // a miss is not an error
        None => println!("No data"),
    }
    0
}

/// Look up the entity a show target names.
fn resolve(doc: &ConfigDocument, target: &ShowTarget) -> Result<Detail, String> {
    let detail = match target {
        ShowTarget::Plugin {
            name,
            scope,
            scope_name,
        } => {
            let scope = PluginScope::from_parts(scope.as_str(), scope_name.as_deref())
                .ok_or_else(|| format!("--scope {} requires --scope-name", scope.as_str()))?;
            plugin_detail(doc, &PluginReference::new(name.as_str(), scope))
        }
        ShowTarget::Node { id } => node_detail(&ConfigGraph::build(doc), id),
        collection => match collection.collection() {
            Some(kind) => collection_detail(doc, kind),
            None => return Err("Unsupported show target".to_string()),
        },
    };
    detail.map_err(|e| format!("Failed to render YAML: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ScopeKind;
    use crate::fs::mock::MockFs;
    use std::path::PathBuf;

    const DOC: &str = r#"
routes:
  - name: legacy
services:
  - name: orders
    plugins:
      - name: rate-limiting
        config:
          minute: 5
    routes:
      - name: list
        paths: [/orders]
"#;

    fn doc() -> ConfigDocument {
        ConfigDocument::parse(DOC).unwrap()
    }

    fn plugin(name: &str, scope: ScopeKind, scope_name: Option<&str>) -> ShowTarget {
        ShowTarget::Plugin {
            name: name.to_string(),
            scope,
            scope_name: scope_name.map(str::to_string),
        }
    }

    #[test]
    fn test_routes_include_nested() {
        let detail = resolve(&doc(), &ShowTarget::Routes).unwrap();
        let yaml = detail.yaml.unwrap();
        assert!(yaml.find("legacy").unwrap() < yaml.find("list").unwrap());
    }

    #[test]
    fn test_service_plugin() {
        let detail = resolve(&doc(), &plugin("rate-limiting", ScopeKind::Service, Some("orders"))).unwrap();
        assert_eq!(detail.title, "Plugin: rate-limiting");
        assert!(detail.yaml.unwrap().contains("minute: 5"));
    }

    #[test]
    fn test_plugin_miss_is_not_an_error() {
        let detail = resolve(&doc(), &plugin("rate-limiting", ScopeKind::Global, None)).unwrap();
        assert!(!detail.is_found());
    }

    #[test]
    fn test_scoped_plugin_requires_owner() {
        let err = resolve(&doc(), &plugin("rate-limiting", ScopeKind::Route, None)).unwrap_err();
        assert!(err.contains("--scope-name"));
    }

    #[test]
    fn test_node_lookup() {
        let detail = resolve(&doc(), &ShowTarget::Node { id: "route_orders_list".to_string() }).unwrap();
        assert!(detail.yaml.unwrap().contains("/orders"));

        let miss = resolve(&doc(), &ShowTarget::Node { id: "route_orders_nope".to_string() }).unwrap();
        assert_eq!(miss.title, "route_orders_nope");
        assert!(!miss.is_found());
    }

    #[test]
    fn test_exit_codes() {
        let fs = MockFs::with_files([("/kong.yaml", DOC)]);
        let args = |target| ShowArgs {
            file: PathBuf::from("/kong.yaml"),
            target,
        };

        assert_eq!(cmd_show_with_fs(args(ShowTarget::Services), &fs), 0);
        assert_eq!(cmd_show_with_fs(args(plugin("nope", ScopeKind::Global, None)), &fs), 0);
        assert_eq!(cmd_show_with_fs(args(plugin("x", ScopeKind::Service, None)), &fs), 1);

        let missing = ShowArgs {
            file: PathBuf::from("/missing.yaml"),
            target: ShowTarget::Consumers,
        };
        assert_eq!(cmd_show_with_fs(missing, &fs), 1);
    }
}

use crate::model::{ConfigDocument, PluginReference, PluginScope};
use serde::Serialize;

/// Counts and plugin listing for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub service_count: usize,
    /// Top-level routes plus every service's routes. A document that uses
    /// both forms has both counted.
    pub route_count: usize,
    pub consumer_count: usize,
    pub plugins: Vec<PluginReference>,
}

/// Walk the document once and collect counts and plugin references.
///
/// Plugins are listed global first, then per service: the service's own
/// plugins followed by the plugins of each of its routes.
pub fn summarize(doc: &ConfigDocument) -> Summary {
    let route_count = doc.routes.len() + doc.services.iter().map(|s| s.routes.len()).sum::<usize>();

    let mut plugins: Vec<PluginReference> = doc
        .plugins
        .iter()
        .map(|p| PluginReference::global(&p.name))
        .collect();

    for service in &doc.services {
        plugins.extend(service.plugins.iter().map(|p| {
            PluginReference::new(&p.name, PluginScope::Service(service.name.clone()))
        }));
        for route in &service.routes {
            plugins.extend(
                route
                    .plugins
                    .iter()
                    .map(|p| PluginReference::new(&p.name, PluginScope::Route(route.name.clone()))),
            );
        }
    }

    Summary {
        service_count: doc.services.len(),
        route_count,
        consumer_count: doc.consumers.len(),
        plugins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> ConfigDocument {
        ConfigDocument::parse(yaml).unwrap()
    }

    #[test]
    fn test_single_service_example() {
        let summary = summarize(&doc(
            r#"
services:
  - name: svc-a
    routes:
      - name: r1
        plugins:
          - name: key-auth
plugins:
  - name: cors
"#,
        ));

        assert_eq!(summary.service_count, 1);
        assert_eq!(summary.route_count, 1);
        assert_eq!(summary.consumer_count, 0);
        assert_eq!(
            summary.plugins,
            vec![
                PluginReference::global("cors"),
                PluginReference::new("key-auth", PluginScope::Route("r1".into())),
            ]
        );
    }

    #[test]
    fn test_route_count_sums_both_forms() {
        let summary = summarize(&doc(
            r#"
routes:
  - name: legacy-1
  - name: legacy-2
services:
  - name: a
    routes:
      - name: a1
      - name: a2
      - name: a3
  - name: b
    routes:
      - name: b1
  - name: c
"#,
        ));
        assert_eq!(summary.service_count, 3);
        assert_eq!(summary.route_count, 2 + 3 + 1);
    }

    #[test]
    fn test_plugin_order_and_count() {
        let summary = summarize(&doc(
            r#"
plugins:
  - name: g1
  - name: g2
consumers:
  - username: alice
  - username: bob
services:
  - name: s1
    plugins:
      - name: s1p
    routes:
      - name: r1
        plugins:
          - name: r1p1
          - name: r1p2
  - name: s2
    routes:
      - name: r2
        plugins:
          - name: r2p
    plugins:
      - name: s2p
"#,
        ));

        let listed: Vec<String> = summary.plugins.iter().map(|p| p.to_string()).collect();
        assert_eq!(
            listed,
            vec![
                "g1 (global)",
                "g2 (global)",
                "s1p (service on s1)",
                "r1p1 (route on r1)",
                "r1p2 (route on r1)",
                "s2p (service on s2)",
                "r2p (route on r2)",
            ]
        );
        assert_eq!(summary.plugins.len(), 2 + 2 + 3);
        assert_eq!(summary.consumer_count, 2);
    }

    #[test]
    fn test_empty_document_shape() {
        let summary = summarize(&doc("_format_version: '3.0'\n"));
        assert_eq!(summary.service_count, 0);
        assert_eq!(summary.route_count, 0);
        assert!(summary.plugins.is_empty());
    }
}

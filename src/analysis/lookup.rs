use crate::model::{ConfigDocument, Plugin, PluginReference, PluginScope};

/// Resolve a plugin reference back to the plugin it was extracted from.
///
/// The document is searched again on every call. For route scope the first
/// service that owns a route with the given name wins, even when later
/// services have a route of the same name.
pub fn find_plugin<'a>(doc: &'a ConfigDocument, reference: &PluginReference) -> Option<&'a Plugin> {
    let name = reference.name.as_str();
    match &reference.scope {
        PluginScope::Global => doc.plugins.iter().find(|p| p.name == name),
        PluginScope::Service(service) => doc.service(service)?.plugin(name),
        PluginScope::Route(route) => doc
            .services
            .iter()
            .find_map(|s| s.route(route))?
            .plugin(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summarize;

    const DOC: &str = r#"
plugins:
  - name: cors
    config:
      origins: ["*"]
services:
  - name: orders
    plugins:
      - name: rate-limiting
        config:
          minute: 10
    routes:
      - name: list
        plugins:
          - name: key-auth
            config:
              key_names: [apikey]
  - name: billing
    routes:
      - name: list
        plugins:
          - name: key-auth
            config:
              key_names: [token]
"#;

    #[test]
    fn test_resolves_each_scope() {
        let doc = ConfigDocument::parse(DOC).unwrap();

        let cors = find_plugin(&doc, &PluginReference::global("cors")).unwrap();
        assert!(cors.config.contains_key("config"));

        let rl = find_plugin(
            &doc,
            &PluginReference::new("rate-limiting", PluginScope::Service("orders".into())),
        )
        .unwrap();
        assert_eq!(rl.name, "rate-limiting");
    }

    #[test]
    fn test_route_scope_first_match_wins() {
        let doc = ConfigDocument::parse(DOC).unwrap();
        let found = find_plugin(
            &doc,
            &PluginReference::new("key-auth", PluginScope::Route("list".into())),
        )
        .unwrap();
        let yaml = crate::model::to_yaml(found).unwrap();
        assert!(yaml.contains("apikey"));
        assert!(!yaml.contains("token"));
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let doc = ConfigDocument::parse(DOC).unwrap();
        assert!(find_plugin(&doc, &PluginReference::global("acl")).is_none());
        assert!(
            find_plugin(
                &doc,
                &PluginReference::new("cors", PluginScope::Service("missing".into()))
            )
            .is_none()
        );
        assert!(
            find_plugin(
                &doc,
                &PluginReference::new("key-auth", PluginScope::Route("nope".into()))
            )
            .is_none()
        );
    }

    #[test]
    fn test_every_extracted_reference_resolves() {
        let doc = ConfigDocument::parse(
            r#"
plugins: [{name: g}]
services:
  - name: s1
    plugins: [{name: p1}, {name: p2}]
    routes:
      - name: r1
        plugins: [{name: p1}]
      - name: r2
        plugins: [{name: p3}]
  - name: s2
    plugins: [{name: p1}]
"#,
        )
        .unwrap();

        let summary = summarize(&doc);
        assert_eq!(summary.plugins.len(), 6);
        for reference in &summary.plugins {
            let plugin = find_plugin(&doc, reference);
            assert_eq!(plugin.map(|p| p.name.as_str()), Some(reference.name.as_str()));
        }
    }
}

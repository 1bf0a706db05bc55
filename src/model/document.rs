use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Failure to turn raw file content into a [`ConfigDocument`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),
    #[error("Document is empty")]
    Empty,
    #[error("Unexpected configuration shape: {0}")]
    Schema(#[source] serde_yaml::Error),
}

/// A decK dump: the root of the configuration tree.
///
/// Every collection is optional in the source file. Absent and `null`
/// collections both deserialize to empty vectors, so traversal code never
/// has to distinguish the two.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Everything the tool does not model (`_format_version`, upstreams, ...).
    #[serde(flatten)]
    pub extra: Mapping,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,
    /// Legacy flat form: routes declared outside any service.
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    /// Plugins with global scope.
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Plugin>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub consumers: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(flatten)]
    pub extra: Mapping,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Plugin>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    #[serde(flatten)]
    pub extra: Mapping,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Plugin>,
}

/// A plugin attachment. Its configuration is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    pub name: String,
    #[serde(flatten)]
    pub config: Mapping,
}

impl ConfigDocument {
    /// Parse raw YAML text into a typed document.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        Self::from_tree(parse_tree(content)?)
    }

    /// Convert an already-parsed YAML tree into a typed document.
    pub fn from_tree(tree: Value) -> Result<Self, ParseError> {
        serde_yaml::from_value(tree).map_err(ParseError::Schema)
    }

    /// Top-level routes followed by every service's routes, in document order.
    pub fn all_routes(&self) -> Vec<&Route> {
        self.routes
            .iter()
            .chain(self.services.iter().flat_map(|s| s.routes.iter()))
            .collect()
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }
}

impl Service {
    pub fn plugin(&self, name: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.name == name)
    }

    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }
}

impl Route {
    pub fn plugin(&self, name: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.name == name)
    }
}

/// Parse YAML text into an untyped tree, rejecting empty documents.
/// Merge keys (`<<: *anchor`) are expanded.
pub fn parse_tree(content: &str) -> Result<Value, ParseError> {
    let mut tree: Value = serde_yaml::from_str(content).map_err(ParseError::Yaml)?;
    if tree.is_null() {
        return Err(ParseError::Empty);
    }
    tree.apply_merge().map_err(ParseError::Yaml)?;
    Ok(tree)
}

/// Serialize any entity back to YAML for display.
pub fn to_yaml<T: Serialize + ?Sized>(entity: &T) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(entity)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let doc = ConfigDocument::parse(
            r#"
_format_version: "3.0"
services:
  - name: svc-a
    host: example.com
    port: 443
    routes:
      - name: r1
        paths: [/a]
        plugins:
          - name: key-auth
            config:
              key_names: [apikey]
plugins:
  - name: cors
"#,
        )
        .unwrap();

        assert_eq!(doc.services.len(), 1);
        assert_eq!(doc.services[0].name, "svc-a");
        assert_eq!(doc.services[0].routes[0].plugins[0].name, "key-auth");
        assert_eq!(doc.plugins[0].name, "cors");
        assert!(doc.extra.contains_key("_format_version"));
        assert!(doc.services[0].extra.contains_key("host"));
    }

    #[test]
    fn test_absent_and_null_collections_are_empty() {
        let doc = ConfigDocument::parse("services:\nplugins: ~\n_format_version: '3.0'\n").unwrap();
        assert!(doc.services.is_empty());
        assert!(doc.plugins.is_empty());
        assert!(doc.consumers.is_empty());
        assert!(doc.routes.is_empty());

        let doc = ConfigDocument::parse("services:\n  - name: bare\n    routes: null\n").unwrap();
        assert!(doc.services[0].routes.is_empty());
        assert!(doc.services[0].plugins.is_empty());
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(
            ConfigDocument::parse("services: [unclosed"),
            Err(ParseError::Yaml(_))
        ));
        assert!(matches!(ConfigDocument::parse(""), Err(ParseError::Empty)));
        assert!(matches!(
            ConfigDocument::parse("- just\n- a list\n"),
            Err(ParseError::Schema(_))
        ));
        assert!(matches!(
            ConfigDocument::parse("plugins:\n  - config: {}\n"),
            Err(ParseError::Schema(_))
        ));
    }

    #[test]
    fn test_merge_keys_are_expanded() {
        let doc = ConfigDocument::parse(
            r#"
common: &auth
  plugins:
    - name: key-auth
services:
  - name: s
    routes:
      - <<: *auth
        name: r1
"#,
        )
        .unwrap();
        let route = doc.services[0].route("r1").unwrap();
        assert!(route.plugin("key-auth").is_some());
        assert!(!route.extra.contains_key("<<"));
    }

    #[test]
    fn test_all_routes_includes_legacy_form() {
        let doc = ConfigDocument::parse(
            "routes:\n  - name: top\nservices:\n  - name: s\n    routes:\n      - name: nested\n",
        )
        .unwrap();
        let names: Vec<_> = doc.all_routes().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["top", "nested"]);
    }

    #[test]
    fn test_plugin_round_trips_configuration() {
        let doc = ConfigDocument::parse(
            "plugins:\n  - name: rate-limiting\n    config:\n      minute: 5\n    enabled: true\n",
        )
        .unwrap();
        let yaml = to_yaml(&doc.plugins[0]).unwrap();
        assert!(yaml.starts_with("name: rate-limiting\n"));
        assert!(yaml.contains("minute: 5"));
        assert!(yaml.contains("enabled: true"));
    }
}

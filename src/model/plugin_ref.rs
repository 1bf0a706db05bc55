use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a plugin is attached. Derived from its position in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "scope_name", rename_all = "lowercase")]
pub enum PluginScope {
    Global,
    Service(String),
    Route(String),
}

impl PluginScope {
    /// Scope kind without the owning entity, as shown in listings.
    pub fn kind(&self) -> &'static str {
        match self {
            PluginScope::Global => "global",
            PluginScope::Service(_) => "service",
            PluginScope::Route(_) => "route",
        }
    }

    /// Name of the owning service or route, if scoped.
    pub fn scope_name(&self) -> Option<&str> {
        match self {
            PluginScope::Global => None,
            PluginScope::Service(name) | PluginScope::Route(name) => Some(name),
        }
    }

    /// Rebuild a scope from its kind and owner name, as received from a
    /// command line or query string. Scoped kinds require an owner.
    pub fn from_parts(kind: &str, scope_name: Option<&str>) -> Option<Self> {
        match (kind, scope_name) {
            ("global", _) => Some(PluginScope::Global),
            ("service", Some(name)) => Some(PluginScope::Service(name.to_string())),
            ("route", Some(name)) => Some(PluginScope::Route(name.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for PluginScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope_name() {
            Some(name) => write!(f, "{} on {}", self.kind(), name),
            None => write!(f, "{}", self.kind()),
        }
    }
}

/// A pointer to a plugin, produced by extraction and resolved back to the
/// full plugin on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PluginReference {
    pub name: String,
    #[serde(flatten)]
    pub scope: PluginScope,
}

impl PluginReference {
    pub fn new(name: impl Into<String>, scope: PluginScope) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }

    pub fn global(name: impl Into<String>) -> Self {
        Self::new(name, PluginScope::Global)
    }
}

impl fmt::Display for PluginReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.scope)
    }
}

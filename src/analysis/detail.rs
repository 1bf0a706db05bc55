use super::find_plugin;
use crate::graph::ConfigGraph;
use crate::model::{ConfigDocument, PluginReference, to_yaml};
use serde::Serialize;

/// Top-level collections that can be opened as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Services,
    /// Top-level and per-service routes together.
    Routes,
    Consumers,
}

impl Collection {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "services" => Some(Collection::Services),
            "routes" => Some(Collection::Routes),
            "consumers" => Some(Collection::Consumers),
            _ => None,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Collection::Services => "Services",
            Collection::Routes => "Routes",
            Collection::Consumers => "Consumers",
        }
    }
}

/// A titled YAML rendering of some entity. `yaml` is `None` when the entity
/// could not be found; callers show "no data" in that case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    pub title: String,
    pub yaml: Option<String>,
}

impl Detail {
    pub fn is_found(&self) -> bool {
        self.yaml.is_some()
    }
}

pub fn collection_detail(doc: &ConfigDocument, collection: Collection) -> Result<Detail, serde_yaml::Error> {
    let yaml = match collection {
        Collection::Services => to_yaml(&doc.services)?,
        Collection::Routes => to_yaml(&doc.all_routes())?,
        Collection::Consumers => to_yaml(&doc.consumers)?,
    };
    Ok(Detail {
        title: collection.title().to_string(),
        yaml: Some(yaml),
    })
}

pub fn plugin_detail(doc: &ConfigDocument, reference: &PluginReference) -> Result<Detail, serde_yaml::Error> {
    let yaml = find_plugin(doc, reference).map(to_yaml).transpose()?;
    Ok(Detail {
        title: format!("Plugin: {}", reference.name),
        yaml,
    })
}

pub fn node_detail(graph: &ConfigGraph, id: &str) -> Result<Detail, serde_yaml::Error> {
    match graph.node(id) {
        Some(node) => Ok(Detail {
            title: node.title.clone(),
            yaml: Some(to_yaml(&node.entity)?),
        }),
        None => Ok(Detail {
            title: id.to_string(),
            yaml: None,
        }),
    }
}

use crate::model::{ConfigDocument, Plugin, Route, Service};
use serde::Serialize;
use std::collections::HashMap;

/// What a node stands for. Determines its id prefix, style class and shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    GlobalPlugin,
    Service,
    ServicePlugin,
    Route,
    RoutePlugin,
}

impl NodeKind {
    pub fn prefix(self) -> &'static str {
        match self {
            NodeKind::GlobalPlugin => "global_plugin_",
            NodeKind::Service => "service_",
            NodeKind::ServicePlugin => "service_plugin_",
            NodeKind::Route => "route_",
            NodeKind::RoutePlugin => "route_plugin_",
        }
    }

    /// Style class name used by renderers.
    pub fn class(self) -> &'static str {
        match self {
            NodeKind::Service => "service",
            NodeKind::Route => "route",
            NodeKind::GlobalPlugin | NodeKind::ServicePlugin | NodeKind::RoutePlugin => "plugin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
}

/// Containment edge: owner → owned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// One service with everything attached to it.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceCluster {
    pub service: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// The original entity behind a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeEntity {
    Service(Service),
    Route(Route),
    Plugin(Plugin),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDetail {
    pub title: String,
    pub entity: NodeEntity,
}

/// Containment graph of a document plus a lookup table from node id to the
/// entity the node was built from.
///
/// Ids are derived from sanitized names, so distinct names can map to the
/// same id. Such collisions are not resolved: the node list keeps both nodes
/// and the lookup table keeps whichever entity was processed last.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigGraph {
    pub global_plugins: Vec<GraphNode>,
    pub clusters: Vec<ServiceCluster>,
    #[serde(skip)]
    node_map: HashMap<String, NodeDetail>,
}

impl ConfigGraph {
    pub fn build(doc: &ConfigDocument) -> Self {
        let mut graph = ConfigGraph::default();

        for plugin in &doc.plugins {
            let node = graph.register(
                NodeKind::GlobalPlugin,
                &[plugin.name.as_str()],
                format!("Global: {}", plugin.name),
                format!("Global Plugin: {}", plugin.name),
                NodeEntity::Plugin(plugin.clone()),
            );
            graph.global_plugins.push(node);
        }

        for service in &doc.services {
            let cluster = graph.build_cluster(service);
            graph.clusters.push(cluster);
        }

        graph
    }

    fn build_cluster(&mut self, service: &Service) -> ServiceCluster {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        let service_node = self.register(
            NodeKind::Service,
            &[service.name.as_str()],
            service.name.clone(),
            format!("Service: {}", service.name),
            NodeEntity::Service(service.clone()),
        );
        let service_id = service_node.id.clone();
        nodes.push(service_node);

        for plugin in &service.plugins {
            let node = self.register(
                NodeKind::ServicePlugin,
                &[service.name.as_str(), plugin.name.as_str()],
                plugin.name.clone(),
                format!("Plugin: {} on {}", plugin.name, service.name),
                NodeEntity::Plugin(plugin.clone()),
            );
            edges.push(GraphEdge {
                from: service_id.clone(),
                to: node.id.clone(),
            });
            nodes.push(node);
        }

        for route in &service.routes {
            let route_node = self.register(
                NodeKind::Route,
                &[service.name.as_str(), route.name.as_str()],
                format!("Route: {}", route.name),
                format!("Route: {}", route.name),
                NodeEntity::Route(route.clone()),
            );
            let route_id = route_node.id.clone();
            edges.push(GraphEdge {
                from: service_id.clone(),
                to: route_id.clone(),
            });
            nodes.push(route_node);

            for plugin in &route.plugins {
                let node = self.register(
                    NodeKind::RoutePlugin,
                    &[service.name.as_str(), route.name.as_str(), plugin.name.as_str()],
                    plugin.name.clone(),
                    format!("Plugin: {} on {}", plugin.name, route.name),
                    NodeEntity::Plugin(plugin.clone()),
                );
                edges.push(GraphEdge {
                    from: route_id.clone(),
                    to: node.id.clone(),
                });
                nodes.push(node);
            }
        }

        ServiceCluster {
            service: service.name.clone(),
            nodes,
            edges,
        }
    }

    fn register(
        &mut self,
        kind: NodeKind,
        names: &[&str],
        label: String,
        title: String,
        entity: NodeEntity,
    ) -> GraphNode {
        let id = node_id(kind, names);
        self.node_map.insert(id.clone(), NodeDetail { title, entity });
        GraphNode { id, label, kind }
    }

    /// Entity behind a node id, if any.
    pub fn node(&self, id: &str) -> Option<&NodeDetail> {
        self.node_map.get(id)
    }

    /// All nodes in build order, duplicates included.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.global_plugins
            .iter()
            .chain(self.clusters.iter().flat_map(|c| c.nodes.iter()))
    }

    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.clusters.iter().flat_map(|c| c.edges.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.global_plugins.is_empty() && self.clusters.is_empty()
    }

    /// Number of distinct ids in the lookup table.
    pub fn distinct_nodes(&self) -> usize {
        self.node_map.len()
    }
}

/// Build a node id from a role prefix and the sanitized names of the entity
/// and its owners, joined by `_`.
pub fn node_id(kind: NodeKind, names: &[&str]) -> String {
    let sanitized: Vec<String> = names.iter().map(|n| sanitize(n)).collect();
    format!("{}{}", kind.prefix(), sanitized.join("_"))
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

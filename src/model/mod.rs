mod document;
mod plugin_ref;

pub use document::{ConfigDocument, ParseError, Plugin, Route, Service, parse_tree, to_yaml};
pub use plugin_ref::{PluginReference, PluginScope};

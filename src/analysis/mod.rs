mod detail;
mod lookup;
mod summary;

pub use detail::{Collection, Detail, collection_detail, node_detail, plugin_detail};
pub use lookup::find_plugin;
pub use summary::{Summary, summarize};

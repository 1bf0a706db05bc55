use super::data::ConfigGraph;
use crate::analysis::{Summary, summarize};
use crate::model::{ConfigDocument, ParseError};

/// Everything derived from one loaded file. Replaced wholesale on reload.
#[derive(Debug, Clone)]
pub struct Session {
    pub source: String,
    pub document: ConfigDocument,
    pub summary: Summary,
    pub graph: ConfigGraph,
}

impl Session {
    pub fn load(source: impl Into<String>, content: &str) -> Result<Self, ParseError> {
        let document = ConfigDocument::parse(content)?;
        Ok(Self::from_document(source, document))
    }

    pub fn from_document(source: impl Into<String>, document: ConfigDocument) -> Self {
        let summary = summarize(&document);
        let graph = ConfigGraph::build(&document);
        Self {
            source: source.into(),
            document,
            summary,
            graph,
        }
    }
}

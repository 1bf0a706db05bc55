mod json;
mod markdown;

pub use json::JsonOutput;
pub use markdown::MarkdownOutput;

use crate::analysis::Summary;
use std::io::Write;

/// An analysis summary together with the file it came from.
pub struct Report<'a> {
    pub source: &'a str,
    pub summary: &'a Summary,
}

pub trait OutputFormatter {
    fn format<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> std::io::Result<()>;
}

use crate::model::PluginReference;
use crate::output::{OutputFormatter, Report};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Default)]
pub struct JsonOutput;

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    service_count: usize,
    route_count: usize,
    consumer_count: usize,
    plugin_count: usize,
    plugins: &'a [PluginReference],
}

impl OutputFormatter for JsonOutput {
    fn format<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> std::io::Result<()> {
        let summary = report.summary;
        let json_report = JsonReport {
            source: report.source,
            service_count: summary.service_count,
            route_count: summary.route_count,
            consumer_count: summary.consumer_count,
            plugin_count: summary.plugins.len(),
            plugins: &summary.plugins,
        };

        let json = serde_json::to_string_pretty(&json_report).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)
    }
}

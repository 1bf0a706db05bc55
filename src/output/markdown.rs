use crate::output::{OutputFormatter, Report};
use std::io::Write;

#[derive(Debug, Default)]
pub struct MarkdownOutput;

impl OutputFormatter for MarkdownOutput {
    fn format<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> std::io::Result<()> {
        let summary = report.summary;

        writeln!(writer, "# decK Dump Analysis: {}\n", report.source)?;

        writeln!(writer, "## Summary\n")?;
        writeln!(writer, "- **Services**: {}", summary.service_count)?;
        writeln!(writer, "- **Routes**: {}", summary.route_count)?;
        writeln!(writer, "- **Consumers**: {}", summary.consumer_count)?;
        writeln!(writer, "- **Plugins**: {}", summary.plugins.len())?;

        writeln!(writer, "\n## Plugins ({})\n", summary.plugins.len())?;
        if summary.plugins.is_empty() {
            writeln!(writer, "*No plugins configured.*")?;
            return Ok(());
        }

        for plugin in &summary.plugins {
            writeln!(writer, "- **{}** *({})*", plugin.name, plugin.scope)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summarize;
    use crate::model::ConfigDocument;

    fn render(yaml: &str) -> String {
        let summary = summarize(&ConfigDocument::parse(yaml).unwrap());
        let mut buffer = Vec::new();
        MarkdownOutput
            .format(&Report { source: "kong.yaml", summary: &summary }, &mut buffer)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_lists_plugins_with_scope() {
        let text = render(
            "plugins: [{name: cors}]\nservices:\n  - name: s\n    routes:\n      - name: r1\n        plugins: [{name: key-auth}]\n",
        );
        assert!(text.starts_with("# decK Dump Analysis: kong.yaml\n"));
        assert!(text.contains("- **Routes**: 1\n"));
        assert!(text.contains("## Plugins (2)"));
        assert!(text.contains("- **cors** *(global)*\n"));
        assert!(text.contains("- **key-auth** *(route on r1)*\n"));
    }

    #[test]
    fn test_no_plugins() {
        let text = render("services: [{name: s}]\n");
        assert!(text.contains("*No plugins configured.*"));
    }
}

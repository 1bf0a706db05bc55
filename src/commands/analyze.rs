use crate::analysis::summarize;
use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::fs::{FileSystem, default_fs};
use crate::output::{JsonOutput, MarkdownOutput, OutputFormatter, Report};
use crate::style;

use super::emit;

pub fn cmd_analyze(args: AnalyzeArgs) -> i32 {
    cmd_analyze_with_fs(args, default_fs())
}

pub fn cmd_analyze_with_fs(args: AnalyzeArgs, fs: &dyn FileSystem) -> i32 {
    let doc = match fs.load_document(&args.file) {
        Ok(doc) => doc,
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };

    let summary = summarize(&doc);
    let source = args.file.display().to_string();
    let report = Report {
        source: &source,
        summary: &summary,
    };

    let mut buffer = Vec::new();
    let format_result = match args.format {
        OutputFormat::Markdown => MarkdownOutput.format(&report, &mut buffer),
        OutputFormat::Json => JsonOutput.format(&report, &mut buffer),
    };
    if let Err(e) = format_result {
        style::error(&format!("Failed to format output: {}", e));
        return 1;
    }

    let text = String::from_utf8_lossy(&buffer);
    emit(
        fs,
        args.output.as_deref(),
        &text,
        args.format == OutputFormat::Markdown,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;
    use std::path::PathBuf;

    const DOC: &str = r#"
plugins:
  - name: prometheus
services:
  - name: orders
    routes:
      - name: list
        plugins:
          - name: key-auth
consumers:
  - username: alice
"#;

    fn args(format: OutputFormat) -> AnalyzeArgs {
        AnalyzeArgs {
            file: PathBuf::from("/kong.yaml"),
            format,
            output: Some(PathBuf::from("/report")),
        }
    }

    #[test]
    fn test_markdown_report_to_file() {
        let fs = MockFs::with_files([("/kong.yaml", DOC)]);
        assert_eq!(cmd_analyze_with_fs(args(OutputFormat::Markdown), &fs), 0);

        let report = fs.get("/report").unwrap();
        assert!(report.starts_with("# decK Dump Analysis: /kong.yaml"));
        assert!(report.contains("- **Routes**: 1"));
        assert!(report.contains("- **key-auth** *(route on list)*"));
    }

    #[test]
    fn test_json_report_to_file() {
        let fs = MockFs::with_files([("/kong.yaml", DOC)]);
        assert_eq!(cmd_analyze_with_fs(args(OutputFormat::Json), &fs), 0);

        let json: serde_json::Value = serde_json::from_str(&fs.get("/report").unwrap()).unwrap();
        assert_eq!(json["consumer_count"], 1);
        assert_eq!(json["plugin_count"], 2);
    }

    #[test]
    fn test_unparseable_file_fails() {
        let fs = MockFs::with_files([("/kong.yaml", "services: [\n")]);
        assert_eq!(cmd_analyze_with_fs(args(OutputFormat::Markdown), &fs), 1);
        assert!(fs.get("/report").is_none());
    }

    #[test]
    fn test_missing_file_fails() {
        let fs = MockFs::default();
        assert_eq!(cmd_analyze_with_fs(args(OutputFormat::Json), &fs), 1);
    }
}

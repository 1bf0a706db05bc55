use crate::cli::{DiffArgs, DiffFormat};
use crate::diff::{diff_documents, file_label, format_diff_json, format_side_by_side, format_unified};
use crate::fs::{FileSystem, default_fs};
use crate::style;
use std::path::Path;

use super::emit;

pub fn cmd_diff(args: DiffArgs) -> i32 {
    cmd_diff_with_fs(args, default_fs())
}

pub fn cmd_diff_with_fs(args: DiffArgs, fs: &dyn FileSystem) -> i32 {
    let Some(old) = read(fs, &args.old) else {
        return 1;
    };
    let Some(new) = read(fs, &args.new) else {
        return 1;
    };

    let old_label = file_label(&args.old);
    let new_label = file_label(&args.new);
    let diff = match diff_documents(&old_label, &old, &new_label, &new) {
        Ok(diff) => diff,
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };

    let text = match args.format {
        DiffFormat::Unified => format_unified(&diff),
        DiffFormat::Split => format_side_by_side(&diff, style::terminal_width()),
        DiffFormat::Json => format!("{}\n", format_diff_json(&diff)),
    };

    let to_terminal = args.output.is_none() && style::is_terminal();
    let text = if to_terminal && args.format == DiffFormat::Unified {
        style::colorize_diff(&text)
    } else {
        text
    };

    let code = emit(fs, args.output.as_deref(), &text, false);
    if code != 0 {
        return code;
    }

    if to_terminal && args.format != DiffFormat::Json {
        if diff.is_empty() {
            style::success("No differences");
        } else {
            let (added, removed) = diff.stats();
            style::section("Changes");
            println!("{}", style::metric("Hunks", diff.hunks.len()));
            println!("{}", style::metric("Added", added));
            println!("{}", style::metric("Removed", removed));
        }
    }

    if args.exit_code && !diff.is_empty() { 1 } else { 0 }
}

fn read(fs: &dyn FileSystem, path: &Path) -> Option<String> {
    match fs.read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            style::error(&format!("Could not read {}: {}", style::path(path), e));
            None
        }
    }
}

//! Console output. Human-readable only.

use hlfetch_core::catalog::LanguageEntry;
use hlfetch_core::layout::OutputLayout;
use hlfetch_core::runner::{FetchEvent, RunSummary};
use std::path::{Path, PathBuf};

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Absolute form of the output root; the directory need not exist yet.
pub fn display_root(root: &Path) -> PathBuf {
    std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf())
}

pub fn print_header(root: &Path) {
    println!("Tree-sitter Highlights Fetcher");
    println!("{}", rule());
    println!("Output directory: {}", display_root(root).display());
    println!();
}

pub fn print_event(event: FetchEvent<'_>) {
    match event {
        FetchEvent::Started { entry } => println!("Fetching {}...", entry.name),
        FetchEvent::Saved { path, bytes, .. } => {
            println!("  ✓ Saved to {} ({} bytes)", path.display(), bytes);
            println!();
        }
        FetchEvent::Failed { entry, reason } => {
            println!("  ✗ Failed to download {}: {}", entry.name, reason);
            println!();
        }
    }
}

/// Summary lines, separate from printing so they can be tested.
pub fn summary_lines(summary: &RunSummary, layout: &OutputLayout) -> Vec<String> {
    let mut lines = vec![
        rule(),
        format!(
            "Downloaded: {}/{} languages",
            summary.succeeded(),
            summary.total()
        ),
    ];

    let failed = summary.failed_languages();
    if failed.is_empty() {
        lines.push(String::new());
        lines.push("Directory structure created:".to_string());
        for (name, _) in &summary.results {
            lines.push(format!("  {}", layout.query_path(name).display()));
        }
    } else {
        lines.push(format!("Failed: {}", failed.join(", ")));
        lines.push(String::new());
        lines.push("Troubleshooting:".to_string());
        lines.push("1. Check your internet connection".to_string());
        lines.push("2. The repository might have changed branches (main vs master)".to_string());
        lines.push("3. Try accessing the URLs manually in a browser (hlfetch --list)".to_string());
    }

    if let Some(path) = &summary.gitignore {
        lines.push(String::new());
        lines.push(format!("Created {}", path.display()));
    }
    lines
}

pub fn print_summary(summary: &RunSummary, layout: &OutputLayout) {
    for line in summary_lines(summary, layout) {
        println!("{}", line);
    }
}

pub fn print_list(entries: &[LanguageEntry]) {
    for entry in entries {
        match &entry.branch {
            Some(branch) => println!("{:<12} {} ({})", entry.name, entry.url, branch),
            None => println!("{:<12} {}", entry.name, entry.url),
        }
    }
}

use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use vitrine_model::{canonical_type_tag, is_legacy_type_tag, normalize_snapshot, PageSnapshot};

use super::{find_page_files, resolve_input};

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Page file or directory (defaults to the configured pages directory)
    pub input: Option<PathBuf>,

    /// Rewrite files in place instead of only reporting
    #[arg(short, long)]
    pub write: bool,
}

/// One legacy tag found in a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTag {
    pub section_id: String,
    pub from: String,
    pub to: String,
}

pub fn normalize(args: NormalizeArgs, config: &Config, cwd: &str) -> Result<()> {
    let input = resolve_input(args.input, config.get_pages_dir(cwd));
    let mut total = 0;

    for path in find_page_files(&input)? {
        let rewritten = normalize_file(&path, args.write)?;
        total += rewritten.len();

        if rewritten.is_empty() {
            println!("  {} {}", "✓".green(), path.display());
            continue;
        }

        println!("  {} {}", "→".yellow(), path.display());
        for tag in &rewritten {
            println!("      {}: {} → {}", tag.section_id, tag.from.yellow(), tag.to.green());
        }
    }

    println!();
    if args.write {
        println!("✨ {} {} legacy type tag(s)", "Rewrote".green().bold(), total);
    } else if total > 0 {
        println!("{} legacy type tag(s) found; run with --write to rewrite", total.to_string().yellow());
    } else {
        println!("✨ {}", "All pages use canonical type tags".green().bold());
    }

    Ok(())
}

/// Legacy tags in a snapshot, in page order
pub fn legacy_tags(snapshot: &PageSnapshot) -> Vec<LegacyTag> {
    snapshot
        .sections()
        .filter(|section| is_legacy_type_tag(&section.type_tag))
        .map(|section| LegacyTag {
            section_id: section.id.clone(),
            from: section.type_tag.clone(),
            to: canonical_type_tag(&section.type_tag).to_string(),
        })
        .collect()
}

/// Report legacy tags in one file and optionally rewrite it
///
/// Only `type` fields change; settings are written back as they were read.
pub fn normalize_file(path: &Path, write: bool) -> Result<Vec<LegacyTag>> {
    let snapshot = PageSnapshot::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let found = legacy_tags(&snapshot);

    if write && !found.is_empty() {
        let normalized = normalize_snapshot(&snapshot);
        fs::write(path, normalized.to_json_pretty()?)?;
        info!(path = %path.display(), rewritten = found.len(), "Rewrote page");
    }

    Ok(found)
}

use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use vitrine_model::{GroupId, PageDocument, Section};

use super::{find_page_files, resolve_input};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Page file or directory (defaults to the configured pages directory)
    pub input: Option<PathBuf>,

    /// Also list hidden sections' children
    #[arg(short, long)]
    pub all: bool,
}

pub fn inspect(args: InspectArgs, config: &Config, cwd: &str) -> Result<()> {
    let input = resolve_input(args.input, config.get_pages_dir(cwd));

    for path in find_page_files(&input)? {
        let document = load_document(&path)?;
        print!("{}", render_document(&path, &document, args.all));
        println!();
    }

    Ok(())
}

pub(crate) fn load_document(path: &Path) -> Result<PageDocument> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    PageDocument::from_json(&json).with_context(|| format!("Failed to load {}", path.display()))
}

/// Outline of a page: groups, sections and their children
pub fn render_document(path: &Path, document: &PageDocument, all: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        path.display().to_string().bright_white().bold(),
        format!("({:?})", document.page_type).dimmed()
    );

    for group in GroupId::ALL {
        let sections = document.groups.get(group);
        out.push_str(&format!("  {} {}\n", group.as_str().cyan(), format!("[{}]", sections.len()).dimmed()));

        for section in sections {
            render_section(&mut out, section, all);
        }
    }

    out
}

fn render_section(out: &mut String, section: &Section, all: bool) {
    let type_tag = match section.section_type() {
        Some(_) => section.type_tag().normal(),
        None => format!("{} (unknown type)", section.type_tag()).yellow(),
    };
    let hidden = if section.visible { "" } else { " hidden" };

    out.push_str(&format!("    {} {} \"{}\"{}\n", section.id, type_tag, section.name, hidden.dimmed()));

    if !section.visible && !all {
        return;
    }

    let (Some(children), Some(kind)) = (section.settings.blocks(), section.settings.child_kind()) else {
        return;
    };
    for child_id in children.ids() {
        let marker = match children.is_visible(child_id) {
            Some(false) => " hidden".dimmed(),
            _ => "".normal(),
        };
        out.push_str(&format!("      {} {}:{}:{}{}\n", "·".dimmed(), section.id, kind, child_id, marker));
    }
}

use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use vitrine_editor::{parse_script, EditorStore, Resolved};

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Page snapshot to edit (created if it does not exist)
    pub page: PathBuf,

    /// JSON array of editor commands
    pub script: PathBuf,

    /// Write the result here instead of back to the page
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the result instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn apply(args: ApplyArgs, config: &Config, _cwd: &str) -> Result<()> {
    let script_json = fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read {}", args.script.display()))?;
    let script = parse_script(&script_json).with_context(|| format!("Invalid script {}", args.script.display()))?;

    let mut store = open_page(config, &args.page)?;
    let created = store.apply_all(&script);

    println!("⚙️  {} {} command(s)", "Applied".green().bold(), script.len());
    for id in &created {
        println!("   {} {}", "+".green(), id);
    }
    println!("   Selection: {}", describe_selection(&store));

    if args.dry_run {
        println!();
        println!("{}", store.to_json_pretty()?);
        return Ok(());
    }

    let out = args.out.as_deref().unwrap_or(&args.page);
    store.save_file(out).with_context(|| format!("Failed to write {}", out.display()))?;
    println!("   Wrote {}", out.display());

    Ok(())
}

/// Store holding `page`, or an empty page of the configured type
pub fn open_page(config: &Config, page: &Path) -> Result<EditorStore> {
    let mut store = config.new_store();
    if page.exists() {
        store
            .load_file(page)
            .with_context(|| format!("Failed to load {}", page.display()))?;
    }
    Ok(store)
}

fn describe_selection(store: &EditorStore) -> String {
    let Some(target) = store.selected() else {
        return "none".dimmed().to_string();
    };

    match store.resolve_selection() {
        Resolved::NotFound => format!("{} {}", target, "(not found)".yellow()),
        _ => target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdStrategy;
    use vitrine_model::{GroupId, PageSnapshot, PageType};

    fn sequential() -> Config {
        Config {
            id_strategy: IdStrategy::Sequential,
            default_page_type: PageType::Room,
            ..Config::default()
        }
    }

    #[test]
    fn test_apply_script_to_new_page() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("room.json");
        let script = dir.path().join("script.json");
        fs::write(
            &script,
            r#"[
                { "op": "add_section", "group": "template", "sectionType": "room_amenities", "name": "Amenities" },
                { "op": "add_child", "group": "template", "sectionId": "room_amenities-1" },
                { "op": "patch_child", "group": "template", "sectionId": "room_amenities-1",
                  "childId": "amenity-2", "patch": { "label": "Sea view" } }
            ]"#,
        )
        .unwrap();

        apply(
            ApplyArgs {
                page: page.clone(),
                script,
                out: None,
                dry_run: false,
            },
            &sequential(),
            ".",
        )
        .unwrap();

        let saved = PageSnapshot::read(&page).unwrap();
        assert_eq!(saved.page_type, PageType::Room);
        assert_eq!(saved.template[0].name, "Amenities");
        assert_eq!(saved.template[0].settings["items"][0]["id"], "amenity-2");
        assert_eq!(saved.template[0].settings["items"][0]["label"], "Sea view");
    }

    #[test]
    fn test_apply_to_existing_page_keeps_it_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("home.json");
        let script = dir.path().join("script.json");
        fs::write(&page, r#"{ "template": [ { "id": "rich_text-1", "type": "rich_text" } ] }"#).unwrap();
        fs::write(&script, r#"[ { "op": "add_section", "group": "footer", "sectionType": "rich_text" } ]"#).unwrap();

        apply(
            ApplyArgs {
                page: page.clone(),
                script,
                out: None,
                dry_run: false,
            },
            &sequential(),
            ".",
        )
        .unwrap();

        let store = open_page(&sequential(), &page).unwrap();
        assert_eq!(store.group(GroupId::Template)[0].id, "rich_text-1");
        assert_eq!(store.group(GroupId::Footer)[0].id, "rich_text-2");
    }

    #[test]
    fn test_apply_writes_to_out_and_keeps_page() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("home.json");
        let out = dir.path().join("home.out.json");
        let script = dir.path().join("script.json");
        let original = r#"{ "template": [ { "id": "a", "type": "Banner" }, { "id": "b", "type": "faq" } ] }"#;
        fs::write(&page, original).unwrap();
        fs::write(&script, r#"[ { "op": "move_section", "group": "template", "activeId": "b", "overId": "a" } ]"#).unwrap();

        apply(
            ApplyArgs {
                page: page.clone(),
                script,
                out: Some(out.clone()),
                dry_run: false,
            },
            &sequential(),
            ".",
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&page).unwrap(), original);

        let store = open_page(&sequential(), &out).unwrap();
        let ids: Vec<&str> = store.group(GroupId::Template).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(store.group(GroupId::Template)[1].type_tag(), "image_banner");
    }
}

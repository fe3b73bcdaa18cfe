use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vitrine_editor::EditorStore;
use vitrine_model::{PageType, SequentialIds, TimestampIds};

pub const DEFAULT_CONFIG_NAME: &str = "vitrine.config.json";

/// Vitrine configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding page snapshots (`*.json`)
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Page type for pages created by `apply`
    #[serde(default)]
    pub default_page_type: PageType,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How new section and child ids are generated
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// `{prefix}-{nanos}`
    #[default]
    Timestamp,
    /// `{prefix}-{n}`, reproducible across runs
    Sequential,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the pages directory
    pub fn get_pages_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.pages_dir)
    }

    /// Empty store wired to the configured id strategy
    pub fn new_store(&self) -> EditorStore {
        let mut store = match self.id_strategy {
            IdStrategy::Timestamp => EditorStore::with_id_source(TimestampIds::new()),
            IdStrategy::Sequential => EditorStore::with_id_source(SequentialIds::new()),
        };
        store.set_page_type(self.default_page_type);
        store
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            default_page_type: PageType::default(),
            log_level: default_log_level(),
            id_strategy: IdStrategy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "pagesDir": "site/pages",
            "defaultPageType": "room",
            "logLevel": "debug",
            "idStrategy": "sequential"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.pages_dir, "site/pages");
        assert_eq!(config.default_page_type, PageType::Room);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.id_strategy, IdStrategy::Sequential);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "logLevel": "info" }"#).unwrap();
        assert_eq!(config.pages_dir, "pages");
        assert_eq!(config.default_page_type, PageType::Home);
        assert_eq!(config.id_strategy, IdStrategy::Timestamp);
    }

    #[test]
    fn test_load_missing_and_present_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        assert_eq!(Config::load(&cwd).unwrap(), Config::default());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "pagesDir": "content" }"#).unwrap();
        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.get_pages_dir(&cwd), dir.path().join("content"));
    }

    #[test]
    fn test_new_store_uses_strategy() {
        let config = Config {
            id_strategy: IdStrategy::Sequential,
            default_page_type: PageType::Collection,
            ..Config::default()
        };

        let mut store = config.new_store();
        let id = store.add_section(
            vitrine_model::GroupId::Template,
            None,
            vitrine_model::settings::RichTextSettings::default(),
        );

        assert_eq!(id, "rich_text-1");
        assert_eq!(store.page_type(), PageType::Collection);
    }
}

use crate::catalog::{Catalog, ContentItem, ItemId, PlaceholderCatalog, StaticCatalog};
use crate::grid::{EllipseRegion, GridSpec};
use crate::menu::{MenuBounds, MenuOption, OptionId};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::sync::Arc;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    #[default]
    #[strum(to_string = "catalog", serialize = "category")]
    Catalog,
    #[strum(to_string = "placeholder", serialize = "static")]
    Placeholder,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentConfig {
    #[serde(default)]
    pub mode: ContentMode,
    #[serde(default = "default_placeholder_items")]
    pub placeholder_items: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            mode: ContentMode::default(),
            placeholder_items: default_placeholder_items(),
        }
    }
}

fn default_placeholder_items() -> usize {
    48
}

/// Shorthand for `count` numbered items sharing an icon and a name stem.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSeries {
    pub category: OptionId,
    pub icon: String,
    pub name: String,
    pub count: usize,
}

impl CatalogSeries {
    pub fn expand(&self) -> impl Iterator<Item = ContentItem> + '_ {
        (0..self.count).map(move |i| ContentItem {
            id: ItemId::new(format!("{}-{}", self.category, i)),
            icon: self.icon.clone(),
            name: format!("{} {}", self.name, i + 1),
            category_id: self.category.clone(),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default)]
    pub ellipse: EllipseRegion,
    #[serde(default)]
    pub bounds: MenuBounds,
    #[serde(default = "default_container_height")]
    pub container_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            ellipse: EllipseRegion::default(),
            bounds: MenuBounds::default(),
            container_height: default_container_height(),
        }
    }
}

fn default_container_height() -> f64 {
    420.0
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub options: Vec<MenuOption>,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub catalog: Vec<ContentItem>,
    #[serde(default)]
    pub catalog_series: Vec<CatalogSeries>,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Config {
    pub fn catalog(&self) -> Arc<dyn Catalog> {
        match self.content.mode {
            ContentMode::Catalog => Arc::new(StaticCatalog::new(
                self.catalog
                    .iter()
                    .cloned()
                    .chain(self.catalog_series.iter().flat_map(CatalogSeries::expand)),
            )),
            ContentMode::Placeholder => {
                Arc::new(PlaceholderCatalog::new(self.content.placeholder_items))
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "crescent", "crescent")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("CRESCENT").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;
    Ok(s.try_deserialize()?)
}

pub fn default_config() -> Config {
    parse_config(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!("Embedded default config is invalid: {}", e);
        Config::default()
    })
}

pub fn load_or_default() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        return default_config();
    }

    match load_config() {
        Ok(c) if c.options.is_empty() => {
            log::warn!("Config has no options; using defaults");
            default_config()
        }
        Ok(c) => c,
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {}", e);
            default_config()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

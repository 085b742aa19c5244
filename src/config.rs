use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

pub const DEFAULT_PARTICLE_COUNT: usize = 200;
pub const DEFAULT_WHEEL_THRESHOLD: f64 = 50.0;
pub const DEFAULT_WHEEL_SCALE: f64 = 100.0;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    #[strum(serialize = "left", serialize = "l", serialize = "start")]
    Left,
    #[default]
    #[strum(serialize = "right", serialize = "r", serialize = "end")]
    Right,
}

impl ImagePosition {
    /// Horizontal offset sign of the hidden pose: images slide in from their own side.
    pub fn sign(&self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    #[strum(serialize = "particles", serialize = "particle", serialize = "field")]
    Particles,
    #[strum(serialize = "grid", serialize = "dots", serialize = "interactive")]
    Grid,
}

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct ImagePath(String);

crate::impl_string_newtype!(ImagePath);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Link(String);

crate::impl_string_newtype!(Link);

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SectionConfig {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image: ImagePath,
    #[serde(default)]
    pub image_position: ImagePosition,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BackgroundConfig {
    pub kind: BackgroundKind,
    pub particles: usize,
    pub seed: Option<u64>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::default(),
            particles: DEFAULT_PARTICLE_COUNT,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    pub wheel_threshold: f64,
    pub wheel_scale: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            wheel_threshold: DEFAULT_WHEEL_THRESHOLD,
            wheel_scale: DEFAULT_WHEEL_SCALE,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub background: BackgroundConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

impl Config {
    /// The configuration shipped with the binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()?;

        Ok(s.try_deserialize()?)
    }
}

/// Command line values that win over whatever the file says, reapplied on every reload.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub background: Option<BackgroundKind>,
    pub particles: Option<usize>,
    pub seed: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(kind) = self.background {
            config.background.kind = kind;
        }
        if let Some(count) = self.particles {
            config.background.particles = count;
        }
        if self.seed.is_some() {
            config.background.seed = self.seed;
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
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "parallax", "parallax").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Makes a user-supplied path absolute so the watcher always has a real parent directory.
pub fn resolve_config_path(path: &Path) -> Result<PathBuf, ConfigError> {
    Ok(std::path::absolute(path)?)
}

/// `PARALLAX_BACKGROUND__KIND=grid` sets `background.kind`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("PARALLAX")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_layered(path, environment())
}

fn load_layered(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    let mut config: Config = s.try_deserialize()?;
    if config.sections.is_empty() {
        config.sections = Config::builtin()?.sections;
    }
    Ok(config)
}

pub fn load_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            Config::builtin().unwrap_or_else(|e| {
                log::error!("Built-in configuration is invalid: {}", e);
                Config::default()
            })
        }
    }
}

pub fn write_default_config(path: &Path) -> Result<PathBuf, ConfigError> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>, config_path: PathBuf) {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("parallax-{}-{}", name, std::process::id()));
        let _ = fs_err::remove_dir_all(&dir);
        fs_err::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_image_position_deserialization() {
        let cases = vec![
            ("\"left\"", ImagePosition::Left),
            ("\"Left\"", ImagePosition::Left),
            ("\"L\"", ImagePosition::Left),
            ("\"start\"", ImagePosition::Left),
            ("\"RIGHT\"", ImagePosition::Right),
            ("\"r\"", ImagePosition::Right),
        ];

        for (json, expected) in cases {
            let deserialized: ImagePosition = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_background_kind_deserialization() {
        let cases = vec![
            ("\"particles\"", BackgroundKind::Particles),
            ("\"Field\"", BackgroundKind::Particles),
            ("\"grid\"", BackgroundKind::Grid),
            ("\"DOTS\"", BackgroundKind::Grid),
        ];

        for (json, expected) in cases {
            let deserialized: BackgroundKind = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<BackgroundKind>("\"stars\"").is_err());
    }

    #[test]
    fn test_section_defaults() {
        let section: SectionConfig = serde_json::from_str(r#"{"title": "Hello"}"#).unwrap();
        assert_eq!(section.subtitle, "");
        assert!(section.image.is_blank());
        assert_eq!(section.image_position, ImagePosition::Right);
        assert_eq!(section.link, None);
    }

    #[test]
    fn test_builtin_config() {
        let config = Config::builtin().unwrap();
        assert_eq!(config.sections.len(), 4);
        assert_eq!(config.sections[1].image_position, ImagePosition::Left);
        assert_eq!(config.background.kind, BackgroundKind::Particles);
        assert_eq!(config.background.particles, DEFAULT_PARTICLE_COUNT);
        assert_eq!(config.navigation.wheel_threshold, DEFAULT_WHEEL_THRESHOLD);
    }

    #[test]
    fn test_missing_file_falls_back_to_builtin_sections() {
        let dir = scratch_dir("missing");
        let config = load_or_default(&dir.join("config.toml"));
        assert_eq!(config.sections.len(), 4);
    }

    #[test]
    fn test_user_file_replaces_sections() {
        let dir = scratch_dir("user");
        let path = dir.join("config.toml");
        fs_err::write(
            &path,
            r#"
[background]
kind = "grid"

[[sections]]
title = "Only"
image_position = "left"
link = "https://example.org"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.background.kind, BackgroundKind::Grid);
        assert_eq!(config.background.particles, DEFAULT_PARTICLE_COUNT);
        assert_eq!(config.sections.len(), 1);
        assert_eq!(config.sections[0].title, "Only");
        assert_eq!(
            config.sections[0].link.as_ref().map(|l| l.as_str()),
            Some("https://example.org")
        );
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = scratch_dir("env");
        let path = dir.join("config.toml");
        fs_err::write(&path, "[background]\nkind = \"particles\"\nparticles = 50\n").unwrap();

        let vars = [
            ("PARALLAX_BACKGROUND__KIND", "grid"),
            ("PARALLAX_NAVIGATION__WHEEL_THRESHOLD", "80"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = load_layered(&path, environment().source(Some(vars))).unwrap();
        assert_eq!(config.background.kind, BackgroundKind::Grid);
        assert_eq!(config.background.particles, 50);
        assert_eq!(config.navigation.wheel_threshold, 80.0);
    }

    #[test]
    fn test_double_underscore_prefix_is_not_read() {
        let dir = scratch_dir("env-double");
        let vars = [("PARALLAX__BACKGROUND__KIND".to_string(), "grid".to_string())]
            .into_iter()
            .collect();

        let config =
            load_layered(&dir.join("config.toml"), environment().source(Some(vars))).unwrap();
        assert_eq!(config.background.kind, BackgroundKind::Particles);
    }

    #[test]
    fn test_bare_file_name_resolves_under_cwd() {
        let path = resolve_config_path(Path::new("config.toml")).unwrap();
        assert!(path.is_absolute());
        assert_eq!(path.parent(), Some(std::env::current_dir().unwrap().as_path()));
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("config.toml"));

        let already = scratch_dir("abs").join("config.toml");
        assert_eq!(resolve_config_path(&already).unwrap(), already);
    }

    #[test]
    fn test_write_default_config_does_not_clobber() {
        let dir = scratch_dir("write");
        let path = dir.join("nested").join("config.toml");
        write_default_config(&path).unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        fs_err::write(&path, "[background]\nkind = \"grid\"\n").unwrap();
        write_default_config(&path).unwrap();
        assert!(fs_err::read_to_string(&path).unwrap().contains("grid"));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::builtin().unwrap();
        Overrides {
            background: Some(BackgroundKind::Grid),
            particles: Some(12),
            seed: None,
        }
        .apply(&mut config);
        assert_eq!(config.background.kind, BackgroundKind::Grid);
        assert_eq!(config.background.particles, 12);
        assert_eq!(config.background.seed, None);
    }
}

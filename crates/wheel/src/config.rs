use crate::events::AppEvent;
use async_channel::Sender;
use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use gyre::{Easing, ModelError, RingSpec, Wheel};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[strum(serialize = "normal", serialize = "regular", serialize = "400")]
    Normal,
    #[strum(serialize = "semibold", serialize = "600")]
    SemiBold,
    #[strum(serialize = "bold", serialize = "700")]
    Bold,
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct FontFamily(String);

gyre::impl_string_newtype!(FontFamily);

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Typography {
    pub family: FontFamily,
    pub segment_weight: FontWeight,
    pub label_weight: FontWeight,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            family: FontFamily::new("Sans"),
            segment_weight: FontWeight::SemiBold,
            label_weight: FontWeight::Bold,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Share of the smaller canvas dimension covered by the outermost ring.
    pub fill: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { fill: 0.9 }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fill > 0.0 && self.fill <= 1.0) {
            return Err(ConfigError::Fill(self.fill));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub rings: Vec<RingSpec>,
}

impl Config {
    pub fn build_wheel(&self) -> Result<Wheel, ModelError> {
        Wheel::new(self.rings.clone(), self.easing)
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
    #[error("Invalid ring table: {0}")]
    Model(#[from] ModelError),
    #[error("Viewport fill must be in (0, 1], got {0}")]
    Fill(f64),
    #[error("Failed to resolve config path {path:?}: {source}")]
    Path {
        path: PathBuf,
        source: std::io::Error,
    },
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "gyre", "wheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Loads `path`, or the user config file when no path is given. Without a
/// user file the built-in learner wheel is used. `WHEEL_*` variables
/// override either (`WHEEL_EASING__FACTOR=0.3`).
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => get_config_path().ok().filter(|p| p.exists()),
    };

    let builder = config::Config::builder();
    let builder = match &path {
        Some(p) => builder
            .add_source(config::File::from(p.as_path()).format(config::FileFormat::Toml)),
        None => builder.add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        )),
    };

    let s = builder
        .add_source(
            config::Environment::with_prefix("WHEEL")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.viewport.validate()?;
    Ok(config)
}

pub fn builtin() -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()?;
    let config: Config = s.try_deserialize()?;
    config.viewport.validate()?;
    Ok(config)
}

/// Absolute form of `path`, as notify reports it in events.
pub fn resolve_config_path(path: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(path).map_err(|source| ConfigError::Path {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
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

fn create_watcher(
    dir: &Path,
    bridge_tx: Sender<notify::Result<notify::Event>>,
) -> Result<RecommendedWatcher, ConfigError> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Sends [`AppEvent::ConfigReload`] whenever `config_path` changes on disk.
pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_path = match resolve_config_path(&config_path) {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config hot reload disabled: {}", e);
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

    // Dropping the watcher stops the notifications.
    let _watcher = match create_watcher(&config_dir, bridge_tx) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch config directory: {}", e);
            return;
        }
    };

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
    use gyre::{HexColor, RingId};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_font_weight_deserialization() {
        let cases = vec![
            ("\"bold\"", FontWeight::Bold),
            ("\"Bold\"", FontWeight::Bold),
            ("\"700\"", FontWeight::Bold),
            ("\"SemiBold\"", FontWeight::SemiBold),
            ("\"600\"", FontWeight::SemiBold),
            ("\"regular\"", FontWeight::Normal),
        ];

        for (json, expected) in cases {
            let deserialized: FontWeight = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<FontWeight>("\"heavy\"").is_err());
    }

    #[test]
    fn test_builtin_table() {
        let config = builtin().unwrap();
        let counts: Vec<_> = config.rings.iter().map(|r| r.segments.len()).collect();
        assert_eq!(counts, vec![0, 4, 4, 5, 10, 7, 7]);

        assert!(config.rings[0].is_static);
        assert_eq!(config.rings[0].color, HexColor::new(0x0b, 0x3a, 0x60));
        assert_eq!(config.rings[1].segments[0].lines().len(), 2);
        assert_eq!(config.rings[6].rotation, FRAC_PI_2);
        assert_eq!(config.easing, Easing::default());
        assert_eq!(config.typography.family.as_str(), "Inter");
        assert_eq!(config.typography.segment_weight, FontWeight::SemiBold);

        let draggable: Vec<_> = config
            .rings
            .iter()
            .filter(|r| r.draggable)
            .map(|r| r.id.get())
            .collect();
        assert_eq!(draggable, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_builtin_table_builds() {
        let wheel = builtin().unwrap().build_wheel().unwrap();
        assert_eq!(wheel.model().outer_radius(), 336.0);
        assert_eq!(
            wheel.model().get(RingId::new(4)).unwrap().text_radius(),
            168.0
        );
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rings.conf");
        fs_err::write(
            &path,
            r##"
            [easing]
            factor = 0.3

            [[rings]]
            id = 1
            radius = 40
            color = "navy"
            static = true

            [[rings]]
            id = 2
            radius = 90.5
            color = "#ff9800"
            draggable = true
            text_radius = 70
            segments = ["A", ["B", "C"]]
            "##,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.easing.factor, 0.3);
        assert_eq!(config.easing.snap_threshold, 0.001);
        assert_eq!(config.rings[1].radius, 90.5);
        assert_eq!(config.rings[1].text_radius, Some(70.0));
        assert_eq!(config.viewport.fill, 0.9);
        assert!(config.build_wheel().is_ok());
    }

    #[test]
    fn test_descending_radii_fail_to_build() {
        let mut config = builtin().unwrap();
        config.rings.swap(2, 3);
        config.rings[2].id = RingId::new(3);
        config.rings[3].id = RingId::new(4);
        assert!(matches!(
            config.build_wheel(),
            Err(ModelError::RadiusNotAscending { .. })
        ));
    }

    #[test]
    fn test_fill_out_of_range_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for fill in ["0.0", "-0.5", "1.5", "nan"] {
            let path = dir.path().join("fill.toml");
            fs_err::write(
                &path,
                format!(
                    "[viewport]\nfill = {fill}\n\n[[rings]]\nid = 1\nradius = 40\ncolor = \"navy\"\n"
                ),
            )
            .unwrap();
            assert!(
                matches!(load_config(Some(&path)), Err(ConfigError::Fill(_))),
                "fill = {fill}"
            );
        }
    }

    #[test]
    fn test_relative_path_resolves_against_working_dir() {
        let resolved = resolve_config_path(Path::new("rings.toml")).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved.parent(), Some(std::env::current_dir().unwrap().as_path()));
    }

    #[tokio::test]
    async fn test_reload_through_relative_path() {
        // Relative to the crate directory the test runs in.
        let dir = tempfile::Builder::new().tempdir_in(".").unwrap();
        let path = Path::new(dir.path().file_name().unwrap()).join("rings.toml");
        assert!(path.is_relative());
        fs_err::write(&path, DEFAULT_CONFIG).unwrap();

        let (tx, rx) = async_channel::unbounded();
        let watcher = tokio::spawn(run_async_watcher(path.clone(), tx));

        let received = tokio::time::timeout(std::time::Duration::from_secs(10), async {
            loop {
                fs_err::write(&path, DEFAULT_CONFIG).unwrap();
                if let Ok(Ok(event)) =
                    tokio::time::timeout(std::time::Duration::from_millis(100), rx.recv()).await
                {
                    return event;
                }
            }
        })
        .await;

        watcher.abort();
        assert!(matches!(received, Ok(AppEvent::ConfigReload)));
        assert!(load_config(Some(&path)).is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
    }
}

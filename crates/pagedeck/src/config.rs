use anyhow::Result;
use pagedeck::host::ScrollBehavior;
use pagedeck::session::{ZOOM_MAX, ZOOM_MIN};
use pagedeck::{Classifier, Settings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "pagedeck";
const MAX_DEBOUNCE_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Full override of the page heuristics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<Classifier>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smooth_scroll: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isolate_slides: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_zoom: Option<bool>,
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be 'true' or 'false'."),
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `pagedeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# pagedeck configuration (https://github.com/mklab-se/pagedeck)\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.debounce_ms" => {
                let ms = value
                    .parse::<u64>()
                    .ok()
                    .filter(|ms| *ms <= MAX_DEBOUNCE_MS)
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "Invalid debounce_ms: {value}. Must be a whole number from 0 to {MAX_DEBOUNCE_MS}."
                        )
                    })?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .debounce_ms = Some(ms);
            }
            "defaults.smooth_scroll" => {
                let on = parse_bool("smooth_scroll", value)?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .smooth_scroll = Some(on);
            }
            "defaults.isolate_slides" => {
                let on = parse_bool("isolate_slides", value)?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .isolate_slides = Some(on);
            }
            "defaults.zoom" => {
                let zoom = value
                    .parse::<f64>()
                    .ok()
                    .filter(|z| (ZOOM_MIN..=ZOOM_MAX).contains(z))
                    .ok_or_else(|| {
                        anyhow::anyhow!("Invalid zoom: {value}. Must be between {ZOOM_MIN} and {ZOOM_MAX}.")
                    })?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .zoom = Some(zoom);
            }
            "defaults.show_zoom" => {
                let on = parse_bool("show_zoom", value)?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .show_zoom = Some(on);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.debounce_ms, defaults.smooth_scroll, defaults.isolate_slides, defaults.zoom, defaults.show_zoom"
            ),
        }
        Ok(())
    }

    /// Presenter settings with every unset value at its default.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(classifier) = &self.classifier {
            settings.classifier = classifier.clone();
        }
        if let Some(d) = &self.defaults {
            if let Some(ms) = d.debounce_ms {
                settings.quiet_period = Duration::from_millis(ms);
            }
            if let Some(smooth) = d.smooth_scroll {
                settings.scroll_behavior = if smooth {
                    ScrollBehavior::Smooth
                } else {
                    ScrollBehavior::Instant
                };
            }
            if let Some(isolate) = d.isolate_slides {
                settings.isolate_slides = isolate;
            }
            if let Some(zoom) = d.zoom {
                settings.default_zoom = zoom;
            }
            if let Some(show) = d.show_zoom {
                settings.show_zoom = show;
            }
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_gives_default_settings() {
        assert_eq!(Config::default().settings(), Settings::default());
    }

    #[test]
    fn set_validates_values() {
        let mut config = Config::default();
        config.set("defaults.zoom", "1.5").unwrap();
        config.set("defaults.debounce_ms", "250").unwrap();
        config.set("defaults.smooth_scroll", "false").unwrap();

        let err = config.set("defaults.zoom", "4").unwrap_err();
        assert!(err.to_string().contains("between 0.5 and 3"));
        assert!(config.set("defaults.debounce_ms", "-1").is_err());
        assert!(config.set("defaults.show_zoom", "maybe").is_err());
        assert!(config.set("defaults.theme", "dark").is_err());

        let settings = config.settings();
        assert_eq!(settings.default_zoom, 1.5);
        assert_eq!(settings.quiet_period, Duration::from_millis(250));
        assert_eq!(settings.scroll_behavior, ScrollBehavior::Instant);
        assert!(settings.isolate_slides);
    }

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILENAME);

        let mut config = Config::default();
        config.set("defaults.isolate_slides", "off").unwrap();
        config.save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# pagedeck configuration"));
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_points_at_config_show() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join(FILENAME)).unwrap_err();
        assert!(err.to_string().contains("pagedeck config show"));
    }

    #[test]
    fn classifier_override_is_partial() {
        let config: Config = serde_yaml::from_str(
            "classifier:\n  block_attribute: data-id\n  chrome:\n    - tag: nav\n",
        )
        .unwrap();
        let classifier = config.settings().classifier;
        assert_eq!(classifier.block_attribute, "data-id");
        assert_eq!(classifier.chrome.len(), 1);
        assert_eq!(classifier.scroll_excess_px, 50.0);
    }
}

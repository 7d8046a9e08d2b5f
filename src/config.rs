use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub static CONFIG_PATH: Lazy<PathBuf> = Lazy::new(|| {
    if let Some(path) = option_env!("FACECUE_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    ProjectDirs::from("", "", "facecue")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("/usr/local/etc/facecue/config.toml"))
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

/// Banner drawn above each face box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub label_height: f64,
    pub text_padding: f64,
    /// Baseline of the shape line, measured up from the box top
    pub first_line_offset: f64,
    /// Baseline of the emotion line, measured up from the box top
    pub second_line_offset: f64,
    pub background: String,
    pub text_color: String,
    pub font: String,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            label_height: 40.0,
            text_padding: 10.0,
            first_line_offset: 25.0,
            second_line_offset: 10.0,
            background: "rgba(0, 0, 0, 0.6)".to_string(),
            text_color: "#fff".to_string(),
            font: "16px Arial".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target overlay size; detections are rescaled from frame size when set
    pub display: Option<DisplaySize>,
    pub frame_interval_ms: u64,
    pub overlay: OverlayStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: None,
            frame_interval_ms: 100,
            overlay: OverlayStyle::default(),
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.unwrap_or(CONFIG_PATH.as_path());
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config at {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
    if let Some(d) = cfg.display {
        if !(d.width > 0.0 && d.height > 0.0) {
            anyhow::bail!(
                "invalid display size {}x{} in {}",
                d.width,
                d.height,
                path.display()
            );
        }
    }
    Ok(cfg)
}

pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<()> {
    let path = path.unwrap_or(CONFIG_PATH.as_path());
    let data = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    Ok(())
}

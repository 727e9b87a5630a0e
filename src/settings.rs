use std::fs;
use std::path::{Path, PathBuf};

use crate::geometry::Rgba;

pub const DEFAULT_HISTORY_LEN: usize = 120;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeKind {
    Dark,
    Light,
}

impl ThemeKind {
    pub fn label(self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
        }
    }

    pub fn from_key(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeKind::Dark
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppSettings {
    pub theme: ThemeKind,
    /// Number of samples the line chart keeps on screen.
    pub history_len: usize,
    pub transparent: bool,
    pub line_color: Rgba,
    pub input_device: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: ThemeKind::Dark,
            history_len: DEFAULT_HISTORY_LEN,
            transparent: true,
            line_color: Rgba::ACCENT,
            input_device: None,
        }
    }
}

impl AppSettings {
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                log::debug!("no settings at {}: {err}", path.display());
                return AppSettings::default();
            }
        };
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Self {
        let mut settings = AppSettings::default();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                apply_kv(key.trim(), value.trim(), &mut settings);
            }
        }
        settings
    }

    pub fn to_config_string(&self) -> String {
        let mut buf = String::new();
        buf.push_str(&format!("theme={}\n", self.theme.as_key()));
        buf.push_str(&format!("history_len={}\n", self.history_len));
        buf.push_str(&format!("transparent={}\n", self.transparent));
        buf.push_str(&format!("line_color={}\n", self.line_color.to_hex()));
        if let Some(name) = &self.input_device {
            buf.push_str(&format!("input_device={name}\n"));
        }
        buf
    }

    pub fn save(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                log::warn!("could not create {}: {err}", parent.display());
            }
        }
        if let Err(err) = fs::write(path, self.to_config_string()) {
            log::warn!("could not save settings to {}: {err}", path.display());
        }
    }
}

pub fn default_settings_path() -> PathBuf {
    config_dir().join("pulse_settings.cfg")
}

fn apply_kv(key: &str, value: &str, settings: &mut AppSettings) {
    match key {
        "theme" => settings.theme = ThemeKind::from_key(value),
        "history_len" => match value.parse::<usize>() {
            Ok(len) if len > 0 => settings.history_len = len,
            _ => log::warn!("ignoring history_len={value}"),
        },
        "transparent" => {
            if let Ok(flag) = value.parse::<bool>() {
                settings.transparent = flag;
            }
        }
        "line_color" => {
            if let Some(color) = Rgba::from_hex(value) {
                settings.line_color = color;
            }
        }
        "input_device" => {
            settings.input_device = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        }
        _ => log::debug!("unknown settings key '{key}'"),
    }
}

fn config_dir() -> PathBuf {
    let env_path = |key: &str| {
        std::env::var_os(key)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    };
    resolve_config_dir(env_path("XDG_CONFIG_HOME"), env_path("HOME"))
}

/// `$XDG_CONFIG_HOME/pulse` wins; otherwise the platform directory under home,
/// or under the working directory when there is no home.
fn resolve_config_dir(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(xdg) = xdg_config_home {
        return xdg.join("pulse");
    }
    let home = home.unwrap_or_else(|| PathBuf::from("."));
    if cfg!(target_os = "macos") {
        home.join("Library").join("Application Support").join("Pulse")
    } else {
        home.join(".config").join("pulse")
    }
}

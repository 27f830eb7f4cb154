use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the pandoc executable.
    #[serde(default)]
    pub pandoc: String,
    /// Directory holding xelatex, e.g. /Library/TeX/texbin on macOS.
    #[serde(default)]
    pub tool_dir: String,
    /// Treasurer's name and callsign.
    #[serde(default)]
    pub signature: String,
    #[serde(default = "default_report_title")]
    pub report_title: String,
    #[serde(default)]
    pub keep_markdown: bool,
}

fn default_report_title() -> String {
    "Treasurer's Report".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pandoc: String::new(),
            tool_dir: String::new(),
            signature: String::new(),
            report_title: default_report_title(),
            keep_markdown: false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.pandoc.trim().is_empty() {
            return Err(ReportError::Settings("no pandoc entry in settings".to_string()));
        }
        if self.tool_dir.trim().is_empty() {
            return Err(ReportError::Settings("no tool_dir entry in settings".to_string()));
        }
        Ok(())
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("treasurer")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn read_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(ReportError::Settings(format!(
            "no settings file at {} (run `treasurer init`)",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| ReportError::Settings(format!("{}: {e}", path.display())))
}

/// Settings for `init`: the existing file if it parses, defaults otherwise.
pub fn load_settings_or_default() -> Settings {
    read_settings(&settings_path()).unwrap_or_default()
}

pub fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ReportError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    write_settings(&settings_path(), settings)
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("settings.json");
        let settings = Settings {
            pandoc: "/usr/local/bin/pandoc".to_string(),
            tool_dir: "/Library/TeX/texbin".to_string(),
            signature: "Pat Doe, W1AW".to_string(),
            report_title: "DVRA Treasurer's Report".to_string(),
            keep_markdown: true,
        };
        write_settings(&path, &settings).unwrap();
        let loaded = read_settings(&path).unwrap();
        assert_eq!(loaded, settings);
        loaded.validate().unwrap();
    }

    #[test]
    fn test_missing_file_is_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_settings(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ReportError::Settings(_)));
    }

    #[test]
    fn test_defaults_fill_optional_keys() {
        let json = r#"{"pandoc": "/bin/pandoc", "tool_dir": "/opt/tex"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.report_title, "Treasurer's Report");
        assert!(s.signature.is_empty());
        assert!(!s.keep_markdown);
        s.validate().unwrap();
    }

    #[test]
    fn test_missing_required_keys_fail_validation() {
        let s: Settings = serde_json::from_str(r#"{"pandoc": "/bin/pandoc"}"#).unwrap();
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("tool_dir"));

        let s: Settings = serde_json::from_str(r#"{"tool_dir": "/opt/tex"}"#).unwrap();
        assert!(s.validate().unwrap_err().to_string().contains("pandoc"));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "pandoc=/bin/pandoc").unwrap();
        assert!(matches!(read_settings(&path), Err(ReportError::Settings(_))));
    }
}

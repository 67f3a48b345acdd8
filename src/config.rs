//! Persisted startup flags.
//!
//! Defaults live in a flag-token file: one CLI flag per whitespace-separated
//! token, `#` lines are comments. A global file holds machine-wide defaults
//! and a `.markpanerc` in the working directory overrides it. CLI arguments
//! win over both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub theme: Option<ThemeMode>,
    pub wrap: Option<u16>,
}

impl ConfigFlags {
    /// Merge two flag sets; `other` (typically the CLI) wins where both set a value.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            theme: other.theme.or(self.theme),
            wrap: other.wrap.or(self.wrap),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("markpane").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("markpane")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("markpane").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("markpane")
                .join("config");
        }
    }

    PathBuf::from(".markpanerc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".markpanerc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# markpane defaults (saved with --save)".to_string());
    if let Some(theme) = flags.theme {
        let theme_str = match theme {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        lines.push(format!("--theme {}", theme_str));
    }
    if let Some(wrap) = flags.wrap {
        lines.push(format!("--wrap {}", wrap));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--theme" {
            if let Some(next) = tokens.get(i + 1) {
                flags.theme = parse_theme(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--theme=") {
            flags.theme = parse_theme(value);
        } else if token == "--wrap" {
            if let Some(next) = tokens.get(i + 1) {
                flags.wrap = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--wrap=") {
            flags.wrap = value.parse().ok();
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "markpane".to_string(),
            "--theme".to_string(),
            "dark".to_string(),
            "--wrap=72".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.theme, Some(ThemeMode::Dark));
        assert_eq!(flags.wrap, Some(72));
    }

    #[test]
    fn test_parse_flag_tokens_ignores_unknown_and_bad_values() {
        let args = vec![
            "--theme".to_string(),
            "solarized".to_string(),
            "--wrap".to_string(),
            "wide".to_string(),
            "--frobnicate".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags, ConfigFlags::default());
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            theme: Some(ThemeMode::Light),
            wrap: Some(100),
        };
        let cli = ConfigFlags {
            theme: Some(ThemeMode::Dark),
            wrap: None,
        };
        let merged = file.union(&cli);
        assert_eq!(merged.theme, Some(ThemeMode::Dark));
        assert_eq!(merged.wrap, Some(100));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".markpanerc");
        let flags = ConfigFlags {
            theme: Some(ThemeMode::Dark),
            wrap: Some(72),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("nope")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }
}

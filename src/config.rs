use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub copyq: CopyqConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("history.db")
}

#[derive(Debug, Deserialize, Clone)]
pub struct CopyqConfig {
    /// Program name or path used for every external invocation
    /// (`<command> tab`, `<command> eval -`).
    #[serde(default = "default_command")]
    pub command: String,
}

impl Default for CopyqConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
        }
    }
}

fn default_command() -> String {
    "copyq".to_string()
}

/// Load configuration from `path`.
///
/// A missing file yields the defaults (`history.db` next to the working
/// directory, `copyq` on `$PATH`); a file that exists but does not parse
/// is a fatal error.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.copyq.command.is_empty() {
        anyhow::bail!("copyq.command must not be empty");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.db.path, PathBuf::from("history.db"));
        assert_eq!(config.copyq.command, "copyq");
    }

    #[test]
    fn test_partial_override() {
        let config: Config = toml::from_str(
            r#"
            [db]
            path = "/tmp/clips.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.db.path, PathBuf::from("/tmp/clips.db"));
        assert_eq!(config.copyq.command, "copyq");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/clipsafe.toml")).unwrap();
        assert_eq!(config.copyq.command, "copyq");
    }
}

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hms_client::ClientConfig;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    pub server: Option<String>,
    pub format: Option<String>,
}

impl ProfileConfig {
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server" => {
                let parsed = url::Url::parse(value)
                    .with_context(|| format!("Invalid server URL: {value}"))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    anyhow::bail!("Server URL must be http or https: {value}");
                }
                self.server = Some(value.to_string());
            }
            "format" => {
                parse_format(value)?;
                self.format = Some(value.to_string());
            }
            other => anyhow::bail!("Unknown config key: {other}. Valid keys: server, format"),
        }
        Ok(())
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.format.as_deref().map(parse_format).transpose()
    }
}

pub type ConfigFile = HashMap<String, ProfileConfig>;

pub fn parse_format(value: &str) -> Result<OutputFormat> {
    match value.to_ascii_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "yaml" => Ok(OutputFormat::Yaml),
        "table" => Ok(OutputFormat::Table),
        other => anyhow::bail!("Unknown format: {other}. Valid formats: json, yaml, table"),
    }
}

pub fn hms_dir() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("Cannot determine home directory")?
        .join(".hms"))
}

fn config_path() -> Result<PathBuf> {
    Ok(hms_dir()?.join("config.toml"))
}

pub fn load_all_from(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

pub fn save_all_to(path: &Path, all: &ConfigFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(all)?)?;
    Ok(())
}

pub fn load_profile(profile: &str) -> Result<ProfileConfig> {
    let mut all = load_all_from(&config_path()?)?;
    Ok(all.remove(profile).unwrap_or_default())
}

pub fn save_profile(profile: &str, config: &ProfileConfig) -> Result<()> {
    let path = config_path()?;
    let mut all = load_all_from(&path)?;
    all.insert(profile.to_string(), config.clone());
    save_all_to(&path, &all)
}

/// `--server` / `HMS_URL`, then the profile, then the client config.
pub fn resolve_server(
    cli_server: Option<&str>,
    profile: &ProfileConfig,
    client: &ClientConfig,
) -> String {
    cli_server
        .map(str::to_string)
        .or_else(|| profile.server.clone())
        .unwrap_or_else(|| client.base_url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_resolution_order() {
        let client = ClientConfig::default();
        let profile = ProfileConfig {
            server: Some("http://profile:5000".into()),
            format: None,
        };

        assert_eq!(
            resolve_server(Some("http://flag:5000"), &profile, &client),
            "http://flag:5000"
        );
        assert_eq!(resolve_server(None, &profile, &client), "http://profile:5000");
        assert_eq!(
            resolve_server(None, &ProfileConfig::default(), &client),
            client.base_url
        );
    }

    #[test]
    fn set_validates_values() {
        let mut cfg = ProfileConfig::default();
        cfg.set("server", "http://10.1.1.1:5000").unwrap();
        cfg.set("format", "Table").unwrap();
        assert_eq!(cfg.output_format().unwrap(), Some(OutputFormat::Table));

        assert!(cfg.set("server", "not a url").is_err());
        assert!(cfg.set("server", "ftp://x").is_err());
        assert!(cfg.set("format", "xml").is_err());
        assert!(cfg.set("color", "red").is_err());
        assert_eq!(cfg.server.as_deref(), Some("http://10.1.1.1:5000"));
    }

    #[test]
    fn profiles_round_trip_through_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert!(load_all_from(&path).unwrap().is_empty());

        let mut all = ConfigFile::new();
        all.insert(
            "ward".into(),
            ProfileConfig {
                server: Some("http://ward:5000".into()),
                format: Some("table".into()),
            },
        );
        save_all_to(&path, &all).unwrap();

        let loaded = load_all_from(&path).unwrap();
        assert_eq!(loaded.get("ward"), all.get("ward"));
    }
}

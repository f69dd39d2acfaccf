use crate::config::{self, Config};
use crate::platform;
use anyhow::{Context, Result};
use std::path::Path;

pub fn list(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", toml_str);
    Ok(())
}

/// Look up a dotted key such as `provider.backend`
pub fn lookup(key: &str, config: &Config) -> Result<String> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;

    let mut current = &value;
    for part in key.split('.') {
        current = current
            .get(part)
            .with_context(|| format!("Key not found: {}", key))?;
    }

    Ok(match current {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        v => v.to_string(),
    })
}

pub fn get(key: &str, config: &Config) -> Result<()> {
    println!("{}", lookup(key, config)?);
    Ok(())
}

pub fn path(explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => platform::config_path()?,
    };
    println!("{}", path.display());
    Ok(())
}

/// Write a config file with default values unless one already exists
pub fn init(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => platform::config_path()?,
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        platform::ensure_writable(parent)?;
    }
    config::save_to_path(&Config::default(), &path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_dotted_keys() {
        let config = Config::default();
        assert_eq!(lookup("provider.backend", &config).unwrap(), "yt-dlp");
        assert_eq!(lookup("provider.timeout_secs", &config).unwrap(), "60");
        assert_eq!(lookup("defaults.mode", &config).unwrap(), "remaining");
        assert_eq!(lookup("provider.api_key", &config).unwrap(), "");
    }

    #[test]
    fn test_lookup_missing_key() {
        let err = lookup("provider.nope", &Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "Key not found: provider.nope");
    }

    #[test]
    fn test_init_writes_loadable_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        init(Some(&path), false).unwrap();
        let loaded = config::load_from_path(&path).unwrap();
        assert_eq!(loaded.defaults.speed, 1.0);
        assert!(init(Some(&path), false).is_err());
        assert!(init(Some(&path), true).is_ok());
    }
}

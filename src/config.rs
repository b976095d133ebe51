//! Configuration for saunamap paths and services.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (SAUNAMAP_HOME, SAUNAMAP_FILE_STORE)
//! 2. Config file (.saunamap/config.yaml)
//! 3. Defaults (~/.saunamap)
//!
//! Config file discovery:
//! - Searches current directory and parents for .saunamap/config.yaml
//! - Paths in the config file are relative to the config file's directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub file_store: Option<FileStoreConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to the config file)
    pub home: Option<String>,
    /// Downloads directory (relative to the config file)
    pub downloads: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileStoreConfig {
    /// Base URL of the public object-storage bucket
    pub base_url: String,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the saunamap home (state)
    pub home: PathBuf,
    /// Absolute path to the downloads directory
    pub downloads: PathBuf,
    /// Base URL of the file store, if configured
    pub file_store_base: Option<String>,
    /// Path to the config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Path of the site registry file
    pub fn registry_path(&self) -> PathBuf {
        self.home.join("sites.json")
    }

    /// Path of the learning-resource catalog file
    pub fn catalog_path(&self) -> PathBuf {
        self.home.join("resources.json")
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".saunamap").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".saunamap");

    let config_file = find_config_file();

    let (home, downloads, file_store_base) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;
        let base_dir = config_path.parent().unwrap_or(Path::new("."));

        let home = if let Ok(env_home) = std::env::var("SAUNAMAP_HOME") {
            PathBuf::from(env_home)
        } else if let Some(ref home_path) = config.paths.home {
            resolve_path(base_dir, home_path)
        } else {
            default_home.clone()
        };

        let downloads = if let Some(ref downloads_path) = config.paths.downloads {
            resolve_path(base_dir, downloads_path)
        } else {
            home.join("downloads")
        };

        let file_store_base = if let Ok(env_base) = std::env::var("SAUNAMAP_FILE_STORE") {
            Some(env_base)
        } else {
            config.file_store.map(|fs| fs.base_url)
        };

        (home, downloads, file_store_base)
    } else {
        let home = std::env::var("SAUNAMAP_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let downloads = home.join("downloads");
        let file_store_base = std::env::var("SAUNAMAP_FILE_STORE").ok();

        (home, downloads, file_store_base)
    };

    Ok(ResolvedConfig {
        home,
        downloads,
        file_store_base,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Get the saunamap home directory
pub fn saunamap_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the site registry path ($SAUNAMAP_HOME/sites.json)
pub fn registry_path() -> Result<PathBuf> {
    Ok(config()?.registry_path())
}

/// Get the resource catalog path ($SAUNAMAP_HOME/resources.json)
pub fn catalog_path() -> Result<PathBuf> {
    Ok(config()?.catalog_path())
}

/// Get the downloads directory
pub fn downloads_dir() -> Result<PathBuf> {
    Ok(config()?.downloads.clone())
}

/// Get the configured file-store base URL, if any
pub fn file_store_base() -> Result<Option<String>> {
    Ok(config()?.file_store_base.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let saunamap_dir = temp.path().join(".saunamap");
        std::fs::create_dir_all(&saunamap_dir).unwrap();

        let config_path = saunamap_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  home: ./
  downloads: ../downloads
file_store:
  base_url: https://files.example.org/public
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./".to_string()));
        assert_eq!(config.paths.downloads, Some("../downloads".to_string()));
        assert_eq!(
            config.file_store.unwrap().base_url,
            "https://files.example.org/public"
        );
    }

    #[test]
    fn test_store_paths_under_home() {
        let config = ResolvedConfig {
            home: PathBuf::from("/test/.saunamap"),
            downloads: PathBuf::from("/test/.saunamap/downloads"),
            file_store_base: None,
            config_file: None,
        };

        assert_eq!(
            config.registry_path(),
            PathBuf::from("/test/.saunamap/sites.json")
        );
        assert_eq!(
            config.catalog_path(),
            PathBuf::from("/test/.saunamap/resources.json")
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}

//! Configuration for plotseed.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (PLOTSEED_HOME, PLOTSEED_UPLOADS)
//! 2. Config file (.plotseed/config.yaml)
//! 3. Defaults (~/.plotseed)
//!
//! Config file discovery:
//! - Searches current directory and parents for .plotseed/config.yaml
//! - Paths in config file are relative to the config file's parent directory

pub mod paths;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::FsMethod;

/// Where the demo content archive lives
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://github.com/Teplitsa/kandinsky-text/archive/master.zip";

/// Top-level directory the archive unpacks to
pub const DEFAULT_EXTRACT_DIR: &str = "kandinsky-text-master";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub source: Option<SourceConfig>,
    #[serde(default)]
    pub fs: Option<FsConfig>,
    /// Scenario alias -> plot directory name
    #[serde(default)]
    pub plots: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .plotseed/)
    pub home: Option<String>,
    /// Extraction directory (relative to config file's project root)
    pub uploads: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub archive_url: Option<String>,
    pub extract_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FsConfig {
    pub method: Option<FsMethod>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// State directory (catalog, library)
    pub home: PathBuf,
    /// Directory archives are extracted into
    pub uploads: PathBuf,
    /// Content archive URL
    pub archive_url: String,
    /// Top-level directory name inside the archive
    pub extract_dir: String,
    /// How collaborators write files
    pub fs_method: FsMethod,
    /// Scenario alias -> plot directory name
    pub plot_aliases: HashMap<String, String>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Settings handed to the importer
    pub fn import_settings(&self) -> crate::core::ImportSettings {
        crate::core::ImportSettings {
            archive_url: self.archive_url.clone(),
            uploads_dir: self.uploads.clone(),
            extract_dir: self.extract_dir.clone(),
        }
    }
}

/// Scenario names used by the setup wizard
pub fn default_plot_aliases() -> HashMap<String, String> {
    [
        ("problem-org", "color-line"),
        ("fundraising-org", "withyou"),
        ("public-campaign", "right2city"),
    ]
    .into_iter()
    .map(|(alias, plot)| (alias.to_string(), plot.to_string()))
    .collect()
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".plotseed").join("config.yaml");
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

/// Resolve a path that may be relative to the config file's parent
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

/// Build the resolved config from an optional parsed file
fn resolve(config_file: Option<(PathBuf, ConfigFile)>) -> Result<ResolvedConfig> {
    // Default home directory
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".plotseed");

    let mut plot_aliases = default_plot_aliases();

    let Some((config_path, config)) = config_file else {
        // No config file - use env vars or defaults
        let home = std::env::var("PLOTSEED_HOME")
            .map(PathBuf::from)
            .unwrap_or(default_home);

        let uploads = std::env::var("PLOTSEED_UPLOADS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| paths::default_uploads_dir(&home));

        return Ok(ResolvedConfig {
            home,
            uploads,
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            extract_dir: DEFAULT_EXTRACT_DIR.to_string(),
            fs_method: FsMethod::default(),
            plot_aliases,
            config_file: None,
        });
    };

    // .plotseed/ and the project root containing it
    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    let base_dir = config_dir.parent().unwrap_or(Path::new("."));

    let home = if let Ok(env_home) = std::env::var("PLOTSEED_HOME") {
        PathBuf::from(env_home)
    } else if let Some(ref home_path) = config.paths.home {
        resolve_path(config_dir, home_path)
    } else {
        default_home
    };

    let uploads = if let Ok(env_uploads) = std::env::var("PLOTSEED_UPLOADS") {
        PathBuf::from(env_uploads)
    } else if let Some(ref uploads_path) = config.paths.uploads {
        resolve_path(base_dir, uploads_path)
    } else {
        paths::default_uploads_dir(&home)
    };

    let source = config.source.as_ref();
    plot_aliases.extend(config.plots);

    Ok(ResolvedConfig {
        home,
        uploads,
        archive_url: source
            .and_then(|s| s.archive_url.clone())
            .unwrap_or_else(|| DEFAULT_ARCHIVE_URL.to_string()),
        extract_dir: source
            .and_then(|s| s.extract_dir.clone())
            .unwrap_or_else(|| DEFAULT_EXTRACT_DIR.to_string()),
        fs_method: config.fs.and_then(|fs| fs.method).unwrap_or_default(),
        plot_aliases,
        config_file: Some(config_path),
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = match find_config_file() {
        Some(path) => {
            let parsed = load_config_file(&path)?;
            Some((path, parsed))
        }
        None => None,
    };

    resolve(config_file)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{e:#}")));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, body: &str) -> PathBuf {
        let config_dir = temp.path().join(".plotseed");
        std::fs::create_dir_all(&config_dir).unwrap();

        let config_path = config_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "{}", body).unwrap();
        config_path
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            &temp,
            r#"
version: "1.0"
paths:
  home: ./state
  uploads: uploads
source:
  archive_url: https://example.com/content.zip
  extract_dir: content-main
fs:
  method: staged
plots:
  charity-org: withyou
"#,
        );

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./state".to_string()));
        assert_eq!(config.paths.uploads, Some("uploads".to_string()));
        assert_eq!(config.fs.unwrap().method, Some(FsMethod::Staged));
        assert_eq!(config.plots.get("charity-org"), Some(&"withyou".to_string()));
        assert_eq!(
            config.source.unwrap().archive_url.as_deref(),
            Some("https://example.com/content.zip")
        );
    }

    #[test]
    fn test_resolve_from_config_file() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            &temp,
            r#"
version: "1.0"
paths:
  home: /abs/state
  uploads: /abs/uploads
source:
  extract_dir: content-main
plots:
  problem-org: my-plot
"#,
        );

        let parsed = load_config_file(&config_path).unwrap();
        let config = resolve(Some((config_path.clone(), parsed))).unwrap();

        // Env vars take priority; only assert paths when they are unset
        if std::env::var("PLOTSEED_HOME").is_err() {
            assert_eq!(config.home, PathBuf::from("/abs/state"));
        }
        if std::env::var("PLOTSEED_UPLOADS").is_err() {
            assert_eq!(config.uploads, PathBuf::from("/abs/uploads"));
        }
        assert_eq!(config.archive_url, DEFAULT_ARCHIVE_URL);
        assert_eq!(config.extract_dir, "content-main");
        assert_eq!(config.fs_method, FsMethod::Direct);
        assert_eq!(config.config_file, Some(config_path));

        // File aliases override the built-in ones, the rest stay
        assert_eq!(config.plot_aliases["problem-org"], "my-plot");
        assert_eq!(config.plot_aliases["fundraising-org"], "withyou");
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve(None).unwrap();

        if std::env::var("PLOTSEED_HOME").is_err() {
            let expected_home = dirs::home_dir().unwrap().join(".plotseed");
            assert_eq!(config.home, expected_home);
        }
        assert_eq!(config.archive_url, DEFAULT_ARCHIVE_URL);
        assert_eq!(config.extract_dir, DEFAULT_EXTRACT_DIR);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_default_plot_aliases() {
        let config = resolve(None).unwrap();

        assert_eq!(config.plot_aliases.len(), 3);
        assert_eq!(config.plot_aliases["problem-org"], "color-line");
        assert_eq!(config.plot_aliases["fundraising-org"], "withyou");
        assert_eq!(config.plot_aliases["public-campaign"], "right2city");
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

//! Configuration for gateways and display defaults.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (BELIEVR_IPFS_GATEWAY, BELIEVR_ARWEAVE_GATEWAY,
//!    BELIEVR_UNTITLED_TITLE)
//! 2. Config file (explicit path, or .believr/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .believr/config.yaml
//! - Falls back to ~/.believr/config.yaml
//!
//! Configuration is resolved on demand and passed around explicitly; there
//! is no process-wide cache.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::media::{is_http_url, Gateways, MediaExtractor, UrlNormalizer};
use crate::post::{PostProjector, UNTITLED_POST};

pub const ENV_IPFS_GATEWAY: &str = "BELIEVR_IPFS_GATEWAY";
pub const ENV_ARWEAVE_GATEWAY: &str = "BELIEVR_ARWEAVE_GATEWAY";
pub const ENV_UNTITLED_TITLE: &str = "BELIEVR_UNTITLED_TITLE";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub gateways: GatewaysConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewaysConfig {
    /// Base URL for ipfs:// references
    pub ipfs: Option<String>,
    /// Base URL for ar:// references
    pub arweave: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    /// Title for posts that have none
    pub untitled_title: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    /// Gateway bases for content-addressed URIs
    pub gateways: Gateways,
    /// Fallback post title
    pub untitled_title: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            gateways: Gateways::default(),
            untitled_title: UNTITLED_POST.to_string(),
            config_file: None,
        }
    }
}

impl ResolvedConfig {
    /// Build a projector wired to these settings
    pub fn projector(&self) -> PostProjector {
        let normalizer = UrlNormalizer::new(self.gateways.clone());
        PostProjector::new(MediaExtractor::new(normalizer))
            .with_untitled(self.untitled_title.clone())
    }

    fn validate(self) -> Result<Self> {
        for (name, url) in [("ipfs", &self.gateways.ipfs), ("arweave", &self.gateways.arweave)] {
            if !is_http_url(url) {
                return Err(Error::InvalidGateway {
                    name,
                    url: url.clone(),
                });
            }
        }
        Ok(self)
    }
}

/// Find config file by searching current directory and parents, then home
pub fn find_config_file() -> Option<PathBuf> {
    let start = std::env::current_dir().ok();
    start
        .and_then(|dir| find_config_from(&dir))
        .or_else(|| {
            let home = dirs::home_dir()?.join(".believr").join("config.yaml");
            home.exists().then_some(home)
        })
}

fn find_config_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".believr").join("config.yaml");
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
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&content).map_err(|source| Error::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Environment overrides, as read from the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub ipfs_gateway: Option<String>,
    pub arweave_gateway: Option<String>,
    pub untitled_title: Option<String>,
}

impl EnvOverrides {
    /// Read overrides from the process environment
    pub fn from_env() -> Self {
        Self {
            ipfs_gateway: std::env::var(ENV_IPFS_GATEWAY).ok(),
            arweave_gateway: std::env::var(ENV_ARWEAVE_GATEWAY).ok(),
            untitled_title: std::env::var(ENV_UNTITLED_TITLE).ok(),
        }
    }
}

/// Merge a parsed config file and environment overrides over the defaults
pub fn resolve(file: Option<(PathBuf, ConfigFile)>, env: EnvOverrides) -> Result<ResolvedConfig> {
    let (config_file, parsed) = match file {
        Some((path, parsed)) => (Some(path), parsed),
        None => (None, ConfigFile::default()),
    };

    let ipfs = env
        .ipfs_gateway
        .or(parsed.gateways.ipfs)
        .unwrap_or_else(|| crate::media::DEFAULT_IPFS_GATEWAY.to_string());
    let arweave = env
        .arweave_gateway
        .or(parsed.gateways.arweave)
        .unwrap_or_else(|| crate::media::DEFAULT_ARWEAVE_GATEWAY.to_string());
    let untitled_title = env
        .untitled_title
        .or(parsed.display.untitled_title)
        .unwrap_or_else(|| UNTITLED_POST.to_string());

    ResolvedConfig {
        gateways: Gateways::new(ipfs, arweave),
        untitled_title,
        config_file,
    }
    .validate()
}

/// Load configuration from all sources.
///
/// `explicit` takes precedence over config file discovery.
pub fn load_config(explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(),
    };

    let file = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading config file");
            let parsed = load_config_file(&path)?;
            Some((path, parsed))
        }
        None => {
            debug!("No config file found, using defaults");
            None
        }
    };

    resolve(file, EnvOverrides::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = resolve(None, EnvOverrides::default()).unwrap();
        assert_eq!(config, ResolvedConfig::default());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let believr_dir = temp.path().join(".believr");
        std::fs::create_dir_all(&believr_dir).unwrap();

        let config_path = believr_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1"
gateways:
  ipfs: https://ipfs.example.org/ipfs
display:
  untitled_title: No title
"#
        )
        .unwrap();

        let parsed = load_config_file(&config_path).unwrap();
        assert_eq!(parsed.version.as_deref(), Some("1"));
        assert_eq!(
            parsed.gateways.ipfs.as_deref(),
            Some("https://ipfs.example.org/ipfs")
        );
        assert!(parsed.gateways.arweave.is_none());

        let config = resolve(Some((config_path.clone(), parsed)), EnvOverrides::default()).unwrap();
        // Trailing slash is added to the configured base
        assert_eq!(config.gateways.ipfs, "https://ipfs.example.org/ipfs/");
        assert_eq!(config.gateways.arweave, crate::media::DEFAULT_ARWEAVE_GATEWAY);
        assert_eq!(config.untitled_title, "No title");
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_env_overrides_file() {
        let parsed = ConfigFile {
            gateways: GatewaysConfig {
                ipfs: Some("https://from-file/".to_string()),
                arweave: None,
            },
            ..Default::default()
        };
        let env = EnvOverrides {
            ipfs_gateway: Some("https://from-env/".to_string()),
            ..Default::default()
        };

        let config = resolve(Some((PathBuf::from("c.yaml"), parsed)), env).unwrap();
        assert_eq!(config.gateways.ipfs, "https://from-env/");
    }

    #[test]
    fn test_invalid_gateway_rejected() {
        let env = EnvOverrides {
            arweave_gateway: Some("arweave.net".to_string()),
            ..Default::default()
        };

        match resolve(None, env) {
            Err(Error::InvalidGateway { name, url }) => {
                assert_eq!(name, "arweave");
                assert_eq!(url, "arweave.net/");
            }
            other => panic!("Expected InvalidGateway, got {:?}", other),
        }
    }

    #[test]
    fn test_discovery_searches_parents() {
        let temp = TempDir::new().unwrap();
        let believr_dir = temp.path().join(".believr");
        std::fs::create_dir_all(&believr_dir).unwrap();
        std::fs::write(believr_dir.join("config.yaml"), "version: \"1\"\n").unwrap();

        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_config_from(&nested),
            Some(believr_dir.join("config.yaml"))
        );
    }

    #[test]
    fn test_malformed_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "gateways: 42\n").unwrap();

        assert!(matches!(load_config_file(&path), Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_unreadable_config_names_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yaml");

        match load_config_file(&path) {
            Err(Error::ConfigRead { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected ConfigRead error, got {:?}", other),
        }

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_projector_uses_settings() {
        let config = ResolvedConfig {
            gateways: Gateways::new("https://ipfs.local/ipfs/", "https://ar.local/"),
            untitled_title: "Sans titre".to_string(),
            config_file: None,
        };

        let post = crate::post::Post::new(crate::post::PostMetadata::Image {
            content: String::new(),
            image: Some(crate::media::MediaValue::url("ipfs://q")),
        });
        let projection = config.projector().project(&post);

        assert_eq!(projection.image_url, "https://ipfs.local/ipfs/q");
        assert_eq!(projection.title, "Sans titre");
    }
}

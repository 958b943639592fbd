//! Service configuration, loaded from YAML with defaults for every field.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming a YAML config file
pub static CONFIG_ENV: &str = "FAKE_NEWS_CONFIG";

/// Inference service configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Socket address to bind
    pub listen_addr: String,

    /// Directory holding the fitted model and vectorizer
    pub artifact_dir: PathBuf,

    /// Origins allowed by CORS; `"*"` allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            artifact_dir: PathBuf::from("artifacts"),
            allowed_origins: vec![
                "https://ishaq019.github.io".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

/// Load a [`ServiceConfig`] from a YAML file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the YAML is invalid.
pub fn load_config(path: &Path) -> anyhow::Result<ServiceConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
    let config: ServiceConfig = serde_yaml::from_str(&contents)
        .map_err(|e| anyhow!("Failed to parse config YAML: {}", e))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_yaml(yaml: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_load_config_full() {
        let f = write_yaml(
            r#"
listen_addr: "127.0.0.1:9090"
artifact_dir: "/srv/fake-news"
allowed_origins:
  - "*"
"#,
        );

        let config = load_config(f.path()).unwrap();

        assert_eq!(
            config,
            ServiceConfig {
                listen_addr: "127.0.0.1:9090".to_string(),
                artifact_dir: PathBuf::from("/srv/fake-news"),
                allowed_origins: vec!["*".to_string()],
            }
        );
    }

    #[test]
    fn test_load_config_partial_uses_defaults() {
        let f = write_yaml("artifact_dir: models\n");

        let config = load_config(f.path()).unwrap();

        assert_eq!(config.artifact_dir, PathBuf::from("models"));
        assert_eq!(config.listen_addr, ServiceConfig::default().listen_addr);
        assert_eq!(config.allowed_origins.len(), 3);
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config(Path::new("/nonexistent/config.yaml")).is_err());
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let f = write_yaml("listen_addr: [unclosed");

        assert!(load_config(f.path()).is_err());
    }
}

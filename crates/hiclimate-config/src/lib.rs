use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_DATASET: &str = "Resources/hawaii.sqlite";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub server: Option<ServerConfig>,
    pub dataset: Option<DatasetConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from HICLIMATE_CONFIG path (TOML) if present, then
    /// apply HICLIMATE_BIND / HICLIMATE_DATASET overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as `load`, reading variables through `lookup`
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup("HICLIMATE_CONFIG").unwrap_or_else(|| "config.toml".to_string());
        Ok(Self::from_file(path)?.apply_overrides(lookup))
    }

    /// Environment values win over whatever the file set
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("HICLIMATE_BIND") {
            self.server = Some(ServerConfig { bind: Some(bind) });
        }
        if let Some(dataset) = lookup("HICLIMATE_DATASET") {
            self.dataset = Some(DatasetConfig {
                path: Some(dataset.into()),
            });
        }
        self
    }

    /// Parse a TOML file; a missing file yields the defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let cfg = if path.exists() {
            let s = fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    /// Get HTTP bind address (default 127.0.0.1:5000)
    pub fn http_bind(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    /// Get dataset file path (default Resources/hawaii.sqlite)
    pub fn dataset_path(&self) -> PathBuf {
        self.dataset
            .as_ref()
            .and_then(|d| d.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.http_bind(), "127.0.0.1:5000");
        assert_eq!(cfg.dataset_path(), PathBuf::from("Resources/hawaii.sqlite"));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::from_file(dir.path().join("absent.toml")).unwrap();
        assert!(cfg.server.is_none());
        assert!(cfg.dataset.is_none());
    }

    #[test]
    fn reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[server]\nbind = \"0.0.0.0:8080\"\n\n[dataset]\npath = \"/data/hawaii.sqlite\"\n",
        )
        .unwrap();

        let cfg = AppConfig::from_file(&path).unwrap();
        assert_eq!(cfg.http_bind(), "0.0.0.0:8080");
        assert_eq!(cfg.dataset_path(), PathBuf::from("/data/hawaii.sqlite"));
    }

    #[test]
    fn partial_sections_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\n").unwrap();

        let cfg = AppConfig::from_file(&path).unwrap();
        assert_eq!(cfg.http_bind(), DEFAULT_BIND);
        assert_eq!(cfg.dataset_path(), PathBuf::from(DEFAULT_DATASET));
    }

    fn vars(pairs: &[(&str, String)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn env_bind_beats_file_bind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[server]\nbind = \"0.0.0.0:8080\"\n").unwrap();

        let cfg = AppConfig::load_with(vars(&[
            ("HICLIMATE_CONFIG", path.display().to_string()),
            ("HICLIMATE_BIND", "127.0.0.1:9000".to_string()),
        ]))
        .unwrap();
        assert_eq!(cfg.http_bind(), "127.0.0.1:9000");
        assert_eq!(cfg.dataset_path(), PathBuf::from(DEFAULT_DATASET));
    }

    #[test]
    fn config_path_comes_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[dataset]\npath = \"/srv/hawaii.sqlite\"\n").unwrap();

        let cfg = AppConfig::load_with(vars(&[(
            "HICLIMATE_CONFIG",
            path.display().to_string(),
        )]))
        .unwrap();
        assert_eq!(cfg.dataset_path(), PathBuf::from("/srv/hawaii.sqlite"));
        assert_eq!(cfg.http_bind(), DEFAULT_BIND);
    }

    #[test]
    fn env_dataset_beats_the_default() {
        let lookup = vars(&[("HICLIMATE_DATASET", "/tmp/other.sqlite".to_string())]);
        let cfg = AppConfig::default().apply_overrides(lookup);
        assert_eq!(cfg.dataset_path(), PathBuf::from("/tmp/other.sqlite"));
        assert_eq!(cfg.http_bind(), DEFAULT_BIND);
    }

    #[test]
    fn no_overrides_keeps_file_values() {
        let cfg = AppConfig::default().apply_overrides(|_| None);
        assert!(cfg.server.is_none());
        assert!(cfg.dataset.is_none());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nbind = ").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Toml(_))
        ));
    }
}

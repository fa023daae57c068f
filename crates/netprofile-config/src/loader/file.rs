use std::path::Path;
use tracing::info;

use super::source::SourceConfig;
use super::SourceFormat;
use crate::config::ResolverConfig;
use crate::{ConfigError, ConfigResult};

/// File-based configuration loader
pub struct FileLoader;

impl FileLoader {
    /// Load an unvalidated config from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> ConfigResult<ResolverConfig> {
        Self::load_as(path.as_ref(), SourceFormat::Json)
    }

    /// Load an unvalidated config from a TOML file
    pub fn load_toml<P: AsRef<Path>>(path: P) -> ConfigResult<ResolverConfig> {
        Self::load_as(path.as_ref(), SourceFormat::Toml)
    }

    /// Auto-detect the file format and load an unvalidated config
    pub fn load_auto<P: AsRef<Path>>(path: P) -> ConfigResult<ResolverConfig> {
        let path = path.as_ref();
        Self::ensure_exists(path)?;

        match SourceFormat::from_path(path)? {
            Some(format) => Self::load_as(path, format),
            None => {
                let content = std::fs::read_to_string(path)?;
                Self::parse_untyped(path, &content)
            }
        }
    }

    /// Same as [`load_auto`](Self::load_auto), reading through `tokio::fs`
    pub async fn load_auto_async<P: AsRef<Path>>(path: P) -> ConfigResult<ResolverConfig> {
        let path = path.as_ref();
        Self::ensure_exists(path)?;

        let content = tokio::fs::read_to_string(path).await?;
        match SourceFormat::from_path(path)? {
            Some(format) => Self::parse(path, &content, format),
            None => Self::parse_untyped(path, &content),
        }
    }

    /// Save configuration to a JSON file
    pub fn save_json<P: AsRef<Path>>(config: &ResolverConfig, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(&SourceConfig::from_config(config))
            .map_err(|e| ConfigError::InvalidFormat(format!("JSON serialization failed: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save_toml<P: AsRef<Path>>(config: &ResolverConfig, path: P) -> ConfigResult<()> {
        let content = toml::to_string_pretty(&SourceConfig::from_config(config))
            .map_err(|e| ConfigError::InvalidFormat(format!("TOML serialization failed: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn ensure_exists(path: &Path) -> ConfigResult<()> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        Ok(())
    }

    fn load_as(path: &Path, format: SourceFormat) -> ConfigResult<ResolverConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()),
            _ => ConfigError::Io(e),
        })?;
        Self::parse(path, &content, format)
    }

    fn parse(path: &Path, content: &str, format: SourceFormat) -> ConfigResult<ResolverConfig> {
        let config = super::NetworkProfileResolver::load_str(content, format)?;
        info!(
            path = %path.display(),
            format = ?format,
            networks = config.len(),
            compiler_version = config.compiler_version().unwrap_or("<unset>"),
            "Loaded network profiles"
        );
        Ok(config)
    }

    /// No extension: try TOML first, then JSON.
    fn parse_untyped(path: &Path, content: &str) -> ConfigResult<ResolverConfig> {
        match Self::parse(path, content, SourceFormat::Toml) {
            Ok(config) => Ok(config),
            Err(ConfigError::MalformedConfig(_)) => Self::parse(path, content, SourceFormat::Json),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_logs_summary_without_secrets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("netprofile.json");
        std::fs::write(
            &path,
            r#"{
                "compilerVersion": "0.8.28",
                "networks": {
                    "sepolia": {
                        "endpointUrl": "https://sepolia.infura.io/v3/4fdeb7812b9546b4b9027a9187e82bbc",
                        "signingCredentials": ["SEPOLIA_KEY"]
                    }
                }
            }"#,
        )
        .unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || {
            FileLoader::load_json(&path).unwrap()
        });
        assert_eq!(config.len(), 1);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Loaded network profiles"));
        assert!(output.contains("compiler_version"));
        assert!(output.contains("0.8.28"));
        assert!(!output.contains("4fdeb7812b9546b4b9027a9187e82bbc"));
    }
}

use crate::constants::{DEFAULT_FILE_NAMES, ENV_PREFIX};
use crate::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use url::Url;

/// Configuration utility functions
pub struct ConfigUtils;

impl ConfigUtils {
    /// Find a config file in `start` or the closest ancestor that has one.
    pub fn find_nearest<P: AsRef<Path>>(start: P) -> ConfigResult<PathBuf> {
        let start = start.as_ref();
        for dir in start.ancestors() {
            for name in DEFAULT_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }

        Err(ConfigError::FileNotFound(format!(
            "none of {:?} found in {} or its parents",
            DEFAULT_FILE_NAMES,
            start.display()
        )))
    }

    /// Reject files that group or other users can read.
    pub fn validate_file_permissions<P: AsRef<Path>>(path: P) -> ConfigResult<()> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(());
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = path.metadata()?.permissions().mode();

            if mode & 0o044 != 0 {
                return Err(ConfigError::InvalidFormat(format!(
                    "{} has overly permissive permissions",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Lower-cased file extension, if any.
    pub fn file_extension<P: AsRef<Path>>(path: P) -> Option<String> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase())
    }

    /// Environment variable for a per-network override,
    /// e.g. `NETPROFILE_SEPOLIA_ENDPOINT_URL`.
    pub fn network_env_key(network: &str, field: &str) -> String {
        let network: String = network
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}_{}_{}", ENV_PREFIX, network, field)
    }

    /// Scheme and host of an endpoint, safe to log.
    ///
    /// Path, query and userinfo are dropped since RPC providers put API keys
    /// there.
    pub fn redact_url(raw: &str) -> String {
        match Url::parse(raw) {
            Ok(url) => match (url.host_str(), url.port()) {
                (Some(host), Some(port)) => format!("{}://{}:{}/…", url.scheme(), host, port),
                (Some(host), None) => format!("{}://{}/…", url.scheme(), host),
                (None, _) => format!("{}:…", url.scheme()),
            },
            Err(_) => "<unparseable url>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_network_env_key() {
        assert_eq!(
            ConfigUtils::network_env_key("sepolia", "ENDPOINT_URL"),
            "NETPROFILE_SEPOLIA_ENDPOINT_URL"
        );
        assert_eq!(
            ConfigUtils::network_env_key("arbitrum-one", "GAS_PRICE_WEI"),
            "NETPROFILE_ARBITRUM_ONE_GAS_PRICE_WEI"
        );
    }

    #[test]
    fn test_redact_url() {
        assert_eq!(
            ConfigUtils::redact_url("https://sepolia.infura.io/v3/4fdeb7812b9546b4"),
            "https://sepolia.infura.io/…"
        );
        assert_eq!(
            ConfigUtils::redact_url("http://user:pw@127.0.0.1:8545"),
            "http://127.0.0.1:8545/…"
        );
        assert_eq!(ConfigUtils::redact_url("not a url"), "<unparseable url>");
    }

    #[test]
    fn test_find_nearest_walks_up() {
        let root = tempdir().unwrap();
        let nested = root.path().join("contracts").join("token");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join("netprofile.json"), "{}").unwrap();

        let found = ConfigUtils::find_nearest(&nested).unwrap();
        assert_eq!(found, root.path().join("netprofile.json"));
    }

    #[test]
    fn test_find_nearest_prefers_toml() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("netprofile.json"), "{}").unwrap();
        fs::write(root.path().join("netprofile.toml"), "").unwrap();

        let found = ConfigUtils::find_nearest(root.path()).unwrap();
        assert_eq!(found, root.path().join("netprofile.toml"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("deployer.key");
        fs::write(&path, "secret").unwrap();

        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();
        assert!(ConfigUtils::validate_file_permissions(&path).is_ok());

        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        assert!(ConfigUtils::validate_file_permissions(&path).is_err());
    }
}

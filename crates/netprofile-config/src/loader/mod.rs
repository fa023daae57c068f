//! Loading network profiles from declarative sources

pub mod env;
pub mod file;
mod source;
pub mod validation;

pub use env::EnvLoader;
pub use file::FileLoader;
pub use validation::ConfigValidator;

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::utils::ConfigUtils;
use crate::{ConfigError, ConfigResult};
use source::SourceConfig;

/// Syntax of a declarative source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
}

impl SourceFormat {
    /// Format implied by a file extension; `None` when there is no extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Option<Self>> {
        match ConfigUtils::file_extension(path).as_deref() {
            Some("json") => Ok(Some(SourceFormat::Json)),
            Some("toml") => Ok(Some(SourceFormat::Toml)),
            Some(ext) => Err(ConfigError::InvalidFormat(format!(
                "Unsupported file extension: {}",
                ext
            ))),
            None => Ok(None),
        }
    }
}

/// Entry point for building a [`ResolverConfig`].
///
/// Every `load_*` returns an unvalidated config; call
/// [`ResolverConfig::validate`] before resolving. [`load_validated`]
/// does both for the usual fail-fast startup path.
///
/// [`load_validated`]: NetworkProfileResolver::load_validated
#[derive(Debug, Clone, Default)]
pub struct NetworkProfileResolver {
    env_overrides: bool,
}

impl NetworkProfileResolver {
    /// Resolver that uses the source as-is.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that applies `NETPROFILE_*` environment overrides after parsing.
    pub fn with_env_overrides() -> Self {
        Self {
            env_overrides: true,
        }
    }

    /// Parse source text.
    pub fn load_str(content: &str, format: SourceFormat) -> ConfigResult<ResolverConfig> {
        let source: SourceConfig = match format {
            SourceFormat::Json => serde_json::from_str(content)?,
            SourceFormat::Toml => toml::from_str(content)?,
        };
        let config = source.into_config()?;
        debug!(
            format = ?format,
            networks = config.len(),
            compiler_version = config.compiler_version().unwrap_or("<unset>"),
            "Parsed network profile source"
        );
        Ok(config)
    }

    /// Build from an already parsed structural form.
    ///
    /// A `serde_json::Value` object cannot hold two equal keys, so duplicate
    /// names are already collapsed by the time they reach here.
    pub fn load_value(value: serde_json::Value) -> ConfigResult<ResolverConfig> {
        let source = SourceConfig::deserialize(value)?;
        let config = source.into_config()?;
        debug!(
            networks = config.len(),
            compiler_version = config.compiler_version().unwrap_or("<unset>"),
            "Built network profiles from value"
        );
        Ok(config)
    }

    /// Load a file, picking the format from its extension.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<ResolverConfig> {
        let config = FileLoader::load_auto(path)?;
        self.finish(config)
    }

    /// Load a file through `tokio::fs`.
    pub async fn load_file_async<P: AsRef<Path>>(&self, path: P) -> ConfigResult<ResolverConfig> {
        let config = FileLoader::load_auto_async(path).await?;
        self.finish(config)
    }

    /// Load and validate a file in one step.
    pub fn load_validated<P: AsRef<Path>>(&self, path: P) -> ConfigResult<ResolverConfig> {
        self.load_file(path)?.validate()
    }

    /// Find the nearest `netprofile.{toml,json}` from `start` upwards and load it.
    pub fn load_nearest<P: AsRef<Path>>(&self, start: P) -> ConfigResult<ResolverConfig> {
        let path = ConfigUtils::find_nearest(start)?;
        self.load_file(path)
    }

    fn finish(&self, config: ResolverConfig) -> ConfigResult<ResolverConfig> {
        if self.env_overrides {
            EnvLoader::apply_overrides(config)
        } else {
            Ok(config)
        }
    }
}

use std::env;
use tracing::debug;

use crate::config::{ConfigState, ResolverConfig};
use crate::utils::ConfigUtils;
use crate::{ConfigError, ConfigResult};

pub const COMPILER_VERSION_VAR: &str = "NETPROFILE_COMPILER_VERSION";
pub const DEFAULT_NETWORK_VAR: &str = "NETPROFILE_DEFAULT_NETWORK";
const ENDPOINT_URL_FIELD: &str = "ENDPOINT_URL";
const GAS_PRICE_WEI_FIELD: &str = "GAS_PRICE_WEI";

/// Environment variable overrides, applied while a config is being built.
///
/// Only networks already declared in the source are touched; an override
/// never introduces a new network. Empty variables count as unset.
pub struct EnvLoader;

impl EnvLoader {
    /// Apply overrides from the process environment.
    pub fn apply_overrides(config: ResolverConfig) -> ConfigResult<ResolverConfig> {
        Self::apply_overrides_with(config, |key| env::var(key).ok())
    }

    /// Apply overrides read through `lookup`.
    pub fn apply_overrides_with<F>(
        mut config: ResolverConfig,
        lookup: F,
    ) -> ConfigResult<ResolverConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(version) = lookup(COMPILER_VERSION_VAR) {
            debug!(variable = COMPILER_VERSION_VAR, version = %version, "Overriding compiler version");
            config.compiler_version = Some(version.trim().to_string());
        }

        if let Some(network) = lookup(DEFAULT_NETWORK_VAR) {
            debug!(variable = DEFAULT_NETWORK_VAR, network = %network, "Overriding default network");
            config.default_network = Some(network.trim().to_string());
        }

        for profile in config.networks.values_mut() {
            let key = ConfigUtils::network_env_key(&profile.name, ENDPOINT_URL_FIELD);
            if let Some(url) = lookup(&key) {
                debug!(
                    variable = %key,
                    endpoint = %ConfigUtils::redact_url(url.trim()),
                    "Overriding endpoint"
                );
                profile.endpoint_url = Some(url.trim().to_string());
            }

            let key = ConfigUtils::network_env_key(&profile.name, GAS_PRICE_WEI_FIELD);
            if let Some(raw) = lookup(&key) {
                let gas_price = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::EnvironmentError(format!("Invalid {}", key)))?;
                debug!(variable = %key, gas_price_wei = gas_price, "Overriding gas price");
                profile.gas_price_wei = Some(gas_price);
            }
        }

        config.state = ConfigState::Unvalidated;
        Ok(config)
    }
}

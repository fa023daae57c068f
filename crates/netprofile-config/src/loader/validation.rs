use tracing::debug;
use url::Url;

use crate::config::{NetworkProfile, ResolverConfig};
use crate::constants::{ALLOWED_URL_SCHEMES, MAX_GAS_PRICE_WEI};
use crate::error::ProfileViolation;
use crate::networks::KnownNetwork;
use crate::secrets::ReferenceProblem;
use crate::{ConfigError, ConfigResult};

/// Configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Check every invariant of a config, stopping at the first violation.
    ///
    /// Profiles are visited in name order so the reported error is stable.
    pub fn validate(config: &ResolverConfig) -> ConfigResult<()> {
        if let Some(version) = config.compiler_version() {
            Self::validate_compiler_version(version)?;
        }

        for profile in config.profiles() {
            Self::validate_profile(profile)
                .map_err(|reason| ConfigError::invalid_profile(profile.name(), reason))?;
            let endpoint = profile
                .endpoint_origin()
                .unwrap_or_else(|| "<in-process>".to_string());
            debug!(
                network = profile.name(),
                endpoint = %endpoint,
                credentials = profile.signing_credentials().len(),
                gas_price_wei = ?profile.gas_price_wei(),
                "Network profile ok"
            );
        }

        if let Some(default) = config.default_network() {
            if !config.contains(default) {
                return Err(ConfigError::UnknownNetwork(default.to_string()));
            }
        }

        Ok(())
    }

    /// `MAJOR.MINOR.PATCH`, decimal components only.
    pub fn validate_compiler_version(version: &str) -> ConfigResult<()> {
        let parts: Vec<&str> = version.split('.').collect();
        let well_formed = parts.len() == 3
            && parts
                .iter()
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));

        if !well_formed {
            return Err(ConfigError::InvalidCompilerVersion(version.to_string()));
        }
        Ok(())
    }

    /// Check one profile against the per-network invariants.
    pub fn validate_profile(profile: &NetworkProfile) -> Result<(), ProfileViolation> {
        Self::validate_name(profile.name())?;

        if let Some(raw_url) = profile.endpoint_url() {
            if profile.signing_credentials().is_empty() {
                return Err(ProfileViolation::MissingCredentials);
            }
            Self::validate_endpoint(raw_url)?;
        }

        if let Some(gas_price) = profile.gas_price_wei() {
            if gas_price > MAX_GAS_PRICE_WEI {
                return Err(ProfileViolation::GasPriceOutOfRange {
                    max: MAX_GAS_PRICE_WEI,
                });
            }
        }

        if let Some(chain_id) = profile.chain_id() {
            Self::validate_chain_id(profile.name(), chain_id)?;
        }

        for (index, reference) in profile.signing_credentials().iter().enumerate() {
            match reference.check() {
                Ok(()) => {}
                Err(ReferenceProblem::LiteralSecret) => {
                    return Err(ProfileViolation::LiteralSecret { index })
                }
                Err(ReferenceProblem::Invalid) => {
                    return Err(ProfileViolation::InvalidSecretReference { index })
                }
            }
        }

        Ok(())
    }

    fn validate_name(name: &str) -> Result<(), ProfileViolation> {
        if name.is_empty() {
            return Err(ProfileViolation::EmptyName);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ProfileViolation::WhitespaceInName);
        }
        Ok(())
    }

    fn validate_endpoint(raw_url: &str) -> Result<(), ProfileViolation> {
        let url = Url::parse(raw_url).map_err(|_| ProfileViolation::MalformedUrl)?;

        if !ALLOWED_URL_SCHEMES.contains(&url.scheme()) {
            return Err(ProfileViolation::UnsupportedUrlScheme(
                url.scheme().to_string(),
            ));
        }

        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(()),
            _ => Err(ProfileViolation::MissingUrlHost),
        }
    }

    fn validate_chain_id(name: &str, chain_id: u64) -> Result<(), ProfileViolation> {
        if chain_id == 0 {
            return Err(ProfileViolation::ZeroChainId);
        }

        if let Some(known) = KnownNetwork::from_name(name) {
            if known.chain_id() != chain_id {
                return Err(ProfileViolation::ChainIdMismatch {
                    expected: known.chain_id(),
                    found: chain_id,
                });
            }
        }

        Ok(())
    }
}

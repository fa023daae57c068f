use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, info};

use super::NetworkProfile;
use crate::loader::ConfigValidator;
use crate::{ConfigError, ConfigResult};

/// Whether a [`ResolverConfig`] has passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigState {
    Unvalidated,
    Validated,
}

/// Every deployable network of a project, plus the shared compiler version.
///
/// Built once at startup and never mutated afterwards; share it by reference
/// or behind an `Arc` across concurrent deploys.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub(crate) compiler_version: Option<String>,
    pub(crate) default_network: Option<String>,
    pub(crate) networks: HashMap<String, NetworkProfile>,
    pub(crate) state: ConfigState,
}

impl ResolverConfig {
    /// Build an unvalidated config from embedded profiles.
    pub fn new<I>(compiler_version: Option<String>, profiles: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = NetworkProfile>,
    {
        let mut networks = HashMap::new();
        for profile in profiles {
            match networks.entry(profile.name.clone()) {
                Entry::Occupied(_) => return Err(ConfigError::DuplicateNetwork(profile.name)),
                Entry::Vacant(slot) => {
                    slot.insert(profile);
                }
            }
        }

        Ok(Self {
            compiler_version,
            default_network: None,
            networks,
            state: ConfigState::Unvalidated,
        })
    }

    /// Set the network used by [`resolve_default`](Self::resolve_default).
    ///
    /// The returned config is unvalidated again.
    pub fn with_default_network(mut self, name: impl Into<String>) -> Self {
        self.default_network = Some(name.into());
        self.state = ConfigState::Unvalidated;
        self
    }

    pub fn compiler_version(&self) -> Option<&str> {
        self.compiler_version.as_deref()
    }

    pub fn default_network(&self) -> Option<&str> {
        self.default_network.as_deref()
    }

    pub fn state(&self) -> ConfigState {
        self.state
    }

    pub fn is_validated(&self) -> bool {
        self.state == ConfigState::Validated
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.networks.contains_key(name)
    }

    /// Declared network names, sorted.
    pub fn network_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.networks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Profiles sorted by name.
    pub fn profiles(&self) -> Vec<&NetworkProfile> {
        let mut profiles: Vec<&NetworkProfile> = self.networks.values().collect();
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        profiles
    }

    /// Check every invariant without changing state.
    pub fn check(&self) -> ConfigResult<()> {
        ConfigValidator::validate(self)
    }

    /// Check every invariant and mark the config as validated.
    pub fn validate(mut self) -> ConfigResult<Self> {
        self.check()?;
        self.state = ConfigState::Validated;
        info!(
            networks = self.networks.len(),
            compiler_version = self.compiler_version.as_deref().unwrap_or("<unset>"),
            "Network profiles validated"
        );
        Ok(self)
    }

    /// Look up a profile by exact, case-sensitive name.
    pub fn resolve(&self, name: &str) -> ConfigResult<&NetworkProfile> {
        self.ensure_validated()?;

        let profile = self
            .networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))?;

        debug!(network = name, local = profile.is_local(), "Resolved network profile");
        Ok(profile)
    }

    /// Resolve the network named by `defaultNetwork`.
    pub fn resolve_default(&self) -> ConfigResult<&NetworkProfile> {
        self.ensure_validated()?;
        let name = self
            .default_network
            .as_deref()
            .ok_or(ConfigError::NoDefaultNetwork)?;
        self.resolve(name)
    }

    fn ensure_validated(&self) -> ConfigResult<()> {
        if self.state != ConfigState::Validated {
            return Err(ConfigError::PreconditionViolated(
                "resolve called on an unvalidated config",
            ));
        }
        Ok(())
    }
}

//! On-disk shape of a network profile source

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::config::{ConfigState, NetworkProfile, ResolverConfig};
use crate::secrets::SecretRef;
use crate::{ConfigError, ConfigResult};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct SourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_network: Option<String>,

    #[serde(default)]
    pub networks: NetworkEntries,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct SourceProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signing_credentials: Vec<SecretRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price_wei: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

/// Sequence-form entry, as written with TOML `[[networks]]`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct NamedSourceProfile {
    name: String,
    #[serde(default)]
    endpoint_url: Option<String>,
    #[serde(default)]
    signing_credentials: Vec<SecretRef>,
    #[serde(default)]
    gas_price_wei: Option<u64>,
    #[serde(default)]
    chain_id: Option<u64>,
}

impl NamedSourceProfile {
    fn into_entry(self) -> (String, SourceProfile) {
        (
            self.name,
            SourceProfile {
                endpoint_url: self.endpoint_url,
                signing_credentials: self.signing_credentials,
                gas_price_wei: self.gas_price_wei,
                chain_id: self.chain_id,
            },
        )
    }
}

/// Network entries in source order, duplicates included.
///
/// Deserializing into a map type would silently keep the last of two
/// entries with the same name.
#[derive(Debug, Default)]
pub(crate) struct NetworkEntries(pub Vec<(String, SourceProfile)>);

impl<'de> Deserialize<'de> for NetworkEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NetworkEntriesVisitor)
    }
}

struct NetworkEntriesVisitor;

impl<'de> Visitor<'de> for NetworkEntriesVisitor {
    type Value = NetworkEntries;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of network name to profile, or a list of named profiles")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some((name, profile)) = map.next_entry::<String, SourceProfile>()? {
            entries.push((name, profile));
        }
        Ok(NetworkEntries(entries))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some(named) = seq.next_element::<NamedSourceProfile>()? {
            entries.push(named.into_entry());
        }
        Ok(NetworkEntries(entries))
    }
}

impl Serialize for NetworkEntries {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, profile) in &self.0 {
            map.serialize_entry(name, profile)?;
        }
        map.end()
    }
}

impl SourceConfig {
    /// Build the unvalidated config, rejecting duplicate names.
    pub fn into_config(self) -> ConfigResult<ResolverConfig> {
        let mut networks = HashMap::with_capacity(self.networks.0.len());
        for (name, profile) in self.networks.0 {
            if networks.contains_key(&name) {
                return Err(ConfigError::DuplicateNetwork(name));
            }
            let profile = NetworkProfile {
                name: name.clone(),
                endpoint_url: profile.endpoint_url,
                signing_credentials: profile.signing_credentials,
                gas_price_wei: profile.gas_price_wei,
                chain_id: profile.chain_id,
            };
            networks.insert(name, profile);
        }

        Ok(ResolverConfig {
            compiler_version: self.compiler_version,
            default_network: self.default_network,
            networks,
            state: ConfigState::Unvalidated,
        })
    }

    /// Source form of a config, networks sorted by name.
    pub fn from_config(config: &ResolverConfig) -> Self {
        let entries = config
            .profiles()
            .into_iter()
            .map(|profile| {
                (
                    profile.name.clone(),
                    SourceProfile {
                        endpoint_url: profile.endpoint_url.clone(),
                        signing_credentials: profile.signing_credentials.clone(),
                        gas_price_wei: profile.gas_price_wei,
                        chain_id: profile.chain_id,
                    },
                )
            })
            .collect();

        Self {
            compiler_version: config.compiler_version.clone(),
            default_network: config.default_network.clone(),
            networks: NetworkEntries(entries),
        }
    }
}

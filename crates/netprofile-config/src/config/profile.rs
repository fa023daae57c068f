use std::fmt;

use crate::secrets::{SecretRef, SecretSource, SecretValue};
use crate::utils::ConfigUtils;
use crate::{ConfigError, ConfigResult};

/// Connection and signing parameters for one deployable network.
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    pub(crate) name: String,
    pub(crate) endpoint_url: Option<String>,
    pub(crate) signing_credentials: Vec<SecretRef>,
    pub(crate) gas_price_wei: Option<u64>,
    pub(crate) chain_id: Option<u64>,
}

impl NetworkProfile {
    /// In-process or otherwise local network: no endpoint, no keys.
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint_url: None,
            signing_credentials: Vec::new(),
            gas_price_wei: None,
            chain_id: None,
        }
    }

    /// Network reached over RPC and signed for with the given credentials.
    pub fn remote(
        name: impl Into<String>,
        endpoint_url: impl Into<String>,
        signing_credentials: Vec<SecretRef>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint_url: Some(endpoint_url.into()),
            signing_credentials,
            gas_price_wei: None,
            chain_id: None,
        }
    }

    pub fn with_gas_price_wei(mut self, gas_price_wei: u64) -> Self {
        self.gas_price_wei = Some(gas_price_wei);
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn with_credential(mut self, credential: SecretRef) -> Self {
        self.signing_credentials.push(credential);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    pub fn signing_credentials(&self) -> &[SecretRef] {
        &self.signing_credentials
    }

    /// Fixed gas price; `None` leaves fee estimation to the chain.
    pub fn gas_price_wei(&self) -> Option<u64> {
        self.gas_price_wei
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// True for simulation networks that need no RPC endpoint.
    pub fn is_local(&self) -> bool {
        self.endpoint_url.is_none()
    }

    /// Endpoint reduced to scheme and host, for logs and error output.
    pub fn endpoint_origin(&self) -> Option<String> {
        self.endpoint_url.as_deref().map(ConfigUtils::redact_url)
    }

    /// Fetch the key material for every signing credential, in order.
    pub fn signer_secrets<S>(&self, source: &S) -> ConfigResult<Vec<SecretValue>>
    where
        S: SecretSource + ?Sized,
    {
        self.signing_credentials
            .iter()
            .enumerate()
            .map(|(index, reference)| {
                source
                    .fetch(reference)
                    .map_err(|source| ConfigError::SecretUnavailable {
                        network: self.name.clone(),
                        index,
                        source,
                    })
            })
            .collect()
    }
}

impl fmt::Debug for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkProfile")
            .field("name", &self.name)
            .field("endpoint_url", &self.endpoint_origin())
            .field("signing_credentials", &self.signing_credentials)
            .field("gas_price_wei", &self.gas_price_wei)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

//! Well-known networks and ready-made profiles

use serde::{Deserialize, Serialize};

use crate::config::NetworkProfile;
use crate::secrets::SecretRef;

/// Chain id of the in-process development network and a local dev node.
pub const DEV_CHAIN_ID: u64 = 31337;

/// Networks whose chain id is fixed, so a profile with the same name that
/// declares another id is a copy-paste mistake between environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnownNetwork {
    Hardhat,
    Localhost,
    Sepolia,
    Holesky,
    Mainnet,
}

impl KnownNetwork {
    /// Exact, case-sensitive match on a profile name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hardhat" => Some(KnownNetwork::Hardhat),
            "localhost" => Some(KnownNetwork::Localhost),
            "sepolia" => Some(KnownNetwork::Sepolia),
            "holesky" => Some(KnownNetwork::Holesky),
            "mainnet" => Some(KnownNetwork::Mainnet),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KnownNetwork::Hardhat => "hardhat",
            KnownNetwork::Localhost => "localhost",
            KnownNetwork::Sepolia => "sepolia",
            KnownNetwork::Holesky => "holesky",
            KnownNetwork::Mainnet => "mainnet",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            KnownNetwork::Hardhat | KnownNetwork::Localhost => DEV_CHAIN_ID,
            KnownNetwork::Sepolia => 11_155_111,
            KnownNetwork::Holesky => 17_000,
            KnownNetwork::Mainnet => 1,
        }
    }
}

impl std::str::FromStr for KnownNetwork {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hardhat" => Ok(KnownNetwork::Hardhat),
            "localhost" | "local" => Ok(KnownNetwork::Localhost),
            "sepolia" => Ok(KnownNetwork::Sepolia),
            "holesky" => Ok(KnownNetwork::Holesky),
            "mainnet" | "main" => Ok(KnownNetwork::Mainnet),
            _ => Err(crate::error::ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

/// In-process simulation network.
pub fn hardhat() -> NetworkProfile {
    NetworkProfile::local(KnownNetwork::Hardhat.name()).with_chain_id(DEV_CHAIN_ID)
}

/// Development node listening on the default local RPC port.
pub fn localhost(signing_credentials: Vec<SecretRef>) -> NetworkProfile {
    NetworkProfile::remote(
        KnownNetwork::Localhost.name(),
        "http://127.0.0.1:8545",
        signing_credentials,
    )
    .with_chain_id(DEV_CHAIN_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_sensitive() {
        assert_eq!(KnownNetwork::from_name("sepolia"), Some(KnownNetwork::Sepolia));
        assert_eq!(KnownNetwork::from_name("Sepolia"), None);
        assert_eq!(KnownNetwork::from_name("goerli"), None);
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("MAIN".parse::<KnownNetwork>().unwrap(), KnownNetwork::Mainnet);
        assert_eq!("local".parse::<KnownNetwork>().unwrap(), KnownNetwork::Localhost);
        assert!("polygon".parse::<KnownNetwork>().is_err());
    }

    #[test]
    fn test_presets() {
        let hardhat = hardhat();
        assert!(hardhat.is_local());
        assert_eq!(hardhat.chain_id(), Some(DEV_CHAIN_ID));

        let localhost = localhost(vec![SecretRef::env("DEV_KEY")]);
        assert_eq!(localhost.endpoint_url(), Some("http://127.0.0.1:8545"));
        assert_eq!(localhost.signing_credentials().len(), 1);
    }
}

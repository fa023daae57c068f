//! Network profile resolution for contract compile and deploy tooling.
//!
//! A project declares a compiler version and a set of named networks. Each
//! network carries an optional RPC endpoint, references to its signing
//! credentials and an optional fixed gas price. This crate loads that
//! declaration, validates it once at startup and then hands out immutable
//! [`NetworkProfile`]s by name.
//!
//! ```no_run
//! use netprofile_config::{NetworkProfileResolver, SystemSecretSource};
//!
//! # fn main() -> Result<(), netprofile_config::ConfigError> {
//! let config = NetworkProfileResolver::with_env_overrides().load_validated("netprofile.toml")?;
//! let sepolia = config.resolve("sepolia")?;
//! let keys = sepolia.signer_secrets(&SystemSecretSource::new())?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod networks;
pub mod secrets;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use loader::*;
pub use secrets::{
    SecretError, SecretRef, SecretSource, SecretValue, StaticSecretSource, SystemSecretSource,
};
pub use utils::ConfigUtils;

// Re-export main types
pub use error::{ConfigError, ConfigResult, ProfileViolation};

pub use networks::KnownNetwork;

use std::fmt;
use thiserror::Error;

use crate::secrets::SecretError;

/// The invariant a single network profile violated.
///
/// Messages name the offending field but never its value: endpoint URLs
/// routinely carry API keys and credentials are secret references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileViolation {
    EmptyName,
    WhitespaceInName,
    MissingCredentials,
    MalformedUrl,
    MissingUrlHost,
    UnsupportedUrlScheme(String),
    GasPriceOutOfRange { max: u64 },
    ZeroChainId,
    ChainIdMismatch { expected: u64, found: u64 },
    LiteralSecret { index: usize },
    InvalidSecretReference { index: usize },
}

impl fmt::Display for ProfileViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileViolation::EmptyName => write!(f, "network name cannot be empty"),
            ProfileViolation::WhitespaceInName => {
                write!(f, "network name cannot contain whitespace")
            }
            ProfileViolation::MissingCredentials => write!(f, "missing credentials"),
            ProfileViolation::MalformedUrl => write!(f, "malformed endpointUrl"),
            ProfileViolation::MissingUrlHost => write!(f, "endpointUrl has no host"),
            ProfileViolation::UnsupportedUrlScheme(scheme) => {
                write!(f, "unsupported endpointUrl scheme '{}'", scheme)
            }
            ProfileViolation::GasPriceOutOfRange { max } => {
                write!(f, "gasPriceWei exceeds ceiling of {} wei", max)
            }
            ProfileViolation::ZeroChainId => write!(f, "chainId must be greater than 0"),
            ProfileViolation::ChainIdMismatch { expected, found } => write!(
                f,
                "chainId {} does not match the well-known chain id {}",
                found, expected
            ),
            ProfileViolation::LiteralSecret { index } => write!(
                f,
                "literal secret material in signingCredentials[{}]",
                index
            ),
            ProfileViolation::InvalidSecretReference { index } => write!(
                f,
                "invalid secret reference in signingCredentials[{}]",
                index
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Malformed config: {0}")]
    MalformedConfig(String),

    #[error("Duplicate network: {0}")]
    DuplicateNetwork(String),

    #[error("Invalid profile for network '{network}': {reason}")]
    InvalidProfile {
        network: String,
        reason: ProfileViolation,
    },

    #[error("Invalid compiler version: {0}")]
    InvalidCompilerVersion(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("No default network configured")]
    NoDefaultNetwork,

    #[error("Precondition violated: {0}")]
    PreconditionViolated(&'static str),

    #[error("Environment error: {0}")]
    EnvironmentError(String),

    #[error("Secret unavailable for network '{network}' signingCredentials[{index}]: {source}")]
    SecretUnavailable {
        network: String,
        index: usize,
        #[source]
        source: SecretError,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub fn invalid_profile(network: impl Into<String>, reason: ProfileViolation) -> Self {
        ConfigError::InvalidProfile {
            network: network.into(),
            reason,
        }
    }

    /// Whether the error must abort startup.
    ///
    /// Lookup misses are left to the caller, who may ask for another name.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ConfigError::UnknownNetwork(_) | ConfigError::NoDefaultNetwork
        )
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::MalformedConfig(scrub_quoted(&err.to_string()))
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The Display impl quotes the offending source line, so only the
        // message and the byte span are kept.
        let message = scrub_quoted(err.message());
        let message = match err.span() {
            Some(span) => format!("{} (bytes {}..{})", message, span.start, span.end),
            None => message,
        };
        ConfigError::MalformedConfig(message)
    }
}

/// Replace every double-quoted segment of a parser message.
///
/// serde reports type mismatches as `invalid type: string "..."`, which would
/// echo a secret pasted into the wrong field.
pub(crate) fn scrub_quoted(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut in_quotes = false;
    for ch in message.chars() {
        if ch == '"' {
            if in_quotes {
                out.push_str("<redacted>\"");
            } else {
                out.push('"');
            }
            in_quotes = !in_quotes;
        } else if !in_quotes {
            out.push(ch);
        }
    }
    if in_quotes {
        out.push_str("<redacted>");
    }
    out
}

//! Secret references and the sources that turn them into values.
//!
//! A config only ever holds [`SecretRef`]s. Actual key material is fetched on
//! demand through a [`SecretSource`] and handed out as a [`SecretValue`], which
//! refuses to print itself.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::constants::{MIN_KEY_HEX_DIGITS, REDACTED};
use crate::utils::ConfigUtils;
use crate::ConfigError;

/// Where a signing credential lives.
///
/// In a source file a bare string is shorthand for `{ "env": "NAME" }`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SecretRefRepr", into = "SecretRefRepr")]
pub enum SecretRef {
    /// Name of an environment variable holding the secret
    Env(String),
    /// Path of a file holding the secret
    File(PathBuf),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SecretRefRepr {
    Bare(String),
    Env(EnvRepr),
    File(FileRepr),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnvRepr {
    env: String,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileRepr {
    file: PathBuf,
}

impl From<SecretRefRepr> for SecretRef {
    fn from(repr: SecretRefRepr) -> Self {
        match repr {
            SecretRefRepr::Bare(name) => SecretRef::Env(name),
            SecretRefRepr::Env(EnvRepr { env }) => SecretRef::Env(env),
            SecretRefRepr::File(FileRepr { file }) => SecretRef::File(file),
        }
    }
}

impl From<SecretRef> for SecretRefRepr {
    fn from(reference: SecretRef) -> Self {
        match reference {
            SecretRef::Env(env) => SecretRefRepr::Env(EnvRepr { env }),
            SecretRef::File(file) => SecretRefRepr::File(FileRepr { file }),
        }
    }
}

/// Problem with the shape of a reference, found during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceProblem {
    /// The reference looks like the key itself rather than a pointer to it
    LiteralSecret,
    /// Not a usable variable name or path
    Invalid,
}

impl SecretRef {
    pub fn env(name: impl Into<String>) -> Self {
        SecretRef::Env(name.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        SecretRef::File(path.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SecretRef::Env(_) => "env",
            SecretRef::File(_) => "file",
        }
    }

    /// Check that the reference is a reference.
    pub fn check(&self) -> Result<(), ReferenceProblem> {
        match self {
            SecretRef::Env(name) => {
                if looks_like_key_material(name) {
                    return Err(ReferenceProblem::LiteralSecret);
                }
                if !is_env_var_name(name) {
                    return Err(ReferenceProblem::Invalid);
                }
                Ok(())
            }
            SecretRef::File(path) => {
                if path.as_os_str().is_empty() {
                    return Err(ReferenceProblem::Invalid);
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretRef::Env(name) => write!(f, "env:{}", printable_env_name(name)),
            SecretRef::File(path) => write!(f, "file:{}", path.display()),
        }
    }
}

impl fmt::Debug for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretRef::Env(name) => f.debug_tuple("Env").field(&printable_env_name(name)).finish(),
            SecretRef::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

/// Any long run of hex digits, `0x`-prefixed or not.
fn looks_like_key_material(value: &str) -> bool {
    let mut run = 0;
    for c in value.chars() {
        if c.is_ascii_hexdigit() {
            run += 1;
            if run >= MIN_KEY_HEX_DIGITS {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Env name as it may appear in messages and logs.
fn printable_env_name(name: &str) -> &str {
    if looks_like_key_material(name) {
        REDACTED
    } else {
        name
    }
}

fn is_env_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Fetched secret material.
///
/// Not `Serialize`; `Debug` and `Display` print a placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(String);

impl SecretValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// First 8 hex digits of the SHA-256 digest, for telling keys apart in logs.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(&digest[..4])
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretValue({})", REDACTED)
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[derive(Error, Debug)]
pub enum SecretError {
    #[error("environment variable {0} is not set")]
    MissingEnv(String),

    #[error("failed to read secret file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("secret file {0} is readable by other users")]
    InsecurePermissions(PathBuf),

    #[error("secret behind {0} is empty")]
    Empty(String),

    #[error("no secret registered for {0}")]
    NotFound(String),
}

/// Resolves secret references into values.
///
/// This is the only way key material enters the process.
pub trait SecretSource {
    fn fetch(&self, reference: &SecretRef) -> Result<SecretValue, SecretError>;
}

/// Reads secrets from the process environment and from key files.
#[derive(Debug, Clone)]
pub struct SystemSecretSource {
    use_dotenv: bool,
}

impl SystemSecretSource {
    /// Source that also consults a `.env` file in the working directory tree.
    pub fn new() -> Self {
        Self { use_dotenv: true }
    }

    /// Source that only looks at variables already in the environment.
    pub fn without_dotenv() -> Self {
        Self { use_dotenv: false }
    }

    fn read_env(&self, name: &str) -> Result<SecretValue, SecretError> {
        let value = if self.use_dotenv {
            dotenv::var(name).ok()
        } else {
            std::env::var(name).ok()
        };
        let value =
            value.ok_or_else(|| SecretError::MissingEnv(printable_env_name(name).to_string()))?;
        if value.trim().is_empty() {
            return Err(SecretError::Empty(format!("env:{}", printable_env_name(name))));
        }
        Ok(SecretValue::new(value.trim()))
    }

    fn read_file(&self, path: &Path) -> Result<SecretValue, SecretError> {
        match ConfigUtils::validate_file_permissions(path) {
            Ok(()) => {}
            Err(ConfigError::Io(source)) => {
                return Err(SecretError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
            Err(_) => return Err(SecretError::InsecurePermissions(path.to_path_buf())),
        }
        let content = std::fs::read_to_string(path).map_err(|source| SecretError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value = content.trim();
        if value.is_empty() {
            return Err(SecretError::Empty(format!("file:{}", path.display())));
        }
        Ok(SecretValue::new(value))
    }
}

impl Default for SystemSecretSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretSource for SystemSecretSource {
    fn fetch(&self, reference: &SecretRef) -> Result<SecretValue, SecretError> {
        let value = match reference {
            SecretRef::Env(name) => self.read_env(name)?,
            SecretRef::File(path) => self.read_file(path)?,
        };
        debug!(
            reference = %reference,
            fingerprint = %value.fingerprint(),
            "Fetched signing credential"
        );
        Ok(value)
    }
}

/// In-memory secrets, keyed by reference.
#[derive(Debug, Clone, Default)]
pub struct StaticSecretSource {
    values: HashMap<SecretRef, SecretValue>,
}

impl StaticSecretSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: SecretRef, value: impl Into<String>) {
        self.values.insert(reference, SecretValue::new(value));
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(SecretRef::Env(name.into()), value);
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, value: impl Into<String>) -> Self {
        self.insert(SecretRef::File(path.into()), value);
        self
    }
}

impl SecretSource for StaticSecretSource {
    fn fetch(&self, reference: &SecretRef) -> Result<SecretValue, SecretError> {
        self.values
            .get(reference)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(reference.to_string()))
    }
}

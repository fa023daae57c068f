//! Crate-wide constants

/// File names searched for by [`crate::ConfigUtils::find_nearest`], in order.
pub const DEFAULT_FILE_NAMES: &[&str] = &["netprofile.toml", "netprofile.json"];

/// Prefix of every environment override variable.
pub const ENV_PREFIX: &str = "NETPROFILE";

/// One gwei in wei.
pub const GWEI: u64 = 1_000_000_000;

/// Upper bound on `gasPriceWei`.
///
/// Anything above 10 000 gwei is almost certainly a unit mistake
/// (a gwei amount multiplied by 1e9 twice, or an ether amount in wei).
pub const MAX_GAS_PRICE_WEI: u64 = 10_000 * GWEI;

/// URL schemes an RPC endpoint may use.
pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "ws", "wss"];

/// Placeholder printed wherever secret material would otherwise appear.
pub const REDACTED: &str = "[REDACTED]";

/// Shortest run of hex digits treated as pasted key material.
///
/// Covers 32-byte private keys, including ones that lost leading zeros, and
/// 20-byte addresses.
pub const MIN_KEY_HEX_DIGITS: usize = 40;

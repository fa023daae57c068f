//! Network profile model
pub mod profile;
pub mod resolver;

pub use profile::NetworkProfile;
pub use resolver::{ConfigState, ResolverConfig};

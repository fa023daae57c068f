use netprofile_config::{NetworkProfileResolver, StaticSecretSource, SystemSecretSource};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,netprofile_config=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("Network Profile Resolution Example");
    println!("==================================\n");

    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("netprofile.toml");

    // 1. Load and validate once, before touching any network
    let config = NetworkProfileResolver::with_env_overrides().load_validated(&path)?;
    println!(
        "1. Loaded {} networks, compiler {}",
        config.len(),
        config.compiler_version().unwrap_or("<unset>")
    );

    // 2. Resolve profiles by name
    println!("\n2. Profiles:");
    for name in config.network_names() {
        let profile = config.resolve(name)?;
        println!(
            "   {:<10} endpoint={:<32} credentials={} gas_price_wei={:?}",
            profile.name(),
            profile.endpoint_origin().unwrap_or_else(|| "<in-process>".to_string()),
            profile.signing_credentials().len(),
            profile.gas_price_wei()
        );
    }

    // 3. Unknown names are recoverable
    println!("\n3. Unknown network:");
    match config.resolve("mainnet") {
        Ok(_) => println!("   unexpectedly found mainnet"),
        Err(e) if !e.is_fatal() => {
            println!("   {} (known: {})", e, config.network_names().join(", "))
        }
        Err(e) => return Err(e.into()),
    }

    // 4. Fetch signing keys only when a deploy needs them
    println!("\n4. Signing credentials for sepolia:");
    let sepolia = config.resolve("sepolia")?;
    let secrets = match sepolia.signer_secrets(&SystemSecretSource::new()) {
        Ok(secrets) => secrets,
        Err(e) => {
            warn!("{}; falling back to a demo key", e);
            let demo = StaticSecretSource::new().with_env("SEPOLIA_DEPLOYER_KEY", "demo-only");
            sepolia.signer_secrets(&demo)?
        }
    };
    for secret in &secrets {
        info!(fingerprint = %secret.fingerprint(), "Signer ready");
        println!("   key {} (fingerprint {})", secret, secret.fingerprint());
    }

    Ok(())
}

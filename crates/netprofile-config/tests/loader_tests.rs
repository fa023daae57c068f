use netprofile_config::{
    ConfigError, FileLoader, NetworkProfileResolver, SecretRef, SourceFormat,
};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// Both bundled fixtures describe the same networks
#[test]
fn test_fixtures_agree() {
    let resolver = NetworkProfileResolver::new();
    let from_json = resolver
        .load_validated(fixture("netprofile.json"))
        .unwrap();
    let from_toml = resolver
        .load_validated(fixture("netprofile.toml"))
        .unwrap();

    assert_eq!(from_json.network_names(), from_toml.network_names());
    assert_eq!(from_json.compiler_version(), Some("0.8.28"));
    assert_eq!(from_toml.default_network(), Some("hardhat"));

    for name in from_json.network_names() {
        assert_eq!(
            from_json.resolve(name).unwrap(),
            from_toml.resolve(name).unwrap()
        );
    }

    let sepolia = from_toml.resolve("sepolia").unwrap();
    assert_eq!(sepolia.gas_price_wei(), Some(30_000_000_000));
    assert_eq!(sepolia.chain_id(), Some(11_155_111));
    assert_eq!(
        sepolia.signing_credentials(),
        &[SecretRef::env("SEPOLIA_DEPLOYER_KEY")]
    );
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = NetworkProfileResolver::new()
        .load_file(dir.path().join("absent.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("netprofile.yaml");
    fs::write(&path, "networks: {}").unwrap();

    let err = FileLoader::load_auto(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidFormat(_)));
}

#[test]
fn test_extensionless_file_falls_back_to_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("netprofile");
    fs::write(&path, r#"{"networks": {"hardhat": {}}}"#).unwrap();

    let config = FileLoader::load_auto(&path).unwrap();
    assert_eq!(config.network_names(), vec!["hardhat"]);

    fs::write(&path, "[networks.hardhat]\n").unwrap();
    let config = FileLoader::load_auto(&path).unwrap();
    assert_eq!(config.network_names(), vec!["hardhat"]);
}

#[test]
fn test_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("netprofile.json");
    fs::write(&path, r#"{"networks": ["#).unwrap();

    let err = FileLoader::load_auto(&path).unwrap_err();
    assert!(matches!(err, ConfigError::MalformedConfig(_)));
    assert!(err.is_fatal());
}

/// Duplicate table keys are a TOML syntax error
#[test]
fn test_duplicate_toml_tables_are_malformed() {
    let source = "[networks.hardhat]\n\n[networks.hardhat]\nchainId = 31337\n";
    let err = NetworkProfileResolver::load_str(source, SourceFormat::Toml).unwrap_err();
    assert!(matches!(err, ConfigError::MalformedConfig(_)));
}

#[test]
fn test_unknown_top_level_key() {
    let err = NetworkProfileResolver::load_str(
        r#"{"solidity": "0.8.28", "networks": {}}"#,
        SourceFormat::Json,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::MalformedConfig(_)));
}

/// Negative gas prices cannot be represented and fail to parse
#[test]
fn test_negative_gas_price() {
    let err = NetworkProfileResolver::load_str(
        r#"{"networks": {"hardhat": {"gasPriceWei": -1}}}"#,
        SourceFormat::Json,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::MalformedConfig(_)));
}

/// Saved files load back to the same profiles
#[test]
fn test_save_and_reload() {
    let dir = tempdir().unwrap();
    let original = FileLoader::load_json(fixture("netprofile.json")).unwrap();

    let json_path = dir.path().join("out.json");
    let toml_path = dir.path().join("out.toml");
    FileLoader::save_json(&original, &json_path).unwrap();
    FileLoader::save_toml(&original, &toml_path).unwrap();

    for path in [json_path, toml_path] {
        let reloaded = FileLoader::load_auto(&path).unwrap().validate().unwrap();
        assert_eq!(reloaded.compiler_version(), original.compiler_version());
        assert_eq!(reloaded.default_network(), original.default_network());
        for profile in original.profiles() {
            assert_eq!(reloaded.resolve(profile.name()).unwrap(), profile);
        }
    }
}

#[test]
fn test_load_nearest() {
    let root = tempdir().unwrap();
    let nested = root.path().join("scripts").join("deploy");
    fs::create_dir_all(&nested).unwrap();
    fs::copy(fixture("netprofile.toml"), root.path().join("netprofile.toml")).unwrap();

    let config = NetworkProfileResolver::new()
        .load_nearest(&nested)
        .unwrap()
        .validate()
        .unwrap();
    assert!(config.resolve("sepolia").is_ok());
}

#[test]
fn test_env_overrides_applied_on_request() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("netprofile.json");
    fs::write(
        &path,
        r#"{"networks": {"loader-env-net": {
            "endpointUrl": "https://a.example.org",
            "signingCredentials": ["LOADER_ENV_KEY"]
        }}}"#,
    )
    .unwrap();
    std::env::set_var(
        "NETPROFILE_LOADER_ENV_NET_ENDPOINT_URL",
        "https://b.example.org",
    );

    let plain = NetworkProfileResolver::new()
        .load_validated(&path)
        .unwrap();
    assert_eq!(
        plain.resolve("loader-env-net").unwrap().endpoint_url(),
        Some("https://a.example.org")
    );

    let overridden = NetworkProfileResolver::with_env_overrides()
        .load_validated(&path)
        .unwrap();
    assert_eq!(
        overridden.resolve("loader-env-net").unwrap().endpoint_url(),
        Some("https://b.example.org")
    );
}

#[tokio::test]
async fn test_async_load() {
    let config = NetworkProfileResolver::new()
        .load_file_async(fixture("netprofile.json"))
        .await
        .unwrap()
        .validate()
        .unwrap();
    assert_eq!(config.resolve_default().unwrap().name(), "hardhat");
}

#[tokio::test]
async fn test_async_missing_file() {
    let err = FileLoader::load_auto_async("/definitely/not/here.toml")
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

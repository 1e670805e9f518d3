use jsonbind_core::config::RegistryConfig;
use jsonbind_core::{ConvertError, OverlapPolicy, RegistryBuilder, TypeDescriptor, Value};
use serde_json::json;

fn write_config(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("jsonbind.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_builder_from_default_config() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_config(&dir, "[registry]\n");
    let config = RegistryConfig::load(&path)?;
    assert_eq!(config.registry.overlap, OverlapPolicy::FirstMatch);

    let registry = RegistryBuilder::from_config(&config).seal();
    assert_eq!(registry.deserialize(&json!("x"), &TypeDescriptor::string())?, Value::string("x"));
    Ok(())
}

#[test]
fn test_builder_without_builtins() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_config(&dir, "[registry]\nbuiltins = false\noverlap = \"reject\"\n");
    let config = RegistryConfig::load(&path)?;

    let registry = RegistryBuilder::from_config(&config).seal();
    let err = registry.deserialize(&json!("x"), &TypeDescriptor::string()).unwrap_err();
    assert!(matches!(err, ConvertError::NoConverterFound(_)));
    Ok(())
}

#[test]
fn test_malformed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[registry\n");
    assert!(matches!(RegistryConfig::load(&path), Err(ConvertError::Toml(_))));
}

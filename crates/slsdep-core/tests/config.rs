use slsdep_core::config::ProjectConfig;
use slsdep_core::product::ProductId;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"
[product]
group = "com.example"
name = "my-service"
version = "1.4.0"

[[product-dependencies]]
group = "com.foo"
name = "bar"
minimum-version = "1.2.0"

[[product-dependencies]]
group = "com.foo"
name = "db"
minimum-version = "2.0.0"
maximum-version = "2.3.x"
recommended-version = "2.1.0"
optional = true

[policy]
ignored = ["com.foo:noise"]
optional = ["com.foo:extra"]

[workspace]
products = ["com.example:sibling"]

[discovery]
descriptors = ["deps/foo.json"]
"#;

#[test]
fn parses_full_config() {
    let config = ProjectConfig::parse(CONFIG).unwrap();
    assert_eq!(config.product_id(), ProductId::new("com.example", "my-service"));
    assert_eq!(config.project_version().unwrap().to_string(), "1.4.0");

    let declared = config.declared_dependencies().unwrap();
    assert_eq!(declared.len(), 2);
    assert_eq!(declared[0].maximum().to_string(), "1.x.x");
    assert_eq!(declared[1].maximum().to_string(), "2.3.x");
    assert!(declared[1].is_optional());

    assert!(config.ignored().unwrap().contains(&ProductId::new("com.foo", "noise")));
    assert!(config.optional().unwrap().contains(&ProductId::new("com.foo", "extra")));
    assert!(config
        .workspace_products()
        .unwrap()
        .contains(&ProductId::new("com.example", "sibling")));
    assert_eq!(
        config.descriptor_paths(Path::new("/proj")),
        vec![Path::new("/proj/deps/foo.json").to_path_buf()]
    );
}

#[test]
fn minimal_config_defaults_sections() {
    let config = ProjectConfig::parse(
        "[product]\ngroup = \"g\"\nname = \"n\"\nversion = \"0.1.0\"\n",
    )
    .unwrap();
    assert!(config.product_dependencies.is_empty());
    assert!(config.ignored().unwrap().is_empty());
    assert!(config.discovery.descriptors.is_empty());
}

#[test]
fn bad_policy_id_is_rejected() {
    let config = ProjectConfig::parse(
        "[product]\ngroup = \"g\"\nname = \"n\"\nversion = \"0.1.0\"\n[policy]\nignored = [\"nocolon\"]\n",
    )
    .unwrap();
    assert!(config.ignored().is_err());
}

#[test]
fn from_path_missing_file_is_config_error() {
    let tmp = TempDir::new().unwrap();
    let err = ProjectConfig::from_path(&tmp.path().join("product.toml")).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"), "got: {err}");
}

#[test]
fn from_path_reads_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("product.toml");
    fs::write(&path, CONFIG).unwrap();
    let config = ProjectConfig::from_path(&path).unwrap();
    assert_eq!(config.product.name, "my-service");
}

use anyhow::Result;
use pricing_codec::config::TomlConfig;
use pricing_codec::domain::ports::Storage;
use pricing_codec::utils::validation::Validate;
use pricing_codec::{LocalStorage, PathStyle, PriceFieldCodec};
use serde_json::json;
use tempfile::TempDir;

const EUR: &str = "0fa91ce3e96a4bc2be4bd9ce752c3425";

/// 以 TOML 設定建立 codec，透過 LocalStorage 寫入後再讀回
#[test]
fn test_configured_codec_with_local_storage() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap().to_string();

    let config_content = format!(
        r#"
[codec]
default_currency = "{}"
field_path = "product.price"
path_style = "dotted"
key_prefix = "c"
"#,
        EUR
    );
    std::fs::write(temp_dir.path().join("codec.toml"), config_content)?;

    let config = TomlConfig::from_file(temp_dir.path().join("codec.toml"))?;
    config.validate()?;
    assert_eq!(config.codec.path_style, PathStyle::Dotted);

    let codec = PriceFieldCodec::new(config.codec);
    let storage = LocalStorage::new(temp_path);

    let stored = codec
        .encode(&json!({ EUR: {"net": "10", "gross": "11.9", "currencyId": EUR, "linked": true} }))?
        .expect("non-null payload");
    storage.write_file("columns/price.json", stored.as_bytes())?;

    let read_back = String::from_utf8(storage.read_file("columns/price.json")?)?;
    let decoded = codec.decode(&read_back)?.expect("stored prices");
    assert_eq!(decoded.get(EUR).unwrap().gross, 11.9);
    Ok(())
}

#[test]
fn test_dotted_violation_paths() -> Result<()> {
    let config = TomlConfig::from_toml_str(&format!(
        "[codec]\ndefault_currency = \"{}\"\nfield_path = \"product.price\"\npath_style = \"dotted\"\n",
        EUR
    ))?;
    let codec = PriceFieldCodec::new(config.codec);

    let err = codec
        .encode(&json!([{"net": 1, "currencyId": EUR, "linked": true}]))
        .unwrap_err();
    let paths: Vec<String> = err
        .violations()
        .unwrap()
        .iter()
        .map(|v| v.property_path.clone())
        .collect();

    assert_eq!(paths, vec!["product.price.0.gross", "product.price"]);
    Ok(())
}

#[test]
fn test_allow_null_clears_field() -> Result<()> {
    let config = TomlConfig::from_toml_str("[codec]\nallow_null = true\n")?;
    let codec = PriceFieldCodec::new(config.codec);

    assert!(codec.encode(&serde_json::Value::Null)?.is_none());
    Ok(())
}

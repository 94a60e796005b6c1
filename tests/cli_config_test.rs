use anyhow::Result;
use clap::Parser;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};
use where_next::utils::validation::Validate;
use where_next::{CliConfig, CountryCatalog, SuggestError, TomlConfig};

fn temp_file_with_suffix(suffix: &str, content: &str) -> Result<NamedTempFile> {
    let mut file = Builder::new().suffix(suffix).tempfile()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

/// 設定檔提供基本值，命令列旗標逐項覆寫
#[test]
fn test_cli_flags_override_config_file() -> Result<()> {
    let file = temp_file_with_suffix(
        ".toml",
        r#"
[service]
endpoint = "https://file.example.com/suggestions"
api_key = "file-key"
timeout_seconds = 20
max_suggestions = 3
"#,
    )?;

    let file_config = TomlConfig::from_file(file.path())?;
    let args = CliConfig::try_parse_from([
        "where-next",
        "--max-suggestions",
        "8",
        "--countries-file",
        "./override.csv",
    ])?;

    let effective = args.resolve(Some(&file_config));

    assert_eq!(effective.endpoint, "https://file.example.com/suggestions");
    assert_eq!(effective.api_key.as_deref(), Some("file-key"));
    assert_eq!(effective.timeout_seconds, 20);
    assert_eq!(effective.max_suggestions, 8);
    assert_eq!(effective.countries_file.as_deref(), Some("./override.csv"));
    assert!(effective.validate().is_ok());

    Ok(())
}

/// 設定檔中的 ${VAR} 由環境變數帶入
#[test]
fn test_env_substitution_through_config_file() -> Result<()> {
    std::env::set_var("WHERE_NEXT_TEST_API_KEY", "from-env-123");

    let file = temp_file_with_suffix(
        ".toml",
        r#"
[service]
endpoint = "https://api.example.com/suggestions"
api_key = "${WHERE_NEXT_TEST_API_KEY}"
"#,
    )?;

    let config = TomlConfig::from_file(file.path())?;

    assert_eq!(config.api_key(), Some("from-env-123"));
    assert!(config.validate().is_ok());

    std::env::remove_var("WHERE_NEXT_TEST_API_KEY");
    Ok(())
}

/// 忘了設定環境變數：驗證時擋下，而不是把字面值往外送
#[test]
fn test_unresolved_env_var_is_rejected() -> Result<()> {
    let file = temp_file_with_suffix(
        ".toml",
        r#"
[service]
endpoint = "https://api.example.com/suggestions"
api_key = "${WHERE_NEXT_UNSET_KEY_993}"
"#,
    )?;

    let config = TomlConfig::from_file(file.path())?;

    let result = config.validate();
    assert!(matches!(
        result,
        Err(SuggestError::MissingConfigError { .. })
    ));

    Ok(())
}

/// 設定檔指定 CSV 國家表，解析後能實際載入
#[test]
fn test_countries_file_from_config_loads() -> Result<()> {
    let table = temp_file_with_suffix(
        ".csv",
        "code,name,emoji,reference_url\nNZ,New Zealand,🇳🇿,https://en.wikipedia.org/wiki/New_Zealand\nFJ,Fiji,🇫🇯,https://en.wikipedia.org/wiki/Fiji\n",
    )?;
    let table_path = table.path().to_str().unwrap().replace('\\', "/");

    let toml_content = format!(
        r#"
[service]
endpoint = "https://api.example.com/suggestions"

[catalog]
countries_file = "{}"
"#,
        table_path
    );
    let file = temp_file_with_suffix(".toml", &toml_content)?;

    let file_config = TomlConfig::from_file(file.path())?;
    let args = CliConfig::try_parse_from(["where-next"])?;
    let effective = args.resolve(Some(&file_config));

    assert!(effective.validate().is_ok());
    let catalog = CountryCatalog::from_file(effective.countries_file.as_deref().unwrap())?;
    assert_eq!(catalog.len(), 2);

    Ok(())
}

/// 命令列給了壞端點：合併後的設定驗證失敗
#[test]
fn test_invalid_endpoint_fails_effective_validation() -> Result<()> {
    let args = CliConfig::try_parse_from(["where-next", "--endpoint", "not-a-url"])?;

    let effective = args.resolve(None);

    let result = effective.validate();
    assert!(matches!(
        result,
        Err(SuggestError::InvalidConfigValueError { .. })
    ));

    Ok(())
}

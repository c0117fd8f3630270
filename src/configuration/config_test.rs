use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_returns_defaults() {
    assert_eq!(Config::default(ConfigKey::AgentUrl), "http://localhost:8000");
    assert_eq!(Config::default(ConfigKey::AuthSecret), "dev-secret-key");
    assert_eq!(Config::default(ConfigKey::RequestTimeout), "30000");
    assert_eq!(Config::default(ConfigKey::HealthCheckTimeout), "1000");
}

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["exa-chat", "-c", "./config.example.toml"])?;
    Config::load(vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::AgentUrl), "http://localhost:8000");
    assert_eq!(Config::get(ConfigKey::AuthSecret), "dev-secret-key");

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_load_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["exa-chat", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::Arg;
use clap::Command;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn arg_agent_url() -> Arg {
    return Arg::new(ConfigKey::AgentUrl.to_string())
        .short('u')
        .long(ConfigKey::AgentUrl.to_string())
        .env("EXA_CHAT_AGENT_URL")
        .num_args(1)
        .help(format!(
            "The base URL of the agent service. [default: {}]",
            Config::default(ConfigKey::AgentUrl)
        ));
}

fn arg_auth_secret() -> Arg {
    return Arg::new(ConfigKey::AuthSecret.to_string())
        .short('s')
        .long(ConfigKey::AuthSecret.to_string())
        .env("EXA_CHAT_AUTH_SECRET")
        .num_args(1)
        .help("The shared secret sent with every request to authenticate with the agent.");
}

fn arg_request_timeout() -> Arg {
    return Arg::new(ConfigKey::RequestTimeout.to_string())
        .long(ConfigKey::RequestTimeout.to_string())
        .env("EXA_CHAT_REQUEST_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out an agent request. [default: {}]",
            Config::default(ConfigKey::RequestTimeout)
        ));
}

fn arg_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::HealthCheckTimeout.to_string())
        .long(ConfigKey::HealthCheckTimeout.to_string())
        .env("EXA_CHAT_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out the agent health check. [default: {}]",
            Config::default(ConfigKey::HealthCheckTimeout)
        ));
}

fn arg_username() -> Arg {
    return Arg::new(ConfigKey::Username.to_string())
        .long(ConfigKey::Username.to_string())
        .env("EXA_CHAT_USERNAME")
        .num_args(1)
        .help("Your user name displayed in the chat prompt.");
}

fn arg_config_file() -> Arg {
    return Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("EXA_CHAT_CONFIG_FILE")
        .num_args(1)
        .help(format!(
            "Path to configuration file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ))
        .global(true);
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION")
    );

    return Command::new("exa-chat")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(ui::help_text())
        .arg_required_else_help(false)
        .subcommand(subcommand_config())
        .arg(arg_agent_url())
        .arg(arg_auth_secret())
        .arg(arg_request_timeout())
        .arg(arg_health_check_timeout())
        .arg(arg_username())
        .arg(arg_config_file());
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("config", config_matches)) => {
            match config_matches.subcommand() {
                Some(("create", _)) => {
                    create_config_file().await?;
                }
                Some(("default", _)) => {
                    println!("{}", Config::serialize_default(build()));
                }
                Some(("path", _)) => {
                    println!("{}", Config::default(ConfigKey::ConfigFile));
                }
                _ => {}
            }

            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}

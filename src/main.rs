#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use owo_colors::OwoColorize;

use crate::application::cli;
use crate::application::ui;
use crate::domain::models::AgentBox;
use crate::infrastructure::agents::exa::Exa;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        format!(
            "Oh no! Exa Chat has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        )
        .red()
    );

    process::exit(1);
}

#[tokio::main]
async fn main() {
    better_panic::install();

    let debug_log_dir = env::var("EXA_CHAT_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap()
            .join("exa-chat")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("exa_chat")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let ready_res = cli::parse().await;
    if let Err(ready_err) = ready_res {
        handle_error(ready_err);
        return;
    }
    if !ready_res.unwrap() {
        process::exit(0);
    }

    let agent: AgentBox = Box::<Exa>::default();
    if let Err(err) = ui::start(agent).await {
        handle_error(err);
    }

    process::exit(0);
}

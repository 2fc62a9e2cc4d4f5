//! A terminal client for the sketch relay party game.
//!
//! The client joins a room on the game authority, keeps the player's phase
//! and the room summary fresh in the background, and takes phrase and
//! drawing submissions from the command line.

use anyhow::{Context, Result};
use pico_args::Arguments;
use sketch_relay::Session;
use std::{
    io::{self, Write},
    sync::Arc,
};

use sr_client::{api_client::ApiClient, cli_app::CliApp, config::ClientConfig, logging};

const HELP: &str = "\
Play sketch relay from the terminal

USAGE:
  sr_client [OPTIONS]

OPTIONS:
  --server URL          Game server URL  [default: $SERVER_URL or http://localhost:5000]
  --username NAME       Your name in the room  [default: your OS username]
  --room CODE           Room code to join

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  PHASE_POLL_INTERVAL_MS, SUMMARY_POLL_INTERVAL_MS, REQUEST_TIMEOUT_SECS,
  RENDER_INTERVAL_MS, RUST_LOG. A .env file in the working directory is read
  first.
";

struct Args {
    server_url: Option<String>,
    username: Option<String>,
    room: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        server_url: pargs
            .opt_value_from_str("--server")
            .context("Invalid --server")?,
        username: pargs
            .opt_value_from_str("--username")
            .context("Invalid --username")?,
        room: pargs.opt_value_from_str("--room").context("Invalid --room")?,
    };

    dotenvy::dotenv().ok();
    logging::init();

    let config = ClientConfig::from_env(args.server_url.clone())?;
    config.validate()?;
    tracing::debug!(?config, "Configuration loaded");

    run(args, config).await
}

/// Asks on stdin, offering `default` when the answer is left empty.
fn prompt(label: &str, default: Option<&str>) -> Result<String> {
    loop {
        match default {
            Some(default) => print!("{label} [{default}]: "),
            None => print!("{label}: "),
        }
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            anyhow::bail!("No {label} given");
        }
        match (input.trim(), default) {
            ("", Some(default)) => return Ok(default.to_string()),
            ("", None) => continue,
            (answer, _) => return Ok(answer.to_string()),
        }
    }
}

async fn run(args: Args, config: ClientConfig) -> Result<()> {
    let username = match args.username {
        Some(u) => u,
        None => prompt("Username", Some(&whoami::username()))?,
    };
    let room = match args.room {
        Some(r) => r,
        None => prompt("Room code", None)?,
    };

    let api = ApiClient::new(&config.server_url, config.request_timeout)?;
    let mut session = Session::new(Arc::new(api), config.poll_config());

    println!("Joining room {room} as {username}...");
    session
        .join(&username, &room)
        .await
        .context("Failed to join room")?;
    tracing::info!(server = %config.server_url, "Joined room");

    CliApp::new(session, config.render_interval).run().await
}

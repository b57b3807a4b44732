use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log;
use rpassword::read_password;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use q3rcon_tokio::checks::{parse_port, parse_timeout};
use q3rcon_tokio::{RconClient, RconClientConfig, RconError};

mod configs;
use crate::configs::load_config_from_env;
use crate::configs::ServerConfig;

const HISTORY_FILE: &str = "history.txt";

#[derive(Parser, Debug)]
#[command(name = "q3rcon", version, about = "Send RCON commands to a Quake III Arena server")]
struct Args {
    /// Server Address, optionally with a port (eg: 127.0.0.1:27960, or localhost)
    #[arg(short, long)]
    address: Option<String>,

    /// Server port, overrides a port given in the address (default: 27960)
    #[arg(long, value_parser = parse_port)]
    port: Option<u16>,

    /// RCON password
    #[arg(short, long)]
    password: Option<String>,

    /// Response timeout in milliseconds, at least 500 (default: 1500)
    #[arg(short, long, value_parser = parse_timeout)]
    timeout: Option<u64>,

    /// The command to execute. Without it, commands are read interactively
    #[arg(short, long)]
    command: Option<String>,

    /// Send commands without waiting for a response
    #[arg(long, action = clap::ArgAction::SetTrue)]
    no_wait: bool,

    /// Dump the client configuration and every outgoing packet
    #[arg(long, action = clap::ArgAction::SetTrue)]
    debug: bool,

    /// Config name to load from RCON_CONFIG_PATH
    #[arg(long)]
    config_name: Option<String>,
}

fn is_exit_command(line: &str) -> bool {
    line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit")
}

/// Sends one line. `None` means the command went out without waiting for a reply.
async fn dispatch(client: &RconClient, command: &str, no_wait: bool) -> Result<Option<String>, RconError> {
    if no_wait {
        client.send_no_reply(command).await?;
        return Ok(None);
    }
    client.send(command).await.map(Some)
}

async fn run_cli(client: RconClient, no_wait: bool) -> rustyline::Result<()> {
    println!("initialized. write your rcon commands here (send by pressing Enter):");

    let mut rl = DefaultEditor::new()?;

    if rl.load_history(HISTORY_FILE).is_err() {
        log::info!("No previous history.");
    }

    loop {
        let readline = rl.readline("> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if is_exit_command(line) {
                    break;
                }
                let _ = rl.add_history_entry(line);

                match dispatch(&client, line, no_wait).await {
                    Ok(Some(resp)) => println!("server: {}", resp),
                    Ok(None) => log::debug!("Sent {:?}", line),
                    Err(e) => println!("error: {}", e),
                }
            },
            Err(ReadlineError::Interrupted) => {
                log::info!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                log::info!("CTRL-D");
                break;
            },
            Err(err) => {
                log::error!("Error: {:?}", err);
                break;
            }
        }
    }

    rl.save_history(HISTORY_FILE).unwrap_or_else(|e| log::error!("Failed to save history: {}", e));
    Ok(())
}

fn get_address(provided_addr: &Option<String>) -> io::Result<String> {
    if let Some(addr) = provided_addr {
        return Ok(addr.clone());
    }
    print!("Enter address: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn get_password(provided_pw: &Option<String>) -> io::Result<String> {
    if let Some(pw) = provided_pw {
        return Ok(pw.clone());
    }
    print!("Enter password: ");
    io::stdout().flush()?;
    read_password()
}

/// Merges a config file entry (if any) with the command line. Flags win over the file.
fn build_client_config(args: &Args, server: ServerConfig) -> Result<RconClientConfig, RconError> {
    let mut config = RconClientConfig::from_endpoint_str(&server.address, server.password)?;
    if let Some(port) = args.port.or(server.port) {
        config = config.port(port);
    }
    if let Some(timeout) = args.timeout.or(server.timeout) {
        config = config.timeout(timeout);
    }
    Ok(config.debug(args.debug || server.debug.unwrap_or(false)))
}

/// Looks up the `RCON_CONFIG_PATH` entry (the only one when no name is given),
/// with `--address`/`--password` replacing its fields. Without an entry, missing
/// values are prompted for.
fn resolve_server_config(args: &Args) -> anyhow::Result<ServerConfig> {
    match &args.config_name {
        Some(name) => log::debug!("Config name provided: {}", name),
        None => log::debug!("No config name provided."),
    }

    if let Some(mut cfg) = load_config_from_env(args.config_name.clone()) {
        if let Some(address) = &args.address {
            cfg.address = address.clone();
        }
        if let Some(password) = &args.password {
            cfg.password = password.clone();
        }
        return Ok(cfg);
    }

    Ok(ServerConfig {
        address: get_address(&args.address).context("failed to read address")?,
        password: get_password(&args.password).context("failed to read password")?,
        ..Default::default()
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        Env::default().filter_or("RUST_LOG", default_filter)
    ).init();

    let server_config = resolve_server_config(&args)?;
    let client = RconClient::new(build_client_config(&args, server_config)?)
        .context("usage: q3rcon --address <server-address[:port]> --password <rcon-password>")?;

    if let Some(cmd) = &args.command {
        if let Some(response) = dispatch(&client, cmd.trim(), args.no_wait).await? {
            println!("{}", response);
        }
        return Ok(());
    }

    run_cli(client, args.no_wait).await?;
    Ok(())
}

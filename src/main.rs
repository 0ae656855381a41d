use clap::{Parser, Subcommand};
use dnsswitch::config::{load_config, AppConfig};
use dnsswitch::core::{DnsSwitcher, PrivilegedExecutor};
use dnsswitch::db::SqliteStateStore;
use dnsswitch::logger;
use dnsswitch::platform::{KeychainCredentialStore, MacNetworkSetup, SudoEscalator, TerminalPrompt};
use dnsswitch::DnsError;
use serde::Serialize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dnsswitch")]
#[command(version, about = "Switch the active network service's DNS resolvers and restore them")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Config file (default: <data dir>/config.toml)
    #[arg(long, global = true, env = "DNSSWITCH_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Point the active service at the target resolvers
    Connect {
        /// Change the physical service even when a VPN owns the default route
        #[arg(long)]
        force: bool,
        /// Resolver addresses (default: target_servers from config)
        servers: Vec<String>,
    },
    /// Restore the resolvers saved by the last connect
    Disconnect,
    /// Report whether the target resolvers are in effect
    Status { servers: Vec<String> },
    /// Print the active network service
    Interface,
    /// Remove the cached administrator password from the Keychain
    ForgetCredential,
}

#[derive(Debug, Serialize)]
struct OperationResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    message: String,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    connected: bool,
}

#[derive(Debug, Serialize)]
struct InterfaceResponse {
    service: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("Failed to start runtime: {error}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(%error, "dnsswitch failed");
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = load_config(cli.config.as_deref())?;
    let switcher = build_switcher(&config)?;
    let json = cli.json;

    let code = match cli.cmd {
        Cmd::Connect { force, servers } => {
            let servers = or_configured(servers, &config);
            let mut result = switcher.connect(&servers, force).await;
            let retry = match &result {
                Err(DnsError::VpnActive(service)) => {
                    !force && !json && confirm_vpn_override(service)
                }
                _ => false,
            };
            if retry {
                result = switcher.connect(&servers, true).await;
            }
            let message = result.map(|change| {
                format!("DNS for '{}' set to {}", change.service, change.servers)
            });
            report_operation(json, message)?
        }
        Cmd::Disconnect => {
            let result = switcher.disconnect().await;
            let message = result.map(|change| {
                format!("DNS for '{}' restored: {}", change.service, change.servers)
            });
            report_operation(json, message)?
        }
        Cmd::Status { servers } => {
            let servers = or_configured(servers, &config);
            let connected = switcher.get_status(&servers).await;
            if json {
                print_json(&StatusResponse { connected })?;
            } else if connected {
                println!("Connected ({})", servers.join(", "));
            } else {
                println!("Not connected");
            }
            ExitCode::SUCCESS
        }
        Cmd::Interface => {
            let service = switcher.get_active_interface().await;
            if json {
                print_json(&InterfaceResponse { service })?;
            } else {
                println!("{service}");
            }
            ExitCode::SUCCESS
        }
        Cmd::ForgetCredential => {
            let executor = switcher.executor();
            let message = if executor.has_cached_password().await {
                executor.forget().await;
                "Cached administrator password removed"
            } else {
                "No cached administrator password"
            };
            report_operation(json, Ok(message.to_string()))?
        }
    };

    Ok(code)
}

fn build_switcher(config: &AppConfig) -> Result<DnsSwitcher, dnsswitch::StoreError> {
    let executor = PrivilegedExecutor::new(
        Arc::new(SudoEscalator::new()),
        Arc::new(KeychainCredentialStore::new()),
        Arc::new(TerminalPrompt::new()),
        config.credential_profile(),
    );
    Ok(DnsSwitcher::new(
        Arc::new(MacNetworkSetup::new()),
        Arc::new(SqliteStateStore::open_default()?),
        executor,
    ))
}

fn or_configured(servers: Vec<String>, config: &AppConfig) -> Vec<String> {
    if servers.is_empty() {
        config.target_servers.clone()
    } else {
        servers
    }
}

/// Ask before changing DNS on the link beneath an active VPN.
fn confirm_vpn_override(service: &str) -> bool {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return false;
    }
    eprint!(
        "A VPN is active. Change DNS on the physical service '{}' anyway? [y/N] ",
        service
    );
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if stdin.lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn report_operation(
    json: bool,
    result: Result<String, DnsError>,
) -> Result<ExitCode, serde_json::Error> {
    let (response, code) = match result {
        Ok(message) => (
            OperationResponse {
                success: true,
                code: None,
                message,
            },
            ExitCode::SUCCESS,
        ),
        Err(error) => {
            tracing::warn!(code = error.code(), %error, "Operation failed");
            (
                OperationResponse {
                    success: false,
                    code: Some(error.code()),
                    message: error.to_string(),
                },
                ExitCode::FAILURE,
            )
        }
    };

    if json {
        print_json(&response)?;
    } else if response.success {
        println!("{}", response.message);
    } else {
        eprintln!(
            "{}: {}",
            response.code.unwrap_or("ERROR"),
            response.message
        );
    }
    Ok(code)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

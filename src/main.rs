//! Status service entry point and diagnostic commands.

use std::net::Ipv4Addr;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*};

use status_api::api;
use status_api::config::{Config, Overrides};
use status_api::login::{render_attempt, LoginSmokeTest};
use status_api::metrics;
use status_api::probe::{local_ipv4_addresses, render_instructions, render_report, NetworkProbe};

/// Minimal JSON status service.
#[derive(Parser, Debug)]
#[command(name = "status-api")]
#[command(about = "JSON status service with network and login diagnostics")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the status endpoints (default).
    Serve {
        /// Listening port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Probe the service from every local IPv4 address.
    Probe {
        /// Port to probe (overrides PROBE_PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Per-request timeout in milliseconds (overrides PROBE_TIMEOUT_MS).
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Probe these addresses instead of enumerating interfaces.
        #[arg(long = "address")]
        addresses: Vec<Ipv4Addr>,
    },

    /// POST the fixed credential pairs to the login endpoint.
    LoginTest {
        /// Login URL (overrides LOGIN_URL).
        #[arg(long)]
        url: Option<String>,
    },

    /// Print the effective configuration.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging (RUST_LOG may come from .env)
    let filter = Config::load()
        .map(|config| config.log_filter(args.verbose))
        .unwrap_or_else(|_| Config::default().log_filter(args.verbose));

    if args.json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    metrics::init_metrics();

    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port).await,
        Some(Command::Probe {
            port,
            timeout_ms,
            addresses,
        }) => cmd_probe(port, timeout_ms, addresses).await,
        Some(Command::LoginTest { url }) => cmd_login_test(url).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        None => cmd_serve(None).await,
    }
}

/// Load configuration, apply CLI overrides and validate the result.
fn load_config(overrides: Overrides) -> anyhow::Result<Config> {
    Config::load_with(overrides).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        anyhow::Error::from(e)
    })
}

/// Run the HTTP service.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    let config = load_config(Overrides {
        port: port_override,
        ..Overrides::default()
    })?;

    api::serve(&config).await?;
    Ok(())
}

/// Run the network probe. Always succeeds once configuration is loaded.
async fn cmd_probe(
    port_override: Option<u16>,
    timeout_override: Option<u64>,
    addresses: Vec<Ipv4Addr>,
) -> anyhow::Result<()> {
    let config = load_config(Overrides {
        probe_port: port_override,
        probe_timeout_ms: timeout_override,
        ..Overrides::default()
    })?;

    println!("======================================================================");
    println!("DIAGNÓSTICO DE RED");
    println!("======================================================================");

    let addresses = if addresses.is_empty() {
        match local_ipv4_addresses() {
            Ok(found) => found,
            Err(e) => {
                warn!("Interface enumeration failed: {}", e);
                println!("No se pudieron listar las interfaces: {}", e);
                Vec::new()
            }
        }
    } else {
        addresses
    };

    println!("Direcciones IPv4 encontradas: {}", addresses.len());
    for ip in &addresses {
        println!("  {}", ip);
    }
    println!("----------------------------------------------------------------------");

    let probe = NetworkProbe::new(config.probe_port, config.probe_timeout())?;
    println!(
        "Puerto: {}  Timeout: {}ms",
        probe.port(),
        probe.timeout().as_millis()
    );
    let reports = probe.run(&addresses).await;

    for report in &reports {
        for line in render_report(report) {
            println!("{}", line);
        }
    }

    println!("----------------------------------------------------------------------");
    for line in render_instructions(&reports, config.probe_port) {
        println!("{}", line);
    }
    println!("======================================================================");

    Ok(())
}

/// Run the login smoke test. Never fails on a rejected or failed login.
async fn cmd_login_test(url_override: Option<String>) -> anyhow::Result<()> {
    let config = load_config(Overrides {
        login_url: url_override,
        ..Overrides::default()
    })?;

    let runner = LoginSmokeTest::new(&config.login_url)?;
    info!("Testing login endpoint {}", runner.url());

    println!("======================================================================");
    println!("PRUEBA DE LOGIN - {}", runner.url());
    println!("======================================================================");

    for attempt in runner.run_default().await {
        for line in render_attempt(&attempt) {
            println!("{}", line);
        }
        println!("----------------------------------------------------------------------");
    }

    Ok(())
}

/// Print the effective configuration.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CONFIGURATION CHECK");
    println!("======================================================================");

    let config = load_config(Overrides::default())?;

    println!("  Port: {}", config.port);
    println!("  Probe Port: {}", config.probe_port);
    println!("  Probe Timeout: {}ms", config.probe_timeout_ms);
    println!("  Login URL: {}", config.login_url);
    println!("  Log Level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

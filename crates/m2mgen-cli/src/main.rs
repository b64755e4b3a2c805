//! m2mgen CLI entrypoint
//! Parses command-line arguments and dispatches to the generator or the web API.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use m2mgen_core::{generate, validate, Platform, RawConfig};
use m2mgen_server::ServerConfig;
use tokio::fs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "m2mgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Serve the generator web API
    Serve {
        /// Server configuration file (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Interface to bind (default: 0.0.0.0)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (default: 5000)
        #[arg(long)]
        port: Option<u16>,
        /// Skip TLS certificate verification on live test requests
        #[arg(long)]
        insecure_tls: bool,
    },
    /// Generate a oneM2M client from a device configuration file
    Generate {
        /// Device configuration (YAML, or JSON with a .json extension)
        #[arg(long)]
        config: PathBuf,
        /// Target controller: arduino_nano, esp32, esp8266 or python
        #[arg(long)]
        controller: String,
        /// Output file (default: the controller's file name in the current directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List supported controllers
    Platforms,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            insecure_tls,
        } => {
            let mut server_config = match &config {
                Some(path) => ServerConfig::from_file(path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => ServerConfig::default(),
            };
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }
            server_config.insecure_tls |= insecure_tls;

            tracing::info!("Starting m2mgen on {}", server_config.bind_addr());
            m2mgen_server::serve(&server_config)
                .await
                .context("Server failed")?;
        }
        Commands::Generate {
            config,
            controller,
            output,
        } => {
            let platform: Platform = controller
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid controller '{controller}': {e}"))?;

            let raw = RawConfig::from_file(&config)
                .await
                .with_context(|| format!("Failed to load {}", config.display()))?;
            let device = validate(&raw, platform)
                .with_context(|| format!("Invalid configuration in {}", config.display()))?;
            let generated = generate(&device, platform).context("Failed to generate code")?;

            let output_path = output.unwrap_or_else(|| PathBuf::from(&generated.filename));
            if let Some(parent) = output_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent).await.with_context(|| {
                        format!("Failed to create directory {}", parent.display())
                    })?;
                }
            }
            fs::write(&output_path, &generated.code)
                .await
                .with_context(|| format!("Failed to write {}", output_path.display()))?;

            tracing::info!(
                "Wrote {} {} client to {}",
                platform.profile().display_name,
                device.operation,
                output_path.display()
            );
        }
        Commands::Platforms => {
            for platform in Platform::all() {
                let profile = platform.profile();
                println!(
                    "{:<14}{:<22}{}",
                    platform.as_str(),
                    profile.display_name,
                    profile.filename
                );
            }
        }
    }
    Ok(())
}

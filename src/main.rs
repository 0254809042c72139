use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use authority_registry::apis::registry_from_config;
use authority_registry::config::{Config, ProviderSettings, RegistryConfig};
use authority_registry::observability::init_logging;
use authority_registry::{HtmlBuffer, RegisterKind};

#[derive(Parser)]
#[command(name = "authority")]
#[command(about = "Query authority-file registries and print normalized results")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "authority.toml")]
    config: String,

    /// Provider to use (overrides the config file). Available: kbga
    #[arg(long)]
    provider: Option<String>,

    /// Register to query: person, organisation, place, term, abbreviation
    #[arg(long)]
    register: Option<RegisterKind>,

    /// Namespace prepended to result ids
    #[arg(long)]
    prefix: Option<String>,

    /// Override the API segment for the register
    #[arg(long)]
    api: Option<String>,

    /// Override the provider base URL
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the register for free text
    Query { key: String },
    /// Render the detail fragment for a record and print its identity
    Info { key: String },
    /// Fetch and print the normalized record
    Record { key: String },
}

/// Load the config file when present, then apply command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = if std::path::Path::new(&cli.config).exists() {
        Config::load(&cli.config).with_context(|| format!("loading {}", cli.config))?
    } else {
        let register = cli
            .register
            .clone()
            .context("no config file found; pass --register")?;
        let mut config = Config {
            provider: ProviderSettings::default(),
            registry: RegistryConfig::new(register),
        };
        config.apply_env_overrides()?;
        config
    };

    if let Some(provider) = &cli.provider {
        config.provider.name = provider.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.provider.base_url = base_url.clone();
    }
    if let Some(register) = &cli.register {
        config.registry.register = register.clone();
    }
    if let Some(prefix) = &cli.prefix {
        config.registry.id_prefix = Some(prefix.clone());
    }
    if let Some(api) = &cli.api {
        config.registry.api_override = Some(api.clone());
    }
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    let registry = registry_from_config(&config)?;
    info!(
        provider = registry.provider_name(),
        register = %config.registry.register,
        "Registry configured"
    );

    match &cli.command {
        Commands::Query { key } => {
            let response = registry.query(key).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Info { key } => {
            let sink = HtmlBuffer::new();
            let identity = registry.info(key, &sink).await?;
            if let Some(html) = sink.content() {
                println!("{}", html.trim());
            }
            println!("{}", serde_json::to_string_pretty(&identity)?);
        }
        Commands::Record { key } => {
            let record = registry.get_record(key).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let log_guard = init_logging();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("❌ {:#}", e);
        drop(log_guard);
        std::process::exit(1);
    }
}

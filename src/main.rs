//! `StreamScout` CLI - resolve gateway pages, serve the API, pack deep links

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use streamscout::{Config, DeepLinkParams, LinkClassifier, PageClient, PipelineResult, Resolver};

#[derive(Parser)]
#[command(name = "streamscout")]
#[command(about = "Resolve gateway pages into ranked download and stream links")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/streamscout/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    /// Human-readable list
    #[default]
    Text,
    /// JSON `{ links, pageTitle, isZipFile }`
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a gateway URL into ranked links
    Resolve {
        /// Gateway page URL
        url: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Serve POST /api/process-url
    Serve {
        /// Listen address (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Encode or decode deep-link keys
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Pack parameters into a key
    Encode(KeyFields),
    /// Unpack a key into JSON
    Decode {
        /// Key to decode
        key: String,
    },
}

#[derive(Args)]
struct KeyFields {
    #[arg(long)]
    link: Option<String>,
    #[arg(long)]
    driveid: Option<String>,
    #[arg(long)]
    tmdbid: Option<String>,
    #[arg(long)]
    season: Option<String>,
    #[arg(long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Commands::Resolve { url, format } => {
            let config = Config::load(cli.config.as_deref())?;
            cmd_resolve(&config, &url, format).await?;
        }
        Commands::Serve { bind } => {
            let config = Config::load(cli.config.as_deref())?;
            cmd_serve(&config, bind.as_deref()).await?;
        }
        Commands::Key { action } => match action {
            KeyAction::Encode(fields) => cmd_key_encode(fields),
            KeyAction::Decode { key } => cmd_key_decode(&key)?,
        },
    }

    Ok(())
}

fn build_resolver(config: &Config) -> Result<Resolver<PageClient>> {
    let trust = config.trust_table()?;
    let client = PageClient::with_config(&config.fetch).context("failed to build HTTP client")?;
    Ok(Resolver::new(client, LinkClassifier::new(trust)))
}

async fn cmd_resolve(config: &Config, url: &str, format: OutputFormat) -> Result<()> {
    let resolver = build_resolver(config)?;
    let result = resolver.resolve(url).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_result(&result),
    }
    Ok(())
}

fn print_result(result: &PipelineResult) {
    if !result.page_title.is_empty() {
        println!("📄 {}", result.page_title);
    }
    if result.is_zip_file {
        println!("📦 ZIP archive: download only");
    }
    println!();

    for link in &result.links {
        let marker = if link.is_trusted { "✅" } else { "  " };
        println!("{marker} {}", link.label);
        println!("   {}", link.url);
    }

    let trusted = result.links.iter().filter(|l| l.is_trusted).count();
    println!("\n({} links, {trusted} trusted)", result.links.len());
}

async fn cmd_serve(config: &Config, bind: Option<&str>) -> Result<()> {
    let resolver = Arc::new(build_resolver(config)?);
    let addr = bind.unwrap_or(config.server.bind.as_str());
    streamscout::server::serve(addr, resolver).await
}

fn cmd_key_encode(fields: KeyFields) {
    let params = DeepLinkParams {
        link: fields.link,
        driveid: fields.driveid,
        tmdbid: fields.tmdbid,
        season: fields.season,
        server: fields.server,
    };
    println!("{}", params.encode());
}

fn cmd_key_decode(key: &str) -> Result<()> {
    let Some(params) = DeepLinkParams::decode(key) else {
        bail!("invalid deep-link key");
    };
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

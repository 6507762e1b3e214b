//! Wikiquery CLI
//!
//! Query Wikipedia and Wikidata from the command line.
//!
//! # Examples
//!
//! Lead section of an article:
//! ```bash
//! wikiquery summary "Tehran"
//! ```
//!
//! Persian Wikipedia, retrying misspelled titles with suggestions:
//! ```bash
//! wikiquery --lang fa --smart infobox "تهران"
//! ```
//!
//! Custom extract parameters:
//! ```bash
//! wikiquery summary "Tehran" --param explaintext=true --param exsentences=2
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use wikiquery::{ClientConfig, ExtraParams, LanguageCode, WikiClient};

#[derive(Parser)]
#[command(name = "wikiquery")]
#[command(author, version, about = "Query the Wikipedia and Wikidata APIs")]
#[command(long_about = r#"
Query the live Wikipedia and Wikidata APIs: summaries, plain text, rendered
HTML, wikitext, categories, images, search, suggestions and infoboxes.

EXAMPLES:
  Lead section of an article:
    wikiquery summary "Tehran"

  Infobox from Persian Wikipedia:
    wikiquery --lang fa infobox "تهران"

  Retry misspelled titles with the first suggestion:
    wikiquery --smart text "Tehrn"

  Search:
    wikiquery search "capital of Iran"
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Two-letter Wikipedia language code
    #[arg(short, long)]
    lang: Option<String>,

    /// Retry empty lookups with the first spelling suggestion
    #[arg(short, long)]
    smart: bool,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// JSON config file (see ClientConfig)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lead section of an article
    Summary {
        title: String,

        /// Extra API parameter as key=value (repeatable)
        #[arg(short, long = "param")]
        params: Vec<String>,
    },

    /// Whole article as plain text
    Text { title: String },

    /// Rendered article HTML
    Html { title: String },

    /// Latest revision wikitext
    Raw { title: String },

    /// Page categories
    Categories { title: String },

    /// Lead image URL
    Image { title: String },

    /// Public article URL
    Url { title: String },

    /// Short page description
    Description { title: String },

    /// Description of the linked Wikidata entity
    Entity { title: String },

    /// Infobox rows
    Infobox { title: String },

    /// Full-text search
    Search { query: String },

    /// Title suggestions
    Suggest { query: String },

    /// Raw query.pages map for one or more properties
    Info {
        title: String,

        /// Properties, pipe-delimited (e.g. "extracts|categories")
        #[arg(short, long, default_value = "extracts")]
        prop: String,

        /// Response format (only "json" is supported)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Extra API parameter as key=value (repeatable)
        #[arg(long = "param")]
        params: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("wikiquery=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wikiquery=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let client = build_client(&cli)?;

    match &cli.command {
        Commands::Summary { title, params } => {
            print_json(&client.summary(title, &parse_params(params)?)?)
        }
        Commands::Text { title } => print_json(&client.text(title)?),
        Commands::Html { title } => {
            println!("{}", client.html(title)?);
            Ok(())
        }
        Commands::Raw { title } => print_json(&client.raw(title)?),
        Commands::Categories { title } => print_json(&client.categories(title)?),
        Commands::Image { title } => print_json(&client.image_url(title)?),
        Commands::Url { title } => {
            println!("{}", client.url(title));
            Ok(())
        }
        Commands::Description { title } => print_json(&client.description(title)?),
        Commands::Entity { title } => print_json(&client.entity_description(title)?),
        Commands::Infobox { title } => print_json(&client.infobox(title)?),
        Commands::Search { query } => print_json(&client.search(query)?),
        Commands::Suggest { query } => print_json(&client.suggest(query)?),
        Commands::Info { title, prop, format, params } => {
            print_json(&client.get_info(title, prop, format, &parse_params(params)?)?)
        }
    }
}

fn build_client(cli: &Cli) -> Result<WikiClient> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => ClientConfig::default(),
    };

    if let Some(lang) = &cli.lang {
        config = config.with_language(LanguageCode::parse(lang)?);
    }
    if cli.smart {
        config = config.with_smart(true);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout_secs(secs);
    }

    tracing::debug!("Using {} (smart: {})", config.api_url(), config.smart);
    WikiClient::with_config(config).context("Failed to create HTTP client")
}

fn parse_params(pairs: &[String]) -> Result<ExtraParams> {
    pairs
        .iter()
        .try_fold(ExtraParams::new(), |extra, pair| extra.set_pair(pair))
        .context("Invalid --param")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

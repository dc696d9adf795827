mod browse;
mod url;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use shopstyle_catalog::{CatalogClient, SsData};
use shopstyle_core::{ProductId, SortOrder};
use tracing_subscriber::EnvFilter;

use crate::url::UrlCommands;

#[derive(Debug, Parser)]
#[command(name = "shopstyle-cli")]
#[command(about = "Browse the ShopStyle catalog from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(flatten)]
    Catalog(CatalogCommands),
    /// Read and rewrite query strings without touching the network
    Url {
        #[command(subcommand)]
        command: UrlCommands,
    },
}

/// Commands that talk to the catalog API and need configuration.
#[derive(Debug, Subcommand)]
enum CatalogCommands {
    /// List every retailer
    Retailers,
    /// List brands in server order
    Brands {
        /// Show only the first N brands
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List every color
    Colors,
    /// List women's categories
    Categories,
    /// Run a product search the way the browse view does
    Browse {
        /// Category id (e.g. dresses); omitted means no category
        #[arg(long)]
        cat: Option<String>,
        /// Color id, or "any"
        #[arg(long)]
        color: Option<String>,
        /// Brand id, or "any"
        #[arg(long)]
        brand: Option<String>,
        /// relevance, lo-hi or hi-lo
        #[arg(long, default_value = "relevance")]
        sort: SortOrder,
        /// Product ids to put on the compare list after the search
        #[arg(long = "choose")]
        choose: Vec<ProductId>,
    },
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        None => {
            println!("shopstyle-cli: run with --help to see the available commands");
            Ok(())
        }
        Some(Commands::Url { command }) => {
            init_tracing("warn")?;
            url::run(command)
        }
        Some(Commands::Catalog(command)) => run_catalog(command).await,
    }
}

async fn run_catalog(command: CatalogCommands) -> anyhow::Result<()> {
    let config = shopstyle_core::load_app_config()?;
    init_tracing(&config.log_level)?;
    tracing::debug!(?config, "configuration loaded");

    let client = CatalogClient::from_config(&config)?;
    let data = Arc::new(SsData::new(client));

    match command {
        CatalogCommands::Retailers => browse::list_retailers(&data).await,
        CatalogCommands::Brands { limit } => browse::list_brands(&data, limit).await,
        CatalogCommands::Colors => browse::list_colors(&data).await,
        CatalogCommands::Categories => browse::list_categories(&data).await,
        CatalogCommands::Browse {
            cat,
            color,
            brand,
            sort,
            choose,
        } => {
            let request = browse::BrowseRequest {
                category: cat,
                color,
                brand,
                sort,
                choose,
            };
            browse::run_browse(data, (&config).into(), request).await
        }
    }
}

#[cfg(test)]
mod tests;

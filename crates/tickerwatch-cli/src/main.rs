//! Command-line interface for tickerwatch

mod commands;
mod repl;

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tickerwatch::client::display::{render_news, render_quote, render_summary};
use tickerwatch::{AppState, HttpStockApi, JsonFileStore, StockApi, StockConfig, WatchlistClient};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tickerwatch-cli")]
#[command(about = "Track stocks, look up quotes and summarize recent news", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the quote and news API server
    Serve {
        /// Address to listen on
        #[arg(long, env = "TICKERWATCH_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
    /// Manage your watchlist interactively
    Watch {
        /// Base URL of a running server
        #[arg(long, env = "TICKERWATCH_SERVER", default_value = "http://127.0.0.1:3000")]
        server: String,

        /// Where the watchlist is stored
        #[arg(long, env = "TICKERWATCH_STORE", default_value = "watchlist.json")]
        store: PathBuf,
    },
    /// Look up a single quote
    Quote {
        symbol: String,

        #[arg(long, env = "TICKERWATCH_SERVER", default_value = "http://127.0.0.1:3000")]
        server: String,
    },
    /// Show recent news for a symbol
    News {
        symbol: String,

        /// Summarize the news with the completion provider
        #[arg(long)]
        analyze: bool,

        #[arg(long, env = "TICKERWATCH_SERVER", default_value = "http://127.0.0.1:3000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => {
            tickerwatch_utils::init_tracing();

            let config = StockConfig::from_env()?;
            info!("Using model {} via {}", config.model, config.groq_api_base);
            let state = AppState::from_config(&config)?;

            tickerwatch::server::serve(bind, state).await?;
        }
        Commands::Watch { server, store } => {
            tickerwatch_utils::init_tracing_with("warn");

            let mut stdout = std::io::stdout();
            repl::print_banner(&mut stdout)?;
            println!("Server: {server}");
            println!("Watchlist: {}\n", store.display());

            let client = WatchlistClient::new(
                Arc::new(HttpStockApi::new(server)),
                Arc::new(JsonFileStore::new(store)),
            );

            let stdin = std::io::stdin();
            repl::Repl::new(&client, stdin.lock(), stdout).run().await?;
        }
        Commands::Quote { symbol, server } => {
            tickerwatch_utils::init_tracing_with("warn");

            let api = HttpStockApi::new(server);
            let quote = api.get_quote(&symbol.trim().to_uppercase()).await?;
            println!("{}", render_quote(&quote));
        }
        Commands::News {
            symbol,
            analyze,
            server,
        } => {
            tickerwatch_utils::init_tracing_with("warn");

            let api = HttpStockApi::new(server);
            let symbol = symbol.trim().to_uppercase();
            if analyze {
                let analysis = api.analyze_news(&symbol).await?;
                println!("{}", render_summary(&analysis));
            } else {
                let news = api.get_news(&symbol).await?;
                println!("{}", render_news(&news));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_news_analyze() {
        let cli = Cli::try_parse_from(["tickerwatch-cli", "news", "aapl", "--analyze"]).unwrap();
        match cli.command {
            Commands::News { symbol, analyze, .. } => {
                assert_eq!(symbol, "aapl");
                assert!(analyze);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

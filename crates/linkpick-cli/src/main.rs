use clap::{Parser, Subcommand};

use linkpick_resolver::ResolverClient;

#[derive(Debug, Parser)]
#[command(name = "linkpick-cli")]
#[command(about = "Linkpick command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a product URL and print the record as JSON.
    Resolve {
        /// Product or short-link URL from a supported shop.
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = linkpick_core::load_app_config()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { url } => {
            let client = ResolverClient::new(config.request_timeout_secs, &config.user_agent)?;
            let record = linkpick_resolver::resolve(&client, &url).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}

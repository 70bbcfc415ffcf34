use anyhow::Result;
use clap::Parser;
use research_agent::cli::{handle_command, Cli};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("research_agent=info,rocket::server=off"));

    let layer = if cli.log_json {
        fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .boxed()
    } else {
        fmt::layer().boxed()
    };

    Registry::default().with(layer).with(filter).init();

    handle_command(cli).await
}

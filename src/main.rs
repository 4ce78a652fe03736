use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use simple_mercari::{
    api::{ApiError, HttpApiClient, MarketplaceApi},
    cli::{Cli, Commands},
    config::Config,
    listing::{add_item, SubmitOutcome},
    tui::{self, ui::truncate_to_width},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command();

    let mut config = Config::from_env()?;
    if let Some(ref backend_url) = cli.backend_url {
        config = config.with_backend_url(backend_url);
    }

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "simple_mercari=info");
    }
    init_logging(&config.log_file, command != Commands::Tui);

    config.validate()?;
    let api: Arc<dyn MarketplaceApi> =
        Arc::new(HttpApiClient::new(&config).context("Failed to build HTTP client")?);

    match command {
        Commands::Tui => {
            info!("Launching TUI interface");
            tui::run_tui(config, api).await?;
        }

        Commands::List => match api.fetch_items().await {
            Ok(items) => {
                if items.is_empty() {
                    println!("No items listed yet");
                    return Ok(());
                }

                println!("{:<6} {:<30} {:<20} {}", "ID", "Name", "Category", "Image");
                println!("{}", "-".repeat(90));
                for item in &items {
                    println!(
                        "{:<6} {:<30} {:<20} {}",
                        item.id,
                        truncate_to_width(&item.name, 30),
                        truncate_to_width(&item.category, 20),
                        config.image_url(&item.image)
                    );
                }
                println!();
                println!("Total: {} items", items.len());
            }
            Err(e) => {
                error!("GET error: {}", e);
                eprintln!("Failed to load items: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Show { id } => match api.fetch_item(id).await {
            Ok(item) => {
                println!("ID:       {}", item.id);
                println!("Name:     {}", item.name);
                println!("Category: {}", item.category);
                println!("Image:    {}", config.image_url(&item.image));
            }
            Err(e @ ApiError::NotFound(_)) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            Err(e) => {
                error!("GET error: {}", e);
                eprintln!("Failed to load item {}: {}", id, e);
                std::process::exit(1);
            }
        },

        Commands::Add {
            name,
            category,
            image,
        } => {
            let outcome = add_item(api, &name, &category, &image).await?;
            println!("{}", outcome);
            if let SubmitOutcome::Failed(ref e) = outcome {
                eprintln!("{}", e);
            }
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Log to the configured file, and to stderr unless the TUI owns the terminal
fn init_logging(log_file: &Path, to_stderr: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let directory = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "simple-mercari.log".into());
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();
}

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between currencies
    Convert {
        /// Amount of the input currency to convert
        #[arg(long)]
        amount: f64,

        /// Input currency code or symbol (e.g. EUR, $)
        #[arg(long)]
        input_currency: String,

        /// Output currency code or symbol; omit to convert to all known
        /// currencies
        #[arg(long, default_value = "")]
        output_currency: String,

        /// Print the raw JSON result instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run the HTTP API
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:5000
        #[arg(long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(Commands::Convert {
            amount,
            input_currency,
            output_currency,
            json,
        }) => {
            fxconv::run_convert(
                amount,
                &input_currency,
                &output_currency,
                json,
                cli.config_path.as_deref(),
            )
            .await
        }
        Some(Commands::Serve { listen }) => {
            fxconv::run_serve(listen.as_deref(), cli.config_path.as_deref()).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = fxconv::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
providers:
  rates:
    base_url: "https://theforexapi.com"

probe_url: "https://www.google.com"
listen_addr: "127.0.0.1:5000"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

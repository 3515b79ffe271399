mod cli;

use storyteller::{config, server};
use storyteller_llm::{OpenAiBackend, Storyteller};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn start_server(config: config::Config) -> Result<()> {
    tracing::info!("Starting storyteller server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );
    tracing::info!(
        "Models: chat={} fast_chat={} vision={} image={} tts={} stt={}",
        config.openai.models.chat,
        config.openai.models.fast_chat,
        config.openai.models.vision,
        config.openai.models.image,
        config.openai.models.tts,
        config.openai.models.stt
    );
    if config.openai.api_key.is_empty() {
        tracing::warn!("No OpenAI API key configured; model requests will be rejected");
    }

    let backend = OpenAiBackend::new(config.openai.settings())
        .context("Failed to create model client")?;
    let storyteller = Storyteller::new(Arc::new(backend));
    let ctx = server::AppContext::new(config, storyteller);

    server::start_server(ctx).await
}

/// Install the global subscriber.
///
/// Respects `RUST_LOG` if set. With a log file, a second non-blocking layer
/// writes plain text there; the returned guard must live until exit.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            "storyteller=trace,storyteller_llm=trace,storyteller_common=debug,tower_http=debug"
                .to_string()
        } else {
            "storyteller=debug,storyteller_llm=debug,tower_http=info".to_string()
        }
    });

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {:?}", dir))?;
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {:?}", path))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(env_filter))
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start { host, port } => {
            let mut config = config::load_config_or_default(cli.config.as_deref())?;

            // Override host/port from CLI if specified
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let _guard = init_logging(cli.verbose, config.logging.file.as_deref())?;

            // Create tokio runtime
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(config))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let _guard = init_logging(cli.verbose, None)?;
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("storyteller {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::load_config_or_default(None)?
        }
    };

    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Model service: {}", config.openai.base_url);
    println!(
        "  API key: {}",
        if config.openai.api_key.is_empty() {
            "missing"
        } else {
            "set"
        }
    );
    println!("  Chat model: {}", config.openai.models.chat);
    println!("  Upload dir: {}", config.uploads.dir.display());
    println!(
        "  Allowed image types: {}",
        config.uploads.allowed_extensions.join(", ")
    );

    Ok(())
}

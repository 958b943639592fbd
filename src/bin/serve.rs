//! Command line tool to serve predictions over HTTP

use std::{path::PathBuf, sync::Arc};

use anyhow::anyhow;
use fake_news_detector::service::{self, AppContext, ServiceConfig};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Usage: serve [OPTIONS]

Options:
  -h, --help             Print help
  -c, --config           YAML config file (defaults to $FAKE_NEWS_CONFIG, if set)
  -a, --artifact-dir     Directory holding model.mpk, config.json and vector.json
  -l, --listen           Address to bind (e.g., '0.0.0.0:8000')
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// Path to a YAML config file
    config: Option<PathBuf>,

    /// Artifact directory override
    artifact_dir: Option<PathBuf>,

    /// Listen address override
    listen: Option<String>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = Arguments::from_env();

    let args = Args {
        help: pargs.contains(["-h", "--help"]),
        config: pargs.opt_value_from_str(["-c", "--config"])?,
        artifact_dir: pargs.opt_value_from_str(["-a", "--artifact-dir"])?,
        listen: pargs.opt_value_from_str(["-l", "--listen"])?,
    };

    Ok(args)
}

/// Load configuration from the CLI path, the environment, or defaults, then apply overrides
fn load_config(args: &Args) -> anyhow::Result<ServiceConfig> {
    let path = args
        .config
        .clone()
        .or_else(|| std::env::var(service::config::CONFIG_ENV).ok().map(PathBuf::from));

    let mut config = match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            service::load_config(&path)?
        }
        None => ServiceConfig::default(),
    };

    if let Some(artifact_dir) = &args.artifact_dir {
        config.artifact_dir = artifact_dir.clone();
    }

    if let Some(listen) = &args.listen {
        config.listen_addr = listen.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let args = parse_args()?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    let config = load_config(&args)?;

    // The process does not start without both artifacts
    let context = AppContext::load(&config.artifact_dir).map_err(|e| {
        anyhow!(
            "Unable to load artifacts from {}: {}",
            config.artifact_dir.display(),
            e
        )
    })?;

    let app = service::router(Arc::new(context)).layer(service::cors_layer(&config.allowed_origins));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Fake news API listening on {}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

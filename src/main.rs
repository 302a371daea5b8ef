use std::path::PathBuf;

use clap::Parser;
use tinyhttp::config::Config;
use tinyhttp::server;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tinyhttp")]
#[command(about = "Minimal HTTP/1.1 server with echo, user-agent and file routes")]
struct Cli {
    #[arg(long = "config")]
    #[arg(help = "YAML config file, applied before environment and flags")]
    config: Option<PathBuf>,

    #[arg(long = "address")]
    #[arg(help = "Address to listen on (default 0.0.0.0:4221)")]
    address: Option<String>,

    #[arg(long = "directory")]
    #[arg(help = "Directory served under /files/")]
    directory: Option<PathBuf>,

    #[arg(long = "strict-methods")]
    #[arg(help = "Answer 405 instead of 404 for unsupported methods on known paths")]
    strict_methods: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_yaml_file(path)?,
            None => Config::default(),
        };
        cfg.apply_lookup(|key| std::env::var(key).ok());

        if let Some(address) = self.address {
            cfg.address = address;
        }
        if let Some(directory) = self.directory {
            cfg.set_directory(directory);
        }
        if self.strict_methods {
            cfg.strict_method_status = true;
        }
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = Cli::parse().into_config()?;

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

//! shoe-ar-server: static file server for the shoe AR viewer

use anyhow::{Context, Result};
use clap::Parser;
use shoe_ar_core::resolve_config;
use shoe_ar_server::{bind, serve, shutdown_signal, ServerOptions};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shoe-ar-server")]
#[command(about = "Serve the shoe AR project over HTTP with CORS and USDZ support")]
#[command(version)]
struct Args {
    /// Project root to serve (defaults to current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Config file (defaults to <root>/shoe-ar.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shoe_ar_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let config = resolve_config(&root, args.config.as_deref())?;

    let options = ServerOptions {
        host: args.host.unwrap_or_else(|| config.server_host()),
        port: args.port.unwrap_or_else(|| config.server_port()),
        root,
    };

    let listener = bind(&options)
        .await
        .with_context(|| format!("Failed to bind {}", options.bind_addr()))?;

    let port = listener.local_addr()?.port();
    println!("Server running at http://localhost:{port}");
    println!("Press Ctrl+C to stop");

    serve(listener, &options.root, shutdown_signal()).await?;

    println!("\nServer stopped");
    Ok(())
}

//! shoe-ar - developer tooling for the shoe AR viewer
//!
//! Usage:
//!   shoe-ar setup              Fetch sample models, write USDZ markers and README
//!   shoe-ar create-usdz        Package placeholder USDZ files next to each GLB
//!   shoe-ar serve              Serve the project over HTTP on port 8000
//!   shoe-ar optimize           Report GLB sizes with optimization tips
//!   shoe-ar docs               Write the setup and iOS AR documents

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use shoe_ar_core::docs::{ios_docs, setup_docs, write_docs};
use shoe_ar_core::sizes::{model_sizes, OPTIMIZATION_TIPS};
use shoe_ar_core::tooling::check_optional_tools;
use shoe_ar_core::{
    generate_placeholders, provision, resolve_config, AssetStore, Config, HttpFetcher,
    ProvisionOptions, RunSummary,
};
use shoe_ar_server::{bind, serve, shutdown_signal, ServerOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod status;

use status::Reporter;

#[derive(Parser)]
#[command(name = "shoe-ar")]
#[command(about = "Asset setup, USDZ placeholders and dev server for the shoe AR viewer")]
#[command(version)]
struct Cli {
    /// Project root (defaults to current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Config file (defaults to <root>/shoe-ar.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print a JSON summary instead of status lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the models directory, fetch sample GLBs and write USDZ markers
    Setup {
        /// Fetch again when a GLB is a marker left by a failed download
        #[arg(long)]
        retry_placeholders: bool,
    },
    /// Generate placeholder USDZ archives from existing GLB models
    CreateUsdz,
    /// Serve the project root over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,
    },
    /// Report GLB sizes and optimization tips
    Optimize,
    /// Write the setup and iOS AR documents
    Docs,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
}

fn exit_code(summary: &RunSummary) -> ExitCode {
    if summary.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn cmd_setup(
    reporter: &Reporter,
    root: &Path,
    config: &Config,
    retry_placeholders: bool,
) -> Result<ExitCode> {
    reporter.info("Starting shoe AR setup");
    let store = AssetStore::new(root);
    let mut all = RunSummary::new();

    reporter.info("Checking optional tools...");
    let tools = check_optional_tools();
    reporter.summary(&tools);
    all.extend(tools);

    reporter.info("Setting up 3D models...");
    let fetcher = HttpFetcher::new(config.download_timeout())?;
    let options = ProvisionOptions { retry_placeholders };
    let assets = runtime()?
        .block_on(provision(
            &store,
            &config.model_ids(),
            &config.sources(),
            &fetcher,
            options,
        ))
        .with_context(|| format!("Failed to prepare {}", store.models_dir().display()))?;
    reporter.summary(&assets);
    all.extend(assets);

    let docs = write_docs(root, &setup_docs(config.server_port()));
    reporter.summary(&docs);
    all.extend(docs);

    if all.has_failures() {
        reporter.error("Setup finished with errors");
    } else {
        reporter.success("Setup completed successfully!");
        reporter.info("Run `shoe-ar serve` to start the development server");
    }
    reporter.finish(&all)?;
    Ok(exit_code(&all))
}

fn cmd_create_usdz(reporter: &Reporter, root: &Path, config: &Config) -> Result<ExitCode> {
    reporter.info("Starting iOS AR Quick Look setup...");
    let store = AssetStore::new(root);
    let mut all = RunSummary::new();

    reporter.info("Creating USDZ files for iOS AR Quick Look...");
    let generated = generate_placeholders(&store, &config.model_ids());
    reporter.summary(&generated);
    all.extend(generated);

    reporter.info("Writing iOS AR documents...");
    let port = config.server_port();
    let docs = write_docs(root, &ios_docs(port));
    reporter.summary(&docs);
    all.extend(docs);

    if all.has_failures() {
        reporter.error("iOS AR Quick Look setup finished with errors");
    } else {
        reporter.success("iOS AR Quick Look setup completed!");
        reporter.info(format!(
            "Test on iOS Safari: http://localhost:{port}/ios-ar-test.html"
        ));
    }
    reporter.finish(&all)?;
    Ok(exit_code(&all))
}

fn cmd_serve(root: PathBuf, config: &Config, port: Option<u16>, host: Option<String>) -> Result<()> {
    let options = ServerOptions {
        host: host.unwrap_or_else(|| config.server_host()),
        port: port.unwrap_or_else(|| config.server_port()),
        root,
    };

    runtime()?.block_on(async {
        let listener = bind(&options)
            .await
            .with_context(|| format!("Failed to bind {}", options.bind_addr()))?;
        let port = listener.local_addr()?.port();
        println!("Server running at http://localhost:{port}");
        println!("Press Ctrl+C to stop");

        serve(listener, &options.root, shutdown_signal()).await?;
        println!("\nServer stopped");
        Ok::<(), anyhow::Error>(())
    })
}

fn cmd_optimize(reporter: &Reporter, root: &Path) -> Result<()> {
    let models_dir = AssetStore::new(root).models_dir();

    reporter.info("Model optimization tips:");
    for (i, tip) in OPTIMIZATION_TIPS.iter().enumerate() {
        reporter.info(format!("{}. {tip}", i + 1));
    }

    let sizes = model_sizes(&models_dir)
        .with_context(|| format!("Failed to list {}", models_dir.display()))?;
    if sizes.is_empty() {
        reporter.warning(format!("No GLB models found in {}", models_dir.display()));
    }
    for size in &sizes {
        if size.is_large() {
            reporter.warning(format!(
                "{}: {} is large, consider optimization",
                size.name,
                size.display_size()
            ));
        } else {
            reporter.info(format!("{}: {}", size.name, size.display_size()));
        }
    }
    reporter.finish(&sizes)
}

fn cmd_docs(reporter: &Reporter, root: &Path, config: &Config) -> Result<ExitCode> {
    let port = config.server_port();
    let mut docs = setup_docs(port);
    docs.extend(ios_docs(port));

    let summary = write_docs(root, &docs);
    reporter.summary(&summary);
    reporter.finish(&summary)?;
    Ok(exit_code(&summary))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Completions { shell } = cli.command {
        generate(shell, &mut Cli::command(), "shoe-ar", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let root = resolve_root(cli.root)?;
    let config = resolve_config(&root, cli.config.as_deref())?;
    let reporter = Reporter::new(cli.json);
    tracing::debug!("Project root: {}", root.display());

    match cli.command {
        Commands::Setup { retry_placeholders } => {
            cmd_setup(&reporter, &root, &config, retry_placeholders)
        }
        Commands::CreateUsdz => cmd_create_usdz(&reporter, &root, &config),
        Commands::Serve { port, host } => {
            cmd_serve(root, &config, port, host)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Optimize => {
            cmd_optimize(&reporter, &root)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Docs => cmd_docs(&reporter, &root, &config),
        Commands::Completions { .. } => Ok(ExitCode::SUCCESS),
    }
}

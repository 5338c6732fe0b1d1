//! CLI entry point for spacetraveling

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spacetraveling")]
#[command(version)]
#[command(about = "A static blog front-end generator backed by a headless content API", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all posts and generate the static site
    #[command(alias = "g")]
    Generate,

    /// Generate a single post page from a draft revision
    Preview {
        /// Preview ref token issued by the content API
        #[arg(short, long)]
        token: String,

        /// Slug of the post to preview
        slug: String,
    },

    /// Start a local server over the generated output
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List posts from the content API
    List,

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "spacetraveling=debug,info"
    } else {
        "spacetraveling=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Generate => {
            let app = spacetraveling::Spacetraveling::new(&base_dir)?;
            tracing::info!("Generating static files...");
            spacetraveling::commands::generate::run(&app).await?;
            println!("Generated successfully!");
        }

        Commands::Preview { token, slug } => {
            let app = spacetraveling::Spacetraveling::new(&base_dir)?;
            tracing::info!("Rendering preview for {}", slug);
            spacetraveling::commands::preview::run(&app, &token, &slug).await?;
        }

        Commands::Server { port, ip } => {
            let app = spacetraveling::Spacetraveling::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            spacetraveling::server::start(&app, &ip, port).await?;
        }

        Commands::List => {
            let app = spacetraveling::Spacetraveling::new(&base_dir)?;
            spacetraveling::commands::list::run(&app).await?;
        }

        Commands::Clean => {
            let app = spacetraveling::Spacetraveling::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            spacetraveling::commands::clean::run(&app)?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("spacetraveling version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

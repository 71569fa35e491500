//! CLI entry point for newsshare

use anyhow::Result;
use clap::{Parser, Subcommand};
use newsshare::share::ShareChannel;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "newsshare")]
#[command(version)]
#[command(about = "Social share text and Open Graph metadata for news posts", long_about = None)]
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
    /// List loaded posts
    List,

    /// Print share text for a post
    Share {
        /// Post id
        id: String,

        /// Print a single channel instead of all of them as JSON
        #[arg(short = 'C', long, value_enum)]
        channel: Option<ShareChannel>,

        /// URL to share (defaults to the post's canonical URL)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Print the head metadata for a post
    Meta {
        /// Post id
        #[arg(required_unless_present = "reset")]
        id: Option<String>,

        /// URL to share (defaults to the post's canonical URL)
        #[arg(short, long)]
        url: Option<String>,

        /// Print the site defaults instead
        #[arg(long, conflicts_with = "id")]
        reset: bool,
    },

    /// Copy a post's share text to the clipboard
    Copy {
        /// Post id
        id: String,

        /// URL to share (defaults to the post's canonical URL)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Start the preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "newsshare=debug,info"
    } else {
        "newsshare=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List => {
            let app = newsshare::Newsshare::new(&base_dir)?;
            newsshare::commands::list::run(&app)?;
        }

        Commands::Share { id, channel, url } => {
            let app = newsshare::Newsshare::new(&base_dir)?;
            newsshare::commands::share::run(&app, &id, channel, url.as_deref())?;
        }

        Commands::Meta { id, url, reset } => {
            let app = newsshare::Newsshare::new(&base_dir)?;
            let id = if reset { None } else { id.as_deref() };
            newsshare::commands::meta::run(&app, id, url.as_deref())?;
        }

        Commands::Copy { id, url } => {
            let app = newsshare::Newsshare::new(&base_dir)?;
            newsshare::commands::copy::run(&app, &id, url.as_deref()).await?;
        }

        Commands::Server { port, ip } => {
            let app = newsshare::Newsshare::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            newsshare::server::start(&app, &ip, port).await?;
        }

        Commands::Version => {
            println!("newsshare version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

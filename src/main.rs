//! CLI entry point for blogpage-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blogpage-rs")]
#[command(version)]
#[command(about = "Static blog detail pages rendered from a headless CMS", long_about = None)]
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
    /// Write a default _config.yml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Build every detail page listed by the CMS
    #[command(alias = "g")]
    Generate,

    /// Serve the public folder, building unknown pages on demand
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Skip the initial full build
        #[arg(long)]
        no_build: bool,
    },

    /// Clean the public folder
    Clean,

    /// List CMS content
    List {
        /// Type of content to list (paths, categories)
        #[arg(default_value = "paths")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogpage_rs=debug,info"
    } else {
        "blogpage_rs=info"
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
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            blogpage_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Generate => {
            let site = blogpage_rs::BlogSite::new(&base_dir)?;
            tracing::info!("Generating static files...");
            let count = site.generate().await?;
            println!("Generated {} pages successfully!", count);
        }

        Commands::Server {
            port,
            ip,
            open,
            no_build,
        } => {
            let site = blogpage_rs::BlogSite::new(&base_dir)?;
            let generator = Arc::new(site.generator()?);

            if !no_build {
                tracing::info!("Generating static files...");
                generator.generate().await?;
            }

            tracing::info!("Starting server at http://{}:{}", ip, port);
            blogpage_rs::server::start(
                site.public_dir.clone(),
                &site.config.root,
                generator,
                &ip,
                port,
                open,
            )
            .await?;
        }

        Commands::Clean => {
            let site = blogpage_rs::BlogSite::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = blogpage_rs::BlogSite::new(&base_dir)?;
            blogpage_rs::commands::list::run(&site, &r#type).await?;
        }

        Commands::Version => {
            println!("blogpage-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

//! haft CLI - bundle packaging and publishing
//!
//! Commands:
//! - `haft package` - Build `.axe` bundles from plugin source trees
//! - `haft publish` - Package and record bundles on a registry
//! - `haft inspect` - Show a bundle's stamped manifest and members

use clap::{Parser, Subcommand};

mod inspect;
mod package;
mod publish;
mod summary;

#[derive(Parser)]
#[command(name = "haft")]
#[command(author, version, about = "Packaging tool for haft plugin bundles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build bundles from a plugin source tree
    Package {
        /// Source directory: a single plugin tree, or with --all the
        /// parent directory of several plugin trees
        source: String,

        /// Output directory for built bundles (default: SOURCE)
        destination: Option<String>,

        /// Build every plugin found in SOURCE's subdirectories
        #[arg(short, long)]
        all: bool,

        /// Release build: skip stamping the source revision
        #[arg(short, long)]
        release: bool,

        /// Overwrite existing bundles of the same name and version
        #[arg(short, long)]
        force: bool,
    },

    /// Package bundles and record them on a registry
    Publish {
        /// Source directory: a single plugin tree, or with --all the
        /// parent directory of several plugin trees
        source: String,

        /// Path to the registry configuration file
        #[arg(short, long, default_value = "haft.toml")]
        config: String,

        /// Publish every plugin found in SOURCE's subdirectories
        #[arg(short, long)]
        all: bool,
    },

    /// Show a bundle's stamped manifest and archive members
    Inspect {
        /// Path to a .axe bundle
        bundle: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Package {
            source,
            destination,
            all,
            release,
            force,
        } => {
            package::run(&source, destination.as_deref(), all, release, force)?;
        }
        Commands::Publish {
            source,
            config,
            all,
        } => {
            publish::run(&source, &config, all)?;
        }
        Commands::Inspect { bundle } => {
            inspect::run(&bundle)?;
        }
    }

    Ok(())
}

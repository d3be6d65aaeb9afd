mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "folio",
    about = "Portfolio case-study site: scaffold content, browse the catalog, serve the site",
    version,
    propagate_version = true
)]
struct Cli {
    /// Site root (default: nearest directory containing folio.yaml)
    #[arg(long, global = true, env = "FOLIO_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create folio.yaml and a sample case study
    Init {
        /// Site owner or studio name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Serve the site
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3141")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },

    /// List case studies, optionally filtered
    List {
        /// Only records using this technology (repeatable, comma-separated)
        #[arg(long = "tech", value_name = "TAG")]
        tech: Vec<String>,

        /// Only records in this industry (repeatable, comma-separated)
        #[arg(long = "industry", value_name = "TAG")]
        industry: Vec<String>,
    },

    /// Show one case study
    Show { slug: String },

    /// List the filter values available across the catalog
    Filters,

    /// Inspect the site configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, name.as_deref()),
        Commands::Serve { port, no_open } => cmd::serve::run(&root, port, no_open),
        Commands::List { tech, industry } => cmd::list::run(&root, &tech, &industry, cli.json),
        Commands::Show { slug } => cmd::show::run(&root, &slug, cli.json),
        Commands::Filters => cmd::filters::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

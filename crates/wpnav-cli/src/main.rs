mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "wpnav",
    about = "Headless WordPress navigation: menus, mega menus, and the header built from them",
    version,
    propagate_version = true
)]
struct Cli {
    /// Site root containing wpnav.yaml (default: search upward from cwd)
    #[arg(long, global = true, env = "WPNAV_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default wpnav.yaml
    Init {
        /// Base URL of the WordPress site serving the REST API
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Show or validate wpnav.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Rewrite CMS menu URLs into site-relative paths
    NormalizeUrl {
        /// URLs to normalize
        #[arg(required = true)]
        urls: Vec<String>,
        /// Override urls.base_path from wpnav.yaml
        #[arg(long)]
        base_path: Option<String>,
    },

    /// Find the mega menu a menu item title resolves to
    Match {
        /// Menu item title
        title: String,
        /// Mega menu JSON file (default: fetch from the backend)
        #[arg(long, value_name = "FILE")]
        mega_menus: Option<PathBuf>,
    },

    /// Render a menu tree as text, JSON, or HTML
    Render {
        /// Menu JSON file (default: fetch the whole header from the backend)
        #[arg(long, value_name = "FILE")]
        menu: Option<PathBuf>,
        /// Mega menu JSON file used to resolve triggers
        #[arg(long, value_name = "FILE")]
        mega_menus: Option<PathBuf>,
        /// Never render mega menu triggers
        #[arg(long)]
        suppress_mega: bool,
        /// Emit HTML instead of a text tree
        #[arg(long)]
        html: bool,
    },

    /// Fetch header data from the backend and report what loaded
    Fetch,

    /// Serve the navigation API and HTML fragments
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3180")]
        port: u16,
        /// Don't open a browser
        #[arg(long)]
        no_open: bool,
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
        Commands::Init { api_url } => cmd::init::run(&root, api_url.as_deref()),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::NormalizeUrl { urls, base_path } => {
            cmd::normalize::run(&root, &urls, base_path.as_deref(), cli.json)
        }
        Commands::Match { title, mega_menus } => {
            cmd::match_title::run(&root, &title, mega_menus.as_deref(), cli.json)
        }
        Commands::Render {
            menu,
            mega_menus,
            suppress_mega,
            html,
        } => cmd::render::run(
            &root,
            cmd::render::RenderArgs {
                menu,
                mega_menus,
                suppress_mega,
                html,
            },
            cli.json,
        ),
        Commands::Fetch => cmd::fetch::run(&root, cli.json),
        Commands::Serve { port, no_open } => cmd::serve::run(&root, port, no_open),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

mod cmd;
mod output;
mod root;

use agentic_core::catalog::Catalog;
use agentic_core::ide::IdeSelection;
use clap::{Parser, Subcommand};
use cmd::{settings::SettingsSubcommand, InstallArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agentic",
    about = "Install namespaced agents, skills and workflows into Claude Code and Cursor projects",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .claude/, .cursor/ or .git/)
    #[arg(long, global = true, env = "AGENTIC_ROOT")]
    root: Option<PathBuf>,

    /// Content catalog directory (default: the catalog bundled with this build)
    #[arg(long, global = true, env = "AGENTIC_CATALOG")]
    catalog: Option<PathBuf>,

    /// Output as JSON (list, version)
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install agents, skills and workflows into the project
    Init(InstallArgs),

    /// Reinstall using the settings recorded by a previous install
    Update {
        /// Target IDE: claude, cursor, or both (default: detect)
        #[arg(long)]
        ide: Option<IdeSelection>,

        /// Output folder inside the IDE directory
        #[arg(long)]
        output: Option<String>,
    },

    /// Change recorded settings and reinstall
    Settings {
        #[command(subcommand)]
        subcommand: SettingsSubcommand,
    },

    /// Back up artifacts from un-namespaced installs, then run init
    Migrate(InstallArgs),

    /// Show the installed version per IDE
    Version,

    /// List workflows and the agents and skills they install
    List,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let catalog = Catalog::locate(cli.catalog);

    let result = match cli.command {
        Commands::Init(args) => cmd::init::run(&root, &catalog, &args),
        Commands::Update { ide, output } => cmd::update::run(&root, &catalog, ide, output),
        Commands::Settings { subcommand } => cmd::settings::run(&root, &catalog, subcommand),
        Commands::Migrate(args) => cmd::migrate::run(&root, &catalog, &args),
        Commands::Version => cmd::version::run(&root, cli.json),
        Commands::List => cmd::list::run(&catalog, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    countdown, faq, init, set, show, CountdownArgs, FaqArgs, InitArgs, SetArgs, ShowArgs,
    Workspace,
};
use config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Weddingsite CLI - edit a wedding microsite from the terminal
#[derive(Parser, Debug)]
#[command(name = "weddingsite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data directory (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new site
    Init(InitArgs),

    /// Print a site's content
    Show(ShowArgs),

    /// Edit one attribute in place
    Set(SetArgs),

    /// Manage frequently asked questions
    Faq(FaqArgs),

    /// Live countdown to the ceremony
    Countdown(CountdownArgs),
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    let mut config = Config::load(&cwd)?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let workspace = Workspace::open(&cwd, config);
    info!(
        command = ?cli.command,
        data_dir = %workspace.gateway.dir().display(),
        "Running command"
    );

    match cli.command {
        Command::Init(args) => init(args, &cwd, &workspace).await,
        Command::Show(args) => show(args, &workspace).await,
        Command::Set(args) => set(args, &workspace).await,
        Command::Faq(args) => faq(args, &workspace).await,
        Command::Countdown(args) => countdown(args, &workspace).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

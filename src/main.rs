use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use deben::cli::{
    expand_bare_amount, handle_ledger_command, CommandContext, LedgerCommands, LICENSE_MESSAGE,
};
use deben::config::{paths::DebenPaths, settings::Settings};
use deben::display::Style;
use deben::models::SystemClock;
use deben::storage::Listing;

#[derive(Parser)]
#[command(
    name = "deben",
    version,
    about = "Keep track of your personal expenses from the terminal",
    long_about = "Deben records income and expenses in a plain text ledger, \
                  shows running totals, lists recent operations month by month \
                  and charts the last months."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<LedgerCommands>,

    /// Ledger file to use
    #[arg(short, long, env = "DEBEN_FILE", global = true)]
    path: Option<PathBuf>,

    /// Plain output: bordered tables without colours
    #[arg(long, visible_alias = "nc", global = true)]
    no_color: bool,

    /// Display the license message
    #[arg(long)]
    license: bool,

    /// Log what happens to the ledger
    #[arg(long, global = true)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "deben=debug" } else { "deben=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(expand_bare_amount(std::env::args_os()));
    init_tracing(cli.verbose);

    if cli.license {
        println!("{}", LICENSE_MESSAGE);
        return Ok(());
    }

    // Initialize paths and settings
    let paths = DebenPaths::new()?;
    let settings = Settings::load_or_default(&paths)?;
    let style = Style::detect(cli.no_color || !settings.color);

    let clock = SystemClock;
    let ledger_path = settings.resolve_ledger(cli.path, &paths);
    let mut listing = Listing::load(ledger_path, &clock);

    let ctx = CommandContext {
        paths: &paths,
        settings: &settings,
        style,
        clock: &clock,
    };
    let output = handle_ledger_command(&mut listing, cli.command, &ctx)?;
    print!("{}", output);

    listing.save()?;
    Ok(())
}

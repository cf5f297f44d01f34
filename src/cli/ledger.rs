//! Ledger CLI commands
//!
//! Each command runs against a loaded [`Listing`] and returns the text to
//! print. Saving is left to the caller.

use std::ffi::OsString;

use clap::Subcommand;
use tracing::{debug, info};

use crate::config::{DebenPaths, Settings};
use crate::display::{format_graph, format_list, format_totals, Style};
use crate::error::{DebenError, DebenResult};
use crate::models::{Amount, Clock};
use crate::storage::Listing;

/// Ledger subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommands {
    /// Add an operation: [+|-]amount [label...] [dd[/mm[/yyyy]]]
    #[command(alias = "a")]
    Add {
        /// Amount, label words and date; unsigned amounts are expenses
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Remove the operation at an index (the last one by default)
    #[command(alias = "d")]
    Delete {
        /// Index shown by `list`; negative means the last operation
        #[arg(allow_negative_numbers = true, default_value_t = -1)]
        index: i64,
    },

    /// List the last operations grouped by month
    #[command(alias = "l")]
    List {
        /// Number of operations (0 or less shows everything)
        #[arg(allow_negative_numbers = true)]
        count: Option<i64>,
    },

    /// Chart the totals of the last months
    #[command(alias = "g")]
    Graph {
        /// Number of months, ending with the current one
        #[arg(allow_negative_numbers = true)]
        months: Option<i64>,
        /// Number of chart rows
        height: Option<usize>,
    },

    /// Show current configuration and paths
    Config,

    /// A bare amount adds an operation: `deben 12.5 coffee 3/10`
    #[command(external_subcommand)]
    Bare(Vec<String>),
}

/// Everything a command needs besides the ledger itself
pub struct CommandContext<'a> {
    pub paths: &'a DebenPaths,
    pub settings: &'a Settings,
    pub style: Style,
    pub clock: &'a dyn Clock,
}

/// Handle a ledger command, or show the totals when there is none
pub fn handle_ledger_command(
    listing: &mut Listing,
    cmd: Option<LedgerCommands>,
    ctx: &CommandContext<'_>,
) -> DebenResult<String> {
    let style = &ctx.style;

    let output = match cmd {
        None => format_totals(&listing.totals(), true, style),

        Some(LedgerCommands::Add { tokens }) => add(listing, &tokens, ctx),

        Some(LedgerCommands::Bare(tokens)) => {
            let first = tokens.first().map(String::as_str).unwrap_or_default();
            if !is_amount(first) {
                return Err(DebenError::Validation(format!(
                    "Unknown command '{}'. Run 'deben --help' for usage information.",
                    first
                )));
            }
            add(listing, &tokens, ctx)
        }

        Some(LedgerCommands::Delete { index }) => {
            if let Some(removed) = listing.remove_operation(index) {
                info!("Removed operation: {}", removed.to_record());
            }
            format_totals(&listing.totals(), true, style)
        }

        Some(LedgerCommands::List { count }) => {
            let count = count.unwrap_or(ctx.settings.list_count);
            let mut output = format_list(listing.operations(count), listing.count(), style);
            output.push_str(&format_totals(&listing.totals(), false, style));
            output
        }

        Some(LedgerCommands::Graph { months, height }) => {
            let months = months.unwrap_or(ctx.settings.graph_months);
            let height = height.unwrap_or(ctx.settings.graph_height);
            let month_totals = listing.month_totals(months, ctx.clock);
            format_graph(
                &month_totals,
                &listing.totals(),
                height,
                ctx.clock.today(),
                style,
            )
        }

        Some(LedgerCommands::Config) => format_config(listing, ctx),
    };

    Ok(output)
}

fn add(listing: &mut Listing, tokens: &[String], ctx: &CommandContext<'_>) -> String {
    if let Some(added) = listing.add_operation(tokens, ctx.clock) {
        info!("Added operation: {}", added.to_record());
    }
    format_totals(&listing.totals(), true, &ctx.style)
}

/// Whether a token can start a bare `add`
fn is_amount(token: &str) -> bool {
    token.bytes().any(|b| b.is_ascii_digit()) && Amount::parse(token).is_ok()
}

/// Insert `add` before a leading negative amount
///
/// `deben -5 lunch` would otherwise be read as an unknown `-5` flag. Only the
/// first positional argument is considered, so `delete -1` is left alone.
pub fn expand_bare_amount<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    let mut position = 1;
    while let Some(arg) = args.get(position) {
        let Some(text) = arg.to_str() else {
            break;
        };
        if text.starts_with('-') && is_amount(text) {
            args.insert(position, OsString::from("add"));
            break;
        }
        if text == "--" || !text.starts_with('-') {
            break;
        }
        // These options take their value as the next argument.
        position += if text == "-p" || text == "--path" { 2 } else { 1 };
    }
    args
}

fn format_config(listing: &Listing, ctx: &CommandContext<'_>) -> String {
    let settings = ctx.settings;
    debug!("Reporting configuration from {}", ctx.paths.base_dir().display());

    let mut output = String::new();
    output.push_str("Deben Configuration\n");
    output.push_str("===================\n");
    output.push_str(&format!(
        "Config directory: {}\n",
        ctx.paths.base_dir().display()
    ));
    output.push_str(&format!(
        "Settings file:    {}\n",
        ctx.paths.settings_file().display()
    ));
    output.push_str(&format!(
        "Ledger file:      {} ({} operations)\n",
        listing.path().display(),
        listing.count()
    ));
    output.push('\n');
    output.push_str("Settings:\n");
    output.push_str(&format!("  List count:   {}\n", settings.list_count));
    output.push_str(&format!("  Graph months: {}\n", settings.graph_months));
    output.push_str(&format!("  Graph height: {}\n", settings.graph_height));
    output.push_str(&format!("  Colors:       {}\n", settings.color));
    output
}

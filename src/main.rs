use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use splitbook::cli::{
    handle_balance_command, handle_balances_command, handle_check_command, handle_settle_command,
    handle_simplify_command, BalancesArgs, SettleArgs, SnapshotArgs,
};
use splitbook::config::{paths::SplitbookPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "splitbook",
    version,
    about = "Shared-expense ledger: net balances and debt simplification",
    long_about = "Splitbook reads a journal of who owes whom, computes each \
                  participant's net balance, and reduces the web of debts to \
                  a short list of transfers that settles the group."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Net balance of every participant
    Balances(BalancesArgs),

    /// Net balance of one participant
    Balance {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Participant id (e.g. "3" or "user-3")
        participant: String,
    },

    /// Balances plus the transfers that settle them
    Settle(SettleArgs),

    /// Settlement plan for a balances file
    Simplify {
        /// JSON object of participant id to balance
        file: PathBuf,
        /// Output format (table, json, csv)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Validate a journal and verify its settlement plan
    Check {
        #[command(flatten)]
        snapshot: SnapshotArgs,
    },

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    splitbook::logging::init(cli.verbose);

    let paths = SplitbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Balances(args)) => {
            handle_balances_command(&settings, args, &mut out)?;
        }
        Some(Commands::Balance {
            snapshot,
            participant,
        }) => {
            handle_balance_command(&settings, snapshot, &participant, &mut out)?;
        }
        Some(Commands::Settle(args)) => {
            handle_settle_command(&settings, args, &mut out)?;
        }
        Some(Commands::Simplify { file, format }) => {
            handle_simplify_command(&settings, &file, format.as_deref(), &mut out)?;
        }
        Some(Commands::Check { snapshot }) => {
            handle_check_command(snapshot, &mut out)?;
        }
        Some(Commands::Init) => {
            writeln!(out, "Initializing Splitbook at: {}", paths.base_dir().display())?;
            settings.save(&paths)?;
            writeln!(out, "Settings written to {}", paths.settings_file().display())?;
        }
        Some(Commands::Config) => {
            writeln!(out, "Splitbook Configuration")?;
            writeln!(out, "=======================")?;
            writeln!(out, "Config directory: {}", paths.base_dir().display())?;
            writeln!(out, "Settings file:    {}", paths.settings_file().display())?;
            writeln!(out, "Initialized:      {}", paths.is_initialized())?;
            writeln!(out)?;
            writeln!(out, "Settings:")?;
            writeln!(out, "  Currency symbol:   {}", settings.currency_symbol)?;
            writeln!(out, "  Output format:     {}", settings.output_format)?;
            writeln!(out, "  Detailed balances: {}", settings.detailed_balances)?;
        }
        None => {
            writeln!(out, "Splitbook - shared-expense ledger")?;
            writeln!(out)?;
            writeln!(out, "Run 'splitbook --help' for usage information.")?;
        }
    }

    Ok(())
}

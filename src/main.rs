use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use village::cli::{
    handle_audit_command, handle_balance_command, handle_favor_command, handle_login,
    handle_logout, handle_member_command, BalanceCommands, FavorCommands, MemberCommands,
};
use village::config::{paths::DATA_DIR_ENV, Settings, VillagePaths};
use village::storage::Storage;

#[derive(Parser)]
#[command(
    name = "village",
    version,
    about = "Track time-favors traded within a circle of neighbours",
    long_about = "village keeps a ledger of time given and received between members \
                  of a small circle and tells any two of them who owes whom, in minutes."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the ledger in the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Sign in as a member on this device
    Login {
        /// Member name or ID
        member: String,
    },

    /// Sign out on this device
    Logout,

    /// Member management commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Record, list and export favors
    #[command(subcommand)]
    Favor(FavorCommands),

    /// Who owes whom
    #[command(subcommand)]
    Balance(BalanceCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = VillagePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            let already = paths.is_initialized();
            storage.save_all()?;
            settings.save(&paths)?;
            if already {
                println!("Ledger already initialized at: {}", paths.base_dir().display());
            } else {
                println!("Initialized ledger at: {}", paths.base_dir().display());
                println!();
                println!("Next steps:");
                println!("  village member add <name>");
                println!("  village login <name>");
            }
        }
        Some(Commands::Config) => {
            println!("Village Configuration");
            println!("=====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("(override with {})", DATA_DIR_ENV);
            println!();
            println!("Settings:");
            match &settings.current_member {
                Some(member) => println!("  Signed in as:   {}", member),
                None => println!("  Signed in as:   (nobody)"),
            }
            println!("  Duration style: {:?}", settings.duration_style);
            println!("  List limit:     {}", settings.list_limit);
        }
        Some(Commands::Login { member }) => {
            handle_login(&storage, &paths, &mut settings, &member)?;
        }
        Some(Commands::Logout) => {
            handle_logout(&paths, &mut settings)?;
        }
        Some(Commands::Member(cmd)) => {
            handle_member_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Favor(cmd)) => {
            handle_favor_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Balance(cmd)) => {
            handle_balance_command(&storage, &settings, settings.duration_style, cmd)?;
        }
        Some(Commands::Audit { count }) => {
            handle_audit_command(&storage, count)?;
        }
        None => {
            println!("village - a time-favor ledger for small circles");
            println!();
            println!("Run 'village --help' for usage information.");
        }
    }

    Ok(())
}

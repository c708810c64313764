mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    client::ClientSubcommand, config::ConfigSubcommand, request::RequestSubcommand,
    reservation::ReservationSubcommand, room::RoomSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hotel",
    about = "Hotel front desk: booking requests, reservations, and guest lookups by cedula",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data root (default: auto-detect from .hotel/)
    #[arg(long, global = true, env = "HOTEL_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the .hotel/ directory, config and empty collections
    Init {
        /// Hotel name shown in listings (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Show every reservation and booking request filed under a cedula
    Lookup {
        /// 10-digit national ID
        cedula: String,

        /// Skip the configured "searching" pause
        #[arg(long)]
        no_delay: bool,
    },

    /// Submit and list booking requests from guests
    Request {
        #[command(subcommand)]
        subcommand: RequestSubcommand,
    },

    /// Manage administration reservations
    Reservation {
        #[command(subcommand)]
        subcommand: ReservationSubcommand,
    },

    /// Manage rooms
    Room {
        #[command(subcommand)]
        subcommand: RoomSubcommand,
    },

    /// Manage clients
    Client {
        #[command(subcommand)]
        subcommand: ClientSubcommand,
    },

    /// Occupancy and reservation statistics
    Dashboard,

    /// Inspect and validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
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

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, name.as_deref()),
        Commands::Lookup { cedula, no_delay } => cmd::lookup::run(&root, &cedula, no_delay, cli.json),
        Commands::Request { subcommand } => cmd::request::run(&root, subcommand, cli.json),
        Commands::Reservation { subcommand } => cmd::reservation::run(&root, subcommand, cli.json),
        Commands::Room { subcommand } => cmd::room::run(&root, subcommand, cli.json),
        Commands::Client { subcommand } => cmd::client::run(&root, subcommand, cli.json),
        Commands::Dashboard => cmd::dashboard::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

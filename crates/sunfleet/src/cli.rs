//! Clap derive structures for the `sunfleet` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sunfleet -- inspect and simulate the Sunshine Rides fleet
#[derive(Debug, Parser)]
#[command(
    name = "sunfleet",
    version,
    about = "Inspect and simulate the Sunshine Rides fleet from the command line",
    long_about = "Browse the mock Sunshine Rides fleet (vehicles, drivers, alerts,\n\
        trips, maintenance) and run the telemetry simulator headlessly.\n\n\
        All data is simulated; nothing talks to a real telematics backend.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format [default: table, or `defaults.output` from config]
    #[arg(long, short = 'o', env = "SUNFLEET_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto, or `defaults.color` from config]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Config file to use instead of the platform default
    #[arg(long, env = "SUNFLEET_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalOpts {
    pub fn output(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }

    pub fn color(&self) -> ColorMode {
        self.color.clone().unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse fleet vehicles
    #[command(alias = "veh", alias = "v")]
    Vehicles(VehiclesArgs),

    /// Browse drivers
    #[command(alias = "drv")]
    Drivers(DriversArgs),

    /// Browse fleet alerts
    #[command(alias = "al")]
    Alerts(AlertsArgs),

    /// Browse recent trips
    Trips(TripsArgs),

    /// Browse the maintenance schedule
    #[command(alias = "maint")]
    Maintenance(MaintenanceArgs),

    /// Show fleet headline metrics
    Summary,

    /// Run the telemetry simulator headlessly for a number of ticks
    #[command(alias = "sim")]
    Simulate(SimulateArgs),

    /// Send a (simulated) contact request
    Contact(ContactArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VEHICLES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VehiclesArgs {
    #[command(subcommand)]
    pub command: VehiclesCommand,
}

#[derive(Debug, Subcommand)]
pub enum VehiclesCommand {
    /// List vehicles
    #[command(alias = "ls")]
    List(VehicleListArgs),

    /// Get vehicle details
    Get {
        /// Vehicle ID (e.g. vehicle-1) or license plate
        vehicle: String,
    },
}

#[derive(Debug, Args)]
pub struct VehicleListArgs {
    /// Only vehicles in this status (active, idle, maintenance, offline)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Only vehicles of this kind (van, sedan, accessible)
    #[arg(long, short = 'k')]
    pub kind: Option<String>,

    /// Case-insensitive search over name, plate and address
    #[arg(long, short = 'f')]
    pub search: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DRIVERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DriversArgs {
    #[command(subcommand)]
    pub command: DriversCommand,
}

#[derive(Debug, Subcommand)]
pub enum DriversCommand {
    /// List drivers
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ALERTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List alerts, newest first
    #[command(alias = "ls")]
    List {
        /// Only alerts nobody has acknowledged yet
        #[arg(long, short = 'u')]
        unacknowledged: bool,

        /// Only alerts of this severity (low, medium, high)
        #[arg(long, short = 's')]
        severity: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TRIPS / MAINTENANCE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TripsArgs {
    #[command(subcommand)]
    pub command: TripsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TripsCommand {
    /// List recent trips
    #[command(alias = "ls")]
    List,
}

#[derive(Debug, Args)]
pub struct MaintenanceArgs {
    #[command(subcommand)]
    pub command: MaintenanceCommand,
}

#[derive(Debug, Subcommand)]
pub enum MaintenanceCommand {
    /// List scheduled, completed and overdue maintenance
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SIMULATE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Number of ticks to apply
    #[arg(long, short = 'n', default_value = "10")]
    pub ticks: u32,

    /// RNG seed; identical seeds give identical runs [default: `simulation.seed`]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start time (RFC 3339) for the fleet and tick stamps [default: now]
    #[arg(long, value_name = "TIMESTAMP")]
    pub at: Option<String>,

    /// What to print once the run completes
    #[arg(long, value_enum, default_value = "summary")]
    pub show: SimulateView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SimulateView {
    /// Final vehicle telemetry
    Vehicles,
    /// Final alert list
    Alerts,
    /// Headline metrics plus the alerts raised during the run
    Summary,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONTACT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[command(subcommand)]
    pub command: ContactCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit a contact request (simulated, nothing is sent)
    Submit {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,

        /// Service of interest (local, medical, airport, long-distance,
        /// wheelchair, medicaid, other)
        #[arg(long)]
        service: Option<String>,

        /// Simulated network delay in milliseconds [default: `contact.submit_delay_ms`]
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Show phone, email, service areas and business hours
    Info,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

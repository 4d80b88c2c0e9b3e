//! Clap derive structures for the `stufa` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// stufa -- command-line control for Total Control pellet stoves
#[derive(Debug, Parser)]
#[command(
    name = "stufa",
    version,
    about = "Control Extraflame pellet stoves from the command line",
    long_about = "Talks to the Total Control cloud portal: lists the stoves on your\n\
        account, reads their registers, and writes settable parameters.\n\n\
        Writes are eventually consistent -- the portal forwards them to the\n\
        stove over its radio link, so a new value only shows up on a later poll.",
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
    /// Portal account email
    #[arg(long, short = 'e', env = "STUFA_EMAIL", global = true)]
    pub email: Option<String>,

    /// Portal account password
    #[arg(long, env = "STUFA_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Installation id sent with the login (a stable UUID)
    #[arg(long, env = "STUFA_UUID", global = true)]
    pub uuid: Option<String>,

    /// Portal base URL (override for testing)
    #[arg(long, env = "STUFA_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STUFA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "STUFA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the stoves on the account
    #[command(alias = "dev", alias = "ls")]
    Devices,

    /// Print the static register catalog (works offline)
    #[command(alias = "regs")]
    Registers,

    /// Fetch and print every register of one stove
    Status(StatusArgs),

    /// Read a single register
    Get(GetArgs),

    /// Write a settable register
    Set(SetArgs),

    /// Poll the account and print register changes as they happen
    Watch(WatchArgs),
}

// ── Command Arguments ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Stove serial number or MAC (optional when the account has one stove)
    pub device: Option<String>,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Register key, e.g. `target-power`
    pub register: String,

    /// Stove serial number or MAC (optional when the account has one stove)
    pub device: Option<String>,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Register key, e.g. `target-power`
    pub register: String,

    /// New value: a number, or an enumeration label with --label
    pub value: String,

    /// Stove serial number or MAC (optional when the account has one stove)
    pub device: Option<String>,

    /// Interpret VALUE as an enumeration label (e.g. `On`)
    #[arg(long, short = 'l')]
    pub label: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Stove serial number or MAC (default: every stove on the account)
    pub device: Option<String>,

    /// Polling interval
    #[arg(long, short = 'i', default_value = "60s")]
    pub interval: humantime::Duration,
}

//! Clap derive structures for the `gamctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! This module depends only on clap + clap_complete so build.rs can
//! include it directly for man-page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// gamctl -- administrative console for GAM access networks
#[derive(Debug, Parser)]
#[command(
    name = "gamctl",
    version,
    about = "Manage GAM access-network devices from the command line",
    long_about = "An administrative console for GAM (Gigabit Access Multiplexer)\n\
        management servers: devices, subscribers, bandwidth profiles,\n\
        alarms, firmware, operator accounts, and configuration backups.",
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
    /// Server profile to use
    #[arg(long, short = 'p', env = "GAM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Management server URL (overrides profile)
    #[arg(long, short = 's', env = "GAM_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GAM_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "GAM_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "GAM_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
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

#[derive(Debug, Clone, ValueEnum)]
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
    /// Log in and persist the session
    Login(LoginArgs),

    /// End the current session
    Logout,

    /// Manage GAM devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Manage subscribers
    #[command(alias = "sub")]
    Subscribers(SubscribersArgs),

    /// Manage bandwidth profiles
    #[command(alias = "bw")]
    Bandwidths(BandwidthsArgs),

    /// View and work alarms
    Alarms(AlarmsArgs),

    /// Manage operator accounts
    Users(UsersArgs),

    /// Manage firmware images
    #[command(alias = "fw")]
    Firmware(FirmwareArgs),

    /// Manage device configuration backups
    Backups(BackupsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Shared pagination, search, and column arguments for list commands.
#[derive(Debug, Args)]
pub struct ListOpts {
    /// Page to display (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Rows per page (10, 20, 50, 100, or 500)
    #[arg(long, default_value = "20")]
    pub page_size: u32,

    /// Free-text search
    #[arg(long, short = 'S')]
    pub search: Option<String>,

    /// Comma-separated column ids to display (see --help for each list)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (defaults to the profile's configured username)
    #[arg(long, short = 'u')]
    pub username: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListOpts,

        /// Only online (or only offline) devices
        #[arg(long)]
        online: Option<bool>,

        /// Download the filtered set as CSV instead of rendering
        #[arg(long)]
        export: bool,
    },

    /// Show one device, optionally a specific detail tab
    Show {
        /// Device id
        id: i64,

        /// Detail tab to fetch
        #[arg(long, default_value = "summary")]
        tab: DeviceTab,
    },

    /// Discover and register a device by management IP
    Add {
        /// Management IP address
        #[arg(long)]
        ip: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,
    },

    /// Update device settings
    Set {
        /// Device id
        id: i64,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Management IP address
        #[arg(long)]
        ip: Option<String>,

        /// Mark the device read-only (true/false)
        #[arg(long)]
        read_only: Option<bool>,
    },

    /// Remove a device (cascades to its subscribers and endpoints)
    #[command(alias = "rm")]
    Remove {
        /// Device id
        id: i64,
    },

    /// Push pending configuration to the device
    Sync {
        /// Device id
        id: i64,
    },

    /// Reboot the device
    Reboot {
        /// Device id
        id: i64,
    },

    /// Provision all unprovisioned endpoints on the device
    Provision {
        /// Device id
        id: i64,
    },

    /// Trigger a configuration backup on the device
    Backup {
        /// Device id
        id: i64,
    },
}

/// Device detail tabs, each fetched lazily on selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeviceTab {
    /// Device identity and state
    Summary,
    /// Physical ports with SFP metadata
    Ports,
    /// Attached endpoints with provisioning status
    Endpoints,
    /// Subscribers on this device
    Subscribers,
    /// Bandwidth profiles scoped to this device
    Bandwidths,
    /// Configuration backups
    Backups,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SUBSCRIBERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SubscribersArgs {
    #[command(subcommand)]
    pub command: SubscribersCommand,
}

#[derive(Debug, Subcommand)]
pub enum SubscribersCommand {
    /// List subscribers
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListOpts,

        /// Restrict to one device
        #[arg(long)]
        device: Option<i64>,

        /// Download the filtered set as CSV instead of rendering
        #[arg(long)]
        export: bool,
    },

    /// Show one subscriber
    Show {
        /// Subscriber id
        id: i64,
    },

    /// Create a subscriber
    Add {
        /// Owning device id
        #[arg(long)]
        device: i64,

        /// Subscriber name
        #[arg(long)]
        name: String,

        /// Port 1 VLAN id
        #[arg(long)]
        port1_vlan: Option<u16>,

        /// Port 1 tagged
        #[arg(long)]
        port1_tagged: bool,

        /// Port 2 VLAN id
        #[arg(long)]
        port2_vlan: Option<u16>,

        /// Port 2 tagged
        #[arg(long)]
        port2_tagged: bool,

        /// Trunk mode (all VLANs)
        #[arg(long)]
        trunk: bool,

        /// Bandwidth profile id
        #[arg(long)]
        bandwidth: Option<i64>,
    },

    /// Update a subscriber
    Set {
        /// Subscriber id
        id: i64,

        /// Subscriber name
        #[arg(long)]
        name: Option<String>,

        /// Port 1 VLAN id
        #[arg(long)]
        port1_vlan: Option<u16>,

        /// Port 1 tagged (true/false)
        #[arg(long)]
        port1_tagged: Option<bool>,

        /// Port 2 VLAN id
        #[arg(long)]
        port2_vlan: Option<u16>,

        /// Port 2 tagged (true/false)
        #[arg(long)]
        port2_tagged: Option<bool>,

        /// Trunk mode (true/false)
        #[arg(long)]
        trunk: Option<bool>,

        /// Bandwidth profile id
        #[arg(long)]
        bandwidth: Option<i64>,
    },

    /// Remove a subscriber
    #[command(alias = "rm")]
    Remove {
        /// Subscriber id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BANDWIDTH PROFILES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BandwidthsArgs {
    #[command(subcommand)]
    pub command: BandwidthsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BandwidthsCommand {
    /// List bandwidth profiles
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListOpts,

        /// Restrict to one device
        #[arg(long)]
        device: Option<i64>,
    },

    /// Show one bandwidth profile
    Show {
        /// Profile id
        id: i64,
    },

    /// Create a bandwidth profile
    Add {
        /// Profile name
        #[arg(long)]
        name: String,

        /// Downstream rate in Mbit/s
        #[arg(long)]
        down: u32,

        /// Upstream rate in Mbit/s
        #[arg(long)]
        up: u32,

        /// Device to scope the profile to (defaults to the first device)
        #[arg(long)]
        device: Option<i64>,
    },

    /// Update a bandwidth profile
    Set {
        /// Profile id
        id: i64,

        /// Profile name
        #[arg(long)]
        name: Option<String>,

        /// Downstream rate in Mbit/s
        #[arg(long)]
        down: Option<u32>,

        /// Upstream rate in Mbit/s
        #[arg(long)]
        up: Option<u32>,
    },

    /// Remove a bandwidth profile
    #[command(alias = "rm")]
    Remove {
        /// Profile id
        id: i64,
    },

    /// Push the profile's rates down to its device
    Push {
        /// Profile id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ALARMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AlarmsArgs {
    #[command(subcommand)]
    pub command: AlarmsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlarmsCommand {
    /// List alarms
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListOpts,

        /// Only active (unclosed) alarms
        #[arg(long)]
        active: bool,

        /// Filter by severity (CR, MJ, MN, NA)
        #[arg(long)]
        severity: Option<String>,

        /// Restrict to one device
        #[arg(long)]
        device: Option<i64>,

        /// Download the filtered set as CSV instead of rendering
        #[arg(long)]
        export: bool,
    },

    /// Show active alarm counts per severity
    Counts {
        /// Keep polling and reprint on change
        #[arg(long)]
        watch: bool,

        /// Poll interval in seconds (with --watch)
        #[arg(long, default_value = "60")]
        interval: u64,
    },

    /// Acknowledge an alarm
    Ack {
        /// Alarm id
        id: i64,
    },

    /// Close an alarm (terminal -- cannot be reopened)
    Close {
        /// Alarm id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List operator accounts
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListOpts,
    },

    /// Show one account
    Show {
        /// User id
        id: i64,
    },

    /// Create an account (prompts for the password)
    Add {
        /// Username (immutable after creation)
        #[arg(long)]
        username: String,

        /// Privilege level 0-15
        #[arg(long, default_value = "1")]
        privilege: u8,

        /// Session timeout in seconds
        #[arg(long)]
        session_timeout: Option<u32>,

        /// Create the account disabled
        #[arg(long)]
        disabled: bool,
    },

    /// Update an account
    Set {
        /// User id
        id: i64,

        /// Privilege level 0-15
        #[arg(long)]
        privilege: Option<u8>,

        /// Enable or disable the account (true/false)
        #[arg(long)]
        enabled: Option<bool>,

        /// Session timeout in seconds
        #[arg(long)]
        session_timeout: Option<u32>,

        /// Prompt for a new password
        #[arg(long)]
        password: bool,
    },

    /// Remove an account
    #[command(alias = "rm")]
    Remove {
        /// User id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FIRMWARE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FirmwareArgs {
    #[command(subcommand)]
    pub command: FirmwareCommand,
}

#[derive(Debug, Subcommand)]
pub enum FirmwareCommand {
    /// List firmware images
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListOpts,

        /// Filter by technology (mimo, coax)
        #[arg(long)]
        technology: Option<String>,
    },

    /// Upload a firmware image with its side files
    Upload {
        /// Firmware image file
        #[arg(long)]
        image: Option<PathBuf>,

        /// Manifest file (provides version/revision/technology)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Checksum file
        #[arg(long)]
        checksum: Option<PathBuf>,

        /// Signature file
        #[arg(long)]
        signature: Option<PathBuf>,
    },

    /// Designate an image as the baseline for its technology
    Baseline {
        /// Firmware image id
        id: i64,
    },

    /// Remove a firmware image (the current baseline cannot be removed)
    #[command(alias = "rm")]
    Remove {
        /// Firmware image id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BACKUPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BackupsArgs {
    #[command(subcommand)]
    pub command: BackupsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BackupsCommand {
    /// List backups for a device
    #[command(alias = "ls")]
    List {
        /// Device id
        #[arg(long)]
        device: i64,
    },

    /// Download a backup's content
    Download {
        /// Backup id
        id: i64,

        /// Output file (defaults to a date-stamped name)
        #[arg(long, short = 'O')]
        output: Option<PathBuf>,
    },

    /// Restore a backup onto its device
    Restore {
        /// Backup id
        id: i64,
    },

    /// Remove a backup
    #[command(alias = "rm")]
    Remove {
        /// Backup id
        id: i64,
    },
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
    /// Interactively create or update a profile
    Init,

    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Store a profile's password in the system keyring
    SetPassword,

    /// List configured profiles
    Profiles,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

//! Clap derive structures for the `edgely` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// edgely -- manage Ubiquiti EdgeOS routers from the command line
#[derive(Debug, Parser)]
#[command(
    name = "edgely",
    version,
    about = "Manage EdgeOS routers from the command line",
    long_about = "A CLI for administering Ubiquiti EdgeOS routers over their\n\
        session-based management API: configuration tree reads and writes,\n\
        system operations, and session keep-alive.",
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
    /// Router profile to use
    #[arg(long, short = 'p', env = "EDGELY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Router URL (overrides profile)
    #[arg(long, short = 'r', env = "EDGELY_ROUTER", global = true)]
    pub router: Option<String>,

    /// Login username
    #[arg(long, short = 'u', env = "EDGELY_USERNAME", global = true)]
    pub username: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "EDGELY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "EDGELY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format for configuration data
    #[arg(
        long,
        short = 'o',
        env = "EDGELY_OUTPUT",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// How configuration data is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON for reading
    Pretty,
    /// Compact JSON for piping
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read or modify the configuration tree
    #[command(subcommand)]
    Config(ConfigCmd),

    /// Run a system operation on the router
    #[command(subcommand)]
    Op(OpCmd),

    /// Send a single keep-alive heartbeat
    Heartbeat,

    /// Manage local router profiles
    #[command(subcommand)]
    Profile(ProfileCmd),

    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCmd {
    /// Print the whole configuration tree
    Show,

    /// Print the subtree at PATH (space-separated segments)
    Tree {
        /// Configuration path segments, e.g. `firewall group address-group`
        path: Vec<String>,
    },

    /// Sparse fetch using a JSON skeleton
    Partial {
        /// JSON skeleton naming the nodes to fetch
        skeleton: String,
    },

    /// Write configuration nodes from a JSON document
    Set {
        /// JSON document of nodes to set
        document: String,
    },

    /// Delete configuration nodes named by a JSON document
    Delete {
        /// JSON document of nodes to delete
        document: String,
    },

    /// Apply a batch file of `{op, path, value}` entries in one commit
    Batch {
        /// Path to a JSON file holding an array of batch entries
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum OpCmd {
    /// Reboot the router
    Reboot,

    /// Power the router down
    Shutdown,

    /// Reset the configuration to factory defaults
    FactoryReset {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },

    /// Release the DHCP lease on an interface
    DhcpRelease {
        /// Interface name, e.g. `eth0`
        interface: String,
    },

    /// Renew the DHCP lease on an interface
    DhcpRenew {
        /// Interface name, e.g. `eth0`
        interface: String,
    },

    /// Clear accumulated traffic-analysis counters
    ClearTraffic,

    /// Refresh the router's latest-firmware status
    CheckFirmware,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCmd {
    /// List configured profiles
    List,

    /// Create or update a profile from the global connection flags
    ///
    /// Stores the values given via `--router`, `--username`,
    /// `--insecure`, and `--timeout`. Passwords are never written.
    Set {
        /// Profile name
        name: String,

        /// Make this the default profile
        #[arg(long)]
        default: bool,
    },

    /// Print the configuration file path
    Path,
}

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about="Manage Fox IP allowlist environments.", long_about = None)]
pub struct Args {
    /// Fox service base address (default: $FOX_ADDRESS)
    #[arg(short = 'a', long, global = true)]
    pub address: Option<String>,

    /// Request timeout in seconds (default: $FOX_TIMEOUT or 10)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Log raw requests and responses
    #[arg(long, global = true)]
    pub trace: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub output: OutputFormat,

    /// Save the resulting env records to a CSV file
    #[arg(long = "csv", global = true)]
    pub csv_file: Option<PathBuf>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the service answers
    Ping,

    /// Show one env
    Env {
        /// Env name
        id: String,
    },

    /// Show the envs tagged with a group
    Group {
        /// Group name
        group: String,
    },

    /// Show every env
    All,

    /// Create an env
    Create {
        /// Env name
        env: String,

        /// Group to tag the env with (repeatable or comma-separated)
        #[arg(short = 'g', long = "group", value_delimiter = ',')]
        groups: Vec<String>,

        /// CIDR to allow (repeatable or comma-separated)
        #[arg(short = 'c', long = "cidr", value_delimiter = ',')]
        cidrs: Vec<String>,
    },

    /// Replace the groups and/or CIDRs of an env; omitted lists are kept
    Update {
        /// Env name
        env: String,

        /// Group to tag the env with (repeatable or comma-separated)
        #[arg(short = 'g', long = "group", value_delimiter = ',')]
        groups: Option<Vec<String>>,

        /// CIDR to allow (repeatable or comma-separated)
        #[arg(short = 'c', long = "cidr", value_delimiter = ',')]
        cidrs: Option<Vec<String>>,
    },

    /// Delete an env
    Delete {
        /// Env name
        env: String,
    },
}

/// How env records are printed.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table of envs
    #[default]
    Table,

    /// Pretty-printed JSON state
    Json,

    /// List of (RFC4632) CIDR-format prefixes
    Cidr,

    /// List of IP networks in network mask format (n.n.n.n m.m.m.m)
    Netmask,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

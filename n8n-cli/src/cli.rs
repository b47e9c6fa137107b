//! Command-line definitions.

use crate::config::CONFIG_PATH_ENV;
use crate::output::OutputFormat;
use clap::{ArgGroup, Parser, Subcommand};
use n8n_client::{DEFAULT_EXECUTION_LIMIT, ExecutionStatus};
use std::path::PathBuf;

/// n8n CLI - manage workflows, executions and credentials of an n8n instance.
#[derive(Debug, Parser)]
#[command(name = "n8n-cli")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    /// Path to the configuration file
    #[arg(long, env = CONFIG_PATH_ENV, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List workflows
    Workflows {
        /// Only active workflows
        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        /// Only inactive workflows
        #[arg(long)]
        inactive: bool,

        /// Only workflows with this tag (repeatable, matches any)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Show a workflow
    Workflow {
        /// Workflow ID
        id: String,
    },

    /// Create a workflow from a JSON definition
    #[command(group(ArgGroup::new("input").required(true).args(["file", "stdin"])))]
    Create {
        /// Read the definition from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Read the definition from stdin
        #[arg(long)]
        stdin: bool,

        /// Override the workflow name
        #[arg(short, long)]
        name: Option<String>,

        /// Activate the workflow after creation
        #[arg(short, long)]
        activate: bool,
    },

    /// Update a workflow
    #[command(group(ArgGroup::new("input").args(["file", "stdin"])))]
    Update {
        /// Workflow ID
        id: String,

        /// Replace the definition with the contents of a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Replace the definition with JSON read from stdin
        #[arg(long)]
        stdin: bool,

        /// New workflow name
        #[arg(short, long)]
        name: Option<String>,

        /// Activate the workflow
        #[arg(long, conflicts_with = "deactivate")]
        activate: bool,

        /// Deactivate the workflow
        #[arg(long)]
        deactivate: bool,
    },

    /// Delete a workflow
    Delete {
        /// Workflow ID
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        confirm: bool,

        /// Delete without confirmation, even if active
        #[arg(long)]
        force: bool,
    },

    /// Activate a workflow
    Enable {
        /// Workflow ID
        id: String,
    },

    /// Deactivate a workflow
    Disable {
        /// Workflow ID
        id: String,
    },

    /// Trigger a workflow execution
    Trigger {
        /// Workflow ID
        id: String,

        /// JSON input passed to the workflow
        #[arg(short, long, conflicts_with = "file")]
        data: Option<String>,

        /// Read the JSON input from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Wait for the execution to finish
        #[arg(short, long)]
        wait: bool,

        /// Seconds to wait before giving up
        #[arg(short, long, default_value_t = 300)]
        timeout: u64,
    },

    /// List executions
    Executions {
        /// Only executions of this workflow
        #[arg(short, long)]
        workflow: Option<String>,

        /// Only executions with this status
        #[arg(short, long, ignore_case = true, value_parser = ExecutionStatus::FILTERABLE)]
        status: Option<String>,

        /// Maximum number of executions (1-250)
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_EXECUTION_LIMIT,
            value_parser = clap::value_parser!(u32).range(1..=250)
        )]
        limit: u32,
    },

    /// Show an execution
    Execution {
        /// Execution ID
        id: String,
    },

    /// Manage credentials
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },

    /// Check that the n8n instance is reachable
    Health,

    /// Show or change the local configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Subcommand)]
pub enum CredentialsAction {
    /// List credentials
    List {
        /// Only credentials of this type
        #[arg(short = 't', long = "type")]
        credential_type: Option<String>,
    },

    /// Show a credential with sensitive fields masked
    Show {
        /// Credential ID
        id: String,
    },

    /// Create a credential from JSON data
    #[command(group(ArgGroup::new("input").required(true).args(["file", "stdin"])))]
    Create {
        /// Credential type (e.g. httpBasicAuth)
        #[arg(short = 't', long = "type")]
        credential_type: String,

        /// Credential name
        #[arg(short, long)]
        name: String,

        /// Read the data from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Read the data from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// Delete a credential
    Delete {
        /// Credential ID
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        confirm: bool,

        /// Delete without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Show the field schema of a credential type
    Schema {
        /// Credential type (e.g. httpBasicAuth)
        credential_type: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Change configuration values
    Set {
        /// n8n instance URL
        #[arg(long)]
        url: Option<String>,

        /// API key
        #[arg(long)]
        api_key: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

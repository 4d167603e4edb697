//! CLI argument parsing with clap
//!
//! Defines the command-line surface over the job board services.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Environment;

/// Job board with follow relationships, backed by a JSON snapshot
#[derive(Parser, Debug)]
#[command(name = "jobboard-rs", version)]
#[command(about = "Job board with follow relationships, backed by a JSON snapshot")]
#[command(long_about = "
jobboard-rs manages users, their follow relationships and the job postings
they publish. State lives in a JSON snapshot that is loaded before every
command and written back after every successful change.

EXAMPLES:
    # Register two users
    jobboard-rs create-user alice
    jobboard-rs create-user bob

    # Post a job
    jobboard-rs post-job --user <ID> --title 'Backend engineer' \\
        --description 'Build and run our APIs.' --skill rust --skill sql \\
        --deadline 2030-01-31 --type 'Computer Science & IT'

    # Follow and unfollow
    jobboard-rs follow <ALICE_ID> <BOB_ID>
    jobboard-rs unfollow <ALICE_ID> <BOB_ID>

    # Use a different snapshot with verbose logging
    jobboard-rs --store /tmp/board.json --verbose show-user <ID>
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Loads only this TOML file instead of the layered `config/` directory.
    /// `JOBBOARD_*` environment variables still apply on top.
    #[arg(short, long, value_name = "FILE", global = true, value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` overlay is applied.
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, value_enum, global = true)]
    pub env: Option<Environment>,

    /// Snapshot file override
    ///
    /// Replaces `store.snapshot_path` from the configuration.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Register a user and print its id
    CreateUser {
        #[arg(value_parser = super::validation::validate_username)]
        username: String,
    },

    /// Post a job on behalf of a user
    ///
    /// Every field is optional on the command line so that the job service
    /// can report all missing fields at once. Without any `--skill` the
    /// skills field counts as missing; pass `--no-skills` to post a job with
    /// an empty skill list.
    PostJob {
        /// Id of the posting user
        #[arg(long = "user", value_name = "ID")]
        user_id: Option<String>,

        /// Job title (5 to 100 characters)
        #[arg(long)]
        title: Option<String>,

        /// Job description (at least 10 characters)
        #[arg(long)]
        description: Option<String>,

        /// Required skill, repeat for several (letters and digits only)
        #[arg(long = "skill", value_name = "SKILL")]
        skills: Vec<String>,

        /// Post with an empty skill list
        #[arg(long, conflicts_with = "skills")]
        no_skills: bool,

        /// Application deadline as an ISO-8601 date or timestamp in the future
        #[arg(long, value_name = "DATE")]
        deadline: Option<String>,

        /// Maximum number of applicants
        #[arg(long, value_name = "N", allow_negative_numbers = true)]
        max_applicants: Option<i64>,

        /// Job category label, e.g. "Education & Tutoring"
        #[arg(long = "type", value_name = "TYPE")]
        job_type: Option<String>,
    },

    /// Make USER follow TARGET
    Follow {
        #[arg(value_name = "USER")]
        user_id: String,
        #[arg(value_name = "TARGET")]
        target_id: String,
    },

    /// Make USER stop following TARGET
    Unfollow {
        #[arg(value_name = "USER")]
        user_id: String,
        #[arg(value_name = "TARGET")]
        target_id: String,
    },

    /// Print a user document
    ShowUser {
        #[arg(value_name = "ID")]
        user_id: String,
    },

    /// Print the jobs posted by a user
    ListJobs {
        #[arg(value_name = "ID")]
        user_id: String,
    },
}

impl Commands {
    /// Whether a successful run changes the store.
    pub fn mutates_store(&self) -> bool {
        matches!(
            self,
            Commands::CreateUser { .. }
                | Commands::PostJob { .. }
                | Commands::Follow { .. }
                | Commands::Unfollow { .. }
        )
    }
}

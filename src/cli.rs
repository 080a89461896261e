//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::task::query::TaskFilter;

/// Top-level CLI parser for `radar`.
#[derive(Debug, Parser)]
#[command(name = "radar", version, about = "Detect and track deadlines found in page text")]
pub struct Cli {
    /// Path to the task store file. Falls back to the `RADAR_STORE`
    /// environment variable, then `radar-tasks.json`.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a text file for deadline mentions.
    Scan {
        /// File containing the page text to scan.
        file: PathBuf,
        /// URL the text was captured from.
        #[arg(long)]
        url: Option<String>,
        /// Title of the source page.
        #[arg(long)]
        page_title: Option<String>,
        /// Save detected tasks to the store (duplicates are discarded).
        #[arg(long)]
        save: bool,
    },
    /// List stored tasks.
    List {
        /// Which tasks to show.
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Add a task by hand.
    Add {
        /// Task title.
        #[arg(long)]
        title: String,
        /// Deadline, in any form the detector understands ("March 3rd",
        /// "11/03", "2025-05-01", "tomorrow").
        #[arg(long)]
        deadline: String,
        /// Longer description.
        #[arg(long, default_value = "")]
        description: String,
        /// Tag to attach; repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Mark a task completed.
    Complete {
        /// Id of the task to complete.
        id: String,
    },
    /// Delete a task.
    Delete {
        /// Id of the task to delete.
        id: String,
    },
    /// Run the alert sweeps over the stored tasks.
    Alerts,
}

/// Filter choices for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    /// Everything.
    All,
    /// Not completed.
    Pending,
    /// Completed only.
    Completed,
    /// Due (or overdue) within 24 hours.
    Urgent,
    /// Due within the current day.
    Today,
}

impl FilterArg {
    /// Maps the CLI choice onto the query-layer filter.
    #[must_use]
    pub fn to_filter(self) -> TaskFilter {
        match self {
            Self::All => TaskFilter::All,
            Self::Pending => TaskFilter::Pending,
            Self::Completed => TaskFilter::Completed,
            Self::Urgent => TaskFilter::Urgent,
            Self::Today => TaskFilter::Today,
        }
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_STORAGE_FILE;

#[derive(Parser, Debug)]
#[command(name = "hbnb")]
#[command(version, about = "Console for the hbnb object store")]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON file backing the object store
    #[arg(long, global = true, default_value = DEFAULT_STORAGE_FILE)]
    pub file: PathBuf,

    /// Print debug logs to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create and save a new instance, printing its id
    Create {
        /// Class name (BaseModel, User)
        class: String,
    },

    /// Show the string representation of an instance
    Show {
        class: String,
        id: String,
    },

    /// Delete an instance
    Destroy {
        class: String,
        id: String,
    },

    /// Show every instance, optionally only those of one class
    All {
        class: Option<String>,
    },

    /// Count instances of a class
    Count {
        class: String,
    },

    /// Set an attribute on an instance and save it
    Update {
        class: String,
        id: String,

        /// Attribute name
        attribute: String,

        /// New value; numbers and booleans keep their type, anything else is text
        value: String,
    },
}

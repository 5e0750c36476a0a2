//! Command-line interface for managing env file entries.
//!
//! The root command is `pilot`; invoked bare it prints help listing the
//! available subcommands. `pilot set` parses a `KEY=VALUE` pair, types
//! it per the `--type` flag, and appends it to the chosen env file.

use std::str::FromStr;

use clap::{CommandFactory, Parser, Subcommand};

use crate::env_store::{EnvStore, UnsupportedValueType, ValueType};

/// Errors produced by CLI argument handling and command execution.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The positional argument was not shaped `KEY=VALUE`.
    #[error("invalid syntax. Use: <key>=<value>")]
    InvalidKeyValue,

    /// The `--type` flag named an unsupported type.
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedValueType),

    /// The store rejected the write.
    #[error(transparent)]
    Env(#[from] crate::env_store::EnvError),
}

/// The `pilot` command line.
#[derive(Parser)]
#[command(name = "pilot")]
#[command(about = "A CLI tool for managing environment variables")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set an environment variable
    Set {
        /// The entry to write, shaped KEY=VALUE
        pair: String,

        /// Type of the value (string, int, bool, float)
        #[arg(short = 't', long = "type", default_value = "string")]
        value_type: String,

        /// The file to save the environment variable (default is .env)
        #[arg(short, long, default_value = "")]
        file: String,
    },
}

impl Cli {
    /// Executes the parsed command.
    ///
    /// With no subcommand, prints help and succeeds.
    ///
    /// # Errors
    /// Returns [`CliError`] when the positional argument is malformed,
    /// the requested type is unsupported, or the write fails.
    pub fn run(self) -> Result<(), CliError> {
        match self.command {
            Some(Commands::Set {
                pair,
                value_type,
                file,
            }) => set_entry(&pair, &value_type, &file),
            None => {
                let _ = Self::command().print_help();
                Ok(())
            }
        }
    }
}

fn set_entry(pair: &str, value_type: &str, file: &str) -> Result<(), CliError> {
    let (key, value) = pair.split_once('=').ok_or(CliError::InvalidKeyValue)?;
    let value_type = ValueType::from_str(value_type)?;

    let store = EnvStore::new(file);
    store.set(key, value, value_type, store.path())?;

    println!(
        "Successfully set {key}={value} as {value_type} in file {}",
        store.path().display()
    );

    Ok(())
}

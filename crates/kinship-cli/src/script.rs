//! Script files: a list of family tree commands in TOML.
//!
//! ```toml
//! [[command]]
//! action = "add"
//! name = "Alice"
//! relationship = "root"
//!
//! [[command]]
//! action = "add"
//! name = "Bob"
//! relationship = "child"
//! related_to = [1]
//! ```
//!
//! Ids are assigned in order starting at 1, so a script can refer to the
//! members it added earlier.

use std::{fs, io, path::Path};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use kinship::{KinshipError, request::Command};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to parse script: {0}")]
    Parse(String),
}

impl From<ScriptError> for KinshipError {
    fn from(err: ScriptError) -> Self {
        KinshipError::Io(io::Error::other(err.to_string()))
    }
}

/// Commands of one script, in file order.
#[derive(Debug, Default, Deserialize)]
pub struct Script {
    #[serde(default, rename = "command")]
    commands: Vec<Command>,
}

impl Script {
    /// Parses a script from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] for malformed TOML or unknown commands.
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let script: Self = toml::from_str(source).map_err(|e| ScriptError::Parse(e.to_string()))?;
        debug!(commands = script.commands.len(); "Script parsed");
        Ok(script)
    }

    /// Reads and parses a script file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KinshipError> {
        let source = fs::read_to_string(path)?;
        Ok(Self::parse(&source)?)
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

//! Source mining - the external report of where each entry is defined
//!
//! A miner produces, per table, a JSON array of `{name, remote, comment}`
//! records. `remote` becomes the entry's source link and `comment` its doc
//! text when none was written by hand. Mining runs once per build and is
//! never retried.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::config::MiningConfig;
use crate::error::MiningError;
use crate::registry::Table;

/// One record of a source report. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceRecord {
    /// Exported identifier
    pub name: String,
    /// URL of the definition's line range
    #[serde(default)]
    pub remote: Option<String>,
    /// First doc comment found on the definition
    #[serde(default)]
    pub comment: Option<String>,
}

impl SourceRecord {
    /// Create a record with just a source link
    pub fn new(name: impl Into<String>, remote: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remote: Some(remote.into()),
            comment: None,
        }
    }

    /// Set the mined comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Name-indexed records for one table. Later records win on duplicate names.
#[derive(Debug, Clone, Default)]
pub struct SourceReport {
    records: HashMap<String, SourceRecord>,
}

impl SourceReport {
    /// Index a list of records
    pub fn from_records(records: impl IntoIterator<Item = SourceRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.name.clone(), record))
                .collect(),
        }
    }

    /// Parse the JSON array emitted by a mining tool
    pub fn from_json(json: &str, origin: &str) -> Result<Self, MiningError> {
        let records: Vec<SourceRecord> =
            serde_json::from_str(json.trim()).map_err(|source| MiningError::Malformed {
                origin: origin.to_string(),
                source,
            })?;
        Ok(Self::from_records(records))
    }

    /// Check whether the report mentions a name
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Source link for a name
    pub fn remote(&self, name: &str) -> Option<&str> {
        self.records.get(name)?.remote.as_deref()
    }

    /// Mined doc comment for a name, if non-blank
    pub fn comment(&self, name: &str) -> Option<&str> {
        self.records
            .get(name)?
            .comment
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the report is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The source-mining collaborator
pub trait SourceMiner {
    /// Produce the report for one table
    fn mine(&self, table: Table) -> Result<SourceReport, MiningError>;
}

/// Runs one shell command per table and parses its stdout
#[derive(Debug, Clone)]
pub struct CommandMiner {
    decoders_command: String,
    methods_command: String,
    working_dir: Option<PathBuf>,
}

impl CommandMiner {
    /// Create a miner from the configured commands
    pub fn new(config: &MiningConfig) -> Self {
        Self {
            decoders_command: config.decoders_command.clone(),
            methods_command: config.methods_command.clone(),
            working_dir: None,
        }
    }

    /// Run the commands from this directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn command_for(&self, table: Table) -> &str {
        match table {
            Table::Decoders => &self.decoders_command,
            Table::Methods => &self.methods_command,
        }
    }

    fn run(&self, command: &str) -> Result<String, MiningError> {
        debug!(command, "running source miner");

        let mut cmd = shell(command);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| MiningError::Spawn {
            command: command.to_string(),
            source,
        })?;

        if !output.status.success() {
            return Err(MiningError::Failed {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl SourceMiner for CommandMiner {
    fn mine(&self, table: Table) -> Result<SourceReport, MiningError> {
        let command = self.command_for(table);
        let stdout = self.run(command)?;
        let report = SourceReport::from_json(&stdout, &format!("`{command}`"))?;
        debug!(%table, records = report.len(), "source report parsed");
        Ok(report)
    }
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Reads previously captured reports from disk
#[derive(Debug, Clone)]
pub struct FileMiner {
    decoders: PathBuf,
    methods: PathBuf,
}

impl FileMiner {
    /// Create a miner over two JSON report files
    pub fn new(decoders: impl Into<PathBuf>, methods: impl Into<PathBuf>) -> Self {
        Self {
            decoders: decoders.into(),
            methods: methods.into(),
        }
    }

    fn path_for(&self, table: Table) -> &Path {
        match table {
            Table::Decoders => &self.decoders,
            Table::Methods => &self.methods,
        }
    }
}

impl SourceMiner for FileMiner {
    fn mine(&self, table: Table) -> Result<SourceReport, MiningError> {
        let path = self.path_for(table);
        debug!(path = %path.display(), %table, "reading source report");
        let json = std::fs::read_to_string(path).map_err(|source| MiningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        SourceReport::from_json(&json, &format!("'{}'", path.display()))
    }
}

/// In-memory reports, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticMiner {
    decoders: Vec<SourceRecord>,
    methods: Vec<SourceRecord>,
}

impl StaticMiner {
    /// Create a miner that returns the given records
    pub fn new(decoders: Vec<SourceRecord>, methods: Vec<SourceRecord>) -> Self {
        Self { decoders, methods }
    }
}

impl SourceMiner for StaticMiner {
    fn mine(&self, table: Table) -> Result<SourceReport, MiningError> {
        let records = match table {
            Table::Decoders => &self.decoders,
            Table::Methods => &self.methods,
        };
        Ok(SourceReport::from_records(records.iter().cloned()))
    }
}

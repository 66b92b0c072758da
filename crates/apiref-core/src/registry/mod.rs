//! Decoder and method registries
//!
//! A [`Registry`] holds two disjoint, name-indexed tables. It is built once
//! from reference data plus a source report and is never mutated afterwards;
//! alias expansion and enrichment each produce a new value.

mod schema;
mod types;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{Error, RegistryError};
use crate::mining::{SourceMiner, SourceReport};

pub use schema::{RawEntry, RawParam, RawSignature, ReferenceData};
pub use types::{EntryKind, Param, RegistryEntry, Signature, Table};

/// Section label for decoders that declare none
pub const DEFAULT_SECTION: &str = "Other";

/// A resolved name: which table matched, and the entry
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub table: Table,
    pub entry: &'a RegistryEntry,
}

/// Entries of one table in declaration order, indexed by name
#[derive(Debug, Clone)]
pub struct EntryTable {
    table: Table,
    entries: Vec<RegistryEntry>,
    index: HashMap<String, usize>,
}

impl EntryTable {
    /// Create an empty table
    pub fn new(table: Table) -> Self {
        Self {
            table,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a table from entries, rejecting duplicates and empty signature lists
    pub fn from_entries(
        table: Table,
        entries: impl IntoIterator<Item = RegistryEntry>,
    ) -> Result<Self, RegistryError> {
        let mut result = Self::new(table);
        for entry in entries {
            result.insert(entry)?;
        }
        Ok(result)
    }

    fn insert(&mut self, entry: RegistryEntry) -> Result<(), RegistryError> {
        if entry.signatures.is_empty() {
            return Err(RegistryError::NoSignatures {
                table: self.table,
                name: entry.name,
            });
        }
        if self.index.contains_key(&entry.name) {
            return Err(RegistryError::Duplicate {
                table: self.table,
                name: entry.name,
            });
        }
        self.index.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Which table this is
    pub fn table(&self) -> Table {
        self.table
    }

    /// Look up an entry by exact name
    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Check if the table has an entry with this name
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate entries in declaration order (alias copies last)
    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn expand_aliases(&self) -> Result<Self, RegistryError> {
        let mut expanded = self.clone();
        for entry in &self.entries {
            for alias in &entry.aliases {
                if expanded.contains(alias) {
                    return Err(RegistryError::AliasCollision {
                        table: self.table,
                        alias: alias.clone(),
                        primary: entry.name.clone(),
                    });
                }
                debug!(table = %self.table, alias = %alias, primary = %entry.name, "expanding alias");
                let copy = RegistryEntry {
                    name: alias.clone(),
                    aliases: Vec::new(),
                    alias_of: Some(entry.name.clone()),
                    source_url: None,
                    ..entry.clone()
                };
                expanded.insert(copy)?;
            }
        }
        Ok(expanded)
    }

    fn check_sources(&self, report: &SourceReport) -> Result<(), RegistryError> {
        match self
            .iter()
            .find(|entry| !entry.is_alias() && !report.contains(&entry.name))
        {
            Some(missing) => Err(RegistryError::MissingFromSource {
                table: self.table,
                name: missing.name.clone(),
            }),
            None => Ok(()),
        }
    }

    fn enrich(mut self, report: &SourceReport) -> Self {
        for entry in &mut self.entries {
            entry.source_url = report.remote(&entry.name).map(str::to_string);
            if entry.doc_text.is_none() {
                entry.doc_text = report
                    .comment(&entry.name)
                    .or_else(|| entry.alias_of.as_deref().and_then(|p| report.comment(p)))
                    .map(str::to_string);
            }
        }
        self
    }
}

/// The two documented tables
#[derive(Debug, Clone)]
pub struct Registry {
    decoders: EntryTable,
    methods: EntryTable,
}

impl Registry {
    /// Create a registry from two tables, checking that they are disjoint
    pub fn new(decoders: EntryTable, methods: EntryTable) -> Result<Self, RegistryError> {
        if let Some(entry) = methods.iter().find(|m| decoders.contains(&m.name)) {
            return Err(RegistryError::Overlap(entry.name.clone()));
        }
        Ok(Self { decoders, methods })
    }

    /// Normalize reference data into a registry, without aliases or mining
    pub fn from_data(data: &ReferenceData) -> Result<Self, RegistryError> {
        let load = |table: Table| -> Result<EntryTable, RegistryError> {
            let entries = data
                .entries(table)
                .iter()
                .map(|raw| raw.to_entry(table))
                .collect::<Result<Vec<_>, _>>()?;
            EntryTable::from_entries(table, entries)
        };
        Self::new(load(Table::Decoders)?, load(Table::Methods)?)
    }

    /// Full startup sequence: load, expand aliases, mine, check integrity, enrich
    pub fn build(data: &ReferenceData, miner: &dyn SourceMiner) -> Result<Self, Error> {
        let registry = Self::from_data(data)?.expand_aliases()?;

        let decoders_report = miner.mine(Table::Decoders)?;
        let methods_report = miner.mine(Table::Methods)?;

        registry.check_sources(&decoders_report, &methods_report)?;
        let registry = registry.enrich(&decoders_report, &methods_report);

        info!(
            decoders = registry.decoders.len(),
            methods = registry.methods.len(),
            "registry built"
        );
        Ok(registry)
    }

    /// Copy every entry under each of its aliases
    pub fn expand_aliases(&self) -> Result<Self, RegistryError> {
        Self::new(self.decoders.expand_aliases()?, self.methods.expand_aliases()?)
    }

    /// Fail on the first primary name absent from its table's report
    pub fn check_sources(
        &self,
        decoders: &SourceReport,
        methods: &SourceReport,
    ) -> Result<(), RegistryError> {
        self.methods.check_sources(methods)?;
        self.decoders.check_sources(decoders)
    }

    /// Attach source links and fill missing doc text from the reports
    pub fn enrich(self, decoders: &SourceReport, methods: &SourceReport) -> Self {
        Self {
            decoders: self.decoders.enrich(decoders),
            methods: self.methods.enrich(methods),
        }
    }

    /// Resolve a bare name: decoders first, then methods
    pub fn resolve(&self, name: &str) -> Option<Match<'_>> {
        self.decoders
            .get(name)
            .map(|entry| Match {
                table: Table::Decoders,
                entry,
            })
            .or_else(|| {
                self.methods.get(name).map(|entry| Match {
                    table: Table::Methods,
                    entry,
                })
            })
    }

    /// The decoder table
    pub fn decoders(&self) -> &EntryTable {
        &self.decoders
    }

    /// The method table
    pub fn methods(&self) -> &EntryTable {
        &self.methods
    }

    /// One of the two tables
    pub fn table(&self, table: Table) -> &EntryTable {
        match table {
            Table::Decoders => &self.decoders,
            Table::Methods => &self.methods,
        }
    }

    /// Decoders grouped by section, sections in first-seen order
    pub fn by_section(&self) -> Vec<(&str, Vec<&RegistryEntry>)> {
        let mut groups: Vec<(&str, Vec<&RegistryEntry>)> = Vec::new();
        for entry in self.decoders.iter() {
            let section = entry.section.as_deref().unwrap_or(DEFAULT_SECTION);
            match groups.iter_mut().find(|(name, _)| *name == section) {
                Some((_, entries)) => entries.push(entry),
                None => groups.push((section, vec![entry])),
            }
        }
        groups
    }
}

/// True iff at least one signature of the entry declares parameters
pub fn is_callable(entry: &RegistryEntry) -> bool {
    entry.is_callable()
}

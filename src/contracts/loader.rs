//! Load league tables from CSV
//!
//! Every table lives in its own file `<data_dir>/<table>.csv`. Rows are
//! validated against a fixed schema when they are read, so a missing or
//! mistyped required column fails the whole load.

use csv::{Reader, Writer};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use super::{ContractRecord, FloorRank, Franchise, PlayerScore, RosterEntry};
use crate::error::{EpvError, Result};

/// Named league tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Contracts,
    Roster,
    Franchises,
    PlayerScores,
    FloorRanks,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Contracts,
        Table::Roster,
        Table::Franchises,
        Table::PlayerScores,
        Table::FloorRanks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Contracts => "contracts",
            Table::Roster => "roster",
            Table::Franchises => "franchises",
            Table::PlayerScores => "playerscores",
            Table::FloorRanks => "floor_ranks",
        }
    }

    /// Look up a table by name
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|table| table.as_str() == name)
            .ok_or_else(|| EpvError::UnknownTable(name.to_string()))
    }

    /// File name of the table inside a data directory
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of league tables consumed by the filter and the projection pipeline
pub trait DataSource {
    fn contracts(&self) -> Result<Vec<ContractRecord>>;

    fn roster(&self) -> Result<Vec<RosterEntry>>;

    fn franchises(&self) -> Result<Vec<Franchise>>;

    fn player_scores(&self) -> Result<Vec<PlayerScore>>;

    fn floor_ranks(&self) -> Result<Vec<FloorRank>>;
}

/// Directory of CSV files, one per table
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    dir: PathBuf,
}

impl CsvDataSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a table's CSV file
    pub fn table_path(&self, table: Table) -> PathBuf {
        self.dir.join(table.file_name())
    }

    /// Whether the table file exists
    pub fn has_table(&self, table: Table) -> bool {
        self.table_path(table).is_file()
    }

    fn load<T: DeserializeOwned>(&self, table: Table) -> Result<Vec<T>> {
        let rows: Vec<T> = load_table(self.table_path(table))?;
        if rows.is_empty() {
            warn!("Table '{}' is empty", table);
        } else {
            info!("Loaded table '{}' with {} rows", table, rows.len());
        }
        Ok(rows)
    }

    /// Write rows to a table, replacing the existing file
    pub fn save<T: Serialize>(&self, table: Table, rows: &[T]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        write_table(self.table_path(table), rows)?;
        info!("Wrote {} rows to table '{}'", rows.len(), table);
        Ok(())
    }
}

impl DataSource for CsvDataSource {
    fn contracts(&self) -> Result<Vec<ContractRecord>> {
        self.load(Table::Contracts)
    }

    fn roster(&self) -> Result<Vec<RosterEntry>> {
        self.load(Table::Roster)
    }

    fn franchises(&self) -> Result<Vec<Franchise>> {
        self.load(Table::Franchises)
    }

    fn player_scores(&self) -> Result<Vec<PlayerScore>> {
        self.load(Table::PlayerScores)
    }

    fn floor_ranks(&self) -> Result<Vec<FloorRank>> {
        self.load(Table::FloorRanks)
    }
}

/// In-memory tables, for tests and for callers that already hold the rows
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub contracts: Vec<ContractRecord>,
    pub roster: Vec<RosterEntry>,
    pub franchises: Vec<Franchise>,
    pub player_scores: Vec<PlayerScore>,
    pub floor_ranks: Vec<FloorRank>,
}

impl MemorySource {
    pub fn new(contracts: Vec<ContractRecord>, roster: Vec<RosterEntry>) -> Self {
        Self {
            contracts,
            roster,
            ..Default::default()
        }
    }
}

impl DataSource for MemorySource {
    fn contracts(&self) -> Result<Vec<ContractRecord>> {
        Ok(self.contracts.clone())
    }

    fn roster(&self) -> Result<Vec<RosterEntry>> {
        Ok(self.roster.clone())
    }

    fn franchises(&self) -> Result<Vec<Franchise>> {
        Ok(self.franchises.clone())
    }

    fn player_scores(&self) -> Result<Vec<PlayerScore>> {
        Ok(self.player_scores.clone())
    }

    fn floor_ranks(&self) -> Result<Vec<FloorRank>> {
        Ok(self.floor_ranks.clone())
    }
}

/// Load all rows of a table from a CSV file
pub fn load_table<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load rows from any reader (e.g., string buffer, network stream)
pub fn load_table_from_reader<T: DeserializeOwned, R: std::io::Read>(reader: R) -> Result<Vec<T>> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<T: DeserializeOwned, R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<T>> {
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Write rows to a CSV file with a header line
pub fn write_table<T: Serialize, P: AsRef<Path>>(path: P, rows: &[T]) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

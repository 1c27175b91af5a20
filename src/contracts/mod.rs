//! Contract data structures, table loading and contract filtering

mod data;
pub mod filter;
pub mod loader;

pub use data::{
    ContractRecord, ContractSummary, FloorRank, Franchise, PlayerScore, RosterEntry,
    FIFTH_YEAR_OPTION_MARKER,
};
pub use filter::{filter_contracts, seasons, unique_teams, weeks, FREE_AGENT};
pub use loader::{load_table, load_table_from_reader, write_table, CsvDataSource, DataSource, MemorySource, Table};

#[cfg(test)]
pub(crate) use data::fixtures;

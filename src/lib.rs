//! Contract Admin - Front office tooling for a salary cap fantasy football league
//!
//! This library provides:
//! - Typed loading of league tables (contracts, rosters, franchises, scores)
//! - Contract filtering for expiring deals
//! - Season aggregation and per-position rank derivation
//! - Extension value (EPV) projections of new contract salaries

pub mod config;
pub mod contracts;
pub mod error;
pub mod projection;
pub mod ranking;
pub mod selection;

// Re-export commonly used types
pub use config::LeagueConfig;
pub use contracts::{ContractRecord, CsvDataSource, DataSource, RosterEntry};
pub use error::{EpvError, Result};
pub use projection::{ProjectionConfig, ProjectionEngine, ProjectionRow};
pub use selection::{ExtensionCandidate, SelectionContext};

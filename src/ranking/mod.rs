//! Player rankings: season aggregation, rank derivation and rank history

mod rank;
mod season;
mod build;
mod history;

pub use rank::{rank_max_descending, rank_ordinal_descending, MinRank, RankSource};
pub use season::{aggregate_season_lines, SeasonLine};
pub use build::build_contract_table;
pub use history::{recent_rank_history, RankHistory};

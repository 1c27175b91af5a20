//! Build the contracts table from scraped league data
//!
//! Aggregates weekly player scores into season lines, ranks them per
//! position and joins rosters, franchises and floor ranks. Seasons already
//! present in the contracts table are skipped unless --force is given.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use contract_admin::contracts::{ContractRecord, CsvDataSource, DataSource, Table};
use contract_admin::projection::ProjectionConfig;
use contract_admin::ranking::{aggregate_season_lines, build_contract_table};
use contract_admin::LeagueConfig;

#[derive(Parser)]
#[command(name = "build_contracts", about = "Build the contracts table from player scores and rosters")]
struct Args {
    /// Directory with one CSV file per league table
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// First season to build (defaults to the configured start year)
    #[arg(long)]
    start_year: Option<i32>,

    /// Last season to build (defaults to the configured default season)
    #[arg(long)]
    end_year: Option<i32>,

    /// Rebuild seasons that are already present
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = LeagueConfig::from_env().context("Invalid league configuration")?;
    let source = CsvDataSource::new(args.data_dir.unwrap_or(config.data_dir.clone()));
    let start_year = args.start_year.unwrap_or(config.start_year);
    let end_year = args.end_year.unwrap_or(config.default_season);

    let start = Instant::now();
    info!("Building contracts for seasons {}..={} in {}", start_year, end_year, source.dir().display());

    let existing: Vec<ContractRecord> = if source.has_table(Table::Contracts) {
        source.contracts().context("Failed to load existing contracts")?
    } else {
        Vec::new()
    };
    let present: BTreeSet<i32> = existing.iter().map(|c| c.season).collect();

    let mut seasons = Vec::new();
    for year in start_year..=end_year {
        if present.contains(&year) && !args.force {
            info!("Contracts for year {} already present. Skipping.", year);
        } else {
            seasons.push(year);
        }
    }
    if seasons.is_empty() {
        println!("Contracts table is up to date");
        return Ok(());
    }

    let scores: Vec<_> = source
        .player_scores()
        .context("Failed to load player scores")?
        .into_iter()
        .filter(|s| seasons.contains(&s.season))
        .collect();
    let roster = source.roster().context("Failed to load roster")?;
    let franchises = source.franchises().context("Failed to load franchises")?;
    let floor_ranks = if source.has_table(Table::FloorRanks) {
        source.floor_ranks().context("Failed to load floor ranks")?
    } else {
        warn!("No floor rank table; floor ranks fall back to the last rank of each position");
        Vec::new()
    };

    let projection = ProjectionConfig::default();
    let lines = aggregate_season_lines(&scores, projection.robust_min_games);
    let built = build_contract_table(&lines, &roster, &franchises, &floor_ranks);
    println!("Built {} contract rows for {} seasons in {:?}", built.len(), seasons.len(), start.elapsed());

    let mut table: Vec<ContractRecord> = existing
        .into_iter()
        .filter(|c| !seasons.contains(&c.season))
        .collect();
    table.extend(built);
    table.sort_by(|a, b| a.season.cmp(&b.season).then(a.player_id.cmp(&b.player_id)));

    source
        .save(Table::Contracts, &table)
        .context("Failed to write contracts")?;
    println!("Contracts table written to {}", source.table_path(Table::Contracts).display());

    Ok(())
}

//! Contract Admin CLI
//!
//! Command-line front office: pick a team, season and week, list expiring
//! contracts and project extension salaries

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use contract_admin::contracts::{self, DataSource};
use contract_admin::projection::{ProjectionEngine, ProjectionSummary};
use contract_admin::{CsvDataSource, LeagueConfig, ProjectionRow, SelectionContext};

#[derive(Parser)]
#[command(name = "contract_admin", version, about = "Contract filtering and EPV salary projections")]
struct Cli {
    /// Directory with one CSV file per league table
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List franchises
    Teams,
    /// List seasons with contract data
    Seasons,
    /// List selectable weeks
    Weeks,
    /// Show a team's expiring contracts
    Filter {
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        season: Option<i32>,
    },
    /// Project extension salaries for a team's expiring contracts
    Project {
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        season: Option<i32>,
        #[arg(long)]
        week: Option<u32>,
        /// Requested extension, PLAYER_ID=YEARS (repeatable)
        #[arg(long = "extend", value_parser = parse_assignment::<u32>)]
        extensions: Vec<(u32, u32)>,
        /// Proposed salary, PLAYER_ID=AMOUNT (repeatable)
        #[arg(long = "salary", value_parser = parse_assignment::<f64>)]
        salaries: Vec<(u32, f64)>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn parse_assignment<T: std::str::FromStr>(s: &str) -> std::result::Result<(u32, T), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PLAYER_ID=VALUE, got '{}'", s))?;
    let id = id.trim().parse().map_err(|_| format!("invalid player id '{}'", id))?;
    let value = value.trim().parse().map_err(|_| format!("invalid value '{}'", value))?;
    Ok((id, value))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = LeagueConfig::from_env().context("Invalid league configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let source = CsvDataSource::new(config.data_dir.clone());

    match cli.command {
        Command::Teams => {
            let rows = source.contracts().context("Failed to load contracts")?;
            for team in contracts::unique_teams(&rows) {
                println!("{}", team);
            }
        }
        Command::Seasons => {
            let rows = source.contracts().context("Failed to load contracts")?;
            for season in contracts::seasons(&rows) {
                println!("{}", season);
            }
        }
        Command::Weeks => {
            for week in contracts::weeks(config.max_week) {
                println!("{}", week);
            }
        }
        Command::Filter { team, season } => {
            let team = team.unwrap_or_else(|| config.default_team.clone());
            let season = season.unwrap_or(config.default_season);
            let rows = source.contracts().context("Failed to load contracts")?;
            let selected = contracts::filter_contracts(&rows, &team, season);

            println!("Expiring contracts: {} ({})", team, season);
            println!("{:>8} {:<28} {:<4} {:>10} {:>5}", "ID", "Player", "Pos", "Salary", "Years");
            println!("{}", "-".repeat(60));
            for c in &selected {
                println!(
                    "{:>8} {:<28} {:<4} {:>10} {:>5}",
                    c.player_id,
                    c.player_name,
                    c.position,
                    format_amount(c.salary),
                    c.contract_years.map(|y| y.to_string()).unwrap_or_default(),
                );
            }
            if selected.is_empty() {
                println!("(none)");
            }
        }
        Command::Project { team, season, week, extensions, salaries, format } => {
            let team = team.unwrap_or_else(|| config.default_team.clone());
            let season = season.unwrap_or(config.default_season);
            let week = week.unwrap_or(config.default_week);
            if week > config.max_week {
                bail!("week {} is after week {}", week, config.max_week);
            }

            let rows = source.contracts().context("Failed to load contracts")?;
            let mut selection = SelectionContext::from_filter(&rows, &team, season, week);
            for (player_id, years) in extensions {
                if !selection.set_extension(player_id, years) {
                    bail!("player {} has no expiring contract with {} in {}", player_id, team, season);
                }
            }
            for (player_id, salary) in salaries {
                if !selection.set_salary(player_id, salary) {
                    bail!("player {} has no expiring contract with {} in {}", player_id, team, season);
                }
            }

            let engine = ProjectionEngine::default();
            let roster = source.roster().context("Failed to load roster")?;
            let projected = engine
                .project_tables(&rows, &roster, &selection)
                .context("Projection failed")?;

            match format {
                OutputFormat::Table => print_table(&team, season, week, &projected),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&projected)?),
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    for row in &projected {
                        writer.serialize(row)?;
                    }
                    writer.flush()?;
                }
            }
        }
    }

    Ok(())
}

fn print_table(team: &str, season: i32, week: u32, rows: &[ProjectionRow]) {
    println!("EPV projection: {} ({}, week {})", team, season, week);
    println!(
        "{:<28} {:<4} {:>10} {:>5} {:>5} {:>4} {:>10} {:>10}",
        "Player", "Pos", "Salary", "Prev", "Ext", "5YO", "EYS", "New"
    );
    println!("{}", "-".repeat(84));

    for row in rows {
        println!(
            "{:<28} {:<4} {:>10.2} {:>5} {:>5} {:>4} {:>10.2} {:>10}",
            row.player_name,
            row.position,
            row.salary,
            row.prev_years,
            row.ext_years,
            row.fifth_year_option,
            row.expected_year_salary,
            format_amount(row.new_salary),
        );
    }
    if rows.is_empty() {
        println!("(no extensions requested; use --extend PLAYER_ID=YEARS)");
        return;
    }

    let summary = ProjectionSummary::from_rows(rows);
    println!("\nSummary:");
    println!("  Players: {}", summary.players);
    println!("  Current salary: {:.2}", summary.total_salary);
    println!("  New salary: {:.2}", summary.total_new_salary);
    println!("  Change: {:+.2}", summary.salary_change);
    if summary.unresolved > 0 {
        println!("  Without new salary: {}", summary.unresolved);
    }
}

fn format_amount(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

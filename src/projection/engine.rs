//! Extension value (EPV) projection engine

use log::debug;
use std::collections::{HashMap, HashSet};

use super::bands::ReferenceBands;
use super::blend::{candidate_salaries, escalation_factor, expected_year_salary};
use super::result::ProjectionRow;
use super::smoothing::smoothed_salary;
use crate::contracts::{ContractRecord, DataSource, RosterEntry};
use crate::error::{EpvError, Result};
use crate::ranking::{recent_rank_history, RankHistory};
use crate::selection::{ExtensionCandidate, SelectionContext};

/// Formula constants for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Yearly growth weight used when smoothing salaries
    pub growth_rate: f64,

    /// Multiplier on reference salaries when projecting in week 0 (offseason)
    pub week0_multiplier: f64,

    /// Escalation on the expected year salary before any extension years
    pub base_escalation: f64,

    /// Escalation removed per extension year not covered by the fifth-year option
    pub escalation_step: f64,

    /// Games needed for a season to count as robust
    pub robust_min_games: u32,

    /// Salaries a position needs before elite reference salaries are extrapolated.
    /// The extrapolation reads the four highest salaries, so values below 4 act as 4.
    pub elite_min_entries: usize,

    /// Extension length below which a candidate is not projected
    pub min_extension_years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            growth_rate: 1.10,
            week0_multiplier: 1.10,
            base_escalation: 1.15,
            escalation_step: 0.05,
            robust_min_games: 5,
            elite_min_entries: 4,
            min_extension_years: 2,
        }
    }
}

impl ProjectionConfig {
    /// Multiplier applied to reference salaries in the given week
    pub fn reference_multiplier(&self, week: u32) -> f64 {
        if week == 0 {
            self.week0_multiplier
        } else {
            1.0
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project new salaries for the selection's extension candidates.
    ///
    /// A selection without extended candidates yields no rows and reads no
    /// tables. Any failure to read a table aborts the whole projection.
    pub fn project<S: DataSource + ?Sized>(
        &self,
        source: &S,
        selection: &SelectionContext,
    ) -> Result<Vec<ProjectionRow>> {
        if selection.extended(self.config.min_extension_years).next().is_none() {
            debug!("No extension candidates selected");
            return Ok(Vec::new());
        }

        let contracts = source.contracts()?;
        let roster = source.roster()?;
        self.project_tables(&contracts, &roster, selection)
    }

    /// Project from tables already in memory
    pub fn project_tables(
        &self,
        contracts: &[ContractRecord],
        roster: &[RosterEntry],
        selection: &SelectionContext,
    ) -> Result<Vec<ProjectionRow>> {
        let candidates: Vec<&ExtensionCandidate> =
            selection.extended(self.config.min_extension_years).collect();
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let relevant = relevant_contracts(contracts, &candidates, selection.season);
        debug!("{} contract rows for {} candidates", relevant.len(), candidates.len());

        let history = recent_rank_history(&relevant);
        debug!("{} players with a robust season", history.len());

        let bands = ReferenceBands::build(roster, selection.season, self.config.elite_min_entries);
        let multiplier = self.config.reference_multiplier(selection.week);

        let mut by_player: HashMap<u32, Vec<&ExtensionCandidate>> = HashMap::new();
        for &candidate in &candidates {
            by_player.entry(candidate.player_id).or_default().push(candidate);
        }

        let mut rows = Vec::new();
        for entry in &history {
            let Some(matching) = by_player.get(&entry.record.player_id) else {
                continue;
            };
            for candidate in matching {
                rows.push(self.project_player(entry, candidate, &bands, multiplier)?);
            }
        }

        debug!("Projected {} players", rows.len());
        Ok(rows)
    }

    fn project_player(
        &self,
        history: &RankHistory,
        candidate: &ExtensionCandidate,
        bands: &ReferenceBands,
        multiplier: f64,
    ) -> Result<ProjectionRow> {
        let record = &history.record;

        let salary = candidate.salary.ok_or(EpvError::MissingField {
            table: "selection",
            player_id: candidate.player_id,
            field: "salary",
        })?;
        let prev_years = record.contract_years.ok_or(EpvError::MissingField {
            table: "contracts",
            player_id: record.player_id,
            field: "contract_years",
        })?;
        let ext_years = candidate.extension_years;
        let fifth_year_option = record.fifth_year_flag();

        let candidates = candidate_salaries(bands, &record.position, history.ranks(), multiplier);
        let escalation = escalation_factor(
            ext_years,
            fifth_year_option,
            self.config.base_escalation,
            self.config.escalation_step,
        );
        let expected = expected_year_salary(salary, &candidates, escalation);
        let new_salary = smoothed_salary(salary, expected, prev_years, ext_years, self.config.growth_rate);

        Ok(ProjectionRow {
            player_id: record.player_id,
            player_name: record.player_name.clone(),
            position: record.position.clone(),
            salary,
            prev_years,
            ext_years,
            fifth_year_option,
            candidate_1: candidates[0],
            candidate_2: candidates[1],
            candidate_3: candidates[2],
            expected_year_salary: expected,
            new_salary,
        })
    }
}

/// Contract rows of the candidates up to `season`, limited to the candidates'
/// conferences (rows without a conference are kept)
fn relevant_contracts(
    contracts: &[ContractRecord],
    candidates: &[&ExtensionCandidate],
    season: i32,
) -> Vec<ContractRecord> {
    let players: HashSet<u32> = candidates.iter().map(|c| c.player_id).collect();
    let conferences: HashSet<&str> = candidates
        .iter()
        .filter_map(|c| c.conference.as_deref())
        .collect();

    contracts
        .iter()
        .filter(|row| players.contains(&row.player_id))
        .filter(|row| match row.conference.as_deref() {
            Some(conference) => conferences.contains(conference),
            None => true,
        })
        .filter(|row| row.season <= season)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::fixtures::{contract, roster};
    use crate::contracts::MemorySource;
    use approx::assert_relative_eq;

    /// RB band for 2024: 30, 20, 15, 10 plus elite 35 and 40
    fn rb_roster() -> Vec<RosterEntry> {
        [30.0, 20.0, 15.0, 10.0]
            .iter()
            .enumerate()
            .map(|(i, &s)| roster(100 + i as u32, "RB", 2024, s))
            .collect()
    }

    fn season_row(player_id: u32, season: i32, rank: u32) -> ContractRecord {
        let mut row = contract(player_id, "RB", season);
        row.tot_pts_rank = rank;
        row.avg_pts_rank = rank + 1;
        row.floor_pts_rank = rank + 2;
        row
    }

    fn selection_for(player_id: u32, salary: f64, years: u32, week: u32) -> SelectionContext {
        let mut selection = SelectionContext::new("New York Jets", 2024, week);
        selection.candidates.push(ExtensionCandidate {
            player_id,
            player_name: format!("Player {}", player_id),
            position: "RB".to_string(),
            conference: Some("00".to_string()),
            salary: Some(salary),
            extension_years: years,
        });
        selection
    }

    #[test]
    fn test_project_single_player() {
        let mut latest = season_row(1, 2024, 2);
        latest.contract_years = Some(1);
        let contracts = vec![latest, season_row(1, 2023, 3)];
        let selection = selection_for(1, 12.0, 2, 3);

        let engine = ProjectionEngine::default();
        let rows = engine.project_tables(&contracts, &rb_roster(), &selection).unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.prev_years, 1);
        assert_eq!(row.ext_years, 2);
        assert_eq!(row.fifth_year_option, 0);
        // Rank 2 -> band ranks 1, 2; rank 3 -> band ranks 3, 4
        assert_eq!(row.candidate_1, Some(25.0));
        assert_eq!(row.candidate_2, Some(12.5));
        assert_eq!(row.candidate_3, None);

        // max(12, 25, 12.5) * (1.15 - 0.05 * 2)
        assert_relative_eq!(row.expected_year_salary, 26.25, epsilon = 1e-9);

        // (12 + 26.25 * 1.1 + 26.25 * 1.21) / (1 + 1.1 + 1.21) = 21.944...
        assert_relative_eq!(row.new_salary.unwrap(), 21.94);
    }

    #[test]
    fn test_week_zero_applies_multiplier() {
        let contracts = vec![season_row(1, 2024, 2)];

        let engine = ProjectionEngine::default();
        let offseason = engine
            .project_tables(&contracts, &rb_roster(), &selection_for(1, 5.0, 2, 0))
            .unwrap();
        let in_season = engine
            .project_tables(&contracts, &rb_roster(), &selection_for(1, 5.0, 2, 6))
            .unwrap();

        assert_relative_eq!(offseason[0].candidate_1.unwrap(), 27.5, epsilon = 1e-9);
        assert_relative_eq!(in_season[0].candidate_1.unwrap(), 25.0);
    }

    #[test]
    fn test_fifth_year_option_softens_escalation() {
        let mut row = season_row(1, 2024, 2);
        row.contract_info = Some("5YO".to_string());

        let engine = ProjectionEngine::default();
        let rows = engine
            .project_tables(&[row], &rb_roster(), &selection_for(1, 5.0, 3, 4))
            .unwrap();

        assert_eq!(rows[0].fifth_year_option, 1);
        // 25 * (1.15 - 0.05 * (3 - 1))
        assert_relative_eq!(rows[0].expected_year_salary, 26.25, epsilon = 1e-9);
    }

    #[test]
    fn test_short_extensions_and_empty_selection_project_nothing() {
        let contracts = vec![season_row(1, 2024, 2)];
        let engine = ProjectionEngine::default();

        let rows = engine
            .project_tables(&contracts, &rb_roster(), &selection_for(1, 5.0, 1, 4))
            .unwrap();
        assert!(rows.is_empty());

        let empty = SelectionContext::new("New York Jets", 2024, 0);
        let source = MemorySource::default();
        assert!(engine.project(&source, &empty).unwrap().is_empty());
    }

    #[test]
    fn test_future_seasons_and_other_conferences_are_ignored() {
        let mut other_conference = season_row(1, 2023, 1);
        other_conference.conference = Some("01".to_string());
        let mut no_conference = season_row(1, 2022, 4);
        no_conference.conference = None;
        let contracts = vec![
            season_row(1, 2025, 1),
            season_row(1, 2024, 2),
            other_conference,
            no_conference,
        ];

        let engine = ProjectionEngine::default();
        let rows = engine
            .project_tables(&contracts, &rb_roster(), &selection_for(1, 5.0, 2, 4))
            .unwrap();

        assert_eq!(rows.len(), 1);
        // pr1 from 2024 (rank 2), pr2 from 2022 (rank 4 -> band ranks 5, 6: absent)
        assert_eq!(rows[0].candidate_1, Some(25.0));
        assert_eq!(rows[0].candidate_2, None);
        assert_eq!(rows[0].candidate_3, None);
    }

    #[test]
    fn test_missing_contract_years_is_an_error() {
        let mut row = season_row(1, 2024, 2);
        row.contract_years = None;

        let engine = ProjectionEngine::default();
        let result = engine.project_tables(&[row], &rb_roster(), &selection_for(1, 5.0, 2, 4));
        assert!(matches!(
            result,
            Err(EpvError::MissingField { field: "contract_years", player_id: 1, .. })
        ));
    }

    #[test]
    fn test_zero_total_years_leaves_new_salary_empty() {
        let mut row = season_row(1, 2024, 2);
        row.contract_years = Some(0);

        let engine = ProjectionEngine::new(ProjectionConfig {
            min_extension_years: 0,
            ..Default::default()
        });
        let rows = engine
            .project_tables(&[row], &rb_roster(), &selection_for(1, 5.0, 0, 4))
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].new_salary, None);
    }

    #[test]
    fn test_project_reads_from_data_source() {
        let source = MemorySource::new(vec![season_row(1, 2024, 2)], rb_roster());
        let engine = ProjectionEngine::default();

        let rows = engine.project(&source, &selection_for(1, 5.0, 2, 4)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player_name, "Player 1");
    }

    #[test]
    fn test_unreadable_source_fails_the_projection() {
        use crate::contracts::CsvDataSource;

        let source = CsvDataSource::new("does/not/exist");
        let result = ProjectionEngine::default().project(&source, &selection_for(1, 5.0, 3, 4));
        assert!(matches!(result, Err(EpvError::Csv(_))));
    }

    #[test]
    fn test_project_sample_league() {
        use crate::config::DEFAULT_DATA_DIR;
        use crate::contracts::CsvDataSource;

        let source = CsvDataSource::new(DEFAULT_DATA_DIR);
        let contracts = source.contracts().expect("Failed to load contracts");

        let mut selection = SelectionContext::from_filter(&contracts, "New York Jets", 2024, 0);
        assert_eq!(selection.candidates.len(), 4);
        assert!(selection.set_extension(15241, 3));

        let rows = ProjectionEngine::default()
            .project(&source, &selection)
            .expect("Projection failed");
        assert_eq!(rows.len(), 1);

        let hall = &rows[0];
        assert_eq!(hall.position, "RB");
        assert_eq!(hall.prev_years, 1);
        assert_eq!(hall.fifth_year_option, 1);
        // 2024 rank 3 -> (27.5 + 19) / 2 * 1.1, 2023 rank 2 -> (42.5 + 31) / 2 * 1.1
        assert_relative_eq!(hall.candidate_1.unwrap(), 25.575, epsilon = 1e-9);
        assert_relative_eq!(hall.candidate_2.unwrap(), 40.425, epsilon = 1e-9);
        assert_eq!(hall.candidate_3, None);
        assert_relative_eq!(hall.expected_year_salary, 42.44625, epsilon = 1e-9);
        assert_relative_eq!(hall.new_salary.unwrap(), 35.99);
    }
}

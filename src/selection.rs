//! Caller-owned selection of a team, season, week and extension candidates

use serde::{Deserialize, Serialize};

use crate::contracts::{filter_contracts, ContractRecord, ContractSummary};

/// An expiring contract the user may extend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionCandidate {
    pub player_id: u32,
    pub player_name: String,
    #[serde(rename = "pos")]
    pub position: String,
    pub conference: Option<String>,

    /// Proposed salary for the extension, starts at the current salary
    pub salary: Option<f64>,

    /// Requested extension length; starts at the remaining contract years
    pub extension_years: u32,
}

impl From<ContractSummary> for ExtensionCandidate {
    fn from(summary: ContractSummary) -> Self {
        Self {
            player_id: summary.player_id,
            player_name: summary.player_name,
            position: summary.position,
            conference: summary.conference,
            salary: summary.salary,
            extension_years: summary.contract_years.unwrap_or(0),
        }
    }
}

/// Everything the projection needs to know about the user's choices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionContext {
    pub team: String,
    pub season: i32,
    pub week: u32,
    pub candidates: Vec<ExtensionCandidate>,
}

impl SelectionContext {
    pub fn new(team: impl Into<String>, season: i32, week: u32) -> Self {
        Self {
            team: team.into(),
            season,
            week,
            candidates: Vec::new(),
        }
    }

    /// Start a selection from the team's expiring contracts
    pub fn from_filter(contracts: &[ContractRecord], team: &str, season: i32, week: u32) -> Self {
        let candidates = filter_contracts(contracts, team, season)
            .into_iter()
            .map(ExtensionCandidate::from)
            .collect();

        Self {
            candidates,
            ..Self::new(team, season, week)
        }
    }

    /// Set the requested extension length. Returns `false` for an unknown player.
    pub fn set_extension(&mut self, player_id: u32, years: u32) -> bool {
        match self.candidate_mut(player_id) {
            Some(candidate) => {
                candidate.extension_years = years;
                true
            }
            None => false,
        }
    }

    /// Set the proposed salary. Returns `false` for an unknown player.
    pub fn set_salary(&mut self, player_id: u32, salary: f64) -> bool {
        match self.candidate_mut(player_id) {
            Some(candidate) => {
                candidate.salary = Some(salary);
                true
            }
            None => false,
        }
    }

    /// Candidates with at least `min_years` requested extension years
    pub fn extended(&self, min_years: u32) -> impl Iterator<Item = &ExtensionCandidate> {
        self.candidates
            .iter()
            .filter(move |c| c.extension_years >= min_years)
    }

    fn candidate_mut(&mut self, player_id: u32) -> Option<&mut ExtensionCandidate> {
        self.candidates.iter_mut().find(|c| c.player_id == player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::fixtures::contract;

    #[test]
    fn test_from_filter_and_edits() {
        let mut rows = vec![contract(1, "RB", 2024), contract(2, "QB", 2024)];
        rows[0].contract_years = Some(0);

        let mut selection = SelectionContext::from_filter(&rows, "New York Jets", 2024, 0);
        assert_eq!(selection.candidates.len(), 2);
        assert_eq!(selection.candidates[0].position, "QB");
        assert_eq!(selection.extended(2).count(), 0);

        assert!(selection.set_extension(1, 3));
        assert!(selection.set_salary(1, 25.0));
        assert!(!selection.set_extension(99, 3));

        let extended: Vec<&ExtensionCandidate> = selection.extended(2).collect();
        assert_eq!(extended.len(), 1);
        assert_eq!(extended[0].player_id, 1);
        assert_eq!(extended[0].salary, Some(25.0));
        assert_eq!(extended[0].extension_years, 3);
    }
}

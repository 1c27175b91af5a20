//! Typed rows for the league tables

use serde::{Deserialize, Serialize};

/// Marker in `contract_info` for contracts eligible for the fifth-year option
pub const FIFTH_YEAR_OPTION_MARKER: &str = "5YO";

/// A player's season line joined with their contract (table `contracts`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub player_id: u32,
    pub player_name: String,

    /// Position label as reported by the league host (QB, RB, WR, TE, ...)
    #[serde(rename = "pos")]
    pub position: String,

    /// NFL team abbreviation
    #[serde(default)]
    pub team: Option<String>,

    pub season: i32,

    /// Weeks with a recorded score
    pub num_games: u32,
    pub tot_pts: f64,
    pub avg_pts: f64,

    /// At least the robust minimum of games played this season
    pub is_robust: bool,

    /// Rank by total points within (position, season)
    pub tot_pts_rank: u32,
    /// Rank by average points within (position, season)
    pub avg_pts_rank: u32,
    /// Rank by weekly floor within (position, season)
    pub floor_pts_rank: u32,

    #[serde(default)]
    pub franchise_id: Option<String>,
    #[serde(default)]
    pub franchise_name: Option<String>,
    #[serde(default)]
    pub conference: Option<String>,
    #[serde(default)]
    pub division: Option<String>,

    #[serde(default)]
    pub salary: Option<f64>,

    /// Remaining contract years after this season
    #[serde(default)]
    pub contract_years: Option<u32>,

    /// Free-form contract notes from the league host, e.g. "5YO"
    #[serde(default, rename = "contractInfo")]
    pub contract_info: Option<String>,

    /// Ordinal salary rank within (position, season, conference).
    /// Written by the contract table build, not read by projections.
    #[serde(default)]
    pub salary_rank: Option<u32>,
}

impl ContractRecord {
    /// Whether the contract carries the fifth-year option
    pub fn fifth_year_option(&self) -> bool {
        self.contract_info
            .as_deref()
            .is_some_and(|info| info.contains(FIFTH_YEAR_OPTION_MARKER))
    }

    /// Fifth-year option as the 0/1 flag used in the escalation formula
    pub fn fifth_year_flag(&self) -> u32 {
        u32::from(self.fifth_year_option())
    }
}

/// A rostered player and their salary (table `roster`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub franchise_id: String,
    pub player_id: u32,
    pub player_name: String,
    #[serde(rename = "pos")]
    pub position: String,
    #[serde(default)]
    pub team: Option<String>,
    pub season: i32,
    pub salary: f64,
    #[serde(default)]
    pub contract_years: Option<u32>,
    #[serde(default, rename = "contractInfo")]
    pub contract_info: Option<String>,
}

/// A fantasy franchise for one season (table `franchises`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Franchise {
    pub franchise_id: String,
    pub franchise_name: String,
    pub season: i32,
    #[serde(default)]
    pub conference: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    /// Carried with the franchises table schema
    #[serde(default, rename = "salaryCapAmount")]
    pub salary_cap_amount: Option<f64>,
}

/// Fantasy points scored by a player in one week (table `playerscores`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player_id: u32,
    pub player_name: String,
    #[serde(rename = "pos")]
    pub position: String,
    #[serde(default)]
    pub team: Option<String>,
    pub season: i32,
    pub week: u32,
    pub points: f64,
}

/// Externally computed floor rank (table `floor_ranks`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorRank {
    pub player_id: u32,
    pub season: i32,
    pub floor_pts_rank: u32,
}

/// Projection of a contract row shown when choosing extension candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSummary {
    pub conference: Option<String>,
    pub franchise_name: Option<String>,
    pub player_id: u32,
    pub player_name: String,
    #[serde(rename = "pos")]
    pub position: String,
    pub salary: Option<f64>,
    pub contract_years: Option<u32>,
}

impl From<&ContractRecord> for ContractSummary {
    fn from(record: &ContractRecord) -> Self {
        Self {
            conference: record.conference.clone(),
            franchise_name: record.franchise_name.clone(),
            player_id: record.player_id,
            player_name: record.player_name.clone(),
            position: record.position.clone(),
            salary: record.salary,
            contract_years: record.contract_years,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Contract row with neutral defaults for tests
    pub fn contract(player_id: u32, position: &str, season: i32) -> ContractRecord {
        ContractRecord {
            player_id,
            player_name: format!("Player {}", player_id),
            position: position.to_string(),
            team: None,
            season,
            num_games: 16,
            tot_pts: 200.0,
            avg_pts: 12.5,
            is_robust: true,
            tot_pts_rank: 10,
            avg_pts_rank: 10,
            floor_pts_rank: 10,
            franchise_id: Some("0001".to_string()),
            franchise_name: Some("New York Jets".to_string()),
            conference: Some("00".to_string()),
            division: Some("00".to_string()),
            salary: Some(10.0),
            contract_years: Some(1),
            contract_info: None,
            salary_rank: None,
        }
    }

    pub fn roster(player_id: u32, position: &str, season: i32, salary: f64) -> RosterEntry {
        RosterEntry {
            franchise_id: "0001".to_string(),
            player_id,
            player_name: format!("Player {}", player_id),
            position: position.to_string(),
            team: None,
            season,
            salary,
            contract_years: Some(1),
            contract_info: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::contract;

    #[test]
    fn test_fifth_year_option_flag() {
        let mut record = contract(1, "RB", 2024);
        assert!(!record.fifth_year_option());
        assert_eq!(record.fifth_year_flag(), 0);

        record.contract_info = Some("Rookie 5YO".to_string());
        assert!(record.fifth_year_option());
        assert_eq!(record.fifth_year_flag(), 1);

        record.contract_info = Some("Veteran".to_string());
        assert!(!record.fifth_year_option());
    }
}

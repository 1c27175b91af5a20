//! Projection output rows

use serde::{Deserialize, Serialize};

/// Projected extension salary for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub player_id: u32,
    pub player_name: String,
    #[serde(rename = "pos")]
    pub position: String,

    /// Salary proposed for the extension
    pub salary: f64,

    /// Remaining years on the current contract
    pub prev_years: u32,

    /// Requested extension years
    pub ext_years: u32,

    /// 1 when the contract carries the fifth-year option
    pub fifth_year_option: u32,

    /// Reference salaries for the player's last three robust seasons
    pub candidate_1: Option<f64>,
    pub candidate_2: Option<f64>,
    pub candidate_3: Option<f64>,

    /// Expected salary per extension year
    pub expected_year_salary: f64,

    /// Smoothed salary over all years; `None` when the player has no years
    pub new_salary: Option<f64>,
}

/// Totals over a set of projection rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub players: usize,
    pub total_salary: f64,
    pub total_new_salary: f64,
    /// New minus proposed salary over rows that have a new salary
    pub salary_change: f64,
    /// Rows without a new salary, left out of `total_new_salary`
    pub unresolved: usize,
}

impl ProjectionSummary {
    pub fn from_rows(rows: &[ProjectionRow]) -> Self {
        Self {
            players: rows.len(),
            total_salary: rows.iter().map(|r| r.salary).sum(),
            total_new_salary: rows.iter().filter_map(|r| r.new_salary).sum(),
            salary_change: rows
                .iter()
                .filter_map(|r| r.new_salary.map(|new| new - r.salary))
                .sum(),
            unresolved: rows.iter().filter(|r| r.new_salary.is_none()).count(),
        }
    }
}

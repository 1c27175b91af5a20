//! Contract selection for the extension workflow

use std::collections::HashSet;

use super::{ContractRecord, ContractSummary};

/// Label used for players without a franchise
pub const FREE_AGENT: &str = "Free Agent";

/// Contracts of `team` in `season` with at most one remaining year, ordered by position.
///
/// An unknown team or season yields an empty list, same as a team with no
/// expiring contracts.
pub fn filter_contracts(rows: &[ContractRecord], team: &str, season: i32) -> Vec<ContractSummary> {
    let mut selected: Vec<ContractSummary> = rows
        .iter()
        .filter(|row| row.franchise_name.as_deref() == Some(team))
        .filter(|row| row.season == season)
        .filter(|row| row.contract_years.is_some_and(|years| years <= 1))
        .map(ContractSummary::from)
        .collect();

    // Stable: equal positions keep table order
    selected.sort_by(|a, b| a.position.cmp(&b.position));
    selected
}

/// Distinct franchise names ordered by division, with free agents labelled
pub fn unique_teams(rows: &[ContractRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut teams: Vec<(Option<&str>, String)> = Vec::new();

    for row in rows {
        let name = row.franchise_name.as_deref().unwrap_or(FREE_AGENT);
        if seen.insert(name) {
            teams.push((row.division.as_deref(), name.to_string()));
        }
    }

    teams.sort_by(|(div_a, name_a), (div_b, name_b)| match (div_a, div_b) {
        (Some(a), Some(b)) => a.cmp(b).then_with(|| name_a.cmp(name_b)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => name_a.cmp(name_b),
    });

    teams.into_iter().map(|(_, name)| name).collect()
}

/// Seasons present in the table, most recent first
pub fn seasons(rows: &[ContractRecord]) -> Vec<i32> {
    let mut seasons: Vec<i32> = rows.iter().map(|row| row.season).collect();
    seasons.sort_unstable_by(|a, b| b.cmp(a));
    seasons.dedup();
    seasons
}

/// Selectable weeks, 0 (offseason) through `max_week`
pub fn weeks(max_week: u32) -> Vec<u32> {
    (0..=max_week).collect()
}

//! Build the `contracts` table from season lines and league rosters

use log::warn;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};

use super::rank::rank_ordinal_descending;
use super::season::SeasonLine;
use crate::contracts::{ContractRecord, FloorRank, Franchise, RosterEntry};

/// Join season lines with rosters, franchises and floor ranks.
///
/// Players without a roster spot keep empty franchise and salary columns.
/// Seasons are independent and are built in parallel; the output is ordered
/// by season, then player.
pub fn build_contract_table(
    lines: &[SeasonLine],
    roster: &[RosterEntry],
    franchises: &[Franchise],
    floor_ranks: &[FloorRank],
) -> Vec<ContractRecord> {
    let mut by_season: BTreeMap<i32, Vec<&SeasonLine>> = BTreeMap::new();
    for line in lines {
        by_season.entry(line.season).or_default().push(line);
    }

    let roster_index: HashMap<(u32, i32), &RosterEntry> = roster
        .iter()
        .map(|entry| ((entry.player_id, entry.season), entry))
        .collect();
    let franchise_index: HashMap<(&str, i32), &Franchise> = franchises
        .iter()
        .map(|f| ((f.franchise_id.as_str(), f.season), f))
        .collect();
    let floor_index: HashMap<(u32, i32), u32> = floor_ranks
        .iter()
        .map(|f| ((f.player_id, f.season), f.floor_pts_rank))
        .collect();

    let seasons: Vec<(i32, Vec<&SeasonLine>)> = by_season.into_iter().collect();

    seasons
        .par_iter()
        .flat_map_iter(|(season, lines)| {
            let mut records: Vec<ContractRecord> = lines
                .iter()
                .map(|line| join_line(line, &roster_index, &franchise_index))
                .collect();
            attach_floor_ranks(&mut records, &floor_index, *season);
            assign_salary_ranks(&mut records);
            records
        })
        .collect()
}

fn join_line(
    line: &SeasonLine,
    roster_index: &HashMap<(u32, i32), &RosterEntry>,
    franchise_index: &HashMap<(&str, i32), &Franchise>,
) -> ContractRecord {
    let entry = roster_index.get(&(line.player_id, line.season)).copied();
    let franchise = entry.and_then(|e| franchise_index.get(&(e.franchise_id.as_str(), line.season)).copied());

    ContractRecord {
        player_id: line.player_id,
        player_name: line.player_name.clone(),
        position: line.position.clone(),
        team: line.team.clone(),
        season: line.season,
        num_games: line.num_games,
        tot_pts: line.tot_pts,
        avg_pts: line.avg_pts,
        is_robust: line.is_robust,
        tot_pts_rank: line.tot_pts_rank,
        avg_pts_rank: line.avg_pts_rank,
        floor_pts_rank: 0,
        franchise_id: entry.map(|e| e.franchise_id.clone()),
        franchise_name: franchise.map(|f| f.franchise_name.clone()),
        conference: franchise.and_then(|f| f.conference.clone()),
        division: franchise.and_then(|f| f.division.clone()),
        salary: entry.map(|e| e.salary),
        contract_years: entry.and_then(|e| e.contract_years),
        contract_info: entry.and_then(|e| e.contract_info.clone()),
        salary_rank: None,
    }
}

/// Attach floor ranks; a player without one gets the worst rank of their position
fn attach_floor_ranks(records: &mut [ContractRecord], floor_index: &HashMap<(u32, i32), u32>, season: i32) {
    let mut group_sizes: HashMap<String, u32> = HashMap::new();
    for record in records.iter() {
        *group_sizes.entry(record.position.clone()).or_default() += 1;
    }

    let mut missing = 0;
    for record in records.iter_mut() {
        record.floor_pts_rank = match floor_index.get(&(record.player_id, season)) {
            Some(&rank) => rank,
            None => {
                missing += 1;
                group_sizes[&record.position]
            }
        };
    }

    if missing > 0 {
        warn!(
            "{} players in season {} have no floor rank; using the last rank of their position",
            missing, season
        );
    }
}

/// Ordinal salary rank within (position, conference) for rostered players
fn assign_salary_ranks(records: &mut [ContractRecord]) {
    let mut groups: BTreeMap<(String, Option<String>), Vec<usize>> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        if record.salary.is_some() {
            groups
                .entry((record.position.clone(), record.conference.clone()))
                .or_default()
                .push(index);
        }
    }

    for indices in groups.values() {
        let salaries: Vec<f64> = indices
            .iter()
            .map(|&i| records[i].salary.unwrap_or_default())
            .collect();
        for (k, rank) in rank_ordinal_descending(&salaries).into_iter().enumerate() {
            records[indices[k]].salary_rank = Some(rank);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::fixtures::roster;

    fn line(player_id: u32, position: &str, season: i32, tot_pts_rank: u32) -> SeasonLine {
        SeasonLine {
            player_id,
            player_name: format!("Player {}", player_id),
            position: position.to_string(),
            team: None,
            season,
            num_games: 10,
            tot_pts: 100.0,
            avg_pts: 10.0,
            is_robust: true,
            tot_pts_rank,
            avg_pts_rank: tot_pts_rank,
        }
    }

    fn franchise(id: &str, name: &str, season: i32) -> Franchise {
        Franchise {
            franchise_id: id.to_string(),
            franchise_name: name.to_string(),
            season,
            conference: Some("00".to_string()),
            division: Some("01".to_string()),
            salary_cap_amount: Some(250.0),
        }
    }

    #[test]
    fn test_build_joins_roster_and_franchise() {
        let lines = vec![line(1, "RB", 2024, 1), line(2, "RB", 2024, 2), line(3, "RB", 2024, 3)];
        let mut rostered = roster(1, "RB", 2024, 30.0);
        rostered.contract_info = Some("5YO".to_string());
        let roster_rows = vec![rostered, roster(2, "RB", 2024, 45.0)];
        let franchises = vec![franchise("0001", "New York Jets", 2024)];
        let floors = vec![FloorRank { player_id: 1, season: 2024, floor_pts_rank: 2 }];

        let records = build_contract_table(&lines, &roster_rows, &franchises, &floors);
        assert_eq!(records.len(), 3);

        let first = records.iter().find(|r| r.player_id == 1).unwrap();
        assert_eq!(first.franchise_name.as_deref(), Some("New York Jets"));
        assert_eq!(first.salary, Some(30.0));
        assert_eq!(first.floor_pts_rank, 2);
        assert!(first.fifth_year_option());
        assert_eq!(first.salary_rank, Some(2));

        let second = records.iter().find(|r| r.player_id == 2).unwrap();
        assert_eq!(second.salary_rank, Some(1));
        // No floor rank supplied: last of three RBs
        assert_eq!(second.floor_pts_rank, 3);

        let unrostered = records.iter().find(|r| r.player_id == 3).unwrap();
        assert_eq!(unrostered.franchise_name, None);
        assert_eq!(unrostered.salary, None);
        assert_eq!(unrostered.salary_rank, None);
    }

    #[test]
    fn test_build_keeps_seasons_separate() {
        let lines = vec![line(1, "QB", 2023, 1), line(1, "QB", 2024, 1)];
        let roster_rows = vec![roster(1, "QB", 2023, 20.0)];
        let franchises = vec![franchise("0001", "New York Jets", 2023)];

        let records = build_contract_table(&lines, &roster_rows, &franchises, &[]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].season, 2023);
        assert_eq!(records[0].salary, Some(20.0));
        assert_eq!(records[1].season, 2024);
        assert_eq!(records[1].salary, None);
    }
}

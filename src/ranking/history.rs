//! Recent rank history per player
//!
//! A player's value is benchmarked against their best rank in each of the
//! last three robust seasons. `pr1` is the latest robust season, `pr2` and
//! `pr3` the two robust seasons before it.

use super::rank::MinRank;
use crate::contracts::ContractRecord;

/// A player's latest robust season together with their recent best ranks
#[derive(Debug, Clone, PartialEq)]
pub struct RankHistory {
    /// Contract row of the latest robust season
    pub record: ContractRecord,
    pub min_rank: MinRank,
    pub pr1: u32,
    pub pr2: Option<u32>,
    pub pr3: Option<u32>,
}

impl RankHistory {
    /// The three rank slots in order, missing slots as `None`
    pub fn ranks(&self) -> [Option<u32>; 3] {
        [Some(self.pr1), self.pr2, self.pr3]
    }
}

/// Build the rank history of every player in `rows`.
///
/// Rows that are not robust are dropped before history is taken, so a season
/// with too few games neither counts as the latest season nor fills a prior
/// slot. Output is ordered by player id.
pub fn recent_rank_history(rows: &[ContractRecord]) -> Vec<RankHistory> {
    let mut robust: Vec<(&ContractRecord, MinRank)> = rows
        .iter()
        .filter(|row| row.is_robust)
        .map(|row| (row, MinRank::of(row.tot_pts_rank, row.avg_pts_rank, row.floor_pts_rank)))
        .collect();

    // Player ascending, most recent season first
    robust.sort_by(|(a, _), (b, _)| a.player_id.cmp(&b.player_id).then(b.season.cmp(&a.season)));

    let mut history = Vec::new();
    for group in robust.chunk_by(|(a, _), (b, _)| a.player_id == b.player_id) {
        let latest = group[0].0.season;
        for (offset, (record, min_rank)) in group.iter().enumerate() {
            if record.season != latest {
                break;
            }
            let shifted = |by: usize| group.get(offset + by).map(|(_, rank)| rank.value);
            history.push(RankHistory {
                record: (*record).clone(),
                min_rank: *min_rank,
                pr1: min_rank.value,
                pr2: shifted(1),
                pr3: shifted(2),
            });
        }
    }
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::fixtures::contract;

    fn ranked(player_id: u32, season: i32, tot: u32, avg: u32, floor: u32) -> ContractRecord {
        let mut row = contract(player_id, "WR", season);
        row.tot_pts_rank = tot;
        row.avg_pts_rank = avg;
        row.floor_pts_rank = floor;
        row
    }

    #[test]
    fn test_history_takes_latest_season_and_two_prior() {
        let rows = vec![
            ranked(7, 2021, 30, 30, 30),
            ranked(7, 2024, 5, 8, 9),
            ranked(7, 2022, 20, 12, 25),
            ranked(7, 2023, 14, 15, 3),
        ];

        let history = recent_rank_history(&rows);
        assert_eq!(history.len(), 1);

        let h = &history[0];
        assert_eq!(h.record.season, 2024);
        assert_eq!(h.ranks(), [Some(5), Some(3), Some(12)]);
    }

    #[test]
    fn test_history_skips_non_robust_seasons() {
        let mut latest = ranked(3, 2024, 1, 1, 1);
        latest.is_robust = false;
        let rows = vec![latest, ranked(3, 2023, 9, 9, 9), ranked(3, 2022, 4, 6, 6)];

        let history = recent_rank_history(&rows);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].record.season, 2023);
        assert_eq!(history[0].ranks(), [Some(9), Some(4), None]);
    }

    #[test]
    fn test_history_with_single_season_leaves_prior_slots_empty() {
        let rows = vec![ranked(2, 2024, 11, 10, 12), ranked(1, 2024, 4, 4, 4)];
        let history = recent_rank_history(&rows);

        let ids: Vec<u32> = history.iter().map(|h| h.record.player_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(history[1].ranks(), [Some(10), None, None]);
    }

    #[test]
    fn test_player_without_robust_season_has_no_history() {
        let mut row = ranked(4, 2024, 1, 1, 1);
        row.is_robust = false;
        assert!(recent_rank_history(&[row]).is_empty());
    }
}

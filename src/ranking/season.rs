//! Season lines aggregated from weekly player scores

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::rank::rank_max_descending;
use crate::contracts::PlayerScore;

/// One player's scoring summary for a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonLine {
    pub player_id: u32,
    pub player_name: String,
    pub position: String,
    pub team: Option<String>,
    pub season: i32,
    pub num_games: u32,
    pub tot_pts: f64,
    pub avg_pts: f64,
    pub is_robust: bool,
    pub tot_pts_rank: u32,
    pub avg_pts_rank: u32,
}

/// Group weekly scores by (player, season) and rank the totals and averages
/// within (position, season).
///
/// Name, position and team come from the player's first score of the season.
/// A season is robust when the player scored in at least `robust_min_games` weeks.
pub fn aggregate_season_lines(scores: &[PlayerScore], robust_min_games: u32) -> Vec<SeasonLine> {
    let mut grouped: BTreeMap<(u32, i32), SeasonLine> = BTreeMap::new();

    for score in scores {
        let line = grouped
            .entry((score.player_id, score.season))
            .or_insert_with(|| SeasonLine {
                player_id: score.player_id,
                player_name: score.player_name.clone(),
                position: score.position.clone(),
                team: score.team.clone(),
                season: score.season,
                num_games: 0,
                tot_pts: 0.0,
                avg_pts: 0.0,
                is_robust: false,
                tot_pts_rank: 0,
                avg_pts_rank: 0,
            });
        line.num_games += 1;
        line.tot_pts += score.points;
    }

    let mut lines: Vec<SeasonLine> = grouped.into_values().collect();
    for line in &mut lines {
        line.avg_pts = line.tot_pts / line.num_games as f64;
        line.is_robust = line.num_games >= robust_min_games;
    }

    assign_point_ranks(&mut lines);
    lines
}

/// Rank total and average points within each (position, season) group
fn assign_point_ranks(lines: &mut [SeasonLine]) {
    let mut groups: BTreeMap<(String, i32), Vec<usize>> = BTreeMap::new();
    for (index, line) in lines.iter().enumerate() {
        groups
            .entry((line.position.clone(), line.season))
            .or_default()
            .push(index);
    }

    for indices in groups.values() {
        let totals: Vec<f64> = indices.iter().map(|&i| lines[i].tot_pts).collect();
        let averages: Vec<f64> = indices.iter().map(|&i| lines[i].avg_pts).collect();
        let tot_ranks = rank_max_descending(&totals);
        let avg_ranks = rank_max_descending(&averages);

        for (k, &i) in indices.iter().enumerate() {
            lines[i].tot_pts_rank = tot_ranks[k];
            lines[i].avg_pts_rank = avg_ranks[k];
        }
    }
}

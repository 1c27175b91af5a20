//! Rank primitives for per-position leaderboards

use serde::{Deserialize, Serialize};

/// Rank values in descending order, ties sharing the largest rank of their group.
///
/// `[30, 20, 20, 10]` ranks as `[1, 3, 3, 4]`: each value's rank is the
/// number of values greater than or equal to it.
pub fn rank_max_descending(values: &[f64]) -> Vec<u32> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    values
        .iter()
        .map(|&v| sorted.partition_point(|&x| x >= v) as u32)
        .collect()
}

/// Rank values in descending order without ties; equal values are ranked by input order
pub fn rank_ordinal_descending(values: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    // sort_by is stable, so equal values keep input order
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut ranks = vec![0; values.len()];
    for (position, &index) in order.iter().enumerate() {
        ranks[index] = position as u32 + 1;
    }
    ranks
}

/// Which of the three performance ranks was chosen as a player's best rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankSource {
    TotalPoints,
    AveragePoints,
    FloorPoints,
}

/// Best (smallest) of a season's total, average and floor ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinRank {
    pub value: u32,
    pub source: RankSource,
}

impl MinRank {
    /// Pick the best rank. On equal ranks total points wins over average
    /// points, which wins over the floor rank.
    pub fn of(tot_pts_rank: u32, avg_pts_rank: u32, floor_pts_rank: u32) -> Self {
        if tot_pts_rank <= avg_pts_rank && tot_pts_rank <= floor_pts_rank {
            Self {
                value: tot_pts_rank,
                source: RankSource::TotalPoints,
            }
        } else if avg_pts_rank <= tot_pts_rank && avg_pts_rank <= floor_pts_rank {
            Self {
                value: avg_pts_rank,
                source: RankSource::AveragePoints,
            }
        } else {
            Self {
                value: floor_pts_rank,
                source: RankSource::FloorPoints,
            }
        }
    }
}

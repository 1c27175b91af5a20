//! Reference salary bands
//!
//! Salaries of one season are ranked within each position, highest first.
//! Two synthetic entries above the top salary extend each band into an
//! "elite" tier: rank 0 and rank -1.

use std::collections::{BTreeMap, HashMap};

use crate::contracts::RosterEntry;
use crate::ranking::rank_ordinal_descending;

/// Rank of the first synthetic elite entry
pub const ELITE_RANK_1: i64 = 0;
/// Rank of the second synthetic elite entry
pub const ELITE_RANK_2: i64 = -1;

/// Per-position salary ladders for one season
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceBands {
    season: i32,
    bands: HashMap<String, BTreeMap<i64, f64>>,
}

impl ReferenceBands {
    /// Build the bands from the roster of `season`.
    ///
    /// Equal salaries are ranked by roster order. A position needs at least
    /// `elite_min_entries` salaries, and never fewer than four, to receive the
    /// two elite entries.
    pub fn build(roster: &[RosterEntry], season: i32, elite_min_entries: usize) -> Self {
        let mut salaries_by_position: HashMap<&str, Vec<f64>> = HashMap::new();
        for entry in roster.iter().filter(|e| e.season == season) {
            salaries_by_position
                .entry(entry.position.as_str())
                .or_default()
                .push(entry.salary);
        }

        let mut bands = HashMap::new();
        for (position, salaries) in salaries_by_position {
            let mut band: BTreeMap<i64, f64> = rank_ordinal_descending(&salaries)
                .into_iter()
                .zip(salaries.iter().copied())
                .map(|(rank, salary)| (i64::from(rank), salary))
                .collect();

            if band.len() >= elite_min_entries.max(4) {
                let top: Vec<f64> = band.range(1..=4).map(|(_, &s)| s).collect();
                let (elite_1, elite_2) = elite_salaries(top[0], top[1], top[2], top[3]);
                band.insert(ELITE_RANK_1, elite_1);
                band.insert(ELITE_RANK_2, elite_2);
            }

            bands.insert(position.to_string(), band);
        }

        Self { season, bands }
    }

    pub fn season(&self) -> i32 {
        self.season
    }

    /// Positions with at least one salary
    pub fn positions(&self) -> impl Iterator<Item = &str> {
        self.bands.keys().map(String::as_str)
    }

    /// Salary stored at `rank` for `position`, including the elite ranks
    pub fn salary_at(&self, position: &str, rank: i64) -> Option<f64> {
        self.bands.get(position)?.get(&rank).copied()
    }

    /// Whether `position` received the synthetic elite entries
    pub fn has_elite_tier(&self, position: &str) -> bool {
        self.salary_at(position, ELITE_RANK_1).is_some()
    }

    /// Reference salary for a player of `position` ranked `rank`.
    ///
    /// Rank r maps onto band ranks 2r-3 and 2r-2; the result is the mean of
    /// whichever of the two exist, times `multiplier`. Rank 1 therefore lands
    /// on the two elite entries. `None` when neither band rank exists.
    pub fn lookup(&self, position: &str, rank: u32, multiplier: f64) -> Option<f64> {
        let band = self.bands.get(position)?;
        let rank = i64::from(rank);

        let found: Vec<f64> = [2 * rank - 3, 2 * rank - 2]
            .iter()
            .filter_map(|r| band.get(r).copied())
            .collect();

        if found.is_empty() {
            None
        } else {
            Some(multiplier * found.iter().sum::<f64>() / found.len() as f64)
        }
    }
}

/// Extrapolate two salaries above the top of a band from its four highest salaries.
///
/// The second elite salary continues the step from `max` to the first, so the
/// three values form an arithmetic sequence.
pub fn elite_salaries(max: f64, second: f64, third: f64, fourth: f64) -> (f64, f64) {
    let elite_1 = max + (2.0 * second - third - fourth) / 3.0;
    let elite_2 = 2.0 * elite_1 - max;
    (elite_1, elite_2)
}

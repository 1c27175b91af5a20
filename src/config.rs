//! League configuration
//!
//! Defaults match the league the tool was built for. Every value can be
//! overridden through environment variables:
//!   EPV_DATA_DIR, EPV_START_YEAR, EPV_DEFAULT_SEASON, EPV_LEAGUE_ID,
//!   EPV_DEFAULT_TEAM, EPV_DEFAULT_WEEK

use chrono::{Datelike, NaiveDate};
use std::env;
use std::path::PathBuf;

use crate::error::{EpvError, Result};

/// Default directory holding one CSV file per league table
pub const DEFAULT_DATA_DIR: &str = "data/league";

/// First season with scraped league data
pub const START_YEAR: i32 = 2020;

/// Season selected when nothing else is configured
pub const DEFAULT_SEASON: i32 = 2024;

/// MyFantasyLeague league identifier
pub const LEAGUE_ID: u32 = 60206;

pub const DEFAULT_TEAM: &str = "New York Jets";

/// Week 0 is the offseason snapshot before any games are played
pub const DEFAULT_WEEK: u32 = 0;

/// Last regular season week
pub const MAX_WEEK: u32 = 17;

/// Month in which a new season starts (September)
const SEASON_START_MONTH: u32 = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueConfig {
    pub data_dir: PathBuf,
    pub start_year: i32,
    pub default_season: i32,
    /// League the tables were scraped from; carried with the table schema
    pub league_id: u32,
    pub default_team: String,
    pub default_week: u32,
    pub max_week: u32,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            start_year: START_YEAR,
            default_season: DEFAULT_SEASON,
            league_id: LEAGUE_ID,
            default_team: DEFAULT_TEAM.to_string(),
            default_week: DEFAULT_WEEK,
            max_week: MAX_WEEK,
        }
    }
}

impl LeagueConfig {
    /// Build the configuration from environment variables, falling back to defaults.
    ///
    /// An unset `EPV_DEFAULT_SEASON` resolves to the most recently started season.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let data_dir = env::var("EPV_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let start_year = env_or("EPV_START_YEAR", defaults.start_year);

        let default_season = env::var("EPV_DEFAULT_SEASON")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| current_season(chrono::Local::now().date_naive()));

        let league_id = env_or("EPV_LEAGUE_ID", defaults.league_id);
        let default_team = env::var("EPV_DEFAULT_TEAM").unwrap_or(defaults.default_team);
        let default_week = env_or("EPV_DEFAULT_WEEK", defaults.default_week);

        let config = Self {
            data_dir,
            start_year,
            default_season,
            league_id,
            default_team,
            default_week,
            max_week: defaults.max_week,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the configured season and week are inside the supported range
    pub fn validate(&self) -> Result<()> {
        if self.default_season < self.start_year {
            return Err(EpvError::InvalidConfig(format!(
                "default season {} is before start year {}",
                self.default_season, self.start_year
            )));
        }
        if self.default_week > self.max_week {
            return Err(EpvError::InvalidConfig(format!(
                "default week {} is after week {}",
                self.default_week, self.max_week
            )));
        }
        Ok(())
    }

    /// Seasons with league data, oldest first
    pub fn season_range(&self) -> std::ops::RangeInclusive<i32> {
        self.start_year..=self.default_season
    }
}

/// Season that was most recently kicked off as of `today`
pub fn current_season(today: NaiveDate) -> i32 {
    if today.month() >= SEASON_START_MONTH {
        today.year()
    } else {
        today.year() - 1
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_season_rolls_over_in_september() {
        let august = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        let september = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let january = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

        assert_eq!(current_season(august), 2024);
        assert_eq!(current_season(september), 2025);
        assert_eq!(current_season(january), 2025);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = LeagueConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.season_range().count(), 5);
    }

    #[test]
    fn test_validate_rejects_season_before_start() {
        let config = LeagueConfig {
            default_season: 2019,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EpvError::InvalidConfig(_))));
    }
}

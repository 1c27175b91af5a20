//! Candidate reference salaries and the expected year salary

use super::bands::ReferenceBands;

/// Reference salaries for a player's three rank slots; missing slots stay `None`
pub fn candidate_salaries(
    bands: &ReferenceBands,
    position: &str,
    ranks: [Option<u32>; 3],
    multiplier: f64,
) -> [Option<f64>; 3] {
    ranks.map(|rank| rank.and_then(|r| bands.lookup(position, r, multiplier)))
}

/// Escalation applied to the expected salary: `base - step * (ext_years - fifth_year_flag)`
pub fn escalation_factor(ext_years: u32, fifth_year_flag: u32, base: f64, step: f64) -> f64 {
    base - step * (f64::from(ext_years) - f64::from(fifth_year_flag))
}

/// Highest of the current salary and the present candidates, times `escalation`.
///
/// Missing candidates are ignored, never counted as zero.
pub fn expected_year_salary(current_salary: f64, candidates: &[Option<f64>], escalation: f64) -> f64 {
    let ceiling = candidates
        .iter()
        .flatten()
        .copied()
        .fold(current_salary, f64::max);
    ceiling * escalation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::fixtures::roster;
    use approx::assert_relative_eq;

    #[test]
    fn test_escalation_factor() {
        assert_relative_eq!(escalation_factor(2, 0, 1.15, 0.05), 1.05, epsilon = 1e-12);
        assert_relative_eq!(escalation_factor(3, 1, 1.15, 0.05), 1.05, epsilon = 1e-12);
        assert_relative_eq!(escalation_factor(4, 0, 1.15, 0.05), 0.95, epsilon = 1e-12);
    }

    #[test]
    fn test_expected_year_salary_ignores_missing_candidates() {
        let eys = expected_year_salary(10.0, &[None, Some(8.0), None], 1.0);
        assert_relative_eq!(eys, 10.0);

        let eys = expected_year_salary(10.0, &[Some(12.0), None, Some(30.0)], 1.05);
        assert_relative_eq!(eys, 31.5, epsilon = 1e-9);

        let eys = expected_year_salary(4.0, &[None, None, None], 1.1);
        assert_relative_eq!(eys, 4.4, epsilon = 1e-9);
    }

    #[test]
    fn test_candidate_salaries_from_bands() {
        let rows: Vec<_> = [30.0, 20.0, 15.0, 10.0]
            .iter()
            .enumerate()
            .map(|(i, &s)| roster(i as u32 + 1, "RB", 2024, s))
            .collect();
        let bands = ReferenceBands::build(&rows, 2024, 4);

        let candidates = candidate_salaries(&bands, "RB", [Some(2), Some(9), None], 1.0);
        assert_eq!(candidates[0], Some(25.0));
        assert_eq!(candidates[1], None);
        assert_eq!(candidates[2], None);
    }
}

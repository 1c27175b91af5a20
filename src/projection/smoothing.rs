//! Salary smoothing over the remaining and extended contract years
//!
//! The player is owed `prev_years` at the current salary and `ext_years` at
//! the expected year salary, with every year weighted by a growth factor
//! `g^i`. The smoothed salary is the flat amount with the same weighted total:
//!
//! ```text
//! new = (sum_{i<P} S*g^i + sum_{P<=i<P+X} E*g^i) / sum_{i<P+X} g^i
//! ```

/// Flat salary over `prev_years + ext_years`, rounded to cents.
///
/// Returns `None` when there are no years to spread the salary over, or when
/// the year count does not fit in a `u32`.
pub fn smoothed_salary(
    current_salary: f64,
    expected_year_salary: f64,
    prev_years: u32,
    ext_years: u32,
    growth_rate: f64,
) -> Option<f64> {
    let total_years = prev_years.checked_add(ext_years)?;
    if total_years == 0 {
        return None;
    }

    let weight = |i: u32| growth_rate.powi(i as i32);

    let current_total: f64 = (0..prev_years).map(|i| current_salary * weight(i)).sum();
    let extension_total: f64 = (prev_years..total_years)
        .map(|i| expected_year_salary * weight(i))
        .sum();
    let denominator: f64 = (0..total_years).map(weight).sum();

    Some(round_cents((current_total + extension_total) / denominator))
}

/// Round to two decimal places
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

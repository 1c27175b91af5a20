//! EPV projection: reference salary bands, candidate blending and salary smoothing

mod bands;
mod blend;
mod smoothing;
mod engine;
mod result;

pub use bands::{elite_salaries, ReferenceBands, ELITE_RANK_1, ELITE_RANK_2};
pub use blend::{candidate_salaries, escalation_factor, expected_year_salary};
pub use smoothing::{round_cents, smoothed_salary};
pub use engine::{ProjectionConfig, ProjectionEngine};
pub use result::{ProjectionRow, ProjectionSummary};

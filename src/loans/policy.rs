use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SALARY_THRESHOLD: i64 = 65_000;
pub const DEFAULT_MINIMUM_SCORE: i32 = 300;

/// Lending policy dials applied by the processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPolicy {
    /// Applications with a salary strictly below this are declined up front.
    pub salary_threshold: Decimal,
    /// Inclusive lower bound on an acceptable credit score.
    pub minimum_score: i32,
}

impl LoanPolicy {
    pub fn new(salary_threshold: Decimal, minimum_score: i32) -> Self {
        Self {
            salary_threshold,
            minimum_score,
        }
    }

    pub fn salary_qualifies(&self, salary: Decimal) -> bool {
        salary >= self.salary_threshold
    }

    pub fn score_qualifies(&self, score: i32) -> bool {
        score >= self.minimum_score
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self::new(
            Decimal::from(DEFAULT_SALARY_THRESHOLD),
            DEFAULT_MINIMUM_SCORE,
        )
    }
}

use serde::{Deserialize, Serialize};

/// Failure raised when a scorer cannot compute a score.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("credit scoring unavailable: {0}")]
    Unavailable(String),
    #[error("credit scorer reported success without a score result")]
    MissingResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreValue {
    pub score: i32,
}

/// Result of the latest successful scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score_value: ScoreValue,
}

impl ScoreResult {
    pub fn new(score: i32) -> Self {
        Self {
            score_value: ScoreValue { score },
        }
    }

    pub fn score(&self) -> i32 {
        self.score_value.score
    }
}

/// Invocation counter and last result owned by a scorer instance.
///
/// Single writer: only the owning scorer (or the processor holding it mutably)
/// updates this state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringState {
    count: u32,
    result: Option<ScoreResult>,
}

impl ScoringState {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    /// Store a successful result and count the invocation.
    pub fn record(&mut self, result: ScoreResult) {
        self.store(result);
        self.note_attempt();
    }

    /// Replace the stored result without counting.
    pub fn store(&mut self, result: ScoreResult) {
        self.result = Some(result);
    }

    /// Count an invocation without touching the stored result.
    pub fn note_attempt(&mut self) {
        self.count += 1;
    }
}

/// Capability for scoring an applicant's credit.
pub trait CreditScorer {
    /// On success the implementation calls [`ScoringState::record`]; on failure
    /// the state must be left as it was.
    fn calculate_score(&mut self, name: &str, address: &str) -> Result<(), ScoringError>;

    fn state(&self) -> &ScoringState;

    fn state_mut(&mut self) -> &mut ScoringState;

    fn count(&self) -> u32 {
        self.state().count()
    }

    fn score_result(&self) -> Option<&ScoreResult> {
        self.state().result()
    }
}

impl<S: CreditScorer + ?Sized> CreditScorer for &mut S {
    fn calculate_score(&mut self, name: &str, address: &str) -> Result<(), ScoringError> {
        (**self).calculate_score(name, address)
    }

    fn state(&self) -> &ScoringState {
        (**self).state()
    }

    fn state_mut(&mut self) -> &mut ScoringState {
        (**self).state_mut()
    }
}

impl<S: CreditScorer + ?Sized> CreditScorer for Box<S> {
    fn calculate_score(&mut self, name: &str, address: &str) -> Result<(), ScoringError> {
        (**self).calculate_score(name, address)
    }

    fn state(&self) -> &ScoringState {
        (**self).state()
    }

    fn state_mut(&mut self) -> &mut ScoringState {
        (**self).state_mut()
    }
}

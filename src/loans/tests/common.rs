use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::loans::domain::{LoanAmount, LoanApplication, LoanProduct};
use crate::loans::scoring::{CreditScorer, ScoreResult, ScoringError, ScoringState};
use crate::loans::verification::{IdentityVerifier, VerificationError, VerificationGateway};

pub(super) const APPLICANT: &str = "Sarah";
pub(super) const AGE: u32 = 25;
pub(super) const ADDRESS: &str = "133 Pluralsight Drive, Draper, Utah";

pub(super) fn product() -> LoanProduct {
    LoanProduct::new(99, "Loan", Decimal::new(525, 2))
}

pub(super) fn amount() -> LoanAmount {
    LoanAmount::new("USD", Decimal::from(200_000))
}

pub(super) fn application(salary: i64) -> LoanApplication {
    LoanApplication::new(
        42,
        product(),
        amount(),
        APPLICANT,
        AGE,
        ADDRESS,
        Decimal::from(salary),
    )
}

pub(super) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum VerifierCall {
    Initialize,
    Validate {
        name: String,
        age: u32,
        address: String,
    },
}

/// Verifier fake that records every call in order.
#[derive(Debug)]
pub(super) struct RecordingVerifier {
    pub(super) calls: Vec<VerifierCall>,
    initialize_result: Result<(), VerificationError>,
    validate_result: Result<bool, VerificationError>,
}

impl RecordingVerifier {
    pub(super) fn answering(verified: bool) -> Self {
        Self {
            calls: Vec::new(),
            initialize_result: Ok(()),
            validate_result: Ok(verified),
        }
    }

    pub(super) fn failing_initialize() -> Self {
        Self {
            calls: Vec::new(),
            initialize_result: Err(VerificationError::Initialization(
                "session refused".to_string(),
            )),
            validate_result: Ok(true),
        }
    }

    pub(super) fn unavailable() -> Self {
        Self {
            calls: Vec::new(),
            initialize_result: Ok(()),
            validate_result: Err(VerificationError::Unavailable("timeout".to_string())),
        }
    }

    pub(super) fn validate_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, VerifierCall::Validate { .. }))
            .count()
    }
}

impl IdentityVerifier for RecordingVerifier {
    fn initialize(&mut self) -> Result<(), VerificationError> {
        self.calls.push(VerifierCall::Initialize);
        self.initialize_result.clone()
    }

    fn validate(
        &mut self,
        name: &str,
        age: u32,
        address: &str,
    ) -> Result<bool, VerificationError> {
        self.calls.push(VerifierCall::Validate {
            name: name.to_string(),
            age,
            address: address.to_string(),
        });
        self.validate_result.clone()
    }
}

/// Scorer fake returning a canned score and recording its arguments.
#[derive(Debug)]
pub(super) struct RecordingScorer {
    pub(super) calls: Vec<(String, String)>,
    state: ScoringState,
    outcome: Result<i32, ScoringError>,
    counts_itself: bool,
}

impl RecordingScorer {
    pub(super) fn scoring(score: i32) -> Self {
        Self {
            calls: Vec::new(),
            state: ScoringState::default(),
            outcome: Ok(score),
            counts_itself: true,
        }
    }

    /// Stores results but leaves the invocation counter alone.
    pub(super) fn uncounted(score: i32) -> Self {
        Self {
            counts_itself: false,
            ..Self::scoring(score)
        }
    }

    pub(super) fn unavailable() -> Self {
        Self {
            calls: Vec::new(),
            state: ScoringState::default(),
            outcome: Err(ScoringError::Unavailable("bureau offline".to_string())),
            counts_itself: true,
        }
    }
}

impl CreditScorer for RecordingScorer {
    fn calculate_score(&mut self, name: &str, address: &str) -> Result<(), ScoringError> {
        self.calls.push((name.to_string(), address.to_string()));
        let score = self.outcome.clone()?;
        if self.counts_itself {
            self.state.record(ScoreResult::new(score));
        } else {
            self.state.store(ScoreResult::new(score));
        }
        Ok(())
    }

    fn state(&self) -> &ScoringState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ScoringState {
        &mut self.state
    }
}

/// Scorer that claims success without producing a result.
#[derive(Debug, Default)]
pub(super) struct SilentScorer {
    state: ScoringState,
}

impl CreditScorer for SilentScorer {
    fn calculate_score(&mut self, _name: &str, _address: &str) -> Result<(), ScoringError> {
        Ok(())
    }

    fn state(&self) -> &ScoringState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ScoringState {
        &mut self.state
    }
}

/// Gateway with a pinned clock, used to exercise the template-method verifier.
#[derive(Debug)]
pub(super) struct FixedClockGateway {
    pub(super) now: DateTime<Utc>,
    pub(super) service_calls: Vec<(String, u32, String)>,
    answer: Result<bool, VerificationError>,
}

impl FixedClockGateway {
    pub(super) fn new(now: DateTime<Utc>, answer: Result<bool, VerificationError>) -> Self {
        Self {
            now,
            service_calls: Vec::new(),
            answer,
        }
    }
}

impl VerificationGateway for FixedClockGateway {
    fn call_service(
        &mut self,
        name: &str,
        age: u32,
        address: &str,
    ) -> Result<bool, VerificationError> {
        self.service_calls.push((name.to_string(), age, address.to_string()));
        self.answer.clone()
    }

    fn current_time(&self) -> DateTime<Utc> {
        self.now
    }
}

use tracing::{debug, info, warn};

use super::domain::{DeclineReason, LoanApplication, LoanDecision};
use super::policy::LoanPolicy;
use super::scoring::{CreditScorer, ScoringError};
use super::verification::{IdentityVerifier, VerificationError};

/// Orchestrates the salary check, identity verification, and credit scoring.
pub struct LoanApplicationProcessor<V, S> {
    verifier: V,
    scorer: S,
    policy: LoanPolicy,
}

impl<V, S> LoanApplicationProcessor<V, S>
where
    V: IdentityVerifier,
    S: CreditScorer,
{
    pub fn new(verifier: V, scorer: S) -> Self {
        Self::with_policy(verifier, scorer, LoanPolicy::default())
    }

    pub fn with_policy(verifier: V, scorer: S, policy: LoanPolicy) -> Self {
        Self {
            verifier,
            scorer,
            policy,
        }
    }

    /// Decide the application in place.
    ///
    /// Policy declines are recorded on the application. Collaborator failures
    /// are returned unchanged and leave the decision `Undetermined`.
    pub fn process(&mut self, application: &mut LoanApplication) -> Result<(), ProcessError> {
        let id = application.id();

        if application.decision().is_decided() {
            return Err(ProcessError::AlreadyDecided { id });
        }

        if !self.policy.salary_qualifies(application.salary()) {
            let reason = DeclineReason::SalaryBelowThreshold {
                salary: application.salary(),
                threshold: self.policy.salary_threshold,
            };
            info!(application_id = id, reason = %reason.summary(), "early decline");
            application.record_decision(LoanDecision::Declined(reason));
            return Ok(());
        }

        self.verifier.initialize().map_err(|err| {
            warn!(application_id = id, error = %err, "verifier initialization failed");
            ProcessError::Initialization(err)
        })?;

        let verified = self
            .verifier
            .validate(application.name(), application.age(), application.address())
            .map_err(|err| {
                warn!(application_id = id, error = %err, "identity verification failed");
                ProcessError::Verification(err)
            })?;

        if !verified {
            info!(application_id = id, "identity not verified");
            application.record_decision(LoanDecision::Declined(
                DeclineReason::IdentityNotVerified,
            ));
            return Ok(());
        }

        let count_before = self.scorer.count();
        self.scorer
            .calculate_score(application.name(), application.address())
            .map_err(|err| {
                warn!(application_id = id, error = %err, "credit scoring failed");
                ProcessError::Scoring(err)
            })?;

        let score = self
            .scorer
            .score_result()
            .map(|result| result.score())
            .ok_or(ProcessError::Scoring(ScoringError::MissingResult))?;

        if self.scorer.count() == count_before {
            self.scorer.state_mut().note_attempt();
        }

        let decision = if self.policy.score_qualifies(score) {
            LoanDecision::Accepted
        } else {
            LoanDecision::Declined(DeclineReason::ScoreBelowMinimum {
                score,
                minimum: self.policy.minimum_score,
            })
        };

        debug!(application_id = id, score, minimum = self.policy.minimum_score, "scored");
        info!(application_id = id, decision = decision.label(), "application decided");
        application.record_decision(decision);
        Ok(())
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn policy(&self) -> &LoanPolicy {
        &self.policy
    }

    pub fn into_parts(self) -> (V, S) {
        (self.verifier, self.scorer)
    }
}

/// Error raised when a collaborator fails during processing.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("application {id} already has a decision")]
    AlreadyDecided { id: u64 },
    #[error(transparent)]
    Initialization(VerificationError),
    #[error(transparent)]
    Verification(VerificationError),
    #[error(transparent)]
    Scoring(ScoringError),
}

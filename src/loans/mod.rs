//! Loan application decisioning.
//!
//! The processor applies the salary policy, then verifies identity and scores
//! credit through the two capability traits before recording a decision on the
//! application.

pub mod adapters;
pub mod domain;
mod policy;
mod processor;
pub mod scoring;
pub mod verification;

#[cfg(test)]
mod tests;

pub use adapters::{AdapterError, IdentityRegistry, ScoreBureau};
pub use domain::{DeclineReason, LoanAmount, LoanApplication, LoanDecision, LoanProduct};
pub use policy::{LoanPolicy, DEFAULT_MINIMUM_SCORE, DEFAULT_SALARY_THRESHOLD};
pub use processor::{LoanApplicationProcessor, ProcessError};
pub use scoring::{CreditScorer, ScoreResult, ScoreValue, ScoringError, ScoringState};
pub use verification::{
    GatewayIdentityVerifier, IdentityVerifier, VerificationError, VerificationGateway,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Loan product the applicant is requesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanProduct {
    id: u32,
    name: String,
    interest_rate: Decimal,
}

impl LoanProduct {
    pub fn new(id: u32, name: impl Into<String>, interest_rate: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            interest_rate,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }
}

/// Requested principal in a given currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanAmount {
    currency_code: String,
    value: Decimal,
}

impl LoanAmount {
    pub fn new(currency_code: impl Into<String>, value: Decimal) -> Self {
        Self {
            currency_code: currency_code.into(),
            value,
        }
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn value(&self) -> Decimal {
        self.value
    }
}

/// Why an application was declined. Declines are ordinary outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum DeclineReason {
    SalaryBelowThreshold { salary: Decimal, threshold: Decimal },
    IdentityNotVerified,
    ScoreBelowMinimum { score: i32, minimum: i32 },
}

impl DeclineReason {
    pub fn summary(&self) -> String {
        match self {
            DeclineReason::SalaryBelowThreshold { salary, threshold } => format!(
                "declined for salary {} below threshold {}",
                salary, threshold
            ),
            DeclineReason::IdentityNotVerified => {
                "declined because identity could not be verified".to_string()
            }
            DeclineReason::ScoreBelowMinimum { score, minimum } => {
                format!("declined for credit score {score} below minimum {minimum}")
            }
        }
    }
}

/// Decision state of an application. Starts `Undetermined` and moves once.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanDecision {
    #[default]
    Undetermined,
    Accepted,
    Declined(DeclineReason),
}

impl LoanDecision {
    pub fn label(&self) -> &'static str {
        match self {
            LoanDecision::Undetermined => "undetermined",
            LoanDecision::Accepted => "accepted",
            LoanDecision::Declined(_) => "declined",
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, LoanDecision::Undetermined)
    }

    pub fn summary(&self) -> String {
        match self {
            LoanDecision::Undetermined => "pending decision".to_string(),
            LoanDecision::Accepted => "application accepted".to_string(),
            LoanDecision::Declined(reason) => reason.summary(),
        }
    }
}

/// Application facts fixed at creation plus the decision recorded by the processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplication {
    id: u64,
    product: LoanProduct,
    amount: LoanAmount,
    name: String,
    age: u32,
    address: String,
    salary: Decimal,
    #[serde(skip)]
    decision: LoanDecision,
}

impl LoanApplication {
    pub fn new(
        id: u64,
        product: LoanProduct,
        amount: LoanAmount,
        name: impl Into<String>,
        age: u32,
        address: impl Into<String>,
        salary: Decimal,
    ) -> Self {
        Self {
            id,
            product,
            amount,
            name: name.into(),
            age,
            address: address.into(),
            salary,
            decision: LoanDecision::Undetermined,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn product(&self) -> &LoanProduct {
        &self.product
    }

    pub fn amount(&self) -> &LoanAmount {
        &self.amount
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn salary(&self) -> Decimal {
        self.salary
    }

    pub fn decision(&self) -> &LoanDecision {
        &self.decision
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.decision, LoanDecision::Accepted)
    }

    /// Only the processor records decisions.
    pub(crate) fn record_decision(&mut self, decision: LoanDecision) {
        self.decision = decision;
    }
}

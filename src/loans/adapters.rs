//! File-backed collaborators so the processor can run outside of tests.
//!
//! `IdentityRegistry` answers identity checks from a CSV of known applicants
//! (`name,age,address`). `ScoreBureau` serves scores from a CSV of bureau
//! records (`name,address,score`). Applications themselves can be loaded from
//! CSV with [`applications_from_reader`].

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::domain::{LoanAmount, LoanApplication, LoanProduct};
use super::scoring::{CreditScorer, ScoreResult, ScoringError, ScoringState};
use super::verification::{VerificationError, VerificationGateway};

/// Error raised while loading adapter data.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("failed to read adapter data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: invalid {field} '{value}'")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
}

fn normalize(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[derive(Debug, Deserialize)]
struct IdentityRow {
    name: String,
    age: u32,
    address: String,
}

/// Identity gateway backed by a registry of known applicants.
#[derive(Debug, Default, Clone)]
pub struct IdentityRegistry {
    identities: HashSet<(String, u32, String)>,
    sessions_opened: u32,
}

impl IdentityRegistry {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AdapterError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AdapterError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut registry = Self::default();
        for row in csv_reader.deserialize::<IdentityRow>() {
            let row = row?;
            registry.register(&row.name, row.age, &row.address);
        }
        Ok(registry)
    }

    pub fn register(&mut self, name: &str, age: u32, address: &str) {
        self.identities
            .insert((normalize(name), age, normalize(address)));
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn sessions_opened(&self) -> u32 {
        self.sessions_opened
    }
}

impl VerificationGateway for IdentityRegistry {
    fn call_service(
        &mut self,
        name: &str,
        age: u32,
        address: &str,
    ) -> Result<bool, VerificationError> {
        if self.sessions_opened == 0 {
            return Err(VerificationError::Unavailable(
                "registry session not opened".to_string(),
            ));
        }
        let key = (normalize(name), age, normalize(address));
        Ok(self.identities.contains(&key))
    }

    fn open_session(&mut self) -> Result<(), VerificationError> {
        if self.identities.is_empty() {
            return Err(VerificationError::Initialization(
                "identity registry is empty".to_string(),
            ));
        }
        self.sessions_opened += 1;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct BureauRow {
    name: String,
    address: String,
    score: i32,
}

/// Credit scorer serving scores from a bureau extract.
#[derive(Debug, Default, Clone)]
pub struct ScoreBureau {
    scores: HashMap<(String, String), i32>,
    state: ScoringState,
}

impl ScoreBureau {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AdapterError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AdapterError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut bureau = Self::default();
        for row in csv_reader.deserialize::<BureauRow>() {
            let row = row?;
            bureau.insert(&row.name, &row.address, row.score);
        }
        Ok(bureau)
    }

    pub fn insert(&mut self, name: &str, address: &str, score: i32) {
        self.scores.insert((normalize(name), normalize(address)), score);
    }
}

impl CreditScorer for ScoreBureau {
    fn calculate_score(&mut self, name: &str, address: &str) -> Result<(), ScoringError> {
        let score = self
            .scores
            .get(&(normalize(name), normalize(address)))
            .copied()
            .ok_or_else(|| ScoringError::Unavailable(format!("no bureau record for {name}")))?;
        self.state.record(ScoreResult::new(score));
        Ok(())
    }

    fn state(&self) -> &ScoringState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ScoringState {
        &mut self.state
    }
}

#[derive(Debug, Deserialize)]
struct ApplicationRow {
    id: u64,
    product_id: u32,
    product_name: String,
    interest_rate: String,
    currency: String,
    amount: String,
    name: String,
    age: u32,
    address: String,
    salary: String,
}

fn parse_decimal(row: usize, field: &'static str, raw: &str) -> Result<Decimal, AdapterError> {
    Decimal::from_str(raw.trim()).map_err(|_| AdapterError::InvalidField {
        row,
        field,
        value: raw.to_string(),
    })
}

/// Load applications from a CSV batch file.
pub fn applications_from_path(
    path: impl AsRef<Path>,
) -> Result<Vec<LoanApplication>, AdapterError> {
    let file = File::open(path)?;
    applications_from_reader(file)
}

pub fn applications_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<LoanApplication>, AdapterError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut applications = Vec::new();

    for (index, row) in csv_reader.deserialize::<ApplicationRow>().enumerate() {
        let row = row?;
        let line = index + 1;
        let product = LoanProduct::new(
            row.product_id,
            row.product_name,
            parse_decimal(line, "interest_rate", &row.interest_rate)?,
        );
        let amount = LoanAmount::new(row.currency, parse_decimal(line, "amount", &row.amount)?);
        applications.push(LoanApplication::new(
            row.id,
            product,
            amount,
            row.name,
            row.age,
            row.address,
            parse_decimal(line, "salary", &row.salary)?,
        ));
    }

    Ok(applications)
}

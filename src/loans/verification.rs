use chrono::{DateTime, Utc};

/// Failure raised when a verifier cannot produce an answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("identity verifier could not be initialized: {0}")]
    Initialization(String),
    #[error("identity verification service unavailable: {0}")]
    Unavailable(String),
}

/// Capability for confirming an applicant's identity.
///
/// `initialize` must run once before `validate` is called.
pub trait IdentityVerifier {
    fn initialize(&mut self) -> Result<(), VerificationError>;
    fn validate(&mut self, name: &str, age: u32, address: &str)
        -> Result<bool, VerificationError>;
}

impl<V: IdentityVerifier + ?Sized> IdentityVerifier for &mut V {
    fn initialize(&mut self) -> Result<(), VerificationError> {
        (**self).initialize()
    }

    fn validate(
        &mut self,
        name: &str,
        age: u32,
        address: &str,
    ) -> Result<bool, VerificationError> {
        (**self).validate(name, age, address)
    }
}

impl<V: IdentityVerifier + ?Sized> IdentityVerifier for Box<V> {
    fn initialize(&mut self) -> Result<(), VerificationError> {
        (**self).initialize()
    }

    fn validate(
        &mut self,
        name: &str,
        age: u32,
        address: &str,
    ) -> Result<bool, VerificationError> {
        (**self).validate(name, age, address)
    }
}

/// Provider hooks plugged into [`GatewayIdentityVerifier`].
///
/// Providers decide how the remote check is made and which clock stamps it.
/// The timestamp bookkeeping stays in the verifier.
pub trait VerificationGateway {
    fn call_service(
        &mut self,
        name: &str,
        age: u32,
        address: &str,
    ) -> Result<bool, VerificationError>;

    fn current_time(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn open_session(&mut self) -> Result<(), VerificationError> {
        Ok(())
    }
}

/// Verifier that stamps every check with the gateway's clock before delegating.
#[derive(Debug)]
pub struct GatewayIdentityVerifier<G> {
    gateway: G,
    last_check_time: Option<DateTime<Utc>>,
}

impl<G: VerificationGateway> GatewayIdentityVerifier<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            last_check_time: None,
        }
    }

    /// Time of the most recent `validate` call, as reported by the gateway clock.
    pub fn last_check_time(&self) -> Option<DateTime<Utc>> {
        self.last_check_time
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn into_gateway(self) -> G {
        self.gateway
    }
}

impl<G: VerificationGateway> IdentityVerifier for GatewayIdentityVerifier<G> {
    fn initialize(&mut self) -> Result<(), VerificationError> {
        self.gateway.open_session()
    }

    fn validate(
        &mut self,
        name: &str,
        age: u32,
        address: &str,
    ) -> Result<bool, VerificationError> {
        self.last_check_time = Some(self.gateway.current_time());
        let verified = self.gateway.call_service(name, age, address)?;
        tracing::debug!(applicant = name, verified, "identity gateway answered");
        Ok(verified)
    }
}

use rand::{distr::Alphanumeric, Rng};

pub const SESSION_ID_LENGTH: usize = 48;

/// Trait for generating session identifiers
pub trait SessionIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random alphanumeric session ids from the thread-local CSPRNG
pub struct RandomSessionIdGenerator;

impl RandomSessionIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomSessionIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionIdGenerator for RandomSessionIdGenerator {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_ID_LENGTH)
            .map(char::from)
            .collect()
    }
}

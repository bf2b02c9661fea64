use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::distr::{Alphanumeric, SampleString};

/// Name of the hidden input carrying the token.
pub const FIELD_NAME: &str = "csrfmiddlewaretoken";

const TOKEN_TTL: Duration = Duration::from_secs(60 * 60);
const TOKEN_LENGTH: usize = 32;

/// Form tokens handed out with every rendered form. A token is accepted by
/// exactly one submission.
#[derive(Default)]
pub struct CsrfTokens {
    issued: Mutex<HashMap<String, Instant>>,
}

impl CsrfTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> String {
        let token = Alphanumeric.sample_string(&mut rand::rng(), TOKEN_LENGTH);
        let now = Instant::now();

        // poisoned: the token is returned but will never be accepted
        if let Ok(mut issued) = self.issued.lock() {
            issued.retain(|_, issued_at| now.duration_since(*issued_at) < TOKEN_TTL);
            issued.insert(token.clone(), now);
        }

        token
    }

    /// Consumes `token`, returning whether it was issued and is still fresh.
    pub fn verify(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        let Ok(mut issued) = self.issued.lock() else {
            return false;
        };

        issued
            .remove(token)
            .is_some_and(|issued_at| issued_at.elapsed() < TOKEN_TTL)
    }
}

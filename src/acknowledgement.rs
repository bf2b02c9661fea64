use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::http::{HeaderMap, header};
use rand::distr::{Alphanumeric, SampleString};

use crate::domain::SubscriptionId;

pub const SUCCESS_MESSAGE: &str = "Inscrição realizada com sucesso!";
pub const COOKIE_NAME: &str = "eventex_ack";

const TOKEN_TTL: Duration = Duration::from_secs(5 * 60);
const TOKEN_LENGTH: usize = 25;

struct PendingAcknowledgement {
    subscription_id: SubscriptionId,
    issued_at: Instant,
}

/// One-shot success acknowledgements. A token is issued with the success
/// redirect and can be consumed once, by the detail page of the same
/// subscription.
#[derive(Default)]
pub struct AcknowledgementStore {
    pending: Mutex<HashMap<String, PendingAcknowledgement>>,
}

impl AcknowledgementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, subscription_id: SubscriptionId) -> String {
        let token = Alphanumeric.sample_string(&mut rand::rng(), TOKEN_LENGTH);
        let now = Instant::now();

        // poisoned: the token is returned but will never be accepted
        if let Ok(mut pending) = self.pending.lock() {
            pending.retain(|_, ack| now.duration_since(ack.issued_at) < TOKEN_TTL);
            pending.insert(
                token.clone(),
                PendingAcknowledgement {
                    subscription_id,
                    issued_at: now,
                },
            );
        }

        token
    }

    /// Returns true at most once per issued token.
    pub fn consume(&self, token: &str, subscription_id: SubscriptionId) -> bool {
        let Ok(mut pending) = self.pending.lock() else {
            return false;
        };

        match pending.get(token) {
            Some(ack) if ack.subscription_id == subscription_id => {
                let fresh = ack.issued_at.elapsed() < TOKEN_TTL;
                pending.remove(token);
                fresh
            }
            _ => false,
        }
    }
}

pub fn set_cookie_value(token: &str) -> String {
    format!(
        "{COOKIE_NAME}={token}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        TOKEN_TTL.as_secs()
    )
}

pub fn clear_cookie_value() -> String {
    format!("{COOKIE_NAME}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax")
}

pub fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

use time::OffsetDateTime;

use crate::domain::cpf::Cpf;
use crate::domain::phone::Phone;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscriber_name::SubscriberName;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(i64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for SubscriptionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<i64> for SubscriptionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl SubscriptionId {
    pub fn into_inner(self) -> i64 {
        self.0
    }
}

/// A submission that passed every field rule and may be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub name: SubscriberName,
    pub cpf: Cpf,
    pub email: SubscriberEmail,
    pub phone: Phone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub created_at: OffsetDateTime,
    pub paid: bool,
}

impl Subscription {
    pub fn absolute_url(&self) -> String {
        detail_url(self.id)
    }
}

impl std::fmt::Display for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

pub fn detail_url(id: SubscriptionId) -> String {
    format!("/inscricao/{id}/")
}

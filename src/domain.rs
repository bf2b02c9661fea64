pub mod cpf;
pub mod phone;
pub mod subscriber_email;
pub mod subscriber_name;
pub mod subscription;
pub mod subscription_form;

pub use subscription::{NewSubscription, Subscription, SubscriptionId};
pub use subscription_form::{Field, FormErrors, SubscriptionForm, validate};

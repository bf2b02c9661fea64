pub mod acknowledgement;
pub mod app_state;
pub mod configuration;
pub mod csrf;
pub mod domain;
pub mod email_client;
pub mod notifier;
pub mod repository;
mod routers;
pub mod startup;
pub mod telemetry;
mod utils;
pub mod workflow;

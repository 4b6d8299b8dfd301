//! External API integrations

pub mod alerts;

pub use alerts::AlertWebhookClient;

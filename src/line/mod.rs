pub mod client;
pub mod events;
pub mod signature;

pub use client::LineClient;
pub use events::{WebhookBody, WebhookEvent};

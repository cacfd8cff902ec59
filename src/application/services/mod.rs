//! Application services - Business logic orchestration

pub mod retry;
pub mod checkout_service;
pub mod interaction_service;

pub use retry::{retry_with_delay, RetryError, RetryPolicy};
pub use checkout_service::{CheckoutOutcome, CheckoutService};
pub use interaction_service::InteractionController;

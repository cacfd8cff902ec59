//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Errors: Domain-specific errors
//! - Messaging: Action parsing and per-session dispatching
//! - Services: Checkout flow, interaction controller, retry policy
//! - Views: Rendered text and keyboards

pub mod errors;
pub mod services;
pub mod messaging;
pub mod views;

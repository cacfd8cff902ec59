//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod store;
pub mod session;

pub use bot::{Bot, BotInfo, KeyboardButton};
pub use store::OrderStore;
pub use session::{SessionHandle, SessionStore};

//! Message handling - Event-driven message processing

pub mod dispatcher;
pub mod parser;

pub use dispatcher::SessionDispatcher;
pub use parser::{Action, MessageParser};

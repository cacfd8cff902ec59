//! Uludağ Market bot - catalog, cart, and checkout over Telegram

pub mod domain;
pub mod application;
pub mod infrastructure;

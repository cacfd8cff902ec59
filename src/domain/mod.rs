//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Product, Cart, Session, Order, Event)
//! - Traits: Abstractions for infrastructure (Bot, OrderStore, SessionStore)

pub mod entities;
pub mod traits;

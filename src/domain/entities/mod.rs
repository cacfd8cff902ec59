//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod message;
pub mod product;
pub mod cart;
pub mod session;
pub mod order;

pub use user::{User, UserId};
pub use message::{Event, Content};
pub use product::{Catalog, Product, ProductId, Price, CURRENCY};
pub use cart::{Cart, CartLine};
pub use session::SessionState;
pub use order::Order;

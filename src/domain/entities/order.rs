use serde::Serialize;

use super::cart::{Cart, CartLine};
use super::product::Price;
use super::user::{User, UserId};

/// Snapshot of a cart at checkout, written once to the order store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub user_id: UserId,
    pub username: String,
    pub cart: Vec<CartLine>,
}

impl Order {
    pub fn new(user: &User, cart: &Cart) -> Self {
        Self {
            user_id: user.id,
            username: user.username_or_unknown().to_string(),
            cart: cart.lines().to_vec(),
        }
    }

    pub fn total(&self) -> Price {
        self.cart
            .iter()
            .fold(0, |acc: Price, line| acc.saturating_add(line.line_total()))
    }
}

use super::cart::{Cart, CartLine};
use super::product::{Catalog, ProductId};
use crate::application::errors::CartError;

/// Per-user conversational state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub agreed: bool,
    pub selected_product: Option<ProductId>,
    pub cart: Cart,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept the offer terms. Returns false when already accepted.
    pub fn agree(&mut self) -> bool {
        if self.agreed {
            return false;
        }
        self.agreed = true;
        true
    }

    pub fn select_product(&mut self, product_id: ProductId) {
        self.selected_product = Some(product_id);
    }

    pub fn add_to_cart(&mut self, catalog: &Catalog, product_id: ProductId, quantity: u32) -> Result<&CartLine, CartError> {
        self.cart.add(catalog, product_id, quantity)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agree_is_one_way_and_idempotent() {
        let mut session = SessionState::new();
        assert!(!session.agreed);
        assert!(session.agree());
        assert!(!session.agree());
        assert!(session.agreed);
    }

    #[test]
    fn test_add_and_clear() {
        let catalog = Catalog::builtin();
        let mut session = SessionState::new();
        session.add_to_cart(&catalog, 5, 2).unwrap();
        assert_eq!(session.cart.total(), 2 * 19500);
        session.clear_cart();
        assert!(session.cart.is_empty());
    }
}

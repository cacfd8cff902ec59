use serde::{Deserialize, Serialize};

use super::product::{Catalog, Price, ProductId};
use crate::application::errors::CartError;

/// One product-quantity entry. Name and price are copied at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Price {
        self.unit_price.saturating_mul(Price::from(self.quantity))
    }
}

/// Ordered cart lines, at most one per product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of a catalog product, merging into an existing line
    pub fn add(&mut self, catalog: &Catalog, product_id: ProductId, quantity: u32) -> Result<&CartLine, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let product = catalog.find_by_id(product_id)?;

        let index = match self.lines.iter().position(|l| l.product_id == product_id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(quantity);
                index
            }
            None => {
                self.lines.push(CartLine {
                    product_id,
                    name: product.name.clone(),
                    unit_price: product.price,
                    quantity,
                });
                self.lines.len() - 1
            }
        };

        Ok(&self.lines[index])
    }

    /// Sum of unit price times quantity over all lines
    pub fn total(&self) -> Price {
        self.lines
            .iter()
            .fold(0, |acc: Price, line| acc.saturating_add(line.line_total()))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: ProductId, unit_price: Price, quantity: u32) -> CartLine {
        CartLine {
            product_id,
            name: format!("product {}", product_id),
            unit_price,
            quantity,
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();

        cart.add(&catalog, 1, 2).unwrap();
        cart.add(&catalog, 1, 3).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(1).map(|l| l.quantity), Some(5));
        assert_eq!(cart.total(), 5 * 14900);
    }

    #[test]
    fn test_add_many_sums_quantities() {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        let quantities = [1, 2, 5, 1, 5, 2];

        for q in quantities {
            cart.add(&catalog, 4, q).unwrap();
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(4).unwrap().quantity, quantities.iter().sum::<u32>());
    }

    #[test]
    fn test_add_appends_in_order_with_copied_fields() {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();

        cart.add(&catalog, 3, 1).unwrap();
        cart.add(&catalog, 1, 1).unwrap();

        let ids: Vec<ProductId> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(cart.lines()[0].name, "Uludağ Premium Still 350 мл");
        assert_eq!(cart.lines()[0].unit_price, 12550);
    }

    #[test]
    fn test_add_unknown_product_leaves_cart_untouched() {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        cart.add(&catalog, 1, 1).unwrap();

        let err = cart.add(&catalog, 99, 1).unwrap_err();

        assert!(matches!(err, CartError::ProductNotFound(99)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_zero_quantity_rejected() {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        assert!(matches!(cart.add(&catalog, 1, 0), Err(CartError::InvalidQuantity)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_example() {
        let cart = Cart::from(vec![line(1, 14900, 1), line(3, 12550, 2)]);
        assert_eq!(cart.total(), 40000);
    }

    #[test]
    fn test_total_ignores_line_order() {
        let lines = vec![line(1, 14900, 1), line(3, 12550, 2), line(6, 8000, 7)];
        let mut reversed = lines.clone();
        reversed.reverse();

        assert_eq!(Cart::from(lines).total(), Cart::from(reversed).total());
    }

    #[test]
    fn test_clear() {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        cart.add(&catalog, 2, 2).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn test_serializes_as_store_layout() {
        let cart = Cart::from(vec![line(1, 14900, 2)]);
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "id": 1, "name": "product 1", "price": 14900, "quantity": 2 }])
        );
    }
}

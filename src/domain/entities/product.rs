use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::application::errors::{CartError, CatalogError};

/// Product identifier
pub type ProductId = u32;

/// Price in minor currency units
pub type Price = u64;

/// Currency label used in every rendered price
pub const CURRENCY: &str = "UZS";

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: Price, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
        }
    }
}

/// Immutable, ordered product list fixed at startup
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists and duplicate ids
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// The catalog the shop ships with
    pub fn builtin() -> Self {
        Self {
            products: vec![
                Product::new(1, "Uludağ Premium Sparkling 250 мл", 14900, "Освежающая газированная вода для блюд."),
                Product::new(2, "Uludağ Premium Sparkling 750 мл", 27300, "Идеально для больших мероприятий."),
                Product::new(3, "Uludağ Premium Still 350 мл", 12550, "Мягкая вода для вин и десертов."),
                Product::new(4, "Uludağ Premium Still 750 мл", 23500, "Премиальная негазированная вода."),
                Product::new(5, "Uludağ Premium 1 литр", 19500, "Универсальная вода для любых целей."),
                Product::new(6, "Uludağ Classic 250 мл", 8000, "Классический вкус Uludağ."),
                Product::new(7, "Uludağ Special Edition 250 мл", 9500, "Эксклюзивная версия для особых случаев."),
            ],
        }
    }

    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    pub fn find_by_id(&self, id: ProductId) -> Result<&Product, CartError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or(CartError::ProductNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

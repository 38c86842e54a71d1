use stockmate_core::{DomainError, DomainResult, ProductId};

use crate::product::Product;

/// Insertion-ordered collection of product records.
///
/// Order is stable between reads: the sequence a caller renders is the same
/// sequence a later index-based selection resolves against. Identifiers are
/// unique within the store; [`from_products`](Self::from_products) is the
/// only way to rebuild one from persisted data, so the uniqueness check
/// cannot be bypassed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryStore {
    products: Vec<Product>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from an already-persisted sequence.
    ///
    /// Rejects duplicate identifiers so a hand-edited data file cannot
    /// smuggle an id collision past the engine.
    pub fn from_products(products: Vec<Product>) -> DomainResult<Self> {
        let mut store = Self::new();
        for product in products {
            store.add(product)?;
        }
        Ok(store)
    }

    /// Append a product. The id must not already be present.
    pub fn add(&mut self, product: Product) -> DomainResult<()> {
        if self.products.iter().any(|p| p.id == product.id) {
            return Err(DomainError::conflict(format!(
                "product id {} already present",
                product.id
            )));
        }
        self.products.push(product);
        Ok(())
    }

    /// Remove a product by id. Removing an absent id is a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }

    pub fn get(&self, id: ProductId) -> DomainResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(DomainError::not_found)
    }

    /// Positional lookup in insertion order.
    pub fn get_by_index(&self, index: usize) -> DomainResult<&Product> {
        self.products.get(index).ok_or_else(DomainError::not_found)
    }

    /// Set the stock level of a product.
    ///
    /// This is the only mutation door for stock; stock cannot go negative.
    pub fn update_quantity(&mut self, id: ProductId, new_quantity: i64) -> DomainResult<()> {
        if new_quantity < 0 {
            return Err(DomainError::invariant("stock cannot go negative"));
        }
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(DomainError::not_found)?;
        product.quantity = new_quantity;
        Ok(())
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Highest id currently in the store (for counter reconciliation).
    pub fn max_id(&self) -> Option<ProductId> {
        self.products.iter().map(|p| p.id).max()
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, name: &str, quantity: i64) -> Product {
        Product::new(ProductId::new(id), name, quantity, 250).unwrap()
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut store = InventoryStore::new();
        store.add(product(1, "Widget", 10)).unwrap();
        store.add(product(2, "Gadget", 5)).unwrap();
        store.add(product(3, "Gizmo", 7)).unwrap();

        let names: Vec<&str> = store.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Widget", "Gadget", "Gizmo"]);
        assert_eq!(store.get_by_index(1).unwrap().name, "Gadget");
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let mut store = InventoryStore::new();
        store.add(product(1, "Widget", 10)).unwrap();

        let err = store.add(product(1, "Gadget", 5)).unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for duplicate id"),
        }
    }

    #[test]
    fn remove_absent_id_is_a_noop() {
        let mut store = InventoryStore::new();
        store.add(product(1, "Widget", 10)).unwrap();

        assert!(!store.remove(ProductId::new(99)));
        assert_eq!(store.len(), 1);
        assert!(store.remove(ProductId::new(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn get_reports_not_found_for_absent_id() {
        let store = InventoryStore::new();
        let err = store.get(ProductId::new(1)).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn update_quantity_rejects_negative_stock() {
        let mut store = InventoryStore::new();
        store.add(product(1, "Widget", 10)).unwrap();

        let err = store.update_quantity(ProductId::new(1), -1).unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation for negative stock"),
        }
        assert_eq!(store.get(ProductId::new(1)).unwrap().quantity, 10);
    }

    #[test]
    fn update_quantity_sets_stock_to_zero() {
        let mut store = InventoryStore::new();
        store.add(product(1, "Widget", 10)).unwrap();

        store.update_quantity(ProductId::new(1), 0).unwrap();
        assert_eq!(store.get(ProductId::new(1)).unwrap().quantity, 0);
    }

    #[test]
    fn from_products_rejects_duplicate_ids() {
        let err =
            InventoryStore::from_products(vec![product(1, "Widget", 10), product(1, "Gadget", 5)])
                .unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for duplicate id"),
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: after any sequence of valid adds, order matches the
            /// input sequence and no quantity is negative.
            #[test]
            fn adds_keep_order_and_nonnegative_stock(
                quantities in proptest::collection::vec(0i64..10_000, 1..32)
            ) {
                let mut store = InventoryStore::new();
                for (i, qty) in quantities.iter().enumerate() {
                    let p = Product::new(
                        ProductId::new(i as u64 + 1),
                        format!("product-{i}"),
                        *qty,
                        100,
                    ).unwrap();
                    store.add(p).unwrap();
                }

                prop_assert_eq!(store.len(), quantities.len());
                for (i, product) in store.iter().enumerate() {
                    prop_assert_eq!(product.quantity, quantities[i]);
                    prop_assert!(product.quantity >= 0);
                }
            }
        }
    }
}

//! The coordinating component: owns both collections, assigns identifiers,
//! enforces the stock-deduction invariant, mirrors every mutation to the
//! store before exposing it.

use stockmate_billing::{Bill, BillLedger};
use stockmate_core::{BillId, DomainError, ProductId};
use stockmate_inventory::{InventoryStore, Product};
use stockmate_store::{BillsSnapshot, InventorySnapshot, StateStore};

use crate::error::EngineError;

/// Single-threaded inventory/billing engine.
///
/// Mutations follow one discipline: build the next state in a staged copy,
/// persist it, then swap it in. A failed persist therefore leaves the
/// in-memory state exactly as it was; memory and disk never diverge.
#[derive(Debug)]
pub struct InventoryManager<S: StateStore> {
    inventory: InventoryStore,
    bills: BillLedger,
    next_product_id: u64,
    next_bill_id: u64,
    store: S,
}

impl<S: StateStore> InventoryManager<S> {
    /// Load both collections from the store. Absent data yields an empty
    /// system; corrupt or unreadable data surfaces as a [`StoreError`].
    ///
    /// Id counters are reconciled to at least `max(id) + 1`, so a data file
    /// whose counter lags its records cannot reintroduce id reuse.
    ///
    /// [`StoreError`]: stockmate_store::StoreError
    pub fn open(store: S) -> Result<Self, EngineError> {
        let inventory_snapshot = store.load_inventory()?;
        let bills_snapshot = store.load_bills()?;

        let inventory = InventoryStore::from_products(inventory_snapshot.products)?;
        let bills = BillLedger::from_bills(bills_snapshot.bills)?;

        let next_product_id = inventory_snapshot
            .next_product_id
            .max(inventory.max_id().map_or(0, |id| id.value() + 1))
            .max(1);
        let next_bill_id = bills_snapshot
            .next_bill_id
            .max(bills.max_id().map_or(0, |id| id.value() + 1))
            .max(1);

        tracing::debug!(
            products = inventory.len(),
            bills = bills.len(),
            "opened inventory manager"
        );

        Ok(Self {
            inventory,
            bills,
            next_product_id,
            next_bill_id,
            store,
        })
    }

    /// Validate and add a new product, assigning it the next id.
    ///
    /// Ids come from a monotonic counter persisted with the collection;
    /// they are never reused, also not after removals.
    pub fn add_product(
        &mut self,
        name: &str,
        quantity: i64,
        price: u64,
    ) -> Result<Product, EngineError> {
        let id = ProductId::new(self.next_product_id);
        let product = Product::new(id, name, quantity, price)?;

        let mut staged = self.inventory.clone();
        staged.add(product.clone())?;
        let next_product_id = self.next_product_id + 1;

        self.store
            .save_inventory(&inventory_snapshot(&staged, next_product_id))?;
        self.inventory = staged;
        self.next_product_id = next_product_id;

        tracing::info!(product_id = %id, name = %product.name, "product added");
        Ok(product)
    }

    /// Remove a product by id. Removing an absent id is a no-op, not an
    /// error. The id counter does not move backwards.
    pub fn remove_product(&mut self, id: ProductId) -> Result<(), EngineError> {
        let mut staged = self.inventory.clone();
        if !staged.remove(id) {
            return Ok(());
        }

        self.store
            .save_inventory(&inventory_snapshot(&staged, self.next_product_id))?;
        self.inventory = staged;

        tracing::info!(product_id = %id, "product removed");
        Ok(())
    }

    /// Convert stock into a bill: the central transactional operation.
    ///
    /// The stock decrement and the ledger append succeed and persist
    /// together, or not at all.
    pub fn create_bill(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Bill, EngineError> {
        let product = self.inventory.get(product_id)?;

        if quantity <= 0 {
            return Err(DomainError::validation("non-positive quantity").into());
        }
        if quantity > product.quantity {
            return Err(DomainError::validation(format!(
                "insufficient stock: requested {quantity}, available {}",
                product.quantity
            ))
            .into());
        }

        let total_price = (quantity as u64)
            .checked_mul(product.price)
            .ok_or_else(|| DomainError::validation("total price overflows"))?;
        let remaining = product.quantity - quantity;

        // Snapshot fields: the bill keeps the name and total as of now.
        let bill = Bill::new(
            BillId::new(self.next_bill_id),
            product.name.clone(),
            quantity,
            total_price,
        )?;

        let mut staged_inventory = self.inventory.clone();
        staged_inventory.update_quantity(product_id, remaining)?;
        let mut staged_bills = self.bills.clone();
        staged_bills.append(bill.clone())?;
        let next_bill_id = self.next_bill_id + 1;

        if let Err(e) = self.store.save_both(
            &inventory_snapshot(&staged_inventory, self.next_product_id),
            &bills_snapshot(&staged_bills, next_bill_id),
        ) {
            tracing::error!(error = %e, product_id = %product_id, "persist failed, bill not committed");
            return Err(e.into());
        }

        self.inventory = staged_inventory;
        self.bills = staged_bills;
        self.next_bill_id = next_bill_id;

        tracing::info!(
            bill_id = %bill.id,
            product_id = %product_id,
            quantity,
            total_price,
            "bill created"
        );
        Ok(bill)
    }

    /// Read-only snapshot of the inventory, insertion order.
    pub fn products(&self) -> &[Product] {
        self.inventory.as_slice()
    }

    /// Read-only snapshot of the bill ledger, oldest first.
    pub fn bills(&self) -> &[Bill] {
        self.bills.as_slice()
    }

    /// Sum of all bill totals (bill report support).
    pub fn gross_total(&self) -> u128 {
        self.bills.gross_total()
    }
}

fn inventory_snapshot(inventory: &InventoryStore, next_product_id: u64) -> InventorySnapshot {
    InventorySnapshot::new(next_product_id, inventory.as_slice().to_vec())
}

fn bills_snapshot(bills: &BillLedger, next_bill_id: u64) -> BillsSnapshot {
    BillsSnapshot::new(next_bill_id, bills.as_slice().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockmate_store::MemoryStore;

    fn manager() -> InventoryManager<MemoryStore> {
        InventoryManager::open(MemoryStore::new()).unwrap()
    }

    #[test]
    fn add_product_assigns_sequential_ids() {
        let mut manager = manager();
        let first = manager.add_product("Widget", 10, 250).unwrap();
        let second = manager.add_product("Gadget", 5, 100).unwrap();

        assert_eq!(first.id, ProductId::new(1));
        assert_eq!(second.id, ProductId::new(2));
    }

    #[test]
    fn add_product_rejects_blank_name() {
        let mut manager = manager();
        let err = manager.add_product("  ", 10, 250).unwrap_err();
        match err {
            EngineError::Domain(DomainError::Validation(_)) => {}
            _ => panic!("Expected Validation error for blank name"),
        }
        assert!(manager.products().is_empty());
    }

    #[test]
    fn add_product_rejects_negative_quantity() {
        let mut manager = manager();
        let err = manager.add_product("Widget", -1, 250).unwrap_err();
        match err {
            EngineError::Domain(DomainError::Validation(_)) => {}
            _ => panic!("Expected Validation error for negative quantity"),
        }
    }

    #[test]
    fn removed_ids_are_never_reassigned() {
        let mut manager = manager();
        manager.add_product("Widget", 10, 250).unwrap();
        manager.add_product("Gadget", 5, 100).unwrap();
        manager.add_product("Gizmo", 7, 300).unwrap();

        manager.remove_product(ProductId::new(2)).unwrap();
        let fresh = manager.add_product("Doohickey", 1, 50).unwrap();

        // Count-based assignment would hand out 3 again; the counter moves on.
        assert_eq!(fresh.id, ProductId::new(4));
    }

    #[test]
    fn remove_product_of_absent_id_is_a_noop() {
        let mut manager = manager();
        manager.add_product("Widget", 10, 250).unwrap();

        manager.remove_product(ProductId::new(99)).unwrap();
        assert_eq!(manager.products().len(), 1);
    }

    #[test]
    fn create_bill_deducts_stock_and_appends_bill() {
        let mut manager = manager();
        let product = manager.add_product("Widget", 10, 250).unwrap();

        let bill = manager.create_bill(product.id, 4).unwrap();
        assert_eq!(bill.id, BillId::new(1));
        assert_eq!(bill.product_name, "Widget");
        assert_eq!(bill.quantity, 4);
        assert_eq!(bill.total_price, 1000);
        assert_eq!(manager.products()[0].quantity, 6);
        assert_eq!(manager.bills().len(), 1);
    }

    #[test]
    fn create_bill_rejects_non_positive_quantity() {
        let mut manager = manager();
        let product = manager.add_product("Widget", 10, 250).unwrap();

        for quantity in [0, -2] {
            let err = manager.create_bill(product.id, quantity).unwrap_err();
            match err {
                EngineError::Domain(DomainError::Validation(_)) => {}
                _ => panic!("Expected Validation error for quantity {quantity}"),
            }
        }
        assert_eq!(manager.products()[0].quantity, 10);
        assert!(manager.bills().is_empty());
    }

    #[test]
    fn create_bill_rejects_insufficient_stock() {
        let mut manager = manager();
        let product = manager.add_product("Widget", 6, 250).unwrap();

        let err = manager.create_bill(product.id, 999).unwrap_err();
        match err {
            EngineError::Domain(DomainError::Validation(_)) => {}
            _ => panic!("Expected Validation error for insufficient stock"),
        }
        assert_eq!(manager.products()[0].quantity, 6);
        assert!(manager.bills().is_empty());
    }

    #[test]
    fn create_bill_for_unknown_product_reports_not_found() {
        let mut manager = manager();
        let err = manager.create_bill(ProductId::new(999), 1).unwrap_err();
        match err {
            EngineError::Domain(DomainError::NotFound) => {}
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn create_bill_allows_draining_stock_to_zero() {
        let mut manager = manager();
        let product = manager.add_product("Widget", 3, 250).unwrap();

        let bill = manager.create_bill(product.id, 3).unwrap();
        assert_eq!(bill.total_price, 750);
        assert_eq!(manager.products()[0].quantity, 0);
    }

    #[test]
    fn create_bill_rejects_overflowing_total() {
        let mut manager = manager();
        let product = manager.add_product("Widget", i64::MAX, u64::MAX).unwrap();

        let err = manager.create_bill(product.id, 2).unwrap_err();
        match err {
            EngineError::Domain(DomainError::Validation(_)) => {}
            _ => panic!("Expected Validation error for overflow"),
        }
        assert!(manager.bills().is_empty());
    }

    #[test]
    fn bill_ids_count_up_independently_of_product_ids() {
        let mut manager = manager();
        let a = manager.add_product("Widget", 10, 250).unwrap();
        let b = manager.add_product("Gadget", 10, 100).unwrap();

        assert_eq!(manager.create_bill(b.id, 1).unwrap().id, BillId::new(1));
        assert_eq!(manager.create_bill(a.id, 1).unwrap().id, BillId::new(2));
    }

    #[test]
    fn bill_survives_product_removal_unchanged() {
        let mut manager = manager();
        let product = manager.add_product("Widget", 10, 250).unwrap();
        let bill = manager.create_bill(product.id, 4).unwrap();

        manager.remove_product(product.id).unwrap();

        assert!(manager.products().is_empty());
        assert_eq!(manager.bills().len(), 1);
        assert_eq!(manager.bills()[0], bill);
    }

    #[test]
    fn gross_total_sums_all_bills() {
        let mut manager = manager();
        let product = manager.add_product("Widget", 10, 250).unwrap();
        manager.create_bill(product.id, 4).unwrap();
        manager.create_bill(product.id, 2).unwrap();

        assert_eq!(manager.gross_total(), 1500);
    }

    #[test]
    fn listing_twice_without_mutation_is_identical() {
        let mut manager = manager();
        let product = manager.add_product("Widget", 10, 250).unwrap();
        manager.create_bill(product.id, 1).unwrap();

        assert_eq!(manager.products(), manager.products());
        assert_eq!(manager.bills(), manager.bills());
    }
}

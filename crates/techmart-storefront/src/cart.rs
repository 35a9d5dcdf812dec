//! The locally persisted shopping cart.
//!
//! [`CartStore`] is the single source of truth for what the customer intends
//! to buy. It is owned by the composition root and lent to whoever needs it;
//! every mutation rewrites the full line list to local storage.

use rust_decimal::Decimal;
use techmart_core::{CartLineItem, Product};

use crate::storage::KeyValueStore;

/// Fixed local-storage key holding the cart as a JSON array of line items.
pub const CART_STORAGE_KEY: &str = "techmart.cart";

pub struct CartStore<S> {
    items: Vec<CartLineItem>,
    storage: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Rehydrates the cart from storage.
    ///
    /// Missing, unreadable, or corrupt data yields an empty cart; this never
    /// fails. Persisted lines are re-normalized (zero quantities and negative
    /// prices dropped, duplicate product ids merged) so the store invariants
    /// hold even for hand-edited data.
    pub fn load(storage: S) -> Self {
        let items = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
                Ok(items) => normalize(items),
                Err(e) => {
                    tracing::warn!(error = %e, "stored cart is corrupt; starting with an empty cart");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "stored cart is unreadable; starting with an empty cart");
                Vec::new()
            }
        };
        tracing::debug!(lines = items.len(), "cart loaded");
        Self { items, storage }
    }

    /// Line items in insertion (display) order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// `Σ unit_price × quantity`, always computed from the current lines.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Owned copy of the current lines, for building an order draft.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartLineItem> {
        self.items.clone()
    }

    /// Adds `quantity` units of `product`, merging into an existing line.
    ///
    /// A quantity of `0` is treated as `1`.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        self.add_line(CartLineItem::from_product(product, quantity));
    }

    /// Adds a prepared line, merging by `product_id`. The existing line keeps
    /// its position, name, and price; only the quantity grows.
    ///
    /// A line with a negative price is ignored.
    pub fn add_line(&mut self, mut line: CartLineItem) {
        if line.unit_price.is_sign_negative() {
            tracing::warn!(product_id = %line.product_id, price = %line.unit_price, "ignoring cart line with negative price");
            return;
        }
        if line.quantity == 0 {
            tracing::debug!(product_id = %line.product_id, "add with zero quantity clamped to 1");
            line.quantity = 1;
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == line.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            self.items.push(line);
        }
        self.persist();
    }

    /// Removes the line for `product_id`. Absent ids are a no-op.
    pub fn remove_item(&mut self, product_id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Overwrites a line's quantity; `0` removes the line. Absent ids are a no-op.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            item.quantity = quantity;
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Writes the full line list. A failed write is logged and the in-memory
    /// cart stays authoritative.
    fn persist(&self) {
        let result = serde_json::to_string(&self.items)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.storage
                    .set(CART_STORAGE_KEY, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(error) = result {
            tracing::warn!(%error, "failed to persist cart");
        }
    }
}

/// Drops zero-quantity and negative-price lines and merges duplicate product
/// ids, keeping the first occurrence's position.
fn normalize(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut out: Vec<CartLineItem> = Vec::with_capacity(items.len());
    for item in items.into_iter().filter(|item| item.quantity > 0) {
        if item.unit_price.is_sign_negative() {
            tracing::warn!(product_id = %item.product_id, price = %item.unit_price, "dropping stored cart line with negative price");
            continue;
        }
        if let Some(existing) = out.iter_mut().find(|o| o.product_id == item.product_id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;

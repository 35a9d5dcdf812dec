use std::str::FromStr;
use std::sync::Arc;

use super::*;
use crate::error::StorageError;
use crate::storage::MemoryStore;

fn product(id: &str, price: &str) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        description: String::new(),
        price: Decimal::from_str(price).unwrap(),
        category: "Electronics".to_string(),
        stock: 10,
        image_url: None,
        created_at: None,
    }
}

fn empty_cart() -> (Arc<MemoryStore>, CartStore<Arc<MemoryStore>>) {
    let storage = Arc::new(MemoryStore::new());
    let cart = CartStore::load(Arc::clone(&storage));
    (storage, cart)
}

fn expected_total(cart: &CartStore<Arc<MemoryStore>>) -> Decimal {
    cart.items()
        .iter()
        .map(|i| i.unit_price * Decimal::from(i.quantity))
        .sum()
}

fn assert_unique_ids(cart: &CartStore<Arc<MemoryStore>>) {
    let mut ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
    ids.sort_unstable();
    let before = ids.len();
    ids.dedup();
    assert_eq!(before, ids.len(), "duplicate product ids in cart");
}

#[test]
fn add_same_product_merges_quantities() {
    let (_, mut cart) = empty_cart();
    let p = product("p-1", "10.50");
    cart.add_item(&p, 2);
    cart.add_item(&p, 3);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 5);
    assert_eq!(cart.total(), Decimal::from_str("52.50").unwrap());
}

#[test]
fn add_keeps_insertion_order() {
    let (_, mut cart) = empty_cart();
    cart.add_item(&product("b", "1"), 1);
    cart.add_item(&product("a", "1"), 1);
    cart.add_item(&product("b", "1"), 1);

    let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn add_with_zero_quantity_is_clamped_to_one() {
    let (_, mut cart) = empty_cart();
    cart.add_item(&product("p-1", "5"), 0);
    assert_eq!(cart.items()[0].quantity, 1);
}

#[test]
fn set_quantity_zero_equals_remove() {
    let (_, mut a) = empty_cart();
    let (_, mut b) = empty_cart();
    for cart in [&mut a, &mut b] {
        cart.add_item(&product("p-1", "5"), 2);
        cart.add_item(&product("p-2", "7"), 1);
    }

    a.set_quantity("p-1", 0);
    b.remove_item("p-1");

    assert_eq!(a.items(), b.items());
    assert_eq!(a.total(), b.total());
}

#[test]
fn set_quantity_overwrites_and_ignores_absent_ids() {
    let (_, mut cart) = empty_cart();
    cart.add_item(&product("p-1", "5"), 2);
    cart.set_quantity("p-1", 7);
    cart.set_quantity("missing", 3);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 7);
}

#[test]
fn remove_absent_id_leaves_cart_unchanged() {
    let (_, mut cart) = empty_cart();
    cart.add_item(&product("p-1", "19.99"), 2);
    let items_before = cart.snapshot();
    let total_before = cart.total();

    cart.remove_item("nope");

    assert_eq!(cart.items(), items_before.as_slice());
    assert_eq!(cart.total(), total_before);
}

#[test]
fn mixed_operation_sequence_keeps_invariants() {
    let (_, mut cart) = empty_cart();
    let products = [
        product("a", "0.10"),
        product("b", "3.33"),
        product("c", "1999.99"),
    ];
    // Deterministic pseudo-random walk over the operations.
    let mut seed = 17u32;
    for step in 0..300u32 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let p = &products[(seed >> 8) as usize % products.len()];
        match (seed >> 16) % 4 {
            0 | 1 => cart.add_item(p, (seed >> 4) % 4),
            2 => cart.remove_item(&p.id),
            _ => cart.set_quantity(&p.id, (seed >> 6) % 3),
        }
        assert_unique_ids(&cart);
        assert!(cart.items().iter().all(|i| i.quantity >= 1), "step {step}");
        assert_eq!(cart.total(), expected_total(&cart), "step {step}");
    }
}

#[test]
fn clear_empties_cart_and_storage() {
    let (storage, mut cart) = empty_cart();
    cart.add_item(&product("p-1", "5"), 1);
    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);
    assert_eq!(
        storage.get(CART_STORAGE_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn persist_then_reload_reproduces_items() {
    let (storage, mut cart) = empty_cart();
    cart.add_item(&product("p-1", "25999.99"), 2);
    cart.add_item(&product("p-2", "0.01"), 1);

    let reloaded = CartStore::load(Arc::clone(&storage));
    assert_eq!(reloaded.items(), cart.items());
    assert_eq!(reloaded.total(), cart.total());
    assert_eq!(reloaded.item_count(), 3);
}

#[test]
fn corrupt_storage_loads_as_empty_cart() {
    let storage = Arc::new(MemoryStore::new());
    storage.set(CART_STORAGE_KEY, "{not json").unwrap();

    let cart = CartStore::load(Arc::clone(&storage));
    assert!(cart.is_empty());
}

#[test]
fn wrong_shape_in_storage_loads_as_empty_cart() {
    let storage = Arc::new(MemoryStore::new());
    storage
        .set(CART_STORAGE_KEY, r#"{"items": "definitely not a list"}"#)
        .unwrap();

    let cart = CartStore::load(Arc::clone(&storage));
    assert!(cart.is_empty());
}

#[test]
fn load_normalizes_duplicates_and_zero_quantities() {
    let storage = Arc::new(MemoryStore::new());
    let raw = serde_json::json!([
        {"product_id": "a", "name": "A", "unit_price": "1.00", "quantity": 1},
        {"product_id": "b", "name": "B", "unit_price": "2.00", "quantity": 0},
        {"product_id": "a", "name": "A", "unit_price": "1.00", "quantity": 2}
    ]);
    storage.set(CART_STORAGE_KEY, &raw.to_string()).unwrap();

    let cart = CartStore::load(Arc::clone(&storage));
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
}

#[test]
fn overflowing_stored_prices_saturate_the_total() {
    let storage = Arc::new(MemoryStore::new());
    let raw = serde_json::json!([
        {"product_id": "a", "name": "A", "unit_price": "79228162514264337593543950335", "quantity": 2},
        {"product_id": "b", "name": "B", "unit_price": "79228162514264337593543950335", "quantity": 1}
    ]);
    storage.set(CART_STORAGE_KEY, &raw.to_string()).unwrap();

    let cart = CartStore::load(Arc::clone(&storage));
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.total(), Decimal::MAX);
}

#[test]
fn load_drops_negative_price_lines() {
    let storage = Arc::new(MemoryStore::new());
    let raw = serde_json::json!([
        {"product_id": "a", "name": "A", "unit_price": "-500.00", "quantity": 1},
        {"product_id": "b", "name": "B", "unit_price": "2.00", "quantity": 1}
    ]);
    storage.set(CART_STORAGE_KEY, &raw.to_string()).unwrap();

    let cart = CartStore::load(Arc::clone(&storage));
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].product_id, "b");
    assert_eq!(cart.total(), Decimal::from(2));
}

#[test]
fn add_ignores_negative_price_product() {
    let (storage, mut cart) = empty_cart();
    cart.add_item(&product("p-neg", "-1.00"), 1);
    assert!(cart.is_empty());
    assert_eq!(storage.get(CART_STORAGE_KEY).unwrap(), None);
}

/// A store whose every operation fails, as with a read-only or full disk.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::InvalidKey(key.to_string()))
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::InvalidKey(key.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[test]
fn unreadable_storage_loads_as_empty_cart() {
    let cart = CartStore::load(BrokenStore);
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);
}

#[test]
fn failed_writes_keep_in_memory_cart_authoritative() {
    let mut cart = CartStore::load(BrokenStore);
    cart.add_item(&product("p-1", "100.00"), 2);
    cart.add_item(&product("p-2", "5.50"), 1);
    cart.set_quantity("p-1", 3);
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.total(), Decimal::from_str("305.50").unwrap());

    cart.remove_item("p-2");
    assert_eq!(cart.items().len(), 1);

    cart.clear();
    assert!(cart.is_empty());
}

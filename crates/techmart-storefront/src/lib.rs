//! Client-side storefront state: local storage, the cart, session tokens,
//! and the checkout workflow.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod session;
pub mod storage;

pub use cart::{CartStore, CART_STORAGE_KEY};
pub use checkout::{
    CheckoutBackend, CheckoutFailure, CheckoutOrchestrator, CheckoutSettings, CheckoutState,
    Entry, FailureKind, PaymentOutcome, PaymentWidget, PendingPayment, SubmitOutcome,
    WidgetOutcome,
};
pub use error::{CheckoutError, StorageError};
pub use session::SessionStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore};

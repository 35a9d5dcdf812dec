use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Keys become file names, so only `[A-Za-z0-9._-]` is allowed.
    #[error("invalid storage key \"{0}\"")]
    InvalidKey(String),
}

/// Checkout calls rejected before any backend request is made.
///
/// Backend failures are not errors at this level: they move the orchestrator
/// to [`crate::CheckoutState::Failed`] and are reported through
/// [`crate::SubmitOutcome::Failed`] / [`crate::PaymentOutcome::Failed`].
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A submission is already in flight or awaiting the payment widget.
    #[error("checkout is already in progress ({state})")]
    InFlight { state: &'static str },

    #[error(transparent)]
    Invalid(#[from] techmart_core::ValidationError),

    #[error("no gateway payment is pending")]
    NotAwaitingPayment,
}

//! The hosted payment widget seam.

use std::future::Future;

use techmart_core::{GatewayResponse, PaymentSession};

/// A gateway session bound to the backend order it pays for.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPayment {
    pub order_id: String,
    pub session: PaymentSession,
}

/// How the payment widget closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetOutcome {
    /// The customer paid; carries the signed gateway response.
    Completed(GatewayResponse),
    /// The customer closed the widget without paying.
    Dismissed,
    /// The widget reported an error (card declined, gateway unreachable).
    Failed(String),
}

/// Opens the gateway's checkout UI for a pending payment and resolves once
/// it closes. The orchestrator bounds this with the payment window and drops
/// the future if the window expires.
pub trait PaymentWidget {
    fn open(&self, payment: &PendingPayment) -> impl Future<Output = WidgetOutcome>;
}

//! Order creation and payment endpoints.
//!
//! None of these calls are retried. Each one changes server state, and the
//! caller decides what a failure means for the checkout attempt.

use techmart_core::{Order, OrderDraft, PaymentSession, PaymentVerification};

use super::TechmartClient;
use crate::error::ApiError;

impl TechmartClient {
    /// Creates an order from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the order could not be created. A transport
    /// error here is ambiguous (the order may exist); callers must not resend
    /// automatically.
    pub async fn create_order(&self, draft: &OrderDraft) -> Result<Order, ApiError> {
        let url = self.endpoint(&["orders"])?;
        let request = self.client.post(url.clone()).json(draft);
        let order: Order = self.send_json(request, &url).await?;
        tracing::info!(
            order_id = %order.id,
            payment_method = %draft.payment_method,
            lines = draft.items.len(),
            "order created"
        );
        Ok(order)
    }

    /// Confirms a cash-on-delivery order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any non-2xx status or transport failure.
    pub async fn confirm_cod(&self, order_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint_with_query(
            &["payments", "cod-confirmation"],
            &[("order_id", order_id.to_owned())],
        )?;
        let request = self.client.post(url.clone());
        self.send_expect_success(request, &url).await?;
        tracing::info!(order_id, "cash-on-delivery order confirmed");
        Ok(())
    }

    /// Requests a gateway session for an existing order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any non-2xx status, transport failure, or a body
    /// missing the session fields.
    pub async fn create_gateway_order(&self, order_id: &str) -> Result<PaymentSession, ApiError> {
        let url = self.endpoint_with_query(
            &["payments", "create-razorpay-order"],
            &[("order_id", order_id.to_owned())],
        )?;
        let request = self.client.post(url.clone());
        let session: PaymentSession = self.send_json(request, &url).await?;
        tracing::info!(
            order_id,
            gateway_order_id = %session.razorpay_order_id,
            "gateway session created"
        );
        Ok(session)
    }

    /// Posts the gateway's signed response for server-side verification.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on a signature mismatch (non-2xx) or transport failure.
    pub async fn verify_payment(&self, verification: &PaymentVerification) -> Result<(), ApiError> {
        let url = self.endpoint(&["payments", "verify-payment"])?;
        let request = self.client.post(url.clone()).json(verification);
        self.send_expect_success(request, &url).await?;
        tracing::info!(order_id = %verification.order_id, "payment verified");
        Ok(())
    }
}

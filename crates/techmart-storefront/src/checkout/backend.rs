use std::future::Future;

use techmart_api::{ApiError, TechmartClient};
use techmart_core::{Order, OrderDraft, PaymentSession, PaymentVerification};

/// The four backend calls a checkout attempt makes.
///
/// [`TechmartClient`] is the production implementation; tests substitute an
/// in-memory fake. None of these calls may be retried by the implementation.
pub trait CheckoutBackend {
    fn create_order(&self, draft: &OrderDraft) -> impl Future<Output = Result<Order, ApiError>>;

    fn confirm_cod(&self, order_id: &str) -> impl Future<Output = Result<(), ApiError>>;

    fn create_gateway_order(
        &self,
        order_id: &str,
    ) -> impl Future<Output = Result<PaymentSession, ApiError>>;

    fn verify_payment(
        &self,
        verification: &PaymentVerification,
    ) -> impl Future<Output = Result<(), ApiError>>;
}

impl CheckoutBackend for TechmartClient {
    async fn create_order(&self, draft: &OrderDraft) -> Result<Order, ApiError> {
        TechmartClient::create_order(self, draft).await
    }

    async fn confirm_cod(&self, order_id: &str) -> Result<(), ApiError> {
        TechmartClient::confirm_cod(self, order_id).await
    }

    async fn create_gateway_order(&self, order_id: &str) -> Result<PaymentSession, ApiError> {
        TechmartClient::create_gateway_order(self, order_id).await
    }

    async fn verify_payment(&self, verification: &PaymentVerification) -> Result<(), ApiError> {
        TechmartClient::verify_payment(self, verification).await
    }
}

impl<T: CheckoutBackend + ?Sized> CheckoutBackend for &T {
    fn create_order(&self, draft: &OrderDraft) -> impl Future<Output = Result<Order, ApiError>> {
        (**self).create_order(draft)
    }

    fn confirm_cod(&self, order_id: &str) -> impl Future<Output = Result<(), ApiError>> {
        (**self).confirm_cod(order_id)
    }

    fn create_gateway_order(
        &self,
        order_id: &str,
    ) -> impl Future<Output = Result<PaymentSession, ApiError>> {
        (**self).create_gateway_order(order_id)
    }

    fn verify_payment(
        &self,
        verification: &PaymentVerification,
    ) -> impl Future<Output = Result<(), ApiError>> {
        (**self).verify_payment(verification)
    }
}

use serde::{Deserialize, Serialize};

/// Gateway session issued by `POST /payments/create-razorpay-order`.
///
/// Every field is opaque to the client: it is handed to the payment widget
/// unchanged. `amount` is kept as raw JSON because the gateway expresses it in
/// minor units and the client never does arithmetic on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSession {
    pub key: String,
    pub amount: serde_json::Value,
    pub currency: String,
    pub razorpay_order_id: String,
}

/// Signed payload the payment widget passes to its completion handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

/// Body of `POST /payments/verify-payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub order_id: String,
}

impl PaymentVerification {
    #[must_use]
    pub fn new(response: GatewayResponse, order_id: &str) -> Self {
        Self {
            razorpay_order_id: response.razorpay_order_id,
            razorpay_payment_id: response.razorpay_payment_id,
            razorpay_signature: response.razorpay_signature,
            order_id: order_id.to_string(),
        }
    }
}

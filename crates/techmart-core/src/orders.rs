use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLineItem;
use crate::ValidationError;

/// The HTML5 `input[type=email]` grammar.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid email regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "cod")]
    CashOnDelivery,
    /// Hosted gateway checkout (Razorpay): the customer pays in the gateway
    /// widget and the backend verifies the signed result.
    #[serde(rename = "razorpay")]
    GatewayRedirect,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::CashOnDelivery => write!(f, "cod"),
            PaymentMethod::GatewayRedirect => write!(f, "razorpay"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cod" | "cash" | "cash-on-delivery" => Ok(PaymentMethod::CashOnDelivery),
            "razorpay" | "gateway" | "online" => Ok(PaymentMethod::GatewayRedirect),
            other => Err(format!(
                "unknown payment method \"{other}\"; expected cod or razorpay"
            )),
        }
    }
}

/// Shipping and contact details collected at checkout. Never persisted locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CustomerInfo {
    /// Presence checks plus HTML5 email syntax. No other format validation is applied.
    ///
    /// # Errors
    ///
    /// Returns the first failing field as a [`ValidationError`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        for (label, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(label));
            }
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

/// One entry of an [`OrderDraft`]. `price` is the cart's unit price at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub items: Vec<OrderLine>,
    pub payment_method: PaymentMethod,
}

impl OrderDraft {
    /// Builds a draft from a cart snapshot, preserving cart order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a customer field is blank, the email is
    /// malformed, or `items` is empty.
    pub fn from_snapshot(
        customer: &CustomerInfo,
        items: &[CartLineItem],
        payment_method: PaymentMethod,
    ) -> Result<Self, ValidationError> {
        customer.validate()?;
        if items.is_empty() {
            return Err(ValidationError::EmptyCart);
        }

        Ok(Self {
            customer_name: customer.name.trim().to_string(),
            customer_email: customer.email.trim().to_string(),
            customer_phone: customer.phone.trim().to_string(),
            customer_address: customer.address.trim().to_string(),
            items: items
                .iter()
                .map(|item| OrderLine {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                    price: item.unit_price,
                })
                .collect(),
            payment_method,
        })
    }

    /// Client-side estimate of the order total; the backend's figure is authoritative.
    ///
    /// Saturates at the `Decimal` range instead of overflowing.
    #[must_use]
    pub fn estimated_total(&self) -> Decimal {
        self.items.iter().fold(Decimal::ZERO, |acc, line| {
            acc.saturating_add(line.price.saturating_mul(Decimal::from(line.quantity)))
        })
    }
}

/// Fulfilment status of a backend order.
///
/// Unknown strings are kept verbatim so a newer backend never breaks listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Placed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Placed => "Placed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "placed" => OrderStatus::Placed,
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    /// Strict parse for admin input: only the known statuses are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match OrderStatus::from(s.to_string()) {
            OrderStatus::Other(other) => Err(format!(
                "unknown order status \"{other}\"; expected Placed, Processing, Shipped, Delivered, or Cancelled"
            )),
            known => Ok(known),
        }
    }
}

/// A line of a backend order record.
///
/// Every field is optional on the wire: older backends send `product_name`
/// and omit `price`, and a display-only line must never make a created order
/// unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, alias = "product_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A created order as returned by `POST /orders`, `GET /orders/{id}`, and
/// `GET /admin/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_items")]
    pub items: Vec<OrderItem>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(default = "default_status")]
    pub order_status: OrderStatus,
    /// Wire name of the payment method (`"cod"`, `"razorpay"`), kept as sent.
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::timestamps::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_status() -> OrderStatus {
    OrderStatus::Placed
}

/// Parses `items` entry by entry, skipping entries that are not objects of
/// the expected shape. `null` reads as no items.
fn deserialize_items<'de, D>(deserializer: D) -> Result<Vec<OrderItem>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}

#[cfg(test)]
#[path = "orders_test.rs"]
mod tests;

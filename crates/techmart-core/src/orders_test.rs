use std::str::FromStr;

use super::*;

fn customer() -> CustomerInfo {
    CustomerInfo {
        name: "Rajesh Kumar".to_string(),
        email: "rajesh.kumar@email.com".to_string(),
        phone: "+91-9876543210".to_string(),
        address: "123 MG Road, Bangalore".to_string(),
    }
}

fn line(id: &str, price: &str, quantity: u32) -> CartLineItem {
    CartLineItem {
        product_id: id.to_string(),
        name: format!("Product {id}"),
        unit_price: Decimal::from_str(price).unwrap(),
        image_url: None,
        quantity,
    }
}

#[test]
fn validate_accepts_complete_customer() {
    assert_eq!(customer().validate(), Ok(()));
}

#[test]
fn validate_reports_first_blank_field() {
    let mut c = customer();
    c.phone = "   ".to_string();
    assert_eq!(c.validate(), Err(ValidationError::MissingField("phone")));
}

#[test]
fn validate_rejects_malformed_email() {
    let mut c = customer();
    c.email = "rajesh at email".to_string();
    assert!(matches!(c.validate(), Err(ValidationError::InvalidEmail(_))));
}

#[test]
fn validate_accepts_dotless_domain_like_html5() {
    let mut c = customer();
    c.email = "admin@localhost".to_string();
    assert_eq!(c.validate(), Ok(()));
}

#[test]
fn draft_preserves_cart_order_and_snapshot_prices() {
    let items = vec![line("b", "15999.99", 1), line("a", "25999.99", 2)];
    let draft = OrderDraft::from_snapshot(&customer(), &items, PaymentMethod::GatewayRedirect)
        .expect("draft should build");

    let ids: Vec<&str> = draft.items.iter().map(|l| l.product_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(draft.items[1].price, Decimal::from_str("25999.99").unwrap());
    assert_eq!(draft.estimated_total(), Decimal::from_str("67999.97").unwrap());
}

#[test]
fn draft_rejects_empty_cart() {
    let result = OrderDraft::from_snapshot(&customer(), &[], PaymentMethod::CashOnDelivery);
    assert_eq!(result, Err(ValidationError::EmptyCart));
}

#[test]
fn draft_serializes_to_backend_wire_shape() {
    let items = vec![line("p-1", "12999.99", 1)];
    let draft =
        OrderDraft::from_snapshot(&customer(), &items, PaymentMethod::CashOnDelivery).unwrap();
    let json = serde_json::to_value(&draft).unwrap();

    assert_eq!(json["payment_method"], "cod");
    assert_eq!(json["customer_email"], "rajesh.kumar@email.com");
    assert_eq!(json["items"][0]["product_id"], "p-1");
    assert_eq!(json["items"][0]["quantity"], 1);
    assert!(
        json["items"][0]["price"].is_number(),
        "price must be sent as a JSON number: {json}"
    );
}

#[test]
fn order_status_round_trips_known_and_unknown_values() {
    let known: OrderStatus = serde_json::from_value(serde_json::json!("shipped")).unwrap();
    assert_eq!(known, OrderStatus::Shipped);

    let unknown: OrderStatus = serde_json::from_value(serde_json::json!("Returned")).unwrap();
    assert_eq!(unknown, OrderStatus::Other("Returned".to_string()));
    assert_eq!(serde_json::to_value(&unknown).unwrap(), "Returned");
}

#[test]
fn order_status_from_str_is_strict() {
    assert_eq!(OrderStatus::from_str("Delivered"), Ok(OrderStatus::Delivered));
    assert!(OrderStatus::from_str("Returned").is_err());
}

#[test]
fn payment_method_parses_aliases() {
    assert_eq!(PaymentMethod::from_str("COD"), Ok(PaymentMethod::CashOnDelivery));
    assert_eq!(
        PaymentMethod::from_str("razorpay"),
        Ok(PaymentMethod::GatewayRedirect)
    );
    assert!(PaymentMethod::from_str("bitcoin").is_err());
}

#[test]
fn order_deserializes_backend_record() {
    let json = serde_json::json!({
        "id": "o-1",
        "customer_name": "Priya Sharma",
        "customer_email": "priya.sharma@email.com",
        "items": [{ "product_id": "p-1", "quantity": 1, "price": 12999.99 }],
        "total_amount": 12999.99,
        "order_status": "Placed",
        "created_at": "2025-02-11T09:00:00"
    });
    let order: Order = serde_json::from_value(json).expect("order should parse");
    assert_eq!(order.order_status, OrderStatus::Placed);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.total_amount, Decimal::from_str("12999.99").unwrap());
}

#[test]
fn order_accepts_items_without_price_or_with_product_name() {
    let json = serde_json::json!({
        "id": "o-created",
        "items": [
            { "product_id": "p-1", "quantity": 2, "product_name": "Mixer" },
            "unexpected",
            { "product_id": "p-2", "quantity": 1, "price": 499.0, "name": "Kettle" }
        ]
    });
    let order: Order = serde_json::from_value(json).expect("order should parse");
    assert_eq!(order.id, "o-created");
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].name.as_deref(), Some("Mixer"));
    assert_eq!(order.items[0].price, Decimal::ZERO);
    assert_eq!(order.items[1].price, Decimal::from(499));
}

#[test]
fn order_with_null_items_reads_as_empty() {
    let order: Order =
        serde_json::from_value(serde_json::json!({ "id": "o-2", "items": null })).unwrap();
    assert!(order.items.is_empty());
}

#[test]
fn estimated_total_saturates_instead_of_overflowing() {
    let mut items = vec![line("a", "1", 1), line("b", "1", 1)];
    items[0].unit_price = Decimal::MAX;
    items[1].unit_price = Decimal::MAX;
    let draft = OrderDraft::from_snapshot(&customer(), &items, PaymentMethod::CashOnDelivery)
        .expect("draft should build");
    assert_eq!(draft.estimated_total(), Decimal::MAX);
}

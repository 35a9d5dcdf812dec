use std::str::FromStr;

use super::*;
use crate::admin::{BannerCommands, ProductCommands};

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["techmart"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_products_with_filters() {
    let cli = Cli::try_parse_from([
        "techmart",
        "products",
        "--category",
        "Laptops",
        "--sort",
        "price-desc",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            category: Some(ref c),
            search: None,
            sort: Some(ProductSort::PriceDesc),
        }) if c == "Laptops"
    ));
}

#[test]
fn rejects_unknown_sort() {
    let result = Cli::try_parse_from(["techmart", "products", "--sort", "cheapest"]);
    assert!(result.is_err());
}

#[test]
fn cart_add_defaults_to_one_unit() {
    let cli = Cli::try_parse_from(["techmart", "cart", "add", "p-1"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Add { ref product_id, quantity: 1 }
        }) if product_id == "p-1"
    ));
}

#[test]
fn cart_set_accepts_zero() {
    let cli = Cli::try_parse_from(["techmart", "cart", "set", "p-1", "0"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Set { quantity: 0, .. }
        })
    ));
}

#[test]
fn checkout_defaults_to_cash_on_delivery() {
    let cli = Cli::try_parse_from([
        "techmart",
        "checkout",
        "--name",
        "Asha",
        "--email",
        "asha@example.com",
        "--phone",
        "9999999999",
        "--address",
        "12 MG Road",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Checkout {
            payment: PaymentMethod::CashOnDelivery,
            ..
        })
    ));
}

#[test]
fn checkout_accepts_gateway_payment() {
    let cli = Cli::try_parse_from([
        "techmart",
        "checkout",
        "--name",
        "Asha",
        "--email",
        "asha@example.com",
        "--phone",
        "9999999999",
        "--address",
        "12 MG Road",
        "--payment",
        "razorpay",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Checkout {
            payment: PaymentMethod::GatewayRedirect,
            ..
        })
    ));
}

#[test]
fn checkout_requires_customer_details() {
    let result = Cli::try_parse_from(["techmart", "checkout", "--name", "Asha"]);
    assert!(result.is_err());
}

#[test]
fn parses_admin_order_status() {
    let cli =
        Cli::try_parse_from(["techmart", "admin", "order-status", "ord-1", "shipped"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Admin {
            command: AdminCommands::OrderStatus {
                status: techmart_core::OrderStatus::Shipped,
                ..
            }
        })
    ));
}

#[test]
fn rejects_unknown_order_status() {
    let result = Cli::try_parse_from(["techmart", "admin", "order-status", "ord-1", "lost"]);
    assert!(result.is_err());
}

#[test]
fn parses_admin_product_create_with_image() {
    let cli = Cli::try_parse_from([
        "techmart",
        "admin",
        "product",
        "create",
        "--name",
        "Phone",
        "--price",
        "19999.50",
        "--category",
        "Phones",
        "--stock",
        "4",
        "--image",
        "phone.jpg",
    ])
    .unwrap();
    let Some(Commands::Admin {
        command:
            AdminCommands::Product {
                command: ProductCommands::Create(fields),
            },
    }) = cli.command
    else {
        panic!("expected admin product create");
    };
    assert_eq!(fields.price, Decimal::from_str("19999.50").unwrap());
    assert_eq!(fields.stock, 4);
    assert_eq!(fields.description, "");
    assert_eq!(
        fields.image.as_deref(),
        Some(std::path::Path::new("phone.jpg"))
    );
}

#[test]
fn banner_create_is_active_unless_flagged() {
    let cli = Cli::try_parse_from([
        "techmart",
        "admin",
        "banner",
        "create",
        "--title",
        "Diwali Sale",
        "--image-url",
        "https://cdn.example.com/diwali.jpg",
        "--inactive",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Admin {
            command: AdminCommands::Banner {
                command: BannerCommands::Create { inactive: true, ref link_url, .. }
            }
        }) if link_url == "/"
    ));
}

#[test]
fn fmt_money_uses_two_decimals() {
    assert_eq!(fmt_money(Decimal::from(5)), "\u{20b9}5.00");
    assert_eq!(
        fmt_money(Decimal::from_str("25999.9").unwrap()),
        "\u{20b9}25999.90"
    );
}

#[test]
fn truncate_marks_cut_text() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a very long product name", 6), "a very...");
}

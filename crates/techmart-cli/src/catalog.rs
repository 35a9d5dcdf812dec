//! Read-only storefront queries: products, categories, banners, orders.

use techmart_core::ProductQuery;

use crate::{fmt_money, truncate, Context};

/// # Errors
///
/// Returns an error if the product listing cannot be fetched.
pub(crate) async fn run_products(ctx: &Context, query: &ProductQuery) -> anyhow::Result<()> {
    let products = ctx.client.list_products(query).await?;

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!(
        "{:<38}{:<34}{:<16}{:<14}STOCK",
        "ID", "NAME", "CATEGORY", "PRICE"
    );
    for product in &products {
        let stock = if product.in_stock() {
            product.stock.to_string()
        } else {
            "out of stock".to_string()
        };
        println!(
            "{:<38}{:<34}{:<16}{:<14}{}",
            product.id,
            truncate(&product.name, 30),
            truncate(&product.category, 14),
            fmt_money(product.price),
            stock
        );
    }

    Ok(())
}

/// # Errors
///
/// Returns an error if the product does not exist or cannot be fetched.
pub(crate) async fn run_product(ctx: &Context, product_id: &str) -> anyhow::Result<()> {
    let product = ctx.client.get_product(product_id).await?;

    println!("{}", product.name);
    println!("Price:    {}", fmt_money(product.price));
    println!("Category: {}", product.category);
    println!("Stock:    {}", product.stock);
    if let Some(image) = &product.image_url {
        println!("Image:    {image}");
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }

    Ok(())
}

/// # Errors
///
/// Returns an error if the category list cannot be fetched.
pub(crate) async fn run_categories(ctx: &Context) -> anyhow::Result<()> {
    let categories = ctx.client.list_categories().await?;

    if categories.is_empty() {
        println!("no categories found");
        return Ok(());
    }

    println!("{:<38}{:<20}DESCRIPTION", "ID", "NAME");
    for category in &categories {
        println!(
            "{:<38}{:<20}{}",
            category.id,
            truncate(&category.name, 18),
            truncate(&category.description, 50)
        );
    }

    Ok(())
}

/// # Errors
///
/// Returns an error if the banner list cannot be fetched.
pub(crate) async fn run_banners(ctx: &Context) -> anyhow::Result<()> {
    let banners = ctx.client.list_banners().await?;

    if banners.is_empty() {
        println!("no active banners");
        return Ok(());
    }

    println!("{:<32}LINK", "TITLE");
    for banner in &banners {
        println!(
            "{:<32}{}",
            truncate(&banner.title, 30),
            banner.link_url.as_deref().unwrap_or("\u{2014}")
        );
    }

    Ok(())
}

/// # Errors
///
/// Returns an error if the order does not exist or cannot be fetched.
pub(crate) async fn run_order(ctx: &Context, order_id: &str) -> anyhow::Result<()> {
    let order = ctx.client.get_order(order_id).await?;

    println!("Order {}", order.id);
    println!("Status:   {}", order.order_status);
    println!(
        "Payment:  {}",
        order.payment_method.as_deref().unwrap_or("\u{2014}")
    );
    println!("Customer: {} <{}>", order.customer_name, order.customer_email);
    if let Some(placed) = order.created_at {
        println!("Placed:   {}", placed.format("%Y-%m-%d %H:%M UTC"));
    }
    println!();
    println!("{:<38}{:<6}PRICE", "PRODUCT", "QTY");
    for item in &order.items {
        let label = item.name.as_deref().unwrap_or(&item.product_id);
        println!(
            "{:<38}{:<6}{}",
            truncate(label, 36),
            item.quantity,
            fmt_money(item.price)
        );
    }
    println!();
    println!("Total:    {}", fmt_money(order.total_amount));

    Ok(())
}

use techmart_api::AdminApi;
use techmart_core::OrderStatus;

use crate::{fmt_money, truncate};

pub(crate) async fn run_list_orders(admin: &AdminApi<'_>) -> anyhow::Result<()> {
    let mut orders = admin.list_orders().await?;

    if orders.is_empty() {
        println!("no orders yet");
        return Ok(());
    }

    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    println!(
        "{:<38}{:<18}{:<24}{:<11}{:<10}{:<14}TOTAL",
        "ID", "PLACED", "CUSTOMER", "STATUS", "PAYMENT", "ITEMS"
    );
    for order in &orders {
        let placed = order.created_at.map_or_else(
            || "\u{2014}".to_string(),
            |t| t.format("%Y-%m-%d %H:%M").to_string(),
        );
        let units: u32 = order.items.iter().map(|i| i.quantity).sum();
        println!(
            "{:<38}{:<18}{:<24}{:<11}{:<10}{:<14}{}",
            order.id,
            placed,
            truncate(&order.customer_name, 20),
            order.order_status,
            order.payment_method.as_deref().unwrap_or("\u{2014}"),
            units,
            fmt_money(order.total_amount)
        );
    }

    Ok(())
}

pub(crate) async fn run_update_status(
    admin: &AdminApi<'_>,
    order_id: &str,
    status: &OrderStatus,
) -> anyhow::Result<()> {
    admin.update_order_status(order_id, status).await?;
    println!("order {order_id} is now {status}");
    Ok(())
}

//! Local cart commands. Only `add` talks to the backend (to look up the
//! product's current name and price); everything else is local.

use std::sync::Arc;

use clap::Subcommand;
use techmart_storefront::{CartStore, FileStore};

use crate::{fmt_money, truncate, Context};

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show the cart contents and total
    Show,
    /// Add a product to the cart
    Add {
        product_id: String,
        #[arg(long, default_value = "1")]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove { product_id: String },
    /// Set a line's quantity (0 removes the line)
    Set { product_id: String, quantity: u32 },
    /// Empty the cart
    Clear,
}

/// # Errors
///
/// Returns an error if `add` cannot fetch the product or the product is out
/// of stock.
pub(crate) async fn run_cart(ctx: &Context, command: CartCommands) -> anyhow::Result<()> {
    let mut cart = ctx.cart();
    match command {
        CartCommands::Show => {}
        CartCommands::Add {
            product_id,
            quantity,
        } => {
            let product = ctx.client.get_product(&product_id).await?;
            if !product.in_stock() {
                anyhow::bail!("{} is out of stock", product.name);
            }
            cart.add_item(&product, quantity);
            println!("added {} to cart", product.name);
        }
        CartCommands::Remove { product_id } => cart.remove_item(&product_id),
        CartCommands::Set {
            product_id,
            quantity,
        } => cart.set_quantity(&product_id, quantity),
        CartCommands::Clear => cart.clear(),
    }
    print_cart(&cart);
    Ok(())
}

pub(crate) fn print_cart(cart: &CartStore<Arc<FileStore>>) {
    if cart.is_empty() {
        println!("your cart is empty");
        return;
    }

    println!(
        "{:<38}{:<30}{:<6}{:<14}LINE TOTAL",
        "PRODUCT", "NAME", "QTY", "UNIT PRICE"
    );
    for item in cart.items() {
        println!(
            "{:<38}{:<30}{:<6}{:<14}{}",
            item.product_id,
            truncate(&item.name, 26),
            item.quantity,
            fmt_money(item.unit_price),
            fmt_money(item.line_total())
        );
    }
    println!();
    println!("{} item(s), total {}", cart.item_count(), fmt_money(cart.total()));
}

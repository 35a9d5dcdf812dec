//! The `checkout` command and the terminal stand-in for the gateway widget.

use std::io::{self, BufRead, Write};

use techmart_core::{CustomerInfo, GatewayResponse, PaymentMethod};
use techmart_storefront::{
    CheckoutOrchestrator, CheckoutSettings, Entry, PaymentOutcome, PaymentWidget, PendingPayment,
    SubmitOutcome, WidgetOutcome,
};

use crate::{fmt_money, Context};

/// Place an order for the current cart and settle its payment.
///
/// Cash-on-delivery orders are confirmed immediately. Gateway orders prompt
/// for the payment id and signature from the hosted checkout; a blank answer
/// cancels the payment and keeps the cart.
///
/// # Errors
///
/// Returns an error carrying the customer-facing message when any checkout
/// step fails, or when the customer details are invalid.
pub(crate) async fn run_checkout(
    ctx: &Context,
    customer: &CustomerInfo,
    method: PaymentMethod,
) -> anyhow::Result<()> {
    let mut cart = ctx.cart();
    let mut checkout =
        CheckoutOrchestrator::new(&ctx.client, CheckoutSettings::from_config(&ctx.config));

    if checkout.begin(&cart) == Entry::RedirectToCart {
        println!("your cart is empty; add products with `techmart cart add <product-id>`");
        return Ok(());
    }

    println!(
        "placing {method} order: {} item(s), total {}",
        cart.item_count(),
        fmt_money(cart.total())
    );

    match checkout.submit_order(&mut cart, customer, method).await? {
        SubmitOutcome::Confirmed { order_id } => {
            println!("order {order_id} placed; pay on delivery");
        }
        SubmitOutcome::AwaitingPayment(pending) => {
            println!("order {} created; waiting for payment", pending.order_id);
            match checkout.run_gateway(&mut cart, &TerminalWidget).await? {
                PaymentOutcome::Confirmed { order_id } => {
                    println!("payment verified; order {order_id} confirmed");
                }
                PaymentOutcome::Abandoned { order_id } => {
                    println!("payment cancelled; order {order_id} is unpaid and your cart was kept");
                }
                PaymentOutcome::Failed(failure) => anyhow::bail!("{failure}"),
            }
        }
        SubmitOutcome::Failed(failure) => anyhow::bail!("{failure}"),
    }

    Ok(())
}

/// Prompts on the terminal for the gateway's payment id and signature.
///
/// Stdin is read on a plain thread so an expired payment window can drop the
/// prompt without holding the runtime open.
struct TerminalWidget;

impl PaymentWidget for TerminalWidget {
    async fn open(&self, payment: &PendingPayment) -> WidgetOutcome {
        println!();
        println!("Razorpay checkout");
        println!("  key:            {}", payment.session.key);
        println!("  gateway order:  {}", payment.session.razorpay_order_id);
        println!(
            "  amount:         {} {} (minor units)",
            payment.session.amount, payment.session.currency
        );
        println!("complete the payment, then enter the details below (blank to cancel)");

        let (tx, rx) = tokio::sync::oneshot::channel();
        std::thread::spawn(move || {
            let _ = tx.send(read_payment_details());
        });

        match rx.await {
            Ok(Ok(Some((payment_id, signature)))) => WidgetOutcome::Completed(GatewayResponse {
                razorpay_order_id: payment.session.razorpay_order_id.clone(),
                razorpay_payment_id: payment_id,
                razorpay_signature: signature,
            }),
            Ok(Ok(None)) => WidgetOutcome::Dismissed,
            Ok(Err(e)) => WidgetOutcome::Failed(format!("could not read payment details: {e}")),
            Err(_) => WidgetOutcome::Failed("payment prompt closed unexpectedly".to_string()),
        }
    }
}

fn read_payment_details() -> io::Result<Option<(String, String)>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let Some(payment_id) = prompt(&mut lines, "payment id: ")? else {
        return Ok(None);
    };
    let Some(signature) = prompt(&mut lines, "signature:  ")? else {
        return Ok(None);
    };
    Ok(Some((payment_id, signature)))
}

/// `None` on EOF or a blank line.
fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    stdout.write_all(label.as_bytes())?;
    stdout.flush()?;

    match lines.next() {
        Some(line) => {
            let line = line?;
            let trimmed = line.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        None => Ok(None),
    }
}

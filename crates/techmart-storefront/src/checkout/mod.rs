//! The checkout workflow.
//!
//! [`CheckoutOrchestrator`] turns the cart plus customer details into a
//! backend order, then settles payment through cash-on-delivery confirmation
//! or the hosted gateway. It is a small state machine:
//!
//! ```text
//! Idle ──submit──▶ Submitting ──cod ok──────────────▶ Confirmed
//!                      │      ──session ok──▶ AwaitingGatewayCallback ──verified──▶ Confirmed
//!                      │                              │         │
//!                      └──any failure──▶ Failed ◀─────┘         └──abandon──▶ Idle
//! ```
//!
//! The cart is cleared exactly once, after the backend accepts the order and
//! its payment. Every backend step is bounded by the checkout timeout.

mod backend;
mod gateway;

use std::fmt;
use std::future::Future;
use std::time::Duration;

use techmart_api::ApiError;
use techmart_core::{
    AppConfig, CustomerInfo, GatewayResponse, OrderDraft, PaymentMethod, PaymentSession,
    PaymentVerification,
};
use uuid::Uuid;

use crate::cart::CartStore;
use crate::error::CheckoutError;
use crate::storage::KeyValueStore;

pub use backend::CheckoutBackend;
pub use gateway::{PaymentWidget, PendingPayment, WidgetOutcome};

const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(45);
const DEFAULT_PAYMENT_WINDOW: Duration = Duration::from_secs(900);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// Upper bound on each backend call.
    pub step_timeout: Duration,
    /// How long the payment widget may stay open.
    pub payment_window: Duration,
}

impl CheckoutSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            step_timeout: Duration::from_secs(config.checkout_timeout_secs),
            payment_window: Duration::from_secs(config.payment_window_secs),
        }
    }
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            step_timeout: DEFAULT_STEP_TIMEOUT,
            payment_window: DEFAULT_PAYMENT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    Idle,
    Submitting,
    AwaitingGatewayCallback {
        order_id: String,
        session: PaymentSession,
    },
    Confirmed {
        order_id: String,
    },
    Failed(CheckoutFailure),
}

impl CheckoutState {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::Submitting => "submitting",
            CheckoutState::AwaitingGatewayCallback { .. } => "awaiting_gateway_callback",
            CheckoutState::Confirmed { .. } => "confirmed",
            CheckoutState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend rejected the order. Safe to resubmit.
    OrderNotCreated,
    /// Order creation timed out or its response was unreadable, so an order
    /// may exist without the client knowing its id. Not safe to resubmit.
    OrderOutcomeUnknown,
    /// A cash-on-delivery order exists but its confirmation failed.
    ConfirmationFailed { order_id: String },
    /// An order exists but no gateway session could be created for it.
    PaymentNotStarted { order_id: String },
    /// The gateway reported success but the backend rejected the signature.
    VerificationFailed { order_id: String },
    /// The payment widget itself reported an error.
    GatewayError { order_id: String },
}

/// A failed checkout attempt. `detail` is the underlying cause for logs and
/// diagnostics; [`CheckoutFailure::user_message`] is what the customer sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl CheckoutFailure {
    /// Backend order id, when the order was created before the failure.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        match &self.kind {
            FailureKind::OrderNotCreated | FailureKind::OrderOutcomeUnknown => None,
            FailureKind::ConfirmationFailed { order_id }
            | FailureKind::PaymentNotStarted { order_id }
            | FailureKind::VerificationFailed { order_id }
            | FailureKind::GatewayError { order_id } => Some(order_id),
        }
    }

    /// Whether resubmitting is safe. Once an order may exist a resubmit could
    /// create a second one, so only [`FailureKind::OrderNotCreated`] qualifies.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, FailureKind::OrderNotCreated)
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match &self.kind {
            FailureKind::OrderNotCreated => {
                "We couldn't place your order. Your cart has not changed; please try again."
                    .to_string()
            }
            FailureKind::OrderOutcomeUnknown => {
                "We couldn't confirm whether your order was placed. Your cart has been kept; \
                 please contact support before ordering again."
                    .to_string()
            }
            FailureKind::ConfirmationFailed { order_id } => format!(
                "Your order {order_id} was created but could not be confirmed. \
                 Please contact support with this order ID instead of ordering again."
            ),
            FailureKind::PaymentNotStarted { order_id } => format!(
                "Your order {order_id} was created but the payment could not be started. \
                 Please contact support with this order ID instead of ordering again."
            ),
            FailureKind::VerificationFailed { order_id } => format!(
                "We could not verify the payment for order {order_id}. If you were charged, \
                 contact support with this order ID; do not pay again."
            ),
            FailureKind::GatewayError { order_id } => format!(
                "The payment for order {order_id} did not go through. \
                 Please contact support with this order ID instead of ordering again."
            ),
        }
    }
}

impl fmt::Display for CheckoutFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

/// Result of entering the checkout screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Ready,
    /// Nothing to check out; send the customer back to the cart.
    RedirectToCart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Cash-on-delivery order placed and confirmed; the cart is now empty.
    Confirmed { order_id: String },
    /// Order created; the caller must open the payment widget.
    AwaitingPayment(PendingPayment),
    Failed(CheckoutFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// Payment verified; the cart is now empty.
    Confirmed { order_id: String },
    /// The customer dismissed the widget or the payment window expired.
    Abandoned { order_id: String },
    Failed(CheckoutFailure),
}

pub struct CheckoutOrchestrator<B> {
    backend: B,
    settings: CheckoutSettings,
    state: CheckoutState,
    attempt: Option<Uuid>,
}

impl<B: CheckoutBackend> CheckoutOrchestrator<B> {
    pub fn new(backend: B, settings: CheckoutSettings) -> Self {
        Self {
            backend,
            settings,
            state: CheckoutState::Idle,
            attempt: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Entry guard for the checkout screen.
    ///
    /// An empty cart never reaches `Submitting`. A finished attempt
    /// (`Confirmed` or `Failed`) is reset to `Idle`; an in-flight one is
    /// left alone.
    pub fn begin<S: KeyValueStore>(&mut self, cart: &CartStore<S>) -> Entry {
        if cart.is_empty() {
            tracing::debug!("checkout entered with an empty cart");
            return Entry::RedirectToCart;
        }
        if matches!(
            self.state,
            CheckoutState::Confirmed { .. } | CheckoutState::Failed(_)
        ) {
            self.state = CheckoutState::Idle;
        }
        Entry::Ready
    }

    /// Places an order for the current cart contents.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InFlight`] if an attempt is already submitting
    /// or awaiting the gateway, and [`CheckoutError::Invalid`] for bad customer
    /// details or an empty cart. In both cases no backend call is made and the
    /// state is unchanged. Backend failures are reported as
    /// [`SubmitOutcome::Failed`].
    pub async fn submit_order<S: KeyValueStore>(
        &mut self,
        cart: &mut CartStore<S>,
        customer: &CustomerInfo,
        method: PaymentMethod,
    ) -> Result<SubmitOutcome, CheckoutError> {
        if !matches!(self.state, CheckoutState::Idle | CheckoutState::Failed(_)) {
            return Err(CheckoutError::InFlight {
                state: self.state.name(),
            });
        }
        let draft = OrderDraft::from_snapshot(customer, cart.items(), method)?;

        let attempt = Uuid::new_v4();
        self.attempt = Some(attempt);
        self.state = CheckoutState::Submitting;
        tracing::info!(
            %attempt,
            payment_method = %method,
            lines = draft.items.len(),
            estimated_total = %draft.estimated_total(),
            "submitting order"
        );

        let created = bounded(
            self.settings.step_timeout,
            "create_order",
            self.backend.create_order(&draft),
        )
        .await;
        let order_id = match created {
            Ok(order) => order.id,
            Err(step) => {
                let kind = if step.outcome_unknown {
                    FailureKind::OrderOutcomeUnknown
                } else {
                    FailureKind::OrderNotCreated
                };
                return Ok(SubmitOutcome::Failed(self.fail(kind, step.detail)));
            }
        };

        match method {
            PaymentMethod::CashOnDelivery => {
                let confirmed = bounded(
                    self.settings.step_timeout,
                    "confirm_cod",
                    self.backend.confirm_cod(&order_id),
                )
                .await;
                match confirmed {
                    Ok(()) => Ok(SubmitOutcome::Confirmed {
                        order_id: self.confirm(cart, order_id),
                    }),
                    Err(step) => Ok(SubmitOutcome::Failed(
                        self.fail(FailureKind::ConfirmationFailed { order_id }, step.detail),
                    )),
                }
            }
            PaymentMethod::GatewayRedirect => {
                let session = bounded(
                    self.settings.step_timeout,
                    "create_gateway_order",
                    self.backend.create_gateway_order(&order_id),
                )
                .await;
                match session {
                    Ok(session) => {
                        tracing::info!(
                            %attempt,
                            order_id = %order_id,
                            gateway_order_id = %session.razorpay_order_id,
                            "awaiting gateway payment"
                        );
                        self.state = CheckoutState::AwaitingGatewayCallback {
                            order_id: order_id.clone(),
                            session: session.clone(),
                        };
                        Ok(SubmitOutcome::AwaitingPayment(PendingPayment {
                            order_id,
                            session,
                        }))
                    }
                    Err(step) => Ok(SubmitOutcome::Failed(
                        self.fail(FailureKind::PaymentNotStarted { order_id }, step.detail),
                    )),
                }
            }
        }
    }

    /// Verifies the widget's signed response against the pending order.
    ///
    /// Never re-creates the order: a verification failure leaves the cart
    /// intact and reports the existing order id.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotAwaitingPayment`] unless the state is
    /// `AwaitingGatewayCallback`.
    pub async fn complete_gateway_payment<S: KeyValueStore>(
        &mut self,
        cart: &mut CartStore<S>,
        response: GatewayResponse,
    ) -> Result<PaymentOutcome, CheckoutError> {
        let CheckoutState::AwaitingGatewayCallback { order_id, session } = &self.state else {
            return Err(CheckoutError::NotAwaitingPayment);
        };
        let order_id = order_id.clone();
        if response.razorpay_order_id != session.razorpay_order_id {
            tracing::warn!(
                order_id = %order_id,
                expected = %session.razorpay_order_id,
                received = %response.razorpay_order_id,
                "gateway response names a different gateway order"
            );
        }

        let verification = PaymentVerification::new(response, &order_id);
        let verified = bounded(
            self.settings.step_timeout,
            "verify_payment",
            self.backend.verify_payment(&verification),
        )
        .await;
        match verified {
            Ok(()) => Ok(PaymentOutcome::Confirmed {
                order_id: self.confirm(cart, order_id),
            }),
            Err(step) => Ok(PaymentOutcome::Failed(
                self.fail(FailureKind::VerificationFailed { order_id }, step.detail),
            )),
        }
    }

    /// Cancels a pending gateway payment (or a submission whose future was
    /// dropped) and returns to `Idle`. Returns the abandoned order id, if any.
    /// Other states are left unchanged.
    pub fn abandon(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.state, CheckoutState::Idle) {
            CheckoutState::AwaitingGatewayCallback { order_id, .. } => {
                tracing::info!(
                    attempt = ?self.attempt,
                    order_id = %order_id,
                    "gateway payment abandoned"
                );
                Some(order_id)
            }
            CheckoutState::Submitting => {
                tracing::warn!(attempt = ?self.attempt, "in-flight submission abandoned");
                None
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Opens the payment widget for the pending order and settles the attempt.
    ///
    /// The widget runs for at most the payment window. Dismissal and expiry
    /// both abandon (state `Idle`); a widget error fails the attempt with
    /// [`FailureKind::GatewayError`]; a completed payment is verified.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotAwaitingPayment`] unless the state is
    /// `AwaitingGatewayCallback`.
    pub async fn run_gateway<S: KeyValueStore, W: PaymentWidget>(
        &mut self,
        cart: &mut CartStore<S>,
        widget: &W,
    ) -> Result<PaymentOutcome, CheckoutError> {
        let pending = match &self.state {
            CheckoutState::AwaitingGatewayCallback { order_id, session } => PendingPayment {
                order_id: order_id.clone(),
                session: session.clone(),
            },
            _ => return Err(CheckoutError::NotAwaitingPayment),
        };

        let closed =
            tokio::time::timeout(self.settings.payment_window, widget.open(&pending)).await;
        match closed {
            Ok(WidgetOutcome::Completed(response)) => {
                self.complete_gateway_payment(cart, response).await
            }
            Ok(WidgetOutcome::Dismissed) => {
                self.abandon();
                Ok(PaymentOutcome::Abandoned {
                    order_id: pending.order_id,
                })
            }
            Ok(WidgetOutcome::Failed(reason)) => Ok(PaymentOutcome::Failed(self.fail(
                FailureKind::GatewayError {
                    order_id: pending.order_id,
                },
                reason,
            ))),
            Err(_) => {
                tracing::info!(
                    order_id = %pending.order_id,
                    window_secs = self.settings.payment_window.as_secs(),
                    "payment window expired"
                );
                self.abandon();
                Ok(PaymentOutcome::Abandoned {
                    order_id: pending.order_id,
                })
            }
        }
    }

    fn confirm<S: KeyValueStore>(&mut self, cart: &mut CartStore<S>, order_id: String) -> String {
        cart.clear();
        tracing::info!(attempt = ?self.attempt, order_id = %order_id, "checkout confirmed");
        self.state = CheckoutState::Confirmed {
            order_id: order_id.clone(),
        };
        order_id
    }

    fn fail(&mut self, kind: FailureKind, detail: String) -> CheckoutFailure {
        let failure = CheckoutFailure { kind, detail };
        tracing::warn!(
            attempt = ?self.attempt,
            order_id = failure.order_id().unwrap_or("-"),
            retryable = failure.is_retryable(),
            detail = %failure.detail,
            "checkout failed"
        );
        self.state = CheckoutState::Failed(failure.clone());
        failure
    }
}

/// A failed backend step.
#[derive(Debug)]
struct StepFailure {
    /// Diagnostic text for logs and [`CheckoutFailure::detail`].
    detail: String,
    /// The backend may have applied the call: it timed out, the transport
    /// failed, or the response could not be read.
    outcome_unknown: bool,
}

/// Runs one backend step under `limit`.
async fn bounded<T>(
    limit: Duration,
    step: &'static str,
    call: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, StepFailure> {
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            let outcome_unknown = e.leaves_outcome_unknown();
            tracing::warn!(step, error = %e, outcome_unknown, "checkout step failed");
            Err(StepFailure {
                detail: e.to_string(),
                outcome_unknown,
            })
        }
        Err(_) => {
            tracing::warn!(step, timeout_ms = limit.as_millis(), "checkout step timed out");
            Err(StepFailure {
                detail: format!("{step} timed out after {}ms", limit.as_millis()),
                outcome_unknown: true,
            })
        }
    }
}

#[cfg(test)]
#[path = "../checkout_test.rs"]
mod tests;

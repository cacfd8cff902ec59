//! Order submission: validate, persist, notify the operator, clear the cart

use std::sync::Arc;

use crate::application::errors::{BotError, StorageError};
use crate::application::services::retry::{retry_with_delay, RetryError, RetryPolicy};
use crate::application::views;
use crate::domain::entities::{Order, SessionState, User};
use crate::domain::traits::{Bot, OrderStore};

/// Terminal state of one checkout attempt
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Cart was empty; nothing was contacted and nothing changed
    EmptyCart,
    /// The store write failed; the cart is kept so the user can retry
    PersistFailed(StorageError),
    /// The order is stored and the cart cleared
    Completed {
        order: Order,
        notify_error: Option<RetryError<BotError>>,
    },
}

/// Service that turns a cart into a stored order
pub struct CheckoutService {
    store: Arc<dyn OrderStore>,
    bot: Arc<dyn Bot>,
    operator_chat_id: String,
    notify_policy: RetryPolicy,
}

impl CheckoutService {
    pub fn new(store: Arc<dyn OrderStore>, bot: Arc<dyn Bot>, operator_chat_id: impl Into<String>) -> Self {
        Self {
            store,
            bot,
            operator_chat_id: operator_chat_id.into(),
            notify_policy: RetryPolicy::default(),
        }
    }

    pub fn with_notify_policy(mut self, policy: RetryPolicy) -> Self {
        self.notify_policy = policy;
        self
    }

    pub async fn checkout(&self, user: &User, session: &mut SessionState) -> CheckoutOutcome {
        if session.cart.is_empty() {
            tracing::debug!("Checkout by {} with empty cart", user.id);
            return CheckoutOutcome::EmptyCart;
        }

        let order = Order::new(user, &session.cart);
        if let Err(e) = self.store.insert_order(&order).await {
            tracing::error!("Failed to save order for user {}: {}", user.id, e);
            return CheckoutOutcome::PersistFailed(e);
        }
        tracing::info!(
            "Order saved for user {} ({} lines, total {})",
            order.user_id,
            order.cart.len(),
            order.total()
        );

        let notify_error = self.notify_operator(&order).await.err();
        if let Some(e) = &notify_error {
            tracing::error!("Failed to notify operator about order from {}: {}", order.user_id, e);
        }

        session.clear_cart();
        CheckoutOutcome::Completed { order, notify_error }
    }

    async fn notify_operator(&self, order: &Order) -> Result<(), RetryError<BotError>> {
        let text = views::operator_notification(order);
        let chat_id = self.operator_chat_id.as_str();
        let bot = &self.bot;

        retry_with_delay(self.notify_policy, BotError::is_transient, |attempt| {
            let text = text.as_str();
            async move {
                tracing::debug!("Notifying operator (attempt {})", attempt);
                bot.send_message(chat_id, text).await.map(|_| ())
            }
        })
        .await
    }
}

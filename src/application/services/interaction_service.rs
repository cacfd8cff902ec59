//! Interaction controller - maps actions to cart, catalog, and checkout operations

use std::sync::Arc;

use crate::application::errors::CartError;
use crate::application::messaging::parser::Action;
use crate::application::services::checkout_service::{CheckoutOutcome, CheckoutService};
use crate::application::views::{self, Reply};
use crate::domain::entities::{Catalog, Content, Event, ProductId, SessionState};
use crate::domain::traits::{Bot, SessionStore};

/// Handles one event at a time against the sender's session
pub struct InteractionController {
    catalog: Arc<Catalog>,
    sessions: Arc<dyn SessionStore>,
    bot: Arc<dyn Bot>,
    checkout: CheckoutService,
}

impl InteractionController {
    pub fn new(
        catalog: Arc<Catalog>,
        sessions: Arc<dyn SessionStore>,
        bot: Arc<dyn Bot>,
        checkout: CheckoutService,
    ) -> Self {
        Self {
            catalog,
            sessions,
            bot,
            checkout,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handle an inbound event to completion. Unrecognized payloads are ignored.
    pub async fn handle(&self, event: Event) {
        if let Some(callback_id) = event.content.callback_id() {
            if let Err(e) = self.bot.answer_callback(callback_id, None).await {
                tracing::warn!("Failed to answer callback {}: {}", callback_id, e);
            }
        }

        let Some(payload) = event.content.payload() else {
            return;
        };
        let action = match payload.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                tracing::debug!("[{}] Ignoring: {}", event.chat_id, e);
                return;
            }
        };
        tracing::debug!("[{}] {} -> {:?}", event.chat_id, event.sender, action);

        let handle = self.sessions.session(event.sender.id).await;
        let mut session = handle.lock().await;

        let replies = self.apply(action, &event, &mut session).await;
        for reply in replies {
            self.send(&event.chat_id, reply).await;
        }
    }

    async fn apply(&self, action: Action, event: &Event, session: &mut SessionState) -> Vec<Reply> {
        match action {
            Action::Start => {
                if session.agreed {
                    vec![views::catalog(&self.catalog)]
                } else {
                    vec![views::agreement_prompt()]
                }
            }
            Action::Agree => {
                if !session.agree() {
                    return Vec::new();
                }
                self.delete_prompt(event).await;
                vec![views::catalog(&self.catalog)]
            }
            Action::Catalog => vec![views::catalog(&self.catalog)],
            Action::ShowCart => vec![views::cart(&session.cart)],
            Action::ClearCart => {
                session.clear_cart();
                vec![Reply::text(views::CART_CLEARED), views::catalog(&self.catalog)]
            }
            Action::SelectProduct(product_id) => self.select_product(session, product_id),
            Action::ChooseQuantity { product_id, quantity } => {
                match session.add_to_cart(&self.catalog, product_id, quantity) {
                    Ok(line) => vec![views::added_to_cart(&line.name, quantity)],
                    Err(e) => vec![cart_error_reply(&e)],
                }
            }
            Action::Checkout => self.submit_order(event, session).await,
        }
    }

    fn select_product(&self, session: &mut SessionState, product_id: ProductId) -> Vec<Reply> {
        match self.catalog.find_by_id(product_id) {
            Ok(product) => {
                session.select_product(product_id);
                vec![views::quantity_picker(product)]
            }
            Err(e) => vec![cart_error_reply(&e)],
        }
    }

    async fn submit_order(&self, event: &Event, session: &mut SessionState) -> Vec<Reply> {
        match self.checkout.checkout(&event.sender, session).await {
            CheckoutOutcome::EmptyCart => vec![Reply::text(views::EMPTY_CART)],
            CheckoutOutcome::PersistFailed(_) => vec![Reply::text(views::ORDER_FAILED)],
            CheckoutOutcome::Completed { notify_error: None, .. } => {
                vec![Reply::text(views::ORDER_CONFIRMED)]
            }
            CheckoutOutcome::Completed { notify_error: Some(_), .. } => vec![
                Reply::text(views::OPERATOR_NOT_NOTIFIED),
                Reply::text(views::ORDER_CONFIRMED),
            ],
        }
    }

    async fn delete_prompt(&self, event: &Event) {
        if let Content::Callback { message_id: Some(message_id), .. } = &event.content {
            if let Err(e) = self.bot.delete_message(&event.chat_id, *message_id).await {
                tracing::warn!("Failed to delete agreement prompt: {}", e);
            }
        }
    }

    async fn send(&self, chat_id: &str, reply: Reply) {
        let result = if reply.keyboard.is_empty() {
            self.bot.send_message(chat_id, &reply.text).await
        } else {
            self.bot.send_with_keyboard(chat_id, &reply.text, reply.keyboard).await
        };
        if let Err(e) = result {
            tracing::error!("Failed to send message to {}: {}", chat_id, e);
        }
    }
}

fn cart_error_reply(error: &CartError) -> Reply {
    match error {
        CartError::ProductNotFound(id) => {
            tracing::debug!("Product {} not found", id);
            Reply::text(views::PRODUCT_NOT_FOUND)
        }
        CartError::InvalidQuantity => Reply::text(views::INVALID_QUANTITY),
    }
}

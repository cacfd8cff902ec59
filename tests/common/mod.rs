//! In-process fakes for the chat transport and the order store

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use uludag_market_bot::application::errors::{BotError, StorageError};
use uludag_market_bot::application::services::{CheckoutService, InteractionController, RetryPolicy};
use uludag_market_bot::domain::entities::{Catalog, Event, Order, User};
use uludag_market_bot::domain::traits::{Bot, BotInfo, KeyboardButton, OrderStore, SessionStore};
use uludag_market_bot::infrastructure::storage::MemorySessionStore;

pub const ADMIN_CHAT: &str = "-1001";
pub const USER_ID: i64 = 42;

/// Everything the fakes observed, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send { chat_id: String, text: String, buttons: Vec<String> },
    Answer(String),
    Delete(i64),
    Insert(Order),
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub struct FakeBot {
    log: CallLog,
    admin_results: Mutex<VecDeque<Result<(), BotError>>>,
}

impl FakeBot {
    /// Scripted results for sends to the admin chat; Ok once exhausted
    pub fn new(log: CallLog, admin_results: Vec<Result<(), BotError>>) -> Self {
        Self {
            log,
            admin_results: Mutex::new(admin_results.into()),
        }
    }

    fn record_send(&self, chat_id: &str, text: &str, buttons: Vec<String>) -> Result<String, BotError> {
        self.log.lock().unwrap().push(Call::Send {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            buttons,
        });
        if chat_id == ADMIN_CHAT {
            if let Some(result) = self.admin_results.lock().unwrap().pop_front() {
                result?;
            }
        }
        Ok("1".to_string())
    }
}

#[async_trait]
impl Bot for FakeBot {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        self.record_send(chat_id, text, Vec::new())
    }

    async fn send_with_keyboard(&self, chat_id: &str, text: &str, buttons: Vec<Vec<KeyboardButton>>) -> Result<String, BotError> {
        let data = buttons
            .into_iter()
            .flatten()
            .filter_map(|b| b.callback_data)
            .collect();
        self.record_send(chat_id, text, data)
    }

    async fn answer_callback(&self, callback_id: &str, _text: Option<&str>) -> Result<(), BotError> {
        self.log.lock().unwrap().push(Call::Answer(callback_id.to_string()));
        Ok(())
    }

    async fn delete_message(&self, _chat_id: &str, message_id: i64) -> Result<(), BotError> {
        self.log.lock().unwrap().push(Call::Delete(message_id));
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "1".to_string(),
            name: "fake".to_string(),
            username: "fake_bot".to_string(),
        }
    }
}

pub struct FakeStore {
    log: CallLog,
    fail: bool,
}

#[async_trait]
impl OrderStore for FakeStore {
    async fn insert_order(&self, order: &Order) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Rejected { status: 503, body: "unavailable".to_string() });
        }
        self.log.lock().unwrap().push(Call::Insert(order.clone()));
        Ok(())
    }
}

pub struct Harness {
    pub log: CallLog,
    pub sessions: Arc<MemorySessionStore>,
    pub controller: Arc<InteractionController>,
}

impl Harness {
    pub fn new(admin_results: Vec<Result<(), BotError>>, store_fails: bool) -> Self {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let bot = Arc::new(FakeBot::new(log.clone(), admin_results));
        let store = Arc::new(FakeStore { log: log.clone(), fail: store_fails });
        let sessions = Arc::new(MemorySessionStore::new());

        let checkout = CheckoutService::new(store, bot.clone(), ADMIN_CHAT)
            .with_notify_policy(RetryPolicy::new(3, Duration::from_secs(2)));
        let controller = Arc::new(InteractionController::new(
            Arc::new(Catalog::builtin()),
            sessions.clone(),
            bot,
            checkout,
        ));

        Self { log, sessions, controller }
    }

    pub fn ok() -> Self {
        Self::new(Vec::new(), false)
    }

    pub fn user() -> User {
        User::new(USER_ID).with_username("ali")
    }

    pub async fn press(&self, data: &str) {
        let event = Event::from_callback(USER_ID.to_string(), Self::user(), format!("cb-{}", data), data, Some(100));
        self.controller.handle(event).await;
    }

    pub async fn command(&self, name: &str) {
        let event = Event::from_command(USER_ID.to_string(), Self::user(), name);
        self.controller.handle(event).await;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.log.lock().unwrap())
    }

    /// Texts sent to the user, in order
    pub fn user_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Send { chat_id, text, .. } if chat_id != ADMIN_CHAT => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn admin_sends(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Send { chat_id, .. } if chat_id == ADMIN_CHAT))
            .count()
    }

    pub fn inserts(&self) -> Vec<Order> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Insert(order) => Some(order),
                _ => None,
            })
            .collect()
    }

    pub async fn cart_len(&self) -> usize {
        self.sessions.session(USER_ID).await.lock().await.cart.len()
    }
}

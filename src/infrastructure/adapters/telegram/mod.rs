//! Telegram adapter

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::{self, Event};
use crate::domain::traits::{Bot, BotInfo, KeyboardButton};
use crate::infrastructure::config::{redact_token, PollingConfig};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

impl From<&User> for entities::User {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
        }
    }
}

impl Update {
    /// Convert to a domain event; updates without a sender or payload yield None
    pub fn to_event(&self, parser: &MessageParser) -> Option<Event> {
        if let Some(cb) = &self.callback_query {
            let sender = entities::User::from(&cb.from);
            let chat_id = cb
                .message
                .as_ref()
                .map(|m| m.chat.id)
                .unwrap_or(cb.from.id)
                .to_string();
            return Some(Event::from_callback(
                chat_id,
                sender,
                cb.id.clone(),
                cb.data.clone().unwrap_or_default(),
                cb.message.as_ref().map(|m| m.message_id),
            ));
        }

        let msg = self.message.as_ref()?;
        let sender = entities::User::from(msg.from.as_ref()?);
        let text = msg.text.as_deref()?;
        Some(parser.parse(msg.chat.id.to_string(), text, sender))
    }
}

/// Envelope every Bot API response comes in
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageResult {
    message_id: i64,
}

#[derive(Serialize)]
struct InlineKeyboardButton {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_data: Option<String>,
}

#[derive(Serialize)]
struct ReplyMarkup {
    inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyMarkup>,
}

/// Map a transport failure to a transient or terminal error.
/// The request URL carries the bot token, so it is stripped first.
fn classify_request_error(e: reqwest::Error) -> BotError {
    let e = e.without_url();
    if e.is_timeout() {
        BotError::Timeout(e.to_string())
    } else if e.is_decode() {
        BotError::Parse(e.to_string())
    } else {
        BotError::Network(e.to_string())
    }
}

/// Map a non-success HTTP status to a transient or terminal error
fn classify_status(status: StatusCode, description: Option<String>) -> BotError {
    let detail = description.unwrap_or_else(|| status.to_string());
    if status == StatusCode::TOO_MANY_REQUESTS {
        BotError::RateLimited(detail)
    } else if status.is_server_error() {
        BotError::Network(detail)
    } else {
        BotError::Api(detail)
    }
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    client: Client,
    info: BotInfo,
    polling: PollingConfig,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>, polling: PollingConfig) -> Result<Self, BotError> {
        let client = Client::builder()
            .connect_timeout(polling.request_timeout)
            .build()
            .map_err(|e| BotError::Network(e.without_url().to_string()))?;

        Ok(Self {
            token: token.into(),
            client,
            info: BotInfo {
                id: "unknown".to_string(),
                name: "uludag-market-bot".to_string(),
                username: "uludag_market_bot".to_string(),
            },
            polling,
        })
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    /// Send a request and unwrap the Bot API envelope
    async fn call<T: for<'de> Deserialize<'de>>(&self, request: RequestBuilder, timeout: Duration) -> Result<T, BotError> {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        let body: ApiResponse<T> = match response.json().await {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(classify_request_error(e)),
            Err(_) => return Err(classify_status(status, None)),
        };

        if !status.is_success() || !body.ok {
            return Err(classify_status(status, body.description));
        }

        body.result
            .ok_or_else(|| BotError::Parse("Telegram response without result".to_string()))
    }

    async fn post<B: Serialize + ?Sized, T: for<'de> Deserialize<'de>>(&self, method: &str, body: &B) -> Result<T, BotError> {
        let request = self.client.post(self.api_url(method)).json(body);
        self.call(request, self.polling.request_timeout).await
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: String,
        }

        let request = self.client.get(self.api_url("getMe"));
        let data: BotInfoResponse = self.call(request, self.polling.request_timeout).await?;

        self.info = BotInfo {
            id: data.id.to_string(),
            name: data.first_name,
            username: data.username,
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: u64,
            allowed_updates: Vec<String>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout: self.polling.timeout_secs,
            allowed_updates: vec!["message".to_string(), "callback_query".to_string()],
        };

        // Long poll: the HTTP timeout must outlast the server-side wait
        let timeout = Duration::from_secs(self.polling.timeout_secs) + self.polling.request_timeout;
        let builder = self.client.post(self.api_url("getUpdates")).json(&request);
        self.call(builder, timeout).await
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update], current: i64) -> i64 {
        updates
            .iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
            .max(current)
    }

    /// Register bot commands with Telegram
    pub async fn register_commands(&self) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct Command {
            command: &'static str,
            description: &'static str,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest {
            commands: Vec<Command>,
        }

        let request = SetMyCommandsRequest {
            commands: vec![Command { command: "start", description: "Открыть каталог Uludağ" }],
        };

        let _: bool = self.post("setMyCommands", &request).await?;
        tracing::info!("Registered bot commands with Telegram");
        Ok(())
    }

    pub fn token_hint(&self) -> String {
        redact_token(&self.token)
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {}", chat_id, text);

        let request = SendMessageRequest { chat_id, text, reply_markup: None };
        let result: MessageResult = self.post("sendMessage", &request).await?;
        Ok(result.message_id.to_string())
    }

    async fn send_with_keyboard(&self, chat_id: &str, text: &str, buttons: Vec<Vec<KeyboardButton>>) -> Result<String, BotError> {
        tracing::debug!("Sending with keyboard to {}: {}", chat_id, text);

        let inline_keyboard = buttons
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|btn| InlineKeyboardButton {
                        text: btn.text,
                        callback_data: btn.callback_data,
                    })
                    .collect()
            })
            .collect();

        let request = SendMessageRequest {
            chat_id,
            text,
            reply_markup: Some(ReplyMarkup { inline_keyboard }),
        };
        let result: MessageResult = self.post("sendMessage", &request).await?;
        Ok(result.message_id.to_string())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct AnswerRequest<'a> {
            callback_query_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            text: Option<&'a str>,
        }

        let request = AnswerRequest { callback_query_id: callback_id, text };
        let _: bool = self.post("answerCallbackQuery", &request).await?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: &str, message_id: i64) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct DeleteRequest<'a> {
            chat_id: &'a str,
            message_id: i64,
        }

        let request = DeleteRequest { chat_id, message_id };
        let _: bool = self.post("deleteMessage", &request).await?;
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

//! Message parser - Turns raw chat input into events and actions

use std::fmt;
use std::str::FromStr;

use crate::application::errors::ParseActionError;
use crate::domain::entities::{Content, Event, ProductId, User};

// Payload ids shared by the parser and the rendered keyboards
pub const START: &str = "start";
pub const AGREE: &str = "agree";
pub const SHOW_CART: &str = "show_cart";
pub const CHECKOUT: &str = "checkout";
pub const CATALOG: &str = "catalog";
pub const CLEAR_CART: &str = "clear_cart";
pub const ADD_PREFIX: &str = "add_"; // followed by product id
pub const QUANTITY_PREFIX: &str = "quantity_"; // followed by product id + _ + quantity

/// Every command or button the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Agree,
    ShowCart,
    Checkout,
    Catalog,
    ClearCart,
    /// Product picked from the catalog, quantity not yet chosen
    SelectProduct(ProductId),
    ChooseQuantity { product_id: ProductId, quantity: u32 },
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unrecognized = || ParseActionError(s.to_string());

        match s {
            START => return Ok(Action::Start),
            AGREE => return Ok(Action::Agree),
            SHOW_CART => return Ok(Action::ShowCart),
            CHECKOUT => return Ok(Action::Checkout),
            CATALOG => return Ok(Action::Catalog),
            CLEAR_CART => return Ok(Action::ClearCart),
            _ => {}
        }

        if let Some(rest) = s.strip_prefix(ADD_PREFIX) {
            let product_id = rest.parse::<ProductId>().map_err(|_| unrecognized())?;
            return Ok(Action::SelectProduct(product_id));
        }

        if let Some(rest) = s.strip_prefix(QUANTITY_PREFIX) {
            let (id, quantity) = rest.split_once('_').ok_or_else(unrecognized)?;
            let product_id = id.parse::<ProductId>().map_err(|_| unrecognized())?;
            let quantity = quantity.parse::<u32>().map_err(|_| unrecognized())?;
            if quantity == 0 {
                return Err(unrecognized());
            }
            return Ok(Action::ChooseQuantity { product_id, quantity });
        }

        Err(unrecognized())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Start => f.write_str(START),
            Action::Agree => f.write_str(AGREE),
            Action::ShowCart => f.write_str(SHOW_CART),
            Action::Checkout => f.write_str(CHECKOUT),
            Action::Catalog => f.write_str(CATALOG),
            Action::ClearCart => f.write_str(CLEAR_CART),
            Action::SelectProduct(id) => write!(f, "{}{}", ADD_PREFIX, id),
            Action::ChooseQuantity { product_id, quantity } => {
                write!(f, "{}{}_{}", QUANTITY_PREFIX, product_id, quantity)
            }
        }
    }
}

/// Parses incoming text into structured events
pub struct MessageParser {
    bot_username: Option<String>,
}

impl MessageParser {
    pub fn new() -> Self {
        Self { bot_username: None }
    }

    /// Strip `@<username>` from commands addressed to this bot
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// Parse a text message
    pub fn parse(&self, chat_id: impl Into<String>, text: &str, sender: User) -> Event {
        let text = text.trim();

        match text.strip_prefix('/') {
            Some(cmd_text) => Event::new(chat_id, sender, self.parse_command(cmd_text)),
            None => Event::new(chat_id, sender, Content::Text(text.to_string())),
        }
    }

    fn parse_command(&self, cmd_text: &str) -> Content {
        let head = cmd_text.split_whitespace().next().unwrap_or("");

        let name = match (head.split_once('@'), &self.bot_username) {
            (Some((name, target)), Some(own)) if target.eq_ignore_ascii_case(own) => name,
            (Some((name, _)), None) => name,
            _ => head,
        };

        Content::Command { name: name.to_string() }
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new()
    }
}

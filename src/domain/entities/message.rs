use super::user::User;

/// Inbound payload carried by an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text that is not a command
    Text(String),
    /// `/name` typed by the user; trailing words are dropped
    Command { name: String },
    /// Inline button press
    Callback {
        callback_id: String,
        data: String,
        message_id: Option<i64>,
    },
}

impl Content {
    /// The string the action parser looks at, if any
    pub fn payload(&self) -> Option<&str> {
        match self {
            Content::Text(_) => None,
            Content::Command { name, .. } => Some(name),
            Content::Callback { data, .. } => Some(data),
        }
    }

    pub fn callback_id(&self) -> Option<&str> {
        match self {
            Content::Callback { callback_id, .. } => Some(callback_id),
            _ => None,
        }
    }
}

/// An inbound chat event from one user
#[derive(Debug, Clone)]
pub struct Event {
    pub chat_id: String,
    pub sender: User,
    pub content: Content,
}

impl Event {
    pub fn new(chat_id: impl Into<String>, sender: User, content: Content) -> Self {
        Self {
            chat_id: chat_id.into(),
            sender,
            content,
        }
    }

    pub fn from_command(chat_id: impl Into<String>, sender: User, name: impl Into<String>) -> Self {
        Self::new(chat_id, sender, Content::Command { name: name.into() })
    }

    pub fn from_callback(
        chat_id: impl Into<String>,
        sender: User,
        callback_id: impl Into<String>,
        data: impl Into<String>,
        message_id: Option<i64>,
    ) -> Self {
        Self::new(
            chat_id,
            sender,
            Content::Callback {
                callback_id: callback_id.into(),
                data: data.into(),
                message_id,
            },
        )
    }
}

use std::fmt;

/// Telegram user identifier
pub type UserId = i64;

/// Fallback shown when a user has no public username
pub const UNKNOWN_USERNAME: &str = "Unknown";

/// Represents a chat user
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: UserId,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl User {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Username as recorded on orders, `Unknown` when absent
    pub fn username_or_unknown(&self) -> &str {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(UNKNOWN_USERNAME)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.username, &self.first_name) {
            (Some(username), _) => write!(f, "@{}", username),
            (None, Some(first)) => write!(f, "{}", first),
            (None, None) => write!(f, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_fallback() {
        assert_eq!(User::new(7).username_or_unknown(), "Unknown");
        assert_eq!(User::new(7).with_username("").username_or_unknown(), "Unknown");
        assert_eq!(User::new(7).with_username("ali").username_or_unknown(), "ali");
    }

    #[test]
    fn test_display() {
        assert_eq!(User::new(7).with_username("ali").to_string(), "@ali");
        let named = User { first_name: Some("Ali".to_string()), ..User::new(7) };
        assert_eq!(named.to_string(), "Ali");
        assert_eq!(User::new(7).to_string(), "7");
    }
}

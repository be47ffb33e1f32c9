use serde::{Deserialize, Serialize};

use super::User;

/// The chat message that invoked the custom api.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: String,
    content: String,
    provider: String,
    user: User,
}

impl Message {
    const LEADER: &'static str = "!";

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Who sent the message
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Splits `!name the rest` into `("name", Some("the rest"))`
    pub fn command(&self) -> Option<(&str, Option<&str>)> {
        let mut iter = self
            .content
            .trim()
            .strip_prefix(Self::LEADER)?
            .splitn(2, char::is_whitespace);

        let head = iter.next().filter(|s| !s.is_empty())?;
        let rest = iter.next().map(str::trim).filter(|s| !s.is_empty());
        Some((head, rest))
    }
}

data_model! {
    Message => "message",
}

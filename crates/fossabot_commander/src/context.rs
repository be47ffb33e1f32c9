//! The context fossabot keeps about the chat event that triggered a request.
//!
//! Everything here is read-only once built. Build it with
//! [`Context::from_body`] or [`DataModel::from_value`].
use serde::{Deserialize, Serialize};

#[macro_use]
mod model;
pub use model::DataModel;

mod timestamp;

mod channel;
pub use channel::Channel;

mod message;
pub use message::Message;

mod user;
pub use user::User;

mod role;
pub use role::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    channel: Channel,
    #[serde(default)]
    message: Option<Message>,
}

impl Context {
    /// Parses a raw `/context` response body
    pub fn from_body(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// The channel the request was made in
    pub const fn channel(&self) -> &Channel {
        &self.channel
    }

    /// The chat message that triggered the request.
    ///
    /// This is `None` for automated triggers, such as timers.
    pub const fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

data_model! {
    Context => "context",
}

#[cfg(test)]
mod tests;

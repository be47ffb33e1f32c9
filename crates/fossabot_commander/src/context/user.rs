use serde::{Deserialize, Serialize};

use super::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    provider_id: String,
    login: String,
    display_name: String,
    #[serde(default)]
    roles: Vec<Role>,
}

impl User {
    const ELEVATED: [&'static str; 3] = ["broadcaster", "moderator", "vip"];

    /// The user's id on the streaming platform
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// In the order fossabot sent them
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_role_type(&self, kind: &str) -> bool {
        self.roles
            .iter()
            .any(|role| role.kind().eq_ignore_ascii_case(kind))
    }

    /// Whether the user is the broadcaster, a moderator or a vip
    pub fn is_elevated(&self) -> bool {
        Self::ELEVATED.iter().any(|kind| self.has_role_type(kind))
    }
}

data_model! {
    User => "user",
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

impl Role {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `type` of the role, e.g. `moderator` or `custom`
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

data_model! {
    Role => "role",
}

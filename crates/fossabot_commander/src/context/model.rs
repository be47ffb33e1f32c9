use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{Error, Fields};

/// Keyed, read-only access to a context entity.
///
/// Keys are the snake_case names of the entity's accessors.
pub trait DataModel: Serialize + DeserializeOwned {
    /// Name used in errors
    const NAME: &'static str;

    /// Builds the entity from an already parsed json value
    fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// A snapshot of every field, in declaration order
    fn fields(&self) -> Fields {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Fields::new(),
        }
    }

    fn get(&self, key: &str) -> Result<Value, Error> {
        self.fields()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::InvalidArgument {
                model: Self::NAME,
                key: key.to_string(),
            })
    }

    fn to_json(&self) -> String {
        Value::Object(self.fields()).to_string()
    }
}

macro_rules! data_model {
    ($($ty:ident => $name:literal),* $(,)?) => {
        $(
            impl $crate::context::DataModel for $ty {
                const NAME: &'static str = $name;
            }

            impl ::std::fmt::Display for $ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(&$crate::context::DataModel::to_json(self))
                }
            }
        )*
    };
}

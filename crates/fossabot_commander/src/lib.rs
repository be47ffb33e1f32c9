//! A client for fossabot's custom api.
//!
//! A [`Commander`] validates the token fossabot sent along with a custom api
//! request, optionally fetches the [`Context`] of the chat event and then asks
//! a [`Command`] for the text to send back.
mod util;

mod command;
pub use command::Command;

mod commander;
pub use commander::{Commander, FOSSABOT_API_BASE_URL};

pub mod context;
pub use context::{Channel, Context, DataModel, Message, Role, User};

mod config;
pub use config::Config;

mod error;
pub use error::{ApiError, ApiErrorKind, Error, RateLimit};

pub mod http;
pub use http::{AttoHttpClient, DefaultRequestFactory, HttpClient, RequestFactory};

mod logger;
pub use logger::{Fields, LogFacade, Logger};
